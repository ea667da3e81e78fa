pub mod notification;
pub mod task;

use serde::{Deserialize, Serialize};

pub use notification::{Notification, NotificationKind};
pub use task::{Task, TaskPatch, TaskStatus, TaskType};

/// A named contact attached to a site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonContact {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// An extra contact listed on a site, addressable by its own id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherContact {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A location where maintenance work is carried out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    /// Generated on create when the client leaves it empty.
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager: Option<PersonContact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<PersonContact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_contacts: Option<Vec<OtherContact>>,
}

/// A person who can be assigned to tasks. Tasks refer to users by `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub role: String,
}
