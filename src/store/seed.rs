// Demo records loaded into the in-memory store when SEED_DEMO_DATA is on.

use chrono::{Duration, NaiveDate};

use crate::models::{PersonContact, Site, Task, TaskStatus, TaskType, User};

pub struct DemoData {
    pub sites: Vec<Site>,
    pub users: Vec<User>,
    pub tasks: Vec<Task>,
    pub activities: Vec<String>,
}

pub const MAINTENANCE_ACTIVITIES: &[&str] = &[
    "Air conditioning routine maintenance (Semiannual)",
    "Heating system inspection (Annual)",
    "Water system check - Legionella (Semiannual)",
    "Electrical and lighting maintenance (Annual)",
    "Residual-current breaker test (Annual)",
    "Gate and access automation check (Semiannual)",
    "Elevator routine maintenance (Quarterly)",
    "Elevator mechanical parts cleaning and lubrication (Semiannual)",
    "Air ducts visual inspection (Annual)",
    "Drinking water analysis (Annual)",
    "Temperature/humidity readings check (Monthly)",
    "Photovoltaic plant maintenance (Annual)",
    "Fire extinguishers and emergency signage check (Semiannual)",
    "Intercom maintenance (Annual)",
    "Scheduled maintenance (Monthly)",
    "Scheduled maintenance (Bimonthly)",
    "Scheduled maintenance (Quarterly)",
    "Scheduled maintenance (Semiannual)",
    "Scheduled maintenance (Annual)",
];

fn site(id: &str, name: &str, address: &str) -> Site {
    Site {
        id: id.to_string(),
        name: name.to_string(),
        address: address.to_string(),
        manager: None,
        contact_person: None,
        landline: None,
        other_contacts: None,
    }
}

fn user(id: &str, name: &str, role: &str) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        role: role.to_string(),
    }
}

fn task(id: &str, site_id: &str, description: &str, due: NaiveDate, assignee: &str) -> Task {
    Task {
        id: id.to_string(),
        site_id: site_id.to_string(),
        description: description.to_string(),
        due_date: due,
        start_date: None,
        status: TaskStatus::Pending,
        assignees: vec![assignee.to_string()],
        task_type: TaskType::Maintenance,
        odl_number: None,
    }
}

/// Sample sites, resources and tasks, with due dates placed around `today`
/// so the dashboard and notifications have something to show.
pub fn demo(today: NaiveDate) -> DemoData {
    let mut arezzo = site("site-1", "Arezzo Center", "Via Delle Biole 18, Arezzo");
    arezzo.manager = Some(PersonContact {
        name: "Paolo Gentili".into(),
        phone: Some("333 1112233".into()),
        email: Some("p.gentili@example.com".into()),
    });
    arezzo.landline = Some("0575 123456".into());

    let sites = vec![
        arezzo,
        site("site-2", "Avezzano Center", "Via Avezzano 136, Avezzano"),
        site("site-3", "Pisa Center", "Via Don Minzoni 3, Migliarino Pisano"),
        site("site-4", "Viterbo Center", "Strada Rinaldone 24, Viterbo"),
    ];

    let users = vec![
        user("user-1", "Mario Rossi", "Electrician"),
        user("user-2", "Luca Bianchi", "Plumber"),
        user("user-3", "Paolo Verdi", "HVAC technician"),
        user("user-4", "Anna Neri", "General maintenance"),
    ];

    let day = |offset: i64| today + Duration::days(offset);

    let mut heating = task("task-2", "site-1", "Heating system inspection", day(4), "Luca Bianchi");
    heating.assignees.push("Paolo Verdi".into());
    heating.status = TaskStatus::InProgress;

    let mut extinguishers = task(
        "task-4",
        "site-2",
        "Fire extinguishers and emergency signage check",
        day(-2),
        "Paolo Verdi",
    );
    extinguishers.status = TaskStatus::Completed;

    let mut heat_pump = task("task-6", "site-1", "Heat pump replacement", day(10), "Paolo Verdi");
    heat_pump.task_type = TaskType::Odl;
    heat_pump.start_date = Some(day(8));
    heat_pump.odl_number = Some("ODL-0001".into());

    let tasks = vec![
        task("task-1", "site-4", "Gate and access automation check", day(2), "Mario Rossi"),
        heating,
        task("task-3", "site-3", "Elevator routine maintenance", day(1), "Mario Rossi"),
        extinguishers,
        task("task-5", "site-4", "Residual-current breaker test", day(-5), "Anna Neri"),
        heat_pump,
    ];

    DemoData {
        sites,
        users,
        tasks,
        activities: MAINTENANCE_ACTIVITIES.iter().map(|a| a.to_string()).collect(),
    }
}
