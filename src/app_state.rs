use crate::config::Config;
use crate::scheduling::Scheduler;
use crate::store::Store;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub scheduler: Scheduler,
    pub config: Config,
}

impl AppState {
    pub fn new(store: Store, config: Config) -> Self {
        Self {
            store: Arc::new(store),
            scheduler: Scheduler::new(config.conflict_mode, config.conflict_policy),
            config,
        }
    }
}
