use std::sync::Arc;

use crate::{
    config::Config,
    database::{RedisStore, SubmissionStore},
};

pub struct State {
    pub config: Config,
    pub store: Arc<dyn SubmissionStore>,
}

impl State {
    pub fn new() -> Arc<Self> {
        let config = Config::load();
        let store = Arc::new(RedisStore::new(&config.redis_url));

        Arc::new(Self { config, store })
    }

    pub fn with_store(config: Config, store: Arc<dyn SubmissionStore>) -> Arc<Self> {
        Arc::new(Self { config, store })
    }
}
