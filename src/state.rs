use std::sync::Mutex;

use crate::config::AppConfig;
use crate::services::api::MarketplaceApi;
use crate::services::reactions::ReactionCache;

pub struct AppState {
    pub config: AppConfig,
    pub api: Box<dyn MarketplaceApi>,
    pub reactions: Mutex<ReactionCache>,
}

impl AppState {
    pub fn new(config: AppConfig, api: Box<dyn MarketplaceApi>) -> Self {
        Self {
            config,
            api,
            reactions: Mutex::new(ReactionCache::new()),
        }
    }
}
