use std::sync::Arc;

use ch_ai::AiClient;
use ch_deploy::Dispatcher;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub dispatcher: Arc<Dispatcher>,
    pub ai: AiClient,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let dispatcher = Arc::new(Dispatcher::new(config.deploy_config()));
        let ai = AiClient::new(config.groq_api_key.clone());
        Self { config, dispatcher, ai }
    }
}
