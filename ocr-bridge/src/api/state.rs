use std::sync::Arc;

use crate::config::Config;
use crate::ocr::OcrBridge;
use crate::queue::{AmqpPublisher, ResultPublisher};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub bridge: Arc<OcrBridge>,
    pub publisher: Arc<dyn ResultPublisher>,
}

impl AppState {
    pub fn new(config: Config, publisher: Arc<dyn ResultPublisher>) -> Self {
        let bridge = Arc::new(OcrBridge::new(&config.ocr));
        Self {
            config: Arc::new(config),
            bridge,
            publisher,
        }
    }

    /// State backed by the RabbitMQ publisher described in `config.queue`.
    pub fn from_config(config: Config) -> Self {
        let publisher: Arc<dyn ResultPublisher> = Arc::new(AmqpPublisher::new(&config.queue));
        Self::new(config, publisher)
    }
}
