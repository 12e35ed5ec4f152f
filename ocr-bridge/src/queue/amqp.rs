use std::time::Duration;

use async_trait::async_trait;
use lapin::{
    options::{BasicPublishOptions, ConfirmSelectOptions, QueueDeclareOptions},
    types::FieldTable,
    BasicProperties, Connection, ConnectionProperties,
};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::config::QueueConfig;
use crate::error::{BridgeError, Result};
use crate::models::AnalysisResult;

use super::ResultPublisher;

/// AMQP delivery mode 2: the broker writes the message to disk.
const PERSISTENT: u8 = 2;

/// Publishes results to a durable RabbitMQ queue.
///
/// Every call opens its own connection and closes it afterwards; nothing is
/// pooled between requests.
#[derive(Debug, Clone)]
pub struct AmqpPublisher {
    url: Option<String>,
    queue: String,
    connect_timeout: Duration,
}

impl AmqpPublisher {
    pub fn new(config: &QueueConfig) -> Self {
        Self {
            url: config.url.clone(),
            queue: config.result_queue.clone(),
            connect_timeout: Duration::from_secs(config.connect_timeout_secs),
        }
    }

    async fn connect(&self) -> Result<Connection> {
        let url = self
            .url
            .as_deref()
            .ok_or_else(|| BridgeError::Publish("RABBITMQ_URL is not set".to_string()))?;

        let connection = timeout(
            self.connect_timeout,
            Connection::connect(url, ConnectionProperties::default()),
        )
        .await
        .map_err(|_| {
            BridgeError::Timeout(format!(
                "broker connection not established within {} seconds",
                self.connect_timeout.as_secs()
            ))
        })??;

        Ok(connection)
    }

    async fn publish_on(&self, connection: &Connection, payload: &[u8]) -> Result<()> {
        let channel = connection.create_channel().await?;
        channel
            .confirm_select(ConfirmSelectOptions::default())
            .await?;

        channel
            .queue_declare(
                &self.queue,
                QueueDeclareOptions {
                    durable: true,
                    ..QueueDeclareOptions::default()
                },
                FieldTable::default(),
            )
            .await?;

        let properties = BasicProperties::default()
            .with_delivery_mode(PERSISTENT)
            .with_content_type("application/json".into());

        let confirmation = channel
            .basic_publish(
                "",
                &self.queue,
                BasicPublishOptions::default(),
                payload,
                properties,
            )
            .await?
            .await?;

        if confirmation.is_nack() {
            return Err(BridgeError::Publish(format!(
                "broker rejected message for queue '{}'",
                self.queue
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl ResultPublisher for AmqpPublisher {
    async fn publish(&self, result: &AnalysisResult) -> Result<()> {
        let payload = serde_json::to_vec(result)?;
        debug!(
            queue = %self.queue,
            payload = %String::from_utf8_lossy(&payload),
            "Publishing analysis result"
        );

        let connection = self.connect().await?;
        let outcome = self.publish_on(&connection, &payload).await;

        if let Err(e) = connection.close(200, "OK").await {
            warn!(error = %e, "Failed to close broker connection");
        }

        match &outcome {
            Ok(()) => info!(
                queue = %self.queue,
                note_image_id = %result.note_image_id(),
                "Analysis result published"
            ),
            Err(e) => warn!(queue = %self.queue, error = %e, "Failed to publish analysis result"),
        }

        outcome
    }

    fn destination(&self) -> &str {
        &self.queue
    }

    fn is_configured(&self) -> bool {
        self.url.is_some()
    }
}
