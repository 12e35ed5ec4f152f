//! Delivery of analysis results to the message broker.
//!
//! [`ResultPublisher`] is the seam the HTTP layer talks to; [`AmqpPublisher`]
//! is the RabbitMQ implementation used in production.

mod amqp;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::AnalysisResult;

pub use amqp::AmqpPublisher;

/// Publishes one analysis result. Failures are returned to the caller, never retried.
#[async_trait]
pub trait ResultPublisher: Send + Sync {
    async fn publish(&self, result: &AnalysisResult) -> Result<()>;

    /// Name of the queue results are delivered to.
    fn destination(&self) -> &str;

    /// Whether the publisher has enough configuration to attempt delivery.
    fn is_configured(&self) -> bool {
        true
    }
}
