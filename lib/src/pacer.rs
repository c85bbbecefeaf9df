use async_trait::async_trait;
use std::time::Duration;

/// Suspension point between two sends.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(
        &self,
        duration: Duration,
    );
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn pause(
        &self,
        duration: Duration,
    ) {
        tokio::time::sleep(duration).await;
    }
}
