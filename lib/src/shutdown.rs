use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::log::{error, info};

pub struct Shutdown;

impl Shutdown {
    pub async fn signal(message: &str) {
        let ctrl_c = async {
            if let Err(error) = signal::ctrl_c().await {
                error!("Failed to install Ctrl+C handler: {error}");
                std::future::pending::<()>().await;
            }
        };

        let terminate = async {
            match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                },
                Err(error) => {
                    error!("Failed to install SIGTERM handler: {error}");
                    std::future::pending::<()>().await;
                },
            }
        };

        tokio::select! {
            _ = ctrl_c => {},
            _ = terminate => {},
        }

        info!("{message}");
    }

    /// Resolves on a termination signal or when `token` is cancelled, and
    /// cancels `token` either way so campaigns in flight stop at their next check.
    pub async fn signal_with_token(
        message: &str,
        token: CancellationToken,
    ) {
        tokio::select! {
            _ = Self::signal(message) => {},
            _ = token.cancelled() => {
                info!("{message}");
            },
        }

        token.cancel();
    }
}
