//! Termination signals. Interrupt and terminate are treated the same.

use tracing::{debug, error};

/// Resolves on the first SIGINT (Ctrl+C) or SIGTERM.
pub async fn termination_requested() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = interrupt() => {}
                    _ = terminate.recv() => debug!("Received SIGTERM"),
                }
            }
            Err(e) => {
                error!("Cannot listen for SIGTERM: {}", e);
                interrupt().await;
            }
        }
    }

    #[cfg(not(unix))]
    interrupt().await;
}

async fn interrupt() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => debug!("Received interrupt"),
        Err(e) => {
            error!("Cannot listen for interrupt: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
