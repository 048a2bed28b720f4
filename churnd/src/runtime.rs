use std::time::Duration;

use tracing::info;

use crate::sweep::Sweeper;

/// Drive the sweeper: one sweep immediately, then one per interval,
/// never overlapping. A termination signal stops the loop and drops any
/// in-flight sweep; a delete already accepted by the API server is not
/// rolled back.
pub async fn run(sweeper: Sweeper, interval: Duration) {
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            report = sweeper.sweep() => report.log(),
        }
        tokio::select! {
            _ = &mut shutdown => break,
            _ = tokio::time::sleep(interval) => {}
        }
    }
    info!("termination signal received, stopping poll loop");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(
            tokio::signal::unix::SignalKind::terminate(),
        )
        .expect("failed to install signal handler")
        .recv()
        .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
