use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info};

/// One-shot stop flag shared by the server, the signal task and cleanup.
///
/// The flag only ever flips from `false` to `true`; receivers that subscribe
/// after the flip still observe it.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    stop: watch::Sender<bool>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        let (stop, _) = watch::channel(false);
        Self { stop }
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.stop.subscribe()
    }

    /// Flip the flag. Repeated calls are no-ops.
    pub fn shutdown(&self) {
        let flipped = self.stop.send_if_modified(|stopping| {
            let first = !*stopping;
            *stopping = true;
            first
        });
        if flipped {
            info!("Initiating graceful shutdown");
        }
    }

    /// Wait for SIGINT or SIGTERM, then call [`shutdown`](Self::shutdown).
    pub async fn wait_for_signal(&self) {
        shutdown_signal().await;
        self.shutdown();
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves on SIGINT (Ctrl+C) or SIGTERM.
///
/// A signal whose handler fails to install is logged and ignored.
pub async fn shutdown_signal() {
    let interrupt = async {
        match signal::ctrl_c().await {
            Ok(()) => "SIGINT",
            Err(e) => {
                error!(error = %e, "Ctrl+C handler unavailable");
                std::future::pending().await
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                "SIGTERM"
            }
            Err(e) => {
                error!(error = %e, "SIGTERM handler unavailable");
                std::future::pending().await
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<&str>();

    let received = tokio::select! {
        name = interrupt => name,
        name = terminate => name,
    };
    info!(signal = received, "Stopping server");
}

/// Resolves once the flag behind `rx` is set, or its coordinator is gone.
pub(crate) async fn wait_for_shutdown(mut rx: watch::Receiver<bool>) {
    let _ = rx.wait_for(|stopping| *stopping).await;
}
