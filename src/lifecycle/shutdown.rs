//! Shutdown fan-out.
//!
//! The HTTP server is the one long-lived listener. It stops accepting on the
//! first trigger and drains in-flight requests; commands those requests are
//! still running keep their own deadlines.

use tokio::sync::broadcast;

/// One-shot stop signal for a running gateway.
///
/// Subscribe before triggering: a receiver created afterwards never fires.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receiver handed to `GatewayServer::run`.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Ask every subscribed server to stop. Safe to call repeatedly or with
    /// nobody listening.
    pub fn trigger(&self) {
        match self.tx.send(()) {
            Ok(listeners) => tracing::info!(listeners, "Shutdown triggered"),
            Err(_) => tracing::debug!("Shutdown triggered with no listeners"),
        }
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_trigger_reaches_server_receiver() {
        let shutdown = Shutdown::new();
        let mut server = shutdown.subscribe();

        shutdown.trigger();
        assert!(server.recv().await.is_ok());
    }

    #[test]
    fn test_trigger_without_listeners_is_harmless() {
        let shutdown = Shutdown::new();
        shutdown.trigger();
        shutdown.trigger();
    }

    #[tokio::test]
    async fn test_late_subscriber_misses_earlier_trigger() {
        let shutdown = Shutdown::new();
        let _early = shutdown.subscribe();
        shutdown.trigger();

        let mut late = shutdown.subscribe();
        assert!(late.try_recv().is_err());
    }
}
