//! Rendezvous channel between block adapters and the redraw scheduler.
//!
//! A send only completes once the scheduler has taken the signal, so a burst
//! of updates waits on the consumer instead of piling up in a queue.

use tokio::sync::{mpsc, oneshot};

#[derive(Debug)]
struct RedrawSignal {
    block: String,
    ack: oneshot::Sender<()>,
}

/// Producer side, cloned into every block handle.
#[derive(Debug, Clone)]
pub struct RedrawSender {
    tx: mpsc::Sender<RedrawSignal>,
}

/// Consumer side, owned by the scheduler.
#[derive(Debug)]
pub struct RedrawReceiver {
    rx: mpsc::Receiver<RedrawSignal>,
}

pub fn channel() -> (RedrawSender, RedrawReceiver) {
    let (tx, rx) = mpsc::channel(1);
    (RedrawSender { tx }, RedrawReceiver { rx })
}

impl RedrawSender {
    /// Wake the scheduler and wait until it has accepted the signal.
    /// Returns `false` once the scheduler is gone.
    pub async fn signal(&self, block: &str) -> bool {
        let (ack, accepted) = oneshot::channel();
        let signal = RedrawSignal {
            block: block.to_string(),
            ack,
        };
        if self.tx.send(signal).await.is_err() {
            return false;
        }
        accepted.await.is_ok()
    }
}

impl RedrawReceiver {
    /// Wait for the next signal. The payload is informational only.
    pub async fn recv(&mut self) -> Option<String> {
        let signal = self.rx.recv().await?;
        let _ = signal.ack.send(());
        Some(signal.block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn send_completes_only_after_receipt() {
        let (tx, mut rx) = channel();

        let sender = tokio::spawn(async move { tx.signal("clock").await });
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!sender.is_finished());

        assert_eq!(rx.recv().await.as_deref(), Some("clock"));
        assert!(sender.await.unwrap());
    }

    #[tokio::test]
    async fn signal_fails_when_scheduler_dropped() {
        let (tx, rx) = channel();
        drop(rx);
        assert!(!tx.signal("wifi").await);
    }

    #[tokio::test]
    async fn recv_ends_when_all_senders_dropped() {
        let (tx, mut rx) = channel();
        drop(tx);
        assert_eq!(rx.recv().await, None);
    }
}
