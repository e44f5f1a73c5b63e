use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc};

/// Hands out request tokens to workers, first come first served.
#[async_trait]
pub trait WorkSource: Send + Sync {
    /// Next token, or `None` once the source is exhausted.
    async fn next_token(&self) -> Option<usize>;
}

/// Pre-loaded, closed queue of `0..total` tokens shared by all workers.
#[derive(Debug, Clone)]
pub struct QueueWorkSource {
    rx: Arc<Mutex<mpsc::Receiver<usize>>>,
}

impl QueueWorkSource {
    /// Fills a bounded queue with `total` tokens and closes it.
    #[must_use]
    pub fn preloaded(total: usize) -> Self {
        let (tx, rx) = mpsc::channel(total.max(1));
        for token in 0..total {
            if tx.try_send(token).is_err() {
                break;
            }
        }
        drop(tx);
        Self {
            rx: Arc::new(Mutex::new(rx)),
        }
    }
}

#[async_trait]
impl WorkSource for QueueWorkSource {
    async fn next_token(&self) -> Option<usize> {
        self.rx.lock().await.recv().await
    }
}
