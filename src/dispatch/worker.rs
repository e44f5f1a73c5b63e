use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::debug;

use super::{RequestRunner, WorkSource};
use crate::metrics::Outcome;

pub(super) struct WorkerContext<S: ?Sized, R: ?Sized> {
    pub(super) id: usize,
    pub(super) source: Arc<S>,
    pub(super) runner: Arc<R>,
    pub(super) result_tx: mpsc::Sender<Outcome>,
    pub(super) delay: Duration,
}

/// Runs one worker until the work source is empty or the aggregator is gone.
/// Returns the number of tokens the worker claimed.
pub(super) fn spawn_worker<S, R>(ctx: WorkerContext<S, R>) -> JoinHandle<usize>
where
    S: WorkSource + ?Sized + 'static,
    R: RequestRunner + ?Sized + 'static,
{
    tokio::spawn(async move {
        debug!("Worker {} started", ctx.id);
        let mut claimed: usize = 0;
        while let Some(token) = ctx.source.next_token().await {
            claimed = claimed.saturating_add(1);
            let outcome = ctx.runner.run(token).await;
            if ctx.result_tx.send(outcome).await.is_err() {
                debug!("Worker {} stopping: result channel closed", ctx.id);
                break;
            }
            if !ctx.delay.is_zero() {
                sleep(ctx.delay).await;
            }
        }
        debug!("Worker {} exited after {} request(s)", ctx.id, claimed);
        claimed
    })
}
