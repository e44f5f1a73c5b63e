//! Worker pool that drives a fixed number of requests.
//!
//! `C` workers pull tokens from a shared [`WorkSource`], execute one request
//! per token and forward each [`Outcome`] to the aggregator. The result
//! channel closes when the last worker exits.
mod queue;
mod worker;


use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::metrics::{AggregatorConfig, Outcome, spawn_aggregator};

pub use queue::{QueueWorkSource, WorkSource};
use worker::{WorkerContext, spawn_worker};

/// Capacity of the worker to aggregator channel.
pub const RESULT_CHANNEL_CAPACITY: usize = 100;

/// Performs the request for one token.
#[async_trait]
pub trait RequestRunner: Send + Sync {
    async fn run(&self, token: usize) -> Outcome;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchPhase {
    Idle,
    Dispatching,
    Draining,
    Done,
}

/// Coordinates the workers and the aggregator for one run.
#[derive(Debug)]
pub struct Dispatcher {
    requests: usize,
    concurrency: usize,
    delay: Duration,
    phase: DispatchPhase,
}

impl Dispatcher {
    #[must_use]
    pub const fn new(requests: usize, concurrency: usize, delay: Duration) -> Self {
        Self {
            requests,
            concurrency,
            delay,
            phase: DispatchPhase::Idle,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> DispatchPhase {
        self.phase
    }

    fn transition(&mut self, next: DispatchPhase) {
        debug!("Dispatcher {:?} -> {:?}", self.phase, next);
        self.phase = next;
    }

    /// Executes `requests` requests through `runner` and returns every
    /// outcome in arrival order.
    pub async fn run<R>(&mut self, runner: Arc<R>, aggregator: AggregatorConfig) -> Vec<Outcome>
    where
        R: RequestRunner + ?Sized + 'static,
    {
        let source = Arc::new(QueueWorkSource::preloaded(self.requests));
        self.run_with_source(source, runner, aggregator).await
    }

    /// Same as [`Dispatcher::run`] with a caller-provided work source.
    pub async fn run_with_source<S, R>(
        &mut self,
        source: Arc<S>,
        runner: Arc<R>,
        aggregator: AggregatorConfig,
    ) -> Vec<Outcome>
    where
        S: WorkSource + ?Sized + 'static,
        R: RequestRunner + ?Sized + 'static,
    {
        let (result_tx, result_rx) = mpsc::channel(RESULT_CHANNEL_CAPACITY);
        let aggregator = spawn_aggregator(result_rx, aggregator);

        self.transition(DispatchPhase::Dispatching);
        let mut workers = Vec::with_capacity(self.concurrency);
        for id in 0..self.concurrency {
            workers.push(spawn_worker(WorkerContext {
                id,
                source: Arc::clone(&source),
                runner: Arc::clone(&runner),
                result_tx: result_tx.clone(),
                delay: self.delay,
            }));
        }
        drop(result_tx);

        let mut claimed: usize = 0;
        for handle in workers {
            match handle.await {
                Ok(count) => claimed = claimed.saturating_add(count),
                Err(err) => warn!("Worker task failed: {}", err),
            }
        }
        debug!("Workers claimed {} token(s)", claimed);

        self.transition(DispatchPhase::Draining);
        let outcomes = match aggregator.await {
            Ok(outcomes) => outcomes,
            Err(err) => {
                warn!("Aggregator task failed: {}", err);
                Vec::new()
            }
        };

        self.transition(DispatchPhase::Done);
        outcomes
    }
}
