//! Step Runner - Runs steps of a sequence after a delay
//!
//! Each step suspends once, looks its index up in the sequence, reports the
//! text it found (or its absence) and then succeeds or fails. On top of that
//! single operation the runner offers three ways of composing steps:
//! 1. Independent - steps are scheduled separately and finish in any order
//! 2. Chained - each step starts only after the previous one succeeded
//! 3. Batch - all steps run concurrently and are aggregated in index order

use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use super::delay::DelayStrategy;
use super::error::StepError;
use super::reporter::{ConsoleReporter, ReportEvent, Reporter};
use super::result::{ChainResult, StepOutcome};
use crate::sequence::{ConfigError, RunnerConfig, StepSequence};

/// Reported once when every step of a chain succeeded
pub const DEFAULT_ARRIVAL_MESSAGE: &str = "You arrived at the café!";

/// Reported once when a chain settled
pub const DEFAULT_FINAL_MESSAGE: &str = "Final log";

#[derive(Clone)]
pub struct StepRunner {
    sequence: StepSequence,
    delay: DelayStrategy,
    reporter: Arc<dyn Reporter>,
    arrival_message: String,
    final_message: String,
}

impl StepRunner {
    /// Create a runner that reports to the console with the default fixed delay
    pub fn new(sequence: StepSequence) -> Self {
        Self {
            sequence,
            delay: DelayStrategy::default(),
            reporter: Arc::new(ConsoleReporter::new()),
            arrival_message: DEFAULT_ARRIVAL_MESSAGE.to_string(),
            final_message: DEFAULT_FINAL_MESSAGE.to_string(),
        }
    }

    pub fn from_config(config: &RunnerConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.sequence())
            .delay(config.delay_strategy()?)
            .arrival_message(&config.arrival_message)
            .final_message(&config.final_message))
    }

    pub fn delay(mut self, delay: DelayStrategy) -> Self {
        self.delay = delay;
        self
    }

    pub fn reporter<R: Reporter + 'static>(mut self, reporter: R) -> Self {
        self.reporter = Arc::new(reporter);
        self
    }

    pub fn shared_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn arrival_message(mut self, message: &str) -> Self {
        self.arrival_message = message.to_string();
        self
    }

    pub fn final_message(mut self, message: &str) -> Self {
        self.final_message = message.to_string();
        self
    }

    pub fn sequence(&self) -> &StepSequence {
        &self.sequence
    }

    pub fn delay_strategy(&self) -> DelayStrategy {
        self.delay
    }

    /// Run one step: wait, report the step text, then succeed or fail
    ///
    /// The text (or its absence) is reported before the outcome is decided,
    /// so a missing step still produces a report.
    #[instrument(skip(self))]
    pub async fn run_step(&self, index: usize) -> Result<String, StepError> {
        let delay = self.delay.next_delay();
        debug!(delay_ms = delay.as_millis() as u64, "Waiting before step");
        tokio::time::sleep(delay).await;

        let text = self.sequence.get(index);
        self.reporter.report(ReportEvent::step(index, text));

        match text {
            Some(text) => {
                debug!("Step succeeded");
                Ok(text.to_string())
            }
            None => {
                warn!(len = self.sequence.len(), "Step index out of range");
                Err(StepError::NotFound { index })
            }
        }
    }

    /// Schedule a step on the runtime without waiting for it
    ///
    /// The step runs to completion and reports even if the handle is dropped.
    pub fn spawn_step(&self, index: usize) -> JoinHandle<Result<String, StepError>> {
        let runner = self.clone();
        tokio::spawn(async move { runner.run_step(index).await })
    }

    /// Run steps independently and collect their outcomes in completion order
    pub async fn run_independent(
        &self,
        indices: impl IntoIterator<Item = usize>,
    ) -> Vec<(usize, StepOutcome)> {
        self.run_independent_with(indices, |_, _| {}).await
    }

    /// Like [`StepRunner::run_independent`], calling `on_settled` as each step
    /// settles, before any other step gets to report
    #[instrument(skip_all)]
    pub async fn run_independent_with<F>(
        &self,
        indices: impl IntoIterator<Item = usize>,
        mut on_settled: F,
    ) -> Vec<(usize, StepOutcome)>
    where
        F: FnMut(usize, &StepOutcome),
    {
        let mut pending: FuturesUnordered<_> = indices
            .into_iter()
            .map(|index| async move { (index, StepOutcome::from(self.run_step(index).await)) })
            .collect();

        let mut outcomes = Vec::with_capacity(pending.len());
        while let Some((index, outcome)) = pending.next().await {
            on_settled(index, &outcome);
            outcomes.push((index, outcome));
        }
        outcomes
    }

    /// Start a chain over `indices`; attach hooks, then call [`Chain::run`]
    pub fn chain(&self, indices: impl IntoIterator<Item = usize>) -> Chain<'_> {
        Chain {
            runner: self,
            indices: indices.into_iter().collect(),
            on_arrival: None,
            on_error: None,
            finally: None,
        }
    }

    /// Run a chain without hooks
    pub async fn run_chain(&self, indices: impl IntoIterator<Item = usize>) -> ChainResult {
        self.chain(indices).run().await
    }

    /// Run every step concurrently and aggregate the texts in request order
    ///
    /// Completes once every step has settled. If any step failed, the first
    /// failure to be observed is returned and no aggregate is produced.
    #[instrument(skip_all)]
    pub async fn run_all(
        &self,
        indices: impl IntoIterator<Item = usize>,
    ) -> Result<Vec<String>, StepError> {
        let indices: Vec<usize> = indices.into_iter().collect();

        let mut pending: FuturesUnordered<_> = indices
            .iter()
            .copied()
            .enumerate()
            .map(|(slot, index)| async move { (slot, self.run_step(index).await) })
            .collect();

        let mut values: Vec<Option<String>> = vec![None; indices.len()];
        let mut first_failure = None;

        while let Some((slot, result)) = pending.next().await {
            match result {
                Ok(text) => values[slot] = Some(text),
                Err(err) => {
                    first_failure.get_or_insert(err);
                }
            }
        }

        if let Some(err) = first_failure {
            warn!(index = err.index(), "Batch failed");
            return Err(err);
        }

        debug!(steps = values.len(), "Batch completed");
        Ok(values.into_iter().flatten().collect())
    }
}

type ArrivalHook<'a> = Box<dyn FnOnce(&str) + Send + 'a>;
type ErrorHook<'a> = Box<dyn FnOnce(&StepError) + Send + 'a>;
type FinallyHook<'a> = Box<dyn FnOnce() + Send + 'a>;

/// A sequence of dependent steps with arrival, error and finally hooks
pub struct Chain<'a> {
    runner: &'a StepRunner,
    indices: Vec<usize>,
    on_arrival: Option<ArrivalHook<'a>>,
    on_error: Option<ErrorHook<'a>>,
    finally: Option<FinallyHook<'a>>,
}

impl<'a> Chain<'a> {
    /// Called once with the arrival message when every step succeeded
    pub fn on_arrival<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&str) + Send + 'a,
    {
        self.on_arrival = Some(Box::new(f));
        self
    }

    /// Called once with the failure that aborted the chain
    pub fn on_error<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&StepError) + Send + 'a,
    {
        self.on_error = Some(Box::new(f));
        self
    }

    /// Called once after the chain settled, whatever the outcome
    pub fn finally<F>(mut self, f: F) -> Self
    where
        F: FnOnce() + Send + 'a,
    {
        self.finally = Some(Box::new(f));
        self
    }

    #[instrument(skip_all)]
    pub async fn run(self) -> ChainResult {
        let Chain {
            runner,
            indices,
            on_arrival,
            on_error,
            finally,
        } = self;
        let run_id = uuid::Uuid::new_v4().to_string();
        info!(run_id = %run_id, steps = indices.len(), "Starting chain");

        let mut completed = Vec::with_capacity(indices.len());
        let mut error = None;

        for index in indices {
            match runner.run_step(index).await {
                Ok(text) => completed.push(text),
                Err(err) => {
                    error = Some(err);
                    break;
                }
            }
        }

        let arrived = match &error {
            None => {
                info!(run_id = %run_id, "Chain arrived");
                runner
                    .reporter
                    .report(ReportEvent::arrived(&runner.arrival_message));
                if let Some(hook) = on_arrival {
                    hook(runner.arrival_message.as_str());
                }
                true
            }
            Some(err) => {
                warn!(run_id = %run_id, index = err.index(), "Chain aborted: {}", err);
                runner.reporter.report(ReportEvent::failed(err.reason()));
                if let Some(hook) = on_error {
                    hook(err);
                }
                false
            }
        };

        runner
            .reporter
            .report(ReportEvent::finalized(&runner.final_message));
        if let Some(hook) = finally {
            hook();
        }

        ChainResult {
            run_id,
            success: error.is_none(),
            completed,
            arrived,
            error,
        }
    }
}
