//! # Directions Runner
//!
//! An asynchronous step runner: given an ordered list of directions, it runs
//! each step after a delay, reports the step's text and succeeds or fails
//! depending on whether the step exists.
//!
//! ## Features
//!
//! - **Independent steps** - schedule steps separately; they finish in any order
//! - **Chains** - run steps one after another, stopping at the first failure
//! - **Batches** - run steps concurrently and aggregate their texts in order
//! - **Fixed or randomized delays** - configurable per runner
//! - **Mission patches** - fetch launch data and list patch image URLs
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use directions_runner::{StepRunner, StepSequence};
//!
//! #[tokio::main]
//! async fn main() {
//!     let runner = StepRunner::new(StepSequence::directions());
//!
//!     let result = runner
//!         .chain(0..4)
//!         .on_error(|err| println!("{}", err))
//!         .finally(|| println!("done"))
//!         .run()
//!         .await;
//!
//!     println!("Arrived: {}", result.arrived);
//! }
//! ```

pub mod engine;
pub mod launches;
pub mod sequence;

// Re-export main types
pub use engine::{
    Chain, ChainResult, ChannelReporter, ConsoleReporter, DelayStrategy, MemoryReporter,
    NullReporter, ReportEvent, ReportKind, Reporter, StepError, StepOutcome, StepRunner,
    STEP_NOT_FOUND_MESSAGE,
};
pub use launches::{
    mission_patches, HttpLaunchSource, Launch, LaunchError, LaunchSource, StaticLaunchSource,
};
pub use sequence::{
    ConfigError, DelayConfig, LaunchesConfig, LoadError, RunnerConfig, SequenceLoader,
    StepSequence, DIRECTIONS,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::engine::{
        ChainResult, DelayStrategy, MemoryReporter, ReportKind, Reporter, StepError,
        StepOutcome, StepRunner,
    };
    pub use crate::launches::{mission_patches, HttpLaunchSource, LaunchSource};
    pub use crate::sequence::{RunnerConfig, SequenceLoader, StepSequence};
}
