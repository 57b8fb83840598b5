//! Step execution engine module
//!
//! This module contains:
//! - `runner` - The step runner and chain builder
//! - `delay` - Fixed and randomized delay strategies
//! - `reporter` - Reporting channel for step output
//! - `error` - Step error types
//! - `result` - Step and chain result types

pub mod delay;
pub mod error;
pub mod reporter;
pub mod result;
pub mod runner;

pub use delay::DelayStrategy;
pub use error::{StepError, STEP_NOT_FOUND_MESSAGE};
pub use reporter::{
    ChannelReporter, ConsoleReporter, MemoryReporter, NullReporter, ReportEvent, ReportKind,
    Reporter,
};
pub use result::{ChainResult, StepOutcome};
pub use runner::{Chain, StepRunner, DEFAULT_ARRIVAL_MESSAGE, DEFAULT_FINAL_MESSAGE};
