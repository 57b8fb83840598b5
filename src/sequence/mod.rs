//! Step sequences and their configuration
//!
//! This module contains:
//! - `StepSequence` - the immutable, ordered list of directions
//! - `loader` - Load a sequence from a YAML or JSON file
//! - `runner_config` - Runner configuration loaded from YAML

pub mod loader;
pub mod runner_config;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub use loader::{LoadError, SequenceLoader};
pub use runner_config::{ConfigError, DelayConfig, LaunchesConfig, RunnerConfig};

/// The built-in directions to the café
pub const DIRECTIONS: [&str; 4] = [
    "Starting point: Ironhack Paris",
    "← Head northwest on Bd Voltaire toward Rue Léon Frot",
    "← Turn left onto Rue Chanzy",
    "* Café Titon, 34 Rue Titon, 75011 Paris, France",
];

/// An ordered, read-only list of steps
///
/// Cloning shares the underlying storage, so a sequence can be handed to
/// any number of concurrently running steps.
#[derive(Clone, PartialEq, Eq)]
pub struct StepSequence {
    steps: Arc<[String]>,
}

impl StepSequence {
    pub fn new<I, S>(steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            steps: steps.into_iter().map(|step| -> String { step.into() }).collect(),
        }
    }

    /// The built-in four-step directions
    pub fn directions() -> Self {
        Self::new(DIRECTIONS)
    }

    /// Text of the step at `index`, or `None` once the sequence is exhausted
    pub fn get(&self, index: usize) -> Option<&str> {
        self.steps.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn contains_index(&self, index: usize) -> bool {
        index < self.steps.len()
    }

    /// Every valid index, in order
    pub fn indices(&self) -> std::ops::Range<usize> {
        0..self.steps.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(String::as_str)
    }
}

impl Default for StepSequence {
    fn default() -> Self {
        Self::directions()
    }
}

impl fmt::Debug for StepSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.steps.iter()).finish()
    }
}

impl From<Vec<String>> for StepSequence {
    fn from(steps: Vec<String>) -> Self {
        Self {
            steps: steps.into(),
        }
    }
}

impl Serialize for StepSequence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.steps.iter())
    }
}

impl<'de> Deserialize<'de> for StepSequence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<String>::deserialize(deserializer).map(Self::from)
    }
}
