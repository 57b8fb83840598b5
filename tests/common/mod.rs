#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directions_runner::prelude::*;
use tempfile::TempDir;

pub const DELAY: Duration = Duration::from_millis(2000);

pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

pub fn write_file(dir: &Path, filename: &str, content: &str) -> PathBuf {
    let path = dir.join(filename);
    fs::write(&path, content).expect("Failed to write test file");
    path
}

/// Runner over the built-in directions that records its reports
pub fn recording_runner() -> (StepRunner, MemoryReporter) {
    let reporter = MemoryReporter::new();
    let runner = StepRunner::new(StepSequence::directions())
        .delay(DelayStrategy::fixed(DELAY))
        .reporter(reporter.clone());
    (runner, reporter)
}

/// Same as `recording_runner`, with delays drawn from 1000–4000 ms
pub fn random_runner() -> (StepRunner, MemoryReporter) {
    let (runner, reporter) = recording_runner();
    (runner.delay(DelayStrategy::default_random()), reporter)
}

pub fn directions() -> Vec<String> {
    StepSequence::directions().iter().map(str::to_string).collect()
}
