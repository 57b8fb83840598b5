//! Step sequence loader
//!
//! Load a step list from a YAML (or JSON, which YAML accepts) file.

use std::path::Path;

use super::StepSequence;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error in {file}: {error}")]
    Yaml {
        file: String,
        error: serde_yaml::Error,
    },

    #[error("Step sequence in {0} is empty")]
    Empty(String),
}

pub struct SequenceLoader;

impl SequenceLoader {
    pub fn load_file(path: &Path) -> Result<StepSequence, LoadError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Parse a sequence from file contents; `source` names it in errors
    pub fn parse(content: &str, source: &str) -> Result<StepSequence, LoadError> {
        let sequence: StepSequence = serde_yaml::from_str(content).map_err(|e| LoadError::Yaml {
            file: source.to_string(),
            error: e,
        })?;

        if sequence.is_empty() {
            return Err(LoadError::Empty(source.to_string()));
        }

        Ok(sequence)
    }
}
