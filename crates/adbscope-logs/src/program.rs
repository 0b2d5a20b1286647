//! The filter program handed to the streaming stage.
//!
//! A program is materialized as a TOML file in the temp directory right
//! before streaming starts and loaded back by the stream. The file is
//! owned by a [`ProgramFile`] guard and removed when the guard drops.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::TempPath;

use crate::{LineClassifier, LineFilter, MatchMode, StyleRule};

const FILE_PREFIX: &str = "adbscope-filter-";
const FILE_SUFFIX: &str = ".toml";

/// Errors produced while writing, reading or compiling a program
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    #[error("I/O error on filter program: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize filter program: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("malformed filter program: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid filter pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Filter string, match mode and style rules
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterProgram {
    pub filter: String,

    #[serde(default)]
    pub mode: MatchMode,

    #[serde(default)]
    pub case_insensitive: bool,

    #[serde(default = "StyleRule::defaults")]
    pub rules: Vec<StyleRule>,
}

impl FilterProgram {
    /// Literal, case-sensitive program with the default rules
    pub fn new(filter: impl Into<String>) -> Self {
        Self {
            filter: filter.into(),
            mode: MatchMode::Literal,
            case_insensitive: false,
            rules: StyleRule::defaults(),
        }
    }

    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    /// Build the classifier this program describes
    pub fn compile(&self) -> Result<LineClassifier, ProgramError> {
        let filter = LineFilter::new(&self.filter, self.mode, self.case_insensitive)?;
        Ok(LineClassifier::with_rules(filter, self.rules.clone()))
    }

    /// Write the program to a fresh file in the system temp directory
    pub fn materialize(&self) -> Result<ProgramFile, ProgramError> {
        self.materialize_in(&std::env::temp_dir())
    }

    /// Write the program to a fresh file in `dir`
    pub fn materialize_in(&self, dir: &Path) -> Result<ProgramFile, ProgramError> {
        let text = toml::to_string(self)?;

        let mut file = tempfile::Builder::new()
            .prefix(FILE_PREFIX)
            .suffix(FILE_SUFFIX)
            .tempfile_in(dir)?;
        file.write_all(text.as_bytes())?;
        file.flush()?;

        let path = file.into_temp_path();
        tracing::debug!(path = %path.display(), "filter program written");

        Ok(ProgramFile { path })
    }
}

/// A materialized program on disk, deleted when dropped
#[derive(Debug)]
pub struct ProgramFile {
    path: TempPath,
}

impl ProgramFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the program back
    pub fn load(&self) -> Result<FilterProgram, ProgramError> {
        let text = std::fs::read_to_string(&self.path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Delete the file now. Failures are ignored.
    pub fn remove(self) {
        let path: PathBuf = self.path.to_path_buf();
        if let Err(e) = self.path.close() {
            tracing::debug!(path = %path.display(), error = %e, "could not remove filter program");
        }
    }
}
