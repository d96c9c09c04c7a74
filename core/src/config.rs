use std::path::{Path, PathBuf};
use std::result::Result as StdResult;
use std::time::Duration;

use anyhow::Context as _;
use serde::Deserialize;

use crate::fsutil;

/// Immutable settings for one whole run.
/// Built once by the caller and shared by reference; nothing mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub executable: PathBuf,
    pub tests_dir: PathBuf,
    pub jobs: usize,
    pub time_limit: Duration,
    pub normalize_whitespace: bool,
    pub verbose: bool,
    pub stream: bool,
}

impl RunConfig {
    pub const DEFAULT_JOBS: usize = 1;
    pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_millis(1000);

    pub fn new(executable: impl Into<PathBuf>, tests_dir: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            tests_dir: tests_dir.into(),
            jobs: Self::DEFAULT_JOBS,
            time_limit: Self::DEFAULT_TIME_LIMIT,
            normalize_whitespace: false,
            verbose: false,
            stream: false,
        }
    }

    pub fn jobs(mut self, n: usize) -> Self {
        self.jobs = n.max(1);
        self
    }

    pub fn time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    pub fn normalize_whitespace(mut self, yes: bool) -> Self {
        self.normalize_whitespace = yes;
        self
    }

    pub fn verbose(mut self, yes: bool) -> Self {
        self.verbose = yes;
        self
    }

    pub fn stream(mut self, yes: bool) -> Self {
        self.stream = yes;
        self
    }
}

/// Optional `partest.toml` discovered in the working dir's ancestors.
/// Supplies defaults for everything a flag can also set; flags win.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub run: FileRunConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FileRunConfig {
    pub jobs: Option<usize>,
    pub time_limit_ms: Option<u64>,
    pub normalize_whitespace: Option<bool>,
    pub verbose: Option<bool>,
    pub stream: Option<bool>,
}

impl FileConfig {
    pub const FILENAME: &str = "partest.toml";

    pub fn from_toml(s: &str) -> StdResult<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Find the config file in ancestor dirs, including `cur_dir` itself.
    pub fn find_file_in_ancestors(cur_dir: impl AsRef<Path>) -> Option<PathBuf> {
        cur_dir
            .as_ref()
            .ancestors()
            .map(|dir| dir.join(Self::FILENAME))
            .find(|path| path.is_file())
    }

    /// Missing file is fine (defaults); an unparsable file is an error.
    pub fn from_file_finding_in_ancestors(cur_dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let Some(filepath) = Self::find_file_in_ancestors(cur_dir) else {
            return Ok(Self::default());
        };
        let toml = fsutil::read_to_string(&filepath)?;
        Self::from_toml(&toml).with_context(|| format!("Invalid config TOML: {:?}", filepath))
    }
}
