use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::debug;

use crate::bandit::Bandit;
use crate::bandit::storage::sibling_path;
use crate::config::Config;
use crate::error::Result;

pub struct AppContext {
    pub config: Config,
    pub robot_mode: bool,
    pub verbosity: u8,
}

impl AppContext {
    pub fn from_cli(cli: &crate::cli::Cli) -> Result<Self> {
        let config = Config::load(cli.config.as_deref())?;
        Ok(Self {
            config,
            robot_mode: cli.robot,
            verbosity: cli.verbose,
        })
    }

    /// `--state` if given, else the configured or default path.
    #[must_use]
    pub fn state_path(&self, explicit: Option<&Path>) -> PathBuf {
        explicit.map_or_else(|| self.config.bandit.resolved_state_path(), Path::to_path_buf)
    }

    /// Bandit built from config with any persisted state restored.
    pub fn open_bandit(&self, state_path: &Path) -> Result<Bandit> {
        let mut bandit = self.config.bandit.build()?;
        bandit.load_state(state_path)?;
        Ok(bandit)
    }
}

/// Exclusive advisory lock on `<state>.lock` held for a whole
/// load -> update -> save sequence.
///
/// Released when dropped.
pub struct StateLock {
    file: File,
    path: PathBuf,
}

impl StateLock {
    pub fn acquire(state_path: &Path) -> Result<Self> {
        let path = sibling_path(state_path, ".lock");
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)?;
        file.lock_exclusive()?;
        debug!(path = %path.display(), "acquired state lock");
        Ok(Self { file, path })
    }
}

impl Drop for StateLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
        debug!(path = %self.path.display(), "released state lock");
    }
}
