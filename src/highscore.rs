use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The best score achieved so far, backed by a text file containing just the
/// score as a decimal integer
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct HighScore {
    path: PathBuf,
    value: u32,
}

impl HighScore {
    /// Read the high score from the file at `path`.
    ///
    /// A missing file is treated as a high score of zero, as is a file whose
    /// contents are not a valid score.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file exists but could not be read.
    pub(crate) fn load(path: PathBuf) -> Result<HighScore, LoadError> {
        let value = match fs_err::read_to_string(&path) {
            Ok(src) => match src.trim().parse::<u32>() {
                Ok(value) => value,
                Err(e) => {
                    log::warn!(
                        "High score file {} does not contain a valid score ({e}); starting from 0",
                        path.display()
                    );
                    0
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => 0,
            Err(e) => return Err(LoadError(e)),
        };
        Ok(HighScore { path, value })
    }

    /// Create a high score of zero that will be saved to `path` on the first
    /// improvement, without looking at what's currently there
    pub(crate) fn empty(path: PathBuf) -> HighScore {
        HighScore { path, value: 0 }
    }

    pub(crate) fn get(&self) -> u32 {
        self.value
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Record `score`.  If it beats the current high score, the high score is
    /// raised and written to disk, and `Ok(true)` is returned.
    ///
    /// The in-memory high score is raised even if saving fails.
    pub(crate) fn update(&mut self, score: u32) -> Result<bool, SaveError> {
        if score <= self.value {
            return Ok(false);
        }
        self.value = score;
        self.save()?;
        Ok(true)
    }

    /// Write the current high score to disk, replacing the file's previous
    /// contents
    fn save(&self) -> Result<(), SaveError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        fs_err::write(&self.path, self.value.to_string()).map_err(SaveError::write)?;
        Ok(())
    }
}

#[derive(Debug, Error)]
#[error("Failed to read high score from disk")]
pub(crate) struct LoadError(#[source] std::io::Error);

#[derive(Debug, Error)]
#[error("Failed to save high score to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to write high score file")]
    Write(#[source] std::io::Error),
}
