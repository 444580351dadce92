use std::path::{Path, PathBuf};

/// Runtime configuration for the esload CLI.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory bare paths are resolved against.
    pub cwd: PathBuf,

    /// Whether to emit JSON logs.
    pub json_logs: bool,

    /// Verbosity level (0 = WARN, 1 = DEBUG, 2+ = TRACE).
    pub verbosity: u8,
}

impl Config {
    /// Create a new config with the given working directory.
    #[must_use]
    pub fn new(cwd: PathBuf) -> Self {
        Self {
            cwd,
            json_logs: false,
            verbosity: 0,
        }
    }

    /// Set verbosity level.
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set JSON log output.
    #[must_use]
    pub fn with_json_logs(mut self, json: bool) -> Self {
        self.json_logs = json;
        self
    }

    /// Resolve `path` against the working directory.
    #[must_use]
    pub fn absolute(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let config = Config::new(PathBuf::from("/work"))
            .with_verbosity(2)
            .with_json_logs(true);
        assert_eq!(config.verbosity, 2);
        assert!(config.json_logs);
    }

    #[cfg(unix)]
    #[test]
    fn test_absolute() {
        let config = Config::new(PathBuf::from("/work"));
        assert_eq!(config.absolute(Path::new("a/b.ts")), PathBuf::from("/work/a/b.ts"));
        assert_eq!(config.absolute(Path::new("/abs.ts")), PathBuf::from("/abs.ts"));
    }
}
