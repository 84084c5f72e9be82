//! Engine configuration.

use std::collections::HashSet;
use std::path::Path;
use tickbar_types::{BarSpec, ConfigError, IntervalLength, Symbol};

/// What to do when the sink fails to write a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SinkFailurePolicy {
    /// Any write failure stops the whole engine.
    #[default]
    Halt,
    /// Log and keep going for failures confined to one destination; still
    /// stop on failures that affect every destination.
    Isolate,
}

/// Validated engine configuration.
///
/// Built once at startup. Construction fails with a [`ConfigError`] for a
/// non-positive interval or an empty, blank, or duplicated symbol list, so
/// an invalid configuration never reaches the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    interval: IntervalLength,
    spec: BarSpec,
    symbols: Vec<Symbol>,
    sink_policy: SinkFailurePolicy,
    flush_on_stop: bool,
}

impl EngineConfig {
    /// Validates and creates a configuration.
    ///
    /// Symbols are normalized; their order is preserved.
    ///
    /// # Errors
    ///
    /// Returns an error if the interval is not positive or the symbol list
    /// is empty, contains a blank entry, or names a symbol twice.
    pub fn new<I, S>(interval_seconds: i64, spec: BarSpec, symbols: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let interval = IntervalLength::new(interval_seconds)?;

        let mut seen = HashSet::new();
        let mut normalized = Vec::new();
        for raw in symbols {
            let symbol = Symbol::new(raw);
            if symbol.is_empty() {
                return Err(ConfigError::EmptySymbol);
            }
            if !seen.insert(symbol.clone()) {
                return Err(ConfigError::DuplicateSymbol(symbol));
            }
            normalized.push(symbol);
        }
        if normalized.is_empty() {
            return Err(ConfigError::NoSymbols);
        }

        Ok(Self {
            interval,
            spec,
            symbols: normalized,
            sink_policy: SinkFailurePolicy::default(),
            flush_on_stop: false,
        })
    }

    /// Sets the sink failure policy.
    #[must_use]
    pub const fn with_sink_policy(mut self, policy: SinkFailurePolicy) -> Self {
        self.sink_policy = policy;
        self
    }

    /// Sets whether partially accumulated bars are written on stop.
    #[must_use]
    pub const fn with_flush_on_stop(mut self, flush: bool) -> Self {
        self.flush_on_stop = flush;
        self
    }

    /// Returns the interval length.
    #[must_use]
    pub const fn interval(&self) -> IntervalLength {
        self.interval
    }

    /// Returns the bar field selection.
    #[must_use]
    pub const fn spec(&self) -> BarSpec {
        self.spec
    }

    /// Returns the subscribed symbols.
    #[must_use]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Returns the sink failure policy.
    #[must_use]
    pub const fn sink_policy(&self) -> SinkFailurePolicy {
        self.sink_policy
    }

    /// Returns true if partial bars are written on stop.
    #[must_use]
    pub const fn flush_on_stop(&self) -> bool {
        self.flush_on_stop
    }
}

/// Checks that the output directory exists and is a directory.
///
/// # Errors
///
/// Returns an error if the path is missing, is not a directory, or cannot
/// be inspected.
pub fn validate_output_dir(path: &Path) -> Result<(), ConfigError> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(ConfigError::OutputDirNotDirectory {
            path: path.to_path_buf(),
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ConfigError::OutputDirMissing {
            path: path.to_path_buf(),
        }),
        Err(source) => Err(ConfigError::OutputDir {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_valid_config() {
        let config = EngineConfig::new(60, BarSpec::ohlc(), ["spy", "qqq"]).unwrap();
        assert_eq!(config.interval().seconds(), 60);
        assert_eq!(config.symbols(), [Symbol::new("SPY"), Symbol::new("QQQ")]);
        assert_eq!(config.sink_policy(), SinkFailurePolicy::Halt);
        assert!(!config.flush_on_stop());
    }

    #[test]
    fn test_rejects_bad_interval() {
        assert!(matches!(
            EngineConfig::new(0, BarSpec::close(), ["SPY"]),
            Err(ConfigError::InvalidInterval(0))
        ));
        assert!(matches!(
            EngineConfig::new(-60, BarSpec::close(), ["SPY"]),
            Err(ConfigError::InvalidInterval(-60))
        ));
    }

    #[test]
    fn test_rejects_bad_symbols() {
        let none: [&str; 0] = [];
        assert!(matches!(
            EngineConfig::new(60, BarSpec::close(), none),
            Err(ConfigError::NoSymbols)
        ));
        assert!(matches!(
            EngineConfig::new(60, BarSpec::close(), ["SPY", " "]),
            Err(ConfigError::EmptySymbol)
        ));
        assert!(matches!(
            EngineConfig::new(60, BarSpec::close(), ["SPY", "spy"]),
            Err(ConfigError::DuplicateSymbol(_))
        ));
    }

    #[test]
    fn test_output_dir_checks() {
        let dir = TempDir::new().unwrap();
        assert!(validate_output_dir(dir.path()).is_ok());

        let file = dir.path().join("bars.txt");
        std::fs::write(&file, "").unwrap();
        assert!(matches!(
            validate_output_dir(&file),
            Err(ConfigError::OutputDirNotDirectory { .. })
        ));
        assert!(matches!(
            validate_output_dir(&dir.path().join("missing")),
            Err(ConfigError::OutputDirMissing { .. })
        ));
    }
}
