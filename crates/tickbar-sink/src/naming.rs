//! Output file naming.

use chrono::Local;
use std::path::{Path, PathBuf};
use tickbar_types::{BarSpec, IntervalLength, Symbol};

/// Builds per-symbol output file paths.
///
/// Files are named `<YYYYMMDD>_<SYMBOL>_<TAG>_<N>sec.<ext>` inside the
/// output directory, for example `20240115_SPY_OHLCV_60sec.bars`. The date
/// stamp is fixed when the naming is created so a run that crosses midnight
/// keeps writing to the same files.
///
/// The symbol part is always the normalized, upper-case [`Symbol`], not the
/// spelling given on the command line: `spy` and `SPY` write to the same
/// `..._SPY_...` file, so a restart with different casing appends to the
/// existing file instead of starting a second one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationNaming {
    directory: PathBuf,
    date_stamp: String,
    tag: &'static str,
    interval: IntervalLength,
    extension: String,
}

impl DestinationNaming {
    /// Creates a naming scheme stamped with today's local date.
    #[must_use]
    pub fn new(
        directory: impl Into<PathBuf>,
        spec: BarSpec,
        interval: IntervalLength,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            directory: directory.into(),
            date_stamp: Local::now().format("%Y%m%d").to_string(),
            tag: spec.tag(),
            interval,
            extension: extension.into(),
        }
    }

    /// Overrides the date stamp.
    #[must_use]
    pub fn with_date_stamp(mut self, date_stamp: impl Into<String>) -> Self {
        self.date_stamp = date_stamp.into();
        self
    }

    /// Returns the output directory.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Returns the file path for a symbol.
    #[must_use]
    pub fn path_for(&self, symbol: &Symbol) -> PathBuf {
        self.directory.join(format!(
            "{}_{}_{}_{}sec.{}",
            self.date_stamp,
            escape_symbol(symbol),
            self.tag,
            self.interval,
            self.extension
        ))
    }
}

/// Replaces characters that are unsafe or ambiguous in file names.
///
/// `/` becomes `-S-`, `$` becomes `-D-` and `.` becomes `-P-`, so futures
/// (`/ES`), indices (`$SPX.X`) and share classes (`BRK.B`) map to distinct,
/// flat file names.
#[must_use]
pub fn escape_symbol(symbol: &Symbol) -> String {
    let mut escaped = String::with_capacity(symbol.as_str().len());
    for c in symbol.as_str().chars() {
        match c {
            '/' => escaped.push_str("-S-"),
            '$' => escaped.push_str("-D-"),
            '.' => escaped.push_str("-P-"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_symbol() {
        assert_eq!(escape_symbol(&Symbol::new("spy")), "SPY");
        assert_eq!(escape_symbol(&Symbol::new("/ES")), "-S-ES");
        assert_eq!(escape_symbol(&Symbol::new("$SPX.X")), "-D-SPX-P-X");
    }

    #[test]
    fn test_path_for() {
        let naming = DestinationNaming::new(
            "/data/bars",
            BarSpec::ohlc().with_volume(true),
            IntervalLength::new(60).unwrap(),
            "bars",
        )
        .with_date_stamp("20240115");

        assert_eq!(
            naming.path_for(&Symbol::new("brk.b")),
            PathBuf::from("/data/bars/20240115_BRK-P-B_OHLCV_60sec.bars")
        );
    }

    #[test]
    fn test_same_symbol_same_path() {
        let naming = DestinationNaming::new(
            "/tmp",
            BarSpec::close(),
            IntervalLength::new(5).unwrap(),
            "csv",
        );
        assert_eq!(
            naming.path_for(&Symbol::new("qqq")),
            naming.path_for(&Symbol::new("QQQ"))
        );
    }
}
