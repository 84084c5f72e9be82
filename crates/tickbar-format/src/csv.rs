//! CSV output format.

use std::fmt::Write;
use tickbar_aggregate::Bar;
use tickbar_types::BarSpec;

use crate::formatter::interval_start;
use crate::{FormatError, Formatter, fields_for};

/// CSV formatter.
///
/// Bars are appended to files that outlive a single run, so no header row
/// is written; use [`CsvFormatter::header`] to produce one separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvFormatter {
    spec: BarSpec,
    /// Field delimiter (default: comma).
    delimiter: char,
    timestamps: bool,
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new(spec: BarSpec) -> Self {
        Self {
            spec,
            delimiter: ',',
            timestamps: false,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether the first column is the interval start time.
    #[must_use]
    pub const fn with_timestamps(mut self, timestamps: bool) -> Self {
        self.timestamps = timestamps;
        self
    }

    /// Creates a tab-separated values (TSV) formatter.
    #[must_use]
    pub const fn tsv(spec: BarSpec) -> Self {
        Self::new(spec).with_delimiter('\t')
    }

    /// Returns the header line matching this formatter's columns.
    #[must_use]
    pub fn header(&self) -> String {
        let mut names: Vec<&str> = Vec::new();
        if self.timestamps {
            names.push("timestamp");
        }
        names.extend(fields_for(self.spec).iter().map(|field| field.name()));
        let mut line = names.join(&self.delimiter.to_string());
        line.push('\n');
        line
    }
}

impl Formatter for CsvFormatter {
    fn render(&self, bar: &Bar) -> Result<String, FormatError> {
        let d = self.delimiter;
        let mut line = String::new();

        if self.timestamps {
            line.push_str(&interval_start(bar)?);
            line.push(d);
        }

        for (i, field) in fields_for(self.spec).iter().enumerate() {
            if i > 0 {
                line.push(d);
            }
            write!(line, "{}", field.value(bar))?;
        }

        line.push('\n');
        Ok(line)
    }

    fn extension(&self) -> &str {
        "csv"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::test_support::sample_bar;

    #[test]
    fn test_csv_ohlcv() {
        let formatter = CsvFormatter::new(BarSpec::ohlc().with_volume(true));
        let line = formatter.render(&sample_bar()).unwrap();
        assert_eq!(line, "10,12.5,9.75,11,1500\n");
    }

    #[test]
    fn test_csv_timestamps_and_header() {
        let formatter = CsvFormatter::new(BarSpec::close()).with_timestamps(true);
        assert_eq!(formatter.header(), "timestamp,close\n");
        assert_eq!(
            formatter.render(&sample_bar()).unwrap(),
            "2024-01-15T14:30:00Z,11\n"
        );
    }

    #[test]
    fn test_tsv() {
        let formatter = CsvFormatter::tsv(BarSpec::close().with_volume(true));
        assert_eq!(formatter.render(&sample_bar()).unwrap(), "11\t1500\n");
        assert_eq!(formatter.header(), "close\tvolume\n");
    }
}
