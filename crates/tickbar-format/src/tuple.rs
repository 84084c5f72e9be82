//! Numeric tuple output format.

use std::fmt::Write;
use tickbar_aggregate::Bar;
use tickbar_types::BarSpec;

use crate::formatter::interval_start;
use crate::{FormatError, Formatter, fields_for};

/// Renders bars as numeric tuples.
///
/// A single field is written bare (`11`); several fields are written as a
/// parenthesized, comma-separated tuple (`(10, 12.5, 9.75, 11)`). Output
/// does not depend on locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TupleFormatter {
    spec: BarSpec,
    timestamps: bool,
}

impl TupleFormatter {
    /// Creates a tuple formatter for the given bar field selection.
    #[must_use]
    pub const fn new(spec: BarSpec) -> Self {
        Self {
            spec,
            timestamps: false,
        }
    }

    /// Sets whether each line starts with the interval start time.
    #[must_use]
    pub const fn with_timestamps(mut self, timestamps: bool) -> Self {
        self.timestamps = timestamps;
        self
    }
}

impl Formatter for TupleFormatter {
    fn render(&self, bar: &Bar) -> Result<String, FormatError> {
        let mut line = String::new();
        if self.timestamps {
            line.push_str(&interval_start(bar)?);
            line.push(' ');
        }

        match fields_for(self.spec) {
            [single] => {
                write!(line, "{}", single.value(bar))?;
            }
            fields => {
                line.push('(');
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        line.push_str(", ");
                    }
                    write!(line, "{}", field.value(bar))?;
                }
                line.push(')');
            }
        }

        line.push('\n');
        Ok(line)
    }

    fn extension(&self) -> &str {
        "bars"
    }
}
