//! Newline-delimited JSON quote source.

use async_trait::async_trait;
use tickbar_types::Observation;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;

use crate::{QuoteSource, Result};

/// Reads one JSON observation per line.
///
/// Blank lines are ignored. Lines that do not parse, including lines that
/// are not valid UTF-8, are logged and skipped rather than ending the
/// stream; end of input ends the source.
#[derive(Debug)]
pub struct LineSource<R> {
    reader: R,
    buf: Vec<u8>,
    line_number: u64,
    skipped: u64,
}

impl<R> LineSource<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    /// Creates a source reading from `reader`.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line_number: 0,
            skipped: 0,
        }
    }

    /// Returns the number of malformed lines skipped so far.
    #[must_use]
    pub const fn skipped(&self) -> u64 {
        self.skipped
    }
}

#[async_trait]
impl<R> QuoteSource for LineSource<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn next_observation(&mut self) -> Result<Option<Observation>> {
        loop {
            // Partial reads stay in `buf`, so a cancelled call resumes where it stopped.
            let read = self.reader.read_until(b'\n', &mut self.buf).await?;
            if read == 0 && self.buf.is_empty() {
                return Ok(None);
            }

            let line = std::mem::take(&mut self.buf);
            self.line_number += 1;
            let line = line.trim_ascii();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_slice::<Observation>(line) {
                Ok(observation) => return Ok(Some(observation)),
                Err(error) => {
                    self.skipped += 1;
                    warn!(line = self.line_number, %error, "skipping malformed quote");
                }
            }
        }
    }
}
