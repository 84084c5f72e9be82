//! In-process quote sources.

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use tickbar_types::Observation;
use tokio::sync::mpsc;

use crate::{QuoteSource, Result};

/// Receives observations pushed through a bounded Tokio channel.
///
/// The source is exhausted once every sender has been dropped and the
/// channel drained.
#[derive(Debug)]
pub struct ChannelSource {
    rx: mpsc::Receiver<Observation>,
}

impl ChannelSource {
    /// Creates a connected sender/source pair with the given capacity.
    #[must_use]
    pub fn channel(capacity: usize) -> (mpsc::Sender<Observation>, Self) {
        let (tx, rx) = mpsc::channel(capacity);
        (tx, Self { rx })
    }

    /// Wraps an existing receiver.
    #[must_use]
    pub const fn new(rx: mpsc::Receiver<Observation>) -> Self {
        Self { rx }
    }
}

#[async_trait]
impl QuoteSource for ChannelSource {
    async fn next_observation(&mut self) -> Result<Option<Observation>> {
        Ok(self.rx.recv().await)
    }

    async fn close(&mut self) -> Result<()> {
        self.rx.close();
        Ok(())
    }
}

/// Adapts any stream of observations.
#[derive(Debug)]
pub struct StreamSource<S> {
    stream: S,
}

impl<S> StreamSource<S>
where
    S: Stream<Item = Observation> + Unpin + Send,
{
    /// Wraps a stream.
    #[must_use]
    pub const fn new(stream: S) -> Self {
        Self { stream }
    }
}

#[async_trait]
impl<S> QuoteSource for StreamSource<S>
where
    S: Stream<Item = Observation> + Unpin + Send,
{
    async fn next_observation(&mut self) -> Result<Option<Observation>> {
        Ok(self.stream.next().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use rust_decimal::Decimal;

    fn obs(secs: i64) -> Observation {
        Observation::new(
            "SPY",
            DateTime::from_timestamp(secs, 0).unwrap(),
            Decimal::new(secs, 0),
        )
    }

    #[tokio::test]
    async fn test_channel_source_drains_then_ends() {
        let (tx, mut source) = ChannelSource::channel(8);
        tx.send(obs(1)).await.unwrap();
        tx.send(obs(2)).await.unwrap();
        drop(tx);

        assert_eq!(source.next_observation().await.unwrap(), Some(obs(1)));
        assert_eq!(source.next_observation().await.unwrap(), Some(obs(2)));
        assert_eq!(source.next_observation().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_stream_source() {
        let mut source = StreamSource::new(futures::stream::iter(vec![obs(5)]));
        assert_eq!(source.next_observation().await.unwrap(), Some(obs(5)));
        assert!(source.next_observation().await.unwrap().is_none());
    }
}
