//! TCP quote source.

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tickbar_types::{Observation, Symbol};
use tokio::io::{AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tracing::{debug, info};

use crate::{FeedError, LineSource, QuoteSource, Result};

/// Connection settings for [`TcpQuoteSource`].
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// `host:port` of the quote server.
    pub address: String,
    /// Password sent in the handshake, if the server requires one.
    pub auth: Option<String>,
    /// Symbols to subscribe to.
    pub symbols: Vec<Symbol>,
    /// Whether to subscribe to the volume topic.
    pub volume: bool,
    /// Maximum time to wait for the TCP connection.
    pub connect_timeout: Duration,
}

impl FeedConfig {
    /// Default connection timeout (5 seconds).
    pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Creates a configuration with the default timeout and no password.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::InvalidAddress`] if the address is malformed.
    pub fn new(address: &str, symbols: Vec<Symbol>, volume: bool) -> Result<Self> {
        Ok(Self {
            address: normalize_address(address)?,
            auth: None,
            symbols,
            volume,
            connect_timeout: Self::DEFAULT_CONNECT_TIMEOUT,
        })
    }

    /// Sets the handshake password.
    #[must_use]
    pub fn with_auth(mut self, auth: Option<String>) -> Self {
        self.auth = auth;
        self
    }

    /// Sets the connection timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Builds the handshake announcing this subscription.
    #[must_use]
    pub fn handshake(&self) -> Handshake<'_> {
        let mut topics = vec!["last"];
        if self.volume {
            topics.push("volume");
        }
        Handshake {
            auth: self.auth.as_deref(),
            symbols: &self.symbols,
            topics,
        }
    }
}

/// First line sent to the quote server after connecting.
#[derive(Debug, Clone, Serialize)]
pub struct Handshake<'a> {
    /// Password, or `null`.
    pub auth: Option<&'a str>,
    /// Subscribed symbols.
    pub symbols: &'a [Symbol],
    /// Subscribed topics: `last`, plus `volume` when enabled.
    pub topics: Vec<&'static str>,
}

/// Accepts `host:port` or the space-separated `host port` form.
///
/// # Errors
///
/// Returns [`FeedError::InvalidAddress`] if no port can be found.
pub fn normalize_address(address: &str) -> Result<String> {
    let address = address.trim();
    let (host, port) = match address.split_once(char::is_whitespace) {
        Some((host, port)) => (host.trim(), port.trim()),
        None => address
            .rsplit_once(':')
            .ok_or_else(|| FeedError::InvalidAddress(address.to_string()))?,
    };

    if host.is_empty() || port.parse::<u16>().is_err() {
        return Err(FeedError::InvalidAddress(address.to_string()));
    }
    Ok(format!("{host}:{port}"))
}

/// Reads newline-delimited JSON observations from a TCP quote server.
///
/// After connecting, the client sends one [`Handshake`] line; everything
/// the server sends afterwards is parsed as observations.
#[derive(Debug)]
pub struct TcpQuoteSource {
    lines: LineSource<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
    address: String,
}

impl TcpQuoteSource {
    /// Connects and subscribes.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established within the
    /// configured timeout or the handshake cannot be sent.
    pub async fn connect(config: &FeedConfig) -> Result<Self> {
        let address = config.address.clone();
        let stream = tokio::time::timeout(config.connect_timeout, TcpStream::connect(&address))
            .await
            .map_err(|_| FeedError::ConnectTimeout {
                address: address.clone(),
                timeout: config.connect_timeout,
            })?
            .map_err(|source| FeedError::Connect {
                address: address.clone(),
                source,
            })?;
        stream.set_nodelay(true)?;

        let (reader, mut writer) = stream.into_split();
        let mut handshake = serde_json::to_vec(&config.handshake())?;
        handshake.push(b'\n');
        writer.write_all(&handshake).await?;
        writer.flush().await?;

        info!(
            %address,
            symbols = config.symbols.len(),
            volume = config.volume,
            "connected to quote source"
        );

        Ok(Self {
            lines: LineSource::new(BufReader::new(reader)),
            writer,
            address,
        })
    }

    /// Returns the connected address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }
}

#[async_trait]
impl QuoteSource for TcpQuoteSource {
    async fn next_observation(&mut self) -> Result<Option<Observation>> {
        self.lines.next_observation().await
    }

    async fn close(&mut self) -> Result<()> {
        debug!(address = %self.address, "closing quote source");
        self.writer.shutdown().await?;
        Ok(())
    }
}
