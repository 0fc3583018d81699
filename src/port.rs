//! TCP client for Maya's command port.
//!
//! One connection per command: connect, write the newline-terminated line,
//! optionally read the one-line result, close. The port speaks no protocol
//! beyond that.

use crate::mel::MelCommand;
use anyhow::{Context, Result};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tracing::debug;

/// Handle to a Maya command-port endpoint.
pub struct CommandPort {
    address: String,
    timeout: Duration,
}

impl CommandPort {
    /// Create a handle for the given `host:port` address.
    pub fn new(address: impl Into<String>, timeout: Duration) -> Self {
        Self {
            address: address.into(),
            timeout,
        }
    }

    /// The endpoint address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Connect with the configured timeout.
    async fn connect(&self) -> Result<TcpStream> {
        let stream = tokio::time::timeout(self.timeout, TcpStream::connect(&self.address))
            .await
            .map_err(|_| {
                anyhow::anyhow!("Connection to {} timed out - is Maya running?", self.address)
            })?
            .with_context(|| {
                format!(
                    "Failed to connect to Maya command port at {}. Open one in Maya with: commandPort -name \":1234\"",
                    self.address
                )
            })?;
        Ok(stream)
    }

    /// Send one command and close the connection.
    ///
    /// With `read_reply` the single result line Maya writes back is returned;
    /// otherwise the send is fire-and-forget and `None` comes back.
    pub async fn send(&self, command: &MelCommand, read_reply: bool) -> Result<Option<String>> {
        let mut stream = self.connect().await?;
        debug!("Sending to {}: {}", self.address, command);

        tokio::time::timeout(self.timeout, stream.write_all(&command.encode()))
            .await
            .map_err(|_| anyhow::anyhow!("Write to {} timed out", self.address))?
            .with_context(|| format!("Failed to send command to {}", self.address))?;
        stream.flush().await?;

        let reply = if read_reply {
            Some(self.read_reply(&mut stream).await?)
        } else {
            None
        };

        stream
            .shutdown()
            .await
            .with_context(|| format!("Failed to close connection to {}", self.address))?;
        Ok(reply)
    }

    /// Read Maya's one-line result off the stream.
    async fn read_reply(&self, stream: &mut TcpStream) -> Result<String> {
        let mut reader = BufReader::new(stream);
        let mut line = String::new();
        tokio::time::timeout(self.timeout, reader.read_line(&mut line))
            .await
            .map_err(|_| anyhow::anyhow!("Timed out waiting for a reply from {}", self.address))?
            .with_context(|| format!("Failed to read reply from {}", self.address))?;
        // Maya terminates results with a newline and, on some versions, a NUL.
        let reply = line.trim_end_matches(['\n', '\r', '\0']).to_string();
        debug!("Reply from {}: {}", self.address, reply);
        Ok(reply)
    }

    /// Probe the port: connect and immediately close, sending nothing.
    pub async fn ping(&self) -> Result<()> {
        let mut stream = self.connect().await?;
        stream.shutdown().await.ok();
        Ok(())
    }
}
