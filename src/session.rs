//! Session loop - the process-lifetime read-dispatch-write cycle.
//!
//! One frame is fully processed before the next read begins: read,
//! decode, dispatch, encode, write, flush. There is no pipelining and no
//! background work; suspension only happens while blocked on the next
//! input frame. A host wanting to cancel closes the input stream, which
//! the reader surfaces as a clean close.
//!
//! Error isolation is per layer:
//! - transport faults end the session with an error
//! - malformed or undecodable frames are logged and dropped, no response
//! - command faults come back as structured failure responses
//!
//! Diagnostics go to `tracing` (stderr territory); stdout carries only
//! frames.

use tokio::io::{AsyncRead, AsyncWrite};

use crate::error::Result;
use crate::message::{decode_request, encode_response};
use crate::plugin::Plugin;
use crate::protocol::{FrameReader, FrameWriter, DEFAULT_MAX_PAYLOAD_SIZE};

/// Loop-level configuration, passed in explicitly at construction.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Maximum accepted payload size in bytes.
    pub max_payload_size: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_payload_size: DEFAULT_MAX_PAYLOAD_SIZE,
        }
    }
}

/// A plugin bound to a transport for the lifetime of one process.
pub struct Session<R, W> {
    reader: FrameReader<R>,
    writer: FrameWriter<W>,
    plugin: Plugin,
}

impl<R, W> Session<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Bind a plugin to a transport with default configuration.
    pub fn new(plugin: Plugin, reader: R, writer: W) -> Self {
        Self::with_config(plugin, reader, writer, SessionConfig::default())
    }

    /// Bind a plugin to a transport.
    pub fn with_config(plugin: Plugin, reader: R, writer: W, config: SessionConfig) -> Self {
        Self {
            reader: FrameReader::with_max_payload(reader, config.max_payload_size),
            writer: FrameWriter::new(writer),
            plugin,
        }
    }

    /// Run until the input stream closes.
    ///
    /// Returns `Ok(())` on a clean close and `Err` only for
    /// transport-fatal conditions.
    pub async fn run(mut self) -> Result<()> {
        tracing::info!("Session started for plugin {}", self.plugin.info().name);
        loop {
            let frame = match self.reader.read_frame().await {
                Ok(Some(frame)) => frame,
                Ok(None) => {
                    tracing::info!("Input stream closed, session ending");
                    return Ok(());
                }
                Err(e) if e.is_frame_error() => {
                    tracing::warn!("Dropping malformed frame: {}", e);
                    continue;
                }
                Err(e) => {
                    tracing::error!("Transport failure: {}", e);
                    return Err(e);
                }
            };

            let request = match decode_request(&frame) {
                Ok(request) => request,
                Err(e) => {
                    tracing::warn!("Dropping undecodable {:?} message: {}", frame.kind, e);
                    continue;
                }
            };

            let response = self.plugin.handle(request).await;

            let (kind, payload) = match encode_response(&response) {
                Ok(encoded) => encoded,
                Err(e) => {
                    tracing::error!("Failed to encode response: {}", e);
                    continue;
                }
            };
            self.writer.write_frame(kind, &payload).await?;
        }
    }
}

/// Serve a plugin over this process's standard input and output.
///
/// Standard error stays free for diagnostic logging.
pub async fn serve(plugin: Plugin) -> Result<()> {
    Session::new(plugin, tokio::io::stdin(), tokio::io::stdout())
        .run()
        .await
}
