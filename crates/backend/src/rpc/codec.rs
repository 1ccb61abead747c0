//! `<byte length>#<json>` framing of the NestJS TCP transport

use serde::Serialize;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Frames above this size are rejected and the connection is closed
pub const MAX_FRAME: usize = 8 * 1024 * 1024;

/// Длина кадра не длиннее 10 цифр
const MAX_PREFIX: usize = 10;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed frame length: {0}")]
    Malformed(String),

    #[error("frame of {0} bytes exceeds the {MAX_FRAME} byte limit")]
    TooLarge(usize),

    #[error("connection closed in the middle of a frame")]
    UnexpectedEof,

    #[error("cannot encode frame: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn encode<T: Serialize>(message: &T) -> Result<Vec<u8>, CodecError> {
    let body = serde_json::to_vec(message)?;
    let mut frame = format!("{}#", body.len()).into_bytes();
    frame.extend_from_slice(&body);
    Ok(frame)
}

/// Accumulates bytes and cuts complete frames out of them
#[derive(Debug, Default)]
pub struct FrameDecoder {
    buf: Vec<u8>,
}

impl FrameDecoder {
    pub fn push(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Next complete frame body, `None` while more bytes are needed
    pub fn next_frame(&mut self) -> Result<Option<Vec<u8>>, CodecError> {
        let Some(hash) = self.buf.iter().position(|b| *b == b'#') else {
            if self.buf.len() > MAX_PREFIX || !self.buf.iter().all(u8::is_ascii_digit) {
                return Err(CodecError::Malformed(lossy_prefix(&self.buf)));
            }
            return Ok(None);
        };

        let prefix = &self.buf[..hash];
        if prefix.is_empty() || prefix.len() > MAX_PREFIX || !prefix.iter().all(u8::is_ascii_digit)
        {
            return Err(CodecError::Malformed(lossy_prefix(prefix)));
        }
        let len: usize = std::str::from_utf8(prefix)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| CodecError::Malformed(lossy_prefix(prefix)))?;
        if len > MAX_FRAME {
            return Err(CodecError::TooLarge(len));
        }

        let end = hash + 1 + len;
        if self.buf.len() < end {
            return Ok(None);
        }
        let body = self.buf[hash + 1..end].to_vec();
        self.buf.drain(..end);
        Ok(Some(body))
    }
}

fn lossy_prefix(bytes: &[u8]) -> String {
    let shown = &bytes[..bytes.len().min(MAX_PREFIX + 2)];
    String::from_utf8_lossy(shown).into_owned()
}

/// Frame reader over one half of a connection
pub struct FrameReader<R> {
    inner: R,
    decoder: FrameDecoder,
}

impl<R: AsyncRead + Unpin> FrameReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            decoder: FrameDecoder::default(),
        }
    }

    /// `Ok(None)` on a clean close between frames
    pub async fn next_frame(&mut self) -> Result<Option<Vec<u8>>, CodecError> {
        let mut chunk = [0u8; 8192];
        loop {
            if let Some(frame) = self.decoder.next_frame()? {
                return Ok(Some(frame));
            }
            let n = self.inner.read(&mut chunk).await?;
            if n == 0 {
                return if self.decoder.is_empty() {
                    Ok(None)
                } else {
                    Err(CodecError::UnexpectedEof)
                };
            }
            self.decoder.push(&chunk[..n]);
        }
    }
}
