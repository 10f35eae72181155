// Ollama line-delimited stream decoding

use crate::error::{GatewayError, Result};
use crate::models::ollama::GenerateResponse;
use bytes::BytesMut;
use futures::stream::Stream;
use tracing::{debug, warn};

/// Decode an Ollama streaming body into generate chunks.
///
/// Ollama emits one JSON object per line. Lines may be split across
/// network reads at arbitrary byte offsets, including inside a
/// multi-byte UTF-8 character, so partial lines are buffered as raw
/// bytes and only complete lines are decoded (a newline is always a
/// character boundary). Empty lines are skipped; unparseable lines are
/// skipped with a warning rather than failing the stream. Reading stops
/// after the `done:true` chunk even if more bytes follow. A transport
/// failure yields one `Err` item and ends the stream.
pub fn decode_chunks<S>(byte_stream: S) -> impl Stream<Item = Result<GenerateResponse>> + Send
where
    S: Stream<Item = reqwest::Result<bytes::Bytes>> + Send + 'static,
{
    use futures::StreamExt;

    async_stream::stream! {
        let mut buffer = BytesMut::new();
        let mut finished = false;

        futures::pin_mut!(byte_stream);

        'read: while let Some(chunk_result) = byte_stream.next().await {
            match chunk_result {
                Ok(bytes) => {
                    buffer.extend_from_slice(&bytes);

                    // Process complete lines
                    while let Some(newline) = buffer.iter().position(|&b| b == b'\n') {
                        let line_bytes = buffer.split_to(newline + 1);
                        let line = String::from_utf8_lossy(&line_bytes[..newline]);

                        if let Some(chunk) = parse_line(&line) {
                            let done = chunk.done;
                            yield Ok(chunk);
                            if done {
                                finished = true;
                                break 'read;
                            }
                        }
                    }
                }
                Err(e) => {
                    warn!("Stream error: {}", e);
                    yield Err(GatewayError::from_transport(e));
                    finished = true;
                    break;
                }
            }
        }

        // Final line may arrive without a trailing newline
        if !finished && !buffer.is_empty() {
            debug!("Processing remaining buffer: {} bytes", buffer.len());
            let line = String::from_utf8_lossy(&buffer);
            if let Some(chunk) = parse_line(&line) {
                yield Ok(chunk);
            }
        }

        debug!("Ollama chunk stream ended");
    }
}

/// Parse a single stream line into a generate chunk.
///
/// Returns `None` for empty or unparseable lines.
fn parse_line(line: &str) -> Option<GenerateResponse> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    match serde_json::from_str::<GenerateResponse>(line) {
        Ok(chunk) => Some(chunk),
        Err(e) => {
            warn!("Skipping unparseable stream line: {}", e);
            debug!("Raw line: {}", line.chars().take(200).collect::<String>());
            None
        }
    }
}
