//! Newline-delimited JSON-RPC over a byte stream.
//!
//! One request (or batch) per line, one response per line. Notifications get
//! no line back. The session ends at end of input.

use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use crate::error::transport::TransportError;
use crate::error::{report_error, ErrorContext};
use crate::protocol::jsonrpc::{Id, JsonRpcError, JsonRpcHandler, Response};

/// Outcome of reading one bounded line.
#[derive(Debug, PartialEq, Eq)]
enum LineRead {
    /// End of input with nothing buffered
    Eof,
    /// A complete line is in the buffer, without its terminator
    Line,
    /// The line exceeded the limit and was discarded
    TooLong,
}

/// Serves requests read from `reader`, writing responses to `writer`.
///
/// # Arguments
///
/// * `handler` - Session handler that answers each line
/// * `reader` - Source of newline-delimited requests
/// * `writer` - Sink for newline-delimited responses, flushed after each one
/// * `max_message_size` - Longest accepted line in bytes; longer lines are
///   answered with an Invalid Request error and skipped
///
/// # Errors
///
/// Only I/O failures end the session early. Malformed requests are answered
/// on the wire and serving continues.
pub async fn serve<R, W>(
    handler: &JsonRpcHandler,
    mut reader: R,
    mut writer: W,
    max_message_size: usize,
) -> Result<(), TransportError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    let mut line_no = 0usize;
    let mut answered = 0usize;

    loop {
        buf.clear();
        let read = read_line_limited(&mut reader, &mut buf, max_message_size)
            .await
            .map_err(TransportError::ReadError)?;
        line_no += 1;

        let response = match read {
            LineRead::Eof => break,
            LineRead::TooLong => {
                warn!(line = line_no, max_message_size, "Request line too long");
                Some(error_line(JsonRpcError::invalid_request(format!(
                    "Message exceeds {max_message_size} bytes"
                ))))
            }
            LineRead::Line => match std::str::from_utf8(&buf) {
                Ok(text) if text.trim().is_empty() => continue,
                Ok(text) => {
                    debug!(line = line_no, bytes = text.len(), "Request received");
                    handler.handle_request(text.trim()).await
                }
                Err(_) => {
                    report_error(ErrorContext::new(
                        TransportError::InvalidEncoding { line: line_no },
                        "transport",
                    ));
                    Some(error_line(JsonRpcError::parse_error()))
                }
            },
        };

        if let Some(response) = response {
            write_line(&mut writer, &response)
                .await
                .map_err(TransportError::WriteError)?;
            answered += 1;
        }
    }

    info!(lines = line_no - 1, answered, "Session ended");
    Ok(())
}

/// Serves the process's stdin/stdout.
pub async fn serve_stdio(
    handler: &JsonRpcHandler,
    max_message_size: usize,
) -> Result<(), TransportError> {
    serve(
        handler,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        max_message_size,
    )
    .await
}

fn error_line(error: JsonRpcError) -> String {
    let response = Response::error(Id::Null, error);
    serde_json::to_string(&response).unwrap_or_else(|_| {
        r#"{"jsonrpc":"2.0","error":{"code":-32603,"message":"Internal error"},"id":null}"#
            .to_string()
    })
}

async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, line: &str) -> io::Result<()> {
    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await
}

/// Reads one line into `buf`, holding at most `limit` bytes of it.
///
/// A trailing `\r` is stripped and does not count toward `limit`. An overlong
/// line is consumed up to and including its terminator so the next read starts
/// on the following line.
async fn read_line_limited<R>(reader: &mut R, buf: &mut Vec<u8>, limit: usize) -> io::Result<LineRead>
where
    R: AsyncBufRead + Unpin,
{
    let mut overflow = false;
    let mut seen_any = false;

    loop {
        let (done, used) = {
            let available = reader.fill_buf().await?;
            if available.is_empty() {
                break;
            }
            seen_any = true;

            match available.iter().position(|&b| b == b'\n') {
                Some(end) => {
                    if !overflow {
                        buf.extend_from_slice(&available[..end]);
                    }
                    (true, end + 1)
                }
                None => {
                    if !overflow {
                        buf.extend_from_slice(available);
                    }
                    (false, available.len())
                }
            }
        };
        reader.consume(used);

        // One extra byte may still be the `\r` of a CRLF terminator.
        if buf.len() > limit.saturating_add(1) {
            overflow = true;
            buf.clear();
        }
        if done {
            break;
        }
    }

    if !seen_any {
        return Ok(LineRead::Eof);
    }
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }
    if overflow || buf.len() > limit {
        buf.clear();
        return Ok(LineRead::TooLong);
    }
    Ok(LineRead::Line)
}
