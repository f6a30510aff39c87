//! Server-Sent Events parsing for OpenAI-compatible streaming responses.

use anyhow::Result;
use bytes::Bytes;
use futures_util::Stream;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct StreamResponse {
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: Delta,
}

#[derive(Debug, Deserialize)]
struct Delta {
    content: Option<String>,
}

/// Converts a raw SSE byte stream into a stream of text chunks.
///
/// Chunks may split lines anywhere, so bytes are buffered until a full line
/// is available. The stream ends at `data: [DONE]` or when the body ends.
pub fn sse_to_text_stream<E>(
    byte_stream: impl Stream<Item = Result<Bytes, E>> + Send + 'static,
) -> impl Stream<Item = Result<String>> + Send
where
    E: std::fmt::Display + Send + 'static,
{
    async_stream::stream! {
        use futures_util::StreamExt;

        let mut byte_stream = std::pin::pin!(byte_stream);
        // Raw bytes: a chunk may end inside a multibyte character, but never
        // inside a line break, so only complete lines are decoded.
        let mut buffer: Vec<u8> = Vec::new();

        while let Some(chunk_result) = byte_stream.next().await {
            let chunk = match chunk_result {
                Ok(c) => c,
                Err(e) => {
                    yield Err(anyhow::anyhow!("Stream error: {e}"));
                    return;
                }
            };

            buffer.extend_from_slice(&chunk);

            while let Some(line_end) = buffer.iter().position(|&b| b == b'\n') {
                let raw: Vec<u8> = buffer.drain(..=line_end).collect();
                let line = String::from_utf8_lossy(&raw);
                let line = line.trim();

                if line == "data: [DONE]" {
                    return;
                }
                if let Some(content) = parse_sse_line(line) {
                    yield Ok(content);
                }
            }
        }
    }
}

/// Extracts the delta text from one `data:` line, if any.
fn parse_sse_line(line: &str) -> Option<String> {
    let json_str = line.strip_prefix("data: ")?;

    let response = serde_json::from_str::<StreamResponse>(json_str).ok()?;

    let content: String = response
        .choices
        .into_iter()
        .filter_map(|c| c.delta.content)
        .collect();

    if content.is_empty() {
        None
    } else {
        Some(content)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use futures_util::{StreamExt, stream};

    async fn collect(chunks: Vec<&'static str>) -> Vec<String> {
        let byte_stream = stream::iter(
            chunks
                .into_iter()
                .map(|c| Ok::<_, std::io::Error>(Bytes::from_static(c.as_bytes()))),
        );
        sse_to_text_stream(byte_stream)
            .map(|r| r.unwrap())
            .collect()
            .await
    }

    async fn collect_bytes(chunks: Vec<Vec<u8>>) -> Vec<String> {
        let byte_stream =
            stream::iter(chunks.into_iter().map(|c| Ok::<_, std::io::Error>(Bytes::from(c))));
        sse_to_text_stream(byte_stream)
            .map(|r| r.unwrap())
            .collect()
            .await
    }

    #[test]
    fn test_parse_sse_line_with_content() {
        let line = r#"data: {"choices":[{"delta":{"content":"кіт"}}]}"#;
        assert_eq!(parse_sse_line(line), Some("кіт".to_string()));
    }

    #[test]
    fn test_parse_sse_line_ignores_role_only_delta() {
        let line = r#"data: {"choices":[{"delta":{"role":"assistant"}}]}"#;
        assert_eq!(parse_sse_line(line), None);
    }

    #[test]
    fn test_parse_sse_line_rejects_non_data_lines() {
        assert_eq!(parse_sse_line(": keep-alive"), None);
        assert_eq!(parse_sse_line("data: not json"), None);
        assert_eq!(parse_sse_line(""), None);
    }

    #[tokio::test]
    async fn test_stream_handles_split_lines() {
        let chunks = vec![
            "data: {\"choices\":[{\"delta\":{\"content\":\"со\"}}]}\n\ndata: {\"choi",
            "ces\":[{\"delta\":{\"content\":\"бака\"}}]}\n\n",
            "data: [DONE]\n\n",
        ];
        assert_eq!(collect(chunks).await, vec!["со", "бака"]);
    }

    #[tokio::test]
    async fn test_stream_stops_at_done() {
        let chunks = vec![
            "data: [DONE]\n",
            "data: {\"choices\":[{\"delta\":{\"content\":\"late\"}}]}\n",
        ];
        assert!(collect(chunks).await.is_empty());
    }

    #[tokio::test]
    async fn test_stream_handles_character_split_across_chunks() {
        let line = "data: {\"choices\":[{\"delta\":{\"content\":\"кіт\"}}]}\n\n".as_bytes();
        // Cut right after the first byte of 'к' (0xD0 0xBA)
        let cut = line.iter().position(|&b| b == 0xD0).unwrap() + 1;
        let chunks = vec![line[..cut].to_vec(), line[cut..].to_vec()];

        assert_eq!(collect_bytes(chunks).await, vec!["кіт"]);
    }

    #[tokio::test]
    async fn test_stream_handles_byte_by_byte_delivery() {
        let body = "data: {\"choices\":[{\"delta\":{\"content\":\"собака\"}}]}\n\ndata: [DONE]\n\n";
        let chunks = body.bytes().map(|b| vec![b]).collect();

        assert_eq!(collect_bytes(chunks).await, vec!["собака"]);
    }
}
