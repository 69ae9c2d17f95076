// Chunked NDJSON streaming utilities
use crate::application::streaming_service::RunEvent;
use axum::body::Body;
use axum::http::{header, Response, StatusCode};
use axum::response::IntoResponse;
use bytes::{BufMut, Bytes, BytesMut};
use futures::stream::Stream;
use futures::StreamExt;

pub const NDJSON_CONTENT_TYPE: &str = "application/x-ndjson";

/// Create a chunked response with one JSON document per line
pub fn chunked_ndjson_stream<S>(stream: S) -> Result<Response<Body>, StatusCode>
where
    S: Stream<Item = RunEvent> + Send + 'static,
{
    let byte_stream = stream.map(serialize_chunk);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, NDJSON_CONTENT_TYPE)
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from_stream(byte_stream))
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Serialize a single event to a newline-terminated chunk
pub fn serialize_chunk(event: RunEvent) -> Result<Bytes, std::io::Error> {
    let payload = serde_json::to_vec(&event).map_err(std::io::Error::other)?;

    let mut chunk = BytesMut::with_capacity(payload.len() + 1);
    chunk.put_slice(&payload);
    chunk.put_u8(b'\n');

    Ok(chunk.freeze())
}

/// Helper to create a streaming response from a receiver
pub fn stream_from_receiver(mut rx: tokio::sync::mpsc::Receiver<RunEvent>) -> impl IntoResponse {
    let stream = async_stream::stream! {
        while let Some(event) = rx.recv().await {
            yield event;
        }
    };

    match chunked_ndjson_stream(stream) {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}
