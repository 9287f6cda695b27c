//! Decoders that turn a raw response body into a typed payload.
//!
//! A [`Decoder`] is the seam between the transport and the caller's types.
//! The built-in [`Json`] decoder covers the common case; any closure
//! `Fn(&str) -> Result<T, String>` works for everything else.

use serde::de::DeserializeOwned;

/// Converts a raw response body into the caller's expected type.
///
/// Decoding may fail; the returned `String` is the human-readable reason,
/// which ends up in the `message` of a
/// [`TransportFailure`](crate::CallOutcome::TransportFailure) with
/// [`FaultKind::Decode`](crate::FaultKind::Decode).
///
/// # Examples
///
/// A closure is a decoder:
///
/// ```no_run
/// use verdict::Client;
///
/// # async fn example() -> Result<(), verdict::Error> {
/// let client = Client::builder()
///     .base_url("https://api.example.com")?
///     .build()?;
///
/// let spec = verdict::RequestSpec::new(http::Method::GET, "/health");
/// let outcome = client
///     .invoke(spec, |raw: &str| -> Result<bool, String> {
///         Ok(raw.trim() == "ok")
///     })
///     .await;
/// # Ok(())
/// # }
/// ```
pub trait Decoder<T>: Send + Sync {
    /// Decodes the raw body, or explains why it could not be decoded.
    fn decode(&self, raw: &str) -> Result<T, String>;
}

/// Decodes the body as JSON into any `T: DeserializeOwned`.
///
/// This is the decoder behind the [`Client`](crate::Client) convenience
/// methods (`get`, `post`, ...).
#[derive(Debug, Clone, Copy, Default)]
pub struct Json;

impl<T: DeserializeOwned> Decoder<T> for Json {
    fn decode(&self, raw: &str) -> Result<T, String> {
        serde_json::from_str(raw).map_err(|e| e.to_string())
    }
}

/// Yields the raw body unchanged. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct Text;

impl Decoder<String> for Text {
    fn decode(&self, raw: &str) -> Result<String, String> {
        Ok(raw.to_owned())
    }
}

impl<T, F> Decoder<T> for F
where
    F: Fn(&str) -> Result<T, String> + Send + Sync,
{
    fn decode(&self, raw: &str) -> Result<T, String> {
        self(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[test]
    fn json_decodes_valid_payload() {
        let point: Point = Json.decode(r#"{"x":1,"y":-2}"#).unwrap();
        assert_eq!(point, Point { x: 1, y: -2 });
    }

    #[test]
    fn json_reports_malformed_payload() {
        let result: Result<Point, String> = Json.decode("not-json");
        let message = result.unwrap_err();
        assert!(message.contains("expected"), "unhelpful error: {message}");
    }

    #[test]
    fn text_is_infallible() {
        assert_eq!(Text.decode("  raw bytes ").unwrap(), "  raw bytes ");
    }

    #[test]
    fn closures_are_decoders() {
        let parse_len = |raw: &str| -> Result<usize, String> { Ok(raw.len()) };
        assert_eq!(parse_len.decode("four").unwrap(), 4);
    }
}
