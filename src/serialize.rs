//! JWS compact serialization for HS512 tokens.
//!
//! Wire layout:
//!   base64url(header JSON) "." base64url(base64(payload)) "." base64url(signature)
//!
//! Segments are encoded as unpadded base64url. Padding is tolerated on decode.
//! The payload is standard base64 (padded) before the segment encoding.

use base64::alphabet;
use base64::engine::{general_purpose, DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;

use crate::error::CipherError;
use crate::types::*;

/// Segment codec: URL-safe alphabet, no padding on encode, either on decode.
pub const SEGMENT_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encode bytes as a compact serialization segment.
#[must_use]
pub fn encode_segment(bytes: &[u8]) -> String {
    SEGMENT_ENGINE.encode(bytes)
}

/// Decode one compact serialization segment. `name` is used in error messages.
pub fn decode_segment(segment: &str, name: &str) -> Result<Vec<u8>, CipherError> {
    SEGMENT_ENGINE
        .decode(segment)
        .map_err(|e| CipherError::TokenFormat(format!("{name} segment is not base64url: {e}")))
}

/// Inner payload encoding applied before the payload is placed in a token.
#[must_use]
pub fn encode_payload(payload: &[u8]) -> String {
    general_purpose::STANDARD.encode(payload)
}

/// Reverse [`encode_payload`].
pub fn decode_payload(encoded: &str) -> Result<Vec<u8>, CipherError> {
    general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| CipherError::TokenFormat(format!("payload is not base64: {e}")))
}

/// Serialize a header as its base64url segment.
pub fn serialize_header(header: &JwsHeader) -> Result<String, CipherError> {
    let json = serde_json::to_vec(header)
        .map_err(|e| CipherError::CryptoBackend(format!("header encoding failed: {e}")))?;
    Ok(encode_segment(&json))
}

/// Decode and parse a header segment. The header must be a JSON object with a
/// string `alg` member.
pub fn deserialize_header(segment: &str) -> Result<JwsHeader, CipherError> {
    let json = decode_segment(segment, "header")?;
    let value: serde_json::Value = serde_json::from_slice(&json)
        .map_err(|e| CipherError::TokenFormat(format!("header is not JSON: {e}")))?;
    if !value.is_object() {
        return Err(CipherError::TokenFormat("header is not a JSON object".into()));
    }
    serde_json::from_value(value)
        .map_err(|e| CipherError::TokenFormat(format!("invalid header: {e}")))
}

/// Join three segments into the compact form.
#[must_use]
pub fn serialize_compact(token: &CompactToken) -> String {
    let mut out = token.signing_input();
    out.reserve(token.signature.len() + 1);
    out.push(SEGMENT_SEPARATOR);
    out.push_str(&token.signature);
    out
}

/// Split a compact serialization into its three segments without decoding them.
pub fn split_compact(token: &str) -> Result<CompactToken, CipherError> {
    let segments: Vec<&str> = token.split(SEGMENT_SEPARATOR).collect();
    let [header, payload, signature] = segments.as_slice() else {
        return Err(CipherError::TokenFormat(format!(
            "expected {SEGMENT_COUNT} segments, got {}",
            segments.len()
        )));
    };
    Ok(CompactToken {
        header: (*header).to_string(),
        payload: (*payload).to_string(),
        signature: (*signature).to_string(),
    })
}

/// Parse token bytes into a [`DecodedToken`].
///
/// Checks UTF-8, segment count, base64url validity of every segment, header
/// JSON and payload UTF-8. Does not check the signature.
pub fn deserialize_token(token_bytes: &[u8]) -> Result<DecodedToken, CipherError> {
    let text = std::str::from_utf8(token_bytes)
        .map_err(|e| CipherError::TokenFormat(format!("token is not UTF-8: {e}")))?;
    let compact = split_compact(text)?;

    let header = deserialize_header(&compact.header)?;
    let payload_bytes = decode_segment(&compact.payload, "payload")?;
    let payload = String::from_utf8(payload_bytes)
        .map_err(|e| CipherError::TokenFormat(format!("payload segment is not UTF-8: {e}")))?;
    let signature = decode_segment(&compact.signature, "signature")?;

    Ok(DecodedToken {
        compact,
        header,
        payload,
        signature,
    })
}
