use serde::{Deserialize, Serialize};

/// Signing algorithm named in the token header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    HmacSha512,
}

impl Algorithm {
    /// Parse a JWS `alg` header value.
    pub fn from_name(name: &str) -> Option<Algorithm> {
        match name {
            "HS512" => Some(Algorithm::HmacSha512),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::HmacSha512 => "HS512",
        }
    }

    /// Returns the signature length in bytes for this algorithm.
    pub fn signature_len(self) -> usize {
        match self {
            Algorithm::HmacSha512 => HS512_SIG_LEN,
        }
    }
}

/// JOSE header. Only `alg` is produced; other members are tolerated on input
/// and ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwsHeader {
    pub alg: String,
}

impl JwsHeader {
    pub fn for_algorithm(algorithm: Algorithm) -> Self {
        JwsHeader {
            alg: algorithm.name().to_string(),
        }
    }
}

/// The three segments of a compact serialization, still base64url-encoded.
///
/// `payload` carries the standard-base64 form of the caller's bytes, so the
/// raw payload is encoded twice on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompactToken {
    pub header: String,
    pub payload: String,
    pub signature: String,
}

impl CompactToken {
    /// The bytes covered by the signature: `header "." payload`.
    pub fn signing_input(&self) -> String {
        signing_input(&self.header, &self.payload)
    }
}

/// A parsed token: the raw segments plus their decoded contents.
///
/// Parsing checks structure only. Nothing here has been authenticated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedToken {
    pub compact: CompactToken,
    pub header: JwsHeader,
    /// Decoded payload segment: the standard-base64 form of the original bytes.
    pub payload: String,
    pub signature: Vec<u8>,
}

pub(crate) fn signing_input(header: &str, payload: &str) -> String {
    let mut input = String::with_capacity(header.len() + payload.len() + 1);
    input.push_str(header);
    input.push(SEGMENT_SEPARATOR);
    input.push_str(payload);
    input
}

/// Separator between compact serialization segments.
pub const SEGMENT_SEPARATOR: char = '.';

/// Number of segments in a JWS compact serialization.
pub const SEGMENT_COUNT: usize = 3;

/// Constant: HMAC-SHA512 signature length.
pub const HS512_SIG_LEN: usize = 64;

/// Keys shorter than the HS512 hash output are accepted but logged as weak.
pub const RECOMMENDED_KEY_LEN: usize = 64;

/// Constant: key fingerprint length in bytes.
pub const KEY_HASH_LEN: usize = 8;
