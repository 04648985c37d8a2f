//! Token signing: HMAC-SHA512 over the JWS signing input.

use hmac::{Hmac, Mac};
use sha2::Sha512;

use crate::error::CipherError;
use crate::keys::{KeyMaterial, SigningKey};
use crate::serialize::{encode_payload, encode_segment, serialize_compact, serialize_header};
use crate::types::*;

pub(crate) type HmacSha512 = Hmac<Sha512>;

/// Keyed MAC over `signing_input`, ready to finalize or verify.
pub(crate) fn hs512_mac(key: &SigningKey, signing_input: &str) -> Result<HmacSha512, CipherError> {
    let mut mac = HmacSha512::new_from_slice(key.as_bytes())
        .map_err(|e| CipherError::CryptoBackend(format!("invalid HMAC key: {e}")))?;
    mac.update(signing_input.as_bytes());
    Ok(mac)
}

/// Sign `payload` with HS512 and return the compact serialization.
pub fn sign_hs512(key: &SigningKey, payload: &[u8]) -> Result<CompactToken, CipherError> {
    let header = serialize_header(&JwsHeader::for_algorithm(Algorithm::HmacSha512))?;
    let payload = encode_segment(encode_payload(payload).as_bytes());

    let tag = hs512_mac(key, &signing_input(&header, &payload))?
        .finalize()
        .into_bytes();

    Ok(CompactToken {
        header,
        payload,
        signature: encode_segment(&tag),
    })
}

/// Sign `payload` under the key bound in `material`.
/// Returns the UTF-8 bytes of the compact serialization.
#[tracing::instrument(name = "sign", skip_all, fields(payload_len = payload.len()))]
pub fn sign(material: &KeyMaterial, payload: &[u8]) -> Result<Vec<u8>, CipherError> {
    let key = material.key().ok_or_else(CipherError::key_not_bound)?;
    let token = sign_hs512(key, payload)?;
    Ok(serialize_compact(&token).into_bytes())
}
