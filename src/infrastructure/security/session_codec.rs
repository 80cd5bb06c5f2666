use base64::{Engine as _, engine::general_purpose};
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

use crate::domain::auth::entities::SessionClaims;

type HmacSha256 = Hmac<Sha256>;

/// Error types for session cookie encoding/decoding
#[derive(Debug, thiserror::Error)]
pub enum SessionCodecError {
  #[error("Session signing secret is missing or empty")]
  MissingSecret,

  #[error("Malformed session value")]
  Malformed,

  #[error("Session signature verification failed")]
  InvalidSignature,

  #[error("Session has expired")]
  Expired,

  #[error("Session encoding failed: {0}")]
  EncodingFailed(String),
}

/// HMAC-SHA256 signed session cookie codec.
///
/// The entire session (user id, issue and expiry instants) travels in the
/// cookie value as `base64url(claims).base64url(tag)`; the server keeps no
/// session table. The tag is computed over the encoded claims with a
/// process-wide secret loaded once at startup. Decoding fails closed: a
/// missing, malformed, tampered or expired value is worth exactly nothing.
pub struct SessionCodec {
  key: Vec<u8>,
  ttl: Duration,
}

impl SessionCodec {
  /// Creates a codec from the operator-supplied secret and session TTL.
  ///
  /// An absent or blank secret is refused outright so the process can fail
  /// at startup instead of silently issuing forgeable sessions.
  pub fn new(secret: &str, ttl_seconds: i64) -> Result<Self, SessionCodecError> {
    if secret.trim().is_empty() {
      return Err(SessionCodecError::MissingSecret);
    }

    Ok(Self {
      key: secret.as_bytes().to_vec(),
      ttl: Duration::seconds(ttl_seconds),
    })
  }

  /// Session lifetime in seconds, also used for the cookie Max-Age
  pub fn ttl_seconds(&self) -> i64 {
    self.ttl.num_seconds()
  }

  /// Encodes signed claims for `user_id`, valid from `now` for the TTL
  pub fn encode(&self, user_id: Uuid, now: DateTime<Utc>) -> Result<String, SessionCodecError> {
    let claims = SessionClaims::new(user_id, now, self.ttl);

    let payload = serde_json::to_vec(&claims)
      .map_err(|e| SessionCodecError::EncodingFailed(e.to_string()))?;
    let payload_b64 = general_purpose::URL_SAFE_NO_PAD.encode(payload);

    let mut mac = HmacSha256::new_from_slice(&self.key)
      .map_err(|e| SessionCodecError::EncodingFailed(e.to_string()))?;
    mac.update(payload_b64.as_bytes());
    let signature = mac.finalize().into_bytes();
    let signature_b64 = general_purpose::URL_SAFE_NO_PAD.encode(signature);

    Ok(format!("{}.{}", payload_b64, signature_b64))
  }

  /// Verifies and decodes a cookie value as of `now`.
  ///
  /// The signature is checked before the payload is even parsed; comparison
  /// is constant-time via `Mac::verify_slice`.
  pub fn decode(&self, value: &str, now: DateTime<Utc>) -> Result<SessionClaims, SessionCodecError> {
    let (payload_b64, signature_b64) = value
      .split_once('.')
      .ok_or(SessionCodecError::Malformed)?;

    let signature = general_purpose::URL_SAFE_NO_PAD
      .decode(signature_b64)
      .map_err(|_| SessionCodecError::Malformed)?;

    let mut mac = HmacSha256::new_from_slice(&self.key)
      .map_err(|_| SessionCodecError::InvalidSignature)?;
    mac.update(payload_b64.as_bytes());
    mac
      .verify_slice(&signature)
      .map_err(|_| SessionCodecError::InvalidSignature)?;

    let payload = general_purpose::URL_SAFE_NO_PAD
      .decode(payload_b64)
      .map_err(|_| SessionCodecError::Malformed)?;

    let claims: SessionClaims =
      serde_json::from_slice(&payload).map_err(|_| SessionCodecError::Malformed)?;

    if claims.is_expired_at(now) {
      return Err(SessionCodecError::Expired);
    }

    Ok(claims)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const TTL: i64 = 60 * 60 * 24 * 30;

  fn codec() -> SessionCodec {
    SessionCodec::new("test-secret-please-rotate", TTL).unwrap()
  }

  #[test]
  fn test_empty_secret_is_refused() {
    assert!(matches!(
      SessionCodec::new("", TTL),
      Err(SessionCodecError::MissingSecret)
    ));
    assert!(matches!(
      SessionCodec::new("   ", TTL),
      Err(SessionCodecError::MissingSecret)
    ));
  }

  #[test]
  fn test_encode_decode_roundtrip() {
    let codec = codec();
    let user_id = Uuid::new_v4();
    let t0 = Utc::now();

    let cookie = codec.encode(user_id, t0).unwrap();

    // Valid at issuance, just before expiry, and anywhere in between
    assert_eq!(codec.decode(&cookie, t0).unwrap().user_id, user_id);
    let almost_expired = t0 + Duration::seconds(TTL) - Duration::seconds(1);
    assert_eq!(codec.decode(&cookie, almost_expired).unwrap().user_id, user_id);
  }

  #[test]
  fn test_decode_after_expiry_fails_closed() {
    let codec = codec();
    let t0 = Utc::now();
    let cookie = codec.encode(Uuid::new_v4(), t0).unwrap();

    let at_expiry = t0 + Duration::seconds(TTL);
    assert!(matches!(
      codec.decode(&cookie, at_expiry),
      Err(SessionCodecError::Expired)
    ));
    assert!(codec.decode(&cookie, at_expiry + Duration::days(1)).is_err());
  }

  #[test]
  fn test_any_single_byte_mutation_is_rejected() {
    let codec = codec();
    let now = Utc::now();
    let cookie = codec.encode(Uuid::new_v4(), now).unwrap();
    let bytes = cookie.as_bytes();

    for i in 0..bytes.len() {
      let mut tampered = bytes.to_vec();
      tampered[i] ^= 0x01;
      let tampered = String::from_utf8_lossy(&tampered).into_owned();
      assert!(
        codec.decode(&tampered, now).is_err(),
        "mutation at byte {} was accepted",
        i
      );
    }
  }

  #[test]
  fn test_wrong_secret_is_rejected() {
    let codec = codec();
    let other = SessionCodec::new("a-different-secret", TTL).unwrap();
    let now = Utc::now();

    let cookie = codec.encode(Uuid::new_v4(), now).unwrap();
    assert!(matches!(
      other.decode(&cookie, now),
      Err(SessionCodecError::InvalidSignature)
    ));
  }

  #[test]
  fn test_malformed_values_are_rejected() {
    let codec = codec();
    let now = Utc::now();

    for value in ["", "no-dot", ".", "..", "a.b", "a.b.c", "!!!.???"] {
      assert!(codec.decode(value, now).is_err(), "accepted {:?}", value);
    }
  }

  #[test]
  fn test_payload_without_valid_signature_is_rejected() {
    let codec = codec();
    let now = Utc::now();

    // A well-formed payload with a signature minted under no secret at all
    let claims = SessionClaims::new(Uuid::new_v4(), now, Duration::seconds(TTL));
    let payload_b64 =
      general_purpose::URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());
    let forged = format!("{}.{}", payload_b64, general_purpose::URL_SAFE_NO_PAD.encode(b"sig"));

    assert!(matches!(
      codec.decode(&forged, now),
      Err(SessionCodecError::InvalidSignature)
    ));
  }
}
