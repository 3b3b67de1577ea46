//! HMAC request signing for the WordPress gateway.
//!
//! A caller signs `"{timestamp}.{body}"` with HMAC-SHA256 under the shared
//! gateway secret and sends the lower-case hex digest in `X-Signature` next to
//! the unix timestamp in `X-Timestamp`. Verification rejects timestamps more
//! than [`MAX_CLOCK_SKEW_SECS`] away from the server clock.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

pub const TIMESTAMP_HEADER: &str = "x-timestamp";
pub const SIGNATURE_HEADER: &str = "x-signature";

/// Replay window in seconds, either side of now.
pub const MAX_CLOCK_SKEW_SECS: i64 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("missing secret")]
    MissingSecret,
    #[error("missing headers")]
    MissingHeaders,
    #[error("bad timestamp")]
    BadTimestamp,
    #[error("bad signature")]
    BadSignature,
}

fn mac_for(secret: &str, timestamp: &str, body: &[u8]) -> HmacSha256 {
    // HMAC accepts keys of any length
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .unwrap_or_else(|_| unreachable!("HMAC key length is unrestricted"));
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(body);
    mac
}

/// Hex HMAC-SHA256 of `"{timestamp}.{body}"`.
pub fn sign(secret: &str, timestamp: &str, body: &[u8]) -> String {
    hex::encode(mac_for(secret, timestamp, body).finalize().into_bytes())
}

/// Verify a signed request against the clock value `now` (unix seconds).
pub fn verify(
    secret: Option<&str>,
    timestamp: Option<&str>,
    signature: Option<&str>,
    body: &[u8],
    now: i64,
) -> Result<(), SignatureError> {
    let secret = secret
        .filter(|s| !s.is_empty())
        .ok_or(SignatureError::MissingSecret)?;

    let (timestamp, signature) = match (timestamp, signature) {
        (Some(ts), Some(sig)) if !ts.is_empty() && !sig.is_empty() => (ts, sig),
        _ => return Err(SignatureError::MissingHeaders),
    };

    let ts: i64 = timestamp
        .trim()
        .parse()
        .map_err(|_| SignatureError::BadTimestamp)?;
    if (now - ts).abs() > MAX_CLOCK_SKEW_SECS {
        return Err(SignatureError::BadTimestamp);
    }

    let provided = hex::decode(signature.trim()).map_err(|_| SignatureError::BadSignature)?;

    // verify_slice compares in constant time and rejects length mismatches
    mac_for(secret, timestamp, body)
        .verify_slice(&provided)
        .map_err(|_| SignatureError::BadSignature)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "gateway-test-secret";
    const NOW: i64 = 1_767_225_600;

    fn signed(body: &str) -> (String, String) {
        let ts = NOW.to_string();
        let sig = sign(SECRET, &ts, body.as_bytes());
        (ts, sig)
    }

    #[test]
    fn test_sign_then_verify() {
        for body in ["", "{}", r#"{"id":1,"data":{"title":"Wolf Alice"}}"#, "ünïcödé"] {
            let (ts, sig) = signed(body);
            assert_eq!(
                verify(Some(SECRET), Some(&ts), Some(&sig), body.as_bytes(), NOW),
                Ok(())
            );
        }
    }

    #[test]
    fn test_known_vector() {
        // echo -n '1700000000.{}' | openssl dgst -sha256 -hmac 'secret'
        assert_eq!(
            sign("secret", "1700000000", b"{}"),
            "b8569b78799ff9e3cbff0fc2d63a33a2b57f3282abd07c37ae5e8e7d79a5f163"
        );
    }

    #[test]
    fn test_missing_secret() {
        let (ts, sig) = signed("{}");
        assert_eq!(
            verify(None, Some(&ts), Some(&sig), b"{}", NOW),
            Err(SignatureError::MissingSecret)
        );
        assert_eq!(
            verify(Some(""), Some(&ts), Some(&sig), b"{}", NOW),
            Err(SignatureError::MissingSecret)
        );
    }

    #[test]
    fn test_missing_headers() {
        let (ts, sig) = signed("{}");
        assert_eq!(
            verify(Some(SECRET), None, Some(&sig), b"{}", NOW),
            Err(SignatureError::MissingHeaders)
        );
        assert_eq!(
            verify(Some(SECRET), Some(&ts), Some(""), b"{}", NOW),
            Err(SignatureError::MissingHeaders)
        );
    }

    #[test]
    fn test_non_numeric_timestamp() {
        let sig = sign(SECRET, "yesterday", b"{}");
        assert_eq!(
            verify(Some(SECRET), Some("yesterday"), Some(&sig), b"{}", NOW),
            Err(SignatureError::BadTimestamp)
        );
    }

    #[test]
    fn test_skew_window_boundaries() {
        for offset in [-90, 0, 90] {
            let ts = (NOW + offset).to_string();
            let sig = sign(SECRET, &ts, b"{}");
            assert_eq!(verify(Some(SECRET), Some(&ts), Some(&sig), b"{}", NOW), Ok(()));
        }
    }

    #[test]
    fn test_stale_or_future_timestamp_fails_even_when_signed() {
        for offset in [-91, 91, -3600, 86_400] {
            let ts = (NOW + offset).to_string();
            let sig = sign(SECRET, &ts, b"{}");
            assert_eq!(
                verify(Some(SECRET), Some(&ts), Some(&sig), b"{}", NOW),
                Err(SignatureError::BadTimestamp),
                "offset {offset}"
            );
        }
    }

    #[test]
    fn test_wrong_signature_content_or_length() {
        let (ts, sig) = signed("{}");

        let mut flipped = sig.clone().into_bytes();
        flipped[0] = if flipped[0] == b'a' { b'b' } else { b'a' };
        let flipped = String::from_utf8(flipped).unwrap();
        let extended = format!("{sig}00");

        for bad in [flipped.as_str(), &sig[..62], "zz", "00", extended.as_str()] {
            assert_eq!(
                verify(Some(SECRET), Some(&ts), Some(bad), b"{}", NOW),
                Err(SignatureError::BadSignature),
                "signature {bad}"
            );
        }
    }

    #[test]
    fn test_body_or_secret_tampering() {
        let (ts, sig) = signed(r#"{"id":1}"#);
        assert_eq!(
            verify(Some(SECRET), Some(&ts), Some(&sig), br#"{"id":2}"#, NOW),
            Err(SignatureError::BadSignature)
        );
        assert_eq!(
            verify(Some("other"), Some(&ts), Some(&sig), br#"{"id":1}"#, NOW),
            Err(SignatureError::BadSignature)
        );
    }

    #[test]
    fn test_uppercase_hex_accepted() {
        let (ts, sig) = signed("{}");
        assert_eq!(
            verify(Some(SECRET), Some(&ts), Some(&sig.to_uppercase()), b"{}", NOW),
            Ok(())
        );
    }
}
