/// Request authentication for the signed gateway functions
///
/// ```rust,ignore
/// use crate::common::auth::{sign, verify};
///
/// let sig = sign(secret, &timestamp, body);
/// verify(Some(secret), Some(&timestamp), Some(&sig), body, now)?;
/// ```

mod signature;

pub use signature::{
    sign, verify, SignatureError, MAX_CLOCK_SKEW_SECS, SIGNATURE_HEADER, TIMESTAMP_HEADER,
};
