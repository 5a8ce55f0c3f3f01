//! The cookie integrity protocol: canonicalization, keyed hashing, and the
//! symmetric verify step.
//!
//! Everything here is a pure function of its inputs. The verify path never
//! panics on malformed input; every failure mode is `false`.

use std::fmt::Write as _;

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::secret::Secret;
use crate::session::{HASH_KEY, SessionData};

type HmacSha256 = Hmac<Sha256>;

/// Flattens a payload into the string the hash is computed over.
///
/// Values are rendered canonically and concatenated in the payload's
/// insertion order, skipping the [`HASH_KEY`] entry. No separators, no key
/// names. Two payloads with different key sets but identical concatenated
/// value strings therefore canonicalize identically; that is a property of
/// the wire format, kept for compatibility (see
/// `payloads_with_equal_value_concatenation_collide` below).
#[must_use]
pub fn canonicalize(data: &SessionData) -> String {
    let mut out = String::new();
    for (key, value) in data.iter() {
        if key == HASH_KEY {
            continue;
        }
        let _ = write!(out, "{value}");
    }
    out
}

/// HMAC-SHA256 over the canonical string, as lowercase hex (64 chars).
#[must_use]
pub fn sign(canonical: &str, secret: &Secret) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.expose()).expect("HMAC accepts keys of any size");
    mac.update(canonical.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// [`sign`] over [`canonicalize`].
#[must_use]
pub fn sign_payload(data: &SessionData, secret: &Secret) -> String {
    sign(&canonicalize(data), secret)
}

/// True iff the payload carries a string-typed `hash` entry that matches the
/// hash recomputed over the remaining fields.
///
/// The comparison is constant-time. A missing, non-string, or non-hex hash
/// is `false`, not an error; callers cannot distinguish "tampered" from
/// "absent".
#[must_use]
pub fn verify(data: &SessionData, secret: &Secret) -> bool {
    let Some(stored) = data.hash() else {
        return false;
    };
    let Ok(stored) = hex::decode(stored) else {
        return false;
    };

    let mut mac =
        HmacSha256::new_from_slice(secret.expose()).expect("HMAC accepts keys of any size");
    mac.update(canonicalize(data).as_bytes());
    mac.verify_slice(&stored).is_ok()
}
