//! Password hashing.
//!
//! PBKDF2-HMAC-SHA256 with a per-password random salt. Hashes are stored
//! as `base64(salt):base64(derived_key)`.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};

use crate::error::{StoreError, StoreResult};

/// PBKDF2 iteration count (OWASP 2023 recommendation for HMAC-SHA256).
const PBKDF2_ITERATIONS: u32 = 600_000;

/// Salt length in bytes.
const SALT_LEN: usize = 32;

/// Derived key length in bytes.
const KEY_LEN: usize = 32;

static PBKDF2_ALG: pbkdf2::Algorithm = pbkdf2::PBKDF2_HMAC_SHA256;

/// Hash a plaintext password into its storable form.
pub fn hash(plaintext: &str) -> StoreResult<String> {
    let rng = SystemRandom::new();
    let mut salt = [0u8; SALT_LEN];
    rng.fill(&mut salt)
        .map_err(|_| StoreError::Internal("failed to generate random salt".into()))?;

    let mut key = [0u8; KEY_LEN];
    let iterations =
        std::num::NonZeroU32::new(PBKDF2_ITERATIONS).expect("PBKDF2_ITERATIONS is non-zero");
    pbkdf2::derive(PBKDF2_ALG, iterations, &salt, plaintext.as_bytes(), &mut key);

    Ok(format!("{}:{}", BASE64.encode(salt), BASE64.encode(key)))
}

/// Verify a plaintext password against a stored hash.
///
/// Any malformed hash verifies as `false`; callers get a login failure,
/// not a panic, when a stored hash is corrupt or empty.
pub fn verify(plaintext: &str, stored: &str) -> bool {
    let Some((salt_b64, key_b64)) = stored.split_once(':') else {
        return false;
    };
    let (Ok(salt), Ok(key)) = (BASE64.decode(salt_b64), BASE64.decode(key_b64)) else {
        return false;
    };
    let iterations =
        std::num::NonZeroU32::new(PBKDF2_ITERATIONS).expect("PBKDF2_ITERATIONS is non-zero");
    pbkdf2::verify(PBKDF2_ALG, iterations, &salt, plaintext.as_bytes(), &key).is_ok()
}
