//! Random API token generation

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;

/// Number of random bytes per token (256 bits of entropy)
const TOKEN_BYTES: usize = 32;

/// Generate a URL-safe random token.
///
/// 32 bytes of OS randomness, base64url without padding: 43 characters,
/// same shape as `secrets.token_urlsafe(32)`.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
