//! Opaque token generation.
//!
//! Session ids and password-reset tokens are both textual v4 UUIDs:
//! 128 bits from a CSPRNG, unpredictable, with a collision space treated
//! as negligible. Nothing about the token encodes identity or expiry;
//! validity is defined entirely by what the credential store holds.

use uuid::Uuid;

/// Generate a fresh opaque token.
pub fn generate() -> String {
    Uuid::new_v4().to_string()
}
