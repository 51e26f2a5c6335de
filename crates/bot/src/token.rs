//! Capability tokens: keyed hashes over a fixed purpose string, used
//! in place of session auth to gate single URL-addressable actions.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// hex(HMAC-SHA256(secret, msg)).
pub fn hmac_sha256_hex(secret: &str, msg: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(msg);
    hex::encode(mac.finalize().into_bytes())
}

/// Export token for one stage. No expiry and no revocation: any holder
/// of the token can export that stage indefinitely.
pub fn export_token(secret: &str, stage_id: &str) -> String {
    hmac_sha256_hex(secret, format!("export:{stage_id}").as_bytes())
}

/// Constant-time comparison of a presented token against the expected
/// one.
pub fn verify_export_token(secret: &str, stage_id: &str, token: &str) -> bool {
    let expected = export_token(secret, stage_id);
    expected.as_bytes().ct_eq(token.as_bytes()).into()
}
