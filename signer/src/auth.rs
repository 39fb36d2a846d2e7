//! Auth tokens: a signed `"{deadline}:{account}:{api_key}"` message.

use curve::{BaseField, Goldilocks};
use schnorr::hash_to_quintic_extension;

/// Default token lifetime when the caller gives no deadline.
pub const DEFAULT_AUTH_LIFETIME_SECS: i64 = 7 * 60 * 60;

pub fn auth_message(deadline: i64, account_index: i64, api_key_index: u8) -> String {
    format!("{deadline}:{account_index}:{api_key_index}")
}

/// Packs bytes into Goldilocks elements, 8 little-endian bytes per element.
/// The last chunk is zero padded.
pub fn bytes_to_elements(bytes: &[u8]) -> Vec<Goldilocks> {
    bytes
        .chunks(8)
        .map(|chunk| {
            let mut buf = [0u8; 8];
            buf[..chunk.len()].copy_from_slice(chunk);
            Goldilocks::new(u64::from_le_bytes(buf))
        })
        .collect()
}

pub fn auth_message_hash(message: &str) -> BaseField {
    hash_to_quintic_extension(&bytes_to_elements(message.as_bytes()))
}
