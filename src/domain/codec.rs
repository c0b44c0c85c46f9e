//! Base-36 token codec.
//!
//! Row ids map deterministically to short tokens over the alphabet `0-9a-z`.
//! The codec carries no randomness; uniqueness comes from the id sequence,
//! collision handling from the allocator on top.

/// Alphabet used for token encoding: digits first, then lowercase letters.
const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Converts row ids to short tokens and back.
///
/// `encode` is total; id `0` is a legitimate input and encodes to `"0"`.
/// `decode` returns `None` for anything that is not a well-formed token,
/// including the empty string and values that overflow `u64`. No in-band
/// sentinel id exists.
pub trait TokenCodec: Send + Sync {
    /// Encodes an id as a short token.
    fn encode(&self, id: u64) -> String;

    /// Decodes a token back to an id.
    ///
    /// Case-insensitive: `"Z"` and `"z"` decode to the same id. Signs,
    /// whitespace and non-alphanumeric characters make a token malformed.
    fn decode(&self, token: &str) -> Option<u64>;
}

/// Base-36 codec over `0-9a-z`.
///
/// Encoding always produces lowercase. Decoding is hand-rolled rather than
/// delegated to `u64::from_str_radix`, which tolerates a leading `+` and
/// would silently accept suffixed candidate tokens as plain ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base36Codec;

impl TokenCodec for Base36Codec {
    fn encode(&self, id: u64) -> String {
        if id == 0 {
            return "0".to_string();
        }

        // Worst-case length for u64 in base 36 is 13 characters.
        let mut buf = [0u8; 13];
        let mut i = buf.len();
        let mut n = id;
        while n > 0 {
            let rem = (n % 36) as usize;
            i -= 1;
            buf[i] = ALPHABET[rem];
            n /= 36;
        }
        String::from_utf8(buf[i..].to_vec()).expect("valid ascii from alphabet")
    }

    fn decode(&self, token: &str) -> Option<u64> {
        if token.is_empty() {
            return None;
        }

        let mut id: u64 = 0;
        for c in token.chars() {
            let digit = u64::from(c.to_digit(36)?);
            id = id.checked_mul(36)?.checked_add(digit)?;
        }
        Some(id)
    }
}
