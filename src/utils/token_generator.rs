//! Auto token generation.
//!
//! Every link row carries an opaque random token from the moment it is
//! inserted, independent of the short token resolved later.

/// Length of random bytes before hex encoding.
const AUTO_TOKEN_BYTES: usize = 16;

/// Generates the opaque token stored alongside every placeholder row.
///
/// Uses `getrandom` for entropy and encodes the result as lowercase hex,
/// producing a 32-character token. The value never appears in a short URL;
/// it gives every row an unguessable identifier for audit and bookkeeping
/// before a short token exists.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
///
/// # Examples
///
/// ```ignore
/// let token = generate_auto_token();
/// assert_eq!(token.len(), 32);
/// assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
pub fn generate_auto_token() -> String {
    let mut buffer = [0u8; AUTO_TOKEN_BYTES];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    hex::encode(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_auto_token_has_correct_length() {
        let token = generate_auto_token();
        assert_eq!(token.len(), 32);
    }

    #[test]
    fn test_generate_auto_token_is_lowercase_hex() {
        let token = generate_auto_token();
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }

    #[test]
    fn test_generate_auto_token_produces_unique_tokens() {
        let mut tokens = HashSet::new();

        for _ in 0..1000 {
            let token = generate_auto_token();
            tokens.insert(token);
        }

        assert_eq!(tokens.len(), 1000);
    }
}
