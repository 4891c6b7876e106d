use rand::{rngs::OsRng, RngCore};

pub const TOKEN_KEY_LENGTH: usize = 40;

/// A 40 character lowercase hex key, the same shape as the classic
/// `Authorization: Token <key>` scheme.
pub fn generate_token_key() -> String {
    let mut bytes = [0u8; TOKEN_KEY_LENGTH / 2];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_hex_and_unique() {
        let a = generate_token_key();
        let b = generate_token_key();
        assert_eq!(a.len(), TOKEN_KEY_LENGTH);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_ne!(a, b);
    }
}
