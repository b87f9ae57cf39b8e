pub mod url_validator;

/// Alphabet for generated codes. Case-sensitive, URL-safe.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Produce a random candidate code. No uniqueness guarantee; the storage
/// constraint decides, and the create flow retries on collision.
pub fn generate_random_code(length: usize) -> String {
    use std::iter;

    iter::repeat_with(|| CODE_ALPHABET[rand::random_range(0..CODE_ALPHABET.len())] as char)
        .take(length)
        .collect()
}

/// Operator-supplied custom codes: alphanumeric plus `_` and `-`, 1..=64.
pub fn is_valid_code(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= 64
        && code
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Codes that would shadow mounted routes.
pub fn is_reserved_code(code: &str) -> bool {
    let console = crate::config::get_config()
        .api
        .console_prefix
        .trim_start_matches('/')
        .to_string();

    code == "healthz" || (!console.is_empty() && code == console)
}
