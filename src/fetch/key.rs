//! Cache key convention for upstream resources.

/// Number of token characters folded into a cache key
pub const TOKEN_PREFIX_LEN: usize = 10;

/// Builds the cache key `"<resource>_<id>_<token-prefix>"`.
///
/// Including part of the bearer token keeps one user's cached responses
/// from being served to another session.
pub fn cache_key(resource: &str, id: &str, token: &str) -> String {
    let prefix: String = token.chars().take(TOKEN_PREFIX_LEN).collect();
    format!("{}_{}_{}", resource, id, prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_token_used_whole() {
        assert_eq!(cache_key("warranty", "123", "abc"), "warranty_123_abc");
    }

    #[test]
    fn test_long_token_truncated() {
        assert_eq!(
            cache_key("product", "9", "eyJhbGciOiJIUzI1NiJ9.payload"),
            "product_9_eyJhbGciOi"
        );
    }

    #[test]
    fn test_multibyte_token_not_split() {
        let key = cache_key("provider", "1", "ééééééééééééé");
        assert_eq!(key, format!("provider_1_{}", "é".repeat(TOKEN_PREFIX_LEN)));
    }

    #[test]
    fn test_different_tokens_different_keys() {
        assert_ne!(
            cache_key("warranty", "1", "token-alice"),
            cache_key("warranty", "1", "token-bob")
        );
    }
}
