/// Normalize a ticker symbol for use as a storage key: trimmed and
/// uppercased. Applied once at every store boundary so that lookups and
/// upserts agree on the key regardless of caller formatting.
pub fn normalize_symbol(raw: &str) -> String {
    raw.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_uppercases() {
        assert_eq!(normalize_symbol(" aapl "), "AAPL");
    }

    #[test]
    fn test_idempotent() {
        let once = normalize_symbol(" msft");
        assert_eq!(normalize_symbol(&once), once);
    }

    #[test]
    fn test_mixed_case() {
        assert_eq!(normalize_symbol("BrK.b"), "BRK.B");
    }
}
