use std::env;

/// Read the database endpoint from the environment and enforce the
/// encrypted-transport policy: the connection URL must carry an sslmode,
/// and when it does not, `sslmode=require` is appended.
pub fn database_url() -> Result<String, env::VarError> {
    let url = env::var("DATABASE_URL")?;
    Ok(with_required_ssl(url))
}

pub fn with_required_ssl(url: String) -> String {
    if url.contains("sslmode=") {
        return url;
    }
    if url.contains('?') {
        format!("{}&sslmode=require", url)
    } else {
        format!("{}?sslmode=require", url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_sslmode_without_query() {
        let url = with_required_ssl("postgresql://user@localhost:5432/finboard".to_string());
        assert_eq!(url, "postgresql://user@localhost:5432/finboard?sslmode=require");
    }

    #[test]
    fn test_appends_sslmode_with_existing_query() {
        let url = with_required_ssl(
            "postgresql://user@localhost:5432/finboard?connect_timeout=10".to_string(),
        );
        assert_eq!(
            url,
            "postgresql://user@localhost:5432/finboard?connect_timeout=10&sslmode=require"
        );
    }

    #[test]
    fn test_keeps_explicit_sslmode() {
        let url = with_required_ssl(
            "postgresql://user@localhost:5432/finboard?sslmode=verify-full".to_string(),
        );
        assert_eq!(
            url,
            "postgresql://user@localhost:5432/finboard?sslmode=verify-full"
        );
    }
}
