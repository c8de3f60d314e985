use anyhow::{Context, Result};
use platform_db::DatabaseSettings;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    pub cors_allowed_origins: Vec<String>,
    pub graphiql: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let database = DatabaseSettings::from_env().context("invalid database settings")?;

        let cors_allowed_origins = parse_origins(
            &std::env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let graphiql = std::env::var("GRAPHIQL")
            .ok()
            .map(|val| env_flag(&val))
            .unwrap_or(true);

        Ok(Self {
            database,
            cors_allowed_origins,
            graphiql,
        })
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            database: DatabaseSettings::default(),
            cors_allowed_origins: Vec::new(),
            graphiql: false,
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}

fn env_flag(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "1" | "true" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_skip_blanks() {
        assert_eq!(
            parse_origins(" http://a.test, ,http://b.test,"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }

    #[test]
    fn flags_accept_common_spellings() {
        assert!(env_flag("TRUE"));
        assert!(env_flag("1"));
        assert!(!env_flag("off"));
    }
}
