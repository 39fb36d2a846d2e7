//! Logging bootstrap.
//!
//! # Environment Variables
//! - `LOG_FORMAT`: `json` (default) or `pretty`
//! - `RUST_LOG`: level filter (default: `info`)

use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("pretty") => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }
}

/// Installs the global subscriber. Call once, at program start.
pub fn init_logging() {
    let log_format = std::env::var("LOG_FORMAT").ok();
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match LogFormat::from_env_value(log_format.as_deref()) {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .pretty()
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .json()
            .init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_format_selection() {
        assert_eq!(LogFormat::from_env_value(None), LogFormat::Json);
        assert_eq!(LogFormat::from_env_value(Some("json")), LogFormat::Json);
        assert_eq!(LogFormat::from_env_value(Some("PRETTY")), LogFormat::Pretty);
        assert_eq!(LogFormat::from_env_value(Some("yaml")), LogFormat::Json);
    }

    #[test]
    #[serial]
    fn test_log_format_env_var_default() {
        std::env::remove_var("LOG_FORMAT");
        let format = std::env::var("LOG_FORMAT").ok();
        assert_eq!(LogFormat::from_env_value(format.as_deref()), LogFormat::Json);
    }
}
