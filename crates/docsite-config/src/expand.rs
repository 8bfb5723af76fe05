//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in a configuration value.
///
/// `field` names the configuration key for error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env(value)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.var_name),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_literal_unchanged() {
        assert_eq!(expand_env("NodeKit", "site.title").unwrap(), "NodeKit");
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("DOCSITE_EXPAND_UNSET");
        }

        let value = expand_env("${DOCSITE_EXPAND_UNSET:-Docs}", "site.title").unwrap();

        assert_eq!(value, "Docs");
    }

    #[test]
    fn test_expand_set_variable() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("DOCSITE_EXPAND_SET", "https://github.com/acme");
        }

        let value = expand_env("${DOCSITE_EXPAND_SET}/docs", "social.github").unwrap();

        assert_eq!(value, "https://github.com/acme/docs");

        unsafe {
            std::env::remove_var("DOCSITE_EXPAND_SET");
        }
    }

    #[test]
    fn test_expand_missing_variable_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("DOCSITE_EXPAND_MISSING");
        }

        let err = expand_env("${DOCSITE_EXPAND_MISSING}", "site.logo.light").unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let msg = err.to_string();
        assert!(msg.contains("DOCSITE_EXPAND_MISSING"));
        assert!(msg.contains("site.logo.light"));
    }
}
