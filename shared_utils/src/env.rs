use thiserror::Error;

/// An environment variable required by the application is not set.
#[derive(Debug, Error)]
#[error("Missing environment variable: {0}")]
pub struct MissingEnvVarError(pub String);

/// Reads an environment variable, returning a structured error if it's missing.
///
/// Thin wrapper around `std::env::var` that produces a specific error type
/// so callers can report exactly which variable is absent.
pub fn get_env_var(name: &str) -> Result<String, MissingEnvVarError> {
    std::env::var(name).map_err(|_| MissingEnvVarError(name.to_string()))
}

/// Reads an environment variable, falling back to `default` when unset or empty.
///
/// Used for optional overrides like `DB_PATH` where a baked-in default is fine.
pub fn env_or(name: &str, default: &str) -> String {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_var_reports_name() {
        let err = get_env_var("SHARED_UTILS_DOES_NOT_EXIST").unwrap_err();
        assert!(err.to_string().contains("SHARED_UTILS_DOES_NOT_EXIST"));
    }

    #[test]
    fn env_or_falls_back_when_unset() {
        assert_eq!(env_or("SHARED_UTILS_DOES_NOT_EXIST", "dflt"), "dflt");
    }
}
