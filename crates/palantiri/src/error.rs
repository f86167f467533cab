//! Pool error taxonomy.
//!
//! Construction is the only fallible operation. Releasing a foreign or
//! already-available palantir is deliberately not an error: misuse
//! degrades silently and surfaces only through tracing.

#[derive(Debug, Clone, thiserror::Error)]
pub enum PoolError {
    #[error("invalid pool configuration: {reason}")]
    InvalidConfiguration { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_configuration_display_carries_reason() {
        let err = PoolError::InvalidConfiguration {
            reason: "at least one palantir is required".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid pool configuration: at least one palantir is required"
        );
    }
}
