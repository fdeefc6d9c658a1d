//! Listener configuration.
//!
//! The bridge takes exactly one configuration input: the port to listen
//! on. It arrives as an untyped string (flag, env var, host preference)
//! and must be a positive integer; anything else is fatal before the
//! listener binds.

use thiserror::Error;

/// Validated listener configuration.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Port the HTTP listener binds.
    pub port: u16,
}

impl BridgeConfig {
    /// Build a config from a raw port string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the port is not a positive integer in
    /// the valid TCP range.
    pub fn from_port_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            port: parse_port(raw)?,
        })
    }
}

/// Fatal configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The port value is not a positive integer in `1..=65535`.
    #[error("Invalid port '{0}': expected a positive integer between 1 and 65535")]
    InvalidPort(String),
}

/// Parse and validate a port number from its raw string form.
///
/// Leading/trailing whitespace is tolerated; zero, negatives, fractions
/// and out-of-range values are not.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidPort`] carrying the raw input.
pub fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    let trimmed = raw.trim();
    match trimmed.parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(ConfigError::InvalidPort(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_ports() {
        assert_eq!(parse_port("3000"), Ok(3000));
        assert_eq!(parse_port("65535"), Ok(65535));
        assert_eq!(parse_port("  8080 "), Ok(8080));
    }

    #[test]
    fn rejects_zero() {
        assert_eq!(
            parse_port("0"),
            Err(ConfigError::InvalidPort("0".to_string()))
        );
    }

    #[test]
    fn rejects_non_numeric() {
        assert!(parse_port("eighty").is_err());
        assert!(parse_port("").is_err());
        assert!(parse_port("80.5").is_err());
        assert!(parse_port("-1").is_err());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(parse_port("65536").is_err());
        assert!(parse_port("123456").is_err());
    }

    #[test]
    fn config_carries_the_parsed_port() {
        let config = BridgeConfig::from_port_str("9123").unwrap();
        assert_eq!(config.port, 9123);
    }
}
