//! Deployment mode flag.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a deployment mode string is not recognized.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown deployment mode '{0}' (expected 'production' or 'development')")]
pub struct ParseModeError(String);

/// Distinguishes production from development behavior.
///
/// Production tightens the cross-origin policy, hides failure details from
/// clients and trims the health report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentMode {
    #[default]
    Development,
    Production,
}

impl DeploymentMode {
    /// Returns `true` in production mode.
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }

    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for DeploymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeploymentMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "development" | "dev" => Ok(Self::Development),
            _ => Err(ParseModeError(s.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!(
            "production".parse::<DeploymentMode>().unwrap(),
            DeploymentMode::Production
        );
        assert_eq!(
            " PROD ".parse::<DeploymentMode>().unwrap(),
            DeploymentMode::Production
        );
        assert_eq!(
            "dev".parse::<DeploymentMode>().unwrap(),
            DeploymentMode::Development
        );
    }

    #[test]
    fn test_parse_unknown() {
        assert!("staging".parse::<DeploymentMode>().is_err());
    }

    #[test]
    fn test_default_is_development() {
        assert!(!DeploymentMode::default().is_production());
    }
}
