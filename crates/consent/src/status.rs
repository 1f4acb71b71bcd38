//! Tracking authorization status.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tracking authorization status as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationStatus {
    /// The user granted tracking.
    Authorized,
    /// The user refused tracking.
    Denied,
    /// Tracking is blocked by device policy; the user cannot change it.
    Restricted,
    /// The user has not been asked yet.
    NotDetermined,
}

impl AuthorizationStatus {
    pub const ALL: [AuthorizationStatus; 4] = [
        AuthorizationStatus::Authorized,
        AuthorizationStatus::Denied,
        AuthorizationStatus::Restricted,
        AuthorizationStatus::NotDetermined,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthorizationStatus::Authorized => "authorized",
            AuthorizationStatus::Denied => "denied",
            AuthorizationStatus::Restricted => "restricted",
            AuthorizationStatus::NotDetermined => "not_determined",
        }
    }

    pub fn is_authorized(&self) -> bool {
        matches!(self, AuthorizationStatus::Authorized)
    }

    /// Whether the platform would still show a prompt for this status.
    pub fn is_undetermined(&self) -> bool {
        matches!(self, AuthorizationStatus::NotDetermined)
    }
}

impl fmt::Display for AuthorizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthorizationStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| Error::UnknownStatus(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_display_spelling() {
        for status in AuthorizationStatus::ALL {
            assert_eq!(status.to_string().parse::<AuthorizationStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_parse_is_lenient_about_case_and_dashes() {
        assert_eq!(
            "Not-Determined".parse::<AuthorizationStatus>().unwrap(),
            AuthorizationStatus::NotDetermined
        );
        assert_eq!(
            " DENIED ".parse::<AuthorizationStatus>().unwrap(),
            AuthorizationStatus::Denied
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "maybe".parse::<AuthorizationStatus>().unwrap_err();
        assert!(matches!(err, Error::UnknownStatus(ref s) if s == "maybe"));
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&AuthorizationStatus::NotDetermined).unwrap();
        assert_eq!(json, "\"not_determined\"");

        let status: AuthorizationStatus = serde_json::from_str("\"restricted\"").unwrap();
        assert_eq!(status, AuthorizationStatus::Restricted);
    }

    #[test]
    fn test_only_authorized_is_authorized() {
        let authorized: Vec<_> = AuthorizationStatus::ALL
            .into_iter()
            .filter(AuthorizationStatus::is_authorized)
            .collect();
        assert_eq!(authorized, vec![AuthorizationStatus::Authorized]);
    }
}
