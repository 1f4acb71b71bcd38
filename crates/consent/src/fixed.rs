//! Scripted authorizer.

use crate::{AuthorizationStatus, Authorizer};
use std::future::{self, Future};
use std::sync::{Mutex, PoisonError};

/// Authorizer with a fixed status and a scripted prompt answer.
///
/// Mirrors platform behavior: once a prompt has been answered, the answer
/// becomes the current status, so later checks no longer prompt.
#[derive(Debug)]
pub struct FixedAuthorizer {
    status: Mutex<AuthorizationStatus>,
    response: AuthorizationStatus,
}

impl FixedAuthorizer {
    /// Create an authorizer reporting `status`. The prompt answers
    /// [`AuthorizationStatus::Denied`] unless overridden.
    pub fn new(status: AuthorizationStatus) -> Self {
        Self {
            status: Mutex::new(status),
            response: AuthorizationStatus::Denied,
        }
    }

    pub fn with_response(mut self, response: AuthorizationStatus) -> Self {
        self.response = response;
        self
    }

    pub fn response(&self) -> AuthorizationStatus {
        self.response
    }
}

impl Authorizer for FixedAuthorizer {
    fn status(&self) -> AuthorizationStatus {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn request_authorization(&self) -> impl Future<Output = AuthorizationStatus> + Send {
        let mut status = self.status.lock().unwrap_or_else(PoisonError::into_inner);
        if status.is_undetermined() {
            *status = self.response;
        }
        future::ready(self.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DataTracker;

    #[tokio::test]
    async fn test_default_response_is_denied() {
        let authorizer = FixedAuthorizer::new(AuthorizationStatus::NotDetermined);
        assert_eq!(authorizer.response(), AuthorizationStatus::Denied);
        assert!(!DataTracker::new(authorizer).is_user_authorized().await);
    }

    #[tokio::test]
    async fn test_answer_becomes_current_status() {
        let tracker = DataTracker::new(
            FixedAuthorizer::new(AuthorizationStatus::NotDetermined)
                .with_response(AuthorizationStatus::Authorized),
        );

        assert!(tracker.is_user_authorized().await);
        assert_eq!(tracker.authorizer().status(), AuthorizationStatus::Authorized);
    }

    #[tokio::test]
    async fn test_decided_status_is_kept() {
        let authorizer = FixedAuthorizer::new(AuthorizationStatus::Restricted)
            .with_response(AuthorizationStatus::Authorized);

        authorizer.request_authorization().await;
        assert_eq!(authorizer.status(), AuthorizationStatus::Restricted);
    }
}
