//! Authorizer trait.

use crate::AuthorizationStatus;
use std::future::Future;
use std::sync::Arc;

/// Trait for platform permission capabilities.
///
/// Implementations own the actual platform interaction: reading the
/// current tracking status and showing the permission prompt. This is the
/// boundary between the decision logic and the platform.
pub trait Authorizer: Send + Sync {
    /// Current authorization status held by the platform.
    fn status(&self) -> AuthorizationStatus;

    /// Request authorization from the user.
    ///
    /// Shows the platform prompt if applicable and resolves exactly once
    /// with the resulting status.
    fn request_authorization(&self) -> impl Future<Output = AuthorizationStatus> + Send;
}

impl<T: Authorizer + ?Sized> Authorizer for &T {
    fn status(&self) -> AuthorizationStatus {
        (**self).status()
    }

    fn request_authorization(&self) -> impl Future<Output = AuthorizationStatus> + Send {
        (**self).request_authorization()
    }
}

impl<T: Authorizer + ?Sized> Authorizer for Arc<T> {
    fn status(&self) -> AuthorizationStatus {
        (**self).status()
    }

    fn request_authorization(&self) -> impl Future<Output = AuthorizationStatus> + Send {
        (**self).request_authorization()
    }
}
