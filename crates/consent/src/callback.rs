//! Bridge from callback-based platform APIs to [`Authorizer`].

use crate::{AuthorizationStatus, Authorizer};
use std::fmt;
use std::future::Future;
use tokio::sync::oneshot;
use tracing::{debug, warn};

/// One-shot handle a platform uses to report the result of a permission
/// prompt.
///
/// `complete` consumes the handle, so a request resolves at most once. The
/// handle is `Send` and may be completed from any thread.
pub struct Completion {
    tx: oneshot::Sender<AuthorizationStatus>,
}

impl Completion {
    pub(crate) fn channel() -> (Self, oneshot::Receiver<AuthorizationStatus>) {
        let (tx, rx) = oneshot::channel();
        (Self { tx }, rx)
    }

    /// Report the status the prompt resolved with.
    pub fn complete(self, status: AuthorizationStatus) {
        if self.tx.send(status).is_err() {
            debug!(%status, "authorization requester gone before completion");
        }
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}

/// Wait for a [`Completion`] to resolve.
///
/// A completion dropped without a status means the prompt never answered;
/// that resolves to [`AuthorizationStatus::NotDetermined`].
pub(crate) async fn resolve(rx: oneshot::Receiver<AuthorizationStatus>) -> AuthorizationStatus {
    rx.await.unwrap_or_else(|_| {
        warn!("authorization completion dropped without a status");
        AuthorizationStatus::NotDetermined
    })
}

/// Authorizer over a callback-style platform API.
///
/// `status` reads the platform status; `request` starts the platform
/// prompt and must eventually call [`Completion::complete`] (or drop the
/// completion).
pub struct CallbackAuthorizer<S, R> {
    status: S,
    request: R,
}

impl<S, R> CallbackAuthorizer<S, R>
where
    S: Fn() -> AuthorizationStatus + Send + Sync,
    R: Fn(Completion) + Send + Sync,
{
    pub fn new(status: S, request: R) -> Self {
        Self { status, request }
    }
}

impl<S, R> Authorizer for CallbackAuthorizer<S, R>
where
    S: Fn() -> AuthorizationStatus + Send + Sync,
    R: Fn(Completion) + Send + Sync,
{
    fn status(&self) -> AuthorizationStatus {
        (self.status)()
    }

    fn request_authorization(&self) -> impl Future<Output = AuthorizationStatus> + Send {
        let (completion, rx) = Completion::channel();
        (self.request)(completion);
        resolve(rx)
    }
}

impl<S, R> fmt::Debug for CallbackAuthorizer<S, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackAuthorizer").finish_non_exhaustive()
    }
}
