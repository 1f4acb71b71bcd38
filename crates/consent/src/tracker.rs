//! Authorization decision.

use crate::{AuthorizationStatus, Authorizer};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Answers whether the user allows tracking.
///
/// The tracker reads the current status from its [`Authorizer`] and only
/// asks the platform to prompt when the status is
/// [`AuthorizationStatus::NotDetermined`]. Each call issues at most one
/// permission request and never retries or times out.
#[derive(Debug)]
pub struct DataTracker<A> {
    authorizer: A,
}

impl<A: Authorizer> DataTracker<A> {
    pub fn new(authorizer: A) -> Self {
        Self { authorizer }
    }

    pub fn authorizer(&self) -> &A {
        &self.authorizer
    }

    /// Resolve whether the user authorized tracking.
    pub async fn is_user_authorized(&self) -> bool {
        let status = self.authorizer.status();
        debug!(%status, "read tracking authorization status");

        match status {
            AuthorizationStatus::Authorized => true,
            AuthorizationStatus::Denied | AuthorizationStatus::Restricted => false,
            AuthorizationStatus::NotDetermined => {
                info!("requesting tracking authorization");
                let response = self.authorizer.request_authorization().await;
                debug!(%response, "tracking authorization request resolved");
                response.is_authorized()
            }
        }
    }
}

impl<A: Authorizer + 'static> DataTracker<A> {
    /// Run [`is_user_authorized`](Self::is_user_authorized) on the tokio
    /// runtime and hand the outcome to `on_complete`.
    ///
    /// `on_complete` is called exactly once, from whichever worker thread
    /// finishes the task. Must be called from within a tokio runtime.
    pub fn spawn_is_user_authorized<F>(self: Arc<Self>, on_complete: F) -> JoinHandle<()>
    where
        F: FnOnce(bool) + Send + 'static,
    {
        tokio::spawn(async move {
            let authorized = self.is_user_authorized().await;
            on_complete(authorized);
        })
    }
}
