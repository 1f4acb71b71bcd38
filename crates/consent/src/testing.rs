//! Test double for [`Authorizer`].
//!
//! [`SpyAuthorizer`] records every call and leaves permission requests
//! pending until the test resolves them, so tests control exactly when the
//! "platform" answers.
//!
//! # Example
//!
//! ```
//! use consent::testing::SpyAuthorizer;
//! use consent::{AuthorizationStatus, DataTracker};
//!
//! # async fn example() {
//! let spy = SpyAuthorizer::new(AuthorizationStatus::NotDetermined);
//! let tracker = DataTracker::new(&spy);
//!
//! let (authorized, ()) = tokio::join!(tracker.is_user_authorized(), async {
//!     spy.wait_for_requests(1).await;
//!     spy.complete_next(AuthorizationStatus::Authorized);
//! });
//!
//! assert!(authorized);
//! assert_eq!(spy.request_count(), 1);
//! # }
//! ```

use crate::callback::{self, Completion};
use crate::{AuthorizationStatus, Authorizer};
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

/// Authorizer that records calls and holds requests open.
#[derive(Debug)]
pub struct SpyAuthorizer {
    status: Mutex<AuthorizationStatus>,
    status_reads: AtomicUsize,
    completions: Mutex<Vec<Option<Completion>>>,
    requests: watch::Sender<usize>,
}

impl SpyAuthorizer {
    pub fn new(status: AuthorizationStatus) -> Self {
        let (requests, _) = watch::channel(0);
        Self {
            status: Mutex::new(status),
            status_reads: AtomicUsize::new(0),
            completions: Mutex::new(Vec::new()),
            requests,
        }
    }

    pub fn set_status(&self, status: AuthorizationStatus) {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner) = status;
    }

    /// Number of `request_authorization` calls so far.
    pub fn request_count(&self) -> usize {
        self.completions().len()
    }

    /// Number of `status` reads so far.
    pub fn status_reads(&self) -> usize {
        self.status_reads.load(Ordering::SeqCst)
    }

    /// Wait until at least `count` requests have been made.
    pub async fn wait_for_requests(&self, count: usize) {
        let mut rx = self.requests.subscribe();
        // The sender lives in `self`, so the channel cannot close here.
        let _ = rx.wait_for(|made| *made >= count).await;
    }

    /// Resolve the request at `index` (in call order) with `status`.
    ///
    /// # Panics
    ///
    /// Panics if no such request exists or it was already resolved.
    pub fn complete(&self, index: usize, status: AuthorizationStatus) {
        let completion = self
            .completions()
            .get_mut(index)
            .and_then(Option::take)
            .unwrap_or_else(|| panic!("no pending authorization request at index {index}"));
        completion.complete(status);
    }

    /// Resolve the oldest unresolved request with `status`.
    ///
    /// # Panics
    ///
    /// Panics if every request has already been resolved.
    pub fn complete_next(&self, status: AuthorizationStatus) {
        let completion = self
            .completions()
            .iter_mut()
            .find_map(Option::take)
            .unwrap_or_else(|| panic!("no pending authorization request"));
        completion.complete(status);
    }

    /// Drop every unresolved request without answering it.
    pub fn drop_pending(&self) {
        for slot in self.completions().iter_mut() {
            slot.take();
        }
    }

    fn completions(&self) -> MutexGuard<'_, Vec<Option<Completion>>> {
        self.completions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Authorizer for SpyAuthorizer {
    fn status(&self) -> AuthorizationStatus {
        self.status_reads.fetch_add(1, Ordering::SeqCst);
        *self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn request_authorization(&self) -> impl Future<Output = AuthorizationStatus> + Send {
        let (completion, rx) = Completion::channel();
        self.completions().push(Some(completion));
        self.requests.send_modify(|made| *made += 1);
        callback::resolve(rx)
    }
}
