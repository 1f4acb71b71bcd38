//! Tracking-consent authorization gate.
//!
//! Core principle: **Only an undetermined status ever triggers a prompt.**
//!
//! # Overview
//!
//! - **AuthorizationStatus**: the four states a platform reports for
//!   tracking consent.
//! - **Authorizer**: the capability seam over the platform API (status read
//!   plus an asynchronous permission request).
//! - **DataTracker**: maps the current status to a yes/no answer, asking the
//!   platform at most once per call.
//!
//! # Example
//!
//! ```
//! use consent::{AuthorizationStatus, DataTracker, FixedAuthorizer};
//!
//! # async fn example() {
//! let authorizer = FixedAuthorizer::new(AuthorizationStatus::NotDetermined)
//!     .with_response(AuthorizationStatus::Authorized);
//! let tracker = DataTracker::new(authorizer);
//!
//! assert!(tracker.is_user_authorized().await);
//! # }
//! ```

mod authorizer;
mod callback;
mod error;
mod fixed;
mod status;
pub mod testing;
mod tracker;

pub use authorizer::Authorizer;
pub use callback::{CallbackAuthorizer, Completion};
pub use error::{Error, Result};
pub use fixed::FixedAuthorizer;
pub use status::AuthorizationStatus;
pub use tracker::DataTracker;
