//! Terminal-backed authorizer.

use consent::{AuthorizationStatus, Authorizer};
use std::future::Future;
use std::io::{self, BufRead, Write};
use std::sync::{Mutex, PoisonError};
use tracing::warn;

const QUESTION: &str = "Allow this app to track your activity? [y]es / [n]o / [r]estricted: ";

/// Authorizer that asks the user on the terminal.
///
/// The question goes to stderr so stdout stays clean for the result.
#[derive(Debug)]
pub struct TerminalAuthorizer {
    status: Mutex<AuthorizationStatus>,
}

impl TerminalAuthorizer {
    pub fn new(status: AuthorizationStatus) -> Self {
        Self {
            status: Mutex::new(status),
        }
    }
}

impl Authorizer for TerminalAuthorizer {
    fn status(&self) -> AuthorizationStatus {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn request_authorization(&self) -> impl Future<Output = AuthorizationStatus> + Send {
        async move {
            let answer = match tokio::task::spawn_blocking(read_answer).await {
                Ok(Ok(answer)) => answer,
                Ok(Err(e)) => {
                    warn!(error = %e, "failed to read prompt answer");
                    AuthorizationStatus::NotDetermined
                }
                Err(e) => {
                    warn!(error = %e, "prompt task failed");
                    AuthorizationStatus::NotDetermined
                }
            };

            if !answer.is_undetermined() {
                *self.status.lock().unwrap_or_else(PoisonError::into_inner) = answer;
            }
            answer
        }
    }
}

fn read_answer() -> io::Result<AuthorizationStatus> {
    let mut stderr = io::stderr();
    write!(stderr, "{QUESTION}")?;
    stderr.flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        // EOF: prompt dismissed
        return Ok(AuthorizationStatus::NotDetermined);
    }
    Ok(parse_answer(&line))
}

/// Map a typed answer to a status. Anything unrecognized counts as a refusal.
pub fn parse_answer(input: &str) -> AuthorizationStatus {
    match input.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => AuthorizationStatus::Authorized,
        "r" | "restricted" => AuthorizationStatus::Restricted,
        _ => AuthorizationStatus::Denied,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use consent::DataTracker;

    #[test]
    fn test_parse_answer() {
        assert_eq!(parse_answer("y\n"), AuthorizationStatus::Authorized);
        assert_eq!(parse_answer("  YES "), AuthorizationStatus::Authorized);
        assert_eq!(parse_answer("n"), AuthorizationStatus::Denied);
        assert_eq!(parse_answer("no"), AuthorizationStatus::Denied);
        assert_eq!(parse_answer("r"), AuthorizationStatus::Restricted);
        assert_eq!(parse_answer("sure, why not"), AuthorizationStatus::Denied);
        assert_eq!(parse_answer(""), AuthorizationStatus::Denied);
    }

    #[tokio::test]
    async fn test_decided_status_never_prompts() {
        // Reading stdin would block the test; a decided status must not get there.
        let tracker = DataTracker::new(TerminalAuthorizer::new(AuthorizationStatus::Authorized));
        assert!(tracker.is_user_authorized().await);

        let tracker = DataTracker::new(TerminalAuthorizer::new(AuthorizationStatus::Restricted));
        assert!(!tracker.is_user_authorized().await);
    }
}
