//! Operations module provides the CLI workflows built on the LinkedIn client

use crate::client::{LinkedInClientError, Result};
use log::info;

pub mod auth;
pub mod engage;
pub mod manage;
pub mod posts;
pub mod publish;
pub mod whoami;

/// Log a successful operation's message, or turn a failed one into an error
/// so the process exits non-zero.
pub(crate) fn finish(success: bool, message: String) -> Result<()> {
    if success {
        info!("{}", message);
        Ok(())
    } else {
        Err(LinkedInClientError::OperationFailed(message))
    }
}
