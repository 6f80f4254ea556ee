//! Viewer identity resolution.

use crate::error::{Result, SantaError};
use crate::roster::Roster;

/// A verified viewer identity, as established by the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Identity {
    /// A name the viewer typed in.
    Name(String),
    /// An email confirmed by a third-party login.
    Email(String),
}

/// Resolves an identity to a participant name.
///
/// Emails must belong to a roster participant (ignoring case); anything else
/// is [`SantaError::NotAuthorized`].
pub fn resolve(roster: &Roster, identity: &Identity) -> Result<String> {
    match identity {
        Identity::Name(name) => {
            let name = name.trim();
            if name.is_empty() {
                return Err(SantaError::EmptyName);
            }
            Ok(name.to_string())
        }
        Identity::Email(email) => roster
            .find_by_email(email)
            .map(|p| p.name.clone())
            .ok_or_else(|| SantaError::NotAuthorized(email.trim().to_string())),
    }
}
