//! Participant roster.

use crate::error::{Result, SantaError};

/// A gift-exchange participant.
///
/// The name is the identity. The optional email authorizes the participant
/// to view their assignment after a third-party login.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Participant {
    pub name: String,
    pub email: Option<String>,
}

impl Participant {
    /// Creates a participant with a trimmed name and no email.
    pub fn new(name: impl AsRef<str>) -> Result<Self> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(SantaError::EmptyName);
        }
        Ok(Self {
            name: name.to_string(),
            email: None,
        })
    }

    /// Creates a participant with an email, lower-cased.
    pub fn with_email(name: impl AsRef<str>, email: impl AsRef<str>) -> Result<Self> {
        let mut participant = Self::new(name)?;
        participant.email = Some(normalize_email(email.as_ref())?);
        Ok(participant)
    }
}

/// Trims and lower-cases an email; it must contain `@`.
pub(crate) fn normalize_email(email: &str) -> Result<String> {
    let email = email.trim();
    if !email.contains('@') {
        return Err(SantaError::InvalidEmail(email.to_string()));
    }
    Ok(email.to_lowercase())
}

/// Ordered list of uniquely named participants.
///
/// # Examples
///
/// ```
/// use u_santa::roster::Roster;
///
/// let mut roster = Roster::new();
/// roster.add("  Ann ").unwrap();
/// roster.add("Bob").unwrap();
/// assert!(roster.add("Ann").is_err());
/// assert_eq!(roster.names(), vec!["Ann", "Bob"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a participant by name.
    pub fn add(&mut self, name: impl AsRef<str>) -> Result<&Participant> {
        self.push(Participant::new(name)?)
    }

    /// Adds a participant with an authorized email.
    pub fn add_with_email(
        &mut self,
        name: impl AsRef<str>,
        email: impl AsRef<str>,
    ) -> Result<&Participant> {
        self.push(Participant::with_email(name, email)?)
    }

    fn push(&mut self, participant: Participant) -> Result<&Participant> {
        if self.contains(&participant.name) {
            return Err(SantaError::DuplicateParticipant(participant.name));
        }
        self.participants.push(participant);
        Ok(&self.participants[self.participants.len() - 1])
    }

    /// Removes a participant by exact name.
    pub fn remove(&mut self, name: &str) -> Result<Participant> {
        let idx = self
            .participants
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| SantaError::UnknownParticipant(name.to_string()))?;
        Ok(self.participants.remove(idx))
    }

    /// Replaces the whole roster.
    ///
    /// Every entry is re-validated; on error the roster is left unchanged.
    pub fn replace_all(&mut self, participants: Vec<Participant>) -> Result<()> {
        let mut next = Roster::new();
        for p in participants {
            let participant = match p.email {
                Some(email) => Participant::with_email(&p.name, email)?,
                None => Participant::new(&p.name)?,
            };
            next.push(participant)?;
        }
        *self = next;
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.participants.iter().any(|p| p.name == name)
    }

    /// Finds the participant registered under `email`, ignoring case.
    pub fn find_by_email(&self, email: &str) -> Option<&Participant> {
        let email = email.trim();
        self.participants.iter().find(|p| {
            p.email
                .as_deref()
                .is_some_and(|e| e.eq_ignore_ascii_case(email))
        })
    }

    pub fn names(&self) -> Vec<&str> {
        self.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}
