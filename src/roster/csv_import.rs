//! Participant import from CSV.
//!
//! The first non-blank line is a header. When it names both a name column
//! (`name`, `names`) and an email column (`email`, `emails`, `email id`,
//! `emailid`), each row yields one participant with an email, and rows
//! lacking a name or a plausible email are dropped. Otherwise every
//! non-empty cell that does not look like an email is taken as a name.
//! Header matching ignores case.

use std::collections::HashSet;
use std::io;

use csv::{ReaderBuilder, StringRecord, Trim};

use super::participants::Participant;
use crate::error::{Result, SantaError};
use crate::matcher::MIN_PARTICIPANTS;

const NAME_HEADERS: &[&str] = &["name", "names"];
const EMAIL_HEADERS: &[&str] = &["email", "emails", "email id", "emailid"];

/// Participants read from a CSV file.
#[derive(Debug, Clone)]
pub struct CsvImport {
    /// Unique participants in file order.
    pub participants: Vec<Participant>,
    /// Whether the file carried an email column.
    pub with_emails: bool,
}

/// Parses participant CSV text.
///
/// # Examples
///
/// ```
/// use u_santa::roster::parse_participants_str;
///
/// let import = parse_participants_str("NAMES,Email\nAnn,ann@x.io\nBob,bob@x.io\n").unwrap();
/// assert!(import.with_emails);
/// assert_eq!(import.participants.len(), 2);
/// ```
pub fn parse_participants_str(text: &str) -> Result<CsvImport> {
    parse_participants_csv(text.as_bytes())
}

/// Parses participant CSV from any reader.
pub fn parse_participants_csv<R: io::Read>(reader: R) -> Result<CsvImport> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        if record.iter().any(|cell| !cell.is_empty()) {
            rows.push(record);
        }
    }

    let Some((header, data)) = rows.split_first() else {
        return Err(missing_rows());
    };
    if data.is_empty() {
        return Err(missing_rows());
    }

    let header: Vec<String> = header.iter().map(|h| unquote(h).to_lowercase()).collect();
    let name_col = header.iter().position(|h| NAME_HEADERS.contains(&h.as_str()));
    let email_col = header.iter().position(|h| EMAIL_HEADERS.contains(&h.as_str()));

    let import = match (name_col, email_col) {
        (Some(name_col), Some(email_col)) => CsvImport {
            participants: rows_with_emails(data, name_col, email_col),
            with_emails: true,
        },
        _ => CsvImport {
            participants: names_only(data),
            with_emails: false,
        },
    };

    if import.participants.len() < MIN_PARTICIPANTS {
        return Err(SantaError::InsufficientParticipants {
            required: MIN_PARTICIPANTS,
            actual: import.participants.len(),
        });
    }

    tracing::debug!(
        participants = import.participants.len(),
        with_emails = import.with_emails,
        "parsed participant CSV"
    );
    Ok(import)
}

fn missing_rows() -> SantaError {
    SantaError::InvalidCsv("must have a header row and at least one data row".into())
}

fn rows_with_emails(
    data: &[StringRecord],
    name_col: usize,
    email_col: usize,
) -> Vec<Participant> {
    let mut seen = HashSet::new();
    let mut participants = Vec::new();
    for row in data {
        let name = row.get(name_col).map(unquote).unwrap_or_default();
        let email = row.get(email_col).map(unquote).unwrap_or_default();
        let Ok(participant) = Participant::with_email(name, email) else {
            continue;
        };
        if seen.insert(participant.name.clone()) {
            participants.push(participant);
        }
    }
    participants
}

fn names_only(data: &[StringRecord]) -> Vec<Participant> {
    let mut seen = HashSet::new();
    let mut participants = Vec::new();
    for cell in data.iter().flat_map(|row| row.iter()) {
        let cell = unquote(cell);
        if cell.contains('@') {
            continue;
        }
        let Ok(participant) = Participant::new(cell) else {
            continue;
        };
        if seen.insert(participant.name.clone()) {
            participants.push(participant);
        }
    }
    participants
}

/// Strips one leftover leading and trailing `"` or `'`.
fn unquote(cell: &str) -> &str {
    let cell = cell.trim();
    let cell = cell.strip_prefix(['"', '\'']).unwrap_or(cell);
    cell.strip_suffix(['"', '\'']).unwrap_or(cell).trim()
}
