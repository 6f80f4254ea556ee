//! Participant and exclusion sources.
//!
//! Everything here validates input before it reaches the matcher: names
//! are trimmed, non-empty and unique; exclusion rules reference known
//! participants and never pair someone with themselves.

mod csv_import;
mod exclusions;
mod participants;

pub use csv_import::{parse_participants_csv, parse_participants_str, CsvImport};
pub use exclusions::ExclusionSet;
pub use participants::{Participant, Roster};
