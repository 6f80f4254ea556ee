//! Gift-exchange orchestration.
//!
//! [`Exchange`] ties the roster, exclusion rules, matcher, and stores
//! together for an admin front end, and serves viewers their own
//! assignment through [`Identity`] resolution.

mod identity;
mod service;
mod viewer_log;

pub use identity::{resolve, Identity};
pub use service::Exchange;
pub use viewer_log::{ViewerLog, ViewerLogEntry};
