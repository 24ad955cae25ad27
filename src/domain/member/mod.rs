//! Member domain module.
//!
//! Member profiles, roles, directory search and CSV export.

mod errors;
mod export;
mod profile;

pub use errors::MemberError;
pub use export::{members_to_csv, CSV_HEADER};
pub use profile::{MemberProfile, MemberRole};
