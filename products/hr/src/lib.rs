//! HR module: the logic behind the dashboard, leave approval, employee search
//! and live tracking screens, independent of how results are displayed.

pub mod backend;
pub mod dashboard;
pub mod directory;
mod error;
pub mod leave;
pub mod letterhead;
pub mod search;
pub mod tracking;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::HrBackend;
pub use directory::{Candidate, Directory, UNKNOWN_NAME};
pub use error::{HrError, HrResult};
pub use search::{MAX_SUGGESTIONS, MatchRank, suggest};
