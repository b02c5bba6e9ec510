use entity::EmployeeRecord;
use platform_session::Session;
use serde::Serialize;
use tracing::{info, warn};

use crate::{HrBackend, HrResult, search};

/// Placeholder shown for employees without any usable name field.
pub const UNKNOWN_NAME: &str = "Unknown";

/// An employee as offered in the autocomplete dropdown.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
}

impl Candidate {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        let name = if name.trim().is_empty() {
            UNKNOWN_NAME.to_string()
        } else {
            name
        };
        Self {
            id: id.into(),
            name,
        }
    }

    pub fn from_record(record: &EmployeeRecord) -> Self {
        Self::new(record.identifier(), display_name(record))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}

/// `fullName`, else `firstName lastName`, else `empName`, else [`UNKNOWN_NAME`].
pub fn display_name(record: &EmployeeRecord) -> String {
    if let Some(full) = non_blank(record.full_name.as_deref()) {
        return full.to_string();
    }

    let parts: Vec<&str> = [record.first_name.as_deref(), record.last_name.as_deref()]
        .into_iter()
        .filter_map(non_blank)
        .map(str::trim)
        .collect();
    if !parts.is_empty() {
        return parts.join(" ");
    }

    non_blank(record.emp_name.as_deref())
        .unwrap_or(UNKNOWN_NAME)
        .to_string()
}

/// The subadmin's employee list, cached for search and lookups.
#[derive(Clone, Debug, Default)]
pub struct Directory {
    records: Vec<EmployeeRecord>,
    candidates: Vec<Candidate>,
}

impl Directory {
    pub fn new(records: Vec<EmployeeRecord>) -> Self {
        let candidates = records.iter().map(Candidate::from_record).collect();
        Self {
            records,
            candidates,
        }
    }

    /// Fetches the employee list for the session's tenant.
    ///
    /// A failing backend leaves the directory empty; only a session without a
    /// subadmin id is an error.
    pub async fn load<B: HrBackend>(backend: &B, session: &Session) -> HrResult<Self> {
        let subadmin_id = session.subadmin_id()?;
        match backend.employees(subadmin_id).await {
            Ok(records) => {
                info!(count = records.len(), "employee directory loaded");
                Ok(Self::new(records))
            }
            Err(err) => {
                warn!(error = %err, "employee list unavailable; directory left empty");
                Ok(Self::default())
            }
        }
    }

    pub fn records(&self) -> &[EmployeeRecord] {
        &self.records
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn suggest(&self, query: &str) -> Vec<&Candidate> {
        search::suggest(query, &self.candidates)
    }

    pub fn find(&self, id: &str) -> Option<&Candidate> {
        self.candidates.iter().find(|candidate| candidate.id == id)
    }
}
