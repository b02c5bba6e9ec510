//! Leave approval desk.

use std::{fmt, str::FromStr};

use entity::{LeaveRecord, LeaveStatus, leaves::UnknownLeaveStatus};
use platform_session::Session;
use serde::Serialize;
use tracing::info;

use crate::{HrBackend, HrError, HrResult};

/// Which records the table shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(LeaveStatus),
}

impl StatusFilter {
    pub fn matches(self, status: LeaveStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownLeaveStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse().map(StatusFilter::Only)
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => fmt::Display::fmt(status, f),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LeaveSummary {
    pub total: usize,
    pub approved: usize,
    pub rejected: usize,
    pub pending: usize,
}

/// Leave requests of one tenant. Local state only changes after the backend
/// has accepted the change.
#[derive(Clone, Debug, Default)]
pub struct LeaveDesk {
    subadmin_id: String,
    records: Vec<LeaveRecord>,
}

impl LeaveDesk {
    pub fn new(subadmin_id: impl Into<String>, records: Vec<LeaveRecord>) -> Self {
        Self {
            subadmin_id: subadmin_id.into(),
            records,
        }
    }

    pub async fn load<B: HrBackend>(backend: &B, session: &Session) -> HrResult<Self> {
        let subadmin_id = session.subadmin_id()?;
        let records = backend.leaves(subadmin_id).await?;
        info!(count = records.len(), "leave requests loaded");
        Ok(Self::new(subadmin_id, records))
    }

    pub fn records(&self) -> &[LeaveRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&LeaveRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn summary(&self) -> LeaveSummary {
        let mut summary = LeaveSummary {
            total: self.records.len(),
            ..LeaveSummary::default()
        };
        for record in &self.records {
            match record.status {
                LeaveStatus::Approved => summary.approved += 1,
                LeaveStatus::Rejected => summary.rejected += 1,
                LeaveStatus::Pending => summary.pending += 1,
            }
        }
        summary
    }

    /// Records passing `filter` whose employee name contains `employee_query`
    /// (case-insensitive; blank matches everyone).
    pub fn view(&self, filter: StatusFilter, employee_query: &str) -> Vec<&LeaveRecord> {
        let needle = employee_query.trim().to_lowercase();
        self.records
            .iter()
            .filter(|record| filter.matches(record.status))
            .filter(|record| {
                needle.is_empty() || record.employee_name().to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub async fn approve<B: HrBackend>(&mut self, backend: &B, id: &str) -> HrResult<&LeaveRecord> {
        self.decide(backend, id, LeaveStatus::Approved).await
    }

    pub async fn reject<B: HrBackend>(&mut self, backend: &B, id: &str) -> HrResult<&LeaveRecord> {
        self.decide(backend, id, LeaveStatus::Rejected).await
    }

    pub async fn delete<B: HrBackend>(&mut self, backend: &B, id: &str) -> HrResult<LeaveRecord> {
        let index = self.position(id)?;
        backend.delete_leave(&self.subadmin_id, id).await?;
        info!(leave_id = id, "leave request deleted");
        Ok(self.records.remove(index))
    }

    async fn decide<B: HrBackend>(
        &mut self,
        backend: &B,
        id: &str,
        status: LeaveStatus,
    ) -> HrResult<&LeaveRecord> {
        let index = self.position(id)?;
        backend
            .update_leave_status(&self.subadmin_id, id, status)
            .await?;
        let record = &mut self.records[index];
        record.set_status(status);
        info!(leave_id = id, %status, "leave request decided");
        Ok(&*record)
    }

    fn position(&self, id: &str) -> HrResult<usize> {
        self.records
            .iter()
            .position(|record| record.id == id)
            .ok_or_else(|| HrError::LeaveNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeBackend, session};

    fn leave(id: &str, name: &str) -> LeaveRecord {
        LeaveRecord {
            id: id.to_string(),
            employee_name: Some(name.to_string()),
            start_date: Some("2025-05-20".into()),
            end_date: Some("2025-05-25".into()),
            reason: Some("Vacation".into()),
            ..LeaveRecord::default()
        }
    }

    fn desk() -> LeaveDesk {
        LeaveDesk::new(
            "7",
            vec![
                leave("1", "John Doe"),
                leave("2", "Jane Smith"),
                leave("3", "John Cena"),
            ],
        )
    }

    #[tokio::test]
    async fn approve_and_reject_update_status_and_flag() {
        let backend = FakeBackend::default();
        let mut desk = desk();

        let approved = desk.approve(&backend, "1").await.unwrap();
        assert_eq!(approved.status, LeaveStatus::Approved);
        assert_eq!(approved.is_approved, Some(true));

        let rejected = desk.reject(&backend, "3").await.unwrap();
        assert_eq!(rejected.status, LeaveStatus::Rejected);
        assert_eq!(rejected.is_approved, Some(false));

        assert_eq!(
            desk.summary(),
            LeaveSummary {
                total: 3,
                approved: 1,
                rejected: 1,
                pending: 1
            }
        );
        assert_eq!(
            backend.calls(),
            ["leave_status:7/1/Approved", "leave_status:7/3/Rejected"]
        );
    }

    #[tokio::test]
    async fn delete_removes_record() {
        let backend = FakeBackend::default();
        let mut desk = desk();
        let removed = desk.delete(&backend, "2").await.unwrap();
        assert_eq!(removed.employee_name(), "Jane Smith");
        assert_eq!(desk.summary().total, 2);
        assert!(desk.get("2").is_none());
    }

    #[tokio::test]
    async fn failed_update_leaves_state_untouched() {
        let backend = FakeBackend::failing(&["leave_status", "leave_delete"]);
        let mut desk = desk();

        let err = desk.approve(&backend, "1").await.unwrap_err();
        assert_eq!(err.user_message(), "leave_status unavailable");
        assert_eq!(desk.get("1").unwrap().status, LeaveStatus::Pending);

        assert!(desk.delete(&backend, "1").await.is_err());
        assert_eq!(desk.records().len(), 3);
    }

    #[tokio::test]
    async fn unknown_id_never_reaches_backend() {
        let backend = FakeBackend::default();
        let mut desk = desk();
        let err = desk.reject(&backend, "99").await.unwrap_err();
        assert!(matches!(err, HrError::LeaveNotFound(ref id) if id == "99"));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn view_filters_by_status_and_name() {
        let backend = FakeBackend::default();
        let mut desk = desk();
        desk.approve(&backend, "3").await.unwrap();

        let johns: Vec<&str> = desk
            .view(StatusFilter::All, "john")
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(johns, ["1", "3"]);

        let pending: Vec<&str> = desk
            .view("pending".parse().unwrap(), "")
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(pending, ["1", "2"]);

        let approved_janes = desk.view(StatusFilter::Only(LeaveStatus::Approved), "JANE");
        assert!(approved_janes.is_empty());
    }

    #[tokio::test]
    async fn load_reads_tenant_leaves() {
        let backend = FakeBackend {
            leaves: vec![leave("L1", "Ann Lee")],
            ..FakeBackend::default()
        };
        let desk = LeaveDesk::load(&backend, &session("7")).await.unwrap();
        assert_eq!(desk.records().len(), 1);
        assert_eq!(backend.calls(), ["leaves:7"]);
    }

    #[test]
    fn filter_parsing() {
        assert_eq!("All".parse::<StatusFilter>(), Ok(StatusFilter::All));
        assert_eq!(
            "rejected".parse::<StatusFilter>(),
            Ok(StatusFilter::Only(LeaveStatus::Rejected))
        );
        assert!("archived".parse::<StatusFilter>().is_err());
        assert_eq!(StatusFilter::Only(LeaveStatus::Pending).to_string(), "Pending");
    }
}
