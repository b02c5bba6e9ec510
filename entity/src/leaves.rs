use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};

use crate::lenient;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum LeaveStatus {
    #[default]
    #[serde(alias = "pending", alias = "PENDING")]
    Pending,
    #[serde(alias = "approved", alias = "APPROVED")]
    Approved,
    #[serde(alias = "rejected", alias = "REJECTED")]
    Rejected,
}

impl LeaveStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            LeaveStatus::Pending => "Pending",
            LeaveStatus::Approved => "Approved",
            LeaveStatus::Rejected => "Rejected",
        }
    }

    /// Value of the `isApproved` flag that accompanies this status.
    pub fn approval_flag(self) -> Option<bool> {
        match self {
            LeaveStatus::Pending => None,
            LeaveStatus::Approved => Some(true),
            LeaveStatus::Rejected => Some(false),
        }
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLeaveStatus(pub String);

impl fmt::Display for UnknownLeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown leave status `{}`", self.0)
    }
}

impl std::error::Error for UnknownLeaveStatus {}

impl FromStr for LeaveStatus {
    type Err = UnknownLeaveStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(LeaveStatus::Pending),
            "approved" => Ok(LeaveStatus::Approved),
            "rejected" => Ok(LeaveStatus::Rejected),
            _ => Err(UnknownLeaveStatus(s.to_string())),
        }
    }
}

/// A leave application as listed on the approval screen.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRecord {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub employee_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub reason: Option<String>,
    #[serde(default, deserialize_with = "status_or_pending")]
    pub status: LeaveStatus,
    #[serde(default, deserialize_with = "lenient::opt_bool")]
    pub is_approved: Option<bool>,
}

/// Missing, `null` or unrecognised statuses read as pending.
fn status_or_pending<'de, D>(deserializer: D) -> Result<LeaveStatus, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient::opt_string(deserializer)?
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_default())
}

impl LeaveRecord {
    pub fn employee_name(&self) -> &str {
        self.employee_name.as_deref().unwrap_or_default()
    }

    /// Moves the record to `status`, keeping `isApproved` in step.
    pub fn set_status(&mut self, status: LeaveStatus) {
        self.status = status;
        self.is_approved = status.approval_flag();
    }
}
