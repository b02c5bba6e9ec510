use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::lenient;

/// Employee as returned by `/api/employee/{subadminId}/employee/all`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub emp_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub emp_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub salary: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub job_role: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub birth_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub email: Option<String>,
}

impl EmployeeRecord {
    /// `empId`, falling back to `id`, or empty when the backend sent neither.
    pub fn identifier(&self) -> &str {
        self.emp_id
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or_default()
    }

    pub fn is_active(&self) -> bool {
        matches!(self.status.as_deref(), Some("Active" | "active"))
    }

    pub fn is_inactive(&self) -> bool {
        matches!(self.status.as_deref(), Some("Inactive" | "inactive"))
    }

    pub fn salary_or_zero(&self) -> f64 {
        self.salary.unwrap_or(0.0)
    }

    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.birth_date.as_deref().and_then(lenient::calendar_date)
    }
}
