use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
};

use entity::{
    EmployeeRecord, ExpenseRecord, LeaveRecord, LeaveStatus, LocationRecord, Reminder,
    SubadminRecord,
};
use platform_api::{ApiError, ApiResult};
use platform_session::Session;
use tokio::sync::Notify;

use crate::HrBackend;

pub(crate) fn session(id: &str) -> Session {
    Session {
        id: Some(id.to_string()),
        email: Some("ops@acme.io".to_string()),
        ..Session::default()
    }
}

/// In-memory backend. Operations named in `failing` answer 500 with a message.
#[derive(Default)]
pub(crate) struct FakeBackend {
    pub employees: Vec<EmployeeRecord>,
    pub locations: HashMap<String, LocationRecord>,
    pub addresses: HashMap<String, String>,
    pub leaves: Vec<LeaveRecord>,
    pub reminders: Vec<Reminder>,
    pub expenses: Vec<ExpenseRecord>,
    pub subadmin: Option<SubadminRecord>,
    pub failing: HashSet<&'static str>,
    /// Location lookups for these employee ids wait until notified.
    pub gates: HashMap<String, Arc<Notify>>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub fn failing(ops: &[&'static str]) -> Self {
        Self {
            failing: ops.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn hit(&self, op: &'static str, detail: String) -> ApiResult<()> {
        self.calls.lock().unwrap().push(format!("{op}:{detail}"));
        if self.failing.contains(op) {
            return Err(ApiError::Status {
                status: 500,
                message: Some(format!("{op} unavailable")),
            });
        }
        Ok(())
    }
}

impl HrBackend for FakeBackend {
    async fn employees(&self, subadmin_id: &str) -> ApiResult<Vec<EmployeeRecord>> {
        self.hit("employees", subadmin_id.to_string())?;
        Ok(self.employees.clone())
    }

    async fn location(&self, subadmin_id: &str, emp_id: &str) -> ApiResult<Option<LocationRecord>> {
        if let Some(gate) = self.gates.get(emp_id) {
            gate.notified().await;
        }
        self.hit("location", format!("{subadmin_id}/{emp_id}"))?;
        Ok(self.locations.get(emp_id).cloned())
    }

    async fn reverse_geocode(&self, latitude: f64, longitude: f64) -> ApiResult<Option<String>> {
        let key = format!("{latitude},{longitude}");
        self.hit("geocode", key.clone())?;
        Ok(self.addresses.get(&key).cloned())
    }

    async fn leaves(&self, subadmin_id: &str) -> ApiResult<Vec<LeaveRecord>> {
        self.hit("leaves", subadmin_id.to_string())?;
        Ok(self.leaves.clone())
    }

    async fn update_leave_status(
        &self,
        subadmin_id: &str,
        leave_id: &str,
        status: LeaveStatus,
    ) -> ApiResult<()> {
        self.hit("leave_status", format!("{subadmin_id}/{leave_id}/{status}"))
    }

    async fn delete_leave(&self, subadmin_id: &str, leave_id: &str) -> ApiResult<()> {
        self.hit("leave_delete", format!("{subadmin_id}/{leave_id}"))
    }

    async fn reminders(&self, subadmin_id: &str) -> ApiResult<Vec<Reminder>> {
        self.hit("reminders", subadmin_id.to_string())?;
        Ok(self.reminders.clone())
    }

    async fn expenses(&self, subadmin_id: &str) -> ApiResult<Vec<ExpenseRecord>> {
        self.hit("expenses", subadmin_id.to_string())?;
        Ok(self.expenses.clone())
    }

    async fn subadmin_by_email(&self, email: &str) -> ApiResult<Option<SubadminRecord>> {
        self.hit("subadmin", email.to_string())?;
        Ok(self.subadmin.clone())
    }
}
