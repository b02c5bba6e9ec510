use std::future::Future;

use entity::{
    EmployeeRecord, ExpenseRecord, LeaveRecord, LeaveStatus, LocationRecord, Reminder,
    SubadminRecord,
};
use platform_api::{ApiResult, HrClient};

/// Everything the HR screens need from the remote backend.
pub trait HrBackend: Send + Sync {
    fn employees(
        &self,
        subadmin_id: &str,
    ) -> impl Future<Output = ApiResult<Vec<EmployeeRecord>>> + Send;

    fn location(
        &self,
        subadmin_id: &str,
        emp_id: &str,
    ) -> impl Future<Output = ApiResult<Option<LocationRecord>>> + Send;

    /// Address for a coordinate pair; `Ok(None)` when geocoding is unavailable.
    fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> impl Future<Output = ApiResult<Option<String>>> + Send;

    fn leaves(&self, subadmin_id: &str)
    -> impl Future<Output = ApiResult<Vec<LeaveRecord>>> + Send;

    fn update_leave_status(
        &self,
        subadmin_id: &str,
        leave_id: &str,
        status: LeaveStatus,
    ) -> impl Future<Output = ApiResult<()>> + Send;

    fn delete_leave(
        &self,
        subadmin_id: &str,
        leave_id: &str,
    ) -> impl Future<Output = ApiResult<()>> + Send;

    fn reminders(&self, subadmin_id: &str) -> impl Future<Output = ApiResult<Vec<Reminder>>> + Send;

    fn expenses(
        &self,
        subadmin_id: &str,
    ) -> impl Future<Output = ApiResult<Vec<ExpenseRecord>>> + Send;

    fn subadmin_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = ApiResult<Option<SubadminRecord>>> + Send;
}

impl HrBackend for HrClient {
    async fn employees(&self, subadmin_id: &str) -> ApiResult<Vec<EmployeeRecord>> {
        HrClient::employees(self, subadmin_id).await
    }

    async fn location(&self, subadmin_id: &str, emp_id: &str) -> ApiResult<Option<LocationRecord>> {
        HrClient::location(self, subadmin_id, emp_id).await
    }

    async fn reverse_geocode(&self, latitude: f64, longitude: f64) -> ApiResult<Option<String>> {
        match self.geocoder() {
            Some(geocoder) => geocoder.reverse(latitude, longitude).await,
            None => Ok(None),
        }
    }

    async fn leaves(&self, subadmin_id: &str) -> ApiResult<Vec<LeaveRecord>> {
        HrClient::leaves(self, subadmin_id).await
    }

    async fn update_leave_status(
        &self,
        subadmin_id: &str,
        leave_id: &str,
        status: LeaveStatus,
    ) -> ApiResult<()> {
        HrClient::update_leave_status(self, subadmin_id, leave_id, status).await
    }

    async fn delete_leave(&self, subadmin_id: &str, leave_id: &str) -> ApiResult<()> {
        HrClient::delete_leave(self, subadmin_id, leave_id).await
    }

    async fn reminders(&self, subadmin_id: &str) -> ApiResult<Vec<Reminder>> {
        HrClient::reminders(self, subadmin_id).await
    }

    async fn expenses(&self, subadmin_id: &str) -> ApiResult<Vec<ExpenseRecord>> {
        HrClient::expenses(self, subadmin_id).await
    }

    async fn subadmin_by_email(&self, email: &str) -> ApiResult<Option<SubadminRecord>> {
        HrClient::subadmin_by_email(self, email).await
    }
}
