use std::time::Duration;

use entity::{
    EmployeeRecord, ExpenseRecord, LeaveRecord, LeaveStatus, LocationRecord, Reminder,
    SubadminRecord,
};
use reqwest::RequestBuilder;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument};
use url::Url;

use crate::{
    error::{ApiError, ApiResult, decode_body},
    geocode::Geocoder,
};

pub const DEFAULT_BASE_URL: &str = "https://api.managifyhr.com";

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: Url,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Client for the HR backend. Cheap to clone; clones share one connection pool.
#[derive(Clone, Debug)]
pub struct HrClient {
    http: reqwest::Client,
    base_url: Url,
    geocoder: Option<Geocoder>,
}

#[derive(Serialize)]
struct StatusUpdate {
    status: LeaveStatus,
}

impl HrClient {
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        if config.base_url.cannot_be_a_base() {
            return Err(ApiError::BaseUrl);
        }
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("hrm-console/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url,
            geocoder: None,
        })
    }

    pub fn with_geocoder(mut self, geocoder: Geocoder) -> Self {
        self.geocoder = Some(geocoder);
        self
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn geocoder(&self) -> Option<&Geocoder> {
        self.geocoder.as_ref()
    }

    /// `base` followed by `segments`, each percent-encoded as a single path segment.
    pub fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::BaseUrl)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    #[instrument(name = "api.employees", skip(self))]
    pub async fn employees(&self, subadmin_id: &str) -> ApiResult<Vec<EmployeeRecord>> {
        let url = self.endpoint(&["api", "employee", subadmin_id, "employee", "all"])?;
        let employees: Vec<EmployeeRecord> = execute::<Option<_>>(self.http.get(url))
            .await?
            .unwrap_or_default();
        debug!(count = employees.len(), "employees fetched");
        Ok(employees)
    }

    #[instrument(name = "api.location", skip(self))]
    pub async fn location(
        &self,
        subadmin_id: &str,
        emp_id: &str,
    ) -> ApiResult<Option<LocationRecord>> {
        let url = self.endpoint(&["api", "location", subadmin_id, "employee", emp_id])?;
        execute(self.http.get(url)).await
    }

    #[instrument(name = "api.leaves", skip(self))]
    pub async fn leaves(&self, subadmin_id: &str) -> ApiResult<Vec<LeaveRecord>> {
        let url = self.endpoint(&["api", "leaveform", subadmin_id, "all"])?;
        Ok(execute::<Option<_>>(self.http.get(url))
            .await?
            .unwrap_or_default())
    }

    #[instrument(name = "api.leave_status", skip(self))]
    pub async fn update_leave_status(
        &self,
        subadmin_id: &str,
        leave_id: &str,
        status: LeaveStatus,
    ) -> ApiResult<()> {
        let url = self.endpoint(&["api", "leaveform", subadmin_id, leave_id, "status"])?;
        execute::<serde::de::IgnoredAny>(self.http.put(url).json(&StatusUpdate { status }))
            .await?;
        Ok(())
    }

    #[instrument(name = "api.leave_delete", skip(self))]
    pub async fn delete_leave(&self, subadmin_id: &str, leave_id: &str) -> ApiResult<()> {
        let url = self.endpoint(&["api", "leaveform", subadmin_id, leave_id])?;
        execute::<serde::de::IgnoredAny>(self.http.delete(url)).await?;
        Ok(())
    }

    #[instrument(name = "api.reminders", skip(self))]
    pub async fn reminders(&self, subadmin_id: &str) -> ApiResult<Vec<Reminder>> {
        let url = self.endpoint(&["api", "reminders", subadmin_id])?;
        Ok(execute::<Option<_>>(self.http.get(url))
            .await?
            .unwrap_or_default())
    }

    #[instrument(name = "api.expenses", skip(self))]
    pub async fn expenses(&self, subadmin_id: &str) -> ApiResult<Vec<ExpenseRecord>> {
        let url = self.endpoint(&["api", "expenses", subadmin_id, "getAll"])?;
        Ok(execute::<Option<_>>(self.http.get(url))
            .await?
            .unwrap_or_default())
    }

    #[instrument(name = "api.subadmin_by_email", skip(self))]
    pub async fn subadmin_by_email(&self, email: &str) -> ApiResult<Option<SubadminRecord>> {
        let url = self.endpoint(&["api", "subadmin", "subadmin-by-email", email])?;
        execute(self.http.get(url)).await
    }

    /// Public URL of an uploaded company logo.
    pub fn logo_url(&self, file_name: &str) -> ApiResult<Url> {
        self.endpoint(&["images", "profile", file_name])
    }
}

pub(crate) async fn execute<T>(request: RequestBuilder) -> ApiResult<T>
where
    T: DeserializeOwned,
{
    let response = request.send().await?;
    let status = response.status().as_u16();
    let body = response.bytes().await?;
    decode_body(status, &body)
}
