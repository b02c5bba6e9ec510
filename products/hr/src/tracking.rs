//! Live location of a selected employee.
//!
//! Selecting employees in quick succession issues overlapping lookups. Each
//! lookup takes a ticket; a response whose ticket is no longer the newest is
//! dropped, so the displayed location always belongs to the last selection no
//! matter which response arrives first.

use std::sync::atomic::{AtomicU64, Ordering};

use platform_session::Session;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::{Candidate, HrBackend, HrError, HrResult};

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<(f64, f64)> for Coordinates {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrackedLocation {
    pub employee: Candidate,
    pub current: Coordinates,
    pub last_known: Option<Coordinates>,
    /// Empty when reverse geocoding found nothing.
    pub address: String,
    pub last_address: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TrackOutcome {
    Located(TrackedLocation),
    /// A newer lookup was issued while this one was in flight.
    Superseded,
}

pub struct LocationTracker<B> {
    backend: B,
    tickets: AtomicU64,
    shown: Mutex<Option<TrackedLocation>>,
}

impl<B: HrBackend> LocationTracker<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            tickets: AtomicU64::new(0),
            shown: Mutex::new(None),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Location currently on display.
    pub async fn shown(&self) -> Option<TrackedLocation> {
        self.shown.lock().await.clone()
    }

    #[instrument(name = "hr.track", skip(self, session, employee), fields(employee = %employee.id))]
    pub async fn track(&self, session: &Session, employee: &Candidate) -> HrResult<TrackOutcome> {
        let ticket = self.tickets.fetch_add(1, Ordering::SeqCst) + 1;
        self.shown.lock().await.take();

        let result = self.locate(session, employee).await;

        let mut shown = self.shown.lock().await;
        if self.tickets.load(Ordering::SeqCst) != ticket {
            debug!(ticket, "discarding superseded location response");
            return Ok(TrackOutcome::Superseded);
        }
        let location = result?;
        info!(
            latitude = location.current.latitude,
            longitude = location.current.longitude,
            "employee located"
        );
        *shown = Some(location.clone());
        Ok(TrackOutcome::Located(location))
    }

    async fn locate(&self, session: &Session, employee: &Candidate) -> HrResult<TrackedLocation> {
        let subadmin_id = session.subadmin_id()?;
        let record = self
            .backend
            .location(subadmin_id, &employee.id)
            .await?
            .ok_or(HrError::NoLocation)?;
        let current = Coordinates::from(record.current().ok_or(HrError::NoLocation)?);
        let last_known = record.last_known().map(Coordinates::from);

        let (address, last_address) = tokio::join!(
            self.address_of(Some(current)),
            self.address_of(last_known)
        );

        Ok(TrackedLocation {
            employee: employee.clone(),
            current,
            last_known,
            address,
            last_address,
        })
    }

    async fn address_of(&self, at: Option<Coordinates>) -> String {
        let Some(at) = at else {
            return String::new();
        };
        match self.backend.reverse_geocode(at.latitude, at.longitude).await {
            Ok(address) => address.unwrap_or_default(),
            Err(err) => {
                debug!(error = %err, "reverse geocoding failed");
                String::new()
            }
        }
    }
}
