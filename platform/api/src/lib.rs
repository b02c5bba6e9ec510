//! REST plumbing shared by every HR screen.

mod client;
mod error;
mod geocode;

pub use client::{ClientConfig, DEFAULT_BASE_URL, HrClient};
pub use error::{ApiError, ApiResult};
pub use geocode::{DEFAULT_GEOCODE_URL, Geocoder};
