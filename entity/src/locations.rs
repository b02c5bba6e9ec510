use serde::{Deserialize, Serialize};

use crate::lenient;

/// Latest reported position of an employee device.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRecord {
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub last_latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub last_longitude: Option<f64>,
}

impl LocationRecord {
    pub fn current(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }

    /// Previous fix, reported only when both coordinates are present.
    pub fn last_known(&self) -> Option<(f64, f64)> {
        self.last_latitude.zip(self.last_longitude)
    }
}
