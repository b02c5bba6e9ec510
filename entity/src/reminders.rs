use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::lenient;

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub function_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub reminder_date: Option<String>,
}

impl Reminder {
    pub fn date(&self) -> Option<NaiveDate> {
        self.reminder_date.as_deref().and_then(lenient::calendar_date)
    }
}
