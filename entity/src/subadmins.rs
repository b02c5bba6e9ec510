use serde::{Deserialize, Serialize};

use crate::lenient;

/// Company profile of the tenant administrator.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct SubadminRecord {
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub registercompanyname: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub companylogo: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub contact: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub phoneno: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub gstno: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub cinno: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub companyurl: Option<String>,
}
