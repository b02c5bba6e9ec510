use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

impl Scalar {
    fn into_text(self) -> Option<String> {
        let text = match self {
            Scalar::Int(value) => value.to_string(),
            Scalar::Float(value) => value.to_string(),
            Scalar::Text(value) => value.trim().to_string(),
            Scalar::Other(_) => return None,
        };
        (!text.is_empty()).then_some(text)
    }

    fn into_number(self) -> Option<f64> {
        match self {
            Scalar::Int(value) => Some(value as f64),
            Scalar::Float(value) => Some(value),
            Scalar::Text(value) => value.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            Scalar::Other(_) => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MaybeString {
    Text(String),
    Other(serde::de::IgnoredAny),
}

/// Identifier that may be a JSON number or string. Blank and `null` become `None`.
pub fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.and_then(Scalar::into_text))
}

/// Like [`opt_text`] but yields an empty string for missing values.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_text(deserializer)?.unwrap_or_default())
}

/// Number that may arrive as a numeric string. Unparseable values become `None`.
pub fn opt_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.and_then(Scalar::into_number))
}

/// Free text field. Anything that is not a JSON string is dropped instead of failing.
pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<MaybeString>::deserialize(deserializer)? {
        Some(MaybeString::Text(value)) => Some(value),
        Some(MaybeString::Other(_)) | None => None,
    })
}

/// Boolean flag. Anything other than `true` or `false` becomes `None`.
pub fn opt_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MaybeBool {
        Flag(bool),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Option::<MaybeBool>::deserialize(deserializer)? {
        Some(MaybeBool::Flag(value)) => Some(value),
        Some(MaybeBool::Other(_)) | None => None,
    })
}

/// Calendar date from an ISO `YYYY-MM-DD` string, ignoring any time suffix.
pub fn calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let date = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}
