//! Session primitives.
//!
//! The web front-end kept the logged-in user as a JSON object under the `user`
//! key of browser storage. Here the same object lives in a JSON file (see
//! [`SESSION_FILE_ENV`]), and every screen-level operation reads it through
//! [`Session`].

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_COMPANY_NAME: &str = "WTL HRM Dashboard";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no session found at {0}")]
    Missing(PathBuf),
    #[error("failed to read session {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed session: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("No subadmin session")]
    MissingSubadmin,
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Environment variable naming the session file.
pub const SESSION_FILE_ENV: &str = "HRM_SESSION_FILE";

pub const DEFAULT_SESSION_FILE: &str = "session.json";

/// Where the session object is stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSettings {
    path: PathBuf,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::at(DEFAULT_SESSION_FILE)
    }
}

impl SessionSettings {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> SessionResult<Session> {
        load(&self.path)
    }
}

/// The logged-in user, read-only for the rest of the application.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Session {
    #[serde(default, deserialize_with = "id_text")]
    pub id: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub companylogo: Option<String>,
    #[serde(default)]
    pub registercompanyname: Option<String>,
}

impl Session {
    /// Tenant id used in every backend path.
    pub fn subadmin_id(&self) -> SessionResult<&str> {
        self.id.as_deref().ok_or(SessionError::MissingSubadmin)
    }

    pub fn display_name(&self) -> String {
        [self.name.as_deref(), self.lastname.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn company_name(&self) -> &str {
        self.registercompanyname
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(DEFAULT_COMPANY_NAME)
    }
}

fn id_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Int(value)) => Some(value.to_string()),
        Some(Raw::Text(value)) if !value.trim().is_empty() => Some(value.trim().to_string()),
        _ => None,
    })
}

/// Reads the session object stored at `path`.
pub fn load(path: &Path) -> SessionResult<Session> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(SessionError::Missing(path.to_path_buf()));
        }
        Err(source) => {
            return Err(SessionError::Unreadable {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    if raw.trim().is_empty() || raw.trim() == "null" {
        return Err(SessionError::Missing(path.to_path_buf()));
    }
    let session: Session = serde_json::from_str(&raw)?;
    debug!(path = %path.display(), has_id = session.id.is_some(), "session loaded");
    Ok(session)
}
