//! Library identity and credential configuration.
//!
//! Configuration is an explicit value handed to client construction. The
//! binary builds it from the process environment (after loading `.env`);
//! tests build it from a plain lookup function.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Environment variable holding the numeric user or group ID.
pub const LIBRARY_ID_VAR: &str = "ZOTERO_LIBRARY_ID";
/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "ZOTERO_API_KEY";
/// Environment variable selecting `user` or `group` libraries.
pub const LIBRARY_TYPE_VAR: &str = "ZOTERO_LIBRARY_TYPE";

/// Errors raised while assembling [`LibraryConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Library ID and/or API key are not set.
    #[error(
        "missing Zotero credentials: {missing}\n  Suggestion: Set ZOTERO_LIBRARY_ID and ZOTERO_API_KEY in your environment or .env file"
    )]
    MissingCredentials {
        /// Comma-separated names of the missing variables.
        missing: String,
    },

    /// Library type is neither `user` nor `group`.
    #[error(
        "invalid library type '{value}'\n  Suggestion: Set ZOTERO_LIBRARY_TYPE to 'user' or 'group'"
    )]
    InvalidLibraryType {
        /// The rejected value.
        value: String,
    },
}

/// Whether the library belongs to a user or a group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LibraryType {
    #[default]
    User,
    Group,
}

impl LibraryType {
    /// URL path segment for this library type (`users` / `groups`).
    #[must_use]
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::User => "users",
            Self::Group => "groups",
        }
    }
}

impl FromStr for LibraryType {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "group" => Ok(Self::Group),
            _ => Err(ConfigError::InvalidLibraryType {
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for LibraryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("user"),
            Self::Group => f.write_str("group"),
        }
    }
}

/// Identity and credentials for one Zotero library.
#[derive(Clone, PartialEq, Eq)]
pub struct LibraryConfig {
    pub library_id: String,
    pub library_type: LibraryType,
    pub api_key: String,
}

impl LibraryConfig {
    /// Creates a configuration from already-validated parts.
    #[must_use]
    pub fn new(
        library_id: impl Into<String>,
        library_type: LibraryType,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            library_id: library_id.into(),
            library_type,
            api_key: api_key.into(),
        }
    }

    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// See [`LibraryConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from a variable lookup.
    ///
    /// Values are trimmed and empty values count as unset. The library type
    /// defaults to `user`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingCredentials`] when the library ID or API
    /// key is unset, and [`ConfigError::InvalidLibraryType`] for an unknown
    /// library type.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let library_id = read(LIBRARY_ID_VAR);
        let api_key = read(API_KEY_VAR);

        let (Some(library_id), Some(api_key)) = (library_id.clone(), api_key.clone()) else {
            let missing: Vec<&str> = [
                library_id.is_none().then_some(LIBRARY_ID_VAR),
                api_key.is_none().then_some(API_KEY_VAR),
            ]
            .into_iter()
            .flatten()
            .collect();
            return Err(ConfigError::MissingCredentials {
                missing: missing.join(", "),
            });
        };

        let library_type = match read(LIBRARY_TYPE_VAR) {
            Some(value) => value.parse()?,
            None => LibraryType::default(),
        };

        Ok(Self {
            library_id,
            library_type,
            api_key,
        })
    }

    /// Library path prefix, e.g. `/users/12345`.
    #[must_use]
    pub fn library_prefix(&self) -> String {
        format!(
            "/{}/{}",
            self.library_type.path_segment(),
            urlencoding::encode(&self.library_id)
        )
    }
}

impl fmt::Debug for LibraryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibraryConfig")
            .field("library_id", &self.library_id)
            .field("library_type", &self.library_type)
            .field("api_key", &"<redacted>")
            .finish()
    }
}
