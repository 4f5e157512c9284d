//! Typed load/save of shell state through a [`PrefsStore`].

use leptos::logging;
use platform_host::PrefsStore;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use terminal_shell_contract::ShellTheme;
use thiserror::Error;

/// Storage keys for one shell namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    /// Scrollback entries.
    pub scrollback: String,
    /// Command history log, newest first.
    pub history: String,
    /// Unlocked achievements.
    pub achievements: String,
    /// Working path, theme and sound toggle.
    pub session: String,
}

impl StorageKeys {
    /// Derives versioned keys under `prefix`.
    pub fn new(prefix: &str) -> Self {
        Self {
            scrollback: format!("{prefix}.scrollback.v1"),
            history: format!("{prefix}.history.v1"),
            achievements: format!("{prefix}.achievements.v1"),
            session: format!("{prefix}.session.v1"),
        }
    }
}

#[derive(Debug, Error)]
/// Failure to read or write persisted shell state.
pub enum PersistenceError {
    /// The store itself failed.
    #[error("storage unavailable: {0}")]
    Store(String),
    /// The stored value did not match the expected shape.
    #[error("malformed value under `{key}`: {source}")]
    Malformed {
        /// Key that held the value.
        key: String,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
}

/// Loads and decodes the value under `key`.
///
/// # Errors
///
/// Returns [`PersistenceError::Store`] when the store fails and
/// [`PersistenceError::Malformed`] when the value does not decode.
pub async fn load_json<T: DeserializeOwned>(
    store: &dyn PrefsStore,
    key: &str,
) -> Result<Option<T>, PersistenceError> {
    let Some(raw) = store
        .load_pref(key)
        .await
        .map_err(PersistenceError::Store)?
    else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| PersistenceError::Malformed {
            key: key.to_string(),
            source,
        })
}

/// Encodes and saves `value` under `key`, replacing what was there.
///
/// # Errors
///
/// Returns [`PersistenceError::Malformed`] when encoding fails and
/// [`PersistenceError::Store`] when the store rejects the write.
pub async fn save_json<T: Serialize + ?Sized>(
    store: &dyn PrefsStore,
    key: &str,
    value: &T,
) -> Result<(), PersistenceError> {
    let raw = serde_json::to_string(value).map_err(|source| PersistenceError::Malformed {
        key: key.to_string(),
        source,
    })?;
    store
        .save_pref(key, &raw)
        .await
        .map_err(PersistenceError::Store)
}

/// Loads `key`, logging and discarding anything that fails to load.
pub(crate) async fn load_or_discard<T: DeserializeOwned>(
    store: &dyn PrefsStore,
    key: &str,
) -> Option<T> {
    match load_json(store, key).await {
        Ok(value) => value,
        Err(err) => {
            logging::warn!("terminal state discarded: {err}");
            None
        }
    }
}

/// Saves `key`, logging failures.
pub(crate) async fn save_best_effort<T: Serialize + ?Sized>(
    store: &dyn PrefsStore,
    key: &str,
    value: &T,
) {
    if let Err(err) = save_json(store, key, value).await {
        logging::warn!("terminal state not saved: {err}");
    }
}

/// Persisted subset of the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct PersistedSession {
    pub cwd: String,
    pub theme: ShellTheme,
    pub sound_enabled: bool,
}

impl Default for PersistedSession {
    fn default() -> Self {
        Self {
            cwd: "/".to_string(),
            theme: ShellTheme::default(),
            sound_enabled: true,
        }
    }
}
