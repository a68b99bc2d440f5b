//! Local session store: a versioned, single-record key-value document on
//! disk holding the authenticated user's identity.
//!
//! The store is best-effort cache, not a source of truth: it is opened once
//! per app start, and every failure mode routes the user to Login rather
//! than crashing. First run (no store yet) and broken storage both resolve
//! as "no session" but stay distinct in the outcome and in the logs.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::state::Session;

/// Current schema version of the on-disk document. A document with an older
/// version is recreated empty, mirroring an upgrade-needed open.
pub const STORE_VERSION: u32 = 1;

/// File name of the session document under the config directory.
pub const SESSION_FILE: &str = "session.json";

/// On-disk document: schema version plus the single session record.
#[derive(Debug, Serialize, Deserialize)]
struct StoreDocument {
    /// Schema version for upgrade detection.
    schema_version: u32,
    /// The single record at the store's fixed key, absent until first login.
    record: Option<SessionRecord>,
}

/// The persisted record: `{id, name}`.
#[derive(Debug, Serialize, Deserialize)]
struct SessionRecord {
    /// Remote user id.
    id: String,
    /// User display name.
    name: String,
}

/// Why a store open resolved without a session. Both `FirstRun` and
/// `MissingRecord` are clean "no session" states; `StorageUnavailable`
/// additionally warrants a user-visible notice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NoSessionCause {
    /// The store did not exist yet (or carried an older schema) and was
    /// (re)created empty.
    FirstRun,
    /// The store opened fine but held no valid record.
    MissingRecord,
    /// The store could not be opened, read or created.
    StorageUnavailable {
        /// Underlying cause for logs and the notice.
        reason: String,
    },
}

/// Outcome of [`SessionStore::open_session`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionOutcome {
    /// A fully populated session was found.
    Active(Session),
    /// No session; the cause says whether storage itself is healthy.
    NoSession(NoSessionCause),
}

/// Handle to the session document at a fixed path.
#[derive(Clone, Debug)]
pub struct SessionStore {
    /// Path of the JSON document.
    path: PathBuf,
}

impl SessionStore {
    /// Store at an explicit path (tests, `--session-file` override).
    #[must_use]
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the default location under the config directory.
    #[must_use]
    pub fn open_default() -> Self {
        Self::at(crate::config::config_dir().join(SESSION_FILE))
    }

    /// Path of the backing document.
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Open the store and resolve the session tri-state. Single attempt, no
    /// retry; never panics and never returns a hard error.
    #[must_use]
    pub fn open_session(&self) -> SessionOutcome {
        if !self.path.exists() {
            // First run: create the schema before reporting "no session".
            return match self.write_document(&StoreDocument {
                schema_version: STORE_VERSION,
                record: None,
            }) {
                Ok(()) => {
                    tracing::info!(path = %self.path.display(), "[Session] store created on first run");
                    SessionOutcome::NoSession(NoSessionCause::FirstRun)
                }
                Err(reason) => {
                    tracing::warn!(path = %self.path.display(), error = %reason, "[Session] store creation failed");
                    SessionOutcome::NoSession(NoSessionCause::StorageUnavailable { reason })
                }
            };
        }

        let body = match fs::read_to_string(&self.path) {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "[Session] store unreadable");
                return SessionOutcome::NoSession(NoSessionCause::StorageUnavailable {
                    reason: e.to_string(),
                });
            }
        };
        let doc: StoreDocument = match serde_json::from_str(&body) {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "[Session] store corrupt");
                return SessionOutcome::NoSession(NoSessionCause::StorageUnavailable {
                    reason: e.to_string(),
                });
            }
        };

        if doc.schema_version != STORE_VERSION {
            // Upgrade needed: recreate the schema empty, route to Login.
            tracing::info!(
                path = %self.path.display(),
                found = doc.schema_version,
                expected = STORE_VERSION,
                "[Session] schema upgrade, store recreated"
            );
            let _ = self.write_document(&StoreDocument {
                schema_version: STORE_VERSION,
                record: None,
            });
            return SessionOutcome::NoSession(NoSessionCause::FirstRun);
        }

        match doc.record {
            Some(rec) if !rec.id.trim().is_empty() && !rec.name.trim().is_empty() => {
                tracing::debug!(user_id = %rec.id, "[Session] resolved persisted session");
                SessionOutcome::Active(Session {
                    user_id: rec.id,
                    user_name: rec.name,
                })
            }
            _ => {
                tracing::debug!(path = %self.path.display(), "[Session] no valid record");
                SessionOutcome::NoSession(NoSessionCause::MissingRecord)
            }
        }
    }

    /// Overwrite the single record with `session`. Idempotent.
    ///
    /// # Errors
    /// `CoreError::StorageUnavailable` when the document cannot be written.
    pub fn save_session(&self, session: &Session) -> Result<(), CoreError> {
        self.write_document(&StoreDocument {
            schema_version: STORE_VERSION,
            record: Some(SessionRecord {
                id: session.user_id.clone(),
                name: session.user_name.clone(),
            }),
        })
        .map_err(|reason| CoreError::StorageUnavailable { reason })
    }

    /// Logout path: clear the persisted record (the in-memory session is
    /// cleared separately by the navigation side effect).
    ///
    /// # Errors
    /// `CoreError::StorageUnavailable` when the document cannot be written.
    pub fn clear_session(&self) -> Result<(), CoreError> {
        self.write_document(&StoreDocument {
            schema_version: STORE_VERSION,
            record: None,
        })
        .map_err(|reason| CoreError::StorageUnavailable { reason })
    }

    /// Serialize and write the document, creating parent directories.
    fn write_document(&self, doc: &StoreDocument) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let body = serde_json::to_string(doc).map_err(|e| e.to_string())?;
        fs::write(&self.path, body).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{NoSessionCause, SessionOutcome, SessionStore, STORE_VERSION};
    use crate::state::Session;

    fn temp_store(tag: &str) -> SessionStore {
        let mut path = std::env::temp_dir();
        path.push(format!(
            "waypost_session_{tag}_{}_{}.json",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .expect("System time is before UNIX epoch")
                .as_nanos()
        ));
        SessionStore::at(path)
    }

    #[test]
    /// What: Opening a never-initialized store creates it and reports FirstRun.
    ///
    /// - Input: Path that does not exist
    /// - Output: `NoSession(FirstRun)`, file now present; no panic
    fn fresh_store_first_run() {
        let store = temp_store("fresh");
        let outcome = store.open_session();
        assert_eq!(
            outcome,
            SessionOutcome::NoSession(NoSessionCause::FirstRun)
        );
        assert!(store.path().exists());
        let _ = std::fs::remove_file(store.path());
    }

    #[test]
    /// What: Save-then-open round-trips a populated session.
    ///
    /// - Input: Session saved to a fresh store
    /// - Output: `Active` with the same id and name; saving again is a no-op
    ///   overwrite
    fn save_and_reopen_round_trip() {
        let store = temp_store("roundtrip");
        let session = Session {
            user_id: "u42".into(),
            user_name: "grace".into(),
        };
        store.save_session(&session).expect("save session");
        assert_eq!(store.open_session(), SessionOutcome::Active(session.clone()));
        store.save_session(&session).expect("idempotent save");
        assert_eq!(store.open_session(), SessionOutcome::Active(session));
        let _ = std::fs::remove_file(store.path());
    }

    #[test]
    /// What: A record missing its name resolves as no-session, not a crash.
    ///
    /// - Input: Valid document whose record has an empty `name`
    /// - Output: `NoSession(MissingRecord)`
    fn malformed_record_is_missing() {
        let store = temp_store("malformed");
        std::fs::write(
            store.path(),
            format!(
                r#"{{"schema_version":{STORE_VERSION},"record":{{"id":"u1","name":""}}}}"#
            ),
        )
        .expect("write doc");
        assert_eq!(
            store.open_session(),
            SessionOutcome::NoSession(NoSessionCause::MissingRecord)
        );
        let _ = std::fs::remove_file(store.path());
    }

    #[test]
    /// What: Corrupt JSON is reported as unavailable storage, distinct from
    /// a clean first run.
    ///
    /// - Input: File containing non-JSON bytes
    /// - Output: `NoSession(StorageUnavailable)` carrying a reason
    fn corrupt_store_is_unavailable() {
        let store = temp_store("corrupt");
        std::fs::write(store.path(), "not json at all").expect("write junk");
        match store.open_session() {
            SessionOutcome::NoSession(NoSessionCause::StorageUnavailable { reason }) => {
                assert!(!reason.is_empty());
            }
            other => panic!("expected StorageUnavailable, got {other:?}"),
        }
        let _ = std::fs::remove_file(store.path());
    }

    #[test]
    /// What: An older schema version is recreated empty (upgrade path).
    ///
    /// - Input: Document with `schema_version: 0` and a populated record
    /// - Output: `NoSession(FirstRun)`; subsequent open stays empty
    fn old_schema_recreated() {
        let store = temp_store("upgrade");
        std::fs::write(
            store.path(),
            r#"{"schema_version":0,"record":{"id":"u1","name":"ada"}}"#,
        )
        .expect("write old doc");
        assert_eq!(
            store.open_session(),
            SessionOutcome::NoSession(NoSessionCause::FirstRun)
        );
        assert_eq!(
            store.open_session(),
            SessionOutcome::NoSession(NoSessionCause::MissingRecord)
        );
        let _ = std::fs::remove_file(store.path());
    }

    #[test]
    /// What: Logout clears the persisted record.
    ///
    /// - Input: Store with a saved session, then `clear_session`
    /// - Output: Reopen resolves `NoSession(MissingRecord)`
    fn clear_session_removes_record() {
        let store = temp_store("clear");
        store
            .save_session(&Session {
                user_id: "u1".into(),
                user_name: "ada".into(),
            })
            .expect("save");
        store.clear_session().expect("clear");
        assert_eq!(
            store.open_session(),
            SessionOutcome::NoSession(NoSessionCause::MissingRecord)
        );
        let _ = std::fs::remove_file(store.path());
    }
}
