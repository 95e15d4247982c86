//! File-backed session store.
//!
//! The analog of the browser's fixed-key local storage: one JSON document in
//! a capability-scoped directory, written atomically via a temporary file
//! and rename so a crash mid-write never leaves a half-session behind.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};

use cap_std::fs::{Dir, OpenOptions};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::ports::SessionStore;
use crate::domain::{DomainError, Role, Session};

/// The single fixed key the session lives under.
pub const SESSION_FILE_NAME: &str = "session.json";

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persisted record under the fixed key, using the backend's wire names.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSessionDto {
    email: String,
    usuario: String,
    clave: String,
    token: String,
    rol: String,
}

impl From<&Session> for StoredSessionDto {
    fn from(session: &Session) -> Self {
        Self {
            email: session.email().to_owned(),
            usuario: session.username().to_owned(),
            clave: session.secret().to_owned(),
            token: session.token().to_owned(),
            rol: session.role().as_claim().to_owned(),
        }
    }
}

impl From<StoredSessionDto> for Session {
    fn from(dto: StoredSessionDto) -> Self {
        Self::new(
            dto.email,
            dto.usuario,
            Zeroizing::new(dto.clave),
            dto.token,
            Role::from_claim(&dto.rol),
        )
    }
}

/// Session storage rooted in one directory.
pub struct FileSessionStore {
    dir: Dir,
}

impl FileSessionStore {
    /// Open (creating if needed) the directory the session lives in.
    ///
    /// # Errors
    ///
    /// `InternalError` when the directory cannot be created or opened.
    pub fn open(path: &std::path::Path) -> Result<Self, DomainError> {
        std::fs::create_dir_all(path).map_err(|err| {
            DomainError::internal(format!(
                "session directory {} cannot be created: {err}",
                path.display()
            ))
        })?;
        let dir = Dir::open_ambient_dir(path, cap_std::ambient_authority()).map_err(|err| {
            DomainError::internal(format!(
                "session directory {} cannot be opened: {err}",
                path.display()
            ))
        })?;
        Ok(Self { dir })
    }

    fn write_atomic(&self, contents: &str) -> io::Result<()> {
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let tmp_name = format!(".{SESSION_FILE_NAME}.tmp.{}.{counter}", std::process::id());

        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        let mut file = self.dir.open_with(&tmp_name, &options)?;
        if let Err(err) = file
            .write_all(contents.as_bytes())
            .and_then(|()| file.sync_all())
        {
            drop(file);
            drop(self.dir.remove_file(&tmp_name));
            return Err(err);
        }
        drop(file);

        if let Err(err) = self.dir.rename(&tmp_name, &self.dir, SESSION_FILE_NAME) {
            drop(self.dir.remove_file(&tmp_name));
            return Err(err);
        }
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>, DomainError> {
        let contents = match self.dir.read_to_string(SESSION_FILE_NAME) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(DomainError::internal(format!(
                    "persisted session cannot be read: {err}"
                )));
            }
        };
        let dto: StoredSessionDto = serde_json::from_str(&contents).map_err(|err| {
            DomainError::internal(format!("persisted session is corrupt: {err}"))
        })?;
        Ok(Some(dto.into()))
    }

    fn save(&self, session: &Session) -> Result<(), DomainError> {
        let dto = StoredSessionDto::from(session);
        let contents = serde_json::to_string_pretty(&dto).map_err(|err| {
            DomainError::internal(format!("session cannot be serialized: {err}"))
        })?;
        self.write_atomic(&contents).map_err(|err| {
            DomainError::internal(format!(
                "session file {SESSION_FILE_NAME} cannot be written: {err}"
            ))
        })
    }

    fn clear(&self) -> Result<(), DomainError> {
        match self.dir.remove_file(SESSION_FILE_NAME) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(DomainError::internal(format!(
                "persisted session cannot be removed: {err}"
            ))),
        }
    }
}
