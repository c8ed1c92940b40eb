use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::{fs, sync::Mutex};

use super::guard::GuardState;
use crate::models::{user::Role, RecordId};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to write session file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read session file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode session: {0}")]
    Encode(#[from] serde_json::Error),
}

/// The signed-in user, as handed out by POST /auth/token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub token: String,
    pub role: Role,
    #[serde(rename = "id")]
    pub user_id: RecordId,
    pub authenticated: bool,
}

/// Everything the portal keeps between restarts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    pub identity: Option<Identity>,
    #[serde(default)]
    pub guard: GuardState,
}

/// Process-wide session storage, written through to a JSON file.
#[derive(Clone)]
pub struct SessionStore {
    path: Option<Arc<PathBuf>>,
    state: Arc<Mutex<SessionState>>,
}

impl SessionStore {
    /// A store that never touches the disk.
    pub fn in_memory(initial: SessionState) -> Self {
        Self {
            path: None,
            state: Arc::new(Mutex::new(initial)),
        }
    }

    /// Load the session file, starting fresh if it is missing or unreadable.
    pub async fn open(path: impl Into<PathBuf>, fresh: SessionState) -> Result<Self, SessionError> {
        let path = path.into();
        let state = load_state(&path, fresh).await?;

        Ok(Self {
            path: Some(Arc::new(path)),
            state: Arc::new(Mutex::new(state)),
        })
    }

    pub async fn snapshot(&self) -> SessionState {
        self.state.lock().await.clone()
    }

    /// Mutate the session and persist the result before releasing the lock.
    /// If the file cannot be written, the in-memory session is left as it was.
    pub async fn update<T>(
        &self,
        f: impl FnOnce(&mut SessionState) -> T,
    ) -> Result<T, SessionError> {
        let mut state = self.state.lock().await;
        let mut next = state.clone();
        let out = f(&mut next);

        if next != *state {
            if let Some(path) = &self.path {
                persist_state(path, &next).await?;
            }
            *state = next;
        }
        Ok(out)
    }

    pub async fn identity(&self) -> Option<Identity> {
        self.state.lock().await.identity.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state
            .lock()
            .await
            .identity
            .as_ref()
            .is_some_and(|identity| !identity.token.is_empty())
    }

    pub async fn has_role(&self, role: &Role) -> bool {
        self.state
            .lock()
            .await
            .identity
            .as_ref()
            .is_some_and(|identity| &identity.role == role)
    }

    pub async fn sign_in(&self, identity: Identity) -> Result<(), SessionError> {
        self.update(|state| state.identity = Some(identity)).await
    }

    /// Drop the identity and the attempt history.
    pub async fn logout(&self, fresh: SessionState) -> Result<(), SessionError> {
        self.update(|state| *state = fresh).await
    }
}

async fn load_state(path: &Path, fresh: SessionState) -> Result<SessionState, SessionError> {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(state) => Ok(state),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "Session file unreadable, starting fresh");
                Ok(fresh)
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(fresh),
        Err(source) => Err(SessionError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

async fn persist_state(path: &Path, state: &SessionState) -> Result<(), SessionError> {
    let payload = serde_json::to_vec_pretty(state)?;
    let write_err = |source| SessionError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(write_err)?;
    }

    // Write-then-rename so a crash never leaves half a file behind.
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, payload).await.map_err(write_err)?;
    fs::rename(&tmp, path).await.map_err(write_err)?;
    Ok(())
}
