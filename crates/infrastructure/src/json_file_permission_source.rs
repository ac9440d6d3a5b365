use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use colend_application::PermissionSource;
use colend_core::{AppError, AppResult, UserIdentity};
use serde_json::Value;
use tracing::warn;

/// Permission source reading `<dir>/<subject>.json` exports of the backend payload.
#[derive(Debug, Clone)]
pub struct JsonFilePermissionSource {
    directory: PathBuf,
}

impl JsonFilePermissionSource {
    /// Creates a source rooted at `directory`.
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Returns the directory payload files are read from.
    #[must_use]
    pub fn directory(&self) -> &Path {
        self.directory.as_path()
    }

    fn payload_path(&self, subject: &str) -> AppResult<PathBuf> {
        let subject = subject.trim();
        if subject.is_empty()
            || subject.contains("..")
            || subject.contains('/')
            || subject.contains('\\')
        {
            return Err(AppError::Validation(format!(
                "subject '{subject}' cannot be used as a permission file name"
            )));
        }

        Ok(self.directory.join(format!("{subject}.json")))
    }
}

#[async_trait]
impl PermissionSource for JsonFilePermissionSource {
    async fn fetch_permissions(&self, identity: &UserIdentity) -> AppResult<Value> {
        let path = self.payload_path(identity.subject())?;
        let bytes = tokio::fs::read(&path).await.map_err(|error| {
            if error.kind() == ErrorKind::NotFound {
                AppError::NotFound(format!(
                    "no permission file for subject '{}' at '{}'",
                    identity.subject(),
                    path.display()
                ))
            } else {
                AppError::Internal(format!(
                    "failed to read permission file '{}': {error}",
                    path.display()
                ))
            }
        })?;

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(payload) => Ok(payload),
            Err(error) => {
                warn!(
                    subject = identity.subject(),
                    path = %path.display(),
                    error = %error,
                    "permission file is not valid JSON, treating as no access"
                );
                Ok(Value::Null)
            }
        }
    }
}
