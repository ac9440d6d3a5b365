use std::collections::HashMap;

use async_trait::async_trait;
use colend_application::PermissionSource;
use colend_core::{AppResult, UserIdentity};
use serde_json::Value;
use tokio::sync::RwLock;

/// In-memory permission source keyed by subject.
#[derive(Default)]
pub struct InMemoryPermissionSource {
    payloads: RwLock<HashMap<String, Value>>,
}

impl InMemoryPermissionSource {
    /// Creates an empty in-memory permission source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the payload returned for `subject`, replacing any previous one.
    pub async fn set_permissions(&self, subject: impl Into<String>, payload: Value) {
        self.payloads.write().await.insert(subject.into(), payload);
    }

    /// Forgets the payload for `subject`.
    pub async fn remove_permissions(&self, subject: &str) -> Option<Value> {
        self.payloads.write().await.remove(subject)
    }
}

#[async_trait]
impl PermissionSource for InMemoryPermissionSource {
    async fn fetch_permissions(&self, identity: &UserIdentity) -> AppResult<Value> {
        Ok(self
            .payloads
            .read()
            .await
            .get(identity.subject())
            .cloned()
            .unwrap_or(Value::Null))
    }
}

#[cfg(test)]
mod tests {
    use colend_application::PermissionSource;
    use colend_core::UserIdentity;
    use serde_json::{Value, json};

    use super::InMemoryPermissionSource;

    fn identity() -> UserIdentity {
        UserIdentity::new("ops", "Ops", None, "operator")
    }

    #[tokio::test]
    async fn unknown_subject_gets_null_payload() {
        let source = InMemoryPermissionSource::new();
        let payload = source.fetch_permissions(&identity()).await;
        assert_eq!(payload.ok(), Some(Value::Null));
    }

    #[tokio::test]
    async fn stored_payload_is_returned_until_removed() {
        let source = InMemoryPermissionSource::new();
        let payload = json!([{ "module_name": "bre", "view": true }]);
        source.set_permissions("ops", payload.clone()).await;

        assert_eq!(source.fetch_permissions(&identity()).await.ok(), Some(payload));
        assert!(source.remove_permissions("ops").await.is_some());
        assert_eq!(
            source.fetch_permissions(&identity()).await.ok(),
            Some(Value::Null)
        );
    }
}
