use async_trait::async_trait;
use colend_core::{AppResult, UserIdentity};
use serde_json::Value;

/// Port for the auth provider that issues per-module permission payloads.
#[async_trait]
pub trait PermissionSource: Send + Sync {
    /// Fetches the raw permission payload for a signed-in user.
    ///
    /// The payload is expected to be a list of permission records but is
    /// returned untyped; shape problems are resolved while building the
    /// permission map, not here.
    async fn fetch_permissions(&self, identity: &UserIdentity) -> AppResult<Value>;
}
