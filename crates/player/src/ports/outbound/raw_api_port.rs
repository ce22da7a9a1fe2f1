//! Raw API Port - Object-safe HTTP boundary
//!
//! Adapters move JSON values; the session gateway decodes them into wire
//! DTOs and then into domain types. Paths are relative to the API base URL.

use serde_json::Value;

use super::ApiError;

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait::async_trait]
pub trait RawApiPort: Send + Sync {
    async fn get_json(&self, path: &str) -> Result<Value, ApiError>;

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ApiError>;

    async fn post_empty(&self, path: &str) -> Result<Value, ApiError>;

    async fn delete(&self, path: &str) -> Result<Value, ApiError>;
}
