use async_trait::async_trait;

use crate::{error::DemandError, scope::Scope, types::Payload};

/// An asynchronous producer bound to a type key. Suppliers are values;
/// any state they need lives in the cache boxes wrapping them.
#[async_trait]
pub trait SupplierPort: Send + Sync {
    async fn supply(&self, payload: Payload, scope: Scope) -> Result<Payload, DemandError>;
}
