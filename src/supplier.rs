use std::{future::Future, sync::Arc};

use async_trait::async_trait;
use futures_core::future::BoxFuture;
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    error::{DemandError, configuration, internal_error},
    ports::SupplierPort,
    scope::Scope,
    types::{Payload, Supplier},
};

type SupplierHandler =
    dyn Fn(Payload, Scope) -> BoxFuture<'static, Result<Payload, DemandError>> + Send + Sync;

/// Adapter exposing a plain async closure as a supplier.
pub struct FnSupplier {
    handler: Arc<SupplierHandler>,
}

impl FnSupplier {
    pub fn new(handler: Arc<SupplierHandler>) -> Self {
        Self { handler }
    }
}

#[async_trait]
impl SupplierPort for FnSupplier {
    async fn supply(&self, payload: Payload, scope: Scope) -> Result<Payload, DemandError> {
        (self.handler)(payload, scope).await
    }
}

pub fn supplier_fn<F, Fut>(handler: F) -> Supplier
where
    F: Fn(Payload, Scope) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Payload, DemandError>> + Send + 'static,
{
    Arc::new(FnSupplier::new(Arc::new(
        move |payload, scope| -> BoxFuture<'static, Result<Payload, DemandError>> {
            Box::pin(handler(payload, scope))
        },
    )))
}

/// Wraps a supplier over serde-typed input/output. A payload that does
/// not deserialize into `I` yields a recoverable `Configuration` error
/// instead of aborting the resolution.
pub fn typed_supplier<I, O, F, Fut>(handler: F) -> Supplier
where
    I: DeserializeOwned + Send + 'static,
    O: Serialize + Send + 'static,
    F: Fn(I, Scope) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<O, DemandError>> + Send + 'static,
{
    let handler = Arc::new(handler);
    supplier_fn(move |payload, scope| {
        let handler = Arc::clone(&handler);
        async move {
            let input: I = serde_json::from_value(payload).map_err(|err| {
                configuration(format!("payload does not match supplier input type: {err}"))
            })?;
            let output = handler(input, scope).await?;
            serde_json::to_value(output)
                .map_err(|err| internal_error(format!("failed to serialize supplier output: {err}")))
        }
    })
}
