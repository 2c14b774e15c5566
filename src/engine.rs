use crate::{
    error::DemandError,
    registry::{RegistryExtension, SupplierRegistry},
    scope::Scope,
    types::{Payload, Supplier},
};

/// Reserved sentinel key the root supplier is registered under.
pub const ROOT_KEY: &str = "$$root";

/// Entry point: registers `root` under the reserved key via a scoped
/// extension and performs the first demand with a null payload against
/// the host-supplied initial registry.
pub async fn resolve(root: Supplier, initial: SupplierRegistry) -> Result<Payload, DemandError> {
    tracing::debug!(
        target: "demandflow",
        suppliers = initial.len(),
        "resolution_started"
    );
    let extension = RegistryExtension::new().with_supplier(ROOT_KEY, root);
    let outcome = Scope::new(initial)
        .demand(ROOT_KEY, Payload::Null, Some(extension))
        .await;
    match &outcome {
        Ok(_) => tracing::debug!(target: "demandflow", "resolution_completed"),
        Err(err) => tracing::debug!(
            target: "demandflow",
            kind = ?err.kind,
            key = err.key.as_deref(),
            "resolution_failed"
        ),
    }
    outcome
}
