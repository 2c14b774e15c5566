use crate::{
    error::{DemandError, supplier_not_found},
    registry::{RegistryExtension, SupplierRegistry},
    types::Payload,
};

/// Handle bound to one registry snapshot; the sole means of recursive
/// resolution from inside a supplier body. A fresh scope is built for
/// every demand, so extensions are visible only to the subtree rooted
/// at that call and never to sibling demands.
#[derive(Clone)]
pub struct Scope {
    registry: SupplierRegistry,
}

impl Scope {
    pub(crate) fn new(registry: SupplierRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &SupplierRegistry {
        &self.registry
    }

    pub async fn demand(
        &self,
        key: &str,
        payload: Payload,
        extension: Option<RegistryExtension>,
    ) -> Result<Payload, DemandError> {
        let effective = match extension {
            Some(extension) => self.registry.apply(&extension),
            None => self.registry.clone(),
        };

        let Some(supplier) = effective.get(key) else {
            tracing::debug!(
                target: "demandflow",
                key = %key,
                suppliers = effective.len(),
                "supplier_not_found"
            );
            return Err(supplier_not_found(key));
        };

        tracing::trace!(
            target: "demandflow",
            key = %key,
            suppliers = effective.len(),
            "demand_dispatch"
        );
        supplier.supply(payload, Scope::new(effective)).await
    }
}
