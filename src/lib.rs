pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod ports;
pub mod registry;
pub mod scope;
pub mod supplier;
pub mod types;

pub use cache::{with_in_flight_deduplication, with_memoization};
pub use config::{LoggingConfig, LoggingRotation};
pub use engine::{ROOT_KEY, resolve};
pub use error::{
    DemandError, DemandErrorKind, configuration, internal_error, supplier_failure,
    supplier_not_found,
};
pub use logging::{LoggingGuard, init_tracing};
pub use ports::SupplierPort;
pub use registry::{RegistryExtension, SupplierRegistry};
pub use scope::Scope;
pub use supplier::{FnSupplier, supplier_fn, typed_supplier};
pub use types::{Payload, Supplier, TypeKey};
