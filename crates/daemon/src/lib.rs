pub mod catalog;
pub mod lifecycle;
pub mod router;
pub mod server;

pub use catalog::{Catalog, CatalogError, CatalogSeed, demo_seed};
pub use lifecycle::{Daemon, DaemonConfig, LifecycleError};
pub use router::{ApiError, AppState, ErrorBody, StatusInfo, build_router};
pub use server::{Server, ServerError, ShutdownHandle};
