pub mod catalog;
pub mod directory;
pub mod filter;
pub mod query;
pub mod session;
pub mod suggest;

pub use catalog::{CatalogState, DoctorCatalog, DoctorSource, HttpDoctorSource, StaticDoctorSource};
pub use directory::DirectoryService;
pub use session::DirectorySession;
