pub mod catalog;
pub mod directory;
pub mod seed;
pub mod symptoms;

pub use catalog::{Catalog, CatalogSource, InMemoryCatalog, JsonFileCatalog, SeedCatalog};
pub use directory::ProviderDirectory;
pub use symptoms::{resolve_complaint, BodyPart};
