pub mod alignment;
pub mod config;
pub mod policy;
pub mod record;

pub use alignment::{AlignmentQuery, AlignmentResult};
pub use config::{
    CatalogOfLifeConfig, Config, LoggingConfig, PlantsOfTheWorldConfig, PolicyConfig,
    ReconcileConfig, ReferenceConfig, TnrsConfig, WebConfig,
};
pub use policy::{AlignmentSource, AuthChangePolicy, Kingdom, NameChangePolicy};
pub use record::{AlignedName, TaxonRecord, UNASSIGNED_SPECIMEN};
