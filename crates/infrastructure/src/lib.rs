//! Infrastructure layer - Storage backends, configuration and demo data

pub mod config;
pub mod dummy;
pub mod keyvalue;
pub mod relational;

pub use config::{BackendKind, FleetConfig};
pub use dummy::{DummyDataGenerator, FleetDataset, GeneratorOptions};
pub use keyvalue::{DynamoTable, KeyValueEntityStore, KeyValueTable, MemoryTable};
pub use relational::SeaOrmEntityStore;
