use anyhow::{Context, Result};
use domain::EntityStore;
use infrastructure::{
    BackendKind, DynamoTable, FleetConfig, KeyValueEntityStore, MemoryTable, SeaOrmEntityStore,
};
use std::sync::Arc;
use tracing::info;

/// The store selected by configuration, opened once per process
pub enum FleetBackend {
    Sqlite(SeaOrmEntityStore),
    Dynamodb(KeyValueEntityStore<DynamoTable>),
    Memory(KeyValueEntityStore<MemoryTable>),
}

impl FleetBackend {
    pub async fn open(config: &FleetConfig) -> Result<Self> {
        Self::open_as(config, config.backend).await
    }

    /// Open `kind` using its section of the configuration
    pub async fn open_as(config: &FleetConfig, kind: BackendKind) -> Result<Self> {
        match kind {
            BackendKind::Sqlite => {
                let store = SeaOrmEntityStore::connect(&config.sqlite.url)
                    .await
                    .with_context(|| format!("Failed to open SQLite at {}", config.sqlite.url))?;
                Ok(Self::Sqlite(store))
            }
            BackendKind::Dynamodb => {
                let dynamo = &config.dynamodb;
                let table = DynamoTable::connect(
                    &dynamo.region,
                    dynamo.endpoint_url.as_deref(),
                    &dynamo.table_name,
                )
                .await;
                Ok(Self::Dynamodb(KeyValueEntityStore::new(table)))
            }
            BackendKind::Memory => {
                info!("Using in-memory store; data is lost on exit");
                Ok(Self::Memory(KeyValueEntityStore::new(MemoryTable::new())))
            }
        }
    }

    pub fn kind(&self) -> BackendKind {
        match self {
            Self::Sqlite(_) => BackendKind::Sqlite,
            Self::Dynamodb(_) => BackendKind::Dynamodb,
            Self::Memory(_) => BackendKind::Memory,
        }
    }

    /// Make sure the schema exists. SQLite migrations already ran on open.
    pub async fn init(&self) -> Result<()> {
        match self {
            Self::Sqlite(_) => info!("✅ SQLite schema is up to date"),
            Self::Dynamodb(store) => {
                store.table().create_table().await?;
            }
            Self::Memory(_) => info!("In-memory store needs no setup"),
        }
        Ok(())
    }

    pub fn into_store(self) -> Arc<dyn EntityStore> {
        match self {
            Self::Sqlite(store) => Arc::new(store),
            Self::Dynamodb(store) => Arc::new(store),
            Self::Memory(store) => Arc::new(store),
        }
    }
}
