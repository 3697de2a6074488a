//! Relational backend (SQLite through SeaORM)

pub mod entities;
mod store;
mod table;

pub use store::SeaOrmEntityStore;
pub use table::FleetTable;
