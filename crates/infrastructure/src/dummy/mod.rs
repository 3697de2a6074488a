//! Demo fleet generation
//!
//! Produces a consistent set of users, robots and telemetry for local
//! development and demos. Records are back-dated, and ids are anchored to
//! each record's timestamp so time-ordered listings work on every backend.

mod generator;
mod pools;

pub use generator::{DummyDataGenerator, FleetDataset, GeneratorOptions};
