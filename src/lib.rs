//! PlantHub core: a persistent store for a personal plant collection, a
//! care-task scheduler with streak bookkeeping, a generator that turns
//! catalog care guides into recurring tasks, and a client for the external
//! plant catalog, all exposed over an HTTP API.

pub mod api;
pub mod catalog;
pub mod generator;
pub mod models;
pub mod scheduler;
pub mod store;
