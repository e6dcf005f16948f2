//! The tree-consistency engine.
//!
//! Layered leaves first: [`repository`] (row access) → [`validation`]
//! (batch checks) → [`mutation`] (upserts, cascading deletes, ancestor date
//! propagation) → [`query`] (lookups, change feed, path listing).
//! [`store::TreeStore`] wraps each operation in a transaction.

pub mod arena;
pub mod date;
pub mod mutation;
pub mod node;
pub mod query;
pub mod repository;
pub mod store;
pub mod validation;

pub use node::{Node, NodeType};
pub use repository::{NodeStore, SqliteNodeStore};
pub use store::TreeStore;
