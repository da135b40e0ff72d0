//! Storage layer for the garden journal: configuration, connection pool,
//! embedded migrations, typed models and query functions.

pub mod config;
pub mod models;
pub mod pool;
pub mod queries;
