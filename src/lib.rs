//! Extracts the tables, views and columns of a set of database schemas into
//! a nested, serializable description.

pub mod catalog;
pub mod config;
pub mod connector;
pub mod db;
pub mod extract;
pub mod report;
pub mod service;

pub use catalog::DatabaseDescription;
