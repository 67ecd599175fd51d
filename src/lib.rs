//! # pgscope
//!
//! A read-only explorer for PostgreSQL schema metadata.
//!
//! The crate exposes a small set of request/response tools over one
//! database: list tables, describe a table's columns, indexes and foreign
//! keys, and generate a Mermaid ER diagram. The diagram merges foreign keys
//! declared as constraints with *virtual* foreign keys inferred from
//! column-naming conventions (`customer_id` pointing at `customers`, and so
//! on), so schemas that skip referential constraints still produce a useful
//! relationship picture.
//!
//! Every tool call opens its own connection from environment-sourced
//! configuration, forces the session read-only, runs its catalog queries
//! and closes the connection before rendering.

pub mod config;
pub mod db;
pub mod diagram;
pub mod infer;
pub mod render;
pub mod tools;
pub mod types;
