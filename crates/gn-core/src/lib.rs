//! # gn-core
//!
//! Core types for the gn record access layer.
//!
//! This crate provides the foundational types shared by the other gn crates:
//! - `Kind`, the closed set of record kinds, with table names and ordered
//!   field-to-column mappings
//! - Record structs for each kind and the `Record` trait that converts them
//!   to and from presence-aware `FieldMap`s
//! - `SqlValue` and typed conversions
//! - Placeholder dialects for parameterized SQL
//! - The before/after diff utility used for audit payloads
//! - Cross-cutting error types

pub mod dialect;
pub mod diff;
pub mod entities;
pub mod errors;
pub mod kinds;
pub mod record;
pub mod values;
