//! # autocontext-core
//!
//! Configuration, the static category table, hook payload types, and error
//! handling shared by the autocontext pipeline.

pub mod config;
pub mod error;
pub mod hook;
