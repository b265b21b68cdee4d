//! # redline-core
//!
//! Core types shared across all redline crates.
//!
//! This crate provides the vocabulary the engine and the CLI agree on:
//! - `ChangeKind`, the four kinds of revision mark
//! - Serializable `Change` and `Comment` entities as presented to users
//! - CLI response types
//! - Timestamp helpers for revision and comment dates
//! - Cross-cutting validation errors

pub mod entities;
pub mod enums;
pub mod errors;
pub mod responses;
pub mod timestamps;
