//! Folder and card library
//!
//! This module provides:
//! - Data models for the persisted document (folders owning cards)
//! - Whole-document JSON persistence with full-state overwrite semantics
//! - Folder/card CRUD with validation and level sanitation

pub mod models;
pub mod storage;

pub use models::*;
pub use storage::{EditResetPolicy, LibraryStorage, LibraryStorageError};
