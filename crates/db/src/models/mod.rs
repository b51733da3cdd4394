//! Row shapes for the four backend tables and their write DTOs.
//!
//! Embedded relations arrive under the related table's name (`projects`,
//! `profiles`) and are renamed to what they represent when serialized
//! into view models.

pub mod comment;
pub mod profile;
pub mod project;
pub mod task;
