//! # Policy Validator
//!
//! **Component:** 2
//!
//! ## Purpose
//!
//! Decides whether the fields of a wipe request are acceptable before any
//! rate-limit slot or confirmation prompt is spent on them.
//!
//! ## Rules
//!
//! | Field | Check |
//! |-------|-------|
//! | `drive` | configured rule, then [`is_safe_path`] |
//! | `method` | exactly `sanitize` or `overwrite` (case-sensitive) |
//! | `username` | configured rule |
//! | `password` | configured rule |
//!
//! A field fails when it is missing or empty, not a string, shorter than
//! `min_length`, longer than `max_length`, or does not match `pattern`.
//! A ruled field with no configured rule fails closed.

pub mod domain;
pub mod service;

pub use domain::{
    is_safe_path, FieldKind, FieldRule, ValidatedFields, ValidationConfig, ValidationError,
    WipeFields,
};
pub use service::PolicyValidator;
