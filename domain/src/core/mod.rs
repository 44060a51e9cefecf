//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: generation backend identifier
//! - [`error::DomainError`]: domain-level errors
//! - [`string`]: text helpers used for previews

pub mod error;
pub mod model;
pub mod string;
