//! Data models for the vintage car catalog
//!
//! This module contains the data structures exchanged with the catalog
//! backend. Brands, cars and images arrive read-only; inquiries are built
//! locally, validated and sent once.

pub mod brand;
pub mod car;
pub mod inquiry;
pub mod price;
pub mod validation;

// Re-export main types for convenience
pub use brand::*;
pub use car::*;
pub use inquiry::*;
pub use price::Price;
pub use validation::{FieldErrors, InquiryField, ValidationError, Validators, validate_inquiry};

use uuid::Uuid;

/// Generate a new UUID for model IDs
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
