//! Test matchers module.
//!
//! Declarative matchers for asserting the validations of attachment attributes.
//!
//! # Examples
//!
//! ```
//! use reinhardt_storage_validations::matchers::{Matcher, validate_content_type_of};
//!
//! let matcher = validate_content_type_of("avatar").allowing(["image/png"]);
//! assert_eq!(
//!     matcher.description(),
//!     "validate the content type of `avatar` allowing image/png"
//! );
//! ```

pub use reinhardt_storage_matchers::*;
