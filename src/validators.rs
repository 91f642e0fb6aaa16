//! Attachment validators module.
//!
//! Validators, the attachment schema and the schema-driven model.
//!
//! # Examples
//!
//! ```
//! use reinhardt_storage_validations::validators::{SizeValidator, Upload, Validator};
//!
//! let validator = SizeValidator::less_than_or_equal_to(SizeValidator::from_kb(1));
//! assert!(validator.validate(&Upload::synthetic("text/plain").with_byte_size(512)).is_ok());
//! ```

pub use reinhardt_storage_validators::*;
