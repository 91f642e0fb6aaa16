//! # Reinhardt Storage Validations
//!
//! Validation rules for file attachments, and the matchers that assert them in
//! tests.
//!
//! An attachment attribute declares validators (content type, size, presence,
//! image dimensions) in code or in TOML. The matchers verify a model's
//! declarations by attaching synthetic files and checking which ones the
//! validators accept, which they reject, and with what message.
//!
//! ## Feature Flags
//!
//! - `matchers` (default) - Declarative test matchers
//! - `full` - All features enabled
//!
//! For the validators and the attachment model alone, depend on the crate
//! with `default-features = false`.
//!
//! ## Quick Example
//!
//! ```
//! use std::sync::Arc;
//! use reinhardt_storage_validations::prelude::*;
//!
//! let schema = ModelSchema::builder("User")
//!     .has_one_attached("avatar", |avatar| {
//!         avatar
//!             .validates(ContentTypeValidator::with_content_types(["image/png", "image/gif"]))
//!             .validates(SizeValidator::less_than(SizeValidator::from_mb(2)).unwrap())
//!     })
//!     .build()
//!     .unwrap();
//! let mut user = Record::new(Arc::new(schema));
//!
//! assert_matches(
//!     &validate_content_type_of("avatar")
//!         .allowing(["image/png"])
//!         .rejecting(["video/mkv"]),
//!     &mut user,
//! );
//! assert_matches(
//!     &validate_size_of("avatar").less_than(SizeValidator::from_mb(2)),
//!     &mut user,
//! );
//! ```

#[cfg(feature = "matchers")]
pub mod matchers;
pub mod validators;

// Re-export the attachment layer
pub use reinhardt_storage_validators::{
	AttachmentModel, ContentTypeSpec, ErrorKind, Model, ModelDefinition, ModelSchema, Record,
	SchemaError, Upload, ValidationError, ValidationErrors, Validator,
	has_content_type_validator,
};

// Re-export matchers
#[cfg(feature = "matchers")]
pub use reinhardt_storage_matchers::{Matcher, Mismatch, Verdict};

/// Re-export commonly used types
pub mod prelude {
	pub use reinhardt_storage_validators::prelude::*;

	#[cfg(feature = "matchers")]
	pub use reinhardt_storage_matchers::prelude::*;
}
