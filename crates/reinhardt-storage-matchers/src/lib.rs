//! Declarative test matchers for Reinhardt attachment validations
//!
//! A matcher states what an attachment attribute's validators should do and
//! checks it by attaching synthetic files to a model and reading back the
//! errors:
//!
//! - [`validate_content_type_of`]: `allowing`, `rejecting`, `with_message`
//! - [`validate_size_of`]: `less_than`, `less_than_or_equal_to`,
//!   `greater_than`, `greater_than_or_equal_to`, `between`, `with_message`
//! - [`validate_attached_of`]: `with_message`
//! - [`validate_dimensions_of`]: width and height bounds, `with_message`
//!
//! Evaluation stops at the first unmet expectation and reports it in the
//! returned [`Verdict`].
//!
//! # Examples
//!
//! ```
//! use std::sync::{Arc, LazyLock};
//! use reinhardt_storage_matchers::prelude::*;
//! use reinhardt_storage_validators::{ContentTypeValidator, Model, ModelDefinition, ModelSchema};
//!
//! struct Document;
//!
//! static SCHEMA: LazyLock<Arc<ModelSchema>> = LazyLock::new(|| {
//!     Arc::new(
//!         ModelSchema::builder("Document")
//!             .has_one_attached("file", |a| {
//!                 a.validates(
//!                     ContentTypeValidator::with_content_types(["application/pdf"])
//!                         .with_message("PDF only."),
//!                 )
//!             })
//!             .build()
//!             .expect("valid schema"),
//!     )
//! });
//!
//! impl ModelDefinition for Document {
//!     fn schema() -> Arc<ModelSchema> {
//!         SCHEMA.clone()
//!     }
//! }
//!
//! let matcher = validate_content_type_of("file")
//!     .allowing(["application/pdf"])
//!     .rejecting(["image/png"])
//!     .with_message("PDF only.");
//!
//! assert_matches_for::<Model<Document>>(&matcher);
//! ```

pub mod assertions;
pub mod attached;
pub mod content_type;
pub mod dimension;
pub mod logging;
pub mod matcher;
pub mod size;
pub mod verdict;

mod probe;

pub use attached::{AttachedValidatorMatcher, validate_attached_of};
pub use content_type::{
	ContentTypeValidatorMatcher, UNRECOGNIZED_CONTENT_TYPE, validate_content_type_of,
};
pub use dimension::{DimensionValidatorMatcher, validate_dimensions_of};
pub use matcher::Matcher;
pub use size::{SizeValidatorMatcher, validate_size_of};
pub use verdict::{Mismatch, Verdict};

/// Re-export commonly used types
pub mod prelude {
	pub use crate::assertions::*;
	pub use crate::attached::*;
	pub use crate::content_type::*;
	pub use crate::dimension::*;
	pub use crate::matcher::Matcher;
	pub use crate::size::*;
	pub use crate::verdict::*;
}
