//! Attachment validators for Reinhardt file uploads
//!
//! This crate provides the validators that can be declared on file attachment
//! attributes (content type, size, presence and image dimensions), the
//! schema that records those declarations per model, and a schema-driven
//! model that runs them.
//!
//! Validation never reads file contents: an [`Upload`] carries the declared
//! content type, byte size and image metadata of a file.

pub mod attached;
pub mod config;
pub mod content_type;
pub mod dimension;
pub mod errors;
pub mod model;
pub mod schema;
pub mod size;
pub mod upload;

pub use attached::AttachedValidator;
pub use config::{AttachmentConfig, BoundConfig, SchemaConfig, ValidatorConfig};
pub use content_type::{AllowList, ContentTypeSpec, ContentTypeValidator, mime_for_extension};
pub use dimension::{Axis, DimensionBound, DimensionValidator};
pub use errors::{
	AttachmentError, AttributeError, ErrorKind, SchemaError, SchemaResult, ValidationError,
	ValidationErrors, ValidationResult,
};
pub use model::{
	AttachmentModel, Model, ModelDefinition, Record, has_attached_validator,
	has_content_type_validator, has_dimension_validator, has_size_validator,
};
pub use schema::{
	AttachmentDefinition, Cardinality, ModelSchema, ModelSchemaBuilder, ValidatorKind,
	ValidatorSpec,
};
pub use size::SizeValidator;
pub use upload::{ImageMetadata, Upload};

/// Re-export commonly used types
pub mod prelude {
	pub use crate::attached::*;
	pub use crate::content_type::{AllowList, ContentTypeSpec, ContentTypeValidator};
	pub use crate::dimension::*;
	pub use crate::errors::*;
	pub use crate::model::*;
	pub use crate::schema::*;
	pub use crate::size::*;
	pub use crate::upload::*;
	pub use crate::{CustomMessage, Validator};
}

/// Trait for validators
pub trait Validator<T: ?Sized> {
	fn validate(&self, value: &T) -> ValidationResult<()>;
}

/// Validators whose default error message can be replaced
pub trait CustomMessage {
	/// The replacement message, if one was configured
	fn custom_message(&self) -> Option<&str>;
}
