//! Attachment declarations of a model
//!
//! A [`ModelSchema`] lists the attachment attributes of a model together with
//! the validators declared on each of them.
//!
//! # Examples
//!
//! ```
//! use reinhardt_storage_validators::{
//!     AttachedValidator, ContentTypeValidator, ModelSchema, SizeValidator,
//! };
//!
//! let schema = ModelSchema::builder("User")
//!     .has_one_attached("avatar", |avatar| {
//!         avatar
//!             .validates(AttachedValidator::new())
//!             .validates(ContentTypeValidator::with_content_types(["image/png", "image/jpeg"]))
//!             .validates(SizeValidator::less_than_or_equal_to(SizeValidator::from_mb(5)))
//!     })
//!     .has_many_attached("documents", |documents| documents)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(schema.name(), "User");
//! assert_eq!(schema.attachment("avatar").map(|a| a.validators().len()), Some(3));
//! assert!(schema.attachment("documents").is_some());
//! ```

use indexmap::IndexMap;

use crate::{
	AttachedValidator, AttributeError, ContentTypeValidator, CustomMessage, DimensionValidator,
	SchemaError, SchemaResult, SizeValidator, Upload, Validator,
};

/// Kind of a declared validator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidatorKind {
	ContentType,
	Size,
	Attached,
	Dimension,
}

impl std::fmt::Display for ValidatorKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			Self::ContentType => "content type",
			Self::Size => "size",
			Self::Attached => "attached",
			Self::Dimension => "dimension",
		};
		f.write_str(name)
	}
}

/// A validator declared on an attachment attribute
#[derive(Debug, Clone)]
pub enum ValidatorSpec {
	ContentType(ContentTypeValidator),
	Size(SizeValidator),
	Attached(AttachedValidator),
	Dimension(DimensionValidator),
}

impl ValidatorSpec {
	pub fn kind(&self) -> ValidatorKind {
		match self {
			Self::ContentType(_) => ValidatorKind::ContentType,
			Self::Size(_) => ValidatorKind::Size,
			Self::Attached(_) => ValidatorKind::Attached,
			Self::Dimension(_) => ValidatorKind::Dimension,
		}
	}

	/// Validate the files currently attached to an attribute
	pub fn run(&self, uploads: &[Upload]) -> Vec<AttributeError> {
		match self {
			Self::ContentType(validator) => per_upload(validator, uploads),
			Self::Size(validator) => per_upload(validator, uploads),
			Self::Attached(validator) => validator
				.validate(uploads)
				.err()
				.map(|error| AttributeError::from_validation(&error, validator.custom_message()))
				.into_iter()
				.collect(),
			Self::Dimension(validator) => uploads
				.iter()
				.flat_map(|upload| validator.violations(upload))
				.map(|error| AttributeError::from_validation(&error, validator.custom_message()))
				.collect(),
		}
	}
}

fn per_upload<V>(validator: &V, uploads: &[Upload]) -> Vec<AttributeError>
where
	V: Validator<Upload> + CustomMessage,
{
	uploads
		.iter()
		.filter_map(|upload| validator.validate(upload).err())
		.map(|error| AttributeError::from_validation(&error, validator.custom_message()))
		.collect()
}

impl From<ContentTypeValidator> for ValidatorSpec {
	fn from(validator: ContentTypeValidator) -> Self {
		Self::ContentType(validator)
	}
}

impl From<SizeValidator> for ValidatorSpec {
	fn from(validator: SizeValidator) -> Self {
		Self::Size(validator)
	}
}

impl From<AttachedValidator> for ValidatorSpec {
	fn from(validator: AttachedValidator) -> Self {
		Self::Attached(validator)
	}
}

impl From<DimensionValidator> for ValidatorSpec {
	fn from(validator: DimensionValidator) -> Self {
		Self::Dimension(validator)
	}
}

/// Whether an attribute holds a single file or a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
	One,
	Many,
}

/// One attachment attribute and its validators
#[derive(Debug, Clone)]
pub struct AttachmentDefinition {
	name: String,
	cardinality: Cardinality,
	validators: Vec<ValidatorSpec>,
}

impl AttachmentDefinition {
	pub fn new(name: impl Into<String>, cardinality: Cardinality) -> Self {
		Self {
			name: name.into(),
			cardinality,
			validators: Vec::new(),
		}
	}

	/// Declare a validator on this attribute
	pub fn validates(mut self, validator: impl Into<ValidatorSpec>) -> Self {
		self.validators.push(validator.into());
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn cardinality(&self) -> Cardinality {
		self.cardinality
	}

	pub fn validators(&self) -> &[ValidatorSpec] {
		&self.validators
	}
}

/// Attachment attributes of a model, in declaration order
#[derive(Debug, Clone)]
pub struct ModelSchema {
	name: String,
	attachments: IndexMap<String, AttachmentDefinition>,
}

impl ModelSchema {
	pub fn builder(name: impl Into<String>) -> ModelSchemaBuilder {
		ModelSchemaBuilder {
			name: name.into(),
			attachments: Vec::new(),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn attachment(&self, attribute: &str) -> Option<&AttachmentDefinition> {
		self.attachments.get(attribute)
	}

	pub fn attachments(&self) -> impl Iterator<Item = &AttachmentDefinition> {
		self.attachments.values()
	}
}

/// Builder for [`ModelSchema`]
#[derive(Debug)]
pub struct ModelSchemaBuilder {
	name: String,
	attachments: Vec<AttachmentDefinition>,
}

impl ModelSchemaBuilder {
	/// Declare a single-file attachment
	pub fn has_one_attached<F>(self, name: impl Into<String>, declare: F) -> Self
	where
		F: FnOnce(AttachmentDefinition) -> AttachmentDefinition,
	{
		self.attachment(declare(AttachmentDefinition::new(name, Cardinality::One)))
	}

	/// Declare a multi-file attachment
	pub fn has_many_attached<F>(self, name: impl Into<String>, declare: F) -> Self
	where
		F: FnOnce(AttachmentDefinition) -> AttachmentDefinition,
	{
		self.attachment(declare(AttachmentDefinition::new(name, Cardinality::Many)))
	}

	pub fn attachment(mut self, definition: AttachmentDefinition) -> Self {
		self.attachments.push(definition);
		self
	}

	/// # Errors
	///
	/// Returns [`SchemaError::DuplicateAttachment`] if an attribute is declared twice.
	pub fn build(self) -> SchemaResult<ModelSchema> {
		let mut attachments = IndexMap::with_capacity(self.attachments.len());
		for definition in self.attachments {
			if attachments.contains_key(definition.name()) {
				return Err(SchemaError::DuplicateAttachment(definition.name));
			}
			attachments.insert(definition.name.clone(), definition);
		}
		Ok(ModelSchema {
			name: self.name,
			attachments,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ErrorKind;
	use rstest::rstest;

	#[rstest]
	fn test_duplicate_attachment_is_rejected() {
		let result = ModelSchema::builder("User")
			.has_one_attached("avatar", |a| a)
			.has_many_attached("avatar", |a| a)
			.build();

		assert!(matches!(result, Err(SchemaError::DuplicateAttachment(name)) if name == "avatar"));
	}

	#[rstest]
	fn test_declaration_order_is_kept() {
		let schema = ModelSchema::builder("Post")
			.has_one_attached("cover", |a| a)
			.has_many_attached("gallery", |a| a)
			.has_one_attached("attachment", |a| a)
			.build()
			.unwrap();

		let names: Vec<_> = schema.attachments().map(AttachmentDefinition::name).collect();
		assert_eq!(names, vec!["cover", "gallery", "attachment"]);
		assert_eq!(
			schema.attachment("gallery").map(AttachmentDefinition::cardinality),
			Some(Cardinality::Many)
		);
	}

	#[rstest]
	fn test_run_tags_errors_by_kind() {
		// Arrange
		let content_type: ValidatorSpec = ContentTypeValidator::with_content_types(["image/png"])
			.with_message("Not authorized file type.")
			.into();
		let attached: ValidatorSpec = AttachedValidator::new().into();
		let uploads = vec![Upload::synthetic("image/png"), Upload::synthetic("video/mkv")];

		// Act
		let content_type_errors = content_type.run(&uploads);
		let attached_errors = attached.run(&[]);

		// Assert
		assert_eq!(
			content_type_errors,
			vec![AttributeError {
				kind: ErrorKind::ContentType,
				message: "Not authorized file type.".to_string(),
			}]
		);
		assert_eq!(attached_errors.len(), 1);
		assert_eq!(attached_errors[0].kind, ErrorKind::Attached);
	}

	#[rstest]
	fn test_file_validators_skip_blank_attachments() {
		let size: ValidatorSpec = SizeValidator::greater_than_or_equal_to(10).into();
		let dimension: ValidatorSpec = DimensionValidator::new().width(10).into();

		assert!(size.run(&[]).is_empty());
		assert!(dimension.run(&[]).is_empty());
		assert_eq!(size.kind(), ValidatorKind::Size);
		assert_eq!(dimension.kind(), ValidatorKind::Dimension);
	}
}
