//! Attachment models
//!
//! [`AttachmentModel`] is the seam between validation and whatever stores the
//! attachments. [`Record`] implements it from a [`ModelSchema`], and
//! [`Model`] gives a statically declared schema a `Default` constructor so a
//! blank instance can be created from the type alone.
//!
//! # Examples
//!
//! ```
//! use std::sync::{Arc, LazyLock};
//! use reinhardt_storage_validators::{
//!     AttachmentModel, ContentTypeValidator, Model, ModelDefinition, ModelSchema, Upload,
//! };
//!
//! struct Avatar;
//!
//! static SCHEMA: LazyLock<Arc<ModelSchema>> = LazyLock::new(|| {
//!     Arc::new(
//!         ModelSchema::builder("Avatar")
//!             .has_one_attached("image", |a| {
//!                 a.validates(ContentTypeValidator::with_content_types(["image/png"]))
//!             })
//!             .build()
//!             .expect("valid schema"),
//!     )
//! });
//!
//! impl ModelDefinition for Avatar {
//!     fn schema() -> Arc<ModelSchema> {
//!         SCHEMA.clone()
//!     }
//! }
//!
//! let mut avatar = Model::<Avatar>::default();
//! avatar.attach("image", Upload::synthetic("image/gif")).unwrap();
//!
//! assert!(!avatar.validate());
//! assert_eq!(avatar.errors().get("image").len(), 1);
//! ```

use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use indexmap::IndexMap;

use crate::{
	AttachedValidator, AttachmentError, Cardinality, ContentTypeSpec, DimensionValidator,
	ModelSchema, SizeValidator, Upload, ValidationErrors, ValidatorSpec,
};

/// A model with file attachment attributes
pub trait AttachmentModel {
	/// Name used in diagnostics
	fn model_name(&self) -> &str;

	/// Validators declared on `attribute`, or `None` if it is not an attachment
	fn validator_specs(&self, attribute: &str) -> Option<&[ValidatorSpec]>;

	/// Attach `upload` to `attribute`
	///
	/// Single-file attributes replace their current file; multi-file
	/// attributes append.
	fn attach(&mut self, attribute: &str, upload: Upload) -> Result<(), AttachmentError>;

	/// Remove every file attached to `attribute`
	fn detach(&mut self, attribute: &str) -> Result<(), AttachmentError>;

	/// Files attached to `attribute`, empty for unknown attributes
	fn attachments(&self, attribute: &str) -> &[Upload];

	/// Run every declared validator, replacing previous errors
	///
	/// Returns `true` when no errors were recorded.
	fn validate(&mut self) -> bool;

	/// Errors recorded by the last [`validate`](Self::validate) call
	fn errors(&self) -> &ValidationErrors;

	fn declares_attachment(&self, attribute: &str) -> bool {
		self.validator_specs(attribute).is_some()
	}
}

/// Content type validation declared on `attribute`, if any
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use reinhardt_storage_validators::{
///     AllowList, ContentTypeValidator, ModelSchema, Record, has_content_type_validator,
/// };
///
/// let schema = ModelSchema::builder("Document")
///     .has_one_attached("file", |a| {
///         a.validates(ContentTypeValidator::with_content_types(["application/pdf"]))
///     })
///     .has_one_attached("notes", |a| a)
///     .build()
///     .unwrap();
/// let record = Record::new(Arc::new(schema));
///
/// let spec = has_content_type_validator(&record, "file").unwrap();
/// assert_eq!(spec.allow_list, AllowList::Types(vec!["application/pdf".to_string()]));
/// assert!(has_content_type_validator(&record, "notes").is_none());
/// assert!(has_content_type_validator(&record, "missing").is_none());
/// ```
pub fn has_content_type_validator(
	model: &dyn AttachmentModel,
	attribute: &str,
) -> Option<ContentTypeSpec> {
	model
		.validator_specs(attribute)?
		.iter()
		.find_map(|spec| match spec {
			ValidatorSpec::ContentType(validator) => Some(validator.spec()),
			_ => None,
		})
}

/// Size validation declared on `attribute`, if any
pub fn has_size_validator<'a>(
	model: &'a dyn AttachmentModel,
	attribute: &str,
) -> Option<&'a SizeValidator> {
	model
		.validator_specs(attribute)?
		.iter()
		.find_map(|spec| match spec {
			ValidatorSpec::Size(validator) => Some(validator),
			_ => None,
		})
}

/// Presence validation declared on `attribute`, if any
pub fn has_attached_validator<'a>(
	model: &'a dyn AttachmentModel,
	attribute: &str,
) -> Option<&'a AttachedValidator> {
	model
		.validator_specs(attribute)?
		.iter()
		.find_map(|spec| match spec {
			ValidatorSpec::Attached(validator) => Some(validator),
			_ => None,
		})
}

/// Dimension validation declared on `attribute`, if any
pub fn has_dimension_validator<'a>(
	model: &'a dyn AttachmentModel,
	attribute: &str,
) -> Option<&'a DimensionValidator> {
	model
		.validator_specs(attribute)?
		.iter()
		.find_map(|spec| match spec {
			ValidatorSpec::Dimension(validator) => Some(validator),
			_ => None,
		})
}

/// Schema-driven [`AttachmentModel`]
#[derive(Debug, Clone)]
pub struct Record {
	schema: Arc<ModelSchema>,
	attachments: IndexMap<String, Vec<Upload>>,
	errors: ValidationErrors,
}

impl Record {
	/// Create a blank record: nothing attached, no errors
	pub fn new(schema: Arc<ModelSchema>) -> Self {
		Self {
			schema,
			attachments: IndexMap::new(),
			errors: ValidationErrors::new(),
		}
	}

	pub fn schema(&self) -> &ModelSchema {
		&self.schema
	}

	fn unknown(&self, attribute: &str) -> AttachmentError {
		AttachmentError::UnknownAttribute {
			model: self.schema.name().to_string(),
			attribute: attribute.to_string(),
		}
	}
}

impl AttachmentModel for Record {
	fn model_name(&self) -> &str {
		self.schema.name()
	}

	fn validator_specs(&self, attribute: &str) -> Option<&[ValidatorSpec]> {
		self.schema
			.attachment(attribute)
			.map(|definition| definition.validators())
	}

	fn attach(&mut self, attribute: &str, upload: Upload) -> Result<(), AttachmentError> {
		let cardinality = self
			.schema
			.attachment(attribute)
			.map(|definition| definition.cardinality())
			.ok_or_else(|| self.unknown(attribute))?;

		tracing::trace!(
			model = %self.schema.name(),
			attribute,
			content_type = %upload.content_type,
			byte_size = upload.byte_size,
			"attaching upload"
		);

		let files = self.attachments.entry(attribute.to_string()).or_default();
		if cardinality == Cardinality::One {
			files.clear();
		}
		files.push(upload);
		Ok(())
	}

	fn detach(&mut self, attribute: &str) -> Result<(), AttachmentError> {
		if self.schema.attachment(attribute).is_none() {
			return Err(self.unknown(attribute));
		}
		self.attachments.shift_remove(attribute);
		Ok(())
	}

	fn attachments(&self, attribute: &str) -> &[Upload] {
		self.attachments
			.get(attribute)
			.map(Vec::as_slice)
			.unwrap_or(&[])
	}

	fn validate(&mut self) -> bool {
		self.errors.clear();

		for definition in self.schema.attachments() {
			let uploads = self
				.attachments
				.get(definition.name())
				.map(Vec::as_slice)
				.unwrap_or(&[]);
			for spec in definition.validators() {
				for error in spec.run(uploads) {
					self.errors.add(definition.name(), error);
				}
			}
		}

		tracing::debug!(
			model = %self.schema.name(),
			errors = self.errors.len(),
			"validated attachments"
		);
		self.errors.is_empty()
	}

	fn errors(&self) -> &ValidationErrors {
		&self.errors
	}
}

/// Statically declared attachment schema of a model type
pub trait ModelDefinition {
	fn schema() -> Arc<ModelSchema>;
}

/// [`Record`] bound to a [`ModelDefinition`]
pub struct Model<D> {
	record: Record,
	definition: PhantomData<fn() -> D>,
}

impl<D: ModelDefinition> Model<D> {
	pub fn new() -> Self {
		Self {
			record: Record::new(D::schema()),
			definition: PhantomData,
		}
	}
}

impl<D: ModelDefinition> Default for Model<D> {
	fn default() -> Self {
		Self::new()
	}
}

impl<D> Clone for Model<D> {
	fn clone(&self) -> Self {
		Self {
			record: self.record.clone(),
			definition: PhantomData,
		}
	}
}

impl<D> std::fmt::Debug for Model<D> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("Model").field(&self.record).finish()
	}
}

impl<D> Deref for Model<D> {
	type Target = Record;

	fn deref(&self) -> &Record {
		&self.record
	}
}

impl<D> DerefMut for Model<D> {
	fn deref_mut(&mut self) -> &mut Record {
		&mut self.record
	}
}

impl<D> AttachmentModel for Model<D> {
	fn model_name(&self) -> &str {
		self.record.model_name()
	}

	fn validator_specs(&self, attribute: &str) -> Option<&[ValidatorSpec]> {
		self.record.validator_specs(attribute)
	}

	fn attach(&mut self, attribute: &str, upload: Upload) -> Result<(), AttachmentError> {
		self.record.attach(attribute, upload)
	}

	fn detach(&mut self, attribute: &str) -> Result<(), AttachmentError> {
		self.record.detach(attribute)
	}

	fn attachments(&self, attribute: &str) -> &[Upload] {
		self.record.attachments(attribute)
	}

	fn validate(&mut self) -> bool {
		self.record.validate()
	}

	fn errors(&self) -> &ValidationErrors {
		self.record.errors()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{ContentTypeValidator, ErrorKind};
	use rstest::{fixture, rstest};

	#[fixture]
	fn record() -> Record {
		let schema = ModelSchema::builder("Post")
			.has_one_attached("cover", |a| {
				a.validates(AttachedValidator::new())
					.validates(ContentTypeValidator::with_content_types(["image/png"]))
			})
			.has_many_attached("files", |a| {
				a.validates(SizeValidator::less_than_or_equal_to(100))
			})
			.build()
			.unwrap();
		Record::new(Arc::new(schema))
	}

	#[rstest]
	fn test_blank_record_reports_presence(mut record: Record) {
		// Act
		let valid = record.validate();

		// Assert
		assert!(!valid);
		assert!(record.errors().has_error("cover", ErrorKind::Attached));
		assert!(record.errors().get("files").is_empty());
	}

	#[rstest]
	fn test_has_one_replaces_and_has_many_appends(mut record: Record) {
		// Act
		record.attach("cover", Upload::synthetic("image/png")).unwrap();
		record.attach("cover", Upload::synthetic("image/gif")).unwrap();
		record.attach("files", Upload::synthetic("text/plain")).unwrap();
		record.attach("files", Upload::synthetic("text/csv")).unwrap();

		// Assert
		assert_eq!(record.attachments("cover").len(), 1);
		assert_eq!(record.attachments("cover")[0].content_type, "image/gif");
		assert_eq!(record.attachments("files").len(), 2);
	}

	#[rstest]
	fn test_validate_replaces_previous_errors(mut record: Record) {
		// Arrange
		record.attach("cover", Upload::synthetic("video/mkv")).unwrap();
		assert!(!record.validate());
		assert!(record.errors().has_error("cover", ErrorKind::ContentType));

		// Act
		record.attach("cover", Upload::synthetic("image/png")).unwrap();
		let valid = record.validate();

		// Assert
		assert!(valid);
		assert!(record.errors().is_empty());
	}

	#[rstest]
	fn test_every_upload_of_many_is_validated(mut record: Record) {
		record.attach("cover", Upload::synthetic("image/png")).unwrap();
		record
			.attach("files", Upload::synthetic("text/plain").with_byte_size(10))
			.unwrap();
		record
			.attach("files", Upload::synthetic("text/plain").with_byte_size(1000))
			.unwrap();

		assert!(!record.validate());
		assert_eq!(record.errors().messages_for("files", &[ErrorKind::Size]).len(), 1);
	}

	#[rstest]
	fn test_unknown_attribute(mut record: Record) {
		let result = record.attach("missing", Upload::synthetic("image/png"));

		assert_eq!(
			result,
			Err(AttachmentError::UnknownAttribute {
				model: "Post".to_string(),
				attribute: "missing".to_string(),
			})
		);
		assert!(record.detach("missing").is_err());
		assert!(record.attachments("missing").is_empty());
		assert!(!record.declares_attachment("missing"));
	}

	#[rstest]
	fn test_detach_clears_attribute(mut record: Record) {
		record.attach("cover", Upload::synthetic("image/png")).unwrap();

		record.detach("cover").unwrap();

		assert!(record.attachments("cover").is_empty());
	}

	#[rstest]
	fn test_capability_queries(record: Record) {
		assert!(has_content_type_validator(&record, "cover").is_some());
		assert!(has_attached_validator(&record, "cover").is_some());
		assert!(has_size_validator(&record, "cover").is_none());
		assert_eq!(
			has_size_validator(&record, "files").and_then(SizeValidator::max_bytes),
			Some(100)
		);
		assert!(has_dimension_validator(&record, "files").is_none());
	}
}
