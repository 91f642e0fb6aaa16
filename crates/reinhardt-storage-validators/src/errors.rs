//! Error types for attachment validation
//!
//! [`ValidationError`] is what a single validator reports for a single upload.
//! Its `Display` output is the default error message. A record collects those
//! into [`ValidationErrors`], keyed by attribute and tagged with an
//! [`ErrorKind`] so callers can tell which validator produced each message.

use indexmap::IndexMap;
use std::fmt;
use thiserror::Error;

use crate::dimension::Axis;

/// Error reported by an attachment validator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
	#[error("has an invalid content type ({content_type}), allowed: {allowed}")]
	InvalidContentType {
		content_type: String,
		allowed: String,
	},
	#[error("file size must be greater than or equal to {min_bytes} bytes (current size is {size_bytes} bytes)")]
	FileSizeTooSmall { size_bytes: u64, min_bytes: u64 },
	#[error("file size must be less than or equal to {max_bytes} bytes (current size is {size_bytes} bytes)")]
	FileSizeTooLarge { size_bytes: u64, max_bytes: u64 },
	#[error("can't be blank")]
	Blank,
	#[error("{axis} must be equal to {expected} pixels (current {axis} is {actual})")]
	DimensionNotEqual { axis: Axis, actual: u32, expected: u32 },
	#[error("{axis} must be greater than or equal to {min} pixels (current {axis} is {actual})")]
	DimensionTooSmall { axis: Axis, actual: u32, min: u32 },
	#[error("{axis} must be less than or equal to {max} pixels (current {axis} is {actual})")]
	DimensionTooLarge { axis: Axis, actual: u32, max: u32 },
	#[error("is not a valid image")]
	MetadataMissing,
}

impl ValidationError {
	/// The kind of validator that reports this error
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::InvalidContentType { .. } => ErrorKind::ContentType,
			Self::FileSizeTooSmall { .. } | Self::FileSizeTooLarge { .. } => ErrorKind::Size,
			Self::Blank => ErrorKind::Attached,
			Self::DimensionNotEqual { axis, .. }
			| Self::DimensionTooSmall { axis, .. }
			| Self::DimensionTooLarge { axis, .. } => match axis {
				Axis::Width => ErrorKind::Width,
				Axis::Height => ErrorKind::Height,
			},
			Self::MetadataMissing => ErrorKind::ImageMetadata,
		}
	}
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Which check produced an [`AttributeError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	ContentType,
	Size,
	Attached,
	Width,
	Height,
	ImageMetadata,
}

impl ErrorKind {
	/// Errors a dimension validator can report
	pub const DIMENSION: [ErrorKind; 3] = [Self::Width, Self::Height, Self::ImageMetadata];
}

impl fmt::Display for ErrorKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::ContentType => "content_type",
			Self::Size => "size",
			Self::Attached => "attached",
			Self::Width => "width",
			Self::Height => "height",
			Self::ImageMetadata => "image_metadata",
		};
		f.write_str(name)
	}
}

/// A single error recorded against an attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeError {
	pub kind: ErrorKind,
	pub message: String,
}

impl AttributeError {
	/// Build an error from a validator failure, preferring the validator's
	/// custom message over the default one.
	pub fn from_validation(error: &ValidationError, custom_message: Option<&str>) -> Self {
		Self {
			kind: error.kind(),
			message: custom_message
				.map(str::to_string)
				.unwrap_or_else(|| error.to_string()),
		}
	}
}

/// Errors collected by a validation run, keyed by attribute name
///
/// Attribute order follows the order in which errors were first added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
	errors: IndexMap<String, Vec<AttributeError>>,
}

impl ValidationErrors {
	pub fn new() -> Self {
		Self::default()
	}

	/// Record an error against `attribute`
	pub fn add(&mut self, attribute: impl Into<String>, error: AttributeError) {
		self.errors.entry(attribute.into()).or_default().push(error);
	}

	/// All errors recorded against `attribute`
	pub fn get(&self, attribute: &str) -> &[AttributeError] {
		self.errors.get(attribute).map(Vec::as_slice).unwrap_or(&[])
	}

	/// Messages recorded against `attribute` whose kind is one of `kinds`
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_storage_validators::{AttributeError, ErrorKind, ValidationErrors};
	///
	/// let mut errors = ValidationErrors::new();
	/// errors.add("avatar", AttributeError { kind: ErrorKind::Size, message: "too big".into() });
	/// errors.add("avatar", AttributeError { kind: ErrorKind::ContentType, message: "bad type".into() });
	///
	/// assert_eq!(errors.messages_for("avatar", &[ErrorKind::ContentType]), vec!["bad type"]);
	/// assert!(errors.messages_for("resume", &[ErrorKind::Size]).is_empty());
	/// ```
	pub fn messages_for(&self, attribute: &str, kinds: &[ErrorKind]) -> Vec<&str> {
		self.get(attribute)
			.iter()
			.filter(|error| kinds.contains(&error.kind))
			.map(|error| error.message.as_str())
			.collect()
	}

	pub fn has_error(&self, attribute: &str, kind: ErrorKind) -> bool {
		self.get(attribute).iter().any(|error| error.kind == kind)
	}

	/// "attribute message" strings for every recorded error
	pub fn full_messages(&self) -> Vec<String> {
		self.errors
			.iter()
			.flat_map(|(attribute, errors)| {
				errors
					.iter()
					.map(move |error| format!("{} {}", attribute, error.message))
			})
			.collect()
	}

	pub fn attributes(&self) -> impl Iterator<Item = &str> {
		self.errors.keys().map(String::as_str)
	}

	pub fn is_empty(&self) -> bool {
		self.errors.values().all(Vec::is_empty)
	}

	pub fn len(&self) -> usize {
		self.errors.values().map(Vec::len).sum()
	}

	pub fn clear(&mut self) {
		self.errors.clear();
	}
}

/// Error returned when an attachment operation targets an undeclared attribute
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachmentError {
	#[error("{model} does not declare an attachment named `{attribute}`")]
	UnknownAttribute { model: String, attribute: String },
}

/// Error raised while declaring or loading a model schema
#[derive(Debug, Error)]
pub enum SchemaError {
	#[error("Invalid content type pattern `{pattern}`: {source}")]
	InvalidPattern {
		pattern: String,
		#[source]
		source: regex::Error,
	},
	#[error("Unknown content type shorthand `{0}`")]
	UnknownShorthand(String),
	#[error("Invalid bounds: minimum {min} is greater than maximum {max}")]
	InvalidBounds { min: u64, max: u64 },
	#[error("Size bound {0} cannot be expressed as an inclusive byte count")]
	SizeOutOfRange(u64),
	#[error("Conflicting options for {validator} validator: {options}")]
	ConflictingOptions {
		validator: &'static str,
		options: String,
	},
	#[error("Missing option for {validator} validator: expected one of {expected}")]
	MissingOption {
		validator: &'static str,
		expected: &'static str,
	},
	#[error("Attachment `{0}` is declared more than once")]
	DuplicateAttachment(String),
	#[error("Failed to parse schema: {0}")]
	Parse(#[from] toml::de::Error),
}

pub type SchemaResult<T> = Result<T, SchemaError>;
