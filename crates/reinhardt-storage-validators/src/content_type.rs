//! Content type validator for attachments
//!
//! The allow-list is either a list of content types or a regular expression.
//! List entries are compared case-insensitively. Patterns are matched as
//! written, so anchor them (`^image/.*$`) when a full match is intended.
//!
//! # Examples
//!
//! ## Validate against a list
//!
//! ```
//! use reinhardt_storage_validators::{ContentTypeValidator, Upload, Validator};
//!
//! let validator = ContentTypeValidator::with_content_types(["image/png", "image/gif"]);
//!
//! assert!(validator.validate(&Upload::synthetic("image/png")).is_ok());
//! assert!(validator.validate(&Upload::synthetic("video/mkv")).is_err());
//! ```
//!
//! ## Validate against a pattern
//!
//! ```
//! use reinhardt_storage_validators::{ContentTypeValidator, Upload, Validator};
//!
//! let validator = ContentTypeValidator::with_pattern(r"^image/.*$").unwrap();
//!
//! assert!(validator.validate(&Upload::synthetic("image/webp")).is_ok());
//! assert!(validator.validate(&Upload::synthetic("not_valid")).is_err());
//! ```

use regex::Regex;

use crate::{
	CustomMessage, SchemaError, SchemaResult, Upload, ValidationError, ValidationResult, Validator,
};

// Image MIME types
pub const MIME_JPEG: &str = "image/jpeg";
pub const MIME_PNG: &str = "image/png";
pub const MIME_GIF: &str = "image/gif";
pub const MIME_WEBP: &str = "image/webp";
pub const MIME_SVG: &str = "image/svg+xml";
pub const MIME_BMP: &str = "image/bmp";
pub const MIME_TIFF: &str = "image/tiff";

// Document MIME types
pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOC: &str = "application/msword";
pub const MIME_DOCX: &str =
	"application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MIME_XLS: &str = "application/vnd.ms-excel";
pub const MIME_XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const MIME_TEXT: &str = "text/plain";
pub const MIME_CSV: &str = "text/csv";
pub const MIME_JSON: &str = "application/json";

// Media and archive MIME types
pub const MIME_MP4: &str = "video/mp4";
pub const MIME_MKV: &str = "video/x-matroska";
pub const MIME_MP3: &str = "audio/mpeg";
pub const MIME_ZIP: &str = "application/zip";

/// Resolve a file extension shorthand (`png`, `.pdf`) to its content type
///
/// # Examples
///
/// ```
/// use reinhardt_storage_validators::content_type::mime_for_extension;
///
/// assert_eq!(mime_for_extension("png"), Some("image/png"));
/// assert_eq!(mime_for_extension(".JPG"), Some("image/jpeg"));
/// assert_eq!(mime_for_extension("unknown"), None);
/// ```
pub fn mime_for_extension(extension: &str) -> Option<&'static str> {
	let extension = extension.trim_start_matches('.').to_lowercase();
	let mime = match extension.as_str() {
		"jpg" | "jpeg" => MIME_JPEG,
		"png" => MIME_PNG,
		"gif" => MIME_GIF,
		"webp" => MIME_WEBP,
		"svg" => MIME_SVG,
		"bmp" => MIME_BMP,
		"tif" | "tiff" => MIME_TIFF,
		"pdf" => MIME_PDF,
		"doc" => MIME_DOC,
		"docx" => MIME_DOCX,
		"xls" => MIME_XLS,
		"xlsx" => MIME_XLSX,
		"txt" => MIME_TEXT,
		"csv" => MIME_CSV,
		"json" => MIME_JSON,
		"mp4" => MIME_MP4,
		"mkv" => MIME_MKV,
		"mp3" => MIME_MP3,
		"zip" => MIME_ZIP,
		_ => return None,
	};
	Some(mime)
}

/// Structured description of a content type validator's configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentTypeSpec {
	pub allow_list: AllowList,
	pub message: Option<String>,
}

/// Content types a validator accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowList {
	Types(Vec<String>),
	Pattern(String),
}

#[derive(Debug, Clone)]
enum Rule {
	Types(Vec<String>),
	Pattern(Regex),
}

/// Validator restricting the content type of attached files
#[derive(Debug, Clone)]
pub struct ContentTypeValidator {
	rule: Rule,
	message: Option<String>,
}

impl ContentTypeValidator {
	/// Accept exactly the listed content types
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_storage_validators::ContentTypeValidator;
	///
	/// let validator = ContentTypeValidator::with_content_types(["image/png"]);
	/// assert!(validator.allows("image/png"));
	/// assert!(validator.allows("IMAGE/PNG"));
	/// assert!(!validator.allows("image/gif"));
	/// ```
	pub fn with_content_types<I, S>(content_types: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			rule: Rule::Types(content_types.into_iter().map(Into::into).collect()),
			message: None,
		}
	}

	/// Accept the content types of the listed file extensions
	///
	/// # Errors
	///
	/// Returns [`SchemaError::UnknownShorthand`] for an extension without a
	/// known content type.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_storage_validators::ContentTypeValidator;
	///
	/// let validator = ContentTypeValidator::with_extensions(["png", "pdf"]).unwrap();
	/// assert!(validator.allows("application/pdf"));
	/// assert!(ContentTypeValidator::with_extensions(["nope"]).is_err());
	/// ```
	pub fn with_extensions<I, S>(extensions: I) -> SchemaResult<Self>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let content_types = extensions
			.into_iter()
			.map(|extension| {
				let extension = extension.as_ref();
				mime_for_extension(extension)
					.ok_or_else(|| SchemaError::UnknownShorthand(extension.to_string()))
			})
			.collect::<SchemaResult<Vec<_>>>()?;
		Ok(Self::with_content_types(content_types))
	}

	/// Accept content types matching a regular expression
	///
	/// # Errors
	///
	/// Returns [`SchemaError::InvalidPattern`] if the pattern does not compile.
	pub fn with_pattern(pattern: &str) -> SchemaResult<Self> {
		let regex = Regex::new(pattern).map_err(|source| SchemaError::InvalidPattern {
			pattern: pattern.to_string(),
			source,
		})?;
		Ok(Self {
			rule: Rule::Pattern(regex),
			message: None,
		})
	}

	/// Replace the default error message
	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}

	/// Whether `content_type` passes the allow-list
	pub fn allows(&self, content_type: &str) -> bool {
		match &self.rule {
			Rule::Types(allowed) => allowed
				.iter()
				.any(|candidate| candidate.eq_ignore_ascii_case(content_type)),
			Rule::Pattern(pattern) => pattern.is_match(content_type),
		}
	}

	pub fn spec(&self) -> ContentTypeSpec {
		let allow_list = match &self.rule {
			Rule::Types(allowed) => AllowList::Types(allowed.clone()),
			Rule::Pattern(pattern) => AllowList::Pattern(pattern.as_str().to_string()),
		};
		ContentTypeSpec {
			allow_list,
			message: self.message.clone(),
		}
	}

	fn describe_allowed(&self) -> String {
		match &self.rule {
			Rule::Types(allowed) if allowed.is_empty() => "(none)".to_string(),
			Rule::Types(allowed) => allowed.join(", "),
			Rule::Pattern(pattern) => format!("/{}/", pattern.as_str()),
		}
	}
}

impl Validator<Upload> for ContentTypeValidator {
	fn validate(&self, upload: &Upload) -> ValidationResult<()> {
		if self.allows(&upload.content_type) {
			return Ok(());
		}
		Err(ValidationError::InvalidContentType {
			content_type: upload.content_type.clone(),
			allowed: self.describe_allowed(),
		})
	}
}

impl CustomMessage for ContentTypeValidator {
	fn custom_message(&self) -> Option<&str> {
		self.message.as_deref()
	}
}
