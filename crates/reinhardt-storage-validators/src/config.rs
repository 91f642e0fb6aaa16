//! TOML declarations of attachment validations
//!
//! ```toml
//! name = "User"
//!
//! [[attachments]]
//! name = "avatar"
//!
//! [[attachments.validators]]
//! kind = "content_type"
//! allow = ["image/png", "image/gif"]
//! message = "Not authorized file type."
//!
//! [[attachments.validators]]
//! kind = "size"
//! less_than = 5242880
//!
//! [[attachments]]
//! name = "photos"
//! many = true
//!
//! [[attachments.validators]]
//! kind = "dimension"
//! width = { min = 800 }
//! height = 600
//! ```

use serde::Deserialize;

use crate::{
	AttachedValidator, AttachmentDefinition, Cardinality, ContentTypeValidator, DimensionBound,
	DimensionValidator, ModelSchema, SchemaError, SchemaResult, SizeValidator, ValidatorSpec,
	dimension::Axis,
};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
	pub name: String,
	#[serde(default)]
	pub attachments: Vec<AttachmentConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttachmentConfig {
	pub name: String,
	#[serde(default)]
	pub many: bool,
	#[serde(default)]
	pub validators: Vec<ValidatorConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidatorConfig {
	ContentType {
		#[serde(default)]
		allow: Vec<String>,
		#[serde(default)]
		extensions: Vec<String>,
		pattern: Option<String>,
		message: Option<String>,
	},
	Size {
		less_than: Option<u64>,
		less_than_or_equal_to: Option<u64>,
		greater_than: Option<u64>,
		greater_than_or_equal_to: Option<u64>,
		between: Option<[u64; 2]>,
		message: Option<String>,
	},
	Attached {
		message: Option<String>,
	},
	Dimension {
		width: Option<BoundConfig>,
		height: Option<BoundConfig>,
		message: Option<String>,
	},
}

/// Either an exact pixel count or a `{ min, max }` table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum BoundConfig {
	Exact(u32),
	Range { min: Option<u32>, max: Option<u32> },
}

impl TryFrom<BoundConfig> for DimensionBound {
	type Error = SchemaError;

	fn try_from(config: BoundConfig) -> SchemaResult<Self> {
		match config {
			BoundConfig::Exact(pixels) => Ok(Self::Exact(pixels)),
			BoundConfig::Range {
				min: Some(min),
				max: Some(max),
			} => Self::between(min, max),
			BoundConfig::Range { min: None, max: None } => Err(SchemaError::MissingOption {
				validator: "dimension",
				expected: "min, max",
			}),
			BoundConfig::Range { min, max } => Ok(Self::Range { min, max }),
		}
	}
}

fn with_message<T>(validator: T, message: Option<String>, set: impl FnOnce(T, String) -> T) -> T {
	match message {
		Some(message) => set(validator, message),
		None => validator,
	}
}

fn content_type_validator(
	allow: Vec<String>,
	extensions: Vec<String>,
	pattern: Option<String>,
) -> SchemaResult<ContentTypeValidator> {
	let listed = !allow.is_empty() || !extensions.is_empty();
	match (listed, pattern) {
		(true, Some(_)) => Err(SchemaError::ConflictingOptions {
			validator: "content_type",
			options: "pattern cannot be combined with allow or extensions".to_string(),
		}),
		(false, None) => Err(SchemaError::MissingOption {
			validator: "content_type",
			expected: "allow, extensions, pattern",
		}),
		(false, Some(pattern)) => ContentTypeValidator::with_pattern(&pattern),
		(true, None) => {
			let mut content_types = allow;
			for extension in &extensions {
				let mime = crate::content_type::mime_for_extension(extension)
					.ok_or_else(|| SchemaError::UnknownShorthand(extension.clone()))?;
				content_types.push(mime.to_string());
			}
			Ok(ContentTypeValidator::with_content_types(content_types))
		}
	}
}

fn size_validator(
	less_than: Option<u64>,
	less_than_or_equal_to: Option<u64>,
	greater_than: Option<u64>,
	greater_than_or_equal_to: Option<u64>,
	between: Option<[u64; 2]>,
) -> SchemaResult<SizeValidator> {
	let options = [
		("less_than", less_than.is_some()),
		("less_than_or_equal_to", less_than_or_equal_to.is_some()),
		("greater_than", greater_than.is_some()),
		("greater_than_or_equal_to", greater_than_or_equal_to.is_some()),
		("between", between.is_some()),
	];
	let set: Vec<_> = options
		.iter()
		.filter(|(_, present)| *present)
		.map(|(name, _)| *name)
		.collect();
	if set.len() > 1 {
		return Err(SchemaError::ConflictingOptions {
			validator: "size",
			options: set.join(", "),
		});
	}

	if let Some(bytes) = less_than {
		SizeValidator::less_than(bytes)
	} else if let Some(bytes) = less_than_or_equal_to {
		Ok(SizeValidator::less_than_or_equal_to(bytes))
	} else if let Some(bytes) = greater_than {
		SizeValidator::greater_than(bytes)
	} else if let Some(bytes) = greater_than_or_equal_to {
		Ok(SizeValidator::greater_than_or_equal_to(bytes))
	} else if let Some([min, max]) = between {
		SizeValidator::between(min, max)
	} else {
		Err(SchemaError::MissingOption {
			validator: "size",
			expected: "less_than, less_than_or_equal_to, greater_than, greater_than_or_equal_to, between",
		})
	}
}

impl TryFrom<ValidatorConfig> for ValidatorSpec {
	type Error = SchemaError;

	fn try_from(config: ValidatorConfig) -> SchemaResult<Self> {
		let spec: ValidatorSpec = match config {
			ValidatorConfig::ContentType {
				allow,
				extensions,
				pattern,
				message,
			} => {
				let validator = content_type_validator(allow, extensions, pattern)?;
				with_message(validator, message, |v, m| v.with_message(m)).into()
			}
			ValidatorConfig::Size {
				less_than,
				less_than_or_equal_to,
				greater_than,
				greater_than_or_equal_to,
				between,
				message,
			} => {
				let validator = size_validator(
					less_than,
					less_than_or_equal_to,
					greater_than,
					greater_than_or_equal_to,
					between,
				)?;
				with_message(validator, message, |v, m| v.with_message(m)).into()
			}
			ValidatorConfig::Attached { message } => {
				with_message(AttachedValidator::new(), message, |v, m| v.with_message(m)).into()
			}
			ValidatorConfig::Dimension {
				width,
				height,
				message,
			} => {
				if width.is_none() && height.is_none() {
					return Err(SchemaError::MissingOption {
						validator: "dimension",
						expected: "width, height",
					});
				}
				let mut validator = DimensionValidator::new();
				for (axis, bound) in [(Axis::Width, width), (Axis::Height, height)] {
					if let Some(bound) = bound {
						validator = validator.with_bound(axis, bound.try_into()?);
					}
				}
				with_message(validator, message, |v, m| v.with_message(m)).into()
			}
		};
		Ok(spec)
	}
}

impl TryFrom<AttachmentConfig> for AttachmentDefinition {
	type Error = SchemaError;

	fn try_from(config: AttachmentConfig) -> SchemaResult<Self> {
		let cardinality = if config.many {
			Cardinality::Many
		} else {
			Cardinality::One
		};
		config
			.validators
			.into_iter()
			.try_fold(Self::new(config.name, cardinality), |definition, validator| {
				Ok::<_, SchemaError>(definition.validates(ValidatorSpec::try_from(validator)?))
			})
	}
}

impl TryFrom<SchemaConfig> for ModelSchema {
	type Error = SchemaError;

	fn try_from(config: SchemaConfig) -> SchemaResult<Self> {
		config
			.attachments
			.into_iter()
			.try_fold(ModelSchema::builder(config.name), |builder, attachment| {
				Ok::<_, SchemaError>(builder.attachment(attachment.try_into()?))
			})?
			.build()
	}
}

impl ModelSchema {
	/// Load a schema from a TOML document
	///
	/// # Errors
	///
	/// Returns [`SchemaError::Parse`] for malformed TOML and the other
	/// [`SchemaError`] variants for invalid validator options.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_storage_validators::ModelSchema;
	///
	/// let schema = ModelSchema::from_toml_str(r#"
	///     name = "Document"
	///
	///     [[attachments]]
	///     name = "file"
	///
	///     [[attachments.validators]]
	///     kind = "content_type"
	///     extensions = ["pdf"]
	/// "#).unwrap();
	///
	/// assert!(schema.attachment("file").is_some());
	/// ```
	pub fn from_toml_str(source: &str) -> SchemaResult<Self> {
		let config: SchemaConfig = toml::from_str(source)?;
		tracing::debug!(
			model = %config.name,
			attachments = config.attachments.len(),
			"loaded attachment schema"
		);
		config.try_into()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::content_type::AllowList;
	use crate::schema::ValidatorKind;
	use rstest::rstest;

	const USER_SCHEMA: &str = r#"
name = "User"

[[attachments]]
name = "avatar"

[[attachments.validators]]
kind = "attached"

[[attachments.validators]]
kind = "content_type"
allow = ["image/png"]
extensions = ["gif"]
message = "Not authorized file type."

[[attachments.validators]]
kind = "size"
between = [1024, 4096]

[[attachments]]
name = "photos"
many = true

[[attachments.validators]]
kind = "dimension"
width = { min = 800 }
height = 600
"#;

	#[rstest]
	fn test_load_schema() {
		// Act
		let schema = ModelSchema::from_toml_str(USER_SCHEMA).unwrap();

		// Assert
		let avatar = schema.attachment("avatar").unwrap();
		let kinds: Vec<_> = avatar.validators().iter().map(ValidatorSpec::kind).collect();
		assert_eq!(
			kinds,
			vec![
				ValidatorKind::Attached,
				ValidatorKind::ContentType,
				ValidatorKind::Size
			]
		);
		match &avatar.validators()[1] {
			ValidatorSpec::ContentType(validator) => {
				let spec = validator.spec();
				assert_eq!(
					spec.allow_list,
					AllowList::Types(vec!["image/png".to_string(), "image/gif".to_string()])
				);
				assert_eq!(spec.message.as_deref(), Some("Not authorized file type."));
			}
			other => panic!("Expected content type validator, got {:?}", other),
		}

		let photos = schema.attachment("photos").unwrap();
		assert_eq!(photos.cardinality(), Cardinality::Many);
		match &photos.validators()[0] {
			ValidatorSpec::Dimension(validator) => {
				assert_eq!(
					validator.bound(Axis::Width),
					Some(DimensionBound::Range {
						min: Some(800),
						max: None
					})
				);
				assert_eq!(validator.bound(Axis::Height), Some(DimensionBound::Exact(600)));
			}
			other => panic!("Expected dimension validator, got {:?}", other),
		}
	}

	#[rstest]
	#[case(
		r#"
name = "M"
[[attachments]]
name = "a"
[[attachments.validators]]
kind = "content_type"
allow = ["image/png"]
pattern = "^image/.*$"
"#
	)]
	#[case(
		r#"
name = "M"
[[attachments]]
name = "a"
[[attachments.validators]]
kind = "size"
less_than = 10
greater_than = 1
"#
	)]
	fn test_conflicting_options(#[case] source: &str) {
		assert!(matches!(
			ModelSchema::from_toml_str(source),
			Err(SchemaError::ConflictingOptions { .. })
		));
	}

	#[rstest]
	#[case("content_type")]
	#[case("size")]
	#[case("dimension")]
	fn test_missing_options(#[case] kind: &str) {
		let source = format!(
			"name = \"M\"\n[[attachments]]\nname = \"a\"\n[[attachments.validators]]\nkind = \"{}\"\n",
			kind
		);

		assert!(matches!(
			ModelSchema::from_toml_str(&source),
			Err(SchemaError::MissingOption { .. })
		));
	}

	#[rstest]
	fn test_invalid_pattern_is_reported() {
		let source = r#"
name = "M"
[[attachments]]
name = "a"
[[attachments.validators]]
kind = "content_type"
pattern = "[invalid("
"#;

		assert!(matches!(
			ModelSchema::from_toml_str(source),
			Err(SchemaError::InvalidPattern { .. })
		));
	}

	#[rstest]
	fn test_parse_error() {
		let result = ModelSchema::from_toml_str("name = ");

		assert!(matches!(result, Err(SchemaError::Parse(_))));
	}

	#[rstest]
	fn test_unknown_validator_kind() {
		let source = r#"
name = "M"
[[attachments]]
name = "a"
[[attachments.validators]]
kind = "aspect_ratio"
"#;

		assert!(matches!(
			ModelSchema::from_toml_str(source),
			Err(SchemaError::Parse(_))
		));
	}
}
