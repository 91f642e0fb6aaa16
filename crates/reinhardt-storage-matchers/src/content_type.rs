//! Content type matcher
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use reinhardt_storage_matchers::{Matcher, validate_content_type_of};
//! use reinhardt_storage_validators::{ContentTypeValidator, ModelSchema, Record};
//!
//! let schema = ModelSchema::builder("User")
//!     .has_one_attached("avatar", |a| {
//!         a.validates(ContentTypeValidator::with_content_types(["image/png", "image/gif"]))
//!     })
//!     .build()
//!     .unwrap();
//! let mut user = Record::new(Arc::new(schema));
//!
//! let matcher = validate_content_type_of("avatar")
//!     .allowing(["image/png"])
//!     .rejecting(["video/mkv", "not_valid"]);
//!
//! assert!(matcher.matches(&mut user).is_match());
//! assert!(validate_content_type_of("avatar").allowing(["video/mkv"]).does_not_match(&mut user));
//! ```

use reinhardt_storage_validators::{
	AttachmentModel, ErrorKind, Upload, ValidatorKind, has_content_type_validator,
};

use crate::matcher::{describe, join_list};
use crate::probe::{Check, require_attachment, run_checks};
use crate::{Matcher, Mismatch, Verdict};

/// Content type used to provoke a rejection when only a message is asserted
///
/// No allow-list of real content types contains it.
pub const UNRECOGNIZED_CONTENT_TYPE: &str = "application/x-reinhardt-unrecognized";

const CONTENT_TYPE: &[ErrorKind] = &[ErrorKind::ContentType];

/// Matcher for content type validation on an attachment attribute
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentTypeValidatorMatcher {
	attribute: String,
	allowed_types: Vec<String>,
	rejected_types: Vec<String>,
	expected_message: Option<String>,
}

/// Start a [`ContentTypeValidatorMatcher`] for `attribute`
pub fn validate_content_type_of(attribute: impl Into<String>) -> ContentTypeValidatorMatcher {
	ContentTypeValidatorMatcher::new(attribute)
}

impl ContentTypeValidatorMatcher {
	pub fn new(attribute: impl Into<String>) -> Self {
		Self {
			attribute: attribute.into(),
			..Self::default()
		}
	}

	/// Content types the validator must accept; cumulative
	pub fn allowing<I, S>(mut self, content_types: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.allowed_types
			.extend(content_types.into_iter().map(Into::into));
		self
	}

	/// Content types the validator must reject; cumulative
	pub fn rejecting<I, S>(mut self, content_types: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.rejected_types
			.extend(content_types.into_iter().map(Into::into));
		self
	}

	/// The exact message a rejection must carry
	///
	/// The message is compared against the last `rejecting` type. With no
	/// rejected types, the validator is fed [`UNRECOGNIZED_CONTENT_TYPE`]
	/// instead, so a default (non-custom) message only matches when it is
	/// written with that content type in it.
	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.expected_message = Some(message.into());
		self
	}

	pub fn attribute(&self) -> &str {
		&self.attribute
	}

	pub fn allowed_types(&self) -> &[String] {
		&self.allowed_types
	}

	pub fn rejected_types(&self) -> &[String] {
		&self.rejected_types
	}

	pub fn expected_message(&self) -> Option<&str> {
		self.expected_message.as_deref()
	}

	fn check(&self, model: &mut dyn AttachmentModel) -> Result<(), Mismatch> {
		require_attachment(model, &self.attribute)?;
		let spec = has_content_type_validator(model, &self.attribute).ok_or_else(|| {
			Mismatch::MissingValidator {
				attribute: self.attribute.clone(),
				validator: ValidatorKind::ContentType,
			}
		})?;
		tracing::debug!(
			attribute = %self.attribute,
			allow_list = ?spec.allow_list,
			"checking content type validation"
		);

		let allowed = self.allowed_types.iter().map(|content_type| {
			Check::accept(
				subject(content_type),
				Some(Upload::synthetic(content_type.as_str())),
				CONTENT_TYPE,
			)
		});
		let rejected = self.rejected_types.iter().map(|content_type| {
			Check::reject(
				subject(content_type),
				Some(Upload::synthetic(content_type.as_str())),
				CONTENT_TYPE,
			)
		});

		run_checks(
			model,
			&self.attribute,
			allowed.chain(rejected).collect(),
			self.expected_message.as_deref(),
			|| {
				Some(Check::reject(
					subject(UNRECOGNIZED_CONTENT_TYPE),
					Some(Upload::synthetic(UNRECOGNIZED_CONTENT_TYPE)),
					CONTENT_TYPE,
				))
			},
		)
	}
}

fn subject(content_type: &str) -> String {
	format!("content type `{}`", content_type)
}

impl Matcher for ContentTypeValidatorMatcher {
	fn description(&self) -> String {
		describe(
			format!("validate the content type of `{}`", self.attribute),
			[
				(!self.allowed_types.is_empty())
					.then(|| format!("allowing {}", join_list(&self.allowed_types))),
				(!self.rejected_types.is_empty())
					.then(|| format!("rejecting {}", join_list(&self.rejected_types))),
				self.expected_message
					.as_ref()
					.map(|message| format!("with message '{}'", message)),
			],
		)
	}

	fn matches(&self, model: &mut dyn AttachmentModel) -> Verdict {
		Verdict::from_outcome(self.description(), self.check(model))
	}
}
