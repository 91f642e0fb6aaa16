//! Presence matcher

use reinhardt_storage_validators::{
	AttachmentModel, ErrorKind, Upload, ValidatorKind, has_attached_validator,
};

use crate::matcher::describe;
use crate::probe::{Check, require_attachment, run_checks};
use crate::{Matcher, Mismatch, Verdict};

const ATTACHED: &[ErrorKind] = &[ErrorKind::Attached];

/// Matcher for presence validation on an attachment attribute
///
/// The attribute must be rejected while blank and accepted once a file is
/// attached.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use reinhardt_storage_matchers::{Matcher, validate_attached_of};
/// use reinhardt_storage_validators::{AttachedValidator, ModelSchema, Record};
///
/// let schema = ModelSchema::builder("User")
///     .has_one_attached("avatar", |a| a.validates(AttachedValidator::new()))
///     .has_one_attached("banner", |a| a)
///     .build()
///     .unwrap();
/// let mut user = Record::new(Arc::new(schema));
///
/// assert!(validate_attached_of("avatar").matches(&mut user).is_match());
/// assert!(validate_attached_of("banner").does_not_match(&mut user));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachedValidatorMatcher {
	attribute: String,
	expected_message: Option<String>,
}

/// Start an [`AttachedValidatorMatcher`] for `attribute`
pub fn validate_attached_of(attribute: impl Into<String>) -> AttachedValidatorMatcher {
	AttachedValidatorMatcher::new(attribute)
}

impl AttachedValidatorMatcher {
	pub fn new(attribute: impl Into<String>) -> Self {
		Self {
			attribute: attribute.into(),
			expected_message: None,
		}
	}

	/// The exact message the blank attribute must carry
	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.expected_message = Some(message.into());
		self
	}

	fn check(&self, model: &mut dyn AttachmentModel) -> Result<(), Mismatch> {
		require_attachment(model, &self.attribute)?;
		if has_attached_validator(model, &self.attribute).is_none() {
			return Err(Mismatch::MissingValidator {
				attribute: self.attribute.clone(),
				validator: ValidatorKind::Attached,
			});
		}

		let checks = vec![
			Check::reject("a blank attachment", None, ATTACHED),
			Check::accept(
				"an attached file",
				Some(Upload::synthetic("application/octet-stream")),
				ATTACHED,
			),
		];
		run_checks(
			model,
			&self.attribute,
			checks,
			self.expected_message.as_deref(),
			|| None,
		)
	}
}

impl Matcher for AttachedValidatorMatcher {
	fn description(&self) -> String {
		describe(
			format!("validate that `{}` is attached", self.attribute),
			[self
				.expected_message
				.as_ref()
				.map(|message| format!("with message '{}'", message))],
		)
	}

	fn matches(&self, model: &mut dyn AttachmentModel) -> Verdict {
		Verdict::from_outcome(self.description(), self.check(model))
	}
}
