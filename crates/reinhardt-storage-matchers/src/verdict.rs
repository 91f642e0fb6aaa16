//! Matcher results

use reinhardt_storage_validators::{AttachmentError, ValidatorKind};
use thiserror::Error;

/// The first expectation a matcher found unmet
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Mismatch {
	#[error("{model} does not declare an attachment named `{attribute}`")]
	MissingAttribute { model: String, attribute: String },

	#[error("`{attribute}` has no {validator} validator")]
	MissingValidator {
		attribute: String,
		validator: ValidatorKind,
	},

	#[error(
		"expected {subject} to be accepted on `{attribute}` but it was rejected with {}",
		quoted(.messages)
	)]
	UnexpectedRejection {
		attribute: String,
		subject: String,
		messages: Vec<String>,
	},

	#[error("expected {subject} to be rejected on `{attribute}` but it was accepted")]
	UnexpectedAcceptance { attribute: String, subject: String },

	#[error("expected message '{expected}' on `{attribute}` but got {}", quoted(.actual))]
	MessageMismatch {
		attribute: String,
		expected: String,
		actual: Vec<String>,
	},

	#[error(transparent)]
	Attachment(#[from] AttachmentError),
}

fn quoted(messages: &[String]) -> String {
	if messages.is_empty() {
		return "no error".to_string();
	}
	messages
		.iter()
		.map(|message| format!("'{}'", message))
		.collect::<Vec<_>>()
		.join(", ")
}

/// Outcome of evaluating a matcher against a model
///
/// # Examples
///
/// ```
/// use reinhardt_storage_matchers::{Mismatch, Verdict};
///
/// let verdict = Verdict::failed(
///     "validate the content type of `avatar`",
///     Mismatch::UnexpectedAcceptance {
///         attribute: "avatar".to_string(),
///         subject: "content type `image/png`".to_string(),
///     },
/// );
///
/// assert!(!verdict.is_match());
/// assert_eq!(
///     verdict.failure_message(),
///     "Expected to validate the content type of `avatar`, but expected content type \
///      `image/png` to be rejected on `avatar` but it was accepted"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
	description: String,
	mismatch: Option<Mismatch>,
}

impl Verdict {
	pub fn matched(description: impl Into<String>) -> Self {
		Self {
			description: description.into(),
			mismatch: None,
		}
	}

	pub fn failed(description: impl Into<String>, mismatch: Mismatch) -> Self {
		Self {
			description: description.into(),
			mismatch: Some(mismatch),
		}
	}

	pub(crate) fn from_outcome(description: String, outcome: Result<(), Mismatch>) -> Self {
		match outcome {
			Ok(()) => Self::matched(description),
			Err(mismatch) => Self::failed(description, mismatch),
		}
	}

	pub fn is_match(&self) -> bool {
		self.mismatch.is_none()
	}

	/// The unmet expectation, `None` on a match
	pub fn mismatch(&self) -> Option<&Mismatch> {
		self.mismatch.as_ref()
	}

	/// What the matcher asserted
	pub fn description(&self) -> &str {
		&self.description
	}

	/// Message for a positive assertion that failed
	pub fn failure_message(&self) -> String {
		match &self.mismatch {
			Some(mismatch) => format!("Expected to {}, but {}", self.description, mismatch),
			None => format!("Expected to {}", self.description),
		}
	}

	/// Message for a negated assertion that failed
	pub fn failure_message_when_negated(&self) -> String {
		format!("Expected not to {}, but it did", self.description)
	}
}
