//! Size matcher
//!
//! Each configured bound is probed on both sides: the largest accepted size
//! must pass and the next byte must fail, and the same for the smallest
//! accepted size. A bound that no file size can satisfy on one side (e.g.
//! `less_than(0)`) only probes the side that exists.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use reinhardt_storage_matchers::{Matcher, validate_size_of};
//! use reinhardt_storage_validators::{ModelSchema, Record, SizeValidator};
//!
//! let schema = ModelSchema::builder("User")
//!     .has_one_attached("avatar", |a| a.validates(SizeValidator::between(1, 1024).unwrap()))
//!     .build()
//!     .unwrap();
//! let mut user = Record::new(Arc::new(schema));
//!
//! assert!(validate_size_of("avatar").between(1, 1024).matches(&mut user).is_match());
//! assert!(validate_size_of("avatar").less_than(1024).does_not_match(&mut user));
//! ```

use reinhardt_storage_validators::{
	AttachmentModel, ErrorKind, Upload, ValidatorKind, has_size_validator,
};

use crate::matcher::describe;
use crate::probe::{Check, require_attachment, run_checks};
use crate::{Matcher, Mismatch, Verdict};

const SIZE: &[ErrorKind] = &[ErrorKind::Size];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Limit {
	Inclusive(u64),
	Exclusive(u64),
}

impl Limit {
	/// Largest accepted size under this upper limit, and the smallest rejected one
	fn upper_probes(self) -> (Option<u64>, Option<u64>) {
		match self {
			Self::Inclusive(max) => (Some(max), max.checked_add(1)),
			Self::Exclusive(max) => (max.checked_sub(1), Some(max)),
		}
	}

	/// Smallest accepted size above this lower limit, and the largest rejected one
	fn lower_probes(self) -> (Option<u64>, Option<u64>) {
		match self {
			Self::Inclusive(min) => (Some(min), min.checked_sub(1)),
			Self::Exclusive(min) => (min.checked_add(1), Some(min)),
		}
	}
}

/// Matcher for size validation on an attachment attribute
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SizeValidatorMatcher {
	attribute: String,
	lower: Option<Limit>,
	upper: Option<Limit>,
	expected_message: Option<String>,
}

/// Start a [`SizeValidatorMatcher`] for `attribute`
pub fn validate_size_of(attribute: impl Into<String>) -> SizeValidatorMatcher {
	SizeValidatorMatcher::new(attribute)
}

impl SizeValidatorMatcher {
	pub fn new(attribute: impl Into<String>) -> Self {
		Self {
			attribute: attribute.into(),
			..Self::default()
		}
	}

	pub fn less_than(mut self, bytes: u64) -> Self {
		self.upper = Some(Limit::Exclusive(bytes));
		self
	}

	pub fn less_than_or_equal_to(mut self, bytes: u64) -> Self {
		self.upper = Some(Limit::Inclusive(bytes));
		self
	}

	pub fn greater_than(mut self, bytes: u64) -> Self {
		self.lower = Some(Limit::Exclusive(bytes));
		self
	}

	pub fn greater_than_or_equal_to(mut self, bytes: u64) -> Self {
		self.lower = Some(Limit::Inclusive(bytes));
		self
	}

	/// Inclusive range
	pub fn between(self, min_bytes: u64, max_bytes: u64) -> Self {
		self.greater_than_or_equal_to(min_bytes)
			.less_than_or_equal_to(max_bytes)
	}

	/// The exact message a rejection must carry
	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.expected_message = Some(message.into());
		self
	}

	fn checks(&self) -> Vec<Check> {
		let (upper_accept, upper_reject) = self
			.upper
			.map(Limit::upper_probes)
			.unwrap_or((None, None));
		let (lower_accept, lower_reject) = self
			.lower
			.map(Limit::lower_probes)
			.unwrap_or((None, None));

		[
			(upper_accept, true),
			(upper_reject, false),
			(lower_accept, true),
			(lower_reject, false),
		]
		.into_iter()
		.filter_map(|(bytes, accept)| {
			let bytes = bytes?;
			let upload = Some(sized(bytes));
			Some(if accept {
				Check::accept(subject(bytes), upload, SIZE)
			} else {
				Check::reject(subject(bytes), upload, SIZE)
			})
		})
		.collect()
	}

	fn check(&self, model: &mut dyn AttachmentModel) -> Result<(), Mismatch> {
		require_attachment(model, &self.attribute)?;
		let declared = has_size_validator(model, &self.attribute)
			.cloned()
			.ok_or_else(|| Mismatch::MissingValidator {
				attribute: self.attribute.clone(),
				validator: ValidatorKind::Size,
			})?;
		tracing::debug!(
			attribute = %self.attribute,
			min_bytes = ?declared.min_bytes(),
			max_bytes = ?declared.max_bytes(),
			"checking size validation"
		);

		run_checks(
			model,
			&self.attribute,
			self.checks(),
			self.expected_message.as_deref(),
			|| {
				// Step just outside whichever bound the model declares
				let bytes = declared
					.max_bytes()
					.and_then(|max| max.checked_add(1))
					.or_else(|| declared.min_bytes().and_then(|min| min.checked_sub(1)))?;
				Some(Check::reject(subject(bytes), Some(sized(bytes)), SIZE))
			},
		)
	}
}

fn sized(bytes: u64) -> Upload {
	Upload::synthetic("application/octet-stream").with_byte_size(bytes)
}

fn subject(bytes: u64) -> String {
	format!("a file of {} bytes", bytes)
}

impl Matcher for SizeValidatorMatcher {
	fn description(&self) -> String {
		let lower = self.lower.map(|limit| match limit {
			Limit::Inclusive(min) => format!("at least {} bytes", min),
			Limit::Exclusive(min) => format!("greater than {} bytes", min),
		});
		let upper = self.upper.map(|limit| match limit {
			Limit::Inclusive(max) => format!("at most {} bytes", max),
			Limit::Exclusive(max) => format!("less than {} bytes", max),
		});
		describe(
			format!("validate the size of `{}`", self.attribute),
			[
				lower,
				upper,
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
