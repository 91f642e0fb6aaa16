//! Validation probes
//!
//! A probe attaches one synthetic file to an attribute, runs the model's
//! validations and reads back the errors of the validator under test. The
//! attribute is emptied before every probe and once more when the probe is
//! dropped, so a model leaves evaluation with nothing attached to it.

use reinhardt_storage_validators::{AttachmentError, AttachmentModel, ErrorKind, Upload};

use crate::Mismatch;

/// What a check expects the validator to do with its file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Expect {
	Accept,
	Reject,
}

/// One probe and its expected outcome
#[derive(Debug, Clone)]
pub(crate) struct Check {
	pub(crate) subject: String,
	/// `None` probes the attribute with nothing attached
	pub(crate) upload: Option<Upload>,
	pub(crate) expect: Expect,
	/// Error kinds that count as the validator's answer
	pub(crate) kinds: &'static [ErrorKind],
}

impl Check {
	pub(crate) fn accept(
		subject: impl Into<String>,
		upload: Option<Upload>,
		kinds: &'static [ErrorKind],
	) -> Self {
		Self {
			subject: subject.into(),
			upload,
			expect: Expect::Accept,
			kinds,
		}
	}

	pub(crate) fn reject(
		subject: impl Into<String>,
		upload: Option<Upload>,
		kinds: &'static [ErrorKind],
	) -> Self {
		Self {
			subject: subject.into(),
			upload,
			expect: Expect::Reject,
			kinds,
		}
	}
}

pub(crate) struct Probe<'a> {
	model: &'a mut dyn AttachmentModel,
	attribute: &'a str,
}

impl<'a> Probe<'a> {
	pub(crate) fn new(model: &'a mut dyn AttachmentModel, attribute: &'a str) -> Self {
		Self { model, attribute }
	}

	/// Validate with `upload` as the only file and return the messages of `kinds`
	pub(crate) fn observe(
		&mut self,
		upload: Option<Upload>,
		kinds: &[ErrorKind],
	) -> Result<Vec<String>, AttachmentError> {
		self.model.detach(self.attribute)?;
		if let Some(upload) = upload {
			tracing::trace!(
				attribute = self.attribute,
				content_type = %upload.content_type,
				byte_size = upload.byte_size,
				"attaching probe file"
			);
			self.model.attach(self.attribute, upload)?;
		}

		self.model.validate();
		let messages: Vec<String> = self
			.model
			.errors()
			.messages_for(self.attribute, kinds)
			.into_iter()
			.map(str::to_string)
			.collect();

		tracing::debug!(
			model = self.model.model_name(),
			attribute = self.attribute,
			errors = messages.len(),
			"probed attachment validation"
		);
		Ok(messages)
	}
}

impl Drop for Probe<'_> {
	fn drop(&mut self) {
		if let Err(error) = self.model.detach(self.attribute) {
			tracing::warn!(attribute = self.attribute, %error, "failed to restore attribute");
		}
	}
}

/// Run `checks` in order, stopping at the first unmet one, then compare the
/// expected message against the last rejection
///
/// When no check rejected anything, `message_probe` supplies the file whose
/// rejection carries the message.
pub(crate) fn run_checks(
	model: &mut dyn AttachmentModel,
	attribute: &str,
	checks: Vec<Check>,
	expected_message: Option<&str>,
	message_probe: impl FnOnce() -> Option<Check>,
) -> Result<(), Mismatch> {
	let mut probe = Probe::new(model, attribute);
	let mut last_rejection = None;

	for check in checks {
		let messages = probe.observe(check.upload, check.kinds)?;
		match (check.expect, messages.is_empty()) {
			(Expect::Accept, true) => {}
			(Expect::Accept, false) => {
				return Err(Mismatch::UnexpectedRejection {
					attribute: attribute.to_string(),
					subject: check.subject,
					messages,
				});
			}
			(Expect::Reject, true) => {
				return Err(Mismatch::UnexpectedAcceptance {
					attribute: attribute.to_string(),
					subject: check.subject,
				});
			}
			(Expect::Reject, false) => last_rejection = Some(messages),
		}
	}

	let Some(expected) = expected_message else {
		return Ok(());
	};

	let actual = match last_rejection {
		Some(messages) => messages,
		None => match message_probe() {
			Some(check) => probe.observe(check.upload, check.kinds)?,
			None => Vec::new(),
		},
	};

	if actual.iter().any(|message| message == expected) {
		Ok(())
	} else {
		Err(Mismatch::MessageMismatch {
			attribute: attribute.to_string(),
			expected: expected.to_string(),
			actual,
		})
	}
}

/// Fail with [`Mismatch::MissingAttribute`] unless `attribute` is declared
pub(crate) fn require_attachment(
	model: &dyn AttachmentModel,
	attribute: &str,
) -> Result<(), Mismatch> {
	if model.declares_attachment(attribute) {
		return Ok(());
	}
	Err(Mismatch::MissingAttribute {
		model: model.model_name().to_string(),
		attribute: attribute.to_string(),
	})
}
