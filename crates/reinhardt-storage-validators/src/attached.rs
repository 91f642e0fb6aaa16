//! Presence validator for attachments

use crate::{CustomMessage, Upload, ValidationError, ValidationResult, Validator};

/// Validator requiring at least one attached file
///
/// # Examples
///
/// ```
/// use reinhardt_storage_validators::{AttachedValidator, Upload, Validator};
///
/// let validator = AttachedValidator::new();
/// assert!(validator.validate(&[][..]).is_err());
/// assert!(validator.validate(&[Upload::synthetic("image/png")][..]).is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachedValidator {
	message: Option<String>,
}

impl AttachedValidator {
	pub fn new() -> Self {
		Self::default()
	}

	/// Replace the default error message
	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}
}

impl Validator<[Upload]> for AttachedValidator {
	fn validate(&self, uploads: &[Upload]) -> ValidationResult<()> {
		if uploads.is_empty() {
			return Err(ValidationError::Blank);
		}
		Ok(())
	}
}

impl CustomMessage for AttachedValidator {
	fn custom_message(&self) -> Option<&str> {
		self.message.as_deref()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_blank_is_rejected() {
		let validator = AttachedValidator::new();
		assert_eq!(validator.validate(&[][..]), Err(ValidationError::Blank));
	}

	#[rstest]
	fn test_many_uploads_are_accepted() {
		let validator = AttachedValidator::new().with_message("Attach a file.");
		let uploads = vec![Upload::synthetic("image/png"), Upload::synthetic("image/gif")];

		assert!(validator.validate(uploads.as_slice()).is_ok());
		assert_eq!(validator.custom_message(), Some("Attach a file."));
	}
}
