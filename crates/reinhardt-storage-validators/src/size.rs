//! File size validator with min/max/range constraints
//!
//! Bounds are stored inclusively. The exclusive constructors (`less_than`,
//! `greater_than`) convert their argument and fail when the inclusive bound
//! would not fit in a `u64`.
//!
//! # Examples
//!
//! ```
//! use reinhardt_storage_validators::{SizeValidator, Upload, Validator};
//!
//! let validator = SizeValidator::less_than(SizeValidator::from_mb(2)).unwrap();
//! assert!(validator.validate(&Upload::synthetic("image/png").with_byte_size(1024)).is_ok());
//! assert!(validator.validate(&Upload::synthetic("image/png").with_byte_size(SizeValidator::from_mb(2))).is_err());
//! ```

use crate::{
	CustomMessage, SchemaError, SchemaResult, Upload, ValidationError, ValidationResult, Validator,
};

/// Validator restricting the byte size of attached files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeValidator {
	min_bytes: Option<u64>,
	max_bytes: Option<u64>,
	message: Option<String>,
}

impl SizeValidator {
	fn bounded(min_bytes: Option<u64>, max_bytes: Option<u64>) -> Self {
		Self {
			min_bytes,
			max_bytes,
			message: None,
		}
	}

	/// Files must be strictly smaller than `bytes`
	pub fn less_than(bytes: u64) -> SchemaResult<Self> {
		let max = bytes
			.checked_sub(1)
			.ok_or(SchemaError::SizeOutOfRange(bytes))?;
		Ok(Self::bounded(None, Some(max)))
	}

	pub fn less_than_or_equal_to(bytes: u64) -> Self {
		Self::bounded(None, Some(bytes))
	}

	/// Files must be strictly larger than `bytes`
	pub fn greater_than(bytes: u64) -> SchemaResult<Self> {
		let min = bytes
			.checked_add(1)
			.ok_or(SchemaError::SizeOutOfRange(bytes))?;
		Ok(Self::bounded(Some(min), None))
	}

	pub fn greater_than_or_equal_to(bytes: u64) -> Self {
		Self::bounded(Some(bytes), None)
	}

	/// Files must be within `min_bytes..=max_bytes`
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_storage_validators::SizeValidator;
	///
	/// let validator = SizeValidator::between(1024, 4096).unwrap();
	/// assert_eq!(validator.min_bytes(), Some(1024));
	/// assert_eq!(validator.max_bytes(), Some(4096));
	/// assert!(SizeValidator::between(10, 1).is_err());
	/// ```
	pub fn between(min_bytes: u64, max_bytes: u64) -> SchemaResult<Self> {
		if min_bytes > max_bytes {
			return Err(SchemaError::InvalidBounds {
				min: min_bytes,
				max: max_bytes,
			});
		}
		Ok(Self::bounded(Some(min_bytes), Some(max_bytes)))
	}

	/// Replace the default error message
	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}

	/// Inclusive lower bound
	pub fn min_bytes(&self) -> Option<u64> {
		self.min_bytes
	}

	/// Inclusive upper bound
	pub fn max_bytes(&self) -> Option<u64> {
		self.max_bytes
	}

	/// Helper: Convert kilobytes to bytes
	pub fn from_kb(kb: u64) -> u64 {
		kb * 1024
	}

	/// Helper: Convert megabytes to bytes
	pub fn from_mb(mb: u64) -> u64 {
		mb * 1024 * 1024
	}

	/// Helper: Convert gigabytes to bytes
	pub fn from_gb(gb: u64) -> u64 {
		gb * 1024 * 1024 * 1024
	}
}

impl Validator<u64> for SizeValidator {
	fn validate(&self, value: &u64) -> ValidationResult<()> {
		if let Some(min) = self.min_bytes
			&& *value < min
		{
			return Err(ValidationError::FileSizeTooSmall {
				size_bytes: *value,
				min_bytes: min,
			});
		}

		if let Some(max) = self.max_bytes
			&& *value > max
		{
			return Err(ValidationError::FileSizeTooLarge {
				size_bytes: *value,
				max_bytes: max,
			});
		}

		Ok(())
	}
}

impl Validator<Upload> for SizeValidator {
	fn validate(&self, upload: &Upload) -> ValidationResult<()> {
		Validator::<u64>::validate(self, &upload.byte_size)
	}
}

impl CustomMessage for SizeValidator {
	fn custom_message(&self) -> Option<&str> {
		self.message.as_deref()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn check(validator: &SizeValidator, size: u64) -> ValidationResult<()> {
		Validator::<u64>::validate(validator, &size)
	}

	#[rstest]
	fn test_less_than_is_exclusive() {
		let validator = SizeValidator::less_than(1024).unwrap();
		assert!(check(&validator, 1023).is_ok());
		assert!(check(&validator, 1024).is_err());
	}

	#[rstest]
	fn test_less_than_or_equal_to_is_inclusive() {
		let validator = SizeValidator::less_than_or_equal_to(1024);
		assert!(check(&validator, 1024).is_ok());
		assert!(check(&validator, 1025).is_err());
	}

	#[rstest]
	fn test_greater_than_is_exclusive() {
		let validator = SizeValidator::greater_than(1024).unwrap();
		assert!(check(&validator, 1024).is_err());
		assert!(check(&validator, 1025).is_ok());
	}

	#[rstest]
	fn test_greater_than_or_equal_to_is_inclusive() {
		let validator = SizeValidator::greater_than_or_equal_to(1024);
		assert!(check(&validator, 1023).is_err());
		assert!(check(&validator, 1024).is_ok());
	}

	#[rstest]
	fn test_exclusive_bounds_out_of_range() {
		assert!(matches!(
			SizeValidator::less_than(0),
			Err(SchemaError::SizeOutOfRange(0))
		));
		assert!(matches!(
			SizeValidator::greater_than(u64::MAX),
			Err(SchemaError::SizeOutOfRange(u64::MAX))
		));
	}

	#[rstest]
	fn test_between_boundary_values() {
		let validator = SizeValidator::between(100, 200).unwrap();
		assert!(check(&validator, 99).is_err()); // Just below min
		assert!(check(&validator, 100).is_ok()); // Exactly min
		assert!(check(&validator, 200).is_ok()); // Exactly max
		assert!(check(&validator, 201).is_err()); // Just above max
	}

	#[rstest]
	fn test_size_error_messages() {
		let validator = SizeValidator::greater_than_or_equal_to(1024);
		match check(&validator, 512) {
			Err(ValidationError::FileSizeTooSmall {
				size_bytes,
				min_bytes,
			}) => {
				assert_eq!(size_bytes, 512);
				assert_eq!(min_bytes, 1024);
			}
			_ => panic!("Expected FileSizeTooSmall error"),
		}

		let validator = SizeValidator::less_than_or_equal_to(1024);
		match check(&validator, 2048) {
			Err(ValidationError::FileSizeTooLarge {
				size_bytes,
				max_bytes,
			}) => {
				assert_eq!(size_bytes, 2048);
				assert_eq!(max_bytes, 1024);
			}
			_ => panic!("Expected FileSizeTooLarge error"),
		}
	}

	#[rstest]
	fn test_validates_upload_byte_size() {
		let validator = SizeValidator::less_than_or_equal_to(10);
		let upload = Upload::synthetic("text/plain").with_byte_size(11);

		assert!(Validator::<Upload>::validate(&validator, &upload).is_err());
	}

	#[rstest]
	fn test_unit_helpers() {
		assert_eq!(SizeValidator::from_kb(1), 1024);
		assert_eq!(SizeValidator::from_mb(10), 10 * 1024 * 1024);
		assert_eq!(SizeValidator::from_gb(2), 2 * 1024 * 1024 * 1024);
	}
}
