//! Image dimension validator
//!
//! Dimensions come from an upload's [`ImageMetadata`](crate::ImageMetadata).
//! Uploads without metadata fail with [`ValidationError::MetadataMissing`].
//! Each axis is checked independently so a file can fail on both.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
	CustomMessage, SchemaError, SchemaResult, Upload, ValidationError, ValidationResult, Validator,
};

/// Image axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
	Width,
	Height,
}

impl fmt::Display for Axis {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Width => f.write_str("width"),
			Self::Height => f.write_str("height"),
		}
	}
}

/// Constraint on one axis, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionBound {
	Exact(u32),
	Range { min: Option<u32>, max: Option<u32> },
}

impl DimensionBound {
	pub fn between(min: u32, max: u32) -> SchemaResult<Self> {
		if min > max {
			return Err(SchemaError::InvalidBounds {
				min: min.into(),
				max: max.into(),
			});
		}
		Ok(Self::Range {
			min: Some(min),
			max: Some(max),
		})
	}

	fn check(&self, axis: Axis, actual: u32) -> ValidationResult<()> {
		match *self {
			Self::Exact(expected) if actual != expected => Err(ValidationError::DimensionNotEqual {
				axis,
				actual,
				expected,
			}),
			Self::Exact(_) => Ok(()),
			Self::Range { min, max } => {
				if let Some(min) = min
					&& actual < min
				{
					return Err(ValidationError::DimensionTooSmall { axis, actual, min });
				}
				if let Some(max) = max
					&& actual > max
				{
					return Err(ValidationError::DimensionTooLarge { axis, actual, max });
				}
				Ok(())
			}
		}
	}
}

/// Validator restricting image width and height
///
/// # Examples
///
/// ```
/// use reinhardt_storage_validators::{DimensionValidator, Upload, Validator};
///
/// let validator = DimensionValidator::new().width_min(800).height(600);
///
/// assert!(validator.validate(&Upload::synthetic("image/png").with_dimensions(1024, 600)).is_ok());
/// assert!(validator.validate(&Upload::synthetic("image/png").with_dimensions(640, 600)).is_err());
/// assert!(validator.validate(&Upload::synthetic("image/png")).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DimensionValidator {
	width: Option<DimensionBound>,
	height: Option<DimensionBound>,
	message: Option<String>,
}

impl DimensionValidator {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn width(self, width: u32) -> Self {
		self.with_bound(Axis::Width, DimensionBound::Exact(width))
	}

	pub fn width_min(self, min: u32) -> Self {
		let max = self.range_part(Axis::Width, false);
		self.with_bound(Axis::Width, DimensionBound::Range { min: Some(min), max })
	}

	pub fn width_max(self, max: u32) -> Self {
		let min = self.range_part(Axis::Width, true);
		self.with_bound(Axis::Width, DimensionBound::Range { min, max: Some(max) })
	}

	pub fn width_between(self, min: u32, max: u32) -> SchemaResult<Self> {
		Ok(self.with_bound(Axis::Width, DimensionBound::between(min, max)?))
	}

	pub fn height(self, height: u32) -> Self {
		self.with_bound(Axis::Height, DimensionBound::Exact(height))
	}

	pub fn height_min(self, min: u32) -> Self {
		let max = self.range_part(Axis::Height, false);
		self.with_bound(Axis::Height, DimensionBound::Range { min: Some(min), max })
	}

	pub fn height_max(self, max: u32) -> Self {
		let min = self.range_part(Axis::Height, true);
		self.with_bound(Axis::Height, DimensionBound::Range { min, max: Some(max) })
	}

	pub fn height_between(self, min: u32, max: u32) -> SchemaResult<Self> {
		Ok(self.with_bound(Axis::Height, DimensionBound::between(min, max)?))
	}

	/// Set the bound for `axis`, replacing any previous one
	pub fn with_bound(mut self, axis: Axis, bound: DimensionBound) -> Self {
		match axis {
			Axis::Width => self.width = Some(bound),
			Axis::Height => self.height = Some(bound),
		}
		self
	}

	/// Replace the default error message
	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}

	pub fn bound(&self, axis: Axis) -> Option<DimensionBound> {
		match axis {
			Axis::Width => self.width,
			Axis::Height => self.height,
		}
	}

	// Keeps the other half of an existing range when one side is set
	fn range_part(&self, axis: Axis, lower: bool) -> Option<u32> {
		match self.bound(axis) {
			Some(DimensionBound::Range { min, max }) => {
				if lower {
					min
				} else {
					max
				}
			}
			_ => None,
		}
	}

	/// Every violation of `upload`, one per failing axis
	pub fn violations(&self, upload: &Upload) -> Vec<ValidationError> {
		let Some(metadata) = upload.metadata else {
			return vec![ValidationError::MetadataMissing];
		};

		[
			(Axis::Width, self.width, metadata.width),
			(Axis::Height, self.height, metadata.height),
		]
		.into_iter()
		.filter_map(|(axis, bound, actual)| bound?.check(axis, actual).err())
		.collect()
	}
}

impl Validator<Upload> for DimensionValidator {
	fn validate(&self, upload: &Upload) -> ValidationResult<()> {
		match self.violations(upload).into_iter().next() {
			Some(error) => Err(error),
			None => Ok(()),
		}
	}
}

impl CustomMessage for DimensionValidator {
	fn custom_message(&self) -> Option<&str> {
		self.message.as_deref()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn image(width: u32, height: u32) -> Upload {
		Upload::synthetic("image/png").with_dimensions(width, height)
	}

	#[rstest]
	#[case(800, true)]
	#[case(799, false)]
	#[case(801, false)]
	fn test_exact_width(#[case] width: u32, #[case] valid: bool) {
		let validator = DimensionValidator::new().width(800);
		assert_eq!(validator.validate(&image(width, 1)).is_ok(), valid);
	}

	#[rstest]
	fn test_min_and_max_combine() {
		// Arrange
		let validator = DimensionValidator::new().height_min(100).height_max(200);

		// Act / Assert
		assert_eq!(
			validator.bound(Axis::Height),
			Some(DimensionBound::Range {
				min: Some(100),
				max: Some(200)
			})
		);
		assert!(validator.validate(&image(1, 99)).is_err());
		assert!(validator.validate(&image(1, 100)).is_ok());
		assert!(validator.validate(&image(1, 200)).is_ok());
		assert!(validator.validate(&image(1, 201)).is_err());
	}

	#[rstest]
	fn test_reports_each_failing_axis() {
		let validator = DimensionValidator::new().width_max(100).height_min(100);

		let violations = validator.violations(&image(200, 50));

		assert_eq!(
			violations,
			vec![
				ValidationError::DimensionTooLarge {
					axis: Axis::Width,
					actual: 200,
					max: 100
				},
				ValidationError::DimensionTooSmall {
					axis: Axis::Height,
					actual: 50,
					min: 100
				},
			]
		);
	}

	#[rstest]
	fn test_missing_metadata() {
		let validator = DimensionValidator::new().width(10);

		assert_eq!(
			validator.violations(&Upload::synthetic("image/png")),
			vec![ValidationError::MetadataMissing]
		);
	}

	#[rstest]
	fn test_between_rejects_inverted_bounds() {
		assert!(matches!(
			DimensionValidator::new().width_between(20, 10),
			Err(SchemaError::InvalidBounds { min: 20, max: 10 })
		));
	}
}
