//! Image dimension matcher
//!
//! Bounds are probed per axis with images that sit on the bound and one pixel
//! past it. Only errors of the probed axis count, so the other axis never
//! influences the outcome.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use reinhardt_storage_matchers::{Matcher, validate_dimensions_of};
//! use reinhardt_storage_validators::{DimensionValidator, ModelSchema, Record};
//!
//! let schema = ModelSchema::builder("User")
//!     .has_one_attached("avatar", |a| {
//!         a.validates(DimensionValidator::new().width(256).height_max(512))
//!     })
//!     .build()
//!     .unwrap();
//! let mut user = Record::new(Arc::new(schema));
//!
//! assert!(validate_dimensions_of("avatar").width(256).height_max(512).matches(&mut user).is_match());
//! assert!(validate_dimensions_of("avatar").width_min(255).does_not_match(&mut user));
//! ```

use reinhardt_storage_validators::{
	AttachmentModel, Axis, DimensionBound, ErrorKind, Upload, ValidatorKind,
	has_dimension_validator,
};

use crate::matcher::describe;
use crate::probe::{Check, require_attachment, run_checks};
use crate::{Matcher, Mismatch, Verdict};

/// Side length of the axis that is not under test
const NEUTRAL_PIXELS: u32 = 1;

/// Matcher for dimension validation on an attachment attribute
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DimensionValidatorMatcher {
	attribute: String,
	width: Option<DimensionBound>,
	height: Option<DimensionBound>,
	expected_message: Option<String>,
}

/// Start a [`DimensionValidatorMatcher`] for `attribute`
pub fn validate_dimensions_of(attribute: impl Into<String>) -> DimensionValidatorMatcher {
	DimensionValidatorMatcher::new(attribute)
}

impl DimensionValidatorMatcher {
	pub fn new(attribute: impl Into<String>) -> Self {
		Self {
			attribute: attribute.into(),
			..Self::default()
		}
	}

	pub fn width(self, pixels: u32) -> Self {
		self.exact(Axis::Width, pixels)
	}

	pub fn width_min(self, pixels: u32) -> Self {
		self.min(Axis::Width, pixels)
	}

	pub fn width_max(self, pixels: u32) -> Self {
		self.max(Axis::Width, pixels)
	}

	pub fn width_between(self, min: u32, max: u32) -> Self {
		self.min(Axis::Width, min).max(Axis::Width, max)
	}

	pub fn height(self, pixels: u32) -> Self {
		self.exact(Axis::Height, pixels)
	}

	pub fn height_min(self, pixels: u32) -> Self {
		self.min(Axis::Height, pixels)
	}

	pub fn height_max(self, pixels: u32) -> Self {
		self.max(Axis::Height, pixels)
	}

	pub fn height_between(self, min: u32, max: u32) -> Self {
		self.min(Axis::Height, min).max(Axis::Height, max)
	}

	/// The exact message a rejection must carry
	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.expected_message = Some(message.into());
		self
	}

	fn slot(&mut self, axis: Axis) -> &mut Option<DimensionBound> {
		match axis {
			Axis::Width => &mut self.width,
			Axis::Height => &mut self.height,
		}
	}

	fn exact(mut self, axis: Axis, pixels: u32) -> Self {
		*self.slot(axis) = Some(DimensionBound::Exact(pixels));
		self
	}

	fn min(mut self, axis: Axis, pixels: u32) -> Self {
		let slot = self.slot(axis);
		let max = match *slot {
			Some(DimensionBound::Range { max, .. }) => max,
			_ => None,
		};
		*slot = Some(DimensionBound::Range {
			min: Some(pixels),
			max,
		});
		self
	}

	fn max(mut self, axis: Axis, pixels: u32) -> Self {
		let slot = self.slot(axis);
		let min = match *slot {
			Some(DimensionBound::Range { min, .. }) => min,
			_ => None,
		};
		*slot = Some(DimensionBound::Range {
			min,
			max: Some(pixels),
		});
		self
	}

	fn checks(&self) -> Vec<Check> {
		[(Axis::Width, self.width), (Axis::Height, self.height)]
			.into_iter()
			.filter_map(|(axis, bound)| Some((axis, bound?)))
			.flat_map(|(axis, bound)| {
				let (accepted, rejected) = probe_sizes(bound);
				let accepted = accepted.into_iter().map(move |pixels| {
					Check::accept(subject(axis, pixels), Some(image(axis, pixels)), kinds(axis))
				});
				let rejected = rejected.into_iter().map(move |pixels| {
					Check::reject(subject(axis, pixels), Some(image(axis, pixels)), kinds(axis))
				});
				accepted.chain(rejected)
			})
			.collect()
	}

	fn check(&self, model: &mut dyn AttachmentModel) -> Result<(), Mismatch> {
		require_attachment(model, &self.attribute)?;
		if has_dimension_validator(model, &self.attribute).is_none() {
			return Err(Mismatch::MissingValidator {
				attribute: self.attribute.clone(),
				validator: ValidatorKind::Dimension,
			});
		}
		tracing::debug!(
			attribute = %self.attribute,
			width = ?self.width,
			height = ?self.height,
			"checking dimension validation"
		);

		run_checks(
			model,
			&self.attribute,
			self.checks(),
			self.expected_message.as_deref(),
			// An upload that was never analyzed fails any dimension validator
			|| {
				Some(Check::reject(
					"an image without metadata",
					Some(Upload::synthetic("image/png")),
					&ErrorKind::DIMENSION,
				))
			},
		)
	}
}

/// Sizes that must pass and sizes that must fail for `bound`
fn probe_sizes(bound: DimensionBound) -> (Vec<u32>, Vec<u32>) {
	match bound {
		DimensionBound::Exact(pixels) => (
			vec![pixels],
			[pixels.checked_sub(1), pixels.checked_add(1)]
				.into_iter()
				.flatten()
				.collect(),
		),
		DimensionBound::Range { min, max } => {
			let accepted = [min, max].into_iter().flatten().collect();
			let rejected = [
				min.and_then(|min| min.checked_sub(1)),
				max.and_then(|max| max.checked_add(1)),
			]
			.into_iter()
			.flatten()
			.collect();
			(accepted, rejected)
		}
	}
}

fn kinds(axis: Axis) -> &'static [ErrorKind] {
	match axis {
		Axis::Width => &[ErrorKind::Width],
		Axis::Height => &[ErrorKind::Height],
	}
}

fn image(axis: Axis, pixels: u32) -> Upload {
	let upload = Upload::synthetic("image/png");
	match axis {
		Axis::Width => upload.with_dimensions(pixels, NEUTRAL_PIXELS),
		Axis::Height => upload.with_dimensions(NEUTRAL_PIXELS, pixels),
	}
}

fn subject(axis: Axis, pixels: u32) -> String {
	format!("an image with a {} of {}px", axis, pixels)
}

fn describe_bound(axis: Axis, bound: DimensionBound) -> String {
	match bound {
		DimensionBound::Exact(pixels) => format!("{} of {}px", axis, pixels),
		DimensionBound::Range {
			min: Some(min),
			max: Some(max),
		} => format!("{} between {}px and {}px", axis, min, max),
		DimensionBound::Range {
			min: Some(min),
			max: None,
		} => format!("{} of at least {}px", axis, min),
		DimensionBound::Range {
			min: None,
			max: Some(max),
		} => format!("{} of at most {}px", axis, max),
		DimensionBound::Range { min: None, max: None } => format!("any {}", axis),
	}
}

impl Matcher for DimensionValidatorMatcher {
	fn description(&self) -> String {
		describe(
			format!("validate the dimensions of `{}`", self.attribute),
			[
				self.width.map(|bound| describe_bound(Axis::Width, bound)),
				self.height.map(|bound| describe_bound(Axis::Height, bound)),
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

#[cfg(test)]
mod tests {
	use super::*;
	use reinhardt_storage_validators::{DimensionValidator, ModelSchema, Record};
	use rstest::{fixture, rstest};
	use std::sync::Arc;

	#[fixture]
	fn record() -> Record {
		let schema = ModelSchema::builder("Gallery")
			.has_one_attached("banner", |a| {
				a.validates(
					DimensionValidator::new()
						.width(1200)
						.height_between(200, 400)
						.unwrap()
						.with_message("Wrong size."),
				)
			})
			.has_many_attached("thumbnails", |a| {
				a.validates(DimensionValidator::new().width_max(128))
			})
			.build()
			.unwrap();
		Record::new(Arc::new(schema))
	}

	#[rstest]
	#[case(DimensionBound::Exact(10), (vec![10], vec![9, 11]))]
	#[case(DimensionBound::Exact(0), (vec![0], vec![1]))]
	#[case(DimensionBound::Range { min: Some(5), max: Some(8) }, (vec![5, 8], vec![4, 9]))]
	#[case(DimensionBound::Range { min: None, max: Some(u32::MAX) }, (vec![u32::MAX], vec![]))]
	fn test_probe_sizes(#[case] bound: DimensionBound, #[case] expected: (Vec<u32>, Vec<u32>)) {
		assert_eq!(probe_sizes(bound), expected);
	}

	#[rstest]
	#[case(validate_dimensions_of("banner").width(1200), true)]
	#[case(validate_dimensions_of("banner").height_between(200, 400), true)]
	#[case(validate_dimensions_of("banner").height_min(200).height_max(400), true)]
	#[case(validate_dimensions_of("banner").width(1200).height_between(200, 400).with_message("Wrong size."), true)]
	#[case(validate_dimensions_of("banner").with_message("Wrong size."), true)]
	#[case(validate_dimensions_of("banner").with_message("Wrong size"), false)]
	#[case(validate_dimensions_of("banner").width(1201), false)]
	#[case(validate_dimensions_of("banner").height_min(199), false)]
	#[case(validate_dimensions_of("banner").width_max(1300), false)]
	#[case(validate_dimensions_of("thumbnails").width_max(128), true)]
	#[case(validate_dimensions_of("thumbnails").width_max(128).height_max(10), false)]
	#[case(validate_dimensions_of("missing").width(1), false)]
	fn test_dimension_matcher(
		mut record: Record,
		#[case] matcher: DimensionValidatorMatcher,
		#[case] expected: bool,
	) {
		// Act
		let verdict = matcher.matches(&mut record);

		// Assert
		assert_eq!(verdict.is_match(), expected, "{}", verdict.failure_message());
	}

	#[rstest]
	fn test_description() {
		let matcher = validate_dimensions_of("banner").width(1200).height_min(200);

		assert_eq!(
			matcher.description(),
			"validate the dimensions of `banner` width of 1200px, height of at least 200px"
		);
	}
}
