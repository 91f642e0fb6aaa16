//! Assertion helpers for matchers
//!
//! Each helper panics with the verdict's failure message, so they can be used
//! directly inside `#[test]` functions.

use reinhardt_storage_validators::AttachmentModel;

use crate::Matcher;

/// Assert that `matcher` matches `model`
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use reinhardt_storage_matchers::{assertions::assert_matches, validate_attached_of};
/// use reinhardt_storage_validators::{AttachedValidator, ModelSchema, Record};
///
/// let schema = ModelSchema::builder("User")
///     .has_one_attached("avatar", |a| a.validates(AttachedValidator::new()))
///     .build()
///     .unwrap();
/// let mut user = Record::new(Arc::new(schema));
///
/// assert_matches(&validate_attached_of("avatar"), &mut user);
/// ```
pub fn assert_matches<M: Matcher + ?Sized>(matcher: &M, model: &mut dyn AttachmentModel) {
	let verdict = matcher.matches(model);
	assert!(verdict.is_match(), "{}", verdict.failure_message());
}

/// Assert that `matcher` does not match `model`
pub fn assert_does_not_match<M: Matcher + ?Sized>(matcher: &M, model: &mut dyn AttachmentModel) {
	let verdict = matcher.matches(model);
	assert!(!verdict.is_match(), "{}", verdict.failure_message_when_negated());
}

/// Assert that `matcher` matches a blank instance of `T`
pub fn assert_matches_for<T>(matcher: &impl Matcher)
where
	T: AttachmentModel + Default,
{
	let verdict = matcher.matches_new::<T>();
	assert!(verdict.is_match(), "{}", verdict.failure_message());
}

/// Assert that `matcher` does not match a blank instance of `T`
pub fn assert_does_not_match_for<T>(matcher: &impl Matcher)
where
	T: AttachmentModel + Default,
{
	let verdict = matcher.matches_new::<T>();
	assert!(!verdict.is_match(), "{}", verdict.failure_message_when_negated());
}
