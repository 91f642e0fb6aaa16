//! The matcher trait

use reinhardt_storage_validators::AttachmentModel;

use crate::Verdict;

/// A declarative expectation about an attachment attribute's validations
///
/// A matcher is built once, then evaluated against either an existing model
/// instance ([`matches`](Self::matches)) or a model type, in which case a
/// blank instance is created through `Default`
/// ([`matches_new`](Self::matches_new)). Evaluation takes `&self`, so the same
/// matcher can be evaluated any number of times.
pub trait Matcher {
	/// What the matcher asserts, e.g. "validate the content type of `avatar`"
	fn description(&self) -> String;

	/// Evaluate against `model`
	///
	/// Every probe file is detached again before this returns.
	fn matches(&self, model: &mut dyn AttachmentModel) -> Verdict;

	/// Negated form of [`matches`](Self::matches)
	fn does_not_match(&self, model: &mut dyn AttachmentModel) -> bool {
		!self.matches(model).is_match()
	}

	/// Evaluate against a blank instance of `M`
	fn matches_new<M>(&self) -> Verdict
	where
		M: AttachmentModel + Default,
		Self: Sized,
	{
		let mut model = M::default();
		self.matches(&mut model)
	}

	/// Negated form of [`matches_new`](Self::matches_new)
	fn does_not_match_new<M>(&self) -> bool
	where
		M: AttachmentModel + Default,
		Self: Sized,
	{
		!self.matches_new::<M>().is_match()
	}
}

/// Describe `values` as "a, b and c"
pub(crate) fn join_list(values: &[String]) -> String {
	match values {
		[] => String::new(),
		[only] => only.clone(),
		[init @ .., last] => format!("{} and {}", init.join(", "), last),
	}
}

/// Append the clauses that were configured to a base description
pub(crate) fn describe(base: String, clauses: impl IntoIterator<Item = Option<String>>) -> String {
	let clauses: Vec<String> = clauses.into_iter().flatten().collect();
	if clauses.is_empty() {
		base
	} else {
		format!("{} {}", base, clauses.join(", "))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(&[], "")]
	#[case(&["image/png"], "image/png")]
	#[case(&["image/png", "image/gif"], "image/png and image/gif")]
	#[case(&["a", "b", "c"], "a, b and c")]
	fn test_join_list(#[case] values: &[&str], #[case] expected: &str) {
		let values: Vec<String> = values.iter().map(|v| v.to_string()).collect();
		assert_eq!(join_list(&values), expected);
	}

	#[rstest]
	fn test_describe_skips_unset_clauses() {
		let description = describe(
			"validate the size of `avatar`".to_string(),
			[None, Some("less than 10 bytes".to_string()), None],
		);

		assert_eq!(description, "validate the size of `avatar` less than 10 bytes");
	}
}
