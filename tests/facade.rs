//! Facade re-export tests

use std::sync::Arc;

use reinhardt_storage_validations::prelude::*;
use rstest::*;

#[rstest]
fn test_prelude_covers_validators_and_matchers() {
	// Arrange
	let schema = ModelSchema::from_toml_str(
		r#"
name = "Invoice"

[[attachments]]
name = "scan"

[[attachments.validators]]
kind = "content_type"
allow = ["application/pdf"]
message = "PDF only."

[[attachments.validators]]
kind = "attached"
"#,
	)
	.unwrap();
	let mut invoice = Record::new(Arc::new(schema));

	// Act / Assert
	assert_matches(
		&validate_content_type_of("scan")
			.allowing(["application/pdf"])
			.rejecting(["image/png"])
			.with_message("PDF only."),
		&mut invoice,
	);
	assert_matches(&validate_attached_of("scan"), &mut invoice);
	assert_does_not_match(&validate_size_of("scan").less_than(10), &mut invoice);
}

#[rstest]
fn test_capability_query_is_reexported() {
	let schema = ModelSchema::builder("Invoice")
		.has_one_attached("scan", |a| {
			a.validates(ContentTypeValidator::with_pattern("^application/").unwrap())
		})
		.build()
		.unwrap();
	let invoice = Record::new(Arc::new(schema));

	let spec = reinhardt_storage_validations::has_content_type_validator(&invoice, "scan");

	assert_eq!(
		spec.map(|spec| spec.allow_list),
		Some(AllowList::Pattern("^application/".to_string()))
	);
}
