//! Record validation integration tests
//!
//! Loads schemas from TOML and runs them through [`Record`].

use std::sync::Arc;

use reinhardt_storage_validators::{
	AttachmentModel, ErrorKind, ModelSchema, Record, Upload, has_content_type_validator,
	has_dimension_validator, has_size_validator,
};
use rstest::*;

const GALLERY_SCHEMA: &str = r#"
name = "Gallery"

[[attachments]]
name = "cover"

[[attachments.validators]]
kind = "attached"
message = "Pick a cover."

[[attachments.validators]]
kind = "content_type"
pattern = "^image/.*$"

[[attachments.validators]]
kind = "size"
less_than_or_equal_to = 2048

[[attachments]]
name = "photos"
many = true

[[attachments.validators]]
kind = "dimension"
width = { min = 100, max = 200 }
"#;

#[fixture]
fn gallery() -> Record {
	let schema = ModelSchema::from_toml_str(GALLERY_SCHEMA).unwrap();
	Record::new(Arc::new(schema))
}

#[rstest]
fn test_valid_gallery(mut gallery: Record) {
	// Arrange
	gallery
		.attach("cover", Upload::synthetic("image/jpeg").with_byte_size(1024))
		.unwrap();
	gallery
		.attach("photos", Upload::synthetic("image/png").with_dimensions(150, 10))
		.unwrap();

	// Act
	let valid = gallery.validate();

	// Assert
	assert!(valid, "unexpected errors: {:?}", gallery.errors().full_messages());
}

#[rstest]
fn test_custom_message_replaces_default(mut gallery: Record) {
	// Act
	let valid = gallery.validate();

	// Assert
	assert!(!valid);
	assert_eq!(
		gallery.errors().messages_for("cover", &[ErrorKind::Attached]),
		vec!["Pick a cover."]
	);
	assert_eq!(gallery.errors().full_messages(), vec!["cover Pick a cover."]);
}

#[rstest]
fn test_errors_are_tagged_per_validator(mut gallery: Record) {
	// Arrange
	gallery
		.attach("cover", Upload::synthetic("text/plain").with_byte_size(4096))
		.unwrap();
	gallery
		.attach("photos", Upload::synthetic("image/png"))
		.unwrap();
	gallery
		.attach("photos", Upload::synthetic("image/png").with_dimensions(50, 50))
		.unwrap();

	// Act
	gallery.validate();

	// Assert
	let errors = gallery.errors();
	assert!(errors.has_error("cover", ErrorKind::ContentType));
	assert!(errors.has_error("cover", ErrorKind::Size));
	assert!(!errors.has_error("cover", ErrorKind::Attached));
	assert_eq!(errors.messages_for("photos", &ErrorKind::DIMENSION).len(), 2);
	assert!(errors.has_error("photos", ErrorKind::ImageMetadata));
	assert!(errors.has_error("photos", ErrorKind::Width));
}

#[rstest]
fn test_capabilities_of_loaded_schema(gallery: Record) {
	assert!(has_content_type_validator(&gallery, "cover").is_some());
	assert!(has_content_type_validator(&gallery, "photos").is_none());
	assert!(has_size_validator(&gallery, "cover").is_some());
	assert!(has_dimension_validator(&gallery, "photos").is_some());
	assert_eq!(gallery.model_name(), "Gallery");
}
