//! In-memory uploads
//!
//! An [`Upload`] describes an attached file by its declared properties only:
//! name, content type, byte size and, for images, analyzed dimensions. No file
//! content is read or stored.

use serde::{Deserialize, Serialize};

/// Width and height of an analyzed image, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMetadata {
	pub width: u32,
	pub height: u32,
}

/// A file attached to a model attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upload {
	pub filename: String,
	pub content_type: String,
	pub byte_size: u64,
	pub metadata: Option<ImageMetadata>,
}

impl Upload {
	/// Filename used for synthetic uploads
	pub const SYNTHETIC_FILENAME: &'static str = "test";

	/// Create an empty upload with the given filename and content type
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_storage_validators::Upload;
	///
	/// let upload = Upload::new("report.pdf", "application/pdf");
	/// assert_eq!(upload.extension(), Some("pdf"));
	/// assert_eq!(upload.byte_size, 0);
	/// ```
	pub fn new(filename: impl Into<String>, content_type: impl Into<String>) -> Self {
		Self {
			filename: filename.into(),
			content_type: content_type.into(),
			byte_size: 0,
			metadata: None,
		}
	}

	/// Create a stand-in upload that only declares a content type
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_storage_validators::Upload;
	///
	/// let upload = Upload::synthetic("image/png").with_dimensions(800, 600);
	/// assert_eq!(upload.content_type, "image/png");
	/// assert_eq!(upload.metadata.map(|m| m.width), Some(800));
	/// ```
	pub fn synthetic(content_type: impl Into<String>) -> Self {
		Self::new(Self::SYNTHETIC_FILENAME, content_type)
	}

	pub fn with_byte_size(mut self, byte_size: u64) -> Self {
		self.byte_size = byte_size;
		self
	}

	pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
		self.metadata = Some(ImageMetadata { width, height });
		self
	}

	pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
		self.filename = filename.into();
		self
	}

	/// Extension of the filename, without the dot
	pub fn extension(&self) -> Option<&str> {
		let (stem, extension) = self.filename.rsplit_once('.')?;
		if stem.is_empty() || extension.is_empty() {
			return None;
		}
		Some(extension)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("photo.jpg", Some("jpg"))]
	#[case("archive.tar.gz", Some("gz"))]
	#[case("noextension", None)]
	#[case(".hidden", None)]
	#[case("trailing.", None)]
	fn test_extension(#[case] filename: &str, #[case] expected: Option<&str>) {
		let upload = Upload::new(filename, "application/octet-stream");
		assert_eq!(upload.extension(), expected);
	}

	#[rstest]
	fn test_synthetic_upload_defaults() {
		let upload = Upload::synthetic("video/mkv");

		assert_eq!(upload.filename, Upload::SYNTHETIC_FILENAME);
		assert_eq!(upload.content_type, "video/mkv");
		assert_eq!(upload.byte_size, 0);
		assert!(upload.metadata.is_none());
	}

	#[rstest]
	fn test_builder_methods() {
		let upload = Upload::synthetic("image/gif")
			.with_byte_size(2048)
			.with_dimensions(10, 20)
			.with_filename("anim.gif");

		assert_eq!(upload.byte_size, 2048);
		assert_eq!(
			upload.metadata,
			Some(ImageMetadata {
				width: 10,
				height: 20
			})
		);
		assert_eq!(upload.extension(), Some("gif"));
	}
}
