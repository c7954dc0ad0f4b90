use std::fmt;
use std::rc::Rc;

use crate::config::SampleImage;
use crate::error::{LensError, Result};

/// An acquired image: the bytes to upload plus something the page can render
/// right away. Replaced wholesale on every acquisition, never mutated.
#[derive(Clone, PartialEq)]
pub struct ImageHandle {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Rc<[u8]>,
    pub preview: String,
}

impl ImageHandle {
    pub fn new(
        file_name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: impl Into<Rc<[u8]>>,
        preview: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
            preview: preview.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageHandle")
            .field("file_name", &self.file_name)
            .field("media_type", &self.media_type)
            .field("bytes", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

pub fn is_image_media_type(media_type: &str) -> bool {
    media_type.starts_with("image/")
}

/// Checks a picked or dropped file before it is read.
pub fn ensure_image(media_type: &str) -> Result<()> {
    if is_image_media_type(media_type) {
        Ok(())
    } else {
        Err(LensError::UnsupportedFileType(if media_type.is_empty() {
            "unknown type".to_string()
        } else {
            media_type.to_string()
        }))
    }
}

/// What a drop onto the upload zone should turn into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropPlan<'a> {
    /// Read the first dropped file.
    UseFile,
    /// Fetch the gallery sample currently being dragged.
    FetchSample(&'a SampleImage),
    Ignore,
}

/// Decides how to handle a drop.
///
/// Files from the file system win over a gallery drag. Only the first file is
/// considered and it must be an image. `first_file_media_type` is `None` when
/// the drop carried no files.
pub fn resolve_drop<'a>(
    first_file_media_type: Option<&str>,
    dragged_sample: Option<&'a SampleImage>,
) -> Result<DropPlan<'a>> {
    match (first_file_media_type, dragged_sample) {
        (Some(media_type), _) => ensure_image(media_type).map(|_| DropPlan::UseFile),
        (None, Some(sample)) => Ok(DropPlan::FetchSample(sample)),
        (None, None) => Ok(DropPlan::Ignore),
    }
}
