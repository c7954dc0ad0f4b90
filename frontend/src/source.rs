//! Turns the three ways of supplying an image (file picker, drop, sample
//! gallery) into an [`ImageHandle`] with bytes and a preview.

use gloo_file::File as GlooFile;
use gloo_file::futures::{read_as_bytes, read_as_data_url};
use gloo_net::http::Request;
use shared::source::{ensure_image, is_image_media_type};
use shared::{resolve_drop, DropPlan, ImageHandle, LensError, SampleImage};
use web_sys::DragEvent;

/// An acquisition that still has to read or fetch bytes.
pub enum PendingImage {
    File(GlooFile),
    Sample(&'static SampleImage),
}

pub async fn acquire(pending: PendingImage) -> shared::Result<ImageHandle> {
    match pending {
        PendingImage::File(file) => acquire_from_file(file).await,
        PendingImage::Sample(sample) => acquire_from_remote_sample(sample).await,
    }
}

pub async fn acquire_from_file(file: GlooFile) -> shared::Result<ImageHandle> {
    let media_type = file.raw_mime_type();
    ensure_image(&media_type)?;

    let bytes = read_as_bytes(&file)
        .await
        .map_err(|e| LensError::FileRead(e.to_string()))?;
    let preview = read_as_data_url(&file)
        .await
        .map_err(|e| LensError::FileRead(e.to_string()))?;

    Ok(ImageHandle::new(file.name(), media_type, bytes, preview))
}

/// Fetches a bundled sample and wraps it like a picked file named after the
/// sample. The sample's own URL doubles as the preview.
pub async fn acquire_from_remote_sample(
    sample: &'static SampleImage,
) -> shared::Result<ImageHandle> {
    let response = Request::get(sample.src)
        .send()
        .await
        .map_err(|e| LensError::Fetch(e.to_string()))?;
    if !response.ok() {
        return Err(LensError::Fetch(format!("Failed to fetch image: {}", response.status())));
    }

    let media_type = response
        .headers()
        .get("content-type")
        .map(|value| value.split(';').next().unwrap_or_default().trim().to_string())
        .filter(|value| is_image_media_type(value))
        .unwrap_or_else(|| sample.media_type.to_string());
    let bytes = response
        .binary()
        .await
        .map_err(|e| LensError::Fetch(e.to_string()))?;

    Ok(ImageHandle::new(sample.name, media_type, bytes, sample.src))
}

/// Reads what a drop carries. `Ok(None)` means there is nothing to load.
pub fn acquire_from_drop(
    event: &DragEvent,
    dragged_sample: Option<&'static SampleImage>,
) -> shared::Result<Option<PendingImage>> {
    let first_file = event
        .data_transfer()
        .and_then(|transfer| transfer.files())
        .and_then(|files| files.item(0));
    let media_type = first_file.as_ref().map(|file| file.type_());

    let pending = match resolve_drop(media_type.as_deref(), dragged_sample)? {
        DropPlan::UseFile => first_file.map(|file| PendingImage::File(GlooFile::from(file))),
        DropPlan::FetchSample(sample) => Some(PendingImage::Sample(sample)),
        DropPlan::Ignore => None,
    };
    Ok(pending)
}
