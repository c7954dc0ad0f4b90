use gloo_file::Blob;
use gloo_net::http::Request;
use shared::{interpret_response, ApiConfig, DetectionResult, ImageHandle, LensError};
use wasm_bindgen::JsValue;
use web_sys::FormData;

fn form_error(value: JsValue) -> LensError {
    LensError::Network(format!("could not build upload form: {:?}", value))
}

fn build_upload_form(image: &ImageHandle) -> shared::Result<FormData> {
    let blob = Blob::new_with_options(&image.bytes[..], Some(image.media_type.as_str()));
    let raw: &web_sys::Blob = blob.as_ref();

    let form_data = FormData::new().map_err(form_error)?;
    form_data
        .append_with_blob_and_filename("file", raw, &image.file_name)
        .map_err(form_error)?;
    Ok(form_data)
}

/// Uploads `image` to `POST {base}/analyze`.
///
/// `Ok(None)` when the service answered but its detection step failed.
/// Nothing is retried here; a retry is a new click.
pub async fn analyze(
    config: &ApiConfig,
    image: &ImageHandle,
) -> shared::Result<Option<DetectionResult>> {
    let url = config.analyze_url()?;
    let form_data = build_upload_form(image)?;

    log::info!("Making request to: {}", url);
    let request = Request::post(&url)
        .body(form_data)
        .map_err(|e| LensError::Network(e.to_string()))?;

    let response = request.send().await.map_err(|e| {
        LensError::Network(format!(
            "{}. Check if backend is running at {}",
            e,
            config.base_url()
        ))
    })?;

    let status = response.status();
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) if response.ok() => return Err(LensError::MalformedResponse(e.to_string())),
        Err(_) => String::new(),
    };

    interpret_response(status, &body)
}
