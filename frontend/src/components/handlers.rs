use super::super::{Model, Msg};
use super::export::download_text;
use crate::api;
use crate::source::{self, PendingImage};
use chrono::Local;
use gloo_file::File as GlooFile;
use shared::{DetectionResult, ImageHandle, LensError, SampleImage};
use wasm_bindgen_futures::spawn_local;
use web_sys::DragEvent;
use yew::prelude::*;

fn spawn_acquisition(ctx: &Context<Model>, pending: PendingImage) {
    spawn_local({
        let link = ctx.link().clone();

        async move {
            match source::acquire(pending).await {
                Ok(handle) => link.send_message(Msg::ImageAcquired(handle)),
                Err(e) => link.send_message(Msg::AcquireFailed(e)),
            }
        }
    });
}

pub fn handle_file_picked(model: &mut Model, ctx: &Context<Model>, file: GlooFile) -> bool {
    if let Err(e) = shared::source::ensure_image(&file.raw_mime_type()) {
        log::warn!("Skipping non-image file: {}", file.name());
        model.session.note_error(e.to_string());
        return true;
    }

    spawn_acquisition(ctx, PendingImage::File(file));
    false
}

pub fn handle_sample_clicked(ctx: &Context<Model>, sample: &'static SampleImage) -> bool {
    spawn_acquisition(ctx, PendingImage::Sample(sample));
    false
}

pub fn handle_drop(model: &mut Model, ctx: &Context<Model>, event: DragEvent) -> bool {
    event.prevent_default();
    model.is_dragging_over = false;

    match source::acquire_from_drop(&event, model.dragged_sample) {
        Ok(Some(pending)) => spawn_acquisition(ctx, pending),
        Ok(None) => log::debug!("Drop carried nothing to load"),
        Err(e) => {
            log::warn!("Rejected drop: {}", e);
            model.session.note_error(e.to_string());
        }
    }

    true
}

pub fn handle_image_acquired(model: &mut Model, handle: ImageHandle) -> bool {
    log::info!("Image ready: {} ({})", handle.file_name, handle.media_type);
    model.session.select_image(handle);
    true
}

pub fn handle_acquire_failed(model: &mut Model, error: LensError) -> bool {
    log::error!("Image acquisition failed: {}", error);
    model.session.note_error(error.to_string());
    true
}

pub fn handle_analyze(model: &mut Model, ctx: &Context<Model>) -> bool {
    let config = match &model.api {
        Ok(config) => config.clone(),
        Err(e) => {
            model.session.note_error(e.to_string());
            return true;
        }
    };

    let image = match model.session.begin_analysis() {
        Ok(image) => image,
        Err(LensError::AnalysisInProgress) => return false,
        Err(e) => {
            model.session.note_error(e.to_string());
            return true;
        }
    };

    spawn_local({
        let link = ctx.link().clone();

        async move {
            let outcome = api::analyze(&config, &image).await;
            link.send_message(Msg::AnalysisSettled(outcome));
        }
    });

    true
}

pub fn handle_analysis_settled(
    model: &mut Model,
    outcome: shared::Result<Option<DetectionResult>>,
) -> bool {
    match &outcome {
        Ok(Some(result)) => log::info!("Analysis finished: {}", result.summary),
        Ok(None) => log::warn!("Analysis finished without a detection result"),
        Err(e) => log::error!("Analysis error: {}", e),
    }

    if let Err(e) = model.session.settle(outcome, Local::now().fixed_offset()) {
        log::warn!("Ignoring analysis outcome: {}", e);
        return false;
    }
    true
}

pub fn handle_export(model: &mut Model) -> bool {
    let report = model.session.report(Local::now().fixed_offset());

    match download_text(&report.file_name, &report.content) {
        Ok(()) => {
            log::info!("Exported report {}", report.file_name);
            false
        }
        Err(e) => {
            log::error!("Report download failed: {}", e);
            model.session.note_error(format!("Could not download report: {}", e));
            true
        }
    }
}
