mod api;
mod components;
mod config;
mod source;

use components::{gallery, handlers, header, history, preview_area, results, upload_section};
use components::export::render_export;
use components::utils::render_error_message;
use gloo_events::{EventListener, EventListenerOptions};
use gloo_file::File as GlooFile;
use shared::{ApiConfig, DetectionResult, ImageHandle, LensError, SampleImage, SessionState};
use web_sys::DragEvent;
use yew::prelude::*;

// Yew msg components
pub enum Msg {
    // Image acquisition
    FilePicked(GlooFile),
    SampleClicked(&'static SampleImage),
    HandleDrop(DragEvent),
    ImageAcquired(ImageHandle),
    AcquireFailed(LensError),

    // Gallery drag tracking
    GalleryDragStart(&'static SampleImage),
    GalleryDragEnd,

    // Analysis operations
    Analyze,
    AnalysisSettled(shared::Result<Option<DetectionResult>>),

    // Export
    ExportReport,

    // UI states
    SetDraggingOver(bool),
    DismissError,
}

// Main component
pub struct Model {
    session: SessionState,
    api: shared::Result<ApiConfig>,
    dragged_sample: Option<&'static SampleImage>,
    is_dragging_over: bool,
    _drop_guards: Vec<EventListener>,
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        let mut session = SessionState::new();
        let api = config::api_config();
        if let Err(err) = &api {
            log::error!("Detection service is not configured: {}", err);
            session.note_error(err.to_string());
        }

        Self {
            session,
            api,
            dragged_sample: None,
            is_dragging_over: false,
            _drop_guards: install_drop_guards(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            // Image acquisition
            Msg::FilePicked(file) => handlers::handle_file_picked(self, ctx, file),
            Msg::SampleClicked(sample) => handlers::handle_sample_clicked(ctx, sample),
            Msg::HandleDrop(event) => handlers::handle_drop(self, ctx, event),
            Msg::ImageAcquired(handle) => handlers::handle_image_acquired(self, handle),
            Msg::AcquireFailed(err) => handlers::handle_acquire_failed(self, err),

            Msg::GalleryDragStart(sample) => {
                self.dragged_sample = Some(sample);
                true
            }
            Msg::GalleryDragEnd => {
                self.dragged_sample = None;
                true
            }

            // Analysis operations
            Msg::Analyze => handlers::handle_analyze(self, ctx),
            Msg::AnalysisSettled(outcome) => handlers::handle_analysis_settled(self, outcome),

            Msg::ExportReport => handlers::handle_export(self),

            // UI states
            Msg::SetDraggingOver(is_dragging_over) => {
                self.is_dragging_over = is_dragging_over;
                true
            }
            Msg::DismissError => {
                self.session.clear_error();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                { header::render_header() }
                { render_error_message(self, ctx) }

                <div class="main-grid">
                    <main class="main-content">
                        { upload_section::render_upload_section(self, ctx) }
                        { preview_area::render_analysis_actions(self, ctx) }
                        { results::render_results(self) }
                        { history::render_history(self) }
                    </main>

                    <aside class="sidebar">
                        { gallery::render_gallery(self, ctx) }
                        { history::render_recent(self) }
                        { render_export(self, ctx) }
                    </aside>
                </div>

                <footer class="app-footer">
                    <p>{"InventoryLens Object Detection"}</p>
                    <p class="subtitle">{"Object Detection: facebook/detr-resnet-50"}</p>
                </footer>
            </div>
        }
    }
}

/// Keeps a file dropped outside the upload zone from replacing the page.
fn install_drop_guards() -> Vec<EventListener> {
    let Some(window) = web_sys::window() else {
        log::warn!("No window; drop guards not installed");
        return Vec::new();
    };

    ["dragover", "drop"]
        .into_iter()
        .map(|event_type| {
            EventListener::new_with_options(
                &window,
                event_type,
                EventListenerOptions::enable_prevent_default(),
                |event| event.prevent_default(),
            )
        })
        .collect()
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("InventoryLens starting...");
    yew::Renderer::<Model>::new().render();
}
