use super::super::Model;
use super::super::Msg;
use super::utils::{click_element, debounce};
use gloo_file::File as GlooFile;
use web_sys::{DragEvent, HtmlInputElement};
use yew::prelude::*;

const FILE_INPUT_ID: &str = "file-input";

pub fn render_upload_section(model: &Model, ctx: &Context<Model>) -> Html {
    html! {
        <div class="panel upload-section">
            <h2>{"Upload Image"}</h2>
            { render_file_input_area(model, ctx) }
            { render_selected_image_preview(model) }
        </div>
    }
}

fn render_file_input_area(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();

    let handle_change = link.batch_callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let file = input.files().and_then(|files| files.item(0));

        // Reset so that picking the same file again fires another change.
        input.set_value("");

        file.map(|file| Msg::FilePicked(GlooFile::from(file)))
    });

    let handle_drag_over = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDraggingOver(true)
    });

    let handle_drag_leave = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDraggingOver(false)
    });

    let handle_drop = link.callback(Msg::HandleDrop);

    html! {
        <>
            <input
                type="file"
                id={FILE_INPUT_ID}
                accept="image/*"
                style="display: none;"
                onchange={handle_change}
            />

            <div
                id="drop-zone"
                class={classes!("upload-area", model.is_dragging_over.then_some("drag-over"))}
                ondragover={handle_drag_over}
                ondragleave={handle_drag_leave}
                ondrop={handle_drop}
                onclick={debounce(300, || click_element(FILE_INPUT_ID))}
            >
                <div class="upload-placeholder">
                    if model.is_dragging_over {
                        <>
                            <i class="fa-solid fa-bullseye"></i>
                            <p>{"Drop your image here!"}</p>
                        </>
                    } else {
                        <>
                            <i class="fa-solid fa-cloud-arrow-up"></i>
                            <p>{"Drag & drop an image here, or click to select"}</p>
                        </>
                    }
                    <p class="file-types">{"Supports JPG, PNG, WEBP • Or drag from sample gallery"}</p>
                </div>
            </div>
        </>
    }
}

fn render_selected_image_preview(model: &Model) -> Html {
    match model.session.current_image() {
        Some(image) => html! {
            <div class="selected-preview">
                <img id="actual-image-preview"
                    src={image.preview.clone()}
                    alt="Preview"
                    style="max-width:100%; max-height: 256px; object-fit: contain;" />
                <p class="file-name">{ format!("File: {}", image.file_name) }</p>
            </div>
        },
        None => html! {},
    }
}
