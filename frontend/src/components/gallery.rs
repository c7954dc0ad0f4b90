use super::super::{Model, Msg};
use shared::{SampleImage, SAMPLE_IMAGES};
use web_sys::{DragEvent, HtmlImageElement};
use yew::prelude::*;

pub fn render_gallery(model: &Model, ctx: &Context<Model>) -> Html {
    html! {
        <div class="panel gallery-panel">
            <h2>{"Sample Images"}</h2>
            <p class="gallery-hint">{"Click or drag to upload"}</p>
            <div class="gallery-strip">
                { for SAMPLE_IMAGES.iter().map(|sample| render_sample(model, ctx, sample)) }
            </div>
            <div class="gallery-tip">{"Drag to upload area"}</div>
        </div>
    }
}

fn render_sample(model: &Model, ctx: &Context<Model>, sample: &'static SampleImage) -> Html {
    let link = ctx.link();
    let is_dragged = model.dragged_sample.is_some_and(|dragged| dragged.id == sample.id);

    let handle_drag_start = link.callback(move |e: DragEvent| {
        if let Some(transfer) = e.data_transfer() {
            transfer.set_effect_allowed("copy");
            // Firefox only starts a drag when some data is set.
            if let Err(err) = transfer.set_data("text/plain", "") {
                log::warn!("Could not set drag data: {:?}", err);
            }
        }
        Msg::GalleryDragStart(sample)
    });

    let placeholder = sample.placeholder_uri();
    let handle_load_error = Callback::from(move |e: Event| {
        let img: HtmlImageElement = e.target_unchecked_into();
        if !img.src().starts_with("data:") {
            log::warn!("Sample image {} failed to load", sample.src);
            img.set_src(&placeholder);
        }
    });

    html! {
        <div
            class={classes!("gallery-item", is_dragged.then_some("dragging"))}
            key={sample.id.to_string()}
            draggable="true"
            title={sample.description}
            ondragstart={handle_drag_start}
            ondragend={link.callback(|_: DragEvent| Msg::GalleryDragEnd)}
            onclick={link.callback(move |_| Msg::SampleClicked(sample))}
        >
            <img src={sample.src} alt={sample.name} onerror={handle_load_error} />
            <span class="gallery-id">{ sample.id }</span>
        </div>
    }
}
