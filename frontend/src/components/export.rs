use super::super::{Model, Msg};
use super::utils::debounce;
use gloo_file::{Blob, ObjectUrl};
use wasm_bindgen::JsCast;
use web_sys::HtmlAnchorElement;
use yew::prelude::*;

/// Offers `content` as a plain-text file download.
pub fn download_text(file_name: &str, content: &str) -> Result<(), String> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or("no document")?;
    let body = document.body().ok_or("no document body")?;

    let url = ObjectUrl::from(Blob::new_with_options(content, Some("text/plain")));
    let anchor = document
        .create_element("a")
        .map_err(|e| format!("{:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| "not an anchor element".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(file_name);

    body.append_child(&anchor).map_err(|e| format!("{:?}", e))?;
    anchor.click();
    body.remove_child(&anchor).map_err(|e| format!("{:?}", e))?;
    // Dropping `url` revokes it.
    Ok(())
}

pub fn render_export(model: &Model, ctx: &Context<Model>) -> Html {
    if !model.session.has_report_data() {
        return html! {};
    }

    let link = ctx.link().clone();
    html! {
        <div class="panel export-panel">
            <h2>{"Export Results"}</h2>
            <button
                class="analyze-btn export-btn"
                onclick={debounce(300, move || link.send_message(Msg::ExportReport))}
            >
                <i class="fa-solid fa-file-arrow-down"></i>{" Download Text Report"}
            </button>
        </div>
    }
}
