use yew::prelude::*;

/// Renders the application header
pub fn render_header() -> Html {
    html! {
        <header class="app-header">
            <h1><i class="fa-solid fa-boxes-stacked"></i> {" InventoryLens Object Detection"}</h1>
            <p class="subtitle">{"AI-powered object detection for inventory analysis"}</p>
        </header>
    }
}
