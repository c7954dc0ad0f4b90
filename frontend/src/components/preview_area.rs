use super::super::{Model, Msg};
use super::utils::debounce;
use yew::prelude::*;

const MAX_NAME_CHARS: usize = 20;

fn short_name(name: &str) -> String {
    if name.chars().count() > MAX_NAME_CHARS {
        let head: String = name.chars().take(MAX_NAME_CHARS - 3).collect();
        format!("{}...", head)
    } else {
        name.to_string()
    }
}

pub fn render_analysis_actions(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link().clone();

    html! {
        <div class="panel analysis-actions">
            <h2>{"Analysis Actions"}</h2>
            <div class="button-container">
                <button
                    class="analyze-btn"
                    onclick={debounce(300, move || link.send_message(Msg::Analyze))}
                    disabled={!model.session.can_analyze()}
                >
                    { render_analyze_button_content(model) }
                </button>
            </div>
        </div>
    }
}

fn render_analyze_button_content(model: &Model) -> Html {
    if model.session.is_analyzing() {
        html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Running Analysis..."}</> }
    } else {
        let label = model
            .session
            .current_image()
            .map(|image| format!(" Full Analysis of \"{}\"", short_name(&image.file_name)))
            .unwrap_or_else(|| " Full Analysis".to_string());

        html! { <><i class="fa-solid fa-magnifying-glass"></i>{ label }</> }
    }
}
