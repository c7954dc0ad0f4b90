use super::super::Model;
use yew::prelude::*;

pub fn render_results(model: &Model) -> Html {
    let Some(result) = model.session.current_result() else {
        return html! {};
    };

    html! {
        <div class="panel results-container">
            <h2>{"Object Detection Results"}</h2>
            <div class="result-summary">
                <p class="summary">{ result.summary.clone() }</p>
                if !result.object_counts.is_empty() {
                    <div class="object-counts">
                        <p class="counts-title">{"Object Counts:"}</p>
                        { for result.object_counts.iter().map(|(label, count)| html! {
                            <div class="result-item" key={label.clone()}>
                                <span class="result-label">{ label.clone() }</span>
                                <span class="result-value">{ *count }</span>
                            </div>
                        })}
                    </div>
                }
            </div>
        </div>
    }
}
