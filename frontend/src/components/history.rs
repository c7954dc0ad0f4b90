use super::super::Model;
use shared::AnalysisRecord;
use yew::prelude::*;

/// How many records the sidebar shows before collapsing the rest.
const RECENT_LIMIT: usize = 3;

fn object_types(record: &AnalysisRecord) -> String {
    record
        .detection
        .object_counts
        .labels()
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn render_history(model: &Model) -> Html {
    let history = model.session.history();
    if history.is_empty() {
        return html! {};
    }

    html! {
        <div class="panel history-panel">
            <h2>{"Analysis History"}</h2>
            <div class="history-list">
                { for history.iter().map(|record| html! {
                    <div class="history-item" key={record.id.to_string()}>
                        <div class="history-item-header">
                            <span class="history-file">{ record.filename.clone() }</span>
                            <time class="history-time" datetime={record.iso_timestamp()}>
                                { record.display_timestamp() }
                            </time>
                        </div>
                        <p><strong>{"Objects Found: "}</strong>{ record.detection.total_objects }</p>
                        <p class="history-types">{ format!("Types: {}", object_types(record)) }</p>
                    </div>
                })}
            </div>
        </div>
    }
}

pub fn render_recent(model: &Model) -> Html {
    let history = model.session.history();
    if history.is_empty() {
        return html! {};
    }

    let hidden = history.len().saturating_sub(RECENT_LIMIT);
    html! {
        <div class="panel recent-panel">
            <h2>{"Recent Analysis"}</h2>
            { for model.session.recent(RECENT_LIMIT).iter().map(|record| html! {
                <div class="recent-item" key={record.id.to_string()}>
                    <div class="recent-file">{ record.filename.clone() }</div>
                    <div class="recent-count">{ format!("Objects: {}", record.detection.total_objects) }</div>
                </div>
            })}
            if hidden > 0 {
                <div class="recent-more">{ format!("+{} more", hidden) }</div>
            }
        </div>
    }
}
