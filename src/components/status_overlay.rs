use crate::model::LoadStatus;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StatusOverlayProps {
    pub status: LoadStatus,
}

#[function_component]
pub fn StatusOverlay(props: &StatusOverlayProps) -> Html {
    let (text, color) = match &props.status {
        LoadStatus::Ready => return html! {},
        LoadStatus::Loading => ("Loading pages...".to_string(), "#c9d1d9"),
        LoadStatus::Failed(message) => (message.clone(), "#f85149"),
    };
    html! {
        <div style={format!("position:absolute; inset:0; display:flex; align-items:center; justify-content:center; text-align:center; padding:24px; background:rgba(0,0,0,0.55); color:{color}; font-size:16px;")}>
            { text }
        </div>
    }
}
