use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct PageIndicatorProps {
    pub text: String,
}

#[function_component]
pub fn PageIndicator(props: &PageIndicatorProps) -> Html {
    if props.text.is_empty() {
        return html! {};
    }
    html! {
        <div id="page-indicator" style="margin-top:12px; font-size:14px; letter-spacing:1px; color:rgba(255,255,255,0.7); font-variant-numeric:tabular-nums;">
            { props.text.clone() }
        </div>
    }
}
