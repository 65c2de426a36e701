use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct NavControlsProps {
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub on_previous: Callback<()>,
    pub on_next: Callback<()>,
}

#[function_component]
pub fn NavControls(props: &NavControlsProps) -> Html {
    let previous_cb = {
        let cb = props.on_previous.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let next_cb = {
        let cb = props.on_next.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let arrow_style = |enabled: bool| {
        format!(
            "position:absolute; top:50%; transform:translateY(-50%); width:44px; height:44px; border-radius:50%; border:none; background:rgba(0,0,0,0.35); color:#fff; font-size:22px; cursor:{}; opacity:{};",
            if enabled { "pointer" } else { "default" },
            if enabled { "1" } else { "0.25" },
        )
    };
    html! {
        <>
            <button
                id="nav-left"
                aria-label="Previous page"
                class={classes!("nav-arrow", (!props.can_go_back).then_some("disabled"))}
                style={format!("{} left:-56px;", arrow_style(props.can_go_back))}
                disabled={!props.can_go_back}
                onclick={previous_cb}
            >{"‹"}</button>
            <button
                id="nav-right"
                aria-label="Next page"
                class={classes!("nav-arrow", (!props.can_go_forward).then_some("disabled"))}
                style={format!("{} right:-56px;", arrow_style(props.can_go_forward))}
                disabled={!props.can_go_forward}
                onclick={next_cb}
            >{"›"}</button>
        </>
    }
}
