use super::{
    flipbook_view::FlipbookView, nav_controls::NavControls, page_indicator::PageIndicator,
    status_overlay::StatusOverlay,
};
use crate::config::FlipbookConfig;
use crate::loader::{LoadResult, load_pages};
use crate::model::{ViewerAction, ViewerState};
use crate::state::{FlipDirection, SessionHandle};
use yew::prelude::*;

const LOAD_ERROR: &str = "Error loading pages. Please refresh.";

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| {
        web_sys::window()
            .and_then(|win| win.document())
            .map(|doc| FlipbookConfig::from_document(&doc))
            .unwrap_or_default()
    });
    let viewer = use_reducer(ViewerState::default);
    let session = {
        let config = config.clone();
        use_memo((), move |_| SessionHandle::new(&config))
    };

    // Load every page up front
    {
        let session = (*session).clone();
        let dispatcher = viewer.dispatcher();
        let pages = config.pages.clone();
        use_effect_with((), move |_| {
            let on_done = {
                let dispatcher = dispatcher.clone();
                move |result: LoadResult| match result {
                    Ok(images) if images.is_empty() => dispatcher.dispatch(ViewerAction::LoadFailed {
                        message: "No pages configured.".into(),
                    }),
                    Ok(images) => {
                        let total = images.len();
                        session.borrow_mut().set_pages(images);
                        dispatcher.dispatch(ViewerAction::Loaded { total });
                    }
                    Err(err) => {
                        log::error!("{err}");
                        dispatcher.dispatch(ViewerAction::LoadFailed {
                            message: LOAD_ERROR.into(),
                        });
                    }
                }
            };
            if let Err(err) = load_pages(&pages, on_done) {
                log::error!("{err}");
                dispatcher.dispatch(ViewerAction::LoadFailed {
                    message: LOAD_ERROR.into(),
                });
            }
            || ()
        });
    }

    let on_actions = {
        let dispatcher = viewer.dispatcher();
        Callback::from(move |actions: Vec<ViewerAction>| {
            for action in actions {
                dispatcher.dispatch(action);
            }
        })
    };
    let flip = |direction: FlipDirection| {
        let session = (*session).clone();
        let on_actions = on_actions.clone();
        Callback::from(move |_| {
            let actions = session.borrow_mut().flip(direction);
            on_actions.emit(actions);
        })
    };

    html! {
        <div id="flipbook-container" style="position:relative; display:flex; flex-direction:column; align-items:center; justify-content:center; min-height:100vh; background:#1b1b1f; color:#c9d1d9; font-family:sans-serif;">
            <div style="position:relative;">
                <FlipbookView
                    session={(*session).clone()}
                    on_actions={on_actions.clone()}
                    ready={viewer.is_ready()}
                />
                <NavControls
                    can_go_back={viewer.can_go_back()}
                    can_go_forward={viewer.can_go_forward()}
                    on_previous={flip(FlipDirection::Backward)}
                    on_next={flip(FlipDirection::Forward)}
                />
                <StatusOverlay status={viewer.status.clone()} />
            </div>
            <PageIndicator text={viewer.indicator_text()} />
        </div>
    }
}
