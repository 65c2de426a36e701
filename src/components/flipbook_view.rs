use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Point;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, EventTarget, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent, Window};
use yew::prelude::*;

use crate::canvas::CanvasSurface;
use crate::error::FlipbookError;
use crate::layout::fit_page;
use crate::machine::Cursor;
use crate::model::ViewerAction;
use crate::state::SessionHandle;

pub const CANVAS_ID: &str = "flipbook-canvas";

#[derive(Properties, PartialEq, Clone)]
pub struct FlipbookViewProps {
    pub session: SessionHandle,
    /// Page changes the machine settled; forwarded to the viewer reducer.
    pub on_actions: Callback<Vec<ViewerAction>>,
    /// Pages are loaded; schedules the one-shot peek hint.
    pub ready: bool,
}

#[function_component]
pub fn FlipbookView(props: &FlipbookViewProps) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        let session = props.session.clone();
        let on_actions = props.on_actions.clone();
        use_effect_with((), move |_| {
            let wiring = match Wiring::attach(&canvas_ref, session, on_actions) {
                Ok(wiring) => Some(wiring),
                Err(err) => {
                    log::error!("flipbook setup failed: {err}");
                    None
                }
            };
            move || drop(wiring)
        });
    }

    {
        let session = props.session.clone();
        use_effect_with(props.ready, move |ready| {
            let timer = if *ready { PeekTimer::schedule(session) } else { None };
            move || drop(timer)
        });
    }

    html! {
        <canvas
            id={CANVAS_ID}
            ref={canvas_ref}
            style="display:block; touch-action:none; user-select:none; box-shadow:0 10px 40px rgba(0,0,0,0.5);"
        />
    }
}

type Listener = Closure<dyn FnMut(Event)>;

/// DOM listeners and the animation loop for one mounted canvas. Dropping it
/// detaches everything.
struct Wiring {
    window: Window,
    listeners: Vec<(EventTarget, &'static str, Listener)>,
    raf_id: Rc<RefCell<Option<i32>>>,
    frame: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
}

impl Wiring {
    fn attach(
        canvas_ref: &NodeRef,
        session: SessionHandle,
        on_actions: Callback<Vec<ViewerAction>>,
    ) -> Result<Self, FlipbookError> {
        let window = web_sys::window().ok_or(FlipbookError::NoWindow)?;
        let canvas = canvas_ref
            .cast::<HtmlCanvasElement>()
            .ok_or_else(|| FlipbookError::CanvasMissing(CANVAS_ID.into()))?;
        apply_layout(&window, &canvas, &session)?;

        let mut wiring = Self {
            window: window.clone(),
            listeners: Vec::new(),
            raf_id: Rc::new(RefCell::new(None)),
            frame: Rc::new(RefCell::new(None)),
        };
        let canvas_target: EventTarget = canvas.clone().into();
        let window_target: EventTarget = window.clone().into();
        let publish = move |actions: Vec<ViewerAction>| {
            if !actions.is_empty() {
                on_actions.emit(actions);
            }
        };
        // Drag moves paint through the same surface as the frame loop.
        let surface = Rc::new(RefCell::new(CanvasSurface::from_canvas(&canvas)?));

        // Mouse: press on the canvas, track and release anywhere.
        {
            let session = session.clone();
            let canvas = canvas.clone();
            wiring.listen(&canvas_target, "mousedown", move |e: MouseEvent| {
                if e.button() != 0 {
                    return;
                }
                let pos = page_point(&canvas, e.client_x(), e.client_y());
                if session.borrow_mut().pointer_down(pos) {
                    e.prevent_default();
                }
                set_cursor(&canvas, session.borrow().cursor_at(pos));
            })?;
        }
        {
            let session = session.clone();
            let canvas = canvas.clone();
            let surface = surface.clone();
            wiring.listen(&window_target, "mousemove", move |e: MouseEvent| {
                let pos = page_point(&canvas, e.client_x(), e.client_y());
                let mut session = session.borrow_mut();
                session.pointer_move(pos, &mut *surface.borrow_mut());
                set_cursor(&canvas, session.cursor_at(pos));
            })?;
        }
        {
            let session = session.clone();
            let canvas = canvas.clone();
            let publish = publish.clone();
            wiring.listen(&window_target, "mouseup", move |e: MouseEvent| {
                let actions = session.borrow_mut().pointer_up();
                let pos = page_point(&canvas, e.client_x(), e.client_y());
                set_cursor(&canvas, session.borrow().cursor_at(pos));
                publish(actions);
            })?;
        }

        // Touch: first finger only.
        {
            let session = session.clone();
            let canvas = canvas.clone();
            wiring.listen(&canvas_target, "touchstart", move |e: TouchEvent| {
                if let Some(t) = e.touches().item(0) {
                    let pos = page_point(&canvas, t.client_x(), t.client_y());
                    if session.borrow_mut().pointer_down(pos) {
                        e.prevent_default();
                    }
                }
            })?;
        }
        {
            let session = session.clone();
            let canvas = canvas.clone();
            let surface = surface.clone();
            wiring.listen(&canvas_target, "touchmove", move |e: TouchEvent| {
                if let Some(t) = e.touches().item(0) {
                    let pos = page_point(&canvas, t.client_x(), t.client_y());
                    if session.borrow_mut().pointer_move(pos, &mut *surface.borrow_mut()) {
                        e.prevent_default();
                    }
                }
            })?;
        }
        for kind in ["touchend", "touchcancel"] {
            let session = session.clone();
            let publish = publish.clone();
            wiring.listen(&canvas_target, kind, move |_e: TouchEvent| {
                let actions = session.borrow_mut().pointer_up();
                publish(actions);
            })?;
        }

        {
            let session = session.clone();
            let publish = publish.clone();
            wiring.listen(&window_target, "keydown", move |e: KeyboardEvent| {
                let handled = session.borrow_mut().key(&e.key());
                if let Some(actions) = handled {
                    e.prevent_default();
                    publish(actions);
                }
            })?;
        }
        {
            let session = session.clone();
            let window = window.clone();
            let canvas = canvas.clone();
            wiring.listen(&window_target, "resize", move |_e: Event| {
                if let Err(err) = apply_layout(&window, &canvas, &session) {
                    log::warn!("resize failed: {err}");
                }
            })?;
        }

        wiring.start_loop(surface, session, publish);
        Ok(wiring)
    }

    fn listen<E>(
        &mut self,
        target: &EventTarget,
        kind: &'static str,
        mut handler: impl FnMut(E) + 'static,
    ) -> Result<(), FlipbookError>
    where
        E: JsCast + 'static,
    {
        let cb: Listener =
            Closure::wrap(Box::new(move |e: Event| handler(e.unchecked_into::<E>())) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(kind, cb.as_ref().unchecked_ref())?;
        self.listeners.push((target.clone(), kind, cb));
        Ok(())
    }

    /// Continuous RAF loop; the session only repaints when something changed.
    fn start_loop(
        &mut self,
        surface: Rc<RefCell<CanvasSurface>>,
        session: SessionHandle,
        publish: impl Fn(Vec<ViewerAction>) + 'static,
    ) {
        let frame_cell = self.frame.clone();
        let raf_id = self.raf_id.clone();
        let window = self.window.clone();
        let mut last_ts: Option<f64> = None;
        *self.frame.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
            let dt = last_ts.map_or(0.0, |prev| (ts - prev).max(0.0));
            last_ts = Some(ts);
            let actions = session.borrow_mut().frame(dt, &mut *surface.borrow_mut());
            publish(actions);
            if let Some(cb) = frame_cell.borrow().as_ref() {
                if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    *raf_id.borrow_mut() = Some(id);
                }
            }
        }) as Box<dyn FnMut(f64)>));

        if let Some(cb) = self.frame.borrow().as_ref() {
            if let Ok(id) = self.window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                *self.raf_id.borrow_mut() = Some(id);
            }
        }
    }
}

impl Drop for Wiring {
    fn drop(&mut self) {
        for (target, kind, cb) in &self.listeners {
            let _ = target.remove_event_listener_with_callback(kind, cb.as_ref().unchecked_ref());
        }
        if let Some(id) = self.raf_id.borrow_mut().take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        self.frame.borrow_mut().take();
    }
}

/// Pending peek hint; cancelled when dropped.
struct PeekTimer {
    window: Window,
    id: i32,
    _tick: Closure<dyn FnMut()>,
}

impl PeekTimer {
    fn schedule(session: SessionHandle) -> Option<Self> {
        let window = web_sys::window()?;
        let delay = session.borrow().peek_delay_ms();
        let tick = Closure::wrap(Box::new(move || {
            session.borrow_mut().peek();
        }) as Box<dyn FnMut()>);
        let id = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(tick.as_ref().unchecked_ref(), delay as i32)
            .ok()?;
        Some(Self { window, id, _tick: tick })
    }
}

impl Drop for PeekTimer {
    fn drop(&mut self) {
        self.window.clear_timeout_with_handle(self.id);
    }
}

/// Size the canvas for the current viewport and push the page size into the
/// session.
fn apply_layout(window: &Window, canvas: &HtmlCanvasElement, session: &SessionHandle) -> Result<(), FlipbookError> {
    let vw = window.inner_width()?.as_f64().unwrap_or(0.0);
    let vh = window.inner_height()?.as_f64().unwrap_or(0.0);
    let layout = fit_page(vw, vh, window.device_pixel_ratio(), session.borrow().layout_config());
    let (bw, bh) = layout.backing_size();
    canvas.set_width(bw);
    canvas.set_height(bh);
    let style = canvas.style();
    style.set_property("width", &format!("{}px", layout.page.width))?;
    style.set_property("height", &format!("{}px", layout.page.height))?;
    // Resizing the backing store resets the context transform.
    CanvasSurface::from_canvas(canvas)?.set_pixel_ratio(layout.dpr)?;
    session.borrow_mut().resize(layout.page);
    log::debug!("page {}x{} @{}x", layout.page.width, layout.page.height, layout.dpr);
    Ok(())
}

fn page_point(canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> Point {
    let rect = canvas.get_bounding_client_rect();
    Point::new(f64::from(client_x) - rect.left(), f64::from(client_y) - rect.top())
}

fn set_cursor(canvas: &HtmlCanvasElement, cursor: Cursor) {
    let _ = canvas.style().set_property("cursor", cursor.css());
}
