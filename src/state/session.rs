// View-side flipbook session: the machine plus everything the DOM host needs
// around it (page images, sound, redraw flag).
use std::cell::RefCell;
use std::ops::Deref;
use std::rc::Rc;

use kurbo::{Point, Size};
use web_sys::HtmlImageElement;

use crate::audio::FlipSound;
use crate::config::{CurlTuning, FlipbookConfig, LayoutConfig};
use crate::machine::{Cursor, Flipbook, NavKey, Notice};
use crate::model::ViewerAction;
use crate::render::render;
use crate::state::FlipDirection;
use crate::surface::DrawingSurface;

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

pub struct Session<I> {
    book: Flipbook,
    pages: Vec<I>,
    tuning: CurlTuning,
    layout: LayoutConfig,
    peek_delay_ms: f64,
    sound: FlipSound,
    dirty: bool,
}

impl<I> Session<I> {
    pub fn new(config: &FlipbookConfig) -> Self {
        Self {
            book: Flipbook::new(Size::ZERO, 0, config.motion.clone(), config.curl.midpoint_margin),
            pages: Vec::new(),
            tuning: config.curl.clone(),
            layout: config.layout.clone(),
            peek_delay_ms: config.motion.peek_delay_ms,
            sound: FlipSound::new(config.sound),
            dirty: true,
        }
    }

    pub fn book(&self) -> &Flipbook {
        &self.book
    }

    pub fn layout_config(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn peek_delay_ms(&self) -> f64 {
        self.peek_delay_ms
    }

    pub fn set_pages(&mut self, pages: Vec<I>) {
        self.book.set_page_count(pages.len());
        self.pages = pages;
        self.dirty = true;
    }

    pub fn resize(&mut self, page: Size) {
        self.book.set_page_size(page);
        self.dirty = true;
    }

    pub fn pointer_down(&mut self, pos: Point) -> bool {
        self.sound.unlock();
        let started = self.book.pointer_down(pos);
        self.dirty |= started;
        started
    }

    /// Returns whether a drag consumed the move. A consumed move is painted
    /// right away rather than on the next frame.
    pub fn pointer_move<S>(&mut self, pos: Point, surface: &mut S) -> bool
    where
        S: DrawingSurface<Image = I>,
    {
        let moved = self.book.pointer_move(pos);
        if moved {
            self.repaint(surface);
        }
        moved
    }

    pub fn pointer_up(&mut self) -> Vec<ViewerAction> {
        let was_dragging = self.book.state().is_dragging();
        let notices = self.book.pointer_up();
        self.dirty |= was_dragging;
        self.settle(notices)
    }

    pub fn cursor_at(&self, pos: Point) -> Cursor {
        self.book.cursor_at(pos)
    }

    pub fn flip(&mut self, direction: FlipDirection) -> Vec<ViewerAction> {
        self.sound.unlock();
        let notices = self.book.flip(direction);
        self.settle(notices)
    }

    /// `None` when `key` is not a navigation key.
    pub fn key(&mut self, key: &str) -> Option<Vec<ViewerAction>> {
        let direction = match NavKey::from_key(key)? {
            NavKey::Next => FlipDirection::Forward,
            NavKey::Previous => FlipDirection::Backward,
        };
        Some(self.flip(direction))
    }

    pub fn peek(&mut self) -> bool {
        let started = self.book.peek();
        self.dirty |= started;
        started
    }

    /// Step animations by `dt_ms` and repaint when anything changed.
    pub fn frame<S>(&mut self, dt_ms: f64, surface: &mut S) -> Vec<ViewerAction>
    where
        S: DrawingSurface<Image = I>,
    {
        if self.book.state().is_animating() {
            self.dirty = true;
        }
        let notices = self.book.advance(dt_ms);
        let actions = self.settle(notices);
        if self.dirty {
            self.repaint(surface);
        }
        actions
    }

    fn repaint<S>(&mut self, surface: &mut S)
    where
        S: DrawingSurface<Image = I>,
    {
        self.dirty = false;
        let state = self.book.state();
        if let Err(err) = render(surface, state, &self.pages, self.book.page_size(), &self.tuning) {
            log::error!("render failed: {err}");
        }
    }

    fn settle(&mut self, notices: Vec<Notice>) -> Vec<ViewerAction> {
        let mut actions = Vec::new();
        for notice in notices {
            self.dirty = true;
            match notice {
                Notice::FlipStarted { .. } => self.sound.play(),
                Notice::PageChanged { page, total } => actions.push(ViewerAction::PageChanged { page, total }),
            }
        }
        actions
    }
}

/// Shared session for the Yew tree; compares by identity.
#[derive(Clone)]
pub struct SessionHandle(Rc<RefCell<Session<HtmlImageElement>>>);

impl SessionHandle {
    pub fn new(config: &FlipbookConfig) -> Self {
        Self(Rc::new(RefCell::new(Session::new(config))))
    }
}

impl Deref for SessionHandle {
    type Target = RefCell<Session<HtmlImageElement>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl PartialEq for SessionHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
