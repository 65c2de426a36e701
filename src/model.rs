//! Viewer-level state shown around the canvas: load status and the page
//! indicator. The curl itself lives in [`crate::machine::Flipbook`]; this
//! reducer only mirrors what the chrome needs to re-render.

use std::rc::Rc;

use yew::Reducible;

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Loading,
    Ready,
    Failed(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewerState {
    pub status: LoadStatus,
    /// Zero-based.
    pub current_page: usize,
    pub total_pages: usize,
}

impl ViewerState {
    /// One-based `"n / total"`.
    pub fn indicator_text(&self) -> String {
        if self.total_pages == 0 {
            return String::new();
        }
        format!("{} / {}", self.current_page + 1, self.total_pages)
    }

    pub fn is_ready(&self) -> bool {
        self.status == LoadStatus::Ready
    }

    pub fn can_go_back(&self) -> bool {
        self.is_ready() && self.current_page > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.is_ready() && self.current_page + 1 < self.total_pages
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewerAction {
    Loaded { total: usize },
    LoadFailed { message: String },
    PageChanged { page: usize, total: usize },
}

impl Reducible for ViewerState {
    type Action = ViewerAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use ViewerAction::*;
        let mut new = (*self).clone();
        match action {
            Loaded { total } => {
                new.status = LoadStatus::Ready;
                new.total_pages = total;
                new.current_page = 0;
            }
            LoadFailed { message } => {
                new.status = LoadStatus::Failed(message);
            }
            PageChanged { page, total } => {
                if total == 0 || page >= total {
                    return self;
                }
                new.current_page = page;
                new.total_pages = total;
            }
        }
        if new == *self {
            return self;
        }
        Rc::new(new)
    }
}
