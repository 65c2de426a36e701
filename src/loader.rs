//! Page image loading.
//!
//! All pages are requested at once; the batch resolves with the images in
//! page order once every one has loaded, or fails on the first error.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::HtmlImageElement;

use crate::error::FlipbookError;

#[cfg(test)]
#[path = "loader_test.rs"]
mod loader_test;

/// Completion bookkeeping for a fixed number of parallel loads.
#[derive(Debug)]
pub struct LoadBatch<T> {
    slots: Vec<Option<T>>,
    remaining: usize,
    settled: bool,
}

impl<T> LoadBatch<T> {
    pub fn new(len: usize) -> Self {
        Self {
            slots: (0..len).map(|_| None).collect(),
            remaining: len,
            settled: false,
        }
    }

    /// Record `item` for slot `index`. Returns every item, in slot order, once
    /// the last slot fills.
    pub fn loaded(&mut self, index: usize, item: T) -> Option<Vec<T>> {
        if self.settled {
            return None;
        }
        let slot = self.slots.get_mut(index)?;
        if slot.is_none() {
            self.remaining -= 1;
        }
        *slot = Some(item);
        if self.remaining > 0 {
            return None;
        }
        self.settled = true;
        Some(std::mem::take(&mut self.slots).into_iter().flatten().collect())
    }

    /// Record a failure; `true` only for the first one, which settles the batch.
    pub fn failed(&mut self) -> bool {
        if self.settled {
            return false;
        }
        self.settled = true;
        true
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }
}

/// Per-slot owners, each released at most once.
#[derive(Debug)]
pub struct Handles<H> {
    slots: Vec<Option<H>>,
}

impl<H> Handles<H> {
    pub fn with_capacity(len: usize) -> Self {
        Self {
            slots: Vec::with_capacity(len),
        }
    }

    /// Store `handle` in the next slot and return its index.
    pub fn hold(&mut self, handle: H) -> usize {
        self.slots.push(Some(handle));
        self.slots.len() - 1
    }

    pub fn release(&mut self, index: usize) -> Option<H> {
        self.slots.get_mut(index).and_then(Option::take)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Handles not yet released.
    pub fn live(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}

pub type LoadResult = Result<Vec<HtmlImageElement>, FlipbookError>;

/// Both callbacks of one image. Dropping it detaches and frees them.
struct Watch {
    img: HtmlImageElement,
    _onload: Closure<dyn FnMut()>,
    _onerror: Closure<dyn FnMut()>,
}

impl Drop for Watch {
    fn drop(&mut self) {
        self.img.set_onload(None);
        self.img.set_onerror(None);
    }
}

struct Pending {
    batch: LoadBatch<HtmlImageElement>,
    on_done: Option<Box<dyn FnOnce(LoadResult)>>,
    watches: Handles<Watch>,
}

fn finish(pending: &Rc<RefCell<Pending>>, result: LoadResult) {
    let done = pending.borrow_mut().on_done.take();
    if let Some(done) = done {
        done(result);
    }
}

/// Whichever callback fires first releases the pair.
fn release(pending: &Rc<RefCell<Pending>>, index: usize) {
    let watch = pending.borrow_mut().watches.release(index);
    drop(watch);
}

/// Start loading `srcs`; `on_done` runs exactly once.
pub fn load_pages<F>(srcs: &[String], on_done: F) -> Result<(), FlipbookError>
where
    F: FnOnce(LoadResult) + 'static,
{
    if srcs.is_empty() {
        on_done(Ok(Vec::new()));
        return Ok(());
    }
    log::info!("loading {} pages", srcs.len());
    let pending = Rc::new(RefCell::new(Pending {
        batch: LoadBatch::new(srcs.len()),
        on_done: Some(Box::new(on_done)),
        watches: Handles::with_capacity(srcs.len()),
    }));

    for (index, src) in srcs.iter().enumerate() {
        let img = match HtmlImageElement::new() {
            Ok(img) => img,
            Err(err) => {
                pending.borrow_mut().watches.clear();
                return Err(err.into());
            }
        };
        let onload: Closure<dyn FnMut()> = {
            let pending = pending.clone();
            let img = img.clone();
            Closure::once(move || {
                release(&pending, index);
                let ready = pending.borrow_mut().batch.loaded(index, img);
                if let Some(images) = ready {
                    log::info!("all {} pages loaded", images.len());
                    finish(&pending, Ok(images));
                }
            })
        };
        let onerror: Closure<dyn FnMut()> = {
            let pending = pending.clone();
            let src = src.clone();
            Closure::once(move || {
                release(&pending, index);
                let first = pending.borrow_mut().batch.failed();
                if first {
                    log::error!("failed to load {src}");
                    finish(&pending, Err(FlipbookError::ImageLoad { src }));
                }
            })
        };
        img.set_onload(Some(onload.as_ref().unchecked_ref()));
        img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        pending.borrow_mut().watches.hold(Watch {
            img: img.clone(),
            _onload: onload,
            _onerror: onerror,
        });
        img.set_src(src);
    }
    Ok(())
}
