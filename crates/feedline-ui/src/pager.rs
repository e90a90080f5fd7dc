//! # Horizontal pager
//!
//! `PagerState` tracks a continuous scroll position measured in pages plus
//! the page the pager last came to rest on (`settled_page`). While a drag is
//! in flight the position moves freely; `settle` snaps it to the nearest page
//! and publishes the new settled page through a [`Signal`], which is what
//! screens observe to react to page changes.
//!
//! `offset_fraction` is the signed distance, in pages, between the scroll
//! position and the settled page, clamped to `[-1, 1]`. It is positive while
//! dragging towards higher indices and negative while dragging back.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use feedline_core::prelude::*;

pub struct PagerState {
    page_count: Cell<usize>,
    position: Signal<f32>,
    settled_page: Signal<usize>,
    page_stride_px: Cell<f32>,
    drag: RefCell<Option<DragStart>>,
}

#[derive(Clone, Copy, Debug)]
struct DragStart {
    pointer_x: f32,
    position: f32,
}

impl Default for PagerState {
    fn default() -> Self {
        Self::new(0)
    }
}

impl PagerState {
    pub fn new(page_count: usize) -> Self {
        Self {
            page_count: Cell::new(page_count),
            position: signal(0.0),
            settled_page: signal(0),
            page_stride_px: Cell::new(0.0),
            drag: RefCell::new(None),
        }
    }

    pub fn page_count(&self) -> usize {
        self.page_count.get()
    }

    /// Updates the page count, pulling the position back into range.
    pub fn set_page_count(&self, count: usize) {
        if self.page_count.replace(count) == count {
            return;
        }
        let max = self.max_position();
        if self.position.get() > max {
            self.position.set(max);
        }
        if self.settled_page.get() as f32 > max {
            self.settled_page.set(max as usize);
        }
    }

    /// Scroll position in pages.
    pub fn position(&self) -> f32 {
        self.position.get()
    }

    pub fn settled_page(&self) -> usize {
        self.settled_page.get()
    }

    pub fn settled_page_signal(&self) -> &Signal<usize> {
        &self.settled_page
    }

    /// Page closest to the current scroll position.
    pub fn current_page(&self) -> usize {
        self.position.get().round().max(0.0) as usize
    }

    pub fn offset_fraction(&self) -> f32 {
        (self.position.get() - self.settled_page.get() as f32).clamp(-1.0, 1.0)
    }

    pub fn is_scroll_in_progress(&self) -> bool {
        self.drag.borrow().is_some()
    }

    pub fn page_stride(&self) -> f32 {
        self.page_stride_px.get()
    }

    pub fn set_page_stride(&self, stride_px: f32) {
        self.page_stride_px.set(stride_px.max(0.0));
    }

    /// Moves the position by `delta` pages, clamped to the first and last page.
    pub fn scroll_by_pages(&self, delta: f32) {
        let max = self.max_position();
        self.position.update(|p| *p = (*p + delta).clamp(0.0, max));
    }

    /// Snaps to the nearest page. The settled page signal only fires when the
    /// page actually changes.
    pub fn settle(&self) -> usize {
        *self.drag.borrow_mut() = None;
        let target = self.current_page().min(self.page_count().saturating_sub(1));
        self.position.set(target as f32);
        if self.settled_page.get() != target {
            log::debug!("pager settled on page {target}");
            self.settled_page.set(target);
        }
        target
    }

    /// Jumps to `page` and settles there.
    pub fn scroll_to_page(&self, page: usize) -> usize {
        *self.drag.borrow_mut() = None;
        let page = page.min(self.page_count().saturating_sub(1));
        self.position.set(page as f32);
        self.settle()
    }

    /// Scrolls by a distance in px along the paging axis, positive towards
    /// higher indices. Ignored until a page stride has been measured.
    pub fn drag_by_px(&self, delta_px: f32) {
        let stride = self.page_stride_px.get();
        if stride > 0.0 {
            self.scroll_by_pages(delta_px / stride);
        }
    }

    pub fn begin_drag(&self, pointer_x: f32) {
        *self.drag.borrow_mut() = Some(DragStart {
            pointer_x,
            position: self.position.get(),
        });
    }

    /// `forward_sign` is -1 when moving the pointer left advances the pager
    /// (LTR) and +1 when it is mirrored (RTL).
    pub fn drag_to(&self, pointer_x: f32, forward_sign: f32) {
        let Some(start) = *self.drag.borrow() else {
            return;
        };
        let stride = self.page_stride_px.get();
        if stride <= 0.0 {
            return;
        }
        let moved_pages = (pointer_x - start.pointer_x) / stride * forward_sign;
        let max = self.max_position();
        self.position
            .set((start.position + moved_pages).clamp(0.0, max));
    }

    fn max_position(&self) -> f32 {
        self.page_count().saturating_sub(1) as f32
    }
}

/// Swipeable, snap-to-page horizontal list. Every element of `pages` is one page.
pub fn HorizontalPager(
    modifier: Modifier,
    state: Rc<PagerState>,
    content_padding: PaddingValues,
    page_spacing: f32,
    pages: Vec<View>,
) -> View {
    state.set_page_count(pages.len());

    let forward_sign = match layout_direction() {
        LayoutDirection::Ltr => -1.0,
        LayoutDirection::Rtl => 1.0,
    };

    let modifier = modifier
        .padding_values(content_padding)
        .semantics(Semantics::new(Role::Pager))
        .on_pointer_down({
            let st = state.clone();
            move |e: PointerEvent| st.begin_drag(e.position.x)
        })
        .on_pointer_move({
            let st = state.clone();
            move |e: PointerEvent| st.drag_to(e.position.x, forward_sign)
        })
        .on_pointer_up({
            let st = state.clone();
            move |_e: PointerEvent| {
                st.settle();
            }
        });

    let get_position = {
        let st = state.clone();
        Rc::new(move || st.position())
    };
    let set_page_stride = {
        let st = state.clone();
        Rc::new(move |stride_px: f32| st.set_page_stride(stride_px))
    };

    View::new(
        0,
        ViewKind::Pager {
            page_spacing,
            get_position,
            set_page_stride,
        },
    )
    .modifier(modifier)
    .with_children(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn settle_snaps_to_nearest_and_publishes_once() {
        let state = PagerState::new(4);
        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let seen = seen.clone();
            state
                .settled_page_signal()
                .subscribe(move |p| seen.borrow_mut().push(*p));
        }

        state.scroll_by_pages(0.4);
        assert_eq!(state.settle(), 0);
        state.scroll_by_pages(0.6);
        assert_eq!(state.settle(), 1);
        assert_eq!(state.position(), 1.0);

        assert_eq!(*seen.borrow(), vec![1]);
    }

    #[test]
    fn offset_fraction_is_relative_to_settled_page() {
        let state = PagerState::new(5);
        state.scroll_to_page(2);
        state.scroll_by_pages(-0.25);
        assert!((state.offset_fraction() + 0.25).abs() < 1e-6);
        state.scroll_by_pages(2.0);
        assert_eq!(state.offset_fraction(), 1.0);
    }

    #[test]
    fn position_is_clamped_to_pages() {
        let state = PagerState::new(3);
        state.scroll_by_pages(-1.0);
        assert_eq!(state.position(), 0.0);
        state.scroll_by_pages(10.0);
        assert_eq!(state.position(), 2.0);

        state.set_page_count(2);
        assert_eq!(state.position(), 1.0);
    }

    #[test]
    fn drag_uses_measured_stride_and_direction() {
        let state = PagerState::new(3);
        state.set_page_stride(200.0);

        state.begin_drag(300.0);
        state.drag_to(200.0, -1.0);
        assert!(state.is_scroll_in_progress());
        assert!((state.position() - 0.5).abs() < 1e-6);
        state.drag_to(100.0, -1.0);
        assert_eq!(state.settle(), 1);
        assert!(!state.is_scroll_in_progress());

        // Mirrored: dragging right advances.
        state.begin_drag(0.0);
        state.drag_to(180.0, 1.0);
        assert_eq!(state.settle(), 2);
    }

    #[test]
    fn drag_without_stride_is_ignored() {
        let state = PagerState::new(3);
        state.begin_drag(0.0);
        state.drag_to(-500.0, -1.0);
        assert_eq!(state.position(), 0.0);
    }

    #[test]
    fn drag_by_px_converts_through_stride() {
        let state = PagerState::new(4);
        state.drag_by_px(50.0);
        assert_eq!(state.position(), 0.0);

        state.set_page_stride(100.0);
        state.drag_by_px(250.0);
        assert!((state.position() - 2.5).abs() < 1e-6);
        assert_eq!(state.settled_page(), 0);
        assert!((state.offset_fraction() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn empty_pager_stays_at_zero() {
        let state = PagerState::new(0);
        state.scroll_by_pages(3.0);
        assert_eq!(state.settle(), 0);
        assert_eq!(state.offset_fraction(), 0.0);
    }
}
