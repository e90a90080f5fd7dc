//! # Featured section
//!
//! A horizontally paged carousel of posts over a decorative background. The
//! background cross-fades between blurred post images as the pager moves
//! (see [`featured_item_alpha`]), or falls back to a tinted gradient when the
//! target cannot blur.
//!
//! While mounted, the section observes the pager's settled page and asks the
//! shared [`DynamicColorState`] to recompute the accent color from the image
//! of the post that came to rest. Each request carries a token from a
//! [`TaskSlot`], so settling again cancels the previous request and only the
//! latest page's color is applied. The observation is keyed on the identity
//! of the pager state and of the post list: passing a different `Rc` for
//! either tears the old subscription down and starts a new one.

mod alpha;
mod background;
mod item;
mod padding;

pub use alpha::{OFFSET_EPSILON, featured_item_alpha};
pub use background::{BackgroundStyle, FeaturedSectionBlurredBackground, fallback_gradient};
pub use item::{FeaturedCallbacks, FeaturedPostItem};
pub use padding::{FeaturedPadding, featured_padding};

use std::rc::Rc;

use feedline_core::*;
use feedline_ui::{Box, HorizontalPager, PagerState, Stack, ViewExt};

use crate::config::FeaturedLayout;
use crate::dynamic_color::DynamicColorState;
use crate::post::PostSummary;

#[derive(Clone)]
pub struct FeaturedSectionProps {
    pub modifier: Modifier,
    pub insets: WindowInsets,
    pub pager_state: Rc<PagerState>,
    pub posts: Rc<Vec<PostSummary>>,
    pub color_state: Rc<dyn DynamicColorState>,
    pub layout: FeaturedLayout,
    pub callbacks: FeaturedCallbacks,
}

pub fn FeaturedSection(props: FeaturedSectionProps) -> View {
    let FeaturedSectionProps {
        modifier,
        insets,
        pager_state,
        posts,
        color_state,
        layout,
        callbacks,
    } = props;

    observe_settled_page(&pager_state, &posts, &color_state);

    if posts.is_empty() {
        return Box(modifier);
    }

    let padding = featured_padding(insets, layout_direction(), &layout);
    let style = BackgroundStyle::for_capabilities(platform_capabilities());

    let background = FeaturedSectionBlurredBackground(
        Modifier::new(),
        style,
        &posts,
        pager_state.settled_page(),
        pager_state.offset_fraction(),
        &layout,
    );

    let pages = posts
        .iter()
        .map(|post| FeaturedPostItem(post, &layout, &callbacks))
        .collect();

    Stack(modifier.fill_max_width()).child((
        background,
        HorizontalPager(
            Modifier::new().fill_max_width(),
            pager_state,
            padding.content,
            padding.page_spacing,
            pages,
        ),
    ))
}

fn observe_settled_page(
    pager: &Rc<PagerState>,
    posts: &Rc<Vec<PostSummary>>,
    color_state: &Rc<dyn DynamicColorState>,
) {
    let key = (
        Rc::as_ptr(pager) as usize,
        Rc::as_ptr(posts) as usize,
    );
    let pager = pager.clone();
    let posts = posts.clone();
    let color_state = color_state.clone();

    disposable_effect(key, move || {
        let slot = Rc::new(TaskSlot::new());
        let on_settled = {
            let slot = slot.clone();
            move |page: &usize| {
                request_accent_for_page(*page, &posts, color_state.as_ref(), &slot);
            }
        };

        on_settled(&pager.settled_page());
        let subscription = pager.settled_page_signal().subscribe(on_settled);
        log::debug!("featured section observing settled page");

        on_unmount(move || {
            pager.settled_page_signal().unsubscribe(subscription);
            slot.cancel();
            log::debug!("featured section stopped observing settled page");
        })
    });
}

/// Asks `color_state` for the accent of the post at `page`. Returns whether a
/// request was made.
fn request_accent_for_page(
    page: usize,
    posts: &[PostSummary],
    color_state: &dyn DynamicColorState,
    slot: &TaskSlot,
) -> bool {
    let Some(post) = posts.get(page) else {
        log::debug!("settled page {page} has no post");
        return false;
    };
    let Some(url) = post.image_url.as_deref() else {
        log::debug!("post {} has no image, keeping accent", post.id);
        return false;
    };
    log::debug!("requesting accent for page {page}");
    color_state.update_from_image(url, slot.replace());
    true
}
