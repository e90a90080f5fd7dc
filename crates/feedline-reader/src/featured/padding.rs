use feedline_core::{LayoutDirection, PaddingValues, WindowInsets};

use crate::config::FeaturedLayout;

/// Pager padding and gap, in dp.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeaturedPadding {
    pub content: PaddingValues,
    pub page_spacing: f32,
}

/// The horizontal margin is symmetric: the larger of the two side insets is
/// applied on both edges so the card stays centred.
pub fn featured_padding(
    insets: WindowInsets,
    dir: LayoutDirection,
    layout: &FeaturedLayout,
) -> FeaturedPadding {
    let start = insets.start(dir);
    let end = insets.end(dir);
    let horizontal = start.max(end) + layout.base_margin;

    FeaturedPadding {
        content: PaddingValues {
            left: horizontal,
            right: horizontal,
            top: insets.top + layout.base_margin,
            bottom: layout.bottom_padding,
        },
        page_spacing: layout.page_spacing,
    }
}
