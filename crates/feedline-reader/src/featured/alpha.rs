/// Offsets closer to zero than this count as "at rest".
pub const OFFSET_EPSILON: f32 = 1e-6;

/// Opacity of the background layer for `index` while the pager sits at
/// `settled_page` and is dragged by `offset_fraction` pages.
///
/// The settled page fades out as the drag grows in either direction. The
/// page before it fades in only while dragging backwards. Earlier pages are
/// hidden and later pages stay opaque underneath.
pub fn featured_item_alpha(index: usize, settled_page: usize, offset_fraction: f32) -> f32 {
    let offset = if offset_fraction.is_finite() {
        offset_fraction
    } else {
        0.0
    };
    let progress = offset.abs().min(1.0);

    if index == settled_page {
        lerp(1.0, 0.0, progress)
    } else if index + 1 == settled_page && offset < -OFFSET_EPSILON {
        lerp(0.0, 1.0, progress)
    } else if index < settled_page {
        0.0
    } else {
        1.0
    }
}

fn lerp(start: f32, stop: f32, t: f32) -> f32 {
    start + (stop - start) * t
}
