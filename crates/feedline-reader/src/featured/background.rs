use feedline_core::*;
use feedline_ui::{Box, Image, ImageExt, ViewExt};

use super::alpha::featured_item_alpha;
use crate::config::FeaturedLayout;
use crate::post::PostSummary;

/// Opacity ramp of the fallback gradient, top to bottom.
const FALLBACK_ALPHAS: [f32; 8] = [0.0, 0.33, 0.50, 0.70, 0.60, 0.33, 0.10, 0.0];

/// How the primary background layer is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackgroundStyle {
    /// One heavily blurred image per post, cross-faded with the pager.
    BlurredImages,
    /// A static tint gradient for targets that cannot blur.
    GradientFallback,
}

impl BackgroundStyle {
    pub fn for_capabilities(caps: PlatformCapabilities) -> Self {
        if caps.supports_blur {
            BackgroundStyle::BlurredImages
        } else {
            BackgroundStyle::GradientFallback
        }
    }
}

pub fn fallback_gradient(tint: Color) -> Brush {
    LinearGradient::vertical(evenly_spaced(
        FALLBACK_ALPHAS.iter().map(|a| tint.with_alpha_f32(*a)),
    ))
}

fn radial_overlay_stops() -> GradientStops {
    evenly_spaced([
        Color::BLACK.with_alpha_f32(0.55),
        Color::BLACK.with_alpha_f32(0.2),
        Color::TRANSPARENT,
    ])
}

fn vertical_overlay() -> Brush {
    LinearGradient::vertical(evenly_spaced([
        Color::BLACK.with_alpha_f32(0.1),
        Color::TRANSPARENT,
        Color::BLACK.with_alpha_f32(0.45),
    ]))
}

/// Decorative layer drawn behind the featured pager.
pub fn FeaturedSectionBlurredBackground(
    modifier: Modifier,
    style: BackgroundStyle,
    posts: &[PostSummary],
    settled_page: usize,
    offset_fraction: f32,
    layout: &FeaturedLayout,
) -> View {
    let ratio = layout.background_aspect_ratio(style, window_width_class());

    let primary: Vec<View> = match style {
        BackgroundStyle::BlurredImages => {
            let decode = layout.blur_decode_size;
            posts
                .iter()
                .enumerate()
                .rev()
                .filter_map(|(index, post)| {
                    let url = post.image_url.as_deref()?;
                    let alpha = featured_item_alpha(index, settled_page, offset_fraction);
                    Some(
                        Image(
                            Modifier::new()
                                .match_parent_size()
                                .alpha(alpha)
                                .blur(layout.blur_radius, BlurredEdges::Unbounded),
                            url,
                        )
                        .decode_size(decode, decode),
                    )
                })
                .collect()
        }
        BackgroundStyle::GradientFallback => vec![Box(
            Modifier::new()
                .match_parent_size()
                .background_brush(fallback_gradient(theme().tint)),
        )],
    };

    let rtl = layout_direction() == LayoutDirection::Rtl;
    let center_y = dp_to_px(layout.radial_center_y);
    let radial = Box(Modifier::new().match_parent_size().painter(
        move |scene: &mut Scene, rect: Rect| {
            // Anchored at the top trailing corner, relative to the rect origin.
            let cx = if rtl { 0.0 } else { rect.w };
            scene.nodes.push(SceneNode::Rect {
                rect,
                brush: RadialGradient::new(
                    Vec2::new(cx, center_y),
                    rect.w.max(1.0),
                    radial_overlay_stops(),
                ),
                radius: 0.0,
            });
        },
    ));
    let vertical = Box(
        Modifier::new()
            .match_parent_size()
            .background_brush(vertical_overlay()),
    );

    Box(modifier
        .fill_max_width()
        .aspect_ratio(ratio)
        .align_self(AlignSelf::Start))
    .child((primary, radial, vertical))
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedline_ui::{Column, layout_and_paint};

    fn posts() -> Vec<PostSummary> {
        vec![
            PostSummary::new("0", "zero").with_image("img0"),
            PostSummary::new("1", "one"),
            PostSummary::new("2", "two").with_image("img2"),
        ]
    }

    fn images(view: &View) -> Vec<(String, f32, Option<(u32, u32)>)> {
        view.descendants()
            .filter_map(|v| match &v.kind {
                ViewKind::Image {
                    url, decode_size, ..
                } => Some((url.clone(), v.modifier.alpha.unwrap_or(1.0), *decode_size)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn blurred_layers_are_reversed_and_cross_faded() {
        let layout = FeaturedLayout::default();
        let view = FeaturedSectionBlurredBackground(
            Modifier::new(),
            BackgroundStyle::BlurredImages,
            &posts(),
            2,
            -0.25,
            &layout,
        );

        let layers = images(&view);
        assert_eq!(
            layers,
            vec![
                ("img2".to_string(), 0.75, Some((64, 64))),
                ("img0".to_string(), 0.0, Some((64, 64))),
            ]
        );

        let blur = view
            .descendants()
            .find_map(|v| v.modifier.blur)
            .unwrap();
        assert_eq!(blur.radius, 100.0);
        assert_eq!(blur.edges, BlurredEdges::Unbounded);
    }

    #[test]
    fn fallback_uses_tint_ramp() {
        let tint = Color::from_rgb(10, 20, 30);
        let theme = Theme {
            tint,
            ..Theme::default()
        };
        let view = with_theme(theme, || {
            FeaturedSectionBlurredBackground(
                Modifier::new(),
                BackgroundStyle::GradientFallback,
                &posts(),
                0,
                0.0,
                &FeaturedLayout::default(),
            )
        });

        assert!(images(&view).is_empty());
        let brush = view.children[0].modifier.background.clone().unwrap();
        assert_eq!(brush.stops().len(), FALLBACK_ALPHAS.len());
        for (stop, expected) in brush.stops().iter().zip(FALLBACK_ALPHAS) {
            assert!((stop.color.alpha_f32() - expected).abs() < 0.01);
        }
        assert!(brush.stops().iter().all(|s| (s.color.0, s.color.1, s.color.2) == (10, 20, 30)));
    }

    #[test]
    fn style_follows_blur_capability() {
        assert_eq!(
            BackgroundStyle::for_capabilities(PlatformCapabilities { supports_blur: true }),
            BackgroundStyle::BlurredImages
        );
        assert_eq!(
            BackgroundStyle::for_capabilities(PlatformCapabilities {
                supports_blur: false
            }),
            BackgroundStyle::GradientFallback
        );
    }

    fn radial_center(dir: LayoutDirection) -> (Vec2, f32, Rect) {
        let layout = FeaturedLayout::default();
        let view = with_layout_direction(dir, || {
            Column(Modifier::new().fill_max_size()).child(FeaturedSectionBlurredBackground(
                Modifier::new(),
                BackgroundStyle::GradientFallback,
                &[],
                0,
                0.0,
                &layout,
            ))
        });
        let (scene, _) = layout_and_paint(&view, (360, 800));
        scene
            .nodes
            .iter()
            .find_map(|n| match n {
                SceneNode::Rect {
                    rect,
                    brush: Brush::Radial { center, radius, .. },
                    ..
                } => Some((*center, *radius, *rect)),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn radial_overlay_tracks_measured_width() {
        let (center, radius, rect) = radial_center(LayoutDirection::Ltr);
        assert_eq!(rect.w, 360.0);
        assert!((rect.h - 360.0 / 0.9).abs() < 0.5);
        assert_eq!(center, Vec2::new(360.0, 40.0));
        assert_eq!(radius, 360.0);

        let (center, _, _) = radial_center(LayoutDirection::Rtl);
        assert_eq!(center, Vec2::new(0.0, 40.0));
    }
}
