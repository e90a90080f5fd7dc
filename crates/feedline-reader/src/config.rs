//! Layout constants for the featured section. All lengths are in dp.

use feedline_core::WindowWidthClass;

use crate::featured::BackgroundStyle;

/// Width / height ratio of the background for each width class.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AspectRatios {
    pub compact: f32,
    pub medium: f32,
    pub expanded: f32,
}

impl AspectRatios {
    pub fn for_class(&self, class: WindowWidthClass) -> f32 {
        match class {
            WindowWidthClass::Medium => self.medium,
            WindowWidthClass::Expanded => self.expanded,
            WindowWidthClass::Compact | WindowWidthClass::Unknown => self.compact,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct FeaturedLayout {
    pub base_margin: f32,
    pub bottom_padding: f32,
    pub page_spacing: f32,
    pub blur_radius: f32,
    /// Decode size of blurred background images, in px.
    pub blur_decode_size: u32,
    pub radial_center_y: f32,
    pub image_background_ratios: AspectRatios,
    pub gradient_background_ratios: AspectRatios,
    pub item_image_ratio: f32,
    pub item_corner_radius: f32,
}

impl Default for FeaturedLayout {
    fn default() -> Self {
        Self {
            base_margin: 24.0,
            bottom_padding: 24.0,
            page_spacing: 16.0,
            blur_radius: 100.0,
            blur_decode_size: 64,
            radial_center_y: 40.0,
            image_background_ratios: AspectRatios {
                compact: 0.8,
                medium: 1.25,
                expanded: 2.1,
            },
            gradient_background_ratios: AspectRatios {
                compact: 0.9,
                medium: 1.4,
                expanded: 2.4,
            },
            item_image_ratio: 16.0 / 9.0,
            item_corner_radius: 24.0,
        }
    }
}

impl FeaturedLayout {
    pub fn background_aspect_ratio(&self, style: BackgroundStyle, class: WindowWidthClass) -> f32 {
        match style {
            BackgroundStyle::BlurredImages => self.image_background_ratios.for_class(class),
            BackgroundStyle::GradientFallback => self.gradient_background_ratios.for_class(class),
        }
    }
}
