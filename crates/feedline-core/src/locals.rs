//! # Theming and locals
//!
//! Thread‑local "composition locals" carry ambient UI parameters:
//!
//! - `Theme`: surface, text and accent colors.
//! - `Density`: dp→px scale factor.
//! - `LayoutDirection`: LTR or RTL; decides what "start" and "end" mean.
//! - `WindowWidthClass`: coarse width bucket used to pick layout constants.
//! - `PlatformCapabilities`: what the renderer can do (e.g. blur images).
//!
//! Override them for a subtree with the matching `with_*` function:
//!
//! ```rust
//! use feedline_core::*;
//!
//! with_layout_direction(LayoutDirection::Rtl, || {
//!     assert_eq!(layout_direction(), LayoutDirection::Rtl);
//! });
//! assert_eq!(layout_direction(), LayoutDirection::Ltr);
//! ```

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;

use crate::Color;

thread_local! {
    static LOCALS_STACK: RefCell<Vec<HashMap<TypeId, Box<dyn Any>>>> = RefCell::new(Vec::new());
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutDirection {
    #[default]
    Ltr,
    Rtl,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WindowWidthClass {
    #[default]
    Compact,
    Medium,
    Expanded,
    /// A class the host reported but this build does not know about.
    Unknown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlatformCapabilities {
    pub supports_blur: bool,
}

impl Default for PlatformCapabilities {
    fn default() -> Self {
        Self {
            supports_blur: true,
        }
    }
}

/// density‑independent pixels (dp)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dp(pub f32);

impl Dp {
    /// Converts this dp value into physical pixels using the current Density.
    pub fn to_px(self) -> f32 {
        self.0 * density().scale
    }
}

/// Convenience: convert a raw dp scalar into px using current Density.
pub fn dp_to_px(dp: f32) -> f32 {
    Dp(dp).to_px()
}

/// Inverse of [`dp_to_px`].
pub fn px_to_dp(px: f32) -> f32 {
    let scale = density().scale;
    if scale > 0.0 { px / scale } else { px }
}

/// High‑level color theme used by widgets and screens.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    /// Window background / app root.
    pub background: Color,
    /// Default container surface (cards, sheets).
    pub surface: Color,
    /// Primary foreground color on top of `surface`/`background`.
    pub on_surface: Color,
    /// Lower-emphasis foreground (metadata, captions).
    pub on_surface_variant: Color,
    pub primary: Color,
    /// Highlight tint; also the fallback color for image-derived backgrounds.
    pub tint: Color,
    pub outline: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::from_hex("#121212"),
            surface: Color::from_hex("#1E1E1E"),
            on_surface: Color::from_hex("#E6E1E5"),
            on_surface_variant: Color::from_hex("#CAC4D0"),
            primary: Color::from_hex("#34AF82"),
            tint: Color::from_hex("#34AF82"),
            outline: Color::from_hex("#555555"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Density {
    pub scale: f32, // dp→px multiplier
}

impl Default for Density {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

fn with_locals_frame<R>(f: impl FnOnce() -> R) -> R {
    // Non-panicking frame guard (ensures pop on unwind)
    struct Guard;
    impl Drop for Guard {
        fn drop(&mut self) {
            LOCALS_STACK.with(|st| {
                st.borrow_mut().pop();
            });
        }
    }
    LOCALS_STACK.with(|st| st.borrow_mut().push(HashMap::new()));
    let _guard = Guard;
    f()
}

fn provide<T: Any, R>(value: T, f: impl FnOnce() -> R) -> R {
    with_locals_frame(|| {
        LOCALS_STACK.with(|st| {
            if let Some(top) = st.borrow_mut().last_mut() {
                top.insert(TypeId::of::<T>(), Box::new(value));
            }
        });
        f()
    })
}

fn current<T: Any + Copy + Default>() -> T {
    LOCALS_STACK.with(|st| {
        for frame in st.borrow().iter().rev() {
            if let Some(v) = frame.get(&TypeId::of::<T>())
                && let Some(t) = v.downcast_ref::<T>()
            {
                return *t;
            }
        }
        T::default()
    })
}

pub fn with_theme<R>(theme: Theme, f: impl FnOnce() -> R) -> R {
    provide(theme, f)
}

pub fn with_density<R>(density: Density, f: impl FnOnce() -> R) -> R {
    provide(density, f)
}

pub fn with_layout_direction<R>(dir: LayoutDirection, f: impl FnOnce() -> R) -> R {
    provide(dir, f)
}

pub fn with_window_width_class<R>(class: WindowWidthClass, f: impl FnOnce() -> R) -> R {
    provide(class, f)
}

pub fn with_platform_capabilities<R>(caps: PlatformCapabilities, f: impl FnOnce() -> R) -> R {
    provide(caps, f)
}

// Getters with defaults if not set

pub fn theme() -> Theme {
    current::<Theme>()
}

pub fn density() -> Density {
    current::<Density>()
}

pub fn layout_direction() -> LayoutDirection {
    current::<LayoutDirection>()
}

pub fn window_width_class() -> WindowWidthClass {
    current::<WindowWidthClass>()
}

pub fn platform_capabilities() -> PlatformCapabilities {
    current::<PlatformCapabilities>()
}
