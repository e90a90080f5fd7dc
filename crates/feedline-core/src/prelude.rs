pub use crate::color::{Brush, Color, GradientStop, LinearGradient, RadialGradient, evenly_spaced};
pub use crate::effects::{Dispose, disposable_effect, effect, on_unmount};
pub use crate::geometry::{PaddingValues, Rect, Size, Vec2, WindowInsets};
pub use crate::input::{PointerEvent, PointerEventKind};
pub use crate::locals::{
    Density, LayoutDirection, PlatformCapabilities, Theme, WindowWidthClass, density, dp_to_px,
    layout_direction, platform_capabilities, theme, window_width_class, with_density,
    with_layout_direction, with_platform_capabilities, with_theme, with_window_width_class,
};
pub use crate::modifier::{BlurredEdges, Modifier};
pub use crate::runtime::{Composition, remember, remember_with_key};
pub use crate::scope::{Scope, current_scope, scoped_effect};
pub use crate::semantics::{Role, Semantics};
pub use crate::signal::{Signal, signal};
pub use crate::task::{CancellationToken, TaskSlot};
pub use crate::view::{Scene, SceneNode, View, ViewId, ViewKind};
pub use taffy::{AlignItems, AlignSelf, JustifyContent};
