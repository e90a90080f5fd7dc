use std::rc::Rc;

use taffy::{AlignItems, AlignSelf, JustifyContent};

use crate::{Brush, Color, PaddingValues, PointerEvent, Rect, Scene, Semantics, Size};

/// How a blur treats the pixels past the node's edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlurredEdges {
    /// Edges fade against transparent; the blur stays inside the bounds.
    Bounded,
    /// Edge pixels are extended so the blur bleeds past the bounds.
    Unbounded,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Blur {
    /// Blur radius in dp.
    pub radius: f32,
    pub edges: BlurredEdges,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PositionType {
    Relative,
    Absolute,
}

pub type Painter = Rc<dyn Fn(&mut Scene, Rect)>;

#[derive(Clone, Default)]
pub struct Modifier {
    pub size: Option<Size>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub fill_max: bool,
    pub fill_max_w: bool,
    pub fill_max_h: bool,
    pub padding: Option<f32>,
    pub padding_values: Option<PaddingValues>,
    pub background: Option<Brush>,
    pub flex_grow: Option<f32>,
    pub align_self: Option<AlignSelf>,
    pub justify_content: Option<JustifyContent>,
    pub align_items_container: Option<AlignItems>,
    pub clip_rounded: Option<f32>,
    pub z_index: f32,
    pub on_click: Option<Rc<dyn Fn()>>,
    pub on_pointer_down: Option<Rc<dyn Fn(PointerEvent)>>,
    pub on_pointer_move: Option<Rc<dyn Fn(PointerEvent)>>,
    pub on_pointer_up: Option<Rc<dyn Fn(PointerEvent)>>,
    pub semantics: Option<Semantics>,
    pub alpha: Option<f32>,
    pub blur: Option<Blur>,
    pub position_type: Option<PositionType>,
    pub offset_left: Option<f32>,
    pub offset_right: Option<f32>,
    pub offset_top: Option<f32>,
    pub offset_bottom: Option<f32>,
    pub aspect_ratio: Option<f32>,
    /// Custom drawing; receives the measured rect in px.
    pub painter: Option<Painter>,
}

impl std::fmt::Debug for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Modifier")
            .field("size", &self.size)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("fill_max", &self.fill_max)
            .field("fill_max_w", &self.fill_max_w)
            .field("fill_max_h", &self.fill_max_h)
            .field("padding", &self.padding)
            .field("padding_values", &self.padding_values)
            .field("background", &self.background)
            .field("flex_grow", &self.flex_grow)
            .field("align_self", &self.align_self)
            .field("clip_rounded", &self.clip_rounded)
            .field("z_index", &self.z_index)
            .field("on_click", &self.on_click.as_ref().map(|_| "..."))
            .field(
                "on_pointer_down",
                &self.on_pointer_down.as_ref().map(|_| "..."),
            )
            .field(
                "on_pointer_move",
                &self.on_pointer_move.as_ref().map(|_| "..."),
            )
            .field("on_pointer_up", &self.on_pointer_up.as_ref().map(|_| "..."))
            .field("semantics", &self.semantics)
            .field("alpha", &self.alpha)
            .field("blur", &self.blur)
            .field("position_type", &self.position_type)
            .field("aspect_ratio", &self.aspect_ratio)
            .field("painter", &self.painter.as_ref().map(|_| "..."))
            .finish()
    }
}

impl Modifier {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn size(mut self, w: f32, h: f32) -> Self {
        self.size = Some(Size {
            width: w,
            height: h,
        });
        self
    }
    pub fn width(mut self, w: f32) -> Self {
        self.width = Some(w);
        self
    }
    pub fn height(mut self, h: f32) -> Self {
        self.height = Some(h);
        self
    }
    pub fn fill_max_size(mut self) -> Self {
        self.fill_max = true;
        self
    }
    pub fn fill_max_width(mut self) -> Self {
        self.fill_max_w = true;
        self
    }
    pub fn fill_max_height(mut self) -> Self {
        self.fill_max_h = true;
        self
    }
    pub fn padding(mut self, v: f32) -> Self {
        self.padding = Some(v);
        self
    }
    pub fn padding_values(mut self, padding: PaddingValues) -> Self {
        self.padding_values = Some(padding);
        self
    }
    /// Set a solid color background.
    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(Brush::Solid(color));
        self
    }
    /// Set a brush (solid, gradient, etc.) background.
    pub fn background_brush(mut self, brush: Brush) -> Self {
        self.background = Some(brush);
        self
    }
    pub fn flex_grow(mut self, v: f32) -> Self {
        self.flex_grow = Some(v);
        self
    }
    pub fn align_self(mut self, a: AlignSelf) -> Self {
        self.align_self = Some(a);
        self
    }
    pub fn justify_content(mut self, j: JustifyContent) -> Self {
        self.justify_content = Some(j);
        self
    }
    pub fn align_items(mut self, a: AlignItems) -> Self {
        self.align_items_container = Some(a);
        self
    }
    pub fn clip_rounded(mut self, radius: f32) -> Self {
        self.clip_rounded = Some(radius);
        self
    }
    pub fn z_index(mut self, z: f32) -> Self {
        self.z_index = z;
        self
    }
    pub fn clickable(mut self, f: impl Fn() + 'static) -> Self {
        self.on_click = Some(Rc::new(f));
        self
    }
    pub fn on_pointer_down(mut self, f: impl Fn(PointerEvent) + 'static) -> Self {
        self.on_pointer_down = Some(Rc::new(f));
        self
    }
    pub fn on_pointer_move(mut self, f: impl Fn(PointerEvent) + 'static) -> Self {
        self.on_pointer_move = Some(Rc::new(f));
        self
    }
    pub fn on_pointer_up(mut self, f: impl Fn(PointerEvent) + 'static) -> Self {
        self.on_pointer_up = Some(Rc::new(f));
        self
    }
    pub fn semantics(mut self, s: Semantics) -> Self {
        self.semantics = Some(s);
        self
    }
    pub fn alpha(mut self, a: f32) -> Self {
        self.alpha = Some(a.clamp(0.0, 1.0));
        self
    }
    pub fn blur(mut self, radius: f32, edges: BlurredEdges) -> Self {
        self.blur = Some(Blur {
            radius: radius.max(0.0),
            edges,
        });
        self
    }
    pub fn absolute(mut self) -> Self {
        self.position_type = Some(PositionType::Absolute);
        self
    }
    pub fn offset(
        mut self,
        left: Option<f32>,
        top: Option<f32>,
        right: Option<f32>,
        bottom: Option<f32>,
    ) -> Self {
        self.offset_left = left;
        self.offset_top = top;
        self.offset_right = right;
        self.offset_bottom = bottom;
        self
    }
    /// Absolutely positioned, stretched over the parent's box (Compose's `matchParentSize`).
    pub fn match_parent_size(self) -> Self {
        self.absolute()
            .offset(Some(0.0), Some(0.0), Some(0.0), Some(0.0))
    }
    pub fn aspect_ratio(mut self, ratio: f32) -> Self {
        self.aspect_ratio = Some(ratio);
        self
    }
    pub fn painter(mut self, f: impl Fn(&mut Scene, Rect) + 'static) -> Self {
        self.painter = Some(Rc::new(f));
        self
    }
}
