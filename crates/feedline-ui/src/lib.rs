#![allow(non_snake_case)]
//! Layout primitives, layout/paint and the horizontal pager.

pub mod pager;

pub use pager::{HorizontalPager, PagerState};

use std::collections::HashMap;
use std::rc::Rc;

use feedline_core::*;
use taffy::style::{AlignItems, Display, FlexDirection, JustifyContent, Style};
use taffy::{Overflow, Point};

use taffy::prelude::{GridPlacement, Line, Position, auto, length, line, percent};

/// Approximate glyph advance relative to the font size; text is measured,
/// not shaped, at this layer.
const GLYPH_WIDTH_FACTOR: f32 = 0.55;
const LINE_HEIGHT_FACTOR: f32 = 1.3;

pub fn Box(modifier: Modifier) -> View {
    View::new(0, ViewKind::Box).modifier(modifier)
}

pub fn Row(modifier: Modifier) -> View {
    View::new(0, ViewKind::Row).modifier(modifier)
}

pub fn Column(modifier: Modifier) -> View {
    View::new(0, ViewKind::Column).modifier(modifier)
}

/// Children are drawn on top of each other, in order.
pub fn Stack(modifier: Modifier) -> View {
    View::new(0, ViewKind::Stack).modifier(modifier)
}

pub fn Spacer() -> View {
    Box(Modifier::new().flex_grow(1.0))
}

pub fn Text(text: impl Into<String>) -> View {
    View::new(
        0,
        ViewKind::Text {
            text: text.into(),
            color: theme().on_surface,
            font_size: 16.0, // dp (converted to px in layout/paint)
            max_lines: None,
        },
    )
    .semantics(Semantics::new(Role::Text))
}

pub fn Image(modifier: Modifier, url: impl Into<String>) -> View {
    View::new(
        0,
        ViewKind::Image {
            url: url.into(),
            decode_size: None,
        },
    )
    .modifier(modifier)
    .semantics(Semantics::new(Role::Image))
}

pub fn IconButton(label: impl Into<String>, on_click: impl Fn() + 'static) -> View {
    let label = label.into();
    View::new(
        0,
        ViewKind::Button {
            label: label.clone(),
            on_click: Some(Rc::new(on_click)),
        },
    )
    .semantics(Semantics::new(Role::Button).label(label))
}

pub trait TextExt {
    fn text_color(self, c: Color) -> View;
    fn text_size(self, dp: f32) -> View;
    fn max_lines(self, n: usize) -> View;
}

impl TextExt for View {
    fn text_color(mut self, c: Color) -> View {
        if let ViewKind::Text { color, .. } = &mut self.kind {
            *color = c;
        }
        self
    }
    fn text_size(mut self, dp: f32) -> View {
        if let ViewKind::Text { font_size, .. } = &mut self.kind {
            *font_size = dp;
        }
        self
    }
    fn max_lines(mut self, n: usize) -> View {
        if let ViewKind::Text { max_lines, .. } = &mut self.kind {
            *max_lines = Some(n.max(1));
        }
        self
    }
}

pub trait ImageExt {
    fn decode_size(self, width_px: u32, height_px: u32) -> View;
}

impl ImageExt for View {
    fn decode_size(mut self, width_px: u32, height_px: u32) -> View {
        if let ViewKind::Image { decode_size, .. } = &mut self.kind {
            *decode_size = Some((width_px, height_px));
        }
        self
    }
}

/// Extension trait for child building
pub trait ViewExt: Sized {
    fn child(self, children: impl IntoChildren) -> Self;
}

impl ViewExt for View {
    fn child(self, children: impl IntoChildren) -> Self {
        self.with_children(children.into_children())
    }
}

pub trait IntoChildren {
    fn into_children(self) -> Vec<View>;
}

impl IntoChildren for View {
    fn into_children(self) -> Vec<View> {
        vec![self]
    }
}

impl IntoChildren for Vec<View> {
    fn into_children(self) -> Vec<View> {
        self
    }
}

impl IntoChildren for Option<View> {
    fn into_children(self) -> Vec<View> {
        self.into_iter().collect()
    }
}

impl<const N: usize> IntoChildren for [View; N] {
    fn into_children(self) -> Vec<View> {
        self.into()
    }
}

macro_rules! impl_into_children_tuple {
    ($($idx:tt $t:ident),+) => {
        impl<$($t: IntoChildren),+> IntoChildren for ($($t,)+) {
            fn into_children(self) -> Vec<View> {
                let mut v = Vec::new();
                $(v.extend(self.$idx.into_children());)+
                v
            }
        }
    };
}

impl_into_children_tuple!(0 A, 1 B);
impl_into_children_tuple!(0 A, 1 B, 2 C);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D, 4 E);

/// Interactive area produced by `layout_and_paint`, in px.
#[derive(Clone)]
pub struct HitRegion {
    pub id: ViewId,
    pub rect: Rect,
    pub on_click: Option<Rc<dyn Fn()>>,
    pub on_pointer_down: Option<Rc<dyn Fn(PointerEvent)>>,
    pub on_pointer_move: Option<Rc<dyn Fn(PointerEvent)>>,
    pub on_pointer_up: Option<Rc<dyn Fn(PointerEvent)>>,
    pub z_index: f32,
    pub label: Option<String>,
}

impl std::fmt::Debug for HitRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HitRegion")
            .field("id", &self.id)
            .field("rect", &self.rect)
            .field("clickable", &self.on_click.is_some())
            .field("z_index", &self.z_index)
            .field("label", &self.label)
            .finish()
    }
}

/// Topmost clickable region under `p` (later regions and higher z win).
pub fn hit_test(hits: &[HitRegion], p: Vec2) -> Option<&HitRegion> {
    hits.iter()
        .enumerate()
        .filter(|(_, h)| h.on_click.is_some() && h.rect.contains(p))
        .max_by(|(ia, a), (ib, b)| a.z_index.total_cmp(&b.z_index).then(ia.cmp(ib)))
        .map(|(_, h)| h)
}

#[derive(Clone)]
enum NodeCtx {
    Text {
        text: String,
        font_dp: f32,
        max_lines: Option<usize>,
    },
    Button {
        label: String,
    },
    Container,
}

fn style_from_modifier(m: &Modifier, kind: &ViewKind, in_stack: bool) -> Style {
    let px = dp_to_px;
    let rtl = layout_direction() == LayoutDirection::Rtl;
    let mut s = Style::default();

    match kind {
        ViewKind::Stack => {
            s.display = Display::Grid;
        }
        ViewKind::Row | ViewKind::Pager { .. } => {
            s.display = Display::Flex;
            s.flex_direction = if rtl {
                FlexDirection::RowReverse
            } else {
                FlexDirection::Row
            };
        }
        _ => {
            s.display = Display::Flex;
            s.flex_direction = FlexDirection::Column;
        }
    }

    if !matches!(kind, ViewKind::Stack) {
        s.align_items = Some(AlignItems::Stretch);
        s.justify_content = Some(JustifyContent::FlexStart);
    }
    if let Some(a) = m.align_items_container {
        s.align_items = Some(a);
    }
    if let Some(j) = m.justify_content {
        s.justify_content = Some(j);
    }
    if let Some(a) = m.align_self {
        s.align_self = Some(a);
    }

    if let ViewKind::Pager { page_spacing, .. } = kind {
        s.gap = taffy::geometry::Size {
            width: length(px(*page_spacing)),
            height: length(0.0),
        };
        s.overflow = Point {
            x: Overflow::Hidden,
            y: Overflow::Hidden,
        };
    }

    if in_stack {
        s.grid_row = Line {
            start: line(1),
            end: GridPlacement::Span(1),
        };
        s.grid_column = Line {
            start: line(1),
            end: GridPlacement::Span(1),
        };
    }

    if let Some(r) = m.aspect_ratio {
        s.aspect_ratio = Some(r.max(0.0));
    }
    if let Some(g) = m.flex_grow {
        s.flex_grow = g;
    }

    if let Some(PositionType::Absolute) = m.position_type {
        s.position = Position::Absolute;
        s.inset = taffy::geometry::Rect {
            left: m.offset_left.map(|v| length(px(v))).unwrap_or_else(auto),
            right: m.offset_right.map(|v| length(px(v))).unwrap_or_else(auto),
            top: m.offset_top.map(|v| length(px(v))).unwrap_or_else(auto),
            bottom: m.offset_bottom.map(|v| length(px(v))).unwrap_or_else(auto),
        };
    }

    if let Some(pv) = m.padding_values {
        s.padding = taffy::geometry::Rect {
            left: length(px(pv.left)),
            right: length(px(pv.right)),
            top: length(px(pv.top)),
            bottom: length(px(pv.bottom)),
        };
    } else if let Some(p) = m.padding {
        let v = length(px(p));
        s.padding = taffy::geometry::Rect {
            left: v,
            right: v,
            top: v,
            bottom: v,
        };
    }

    let mut width_set = false;
    let mut height_set = false;
    if let Some(sz) = m.size {
        s.size.width = length(px(sz.width.max(0.0)));
        s.size.height = length(px(sz.height.max(0.0)));
        width_set = true;
        height_set = true;
    }
    if let Some(w) = m.width {
        s.size.width = length(px(w.max(0.0)));
        width_set = true;
    }
    if let Some(h) = m.height {
        s.size.height = length(px(h.max(0.0)));
        height_set = true;
    }

    // Main axis fill -> weight, cross axis fill -> tight 100%.
    let is_row = matches!(kind, ViewKind::Row | ViewKind::Pager { .. });
    let want_fill_w = m.fill_max || m.fill_max_w;
    let want_fill_h = m.fill_max || m.fill_max_h;
    if is_row {
        if want_fill_w && !width_set {
            s.min_size.width = percent(1.0);
            s.max_size.width = percent(1.0);
        }
        if want_fill_h && !height_set {
            s.min_size.height = percent(1.0);
            s.max_size.height = percent(1.0);
        }
    } else {
        if want_fill_h && !height_set {
            s.flex_grow = s.flex_grow.max(1.0);
            s.flex_shrink = s.flex_shrink.max(1.0);
            s.flex_basis = length(0.0);
            s.min_size.height = length(0.0);
        }
        if want_fill_w && !width_set {
            // Definite width, so an aspect ratio can resolve the height.
            s.size.width = percent(1.0);
            s.min_size.width = percent(1.0);
            s.max_size.width = percent(1.0);
        }
    }

    s
}

/// Every page fills the pager's content box and never shrinks.
fn pager_page_style(mut s: Style) -> Style {
    s.flex_shrink = 0.0;
    s.flex_grow = 0.0;
    s.size.width = percent(1.0);
    s.min_size.width = auto();
    s.max_size.width = auto();
    s
}

fn build_node(
    v: &View,
    parent: Option<&ViewKind>,
    t: &mut taffy::TaffyTree<NodeCtx>,
    nodes_map: &mut HashMap<ViewId, taffy::NodeId>,
) -> taffy::TaffyResult<taffy::NodeId> {
    let in_stack = matches!(parent, Some(ViewKind::Stack));
    let mut style = style_from_modifier(&v.modifier, &v.kind, in_stack);
    if matches!(parent, Some(ViewKind::Pager { .. })) {
        style = pager_page_style(style);
    }

    let node = match &v.kind {
        ViewKind::Text {
            text,
            font_size,
            max_lines,
            ..
        } => t.new_leaf_with_context(
            style,
            NodeCtx::Text {
                text: text.clone(),
                font_dp: *font_size,
                max_lines: *max_lines,
            },
        )?,
        ViewKind::Button { label, .. } => t.new_leaf_with_context(
            style,
            NodeCtx::Button {
                label: label.clone(),
            },
        )?,
        ViewKind::Image { .. } => t.new_leaf_with_context(style, NodeCtx::Container)?,
        _ => {
            let children = v
                .children
                .iter()
                .map(|c| build_node(c, Some(&v.kind), t, nodes_map))
                .collect::<taffy::TaffyResult<Vec<_>>>()?;
            let n = t.new_with_children(style, &children)?;
            t.set_node_context(n, Some(NodeCtx::Container))?;
            n
        }
    };

    nodes_map.insert(v.id, node);
    Ok(node)
}

fn measure(
    known: taffy::geometry::Size<Option<f32>>,
    avail: taffy::geometry::Size<taffy::AvailableSpace>,
    ctx: Option<&mut NodeCtx>,
) -> taffy::geometry::Size<f32> {
    match ctx {
        Some(NodeCtx::Text {
            text,
            font_dp,
            max_lines,
        }) => {
            let size_px = dp_to_px(*font_dp);
            let natural_w = text.chars().count() as f32 * size_px * GLYPH_WIDTH_FACTOR;
            let max_w = match avail.width {
                taffy::AvailableSpace::Definite(w) => w,
                _ => natural_w,
            };
            let width = known.width.unwrap_or(natural_w.min(max_w));
            let mut lines = if width > 0.0 {
                (natural_w / width).ceil().max(1.0) as usize
            } else {
                1
            };
            if let Some(max) = max_lines {
                lines = lines.min(*max);
            }
            taffy::geometry::Size {
                width,
                height: size_px * LINE_HEIGHT_FACTOR * lines as f32,
            }
        }
        Some(NodeCtx::Button { label }) => {
            let label_w = label.chars().count() as f32 * dp_to_px(14.0) * GLYPH_WIDTH_FACTOR;
            taffy::geometry::Size {
                width: known.width.unwrap_or(label_w + dp_to_px(24.0)),
                height: known.height.unwrap_or(dp_to_px(40.0)),
            }
        }
        Some(NodeCtx::Container) | None => taffy::geometry::Size::ZERO,
    }
}

fn stamp(mut v: View, id: &mut u64) -> View {
    v.id = *id;
    *id += 1;
    v.children = v.children.into_iter().map(|c| stamp(c, id)).collect();
    v
}

/// Lays out `root` in a `size_px` window and flattens it into a `Scene` plus
/// the interactive regions, both in px.
pub fn layout_and_paint(root: &View, size_px: (u32, u32)) -> (Scene, Vec<HitRegion>) {
    let mut scene = Scene {
        clear_color: theme().background,
        nodes: vec![],
    };
    let mut hits = vec![];

    let mut next_id = 1u64;
    let root = stamp(root.clone(), &mut next_id);

    let mut taffy: taffy::TaffyTree<NodeCtx> = taffy::TaffyTree::new();
    let mut nodes_map = HashMap::new();

    let laid_out = (|| -> taffy::TaffyResult<()> {
        let root_node = build_node(&root, None, &mut taffy, &mut nodes_map)?;
        let mut rs = taffy.style(root_node)?.clone();
        rs.size.width = length(size_px.0 as f32);
        rs.size.height = length(size_px.1 as f32);
        taffy.set_style(root_node, rs)?;

        let available = taffy::geometry::Size {
            width: taffy::AvailableSpace::Definite(size_px.0 as f32),
            height: taffy::AvailableSpace::Definite(size_px.1 as f32),
        };
        taffy.compute_layout_with_measure(
            root_node,
            available,
            |known, avail, _node, ctx, _style| measure(known, avail, ctx),
        )
    })();

    if let Err(e) = laid_out {
        log::warn!("layout failed: {e}");
        return (scene, hits);
    }

    let mut painter = Paint {
        taffy: &taffy,
        nodes: &nodes_map,
        scene: &mut scene,
        hits: &mut hits,
    };
    painter.walk(&root, (0.0, 0.0), 1.0);

    (scene, hits)
}

struct Paint<'a> {
    taffy: &'a taffy::TaffyTree<NodeCtx>,
    nodes: &'a HashMap<ViewId, taffy::NodeId>,
    scene: &'a mut Scene,
    hits: &'a mut Vec<HitRegion>,
}

impl Paint<'_> {
    fn rect_of(&self, v: &View, parent_offset: (f32, f32)) -> Option<Rect> {
        let node = self.nodes.get(&v.id)?;
        let l = self.taffy.layout(*node).ok()?;
        Some(Rect {
            x: parent_offset.0 + l.location.x,
            y: parent_offset.1 + l.location.y,
            w: l.size.width,
            h: l.size.height,
        })
    }

    fn walk(&mut self, v: &View, parent_offset: (f32, f32), alpha_accum: f32) {
        let Some(rect) = self.rect_of(v, parent_offset) else {
            return;
        };
        let alpha = (alpha_accum * v.modifier.alpha.unwrap_or(1.0)).clamp(0.0, 1.0);
        let radius = v.modifier.clip_rounded.map(dp_to_px).unwrap_or(0.0);

        if let Some(bg) = &v.modifier.background {
            self.scene.nodes.push(SceneNode::Rect {
                rect,
                brush: bg.mul_alpha(alpha),
                radius,
            });
        }

        if let Some(p) = &v.modifier.painter {
            (p)(&mut *self.scene, rect);
        }

        let on_click = match &v.kind {
            ViewKind::Button { on_click, .. } => on_click.clone(),
            _ => v.modifier.on_click.clone(),
        };
        let has_pointer = v.modifier.on_pointer_down.is_some()
            || v.modifier.on_pointer_move.is_some()
            || v.modifier.on_pointer_up.is_some();
        if on_click.is_some() || has_pointer {
            self.hits.push(HitRegion {
                id: v.id,
                rect,
                on_click,
                on_pointer_down: v.modifier.on_pointer_down.clone(),
                on_pointer_move: v.modifier.on_pointer_move.clone(),
                on_pointer_up: v.modifier.on_pointer_up.clone(),
                z_index: v.modifier.z_index,
                label: v.semantics.as_ref().and_then(|s| s.label.clone()),
            });
        }

        match &v.kind {
            ViewKind::Text {
                text,
                color,
                font_size,
                ..
            } => {
                self.scene.nodes.push(SceneNode::Text {
                    rect,
                    text: text.clone(),
                    color: color.mul_alpha(alpha),
                    size: dp_to_px(*font_size),
                });
            }
            ViewKind::Image {
                url, decode_size, ..
            } => {
                self.scene.nodes.push(SceneNode::Image {
                    rect,
                    url: url.clone(),
                    decode_size: *decode_size,
                    blur: v.modifier.blur.map(|b| Blur {
                        radius: dp_to_px(b.radius),
                        edges: b.edges,
                    }),
                    alpha,
                    radius,
                });
            }
            ViewKind::Button { label, .. } => {
                self.scene.nodes.push(SceneNode::Text {
                    rect,
                    text: label.clone(),
                    color: theme().on_surface.mul_alpha(alpha),
                    size: dp_to_px(14.0),
                });
            }
            ViewKind::Pager {
                get_position,
                set_page_stride,
                page_spacing,
            } => {
                let page_w = v
                    .children
                    .first()
                    .and_then(|c| self.rect_of(c, (0.0, 0.0)))
                    .map(|r| r.w)
                    .unwrap_or(0.0);
                let stride = page_w + dp_to_px(*page_spacing);
                set_page_stride(stride);

                let shift = get_position() * stride;
                let dx = match layout_direction() {
                    LayoutDirection::Ltr => -shift,
                    LayoutDirection::Rtl => shift,
                };

                self.scene.nodes.push(SceneNode::PushClip { rect, radius });
                for c in &v.children {
                    self.walk(c, (rect.x + dx, rect.y), alpha);
                }
                self.scene.nodes.push(SceneNode::PopClip);
                return;
            }
            _ => {}
        }

        for c in &v.children {
            self.walk(c, (rect.x, rect.y), alpha);
        }
    }
}
