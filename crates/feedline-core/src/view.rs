use std::rc::Rc;

use crate::{Blur, Brush, Color, Modifier, Rect, Semantics};

pub type ViewId = u64;

pub type Callback = Rc<dyn Fn()>;

#[derive(Clone)]
pub enum ViewKind {
    Box,
    Row,
    Column,
    Stack,
    Text {
        text: String,
        color: Color,
        font_size: f32,
        max_lines: Option<usize>,
    },
    /// Remote image; loading and decoding belong to the renderer.
    Image {
        url: String,
        /// Size the renderer should decode the source at, in px.
        decode_size: Option<(u32, u32)>,
    },
    Button {
        label: String,
        on_click: Option<Callback>,
    },
    /// Horizontally paged container; every child is one page.
    Pager {
        page_spacing: f32,
        /// Scroll position in pages.
        get_position: Rc<dyn Fn() -> f32>,
        /// Receives the measured distance between two page origins, in px.
        set_page_stride: Rc<dyn Fn(f32)>,
    },
}

impl std::fmt::Debug for ViewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewKind::Box => write!(f, "Box"),
            ViewKind::Row => write!(f, "Row"),
            ViewKind::Column => write!(f, "Column"),
            ViewKind::Stack => write!(f, "Stack"),
            ViewKind::Text {
                text,
                color,
                font_size,
                max_lines,
            } => f
                .debug_struct("Text")
                .field("text", text)
                .field("color", color)
                .field("font_size", font_size)
                .field("max_lines", max_lines)
                .finish(),
            ViewKind::Image {
                url,
                decode_size,
            } => f
                .debug_struct("Image")
                .field("url", url)
                .field("decode_size", decode_size)
                .finish(),
            ViewKind::Button { label, .. } => f
                .debug_struct("Button")
                .field("label", label)
                .field("on_click", &"<callback>")
                .finish(),
            ViewKind::Pager { page_spacing, .. } => f
                .debug_struct("Pager")
                .field("page_spacing", page_spacing)
                .finish(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct View {
    pub id: ViewId,
    pub kind: ViewKind,
    pub modifier: Modifier,
    pub children: Vec<View>,
    pub semantics: Option<Semantics>,
}

impl View {
    pub fn new(id: ViewId, kind: ViewKind) -> Self {
        View {
            id,
            kind,
            modifier: Modifier::default(),
            children: vec![],
            semantics: None,
        }
    }
    pub fn modifier(mut self, m: Modifier) -> Self {
        self.modifier = m;
        self
    }
    pub fn with_children(mut self, kids: Vec<View>) -> Self {
        self.children = kids;
        self
    }
    pub fn semantics(mut self, s: Semantics) -> Self {
        self.semantics = Some(s);
        self
    }

    /// Depth-first iterator over this view and all descendants.
    pub fn descendants(&self) -> impl Iterator<Item = &View> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let v = stack.pop()?;
            stack.extend(v.children.iter().rev());
            Some(v)
        })
    }
}

/// Renderable scene
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub clear_color: Color,
    pub nodes: Vec<SceneNode>,
}

#[derive(Clone, Debug)]
pub enum SceneNode {
    Rect {
        rect: Rect,
        brush: Brush,
        radius: f32,
    },
    Image {
        rect: Rect,
        url: String,
        decode_size: Option<(u32, u32)>,
        /// Blur with radius already converted to px.
        blur: Option<Blur>,
        alpha: f32,
        radius: f32,
    },
    Text {
        rect: Rect,
        text: String,
        color: Color,
        size: f32,
    },
    PushClip {
        rect: Rect,
        radius: f32,
    },
    PopClip,
}
