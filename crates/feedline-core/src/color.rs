use smallvec::SmallVec;

use crate::Vec2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color(pub u8, pub u8, pub u8, pub u8);

impl Color {
    pub const TRANSPARENT: Color = Color(0, 0, 0, 0);
    pub const BLACK: Color = Color(0, 0, 0, 255);
    pub const WHITE: Color = Color(255, 255, 255, 255);

    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color(r, g, b, 255)
    }
    pub fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color(r, g, b, a)
    }
    pub fn from_hex(hex: &str) -> Self {
        let s = hex.trim_start_matches('#');
        let channel = |range: std::ops::Range<usize>, fallback: u8| {
            s.get(range)
                .and_then(|c| u8::from_str_radix(c, 16).ok())
                .unwrap_or(fallback)
        };
        match s.len() {
            6 => Color(channel(0..2, 0), channel(2..4, 0), channel(4..6, 0), 255),
            8 => Color(
                channel(0..2, 0),
                channel(2..4, 0),
                channel(4..6, 0),
                channel(6..8, 255),
            ),
            _ => Color::BLACK,
        }
    }
    pub fn with_alpha(self, a: u8) -> Self {
        Color(self.0, self.1, self.2, a)
    }

    /// Same color with alpha given as a fraction of fully opaque.
    pub fn with_alpha_f32(self, a: f32) -> Self {
        self.with_alpha((a.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    pub fn alpha_f32(self) -> f32 {
        self.3 as f32 / 255.0
    }

    /// Multiplies the existing alpha by `a`.
    pub fn mul_alpha(self, a: f32) -> Self {
        let na = (self.3 as f32 * a).clamp(0.0, 255.0) as u8;
        self.with_alpha(na)
    }

    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Color(
            mix(self.0, other.0),
            mix(self.1, other.1),
            mix(self.2, other.2),
            mix(self.3, other.3),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient in `[0, 1]`.
    pub offset: f32,
    pub color: Color,
}

impl GradientStop {
    pub fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Most gradients in the app have eight stops or fewer.
pub type GradientStops = SmallVec<[GradientStop; 8]>;

/// Spreads `colors` evenly over `[0, 1]`.
pub fn evenly_spaced(colors: impl IntoIterator<Item = Color>) -> GradientStops {
    let colors: SmallVec<[Color; 8]> = colors.into_iter().collect();
    let last = colors.len().saturating_sub(1).max(1) as f32;
    colors
        .into_iter()
        .enumerate()
        .map(|(i, color)| GradientStop::new(i as f32 / last, color))
        .collect()
}

/// Brush for filling shapes.
///
/// Linear gradients are defined in normalized coordinates of the painted rect
/// ((0,0) top-left, (1,1) bottom-right). Radial gradients carry their center
/// and radius in px relative to the rect origin, because callers usually
/// derive them from a measured size.
#[derive(Clone, Debug, PartialEq)]
pub enum Brush {
    Solid(Color),
    Linear {
        start: Vec2,
        end: Vec2,
        stops: GradientStops,
    },
    Radial {
        center: Vec2,
        radius: f32,
        stops: GradientStops,
    },
}

impl From<Color> for Brush {
    fn from(c: Color) -> Self {
        Brush::Solid(c)
    }
}

impl Brush {
    pub fn stops(&self) -> &[GradientStop] {
        match self {
            Brush::Solid(_) => &[],
            Brush::Linear { stops, .. } | Brush::Radial { stops, .. } => stops,
        }
    }

    /// Samples the brush at gradient position `t`.
    pub fn color_at(&self, t: f32) -> Color {
        match self {
            Brush::Solid(c) => *c,
            Brush::Linear { stops, .. } | Brush::Radial { stops, .. } => sample_stops(stops, t),
        }
    }

    /// Scales every color's alpha by `a` (used for alpha inherited from parents).
    pub fn mul_alpha(&self, a: f32) -> Brush {
        if (a - 1.0).abs() < f32::EPSILON {
            return self.clone();
        }
        let scale = |stops: &GradientStops| {
            stops
                .iter()
                .map(|s| GradientStop::new(s.offset, s.color.mul_alpha(a)))
                .collect()
        };
        match self {
            Brush::Solid(c) => Brush::Solid(c.mul_alpha(a)),
            Brush::Linear { start, end, stops } => Brush::Linear {
                start: *start,
                end: *end,
                stops: scale(stops),
            },
            Brush::Radial {
                center,
                radius,
                stops,
            } => Brush::Radial {
                center: *center,
                radius: *radius,
                stops: scale(stops),
            },
        }
    }
}

fn sample_stops(stops: &[GradientStop], t: f32) -> Color {
    let Some(first) = stops.first() else {
        return Color::TRANSPARENT;
    };
    let t = t.clamp(0.0, 1.0);
    if t <= first.offset {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = b.offset - a.offset;
            if span <= f32::EPSILON {
                return b.color;
            }
            return a.color.lerp(b.color, (t - a.offset) / span);
        }
    }
    stops[stops.len() - 1].color
}

pub struct LinearGradient;

impl LinearGradient {
    pub fn vertical(stops: GradientStops) -> Brush {
        Brush::Linear {
            start: Vec2 { x: 0.0, y: 0.0 },
            end: Vec2 { x: 0.0, y: 1.0 },
            stops,
        }
    }

    pub fn vertical_two(top: Color, bottom: Color) -> Brush {
        Self::vertical(evenly_spaced([top, bottom]))
    }

    pub fn horizontal(stops: GradientStops) -> Brush {
        Brush::Linear {
            start: Vec2 { x: 0.0, y: 0.0 },
            end: Vec2 { x: 1.0, y: 0.0 },
            stops,
        }
    }
}

pub struct RadialGradient;

impl RadialGradient {
    pub fn new(center: Vec2, radius: f32, stops: GradientStops) -> Brush {
        Brush::Radial {
            center,
            radius: radius.max(0.0),
            stops,
        }
    }
}
