//! # Dynamic accent color
//!
//! Screens that want the surrounding UI tinted by a post image hold an
//! `Rc<dyn DynamicColorState>` and call `update_from_image` with the image
//! URL and a [`CancellationToken`]. Requests are not queued: a new request
//! replaces whatever was pending, and a request whose token was cancelled
//! before it resolves is dropped without touching the accent.
//!
//! [`AccentColorState`] is the stock implementation. `update_from_image` only
//! records the request; the host resolves it later with
//! [`AccentColorState::run_pending`], typically from an idle callback, so the
//! fetch and decode never run inside a composition pass.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use feedline_core::{CancellationToken, Color, Signal, signal};
use image::RgbaImage;

use crate::error::ColorError;

/// Pixels at or below this alpha are ignored when extracting a seed color.
const MIN_OPAQUE_ALPHA: u8 = 128;
/// Side length images are reduced to before color extraction.
const SAMPLE_SIZE: u32 = 64;
/// Number of resolved accents kept by default.
pub const DEFAULT_CACHE_CAPACITY: usize = 32;

pub trait DynamicColorState {
    fn update_from_image(&self, url: &str, token: CancellationToken);
}

/// Source of raw image bytes.
pub trait ImageFetcher {
    fn fetch(&self, url: &str) -> anyhow::Result<Vec<u8>>;
}

impl<F> ImageFetcher for F
where
    F: Fn(&str) -> anyhow::Result<Vec<u8>>,
{
    fn fetch(&self, url: &str) -> anyhow::Result<Vec<u8>> {
        self(url)
    }
}

/// Resolved accents by url, evicting the least recently used entry once full.
struct ColorCache {
    colors: HashMap<String, Color>,
    order: VecDeque<String>,
    capacity: usize,
}

impl ColorCache {
    fn new(capacity: usize) -> Self {
        Self {
            colors: HashMap::new(),
            order: VecDeque::new(),
            capacity,
        }
    }

    fn get(&mut self, url: &str) -> Option<Color> {
        let color = self.colors.get(url).copied()?;
        self.touch(url);
        Some(color)
    }

    fn insert(&mut self, url: &str, color: Color) {
        if self.capacity == 0 {
            return;
        }
        if self.colors.insert(url.to_string(), color).is_some() {
            self.touch(url);
            return;
        }
        self.order.push_back(url.to_string());
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.colors.remove(&oldest);
            }
        }
    }

    fn touch(&mut self, url: &str) {
        if let Some(i) = self.order.iter().position(|u| u == url) {
            if let Some(u) = self.order.remove(i) {
                self.order.push_back(u);
            }
        }
    }

    fn len(&self) -> usize {
        self.colors.len()
    }
}

struct PendingRequest {
    url: String,
    token: CancellationToken,
}

pub struct AccentColorState {
    accent: Signal<Color>,
    default_accent: Color,
    fetcher: Rc<dyn ImageFetcher>,
    pending: RefCell<Option<PendingRequest>>,
    cache: RefCell<ColorCache>,
}

impl AccentColorState {
    pub fn new(default_accent: Color, fetcher: Rc<dyn ImageFetcher>) -> Self {
        Self {
            accent: signal(default_accent),
            default_accent,
            fetcher,
            pending: RefCell::new(None),
            cache: RefCell::new(ColorCache::new(DEFAULT_CACHE_CAPACITY)),
        }
    }

    /// Keeps at most `capacity` resolved accents. Zero disables caching.
    pub fn with_cache_capacity(self, capacity: usize) -> Self {
        *self.cache.borrow_mut() = ColorCache::new(capacity);
        self
    }

    pub fn cached_len(&self) -> usize {
        self.cache.borrow().len()
    }

    pub fn accent(&self) -> Color {
        self.accent.get()
    }

    pub fn accent_signal(&self) -> &Signal<Color> {
        &self.accent
    }

    pub fn has_pending(&self) -> bool {
        self.pending.borrow().is_some()
    }

    /// Url of the pending request, if any.
    pub fn pending_url(&self) -> Option<String> {
        self.pending.borrow().as_ref().map(|p| p.url.clone())
    }

    /// Drops any pending request and restores the default accent.
    pub fn reset(&self) {
        if let Some(p) = self.pending.borrow_mut().take() {
            p.token.cancel();
        }
        self.accent.set(self.default_accent);
    }

    /// Resolves the pending request, if any.
    ///
    /// Returns `Ok(None)` when there was nothing to do or the request was
    /// cancelled, `Ok(Some(color))` once the accent has been applied. Errors
    /// are logged and leave the accent unchanged.
    pub fn run_pending(&self) -> Result<Option<Color>, ColorError> {
        let Some(request) = self.pending.borrow_mut().take() else {
            return Ok(None);
        };
        match self.resolve(&request) {
            Ok(color) => {
                if request.token.is_cancelled() {
                    log::debug!("dropping stale accent for {}", request.url);
                    return Ok(None);
                }
                self.accent.set(color);
                Ok(Some(color))
            }
            Err(ColorError::Cancelled(c)) => {
                log::debug!("accent request for {} skipped: {c}", request.url);
                Ok(None)
            }
            Err(e) => {
                log::warn!("accent color unchanged: {e}");
                Err(e)
            }
        }
    }

    fn resolve(&self, request: &PendingRequest) -> Result<Color, ColorError> {
        let url = request.url.as_str();
        request.token.check_cancelled("queued")?;

        let cached = self.cache.borrow_mut().get(url);
        if let Some(color) = cached {
            log::debug!("accent cache hit for {url}");
            return Ok(color);
        }

        let bytes = self.fetcher.fetch(url).map_err(|e| ColorError::Fetch {
            url: url.to_string(),
            reason: format!("{e:#}"),
        })?;
        request.token.check_cancelled("fetched")?;

        let sample = decode_sample(&bytes).map_err(|source| ColorError::Decode {
            url: url.to_string(),
            source,
        })?;
        let color = seed_color(&sample).ok_or_else(|| ColorError::NoOpaquePixels {
            url: url.to_string(),
        })?;

        self.cache.borrow_mut().insert(url, color);
        Ok(color)
    }
}

impl DynamicColorState for AccentColorState {
    fn update_from_image(&self, url: &str, token: CancellationToken) {
        let previous = self.pending.borrow_mut().replace(PendingRequest {
            url: url.to_string(),
            token,
        });
        if let Some(previous) = previous {
            log::debug!("accent request for {} superseded by {url}", previous.url);
            previous.token.cancel();
        }
    }
}

fn decode_sample(bytes: &[u8]) -> Result<RgbaImage, image::ImageError> {
    let img = image::load_from_memory(bytes)?;
    if img.width() > SAMPLE_SIZE || img.height() > SAMPLE_SIZE {
        Ok(img.thumbnail(SAMPLE_SIZE, SAMPLE_SIZE).to_rgba8())
    } else {
        Ok(img.to_rgba8())
    }
}

#[derive(Clone, Copy, Default)]
struct Bucket {
    count: u64,
    r: u64,
    g: u64,
    b: u64,
}

impl Bucket {
    fn mean(&self) -> Color {
        let n = self.count.max(1);
        Color::from_rgb((self.r / n) as u8, (self.g / n) as u8, (self.b / n) as u8)
    }

    fn score(&self) -> f32 {
        let Color(r, g, b, _) = self.mean();
        let max = r.max(g).max(b) as f32;
        let min = r.min(g).min(b) as f32;
        let chroma = (max - min) / 255.0;
        self.count as f32 * (0.2 + chroma)
    }
}

/// Picks a representative color for an image.
///
/// Opaque pixels are grouped into a 16×16×16 histogram; each bucket is scored
/// by its population weighted by chroma so that a vivid subject beats a
/// larger grey backdrop. The mean of the best bucket is returned.
pub fn seed_color(img: &RgbaImage) -> Option<Color> {
    let mut buckets: HashMap<u16, Bucket> = HashMap::new();
    for px in img.pixels() {
        let [r, g, b, a] = px.0;
        if a <= MIN_OPAQUE_ALPHA {
            continue;
        }
        let key = (u16::from(r >> 4) << 8) | (u16::from(g >> 4) << 4) | u16::from(b >> 4);
        let bucket = buckets.entry(key).or_default();
        bucket.count += 1;
        bucket.r += r as u64;
        bucket.g += g as u64;
        bucket.b += b as u64;
    }

    buckets
        .into_iter()
        .max_by(|(ka, a), (kb, b)| a.score().total_cmp(&b.score()).then(kb.cmp(ka)))
        .map(|(_, bucket)| bucket.mean())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba};
    use std::cell::Cell;
    use std::io::Cursor;

    fn png(img: &RgbaImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn solid_png(color: [u8; 4]) -> Vec<u8> {
        png(&RgbaImage::from_pixel(8, 8, Rgba(color)))
    }

    struct MapFetcher {
        calls: Rc<RefCell<Vec<String>>>,
        images: HashMap<String, Vec<u8>>,
    }

    impl ImageFetcher for MapFetcher {
        fn fetch(&self, url: &str) -> anyhow::Result<Vec<u8>> {
            self.calls.borrow_mut().push(url.to_string());
            self.images
                .get(url)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("no image at {url}"))
        }
    }

    fn state_with(images: &[(&str, Vec<u8>)]) -> (AccentColorState, Rc<RefCell<Vec<String>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let fetcher = MapFetcher {
            calls: calls.clone(),
            images: images
                .iter()
                .map(|(u, b)| (u.to_string(), b.clone()))
                .collect(),
        };
        (AccentColorState::new(Color::BLACK, Rc::new(fetcher)), calls)
    }

    #[test]
    fn seed_color_prefers_vivid_bucket() {
        let mut img = RgbaImage::from_pixel(10, 10, Rgba([120, 120, 120, 255]));
        for x in 0..10 {
            for y in 0..4 {
                img.put_pixel(x, y, Rgba([220, 20, 20, 255]));
            }
        }
        assert_eq!(seed_color(&img), Some(Color::from_rgb(220, 20, 20)));
    }

    #[test]
    fn seed_color_ignores_transparent_pixels() {
        let img = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 0]));
        assert_eq!(seed_color(&img), None);
    }

    #[test]
    fn latest_request_wins() {
        let (state, calls) = state_with(&[
            ("u0", solid_png([200, 0, 0, 255])),
            ("u1", solid_png([0, 200, 0, 255])),
            ("u2", solid_png([0, 0, 200, 255])),
        ]);

        let tokens: Vec<_> = (0..3).map(|_| CancellationToken::new()).collect();
        for (i, token) in tokens.iter().enumerate() {
            state.update_from_image(&format!("u{i}"), token.clone());
        }
        assert!(tokens[0].is_cancelled());
        assert!(tokens[1].is_cancelled());
        assert_eq!(state.pending_url().as_deref(), Some("u2"));

        let applied = state.run_pending().unwrap();
        assert_eq!(applied, Some(Color::from_rgb(0, 0, 200)));
        assert_eq!(state.accent(), Color::from_rgb(0, 0, 200));
        assert_eq!(*calls.borrow(), vec!["u2"]);
        assert_eq!(state.run_pending().unwrap(), None);
    }

    #[test]
    fn cancelled_request_is_skipped() {
        let (state, calls) = state_with(&[("u", solid_png([200, 0, 0, 255]))]);
        let token = CancellationToken::new();
        state.update_from_image("u", token.clone());
        token.cancel();

        assert_eq!(state.run_pending().unwrap(), None);
        assert_eq!(state.accent(), Color::BLACK);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn repeated_url_is_served_from_cache() {
        let (state, calls) = state_with(&[("u", solid_png([10, 160, 90, 255]))]);
        for _ in 0..2 {
            state.update_from_image("u", CancellationToken::new());
            assert_eq!(
                state.run_pending().unwrap(),
                Some(Color::from_rgb(10, 160, 90))
            );
        }
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn cache_keeps_only_the_most_recent_urls() {
        let (state, calls) = state_with(&[
            ("a", solid_png([200, 0, 0, 255])),
            ("b", solid_png([0, 200, 0, 255])),
            ("c", solid_png([0, 0, 200, 255])),
        ]);
        let state = state.with_cache_capacity(2);
        let resolve = |url: &str| {
            state.update_from_image(url, CancellationToken::new());
            state.run_pending().unwrap()
        };

        resolve("a");
        resolve("b");
        resolve("a");
        resolve("c");
        assert_eq!(state.cached_len(), 2);
        assert_eq!(*calls.borrow(), vec!["a", "b", "c"]);

        // "b" was the least recently used and got evicted.
        assert_eq!(resolve("b"), Some(Color::from_rgb(0, 200, 0)));
        resolve("c");
        assert_eq!(*calls.borrow(), vec!["a", "b", "c", "b"]);
        assert_eq!(state.cached_len(), 2);
    }

    #[test]
    fn cache_stays_bounded_by_default() {
        let images: Vec<(String, Vec<u8>)> = (0..DEFAULT_CACHE_CAPACITY + 8)
            .map(|i| (format!("u{i}"), solid_png([i as u8 * 5, 80, 120, 255])))
            .collect();
        let pairs: Vec<(&str, Vec<u8>)> = images
            .iter()
            .map(|(u, b)| (u.as_str(), b.clone()))
            .collect();
        let (state, _) = state_with(&pairs);
        for (url, _) in &images {
            state.update_from_image(url, CancellationToken::new());
            state.run_pending().unwrap();
        }
        assert_eq!(state.cached_len(), DEFAULT_CACHE_CAPACITY);
    }

    #[test]
    fn failures_leave_accent_unchanged() {
        let (state, _) = state_with(&[("garbage", vec![1, 2, 3])]);

        state.update_from_image("missing", CancellationToken::new());
        assert!(matches!(state.run_pending(), Err(ColorError::Fetch { .. })));

        state.update_from_image("garbage", CancellationToken::new());
        assert!(matches!(state.run_pending(), Err(ColorError::Decode { .. })));

        assert_eq!(state.accent(), Color::BLACK);
        assert!(!state.has_pending());
    }

    #[test]
    fn closure_fetcher_and_accent_signal() {
        let bytes = solid_png([0, 120, 240, 255]);
        let fetcher = move |_: &str| -> anyhow::Result<Vec<u8>> { Ok(bytes.clone()) };
        let state = AccentColorState::new(Color::WHITE, Rc::new(fetcher));

        let notified = Rc::new(Cell::new(0));
        {
            let notified = notified.clone();
            state
                .accent_signal()
                .subscribe(move |_| notified.set(notified.get() + 1));
        }
        state.update_from_image("any", CancellationToken::new());
        state.run_pending().unwrap();
        assert_eq!(state.accent(), Color::from_rgb(0, 120, 240));

        state.reset();
        assert_eq!(state.accent(), Color::WHITE);
        assert_eq!(notified.get(), 2);
    }
}
