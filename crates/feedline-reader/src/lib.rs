#![allow(non_snake_case)]
//! Reader screens for Feedline.
//!
//! ```rust
//! use std::rc::Rc;
//! use feedline_core::*;
//! use feedline_reader::*;
//! use feedline_ui::PagerState;
//!
//! let fetcher = |_: &str| -> anyhow::Result<Vec<u8>> { anyhow::bail!("offline") };
//! let accent = Rc::new(AccentColorState::new(Color::BLACK, Rc::new(fetcher)));
//! let posts = Rc::new(vec![PostSummary::new("1", "Hello").with_image("https://img/1")]);
//!
//! let mut composition = Composition::new();
//! let view = composition.compose(|| {
//!     FeaturedSection(FeaturedSectionProps {
//!         modifier: Modifier::new(),
//!         insets: WindowInsets::default(),
//!         pager_state: Rc::new(PagerState::new(posts.len())),
//!         posts: posts.clone(),
//!         color_state: accent.clone(),
//!         layout: FeaturedLayout::default(),
//!         callbacks: FeaturedCallbacks::new(|_| {}, |_| {}, |_| {}),
//!     })
//! });
//! assert_eq!(view.children.len(), 2);
//! assert_eq!(accent.pending_url().as_deref(), Some("https://img/1"));
//! assert!(accent.run_pending().is_err());
//! composition.dispose();
//! ```

pub mod config;
pub mod dynamic_color;
pub mod error;
pub mod featured;
pub mod post;

pub use config::{AspectRatios, FeaturedLayout};
pub use dynamic_color::{AccentColorState, DynamicColorState, ImageFetcher, seed_color};
pub use error::{ColorError, FeaturedError};
pub use featured::*;
pub use post::PostSummary;
