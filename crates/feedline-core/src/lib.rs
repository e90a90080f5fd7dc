//! # State, Signals, and Effects
//!
//! Feedline screens are plain functions returning a [`View`] tree. State that
//! must survive recomposition lives in `remember*` slots, observable values
//! are [`Signal`]s, and side effects are tied to a [`Scope`] so they are
//! cleaned up when the UI that owns them goes away.
//!
//! ## Signals
//!
//! ```rust
//! use feedline_core::*;
//!
//! let count = signal(0);
//! count.set(1);
//! count.update(|v| *v += 1);
//! assert_eq!(count.get(), 2);
//! ```
//!
//! `subscribe` returns a key; pass it to `unsubscribe` to stop observing.
//!
//! ## Compositions and effects
//!
//! A [`Composition`] owns the remembered slots of one UI tree. Every call to
//! `compose` is a recomposition pass; `dispose` is the unmount.
//!
//! ```rust
//! use feedline_core::*;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let runs = Rc::new(Cell::new(0));
//! let mut composition = Composition::new();
//! for _ in 0..3 {
//!     let runs = runs.clone();
//!     composition.compose(move || {
//!         disposable_effect("key", move || {
//!             runs.set(runs.get() + 1);
//!             on_unmount(|| log::info!("disposed"))
//!         });
//!     });
//! }
//! assert_eq!(runs.get(), 1);
//! composition.dispose();
//! ```
//!
//! `disposable_effect` re-runs only when its key changes, disposing the
//! previous run first. Long-running work started from an effect should hold
//! a [`CancellationToken`] (usually from a [`TaskSlot`]) and stop when it is
//! cancelled.

pub mod color;
pub mod effects;
pub mod geometry;
pub mod input;
pub mod locals;
pub mod modifier;
pub mod prelude;
pub mod runtime;
pub mod scope;
pub mod semantics;
pub mod signal;
pub mod task;
pub mod view;

#[cfg(test)]
mod tests;

pub use color::*;
pub use effects::*;
pub use geometry::*;
pub use input::*;
pub use locals::*;
pub use modifier::*;
pub use runtime::*;
pub use scope::*;
pub use semantics::*;
pub use signal::*;
pub use task::*;
pub use view::*;
pub use taffy::{AlignItems, AlignSelf, JustifyContent};
