// Copyright 2025 the Travelmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Travelmap Density: viewport-aware sampling of photo markers.
//!
//! A map with thousands of geotagged photos cannot show a marker for each of
//! them. This crate decides which photos get a marker for the current view:
//! - The visible area is split into a grid of square screen cells.
//! - Each occupied cell shows exactly one marker, the photo with the highest
//!   deterministic priority, badged with how many photos it hides.
//! - After every pan or zoom the new winners are diffed against the previous
//!   ones, so unchanged markers are kept as-is and only the difference is
//!   created or removed.
//! - Created and removed markers move through timed enter/exit phases that
//!   the host drives with [`DensitySampler::advance`].
//!
//! The crate draws nothing. Hosts plug in a [`ViewportProvider`] (any slippy
//! map, or the bundled [`MercatorViewport`]) and a [`MarkerRenderer`] that
//! owns the visuals. [`HeadlessRenderer`] records markers in memory for tests
//! and server-side use.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use travelmap_density::{
//!     DensitySampler, GeoBounds, HeadlessRenderer, ImmediateTransitions, LatLng,
//!     MercatorViewport, Photo, SamplerConfig,
//! };
//!
//! let mut view = MercatorViewport::new(Size::new(800.0, 600.0));
//! view.fit_bounds(GeoBounds::new(
//!     LatLng::new(41.0, 2.0),
//!     LatLng::new(49.0, 13.0),
//! ));
//!
//! let photos = vec![
//!     Photo::new("paris/1.jpg", 48.8566, 2.3522).with_caption("Louvre"),
//!     Photo::new("paris/2.jpg", 48.8570, 2.3530),
//!     Photo::new("rome/1.jpg", 41.9028, 12.4964),
//! ];
//!
//! let mut sampler = DensitySampler::new(HeadlessRenderer::new(), ImmediateTransitions);
//! let stats = sampler.init(view, photos, SamplerConfig::new()).unwrap();
//!
//! // The two Paris photos share a cell; the captioned one wins.
//! assert_eq!(stats.added, 2);
//! let paris = sampler.active_marker("paris/1.jpg|48.8566|2.3522").unwrap();
//! assert_eq!(paris.hidden_count, 1);
//! ```
//!
//! ## Design notes
//!
//! - Selection is a pure function of the photo collection, the viewport and
//!   the cell size. Collection order never matters.
//! - Marker identity is the photo identity key `url|lat|lng`; handles carry a
//!   separate, never reused [`MarkerId`] so late transition timers cannot
//!   touch a newer marker for the same photo.
//! - Favorites are never sampled; hosts render them on their own layer.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod diff;
mod error;
mod grid;
mod headless;
mod photo;
mod priority;
mod provider;
mod sampler;
mod transition;

pub use config::{
    ClickHandler, DEFAULT_CELL_SIZE, DEFAULT_ICON_SIZE, FavoritePredicate, MarkerContext,
    SamplerConfig,
};
pub use diff::KeyDiff;
pub use error::{ConfigError, RenderError};
pub use grid::{CellKey, GridBuckets};
pub use headless::{HeadlessMarker, HeadlessRenderer};
pub use photo::{MediaKind, Photo};
pub use priority::{
    CAPTION_BONUS, Candidate, FAVORITE_BONUS, HASH_MASK, key_hash, priority_score, select_winner,
};
pub use provider::{MarkerId, MarkerRenderer, ViewportProvider};
pub use sampler::{ActiveMarkerView, DensitySampler, UpdateStats};
pub use transition::{
    FixedDelay, ImmediateTransitions, MarkerPhase, Timer, TimerQueue, TransitionScheduler,
};

pub use travelmap_view::{GeoBounds, LatLng, MercatorViewport};
