// Copyright 2025 the Travelmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Travelmap View: geographic primitives and a slippy-map viewport.
//!
//! This crate provides small, headless models for placing geotagged content on
//! a Web Mercator map. It focuses on:
//! - Geographic positions ([`LatLng`]) and bounding boxes ([`GeoBounds`]).
//! - A pan + zoom [`MercatorViewport`] converting between geographic
//!   positions and view (device pixel) coordinates.
//! - View fitting to a geographic extent.
//!
//! It does **not** fetch tiles or draw anything. Callers are expected to feed
//! input events into pan/zoom operations and to hand the viewport to
//! consumers that need screen-space positions, such as a marker density
//! sampler.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use travelmap_view::{GeoBounds, LatLng, MercatorViewport};
//!
//! let mut view = MercatorViewport::new(Size::new(800.0, 600.0));
//!
//! // Fit a trip through Europe into the view.
//! let trip = GeoBounds::from_points([
//!     LatLng::new(48.8566, 2.3522),
//!     LatLng::new(41.9028, 12.4964),
//! ])
//! .unwrap();
//! view.fit_bounds(trip);
//!
//! // Screen position of a photo taken in Zurich, on the way.
//! let zurich = LatLng::new(47.3769, 8.5417);
//! let pt = view.project(zurich);
//! assert!(view.visible_bounds().contains(zurich));
//! assert!(pt.x > 0.0 && pt.x < 800.0);
//! ```
//!
//! ## Design notes
//!
//! - Zoom is fractional; one zoom level doubles the world width.
//! - Bounds never wrap across the antimeridian.
//! - Projection math goes through `libm` so results are identical on every
//!   target.
//!
//! This crate is `no_std`.

#![no_std]

mod geo;
mod mercator;

pub use geo::{GeoBounds, LatLng};
pub use mercator::{MAX_LATITUDE, MercatorViewport, MercatorViewportDebugInfo, TILE_SIZE};
