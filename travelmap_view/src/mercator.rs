// Copyright 2025 the Travelmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::f64::consts::{FRAC_PI_4, PI};

use kurbo::{Affine, Point, Size, Vec2};

use crate::geo::{GeoBounds, LatLng};

/// Latitude limit of the square Web Mercator world, in degrees.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Edge length of one map tile at zoom 0, in pixels.
pub const TILE_SIZE: f64 = 256.0;

/// Slippy-map viewport using the spherical Web Mercator projection.
///
/// The viewport tracks a center position, a fractional zoom level and the
/// size of the view in device pixels. At zoom `z` the whole world is
/// `256 * 2^z` pixels wide. View coordinates have their origin at the top-left
/// corner of the view, with `y` growing downwards.
///
/// Internally the projection is split into a non-linear step (geographic
/// position to unit Mercator square `[0, 1]²`) and an affine step (unit square
/// to view pixels) which is rebuilt whenever center, zoom or size change.
#[derive(Clone, Debug)]
pub struct MercatorViewport {
    view_size: Size,
    center: Point,
    zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
    unit_to_view: Affine,
    view_to_unit: Affine,
}

impl MercatorViewport {
    /// Creates a viewport of the given pixel size showing the whole world.
    ///
    /// - Initial center is `(0, 0)`.
    /// - Initial zoom is `0.0`.
    /// - Zoom is clamped to the range `[0, 22]` by default.
    #[must_use]
    pub fn new(view_size: Size) -> Self {
        let mut vp = Self {
            view_size,
            center: Point::new(0.5, 0.5),
            zoom: 0.0,
            min_zoom: 0.0,
            max_zoom: 22.0,
            unit_to_view: Affine::IDENTITY,
            view_to_unit: Affine::IDENTITY,
        };
        vp.rebuild_transforms();
        vp
    }

    /// Returns the size of the view in device pixels.
    #[must_use]
    pub fn view_size(&self) -> Size {
        self.view_size
    }

    /// Sets the size of the view in device pixels.
    ///
    /// The center stays fixed; the visible extent grows or shrinks around it.
    pub fn set_view_size(&mut self, size: Size) {
        if self.view_size == size {
            return;
        }
        self.view_size = size;
        self.rebuild_transforms();
    }

    /// Returns the geographic position at the center of the view.
    #[must_use]
    pub fn center(&self) -> LatLng {
        unit_to_lat_lng(self.center)
    }

    /// Centers the view on `position`.
    pub fn set_center(&mut self, position: LatLng) {
        if !position.is_finite() {
            return;
        }
        self.center = lat_lng_to_unit(position);
        self.rebuild_transforms();
    }

    /// Returns the current fractional zoom level.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level, clamping it into the configured zoom range.
    pub fn set_zoom(&mut self, zoom: f64) {
        if !zoom.is_finite() {
            return;
        }
        let clamped = zoom.clamp(self.min_zoom, self.max_zoom);
        if (self.zoom - clamped).abs() < f64::EPSILON {
            return;
        }
        self.zoom = clamped;
        self.rebuild_transforms();
    }

    /// Sets the minimum and maximum zoom levels.
    ///
    /// The provided range is normalized so that `min_zoom <= max_zoom`. The
    /// current zoom is clamped into the new range.
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        let clamped = self.zoom.clamp(min_zoom, max_zoom);
        if clamped != self.zoom {
            self.zoom = clamped;
            self.rebuild_transforms();
        }
    }

    /// Returns the width of the whole world in pixels at the current zoom.
    #[must_use]
    pub fn world_size(&self) -> f64 {
        TILE_SIZE * libm::exp2(self.zoom)
    }

    /// Pans the map content by a delta in view pixels.
    ///
    /// A positive `x` drags the content to the right, revealing what lies to
    /// the west.
    pub fn pan_by_view(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO || !delta.is_finite() {
            return;
        }
        self.center -= delta / self.world_size();
        self.center.y = self.center.y.clamp(0.0, 1.0);
        self.rebuild_transforms();
    }

    /// Zooms by `factor` around an anchor point in view coordinates.
    ///
    /// A factor of `2.0` zooms in by one level. The geographic position under
    /// the anchor stays under the anchor as far as zoom clamping allows.
    pub fn zoom_about_view_point(&mut self, anchor_view: Point, factor: f64) {
        if factor <= 0.0 || !factor.is_finite() {
            return;
        }
        let new_zoom = (self.zoom + libm::log2(factor)).clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }

        let anchor_unit = self.view_to_unit * anchor_view;
        let half = self.half_view();
        self.zoom = new_zoom;
        let offset = (anchor_view.to_vec2() - half) / self.world_size();
        self.center = anchor_unit - offset;
        self.rebuild_transforms();
    }

    /// Fits `bounds` into the view, choosing the largest zoom that shows the
    /// whole box and centering on it.
    ///
    /// Invalid bounds or an empty view leave the viewport untouched. Zero-area
    /// bounds only recenter.
    pub fn fit_bounds(&mut self, bounds: GeoBounds) {
        if !bounds.is_valid() {
            return;
        }
        if self.view_size.width <= 0.0 || self.view_size.height <= 0.0 {
            return;
        }

        let nw = lat_lng_to_unit(LatLng::new(bounds.north, bounds.west));
        let se = lat_lng_to_unit(LatLng::new(bounds.south, bounds.east));
        let unit_w = se.x - nw.x;
        let unit_h = se.y - nw.y;
        self.center = nw.midpoint(se);

        if unit_w > 0.0 || unit_h > 0.0 {
            let sx = self.view_size.width / (unit_w * TILE_SIZE).max(f64::MIN_POSITIVE);
            let sy = self.view_size.height / (unit_h * TILE_SIZE).max(f64::MIN_POSITIVE);
            let target_zoom = libm::log2(sx.min(sy));
            self.zoom = target_zoom.clamp(self.min_zoom, self.max_zoom);
        }

        self.rebuild_transforms();
    }

    /// Returns the geographic extent currently visible through the view.
    #[must_use]
    pub fn visible_bounds(&self) -> GeoBounds {
        let nw = self.unproject(Point::ZERO);
        let se = self.unproject(Point::new(self.view_size.width, self.view_size.height));
        GeoBounds::new(nw, se)
    }

    /// Projects a geographic position into view coordinates.
    ///
    /// Latitudes beyond [`MAX_LATITUDE`] are clamped first.
    #[must_use]
    pub fn project(&self, position: LatLng) -> Point {
        self.unit_to_view * lat_lng_to_unit(position)
    }

    /// Converts a point in view coordinates back into a geographic position.
    #[must_use]
    pub fn unproject(&self, pt: Point) -> LatLng {
        unit_to_lat_lng(self.view_to_unit * pt)
    }

    /// Snapshot of the current viewport state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> MercatorViewportDebugInfo {
        MercatorViewportDebugInfo {
            view_size: self.view_size,
            center: self.center(),
            zoom: self.zoom,
            min_zoom: self.min_zoom,
            max_zoom: self.max_zoom,
            world_size: self.world_size(),
            visible_bounds: self.visible_bounds(),
        }
    }

    fn half_view(&self) -> Vec2 {
        Vec2::new(self.view_size.width * 0.5, self.view_size.height * 0.5)
    }

    fn rebuild_transforms(&mut self) {
        let scale = self.world_size();
        // Unit square → view: scale to world pixels, then put the center in
        // the middle of the view.
        let offset = self.half_view() - self.center.to_vec2() * scale;
        self.unit_to_view = Affine::translate(offset) * Affine::scale(scale);
        self.view_to_unit = self.unit_to_view.inverse();
    }
}

/// Debug snapshot of a [`MercatorViewport`] state.
#[derive(Clone, Copy, Debug)]
pub struct MercatorViewportDebugInfo {
    /// Current view size in device pixels.
    pub view_size: Size,
    /// Geographic position at the view center.
    pub center: LatLng,
    /// Current fractional zoom level.
    pub zoom: f64,
    /// Minimum zoom level.
    pub min_zoom: f64,
    /// Maximum zoom level.
    pub max_zoom: f64,
    /// Width of the whole world in pixels at the current zoom.
    pub world_size: f64,
    /// Geographic extent currently visible.
    pub visible_bounds: GeoBounds,
}

fn lat_lng_to_unit(p: LatLng) -> Point {
    let lat = p.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (p.lng + 180.0) / 360.0;
    let y = 0.5 - libm::log(libm::tan(FRAC_PI_4 + lat * 0.5)) / (2.0 * PI);
    Point::new(x, y)
}

fn unit_to_lat_lng(p: Point) -> LatLng {
    let lng = p.x * 360.0 - 180.0;
    let lat = libm::atan(libm::sinh(PI * (1.0 - 2.0 * p.y))).to_degrees();
    LatLng::new(lat, lng)
}
