// Copyright 2025 the Travelmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborator traits: where the viewport comes from and where markers go.

use kurbo::{Point, Size};
use travelmap_view::{GeoBounds, LatLng, MercatorViewport};

use crate::error::RenderError;
use crate::photo::Photo;
use crate::transition::MarkerPhase;

/// Identifier for a marker handle created by a sampler.
///
/// Ids come from a per-sampler counter. An id is consumed only when the
/// renderer actually creates a marker with it, and a consumed id is never
/// reused, so a stale id can never alias a newer marker, even one showing
/// the same photo.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub(crate) u64);

impl MarkerId {
    /// Returns the raw counter value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Source of the current map view.
///
/// All three methods must describe the same pan/zoom state.
pub trait ViewportProvider {
    /// Geographic extent currently visible.
    fn viewport_bounds(&self) -> GeoBounds;

    /// Size of the map container in pixels.
    fn viewport_size(&self) -> Size;

    /// Projects a geographic position into container pixel coordinates.
    fn project_to_screen(&self, position: LatLng) -> Point;
}

impl ViewportProvider for MercatorViewport {
    fn viewport_bounds(&self) -> GeoBounds {
        self.visible_bounds()
    }

    fn viewport_size(&self) -> Size {
        self.view_size()
    }

    fn project_to_screen(&self, position: LatLng) -> Point {
        self.project(position)
    }
}

/// Creates, updates and destroys the visual markers a sampler asks for.
///
/// The sampler owns the bookkeeping; the renderer only manages visuals. A
/// renderer is expected to draw each marker at the requested icon size with
/// room for a hidden-count badge, and to reflect [`MarkerPhase`] changes as
/// enter/exit animation state (for example by toggling CSS classes).
pub trait MarkerRenderer {
    /// Renderer-side handle for one marker.
    type Handle;

    /// Attaches the layer that holds markers, if not attached already.
    fn attach_layer(&mut self);

    /// Detaches the marker layer.
    fn detach_layer(&mut self);

    /// Creates a marker for `photo` with a badge showing `hidden_count`.
    ///
    /// `id` is the sampler's identity for the handle; renderers that report
    /// clicks pass it back through
    /// [`DensitySampler::click`](crate::DensitySampler::click).
    fn create_marker(
        &mut self,
        id: MarkerId,
        photo: &Photo,
        hidden_count: usize,
        icon_size: f64,
    ) -> Result<Self::Handle, RenderError>;

    /// Adds, updates or (for `0`) removes the hidden-count badge in place.
    fn update_badge(&mut self, handle: &Self::Handle, hidden_count: usize);

    /// Returns the hidden count the marker currently displays.
    fn displayed_badge(&self, handle: &Self::Handle) -> usize;

    /// Rebuilds the marker's icon at a new size.
    fn rebuild_icon(
        &mut self,
        handle: &Self::Handle,
        photo: &Photo,
        hidden_count: usize,
        icon_size: f64,
    );

    /// Reflects a lifecycle phase change on the marker.
    fn set_phase(&mut self, handle: &Self::Handle, phase: MarkerPhase);

    /// Detaches the marker from the layer.
    fn remove_marker(&mut self, handle: &Self::Handle);
}
