// Copyright 2025 the Travelmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory marker renderer.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use travelmap_view::LatLng;

use crate::error::RenderError;
use crate::photo::Photo;
use crate::provider::{MarkerId, MarkerRenderer};
use crate::transition::MarkerPhase;

/// What a [`HeadlessRenderer`] remembers about one marker.
#[derive(Clone, Debug, PartialEq)]
pub struct HeadlessMarker {
    /// Identity key of the photo shown.
    pub key: String,
    /// Position of the photo shown.
    pub position: LatLng,
    /// Badge value currently displayed.
    pub hidden_count: usize,
    /// Icon size the marker was last drawn at.
    pub icon_size: f64,
    /// Last phase reported by the sampler.
    pub phase: MarkerPhase,
}

/// A [`MarkerRenderer`] that draws nothing and records everything.
///
/// Handles are the sampler's own [`MarkerId`]s. Markers are forgotten once
/// removed; the counters keep a running total for assertions.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    markers: HashMap<MarkerId, HeadlessMarker>,
    layer_attached: bool,
    created: usize,
    removed: usize,
    badge_updates: usize,
    icon_rebuilds: usize,
}

impl HeadlessRenderer {
    /// Creates a renderer with no layer and no markers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the marker behind `id`, if it is still attached.
    #[must_use]
    pub fn marker(&self, id: MarkerId) -> Option<&HeadlessMarker> {
        self.markers.get(&id)
    }

    /// Returns the attached markers sorted by id.
    #[must_use]
    pub fn markers(&self) -> Vec<(MarkerId, &HeadlessMarker)> {
        let mut out: Vec<_> = self.markers.iter().map(|(id, m)| (*id, m)).collect();
        out.sort_unstable_by_key(|(id, _)| *id);
        out
    }

    /// Returns the number of attached markers, including exiting ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Returns `true` if no marker is attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Returns `true` while the marker layer is attached.
    #[must_use]
    pub fn is_layer_attached(&self) -> bool {
        self.layer_attached
    }

    /// Total markers created so far.
    #[must_use]
    pub fn created(&self) -> usize {
        self.created
    }

    /// Total markers removed so far.
    #[must_use]
    pub fn removed(&self) -> usize {
        self.removed
    }

    /// Total in-place badge updates so far.
    #[must_use]
    pub fn badge_updates(&self) -> usize {
        self.badge_updates
    }

    /// Total icon rebuilds so far.
    #[must_use]
    pub fn icon_rebuilds(&self) -> usize {
        self.icon_rebuilds
    }
}

impl MarkerRenderer for HeadlessRenderer {
    type Handle = MarkerId;

    fn attach_layer(&mut self) {
        self.layer_attached = true;
    }

    fn detach_layer(&mut self) {
        self.layer_attached = false;
    }

    fn create_marker(
        &mut self,
        id: MarkerId,
        photo: &Photo,
        hidden_count: usize,
        icon_size: f64,
    ) -> Result<MarkerId, RenderError> {
        if !self.layer_attached {
            return Err(RenderError::new("marker layer is not attached"));
        }
        self.markers.insert(
            id,
            HeadlessMarker {
                key: photo.identity_key(),
                position: photo.position(),
                hidden_count,
                icon_size,
                phase: MarkerPhase::Entering,
            },
        );
        self.created += 1;
        Ok(id)
    }

    fn update_badge(&mut self, handle: &MarkerId, hidden_count: usize) {
        if let Some(marker) = self.markers.get_mut(handle) {
            marker.hidden_count = hidden_count;
            self.badge_updates += 1;
        }
    }

    fn displayed_badge(&self, handle: &MarkerId) -> usize {
        self.markers.get(handle).map_or(0, |m| m.hidden_count)
    }

    fn rebuild_icon(
        &mut self,
        handle: &MarkerId,
        _photo: &Photo,
        hidden_count: usize,
        icon_size: f64,
    ) {
        if let Some(marker) = self.markers.get_mut(handle) {
            marker.hidden_count = hidden_count;
            marker.icon_size = icon_size;
            self.icon_rebuilds += 1;
        }
    }

    fn set_phase(&mut self, handle: &MarkerId, phase: MarkerPhase) {
        if let Some(marker) = self.markers.get_mut(handle) {
            marker.phase = phase;
        }
    }

    fn remove_marker(&mut self, handle: &MarkerId) {
        if self.markers.remove(handle).is_some() {
            self.removed += 1;
        }
    }
}
