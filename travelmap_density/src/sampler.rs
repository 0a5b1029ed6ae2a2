// Copyright 2025 the Travelmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use kurbo::Size;
use travelmap_view::GeoBounds;

use crate::config::{MarkerContext, SamplerConfig, check_cell_size, check_icon_size};
use crate::diff::KeyDiff;
use crate::error::ConfigError;
use crate::grid::{CellKey, GridBuckets};
use crate::photo::Photo;
use crate::priority::{Candidate, priority_score, select_winner};
use crate::provider::{MarkerId, MarkerRenderer, ViewportProvider};
use crate::transition::{MarkerPhase, TimerQueue, TransitionScheduler};

/// Summary of one [`DensitySampler::update`] pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UpdateStats {
    /// Photos that passed the favorite and viewport filters.
    pub visible: usize,
    /// Occupied grid cells.
    pub buckets: usize,
    /// Markers kept from the previous pass.
    pub retained: usize,
    /// Markers created in this pass.
    pub added: usize,
    /// Markers sent into their exit transition.
    pub removed: usize,
    /// Winners whose marker could not be created; retried next pass.
    pub failed: usize,
    /// Retained markers whose badge changed.
    pub badge_updates: usize,
}

/// Read-only view of an active marker.
#[derive(Clone, Copy, Debug)]
pub struct ActiveMarkerView<'a> {
    /// Handle identity.
    pub id: MarkerId,
    /// Identity key of the photo shown.
    pub key: &'a str,
    /// The photo shown.
    pub photo: &'a Photo,
    /// Photos hidden behind this marker.
    pub hidden_count: usize,
    /// Grid cell the marker won in the latest pass.
    pub cell: CellKey,
    /// Current lifecycle phase; `Entering` or `Active`.
    pub phase: MarkerPhase,
}

/// Selects at most one photo marker per screen cell and keeps the rendered
/// set in sync as the viewport changes.
///
/// Each [`update`](Self::update) pass buckets the visible, non-favorite photos
/// into a `cell_size` pixel grid, picks the highest-priority photo of every
/// bucket and diffs the winners against the markers from the previous pass:
/// unchanged winners keep their marker (only the badge may change), vanished
/// winners exit, and new winners get a fresh marker that enters.
///
/// The sampler owns all bookkeeping. The [`MarkerRenderer`] only draws, the
/// [`ViewportProvider`] only answers questions about the view, and the
/// [`TransitionScheduler`] only decides how long animations last.
pub struct DensitySampler<V, R, S>
where
    R: MarkerRenderer,
{
    renderer: R,
    scheduler: S,
    session: Option<Session<V>>,
    markers: MarkerBook<R::Handle>,
    buckets: GridBuckets,
    layer_attached: bool,
}

struct Session<V> {
    viewport: V,
    photos: Vec<Photo>,
    config: SamplerConfig,
}

struct Winner {
    index: usize,
    hidden_count: usize,
    cell: CellKey,
}

struct ActiveMarker<H> {
    id: MarkerId,
    handle: H,
    photo: Photo,
    hidden_count: usize,
    cell: CellKey,
    phase: MarkerPhase,
}

impl<V, R, S> DensitySampler<V, R, S>
where
    V: ViewportProvider,
    R: MarkerRenderer,
    S: TransitionScheduler,
{
    /// Creates an uninitialized sampler drawing through `renderer`.
    #[must_use]
    pub fn new(renderer: R, scheduler: S) -> Self {
        Self {
            renderer,
            scheduler,
            session: None,
            markers: MarkerBook::new(),
            buckets: GridBuckets::new(),
            layer_attached: false,
        }
    }

    /// Binds the sampler to a viewport and photo collection and runs a first
    /// update.
    ///
    /// Calling `init` again fully resets tracking: every existing marker is
    /// removed before the new session starts. The marker layer is attached if
    /// it is not already. An invalid `config` is rejected without touching
    /// the current state.
    pub fn init(
        &mut self,
        viewport: V,
        photos: Vec<Photo>,
        config: SamplerConfig,
    ) -> Result<UpdateStats, ConfigError> {
        if let Err(err) = config.validate() {
            log::warn!("rejected sampler configuration: {err}");
            return Err(err);
        }
        self.markers.clear(&mut self.renderer);
        if !self.layer_attached {
            self.renderer.attach_layer();
            self.layer_attached = true;
        }
        self.session = Some(Session {
            viewport,
            photos,
            config,
        });
        Ok(self.update())
    }

    /// Removes every marker, detaches the layer and forgets the session.
    ///
    /// Pending transitions are dropped without waiting; timers that would
    /// have fired later have nothing left to act on. Safe to call at any
    /// time, including before [`init`](Self::init).
    pub fn stop(&mut self) {
        self.markers.clear(&mut self.renderer);
        if self.layer_attached {
            self.renderer.detach_layer();
            self.layer_attached = false;
        }
        self.session = None;
        self.buckets.clear();
    }

    /// Returns `true` between [`init`](Self::init) and [`stop`](Self::stop).
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.session.is_some()
    }

    /// Replaces the photo collection.
    ///
    /// Nothing is recomputed until the next [`update`](Self::update). Ignored
    /// before [`init`](Self::init), which takes its own collection.
    pub fn set_photos(&mut self, photos: Vec<Photo>) {
        match &mut self.session {
            Some(session) => session.photos = photos,
            None => log::debug!("set_photos ignored: sampler is not initialized"),
        }
    }

    /// Returns the current photo collection; empty before `init`.
    #[must_use]
    pub fn photos(&self) -> &[Photo] {
        self.session
            .as_ref()
            .map(|s| s.photos.as_slice())
            .unwrap_or_default()
    }

    /// Recomputes bucket winners for the current viewport and syncs markers.
    ///
    /// No-op before [`init`](Self::init). A degenerate viewport (empty or
    /// non-finite size, invalid bounds) counts as showing no photos, so all
    /// markers exit instead of anything failing.
    pub fn update(&mut self) -> UpdateStats {
        let Some(session) = self.session.as_ref() else {
            return UpdateStats::default();
        };
        let mut stats = UpdateStats::default();
        let winners = collect_winners(session, &mut self.buckets, &mut stats);
        let diff = KeyDiff::between(&self.markers.active, &winners);

        for key in &diff.removed {
            if let Some(marker) = self.markers.active.remove(key) {
                self.markers
                    .exit(&mut self.renderer, &self.scheduler, marker);
                stats.removed += 1;
            }
        }

        for key in &diff.retained {
            let winner = &winners[key];
            if let Some(marker) = self.markers.active.get_mut(key) {
                marker.cell = winner.cell;
                if marker.hidden_count != winner.hidden_count {
                    self.renderer
                        .update_badge(&marker.handle, winner.hidden_count);
                    marker.hidden_count = winner.hidden_count;
                    stats.badge_updates += 1;
                }
                stats.retained += 1;
            }
        }

        let icon_size = session.config.icon_size();
        for key in diff.added {
            let winner = &winners[&key];
            let photo = &session.photos[winner.index];
            let id = self.markers.peek_id();
            match self
                .renderer
                .create_marker(id, photo, winner.hidden_count, icon_size)
            {
                Ok(handle) => {
                    self.markers.claim_id(id);
                    let marker = ActiveMarker {
                        id,
                        handle,
                        photo: photo.clone(),
                        hidden_count: winner.hidden_count,
                        cell: winner.cell,
                        phase: MarkerPhase::Entering,
                    };
                    self.markers
                        .enter(&mut self.renderer, &self.scheduler, key, marker);
                    stats.added += 1;
                }
                Err(err) => {
                    log::warn!("skipping marker for {key}: {err}");
                    stats.failed += 1;
                }
            }
        }

        log::debug!(
            "density update: {} visible in {} cells, {} kept, {} added, {} removed, {} failed",
            stats.visible,
            stats.buckets,
            stats.retained,
            stats.added,
            stats.removed,
            stats.failed,
        );
        stats
    }

    /// Redraws every active marker at a new icon size.
    ///
    /// Bucket assignment is untouched. Badges are preserved by reading the
    /// displayed value back from the renderer. No-op before
    /// [`init`](Self::init).
    pub fn update_icon_size(&mut self, icon_size: f64) -> Result<(), ConfigError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        check_icon_size(icon_size)?;
        session.config.set_icon_size(icon_size);
        for marker in self.markers.active.values() {
            let hidden_count = self.renderer.displayed_badge(&marker.handle);
            self.renderer
                .rebuild_icon(&marker.handle, &marker.photo, hidden_count, icon_size);
        }
        Ok(())
    }

    /// Changes the grid resolution and immediately runs an update.
    ///
    /// No-op before [`init`](Self::init).
    pub fn set_cell_size(&mut self, cell_size: f64) -> Result<UpdateStats, ConfigError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(UpdateStats::default());
        };
        check_cell_size(cell_size)?;
        session.config.set_cell_size(cell_size);
        Ok(self.update())
    }

    /// Geographic bounds of all active markers, or `None` when there are
    /// none.
    ///
    /// Exiting markers are not included.
    #[must_use]
    pub fn bounds(&self) -> Option<GeoBounds> {
        GeoBounds::from_points(self.markers.active.values().map(|m| m.photo.position()))
    }

    /// Completes every transition due at `now_ms`.
    ///
    /// Hosts animating markers call this with a monotonic millisecond clock,
    /// typically once per frame. New transitions are timed from the latest
    /// `now_ms` seen. Returns the number of transitions completed.
    pub fn advance(&mut self, now_ms: u64) -> usize {
        self.markers.advance(&mut self.renderer, now_ms)
    }

    /// Activates a rendered marker, running the configured click handler.
    ///
    /// Returns `true` if `id` is an active marker and a handler ran.
    pub fn click(&mut self, id: MarkerId) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let Some((key, marker)) = self.markers.by_id(id) else {
            return false;
        };
        let context = MarkerContext {
            id,
            key,
            photo: &marker.photo,
            hidden_count: marker.hidden_count,
        };
        session.config.click(&context)
    }

    /// Returns the number of active markers.
    #[must_use]
    pub fn active_len(&self) -> usize {
        self.markers.active.len()
    }

    /// Returns the active markers sorted by identity key.
    #[must_use]
    pub fn active_markers(&self) -> Vec<ActiveMarkerView<'_>> {
        let mut out: Vec<_> = self
            .markers
            .active
            .iter()
            .map(|(key, m)| ActiveMarkerView {
                id: m.id,
                key,
                photo: &m.photo,
                hidden_count: m.hidden_count,
                cell: m.cell,
                phase: m.phase,
            })
            .collect();
        out.sort_unstable_by(|a, b| a.key.cmp(b.key));
        out
    }

    /// Returns the active marker showing the photo with identity `key`.
    #[must_use]
    pub fn active_marker(&self, key: &str) -> Option<ActiveMarkerView<'_>> {
        self.markers
            .active
            .get_key_value(key)
            .map(|(key, m)| ActiveMarkerView {
                id: m.id,
                key,
                photo: &m.photo,
                hidden_count: m.hidden_count,
                cell: m.cell,
                phase: m.phase,
            })
    }

    /// Returns the lifecycle phase of a marker this sampler created.
    ///
    /// Returns `None` for ids that never belonged to a created marker.
    #[must_use]
    pub fn marker_phase(&self, id: MarkerId) -> Option<MarkerPhase> {
        self.markers.phase(id)
    }

    /// Returns the number of markers still playing their exit transition.
    #[must_use]
    pub fn exiting_len(&self) -> usize {
        self.markers.exiting.len()
    }

    /// Returns the earliest pending transition deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.markers.timers.next_deadline()
    }

    /// Returns the current configuration; `None` before `init`.
    #[must_use]
    pub fn config(&self) -> Option<&SamplerConfig> {
        self.session.as_ref().map(|s| &s.config)
    }

    /// Returns the bound viewport; `None` before `init`.
    #[must_use]
    pub fn viewport(&self) -> Option<&V> {
        self.session.as_ref().map(|s| &s.viewport)
    }

    /// Mutable access to the bound viewport for panning and zooming.
    ///
    /// Changes take effect on the next [`update`](Self::update).
    pub fn viewport_mut(&mut self) -> Option<&mut V> {
        self.session.as_mut().map(|s| &mut s.viewport)
    }

    /// Returns the renderer.
    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mutable access to the renderer.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Returns the transition scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}

impl<V, R, S> fmt::Debug for DensitySampler<V, R, S>
where
    R: MarkerRenderer,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DensitySampler")
            .field("initialized", &self.session.is_some())
            .field("layer_attached", &self.layer_attached)
            .field("active", &self.markers.active.len())
            .field("exiting", &self.markers.exiting.len())
            .field("pending_timers", &self.markers.timers.len())
            .field("now_ms", &self.markers.now)
            .finish_non_exhaustive()
    }
}

fn viewport_is_usable(bounds: &GeoBounds, size: Size) -> bool {
    bounds.is_valid()
        && size.width.is_finite()
        && size.height.is_finite()
        && size.width > 0.0
        && size.height > 0.0
}

fn collect_winners<V: ViewportProvider>(
    session: &Session<V>,
    buckets: &mut GridBuckets,
    stats: &mut UpdateStats,
) -> HashMap<String, Winner> {
    buckets.clear();
    let viewport = &session.viewport;
    let bounds = viewport.viewport_bounds();
    if !viewport_is_usable(&bounds, viewport.viewport_size()) {
        log::debug!("viewport not ready; treating as empty");
        return HashMap::new();
    }

    let cell_size = session.config.cell_size();
    for (index, photo) in session.photos.iter().enumerate() {
        if session.config.is_favorite(photo) {
            continue;
        }
        let position = photo.position();
        if !position.is_finite() || !bounds.contains(position) {
            continue;
        }
        let screen = viewport.project_to_screen(position);
        let Some(cell) = CellKey::for_point(screen, cell_size) else {
            continue;
        };
        buckets.insert(cell, index);
        stats.visible += 1;
    }
    stats.buckets = buckets.len();

    let mut winners = HashMap::with_capacity(buckets.len());
    for (cell, members) in buckets.iter() {
        // Favorites never reach a bucket, so no member gets the favorite bonus.
        let candidates = members.iter().map(|&index| {
            let photo = &session.photos[index];
            let key = photo.identity_key();
            let score = priority_score(&key, false, photo.has_caption());
            Candidate { index, key, score }
        });
        if let Some(winner) = select_winner(candidates) {
            winners.insert(
                winner.key,
                Winner {
                    index: winner.index,
                    hidden_count: members.len() - 1,
                    cell,
                },
            );
        }
    }
    winners
}

/// Marker bookkeeping that outlives a single pass.
struct MarkerBook<H> {
    active: HashMap<String, ActiveMarker<H>>,
    /// Identity key of every active marker, by id.
    keys: HashMap<MarkerId, String>,
    exiting: HashMap<MarkerId, H>,
    timers: TimerQueue,
    now: u64,
    next_id: u64,
}

impl<H> MarkerBook<H> {
    fn new() -> Self {
        Self {
            active: HashMap::new(),
            keys: HashMap::new(),
            exiting: HashMap::new(),
            timers: TimerQueue::new(),
            now: 0,
            next_id: 0,
        }
    }

    /// Id the next created marker will get.
    fn peek_id(&self) -> MarkerId {
        MarkerId(self.next_id)
    }

    /// Consumes `id` once a marker was actually created with it.
    fn claim_id(&mut self, id: MarkerId) {
        self.next_id = self.next_id.max(id.0 + 1);
    }

    fn by_id(&self, id: MarkerId) -> Option<(&String, &ActiveMarker<H>)> {
        let key = self.keys.get(&id)?;
        self.active.get_key_value(key)
    }

    fn enter<R, S>(
        &mut self,
        renderer: &mut R,
        scheduler: &S,
        key: String,
        mut marker: ActiveMarker<H>,
    ) where
        R: MarkerRenderer<Handle = H>,
        S: TransitionScheduler,
    {
        renderer.set_phase(&marker.handle, MarkerPhase::Entering);
        match scheduler.delay(MarkerPhase::Entering) {
            Some(ms) => {
                self.timers
                    .push(self.now.saturating_add(ms), marker.id, MarkerPhase::Entering);
                marker.phase = MarkerPhase::Entering;
            }
            None => {
                renderer.set_phase(&marker.handle, MarkerPhase::Active);
                marker.phase = MarkerPhase::Active;
            }
        }
        log::trace!("marker {:?} entering for {key}", marker.id);
        self.keys.insert(marker.id, key.clone());
        self.active.insert(key, marker);
    }

    fn exit<R, S>(&mut self, renderer: &mut R, scheduler: &S, marker: ActiveMarker<H>)
    where
        R: MarkerRenderer<Handle = H>,
        S: TransitionScheduler,
    {
        self.keys.remove(&marker.id);
        renderer.set_phase(&marker.handle, MarkerPhase::Exiting);
        match scheduler.delay(MarkerPhase::Exiting) {
            Some(ms) => {
                self.timers
                    .push(self.now.saturating_add(ms), marker.id, MarkerPhase::Exiting);
                self.exiting.insert(marker.id, marker.handle);
            }
            None => renderer.remove_marker(&marker.handle),
        }
        log::trace!("marker {:?} exiting", marker.id);
    }

    fn advance<R>(&mut self, renderer: &mut R, now: u64) -> usize
    where
        R: MarkerRenderer<Handle = H>,
    {
        self.now = self.now.max(now);
        let mut completed = 0;
        for timer in self.timers.pop_due(self.now) {
            let Some(next) = timer.phase.completed() else {
                continue;
            };
            match timer.phase {
                MarkerPhase::Entering => {
                    let marker = self
                        .keys
                        .get(&timer.marker)
                        .and_then(|key| self.active.get_mut(key))
                        .filter(|m| m.phase == MarkerPhase::Entering);
                    if let Some(marker) = marker {
                        renderer.set_phase(&marker.handle, next);
                        marker.phase = next;
                        completed += 1;
                    }
                }
                MarkerPhase::Exiting => {
                    if let Some(handle) = self.exiting.remove(&timer.marker) {
                        renderer.remove_marker(&handle);
                        completed += 1;
                    }
                }
                MarkerPhase::Active | MarkerPhase::Removed => {}
            }
        }
        completed
    }

    fn phase(&self, id: MarkerId) -> Option<MarkerPhase> {
        if let Some((_, marker)) = self.by_id(id) {
            return Some(marker.phase);
        }
        if self.exiting.contains_key(&id) {
            return Some(MarkerPhase::Exiting);
        }
        (id.0 < self.next_id).then_some(MarkerPhase::Removed)
    }

    /// Removes every tracked marker. Ids keep counting up.
    fn clear<R>(&mut self, renderer: &mut R)
    where
        R: MarkerRenderer<Handle = H>,
    {
        for (_, marker) in self.active.drain() {
            renderer.remove_marker(&marker.handle);
        }
        for (_, handle) in self.exiting.drain() {
            renderer.remove_marker(&handle);
        }
        self.keys.clear();
        self.timers.clear();
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use kurbo::{Point, Size};
    use travelmap_view::{GeoBounds, LatLng};

    use super::{DensitySampler, UpdateStats};
    use crate::config::SamplerConfig;
    use crate::headless::HeadlessRenderer;
    use crate::photo::Photo;
    use crate::provider::ViewportProvider;
    use crate::transition::{FixedDelay, ImmediateTransitions, MarkerPhase};

    /// One pixel per 0.001 degree, origin at (lat 1, lng 0), 1000x1000 view.
    struct Flat;

    impl ViewportProvider for Flat {
        fn viewport_bounds(&self) -> GeoBounds {
            GeoBounds::new(LatLng::new(0.0, 0.0), LatLng::new(1.0, 1.0))
        }

        fn viewport_size(&self) -> Size {
            Size::new(1000.0, 1000.0)
        }

        fn project_to_screen(&self, p: LatLng) -> Point {
            Point::new(p.lng * 1000.0, (1.0 - p.lat) * 1000.0)
        }
    }

    /// Photo drawn at screen pixel `(x, y)` under [`Flat`].
    fn at(name: &str, x: f64, y: f64) -> Photo {
        Photo::new(name, 1.0 - y / 1000.0, x / 1000.0)
    }

    fn sampler() -> DensitySampler<Flat, HeadlessRenderer, ImmediateTransitions> {
        DensitySampler::new(HeadlessRenderer::new(), ImmediateTransitions)
    }

    #[test]
    fn uninitialized_calls_are_noops() {
        let mut s = sampler();
        assert_eq!(s.update(), UpdateStats::default());
        assert_eq!(s.set_cell_size(50.0), Ok(UpdateStats::default()));
        assert_eq!(s.update_icon_size(10.0), Ok(()));
        assert_eq!(s.bounds(), None);
        assert!(!s.click(crate::MarkerId(0)));
        s.stop();
        assert!(!s.is_initialized());
        assert!(!s.renderer().is_layer_attached());
    }

    #[test]
    fn one_marker_per_cell_with_hidden_counts() {
        let mut s = sampler();
        let photos = vec![
            at("a", 10.0, 10.0),
            at("b", 20.0, 20.0),
            at("c", 30.0, 30.0),
            at("d", 500.0, 500.0),
        ];
        let stats = s.init(Flat, photos, SamplerConfig::new()).unwrap();
        assert_eq!(stats.visible, 4);
        assert_eq!(stats.buckets, 2);
        assert_eq!(stats.added, 2);

        let mut hidden: Vec<usize> = s.active_markers().iter().map(|m| m.hidden_count).collect();
        hidden.sort_unstable();
        assert_eq!(hidden, [0, 2]);
        assert!(s.renderer().is_layer_attached());
        assert_eq!(s.renderer().len(), 2);
    }

    #[test]
    fn retained_markers_keep_identity_and_update_badge_only() {
        let mut s = sampler();
        let photos = vec![at("a", 10.0, 10.0).with_caption("first"), at("b", 20.0, 20.0)];
        s.init(Flat, photos, SamplerConfig::new()).unwrap();
        let key = at("a", 10.0, 10.0).identity_key();
        let before = s.active_marker(&key).unwrap();
        let id = before.id;
        assert_eq!(before.hidden_count, 1);

        s.set_photos(vec![
            at("a", 10.0, 10.0).with_caption("first"),
            at("b", 20.0, 20.0),
            at("c", 30.0, 30.0),
        ]);
        let stats = s.update();
        assert_eq!((stats.retained, stats.added, stats.removed), (1, 0, 0));
        assert_eq!(stats.badge_updates, 1);

        let after = s.active_marker(&key).unwrap();
        assert_eq!(after.id, id);
        assert_eq!(after.hidden_count, 2);
        assert_eq!(s.renderer().created(), 1);
        assert_eq!(s.renderer().marker(id).unwrap().hidden_count, 2);
    }

    #[test]
    fn timed_transitions_run_through_all_phases() {
        let mut s = DensitySampler::new(HeadlessRenderer::new(), FixedDelay::new(20, 300));
        s.init(Flat, vec![at("a", 10.0, 10.0)], SamplerConfig::new())
            .unwrap();
        let id = s.active_markers()[0].id;
        assert_eq!(s.marker_phase(id), Some(MarkerPhase::Entering));
        assert_eq!(s.next_deadline(), Some(20));

        assert_eq!(s.advance(20), 1);
        assert_eq!(s.marker_phase(id), Some(MarkerPhase::Active));
        assert_eq!(s.renderer().marker(id).unwrap().phase, MarkerPhase::Active);

        s.set_photos(Vec::new());
        let stats = s.update();
        assert_eq!(stats.removed, 1);
        assert_eq!(s.active_len(), 0);
        assert_eq!(s.exiting_len(), 1);
        assert_eq!(s.marker_phase(id), Some(MarkerPhase::Exiting));
        assert_eq!(s.renderer().len(), 1, "still on screen while fading out");

        assert_eq!(s.advance(319), 0);
        assert_eq!(s.advance(320), 1);
        assert_eq!(s.marker_phase(id), Some(MarkerPhase::Removed));
        assert!(s.renderer().is_empty());
    }

    #[test]
    fn update_icon_size_rebuilds_in_place() {
        let mut s = sampler();
        s.init(
            Flat,
            vec![at("a", 10.0, 10.0), at("b", 20.0, 20.0)],
            SamplerConfig::new().with_icon_size(40.0),
        )
        .unwrap();
        let id = s.active_markers()[0].id;

        s.update_icon_size(64.0).unwrap();
        let marker = s.renderer().marker(id).unwrap();
        assert_eq!(marker.icon_size, 64.0);
        assert_eq!(marker.hidden_count, 1);
        assert_eq!(s.renderer().created(), 1);
        assert_eq!(s.config().unwrap().icon_size(), 64.0);

        assert!(s.update_icon_size(0.0).is_err());
        assert_eq!(s.config().unwrap().icon_size(), 64.0);
    }

    #[test]
    fn bounds_cover_active_markers() {
        let mut s = sampler();
        s.init(
            Flat,
            vec![at("a", 10.0, 900.0), at("b", 800.0, 100.0)],
            SamplerConfig::new(),
        )
        .unwrap();
        let bounds = s.bounds().unwrap();
        assert!((bounds.west - 0.01).abs() < 1e-12);
        assert!((bounds.east - 0.8).abs() < 1e-12);
        assert!((bounds.south - 0.1).abs() < 1e-12);
        assert!((bounds.north - 0.9).abs() < 1e-12);
    }

    #[test]
    fn click_reaches_handler_with_context() {
        use alloc::rc::Rc;
        use alloc::string::String;
        use core::cell::RefCell;

        let seen: Rc<RefCell<Vec<(String, usize)>>> = Rc::default();
        let sink = Rc::clone(&seen);
        let config = SamplerConfig::new().with_click_handler(move |ctx| {
            sink.borrow_mut().push((ctx.key.into(), ctx.hidden_count));
        });

        let mut s = sampler();
        s.init(Flat, vec![at("a", 10.0, 10.0), at("b", 20.0, 20.0)], config)
            .unwrap();
        let marker = s.active_markers()[0];
        let (id, key) = (marker.id, String::from(marker.key));

        assert!(s.click(id));
        assert!(!s.click(crate::MarkerId(999)));
        assert_eq!(*seen.borrow(), [(key, 1)]);
    }

    #[test]
    fn reinit_resets_tracking() {
        let mut s = sampler();
        s.init(Flat, vec![at("a", 10.0, 10.0)], SamplerConfig::new())
            .unwrap();
        let old = s.active_markers()[0].id;

        s.init(Flat, vec![at("a", 10.0, 10.0)], SamplerConfig::new())
            .unwrap();
        let new = s.active_markers()[0].id;
        assert_ne!(old, new);
        assert_eq!(s.renderer().len(), 1);
        assert_eq!(s.renderer().removed(), 1);
    }

    #[test]
    fn invalid_config_leaves_state_alone() {
        let mut s = sampler();
        assert!(
            s.init(Flat, Vec::new(), SamplerConfig::new().with_cell_size(-1.0))
                .is_err()
        );
        assert!(!s.is_initialized());
        assert!(!s.renderer().is_layer_attached());
    }
}
