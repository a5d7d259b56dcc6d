//! Host integration seam
//!
//! The animator never owns displayable objects. A [`PointHost`] is the
//! external collaborator that instantiates one object per lattice point from
//! a template, receives the computed scale for each point, and destroys the
//! objects again when the lattice is torn down.
//!
//! # Implementations
//!
//! - [`NullHost`] - no external objects (headless runs, benchmarks)
//! - [`RecordingHost`] - keeps spawned points and applied scales in memory

use indexmap::IndexMap;

/// Description of a lattice point handed to the host at spawn time.
#[derive(Debug, Clone, PartialEq)]
pub struct PointInfo {
    /// Linear index in the lattice
    pub index: usize,
    /// `(xi, yi, zi)` cell coordinate
    pub cell: [usize; 3],
    /// Local position relative to the lattice owner (lattice is centered)
    pub position: [f64; 3],
    /// Display name, `Point_x{xi}_y{yi}_z{zi}`
    pub name: String,
}

/// External owner of per-point objects.
pub trait PointHost {
    /// What a point is instantiated from
    type Template;
    /// Host-side reference to a spawned point
    type Handle;

    /// Instantiate one point from the template.
    fn spawn(&mut self, template: &Self::Template, point: &PointInfo) -> Self::Handle;

    /// Release a point's external resources.
    fn despawn(&mut self, handle: Self::Handle);

    /// Apply a uniform scale `(s, s, s)` to a point.
    fn apply_scale(&mut self, handle: &Self::Handle, scale: f64);
}

/// Host with no external objects; any template is accepted.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHost;

impl PointHost for NullHost {
    type Template = ();
    type Handle = ();

    fn spawn(&mut self, _template: &(), _point: &PointInfo) {}

    fn despawn(&mut self, _handle: ()) {}

    fn apply_scale(&mut self, _handle: &(), _scale: f64) {}
}

/// A point as seen by [`RecordingHost`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPoint {
    pub template: String,
    pub info: PointInfo,
    pub scale: [f64; 3],
}

/// In-memory host keyed by spawn order.
///
/// Handles are never reused, so a stale handle from a torn-down lattice
/// cannot alias a point of the current one.
#[derive(Debug, Default, Clone)]
pub struct RecordingHost {
    live: IndexMap<u64, RecordedPoint>,
    next_handle: u64,
    spawned: u64,
    despawned: u64,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Points currently alive, in spawn order.
    pub fn points(&self) -> impl Iterator<Item = &RecordedPoint> {
        self.live.values()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn spawned_total(&self) -> u64 {
        self.spawned
    }

    pub fn despawned_total(&self) -> u64 {
        self.despawned
    }

    /// Uniform scale of each live point, in spawn order.
    pub fn scales(&self) -> Vec<f64> {
        self.live.values().map(|p| p.scale[0]).collect()
    }
}

impl PointHost for RecordingHost {
    type Template = String;
    type Handle = u64;

    fn spawn(&mut self, template: &String, point: &PointInfo) -> u64 {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.spawned += 1;
        self.live.insert(
            handle,
            RecordedPoint {
                template: template.clone(),
                info: point.clone(),
                scale: [1.0; 3],
            },
        );
        handle
    }

    fn despawn(&mut self, handle: u64) {
        if self.live.shift_remove(&handle).is_some() {
            self.despawned += 1;
        }
    }

    fn apply_scale(&mut self, handle: &u64, scale: f64) {
        if let Some(point) = self.live.get_mut(handle) {
            point.scale = [scale; 3];
        }
    }
}
