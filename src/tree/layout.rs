//! Computed layout output (§3.5) and the measurement cache (§4.4).

use arrayvec::ArrayVec;

use crate::compute::MeasureMode;
use crate::geometry::{Edge, Point, Rect, Size};
use crate::number::Number;
use crate::style::Direction;

/// The maximum number of measurement-only cache entries kept per node (§3.5).
pub const MAX_CACHED_MEASUREMENTS: usize = 16;

/// A resolved value per physical/logical edge, for the six edges a reader can ask about
/// (`Left`, `Top`, `Right`, `Bottom`, `Start`, `End` — `Horizontal`/`Vertical`/`All` are
/// style-only shorthands, never a computed-layout output).
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct ComputedEdges([f32; 6]);

impl ComputedEdges {
    pub fn get(&self, edge: Edge) -> f32 {
        debug_assert!(edge.index() < 6, "computed edges only resolve Left/Top/Right/Bottom/Start/End");
        self.0[edge.index()]
    }

    pub fn set(&mut self, edge: Edge, value: f32) {
        self.0[edge.index()] = value;
    }

    pub fn as_rect(&self) -> Rect<f32> {
        Rect { left: self.get(Edge::Left), top: self.get(Edge::Top), right: self.get(Edge::Right), bottom: self.get(Edge::Bottom) }
    }
}

/// Per-node computed layout (§3.5).
#[derive(Clone, Debug)]
pub struct Layout {
    /// Position of each edge relative to the parent's content box.
    pub position: Rect<f32>,
    pub dimensions: Size<f32>,
    pub margin: ComputedEdges,
    pub border: ComputedEdges,
    pub padding: ComputedEdges,
    pub direction: Direction,
    pub computed_flex_basis: Number,
    pub computed_flex_basis_generation: u64,
    pub had_overflow: bool,
    pub generation_count: u64,
    pub last_parent_direction: Option<Direction>,
    pub line_index: usize,
    /// Set by the legacy-stretch diff pass (§4.5 "Legacy diff mode") when the result differs
    /// from a non-legacy-stretch re-layout of the same tree.
    pub does_legacy_stretch_flag_affect: bool,
    pub cache: MeasureCache,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            position: Rect::ZERO,
            dimensions: Size::ZERO,
            margin: ComputedEdges::default(),
            border: ComputedEdges::default(),
            padding: ComputedEdges::default(),
            direction: Direction::LTR,
            computed_flex_basis: Number::UNDEFINED,
            computed_flex_basis_generation: 0,
            had_overflow: false,
            generation_count: 0,
            last_parent_direction: None,
            line_index: 0,
            does_legacy_stretch_flag_affect: false,
            cache: MeasureCache::default(),
        }
    }
}

impl Layout {
    pub fn location(&self) -> Point<f32> {
        Point { x: self.position.left, y: self.position.top }
    }
}

/// A single `(constraint -> result)` cache entry (§4.4).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CachedMeasurement {
    pub available_width: Number,
    pub width_mode: MeasureMode,
    pub available_height: Number,
    pub height_mode: MeasureMode,
    pub computed_width: f32,
    pub computed_height: f32,
}

/// Per-node measurement cache: one full-layout slot plus a 16-entry measurement-only ring
/// (§3.5, §4.4).
#[derive(Clone, Debug, Default)]
pub struct MeasureCache {
    pub cached_layout: Option<CachedMeasurement>,
    cached_measurements: ArrayVec<CachedMeasurement, MAX_CACHED_MEASUREMENTS>,
    next_index: usize,
    /// Diagnostic counters (SPEC_FULL §C.2); not load-bearing for correctness.
    pub hit_count: u32,
    pub miss_count: u32,
}

impl MeasureCache {
    pub fn clear(&mut self) {
        self.cached_layout = None;
        self.cached_measurements.clear();
        self.next_index = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.cached_layout.is_none() && self.cached_measurements.is_empty()
    }

    /// Store a full-layout result.
    pub fn store_layout(&mut self, entry: CachedMeasurement) {
        self.cached_layout = Some(entry);
    }

    /// Store a measurement-only result, wrapping the ring index at `MAX_CACHED_MEASUREMENTS`.
    pub fn store_measurement(&mut self, entry: CachedMeasurement) {
        if self.cached_measurements.len() < MAX_CACHED_MEASUREMENTS {
            self.cached_measurements.push(entry);
        } else {
            self.cached_measurements[self.next_index] = entry;
        }
        self.next_index = (self.next_index + 1) % MAX_CACHED_MEASUREMENTS;
    }

    /// Look for a usable cached entry per the four rules of §4.4. Checks `cached_layout` first,
    /// then the measurement ring, matching the source's preference for the full-layout slot.
    pub fn find(
        &mut self,
        available_width: Number,
        width_mode: MeasureMode,
        available_height: Number,
        height_mode: MeasureMode,
        point_scale_factor: f32,
    ) -> Option<CachedMeasurement> {
        let mut found = None;
        if let Some(entry) = self.cached_layout {
            if Self::usable(entry, available_width, width_mode, available_height, height_mode, point_scale_factor) {
                found = Some(entry);
            }
        }
        if found.is_none() {
            found = self.cached_measurements.iter().copied().find(|entry| {
                Self::usable(*entry, available_width, width_mode, available_height, height_mode, point_scale_factor)
            });
        }
        if found.is_some() {
            self.hit_count += 1;
        } else {
            self.miss_count += 1;
        }
        found
    }

    fn usable(
        entry: CachedMeasurement,
        new_width: Number,
        new_width_mode: MeasureMode,
        new_height: Number,
        new_height_mode: MeasureMode,
        point_scale_factor: f32,
    ) -> bool {
        axis_usable(entry.width_mode, entry.available_width, entry.computed_width, new_width_mode, new_width, point_scale_factor)
            && axis_usable(
                entry.height_mode,
                entry.available_height,
                entry.computed_height,
                new_height_mode,
                new_height,
                point_scale_factor,
            )
    }
}

/// The four per-axis usability rules of §4.4.
fn axis_usable(
    old_mode: MeasureMode,
    old_available: Number,
    old_computed: f32,
    new_mode: MeasureMode,
    new_available: Number,
    point_scale_factor: f32,
) -> bool {
    let rounded_equal = |a: Number, b: Number| -> bool {
        if a.is_undefined() && b.is_undefined() {
            return true;
        }
        if a.is_undefined() != b.is_undefined() {
            return false;
        }
        if point_scale_factor > 0.0 {
            (a.0 * point_scale_factor).round() == (b.0 * point_scale_factor).round()
        } else {
            a == b
        }
    };

    // Rule 1: same mode, same (rounded) available size.
    if old_mode == new_mode && rounded_equal(old_available, new_available) {
        return true;
    }

    // Rule 2: newly exact, and the requested size equals what we already computed.
    if new_mode == MeasureMode::Exactly && new_available.is_defined() {
        if (new_available.0 - old_computed).abs() < 1e-4 {
            return true;
        }
    }

    // Rule 3: newly AtMost, previously Undefined, and the old result still fits.
    if new_mode == MeasureMode::AtMost && old_mode == MeasureMode::Undefined {
        if new_available.is_undefined() || old_computed <= new_available.0 + 1e-4 {
            return true;
        }
    }

    // Rule 4: both AtMost, new bound tighter, and the old result still fits the new bound.
    if new_mode == MeasureMode::AtMost && old_mode == MeasureMode::AtMost {
        if old_available.is_defined()
            && new_available.is_defined()
            && new_available.0 <= old_available.0
            && old_computed <= new_available.0 + 1e-4
        {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(w: f32, wm: MeasureMode, h: f32, hm: MeasureMode, cw: f32, ch: f32) -> CachedMeasurement {
        CachedMeasurement {
            available_width: Number::defined(w),
            width_mode: wm,
            available_height: Number::defined(h),
            height_mode: hm,
            computed_width: cw,
            computed_height: ch,
        }
    }

    #[test]
    fn ring_wraps_after_sixteen_entries() {
        let mut cache = MeasureCache::default();
        for i in 0..20 {
            cache.store_measurement(entry(i as f32, MeasureMode::AtMost, 10.0, MeasureMode::AtMost, i as f32, 10.0));
        }
        assert_eq!(cache.cached_measurements.len(), MAX_CACHED_MEASUREMENTS);
        // The ring should now hold entries 4..20 (the last 16 pushed).
        assert_eq!(cache.cached_measurements[cache.next_index].available_width, Number::defined(4.0));
    }

    #[test]
    fn exact_match_reuses_at_most_result_that_still_fits() {
        let mut cache = MeasureCache::default();
        cache.store_measurement(entry(100.0, MeasureMode::AtMost, 50.0, MeasureMode::Exactly, 80.0, 50.0));
        let hit = cache.find(Number::defined(90.0), MeasureMode::AtMost, Number::defined(50.0), MeasureMode::Exactly, 1.0);
        assert!(hit.is_some());
    }

    #[test]
    fn tighter_at_most_that_no_longer_fits_is_a_miss() {
        let mut cache = MeasureCache::default();
        cache.store_measurement(entry(100.0, MeasureMode::AtMost, 50.0, MeasureMode::AtMost, 90.0, 50.0));
        let hit = cache.find(Number::defined(80.0), MeasureMode::AtMost, Number::defined(50.0), MeasureMode::AtMost, 1.0);
        assert!(hit.is_none());
    }
}
