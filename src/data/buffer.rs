//! Per-channel sample history.

/// Which coordinate of a sample an operation looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    #[inline]
    fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
        }
    }
}

/// Append-only list of `[x, y]` samples for one channel.
///
/// For time-series channels `x` is the synthetic clock and is non-decreasing,
/// which is what [`suffix_since`](Self::suffix_since) relies on. XY trace
/// channels store positions in both coordinates and are never windowed.
#[derive(Debug, Default, Clone)]
pub struct SampleBuffer {
    points: Vec<[f64; 2]>,
}

impl SampleBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn append(&mut self, x: f64, y: f64) {
        self.points.push([x, y]);
    }

    /// Drop every sample. Both coordinates live in one vector, so they are
    /// always cleared together.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Samples with `x >= x_min`, found by binary search.
    pub fn suffix_since(&self, x_min: f64) -> &[[f64; 2]] {
        let start = self.points.partition_point(|p| p[0] < x_min);
        &self.points[start..]
    }

    pub fn points(&self) -> &[[f64; 2]] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<[f64; 2]> {
        self.points.last().copied()
    }

    pub fn values(&self, axis: Axis) -> impl Iterator<Item = f64> + '_ {
        let i = axis.index();
        self.points.iter().map(move |p| p[i])
    }

    /// `(min, max)` over the given coordinate, `None` when empty.
    pub fn range(&self, axis: Axis) -> Option<(f64, f64)> {
        self.values(axis).fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    /// Population standard deviation of the given coordinate.
    ///
    /// Zero for fewer than two samples.
    pub fn spread(&self, axis: Axis) -> f64 {
        let n = self.points.len();
        if n < 2 {
            return 0.0;
        }
        let mean = self.values(axis).sum::<f64>() / n as f64;
        let var = self.values(axis).map(|v| (v - mean) * (v - mean)).sum::<f64>() / n as f64;
        var.sqrt()
    }
}
