use serde::{Deserialize, Serialize};

use crate::data::buffer::{Axis, SampleBuffer};
use crate::data::channel::PlotId;

#[derive(Debug, Clone, PartialEq)]
pub struct AxisSettings {
    pub name: Option<String>,
    pub bounds: (f64, f64),
}

impl Default for AxisSettings {
    fn default() -> Self {
        Self {
            name: None,
            bounds: (0.0, 1.0),
        }
    }
}

impl AxisSettings {
    /// Expand to `[min - std, max + std]` of `buffer` if its data touches or
    /// leaves the current bounds. Returns `true` when the bounds changed.
    ///
    /// Statistics cover the whole buffer, not only the visible window. With
    /// fewer than two samples the margin is zero.
    pub fn autoscale(&mut self, buffer: &SampleBuffer, axis: Axis) -> bool {
        let Some((min, max)) = buffer.range(axis) else {
            return false;
        };
        let (lo, hi) = self.bounds;
        if min <= lo || max >= hi {
            let std = buffer.spread(axis);
            self.bounds = (min - std, max + std);
            true
        } else {
            false
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeType {
    TimeScope,
    XYScope,
}

/// How a plot's x-axis is driven each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum XWindowPolicy {
    /// `[clock - horizon, clock + horizon / 5]`, regardless of data.
    Sliding,
    /// Same breach / min±std rule as the y-axis, on the x data.
    DataExtent,
}

#[derive(Debug, Clone)]
pub struct ScopeData {
    pub id: PlotId,
    pub title: String,
    pub scope_type: ScopeType,
    pub x_policy: XWindowPolicy,
    pub x_axis: AxisSettings,
    pub y_axis: AxisSettings,
}

impl ScopeData {
    pub fn time_scope(
        id: PlotId,
        title: impl Into<String>,
        initial_window: f64,
        y_limit: f64,
    ) -> Self {
        let mut x_axis = AxisSettings::default();
        x_axis.name = Some("Time".to_string());
        x_axis.bounds = (-initial_window, initial_window / 5.0);
        Self {
            id,
            title: title.into(),
            scope_type: ScopeType::TimeScope,
            x_policy: XWindowPolicy::Sliding,
            x_axis,
            y_axis: AxisSettings {
                name: None,
                bounds: (-y_limit, y_limit),
            },
        }
    }

    pub fn xy_scope(id: PlotId, title: impl Into<String>, x_policy: XWindowPolicy) -> Self {
        Self {
            id,
            title: title.into(),
            scope_type: ScopeType::XYScope,
            x_policy,
            x_axis: AxisSettings::default(),
            y_axis: AxisSettings::default(),
        }
    }

    pub fn slide_x(&mut self, clock: f64, horizon: f64) {
        self.x_axis.bounds = (clock - horizon, clock + horizon / 5.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(values: &[f64]) -> SampleBuffer {
        let mut b = SampleBuffer::new();
        for (i, v) in values.iter().enumerate() {
            b.append(i as f64, *v);
        }
        b
    }

    #[test]
    fn expands_to_min_max_plus_std() {
        let mut axis = AxisSettings { name: None, bounds: (-6.0, 6.0) };
        let b = buffer(&[0.0, 1.0, 2.0, 10.0]);
        let sigma = b.spread(Axis::Y);
        assert!(axis.autoscale(&b, Axis::Y));
        assert_eq!(axis.bounds, (0.0 - sigma, 10.0 + sigma));
    }

    #[test]
    fn inside_bounds_is_left_alone() {
        let mut axis = AxisSettings { name: None, bounds: (-6.0, 6.0) };
        assert!(!axis.autoscale(&buffer(&[0.0, 1.0, 2.0]), Axis::Y));
        assert_eq!(axis.bounds, (-6.0, 6.0));
    }

    #[test]
    fn single_sample_collapses_bounds() {
        let mut axis = AxisSettings::default();
        assert!(axis.autoscale(&buffer(&[3.0]), Axis::Y));
        assert_eq!(axis.bounds, (3.0, 3.0));
    }

    #[test]
    fn empty_buffer_does_nothing() {
        let mut axis = AxisSettings::default();
        assert!(!axis.autoscale(&SampleBuffer::new(), Axis::Y));
        assert_eq!(axis.bounds, (0.0, 1.0));
    }

    #[test]
    fn sliding_window_tracks_clock() {
        let mut scope = ScopeData::time_scope(0, "vX", 5.0, 6.0);
        assert_eq!(scope.x_axis.bounds, (-5.0, 1.0));
        scope.slide_x(10.0, 6.0);
        assert_eq!(scope.x_axis.bounds, (4.0, 10.0 + 6.0 / 5.0));
    }
}
