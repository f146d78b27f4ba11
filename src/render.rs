//! Pushes buffered samples and derived axis bounds to the display surface.

use crate::data::buffer::Axis;
use crate::data::channel::Channel;
use crate::data::scope::{ScopeData, XWindowPolicy};
use crate::surface::DisplaySurface;

/// Draws every channel and keeps plot bounds in step with the data.
///
/// Plots are addressed by position: `plots[channel.plot]`.
#[derive(Debug, Clone, Copy)]
pub struct RollingWindowRenderer {
    pub horizon: f64,
}

impl RollingWindowRenderer {
    pub fn new(horizon: f64) -> Self {
        Self { horizon }
    }

    pub fn render(
        &self,
        clock: f64,
        channels: &[Channel],
        plots: &mut [ScopeData],
        surface: &mut dyn DisplaySurface,
    ) {
        for ch in channels {
            surface.set_samples(ch.line, ch.buffer.points());
            let Some(plot) = plots.get_mut(ch.plot) else {
                tracing::error!(
                    channel = %ch.name,
                    plot = ch.plot,
                    "channel refers to unknown plot"
                );
                continue;
            };
            if plot.y_axis.autoscale(&ch.buffer, Axis::Y) {
                let (lo, hi) = plot.y_axis.bounds;
                surface.set_y_bounds(plot.id, lo, hi);
            }
            if plot.x_policy == XWindowPolicy::DataExtent
                && plot.x_axis.autoscale(&ch.buffer, Axis::X)
            {
                let (lo, hi) = plot.x_axis.bounds;
                surface.set_x_bounds(plot.id, lo, hi);
            }
        }
        for plot in plots.iter_mut() {
            if plot.x_policy == XWindowPolicy::Sliding {
                plot.slide_x(clock, self.horizon);
                let (lo, hi) = plot.x_axis.bounds;
                surface.set_x_bounds(plot.id, lo, hi);
            }
        }
    }

    /// Push every plot's current bounds, e.g. on startup.
    pub fn push_bounds(&self, plots: &[ScopeData], surface: &mut dyn DisplaySurface) {
        for plot in plots {
            let (xlo, xhi) = plot.x_axis.bounds;
            let (ylo, yhi) = plot.y_axis.bounds;
            surface.set_x_bounds(plot.id, xlo, xhi);
            surface.set_y_bounds(plot.id, ylo, yhi);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::channel::{ChannelBinding, ChannelRole};
    use crate::surface::{RecordingSurface, SurfaceCall};

    fn scalar(plot: usize, line: usize, values: &[f64], dt: f64) -> Channel {
        let binding = ChannelBinding::Scalar("v".into());
        let mut ch = Channel::new("v", ChannelRole::Primary, plot, line, binding);
        let mut t = 0.0;
        for v in values {
            ch.record(t, &[*v]);
            t += dt;
        }
        ch
    }

    #[test]
    fn time_plot_slides_and_autoscales() {
        let ch = scalar(0, 0, &[0.0, 1.0, 2.0, 10.0], 0.5);
        let sigma = ch.buffer.spread(Axis::Y);
        let mut plots = vec![ScopeData::time_scope(0, "vX", 5.0, 6.0)];
        let mut surface = RecordingSurface::new();
        RollingWindowRenderer::new(6.0).render(1.5, &[ch], &mut plots, &mut surface);

        assert_eq!(surface.line(0).len(), 4);
        assert_eq!(surface.y_bounds[&0], (-sigma, 10.0 + sigma));
        assert_eq!(surface.x_bounds[&0], (1.5 - 6.0, 1.5 + 6.0 / 5.0));
    }

    #[test]
    fn y_bounds_not_pushed_when_data_fits() {
        let ch = scalar(0, 0, &[0.0, 1.0], 0.5);
        let mut plots = vec![ScopeData::time_scope(0, "vX", 5.0, 6.0)];
        let mut surface = RecordingSurface::new();
        RollingWindowRenderer::new(6.0).render(0.5, &[ch], &mut plots, &mut surface);
        assert!(!surface
            .calls
            .iter()
            .any(|c| matches!(c, SurfaceCall::YBounds { .. })));
    }

    #[test]
    fn trace_plot_follows_data_extent_on_x() {
        let mut ch = Channel::new(
            "pos",
            ChannelRole::Primary,
            0,
            3,
            ChannelBinding::Pair { x: "px".into(), y: "py".into() },
        );
        ch.record(0.0, &[2.0, 0.5]);
        ch.record(0.1, &[4.0, 0.5]);
        let mut plots = vec![ScopeData::xy_scope(0, "Pos", XWindowPolicy::DataExtent)];
        let mut surface = RecordingSurface::new();
        RollingWindowRenderer::new(6.0).render(0.1, &[ch], &mut plots, &mut surface);
        // x: min 2, max 4, std 1
        assert_eq!(surface.x_bounds[&0], (1.0, 5.0));
        // constant y = 0.5 sits strictly inside the default (0, 1)
        assert!(!surface.y_bounds.contains_key(&0));
    }

    #[test]
    fn trace_plot_can_slide_instead() {
        let ch = scalar(0, 0, &[1.0], 0.1);
        let mut plots = vec![ScopeData::xy_scope(0, "Pos", XWindowPolicy::Sliding)];
        let mut surface = RecordingSurface::new();
        RollingWindowRenderer::new(6.0).render(2.0, &[ch], &mut plots, &mut surface);
        assert_eq!(surface.x_bounds[&0], (-4.0, 2.0 + 1.2));
    }
}
