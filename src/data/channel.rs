//! Channel identity and the per-channel sample history it owns.

use crate::data::buffer::SampleBuffer;

/// Index of a rendered line on the display surface.
pub type LineId = usize;
/// Index of a plot (axes pair) on the display surface.
pub type PlotId = usize;
/// Index of a text label on the display surface.
pub type LabelId = usize;

/// Which side of a target/actual pair a channel renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelRole {
    /// Commanded / planned value.
    Primary,
    /// Measured value.
    Alternate,
}

/// Where a channel's samples come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelBinding {
    /// One scalar key, sampled against the synthetic clock.
    Scalar(String),
    /// Two keys sampled together as an `(x, y)` position.
    Pair { x: String, y: String },
}

impl ChannelBinding {
    /// Keys in fetch order.
    pub fn keys(&self) -> Vec<&str> {
        match self {
            ChannelBinding::Scalar(key) => vec![key.as_str()],
            ChannelBinding::Pair { x, y } => vec![x.as_str(), y.as_str()],
        }
    }

    pub fn width(&self) -> usize {
        match self {
            ChannelBinding::Scalar(_) => 1,
            ChannelBinding::Pair { .. } => 2,
        }
    }

    pub fn is_trace(&self) -> bool {
        matches!(self, ChannelBinding::Pair { .. })
    }
}

/// One telemetry quantity tracked over time.
#[derive(Debug, Clone)]
pub struct Channel {
    pub name: String,
    pub role: ChannelRole,
    pub plot: PlotId,
    pub line: LineId,
    pub binding: ChannelBinding,
    pub buffer: SampleBuffer,
}

impl Channel {
    pub fn new(
        name: impl Into<String>,
        role: ChannelRole,
        plot: PlotId,
        line: LineId,
        binding: ChannelBinding,
    ) -> Self {
        Self {
            name: name.into(),
            role,
            plot,
            line,
            binding,
            buffer: SampleBuffer::new(),
        }
    }

    /// Append one tick's worth of fetched values.
    ///
    /// `values` must hold exactly [`ChannelBinding::width`] entries: the scalar
    /// for a time-series channel, or `[x, y]` for a trace.
    pub fn record(&mut self, clock: f64, values: &[f64]) {
        match (&self.binding, values) {
            (ChannelBinding::Scalar(_), [v]) => self.buffer.append(clock, *v),
            (ChannelBinding::Pair { .. }, [x, y]) => self.buffer.append(*x, *y),
            _ => tracing::error!(
                channel = %self.name,
                got = values.len(),
                "batch slice does not match channel binding"
            ),
        }
    }
}

/// A target channel and the actual channel measuring the same quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelPair {
    pub target: usize,
    pub actual: usize,
    pub label: LabelId,
}
