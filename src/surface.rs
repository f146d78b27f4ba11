//! Drawing interface consumed by the sampling loop.
//!
//! The loop never talks to egui directly: it issues the handful of commands
//! below and a backend decides how to show them. [`RecordingSurface`] keeps
//! the commands instead of drawing, for tests. [`LoggingSurface`] only logs
//! label changes and is what headless runs use.

use std::collections::HashMap;

use crate::data::channel::{LabelId, LineId, PlotId};

/// What the loop needs from a rendering backend.
pub trait DisplaySurface {
    /// Replace the data drawn by `line`.
    fn set_samples(&mut self, line: LineId, points: &[[f64; 2]]);
    fn set_x_bounds(&mut self, plot: PlotId, lo: f64, hi: f64);
    fn set_y_bounds(&mut self, plot: PlotId, lo: f64, hi: f64);
    fn set_text(&mut self, label: LabelId, text: &str);
    /// Caption of the pause toggle.
    fn set_button_label(&mut self, text: &str);
}

/// One command received by a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Samples { line: LineId, len: usize },
    XBounds { plot: PlotId, lo: f64, hi: f64 },
    YBounds { plot: PlotId, lo: f64, hi: f64 },
    Text { label: LabelId, text: String },
    ButtonLabel(String),
}

/// Surface that records every call and the latest state per handle.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<SurfaceCall>,
    pub lines: HashMap<LineId, Vec<[f64; 2]>>,
    pub x_bounds: HashMap<PlotId, (f64, f64)>,
    pub y_bounds: HashMap<PlotId, (f64, f64)>,
    pub texts: HashMap<LabelId, String>,
    pub button_label: String,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget recorded calls, keeping the latest state.
    pub fn take_calls(&mut self) -> Vec<SurfaceCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn line(&self, line: LineId) -> &[[f64; 2]] {
        self.lines.get(&line).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn text(&self, label: LabelId) -> Option<&str> {
        self.texts.get(&label).map(String::as_str)
    }
}

impl DisplaySurface for RecordingSurface {
    fn set_samples(&mut self, line: LineId, points: &[[f64; 2]]) {
        self.calls.push(SurfaceCall::Samples { line, len: points.len() });
        self.lines.insert(line, points.to_vec());
    }

    fn set_x_bounds(&mut self, plot: PlotId, lo: f64, hi: f64) {
        self.calls.push(SurfaceCall::XBounds { plot, lo, hi });
        self.x_bounds.insert(plot, (lo, hi));
    }

    fn set_y_bounds(&mut self, plot: PlotId, lo: f64, hi: f64) {
        self.calls.push(SurfaceCall::YBounds { plot, lo, hi });
        self.y_bounds.insert(plot, (lo, hi));
    }

    fn set_text(&mut self, label: LabelId, text: &str) {
        self.calls.push(SurfaceCall::Text { label, text: text.to_string() });
        self.texts.insert(label, text.to_string());
    }

    fn set_button_label(&mut self, text: &str) {
        self.calls.push(SurfaceCall::ButtonLabel(text.to_string()));
        self.button_label = text.to_string();
    }
}

/// Headless surface: drops samples and bounds, logs labels when they change.
///
/// Holds one string per label, so memory stays flat however long it runs.
#[derive(Debug, Default)]
pub struct LoggingSurface {
    texts: HashMap<LabelId, String>,
}

impl LoggingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self, label: LabelId) -> Option<&str> {
        self.texts.get(&label).map(String::as_str)
    }
}

impl DisplaySurface for LoggingSurface {
    fn set_samples(&mut self, _line: LineId, _points: &[[f64; 2]]) {}

    fn set_x_bounds(&mut self, _plot: PlotId, _lo: f64, _hi: f64) {}

    fn set_y_bounds(&mut self, _plot: PlotId, _lo: f64, _hi: f64) {}

    fn set_text(&mut self, label: LabelId, text: &str) {
        if self.text(label) == Some(text) {
            return;
        }
        tracing::debug!(label, text = %text.replace('\n', " "), "label");
        self.texts.insert(label, text.to_string());
    }

    fn set_button_label(&mut self, text: &str) {
        tracing::info!(button = text, "pause state");
    }
}
