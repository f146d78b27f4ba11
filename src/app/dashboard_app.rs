//! eframe front-end for a [`DashboardSession`].
//!
//! [`EguiSurface`] receives the session's draw commands and keeps the latest
//! state per line/plot/label; [`DashboardApp`] drives the tick from the egui
//! frame loop and paints that state.

use std::collections::HashMap;
use std::time::Instant;

use eframe::egui;
use egui::Color32;
use egui_plot::{Legend, Line, Plot};

use crate::data::channel::{ChannelRole, LabelId, LineId, PlotId};
use crate::monitor::ConnectionState;
use crate::session::DashboardSession;
use crate::source::TelemetrySource;
use crate::surface::DisplaySurface;

const PRIMARY_COLOR: Color32 = Color32::from_rgb(0x10, 0xb9, 0x81);
const ALTERNATE_COLOR: Color32 = Color32::from_rgb(0xef, 0x44, 0x44);

// ─────────────────────────────────────────────────────────────────────────────
// EguiSurface
// ─────────────────────────────────────────────────────────────────────────────

/// Retained draw state, painted once per frame.
#[derive(Default)]
pub struct EguiSurface {
    lines: HashMap<LineId, Vec<[f64; 2]>>,
    x_bounds: HashMap<PlotId, (f64, f64)>,
    y_bounds: HashMap<PlotId, (f64, f64)>,
    texts: HashMap<LabelId, String>,
    button_label: String,
}

impl DisplaySurface for EguiSurface {
    fn set_samples(&mut self, line: LineId, points: &[[f64; 2]]) {
        let buf = self.lines.entry(line).or_default();
        buf.clear();
        buf.extend_from_slice(points);
    }

    fn set_x_bounds(&mut self, plot: PlotId, lo: f64, hi: f64) {
        self.x_bounds.insert(plot, (lo, hi));
    }

    fn set_y_bounds(&mut self, plot: PlotId, lo: f64, hi: f64) {
        self.y_bounds.insert(plot, (lo, hi));
    }

    fn set_text(&mut self, label: LabelId, text: &str) {
        self.texts.insert(label, text.to_string());
    }

    fn set_button_label(&mut self, text: &str) {
        self.button_label = text.to_string();
    }
}

/// egui_plot cannot show an empty range; give collapsed bounds some room.
fn drawable(bounds: (f64, f64)) -> (f64, f64) {
    let (lo, hi) = bounds;
    if hi > lo {
        (lo, hi)
    } else {
        (lo - 0.5, lo + 0.5)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// DashboardApp
// ─────────────────────────────────────────────────────────────────────────────

/// Native window showing one session as a 2x3 grid of plots.
pub struct DashboardApp<S: TelemetrySource> {
    pub session: DashboardSession<S>,
    surface: EguiSurface,
    next_tick: Instant,
}

impl<S: TelemetrySource> DashboardApp<S> {
    pub fn new(mut session: DashboardSession<S>) -> Self {
        let mut surface = EguiSurface::default();
        session.initialize(&mut surface);
        Self {
            session,
            surface,
            next_tick: Instant::now(),
        }
    }

    fn render_status(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let icon = if self.session.is_paused() {
                egui_phosphor::regular::PLAY
            } else {
                egui_phosphor::regular::PAUSE
            };
            if ui
                .button(format!("{icon} {}", self.surface.button_label))
                .clicked()
            {
                self.session.toggle_pause(&mut self.surface);
            }
            ui.separator();
            match self.session.connection() {
                ConnectionState::Connected => {
                    ui.colored_label(PRIMARY_COLOR, "Connected");
                    ui.label(format!("t = {:.1} s", self.session.clock()));
                }
                ConnectionState::Disconnected => {
                    ui.colored_label(ALTERNATE_COLOR, "Waiting for telemetry server…");
                }
            }
        });
    }

    fn render_plot(&self, ui: &mut egui::Ui, plot: PlotId, title: &str, height: f32) {
        ui.strong(title);
        let label = self
            .session
            .pairs()
            .iter()
            .find(|p| self.session.channels().get(p.target).map(|c| c.plot) == Some(plot))
            .and_then(|p| self.surface.texts.get(&p.label));
        if let Some(text) = label {
            ui.monospace(text);
        }

        let x = self.surface.x_bounds.get(&plot).copied().map(drawable);
        let y = self.surface.y_bounds.get(&plot).copied().map(drawable);
        Plot::new(("velgraph_plot", plot))
            .height(height)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                if let Some((lo, hi)) = x {
                    plot_ui.set_plot_bounds_x(lo..=hi);
                }
                if let Some((lo, hi)) = y {
                    plot_ui.set_plot_bounds_y(lo..=hi);
                }
                for ch in self.session.channels().iter().filter(|c| c.plot == plot) {
                    let Some(points) = self.surface.lines.get(&ch.line) else {
                        continue;
                    };
                    let color = match ch.role {
                        ChannelRole::Primary => PRIMARY_COLOR,
                        ChannelRole::Alternate => ALTERNATE_COLOR,
                    };
                    plot_ui.line(Line::new(ch.name.clone(), points.clone()).color(color));
                }
            });
    }
}

impl<S: TelemetrySource> eframe::App for DashboardApp<S> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        if now >= self.next_tick {
            let outcome = self.session.tick(&mut self.surface);
            self.next_tick = now + outcome.delay;
        }

        egui::TopBottomPanel::top("velgraph_status").show(ctx, |ui| {
            self.render_status(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let plots: Vec<(PlotId, String)> = self
                .session
                .plots()
                .iter()
                .map(|p| (p.id, p.title.clone()))
                .collect();
            let height = (ui.available_height() / 2.0 - 80.0).max(120.0);
            for row in plots.chunks(3) {
                ui.columns(3, |cols| {
                    for ((plot, title), col) in row.iter().zip(cols.iter_mut()) {
                        self.render_plot(col, *plot, title, height);
                    }
                });
            }
        });

        ctx.request_repaint_after(self.next_tick.saturating_duration_since(Instant::now()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_keeps_latest_state() {
        let mut s = EguiSurface::default();
        s.set_samples(1, &[[0.0, 1.0], [0.1, 2.0]]);
        s.set_samples(1, &[[0.2, 3.0]]);
        s.set_y_bounds(0, -1.0, 1.0);
        s.set_text(0, "τ=1");
        assert_eq!(s.lines[&1], vec![[0.2, 3.0]]);
        assert_eq!(s.y_bounds[&0], (-1.0, 1.0));
        assert_eq!(s.texts[&0], "τ=1");
    }

    #[test]
    fn collapsed_bounds_are_widened() {
        assert_eq!(drawable((2.0, 2.0)), (1.5, 2.5));
        assert_eq!(drawable((-1.0, 1.0)), (-1.0, 1.0));
    }
}
