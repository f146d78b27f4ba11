//! One display session: channels, plots, clock, pause flag and the tick that
//! ties them together.

use std::time::Duration;

use tracing::{debug, info};

use crate::accumulator::{format_label, IntegralAccumulator};
use crate::config::DashboardConfig;
use crate::data::channel::{Channel, ChannelBinding, ChannelPair, ChannelRole};
use crate::data::scope::ScopeData;
use crate::error::ConfigError;
use crate::monitor::{ConnectionMonitor, ConnectionState, Transition};
use crate::pause::PauseController;
use crate::render::RollingWindowRenderer;
use crate::source::TelemetrySource;
use crate::surface::DisplaySurface;

/// Result of one [`DashboardSession::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    pub transition: Transition,
    /// Whether a batch was fetched and buffered this tick.
    pub sampled: bool,
    /// How long to wait before the next tick.
    pub delay: Duration,
}

/// Owns everything the sampling loop mutates.
///
/// Channels are laid out as: every time plot's target, then every time
/// plot's actual, then the trace target and trace actual. Line ids equal
/// channel indices; label ids equal time plot indices.
pub struct DashboardSession<S: TelemetrySource> {
    config: DashboardConfig,
    source: S,
    monitor: ConnectionMonitor,
    pause: PauseController,
    renderer: RollingWindowRenderer,
    accumulator: IntegralAccumulator,
    channels: Vec<Channel>,
    pairs: Vec<ChannelPair>,
    plots: Vec<ScopeData>,
    keys: Vec<String>,
    /// Ticks sampled since the last reset. The clock is derived from it so
    /// sample times never drift from `ticks * dt`.
    ticks: u64,
    clock: f64,
}

impl<S: TelemetrySource> DashboardSession<S> {
    pub fn new(config: DashboardConfig, source: S) -> Result<Self, ConfigError> {
        config.validate()?;

        let n = config.time_plots.len();
        let mut plots = Vec::new();
        let mut channels = Vec::new();
        for (i, tp) in config.time_plots.iter().enumerate() {
            plots.push(ScopeData::time_scope(
                i,
                tp.title.clone(),
                config.initial_window_secs,
                config.initial_y_limit,
            ));
            channels.push(Channel::new(
                format!("{} target", tp.title),
                ChannelRole::Primary,
                i,
                i,
                ChannelBinding::Scalar(tp.target_key.clone()),
            ));
        }
        for (i, tp) in config.time_plots.iter().enumerate() {
            channels.push(Channel::new(
                format!("{} actual", tp.title),
                ChannelRole::Alternate,
                i,
                n + i,
                ChannelBinding::Scalar(tp.actual_key.clone()),
            ));
        }
        let pairs = (0..n)
            .map(|i| ChannelPair { target: i, actual: n + i, label: i })
            .collect();

        if let Some(trace) = &config.trace_plot {
            let plot = plots.len();
            plots.push(ScopeData::xy_scope(plot, trace.title.clone(), config.trace_x_policy));
            for (role, keys, suffix) in [
                (ChannelRole::Primary, &trace.target, "target"),
                (ChannelRole::Alternate, &trace.actual, "actual"),
            ] {
                let line = channels.len();
                channels.push(Channel::new(
                    format!("{} {suffix}", trace.title),
                    role,
                    plot,
                    line,
                    ChannelBinding::Pair { x: keys.x_key.clone(), y: keys.y_key.clone() },
                ));
            }
        }

        let keys = channels
            .iter()
            .flat_map(|c| c.binding.keys())
            .map(str::to_string)
            .collect();

        Ok(Self {
            renderer: RollingWindowRenderer::new(config.horizon_secs),
            accumulator: IntegralAccumulator::new(
                config.horizon_secs,
                config.tick_interval_secs,
                config.accumulator_mode,
            ),
            config,
            source,
            monitor: ConnectionMonitor::new(),
            pause: PauseController::new(),
            channels,
            pairs,
            plots,
            keys,
            ticks: 0,
            clock: 0.0,
        })
    }

    /// Push the initial bounds, labels and button caption.
    pub fn initialize(&mut self, surface: &mut dyn DisplaySurface) {
        self.renderer.push_bounds(&self.plots, surface);
        for pair in &self.pairs {
            surface.set_text(pair.label, &format_label(0.0, 0.0, 0.0));
        }
        surface.set_button_label(self.pause.button_label());
    }

    /// Run one iteration of the poll/render loop.
    pub fn tick(&mut self, surface: &mut dyn DisplaySurface) -> TickOutcome {
        let transition = self.monitor.poll(&self.source);
        if transition == Transition::Lost {
            self.reset(surface);
        }
        if !self.monitor.is_connected() {
            return TickOutcome {
                transition,
                sampled: false,
                delay: self.config.reconnect_interval(),
            };
        }

        self.sample();

        if !self.pause.is_paused() {
            self.renderer
                .render(self.clock, &self.channels, &mut self.plots, surface);
            self.accumulator
                .update_labels(self.clock, &self.channels, &self.pairs, surface);
            self.check_trace_reset();
        }

        self.ticks += 1;
        self.clock = self.ticks as f64 * self.config.tick_interval_secs;
        TickOutcome {
            transition,
            sampled: true,
            delay: self.config.tick_interval(),
        }
    }

    /// Pause-button callback.
    pub fn toggle_pause(&mut self, surface: &mut dyn DisplaySurface) -> bool {
        let paused = self.pause.toggle();
        debug!(paused, "pause toggled");
        surface.set_button_label(self.pause.button_label());
        paused
    }

    fn sample(&mut self) {
        let keys: Vec<&str> = self.keys.iter().map(String::as_str).collect();
        let batch = self.source.fetch_batch(&keys, 0.0);
        let mut offset = 0;
        for ch in self.channels.iter_mut() {
            let width = ch.binding.width();
            let values = batch.get(offset..offset + width).unwrap_or(&[]);
            ch.record(self.clock, values);
            offset += width;
        }
    }

    fn check_trace_reset(&mut self) {
        let Some(key) = &self.config.trace_reset_key else {
            return;
        };
        if self.source.get_flag(key, false) {
            debug!("trace reset requested");
            for ch in self.channels.iter_mut().filter(|c| c.binding.is_trace()) {
                ch.buffer.clear();
            }
        }
    }

    /// Drop all history and rewind the clock.
    fn reset(&mut self, surface: &mut dyn DisplaySurface) {
        for ch in self.channels.iter_mut() {
            ch.buffer.clear();
        }
        self.ticks = 0;
        self.clock = 0.0;
        if !self.pause.is_paused() {
            for ch in &self.channels {
                surface.set_samples(ch.line, ch.buffer.points());
            }
            for pair in &self.pairs {
                surface.set_text(pair.label, &format_label(0.0, 0.0, 0.0));
            }
        }
        info!("history cleared, awaiting reconnect");
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn is_paused(&self) -> bool {
        self.pause.is_paused()
    }

    pub fn button_label(&self) -> &'static str {
        self.pause.button_label()
    }

    pub fn connection(&self) -> ConnectionState {
        self.monitor.state()
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn pairs(&self) -> &[ChannelPair] {
        &self.pairs
    }

    pub fn plots(&self) -> &[ScopeData] {
        &self.plots
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Keys fetched each tick, in batch order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }
}
