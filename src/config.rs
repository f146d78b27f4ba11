//! Dashboard configuration: cadence, horizon, and which telemetry keys feed
//! which plot.
//!
//! Every field has a default matching the drive-train table layout, so a
//! YAML file only needs to list what differs.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::accumulator::AccumulatorMode;
use crate::data::scope::XWindowPolicy;
use crate::error::ConfigError;

// ─────────────────────────────────────────────────────────────────────────────
// Plot layout
// ─────────────────────────────────────────────────────────────────────────────

/// A time-series plot showing a commanded value against the measured one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimePlotConfig {
    pub title: String,
    pub target_key: String,
    pub actual_key: String,
}

impl TimePlotConfig {
    pub fn new(title: &str, target_key: &str, actual_key: &str) -> Self {
        Self {
            title: title.to_string(),
            target_key: target_key.to_string(),
            actual_key: actual_key.to_string(),
        }
    }
}

/// Keys of one `(x, y)` position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PositionKeys {
    pub x_key: String,
    pub y_key: String,
}

/// The XY trace plot: planned path against the measured one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TracePlotConfig {
    pub title: String,
    pub target: PositionKeys,
    pub actual: PositionKeys,
}

// ─────────────────────────────────────────────────────────────────────────────
// DashboardConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level configuration.
///
/// | Field                      | Purpose |
/// |----------------------------|---------|
/// | `tick_interval_secs`       | Poll period while connected, also the clock step |
/// | `reconnect_interval_secs`  | Poll period while waiting for the server |
/// | `horizon_secs`             | Visible and integrated look-back |
/// | `accumulator_mode`         | Sign convention of the displacement estimate |
/// | `trace_x_policy`           | X-axis rule of the XY trace plot |
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Native window title.
    pub title: String,
    /// WebSocket endpoint of the telemetry server.
    pub server_url: String,
    pub tick_interval_secs: f64,
    pub reconnect_interval_secs: f64,
    pub horizon_secs: f64,
    /// Half-width of the x-axis shown before the first sample arrives.
    pub initial_window_secs: f64,
    /// Initial symmetric y-limit of the time plots.
    pub initial_y_limit: f64,
    pub accumulator_mode: AccumulatorMode,
    pub trace_x_policy: XWindowPolicy,
    /// Boolean key that, when set, wipes the XY trace.
    pub trace_reset_key: Option<String>,
    pub time_plots: Vec<TimePlotConfig>,
    pub trace_plot: Option<TracePlotConfig>,
}

const PATH_TRACER: &str = "Shuffleboard/PathTracer";
const DRIVE_TRAIN: &str = "Shuffleboard/Drive Train";

impl Default for DashboardConfig {
    fn default() -> Self {
        let pt = |k: &str| format!("{PATH_TRACER}/{k}");
        let dt = |k: &str| format!("{DRIVE_TRAIN}/{k}");
        Self {
            title: "Velocity Grapher".to_string(),
            server_url: "ws://127.0.0.1:5810/telemetry".to_string(),
            tick_interval_secs: 0.1,
            reconnect_interval_secs: 0.5,
            horizon_secs: 6.0,
            initial_window_secs: 5.0,
            initial_y_limit: 6.0,
            accumulator_mode: AccumulatorMode::TargetMinusActual,
            trace_x_policy: XWindowPolicy::DataExtent,
            trace_reset_key: Some(pt("ptReset")),
            time_plots: vec![
                TimePlotConfig::new("vX", &pt("vX"), &dt("XVel")),
                TimePlotConfig::new("vY", &pt("vY"), &dt("YVel")),
                TimePlotConfig::new("vL", &pt("vL"), &dt("Left Vel")),
                TimePlotConfig::new("vR", &pt("vR"), &dt("Right Vel")),
            ],
            trace_plot: Some(TracePlotConfig {
                title: "Pos".to_string(),
                target: PositionKeys { x_key: pt("pX"), y_key: pt("pY") },
                actual: PositionKeys { x_key: pt("pXA"), y_key: pt("pYA") },
            }),
        }
    }
}

impl DashboardConfig {
    /// Parse a YAML document; missing fields take their defaults.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: DashboardConfig = serde_yaml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = Self::from_yaml_str(&s)?;
        tracing::info!(?path, plots = cfg.time_plots.len(), "loaded dashboard config");
        Ok(cfg)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("tick_interval_secs", self.tick_interval_secs),
            ("reconnect_interval_secs", self.reconnect_interval_secs),
            ("horizon_secs", self.horizon_secs),
            ("initial_window_secs", self.initial_window_secs),
            ("initial_y_limit", self.initial_y_limit),
        ];
        for (name, v) in positive {
            if !(v.is_finite() && v > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {v}")));
            }
        }
        if self.time_plots.is_empty() && self.trace_plot.is_none() {
            return Err(ConfigError::Invalid("no plots configured".to_string()));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(self.tick_interval_secs)
    }

    pub fn reconnect_interval(&self) -> Duration {
        Duration::from_secs_f64(self.reconnect_interval_secs)
    }
}
