//! velgraph crate root: re-exports and module wiring.
//!
//! A live telemetry dashboard for a mobile robot, built on egui/eframe. It
//! polls velocity and position keys from a telemetry server, keeps a rolling
//! history per channel, autoscales the plots and shows a windowed integral of
//! commanded minus measured velocity.
//!
//! - `data`: sample buffers, channels and per-plot bounds
//! - `source`: telemetry store trait and the in-memory table
//! - `net`: WebSocket client feeding the table (feature `net`)
//! - `monitor`: connection edge detection
//! - `render`: pushes samples and bounds to a `DisplaySurface`
//! - `accumulator`: windowed trapezoidal integral
//! - `pause`: display freeze toggle
//! - `session`: one display session and its tick
//! - `app`: eframe front-end and headless runner

pub mod accumulator;
pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod monitor;
#[cfg(feature = "net")]
pub mod net;
pub mod pause;
pub mod render;
pub mod session;
pub mod source;
pub mod surface;

// Public re-exports for a compact external API
pub use accumulator::{AccumulatorMode, IntegralAccumulator};
pub use app::{run_dashboard, run_headless, DashboardApp, EguiSurface};
pub use config::DashboardConfig;
pub use data::buffer::SampleBuffer;
pub use data::scope::XWindowPolicy;
pub use error::{ConfigError, SourceError};
pub use monitor::{ConnectionMonitor, ConnectionState, Transition};
#[cfg(feature = "net")]
pub use net::WsTelemetryClient;
pub use pause::PauseController;
pub use render::RollingWindowRenderer;
pub use session::{DashboardSession, TickOutcome};
pub use source::{TableSource, TelemetryMessage, TelemetrySource, TelemetryValue};
pub use surface::{DisplaySurface, LoggingSurface, RecordingSurface, SurfaceCall};
