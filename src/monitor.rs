//! Connection tracking for the telemetry source.

use tracing::{debug, info, warn};

use crate::source::TelemetrySource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connected,
}

/// Edge observed by a single [`ConnectionMonitor::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// No change since the last poll.
    Steady(ConnectionState),
    /// `Disconnected -> Connected`.
    Connected,
    /// `Connected -> Disconnected`. The caller must drop all history.
    Lost,
}

/// Two-state liveness tracker. Starts out disconnected.
#[derive(Debug, Default)]
pub struct ConnectionMonitor {
    state: ConnectionState,
}

impl ConnectionMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    /// Query the source once and report the resulting edge.
    ///
    /// A failed liveness query is treated as disconnected.
    pub fn poll<S: TelemetrySource + ?Sized>(&mut self, source: &S) -> Transition {
        let live = match source.is_connected() {
            Ok(live) => live,
            Err(e) => {
                debug!(error = %e, "liveness query failed");
                false
            }
        };
        let next = if live {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        };
        let prev = std::mem::replace(&mut self.state, next);
        match (prev, next) {
            (ConnectionState::Disconnected, ConnectionState::Connected) => {
                info!("connected to telemetry server");
                Transition::Connected
            }
            (ConnectionState::Connected, ConnectionState::Disconnected) => {
                warn!("connection to telemetry server lost, retrying");
                Transition::Lost
            }
            (_, state) => Transition::Steady(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceError;
    use crate::source::TableSource;

    struct Unreachable;

    impl TelemetrySource for Unreachable {
        fn is_connected(&self) -> Result<bool, SourceError> {
            Err(SourceError::Unreachable("no route".into()))
        }
        fn get_value(&self, _key: &str, default: f64) -> f64 {
            default
        }
        fn get_flag(&self, _key: &str, default: bool) -> bool {
            default
        }
    }

    #[test]
    fn edges_are_reported_once() {
        let table = TableSource::new();
        let mut m = ConnectionMonitor::new();
        assert_eq!(m.poll(&table), Transition::Steady(ConnectionState::Disconnected));
        table.set_connected(true);
        assert_eq!(m.poll(&table), Transition::Connected);
        assert_eq!(m.poll(&table), Transition::Steady(ConnectionState::Connected));
        table.set_connected(false);
        assert_eq!(m.poll(&table), Transition::Lost);
        assert_eq!(m.poll(&table), Transition::Steady(ConnectionState::Disconnected));
    }

    #[test]
    fn query_error_counts_as_disconnected() {
        let mut m = ConnectionMonitor { state: ConnectionState::Connected };
        assert_eq!(m.poll(&Unreachable), Transition::Lost);
        assert!(!m.is_connected());
    }
}
