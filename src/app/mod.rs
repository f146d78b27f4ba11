//! Front-ends for a [`DashboardSession`](crate::session::DashboardSession).
//!
//! | Sub-module         | Responsibility |
//! | ------------------ | -------------- |
//! | [`dashboard_app`]  | [`EguiSurface`] and the eframe [`DashboardApp`] |
//! | [`run`]            | [`run_dashboard()`] (native window) and [`run_headless()`] |

mod dashboard_app;
mod run;

pub use dashboard_app::{DashboardApp, EguiSurface};
pub use run::{run_dashboard, run_headless};
