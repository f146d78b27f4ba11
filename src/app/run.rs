//! Entry points for running a session, either in a native window or headless.

use eframe::egui;

use crate::session::{DashboardSession, TickOutcome};
use crate::source::TelemetrySource;
use crate::surface::DisplaySurface;

use super::dashboard_app::DashboardApp;

/// Open a native window for `session`. Blocks until the window is closed.
pub fn run_dashboard<S>(session: DashboardSession<S>) -> eframe::Result<()>
where
    S: TelemetrySource + 'static,
{
    let title = session.config().title.clone();
    let app = DashboardApp::new(session);
    let opts = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title.clone())
            .with_inner_size(egui::vec2(1200.0, 720.0)),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        opts,
        Box::new(|cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(app))
        }),
    )
}

/// Plain `tick; sleep` loop against any surface.
///
/// `keep_going` sees every outcome and ends the loop by returning `false`.
/// Returns the number of ticks run.
pub fn run_headless<S, F>(
    session: &mut DashboardSession<S>,
    surface: &mut dyn DisplaySurface,
    mut keep_going: F,
) -> usize
where
    S: TelemetrySource,
    F: FnMut(&TickOutcome) -> bool,
{
    session.initialize(surface);
    let mut ticks = 0;
    loop {
        let outcome = session.tick(surface);
        ticks += 1;
        if !keep_going(&outcome) {
            return ticks;
        }
        std::thread::sleep(outcome.delay);
    }
}
