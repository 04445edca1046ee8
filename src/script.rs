//! Scripted replay of user actions against a surface.
//!
//! Scripts are TOML files with one `[[step]]` table per action:
//!
//! ```toml
//! [[step]]
//! action = "pencil"
//!
//! [[step]]
//! action = "down"
//! x = 10
//! y = 20
//!
//! [[step]]
//! action = "move"
//! x = 120
//! y = 80
//!
//! [[step]]
//! action = "up"
//!
//! [[step]]
//! action = "toggle"
//! ```
//!
//! Overlay toggles start their diagram decode on the tokio blocking pool and
//! the replay moves on immediately; `settle` (and the end of the script) waits
//! for outstanding decodes and hands them to the surface in issue order.

use crate::draw::{DecodedImage, RasterSurface};
use crate::input::Point;
use crate::overlay::{
    DecodeError, DiagramDecoder, OverlayError, OverlayTransition, PaintOutcome, PaintTicket,
    decode_in_background,
};
use crate::surface::SurfaceController;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// One user action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum ScriptStep {
    Pencil,
    Eraser,
    Reset,
    Toggle,
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up,
    Leave,
    /// Wait for every in-flight diagram decode and apply it.
    Settle,
}

/// Ordered list of actions.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Script {
    #[serde(default, rename = "step")]
    pub steps: Vec<ScriptStep>,
}

impl Script {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script from {}", path.display()))?;
        Self::from_toml(&text)
            .with_context(|| format!("Failed to parse script from {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

/// Counters gathered while replaying a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplayReport {
    pub steps: usize,
    pub render_failures: usize,
    pub painted: usize,
    pub stale: usize,
    pub decode_failures: usize,
}

impl ReplayReport {
    fn record(&mut self, outcome: PaintOutcome) {
        match outcome {
            PaintOutcome::Painted => self.painted += 1,
            PaintOutcome::Stale => self.stale += 1,
            PaintOutcome::Failed => self.decode_failures += 1,
        }
    }
}

type DecodeHandle = JoinHandle<(PaintTicket, Result<DecodedImage, DecodeError>)>;

/// Drives a [`SurfaceController`] from script steps.
pub struct ScriptRunner<S: RasterSurface> {
    controller: SurfaceController<S>,
    decoder: Arc<dyn DiagramDecoder>,
    runtime: Handle,
    in_flight: Vec<(PaintTicket, DecodeHandle)>,
    report: ReplayReport,
}

impl<S: RasterSurface> ScriptRunner<S> {
    pub fn new(
        controller: SurfaceController<S>,
        decoder: Arc<dyn DiagramDecoder>,
        runtime: Handle,
    ) -> Self {
        Self {
            controller,
            decoder,
            runtime,
            in_flight: Vec::new(),
            report: ReplayReport::default(),
        }
    }

    pub fn controller(&self) -> &SurfaceController<S> {
        &self.controller
    }

    pub fn report(&self) -> ReplayReport {
        self.report
    }

    /// Number of decodes started but not yet applied.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Applies one step. Only an overlay toggle can fail.
    pub async fn apply(&mut self, step: &ScriptStep) -> Result<(), OverlayError> {
        self.report.steps += 1;
        match *step {
            ScriptStep::Pencil => self.controller.select_pencil(),
            ScriptStep::Eraser => self.controller.select_eraser(),
            ScriptStep::Reset => self.controller.reset(),
            ScriptStep::Down { x, y } => self.controller.pointer_down(Point::new(x, y)),
            ScriptStep::Move { x, y } => self.controller.pointer_move(Point::new(x, y)),
            ScriptStep::Up => self.controller.pointer_up(),
            ScriptStep::Leave => self.controller.pointer_leave(),
            ScriptStep::Settle => self.settle().await,
            ScriptStep::Toggle => match self.controller.toggle_overlay() {
                Ok(OverlayTransition::Shown(pending)) => {
                    let ticket = pending.ticket;
                    let handle =
                        decode_in_background(&self.runtime, Arc::clone(&self.decoder), pending);
                    self.in_flight.push((ticket, handle));
                }
                Ok(OverlayTransition::Hidden) => {}
                Err(err) => {
                    self.report.render_failures += 1;
                    return Err(err);
                }
            },
        }
        Ok(())
    }

    /// Waits for all in-flight decodes and completes them in issue order.
    pub async fn settle(&mut self) {
        for (ticket, handle) in std::mem::take(&mut self.in_flight) {
            let (ticket, result) = match handle.await {
                Ok(done) => done,
                Err(err) => (ticket, Err(DecodeError::Task(err.to_string()))),
            };
            let outcome = self.controller.complete_paint(ticket, result);
            log::debug!(
                "Decode for generation {} completed: {:?}",
                ticket.generation(),
                outcome
            );
            self.report.record(outcome);
        }
    }

    /// Replays every step, then settles.
    ///
    /// Toggle failures are passed to `on_error` and replay continues.
    pub async fn run<F>(&mut self, script: &Script, mut on_error: F) -> ReplayReport
    where
        F: FnMut(&OverlayError),
    {
        for step in &script.steps {
            if let Err(err) = self.apply(step).await {
                on_error(&err);
            }
        }
        self.settle().await;
        self.report
    }

    pub fn into_controller(self) -> SurfaceController<S> {
        self.controller
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{CairoSurface, SurfaceSize};
    use crate::overlay::{OverlayState, ResvgDecoder, SvgMarkupRenderer};
    use crate::surface::{SurfaceOptions, SurfaceProps};

    const DIAGRAM: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="50" height="40"><rect width="50" height="40" fill="blue"/></svg>"#;

    fn runner(code: &str) -> ScriptRunner<CairoSurface> {
        let controller = SurfaceController::new(
            SurfaceProps::new(30, 20).with_code(code),
            SurfaceOptions::default(),
            CairoSurface::new(SurfaceSize::new(30, 20)).unwrap(),
            Box::new(SvgMarkupRenderer),
        )
        .unwrap();
        ScriptRunner::new(controller, Arc::new(ResvgDecoder), Handle::current())
    }

    #[test]
    fn parses_all_actions() {
        let script = Script::from_toml(
            r#"
            [[step]]
            action = "pencil"
            [[step]]
            action = "down"
            x = 1
            y = 2.5
            [[step]]
            action = "move"
            x = 3.0
            y = 4
            [[step]]
            action = "leave"
            [[step]]
            action = "settle"
            "#,
        )
        .unwrap();

        assert_eq!(
            script.steps,
            vec![
                ScriptStep::Pencil,
                ScriptStep::Down { x: 1.0, y: 2.5 },
                ScriptStep::Move { x: 3.0, y: 4.0 },
                ScriptStep::Leave,
                ScriptStep::Settle,
            ]
        );
    }

    #[test]
    fn empty_script_has_no_steps() {
        assert!(Script::from_toml("").unwrap().steps.is_empty());
    }

    #[test]
    fn unknown_action_is_rejected() {
        assert!(Script::from_toml("[[step]]\naction = \"spray\"").is_err());
    }

    #[tokio::test]
    async fn toggle_then_settle_paints_diagram() {
        let mut runner = runner(DIAGRAM);
        let script = Script {
            steps: vec![ScriptStep::Toggle],
        };

        let report = runner.run(&script, |_| panic!("render should succeed")).await;

        assert_eq!(report.painted, 1);
        assert_eq!(runner.in_flight(), 0);
        let controller = runner.into_controller();
        assert_eq!(controller.overlay_state(), OverlayState::Visible);
        assert_eq!(controller.size(), SurfaceSize::new(50, 40));
    }

    #[tokio::test]
    async fn quick_double_toggle_discards_paint() {
        let mut runner = runner(DIAGRAM);
        runner.apply(&ScriptStep::Toggle).await.unwrap();
        runner.apply(&ScriptStep::Toggle).await.unwrap();
        assert_eq!(runner.in_flight(), 1);

        runner.settle().await;

        assert_eq!(runner.report().stale, 1);
        assert_eq!(runner.report().painted, 0);
        assert_eq!(runner.controller().size(), SurfaceSize::new(30, 20));
    }

    #[tokio::test]
    async fn render_failure_is_reported_and_replay_continues() {
        let mut runner = runner("if (x) {");
        let script = Script::from_toml(
            r#"
            [[step]]
            action = "toggle"
            [[step]]
            action = "pencil"
            "#,
        )
        .unwrap();
        let mut messages = Vec::new();

        let report = runner.run(&script, |err| messages.push(err.to_string())).await;

        assert_eq!(report.steps, 2);
        assert_eq!(report.render_failures, 1);
        assert_eq!(messages, vec!["Invalid source code for flowchart".to_string()]);
        assert_eq!(runner.controller().tool(), crate::input::Tool::Pencil);
    }
}
