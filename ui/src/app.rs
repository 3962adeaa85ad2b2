use std::time::Duration;

use roster_business::workflow;

use crate::{state::State, widgets};

/// Poll interval while commands are outstanding, so results show up without input.
const BUSY_REPAINT: Duration = Duration::from_millis(100);

pub struct RosterApp {
    state: State,
}

impl RosterApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    fn is_busy(&self) -> bool {
        self.state.ctx.has_pending_work()
    }
}

impl eframe::App for RosterApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply results published by finished commands.
        self.state.ctx.sync_computes();

        if !self.state.initial_load_requested {
            self.state.initial_load_requested = true;
            workflow::load_all(&mut self.state.ctx);
        }

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                widgets::toolbar(&mut self.state.ctx, ui);
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Employees");
            ui.add_space(8.0);
            widgets::employee_panel(&mut self.state.ctx, ui);
        });

        self.state.ctx.run_computed();

        if self.is_busy() {
            ctx.request_repaint_after(BUSY_REPAINT);
        }
    }
}
