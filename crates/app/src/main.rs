use eframe::egui;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod router;
mod screens;
mod state;
mod types;
mod uploader;
mod widgets;

use types::AppState;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let state = AppState::load()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 800.0])
            .with_min_inner_size([720.0, 560.0])
            .with_drag_and_drop(true),
        vsync: true,
        ..Default::default()
    };
    eframe::run_native(
        "Rayfield Energy AI",
        options,
        Box::new(|_cc| {
            Box::new(PermitDeskApp {
                state: Arc::new(Mutex::new(state)),
            })
        }),
    )
    .map_err(|e| anyhow::anyhow!("failed to start the window: {}", e))
}

struct PermitDeskApp {
    state: Arc<Mutex<AppState>>,
}

impl eframe::App for PermitDeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut s = self.state.lock();

        // Keep polling while a request is out
        if s.poll() {
            ctx.request_repaint();
        }

        let dark = s.settings.dark_mode;
        let mut style = (*ctx.style()).clone();
        style.visuals = if dark {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        style.visuals.window_rounding = egui::Rounding::same(12.0);
        style.spacing.item_spacing = egui::vec2(8.0, 8.0);
        style.visuals.selection.bg_fill = egui::Color32::from_rgb(59, 130, 246);
        ctx.set_style(style);

        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::none().fill(if dark {
                egui::Color32::from_rgb(35, 35, 42)
            } else {
                egui::Color32::from_rgb(245, 247, 250)
            }))
            .show(ctx, |ui| {
                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    ui.add_space(16.0);
                    ui.heading(egui::RichText::new("Rayfield Energy AI").size(22.0).strong());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.add_space(16.0);
                        let theme = if dark { "☀ Light" } else { "🌙 Dark" };
                        if ui.button(theme).clicked() {
                            s.toggle_dark_mode();
                        }
                    });
                });
                ui.add_space(10.0);
            });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(6.0);
                ui.label(
                    egui::RichText::new("© 2025 Rayfield Energy AI. Built for renewable land teams.")
                        .small()
                        .weak(),
                );
                ui.add_space(6.0);
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let backend = Arc::clone(&s.backend);
            s.router.ui(ctx, ui, &backend);
        });
    }
}
