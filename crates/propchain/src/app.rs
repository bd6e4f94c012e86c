//! Main application state and update loop

use eframe::egui;

use crate::shell;
use crate::wallet_bridge::WalletBridge;
use crate::wallet_modal::{self, ModalAction};

/// The main application state
pub struct App {
    wallet: WalletBridge,
}

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            wallet: WalletBridge::new(&cc.egui_ctx),
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());

        self.wallet.poll();
        let snapshot = self.wallet.snapshot();

        // proxy results arrive on worker threads outside the frame loop
        if snapshot.is_connecting || snapshot.is_loading_balance {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        }

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            if shell::render_header(ui, &snapshot) {
                self.wallet.open_modal();
            }
        });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            shell::render_footer(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                shell::render_hero(ui);
                ui.add_space(20.0);
            });
        });

        match wallet_modal::render(ctx, &snapshot, self.wallet.has_provider()) {
            Some(ModalAction::Connect) => self.wallet.connect(),
            Some(ModalAction::Disconnect) => self.wallet.disconnect(),
            Some(ModalAction::Close) => self.wallet.close_modal(),
            None => {}
        }
    }
}
