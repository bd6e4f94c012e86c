//! The "Connect Wallet" dialog.

use eframe::egui;

use propchain_wallet_adapters::METAMASK_INSTALL_URL;
use propchain_wallet_core::WalletSnapshot;

use crate::ui;

/// What the user asked for this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    Connect,
    Disconnect,
    Close,
}

pub fn metamask_button_label(snapshot: &WalletSnapshot) -> &'static str {
    if snapshot.is_connecting {
        "Connecting…"
    } else {
        "MetaMask"
    }
}

pub fn render(
    ctx: &egui::Context,
    snapshot: &WalletSnapshot,
    has_provider: bool,
) -> Option<ModalAction> {
    if !snapshot.is_modal_open {
        return None;
    }
    let mut action = None;

    let screen = ctx.screen_rect();
    let backdrop = egui::Area::new(egui::Id::new("wallet_modal_backdrop"))
        .order(egui::Order::Middle)
        .fixed_pos(screen.min)
        .show(ctx, |ui| {
            ui.painter()
                .rect_filled(screen, 0.0, egui::Color32::from_black_alpha(100));
            ui.allocate_rect(screen, egui::Sense::click())
        })
        .inner;
    if backdrop.clicked() {
        action = Some(ModalAction::Close);
    }

    egui::Window::new("Connect Wallet")
        .order(egui::Order::Foreground)
        .collapsible(false)
        .resizable(false)
        .fixed_size(egui::vec2(420.0, 0.0))
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.add_space(8.0);
            if let Some(address) = snapshot.address.as_deref() {
                ui.label("Connected address");
                ui::copyable_value(ui, address);
                ui.add_space(12.0);
                if ui::filled_button(ui, "Disconnect", ui::DANGER, true).clicked() {
                    action = Some(ModalAction::Disconnect);
                }
            } else {
                if has_provider {
                    let label = metamask_button_label(snapshot);
                    let enabled = !snapshot.is_connecting;
                    if ui::filled_button(ui, label, ui::METAMASK_ORANGE, enabled).clicked() {
                        action = Some(ModalAction::Connect);
                    }
                } else {
                    ui.label("MetaMask not detected. Please install it to continue.");
                    if ui.link("Install MetaMask").clicked() {
                        ui::open_url_new_tab(METAMASK_INSTALL_URL);
                    }
                }
                if let Some(error) = snapshot.error.as_deref() {
                    ui.add_space(8.0);
                    ui::error_message(ui, error);
                }
            }

            ui.add_space(12.0);
            ui.separator();
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui::secondary_button(ui, "Close").clicked() {
                    action = Some(ModalAction::Close);
                }
            });
        });

    action
}
