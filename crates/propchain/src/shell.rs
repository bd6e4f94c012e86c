//! Static page chrome: navigation bar, hero and footer.

use eframe::egui;

use propchain_wallet_core::WalletSnapshot;

use crate::ui;

const NAV_LINKS: [&str; 4] = ["Home", "Listings", "Favorites", "Dashboard"];

/// Label for the header wallet button.
pub fn wallet_button_label(snapshot: &WalletSnapshot) -> String {
    match snapshot.address.as_deref() {
        Some(address) => ui::short_address(address),
        None => "Connect Wallet".to_owned(),
    }
}

/// Returns true when the wallet button was clicked.
pub fn render_header(ui: &mut egui::Ui, snapshot: &WalletSnapshot) -> bool {
    let mut wallet_clicked = false;
    ui.add_space(8.0);
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new("🏠")
                .size(16.0)
                .background_color(ui::ACCENT),
        );
        ui.label(egui::RichText::new("PropChain").size(22.0).strong());
        ui.add_space(30.0);
        ui.separator();
        ui.add_space(10.0);

        // navigation targets are not implemented; only Home is active
        for (i, link) in NAV_LINKS.iter().enumerate() {
            let _ = ui.selectable_label(i == 0, *link);
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let label = wallet_button_label(snapshot);
            if ui::filled_button(ui, &label, ui::ACCENT, true).clicked() {
                wallet_clicked = true;
            }
            if snapshot.is_loading_balance {
                ui.spinner();
            } else if let Some(balance) = snapshot.balance.as_deref() {
                ui.label(egui::RichText::new(format!("{balance} ETH")).monospace());
            }
        });
    });
    ui.add_space(4.0);
    wallet_clicked
}

pub fn render_hero(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(80.0);
        ui.label(
            egui::RichText::new("Real Estate Platform with Wallet")
                .size(14.0)
                .color(ui::ACCENT),
        );
        ui.add_space(12.0);
        ui.label(egui::RichText::new("Find Your Dream Property").size(40.0).strong());
        ui::styled_heading(ui, "On The Blockchain");
        ui.add_space(16.0);
        ui.label(
            "Discover luxury real estate with blockchain technology. \
             Secure, transparent, and revolutionary property investments.",
        );
        ui.add_space(24.0);

        // call-to-action buttons have no destination yet
        let width = 130.0 + 90.0 + ui.spacing().item_spacing.x;
        ui.allocate_ui(egui::vec2(width, 34.0), |ui| {
            ui.horizontal(|ui| {
                let _ = ui::primary_button(ui, "Explore Properties");
                let _ = ui::secondary_button(ui, "Learn More");
            });
        });
    });
}

pub fn render_footer(ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(format!(
                "build {} · {}",
                build_commit(),
                env!("BUILD_TIME")
            ))
            .small()
            .weak(),
        );
    });
}

fn build_commit() -> &'static str {
    let hash = env!("GIT_HASH");
    hash.get(..8).unwrap_or(hash)
}
