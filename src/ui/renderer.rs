//! Top-level rendering coordinator.
//!
//! Rendering is two steps: compute a [`UIViewModel`] from `AppState`, then hand each
//! part to its component. The alert, when present, is drawn last so it sits on top.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Screen, UIViewModel};

/// Renders the plugin UI to stdout.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    match &vm.screen {
        Screen::Loading { spinner, message } => components::render_loading(*spinner, message, theme, rows, cols),
        Screen::SignIn(info) => components::render_sign_in(info, theme, rows, cols),
        Screen::Main(view) => components::render_main(view, theme, rows, cols),
    }

    let footer_row = rows.saturating_sub(1).max(1);
    components::render_border(footer_row.saturating_sub(1).max(1), &theme.colors.border, cols);
    components::render_footer(footer_row, &vm.footer, theme, cols);

    if let Some(alert) = &vm.alert {
        components::render_alert(alert, theme, rows, cols);
    }
}
