//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod menu;
mod reader;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (main_area, status_area) = layout::create_layout(frame.area());

    match app.state.current_view {
        View::Menu => menu::draw(frame, main_area, app),
        View::Form => forms::draw_form(frame, main_area, app),
        View::Wizard => forms::draw_wizard(frame, main_area, app),
        View::Reader => reader::draw(frame, main_area, app),
    }

    layout::draw_status_bar(frame, status_area, app);

    // Errors overlay everything until dismissed
    if let Some(message) = app.state.current_error() {
        components::render_error_dialog(frame, message, app.state.error_count());
    }
}
