//! Form rendering module
//!
//! - `field_renderer`: Field rendering utilities
//! - `entry_form`: create/edit forms and settings
//! - `wizard_form`: the sign up wizard

mod entry_form;
mod field_renderer;
mod wizard_form;

pub use entry_form::draw_form;
pub use wizard_form::draw_wizard;
