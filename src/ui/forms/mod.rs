//! Form rendering module
//!
//! - `field_renderer`: single field row rendering
//! - `price_form`: the apartment price form with its action panel

mod field_renderer;
mod price_form;

pub use price_form::draw_price_form;
