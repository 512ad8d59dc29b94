//! Price predictor module

mod client;
mod submit;
mod traits;

pub use client::CommandPredictor;
pub use submit::{format_price, submit};
pub use traits::PredictorTrait;

#[cfg(test)]
pub use traits::MockPredictorTrait;
