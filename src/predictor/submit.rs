//! Form submission: extract features, call the model, format the price

use super::traits::PredictorTrait;
use crate::config::PredictorSettings;
use crate::error::SubmitError;
use crate::state::{extract, FormState};

/// Run one prediction for the current form values
pub async fn submit(
    form: &FormState,
    predictor: &dyn PredictorTrait,
    settings: &PredictorSettings,
) -> Result<f64, SubmitError> {
    let features = extract(form)?;
    tracing::debug!(features = features.len(), mode = %settings.mode, "features extracted");
    let price = predictor
        .predict(&features, &settings.artifact_path, &settings.mode)
        .await?;
    Ok(price)
}

/// Format a price with thousands separators and two decimals
pub fn format_price(price: f64) -> String {
    if !price.is_finite() {
        return price.to_string();
    }
    let fixed = format!("{:.2}", price.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if price < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}
