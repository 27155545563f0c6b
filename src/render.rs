use crate::{label::format_label, messages::PredictionResponse};
use rust_decimal::{Decimal, RoundingStrategy};
use std::cmp::Ordering;

/// One line of the ranked probability list.
#[derive(Clone, Debug, PartialEq)]
pub struct DetailRow {
    pub label: String,
    pub percentage: String,
}

/// A prediction response turned into display text.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedPrediction {
    pub headline: String,
    pub confidence: String,
    pub rows: Vec<DetailRow>,
}

impl RenderedPrediction {
    /// Renders the headline, the verbatim confidence and the detail rows ranked by probability.
    ///
    /// Rows with equal probability keep the order the server listed them in.
    pub fn from_response(response: &PredictionResponse) -> Self {
        let mut ranked: Vec<(&str, f64)> = response.details.iter().collect();
        // stable, so ties stay in server order
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        Self {
            headline: format_label(&response.prediction).to_string(),
            confidence: response.confidence.to_string(),
            rows: ranked
                .into_iter()
                .map(|(label, p)| DetailRow {
                    label: format_label(label).to_string(),
                    percentage: format_percentage(p),
                })
                .collect(),
        }
    }
}

/// Formats a probability as a percentage with two decimals, e.g. `0.985` → `98.50%`.
///
/// Rounding works on the exact value of the float; an exact midpoint rounds
/// away from zero, so `0.125%` becomes `0.13%`.
pub fn format_percentage(probability: f64) -> String {
    let percent = probability * 100.0;
    match Decimal::from_f64_retain(percent) {
        Some(exact) => {
            let rounded = exact.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            format!("{rounded:.2}%")
        }
        None => format!("{percent:.2}%"),
    }
}
