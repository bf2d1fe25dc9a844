//! Text labels attached to event markers.

use crate::prelude::{VizError, VizResult};
use crate::records::EventRecord;
use serde::{Deserialize, Serialize};

/// Which event fields make up an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnnotationStyle {
    /// `P: [ possession; scoring; impact ]`, offset from the start by the marker alpha.
    #[default]
    ScoreSummary,
    /// ` [ xT: threat ]` for passes, ` [ subtype ]` otherwise, at the start.
    PassThreat,
}

impl AnnotationStyle {
    pub fn label(self, row: usize, event: &EventRecord) -> VizResult<String> {
        match self {
            AnnotationStyle::ScoreSummary => score_summary(row, event),
            AnnotationStyle::PassThreat => pass_threat(row, event),
        }
    }

    /// Distance the label is shifted from the start position on both axes.
    pub fn offset(self, alpha: f64) -> f64 {
        match self {
            AnnotationStyle::ScoreSummary => alpha,
            AnnotationStyle::PassThreat => 0.0,
        }
    }
}

fn required(row: usize, field: &'static str, value: Option<f64>) -> VizResult<f64> {
    value.ok_or(VizError::MissingField { row, field })
}

fn score_summary(row: usize, event: &EventRecord) -> VizResult<String> {
    let initial = event
        .type_of_pass
        .as_deref()
        .and_then(|kind| kind.chars().next())
        .ok_or(VizError::MissingField {
            row,
            field: "Type_of_Pass",
        })?;
    let possession = required(row, "possession_score", event.possession_score)?;
    let scoring = required(row, "scoring_score", event.scoring_score)?;
    let impact = required(row, "Improved_Impact_Score", event.improved_impact_score)?;

    Ok(format!(
        "{}: [ {}; {}; {} ]",
        initial.to_uppercase(),
        round3(possession),
        round3(scoring),
        round3(impact)
    ))
}

fn pass_threat(row: usize, event: &EventRecord) -> VizResult<String> {
    if !event.is_pass() {
        let subtype = event.subtype.as_deref().unwrap_or("nan");
        return Ok(format!(" [ {} ]", subtype));
    }
    let threat = required(row, "xThreat_Pass", event.xthreat_pass)?;
    Ok(format!(" [ xT: {} ]", round3(threat)))
}

/// Rounds the exact binary value to three decimals and prints the shortest
/// representation, keeping a trailing `.0` on whole numbers (`1.0`, `0.125`,
/// `nan`).
pub fn round3(value: f64) -> String {
    if value.is_nan() {
        return "nan".into();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf".into() } else { "-inf".into() };
    }
    let rounded: f64 = format!("{:.3}", value).parse().unwrap_or(value);
    if rounded.fract() == 0.0 {
        format!("{:.1}", rounded)
    } else {
        format!("{}", rounded)
    }
}
