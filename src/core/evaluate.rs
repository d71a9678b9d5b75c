use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::core::normalize::{comparison_key, float_eq_2dp};
use crate::domain::model::ShipmentRecord;

/// Field list scored by default, in report order.
pub const DEFAULT_EVAL_FIELDS: [&str; 9] = [
    "product_line",
    "origin_port_code",
    "origin_port_name",
    "destination_port_code",
    "destination_port_name",
    "incoterm",
    "cargo_weight_kg",
    "cargo_cbm",
    "is_dangerous",
];

// Scored with 2-decimal float tolerance instead of normalized-string equality.
const NUMERIC_FIELDS: [&str; 2] = ["cargo_weight_kg", "cargo_cbm"];

#[derive(Debug, Clone, Serialize)]
pub struct FieldAccuracy {
    pub field: String,
    pub correct: usize,
    pub total: usize,
}

impl FieldAccuracy {
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64 * 100.0
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub evaluated_at: DateTime<Utc>,
    pub fields: Vec<FieldAccuracy>,
    pub correct: usize,
    pub total: usize,
    /// Ground-truth ids with no prediction; excluded from every denominator.
    pub missing_ids: Vec<String>,
}

impl EvaluationReport {
    pub fn overall_accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64 * 100.0
        }
    }
}

/// Scores predictions against ground truth field by field. Read-only
/// aggregation: inputs are untouched and nothing here can fail.
pub fn evaluate(
    predictions: &[ShipmentRecord],
    ground_truth: &[ShipmentRecord],
    fields: &[&str],
) -> EvaluationReport {
    // last-write-wins on duplicated ids; inputs should not contain any
    let by_id: HashMap<&str, &ShipmentRecord> = predictions
        .iter()
        .map(|record| (record.id.as_str(), record))
        .collect();

    let mut field_metrics: Vec<FieldAccuracy> = fields
        .iter()
        .map(|field| FieldAccuracy {
            field: field.to_string(),
            correct: 0,
            total: 0,
        })
        .collect();
    let mut missing_ids = Vec::new();
    let mut correct = 0;
    let mut total = 0;

    for truth in ground_truth {
        let Some(prediction) = by_id.get(truth.id.as_str()) else {
            missing_ids.push(truth.id.clone());
            continue;
        };

        for (i, field) in fields.iter().enumerate() {
            field_metrics[i].total += 1;
            total += 1;
            if values_match(field, prediction, truth) {
                field_metrics[i].correct += 1;
                correct += 1;
            }
        }
    }

    EvaluationReport {
        evaluated_at: Utc::now(),
        fields: field_metrics,
        correct,
        total,
        missing_ids,
    }
}

fn values_match(field: &str, prediction: &ShipmentRecord, truth: &ShipmentRecord) -> bool {
    if NUMERIC_FIELDS.contains(&field) {
        return float_eq_2dp(numeric_field(prediction, field), numeric_field(truth, field));
    }
    comparison_key(&field_value(prediction, field)) == comparison_key(&field_value(truth, field))
}

fn numeric_field(record: &ShipmentRecord, field: &str) -> Option<f64> {
    match field {
        "cargo_weight_kg" => record.cargo_weight_kg,
        "cargo_cbm" => record.cargo_cbm,
        _ => None,
    }
}

fn field_value(record: &ShipmentRecord, field: &str) -> Value {
    fn optional(value: &Option<String>) -> Value {
        value.clone().map(Value::String).unwrap_or(Value::Null)
    }

    match field {
        "id" => Value::String(record.id.clone()),
        "product_line" => optional(&record.product_line),
        "origin_port_code" => optional(&record.origin_port_code),
        "origin_port_name" => optional(&record.origin_port_name),
        "destination_port_code" => optional(&record.destination_port_code),
        "destination_port_name" => optional(&record.destination_port_name),
        "incoterm" => Value::String(record.incoterm.clone()),
        "is_dangerous" => Value::Bool(record.is_dangerous),
        _ => Value::Null,
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "=".repeat(60))?;
        writeln!(f, "{:^60}", "EVALUATION REPORT")?;
        writeln!(f, "{}", "=".repeat(60))?;
        writeln!(f)?;

        for id in &self.missing_ids {
            writeln!(f, "Warning: {} missing in predictions.", id)?;
        }
        if !self.missing_ids.is_empty() {
            writeln!(f)?;
        }

        writeln!(f, "{:<25} | {:<10} | {}", "Field", "Accuracy", "Correct/Total")?;
        writeln!(f, "{}", "-".repeat(50))?;
        for metric in &self.fields {
            writeln!(
                f,
                "{:<25} | {:>6.2}%    | {}/{}",
                metric.field,
                metric.accuracy(),
                metric.correct,
                metric.total
            )?;
        }

        writeln!(f)?;
        writeln!(f, "{}", "=".repeat(60))?;
        writeln!(
            f,
            "OVERALL ACCURACY: {:.2}% ({}/{})",
            self.overall_accuracy(),
            self.correct,
            self.total
        )?;
        write!(f, "{}", "=".repeat(60))
    }
}
