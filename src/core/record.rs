use serde::Serialize;
use serde_json::{Map, Value};

// Cohort used in the sort key for rows that do not carry one.
pub const MISSING_FORM: i64 = -1;

/// One row of the leaderboard feed.
///
/// Rows come from a third party and are read leniently: a missing or malformed
/// field falls back to its default instead of rejecting the row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetitorRecord {
    pub name: String,
    /// `None` when the row has no usable cohort. Such rows never match a target.
    pub form: Option<i64>,
    pub sum_rank: f64,
    pub disqual: bool,
    pub automatic: bool,
}

impl CompetitorRecord {
    pub fn from_json(row: &Map<String, Value>) -> Self {
        CompetitorRecord {
            name: row.get("name").map(as_text).unwrap_or_default(),
            form: row.get("form").and_then(as_integer),
            sum_rank: row.get("sumRank").and_then(as_number).unwrap_or(0.0),
            disqual: row.get("disqual").map(is_truthy).unwrap_or(false),
            automatic: row.get("automatic").map(is_truthy).unwrap_or(false),
        }
    }

    /// Cohort as used in the sort key.
    pub fn form_key(&self) -> i64 {
        self.form.unwrap_or(MISSING_FORM)
    }
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

// Integral floats (11.0) are accepted, anything else is not a cohort.
fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.is_finite())
                .map(|f| f as i64)
        }),
        _ => None,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
pub(crate) fn record(name: &str, form: i64, sum_rank: f64) -> CompetitorRecord {
    CompetitorRecord {
        name: name.to_string(),
        form: Some(form),
        sum_rank,
        disqual: false,
        automatic: false,
    }
}
