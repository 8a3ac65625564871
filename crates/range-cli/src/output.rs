use chrono::{DateTime, SecondsFormat, Utc};
use range_engine::ResolvedInterval;
use serde::Serialize;
use serde_json::{Map, Value};

fn rfc3339(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// `start<TAB>end`, with `now` standing in for an open end.
pub fn render_text(interval: &ResolvedInterval) -> String {
    let end = interval.end.map_or_else(|| "now".to_string(), rfc3339);
    format!("{}\t{}", rfc3339(interval.start), end)
}

#[derive(Debug, Serialize)]
struct Bounds {
    gte: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    lte: Option<String>,
}

/// The range clause a search query carries for `interval` on `field`.
pub fn range_filter(interval: &ResolvedInterval, field: &str) -> serde_json::Result<Value> {
    let bounds = serde_json::to_value(Bounds {
        gte: rfc3339(interval.start),
        lte: interval.end.map(rfc3339),
    })?;
    let mut clause = Map::new();
    clause.insert(field.to_string(), bounds);
    let mut filter = Map::new();
    filter.insert("range".to_string(), Value::Object(clause));
    Ok(Value::Object(filter))
}
