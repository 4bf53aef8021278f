use super::RawMetricsPayload;
use super::payload::describe;
use crate::LoadError;
use serde::Serialize;
use serde_json::Value;

/// Series that carries the period labels
const LABEL_SERIES: &str = "invite_sent";

/// Per-element field holding the period label
const LABEL_FIELD: &str = "month";

const INVITES: SeriesField = SeriesField {
    series: LABEL_SERIES,
    value: "count",
};
const ATTEMPTS: SeriesField = SeriesField {
    series: "test_attempted",
    value: "count",
};
const PASS_RATE: SeriesField = SeriesField {
    series: "pass_rate",
    value: "rate",
};
const AVG_SCORE: SeriesField = SeriesField {
    series: "avg_score",
    value: "score",
};

/// Where one numeric series lives in the payload
#[derive(Debug, Clone, Copy)]
struct SeriesField {
    series: &'static str,
    value: &'static str,
}

/// Chart-ready metrics: one label per reporting period and four value series aligned to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedSeries {
    pub labels: Vec<String>,
    pub invites: Vec<f64>,
    pub attempts: Vec<f64>,
    pub pass_rate: Vec<f64>,
    pub avg_score: Vec<f64>,
}

impl NormalizedSeries {
    /// Number of reporting periods.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Reshape a raw payload into aligned numeric series.
///
/// Fails without producing a partial result when any series is absent, is not an array,
/// differs in length from the label series, or has an element without a numeric value.
pub fn normalize(payload: &RawMetricsPayload) -> Result<NormalizedSeries, LoadError> {
    let label_items = series_items(payload, LABEL_SERIES)?;
    let labels = label_items
        .iter()
        .enumerate()
        .map(|(index, item)| match item.get(LABEL_FIELD) {
            Some(Value::String(label)) => Ok(label.clone()),
            Some(other) => Err(LoadError::data_shape(format!(
                "'{LABEL_SERIES}[{index}].{LABEL_FIELD}' is {}, expected a string",
                describe(other)
            ))),
            None => Err(LoadError::data_shape(format!("'{LABEL_SERIES}[{index}]' has no '{LABEL_FIELD}' label"))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(NormalizedSeries {
        invites: extract_values(payload, INVITES, &labels)?,
        attempts: extract_values(payload, ATTEMPTS, &labels)?,
        pass_rate: extract_values(payload, PASS_RATE, &labels)?,
        avg_score: extract_values(payload, AVG_SCORE, &labels)?,
        labels,
    })
}

fn series_items<'a>(payload: &'a RawMetricsPayload, series: &str) -> Result<&'a [Value], LoadError> {
    match payload.get(series) {
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(LoadError::data_shape(format!("series '{series}' is {}, expected an array", describe(other)))),
        None => Err(LoadError::data_shape(format!("series '{series}' is missing"))),
    }
}

fn extract_values(payload: &RawMetricsPayload, field: SeriesField, labels: &[String]) -> Result<Vec<f64>, LoadError> {
    let items = series_items(payload, field.series)?;
    if items.len() != labels.len() {
        return Err(LoadError::data_shape(format!(
            "series '{}' has {} entries but '{LABEL_SERIES}' has {}",
            field.series,
            items.len(),
            labels.len()
        )));
    }

    items
        .iter()
        .zip(labels)
        .enumerate()
        .map(|(index, (item, label))| {
            let Value::Object(entry) = item else {
                return Err(LoadError::data_shape(format!(
                    "'{}[{index}]' is {}, expected an object",
                    field.series,
                    describe(item)
                )));
            };

            // Series other than the label series usually carry no label; when they do it must agree.
            if let Some(own_label) = entry.get(LABEL_FIELD)
                && own_label.as_str() != Some(label.as_str())
            {
                return Err(LoadError::data_shape(format!(
                    "'{}[{index}].{LABEL_FIELD}' is {own_label}, expected \"{label}\"",
                    field.series
                )));
            }

            match entry.get(field.value) {
                Some(Value::Number(n)) => n.as_f64().ok_or_else(|| {
                    LoadError::data_shape(format!("'{}[{index}].{}' is not representable as f64", field.series, field.value))
                }),
                Some(other) => Err(LoadError::data_shape(format!(
                    "'{}[{index}].{}' is {}, expected a number",
                    field.series,
                    field.value,
                    describe(other)
                ))),
                None => Err(LoadError::data_shape(format!(
                    "'{}[{index}]' has no '{}' value",
                    field.series, field.value
                ))),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> RawMetricsPayload {
        let Value::Object(map) = value else {
            panic!("test payload must be an object");
        };
        RawMetricsPayload::new(map)
    }

    fn two_month_payload() -> RawMetricsPayload {
        payload(json!({
            "invite_sent": [{"month": "Jan", "count": 5}, {"month": "Feb", "count": 9}],
            "test_attempted": [{"count": 3}, {"count": 7}],
            "pass_rate": [{"rate": 0.8}, {"rate": 0.9}],
            "avg_score": [{"score": 72}, {"score": 81}]
        }))
    }

    #[test]
    fn test_normalize_preserves_order() {
        let series = normalize(&two_month_payload()).unwrap();
        assert_eq!(
            series,
            NormalizedSeries {
                labels: vec!["Jan".to_string(), "Feb".to_string()],
                invites: vec![5.0, 9.0],
                attempts: vec![3.0, 7.0],
                pass_rate: vec![0.8, 0.9],
                avg_score: vec![72.0, 81.0],
            }
        );
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn test_normalize_empty_series() {
        let series = normalize(&payload(json!({
            "invite_sent": [],
            "test_attempted": [],
            "pass_rate": [],
            "avg_score": []
        })))
        .unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn test_normalize_length_mismatch() {
        let err = normalize(&payload(json!({
            "invite_sent": [{"month": "Jan", "count": 5}, {"month": "Feb", "count": 9}],
            "test_attempted": [{"count": 3}],
            "pass_rate": [{"rate": 0.8}, {"rate": 0.9}],
            "avg_score": [{"score": 72}, {"score": 81}]
        })))
        .unwrap_err();
        assert!(matches!(err, LoadError::DataShape(_)));
        assert!(err.to_string().contains("test_attempted"), "got: {err}");
    }

    #[test]
    fn test_normalize_longer_trailing_series() {
        let err = normalize(&payload(json!({
            "invite_sent": [{"month": "Jan", "count": 5}],
            "test_attempted": [{"count": 3}],
            "pass_rate": [{"rate": 0.8}],
            "avg_score": [{"score": 72}, {"score": 81}]
        })))
        .unwrap_err();
        assert!(err.to_string().contains("avg_score"), "got: {err}");
    }

    #[test]
    fn test_normalize_missing_series() {
        let err = normalize(&payload(json!({
            "invite_sent": [{"month": "Jan", "count": 5}],
            "test_attempted": [{"count": 3}],
            "avg_score": [{"score": 72}]
        })))
        .unwrap_err();
        assert!(err.to_string().contains("pass_rate"), "got: {err}");
    }

    #[test]
    fn test_normalize_series_not_array() {
        let err = normalize(&payload(json!({
            "invite_sent": {"month": "Jan", "count": 5},
            "test_attempted": [],
            "pass_rate": [],
            "avg_score": []
        })))
        .unwrap_err();
        assert!(matches!(err, LoadError::DataShape(_)));
    }

    #[test]
    fn test_normalize_missing_label() {
        let err = normalize(&payload(json!({
            "invite_sent": [{"count": 5}],
            "test_attempted": [{"count": 3}],
            "pass_rate": [{"rate": 0.8}],
            "avg_score": [{"score": 72}]
        })))
        .unwrap_err();
        assert!(err.to_string().contains("month"), "got: {err}");
    }

    #[test]
    fn test_normalize_non_numeric_value() {
        let err = normalize(&payload(json!({
            "invite_sent": [{"month": "Jan", "count": 5}],
            "test_attempted": [{"count": "3"}],
            "pass_rate": [{"rate": 0.8}],
            "avg_score": [{"score": 72}]
        })))
        .unwrap_err();
        assert!(err.to_string().contains("expected a number"), "got: {err}");
    }

    #[test]
    fn test_normalize_null_value() {
        let err = normalize(&payload(json!({
            "invite_sent": [{"month": "Jan", "count": 5}],
            "test_attempted": [{"count": 3}],
            "pass_rate": [{"rate": null}],
            "avg_score": [{"score": 72}]
        })))
        .unwrap_err();
        assert!(matches!(err, LoadError::DataShape(_)));
    }

    #[test]
    fn test_normalize_element_not_object() {
        let err = normalize(&payload(json!({
            "invite_sent": [{"month": "Jan", "count": 5}],
            "test_attempted": [3],
            "pass_rate": [{"rate": 0.8}],
            "avg_score": [{"score": 72}]
        })))
        .unwrap_err();
        assert!(err.to_string().contains("expected an object"), "got: {err}");
    }

    #[test]
    fn test_normalize_matching_secondary_labels_are_accepted() {
        let series = normalize(&payload(json!({
            "invite_sent": [{"month": "Jan", "count": 5}],
            "test_attempted": [{"month": "Jan", "count": 3}],
            "pass_rate": [{"month": "Jan", "rate": 0.8}],
            "avg_score": [{"month": "Jan", "score": 72}]
        })))
        .unwrap();
        assert_eq!(series.labels, vec!["Jan".to_string()]);
    }

    #[test]
    fn test_normalize_mismatched_secondary_label() {
        let err = normalize(&payload(json!({
            "invite_sent": [{"month": "Jan", "count": 5}],
            "test_attempted": [{"month": "Feb", "count": 3}],
            "pass_rate": [{"rate": 0.8}],
            "avg_score": [{"score": 72}]
        })))
        .unwrap_err();
        assert!(err.to_string().contains("test_attempted[0].month"), "got: {err}");
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let series = normalize(&two_month_payload()).unwrap();
        let value = serde_json::to_value(&series).unwrap();
        assert_eq!(value["passRate"], json!([0.8, 0.9]));
        assert_eq!(value["avgScore"], json!([72.0, 81.0]));
        assert_eq!(value["labels"], json!(["Jan", "Feb"]));
    }
}
