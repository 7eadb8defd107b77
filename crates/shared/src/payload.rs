//! The loosely-typed analysis payload returned by the backend.
//!
//! Every field is optional. Renderers go through [`FieldValue`] so the
//! "Not Mentioned" fallback is applied the same way everywhere.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Placeholder shown for any field the backend left out.
pub const NOT_MENTIONED: &str = "Not Mentioned";

/// A labelled group of known top-level payload fields.
#[derive(Debug, Clone, Copy)]
pub struct FieldGroup {
    pub title: &'static str,
    /// (payload key, display label)
    pub fields: &'static [(&'static str, &'static str)],
}

pub const GENERAL_INFO: FieldGroup = FieldGroup {
    title: "General Information",
    fields: &[
        ("issuing_agency", "Issuing Agency"),
        ("jurisdiction_level", "Jurisdiction Level"),
        ("permit_type", "Permit Type"),
        ("status", "Status"),
    ],
};

pub const CONTACT_INFO: FieldGroup = FieldGroup {
    title: "Contact Information",
    fields: &[
        ("permittee_legal_name", "Permittee Legal Name"),
        ("operator_name", "Operator Name"),
        ("contact_person_name", "Contact Person"),
        ("contact_email", "Email"),
        ("contact_phone", "Phone"),
    ],
};

pub const PROJECT_DETAILS: FieldGroup = FieldGroup {
    title: "Project Details",
    fields: &[
        ("project_name", "Project Name"),
        ("site_description", "Site Description"),
        ("municipality", "Municipality"),
        ("country", "Country"),
        ("resource_type", "Resource Type"),
        ("fuel_type", "Fuel Type"),
    ],
};

/// Analysis result for one uploaded document.
///
/// Wraps the raw JSON object so unknown keys survive the trip to the chat
/// endpoint untouched. Key order follows the backend response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisPayload(Map<String, Value>);

impl AnalysisPayload {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Only JSON objects are payloads.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn field(&self, key: &str) -> FieldValue {
        FieldValue::from_json(self.0.get(key))
    }

    pub fn status(&self) -> Option<&str> {
        self.0.get("status").and_then(Value::as_str)
    }

    /// Per-mode results in response order. Non-object entries are skipped.
    pub fn analysis_modes(&self) -> Vec<(String, ModeAnalysis)> {
        match self.0.get("analysis_modes") {
            Some(Value::Object(modes)) => modes
                .iter()
                .filter_map(|(key, value)| {
                    ModeAnalysis::from_json(value).map(|mode| (key.clone(), mode))
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// One entry of `analysis_modes`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModeAnalysis {
    pub summary: String,
    /// Rows are assumed to share the first row's keys.
    pub table: Vec<Map<String, Value>>,
    pub notes: Vec<String>,
}

impl ModeAnalysis {
    pub fn from_json(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;

        let summary = match obj.get("summary") {
            None | Some(Value::Null) => String::new(),
            Some(v) => cell_text(v),
        };

        let table = obj
            .get("table")
            .and_then(Value::as_array)
            .map(|rows| {
                rows.iter()
                    .filter_map(|row| row.as_object().cloned())
                    .collect()
            })
            .unwrap_or_default();

        let notes = obj
            .get("notes")
            .and_then(Value::as_array)
            .map(|notes| notes.iter().map(cell_text).collect())
            .unwrap_or_default();

        Some(Self {
            summary,
            table,
            notes,
        })
    }

    /// Column headers, taken from the first row.
    pub fn headers(&self) -> Vec<String> {
        self.table
            .first()
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Display text for every row, in each row's own value order.
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.table
            .iter()
            .map(|row| row.values().map(cell_text).collect())
            .collect()
    }
}

/// Section heading for a mode key: `legal-review` becomes `LEGAL REVIEW`.
pub fn mode_title(key: &str) -> String {
    key.replace('-', " ").to_uppercase()
}

/// Flatten a JSON value into displayable text.
///
/// Strings are shown raw; anything structured is serialised rather than
/// rendered recursively.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

/// How a single known field should be displayed.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    /// One badge per array element.
    Tags(Vec<String>),
    NotMentioned,
}

impl FieldValue {
    /// Empty strings, `false`, zero, null, empty arrays and absent keys are
    /// all "not mentioned".
    pub fn from_json(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => FieldValue::NotMentioned,
            Some(Value::String(s)) if s.is_empty() => FieldValue::NotMentioned,
            Some(Value::Bool(false)) => FieldValue::NotMentioned,
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => FieldValue::NotMentioned,
            Some(Value::Array(items)) if items.is_empty() => FieldValue::NotMentioned,
            Some(Value::Array(items)) => FieldValue::Tags(items.iter().map(cell_text).collect()),
            Some(other) => FieldValue::Text(cell_text(other)),
        }
    }

    pub fn is_mentioned(&self) -> bool {
        !matches!(self, FieldValue::NotMentioned)
    }

    /// Single-line text form; tags are joined with `", "`.
    pub fn display(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Tags(tags) => tags.join(", "),
            FieldValue::NotMentioned => NOT_MENTIONED.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> AnalysisPayload {
        AnalysisPayload::from_value(value).unwrap()
    }

    #[test]
    fn test_booleans_render_as_text_or_not_mentioned() {
        assert_eq!(FieldValue::from_json(Some(&json!(true))), FieldValue::Text("true".to_string()));
        assert_eq!(FieldValue::from_json(Some(&json!(false))), FieldValue::NotMentioned);
    }

    #[test]
    fn test_absent_fields_are_not_mentioned() {
        let p = payload(json!({ "issuing_agency": "", "status": null, "country": 0 }));
        for group in [GENERAL_INFO, CONTACT_INFO, PROJECT_DETAILS] {
            for (key, _) in group.fields {
                let value = p.field(key);
                assert_eq!(value, FieldValue::NotMentioned, "{key}");
                assert_eq!(value.display(), "Not Mentioned");
            }
        }
    }

    #[test]
    fn test_array_fields_become_tags() {
        let p = payload(json!({ "resource_type": ["Solar", "Storage", 3] }));
        assert_eq!(
            p.field("resource_type"),
            FieldValue::Tags(vec!["Solar".into(), "Storage".into(), "3".into()])
        );
        assert_eq!(p.field("resource_type").display(), "Solar, Storage, 3");
        assert_eq!(p.field("fuel_type"), FieldValue::NotMentioned);
        assert_eq!(
            payload(json!({ "fuel_type": [] })).field("fuel_type"),
            FieldValue::NotMentioned
        );
    }

    #[test]
    fn test_scalar_fields() {
        let p = payload(json!({ "status": "Issued", "country": "US", "municipality": 42 }));
        assert_eq!(p.field("country"), FieldValue::Text("US".into()));
        assert_eq!(p.field("municipality"), FieldValue::Text("42".into()));
        assert_eq!(p.status(), Some("Issued"));
    }

    #[test]
    fn test_analysis_modes_keep_response_order() {
        let p = payload(json!({
            "analysis_modes": {
                "renewal-timeline": { "summary": "Dates" },
                "data-parsing": { "summary": "Fields" },
                "broken": "not an object",
                "legal-review": {
                    "summary": "Flag risk",
                    "table": [{ "Clause": "A", "Risk": "High" }],
                    "notes": ["Check indemnity"]
                }
            }
        }));

        let modes = p.analysis_modes();
        let keys: Vec<&str> = modes.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["renewal-timeline", "data-parsing", "legal-review"]);

        let legal = &modes[2].1;
        assert_eq!(legal.summary, "Flag risk");
        assert_eq!(legal.headers(), ["Clause", "Risk"]);
        assert_eq!(legal.rows(), vec![vec!["A".to_string(), "High".to_string()]]);
        assert_eq!(legal.notes, ["Check indemnity"]);
    }

    #[test]
    fn test_structured_cells_are_serialised() {
        let mode = ModeAnalysis::from_json(&json!({
            "table": [{ "Party": { "name": "Acme" }, "Phases": ["Build", "Operate"], "Due": null }]
        }))
        .unwrap();
        assert_eq!(mode.summary, "");
        assert_eq!(
            mode.rows()[0],
            [r#"{"name":"Acme"}"#, r#"["Build","Operate"]"#, "null"]
        );
    }

    #[test]
    fn test_mode_title() {
        assert_eq!(mode_title("legal-review"), "LEGAL REVIEW");
        assert_eq!(mode_title("obligations-matrix"), "OBLIGATIONS MATRIX");
    }

    #[test]
    fn test_non_object_is_not_a_payload() {
        assert!(AnalysisPayload::from_value(json!([1, 2])).is_none());
        assert!(AnalysisPayload::from_value(json!("x")).is_none());
    }
}
