//! JSON reporter
//!
//! Serializes the full `AnalysisResult` with a small metadata envelope
//! (generation timestamp and crate version). Useful for machine consumption
//! or piping to jq.

use crate::models::AnalysisResult;
use anyhow::Result;
use serde_json::{json, Map, Value};

fn metadata() -> Value {
    json!({
        "generated_at": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    })
}

fn result_value(result: &AnalysisResult) -> Result<Map<String, Value>> {
    let Value::Object(mut value) = serde_json::to_value(result)? else {
        anyhow::bail!("analysis result did not serialize to a JSON object");
    };
    value.insert("issues_found".to_string(), json!(result.matches.len()));
    Ok(value)
}

/// Render one result as pretty-printed JSON.
pub fn render(result: &AnalysisResult) -> Result<String> {
    let mut value = result_value(result)?;
    value.insert("metadata".to_string(), metadata());
    Ok(serde_json::to_string_pretty(&Value::Object(value))?)
}

/// Render a batch of named results as a JSON array.
pub fn render_batch(results: &[(String, AnalysisResult)]) -> Result<String> {
    let entries = results
        .iter()
        .map(|(name, result)| {
            let mut value = result_value(result)?;
            value.insert("filename".to_string(), json!(name));
            Ok(Value::Object(value))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(serde_json::to_string_pretty(&json!({
        "metadata": metadata(),
        "results": entries,
    }))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::sample_result;

    #[test]
    fn render_produces_valid_json() {
        let out = render(&sample_result()).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("parse JSON");
        assert_eq!(parsed["grade"], "Poor");
        assert_eq!(parsed["issues_found"], 2);
        assert!(parsed["overall_score"].is_number());
        assert!(parsed["metadata"]["generated_at"].is_string());
        assert!(parsed["category_scores"]["gender-coded"]["score"].is_number());
    }

    #[test]
    fn input_text_is_not_serialized() {
        let out = render(&sample_result()).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("parse JSON");
        assert!(parsed.get("text").is_none());
    }

    #[test]
    fn batch_render_includes_filenames() {
        let results = vec![
            ("a.txt".to_string(), sample_result()),
            ("b.txt".to_string(), sample_result()),
        ];
        let out = render_batch(&results).expect("render batch JSON");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("parse JSON");
        let entries = parsed["results"].as_array().expect("results array");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["filename"], "a.txt");
        assert_eq!(entries[1]["filename"], "b.txt");
    }
}
