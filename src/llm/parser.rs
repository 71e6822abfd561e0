use serde_json::Value;

/// Consultation fields recovered from a model reply. Missing keys default
/// to empty rather than failing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedConsult {
    pub summary: String,
    pub meal_plan: Vec<Value>,
    pub advice: String,
}

/// Best-effort extraction of the JSON object embedded in free-form model
/// output: the span between the first `{` and the last `}` is parsed as
/// JSON, and anything else degrades to a plain-text summary. Never fails,
/// whatever the model sent back.
pub fn extract_consult(text: &str) -> ParsedConsult {
    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if start < end {
            if let Ok(parsed) = serde_json::from_str::<Value>(&text[start..=end]) {
                return ParsedConsult {
                    summary: field_str(&parsed, "summary"),
                    meal_plan: parsed
                        .get("meal_plan")
                        .and_then(|m| m.as_array())
                        .cloned()
                        .unwrap_or_default(),
                    advice: field_str(&parsed, "advice"),
                };
            }
        }
    }

    ParsedConsult {
        summary: text.trim().to_string(),
        meal_plan: Vec::new(),
        advice: String::new(),
    }
}

fn field_str(parsed: &Value, key: &str) -> String {
    parsed
        .get(key)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_embedded_json() {
        let text = r#"Here you go: {"summary":"ok","meal_plan":[],"advice":"drink water"} thanks"#;
        let parsed = extract_consult(text);
        assert_eq!(parsed.summary, "ok");
        assert!(parsed.meal_plan.is_empty());
        assert_eq!(parsed.advice, "drink water");
    }

    #[test]
    fn keeps_meal_plan_entries_verbatim() {
        let text = r#"{"summary":"s","meal_plan":[{"meal":"Breakfast","name":"Oats bowl","items":["oats","milk"]}],"advice":"a"}"#;
        let parsed = extract_consult(text);
        assert_eq!(parsed.meal_plan.len(), 1);
        assert_eq!(parsed.meal_plan[0]["meal"], json!("Breakfast"));
        assert_eq!(parsed.meal_plan[0]["items"][1], json!("milk"));
    }

    #[test]
    fn missing_keys_default_to_empty() {
        let parsed = extract_consult(r#"{"summary":"only summary"}"#);
        assert_eq!(parsed.summary, "only summary");
        assert!(parsed.meal_plan.is_empty());
        assert_eq!(parsed.advice, "");
    }

    #[test]
    fn text_without_braces_becomes_the_summary() {
        let parsed = extract_consult("  Eat more vegetables.  \n");
        assert_eq!(parsed.summary, "Eat more vegetables.");
        assert!(parsed.meal_plan.is_empty());
        assert_eq!(parsed.advice, "");
    }

    #[test]
    fn unparseable_brace_span_falls_back_to_text() {
        let parsed = extract_consult("model said {this is not json} sorry");
        assert_eq!(parsed.summary, "model said {this is not json} sorry");
        assert!(parsed.meal_plan.is_empty());
    }

    #[test]
    fn reversed_braces_fall_back_to_text() {
        let parsed = extract_consult("} nothing here {");
        assert_eq!(parsed.summary, "} nothing here {");
    }
}
