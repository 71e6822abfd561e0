use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::parser::extract_consult;
use crate::providers::traits::CompletionProvider;
use crate::weather::WeatherSnapshot;

/// Profile fields echoed into the consultation prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub age: i64,
    pub gender: String,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity: String,
}

/// Narrative consultation assembled from a model reply. `meal_plan`
/// entries pass through as the model produced them.
#[derive(Debug, Clone, Serialize)]
pub struct ConsultationResult {
    pub summary: String,
    pub meal_plan: Vec<Value>,
    pub advice: String,
    pub raw: String,
}

/// Serializes the analysis into the instruction block for the model.
/// Totals and deficiencies arrive pre-rendered as display strings, exactly
/// as `/analyze` returned them.
pub fn build_consult_prompt(
    profile: &Profile,
    totals: &[(String, String)],
    deficiencies: &[(String, String)],
    weather: Option<&WeatherSnapshot>,
    lang: &str,
) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push("You are a professional, evidence-based dietitian assistant.".to_string());
    lines.push("Produce a short personalized diet consultation in the requested language.".to_string());
    lines.push(String::new());
    lines.push("USER PROFILE:".to_string());
    lines.push(format!("- age: {}", profile.age));
    lines.push(format!("- gender: {}", profile.gender));
    lines.push(format!("- height_cm: {}", profile.height_cm));
    lines.push(format!("- weight_kg: {}", profile.weight_kg));
    if !profile.activity.is_empty() {
        lines.push(format!("- activity level: {}", profile.activity));
    }
    lines.push(String::new());
    if let Some(weather) = weather {
        lines.push("CURRENT WEATHER:".to_string());
        lines.push(format!("- condition: {}", weather.condition));
        lines.push(format!("- temp_c: {}", weather.temp));
        lines.push(format!("- humidity: {}", weather.humidity));
        lines.push(String::new());
    }
    lines.push("TOTAL NUTRIENTS (from provided foods):".to_string());
    if totals.is_empty() {
        lines.push("- (no nutrient totals provided)".to_string());
    } else {
        for (name, amount) in totals {
            lines.push(format!("- {}: {}", name, amount));
        }
    }
    lines.push(String::new());
    lines.push("DEFICIENCIES (calculated):".to_string());
    if deficiencies.is_empty() {
        lines.push("- (no deficiencies detected)".to_string());
    } else {
        for (name, amount) in deficiencies {
            lines.push(format!("- {}: need {} more", name, amount));
        }
    }
    lines.push(String::new());
    lines.push("TASK:".to_string());
    lines.push("1) Give a 2-3 sentence summary of the user's situation.".to_string());
    lines.push("2) Provide a 3-meal sample meal plan for today (breakfast, lunch, dinner) with portions.".to_string());
    lines.push("3) For each deficient nutrient, list 1-2 food swaps or additions and approximate portion sizes.".to_string());
    lines.push("4) Provide brief general advice (hydration, timing, and any safety note).".to_string());
    lines.push("5) Output in JSON only with keys: summary (string), meal_plan (list of {meal,name,items}), advice (string).".to_string());
    if !lang.is_empty() && lang != "en" {
        lines.push(format!("Respond in the following language: {}", lang));
    }
    lines.push(String::new());
    lines.push("Return JSON only. Example:".to_string());
    lines.push(
        r#"{"summary":"...", "meal_plan":[{"meal":"Breakfast","name":"Oats bowl","items":["..."]}], "advice":"..."}"#
            .to_string(),
    );
    lines.join("\n")
}

/// Shorter prompt for open-ended chat: the same nutrition context followed
/// by the user's question.
pub fn build_chat_prompt(message: &str, analysis: Option<&Value>, lang: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push("You are a helpful and friendly AI Dietician Assistant.".to_string());
    lines.push("Your goal is to answer user questions about their nutrition, suggest meals, and provide advice based on their specific dietary analysis.".to_string());
    lines.push("Use the provided nutrition analysis as the primary context for your answers.".to_string());
    lines.push("\n--- NUTRITION ANALYSIS CONTEXT ---".to_string());
    if let Some(totals) = section(analysis, "total_nutrients") {
        lines.push("\n[Total Nutrients]".to_string());
        for (name, amount) in totals {
            lines.push(format!("- {}: {}", name, display_value(amount)));
        }
    }
    if let Some(deficient) = section(analysis, "deficient") {
        lines.push("\n[Deficient Nutrients]".to_string());
        for (name, amount) in deficient {
            lines.push(format!("- {}: need {} more", name, display_value(amount)));
        }
    }
    lines.push("\n--- END CONTEXT ---".to_string());
    lines.push("\nNow, please answer the user's question concisely and helpfully.".to_string());
    if !lang.is_empty() && lang != "en" {
        lines.push(format!("Respond in the following language: {}", lang));
    }
    lines.push(format!("\nUser says: \"{}\"", message));
    lines.join("\n")
}

fn section<'a>(
    analysis: Option<&'a Value>,
    key: &str,
) -> Option<&'a serde_json::Map<String, Value>> {
    analysis
        .and_then(|a| a.get(key))
        .and_then(|v| v.as_object())
        .filter(|m| !m.is_empty())
}

/// Renders a JSON value the way it should read inside a prompt line:
/// strings lose their quotes, everything else keeps its JSON form.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Builds the consultation prompt, calls the provider and recovers a
/// structured result from whatever text came back.
pub async fn run_consultation(
    provider: &dyn CompletionProvider,
    profile: &Profile,
    totals: &[(String, String)],
    deficiencies: &[(String, String)],
    weather: Option<&WeatherSnapshot>,
    lang: &str,
) -> Result<ConsultationResult> {
    let prompt = build_consult_prompt(profile, totals, deficiencies, weather, lang);
    log::debug!("Consultation prompt for model {}", provider.model_name());
    let raw = provider.complete(&prompt).await?;
    let parsed = extract_consult(&raw);
    Ok(ConsultationResult {
        summary: parsed.summary,
        meal_plan: parsed.meal_plan,
        advice: parsed.advice,
        raw,
    })
}

pub async fn run_chat(
    provider: &dyn CompletionProvider,
    message: &str,
    analysis: Option<&Value>,
    lang: &str,
) -> Result<String> {
    let prompt = build_chat_prompt(message, analysis, lang);
    provider.complete(&prompt).await
}
