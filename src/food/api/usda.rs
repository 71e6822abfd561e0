use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// One nutrient reading from a food record, per 100 g of the food.
#[derive(Debug, Clone)]
pub struct NutrientEntry {
    pub name: String,
    pub value: f64,
    pub unit: String,
}

#[derive(Debug, Error)]
pub enum UsdaError {
    #[error("food search request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("food search returned status {0}")]
    Status(reqwest::StatusCode),
}

#[derive(Debug, Clone)]
pub struct UsdaClient {
    api_key: String,
    base_url: String,
    client: Client,
}

impl UsdaClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: "https://api.nal.usda.gov/fdc/v1".to_string(),
            client: Client::new(),
        }
    }

    /// Searches FoodData Central and returns the nutrient list of the first
    /// match only. An empty vec means the query found nothing usable;
    /// entries with a missing name or value are skipped.
    pub async fn search_nutrients(&self, query: &str) -> Result<Vec<NutrientEntry>, UsdaError> {
        let url = format!("{}/foods/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(10))
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("query", query),
                ("pageSize", "1"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(UsdaError::Status(response.status()));
        }

        let data: Value = response.json().await?;

        let mut entries = Vec::new();
        let food = match data
            .get("foods")
            .and_then(|f| f.as_array())
            .and_then(|f| f.first())
        {
            Some(food) => food,
            None => return Ok(entries),
        };

        if let Some(nutrients) = food.get("foodNutrients").and_then(|n| n.as_array()) {
            for nutrient in nutrients {
                let name = nutrient
                    .get("nutrientName")
                    .and_then(|n| n.as_str())
                    .or_else(|| nutrient.get("name").and_then(|n| n.as_str()));
                let value = nutrient.get("value").and_then(|v| {
                    v.as_f64()
                        .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
                });
                if let (Some(name), Some(value)) = (name, value) {
                    let unit = nutrient
                        .get("unitName")
                        .and_then(|u| u.as_str())
                        .or_else(|| nutrient.get("unit").and_then(|u| u.as_str()))
                        .unwrap_or("");
                    entries.push(NutrientEntry {
                        name: name.trim().to_string(),
                        value,
                        unit: unit.to_string(),
                    });
                }
            }
        }

        Ok(entries)
    }
}
