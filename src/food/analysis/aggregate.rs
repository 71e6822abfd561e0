use std::collections::HashMap;

use super::nutrients::{match_nutrient, Nutrient};
use super::units::{round2, to_milligrams};
use crate::food::api::usda::{NutrientEntry, UsdaClient};

/// One requested food with its quantity in grams.
#[derive(Debug, Clone)]
pub struct FoodItem {
    pub name: String,
    pub qty_grams: f64,
}

/// Accumulated intake per tracked nutrient, in milligrams.
pub type NutrientTotals = HashMap<Nutrient, f64>;

/// Folds one food's nutrient readings into the running totals. Values are
/// per 100 g, so they are scaled by the requested quantity first, then
/// normalized to milligrams.
pub fn fold_food(totals: &mut NutrientTotals, entries: &[NutrientEntry], qty_grams: f64) {
    for entry in entries {
        let nutrient = match match_nutrient(&entry.name) {
            Some(n) => n,
            None => continue,
        };
        let scaled = entry.value * (qty_grams / 100.0);
        *totals.entry(nutrient).or_insert(0.0) += to_milligrams(scaled, &entry.unit);
    }
}

/// Looks up each requested item one at a time and accumulates totals.
/// Items with an empty name, a non-positive quantity or a failed lookup
/// contribute nothing; the analysis carries on with what it has.
pub async fn aggregate_items(usda: &UsdaClient, items: &[FoodItem]) -> NutrientTotals {
    let mut totals = NutrientTotals::new();
    for item in items {
        let name = item.name.trim();
        if name.is_empty() || item.qty_grams <= 0.0 {
            continue;
        }
        match usda.search_nutrients(name).await {
            Ok(entries) => fold_food(&mut totals, &entries, item.qty_grams),
            Err(e) => log::warn!("Skipping food item '{}': {}", name, e),
        }
    }
    totals
}

/// Renders totals as display strings, grams for Protein/Fiber and
/// milligrams for the rest, in canonical order.
pub fn render_totals(totals: &NutrientTotals) -> Vec<(&'static str, String)> {
    let mut rendered = Vec::new();
    for nutrient in Nutrient::ALL {
        if let Some(&mg) = totals.get(&nutrient) {
            let display = if nutrient.reports_in_grams() {
                format!("{} g", round2(mg / 1000.0))
            } else {
                format!("{} mg", round2(mg))
            };
            rendered.push((nutrient.name(), display));
        }
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, value: f64, unit: &str) -> NutrientEntry {
        NutrientEntry {
            name: name.to_string(),
            value,
            unit: unit.to_string(),
        }
    }

    #[test]
    fn scales_per_100g_values_and_converts_units() {
        let entries = vec![
            entry("Protein", 1.1, "G"),
            entry("Calcium, Ca", 5.0, "MG"),
        ];
        let mut totals = NutrientTotals::new();
        fold_food(&mut totals, &entries, 150.0);

        assert!((totals[&Nutrient::Protein] - 1650.0).abs() < 1e-9);
        assert!((totals[&Nutrient::Calcium] - 7.5).abs() < 1e-9);
    }

    #[test]
    fn untracked_entries_contribute_nothing() {
        let entries = vec![entry("Potassium, K", 358.0, "MG"), entry("Energy", 89.0, "KCAL")];
        let mut totals = NutrientTotals::new();
        fold_food(&mut totals, &entries, 100.0);
        assert!(totals.is_empty());
    }

    #[test]
    fn folding_is_linear_in_quantity() {
        let entries = vec![entry("Protein", 1.1, "G"), entry("Iron, Fe", 0.26, "MG")];

        let mut split = NutrientTotals::new();
        fold_food(&mut split, &entries, 60.0);
        fold_food(&mut split, &entries, 90.0);

        let mut combined = NutrientTotals::new();
        fold_food(&mut combined, &entries, 150.0);

        for nutrient in [Nutrient::Protein, Nutrient::Iron] {
            assert!((split[&nutrient] - combined[&nutrient]).abs() < 1e-9);
        }
    }

    #[test]
    fn renders_grams_for_protein_and_fiber() {
        let mut totals = NutrientTotals::new();
        totals.insert(Nutrient::Protein, 1650.0);
        totals.insert(Nutrient::Fiber, 3900.0);
        totals.insert(Nutrient::Calcium, 7.5);

        let rendered = render_totals(&totals);
        assert_eq!(
            rendered,
            vec![
                ("Protein", "1.65 g".to_string()),
                ("Calcium", "7.5 mg".to_string()),
                ("Fiber", "3.9 g".to_string()),
            ]
        );
    }
}
