use serde::Serialize;

use super::nutrients::Nutrient;
use crate::weather::WeatherSnapshot;

/// Fixed food suggestions per nutrient with a typical per-serving amount.
const FOOD_SUGGESTIONS: &[(Nutrient, &[(&str, &str)])] = &[
    (Nutrient::Protein, &[("Chicken", "27 g"), ("Eggs", "13 g"), ("Paneer", "18 g")]),
    (Nutrient::Iron, &[("Spinach", "2.7 mg"), ("Liver", "6.5 mg"), ("Beans", "3.7 mg")]),
    (Nutrient::Calcium, &[("Milk", "120 mg"), ("Curd", "80 mg"), ("Almonds", "75 mg")]),
    (Nutrient::Fiber, &[("Oats", "10 g"), ("Apple", "4.5 g"), ("Carrots", "3 g")]),
    (Nutrient::VitaminC, &[("Orange", "53 mg"), ("Guava", "200 mg"), ("Kiwi", "90 mg")]),
];

const HOT_WEATHER_FOODS: [&str; 2] = ["Cucumber", "Yogurt"];
const COOL_WEATHER_FOODS: [&str; 2] = ["Soup", "Eggs"];

const HOT_WEATHER_CELSIUS: f64 = 30.0;
const MAX_RECOMMENDATIONS: usize = 10;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Recommendation {
    pub food: String,
    pub amount: String,
}

/// Suggests foods for each deficient nutrient plus two weather-conditioned
/// entries, in insertion order with no deduplication or ranking, truncated
/// to at most 10.
pub fn recommend_foods(
    deficient: &[(Nutrient, String)],
    weather: Option<&WeatherSnapshot>,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    for (nutrient, _) in deficient {
        if let Some((_, foods)) = FOOD_SUGGESTIONS.iter().find(|(n, _)| n == nutrient) {
            for (food, amount) in *foods {
                recommendations.push(Recommendation {
                    food: (*food).to_string(),
                    amount: (*amount).to_string(),
                });
            }
        }
    }

    let hot = weather.map_or(false, |w| w.temp > HOT_WEATHER_CELSIUS);
    let weather_foods = if hot { HOT_WEATHER_FOODS } else { COOL_WEATHER_FOODS };
    for food in weather_foods {
        recommendations.push(Recommendation {
            food: food.to_string(),
            amount: "-".to_string(),
        });
    }

    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_deficient() -> Vec<(Nutrient, String)> {
        Nutrient::ALL
            .iter()
            .map(|n| (*n, "1 mg".to_string()))
            .collect()
    }

    fn weather(temp: f64) -> WeatherSnapshot {
        WeatherSnapshot {
            condition: "Clear".to_string(),
            temp,
            humidity: 40,
        }
    }

    #[test]
    fn caps_at_ten_entries() {
        // 5 deficient nutrients x 3 foods + 2 weather foods = 17 candidates
        let recommendations = recommend_foods(&all_deficient(), Some(&weather(35.0)));
        assert_eq!(recommendations.len(), 10);
    }

    #[test]
    fn hot_weather_adds_cucumber_and_yogurt() {
        let deficient = vec![(Nutrient::Protein, "48.35 g".to_string())];
        let recommendations = recommend_foods(&deficient, Some(&weather(30.1)));
        let foods: Vec<&str> = recommendations.iter().map(|r| r.food.as_str()).collect();
        assert_eq!(foods, vec!["Chicken", "Eggs", "Paneer", "Cucumber", "Yogurt"]);
        assert_eq!(recommendations[3].amount, "-");
    }

    #[test]
    fn cool_or_unknown_weather_adds_soup_and_eggs() {
        let deficient = vec![(Nutrient::Calcium, "600 mg".to_string())];

        let cool = recommend_foods(&deficient, Some(&weather(30.0)));
        let foods: Vec<&str> = cool.iter().map(|r| r.food.as_str()).collect();
        assert_eq!(foods, vec!["Milk", "Curd", "Almonds", "Soup", "Eggs"]);

        let unknown = recommend_foods(&deficient, None);
        assert_eq!(unknown[3].food, "Soup");
        assert_eq!(unknown[4].food, "Eggs");
    }

    #[test]
    fn no_deficiencies_still_gets_weather_foods() {
        let recommendations = recommend_foods(&[], Some(&weather(12.0)));
        let foods: Vec<&str> = recommendations.iter().map(|r| r.food.as_str()).collect();
        assert_eq!(foods, vec!["Soup", "Eggs"]);
    }
}
