use super::aggregate::NutrientTotals;
use super::nutrients::Nutrient;
use super::units::round2;

/// Intake below this fraction of the adjusted baseline counts as deficient.
const DEFICIENCY_THRESHOLD: f64 = 0.6;

const UNDERWEIGHT_FACTOR: f64 = 1.10;
const OVERWEIGHT_FACTOR: f64 = 0.90;

/// Daily baseline before BMI adjustment, in the unit each nutrient is
/// reported in (grams for Protein/Fiber, milligrams otherwise).
fn baseline_for(nutrient: Nutrient, gender: &str) -> f64 {
    match nutrient {
        Nutrient::Protein => 50.0,
        Nutrient::VitaminC => 90.0,
        Nutrient::Iron => {
            if gender.eq_ignore_ascii_case("female") {
                18.0
            } else {
                8.0
            }
        }
        Nutrient::Calcium => 1000.0,
        Nutrient::Fiber => 30.0,
    }
}

/// Body mass index; a non-positive height yields 0, meaning no adjustment.
pub fn bmi(height_cm: f64, weight_kg: f64) -> f64 {
    if height_cm <= 0.0 {
        return 0.0;
    }
    let meters = height_cm / 100.0;
    weight_kg / (meters * meters)
}

fn adjustment_factor(bmi: f64) -> f64 {
    if bmi > 0.0 && bmi < 18.5 {
        UNDERWEIGHT_FACTOR
    } else if bmi > 25.0 {
        OVERWEIGHT_FACTOR
    } else {
        1.0
    }
}

/// Flags every accumulated nutrient whose total falls strictly below 60% of
/// its adjusted baseline. Returns (nutrient, rendered shortfall) pairs in
/// canonical order; sufficient nutrients are absent from the result.
pub fn score_deficiencies(
    totals: &NutrientTotals,
    gender: &str,
    height_cm: f64,
    weight_kg: f64,
) -> Vec<(Nutrient, String)> {
    let factor = adjustment_factor(bmi(height_cm, weight_kg));

    let mut deficiencies = Vec::new();
    for nutrient in Nutrient::ALL {
        let have_mg = match totals.get(&nutrient) {
            Some(&mg) => mg,
            None => continue,
        };
        let baseline = baseline_for(nutrient, gender) * factor;
        let baseline_mg = if nutrient.reports_in_grams() {
            baseline * 1000.0
        } else {
            baseline
        };
        if have_mg < baseline_mg * DEFICIENCY_THRESHOLD {
            let shortfall_mg = baseline_mg - have_mg;
            let display = if nutrient.reports_in_grams() {
                format!("{} g", round2(shortfall_mg / 1000.0))
            } else {
                format!("{} mg", round2(shortfall_mg))
            };
            deficiencies.push((nutrient, display));
        }
    }
    deficiencies
}
