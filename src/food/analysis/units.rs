/// Converts an (amount, unit) pair to milligrams. Unknown or empty units
/// are treated as already being milligrams rather than rejected.
pub fn to_milligrams(amount: f64, unit: &str) -> f64 {
    match unit.to_lowercase().as_str() {
        "g" | "gram" | "grams" => amount * 1000.0,
        "mg" | "milligram" | "milligrams" => amount,
        _ => amount,
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grams_convert_to_milligrams() {
        for unit in ["g", "G", "gram", "Grams", "GRAMS"] {
            assert_eq!(to_milligrams(2.5, unit), 2500.0);
        }
    }

    #[test]
    fn milligrams_pass_through() {
        for unit in ["mg", "Mg", "milligram", "MILLIGRAMS"] {
            assert_eq!(to_milligrams(42.0, unit), 42.0);
        }
    }

    #[test]
    fn unknown_units_default_to_milligrams() {
        assert_eq!(to_milligrams(7.0, ""), 7.0);
        assert_eq!(to_milligrams(7.0, "IU"), 7.0);
        assert_eq!(to_milligrams(7.0, "kcal"), 7.0);
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(round2(1.005 * 1000.0), 1005.0);
        assert_eq!(round2(48.644999), 48.64);
        assert_eq!(round2(3.9), 3.9);
    }
}
