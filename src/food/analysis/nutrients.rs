use std::fmt;

/// The five nutrients the analyzer tracks. Everything else returned by the
/// food database is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nutrient {
    Protein,
    VitaminC,
    Iron,
    Calcium,
    Fiber,
}

/// Substring rules mapping a free-text nutrient name to a tracked nutrient.
/// First matching row wins.
const NUTRIENT_KEY_MAP: &[(Nutrient, &[&str])] = &[
    (Nutrient::Protein, &["protein"]),
    (Nutrient::VitaminC, &["vitamin c", "ascorbic acid"]),
    (Nutrient::Iron, &["iron"]),
    (Nutrient::Calcium, &["calcium"]),
    (Nutrient::Fiber, &["fiber", "dietary fiber"]),
];

impl Nutrient {
    /// Canonical table order, used everywhere totals and deficiencies are
    /// iterated for output.
    pub const ALL: [Nutrient; 5] = [
        Nutrient::Protein,
        Nutrient::VitaminC,
        Nutrient::Iron,
        Nutrient::Calcium,
        Nutrient::Fiber,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Nutrient::Protein => "Protein",
            Nutrient::VitaminC => "Vitamin C",
            Nutrient::Iron => "Iron",
            Nutrient::Calcium => "Calcium",
            Nutrient::Fiber => "Fiber",
        }
    }

    /// Protein and Fiber are displayed in grams, the rest in milligrams.
    pub fn reports_in_grams(self) -> bool {
        matches!(self, Nutrient::Protein | Nutrient::Fiber)
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Maps a nutrient name as the food database spells it (for example
/// "Vitamin C, total ascorbic acid") to a tracked nutrient, or None when
/// the nutrient is not one we follow.
pub fn match_nutrient(raw_name: &str) -> Option<Nutrient> {
    let low = raw_name.to_lowercase();
    for (nutrient, substrings) in NUTRIENT_KEY_MAP {
        if substrings.iter().any(|s| low.contains(s)) {
            return Some(*nutrient);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_usda_spellings() {
        assert_eq!(
            match_nutrient("Vitamin C, total ascorbic acid"),
            Some(Nutrient::VitaminC)
        );
        assert_eq!(match_nutrient("ascorbic acid content"), Some(Nutrient::VitaminC));
        assert_eq!(match_nutrient("Fiber, total dietary"), Some(Nutrient::Fiber));
        assert_eq!(match_nutrient("Iron, Fe"), Some(Nutrient::Iron));
        assert_eq!(match_nutrient("Calcium, Ca"), Some(Nutrient::Calcium));
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(match_nutrient("PROTEIN"), Some(Nutrient::Protein));
        assert_eq!(match_nutrient("Dietary Fiber"), Some(Nutrient::Fiber));
    }

    #[test]
    fn untracked_nutrients_are_dropped() {
        assert_eq!(match_nutrient("Potassium, K"), None);
        assert_eq!(match_nutrient("Total lipid (fat)"), None);
        assert_eq!(match_nutrient(""), None);
    }
}
