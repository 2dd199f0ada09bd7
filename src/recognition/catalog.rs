use serde::{Deserialize, Serialize};

/// Macro-nutrient values for one serving: kilocalories plus grams of
/// protein, carbs and fats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroQuantities {
    pub calories: u32,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

const fn macros(calories: u32, protein: f64, carbs: f64, fats: f64) -> MacroQuantities {
    MacroQuantities {
        calories,
        protein,
        carbs,
        fats,
    }
}

pub const DEFAULT_KEY: &str = "default";

/// Returned whenever a key has no catalog entry.
pub const DEFAULT_MACROS: MacroQuantities = macros(150, 5.0, 20.0, 5.0);

// Declaration order doubles as the resolver's match order.
const ENTRIES: &[(&str, MacroQuantities)] = &[
    ("banana", macros(89, 1.1, 23.0, 0.3)),
    ("apple", macros(52, 0.3, 14.0, 0.2)),
    ("orange", macros(47, 0.9, 12.0, 0.1)),
    ("pizza", macros(266, 11.0, 33.0, 10.0)),
    ("burger", macros(354, 16.0, 35.0, 18.0)),
    ("salad", macros(33, 3.0, 6.0, 0.3)),
    ("chicken", macros(165, 31.0, 0.0, 3.6)),
    ("bread", macros(265, 9.0, 49.0, 3.2)),
    ("rice", macros(130, 2.7, 28.0, 0.3)),
    ("pasta", macros(131, 5.0, 25.0, 1.1)),
    ("sandwich", macros(200, 8.0, 30.0, 6.0)),
    ("egg", macros(155, 13.0, 1.1, 11.0)),
];

/// Exact-match lookup, total over all inputs: unknown keys get the default
/// quadruple. Fuzzy matching belongs to the resolver, not here.
pub fn lookup(key: &str) -> MacroQuantities {
    ENTRIES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, m)| *m)
        .unwrap_or(DEFAULT_MACROS)
}

/// Canonical keys in declared order, `default` excluded.
pub fn keys() -> impl Iterator<Item = &'static str> {
    ENTRIES.iter().map(|(k, _)| *k)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_key_returns_its_entry() {
        assert_eq!(lookup("apple"), macros(52, 0.3, 14.0, 0.2));
        assert_eq!(lookup("egg"), macros(155, 13.0, 1.1, 11.0));
    }

    #[test]
    fn unknown_key_returns_default() {
        assert_eq!(lookup("durian"), DEFAULT_MACROS);
        assert_eq!(lookup(""), DEFAULT_MACROS);
        assert_eq!(lookup("default"), DEFAULT_MACROS);
    }

    #[test]
    fn default_quadruple_is_fixed() {
        assert_eq!(DEFAULT_MACROS, macros(150, 5.0, 20.0, 5.0));
    }

    #[test]
    fn keys_keep_declared_order_and_exclude_default() {
        let keys: Vec<_> = keys().collect();
        assert_eq!(keys.first(), Some(&"banana"));
        assert_eq!(keys.last(), Some(&"egg"));
        assert!(!keys.contains(&DEFAULT_KEY));
    }
}
