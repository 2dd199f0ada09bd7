use super::catalog;

/// Map a free-text classification label to a canonical catalog key.
///
/// First catalog key (in declared order) found as a substring of the
/// lowercased label wins; compound labels like "bread sandwich" therefore
/// resolve to whichever key is declared first. With no match the first
/// whitespace token stands in as the key; an empty label resolves to
/// `default`.
pub fn resolve(raw_label: &str) -> String {
    let label = raw_label.to_lowercase();

    for key in catalog::keys() {
        if label.contains(key) {
            return key.to_string();
        }
    }

    label
        .split_whitespace()
        .next()
        .unwrap_or(catalog::DEFAULT_KEY)
        .to_string()
}
