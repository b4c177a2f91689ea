//! Age-group label normalization.

use std::collections::BTreeMap;

use crate::models::totals::AgeGroup;

/// Raw spellings seen in published tables, mapped to canonical labels.
const BUILTIN_ALIASES: &[(&str, AgeGroup)] = &[
    ("13&U", AgeGroup::U13),
    ("13&Under", AgeGroup::U13),
    ("13U", AgeGroup::U13),
    ("14-15yo", AgeGroup::U15),
    ("14-15", AgeGroup::U15),
    ("16-17yo", AgeGroup::U17),
    ("16-17", AgeGroup::U17),
    ("18-20yo", AgeGroup::U20),
    ("21-23yo", AgeGroup::U23),
];

/// Maps raw age labels onto [`AgeGroup`].
///
/// Lookup order: built-in aliases, canonical spellings, configured aliases.
/// Anything left over becomes [`AgeGroup::Unmapped`].
#[derive(Debug, Clone, Default)]
pub struct AgeGroupNormalizer {
    extra: BTreeMap<String, AgeGroup>,
}

impl AgeGroupNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add configured raw -> canonical aliases.
    ///
    /// Targets that are not canonical labels are kept as unmapped keys under
    /// the target spelling, which lets a config rename a label it cannot
    /// classify.
    pub fn with_aliases(mut self, aliases: &BTreeMap<String, String>) -> Self {
        for (raw, target) in aliases {
            let group = AgeGroup::from_canonical(target)
                .unwrap_or_else(|| AgeGroup::Unmapped(target.clone()));
            self.extra.insert(raw.clone(), group);
        }
        self
    }

    pub fn normalize(&self, raw: &str) -> AgeGroup {
        if let Some((_, group)) = BUILTIN_ALIASES.iter().find(|(alias, _)| *alias == raw) {
            return group.clone();
        }
        if let Some(group) = AgeGroup::from_canonical(raw) {
            return group;
        }
        if let Some(group) = self.extra.get(raw) {
            return group.clone();
        }
        AgeGroup::Unmapped(raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtin_aliases() {
        let normalizer = AgeGroupNormalizer::new();
        assert_eq!(normalizer.normalize("13&U"), AgeGroup::U13);
        assert_eq!(normalizer.normalize("14-15yo"), AgeGroup::U15);
        assert_eq!(normalizer.normalize("16-17yo"), AgeGroup::U17);
    }

    #[test]
    fn test_canonical_passes() {
        let normalizer = AgeGroupNormalizer::new();
        assert_eq!(normalizer.normalize("U15"), AgeGroup::U15);
        assert_eq!(normalizer.normalize("u17"), AgeGroup::U17);
    }

    #[test]
    fn test_unknown_label_is_unmapped() {
        let normalizer = AgeGroupNormalizer::new();
        assert_eq!(normalizer.normalize("35-39"), AgeGroup::Unmapped("35-39".to_string()));
    }

    #[test]
    fn test_configured_aliases() {
        let mut aliases = BTreeMap::new();
        aliases.insert("12&U".to_string(), "U13".to_string());
        aliases.insert("35-39".to_string(), "M35".to_string());
        aliases.insert("13&U".to_string(), "U15".to_string());

        let normalizer = AgeGroupNormalizer::new().with_aliases(&aliases);
        assert_eq!(normalizer.normalize("12&U"), AgeGroup::U13);
        assert_eq!(normalizer.normalize("35-39"), AgeGroup::Unmapped("M35".to_string()));
        // built-ins take precedence
        assert_eq!(normalizer.normalize("13&U"), AgeGroup::U13);
    }
}
