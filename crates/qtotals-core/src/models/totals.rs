//! Qualifying-totals data model and the lookups derived from it.

use std::collections::HashMap;
use std::fmt;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::extract::rules::patterns::{CANONICAL_TOTAL, CANONICAL_WEIGHT_CLASS};

/// Canonical age-group label.
///
/// Labels that no alias resolves are kept as [`AgeGroup::Unmapped`] so callers
/// can tell a new label apart from the known vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AgeGroup {
    /// 13 and under.
    U13,
    /// 14-15 years old.
    U15,
    /// 16-17 years old.
    U17,
    /// 18-20 years old.
    U20,
    /// 21-23 years old.
    U23,
    /// Label outside the known vocabulary, carried verbatim.
    Unmapped(String),
}

impl AgeGroup {
    /// All canonical variants in display order.
    pub const CANONICAL: [AgeGroup; 5] = [
        AgeGroup::U13,
        AgeGroup::U15,
        AgeGroup::U17,
        AgeGroup::U20,
        AgeGroup::U23,
    ];

    /// Resolve an already-canonical spelling (`U13`, `u15`, ...).
    pub fn from_canonical(label: &str) -> Option<Self> {
        match label.to_ascii_uppercase().as_str() {
            "U13" => Some(AgeGroup::U13),
            "U15" => Some(AgeGroup::U15),
            "U17" => Some(AgeGroup::U17),
            "U20" => Some(AgeGroup::U20),
            "U23" => Some(AgeGroup::U23),
            _ => None,
        }
    }

    /// Label used as the lookup key.
    pub fn as_str(&self) -> &str {
        match self {
            AgeGroup::U13 => "U13",
            AgeGroup::U15 => "U15",
            AgeGroup::U17 => "U17",
            AgeGroup::U20 => "U20",
            AgeGroup::U23 => "U23",
            AgeGroup::Unmapped(raw) => raw,
        }
    }

    pub fn is_canonical(&self) -> bool {
        !matches!(self, AgeGroup::Unmapped(_))
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for AgeGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Weight class in canonical form: `59kg` or `+109kg` (109kg and above).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct WeightClass(String);

impl WeightClass {
    /// Accept text that is already canonical.
    ///
    /// Raw renderer output such as `109+kg` goes through
    /// [`crate::extract::rules::normalize_weight_class`] instead.
    pub fn parse(canonical: &str) -> Option<Self> {
        CANONICAL_WEIGHT_CLASS
            .is_match(canonical)
            .then(|| Self(canonical.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Bodyweight limit in kilograms.
    pub fn kilograms(&self) -> Option<u32> {
        self.0
            .trim_start_matches('+')
            .trim_end_matches("kg")
            .parse()
            .ok()
    }

    /// Whether this is an "and above" class.
    pub fn is_open_ended(&self) -> bool {
        self.0.starts_with('+')
    }
}

impl fmt::Display for WeightClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Qualifying total, kept as the digit string found in the document.
///
/// Always a positive integer; a total of zero is not a qualifying mark.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct QualifyingTotal(String);

impl QualifyingTotal {
    pub fn parse(digits: &str) -> Option<Self> {
        let positive = digits.bytes().any(|b| b != b'0');
        (CANONICAL_TOTAL.is_match(digits) && positive).then(|| Self(digits.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value in kilograms.
    pub fn value(&self) -> Option<u32> {
        self.0.parse().ok()
    }
}

impl fmt::Display for QualifyingTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One element of a bucket list, serialized as
/// `{ "weightClass": ..., "qualifyingTotal": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightTotal {
    pub weight_class: WeightClass,
    pub qualifying_total: QualifyingTotal,
}

/// Composite key of one (event, age group, gender) bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BucketKey {
    pub event: String,
    pub age_group: AgeGroup,
    pub gender: String,
}

impl BucketKey {
    pub fn new(event: impl Into<String>, age_group: AgeGroup, gender: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            age_group,
            gender: gender.into(),
        }
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.event, self.age_group, self.gender)
    }
}

/// A single table row reconstructed by the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub event: String,
    pub age_group: AgeGroup,
    pub gender: String,
    pub weight_class: WeightClass,
    pub qualifying_total: QualifyingTotal,
}

impl Row {
    pub fn key(&self) -> BucketKey {
        BucketKey::new(self.event.clone(), self.age_group.clone(), self.gender.clone())
    }

    pub fn into_entry(self) -> WeightTotal {
        WeightTotal {
            weight_class: self.weight_class,
            qualifying_total: self.qualifying_total,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Bucket {
    pub(crate) key: BucketKey,
    pub(crate) entries: Vec<WeightTotal>,
}

/// Lookup structure: event -> age group -> gender -> weight/total list.
///
/// Stored flat as insertion-ordered buckets; the nested shape only exists
/// when serialized. Built once by [`crate::extract::TotalsBuilder`] and
/// never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct QualifyingTotals {
    pub(crate) buckets: Vec<Bucket>,
    pub(crate) index: HashMap<BucketKey, usize>,
}

impl QualifyingTotals {
    /// Events in first-seen order.
    pub fn events(&self) -> Vec<&str> {
        let mut events: Vec<&str> = Vec::new();
        for bucket in &self.buckets {
            if !events.contains(&bucket.key.event.as_str()) {
                events.push(&bucket.key.event);
            }
        }
        events
    }

    /// Age groups present for an event, in first-seen order.
    pub fn age_groups(&self, event: &str) -> Vec<&AgeGroup> {
        let mut groups: Vec<&AgeGroup> = Vec::new();
        for bucket in self.buckets.iter().filter(|b| b.key.event == event) {
            if !groups.contains(&&bucket.key.age_group) {
                groups.push(&bucket.key.age_group);
            }
        }
        groups
    }

    /// Genders present for an event and age group, in first-seen order.
    pub fn genders(&self, event: &str, age_group: &AgeGroup) -> Vec<&str> {
        self.buckets
            .iter()
            .filter(|b| b.key.event == event && &b.key.age_group == age_group)
            .map(|b| b.key.gender.as_str())
            .collect()
    }

    /// The weight/total list of one bucket.
    pub fn bucket(&self, event: &str, age_group: &AgeGroup, gender: &str) -> Option<&[WeightTotal]> {
        let key = BucketKey::new(event, age_group.clone(), gender);
        self.index
            .get(&key)
            .map(|&i| self.buckets[i].entries.as_slice())
    }

    /// Valid weight classes for one bucket.
    pub fn weight_classes(&self, event: &str, age_group: &AgeGroup, gender: &str) -> Vec<&WeightClass> {
        self.bucket(event, age_group, gender)
            .map(|entries| entries.iter().map(|e| &e.weight_class).collect())
            .unwrap_or_default()
    }

    pub fn qualifying_total(
        &self,
        event: &str,
        age_group: &AgeGroup,
        gender: &str,
        weight_class: &str,
    ) -> Option<&QualifyingTotal> {
        self.bucket(event, age_group, gender)?
            .iter()
            .find(|e| e.weight_class.as_str() == weight_class)
            .map(|e| &e.qualifying_total)
    }

    /// All entries with their bucket key, in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&BucketKey, &WeightTotal)> {
        self.buckets
            .iter()
            .flat_map(|b| b.entries.iter().map(move |e| (&b.key, e)))
    }

    pub fn row_count(&self) -> usize {
        self.buckets.iter().map(|b| b.entries.len()).sum()
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    fn nested(&self) -> NestedView<'_> {
        let mut events: NestedView<'_> = OrderedMap::default();
        for bucket in &self.buckets {
            events
                .entry_or_default(bucket.key.event.as_str())
                .entry_or_default(&bucket.key.age_group)
                .0
                .push((bucket.key.gender.as_str(), bucket.entries.as_slice()));
        }
        events
    }
}

impl Serialize for QualifyingTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.nested().serialize(serializer)
    }
}

/// event -> age group -> gender -> entries, borrowed from the buckets.
type NestedView<'a> = OrderedMap<&'a str, OrderedMap<&'a AgeGroup, OrderedMap<&'a str, &'a [WeightTotal]>>>;

/// Map that serializes its entries in insertion order.
struct OrderedMap<K, V>(Vec<(K, V)>);

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<K: PartialEq, V: Default> OrderedMap<K, V> {
    fn entry_or_default(&mut self, key: K) -> &mut V {
        let pos = match self.0.iter().position(|(k, _)| *k == key) {
            Some(pos) => pos,
            None => {
                self.0.push((key, V::default()));
                self.0.len() - 1
            }
        };
        &mut self.0[pos].1
    }
}

impl<K: Serialize, V: Serialize> Serialize for OrderedMap<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::TotalsBuilder;
    use pretty_assertions::assert_eq;

    fn row(event: &str, age: AgeGroup, gender: &str, weight: &str, total: &str) -> Row {
        Row {
            event: event.to_string(),
            age_group: age,
            gender: gender.to_string(),
            weight_class: WeightClass::parse(weight).unwrap(),
            qualifying_total: QualifyingTotal::parse(total).unwrap(),
        }
    }

    fn sample() -> QualifyingTotals {
        let mut builder = TotalsBuilder::new();
        for r in [
            row("Youth", AgeGroup::U13, "Female", "40kg", "60"),
            row("Junior", AgeGroup::U20, "Male", "+109kg", "300"),
            row("Youth", AgeGroup::U15, "Male", "49kg", "110"),
            row("Youth", AgeGroup::U13, "Male", "40kg", "70"),
            row("Youth", AgeGroup::U13, "Female", "45kg", "66"),
        ] {
            builder.push(r).unwrap();
        }
        builder.finish()
    }

    #[test]
    fn test_weight_class_parse() {
        assert!(WeightClass::parse("59kg").is_some());
        assert!(WeightClass::parse("+109kg").is_some());
        assert!(WeightClass::parse("109+kg").is_none());
        assert!(WeightClass::parse("kg").is_none());

        let open = WeightClass::parse("+109kg").unwrap();
        assert!(open.is_open_ended());
        assert_eq!(open.kilograms(), Some(109));
    }

    #[test]
    fn test_qualifying_total_parse() {
        assert_eq!(QualifyingTotal::parse("135").unwrap().value(), Some(135));
        assert!(QualifyingTotal::parse("13.5").is_none());
        assert!(QualifyingTotal::parse("").is_none());
        assert!(QualifyingTotal::parse("0").is_none());
        assert!(QualifyingTotal::parse("000").is_none());
        assert_eq!(QualifyingTotal::parse("100").unwrap().value(), Some(100));
    }

    #[test]
    fn test_age_group_labels() {
        assert_eq!(AgeGroup::from_canonical("u15"), Some(AgeGroup::U15));
        assert_eq!(AgeGroup::from_canonical("Open"), None);
        assert_eq!(AgeGroup::Unmapped("Masters 35".into()).as_str(), "Masters 35");
        assert!(!AgeGroup::Unmapped("x".into()).is_canonical());
    }

    #[test]
    fn test_lookups_follow_first_seen_order() {
        let totals = sample();

        assert_eq!(totals.events(), vec!["Youth", "Junior"]);
        assert_eq!(totals.age_groups("Youth"), vec![&AgeGroup::U13, &AgeGroup::U15]);
        assert_eq!(totals.genders("Youth", &AgeGroup::U13), vec!["Female", "Male"]);
        assert_eq!(
            totals
                .weight_classes("Youth", &AgeGroup::U13, "Female")
                .iter()
                .map(|w| w.as_str())
                .collect::<Vec<_>>(),
            vec!["40kg", "45kg"]
        );
        assert_eq!(
            totals
                .qualifying_total("Junior", &AgeGroup::U20, "Male", "+109kg")
                .map(|t| t.as_str()),
            Some("300")
        );
        assert!(totals.bucket("Senior", &AgeGroup::U13, "Male").is_none());
        assert_eq!(totals.row_count(), 5);
        assert_eq!(totals.bucket_count(), 4);
    }

    #[test]
    fn test_serialize_nested_in_insertion_order() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"Youth":{"U13":{"Female":[{"weightClass":"40kg","qualifyingTotal":"60"},"#,
                r#"{"weightClass":"45kg","qualifyingTotal":"66"}],"#,
                r#""Male":[{"weightClass":"40kg","qualifyingTotal":"70"}]},"#,
                r#""U15":{"Male":[{"weightClass":"49kg","qualifyingTotal":"110"}]}},"#,
                r#""Junior":{"U20":{"Male":[{"weightClass":"+109kg","qualifyingTotal":"300"}]}}}"#
            )
        );
    }
}
