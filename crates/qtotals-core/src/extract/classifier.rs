//! Line classifier that rebuilds table rows from a flattened text stream.
//!
//! Header context (event, age group, gender) and data rows (weight class,
//! total) arrive on separate lines with no nesting marker, so the classifier
//! is a fold over the lines: `(state, line) -> (state, rows)`. The last
//! context line seen always wins.

use tracing::trace;

use super::rules::patterns::{COLUMN_TITLES, HEADER_ROW, WEIGHT_TOKEN};
use super::rules::{find_weight_total, AgeGroupNormalizer, WeightTotalMatch};
use crate::models::config::ExtractionConfig;
use crate::models::totals::{AgeGroup, Row};

/// Active table context. All three fields are always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    pub event: String,
    pub age_group: AgeGroup,
    pub gender: String,
}

impl Context {
    fn row(&self, found: WeightTotalMatch) -> Row {
        Row {
            event: self.event.clone(),
            age_group: self.age_group.clone(),
            gender: self.gender.clone(),
            weight_class: found.weight_class,
            qualifying_total: found.qualifying_total,
        }
    }
}

/// Classifier state between lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ClassifierState {
    /// No context line seen yet; data lines are orphans.
    #[default]
    Seeking,
    /// A context is active and data lines produce rows.
    InContext(Context),
}

/// How a single line was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Column titles or other known header noise.
    Header,
    /// Replaced the active context.
    Context,
    /// Produced a row under the active context.
    Data,
    /// Weight/total pair seen before any context.
    Orphan,
    /// Matched nothing.
    Unrecognized,
}

/// Outcome of feeding one line to the classifier.
#[derive(Debug, Clone)]
pub struct Step {
    pub state: ClassifierState,
    pub kind: LineKind,
    pub rows: Vec<Row>,
}

/// Stateless rule set; the state is threaded through [`Classifier::step`].
#[derive(Debug, Clone)]
pub struct Classifier {
    event_families: Vec<String>,
    age_groups: AgeGroupNormalizer,
}

impl Classifier {
    /// Create a classifier with the default event families and aliases.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            event_families: config.event_families.clone(),
            age_groups: AgeGroupNormalizer::new().with_aliases(&config.age_group_aliases),
        }
    }

    /// Classify one trimmed line against the current state.
    ///
    /// Rules are tried in order: header, context, data, unrecognized.
    pub fn step(&self, state: ClassifierState, line: &str) -> Step {
        if is_header(line) {
            trace!(line, "header line");
            return Step { state, kind: LineKind::Header, rows: Vec::new() };
        }

        if let Some((context, rest)) = self.parse_context(line) {
            trace!(event = %context.event, age_group = %context.age_group, gender = %context.gender, "context line");
            // single-line layout: "Junior 14-15yo Male 59kg 135"
            let rows = find_weight_total(&rest)
                .map(|found| context.row(found))
                .into_iter()
                .collect();
            return Step {
                state: ClassifierState::InContext(context),
                kind: LineKind::Context,
                rows,
            };
        }

        let Some(found) = find_weight_total(line) else {
            return Step { state, kind: LineKind::Unrecognized, rows: Vec::new() };
        };

        match state {
            ClassifierState::InContext(context) => {
                let rows = vec![context.row(found)];
                Step {
                    state: ClassifierState::InContext(context),
                    kind: LineKind::Data,
                    rows,
                }
            }
            ClassifierState::Seeking => Step {
                state: ClassifierState::Seeking,
                kind: LineKind::Orphan,
                rows: Vec::new(),
            },
        }
    }

    /// Fold a whole line sequence into rows.
    pub fn classify<'a>(&self, lines: impl IntoIterator<Item = &'a str>) -> Vec<Row> {
        let (_, rows) = lines.into_iter().fold(
            (ClassifierState::Seeking, Vec::new()),
            |(state, mut rows), line| {
                let step = self.step(state, line);
                rows.extend(step.rows);
                (step.state, rows)
            },
        );
        rows
    }

    /// Split a context line into its context and the text after the third token.
    fn parse_context(&self, line: &str) -> Option<(Context, String)> {
        let mut tokens = line.split_whitespace();
        let event = tokens.next()?;
        if !self.is_event_family(event) {
            return None;
        }

        let age = tokens.next()?;
        let gender = tokens.next()?;
        if looks_like_data(age) || !gender.chars().all(char::is_alphabetic) {
            return None;
        }

        let context = Context {
            event: event.to_string(),
            age_group: self.age_groups.normalize(age),
            gender: gender.to_string(),
        };
        Some((context, tokens.collect::<Vec<_>>().join(" ")))
    }

    fn is_event_family(&self, token: &str) -> bool {
        self.event_families
            .iter()
            .any(|family| family.eq_ignore_ascii_case(token))
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

fn is_header(line: &str) -> bool {
    HEADER_ROW.is_match(line) || COLUMN_TITLES.is_match(line)
}

fn looks_like_data(token: &str) -> bool {
    WEIGHT_TOKEN.is_match(token) || token.bytes().all(|b| b.is_ascii_digit())
}
