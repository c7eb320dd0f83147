//! Keyword symptom checker
//!
//! Each known symptom maps to a handful of candidate conditions. A check is
//! the deduplicated union of the conditions for every symptom that matches a
//! key exactly. Unknown symptoms are ignored.

use std::collections::{BTreeSet, HashMap};

pub const NO_MATCH_MESSAGE: &str = "No matching conditions found for the provided symptoms.";

const CONDITIONS: &[(&str, &[&str])] = &[
    ("fever", &["Flu", "COVID-19", "Infection"]),
    ("cough", &["Flu", "COVID-19", "Cold"]),
    ("headache", &["Migraine", "Tension headache", "Sinusitis"]),
    ("sore throat", &["Cold", "Flu", "Strep throat"]),
    ("fatigue", &["Anemia", "Depression", "Chronic fatigue syndrome"]),
    ("stomach pain", &["Stomach bug", "Food poisoning"]),
];

pub struct SymptomChecker {
    table: HashMap<&'static str, &'static [&'static str]>,
}

impl SymptomChecker {
    pub fn new() -> Self {
        Self {
            table: CONDITIONS.iter().copied().collect(),
        }
    }

    /// Matched conditions in sorted order; empty when nothing matched
    pub fn check<S: AsRef<str>>(&self, symptoms: &[S]) -> Vec<String> {
        symptoms
            .iter()
            .filter_map(|s| self.table.get(s.as_ref()))
            .flat_map(|conditions| conditions.iter().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

impl Default for SymptomChecker {
    fn default() -> Self {
        Self::new()
    }
}
