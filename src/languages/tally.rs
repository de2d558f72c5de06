use crate::github::types::LanguageBreakdown;
use std::collections::HashMap;

/// Running byte counts per language across every repository seen so far.
///
/// Languages keep the order in which they were first reported, which is what
/// breaks ties when shares are ranked.
#[derive(Debug, Default)]
pub struct LanguageTally {
    order: Vec<String>,
    bytes: HashMap<String, u64>,
    total: u64,
}

impl LanguageTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, language: &str, bytes: u64) {
        match self.bytes.get_mut(language) {
            Some(count) => *count += bytes,
            None => {
                self.order.push(language.to_string());
                self.bytes.insert(language.to_string(), bytes);
            }
        }
        self.total += bytes;
    }

    pub fn add_breakdown(&mut self, breakdown: &LanguageBreakdown) {
        for (language, bytes) in breakdown.iter() {
            self.add(language, bytes);
        }
    }

    #[cfg(test)]
    pub fn bytes(&self, language: &str) -> Option<u64> {
        self.bytes.get(language).copied()
    }

    pub fn total_bytes(&self) -> u64 {
        self.total
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Share of the grand total per language, `100 * bytes / total`.
    /// Empty when no bytes were counted.
    pub fn percentages(&self) -> LanguageShares {
        if self.total == 0 {
            return LanguageShares::default();
        }
        let total = self.total as f64;
        LanguageShares(
            self.order
                .iter()
                .map(|lang| {
                    let bytes = self.bytes.get(lang).copied().unwrap_or(0);
                    (lang.clone(), bytes as f64 / total * 100.0)
                })
                .collect(),
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LanguageShares(pub Vec<(String, f64)>);

impl LanguageShares {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[cfg(test)]
    pub fn get(&self, language: &str) -> Option<f64> {
        self.0
            .iter()
            .find(|(lang, _)| lang == language)
            .map(|(_, share)| *share)
    }

    /// Highest share first. The sort is stable, so equal shares stay in
    /// first-seen order.
    pub fn ranked(&self) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self
            .0
            .iter()
            .map(|(lang, share)| (lang.as_str(), *share))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for LanguageShares {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(lang, share)| (lang.into(), share)).collect())
    }
}
