//! Display catalog for section titles and known limitations.
//!
//! The engine treats section keys and issue tags as opaque; this catalog only
//! tells a front end how to label them and which tags to offer.

use crate::config::CatalogConfig;
use crate::IssueTag;
use once_cell::sync::Lazy;
use std::collections::{BTreeMap, HashMap};

/// Limitation tags offered when no catalog is configured
pub const KNOWN_LIMITATIONS: [&str; 6] = ["shoulder", "knee", "back", "hip", "wrist", "ankle"];

/// Built-in titles for the section keys generated documents commonly use
static DEFAULT_SECTION_TITLES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("mobilita_risveglio", "Wake-up mobility"),
        ("riscaldamento", "Warm-up"),
        ("fase1", "Phase 1 - Strength"),
        ("fase2", "Phase 2 - Endurance"),
        ("fase3", "Phase 3 - Core"),
        ("fase4", "Phase 4 - Cool-down"),
    ])
});

/// Labels and limitation choices for a front end
#[derive(Clone, Debug)]
pub struct Catalog {
    limitations: Vec<IssueTag>,
    section_titles: BTreeMap<String, String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::from_config(&CatalogConfig::default())
    }
}

impl Catalog {
    pub fn from_config(config: &CatalogConfig) -> Self {
        Self {
            limitations: config
                .limitations
                .iter()
                .map(|tag| IssueTag::new(tag.trim()))
                .collect(),
            section_titles: config.section_titles.clone(),
        }
    }

    /// Title for a section: configured override, then built-in, then the key itself
    pub fn section_title<'a>(&'a self, key: &'a str) -> &'a str {
        self.section_titles
            .get(key)
            .map(String::as_str)
            .or_else(|| DEFAULT_SECTION_TITLES.get(key).copied())
            .unwrap_or(key)
    }

    pub fn limitations(&self) -> &[IssueTag] {
        &self.limitations
    }

    pub fn is_known(&self, tag: &str) -> bool {
        self.limitations.iter().any(|known| known.as_str() == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_title() {
        let catalog = Catalog::default();
        assert_eq!(catalog.section_title("riscaldamento"), "Warm-up");
    }

    #[test]
    fn test_unknown_key_shown_verbatim() {
        let catalog = Catalog::default();
        assert_eq!(catalog.section_title("finisher"), "finisher");
    }

    #[test]
    fn test_configured_title_overrides_builtin() {
        let mut config = CatalogConfig::default();
        config
            .section_titles
            .insert("fase1".into(), "Heavy lifts".into());
        let catalog = Catalog::from_config(&config);
        assert_eq!(catalog.section_title("fase1"), "Heavy lifts");
        assert_eq!(catalog.section_title("fase2"), "Phase 2 - Endurance");
    }

    #[test]
    fn test_known_limitations() {
        let catalog = Catalog::default();
        assert_eq!(catalog.limitations().len(), KNOWN_LIMITATIONS.len());
        assert!(catalog.is_known("knee"));
        assert!(!catalog.is_known("elbow"));
    }
}
