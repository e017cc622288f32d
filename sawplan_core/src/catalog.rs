//! Board profile catalog.
//!
//! The catalog is built from a [`MillConfig`] so that throat-dependent
//! profiles follow the configured mill. Callers turn a list of labels into
//! the ordered profile list the packer consumes with [`BoardCatalog::resolve`].

use crate::{BoardProfile, Error, MillConfig, Result};

/// Label of the built-in full-width slab profile
pub const LIVE_EDGE_SLABS: &str = "Live Edge Slabs";

/// Ordered set of board profiles available for selection
#[derive(Clone, Debug)]
pub struct BoardCatalog {
    profiles: Vec<BoardProfile>,
}

impl BoardCatalog {
    /// Builds the built-in profiles followed by any custom ones from config
    pub fn from_config(config: &MillConfig) -> Self {
        let mut profiles = vec![
            BoardProfile::new("2x6", 6.0, 2.0),
            BoardProfile::new("4x4", 4.0, 4.0),
            BoardProfile::new("1x8", 8.0, 1.0),
            // Slabs run the full usable throat width
            BoardProfile::new(LIVE_EDGE_SLABS, config.mill.throat_width - 1.0, 2.0),
        ];
        profiles.extend(config.catalog.custom.iter().cloned());

        Self { profiles }
    }

    pub fn profiles(&self) -> &[BoardProfile] {
        &self.profiles
    }

    /// First profile carrying `label`
    pub fn get(&self, label: &str) -> Option<&BoardProfile> {
        self.profiles.iter().find(|p| p.label == label)
    }

    /// Resolve a caller's selection into profiles, keeping order and duplicates
    pub fn resolve<S: AsRef<str>>(&self, labels: &[S]) -> Result<Vec<BoardProfile>> {
        if labels.is_empty() {
            return Err(Error::EmptySelection);
        }

        labels
            .iter()
            .map(|label| {
                let label = label.as_ref();
                self.get(label)
                    .cloned()
                    .ok_or_else(|| Error::UnknownProfile(label.to_string()))
            })
            .collect()
    }

    /// Validate the catalog for consistency
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for profile in &self.profiles {
            if profile.label.trim().is_empty() {
                errors.push("Board profile has empty label".to_string());
            }
            if !(profile.width.is_finite() && profile.width > 0.0) {
                errors.push(format!(
                    "Board profile '{}' has non-positive width {}",
                    profile.label, profile.width
                ));
            }
            if !(profile.height.is_finite() && profile.height > 0.0) {
                errors.push(format!(
                    "Board profile '{}' has non-positive height {}",
                    profile.label, profile.height
                ));
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_loads() {
        let catalog = BoardCatalog::from_config(&MillConfig::default());
        let labels: Vec<_> = catalog.profiles().iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["2x6", "4x4", "1x8", "Live Edge Slabs"]);
    }

    #[test]
    fn test_slab_width_follows_throat() {
        let mut config = MillConfig::default();
        let catalog = BoardCatalog::from_config(&config);
        let slab = catalog.get("Live Edge Slabs").unwrap();
        assert_eq!(slab.width, 35.0);
        assert_eq!(slab.height, 2.0);

        config.mill.throat_width = 30.0;
        let catalog = BoardCatalog::from_config(&config);
        assert_eq!(catalog.get("Live Edge Slabs").unwrap().width, 29.0);
    }

    #[test]
    fn test_slabs_kept_when_flattening_profile_changes() {
        let mut config = MillConfig::default();
        config.mill.flattening_profile = "Cookie".into();
        let catalog = BoardCatalog::from_config(&config);

        assert!(catalog.get(LIVE_EDGE_SLABS).is_some());
        assert!(catalog.get("Cookie").is_none());
        assert_eq!(catalog.profiles().len(), 4);
    }

    #[test]
    fn test_custom_profiles_appended() {
        let mut config = MillConfig::default();
        config
            .catalog
            .custom
            .push(BoardProfile::new("2x4", 4.0, 2.0));
        let catalog = BoardCatalog::from_config(&config);
        assert_eq!(catalog.profiles().len(), 5);
        assert_eq!(catalog.profiles()[4].label, "2x4");
    }

    #[test]
    fn test_resolve_keeps_order_and_duplicates() {
        let catalog = BoardCatalog::from_config(&MillConfig::default());
        let profiles = catalog.resolve(&["4x4", "2x6", "4x4"]).unwrap();
        let labels: Vec<_> = profiles.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["4x4", "2x6", "4x4"]);
    }

    #[test]
    fn test_resolve_rejects_empty_selection() {
        let catalog = BoardCatalog::from_config(&MillConfig::default());
        let empty: [&str; 0] = [];
        assert!(matches!(catalog.resolve(&empty), Err(Error::EmptySelection)));
    }

    #[test]
    fn test_resolve_rejects_unknown_label() {
        let catalog = BoardCatalog::from_config(&MillConfig::default());
        match catalog.resolve(&["2x6", "2x12"]) {
            Err(Error::UnknownProfile(label)) => assert_eq!(label, "2x12"),
            other => panic!("expected UnknownProfile, got {:?}", other),
        }
    }

    #[test]
    fn test_default_catalog_validates() {
        let catalog = BoardCatalog::from_config(&MillConfig::default());
        let errors = catalog.validate();
        assert!(
            errors.is_empty(),
            "Default catalog has validation errors: {:?}",
            errors
        );
    }

    #[test]
    fn test_validate_flags_bad_custom_profile() {
        let mut config = MillConfig::default();
        config
            .catalog
            .custom
            .push(BoardProfile::new("", 0.0, 2.0));
        let errors = BoardCatalog::from_config(&config).validate();
        assert_eq!(errors.len(), 2);
    }
}
