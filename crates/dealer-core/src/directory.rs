//! # Dealer Directory
//!
//! Read-only reference data: which categories a dealer supports and which
//! regions it delivers into.
//!
//! ## Lookup Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  ReferenceDataProvider::lookup(id)                      │
//! │                                                                         │
//! │  Ok(Some(record))  ──► dealer known                                    │
//! │  Ok(None)          ──► dealer unknown: supports nothing, serves nowhere │
//! │  Err(_)            ──► logged by the rule engine, treated as Ok(None)  │
//! │                                                                         │
//! │  Implementations:                                                      │
//! │  • StaticDirectory   in-memory profiles (built-in or loaded from file) │
//! │  • (future)          dealer directory service                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The rule engine performs at most one lookup per call and never caches
//! across calls, so a directory refreshed out of band is picked up on the
//! next validation.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use crate::category::ProductCategory;
use crate::error::{DirectoryError, DirectoryResult};
use crate::types::RegionCode;

// =============================================================================
// Capability Record
// =============================================================================

/// What one dealer can serve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DealerCapabilityRecord {
    pub supported_categories: BTreeSet<ProductCategory>,
    pub service_regions: BTreeSet<RegionCode>,
}

impl DealerCapabilityRecord {
    #[inline]
    pub fn supports(&self, category: ProductCategory) -> bool {
        self.supported_categories.contains(&category)
    }

    #[inline]
    pub fn services(&self, region: &RegionCode) -> bool {
        self.service_regions.contains(region)
    }
}

// =============================================================================
// Provider Trait
// =============================================================================

/// Keyed, read-only access to dealer reference data.
#[cfg_attr(test, mockall::automock)]
pub trait ReferenceDataProvider {
    /// Looks up a dealer's capabilities.
    fn lookup(&self, dealer_id: &str) -> DirectoryResult<Option<DealerCapabilityRecord>>;
}

// =============================================================================
// Dealer Profile
// =============================================================================

/// A dealer as listed to the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealerProfile {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub website: Option<String>,

    #[serde(default)]
    pub supported_products: Vec<ProductCategory>,

    #[serde(default)]
    pub service_regions: Vec<RegionCode>,

    #[serde(default = "default_true")]
    pub consultation_available: bool,

    #[serde(default = "default_true")]
    pub is_authorized: bool,
}

fn default_true() -> bool {
    true
}

impl DealerProfile {
    /// Capability view used by the rule engine.
    pub fn capabilities(&self) -> DealerCapabilityRecord {
        DealerCapabilityRecord {
            supported_categories: self.supported_products.iter().copied().collect(),
            service_regions: self.service_regions.iter().cloned().collect(),
        }
    }

    /// "phone | email", as written into the order attributes.
    pub fn contact_line(&self) -> String {
        format!("{} | {}", self.phone, self.email)
    }
}

// =============================================================================
// Static Directory
// =============================================================================

/// In-memory directory over a fixed list of profiles.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    profiles: Vec<DealerProfile>,
    index: HashMap<String, usize>,
}

impl StaticDirectory {
    /// Builds a directory, rejecting empty or duplicate ids.
    pub fn from_profiles(profiles: Vec<DealerProfile>) -> DirectoryResult<Self> {
        let mut index = HashMap::with_capacity(profiles.len());

        for (position, profile) in profiles.iter().enumerate() {
            if profile.id.trim().is_empty() {
                return Err(DirectoryError::InvalidRecord {
                    dealer_id: profile.name.clone(),
                    reason: "dealer id is empty".to_string(),
                });
            }
            if index.insert(profile.id.clone(), position).is_some() {
                return Err(DirectoryError::DuplicateDealer(profile.id.clone()));
            }
        }

        Ok(StaticDirectory { profiles, index })
    }

    /// The three reference dealers the checkout extension lists today.
    pub fn builtin() -> Self {
        let profiles = builtin_profiles();
        let index = profiles
            .iter()
            .enumerate()
            .map(|(position, profile)| (profile.id.clone(), position))
            .collect();
        StaticDirectory { profiles, index }
    }

    pub fn profile(&self, dealer_id: &str) -> Option<&DealerProfile> {
        self.index
            .get(dealer_id)
            .and_then(|&position| self.profiles.get(position))
    }

    pub fn profiles(&self) -> &[DealerProfile] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Authorized dealers supporting at least one of `categories`, in
    /// directory order.
    ///
    /// ## Example
    /// ```rust
    /// use dealer_core::{ProductCategory, StaticDirectory};
    ///
    /// let directory = StaticDirectory::builtin();
    /// let ids: Vec<_> = directory
    ///     .dealers_for_categories(&[ProductCategory::Sup])
    ///     .iter()
    ///     .map(|dealer| dealer.id.as_str())
    ///     .collect();
    /// assert_eq!(ids, ["dealer_2", "dealer_3"]);
    /// ```
    pub fn dealers_for_categories(&self, categories: &[ProductCategory]) -> Vec<&DealerProfile> {
        self.profiles
            .iter()
            .filter(|dealer| dealer.is_authorized)
            .filter(|dealer| {
                categories
                    .iter()
                    .any(|category| dealer.supported_products.contains(category))
            })
            .collect()
    }
}

impl ReferenceDataProvider for StaticDirectory {
    fn lookup(&self, dealer_id: &str) -> DirectoryResult<Option<DealerCapabilityRecord>> {
        Ok(self.profile(dealer_id).map(DealerProfile::capabilities))
    }
}

fn builtin_profiles() -> Vec<DealerProfile> {
    use ProductCategory::{Sup, Windsurf, Wingfoil};

    fn regions(codes: &[&str]) -> Vec<RegionCode> {
        codes.iter().map(|code| RegionCode::new(*code)).collect()
    }

    vec![
        DealerProfile {
            id: "dealer_1".to_string(),
            name: "Pacific Windsurf Center".to_string(),
            phone: "+1-415-555-0123".to_string(),
            email: "info@pacificwindsurf.com".to_string(),
            website: Some("https://pacificwindsurf.com".to_string()),
            supported_products: vec![Windsurf, Wingfoil],
            service_regions: regions(&["CA", "OR", "WA"]),
            consultation_available: true,
            is_authorized: true,
        },
        DealerProfile {
            id: "dealer_2".to_string(),
            name: "Bay Area SUP Shop".to_string(),
            phone: "+1-415-555-0456".to_string(),
            email: "contact@bayareasup.com".to_string(),
            website: None,
            supported_products: vec![Sup, Wingfoil],
            service_regions: regions(&["CA", "NV"]),
            consultation_available: true,
            is_authorized: true,
        },
        DealerProfile {
            id: "dealer_3".to_string(),
            name: "Complete Watersports".to_string(),
            phone: "+1-415-555-0789".to_string(),
            email: "support@completewatersports.com".to_string(),
            website: Some("https://completewatersports.com".to_string()),
            supported_products: vec![Windsurf, Sup, Wingfoil],
            service_regions: regions(&["CA", "OR", "WA", "NV", "AZ"]),
            consultation_available: true,
            is_authorized: true,
        },
    ]
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::btreeset;

    fn profile(id: &str, products: Vec<ProductCategory>) -> DealerProfile {
        DealerProfile {
            id: id.to_string(),
            name: format!("Dealer {id}"),
            phone: String::new(),
            email: String::new(),
            website: None,
            supported_products: products,
            service_regions: vec![RegionCode::new("CA")],
            consultation_available: true,
            is_authorized: true,
        }
    }

    #[test]
    fn test_builtin_capabilities() {
        let directory = StaticDirectory::builtin();
        assert_eq!(directory.len(), 3);

        let record = directory.lookup("dealer_2").unwrap().unwrap();
        assert_eq!(
            record.supported_categories,
            btreeset! { ProductCategory::Sup, ProductCategory::Wingfoil }
        );
        assert_eq!(
            record.service_regions,
            btreeset! { RegionCode::new("CA"), RegionCode::new("NV") }
        );
        assert!(!record.supports(ProductCategory::Windsurf));
        assert!(!record.services(&RegionCode::new("TX")));
    }

    #[test]
    fn test_unknown_dealer_is_none() {
        let directory = StaticDirectory::builtin();
        assert_eq!(directory.lookup("dealer_404").unwrap(), None);
        assert!(directory.profile("dealer_404").is_none());
    }

    #[test]
    fn test_from_profiles_rejects_duplicates() {
        let err = StaticDirectory::from_profiles(vec![
            profile("a", vec![ProductCategory::Sup]),
            profile("a", vec![ProductCategory::Windsurf]),
        ])
        .unwrap_err();
        assert_eq!(err, DirectoryError::DuplicateDealer("a".to_string()));
    }

    #[test]
    fn test_from_profiles_rejects_empty_id() {
        let err = StaticDirectory::from_profiles(vec![profile(" ", vec![])]).unwrap_err();
        assert!(matches!(err, DirectoryError::InvalidRecord { .. }));
    }

    #[test]
    fn test_dealers_for_categories_skips_unauthorized() {
        let mut hidden = profile("hidden", vec![ProductCategory::Windsurf]);
        hidden.is_authorized = false;
        let directory = StaticDirectory::from_profiles(vec![
            hidden,
            profile("shown", vec![ProductCategory::Windsurf]),
            profile("other", vec![ProductCategory::Sup]),
        ])
        .unwrap();

        let ids: Vec<_> = directory
            .dealers_for_categories(&[ProductCategory::Windsurf])
            .into_iter()
            .map(|dealer| dealer.id.as_str())
            .collect();
        assert_eq!(ids, ["shown"]);
        assert!(directory.dealers_for_categories(&[]).is_empty());
    }

    #[test]
    fn test_contact_line() {
        let directory = StaticDirectory::builtin();
        let dealer = directory.profile("dealer_1").unwrap();
        assert_eq!(
            dealer.contact_line(),
            "+1-415-555-0123 | info@pacificwindsurf.com"
        );
    }
}
