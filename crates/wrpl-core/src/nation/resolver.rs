use std::collections::HashMap;

use tracing::trace;

use crate::nation::NationLookup;

/// Internal name prefixes that identify a nation without a catalog lookup.
pub const NATION_PREFIXES: &[(&str, &str)] = &[
    ("us_", "USA"),
    ("germ_", "Germany"),
    ("ussr_", "USSR"),
    ("uk_", "Great Britain"),
    ("jp_", "Japan"),
    ("cn_", "China"),
    ("it_", "Italy"),
    ("fr_", "France"),
    ("sw_", "Sweden"),
];

/// Catalog groups that are not nations.
pub const NON_NATIONAL_GROUPS: &[&str] = &["Drones", "Experimental", "Special Bombers"];

pub fn prefix_nation(vehicle: &str) -> Option<&'static str> {
    NATION_PREFIXES
        .iter()
        .find(|(prefix, _)| vehicle.starts_with(prefix))
        .map(|&(_, nation)| nation)
}

pub fn is_non_national_group(group: &str) -> bool {
    NON_NATIONAL_GROUPS
        .iter()
        .any(|excluded| excluded.eq_ignore_ascii_case(group))
}

/// Resolves vehicle names to nations, memoizing catalog lookups.
///
/// The cache lives as long as the resolver. Reuse one resolver across
/// decodes to share it, or create one per decode to keep them isolated.
/// Wrapping the catalog in an `Arc` lets several resolvers share one catalog.
#[derive(Debug)]
pub struct NationResolver<L> {
    lookup: L,
    cache: HashMap<String, Option<String>>,
    catalog_queries: usize,
}

impl<L: NationLookup> NationResolver<L> {
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            cache: HashMap::new(),
            catalog_queries: 0,
        }
    }

    pub fn resolve(&mut self, vehicle: &str) -> Option<String> {
        if let Some(nation) = prefix_nation(vehicle) {
            return Some(nation.to_string());
        }

        if let Some(cached) = self.cache.get(vehicle) {
            return cached.clone();
        }

        self.catalog_queries += 1;
        let nation = self
            .lookup
            .lookup(vehicle)
            .filter(|group| !is_non_national_group(group))
            .map(str::to_string);
        trace!("Catalog lookup '{}' -> {:?}", vehicle, nation);

        self.cache.insert(vehicle.to_string(), nation.clone());
        nation
    }

    /// Number of lookups that reached the catalog.
    pub fn catalog_queries(&self) -> usize {
        self.catalog_queries
    }

    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    pub fn catalog(&self) -> &L {
        &self.lookup
    }
}
