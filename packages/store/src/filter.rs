//! Category filtering and grouping for the resource list and map.

use std::str::FromStr;

use emergency_map_models::{Locale, Resource, ResourceCategory, labels};
use serde::{Deserialize, Serialize};

/// The selected value of the category filter control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CategoryFilter {
    /// Every resource, regardless of category.
    #[default]
    All,
    /// Only resources of one category.
    Only(ResourceCategory),
}

/// Wire name of [`CategoryFilter::All`].
pub const ALL: &str = "all";

impl CategoryFilter {
    /// Returns `true` if `resource` passes this filter.
    ///
    /// Resources with an unrecognized category only pass [`Self::All`].
    #[must_use]
    pub fn matches(self, resource: &Resource) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => resource.category.known() == Some(category),
        }
    }

    /// Wire name (`all`, `generator`, `fire_station`, ...).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => ALL,
            Self::Only(category) => category.into(),
        }
    }

    /// Button label.
    #[must_use]
    pub const fn label(self, locale: Locale) -> &'static str {
        match self {
            Self::All => labels::all_categories(locale),
            Self::Only(category) => category.label(locale),
        }
    }
}

/// Error returned when a filter name is neither `all` nor a category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resource category filter: {0}")]
pub struct UnknownFilterError(pub String);

impl FromStr for CategoryFilter {
    type Err = UnknownFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case(ALL) {
            return Ok(Self::All);
        }
        s.parse::<ResourceCategory>()
            .map(Self::Only)
            .map_err(|_| UnknownFilterError(s.to_string()))
    }
}

impl TryFrom<String> for CategoryFilter {
    type Error = UnknownFilterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        filter.as_str().to_string()
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the resources passing `filter`, preserving their relative order.
#[must_use]
pub fn filter_resources(resources: &[Resource], filter: CategoryFilter) -> Vec<&Resource> {
    resources.iter().filter(|r| filter.matches(r)).collect()
}

/// One button of the filter control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    /// Filter value the button selects.
    pub value: CategoryFilter,
    /// Hebrew label.
    pub label: &'static str,
    /// English label.
    pub label_en: &'static str,
}

/// The filter control's buttons: "all" first, then each category.
#[must_use]
pub fn filter_options() -> Vec<FilterOption> {
    std::iter::once(CategoryFilter::All)
        .chain(ResourceCategory::all().iter().copied().map(CategoryFilter::Only))
        .map(|value| FilterOption {
            value,
            label: value.label(Locale::He),
            label_en: value.label(Locale::En),
        })
        .collect()
}

/// Resources of one category, for grouped list views.
#[derive(Debug, Clone)]
pub struct ResourceGroup<'a> {
    /// The group's category, or `None` for unrecognized categories.
    pub category: Option<ResourceCategory>,
    /// Members sorted by priority (critical first), upstream order within
    /// the same priority.
    pub resources: Vec<&'a Resource>,
}

/// Groups resources by category in filter-control order.
///
/// Unrecognized categories are collected into one trailing group.
/// Empty groups are omitted.
#[must_use]
pub fn group_by_category<'a>(resources: &[&'a Resource]) -> Vec<ResourceGroup<'a>> {
    let keys = ResourceCategory::all()
        .iter()
        .copied()
        .map(Some)
        .chain(std::iter::once(None));

    keys.filter_map(|key| {
        let mut members: Vec<&Resource> = resources
            .iter()
            .copied()
            .filter(|r| r.category.known() == key)
            .collect();
        if members.is_empty() {
            return None;
        }
        members.sort_by_key(|r| r.priority.rank());
        Some(ResourceGroup {
            category: key,
            resources: members,
        })
    })
    .collect()
}
