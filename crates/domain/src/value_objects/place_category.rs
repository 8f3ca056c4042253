//! Search-type tags and their provider category codes

/// Tag used when a search type is not recognized
pub const FALLBACK_SEARCH_TYPE: &str = "all_dining";

/// Search types queried when the caller does not name any
pub const DEFAULT_SEARCH_TYPES: &[&str] = &[
    "restaurants",
    "bars",
    "entertainment",
    "attractions",
    "shopping",
];

static CATEGORY_TABLE: &[(&str, &[&str])] = &[
    ("restaurants", &["catering.restaurant", "catering.fast_food"]),
    ("bars", &["catering.bar", "catering.pub", "adult.nightclub"]),
    ("cafes", &["catering.cafe", "catering.ice_cream"]),
    (
        "entertainment",
        &[
            "entertainment.cinema",
            "entertainment.culture",
            "entertainment.amusement_arcade",
        ],
    ),
    ("attractions", &["tourism.attraction", "tourism.sights"]),
    (
        "shopping",
        &[
            "commercial.shopping_mall",
            "commercial.marketplace",
            "commercial.department_store",
        ],
    ),
    (
        FALLBACK_SEARCH_TYPE,
        &[
            "catering.restaurant",
            "catering.bar",
            "catering.cafe",
            "catering.pub",
            "catering.fast_food",
        ],
    ),
];

fn lookup(search_type: &str) -> Option<&'static [&'static str]> {
    CATEGORY_TABLE
        .iter()
        .find(|(tag, _)| *tag == search_type)
        .map(|(_, codes)| *codes)
}

/// Provider category codes for a search-type tag.
///
/// Unknown tags silently resolve to the `all_dining` set.
#[must_use]
pub fn resolve_categories(search_type: &str) -> &'static [&'static str] {
    lookup(search_type)
        .or_else(|| lookup(FALLBACK_SEARCH_TYPE))
        .unwrap_or(&[])
}

/// Whether a tag has its own entry in the category table
#[must_use]
pub fn is_known_search_type(search_type: &str) -> bool {
    lookup(search_type).is_some()
}

/// All recognized search-type tags, in table order
pub fn known_search_types() -> impl Iterator<Item = &'static str> {
    CATEGORY_TABLE.iter().map(|(tag, _)| *tag)
}
