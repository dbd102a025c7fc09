/// MISP attribute types searched by the IP commands
pub const IP_ATTRIBUTE_TYPES: &[&str] = &["ip-src", "ip-dst"];

/// Soft cap on events per search. A full page hints that results were cut off.
pub const SEARCH_RESULT_LIMIT: u32 = 11;

/// SearchScope - strict vs extended search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    /// Published events, IDS-flagged and non-deleted attributes only
    Strict,
    /// No publication, IDS or deletion restriction
    Extended,
}

impl SearchScope {
    /// Backend restrictions for this scope
    pub fn constraints(self) -> SearchConstraints {
        match self {
            SearchScope::Strict => SearchConstraints {
                published: Some(true),
                to_ids: Some(true),
                deleted: Some(false),
                limit: SEARCH_RESULT_LIMIT,
            },
            SearchScope::Extended => SearchConstraints {
                published: None,
                to_ids: None,
                deleted: None,
                limit: SEARCH_RESULT_LIMIT,
            },
        }
    }
}

/// SearchConstraints - filters passed to the backend alongside value and types
///
/// `None` means "no restriction" and is left out of the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConstraints {
    pub published: Option<bool>,
    pub to_ids: Option<bool>,
    pub deleted: Option<bool>,
    pub limit: u32,
}

/// IndicatorQuery - a single user search intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorQuery {
    value: String,
    attribute_types: &'static [&'static str],
    scope: SearchScope,
}

impl IndicatorQuery {
    pub fn new(
        value: impl Into<String>,
        attribute_types: &'static [&'static str],
        scope: SearchScope,
    ) -> Self {
        Self {
            value: value.into(),
            attribute_types,
            scope,
        }
    }

    /// Query for an IP address in `ip-src`/`ip-dst` attributes
    pub fn ip(value: impl Into<String>, scope: SearchScope) -> Self {
        Self::new(value, IP_ATTRIBUTE_TYPES, scope)
    }

    /// The indicator exactly as the user typed it
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn attribute_types(&self) -> &'static [&'static str] {
        self.attribute_types
    }

    pub fn scope(&self) -> SearchScope {
        self.scope
    }

    pub fn constraints(&self) -> SearchConstraints {
        self.scope.constraints()
    }
}
