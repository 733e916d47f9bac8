//! Query building for contact listing and search.
//!
//! Converts untrusted query-string values into a [`ContactFilter`], a
//! [`SortOrder`] and a [`Pagination`]. A filter always restricts to active
//! contacts; there is no way to build one that matches soft-deleted records.
//! Parsing never fails: malformed pagination values fall back to defaults.

use crate::models::Contact;
use std::cmp::Ordering;

/// Page used when the `page` parameter is missing or invalid.
pub const DEFAULT_PAGE: usize = 1;

/// Page size used when the `limit` parameter is missing or invalid.
pub const DEFAULT_LIMIT: usize = 10;

/// Contact fields a text search can look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    FirstName,
    LastName,
    Email,
    Company,
}

impl SearchField {
    fn value<'a>(&self, contact: &'a Contact) -> Option<&'a str> {
        match self {
            Self::FirstName => Some(&contact.first_name),
            Self::LastName => Some(&contact.last_name),
            Self::Email => Some(contact.email.as_str()),
            Self::Company => contact.company.as_deref(),
        }
    }
}

/// Fields matched by the `search` parameter of the list route.
pub const LIST_SEARCH_FIELDS: &[SearchField] =
    &[SearchField::FirstName, SearchField::LastName, SearchField::Email];

/// Fields matched by the search route.
pub const SEARCH_ROUTE_FIELDS: &[SearchField] = &[
    SearchField::FirstName,
    SearchField::LastName,
    SearchField::Email,
    SearchField::Company,
];

/// Case-insensitive, unanchored substring match over several fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMatch {
    needle: String,
    fields: &'static [SearchField],
}

impl TextMatch {
    fn matches(&self, contact: &Contact) -> bool {
        self.fields.iter().any(|field| {
            field
                .value(contact)
                .is_some_and(|value| value.to_lowercase().contains(&self.needle))
        })
    }
}

/// Store filter over contact documents.
///
/// Always implies `isActive = true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFilter {
    text: Option<TextMatch>,
    tag: Option<String>,
}

impl ContactFilter {
    /// Filter matching every active contact.
    pub fn active() -> Self {
        Self {
            text: None,
            tag: None,
        }
    }

    /// Add a substring match of `term` over `fields`. Blank terms are ignored.
    pub fn with_text(self, term: &str, fields: &'static [SearchField]) -> Self {
        let term = term.trim();
        if term.is_empty() {
            return self;
        }
        self.with_literal_text(term, fields)
    }

    /// Add a substring match of `term` exactly as given, whitespace included.
    pub fn with_literal_text(mut self, term: &str, fields: &'static [SearchField]) -> Self {
        self.text = Some(TextMatch {
            needle: term.to_lowercase(),
            fields,
        });
        self
    }

    /// Require `tag` (lower-cased) to be present. Blank tags are ignored.
    pub fn with_tag(mut self, tag: &str) -> Self {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() {
            self.tag = Some(tag);
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Evaluate the filter against a document.
    pub fn matches(&self, contact: &Contact) -> bool {
        contact.is_active
            && self.text.as_ref().map_or(true, |text| text.matches(contact))
            && self.tag.as_ref().map_or(true, |tag| contact.tags.contains(tag))
    }
}

/// Result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// `createdAt` descending.
    #[default]
    NewestFirst,
    /// `firstName` ascending.
    FirstNameAsc,
}

impl SortOrder {
    /// Compare two contacts under this order. Ties fall back to the
    /// store-provided insertion sequence, later inserts first.
    pub fn compare(&self, a: (&Contact, u64), b: (&Contact, u64)) -> Ordering {
        match self {
            Self::NewestFirst => b
                .0
                .created_at
                .cmp(&a.0.created_at)
                .then_with(|| b.1.cmp(&a.1)),
            Self::FirstNameAsc => a
                .0
                .first_name
                .cmp(&b.0.first_name)
                .then_with(|| a.1.cmp(&b.1)),
        }
    }
}

/// 1-based page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Coerce raw `page`/`limit` values, falling back to defaults.
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: parse_positive(page).unwrap_or(DEFAULT_PAGE),
            limit: parse_positive(limit).unwrap_or(DEFAULT_LIMIT),
        }
    }

    /// Number of documents to skip.
    pub fn skip(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Number of pages needed for `total` documents.
    pub fn pages(&self, total: usize) -> usize {
        total.div_ceil(self.limit)
    }
}

fn parse_positive(raw: Option<&str>) -> Option<usize> {
    raw?.trim().parse::<usize>().ok().filter(|n| *n > 0)
}

/// Raw query-string parameters of the list route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub search: Option<String>,
    pub tag: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListParams {
    /// Collect parameters from decoded query-string pairs.
    ///
    /// The first occurrence of a repeated key wins; unknown keys are skipped.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "search" => &mut params.search,
                "tag" => &mut params.tag,
                "page" => &mut params.page,
                "limit" => &mut params.limit,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }
}

/// A fully-formed list query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub filter: ContactFilter,
    pub sort: SortOrder,
    pub pagination: Pagination,
}

/// Build the filter, ordering and page for the list route.
pub fn build_list_query(params: &ListParams) -> ListQuery {
    let mut filter = ContactFilter::active();
    if let Some(search) = params.search.as_deref() {
        filter = filter.with_text(search, LIST_SEARCH_FIELDS);
    }
    if let Some(tag) = params.tag.as_deref() {
        filter = filter.with_tag(tag);
    }

    ListQuery {
        filter,
        sort: SortOrder::NewestFirst,
        pagination: Pagination::parse(params.page.as_deref(), params.limit.as_deref()),
    }
}

/// Build the filter and ordering for the search route.
///
/// The path segment is always a term, so it is matched as given; a term of
/// spaces matches only fields containing that run of spaces.
pub fn build_search_query(term: &str) -> (ContactFilter, SortOrder) {
    (
        ContactFilter::active().with_literal_text(term, SEARCH_ROUTE_FIELDS),
        SortOrder::FirstNameAsc,
    )
}
