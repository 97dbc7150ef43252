//! # Derived View Pipeline
//!
//! Pure functions that turn the store's records into the rows a table shows.
//! The stages always run in the same order:
//!
//! ```text
//! records ──sort──▶ ordered ──filter──▶ matches ──paginate──▶ Page { rows, total }
//! ```
//!
//! Filtering after sorting keeps the relative order of matches without a
//! second comparison pass, and pagination needs the filtered count to report
//! totals.
//!
//! Sorting is stable. Per-key comparison:
//! - `name`: case-insensitive, on the lowercased name
//! - `gender`, `status`: on the lowercase label
//! - `age`: numeric
//! - `dateOfBirth`: chronological, records without a date first
//!
//! Pagination does not clamp the page index; see [`ViewQuery::clamp_page`].

use crate::model::Record;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

pub const PAGE_SIZE_OPTIONS: [usize; 3] = [5, 10, 25];
pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Name,
    Age,
    Gender,
    Status,
    DateOfBirth,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Age => "age",
            SortKey::Gender => "gender",
            SortKey::Status => "status",
            SortKey::DateOfBirth => "dob",
        }
    }

    fn compare(&self, a: &Record, b: &Record) -> Ordering {
        match self {
            SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortKey::Age => a.age.cmp(&b.age),
            SortKey::Gender => a.gender.as_str().cmp(b.gender.as_str()),
            SortKey::Status => a.status.as_str().cmp(b.status.as_str()),
            SortKey::DateOfBirth => a.date_of_birth.cmp(&b.date_of_birth),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "age" => Ok(SortKey::Age),
            "gender" => Ok(SortKey::Gender),
            "status" => Ok(SortKey::Status),
            "dob" | "dateofbirth" | "date-of-birth" => Ok(SortKey::DateOfBirth),
            other => Err(format!(
                "unknown sort key '{}' (expected name, age, gender, status or dob)",
                other
            )),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortDirective {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortDirective {
    pub fn ascending(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Descending,
        }
    }

    /// Column-header click: the same key flips ascending to descending, any
    /// other case starts ascending.
    pub fn toggle(current: Option<SortDirective>, key: SortKey) -> SortDirective {
        match current {
            Some(d) if d.key == key && d.direction == SortDirection::Ascending => {
                SortDirective::descending(key)
            }
            _ => SortDirective::ascending(key),
        }
    }
}

/// Sort stage. `None` keeps insertion order.
pub fn sort_records(records: &[Record], directive: Option<SortDirective>) -> Vec<&Record> {
    let mut sorted: Vec<&Record> = records.iter().collect();
    if let Some(d) = directive {
        sorted.sort_by(|a, b| match d.direction {
            SortDirection::Ascending => d.key.compare(a, b),
            SortDirection::Descending => d.key.compare(b, a),
        });
    }
    sorted
}

/// Case-insensitive substring match on name, gender or any skill.
pub fn matches_search(record: &Record, term_lower: &str) -> bool {
    record.name.to_lowercase().contains(term_lower)
        || record.gender.as_str().contains(term_lower)
        || record
            .skills
            .iter()
            .any(|s| s.to_lowercase().contains(term_lower))
}

/// Filter stage. An empty term keeps everything; whitespace is matched
/// literally.
pub fn filter_records<'a>(records: Vec<&'a Record>, term: &str) -> Vec<&'a Record> {
    let term_lower = term.to_lowercase();
    if term_lower.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|r| matches_search(r, &term_lower))
        .collect()
}

/// One page of a filtered sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub rows: Vec<T>,
    /// Length of the full filtered sequence.
    pub total: usize,
    pub page_index: usize,
    pub page_size: usize,
}

impl<T> Page<T> {
    pub fn page_count(&self) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(self.page_size)
    }

    pub fn has_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn has_next(&self) -> bool {
        self.page_index + 1 < self.page_count()
    }

    /// `"{from}-{to} of {count}"`, with 1-based positions.
    pub fn range_label(&self) -> String {
        if self.rows.is_empty() {
            return format!("0-0 of {}", self.total);
        }
        let from = self.page_index * self.page_size + 1;
        let to = from + self.rows.len() - 1;
        format!("{}-{} of {}", from, to, self.total)
    }
}

impl<'a> Page<&'a Record> {
    pub fn cloned(&self) -> Page<Record> {
        Page {
            rows: self.rows.iter().map(|r| (*r).clone()).collect(),
            total: self.total,
            page_index: self.page_index,
            page_size: self.page_size,
        }
    }
}

/// Paginate stage: the half-open slice `[i*s, i*s + s)` clipped to bounds.
pub fn paginate<T: Clone>(items: &[T], page_index: usize, page_size: usize) -> Page<T> {
    let start = page_index.saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    Page {
        rows: items[start..end].to_vec(),
        total: items.len(),
        page_index,
        page_size,
    }
}

/// Everything the pipeline needs to produce a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewQuery {
    pub sort: Option<SortDirective>,
    pub search: String,
    pub page_index: usize,
    pub page_size: usize,
}

impl Default for ViewQuery {
    fn default() -> Self {
        Self {
            sort: None,
            search: String::new(),
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ViewQuery {
    /// Resets to the first page when the current page starts past `total`.
    /// Returns whether the index changed.
    pub fn clamp_page(&mut self, total: usize) -> bool {
        if self.page_index > 0 && self.page_index * self.page_size >= total {
            self.page_index = 0;
            return true;
        }
        false
    }
}

/// Runs sort, filter and paginate in order.
pub fn derive_view<'a>(records: &'a [Record], query: &ViewQuery) -> Page<&'a Record> {
    let sorted = sort_records(records, query.sort);
    let filtered = filter_records(sorted, &query.search);
    paginate(&filtered, query.page_index, query.page_size)
}
