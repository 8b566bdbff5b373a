//! Client-side state behind a list screen's controls.

use chrono::NaiveDate;

use crate::domain::query::{
    DateRange, MAX_PAGE_SIZE, QueryDescriptor, QueryError, SortKey, is_unconstrained,
    normalize_search,
};

/// Maintains the current [`QueryDescriptor`] of one list screen.
///
/// Every setter except [`QueryBuilder::set_page`] returns the list to its
/// first page. Setters never perform I/O; callers read the resulting
/// descriptor through [`QueryBuilder::descriptor`] or
/// [`QueryBuilder::snapshot`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryBuilder {
    descriptor: QueryDescriptor,
}

impl QueryBuilder {
    pub fn new(size: usize) -> Self {
        let mut builder = Self::default();
        builder.descriptor.size = size.clamp(1, MAX_PAGE_SIZE);
        builder
    }

    pub fn from_descriptor(descriptor: QueryDescriptor) -> Self {
        Self { descriptor }
    }

    pub fn descriptor(&self) -> &QueryDescriptor {
        &self.descriptor
    }

    /// Owned copy of the current descriptor, as sent with a request.
    pub fn snapshot(&self) -> QueryDescriptor {
        self.descriptor.clone()
    }

    pub fn set_search(&mut self, text: &str) {
        self.descriptor.search = normalize_search(text);
        self.descriptor.page = 0;
    }

    /// Stores an exact-match constraint, or clears it for the `"ALL"` sentinel.
    pub fn set_filter(&mut self, field: &str, value: &str) {
        if is_unconstrained(value) {
            self.descriptor.filters.remove(field);
        } else {
            self.descriptor
                .filters
                .insert(field.to_string(), value.trim().to_string());
        }
        self.descriptor.page = 0;
    }

    /// Sets or clears the date range. A single bound is rejected and leaves
    /// the descriptor untouched.
    pub fn set_date_range(
        &mut self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<(), QueryError> {
        let range = DateRange::from_bounds(start, end)?;
        self.descriptor.date_range = range;
        self.descriptor.page = 0;
        Ok(())
    }

    /// Clicking the active column flips its direction; any other column
    /// starts ascending.
    pub fn set_sort(&mut self, field: &str) {
        let next = match &self.descriptor.sort {
            Some(current) if current.field == field => {
                SortKey::new(field, current.direction.flip())
            }
            _ => SortKey::asc(field),
        };
        self.descriptor.sort = Some(next);
        self.descriptor.page = 0;
    }

    /// Jumps to a page; negative indices clamp to the first page.
    pub fn set_page(&mut self, index: i64) {
        self.descriptor.page = usize::try_from(index).unwrap_or(0);
    }

    pub fn set_page_size(&mut self, size: usize) {
        self.descriptor.size = size.clamp(1, MAX_PAGE_SIZE);
        self.descriptor.page = 0;
    }

    /// Drops search, filters and date range; keeps sort and page size.
    pub fn clear_filters(&mut self) {
        self.descriptor.search = None;
        self.descriptor.filters.clear();
        self.descriptor.date_range = None;
        self.descriptor.page = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::query::SortDirection;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn on_page(page: i64) -> QueryBuilder {
        let mut builder = QueryBuilder::new(10);
        builder.set_page(page);
        builder
    }

    #[test]
    fn search_is_trimmed_and_resets_page() {
        let mut builder = on_page(4);
        builder.set_search("  Nguyen ");
        assert_eq!(builder.descriptor().search.as_deref(), Some("Nguyen"));
        assert_eq!(builder.descriptor().page, 0);

        builder.set_search("   ");
        assert_eq!(builder.descriptor().search, None);
    }

    #[test]
    fn filter_sentinel_clears_constraint() {
        let mut builder = on_page(2);
        builder.set_filter("status", "PAID");
        assert_eq!(
            builder.descriptor().filters.get("status").map(String::as_str),
            Some("PAID")
        );
        assert_eq!(builder.descriptor().page, 0);

        builder.set_page(3);
        builder.set_filter("status", "ALL");
        assert!(builder.descriptor().filters.is_empty());
        assert_eq!(builder.descriptor().page, 0);
    }

    #[test]
    fn one_sided_date_range_is_a_no_op() {
        let mut builder = on_page(5);
        let before = builder.snapshot();

        let result = builder.set_date_range(Some(date(2025, 1, 1)), None);

        assert_eq!(result, Err(QueryError::OneSidedDateRange));
        assert_eq!(builder.snapshot(), before);
    }

    #[test]
    fn full_date_range_is_stored_and_cleared() {
        let mut builder = on_page(5);
        builder
            .set_date_range(Some(date(2025, 1, 1)), Some(date(2025, 1, 31)))
            .unwrap();
        let range = builder.descriptor().date_range.unwrap();
        assert_eq!(range.start(), date(2025, 1, 1));
        assert_eq!(range.end(), date(2025, 1, 31));
        assert_eq!(builder.descriptor().page, 0);

        builder.set_date_range(None, None).unwrap();
        assert_eq!(builder.descriptor().date_range, None);
    }

    #[test]
    fn sort_toggles_same_field_and_resets_for_new_field() {
        let mut builder = QueryBuilder::new(10);
        builder.set_sort("totalAmount");
        assert_eq!(builder.descriptor().sort, Some(SortKey::asc("totalAmount")));

        builder.set_sort("totalAmount");
        assert_eq!(
            builder.descriptor().sort.as_ref().map(|s| s.direction),
            Some(SortDirection::Desc)
        );

        builder.set_sort("issuedAt");
        assert_eq!(builder.descriptor().sort, Some(SortKey::asc("issuedAt")));
    }

    #[test]
    fn sort_change_returns_to_first_page() {
        let mut builder = on_page(3);
        builder.set_sort("fullName");
        assert_eq!(builder.descriptor().page, 0);
    }

    #[test]
    fn negative_page_clamps_to_zero() {
        let mut builder = on_page(-2);
        assert_eq!(builder.descriptor().page, 0);
        builder.set_page(7);
        assert_eq!(builder.descriptor().page, 7);
    }

    #[test]
    fn page_size_resets_page_and_stays_positive() {
        let mut builder = on_page(3);
        builder.set_page_size(25);
        assert_eq!(builder.descriptor().size, 25);
        assert_eq!(builder.descriptor().page, 0);

        builder.set_page_size(0);
        assert_eq!(builder.descriptor().size, 1);
        builder.set_page_size(10_000);
        assert_eq!(builder.descriptor().size, MAX_PAGE_SIZE);
    }

    #[test]
    fn clear_filters_keeps_sort_and_size() {
        let mut builder = QueryBuilder::new(20);
        builder.set_search("an");
        builder.set_filter("gender", "FEMALE");
        builder
            .set_date_range(Some(date(2025, 1, 1)), Some(date(2025, 2, 1)))
            .unwrap();
        builder.set_sort("fullName");
        builder.set_page(2);

        builder.clear_filters();

        let descriptor = builder.descriptor();
        assert_eq!(descriptor.search, None);
        assert!(descriptor.filters.is_empty());
        assert_eq!(descriptor.date_range, None);
        assert_eq!(descriptor.sort, Some(SortKey::asc("fullName")));
        assert_eq!(descriptor.size, 20);
        assert_eq!(descriptor.page, 0);
    }

    #[test]
    fn snapshots_are_independent_of_later_changes() {
        let mut builder = QueryBuilder::new(10);
        let before = builder.snapshot();
        builder.set_search("x");
        assert_eq!(before.search, None);
        assert_ne!(builder.snapshot(), before);
    }
}
