//! Search, filter, sort, pagination and selection state shared by pages

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use crate::models::Id;

/// A row a page can list
pub trait Record {
    type SortField: Copy + PartialEq + fmt::Debug;

    fn id(&self) -> Id;

    /// Whether any searchable text contains `needle` (already lowercased)
    fn matches_search(&self, needle: &str) -> bool;

    /// Value compared against the status filter
    fn status_key(&self) -> &str;

    fn compare(&self, other: &Self, field: Self::SortField) -> Ordering;
}

/// Case-insensitive substring test used by [`Record::matches_search`]
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    fn flip(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Which dialog is open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Modal {
    #[default]
    Closed,
    Create,
    Edit(Id),
    View(Id),
    ConfirmDelete(Id),
}

/// One page of filtered, sorted rows
#[derive(Debug, PartialEq)]
pub struct PageSlice<'a, T> {
    pub rows: Vec<&'a T>,
    /// 1-based
    pub page: usize,
    pub total_pages: usize,
    /// Rows matching search and filter, across all pages
    pub total_rows: usize,
}

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct ListView<F> {
    search: String,
    status_filter: Option<String>,
    sort: Option<(F, SortDirection)>,
    page: usize,
    page_size: usize,
    selected: BTreeSet<Id>,
    modal: Modal,
}

impl<F> Default for ListView<F> {
    fn default() -> Self {
        Self {
            search: String::new(),
            status_filter: None,
            sort: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            selected: BTreeSet::new(),
            modal: Modal::Closed,
        }
    }
}

impl<F: Copy + PartialEq + fmt::Debug> ListView<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Changing the query returns to the first page
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
        self.page = 1;
    }

    pub fn status_filter(&self) -> Option<&str> {
        self.status_filter.as_deref()
    }

    pub fn set_status_filter(&mut self, status: Option<&str>) {
        self.status_filter = status.map(str::to_string);
        self.page = 1;
    }

    pub fn sort(&self) -> Option<(F, SortDirection)> {
        self.sort
    }

    /// Sort by `field`; choosing the current field again flips direction
    pub fn sort_by(&mut self, field: F) {
        self.sort = match self.sort {
            Some((current, direction)) if current == field => Some((field, direction.flip())),
            _ => Some((field, SortDirection::Ascending)),
        };
    }

    pub fn set_sort(&mut self, sort: Option<(F, SortDirection)>) {
        self.sort = sort;
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_page_size(&mut self, size: usize) {
        self.page_size = size.max(1);
        self.page = 1;
    }

    pub fn selected(&self) -> &BTreeSet<Id> {
        &self.selected
    }

    pub fn is_selected(&self, id: Id) -> bool {
        self.selected.contains(&id)
    }

    pub fn toggle_selected(&mut self, id: Id) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    pub fn select_all(&mut self, ids: impl IntoIterator<Item = Id>) {
        self.selected.extend(ids);
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Forget a row that no longer exists
    pub fn forget(&mut self, id: Id) {
        self.selected.remove(&id);
        if matches!(self.modal, Modal::Edit(m) | Modal::View(m) | Modal::ConfirmDelete(m) if m == id) {
            self.modal = Modal::Closed;
        }
    }

    pub fn modal(&self) -> Modal {
        self.modal
    }

    pub fn open_modal(&mut self, modal: Modal) {
        self.modal = modal;
    }

    pub fn close_modal(&mut self) {
        self.modal = Modal::Closed;
    }

    /// Every row passing search and filter, in display order
    pub fn apply<'a, T>(&self, rows: &'a [T]) -> Vec<&'a T>
    where
        T: Record<SortField = F>,
    {
        let needle = self.search.trim().to_lowercase();
        let mut visible: Vec<&T> = rows
            .iter()
            .filter(|row| needle.is_empty() || row.matches_search(&needle))
            .filter(|row| match &self.status_filter {
                Some(status) => row.status_key().eq_ignore_ascii_case(status),
                None => true,
            })
            .collect();

        if let Some((field, direction)) = self.sort {
            visible.sort_by(|a, b| {
                let ordering = a.compare(b, field);
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }
        visible
    }

    /// The current page of [`apply`](Self::apply); out-of-range pages
    /// are clamped to the last one.
    pub fn slice<'a, T>(&self, rows: &'a [T]) -> PageSlice<'a, T>
    where
        T: Record<SortField = F>,
    {
        let visible = self.apply(rows);
        let total_rows = visible.len();
        let total_pages = total_rows.div_ceil(self.page_size).max(1);
        let page = self.page.min(total_pages);
        let rows = visible
            .into_iter()
            .skip((page - 1) * self.page_size)
            .take(self.page_size)
            .collect();
        PageSlice {
            rows,
            page,
            total_pages,
            total_rows,
        }
    }
}
