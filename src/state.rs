use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use crate::data::cache::TableCache;
use crate::data::filter::{FilterSelection, filtered_indices};
use crate::data::model::{ColumnMap, RecordTable};

/// Which of the two filterable columns a widget is operating on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterColumn {
    Country,
    Industry,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Load cache; owns nothing the UI sees directly.
    pub cache: TableCache,

    /// Column-name binding used when no sidecar mapping is found.
    pub columns: ColumnMap,

    /// Loaded table (None until the user opens a file). Shared read-only.
    pub dataset: Option<Arc<RecordTable>>,

    /// Current country/industry selections.
    pub selection: FilterSelection,

    /// Indices of rows passing the current selections, recomputed on every
    /// selection change.
    pub visible_indices: Vec<usize>,

    /// Bar-chart truncation for the top-countries panel (5–20).
    pub top_n: usize,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            cache: TableCache::default(),
            columns: ColumnMap::default(),
            dataset: None,
            selection: FilterSelection::default(),
            visible_indices: Vec::new(),
            top_n: 10,
            status_message: None,
        }
    }
}

impl AppState {
    /// Open a data file through the cache, resetting filters to all-selected.
    pub fn open_path(&mut self, path: &Path) {
        match self.cache.get_or_load(path, &self.columns) {
            Ok(table) => self.set_dataset(table),
            Err(e) => {
                log::error!("Failed to load file: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a newly loaded dataset and initialise filters.
    pub fn set_dataset(&mut self, table: Arc<RecordTable>) {
        self.selection = FilterSelection::all(&table);
        self.visible_indices = (0..table.len()).collect();
        self.dataset = Some(table);
        self.status_message = None;
    }

    /// Recompute `visible_indices` after a selection change.
    pub fn refilter(&mut self) {
        if let Some(table) = &self.dataset {
            self.visible_indices = filtered_indices(table, &self.selection);
        }
    }

    fn selected_set(&mut self, column: FilterColumn) -> &mut BTreeSet<String> {
        match column {
            FilterColumn::Country => &mut self.selection.countries,
            FilterColumn::Industry => &mut self.selection.industries,
        }
    }

    /// Toggle a single value in a column's selection.
    pub fn toggle_filter_value(&mut self, column: FilterColumn, value: &str) {
        let selected = self.selected_set(column);
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
        self.refilter();
    }

    /// Select every value in a column.
    pub fn select_all(&mut self, column: FilterColumn) {
        if let Some(table) = &self.dataset {
            let all: BTreeSet<String> = match column {
                FilterColumn::Country => table.countries.iter().cloned().collect(),
                FilterColumn::Industry => table.industries.iter().cloned().collect(),
            };
            *self.selected_set(column) = all;
            self.refilter();
        }
    }

    /// Deselect every value in a column.
    pub fn select_none(&mut self, column: FilterColumn) {
        self.selected_set(column).clear();
        self.refilter();
    }
}
