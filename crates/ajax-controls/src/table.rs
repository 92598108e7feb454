//! Table Search
//!
//! Client-side row filter for admin tables driven by a search input.

/// Body rows of one table
pub trait TableRows {
    fn row_count(&self) -> usize;
    /// Full text content of the row
    fn row_text(&self, index: usize) -> String;
    fn set_row_visible(&self, index: usize, visible: bool);
}

/// Show rows whose text contains `query`, ignoring case; hide the rest.
/// Returns how many rows stay visible.
pub fn filter_rows(rows: &dyn TableRows, query: &str) -> usize {
    let needle = query.to_lowercase();
    let mut visible = 0;
    for index in 0..rows.row_count() {
        let shown = rows.row_text(index).to_lowercase().contains(&needle);
        rows.set_row_visible(index, shown);
        if shown {
            visible += 1;
        }
    }
    visible
}
