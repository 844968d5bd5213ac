/*
 *   Copyright (c) 2024 the pickgrid authors
 *   All rights reserved.
 *
 *   Licensed under the Apache License, Version 2.0 (the "License");
 *   you may not use this file except in compliance with the License.
 *   You may obtain a copy of the License at
 *
 *   http://www.apache.org/licenses/LICENSE-2.0
 *
 *   Unless required by applicable law or agreed to in writing, software
 *   distributed under the License is distributed on an "AS IS" BASIS,
 *   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *   See the License for the specific language governing permissions and
 *   limitations under the License.
 */

use crate::Options;

/// Width used when the terminal width probe fails.
pub const FALLBACK_WIDTH: usize = 70;
/// Row count used when the terminal height probe fails.
pub const FALLBACK_HEIGHT: usize = 50;
/// Rows kept free below the grid for tips and the prompt line.
pub const RESERVED_ROWS: usize = 5;

/// Derived geometry for one page of the grid. Recomputed at every full
/// repaint; the only mutable session state besides the selected index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutMetrics {
    /// Index of the first item on the current page.
    pub page_offset: usize,
    pub page_count: usize,
    /// Rows actually occupied by items on this page (the last page may be
    /// short).
    pub rows_on_page: usize,
    pub columns: usize,
    pub paging_shown: bool,
    pub tips_shown: bool,
    /// `columns * max_rows`: the most items one page can hold.
    pub page_size: usize,
    /// Display width of every cell, including padding.
    pub item_width: usize,
}

impl LayoutMetrics {
    /// 1-based ordinal of the last item visible on this page.
    pub fn page_end(&self, item_count: usize) -> usize {
        (self.page_offset + self.page_size).min(item_count)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.page_offset && index < self.page_offset + self.page_size
    }

    /// `(row, column)` of an item's cell relative to the top of the page.
    /// Callers must ensure `self.contains(index)`.
    pub fn cell_position(&self, index: usize) -> (usize, usize) {
        let slot = index - self.page_offset;
        (slot / self.columns, slot % self.columns)
    }

    /// Lines the renderer emits above the prompt line.
    pub fn rows_above_prompt(&self) -> usize {
        self.rows_on_page + usize::from(self.paging_shown) + usize::from(self.tips_shown)
    }
}

/// Pure function from terminal geometry, item count, and configuration to
/// [LayoutMetrics]. Deterministic and infallible: unreadable terminal sizes
/// are substituted with [FALLBACK_WIDTH]/[FALLBACK_HEIGHT] by the caller, and
/// malformed constraints are clamped here.
pub fn compute_layout(
    width: usize,
    height: usize,
    item_count: usize,
    selected_index: usize,
    options: &Options,
) -> LayoutMetrics {
    let width = width.max(1);

    let mut item_width = match options.columns {
        Some(requested) => width / requested.max(1),
        None => width,
    };
    if let Some(min) = options.min_item_width {
        item_width = item_width.max(min);
    }
    if let Some(max) = options.max_item_width {
        item_width = item_width.min(max);
    }
    let item_width = item_width.clamp(1, width);

    let mut columns = width / item_width;
    if let Some(requested) = options.columns {
        columns = columns.min(requested.max(1));
    }
    let columns = columns.max(1);

    let available_rows = height.saturating_sub(RESERVED_ROWS);
    let max_rows = options
        .max_rows
        .unwrap_or(usize::MAX)
        .min(available_rows)
        .max(1);

    let page_size = columns * max_rows;
    let page_offset = if item_count == 0 {
        0
    } else {
        (selected_index.min(item_count - 1) / page_size) * page_size
    };
    let visible = item_count.saturating_sub(page_offset).min(page_size);

    LayoutMetrics {
        page_offset,
        page_count: item_count.div_ceil(page_size).max(1),
        rows_on_page: visible.div_ceil(columns),
        columns,
        paging_shown: item_count > page_size && options.paging_tip.is_some(),
        tips_shown: options.tips.is_some(),
        page_size,
        item_width,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn single_column_fills_width() {
        let options = Options::default();
        let layout = compute_layout(80, 24, 10, 0, &options);
        assert_eq!(layout.columns, 1);
        assert_eq!(layout.item_width, 80);
        assert_eq!(layout.page_size, 19); // 24 - 5 reserved rows
        assert_eq!(layout.rows_on_page, 10);
        assert_eq!(layout.paging_shown, false);
    }

    #[test]
    fn requested_columns_divide_width() {
        let options = Options {
            columns: Some(4),
            ..Options::default()
        };
        let layout = compute_layout(80, 24, 100, 0, &options);
        assert_eq!(layout.item_width, 20);
        assert_eq!(layout.columns, 4);
        assert_eq!(layout.page_size, 4 * 19);
    }

    #[test]
    fn width_clamps_apply() {
        let options = Options {
            columns: Some(4),
            min_item_width: Some(30),
            ..Options::default()
        };
        // 80 / 4 = 20, clamped up to 30, which only fits 2 columns; the
        // requested count caps it back down but never below 1.
        let layout = compute_layout(80, 24, 10, 0, &options);
        assert_eq!(layout.item_width, 30);
        assert_eq!(layout.columns, 2);

        let options = Options {
            max_item_width: Some(10),
            ..Options::default()
        };
        // Clamping the width down lets more columns fit even when none were
        // requested.
        let layout = compute_layout(80, 24, 10, 0, &options);
        assert_eq!(layout.item_width, 10);
        assert_eq!(layout.columns, 8);
    }

    #[test]
    fn page_offset_follows_selection() {
        let options = Options {
            columns: Some(2),
            max_rows: Some(5),
            ..Options::default()
        };
        // page_size = 10.
        let layout = compute_layout(80, 50, 25, 0, &options);
        assert_eq!(layout.page_size, 10);
        assert_eq!(layout.page_offset, 0);
        assert_eq!(layout.page_count, 3);
        assert_eq!(layout.paging_shown, true);

        let layout = compute_layout(80, 50, 25, 12, &options);
        assert_eq!(layout.page_offset, 10);
        assert_eq!(layout.rows_on_page, 5);

        // Short last page.
        let layout = compute_layout(80, 50, 25, 24, &options);
        assert_eq!(layout.page_offset, 20);
        assert_eq!(layout.rows_on_page, 3);
        assert_eq!(layout.page_end(25), 25);
    }

    #[test]
    fn degenerate_inputs_are_clamped() {
        let options = Options {
            columns: Some(0),
            max_rows: Some(0),
            ..Options::default()
        };
        let layout = compute_layout(0, 0, 0, 0, &options);
        assert_eq!(layout.columns, 1);
        assert_eq!(layout.item_width, 1);
        assert_eq!(layout.page_size, 1);
        assert_eq!(layout.rows_on_page, 0);
        assert_eq!(layout.page_offset, 0);
    }

    #[test]
    fn layout_is_idempotent() {
        let options = Options {
            columns: Some(3),
            max_rows: Some(7),
            tips: Some("tips".into()),
            ..Options::default()
        };
        let first = compute_layout(100, 40, 57, 23, &options);
        let second = compute_layout(100, 40, 57, 23, &options);
        assert_eq!(first, second);
    }

    #[test]
    fn cell_position_is_row_major() {
        let options = Options {
            columns: Some(3),
            max_rows: Some(2),
            ..Options::default()
        };
        let layout = compute_layout(90, 50, 20, 7, &options);
        assert_eq!(layout.page_offset, 6);
        assert_eq!(layout.cell_position(7), (0, 1));
        assert_eq!(layout.cell_position(10), (1, 1));
    }
}
