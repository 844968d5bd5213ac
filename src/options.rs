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

use crate::StyleSheet;

/// Per-session configuration. Cloned when the session starts, so external
/// mutation during a session has no effect on it.
///
/// Out-of-range width/row constraints are clamped by the layout engine, never
/// rejected.
#[derive(Debug, Clone)]
pub struct Options {
    /// Lower clamp for the computed per-item cell width.
    pub min_item_width: Option<usize>,
    /// Upper clamp for the computed per-item cell width.
    pub max_item_width: Option<usize>,
    /// Requested column count. `None` means one item per line, full width.
    pub columns: Option<usize>,
    /// Maximum rows per page. `None` means compute from terminal height.
    pub max_rows: Option<usize>,
    /// Static tips line shown below the grid, eg key bindings.
    pub tips: Option<String>,
    /// Paging-tip template. Placeholders: `{from}` and `{end}` are the
    /// 1-based ordinals of the first/last visible item, `{size}` the page
    /// size, `{count}` the page count, `{total}` the item count.
    pub paging_tip: Option<String>,
    /// The prompt shown while browsing.
    pub question: String,
    /// Prompt for the manual-typing fallback; falls back to `question`.
    pub manual_question: Option<String>,
    /// Prompt for the non-interactive text mode; falls back to `question`.
    pub plain_question: Option<String>,
    /// Prefix rendered in front of every unselected cell.
    pub normal_prefix: String,
    /// Prefix rendered in front of the selected cell.
    pub selected_prefix: String,
    pub style: StyleSheet,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            min_item_width: None,
            max_item_width: None,
            columns: None,
            max_rows: None,
            tips: None,
            paging_tip: Some(
                "Items {from}-{end} of {total} (page size {size}, {count} pages; PgUp/PgDn)"
                    .into(),
            ),
            question: "Select an item".into(),
            manual_question: None,
            plain_question: None,
            normal_prefix: "  ".into(),
            selected_prefix: "> ".into(),
            style: StyleSheet::default(),
        }
    }
}

impl Options {
    pub fn with_question(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            ..Self::default()
        }
    }

    /// The prompt used by the manual-typing fallback.
    pub fn manual_question(&self) -> &str {
        self.manual_question.as_deref().unwrap_or(&self.question)
    }

    /// The prompt used by the non-interactive text mode.
    pub fn plain_question(&self) -> &str {
        self.plain_question.as_deref().unwrap_or(&self.question)
    }
}
