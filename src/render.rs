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

use std::io::Result;

use unicode_width::UnicodeWidthChar;

use crate::{Driver, ItemCollection, LayoutMetrics, Options};

/// Paint one full page: item rows, optional paging-tip line, optional static
/// tips line, and the prompt line. Leaves the cursor at the end of the prompt
/// line; the session tracks [LayoutMetrics::rows_above_prompt] for later
/// relative repositioning.
///
/// Uses only forward cursor-relative operations, so it works from whatever
/// row the session happens to start on.
pub fn render_page<T, D: Driver + ?Sized>(
    driver: &mut D,
    items: &ItemCollection<T>,
    layout: &LayoutMetrics,
    selected: usize,
    options: &Options,
) -> Result<()> {
    let page_end = layout.page_end(items.len());

    for row in 0..layout.rows_on_page {
        driver.clear_line()?;
        for column in 0..layout.columns {
            let index = layout.page_offset + row * layout.columns + column;
            if index >= page_end {
                break;
            }
            render_cell(driver, items, layout, selected, options, index)?;
        }
        driver.next_line()?;
    }

    if layout.paging_shown {
        if let Some(template) = &options.paging_tip {
            driver.clear_line()?;
            driver.write_styled(
                &expand_paging_tip(template, layout, items.len()),
                &options.style.paging_style,
            )?;
            driver.next_line()?;
        }
    }

    if layout.tips_shown {
        if let Some(tips) = &options.tips {
            driver.clear_line()?;
            driver.write_styled(tips, &options.style.tips_style)?;
            driver.next_line()?;
        }
    }

    render_prompt(driver, items, selected, options)
}

/// Paint a single cell in place. The session positions the cursor at the
/// cell's column before calling this (targeted repaint path).
pub fn render_cell<T, D: Driver + ?Sized>(
    driver: &mut D,
    items: &ItemCollection<T>,
    layout: &LayoutMetrics,
    selected: usize,
    options: &Options,
    index: usize,
) -> Result<()> {
    let Some(item) = items.get(index) else {
        return Ok(());
    };

    // Unselectable items keep their slot as a blank cell.
    if !item.is_selectable() {
        return driver.write_plain(&" ".repeat(layout.item_width));
    }

    let is_selected = index == selected;
    let prefix = if is_selected {
        &options.selected_prefix
    } else {
        &options.normal_prefix
    };
    let style = if is_selected {
        &options.style.selected_style
    } else {
        &options.style.normal_style
    };
    driver.write_styled(&format_cell(prefix, &item.title, layout.item_width), style)
}

/// The prompt line: question text followed by the currently selected title
/// (or nothing while no valid item is selected). Clears the line first so the
/// targeted repaint path can reuse it as-is.
pub fn render_prompt<T, D: Driver + ?Sized>(
    driver: &mut D,
    items: &ItemCollection<T>,
    selected: usize,
    options: &Options,
) -> Result<()> {
    driver.clear_line()?;
    driver.write_styled(&options.question, &options.style.tips_style)?;
    if items.is_selectable(selected) {
        if let Some(item) = items.get(selected) {
            driver.write_plain(" ")?;
            driver.write_styled(&item.title, &options.style.selected_style)?;
        }
    }
    Ok(())
}

/// Substitute the paging-tip placeholders from the current metrics.
pub fn expand_paging_tip(
    template: &str,
    layout: &LayoutMetrics,
    item_count: usize,
) -> String {
    template
        .replace("{from}", &(layout.page_offset + 1).to_string())
        .replace("{end}", &layout.page_end(item_count).to_string())
        .replace("{count}", &layout.page_count.to_string())
        .replace("{size}", &layout.page_size.to_string())
        .replace("{total}", &item_count.to_string())
}

/// Truncate `prefix + title` to `width - 1` display columns and pad with
/// spaces to exactly `width`.
///
/// Width rules: tab/CR/LF render as a single space of width 1, NUL and
/// backspace are dropped, everything else takes 1 or 2 columns per the
/// `unicode-width` tables (CJK is 2).
pub fn format_cell(prefix: &str, title: &str, width: usize) -> String {
    let budget = width.saturating_sub(1);
    let mut out = String::with_capacity(width);
    let mut used = 0usize;

    for ch in prefix.chars().chain(title.chars()) {
        let Some((rendered, ch_width)) = display_char(ch) else {
            continue;
        };
        if used + ch_width > budget {
            break;
        }
        out.push(rendered);
        used += ch_width;
    }

    for _ in used..width {
        out.push(' ');
    }
    out
}

/// Display width of one line of text under the cell rules above.
pub fn display_width(text: &str) -> usize {
    text.chars()
        .filter_map(display_char)
        .map(|(_, width)| width)
        .sum()
}

fn display_char(ch: char) -> Option<(char, usize)> {
    match ch {
        '\t' | '\r' | '\n' => Some((' ', 1)),
        '\0' | '\x08' => None,
        _ => Some((ch, UnicodeWidthChar::width(ch).unwrap_or(1).max(1))),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::compute_layout;

    #[test]
    fn paging_tip_substitutes_metrics() {
        let options = Options {
            columns: Some(2),
            max_rows: Some(5),
            ..Options::default()
        };
        // page_size = 10, N = 25, first page.
        let layout = compute_layout(80, 50, 25, 0, &options);
        assert_eq!(
            expand_paging_tip("{from} {end} {total}", &layout, 25),
            "1 10 25"
        );
        assert_eq!(
            expand_paging_tip("size={size} pages={count}", &layout, 25),
            "size=10 pages=3"
        );
    }

    #[test]
    fn cells_are_exactly_item_width() {
        assert_eq!(format_cell("> ", "abc", 10), "> abc     ");
        assert_eq!(format_cell("  ", "abcdefghijkl", 10), "  abcdefg ");
        // Padding still applies when the text is empty.
        assert_eq!(format_cell("", "", 4), "    ");
    }

    #[test]
    fn control_chars_follow_cell_rules() {
        // Tab and newline become one space each; NUL and backspace vanish.
        assert_eq!(format_cell("", "a\tb\nc", 8), "a b c   ");
        assert_eq!(format_cell("", "a\0b\x08c", 8), "abc     ");
    }

    #[test]
    fn wide_chars_take_two_columns() {
        assert_eq!(display_width("漢字"), 4);
        // "漢漢" is 4 wide; budget is width - 1 = 4, so both fit plus padding.
        assert_eq!(format_cell("", "漢漢", 5), "漢漢 ");
        // Budget 3: the second ideograph does not fit.
        assert_eq!(format_cell("", "漢漢", 4), "漢  ");
    }
}
