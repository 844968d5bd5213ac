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

//! The two degraded input paths. Manual typing still assumes a cursor-capable
//! terminal that lost (or never had) raw key reads; text mode assumes nothing
//! beyond line-based stdio.

use crate::{Driver, ItemCollection, Options, Selection};

/// Free-text entry: ask the question, read one line, match it against the
/// collection. Used when the user requests it (Backspace/Delete/F4/`?`) or
/// when a raw-mode capability call failed mid-session.
pub fn manual_typing<T: Clone, D: Driver + ?Sized>(
    driver: &mut D,
    items: &ItemCollection<T>,
    options: &Options,
) -> Selection<T> {
    let _ = driver.clear_line();
    let _ = driver.write_plain(options.manual_question());
    let _ = driver.write_plain(" ");
    let _ = driver.flush();

    let line = match driver.read_line() {
        Ok(line) => line,
        Err(_) => return Selection::not_supported(""),
    };

    match_typed_line(items, &line)
}

/// Match one line of typed text: single-character hotkey first, then exact
/// title (case-sensitive, first occurrence), otherwise the raw text comes
/// back as an unmatched `Typed` result.
pub fn match_typed_line<T: Clone>(
    items: &ItemCollection<T>,
    line: &str,
) -> Selection<T> {
    let mut chars = line.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        if let Some(index) = items.lookup(ch) {
            return Selection::selected(items, Some(index), line);
        }
    }
    if let Some(index) = items.find_title(line) {
        return Selection::selected(items, Some(index), line);
    }
    Selection::typed(line)
}

/// Fully non-interactive path: enumerate every item with a 1-based ordinal,
/// ask once, re-prompt once on empty input, then give up as `Canceled`.
pub fn text_mode<T: Clone, D: Driver + ?Sized>(
    driver: &mut D,
    items: &ItemCollection<T>,
    options: &Options,
) -> Selection<T> {
    for (index, item) in items.iter().enumerate() {
        let _ = driver.write_line(&format!("#{}\t{}", index + 1, item.title));
    }

    let mut line = match prompt_line(driver, options) {
        Ok(line) => line,
        Err(selection) => return selection,
    };

    if line.is_empty() {
        line = match prompt_line(driver, options) {
            Ok(line) => line,
            Err(selection) => return selection,
        };
        if line.is_empty() {
            return Selection::canceled();
        }
    }

    match_plain_line(items, &line)
}

fn prompt_line<T: Clone, D: Driver + ?Sized>(
    driver: &mut D,
    options: &Options,
) -> Result<String, Selection<T>> {
    let _ = driver.write_plain(options.plain_question());
    let _ = driver.write_plain(" ");
    let _ = driver.flush();
    driver
        .read_line()
        .map_err(|_| Selection::not_supported(""))
}

/// Match order for text mode: single-character hotkey, `#N` ordinal
/// (1-based, bounds-checked), exact title, bare integer ordinal.
pub fn match_plain_line<T: Clone>(
    items: &ItemCollection<T>,
    line: &str,
) -> Selection<T> {
    let mut chars = line.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        if let Some(index) = items.lookup(ch) {
            return Selection::selected(items, Some(index), line);
        }
    }

    if let Some(ordinal) = line.strip_prefix('#') {
        if let Some(index) = parse_ordinal(ordinal, items) {
            return Selection::selected(items, Some(index), line);
        }
    }

    if let Some(index) = items.find_title(line) {
        return Selection::selected(items, Some(index), line);
    }

    if let Some(index) = parse_ordinal(line, items) {
        return Selection::selected(items, Some(index), line);
    }

    Selection::typed(line)
}

/// 1-based ordinal → index. Out-of-range ordinals and empty-title slots (they
/// keep their ordinal but cannot be selected) are rejected.
fn parse_ordinal<T>(text: &str, items: &ItemCollection<T>) -> Option<usize> {
    let ordinal: usize = text.trim().parse().ok()?;
    let index = ordinal.checked_sub(1)?;
    items.is_selectable(index).then_some(index)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{Item, SelectionKind, TestDriver};

    fn items() -> ItemCollection<usize> {
        ItemCollection::new(vec![
            Item::new("apple", 0),
            Item::new("banana", 1),
            Item::with_hotkey("cherry", 2, 'x'),
            Item::new("date", 3),
            Item::new("elderberry", 4),
        ])
    }

    #[test]
    fn manual_typing_matches_hotkey() {
        let items = items();
        let mut driver = TestDriver::plain(vec!["x"]);
        let selection = manual_typing(&mut driver, &items, &Options::default());
        assert_eq!(selection.kind, SelectionKind::Selected);
        assert_eq!(selection.index, Some(2));
        assert_eq!(selection.title, "cherry");
    }

    #[test]
    fn manual_typing_matches_exact_title() {
        let items = items();
        let mut driver = TestDriver::plain(vec!["banana"]);
        let selection = manual_typing(&mut driver, &items, &Options::default());
        assert_eq!(selection.kind, SelectionKind::Selected);
        assert_eq!(selection.index, Some(1));
        assert_eq!(selection.payload, Some(1));
    }

    #[test]
    fn manual_typing_unmatched_text_comes_back_typed() {
        let items = items();
        let mut driver = TestDriver::plain(vec!["no such thing"]);
        let selection = manual_typing(&mut driver, &items, &Options::default());
        assert_eq!(selection.kind, SelectionKind::Typed);
        assert_eq!(selection.raw_input, "no such thing");
        assert_eq!(selection.index, None);
        assert_eq!(selection.payload, None);
    }

    #[test]
    fn manual_typing_read_failure_is_not_supported() {
        let items = items();
        let mut driver = TestDriver::plain(vec![]);
        let selection = manual_typing(&mut driver, &items, &Options::default());
        assert_eq!(selection.kind, SelectionKind::NotSupported);
    }

    #[test]
    fn text_mode_enumerates_and_accepts_hash_ordinal() {
        let items = items();
        let mut driver = TestDriver::plain(vec!["#3"]);
        let selection = text_mode(&mut driver, &items, &Options::default());
        assert_eq!(selection.kind, SelectionKind::Selected);
        assert_eq!(selection.index, Some(2));
        assert_eq!(selection.title, "cherry");
        assert!(driver.buffer.contains("#1\tapple\n"));
        assert!(driver.buffer.contains("#5\telderberry\n"));
    }

    #[test]
    fn text_mode_accepts_bare_ordinal_and_title() {
        let items = items();

        let mut driver = TestDriver::plain(vec!["4"]);
        let selection = text_mode(&mut driver, &items, &Options::default());
        assert_eq!(selection.index, Some(3));

        let mut driver = TestDriver::plain(vec!["date"]);
        let selection = text_mode(&mut driver, &items, &Options::default());
        assert_eq!(selection.index, Some(3));
    }

    #[test]
    fn text_mode_bounds_checks_ordinals() {
        let items = items();
        let mut driver = TestDriver::plain(vec!["#9"]);
        let selection = text_mode(&mut driver, &items, &Options::default());
        assert_eq!(selection.kind, SelectionKind::Typed);
        assert_eq!(selection.raw_input, "#9");

        let mut driver = TestDriver::plain(vec!["0"]);
        let selection = text_mode(&mut driver, &items, &Options::default());
        assert_eq!(selection.kind, SelectionKind::Typed);
    }

    #[test]
    fn ordinals_reject_unselectable_slots() {
        let items: ItemCollection<usize> = ItemCollection::new(vec![
            Item::new("apple", 0),
            Item::new("", 1),
            Item::new("cherry", 2),
        ]);

        // Ordinal 2 exists but points at an empty-title slot.
        let mut driver = TestDriver::plain(vec!["#2"]);
        let selection = text_mode(&mut driver, &items, &Options::default());
        assert_eq!(selection.kind, SelectionKind::Typed);
        assert_eq!(selection.raw_input, "#2");

        let mut driver = TestDriver::plain(vec!["2"]);
        let selection = text_mode(&mut driver, &items, &Options::default());
        assert_eq!(selection.kind, SelectionKind::Typed);

        let mut driver = TestDriver::plain(vec!["#3"]);
        let selection = text_mode(&mut driver, &items, &Options::default());
        assert_eq!(selection.index, Some(2));
    }

    #[test]
    fn text_mode_reprompts_once_on_empty_input() {
        let items = items();

        let mut driver = TestDriver::plain(vec!["", "#2"]);
        let selection = text_mode(&mut driver, &items, &Options::default());
        assert_eq!(selection.index, Some(1));

        let mut driver = TestDriver::plain(vec!["", ""]);
        let selection = text_mode(&mut driver, &items, &Options::default());
        assert_eq!(selection.kind, SelectionKind::Canceled);
    }

    #[test]
    fn single_char_falls_through_to_ordinal() {
        // '7' is no hotkey and no title; as a bare integer it is out of
        // bounds for 5 items, so it ends up Typed.
        let items = items();
        let mut driver = TestDriver::plain(vec!["7"]);
        let selection = text_mode(&mut driver, &items, &Options::default());
        assert_eq!(selection.kind, SelectionKind::Typed);
    }
}
