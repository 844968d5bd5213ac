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

use crate::{ItemCollection, KeyPress, LayoutMetrics, HELP_KEY};

/// What one key event does to the browsing state. `Move` carries the new
/// selected index (already clamped and snapped to a selectable item); the
/// session decides whether that needs a targeted or a full repaint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Move(usize),
    Stay,
    /// Abort browsing, switch to the manual-typing fallback.
    Manual,
    /// Terminal outcome: commit as `Selected`. `None` means a help lookup
    /// that found nothing (still a `Selected` result, just empty).
    Commit(Option<usize>),
    /// Terminal outcome: `Canceled`.
    Cancel,
}

/// The browsing state machine: one key event in, one [Step] out. Pure with
/// respect to the terminal; all painting decisions live in the session.
pub fn dispatch<T>(
    key: KeyPress,
    selected: usize,
    items: &ItemCollection<T>,
    layout: &LayoutMetrics,
) -> Step {
    let n = items.len();
    if n == 0 {
        return Step::Cancel;
    }
    let page_start = layout.page_offset;
    let columns = layout.columns;
    let page_size = layout.page_size;

    match key {
        KeyPress::Enter | KeyPress::Space => {
            if items.is_selectable(selected) {
                Step::Commit(Some(selected))
            } else {
                // Invalid selection: snap to the start of the page instead of
                // committing garbage.
                snap_to(items, page_start)
            }
        }

        KeyPress::Backspace | KeyPress::Delete | KeyPress::F { n: 4, .. } => Step::Manual,

        KeyPress::Esc | KeyPress::Pause | KeyPress::CtrlC => Step::Cancel,

        KeyPress::F { n: 1, .. } => Step::Commit(items.lookup(HELP_KEY)),

        KeyPress::F { n: 12, .. } => match items.lookup(HELP_KEY) {
            Some(index) => Step::Commit(Some(index)),
            None => Step::Cancel,
        },

        KeyPress::F { n: 5, ctrl: true } => snap_to(items, 0),

        KeyPress::PageUp { ctrl: true } | KeyPress::Home { ctrl: true } => {
            snap_to(items, 0)
        }
        KeyPress::PageUp { ctrl: false } => {
            snap_to(items, page_start.saturating_sub(page_size))
        }

        KeyPress::PageDown { ctrl: true } | KeyPress::End { ctrl: true } => {
            snap_to(items, n - 1)
        }
        KeyPress::PageDown { ctrl: false } => {
            snap_to(items, (page_start + page_size).min(n - 1))
        }

        KeyPress::Home { ctrl: false } => snap_to(items, page_start),
        KeyPress::End { ctrl: false } => {
            snap_to(items, (page_start + page_size - 1).min(n - 1))
        }

        KeyPress::Up => skip_unselectable(items, selected, |index| {
            step_up(index, n, columns)
        }),
        KeyPress::Down => skip_unselectable(items, selected, |index| {
            step_down(index, n, columns)
        }),
        KeyPress::Left => skip_unselectable(items, selected, |index| {
            (index + n - 1) % n
        }),
        KeyPress::Right => skip_unselectable(items, selected, |index| {
            (index + 1) % n
        }),

        KeyPress::Char(HELP_KEY) => Step::Manual,
        KeyPress::Char(ch) => match items.lookup(ch) {
            // Hotkey commit bypasses Enter.
            Some(index) => Step::Commit(Some(index)),
            None => Step::Stay,
        },

        KeyPress::F { .. } | KeyPress::Noop => Step::Stay,
    }
}

/// Up one row; leaving row 0 wraps to the last occupied row of the same
/// column.
fn step_up(index: usize, n: usize, columns: usize) -> usize {
    if index >= columns {
        index - columns
    } else {
        let mut last = index; // same column, row 0
        while last + columns < n {
            last += columns;
        }
        last
    }
}

/// Down one row; leaving the last row wraps to row 0 of the same column,
/// clamped into the collection.
fn step_down(index: usize, n: usize, columns: usize) -> usize {
    let next = index + columns;
    if next < n {
        next
    } else {
        (index % columns).min(n - 1)
    }
}

/// Apply `advance` repeatedly until it lands on a selectable item, at most
/// one full cycle. Falls back to staying put when the collection has no
/// selectable item reachable this way.
fn skip_unselectable<T>(
    items: &ItemCollection<T>,
    selected: usize,
    advance: impl Fn(usize) -> usize,
) -> Step {
    let mut index = advance(selected.min(items.len() - 1));
    for _ in 0..items.len() {
        if items.is_selectable(index) {
            return Step::Move(index);
        }
        index = advance(index);
    }
    Step::Stay
}

/// Move to `target`, or the first selectable item after it (wrapping).
fn snap_to<T>(items: &ItemCollection<T>, target: usize) -> Step {
    match items.first_selectable_from(target.min(items.len() - 1)) {
        Some(index) => Step::Move(index),
        None => Step::Stay,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{compute_layout, Item, Options};

    fn items(n: usize) -> ItemCollection<usize> {
        ItemCollection::new((0..n).map(|i| Item::new(format!("item {i}"), i)).collect())
    }

    fn grid_layout(n: usize, columns: usize, rows: usize) -> LayoutMetrics {
        let options = Options {
            columns: Some(columns),
            max_rows: Some(rows),
            ..Options::default()
        };
        compute_layout(columns * 20, 50, n, 0, &options)
    }

    fn moved(step: Step) -> usize {
        match step {
            Step::Move(index) => index,
            other => panic!("expected Move, got {other:?}"),
        }
    }

    #[test]
    fn right_arrow_full_cycle_returns_to_start() {
        for n in [1, 2, 5, 12] {
            let items = items(n);
            let layout = grid_layout(n, 3, 4);
            for start in 0..n {
                let mut index = start;
                for _ in 0..n {
                    index = moved(dispatch(KeyPress::Right, index, &items, &layout));
                }
                assert_eq!(index, start, "n={n} start={start}");
            }
        }
    }

    #[test]
    fn left_wraps_at_collection_start() {
        let items = items(5);
        let layout = grid_layout(5, 2, 3);
        assert_eq!(moved(dispatch(KeyPress::Left, 0, &items, &layout)), 4);
        assert_eq!(moved(dispatch(KeyPress::Left, 3, &items, &layout)), 2);
    }

    #[test]
    fn down_then_up_is_identity_when_not_wrapping() {
        let n = 11;
        let items = items(n);
        let layout = grid_layout(n, 3, 4);
        for start in 0..n {
            if start + layout.columns >= n {
                continue; // would wrap
            }
            let down = moved(dispatch(KeyPress::Down, start, &items, &layout));
            let back = moved(dispatch(KeyPress::Up, down, &items, &layout));
            assert_eq!(back, start, "start={start}");
        }
    }

    #[test]
    fn vertical_wraparound_stays_in_column() {
        // 3 columns, 7 items: rows are [0 1 2] [3 4 5] [6].
        let items = items(7);
        let layout = grid_layout(7, 3, 3);

        // Down from the last occupied row of each column wraps to row 0.
        assert_eq!(moved(dispatch(KeyPress::Down, 6, &items, &layout)), 0);
        assert_eq!(moved(dispatch(KeyPress::Down, 4, &items, &layout)), 1);
        assert_eq!(moved(dispatch(KeyPress::Down, 5, &items, &layout)), 2);

        // Up from row 0 wraps to the last occupied row of the same column.
        assert_eq!(moved(dispatch(KeyPress::Up, 0, &items, &layout)), 6);
        assert_eq!(moved(dispatch(KeyPress::Up, 1, &items, &layout)), 4);
        assert_eq!(moved(dispatch(KeyPress::Up, 2, &items, &layout)), 5);
    }

    #[test]
    fn paging_keys_move_by_page() {
        let n = 25;
        let items = items(n);
        // page_size = 10; current page starts at 10.
        let options = Options {
            columns: Some(2),
            max_rows: Some(5),
            ..Options::default()
        };
        let layout = compute_layout(80, 50, n, 12, &options);
        assert_eq!(layout.page_offset, 10);

        assert_eq!(
            moved(dispatch(KeyPress::PageUp { ctrl: false }, 12, &items, &layout)),
            0
        );
        assert_eq!(
            moved(dispatch(KeyPress::PageDown { ctrl: false }, 12, &items, &layout)),
            20
        );
        assert_eq!(
            moved(dispatch(KeyPress::PageUp { ctrl: true }, 12, &items, &layout)),
            0
        );
        assert_eq!(
            moved(dispatch(KeyPress::PageDown { ctrl: true }, 12, &items, &layout)),
            24
        );
        assert_eq!(
            moved(dispatch(KeyPress::Home { ctrl: false }, 12, &items, &layout)),
            10
        );
        assert_eq!(
            moved(dispatch(KeyPress::End { ctrl: false }, 12, &items, &layout)),
            19
        );
        assert_eq!(
            moved(dispatch(KeyPress::Home { ctrl: true }, 12, &items, &layout)),
            0
        );
        assert_eq!(
            moved(dispatch(KeyPress::End { ctrl: true }, 12, &items, &layout)),
            24
        );
    }

    #[test]
    fn enter_commits_or_snaps() {
        let items = items(5);
        let layout = grid_layout(5, 2, 3);
        assert_eq!(
            dispatch(KeyPress::Enter, 3, &items, &layout),
            Step::Commit(Some(3))
        );

        // Unselectable current index snaps to the page start.
        let with_gap: ItemCollection<usize> = ItemCollection::new(vec![
            Item::new("a", 0),
            Item::new("", 1),
            Item::new("c", 2),
        ]);
        assert_eq!(
            dispatch(KeyPress::Enter, 1, &with_gap, &layout),
            Step::Move(0)
        );
    }

    #[test]
    fn escape_and_pause_cancel() {
        let items = items(3);
        let layout = grid_layout(3, 1, 5);
        assert_eq!(dispatch(KeyPress::Esc, 0, &items, &layout), Step::Cancel);
        assert_eq!(dispatch(KeyPress::Pause, 2, &items, &layout), Step::Cancel);
    }

    #[test]
    fn hotkey_commits_immediately_and_unknown_keys_are_ignored() {
        let items = ItemCollection::new(vec![
            Item::new("alpha", 0),
            Item::with_hotkey("beta", 1, 'z'),
        ]);
        let layout = grid_layout(2, 1, 5);
        assert_eq!(
            dispatch(KeyPress::Char('Z'), 0, &items, &layout),
            Step::Commit(Some(1))
        );
        assert_eq!(
            dispatch(KeyPress::Char('q'), 0, &items, &layout),
            Step::Stay
        );
    }

    #[test]
    fn help_lookups_follow_f1_f12_rules() {
        let layout = grid_layout(2, 1, 5);

        let without_help = items(2);
        assert_eq!(
            dispatch(KeyPress::F { n: 1, ctrl: false }, 0, &without_help, &layout),
            Step::Commit(None)
        );
        assert_eq!(
            dispatch(KeyPress::F { n: 12, ctrl: false }, 0, &without_help, &layout),
            Step::Cancel
        );

        let with_help = ItemCollection::new(vec![
            Item::new("alpha", 0),
            Item::with_hotkey("Help", 1, HELP_KEY),
        ]);
        assert_eq!(
            dispatch(KeyPress::F { n: 1, ctrl: false }, 0, &with_help, &layout),
            Step::Commit(Some(1))
        );
        assert_eq!(
            dispatch(KeyPress::F { n: 12, ctrl: false }, 0, &with_help, &layout),
            Step::Commit(Some(1))
        );
    }

    #[test]
    fn fallback_keys_switch_to_manual_typing() {
        let items = items(3);
        let layout = grid_layout(3, 1, 5);
        for key in [
            KeyPress::Backspace,
            KeyPress::Delete,
            KeyPress::F { n: 4, ctrl: false },
            KeyPress::Char(HELP_KEY),
        ] {
            assert_eq!(dispatch(key, 0, &items, &layout), Step::Manual);
        }
    }

    #[test]
    fn ctrl_f5_resets_selection() {
        let items = items(9);
        let layout = grid_layout(9, 3, 3);
        assert_eq!(
            dispatch(KeyPress::F { n: 5, ctrl: true }, 7, &items, &layout),
            Step::Move(0)
        );
    }

    #[test]
    fn navigation_skips_empty_titles() {
        let items: ItemCollection<usize> = ItemCollection::new(vec![
            Item::new("a", 0),
            Item::new("", 1),
            Item::new("c", 2),
        ]);
        let layout = grid_layout(3, 1, 5);
        assert_eq!(moved(dispatch(KeyPress::Down, 0, &items, &layout)), 2);
        assert_eq!(moved(dispatch(KeyPress::Right, 0, &items, &layout)), 2);
        assert_eq!(moved(dispatch(KeyPress::Left, 2, &items, &layout)), 0);
    }
}
