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

use std::io;

use crate::{compute_layout, dispatch::dispatch, fallback, render, CrosstermDriver,
            Driver, ItemCollection, LayoutMetrics, Options, Selection, Step,
            DEVELOPMENT_MODE, FALLBACK_HEIGHT, FALLBACK_WIDTH};

/// Run one selection session on stdout.
///
/// This function owns the calling thread until the user commits, cancels, or
/// the terminal turns out to be incapable; every ending is reported through
/// the returned [Selection], never through an error.
pub fn choose<T: Clone>(items: &ItemCollection<T>, options: &Options) -> Selection<T> {
    let mut driver = CrosstermDriver::stdout();
    choose_with(&mut driver, items, options)
}

/// Same as [choose], but against an explicit [Driver]. There is no global
/// terminal state in this crate; everything a session touches is threaded
/// through `driver`.
pub fn choose_with<T: Clone, D: Driver + ?Sized>(
    driver: &mut D,
    items: &ItemCollection<T>,
    options: &Options,
) -> Selection<T> {
    // Snapshot: external mutation of the caller's Options during the session
    // has no effect.
    let options = options.clone();

    if items.is_empty() {
        return Selection::canceled();
    }

    if !driver.is_interactive() {
        return fallback::text_mode(driver, items, &options);
    }

    // The fallback paths are modes of one flat loop, not recursive
    // re-invocations of the engine.
    let mut mode = Mode::Browsing;
    loop {
        mode = match mode {
            Mode::Browsing => browse(driver, items, &options),
            Mode::ManualTyping => {
                Mode::Finished(fallback::manual_typing(driver, items, &options))
            }
            Mode::Finished(selection) => return selection,
        };
    }
}

enum Mode<T> {
    Browsing,
    ManualTyping,
    Finished(Selection<T>),
}

/// One browsing stint in raw mode. Any I/O or capability failure inside is
/// treated as loss of cursor control and degrades to manual typing.
fn browse<T: Clone, D: Driver + ?Sized>(
    driver: &mut D,
    items: &ItemCollection<T>,
    options: &Options,
) -> Mode<T> {
    if driver.enter_raw().is_err() {
        return Mode::ManualTyping;
    }
    let _ = driver.hide_cursor();

    let outcome = browse_loop(driver, items, options);

    let _ = driver.show_cursor();
    let _ = driver.exit_raw();
    let _ = driver.flush();

    match outcome {
        Ok(mode) => mode,
        Err(error) => {
            if DEVELOPMENT_MODE {
                tracing::debug!("browse ended with I/O failure: {error}");
            }
            Mode::ManualTyping
        }
    }
}

fn browse_loop<T: Clone, D: Driver + ?Sized>(
    driver: &mut D,
    items: &ItemCollection<T>,
    options: &Options,
) -> io::Result<Mode<T>> {
    let mut selected = items.first_selectable_from(0).unwrap_or(0);
    let mut layout = full_repaint(driver, items, selected, options, 0)?;
    let mut rows_above = layout.rows_above_prompt();

    loop {
        driver.flush()?;

        let key = match driver.read_key() {
            Ok(key) => key,
            Err(_) => {
                // Raw key reads stopped working; hand over to line input.
                clear_block(driver, rows_above)?;
                return Ok(Mode::ManualTyping);
            }
        };

        if DEVELOPMENT_MODE {
            tracing::debug!("keypress: {key:?}, selected: {selected}");
        }

        match dispatch(key, selected, items, &layout) {
            Step::Stay => {}

            Step::Move(new_index) => {
                let new_index = new_index.min(items.len() - 1);
                if new_index == selected {
                    continue;
                }
                let previous = selected;
                selected = new_index;
                if layout.contains(previous) && layout.contains(selected) {
                    targeted_repaint(
                        driver, items, &layout, options, previous, selected,
                        rows_above,
                    )?;
                } else {
                    layout = full_repaint(driver, items, selected, options, rows_above)?;
                    rows_above = layout.rows_above_prompt();
                }
            }

            Step::Manual => {
                clear_block(driver, rows_above)?;
                return Ok(Mode::ManualTyping);
            }

            Step::Commit(index) => {
                finish(driver, items, options, rows_above, index)?;
                return Ok(Mode::Finished(Selection::selected(items, index, "")));
            }

            Step::Cancel => {
                finish(driver, items, options, rows_above, None)?;
                return Ok(Mode::Finished(Selection::canceled()));
            }
        }
    }
}

/// Re-query the terminal size, recompute the layout, and paint the whole
/// page. `previous_rows` is how many completed lines the last render left
/// above the prompt; 0 on the first render.
fn full_repaint<T, D: Driver + ?Sized>(
    driver: &mut D,
    items: &ItemCollection<T>,
    selected: usize,
    options: &Options,
    previous_rows: usize,
) -> io::Result<LayoutMetrics> {
    // Back to the top of the rendered block (the cursor rests on the prompt
    // line between keys).
    driver.move_to_column(0)?;
    if previous_rows > 0 {
        driver.move_cursor_by(0, -(previous_rows as i32))?;
    }

    let width = driver.try_buffer_width().unwrap_or(FALLBACK_WIDTH);
    let height = driver.try_buffer_height().unwrap_or(FALLBACK_HEIGHT);
    let layout = compute_layout(width, height, items.len(), selected, options);

    if DEVELOPMENT_MODE {
        tracing::debug!("full repaint: {layout:?}");
    }

    // Reserve vertical space first so the relative moves below never run off
    // the bottom of the screen.
    let rows = layout.rows_above_prompt();
    if rows > 0 {
        driver.write_plain(&"\n".repeat(rows))?;
        driver.move_cursor_by(0, -(rows as i32))?;
        driver.move_to_column(0)?;
    }

    render::render_page(driver, items, &layout, selected, options)?;
    // Drop stale lines left over when the block shrank.
    driver.clear_below()?;
    driver.flush()?;
    Ok(layout)
}

/// Repaint exactly two cells (the previously and the newly selected one) and
/// refresh the prompt line: O(1) work per keypress, independent of page size.
fn targeted_repaint<T, D: Driver + ?Sized>(
    driver: &mut D,
    items: &ItemCollection<T>,
    layout: &LayoutMetrics,
    options: &Options,
    previous: usize,
    selected: usize,
    rows_above: usize,
) -> io::Result<()> {
    repaint_cell(driver, items, layout, options, previous, selected, rows_above)?;
    repaint_cell(driver, items, layout, options, selected, selected, rows_above)?;
    render::render_prompt(driver, items, selected, options)?;
    driver.flush()
}

fn repaint_cell<T, D: Driver + ?Sized>(
    driver: &mut D,
    items: &ItemCollection<T>,
    layout: &LayoutMetrics,
    options: &Options,
    index: usize,
    selected: usize,
    rows_above: usize,
) -> io::Result<()> {
    let (row, column) = layout.cell_position(index);
    let lines_up = rows_above - row;
    driver.move_cursor_by(0, -(lines_up as i32))?;
    driver.move_to_column((column * layout.item_width) as u16)?;
    render::render_cell(driver, items, layout, selected, options, index)?;
    driver.move_cursor_by(0, lines_up as i32)?;
    driver.move_to_column(0)?;
    Ok(())
}

fn clear_block<D: Driver + ?Sized>(driver: &mut D, rows_above: usize) -> io::Result<()> {
    driver.move_to_column(0)?;
    if rows_above > 0 {
        driver.move_cursor_by(0, -(rows_above as i32))?;
    }
    driver.clear_below()
}

/// Tear down the grid and leave a one-line echo of what was chosen, the way
/// a plain prompt would.
fn finish<T, D: Driver + ?Sized>(
    driver: &mut D,
    items: &ItemCollection<T>,
    options: &Options,
    rows_above: usize,
    selected: Option<usize>,
) -> io::Result<()> {
    clear_block(driver, rows_above)?;
    if let Some(item) = selected.and_then(|index| items.get(index)) {
        driver.write_plain(&options.question)?;
        driver.write_plain(" ")?;
        driver.write_line(&item.title)?;
    }
    driver.flush()
}
