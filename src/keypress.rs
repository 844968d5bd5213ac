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

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// One keyboard event, already normalized for the dispatcher. Modifier-aware
/// variants carry `ctrl` because the navigation table distinguishes
/// Ctrl+PageUp from PageUp (and friends).
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
pub enum KeyPress {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Space,
    Esc,
    Pause,
    Backspace,
    Delete,
    F { n: u8, ctrl: bool },
    PageUp { ctrl: bool },
    PageDown { ctrl: bool },
    Home { ctrl: bool },
    End { ctrl: bool },
    Char(char),
    CtrlC,
    #[default]
    Noop,
}

/// Translate a crossterm event into a [KeyPress].
///
/// Only `Press` events are mapped; on Windows every key arrives twice (press
/// and release) and mapping both would double every navigation step.
pub fn translate(event: Event) -> KeyPress {
    let Event::Key(KeyEvent {
        code,
        modifiers,
        kind,
        ..
    }) = event
    else {
        return KeyPress::Noop;
    };
    if kind != KeyEventKind::Press {
        return KeyPress::Noop;
    }

    let ctrl = modifiers.contains(KeyModifiers::CONTROL);

    match code {
        KeyCode::Up => KeyPress::Up,
        KeyCode::Down => KeyPress::Down,
        KeyCode::Left => KeyPress::Left,
        KeyCode::Right => KeyPress::Right,
        KeyCode::Enter => KeyPress::Enter,
        KeyCode::Esc => KeyPress::Esc,
        KeyCode::Pause => KeyPress::Pause,
        KeyCode::Backspace => KeyPress::Backspace,
        KeyCode::Delete => KeyPress::Delete,
        KeyCode::F(n) => KeyPress::F { n, ctrl },
        KeyCode::PageUp => KeyPress::PageUp { ctrl },
        KeyCode::PageDown => KeyPress::PageDown { ctrl },
        KeyCode::Home => KeyPress::Home { ctrl },
        KeyCode::End => KeyPress::End { ctrl },
        KeyCode::Char(' ') => KeyPress::Space,
        KeyCode::Char('c') if ctrl => KeyPress::CtrlC,
        KeyCode::Char(ch) if !ctrl => KeyPress::Char(ch),
        _ => KeyPress::Noop,
    }
}
