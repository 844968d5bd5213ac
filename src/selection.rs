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

use crate::ItemCollection;

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SelectionKind {
    /// The user committed an item (Enter/Space, hotkey, or a matched line of
    /// typed text).
    Selected,
    /// Typed text that matched nothing; `raw_input` carries it verbatim.
    Typed,
    /// The user backed out (Escape/Pause, or empty input in text mode).
    #[default]
    Canceled,
    /// The terminal could not even read a line of input.
    NotSupported,
}

/// The single value a session produces. Constructed exactly once, immutable
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<T> {
    /// Whatever the user typed, if anything.
    pub raw_input: String,
    /// Position of the chosen item, when one was matched.
    pub index: Option<usize>,
    /// Payload of the chosen item, when one was matched.
    pub payload: Option<T>,
    /// Title of the chosen item, empty when none.
    pub title: String,
    pub kind: SelectionKind,
}

impl<T: Clone> Selection<T> {
    pub fn canceled() -> Self {
        Self {
            raw_input: String::new(),
            index: None,
            payload: None,
            title: String::new(),
            kind: SelectionKind::Canceled,
        }
    }

    pub fn not_supported(raw_input: impl Into<String>) -> Self {
        Self {
            raw_input: raw_input.into(),
            index: None,
            payload: None,
            title: String::new(),
            kind: SelectionKind::NotSupported,
        }
    }

    pub fn typed(raw_input: impl Into<String>) -> Self {
        Self {
            raw_input: raw_input.into(),
            index: None,
            payload: None,
            title: String::new(),
            kind: SelectionKind::Typed,
        }
    }

    /// A `Selected` outcome. `index` may be `None` (eg: F1 help lookup with
    /// no help item registered); the out-of-range case degrades the same way.
    pub fn selected(
        items: &ItemCollection<T>,
        index: Option<usize>,
        raw_input: impl Into<String>,
    ) -> Self {
        let item = index.and_then(|it| items.get(it));
        Self {
            raw_input: raw_input.into(),
            index: item.is_some().then_some(index).flatten(),
            payload: item.map(|it| it.payload.clone()),
            title: item.map(|it| it.title.clone()).unwrap_or_default(),
            kind: SelectionKind::Selected,
        }
    }

    pub fn is_selected(&self) -> bool { self.kind == SelectionKind::Selected }
}
