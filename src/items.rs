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

use std::collections::HashMap;

/// Reserved lookup character. Typing it requests help / manual entry instead
/// of selecting an item; F1/F12 use it to find an explicitly registered help
/// item.
pub const HELP_KEY: char = '?';

/// One selectable entry: a display title, an opaque payload handed back to
/// the caller on selection, and an optional single-character hotkey.
///
/// An item with an empty title keeps its slot in the collection but is
/// skipped by rendering, navigation, and hotkey lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item<T> {
    pub title: String,
    pub payload: T,
    pub hotkey: Option<char>,
}

impl<T> Item<T> {
    pub fn new(title: impl Into<String>, payload: T) -> Self {
        Self {
            title: title.into(),
            payload,
            hotkey: None,
        }
    }

    pub fn with_hotkey(title: impl Into<String>, payload: T, hotkey: char) -> Self {
        Self {
            title: title.into(),
            payload,
            hotkey: Some(hotkey),
        }
    }

    pub fn is_selectable(&self) -> bool { !self.title.is_empty() }
}

/// Ordered sequence of [Item]s, unique only by position. Built once per
/// session; the engine only ever reads it.
///
/// Hotkey lookup is O(1) via an index built at construction time: for every
/// item (in positional order) both its explicit hotkey and the first
/// character of its title are registered, lowercased, first occurrence wins.
#[derive(Debug, Clone, Default)]
pub struct ItemCollection<T> {
    items: Vec<Item<T>>,
    hotkey_index: HashMap<char, usize>,
}

impl<T> ItemCollection<T> {
    pub fn new(items: Vec<Item<T>>) -> Self {
        let mut hotkey_index = HashMap::new();
        for (index, item) in items.iter().enumerate() {
            if !item.is_selectable() {
                continue;
            }
            if let Some(hotkey) = item.hotkey {
                hotkey_index.entry(fold_case(hotkey)).or_insert(index);
            }
            if let Some(first_char) = item.title.chars().next() {
                // The help key only ever matches an explicit hotkey.
                if first_char != HELP_KEY {
                    hotkey_index.entry(fold_case(first_char)).or_insert(index);
                }
            }
        }
        Self {
            items,
            hotkey_index,
        }
    }

    pub fn len(&self) -> usize { self.items.len() }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    pub fn get(&self, index: usize) -> Option<&Item<T>> { self.items.get(index) }

    pub fn iter(&self) -> std::slice::Iter<'_, Item<T>> { self.items.iter() }

    pub fn is_selectable(&self, index: usize) -> bool {
        self.items
            .get(index)
            .map(|it| it.is_selectable())
            .unwrap_or(false)
    }

    /// Case-insensitive hotkey lookup: returns the first item (by position)
    /// whose explicit hotkey or title first-character matches `ch`. The
    /// reserved [HELP_KEY] only matches an explicit hotkey.
    pub fn lookup(&self, ch: char) -> Option<usize> {
        self.hotkey_index.get(&fold_case(ch)).copied()
    }

    /// Exact title match, case-sensitive, first occurrence.
    pub fn find_title(&self, text: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|it| it.is_selectable() && it.title == text)
    }

    /// First selectable index scanning forward from `start`, wrapping at the
    /// end of the collection. `None` if nothing is selectable.
    pub fn first_selectable_from(&self, start: usize) -> Option<usize> {
        let n = self.items.len();
        if n == 0 {
            return None;
        }
        (0..n)
            .map(|step| (start + step) % n)
            .find(|&index| self.is_selectable(index))
    }
}

impl<T> From<Vec<Item<T>>> for ItemCollection<T> {
    fn from(items: Vec<Item<T>>) -> Self { Self::new(items) }
}

impl ItemCollection<String> {
    /// Convenience constructor for the common case where the payload is the
    /// title itself (eg: lines piped in via stdin).
    pub fn from_titles<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            titles
                .into_iter()
                .map(|it| {
                    let title: String = it.into();
                    Item::new(title.clone(), title)
                })
                .collect(),
        )
    }
}

fn fold_case(ch: char) -> char { ch.to_lowercase().next().unwrap_or(ch) }
