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

//! # pickgrid
//!
//! Present an ordered list of items as a paginated, multi-column grid in the
//! terminal, let the user pick one with the keyboard, and degrade gracefully
//! when the terminal can't do cursor control.
//!
//! This crate can be used in two ways:
//! 1. As a library: call [choose] (or [choose_with] against your own
//!    [Driver]) from any CLI app.
//! 1. As a binary: `pick` reads items from piped stdin, shows the grid, and
//!    prints or runs something with the selection. For example:
//!    `ls | pick -c "wc -l %"`.
//!
//! ## Library usage
//!
//! ```no_run
//! use pickgrid::{choose, ItemCollection, Options};
//!
//! let items = ItemCollection::from_titles(["apple", "banana", "cherry"]);
//! let options = Options {
//!     columns: Some(3),
//!     question: "Pick a fruit".into(),
//!     ..Options::default()
//! };
//!
//! let selection = choose(&items, &options);
//! if selection.is_selected() {
//!     println!("picked: {}", selection.title);
//! }
//! ```
//!
//! ## How a session runs
//!
//! The session first asks the driver whether the terminal is interactive at
//! all. If not, it enumerates the items with `#1`, `#2`, ... ordinals and
//! reads one line (see [fallback::text_mode]). Otherwise it enters raw mode
//! and loops: read one key, run it through the [dispatch] state machine,
//! repaint. Moving the selection inside the current page repaints exactly two
//! cells; crossing a page boundary re-queries the terminal size and repaints
//! the whole page.
//!
//! Backspace, Delete, F4, or `?` abandon the grid for a free-text prompt
//! ([fallback::manual_typing]), as does any capability failure mid-session.
//! Every ending is a [Selection] with a [SelectionKind]; nothing in a session
//! is ever fatal to the caller.
//!
//! Each item can carry a hotkey: its title's first character, or an explicit
//! one. Typing it commits the item immediately, without Enter.

// https://github.com/rust-lang/rust-clippy
// https://rust-lang.github.io/rust-clippy/master/index.html
#![warn(clippy::all)]
#![warn(clippy::unwrap_in_result)]
#![warn(rust_2018_idioms)]

pub mod dispatch;
pub mod driver;
pub mod fallback;
pub mod items;
pub mod keypress;
pub mod layout;
pub mod logging;
pub mod options;
pub mod render;
pub mod selection;
pub mod session;
pub mod style;
pub mod test_utils;

pub use dispatch::*;
pub use driver::*;
pub use items::*;
pub use keypress::*;
pub use layout::*;
pub use logging::*;
pub use options::*;
pub use selection::*;
pub use session::*;
pub use style::*;
pub use test_utils::*;

/// Enable debug logging of keypresses and repaints. You can use
/// `tail -f log.txt` to watch the logs after calling
/// [logging::try_initialize_logging].
pub const DEVELOPMENT_MODE: bool = false;
