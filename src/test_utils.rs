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

use std::{collections::VecDeque, io};

use crate::{Driver, KeyPress, Style, TermError};

/// One observable driver call, recorded in order by [TestDriver]. Tests
/// slice the op log at [DriverOp::KeyRead] boundaries to see what a single
/// keypress painted and where the cursor went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverOp {
    KeyRead,
    Styled,
    MoveBy(i32, i32),
    MoveToColumn(u16),
    ClearLine,
    ClearBelow,
}

/// Scripted [Driver] for tests: keys and lines are replayed from queues, all
/// output is captured as plain text in `buffer` (styles are dropped, line
/// moves become `\n`), and cursor motion is recorded in `ops` instead of
/// moving anything. Running out of scripted input behaves like a capability
/// failure, which conveniently ends sessions instead of blocking the test
/// harness.
pub struct TestDriver {
    pub buffer: String,
    pub interactive: bool,
    pub width: usize,
    pub height: usize,
    pub ops: Vec<DriverOp>,
    keys: VecDeque<KeyPress>,
    lines: VecDeque<String>,
}

impl TestDriver {
    /// An interactive terminal with a scripted key sequence.
    pub fn interactive(keys: Vec<KeyPress>) -> Self {
        Self {
            buffer: String::new(),
            interactive: true,
            width: 80,
            height: 24,
            ops: Vec::new(),
            keys: keys.into(),
            lines: VecDeque::new(),
        }
    }

    /// A plain (non-interactive) stream with scripted input lines.
    pub fn plain(lines: Vec<&str>) -> Self {
        Self {
            buffer: String::new(),
            interactive: false,
            width: 80,
            height: 24,
            ops: Vec::new(),
            keys: VecDeque::new(),
            lines: lines.into_iter().map(String::from).collect(),
        }
    }

    /// Queue lines for the manual-typing path of an interactive session.
    pub fn with_lines(mut self, lines: Vec<&str>) -> Self {
        self.lines = lines.into_iter().map(String::from).collect();
        self
    }

    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

impl Driver for TestDriver {
    fn is_interactive(&self) -> bool { self.interactive }

    fn write_styled(&mut self, text: &str, _style: &Style) -> io::Result<()> {
        self.ops.push(DriverOp::Styled);
        self.buffer.push_str(text);
        Ok(())
    }

    fn write_plain(&mut self, text: &str) -> io::Result<()> {
        self.buffer.push_str(text);
        Ok(())
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.buffer.push_str(text);
        self.buffer.push('\n');
        Ok(())
    }

    fn next_line(&mut self) -> io::Result<()> {
        self.buffer.push('\n');
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> { Ok(()) }

    fn clear_line(&mut self) -> io::Result<()> {
        self.ops.push(DriverOp::ClearLine);
        Ok(())
    }

    fn clear_below(&mut self) -> io::Result<()> {
        self.ops.push(DriverOp::ClearBelow);
        Ok(())
    }

    fn move_cursor_by(&mut self, dx: i32, dy: i32) -> io::Result<()> {
        self.ops.push(DriverOp::MoveBy(dx, dy));
        Ok(())
    }

    fn move_to_column(&mut self, x: u16) -> io::Result<()> {
        self.ops.push(DriverOp::MoveToColumn(x));
        Ok(())
    }

    fn try_buffer_width(&mut self) -> Result<usize, TermError> { Ok(self.width) }

    fn try_buffer_height(&mut self) -> Result<usize, TermError> { Ok(self.height) }

    fn read_key(&mut self) -> Result<KeyPress, TermError> {
        self.ops.push(DriverOp::KeyRead);
        self.keys.pop_front().ok_or(TermError::Unsupported)
    }

    fn read_line(&mut self) -> Result<String, TermError> {
        self.lines.pop_front().ok_or(TermError::Unsupported)
    }

    fn enter_raw(&mut self) -> Result<(), TermError> { Ok(()) }

    fn exit_raw(&mut self) -> Result<(), TermError> { Ok(()) }

    fn hide_cursor(&mut self) -> io::Result<()> { Ok(()) }

    fn show_cursor(&mut self) -> io::Result<()> { Ok(()) }
}
