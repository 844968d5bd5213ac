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

use std::io::{self, Write};

use crossterm::{cursor::{Hide, MoveDown, MoveLeft, MoveRight, MoveToColumn,
                         MoveToNextLine, MoveUp, Show},
                event::{read, Event},
                queue,
                style::{Print, ResetColor},
                terminal::{disable_raw_mode, enable_raw_mode, size, Clear, ClearType},
                tty::IsTty};

use crate::{apply_style, keypress, KeyPress, Style};

/// Tagged result for fallible terminal capabilities. Callers branch on
/// [TermError::Unsupported] to pick a degraded mode instead of relying on
/// unwinding for control flow.
#[derive(Debug, thiserror::Error)]
pub enum TermError {
    #[error("terminal does not support this operation")]
    Unsupported,
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Everything the selection engine needs from a terminal. The engine is
/// written against this trait only; [CrosstermDriver] is the production
/// implementation and [crate::TestDriver] the scripted one.
///
/// All cursor movement is relative (or column-absolute); the engine never
/// asks for an absolute screen position.
pub trait Driver {
    /// `false` means no cursor control or raw key reads at all; the session
    /// goes straight to the plain text mode.
    fn is_interactive(&self) -> bool;

    fn write_styled(&mut self, text: &str, style: &Style) -> io::Result<()>;
    fn write_plain(&mut self, text: &str) -> io::Result<()>;
    /// Write `text` and move to the start of the next line.
    fn write_line(&mut self, text: &str) -> io::Result<()>;
    /// Move to the start of the next line.
    fn next_line(&mut self) -> io::Result<()>;
    fn flush(&mut self) -> io::Result<()>;

    /// Clear the current line and return to column 0.
    fn clear_line(&mut self) -> io::Result<()>;
    /// Clear from the cursor to the end of the screen.
    fn clear_below(&mut self) -> io::Result<()>;
    fn move_cursor_by(&mut self, dx: i32, dy: i32) -> io::Result<()>;
    fn move_to_column(&mut self, x: u16) -> io::Result<()>;

    fn try_buffer_width(&mut self) -> Result<usize, TermError>;
    fn try_buffer_height(&mut self) -> Result<usize, TermError>;

    /// Blocking read of one key event.
    fn read_key(&mut self) -> Result<KeyPress, TermError>;
    /// Blocking read of one line of text (cooked mode).
    fn read_line(&mut self) -> Result<String, TermError>;

    fn enter_raw(&mut self) -> Result<(), TermError>;
    fn exit_raw(&mut self) -> Result<(), TermError>;
    fn hide_cursor(&mut self) -> io::Result<()>;
    fn show_cursor(&mut self) -> io::Result<()>;
}

/// Production driver: crossterm commands queued onto any writer (normally
/// stdout, a string buffer in tests).
pub struct CrosstermDriver<W: Write> {
    pub write: W,
}

impl CrosstermDriver<io::Stdout> {
    pub fn stdout() -> Self {
        Self {
            write: io::stdout(),
        }
    }
}

impl<W: Write> Driver for CrosstermDriver<W> {
    /// Keys are read from the controlling terminal (crossterm falls back to
    /// `/dev/tty` when stdin is piped), so interactivity hinges on stdout
    /// being a tty we can draw on.
    fn is_interactive(&self) -> bool { io::stdout().is_tty() }

    fn write_styled(&mut self, text: &str, style: &Style) -> io::Result<()> {
        queue! {
            self.write,
            ResetColor,
            apply_style!(style => fg_color),
            apply_style!(style => bg_color),
            apply_style!(style => bold),
            apply_style!(style => dim),
            apply_style!(style => underline),
            apply_style!(style => reverse),
            Print(text.to_string()),
            ResetColor,
        }
    }

    fn write_plain(&mut self, text: &str) -> io::Result<()> {
        queue!(self.write, Print(text.to_string()))
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        queue!(self.write, Print(text.to_string()), MoveToNextLine(1))
    }

    fn next_line(&mut self) -> io::Result<()> { queue!(self.write, MoveToNextLine(1)) }

    fn flush(&mut self) -> io::Result<()> { self.write.flush() }

    fn clear_line(&mut self) -> io::Result<()> {
        queue!(self.write, Clear(ClearType::CurrentLine), MoveToColumn(0))
    }

    fn clear_below(&mut self) -> io::Result<()> {
        queue!(self.write, Clear(ClearType::FromCursorDown))
    }

    fn move_cursor_by(&mut self, dx: i32, dy: i32) -> io::Result<()> {
        if dx > 0 {
            queue!(self.write, MoveRight(dx as u16))?;
        } else if dx < 0 {
            queue!(self.write, MoveLeft(dx.unsigned_abs() as u16))?;
        }
        if dy > 0 {
            queue!(self.write, MoveDown(dy as u16))?;
        } else if dy < 0 {
            queue!(self.write, MoveUp(dy.unsigned_abs() as u16))?;
        }
        Ok(())
    }

    fn move_to_column(&mut self, x: u16) -> io::Result<()> {
        queue!(self.write, MoveToColumn(x))
    }

    fn try_buffer_width(&mut self) -> Result<usize, TermError> {
        let (columns, _) = size()?;
        Ok(columns as usize)
    }

    fn try_buffer_height(&mut self) -> Result<usize, TermError> {
        let (_, rows) = size()?;
        Ok(rows as usize)
    }

    fn read_key(&mut self) -> Result<KeyPress, TermError> {
        loop {
            match read()? {
                event @ Event::Key(_) => return Ok(keypress::translate(event)),
                // Resize and the rest are picked up at the next full repaint.
                _ => continue,
            }
        }
    }

    fn read_line(&mut self) -> Result<String, TermError> {
        self.write.flush()?;
        let mut buffer = String::new();
        let bytes_read = io::stdin().read_line(&mut buffer)?;
        if bytes_read == 0 {
            // EOF: nothing left to read on this stream.
            return Err(TermError::Unsupported);
        }
        Ok(buffer.trim_end_matches(['\r', '\n']).to_string())
    }

    fn enter_raw(&mut self) -> Result<(), TermError> {
        enable_raw_mode()?;
        Ok(())
    }

    fn exit_raw(&mut self) -> Result<(), TermError> {
        disable_raw_mode()?;
        Ok(())
    }

    fn hide_cursor(&mut self) -> io::Result<()> { queue!(self.write, Hide) }

    fn show_cursor(&mut self) -> io::Result<()> { queue!(self.write, Show) }
}

#[derive(Debug)]
pub enum StdinIsPipedResult {
    StdinIsPiped,
    StdinIsNotPiped,
}

#[derive(Debug)]
pub enum StdoutIsPipedResult {
    StdoutIsPiped,
    StdoutIsNotPiped,
}

/// If you run `echo "test" | pick` the following will return
/// [StdinIsPipedResult::StdinIsPiped].
pub fn is_stdin_piped() -> StdinIsPipedResult {
    if !io::stdin().is_tty() {
        StdinIsPipedResult::StdinIsPiped
    } else {
        StdinIsPipedResult::StdinIsNotPiped
    }
}

/// If you run `pick | grep foo` the following will return
/// [StdoutIsPipedResult::StdoutIsPiped].
pub fn is_stdout_piped() -> StdoutIsPipedResult {
    if !io::stdout().is_tty() {
        StdoutIsPipedResult::StdoutIsPiped
    } else {
        StdoutIsPipedResult::StdoutIsNotPiped
    }
}
