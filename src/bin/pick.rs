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

use std::{io::{stdin, BufRead},
          process::Command};

use clap::Parser;
use miette::{miette, IntoDiagnostic, Result};
use pickgrid::{choose, is_stdin_piped, is_stdout_piped, logging, ItemCollection,
               Options, SelectionKind, StdinIsPipedResult::*, StdoutIsPipedResult::*,
               DEVELOPMENT_MODE};

const SELECTED_ITEM_SYMBOL: char = '%';

#[derive(Debug, Parser)]
#[command(bin_name = "pick")]
#[command(about = "Pick one line from piped stdin via a multi-column grid TUI", long_about = None)]
#[command(version)]
#[command(next_line_help = true)]
struct CliArgs {
    /// The selected line is passed to this command as `%` and executed in
    /// your shell. For eg: "echo %". Please wrap the command in quotes.
    #[arg(value_name = "command", long, short = 'c')]
    command_to_run_with_selection: Option<String>,

    /// Number of grid columns. Default: one item per line.
    #[arg(value_name = "columns", long, short = 'n')]
    columns: Option<usize>,

    /// Optional maximum number of rows per page. Default: computed from the
    /// terminal height.
    #[arg(value_name = "rows", long, short = 't')]
    max_rows: Option<usize>,

    /// The prompt shown below the grid.
    #[arg(value_name = "question", long, short = 'q')]
    question: Option<String>,
}

fn main() -> Result<()> {
    let _log_guard = if DEVELOPMENT_MODE {
        logging::try_initialize_logging()
    } else {
        None
    };

    let cli_args = CliArgs::parse();

    // Unix pipes are non blocking, so the selection cannot be piped onward;
    // use -c to hand it to another command instead.
    match (is_stdin_piped(), is_stdout_piped()) {
        (_, StdoutIsPiped) => Err(miette!(
            "do not pipe the output of pick to another command; \
             pass the follow-up command via -c \"cmd %\" instead"
        )),
        (StdinIsNotPiped, _) => Err(miette!(
            "pipe the lines to select from into pick, eg: `ls | pick`"
        )),
        (StdinIsPiped, StdoutIsNotPiped) => run(cli_args),
    }
}

fn run(cli_args: CliArgs) -> Result<()> {
    let lines: Vec<String> = stdin()
        .lock()
        .lines()
        .collect::<std::io::Result<_>>()
        .into_diagnostic()?;

    // Nothing to do. No content found in stdin.
    if lines.is_empty() {
        return Ok(());
    }

    let items = ItemCollection::from_titles(lines);
    let options = Options {
        columns: cli_args.columns,
        max_rows: cli_args.max_rows,
        question: cli_args
            .question
            .unwrap_or_else(|| "Select an item".into()),
        tips: Some("arrows move, Enter selects, Esc cancels, Backspace to type".into()),
        ..Options::default()
    };

    let selection = choose(&items, &options);

    if DEVELOPMENT_MODE {
        tracing::debug!("selection: {selection:?}");
    }

    match selection.kind {
        SelectionKind::Selected | SelectionKind::Typed => {
            let picked = if selection.kind == SelectionKind::Selected {
                selection.title
            } else {
                selection.raw_input
            };
            if picked.is_empty() {
                return Ok(());
            }
            match &cli_args.command_to_run_with_selection {
                Some(template) => execute_command(
                    &template.replace(SELECTED_ITEM_SYMBOL, &picked),
                ),
                None => {
                    println!("{picked}");
                    Ok(())
                }
            }
        }
        SelectionKind::Canceled => Ok(()),
        SelectionKind::NotSupported => Err(miette!(
            "this terminal supports neither cursor control nor line input"
        )),
    }
}

fn execute_command(cmd_str: &str) -> Result<()> {
    // Bound separately so the arg chain below can borrow it.
    let mut command = if cfg!(target_os = "windows") {
        Command::new("cmd")
    } else {
        Command::new("sh")
    };

    let command = if cfg!(target_os = "windows") {
        command.arg("/C").arg(cmd_str)
    } else {
        command.arg("-c").arg(cmd_str)
    };

    let output = command.output().into_diagnostic()?;
    print!("{}", String::from_utf8_lossy(&output.stdout));
    Ok(())
}
