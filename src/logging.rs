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

use tracing_appender::non_blocking::WorkerGuard;

/// Send `tracing` output to `log.txt` in the working directory. You can use
/// `tail -f log.txt` to watch the logs without disturbing the TUI, which owns
/// stdout for the duration of a session.
///
/// Returns `None` when a global subscriber is already installed. Keep the
/// guard alive for as long as logging should flush.
pub fn try_initialize_logging() -> Option<WorkerGuard> {
    let file_appender = tracing_appender::rolling::never(".", "log.txt");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let result = tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
    match result {
        Ok(()) => Some(guard),
        Err(_) => None,
    }
}
