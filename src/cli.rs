// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::PathBuf;

use clap::Parser;

use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::print_stats;
use crate::error::Fallible;
use crate::serve::server::start_server;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Serve the question of the day.
    Serve {
        /// Optional path to the data directory (questions.csv and the
        /// state database).
        directory: Option<String>,
        /// Port to bind.
        #[arg(long, default_value_t = 8000)]
        port: u16,
    },
    /// Print answer statistics.
    Stats {
        /// Optional path to the data directory.
        directory: Option<String>,
        /// Output format.
        #[arg(long, default_value_t = StatsFormat::Text)]
        format: StatsFormat,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Serve { directory, port } => {
            let directory = resolve_directory(directory)?;
            start_server(directory, port).await
        }
        Command::Stats { directory, format } => {
            let directory = resolve_directory(directory)?;
            print_stats(&directory, format)
        }
    }
}

fn resolve_directory(directory: Option<String>) -> Fallible<PathBuf> {
    let directory = match directory {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir()?,
    };
    Ok(directory)
}
