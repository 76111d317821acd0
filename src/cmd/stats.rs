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

use std::fmt::Display;
use std::fmt::Formatter;
use std::path::Path;

use clap::ValueEnum;
use serde::Serialize;

use crate::db::Database;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;

#[derive(ValueEnum, Clone)]
pub enum StatsFormat {
    /// Human-readable output.
    Text,
    /// JSON output.
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Text => write!(f, "text"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsReport {
    questions_answered: u32,
    correct_answers: u32,
    accuracy: u32,
    current_streak: u32,
    days_answered: usize,
}

pub fn print_stats(directory: &Path, format: StatsFormat) -> Fallible<()> {
    if !directory.exists() {
        return fail("directory does not exist.");
    }
    let db_path = directory.join("qotd.sqlite3");
    let db = Database::new(
        db_path
            .to_str()
            .ok_or_else(|| ErrorReport::new("invalid path"))?,
    )?;

    let stats = db.stats()?;
    let streak = db.streak()?;
    let report = StatsReport {
        questions_answered: stats.questions_answered,
        correct_answers: stats.correct_answers,
        accuracy: stats.accuracy,
        current_streak: streak.current,
        days_answered: db.answered_dates()?.len(),
    };

    match format {
        StatsFormat::Text => {
            println!("Questions answered: {}", report.questions_answered);
            println!("Correct answers:    {}", report.correct_answers);
            println!("Accuracy:           {}%", report.accuracy);
            println!("Current streak:     {}", report.current_streak);
            println!("Days answered:      {}", report.days_answered);
        }
        StatsFormat::Json => {
            let report_json = serde_json::to_string_pretty(&report)?;
            println!("{}", report_json);
        }
    }
    Ok(())
}
