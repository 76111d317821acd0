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

use std::path::Path;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::question::Question;

/// Read and parse a question file. Fails if the file cannot be read or no
/// questions survive parsing.
pub fn load_questions(path: &Path) -> Fallible<Vec<Question>> {
    if !path.exists() {
        return fail("question file does not exist.");
    }
    let content = std::fs::read_to_string(path)?;
    let questions = parse_questions(&content);
    if questions.is_empty() {
        return fail("no questions could be loaded.");
    }
    Ok(questions)
}

/// Parse the question CSV. The first line is a header. Each row:
///
/// ```text
/// id,question,"choice1,choice2,choice3,choice4",correct_index,explanation,subject,difficulty
/// ```
///
/// Quoted fields may contain commas. Malformed rows are skipped.
pub fn parse_questions(content: &str) -> Vec<Question> {
    let mut questions = Vec::new();
    for line in content.trim().lines().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        match parse_row(line) {
            Some(question) => questions.push(question),
            None => log::debug!("Skipping malformed question row: {line}"),
        }
    }
    questions
}

fn parse_row(line: &str) -> Option<Question> {
    let fields = split_line(line);
    if fields.len() < 7 {
        return None;
    }
    let id = fields[0].parse().ok()?;
    let choices: Vec<String> = fields[2]
        .split(',')
        .map(|choice| choice.trim().to_string())
        .collect();
    // A question carries between two and four choices.
    if choices.len() < 2 || choices.len() > 4 {
        return None;
    }
    let correct: usize = fields[3].parse().ok()?;
    if correct >= choices.len() {
        return None;
    }
    Some(Question {
        id,
        text: fields[1].clone(),
        choices,
        correct,
        explanation: fields[4].clone(),
        subject: fields[5].clone(),
        difficulty: fields[6].clone(),
    })
}

// Splits a CSV line on commas, treating double quotes as field delimiters.
// The quotes themselves are dropped.
fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for c in line.chars() {
        if c == '"' {
            in_quotes = !in_quotes;
        } else if c == ',' && !in_quotes {
            fields.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(c);
        }
    }
    fields.push(current.trim().to_string());
    fields
}
