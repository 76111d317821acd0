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

use serde::Deserialize;
use serde::Serialize;

/// Running answer statistics.
///
/// `accuracy` is derived from the two counters and recomputed on every
/// mutation and on load, so a stale stored value never survives.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub questions_answered: u32,
    pub correct_answers: u32,
    #[serde(default)]
    pub accuracy: u32,
}

impl Stats {
    pub fn record_answer(self, correct: bool) -> Self {
        let stats = Self {
            questions_answered: self.questions_answered + 1,
            correct_answers: self.correct_answers + if correct { 1 } else { 0 },
            accuracy: self.accuracy,
        };
        stats.recompute()
    }

    /// Recompute `accuracy` from the counters. Zero when nothing has been
    /// answered yet.
    pub fn recompute(self) -> Self {
        let accuracy = if self.questions_answered > 0 {
            let ratio = self.correct_answers as f64 / self.questions_answered as f64;
            (ratio * 100.0).round() as u32
        } else {
            0
        };
        Self { accuracy, ..self }
    }
}
