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

pub type QuestionId = u32;

/// A multiple-choice trivia question. Loaded once at startup, never mutated.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub choices: Vec<String>,
    /// Zero-based index into `choices`.
    pub correct: usize,
    pub explanation: String,
    pub subject: String,
    pub difficulty: String,
}

impl Question {
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct
    }

    pub fn correct_choice(&self) -> &str {
        &self.choices[self.correct]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_correct() {
        let question = Question {
            id: 1,
            text: "What is 2+2?".to_string(),
            choices: vec!["3".to_string(), "4".to_string()],
            correct: 1,
            explanation: "Basic arithmetic.".to_string(),
            subject: "Math".to_string(),
            difficulty: "Easy".to_string(),
        };
        assert!(question.is_correct(1));
        assert!(!question.is_correct(0));
        assert_eq!(question.correct_choice(), "4");
    }
}
