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

use maud::DOCTYPE;
use maud::Markup;
use maud::html;

use crate::calendar::CalendarView;
use crate::scheduler::AnswerOutcome;
use crate::types::date::Date;
use crate::types::question::Question;
use crate::types::stats::Stats;
use crate::types::streak::Streak;

const CHOICE_LETTERS: [&str; 4] = ["A", "B", "C", "D"];

pub fn page_template(body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Question of the Day" }
                link rel="stylesheet" href="/style.css";
            }
            body {
                (body)
            }
        }
    }
}

/// The question card: lettered choices, each a form that selects it, plus a
/// submit button enabled once a choice is selected.
pub fn question_view(question: &Question, selected: Option<usize>, today: Date) -> Markup {
    html! {
        div.card {
            div.header {
                span.subject { (question.subject) }
                span.difficulty { (question.difficulty) }
                span.date { (today.long()) }
            }
            h2.question { (question.text) }
            div.choices {
                @for (index, choice) in question.choices.iter().enumerate() {
                    form action="/" method="post" {
                        input type="hidden" name="choice" value=(index);
                        @if selected == Some(index) {
                            button.choice.selected type="submit" name="action" value="Select" {
                                span.letter { (CHOICE_LETTERS[index]) }
                                span.text { (choice) }
                            }
                        } @else {
                            button.choice type="submit" name="action" value="Select" {
                                span.letter { (CHOICE_LETTERS[index]) }
                                span.text { (choice) }
                            }
                        }
                    }
                }
            }
            form.controls action="/" method="post" {
                @if selected.is_some() {
                    input id="submit" type="submit" name="action" value="Submit";
                } @else {
                    input id="submit" type="submit" name="action" value="Submit" disabled;
                }
            }
        }
    }
}

/// Shown immediately after submitting: correctness, the correct answer, and
/// the explanation.
pub fn explanation_view(question: &Question, outcome: &AnswerOutcome, today: Date) -> Markup {
    html! {
        div.card {
            div.header {
                span.subject { "Question Completed!" }
                span.date { (today.long()) }
            }
            @if outcome.correct {
                h2.result.correct { "That's correct!" }
            } @else {
                h2.result.incorrect { "Not quite right, but here's why:" }
            }
            p.correct-answer {
                "Correct Answer: "
                strong { (question.correct_choice()) }
            }
            h3 { "Explanation:" }
            p.explanation { (question.explanation) }
            (streak_line(outcome.streak))
            p.come-back { "Come back tomorrow for a new challenge!" }
        }
    }
}

/// Shown when today's question was answered in an earlier session.
pub fn completed_view(streak: Streak, today: Date) -> Markup {
    html! {
        div.card {
            div.header {
                span.subject { "Today's Question" }
                span.date { (today.long()) }
            }
            h2.question { "You've already answered today's question!" }
            (streak_line(streak))
            p.come-back { "Come back tomorrow for a new challenge!" }
        }
    }
}

fn streak_line(streak: Streak) -> Markup {
    html! {
        p.streak {
            "Current Streak: "
            strong { (streak.current) }
            " days"
        }
    }
}

pub fn error_view(message: &str) -> Markup {
    html! {
        div.card {
            h2.error { (message) }
        }
    }
}

pub fn stats_view(stats: Stats, streak: Streak) -> Markup {
    html! {
        div.stats {
            div.stat {
                span.value { (streak.current) }
                span.label { "Day Streak" }
            }
            div.stat {
                span.value { (stats.correct_answers) }
                span.label { "Correct" }
            }
            div.stat {
                span.value { (stats.accuracy) "%" }
                span.label { "Accuracy" }
            }
        }
    }
}

pub fn calendar_view(view: &CalendarView) -> Markup {
    html! {
        div.calendar {
            div.calendar-header {
                form action="/" method="post" {
                    input id="prev-month" type="submit" name="action" value="PrevMonth";
                }
                span.month { (view.title) }
                form action="/" method="post" {
                    input id="next-month" type="submit" name="action" value="NextMonth";
                }
            }
            div.calendar-grid {
                @for name in ["S", "M", "T", "W", "T", "F", "S"] {
                    div.day-header { (name) }
                }
                @for cell in &view.cells {
                    @match cell {
                        None => { div.day.empty {} },
                        Some(cell) => {
                            @if cell.is_today && cell.is_answered {
                                div.day.today.answered { (cell.day) span.fire { "🔥" } }
                            } @else if cell.is_today {
                                div.day.today { (cell.day) }
                            } @else if cell.is_answered {
                                div.day.answered { (cell.day) span.fire { "🔥" } }
                            } @else {
                                div.day { (cell.day) }
                            }
                        }
                    }
                }
            }
        }
    }
}
