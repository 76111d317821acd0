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

use std::collections::HashSet;

use chrono::Datelike;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::db::Database;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::date::Date;
use crate::types::question::Question;
use crate::types::question::QuestionId;
use crate::types::stats::Stats;
use crate::types::streak::Streak;

/// What to show for the current day.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Today {
    /// Today's question has already been answered.
    Completed,
    /// A question is waiting to be answered.
    AwaitingAnswer(Question),
}

/// The result of submitting an answer.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub stats: Stats,
    pub streak: Streak,
}

/// Decide what to show for `today`.
///
/// At most one question is presented per calendar day: if the gate is set to
/// today, the day is complete. Otherwise a question is picked uniformly from
/// the unanswered pool; when the pool is exhausted the answered set is
/// cleared (at most once per day) and the pick is over the full pool.
///
/// The selection RNG is seeded from the date, so repeated calls on the same
/// day return the same question.
pub fn decide_today(db: &Database, questions: &[Question], today: Date) -> Fallible<Today> {
    if questions.is_empty() {
        return fail("no questions available.");
    }
    if db.last_question_date()? == Some(today) {
        return Ok(Today::Completed);
    }
    let answered = db.answered_questions()?;
    let mut rng = day_rng(today);
    let question = match random_unanswered(questions, &answered, &mut rng) {
        Some(question) => question,
        None => {
            reset_cycle(db, today)?;
            pick_any_random(questions, &mut rng)
        }
    };
    Ok(Today::AwaitingAnswer(question.clone()))
}

/// Record the user's answer to today's question and persist every piece of
/// derived state.
pub fn submit_answer(
    db: &Database,
    question: &Question,
    selected: usize,
    today: Date,
) -> Fallible<AnswerOutcome> {
    let correct = question.is_correct(selected);
    log::debug!(
        "Answer for question {}: choice {selected} ({})",
        question.id,
        if correct { "correct" } else { "incorrect" }
    );

    let stats = db.stats()?.record_answer(correct);
    db.set_stats(stats)?;

    let mut answered = db.answered_questions()?;
    answered.insert(question.id);
    db.set_answered_questions(&answered)?;

    // Close the gate for today.
    db.set_last_question_date(today)?;
    db.add_answered_date(today)?;

    let streak = db.streak()?.update(today);
    db.set_streak(&streak)?;

    Ok(AnswerOutcome {
        correct,
        stats,
        streak,
    })
}

/// Pick a uniformly random question whose id is not in the answered set.
fn random_unanswered<'a>(
    questions: &'a [Question],
    answered: &HashSet<QuestionId>,
    rng: &mut impl Rng,
) -> Option<&'a Question> {
    let available: Vec<&Question> = questions
        .iter()
        .filter(|question| !answered.contains(&question.id))
        .collect();
    available.choose(rng).copied()
}

/// Pick a uniformly random question from the full pool.
fn pick_any_random<'a>(questions: &'a [Question], rng: &mut impl Rng) -> &'a Question {
    &questions[rng.gen_range(0..questions.len())]
}

// The reset is guarded by its own date marker so that repeated calls on the
// same day do not clear the set twice.
fn reset_cycle(db: &Database, today: Date) -> Fallible<()> {
    if db.last_reset_date()? == Some(today) {
        return Ok(());
    }
    log::debug!("All questions answered. Starting a new cycle.");
    db.set_answered_questions(&HashSet::new())?;
    db.set_last_reset_date(today)?;
    Ok(())
}

fn day_rng(today: Date) -> StdRng {
    StdRng::seed_from_u64(today.into_inner().num_days_from_ce() as u64)
}
