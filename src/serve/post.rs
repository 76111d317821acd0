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

use axum::Form;
use axum::extract::State;
use axum::response::Redirect;
use serde::Deserialize;

use crate::error::Fallible;
use crate::scheduler::Today;
use crate::scheduler::decide_today;
use crate::scheduler::submit_answer;
use crate::serve::state::ServerState;

#[derive(Debug, Deserialize)]
enum Action {
    Select,
    Submit,
    PrevMonth,
    NextMonth,
}

#[derive(Deserialize)]
pub struct FormData {
    action: Action,
    choice: Option<usize>,
}

pub async fn post_handler(State(state): State<ServerState>, Form(form): Form<FormData>) -> Redirect {
    match action_handler(state, form) {
        Ok(_) => {}
        Err(e) => {
            log::error!("{e}");
        }
    }
    Redirect::to("/")
}

fn action_handler(state: ServerState, form: FormData) -> Fallible<()> {
    let mut mutable = state.mutable.lock().unwrap();
    let today = state.today;
    match form.action {
        Action::Select => {
            let choice = match form.choice {
                Some(choice) => choice,
                None => {
                    log::error!("Select action without a choice.");
                    return Ok(());
                }
            };
            match decide_today(&mutable.db, &mutable.questions, today)? {
                Today::AwaitingAnswer(question) => {
                    if choice < question.choices.len() {
                        mutable.selected = Some(choice);
                    } else {
                        log::error!("Choice index {choice} out of range.");
                    }
                }
                Today::Completed => {
                    log::error!("Selecting a choice after today's question was answered.");
                }
            }
        }
        Action::Submit => {
            let selected = match mutable.selected {
                Some(selected) => selected,
                None => {
                    log::error!("Submitting without a selected choice.");
                    return Ok(());
                }
            };
            match decide_today(&mutable.db, &mutable.questions, today)? {
                Today::AwaitingAnswer(question) => {
                    let outcome = submit_answer(&mutable.db, &question, selected, today)?;
                    mutable.outcome = Some((question, outcome));
                    mutable.selected = None;
                }
                Today::Completed => {
                    log::error!("Answering a question that was already answered today.");
                }
            }
        }
        Action::PrevMonth | Action::NextMonth => {
            let direction = match form.action {
                Action::PrevMonth => -1,
                _ => 1,
            };
            if !mutable.calendar.navigate(direction) {
                log::debug!("Calendar navigation already in progress.");
            }
        }
    }
    Ok(())
}
