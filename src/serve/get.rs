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

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use maud::Markup;
use maud::html;

use crate::calendar::month_view;
use crate::error::Fallible;
use crate::scheduler::Today;
use crate::scheduler::decide_today;
use crate::serve::state::MutableState;
use crate::serve::state::ServerState;
use crate::serve::view::calendar_view;
use crate::serve::view::completed_view;
use crate::serve::view::error_view;
use crate::serve::view::explanation_view;
use crate::serve::view::page_template;
use crate::serve::view::question_view;
use crate::serve::view::stats_view;

pub async fn get_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let mutable = state.mutable.lock().unwrap();
    let body = match page_body(&state, &mutable) {
        Ok(body) => body,
        Err(e) => {
            log::error!("{e}");
            error_view("Failed to load questions. Please refresh the page.")
        }
    };
    let html = page_template(body);
    (StatusCode::OK, Html(html.into_string()))
}

fn page_body(state: &ServerState, mutable: &MutableState) -> Fallible<Markup> {
    let today = state.today;
    let card = match decide_today(&mutable.db, &mutable.questions, today)? {
        Today::AwaitingAnswer(question) => question_view(&question, mutable.selected, today),
        Today::Completed => match &mutable.outcome {
            Some((question, outcome)) => explanation_view(question, outcome, today),
            None => completed_view(mutable.db.streak()?, today),
        },
    };
    let stats = stats_view(mutable.db.stats()?, mutable.db.streak()?);
    let answered = mutable.db.answered_dates()?;
    let calendar = calendar_view(&month_view(
        mutable.calendar.year,
        mutable.calendar.month,
        today,
        &answered,
    ));
    Ok(html! {
        div.root {
            (card)
            (stats)
            (calendar)
        }
    })
}
