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

use std::sync::Arc;
use std::sync::Mutex;

use crate::calendar::CalendarState;
use crate::db::Database;
use crate::scheduler::AnswerOutcome;
use crate::types::date::Date;
use crate::types::question::Question;

#[derive(Clone)]
pub struct ServerState {
    pub today: Date,
    pub mutable: Arc<Mutex<MutableState>>,
}

pub struct MutableState {
    pub db: Database,
    pub questions: Vec<Question>,
    /// The currently selected choice, before submission.
    pub selected: Option<usize>,
    /// The question and outcome of an answer submitted this session, used
    /// to render the explanation view.
    pub outcome: Option<(Question, AnswerOutcome)>,
    pub calendar: CalendarState,
}
