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
use chrono::NaiveDate;

use crate::types::date::Date;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// One day cell in the month grid.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DayCell {
    pub day: u32,
    pub is_today: bool,
    pub is_answered: bool,
}

/// A rendered month. `cells` is Sunday-first; `None` cells pad the first
/// week up to the weekday of the 1st.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CalendarView {
    pub year: i32,
    pub month: u32,
    pub title: String,
    pub cells: Vec<Option<DayCell>>,
}

/// Build the grid for the given month.
pub fn month_view(year: i32, month: u32, today: Date, answered: &HashSet<Date>) -> CalendarView {
    let title = format!("{} {year}", MONTH_NAMES[(month - 1) as usize]);
    let mut cells = Vec::new();
    for _ in 0..weekday_of_first(year, month) {
        cells.push(None);
    }
    for day in 1..=days_in_month(year, month) {
        let date = Date::new(first_of_month(year, month).with_day(day).unwrap());
        cells.push(Some(DayCell {
            day,
            is_today: date == today,
            is_answered: answered.contains(&date),
        }));
    }
    CalendarView {
        year,
        month,
        title,
        cells,
    }
}

/// The month currently displayed, which may differ from the real month.
/// The `navigating` flag serializes navigation: a second navigation is
/// refused while one is in progress, and is released synchronously when the
/// month change completes rather than on a timer.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CalendarState {
    pub year: i32,
    /// One-based, always in 1..=12.
    pub month: u32,
    navigating: bool,
}

impl CalendarState {
    pub fn new(today: Date) -> Self {
        Self {
            year: today.year(),
            month: today.month(),
            navigating: false,
        }
    }

    /// Move the displayed month by `direction` (-1 or +1), normalizing year
    /// rollover. Returns false if a prior navigation is still in progress.
    pub fn navigate(&mut self, direction: i32) -> bool {
        if self.navigating {
            return false;
        }
        self.navigating = true;
        let (year, month) = shift_month(self.year, self.month, direction);
        self.year = year;
        self.month = month;
        self.navigating = false;
        true
    }

    #[cfg(test)]
    fn lock(&mut self) {
        self.navigating = true;
    }
}

fn shift_month(year: i32, month: u32, direction: i32) -> (i32, u32) {
    let total = year * 12 + (month as i32 - 1) + direction;
    (total.div_euclid(12), (total.rem_euclid(12) + 1) as u32)
}

fn weekday_of_first(year: i32, month: u32) -> u32 {
    first_of_month(year, month).weekday().num_days_from_sunday()
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = shift_month(year, month, 1);
    let first_of_next = first_of_month(next_year, next_month);
    (first_of_next - chrono::Duration::days(1)).day()
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    // Month is always in range, so this cannot fail.
    NaiveDate::from_ymd_opt(year, month, 1).unwrap()
}
