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

use crate::types::date::Date;

/// Consecutive-day answering streak. Answering on consecutive days extends
/// it; a gap of more than one day starts over. Correctness does not matter.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct Streak {
    pub current: u32,
    pub last_date: Option<Date>,
}

impl Streak {
    /// Fold an answer given on `today` into the streak. Called once per
    /// answer submission.
    pub fn update(self, today: Date) -> Self {
        match self.last_date {
            // Already counted today.
            Some(last) if last == today => self,
            Some(last) if last == today.yesterday() => Self {
                current: self.current + 1,
                last_date: Some(today),
            },
            _ => Self {
                current: 1,
                last_date: Some(today),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn date(year: i32, month: u32, day: u32) -> Date {
        Date::new(NaiveDate::from_ymd_opt(year, month, day).unwrap())
    }

    #[test]
    fn test_first_answer_starts_streak() {
        let today = date(2024, 1, 1);
        let streak = Streak::default().update(today);
        assert_eq!(streak.current, 1);
        assert_eq!(streak.last_date, Some(today));
    }

    #[test]
    fn test_consecutive_day_increments() {
        let streak = Streak {
            current: 3,
            last_date: Some(date(2024, 1, 1)),
        };
        let streak = streak.update(date(2024, 1, 2));
        assert_eq!(streak.current, 4);
        assert_eq!(streak.last_date, Some(date(2024, 1, 2)));
    }

    #[test]
    fn test_same_day_is_unchanged() {
        let streak = Streak {
            current: 3,
            last_date: Some(date(2024, 1, 1)),
        };
        assert_eq!(streak.update(date(2024, 1, 1)), streak);
    }

    #[test]
    fn test_gap_resets_to_one() {
        let streak = Streak {
            current: 9,
            last_date: Some(date(2024, 1, 1)),
        };
        let streak = streak.update(date(2024, 1, 3));
        assert_eq!(streak.current, 1);
        assert_eq!(streak.last_date, Some(date(2024, 1, 3)));
    }

    #[test]
    fn test_increment_across_month_boundary() {
        let streak = Streak {
            current: 1,
            last_date: Some(date(2024, 1, 31)),
        };
        let streak = streak.update(date(2024, 2, 1));
        assert_eq!(streak.current, 2);
    }
}
