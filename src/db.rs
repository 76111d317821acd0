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

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::Transaction;
use rusqlite::config::DbConfig;

use crate::error::Fallible;
use crate::types::date::Date;
use crate::types::question::QuestionId;
use crate::types::stats::Stats;
use crate::types::streak::Streak;

/// The persistence layer: a string-keyed store over SQLite, one key per
/// piece of app state. Every getter falls back to a documented default when
/// the key is absent, and logs and falls back when the stored value fails to
/// parse, so corrupt state never blocks the user.
pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn new(database_path: &str) -> Fallible<Self> {
        let conn = Connection::open(database_path)?;
        Self::init(conn)
    }

    #[cfg(test)]
    pub fn in_memory() -> Fallible<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(mut conn: Connection) -> Fallible<Self> {
        conn.set_db_config(DbConfig::SQLITE_DBCONFIG_ENABLE_FKEY, true)?;
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        Ok(Self { conn })
    }

    /// Overall answer statistics. Accuracy is recomputed from the counters,
    /// in case the stored value is stale.
    pub fn stats(&self) -> Fallible<Stats> {
        let stats = match self.get_raw("stats")? {
            Some(value) => match serde_json::from_str::<Stats>(&value) {
                Ok(stats) => stats,
                Err(e) => {
                    log::warn!("Discarding corrupt stats: {e}");
                    Stats::default()
                }
            },
            None => Stats::default(),
        };
        Ok(stats.recompute())
    }

    pub fn set_stats(&self, stats: Stats) -> Fallible<()> {
        self.set_raw("stats", &serde_json::to_string(&stats)?)
    }

    /// The set of question ids answered in the current cycle.
    pub fn answered_questions(&self) -> Fallible<HashSet<QuestionId>> {
        match self.get_raw("answered_question_ids")? {
            Some(value) => match serde_json::from_str(&value) {
                Ok(ids) => Ok(ids),
                Err(e) => {
                    log::warn!("Discarding corrupt answered-question set: {e}");
                    Ok(HashSet::new())
                }
            },
            None => Ok(HashSet::new()),
        }
    }

    pub fn set_answered_questions(&self, ids: &HashSet<QuestionId>) -> Fallible<()> {
        let mut ids: Vec<QuestionId> = ids.iter().copied().collect();
        ids.sort_unstable();
        self.set_raw("answered_question_ids", &serde_json::to_string(&ids)?)
    }

    /// The set of dates on which a question was answered. Append-only, used
    /// for calendar rendering.
    pub fn answered_dates(&self) -> Fallible<HashSet<Date>> {
        match self.get_raw("answered_dates")? {
            Some(value) => match serde_json::from_str(&value) {
                Ok(dates) => Ok(dates),
                Err(e) => {
                    log::warn!("Discarding corrupt answered-date set: {e}");
                    Ok(HashSet::new())
                }
            },
            None => Ok(HashSet::new()),
        }
    }

    pub fn add_answered_date(&self, date: Date) -> Fallible<()> {
        let mut dates = self.answered_dates()?;
        if dates.insert(date) {
            let mut dates: Vec<Date> = dates.into_iter().collect();
            dates.sort();
            self.set_raw("answered_dates", &serde_json::to_string(&dates)?)?;
        }
        Ok(())
    }

    /// The daily gate: the last day a question was shown and completed.
    pub fn last_question_date(&self) -> Fallible<Option<Date>> {
        self.get_date("last_question_date")
    }

    pub fn set_last_question_date(&self, date: Date) -> Fallible<()> {
        self.set_raw("last_question_date", &date.to_string())
    }

    /// The last day the answered-question set was reset, guarding the
    /// cycle reset so it happens at most once per day.
    pub fn last_reset_date(&self) -> Fallible<Option<Date>> {
        self.get_date("last_reset_date")
    }

    pub fn set_last_reset_date(&self, date: Date) -> Fallible<()> {
        self.set_raw("last_reset_date", &date.to_string())
    }

    pub fn streak(&self) -> Fallible<Streak> {
        let current = match self.get_raw("current_streak")? {
            Some(value) => match value.parse() {
                Ok(current) => current,
                Err(e) => {
                    log::warn!("Discarding corrupt streak counter: {e}");
                    0
                }
            },
            None => 0,
        };
        let last_date = self.get_date("last_streak_date")?;
        Ok(Streak { current, last_date })
    }

    pub fn set_streak(&self, streak: &Streak) -> Fallible<()> {
        self.set_raw("current_streak", &streak.current.to_string())?;
        if let Some(date) = streak.last_date {
            self.set_raw("last_streak_date", &date.to_string())?;
        }
        Ok(())
    }

    fn get_date(&self, key: &str) -> Fallible<Option<Date>> {
        match self.get_raw(key)? {
            Some(value) => match Date::parse(&value) {
                Ok(date) => Ok(Some(date)),
                Err(e) => {
                    log::warn!("Discarding corrupt date for key '{key}': {e}");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    fn get_raw(&self, key: &str) -> Fallible<Option<String>> {
        let sql = "select value from state where key = ?;";
        let value = self
            .conn
            .query_row(sql, [key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn set_raw(&self, key: &str, value: &str) -> Fallible<()> {
        let sql = "insert or replace into state (key, value) values (?, ?);";
        self.conn.execute(sql, (key, value))?;
        Ok(())
    }
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, ["state"], |row| row.get(0))?;
    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn date(year: i32, month: u32, day: u32) -> Date {
        Date::new(NaiveDate::from_ymd_opt(year, month, day).unwrap())
    }

    #[test]
    fn test_defaults_on_empty_database() -> Fallible<()> {
        let db = Database::in_memory()?;
        assert_eq!(db.stats()?, Stats::default());
        assert!(db.answered_questions()?.is_empty());
        assert!(db.answered_dates()?.is_empty());
        assert_eq!(db.last_question_date()?, None);
        assert_eq!(db.last_reset_date()?, None);
        assert_eq!(db.streak()?, Streak::default());
        Ok(())
    }

    #[test]
    fn test_stats_roundtrip_recomputes_accuracy() -> Fallible<()> {
        let db = Database::in_memory()?;
        let stats = Stats {
            questions_answered: 2,
            correct_answers: 1,
            // Deliberately stale.
            accuracy: 99,
        };
        db.set_stats(stats)?;
        assert_eq!(db.stats()?.accuracy, 50);
        Ok(())
    }

    #[test]
    fn test_answered_questions_roundtrip() -> Fallible<()> {
        let db = Database::in_memory()?;
        let ids: HashSet<QuestionId> = [3, 1, 2].into_iter().collect();
        db.set_answered_questions(&ids)?;
        assert_eq!(db.answered_questions()?, ids);
        db.set_answered_questions(&HashSet::new())?;
        assert!(db.answered_questions()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_answered_dates_are_append_only_set() -> Fallible<()> {
        let db = Database::in_memory()?;
        db.add_answered_date(date(2024, 1, 1))?;
        db.add_answered_date(date(2024, 1, 2))?;
        db.add_answered_date(date(2024, 1, 1))?;
        assert_eq!(db.answered_dates()?.len(), 2);
        Ok(())
    }

    #[test]
    fn test_gate_roundtrip() -> Fallible<()> {
        let db = Database::in_memory()?;
        db.set_last_question_date(date(2024, 1, 1))?;
        assert_eq!(db.last_question_date()?, Some(date(2024, 1, 1)));
        Ok(())
    }

    #[test]
    fn test_streak_roundtrip() -> Fallible<()> {
        let db = Database::in_memory()?;
        let streak = Streak {
            current: 4,
            last_date: Some(date(2024, 1, 4)),
        };
        db.set_streak(&streak)?;
        assert_eq!(db.streak()?, streak);
        Ok(())
    }

    #[test]
    fn test_corrupt_stats_fall_back_to_default() -> Fallible<()> {
        let db = Database::in_memory()?;
        db.set_raw("stats", "{not json")?;
        assert_eq!(db.stats()?, Stats::default());
        Ok(())
    }

    #[test]
    fn test_corrupt_date_falls_back_to_none() -> Fallible<()> {
        let db = Database::in_memory()?;
        db.set_raw("last_question_date", "yesterdayish")?;
        assert_eq!(db.last_question_date()?, None);
        Ok(())
    }

    #[test]
    fn test_corrupt_streak_counter_falls_back_to_zero() -> Fallible<()> {
        let db = Database::in_memory()?;
        db.set_raw("current_streak", "eleven")?;
        assert_eq!(db.streak()?.current, 0);
        Ok(())
    }

    #[test]
    fn test_overwrite_replaces_value() -> Fallible<()> {
        let db = Database::in_memory()?;
        db.set_last_question_date(date(2024, 1, 1))?;
        db.set_last_question_date(date(2024, 1, 2))?;
        assert_eq!(db.last_question_date()?, Some(date(2024, 1, 2)));
        Ok(())
    }

    #[test]
    fn test_schema_probe_is_idempotent() -> Fallible<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("qotd.sqlite3");
        let path = path.to_str().unwrap();
        {
            let db = Database::new(path)?;
            db.set_last_question_date(date(2024, 1, 1))?;
        }
        let db = Database::new(path)?;
        assert_eq!(db.last_question_date()?, Some(date(2024, 1, 1)));
        Ok(())
    }
}
