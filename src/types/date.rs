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

use std::fmt::Display;
use std::fmt::Formatter;

use chrono::Datelike;
use chrono::Duration;
use chrono::Local;
use chrono::NaiveDate;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

use crate::error::Fallible;

/// The storage format for dates, e.g. "Mon Jan 01 2024".
const DATE_FORMAT: &str = "%a %b %d %Y";

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Date(NaiveDate);

impl Date {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn yesterday(self) -> Self {
        Self(self.0 - Duration::days(1))
    }

    pub fn tomorrow(self) -> Self {
        Self(self.0 + Duration::days(1))
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// One-based month number.
    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn day(self) -> u32 {
        self.0.day()
    }

    /// Parse a date in storage format.
    pub fn parse(s: &str) -> Fallible<Self> {
        let date = NaiveDate::parse_from_str(s, DATE_FORMAT)?;
        Ok(Self(date))
    }

    /// Long human-readable form, e.g. "Monday, January 1, 2024".
    pub fn long(self) -> String {
        self.0.format("%A, %B %-d, %Y").to_string()
    }

    pub fn into_inner(self) -> NaiveDate {
        self.0
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let string = String::deserialize(deserializer)?;
        Date::parse(&string).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> Date {
        Date::new(NaiveDate::from_ymd_opt(year, month, day).unwrap())
    }

    #[test]
    fn test_storage_format() {
        assert_eq!(date(2024, 1, 1).to_string(), "Mon Jan 01 2024");
    }

    #[test]
    fn test_parse_roundtrip() {
        let d = date(2024, 2, 29);
        assert_eq!(Date::parse(&d.to_string()).unwrap(), d);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Date::parse("not a date").is_err());
    }

    #[test]
    fn test_yesterday_crosses_month() {
        assert_eq!(date(2024, 3, 1).yesterday(), date(2024, 2, 29));
    }

    #[test]
    fn test_long_format() {
        assert_eq!(date(2024, 1, 1).long(), "Monday, January 1, 2024");
    }

    #[test]
    fn test_serde_as_string() {
        let d = date(2024, 1, 1);
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, "\"Mon Jan 01 2024\"");
        let back: Date = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
    }
}
