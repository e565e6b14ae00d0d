// Exclusion-constraint detail looks like:
// "Key (room_id, stay)=(720970a4-..., [2099-06-02,2099-06-04)) conflicts with existing key (room_id, stay)=(720970a4-..., [2099-06-01,2099-06-03))."

use chrono::NaiveDate;
use regex::Regex;
use std::{collections::HashMap, convert::Infallible, str::FromStr};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingConflictInfo {
    Parsed(BookingConflict),
    Unparsed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingConflict {
    pub new: BookingWindow,
    pub old: BookingWindow,
}

/// One side of a conflict: which room, and the half-open stay window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingWindow {
    pub room_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl FromStr for BookingConflictInfo {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(conflict) = s.parse() {
            Ok(Self::Parsed(conflict))
        } else {
            Ok(Self::Unparsed(s.to_string()))
        }
    }
}

impl FromStr for BookingConflict {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParsedInfo::from_str(s)?.try_into()
    }
}

impl TryFrom<ParsedInfo> for BookingConflict {
    type Error = ();

    fn try_from(value: ParsedInfo) -> Result<Self, Self::Error> {
        Ok(Self {
            new: value.new.try_into()?,
            old: value.old.try_into()?,
        })
    }
}

impl TryFrom<HashMap<String, String>> for BookingWindow {
    type Error = ();

    fn try_from(value: HashMap<String, String>) -> Result<Self, Self::Error> {
        let stay = value.get("stay").ok_or(())?;

        let mut split = stay.splitn(2, ',');
        let check_in = parse_date(split.next().ok_or(())?)?;
        let check_out = parse_date(split.next().ok_or(())?)?;

        Ok(Self {
            room_id: value.get("room_id").ok_or(())?.to_string(),
            check_in,
            check_out,
        })
    }
}

struct ParsedInfo {
    new: HashMap<String, String>,
    old: HashMap<String, String>,
}

impl FromStr for ParsedInfo {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let re = Regex::new(
            r"\((?P<k1>[a-zA-Z0-9_-]+)\s*,\s*(?P<k2>[a-zA-Z0-9_-]+)\)=\((?P<v1>[a-zA-Z0-9_-]+)\s*,\s*\[(?P<v2>[^\)\]]+)",
        )
        .unwrap();

        let mut maps = vec![];
        for cap in re.captures_iter(s) {
            let mut map = HashMap::new();
            map.insert(cap["k1"].to_string(), cap["v1"].to_string());
            map.insert(cap["k2"].to_string(), cap["v2"].to_string());
            maps.push(Some(map));
        }

        if maps.len() != 2 {
            return Err(());
        }

        Ok(Self {
            new: maps[0].take().unwrap(),
            old: maps[1].take().unwrap(),
        })
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, ()> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| ())
}
