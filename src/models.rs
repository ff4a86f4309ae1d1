use crate::errors::ScheduleError;
use crate::panel::TeamForm;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// One remembered team, as shown in the recent teams panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TeamEntry {
    pub team_name: String,
    #[serde(default)]
    pub team_members: String,
}

impl TeamEntry {
    pub fn new(team_name: impl Into<String>, team_members: impl Into<String>) -> Self {
        Self {
            team_name: team_name.into(),
            team_members: team_members.into(),
        }
    }
}

/// Team fields as captured from a form or request body; either may be missing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TeamSubmission {
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub team_members: Option<String>,
}

impl TeamSubmission {
    pub fn new(team_name: &str, team_members: &str) -> Self {
        Self {
            team_name: Some(team_name.to_string()),
            team_members: Some(team_members.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: u64,
    pub team_name: String,
    #[serde(default)]
    pub team_members: String,
    pub schedule_date: NaiveDate,
    #[serde(with = "clock_time")]
    pub start_time: NaiveTime,
    #[serde(with = "clock_time")]
    pub end_time: NaiveTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub team_name: String,
    #[serde(default)]
    pub team_members: Option<String>,
    pub schedule_date: NaiveDate,
    #[serde(with = "clock_time")]
    pub start_time: NaiveTime,
    #[serde(with = "clock_time")]
    pub end_time: NaiveTime,
}

/// Raw schedule form fields. Kept as strings so the team can be captured before parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ScheduleForm {
    pub team_name: String,
    pub team_members: Option<String>,
    pub schedule_date: String,
    pub start_time: String,
    pub end_time: String,
}

impl ScheduleForm {
    pub fn team_form(&self) -> TeamForm {
        TeamForm {
            team_name: self.team_name.clone(),
            team_members: self.team_members.clone(),
        }
    }

    pub fn parse(&self) -> Result<ScheduleRequest, ScheduleError> {
        let schedule_date = NaiveDate::parse_from_str(self.schedule_date.trim(), "%Y-%m-%d")
            .map_err(|_| ScheduleError::Unparsable {
                field: "scheduleDate",
            })?;
        let start_time = clock_time::parse(&self.start_time)
            .map_err(|_| ScheduleError::Unparsable { field: "startTime" })?;
        let end_time = clock_time::parse(&self.end_time)
            .map_err(|_| ScheduleError::Unparsable { field: "endTime" })?;

        Ok(ScheduleRequest {
            team_name: self.team_name.clone(),
            team_members: self.team_members.clone(),
            schedule_date,
            start_time,
            end_time,
        })
    }
}

impl From<&Schedule> for ScheduleForm {
    fn from(schedule: &Schedule) -> Self {
        Self {
            team_name: schedule.team_name.clone(),
            team_members: Some(schedule.team_members.clone()),
            schedule_date: schedule.schedule_date.to_string(),
            start_time: schedule.start_time.format("%H:%M").to_string(),
            end_time: schedule.end_time.format("%H:%M").to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlapQuery {
    pub date: NaiveDate,
    #[serde(with = "clock_time")]
    pub start_time: NaiveTime,
    #[serde(with = "clock_time")]
    pub end_time: NaiveTime,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OverlapResponse {
    pub overlap: bool,
}

/// Calendar page query. Year and month stay raw so junk values fall back instead of failing.
#[derive(Debug, Deserialize, Default)]
pub struct CalendarQuery {
    pub year: Option<String>,
    pub month: Option<String>,
    pub flash: Option<String>,
}

impl CalendarQuery {
    pub fn year(&self) -> Option<i32> {
        self.year.as_deref().and_then(|raw| raw.trim().parse().ok())
    }

    pub fn month(&self) -> Option<u32> {
        self.month.as_deref().and_then(|raw| raw.trim().parse().ok())
    }
}

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Deserialize, Default)]
pub struct FlashQuery {
    pub flash: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct NewScheduleQuery {
    pub date: Option<NaiveDate>,
}

/// Times travel as `HH:MM` (what `<input type="time">` submits); seconds are accepted on input.
pub mod clock_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format("%H:%M"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    pub fn parse(raw: &str) -> Result<NaiveTime, chrono::ParseError> {
        let raw = raw.trim();
        NaiveTime::parse_from_str(raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
    }
}
