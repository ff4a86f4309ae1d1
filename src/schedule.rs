use crate::errors::ScheduleError;
use crate::models::{Schedule, ScheduleRequest};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

pub const MAX_TEAM_NAME_CHARS: usize = 50;

/// Every stored schedule plus the id counter; persisted as one JSON document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleBook {
    #[serde(default)]
    pub schedules: Vec<Schedule>,
    #[serde(default = "first_id")]
    pub next_id: u64,
}

fn first_id() -> u64 {
    1
}

impl Default for ScheduleBook {
    fn default() -> Self {
        Self {
            schedules: Vec::new(),
            next_id: first_id(),
        }
    }
}

/// True when `[start, end)` intersects any of the given schedules.
pub fn overlaps<'a>(
    existing: impl IntoIterator<Item = &'a Schedule>,
    start: NaiveTime,
    end: NaiveTime,
) -> bool {
    existing
        .into_iter()
        .any(|schedule| start < schedule.end_time && end > schedule.start_time)
}

pub fn validate(request: &ScheduleRequest) -> Result<(), ScheduleError> {
    let name = request.team_name.trim();
    if name.is_empty() {
        return Err(ScheduleError::BlankTeamName);
    }
    if name.chars().count() > MAX_TEAM_NAME_CHARS {
        return Err(ScheduleError::TeamNameTooLong {
            max: MAX_TEAM_NAME_CHARS,
        });
    }
    if request.end_time <= request.start_time {
        return Err(ScheduleError::InvalidTimeRange);
    }
    Ok(())
}

fn members_of(request: &ScheduleRequest) -> String {
    request
        .team_members
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string()
}

impl ScheduleBook {
    pub fn get(&self, id: u64) -> Result<&Schedule, ScheduleError> {
        self.schedules
            .iter()
            .find(|schedule| schedule.id == id)
            .ok_or(ScheduleError::NotFound(id))
    }

    pub fn create(
        &mut self,
        request: &ScheduleRequest,
        now: NaiveDateTime,
    ) -> Result<Schedule, ScheduleError> {
        validate(request)?;

        let schedule = Schedule {
            id: self.next_id,
            team_name: request.team_name.trim().to_string(),
            team_members: members_of(request),
            schedule_date: request.schedule_date,
            start_time: request.start_time,
            end_time: request.end_time,
            created_at: now,
            updated_at: now,
        };
        self.next_id = self.next_id.saturating_add(1);
        self.schedules.push(schedule.clone());
        Ok(schedule)
    }

    pub fn update(
        &mut self,
        id: u64,
        request: &ScheduleRequest,
        now: NaiveDateTime,
    ) -> Result<Schedule, ScheduleError> {
        let schedule = self
            .schedules
            .iter_mut()
            .find(|schedule| schedule.id == id)
            .ok_or(ScheduleError::NotFound(id))?;
        validate(request)?;

        schedule.team_name = request.team_name.trim().to_string();
        schedule.team_members = members_of(request);
        schedule.schedule_date = request.schedule_date;
        schedule.start_time = request.start_time;
        schedule.end_time = request.end_time;
        schedule.updated_at = now;
        Ok(schedule.clone())
    }

    pub fn delete(&mut self, id: u64) -> Result<Schedule, ScheduleError> {
        let index = self
            .schedules
            .iter()
            .position(|schedule| schedule.id == id)
            .ok_or(ScheduleError::NotFound(id))?;
        Ok(self.schedules.remove(index))
    }

    /// Schedules on `date`, earliest start first.
    pub fn schedules_on(&self, date: NaiveDate) -> Vec<Schedule> {
        let mut day: Vec<Schedule> = self
            .schedules
            .iter()
            .filter(|schedule| schedule.schedule_date == date)
            .cloned()
            .collect();
        day.sort_by_key(|schedule| (schedule.start_time, schedule.id));
        day
    }

    /// Schedules of one month, ordered by date then start time.
    pub fn schedules_in_month(&self, year: i32, month: u32) -> Vec<Schedule> {
        let mut found: Vec<Schedule> = self
            .schedules
            .iter()
            .filter(|schedule| {
                schedule.schedule_date.year() == year && schedule.schedule_date.month() == month
            })
            .cloned()
            .collect();
        found.sort_by_key(|schedule| (schedule.schedule_date, schedule.start_time, schedule.id));
        found
    }

    pub fn has_overlap(&self, date: NaiveDate, start: NaiveTime, end: NaiveTime) -> bool {
        overlaps(
            self.schedules.iter().filter(|s| s.schedule_date == date),
            start,
            end,
        )
    }
}
