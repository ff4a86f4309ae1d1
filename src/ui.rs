use crate::calendar::MonthView;
use crate::models::{Schedule, ScheduleForm};
use crate::panel::RecentTeamsPanel;
use crate::schedule::MAX_TEAM_NAME_CHARS;
use chrono::{Datelike, NaiveDate, Timelike};
use maud::{Markup, html};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
}

impl FlashKind {
    fn class(self) -> &'static str {
        match self {
            Self::Success => "alert alert-success",
            Self::Error => "alert alert-error",
        }
    }
}

/// Message for a `?flash=` code set by a redirecting handler.
pub fn flash_message(code: &str) -> Option<(FlashKind, &'static str)> {
    let flash = match code {
        "created" => (FlashKind::Success, "Schedule created."),
        "updated" => (FlashKind::Success, "Schedule updated."),
        "deleted" => (FlashKind::Success, "Schedule deleted."),
        "delete_failed" => (FlashKind::Error, "The schedule could not be deleted."),
        "blank_name" => (FlashKind::Error, "Team name is required."),
        "name_too_long" => (FlashKind::Error, "Team name is too long."),
        "invalid_time" => (FlashKind::Error, "End time must be later than start time."),
        "invalid_input" => (FlashKind::Error, "Please enter a valid date and times."),
        _ => return None,
    };
    Some(flash)
}

fn render_flash(code: Option<&str>) -> Markup {
    html! {
        @if let Some((kind, message)) = code.and_then(flash_message) {
            div class=(kind.class()) role="status" { (message) }
        }
    }
}

fn time_range(schedule: &Schedule) -> String {
    format!(
        "{} - {}",
        schedule.start_time.format("%H:%M"),
        schedule.end_time.format("%H:%M")
    )
}

pub fn render_calendar(view: &MonthView, schedules: &[Schedule], flash: Option<&str>) -> String {
    let (prev_year, prev_month) = view.previous();
    let (next_year, next_month) = view.next();

    let content = html! {
        header {
            h1 { (view.year) "-" (format!("{:02}", view.month)) }
            nav.month-nav {
                a href=(format!("/schedules?year={prev_year}&month={prev_month}")) { "Previous" }
                a href="/schedules" { "Today" }
                a href=(format!("/schedules?year={next_year}&month={next_month}")) { "Next" }
                a.button href="/schedules/new" { "New schedule" }
            }
        }
        (render_flash(flash))
        table.calendar {
            thead {
                tr {
                    @for day in ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"] {
                        th { (day) }
                    }
                }
            }
            tbody {
                @for week in view.weeks() {
                    tr {
                        @for cell in week {
                            @if let Some(date) = cell {
                                td.calendar-day data-date=(date.to_string()) {
                                    span.day-number { (date.day()) }
                                    @for schedule in schedules.iter().filter(|s| s.schedule_date == date) {
                                        div.schedule-item data-id=(schedule.id) {
                                            span.schedule-time { (schedule.start_time.format("%H:%M").to_string()) }
                                            " "
                                            span.schedule-team { (schedule.team_name) }
                                        }
                                    }
                                }
                            } @else {
                                td.calendar-day.empty {}
                            }
                        }
                    }
                }
            }
        }
    };

    page("Team schedule", content)
}

pub fn render_daily(date: NaiveDate, schedules: &[Schedule], flash: Option<&str>) -> String {
    let content = html! {
        header {
            h1 { (date.format("%Y-%m-%d (%a)").to_string()) }
            nav.month-nav {
                a href=(format!("/schedules?year={}&month={}", date.year(), date.month())) { "Back to calendar" }
                a.button href=(format!("/schedules/new?date={date}")) { "New schedule" }
            }
        }
        (render_flash(flash))
        @if schedules.is_empty() {
            p.no-schedules-msg { "No schedules on this day" }
        }
        div.timeline {
            @for hour in 0..24u32 {
                div.timeline-row {
                    div.timeline-hour { (format!("{hour:02}:00")) }
                    div.timeline-slot {
                        @for schedule in schedules.iter().filter(|s| s.start_time.hour() == hour) {
                            div.schedule-block {
                                div.schedule-team { (schedule.team_name) }
                                @if !schedule.team_members.is_empty() {
                                    div.schedule-members { (schedule.team_members) }
                                }
                                div.schedule-time { (time_range(schedule)) }
                                div.schedule-actions {
                                    a href=(format!("/schedules/{}/edit", schedule.id)) { "Edit" }
                                    form method="post" action=(format!("/schedules/{}/delete", schedule.id)) {
                                        button.danger type="submit" { "Delete" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    page(&format!("Schedules for {date}"), content)
}

pub fn render_form(values: &ScheduleForm, edit_id: Option<u64>, panel: &RecentTeamsPanel) -> String {
    let (title, action) = match edit_id {
        Some(id) => ("Edit schedule", format!("/schedules/{id}")),
        None => ("New schedule", "/schedules".to_string()),
    };

    let content = html! {
        header {
            h1 { (title) }
            nav.month-nav {
                a href="/schedules" { "Back to calendar" }
            }
        }
        section.recent {
            h2 { "Recent teams" }
            (panel.to_markup())
        }
        form id="schedule-form" method="post" action=(action) {
            label for="teamName" { "Team name" }
            input #teamName name="teamName" type="text" required maxlength=(MAX_TEAM_NAME_CHARS) value=(values.team_name);
            label for="teamMembers" { "Team members" }
            input #teamMembers name="teamMembers" type="text" value=(values.team_members.as_deref().unwrap_or_default());
            label for="scheduleDate" { "Date" }
            input #scheduleDate name="scheduleDate" type="date" required value=(values.schedule_date);
            label for="startTime" { "Start" }
            input #startTime name="startTime" type="time" required value=(values.start_time);
            label for="endTime" { "End" }
            input #endTime name="endTime" type="time" required value=(values.end_time);
            div id="overlap-warning" class="overlap-warning" hidden { "Another schedule already uses this time slot." }
            button type="submit" { (if edit_id.is_some() { "Save" } else { "Create" }) }
        }
    };

    page(title, content)
}

fn page(title: &str, content: Markup) -> String {
    let title = html! { (title) };
    LAYOUT_HTML
        .replace("{{TITLE}}", &title.into_string())
        .replace("{{CONTENT}}", &content.into_string())
}

const LAYOUT_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <style>
    :root {
      --bg: #f4f1ea;
      --ink: #2b2a28;
      --accent: #2f6f8f;
      --danger: #c63b2b;
      --card: #ffffff;
      --line: rgba(43, 42, 40, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
    }

    main {
      width: min(980px, 100%);
      margin: 0 auto;
      padding: 28px 18px 48px;
      display: grid;
      gap: 20px;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
    }

    h1 {
      margin: 0;
    }

    .month-nav {
      display: flex;
      gap: 12px;
      align-items: center;
    }

    .button,
    button {
      background: var(--accent);
      color: white;
      border: none;
      border-radius: 999px;
      padding: 8px 16px;
      text-decoration: none;
      cursor: pointer;
    }

    button.danger {
      background: var(--danger);
    }

    .alert {
      padding: 12px 16px;
      border-radius: 12px;
    }

    .alert-success {
      background: #dff1e5;
      color: #2d7a4b;
    }

    .alert-error {
      background: #f8dcd8;
      color: var(--danger);
    }

    table.calendar {
      width: 100%;
      border-collapse: collapse;
      table-layout: fixed;
      background: var(--card);
    }

    .calendar th,
    .calendar td {
      border: 1px solid var(--line);
      vertical-align: top;
      padding: 6px;
    }

    .calendar-day {
      height: 96px;
      cursor: pointer;
    }

    .calendar-day.empty {
      background: transparent;
      cursor: default;
    }

    .schedule-item {
      font-size: 0.8rem;
      background: #e3eef4;
      border-radius: 6px;
      padding: 2px 4px;
      margin-top: 4px;
      overflow: hidden;
      white-space: nowrap;
      text-overflow: ellipsis;
    }

    .timeline {
      background: var(--card);
      border-radius: 12px;
    }

    .timeline-row {
      display: grid;
      grid-template-columns: 72px 1fr;
      border-bottom: 1px solid var(--line);
      min-height: 44px;
    }

    .timeline-hour {
      padding: 8px;
      color: #7a746d;
    }

    .timeline-slot {
      display: flex;
      flex-wrap: wrap;
      gap: 8px;
      padding: 6px;
    }

    .schedule-block {
      background: #e3eef4;
      border-radius: 10px;
      padding: 8px 12px;
      cursor: pointer;
    }

    .schedule-block.selected {
      outline: 2px solid var(--accent);
    }

    .schedule-actions {
      display: flex;
      gap: 8px;
      align-items: center;
      margin-top: 6px;
    }

    .recent-teams {
      display: flex;
      flex-wrap: wrap;
      gap: 8px;
    }

    .no-schedules-msg {
      color: #7a746d;
    }

    form#schedule-form {
      display: grid;
      gap: 8px;
      max-width: 420px;
    }

    .overlap-warning {
      color: var(--danger);
    }
  </style>
</head>
<body>
  <main>
{{CONTENT}}
  </main>

  <script>
    const fadeAlerts = () => {
      document.querySelectorAll('.alert').forEach((alert) => {
        setTimeout(() => {
          alert.style.transition = 'opacity 0.5s ease';
          alert.style.opacity = '0';
          setTimeout(() => alert.remove(), 500);
        }, 3000);
      });
    };

    const wireCalendar = () => {
      document.querySelectorAll('.schedule-item').forEach((item) => {
        item.addEventListener('click', (event) => {
          event.stopPropagation();
          const id = item.dataset.id;
          if (id) {
            window.location.href = `/schedules/${id}/edit`;
          }
        });
      });
      document.querySelectorAll('.calendar-day[data-date]').forEach((day) => {
        day.addEventListener('click', () => {
          window.location.href = `/schedules/daily/${day.dataset.date}`;
        });
      });
    };

    const animateTimeline = () => {
      document.querySelectorAll('.timeline .schedule-block').forEach((block, index) => {
        block.style.opacity = '0';
        block.style.transform = 'translateX(-20px)';
        setTimeout(() => {
          block.style.transition = 'all 0.5s ease';
          block.style.opacity = '1';
          block.style.transform = 'translateX(0)';
        }, index * 100);
      });
      document.querySelectorAll('form[action*="/delete"]').forEach((form) => {
        form.addEventListener('submit', (event) => {
          if (!confirm('Delete this schedule?')) {
            event.preventDefault();
          }
        });
      });
    };

    const scrollToCurrentHour = () => {
      const rows = document.querySelectorAll('.timeline-row');
      const row = rows[new Date().getHours()];
      if (row) {
        row.scrollIntoView({ behavior: 'smooth', block: 'center' });
      }
    };

    const wireRecentTeams = () => {
      const panel = document.getElementById('recentSchedules');
      const nameInput = document.getElementById('teamName');
      if (!panel || !nameInput) {
        return;
      }
      const membersInput = document.getElementById('teamMembers');
      const blocks = Array.from(panel.querySelectorAll('.recent-team'));
      blocks.forEach((block) => {
        block.addEventListener('click', () => {
          nameInput.value = block.dataset.teamName;
          if (membersInput && block.dataset.teamMembers) {
            membersInput.value = block.dataset.teamMembers;
          }
          blocks.forEach((other) => other.classList.remove('selected'));
          block.classList.add('selected');
        });
      });
    };

    const wireOverlapCheck = () => {
      const form = document.getElementById('schedule-form');
      const warning = document.getElementById('overlap-warning');
      if (!form || !warning) {
        return;
      }
      const check = () => {
        const date = form.scheduleDate.value;
        const startTime = form.startTime.value;
        const endTime = form.endTime.value;
        if (!date || !startTime || !endTime) {
          warning.hidden = true;
          return;
        }
        const params = new URLSearchParams({ date, startTime, endTime });
        fetch(`/schedules/api/overlap?${params}`)
          .then((res) => res.json())
          .then((body) => {
            warning.hidden = !body.overlap;
          })
          .catch((err) => console.error('overlap check failed', err));
      };
      ['scheduleDate', 'startTime', 'endTime'].forEach((name) => {
        form[name].addEventListener('change', check);
      });
    };

    document.addEventListener('DOMContentLoaded', () => {
      fadeAlerts();
      wireCalendar();
      animateTimeline();
      wireRecentTeams();
      wireOverlapCheck();
    });
    window.addEventListener('load', () => setTimeout(scrollToCurrentHour, 500));
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TeamEntry;
    use crate::panel::PANEL_ID;
    use chrono::NaiveTime;

    fn schedule(id: u64, team: &str, hour: u32) -> Schedule {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let now = date.and_hms_opt(0, 0, 0).unwrap();
        Schedule {
            id,
            team_name: team.to_string(),
            team_members: String::new(),
            schedule_date: date,
            start_time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(hour + 1, 0, 0).unwrap(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn calendar_links_schedules_to_their_day() {
        let view = MonthView::new(2026, 3).unwrap();
        let html = render_calendar(&view, &[schedule(4, "Alpha", 9)], Some("created"));

        assert!(html.contains(r#"data-date="2026-03-02""#));
        assert!(html.contains(r#"data-id="4""#));
        assert!(html.contains("Schedule created."));
        assert!(html.contains("/schedules?year=2026&amp;month=4"));
    }

    #[test]
    fn daily_places_blocks_in_their_hour() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let html = render_daily(date, &[schedule(1, "Alpha & Co", 14)], None);

        assert_eq!(html.matches(r#"class="timeline-row""#).count(), 24);
        assert!(html.contains("Alpha &amp; Co"));
        assert!(html.contains("/schedules/1/delete"));
        assert!(!html.contains("No schedules on this day"));
    }

    #[test]
    fn form_includes_recent_teams_panel() {
        let mut panel = RecentTeamsPanel::new();
        panel.push_block(TeamEntry::new("Alpha", "ann"));
        let html = render_form(&ScheduleForm::default(), None, &panel);

        assert!(html.contains(&format!(r#"id="{PANEL_ID}""#)));
        assert!(html.contains(r#"data-team-members="ann""#));
        assert!(html.contains(r#"action="/schedules""#));
        assert!(html.contains(r#"id="schedule-form""#));
        assert!(html.contains(r#"id="overlap-warning""#));
    }

    #[test]
    fn unknown_flash_codes_render_nothing() {
        assert_eq!(flash_message("bogus"), None);
        assert!(!render_flash(Some("bogus")).into_string().contains("alert"));
    }
}
