use crate::calendar::MonthView;
use crate::errors::{AppError, ScheduleError};
use crate::models::{
    CalendarQuery, FlashQuery, MonthQuery, NewScheduleQuery, OverlapQuery, OverlapResponse,
    Schedule, ScheduleForm, TeamEntry, TeamSubmission,
};
use crate::panel::RecentTeamsPanel;
use crate::state::AppState;
use crate::storage::persist_book;
use crate::ui::{render_calendar, render_daily, render_form};
use axum::{
    Form, Json,
    extract::{Path, Query, State},
    response::{Html, Redirect},
};
use chrono::{Local, NaiveDate, NaiveDateTime};
use std::sync::Arc;
use tracing::{error, info, warn};

pub async fn calendar(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Html<String> {
    let view = MonthView::resolve(query.year(), query.month());
    let schedules = state
        .book
        .lock()
        .await
        .schedules_in_month(view.year, view.month);
    Html(render_calendar(&view, &schedules, query.flash.as_deref()))
}

pub async fn new_schedule_form(
    State(state): State<AppState>,
    Query(query): Query<NewScheduleQuery>,
) -> Html<String> {
    let values = ScheduleForm {
        schedule_date: query
            .date
            .unwrap_or_else(|| Local::now().date_naive())
            .to_string(),
        ..ScheduleForm::default()
    };
    Html(render_form(&values, None, &recent_teams_panel(&state)))
}

pub async fn create_schedule(
    State(state): State<AppState>,
    Form(form): Form<ScheduleForm>,
) -> Result<Redirect, AppError> {
    remember_team(&state, &form).await;

    let request = match form.parse() {
        Ok(request) => request,
        Err(err) => return Ok(rejected(err)),
    };

    let mut book = state.book.lock().await;
    let created = match book.create(&request, now()) {
        Ok(created) => created,
        Err(err) => return Ok(rejected(err)),
    };
    persist_book(&state.data_path, &book).await?;

    info!(
        "schedule {} created for team {}",
        created.id, created.team_name
    );
    Ok(redirect_with_flash("created"))
}

pub async fn edit_schedule_form(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Html<String>, AppError> {
    let values = {
        let book = state.book.lock().await;
        ScheduleForm::from(book.get(id)?)
    };
    Ok(Html(render_form(&values, Some(id), &recent_teams_panel(&state))))
}

pub async fn update_schedule(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Form(form): Form<ScheduleForm>,
) -> Result<Redirect, AppError> {
    remember_team(&state, &form).await;

    let request = match form.parse() {
        Ok(request) => request,
        Err(err) => return Ok(rejected(err)),
    };

    let mut book = state.book.lock().await;
    match book.update(id, &request, now()) {
        Ok(updated) => info!("schedule {} updated", updated.id),
        Err(err @ ScheduleError::NotFound(_)) => return Err(err.into()),
        Err(err) => return Ok(rejected(err)),
    }
    persist_book(&state.data_path, &book).await?;

    Ok(redirect_with_flash("updated"))
}

pub async fn delete_schedule(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Redirect, AppError> {
    let mut book = state.book.lock().await;
    if let Err(err) = book.delete(id) {
        warn!("failed to delete schedule: {err}");
        return Ok(redirect_with_flash("delete_failed"));
    }
    persist_book(&state.data_path, &book).await?;

    info!("schedule {id} deleted");
    Ok(redirect_with_flash("deleted"))
}

pub async fn daily(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
    Query(query): Query<FlashQuery>,
) -> Html<String> {
    let schedules = state.book.lock().await.schedules_on(date);
    Html(render_daily(date, &schedules, query.flash.as_deref()))
}

pub async fn daily_schedules(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> Json<Vec<Schedule>> {
    Json(state.book.lock().await.schedules_on(date))
}

pub async fn monthly_schedules(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<Schedule>>, AppError> {
    if !(1..=12).contains(&query.month) {
        return Err(AppError::bad_request("month must be between 1 and 12"));
    }
    let book = state.book.lock().await;
    Ok(Json(book.schedules_in_month(query.year, query.month)))
}

pub async fn check_overlap(
    State(state): State<AppState>,
    Query(query): Query<OverlapQuery>,
) -> Json<OverlapResponse> {
    let book = state.book.lock().await;
    Json(OverlapResponse {
        overlap: book.has_overlap(query.date, query.start_time, query.end_time),
    })
}

pub async fn get_recent_teams(State(state): State<AppState>) -> Json<Vec<TeamEntry>> {
    Json(state.recent_teams.get_recent_teams())
}

pub async fn add_recent_team(
    State(state): State<AppState>,
    payload: Option<Json<TeamSubmission>>,
) -> Result<Json<Vec<TeamEntry>>, AppError> {
    let submission = payload.map(|Json(body)| body).unwrap_or_default();
    let cache = Arc::clone(&state.recent_teams);
    tokio::task::spawn_blocking(move || {
        cache.add_recent_team(&submission);
        cache.get_recent_teams()
    })
    .await
    .map(Json)
    .map_err(AppError::internal)
}

/// Runs the submit hook on the blocking pool; the store writes a file.
async fn remember_team(state: &AppState, form: &ScheduleForm) {
    let cache = Arc::clone(&state.recent_teams);
    let team = form.team_form();
    if let Err(err) = tokio::task::spawn_blocking(move || cache.on_submit(&team)).await {
        error!("recording recent team failed: {err}");
    }
}

fn recent_teams_panel(state: &AppState) -> RecentTeamsPanel {
    let mut panel = RecentTeamsPanel::new();
    state.recent_teams.init(&mut panel);
    panel
}

fn rejected(err: ScheduleError) -> Redirect {
    warn!("schedule rejected: {err}");
    redirect_with_flash(err.code())
}

fn redirect_with_flash(code: &str) -> Redirect {
    Redirect::to(&format!("/schedules?flash={code}"))
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}
