use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/schedules") }))
        .route("/schedules", get(handlers::calendar).post(handlers::create_schedule))
        .route("/schedules/new", get(handlers::new_schedule_form))
        .route("/schedules/:id", post(handlers::update_schedule))
        .route("/schedules/:id/edit", get(handlers::edit_schedule_form))
        .route("/schedules/:id/delete", post(handlers::delete_schedule))
        .route("/schedules/daily/:date", get(handlers::daily))
        .route("/schedules/api/daily/:date", get(handlers::daily_schedules))
        .route("/schedules/api/monthly", get(handlers::monthly_schedules))
        .route("/schedules/api/overlap", get(handlers::check_overlap))
        .route(
            "/api/recent-teams",
            get(handlers::get_recent_teams).post(handlers::add_recent_team),
        )
        .with_state(state)
}
