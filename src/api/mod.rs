use axum::Json;
use axum::extract::{Path, Query};
use axum::routing::{patch, post};
use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde::Deserialize;
use std::collections::HashMap;

use crate::catalog::{CourseFilter, filter_courses};
use crate::db::repository::{self, ProfileSummary};
use crate::engine::{self, BlockConflict, ProfileValidation};
use crate::error::AppError;
use crate::models::*;
use crate::state::AppState;

#[derive(Deserialize)]
struct ProfileListParams {
    #[serde(default)]
    owner: Option<String>,
}

#[derive(Deserialize)]
struct OwnerParams {
    owner: String,
}

#[derive(Deserialize)]
struct ConflictParams {
    course: String,
}

#[derive(Deserialize)]
struct ScheduleParams {
    term: Term,
    period: Period,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/courses", get(list_courses))
        .route("/profiles", get(list_profiles).post(create_profile))
        .route("/profiles/latest", get(latest_profile))
        .route("/profiles/{id}", get(get_profile).delete(delete_profile))
        .route("/profiles/{id}/courses", post(add_course))
        .route("/profiles/{id}/courses/{code}", axum::routing::delete(remove_course))
        .route("/profiles/{id}/courses/{code}/move", patch(move_course))
        .route("/profiles/{id}/terms/{term}", axum::routing::delete(clear_term))
        .route("/profiles/{id}/clear", patch(clear_profile))
        .route("/profiles/{id}/conflicts", get(course_conflicts))
        .route("/profiles/{id}/schedule", get(schedule_conflicts))
        .route("/profiles/{id}/validation", get(profile_validation))
        .with_state(state)
}

/// Fetch the catalog for one program, going through the TTL cache.
async fn catalog_courses(state: &AppState, program: Option<&str>) -> Result<Vec<Course>, AppError> {
    let key = program.unwrap_or("");
    if let Some(courses) = state.courses.get(key) {
        return Ok(courses);
    }

    let courses = state.catalog.fetch_courses(program).await?;
    state.courses.put(key, courses.clone());
    Ok(courses)
}

async fn lookup_course(state: &AppState, code: &str) -> Result<Course, AppError> {
    let courses = catalog_courses(state, None).await?;
    courses
        .into_iter()
        .find(|course| course.code == code)
        .ok_or_else(|| AppError::BadRequest(format!("unknown course code {}", code)))
}

async fn load_profile(state: &AppState, id: &str) -> Result<Profile, AppError> {
    repository::find_profile_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

async fn list_courses(
    State(state): State<AppState>,
    Query(filter): Query<CourseFilter>,
) -> Result<Json<Vec<Course>>, AppError> {
    let courses = catalog_courses(&state, filter.program.as_deref()).await?;
    Ok(Json(filter_courses(&courses, &filter)))
}

async fn create_profile(
    State(state): State<AppState>,
    Json(req): Json<NewProfileRequest>,
) -> Result<Json<Profile>, AppError> {
    let profile = engine::new_profile(&req.name, req.owner);
    repository::insert_profile(&state.db, &profile).await?;
    Ok(Json(profile))
}

async fn list_profiles(
    State(state): State<AppState>,
    Query(params): Query<ProfileListParams>,
) -> Result<Json<Vec<ProfileSummary>>, AppError> {
    let profiles = repository::list_profiles(&state.db, params.owner.as_deref()).await?;
    Ok(Json(profiles))
}

async fn latest_profile(
    State(state): State<AppState>,
    Query(params): Query<OwnerParams>,
) -> Result<Json<Profile>, AppError> {
    let profile = repository::find_latest_profile_by_owner(&state.db, &params.owner)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(profile))
}

async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Profile>, AppError> {
    Ok(Json(load_profile(&state, &id).await?))
}

async fn delete_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let ok = repository::delete_profile(&state.db, &id).await?;
    if ok {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}

async fn add_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<AddCourseRequest>,
) -> Result<Json<Profile>, AppError> {
    let profile = load_profile(&state, &id).await?;
    let course = lookup_course(&state, &req.code).await?;
    let updated = engine::add_course(&profile, &course, req.term)?;
    repository::save_profile(&state.db, &updated).await?;
    Ok(Json(updated))
}

async fn remove_course(
    State(state): State<AppState>,
    Path((id, code)): Path<(String, String)>,
) -> Result<Json<Profile>, AppError> {
    let profile = load_profile(&state, &id).await?;
    let updated = engine::remove_course(&profile, &code)?;
    repository::save_profile(&state.db, &updated).await?;
    Ok(Json(updated))
}

async fn move_course(
    State(state): State<AppState>,
    Path((id, code)): Path<(String, String)>,
    Json(req): Json<MoveCourseRequest>,
) -> Result<Json<Profile>, AppError> {
    let profile = load_profile(&state, &id).await?;
    let updated = engine::move_course(&profile, &code, req.from, req.to)?;
    repository::save_profile(&state.db, &updated).await?;
    Ok(Json(updated))
}

async fn clear_term(
    State(state): State<AppState>,
    Path((id, term)): Path<(String, u8)>,
) -> Result<Json<Profile>, AppError> {
    let term = Term::try_from(term).map_err(AppError::BadRequest)?;
    let profile = load_profile(&state, &id).await?;
    let updated = engine::clear_term(&profile, term);
    repository::save_profile(&state.db, &updated).await?;
    Ok(Json(updated))
}

async fn clear_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Profile>, AppError> {
    let profile = load_profile(&state, &id).await?;
    let updated = engine::clear_profile(&profile);
    repository::save_profile(&state.db, &updated).await?;
    Ok(Json(updated))
}

async fn course_conflicts(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<ConflictParams>,
) -> Result<Json<Vec<Course>>, AppError> {
    let profile = load_profile(&state, &id).await?;
    let candidate = lookup_course(&state, &params.course).await?;
    Ok(Json(engine::find_course_conflicts(&candidate, &profile)))
}

async fn schedule_conflicts(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<ScheduleParams>,
) -> Result<Json<HashMap<String, BlockConflict>>, AppError> {
    let profile = load_profile(&state, &id).await?;
    let conflicts = engine::find_schedule_conflicts(profile.bucket(params.term), params.period);
    Ok(Json(conflicts))
}

async fn profile_validation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProfileValidation>, AppError> {
    let profile = load_profile(&state, &id).await?;
    Ok(Json(engine::validate_profile(&profile)))
}
