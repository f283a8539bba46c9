use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{ApplicationId, Job, JobId, Professional, ProfessionalId, ProfessionalStatus};
use super::matcher::AssignmentOutcome;
use super::repository::{ApplicationRepository, JobCatalog, NotificationSink, ProfessionalRepository, RepositoryError};
use super::service::{ApplicationView, FeedbackSubmission, PlacementService, PlacementServiceError};
use super::status::{ApplicationStatus, InterviewRound};

/// Router builder exposing the placement pipeline over HTTP.
pub fn placement_router<A, P, J, N>(service: Arc<PlacementService<A, P, J, N>>) -> Router
where
    A: ApplicationRepository + 'static,
    P: ProfessionalRepository + 'static,
    J: JobCatalog + 'static,
    N: NotificationSink + 'static,
{
    Router::new()
        .route("/api/v1/applications", post(submit_handler::<A, P, J, N>))
        .route(
            "/api/v1/applications/:application_id",
            get(application_handler::<A, P, J, N>),
        )
        .route(
            "/api/v1/applications/:application_id/status",
            post(status_handler::<A, P, J, N>),
        )
        .route(
            "/api/v1/applications/:application_id/assign/:round",
            post(assign_handler::<A, P, J, N>),
        )
        .route(
            "/api/v1/applications/:application_id/schedule",
            post(schedule_handler::<A, P, J, N>),
        )
        .route(
            "/api/v1/applications/:application_id/feedback",
            post(feedback_handler::<A, P, J, N>),
        )
        .route(
            "/api/v1/students/:student_id/applications",
            get(student_applications_handler::<A, P, J, N>),
        )
        .route(
            "/api/v1/students/:student_id/applications/active",
            get(active_application_handler::<A, P, J, N>),
        )
        .route("/api/v1/jobs", post(register_job_handler::<A, P, J, N>))
        .route(
            "/api/v1/professionals",
            post(register_professional_handler::<A, P, J, N>),
        )
        .route(
            "/api/v1/professionals/:professional_id/status",
            post(professional_status_handler::<A, P, J, N>),
        )
        .route(
            "/api/v1/users/:user_id/notifications",
            get(notifications_handler::<A, P, J, N>),
        )
        .with_state(service)
}

fn error_response(error: PlacementServiceError) -> Response {
    let status = match &error {
        PlacementServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        PlacementServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        PlacementServiceError::Repository(RepositoryError::Unavailable(_))
        | PlacementServiceError::Notifications(_) => StatusCode::SERVICE_UNAVAILABLE,
        PlacementServiceError::JobClosed | PlacementServiceError::NoRoundInProgress => {
            StatusCode::CONFLICT
        }
        PlacementServiceError::NotAssigned => StatusCode::FORBIDDEN,
        PlacementServiceError::InvalidRating(_) => StatusCode::UNPROCESSABLE_ENTITY,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitApplicationRequest {
    pub student_id: String,
    pub student_name: String,
    pub job_id: JobId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub scheduled_at: DateTime<Utc>,
    pub meeting_link: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfessionalStatusRequest {
    pub status: ProfessionalStatus,
}

#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
enum AssignmentResponse {
    Assigned {
        application: ApplicationView,
        professional_id: ProfessionalId,
        professional_name: String,
    },
    NoEligibleProfessional,
    JobMissing,
}

pub(crate) async fn submit_handler<A, P, J, N>(
    State(service): State<Arc<PlacementService<A, P, J, N>>>,
    axum::Json(payload): axum::Json<SubmitApplicationRequest>,
) -> Response
where
    A: ApplicationRepository + 'static,
    P: ProfessionalRepository + 'static,
    J: JobCatalog + 'static,
    N: NotificationSink + 'static,
{
    match service.submit(&payload.student_id, &payload.student_name, &payload.job_id) {
        Ok(application) => (
            StatusCode::ACCEPTED,
            axum::Json(ApplicationView::from(&application)),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn application_handler<A, P, J, N>(
    State(service): State<Arc<PlacementService<A, P, J, N>>>,
    Path(application_id): Path<String>,
) -> Response
where
    A: ApplicationRepository + 'static,
    P: ProfessionalRepository + 'static,
    J: JobCatalog + 'static,
    N: NotificationSink + 'static,
{
    match service.get(&ApplicationId(application_id)) {
        Ok(application) => {
            (StatusCode::OK, axum::Json(ApplicationView::from(&application))).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<A, P, J, N>(
    State(service): State<Arc<PlacementService<A, P, J, N>>>,
    Path(application_id): Path<String>,
    axum::Json(payload): axum::Json<StatusUpdateRequest>,
) -> Response
where
    A: ApplicationRepository + 'static,
    P: ProfessionalRepository + 'static,
    J: JobCatalog + 'static,
    N: NotificationSink + 'static,
{
    let Some(status) = ApplicationStatus::parse(&payload.status) else {
        let body = json!({
            "error": format!("unknown application status '{}'", payload.status),
        });
        return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(body)).into_response();
    };

    match service.update_status(&ApplicationId(application_id), status, payload.notes) {
        Ok(application) => {
            (StatusCode::OK, axum::Json(ApplicationView::from(&application))).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn assign_handler<A, P, J, N>(
    State(service): State<Arc<PlacementService<A, P, J, N>>>,
    Path((application_id, round)): Path<(String, String)>,
) -> Response
where
    A: ApplicationRepository + 'static,
    P: ProfessionalRepository + 'static,
    J: JobCatalog + 'static,
    N: NotificationSink + 'static,
{
    let Some(round) = InterviewRound::parse(&round) else {
        let body = json!({
            "error": format!("unknown interview round '{round}'"),
        });
        return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(body)).into_response();
    };

    let application_id = ApplicationId(application_id);
    let outcome = match service.assign_round(&application_id, round) {
        Ok(outcome) => outcome,
        Err(error) => return error_response(error),
    };

    let response = match outcome {
        AssignmentOutcome::Assigned(plan) => match service.get(&application_id) {
            Ok(application) => AssignmentResponse::Assigned {
                application: ApplicationView::from(&application),
                professional_id: plan.professional_id,
                professional_name: plan.professional_name,
            },
            Err(error) => return error_response(error),
        },
        AssignmentOutcome::NoEligibleProfessional => AssignmentResponse::NoEligibleProfessional,
        AssignmentOutcome::JobMissing => AssignmentResponse::JobMissing,
    };
    (StatusCode::OK, axum::Json(response)).into_response()
}

pub(crate) async fn schedule_handler<A, P, J, N>(
    State(service): State<Arc<PlacementService<A, P, J, N>>>,
    Path(application_id): Path<String>,
    axum::Json(payload): axum::Json<ScheduleRequest>,
) -> Response
where
    A: ApplicationRepository + 'static,
    P: ProfessionalRepository + 'static,
    J: JobCatalog + 'static,
    N: NotificationSink + 'static,
{
    match service.schedule_interview(
        &ApplicationId(application_id),
        payload.scheduled_at,
        payload.meeting_link,
    ) {
        Ok(application) => {
            (StatusCode::OK, axum::Json(ApplicationView::from(&application))).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn feedback_handler<A, P, J, N>(
    State(service): State<Arc<PlacementService<A, P, J, N>>>,
    Path(application_id): Path<String>,
    axum::Json(payload): axum::Json<FeedbackSubmission>,
) -> Response
where
    A: ApplicationRepository + 'static,
    P: ProfessionalRepository + 'static,
    J: JobCatalog + 'static,
    N: NotificationSink + 'static,
{
    match service.submit_feedback(&ApplicationId(application_id), payload) {
        Ok(application) => {
            (StatusCode::OK, axum::Json(ApplicationView::from(&application))).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn student_applications_handler<A, P, J, N>(
    State(service): State<Arc<PlacementService<A, P, J, N>>>,
    Path(student_id): Path<String>,
) -> Response
where
    A: ApplicationRepository + 'static,
    P: ProfessionalRepository + 'static,
    J: JobCatalog + 'static,
    N: NotificationSink + 'static,
{
    match service.applications_for_student(&student_id) {
        Ok(applications) => {
            let views: Vec<ApplicationView> =
                applications.iter().map(ApplicationView::from).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn active_application_handler<A, P, J, N>(
    State(service): State<Arc<PlacementService<A, P, J, N>>>,
    Path(student_id): Path<String>,
) -> Response
where
    A: ApplicationRepository + 'static,
    P: ProfessionalRepository + 'static,
    J: JobCatalog + 'static,
    N: NotificationSink + 'static,
{
    match service.active_application_for_student(&student_id) {
        Ok(active) => {
            let view = active.as_ref().map(ApplicationView::from);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn register_job_handler<A, P, J, N>(
    State(service): State<Arc<PlacementService<A, P, J, N>>>,
    axum::Json(job): axum::Json<Job>,
) -> Response
where
    A: ApplicationRepository + 'static,
    P: ProfessionalRepository + 'static,
    J: JobCatalog + 'static,
    N: NotificationSink + 'static,
{
    match service.register_job(job) {
        Ok(stored) => (StatusCode::CREATED, axum::Json(stored)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn register_professional_handler<A, P, J, N>(
    State(service): State<Arc<PlacementService<A, P, J, N>>>,
    axum::Json(professional): axum::Json<Professional>,
) -> Response
where
    A: ApplicationRepository + 'static,
    P: ProfessionalRepository + 'static,
    J: JobCatalog + 'static,
    N: NotificationSink + 'static,
{
    match service.register_professional(professional) {
        Ok(stored) => (StatusCode::CREATED, axum::Json(stored)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn professional_status_handler<A, P, J, N>(
    State(service): State<Arc<PlacementService<A, P, J, N>>>,
    Path(professional_id): Path<String>,
    axum::Json(payload): axum::Json<ProfessionalStatusRequest>,
) -> Response
where
    A: ApplicationRepository + 'static,
    P: ProfessionalRepository + 'static,
    J: JobCatalog + 'static,
    N: NotificationSink + 'static,
{
    match service.set_professional_status(&ProfessionalId(professional_id), payload.status) {
        Ok(professional) => (StatusCode::OK, axum::Json(professional)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn notifications_handler<A, P, J, N>(
    State(service): State<Arc<PlacementService<A, P, J, N>>>,
    Path(user_id): Path<String>,
) -> Response
where
    A: ApplicationRepository + 'static,
    P: ProfessionalRepository + 'static,
    J: JobCatalog + 'static,
    N: NotificationSink + 'static,
{
    match service.notifications_for(&user_id) {
        Ok(notifications) => (StatusCode::OK, axum::Json(notifications)).into_response(),
        Err(error) => error_response(error),
    }
}
