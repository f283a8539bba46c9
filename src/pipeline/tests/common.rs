use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::pipeline::domain::{
    Application, ApplicationId, Job, JobId, Professional, ProfessionalId, ProfessionalRole,
    ProfessionalStatus,
};
use crate::pipeline::matcher::MatcherConfig;
use crate::pipeline::memory::{
    InMemoryApplications, InMemoryJobs, InMemoryNotifications, InMemoryRoster,
};
use crate::pipeline::repository::{
    ApplicationRepository, JobCatalog, ProfessionalRepository, RepositoryError,
};
use crate::pipeline::service::PlacementService;

pub(super) type MemoryService =
    PlacementService<InMemoryApplications, InMemoryRoster, InMemoryJobs, InMemoryNotifications>;

pub(super) fn applied_at(offset_days: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).single().expect("valid timestamp")
        + Duration::days(offset_days)
}

pub(super) fn backend_job() -> Job {
    Job {
        id: JobId("job-backend".to_string()),
        company_name: "Northwind Labs".to_string(),
        role_title: "Backend Engineer".to_string(),
        required_tech_stack: vec![
            "Java".to_string(),
            "SQL".to_string(),
            "Spring".to_string(),
        ],
        deadline: Utc::now() + Duration::days(30),
        is_active: true,
    }
}

pub(super) fn closed_job() -> Job {
    Job {
        id: JobId("job-closed".to_string()),
        deadline: Utc::now() - Duration::days(1),
        ..backend_job()
    }
}

pub(super) fn professional(
    suffix: &str,
    role: ProfessionalRole,
    years: u32,
    tech_stack: &[&str],
    active: u32,
) -> Professional {
    Professional {
        id: ProfessionalId(format!("pro-{suffix}")),
        name: format!("Interviewer {suffix}"),
        company: "Northwind Labs".to_string(),
        role,
        status: ProfessionalStatus::Approved,
        years_of_experience: years,
        tech_stack: tech_stack.iter().map(|item| item.to_string()).collect(),
        active_interview_count: active,
        interviews_taken: 0,
        rating: 4.2,
    }
}

pub(super) fn technical(suffix: &str, years: u32, tech_stack: &[&str], active: u32) -> Professional {
    professional(suffix, ProfessionalRole::Technical, years, tech_stack, active)
}

pub(super) fn manager(suffix: &str, years: u32, tech_stack: &[&str], active: u32) -> Professional {
    professional(suffix, ProfessionalRole::Manager, years, tech_stack, active)
}

pub(super) fn hr(suffix: &str, years: u32, active: u32) -> Professional {
    professional(suffix, ProfessionalRole::Hr, years, &[], active)
}

pub(super) fn sample_application(suffix: &str, student_id: &str, offset_days: i64) -> Application {
    Application::submitted(
        ApplicationId(format!("app-{suffix}")),
        backend_job().id,
        student_id,
        "Asha Rao",
        applied_at(offset_days),
    )
}

pub(super) struct Harness {
    pub(super) service: Arc<MemoryService>,
    pub(super) applications: Arc<InMemoryApplications>,
    pub(super) roster: Arc<InMemoryRoster>,
    pub(super) jobs: Arc<InMemoryJobs>,
    pub(super) notifications: Arc<InMemoryNotifications>,
}

pub(super) fn build_harness() -> Harness {
    let applications = Arc::new(InMemoryApplications::default());
    let roster = Arc::new(InMemoryRoster::default());
    let jobs = Arc::new(InMemoryJobs::default());
    let notifications = Arc::new(InMemoryNotifications::default());
    let service = Arc::new(PlacementService::new(
        applications.clone(),
        roster.clone(),
        jobs.clone(),
        notifications.clone(),
        MatcherConfig::default(),
    ));
    Harness {
        service,
        applications,
        roster,
        jobs,
        notifications,
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

/// Application store that refuses every call, for transport error mapping.
pub(super) struct UnavailableApplications;

impl ApplicationRepository for UnavailableApplications {
    fn insert(&self, _application: Application) -> Result<Application, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _application: Application) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn for_student(&self, _student_id: &str) -> Result<Vec<Application>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Harness with the backend job registered and the interviewer seeded approved.
pub(super) fn seeded_harness(professionals: Vec<Professional>) -> Harness {
    let harness = build_harness();
    harness.jobs.insert(backend_job()).expect("job registers");
    for professional in professionals {
        harness
            .roster
            .insert(professional)
            .expect("professional registers");
    }
    harness
}
