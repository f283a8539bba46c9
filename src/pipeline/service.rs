use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::domain::{Application, ApplicationId, InterviewFeedback, Job, JobId, Notification, NotificationKind, Professional, ProfessionalId, ProfessionalStatus, Recommendation, TimelineEvent};
use super::flow;
use super::matcher::{AssignmentOutcome, AssignmentPlanner, MatcherConfig};
use super::repository::{ApplicationRepository, JobCatalog, NotificationSink, NotifyError, RepositoryError, ProfessionalRepository};
use super::status::{ApplicationStatus, BadgeVariant, InterviewRound};

/// Service composing the repositories, the assignment planner, and the
/// notification sink. All mutating transitions on one application are
/// serialized through a per-application lock so concurrent requests cannot
/// double-assign a round.
pub struct PlacementService<A, P, J, N> {
    applications: Arc<A>,
    professionals: Arc<P>,
    jobs: Arc<J>,
    notifications: Arc<N>,
    planner: AssignmentPlanner,
    locks: Mutex<HashMap<ApplicationId, Arc<Mutex<()>>>>,
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static NOTIFICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("app-{id:06}"))
}

fn next_notification_id() -> String {
    let id = NOTIFICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("notif-{id:06}")
}

impl<A, P, J, N> PlacementService<A, P, J, N>
where
    A: ApplicationRepository,
    P: ProfessionalRepository,
    J: JobCatalog,
    N: NotificationSink,
{
    pub fn new(
        applications: Arc<A>,
        professionals: Arc<P>,
        jobs: Arc<J>,
        notifications: Arc<N>,
        config: MatcherConfig,
    ) -> Self {
        Self {
            applications,
            professionals,
            jobs,
            notifications,
            planner: AssignmentPlanner::new(config),
            locks: Mutex::new(HashMap::new()),
        }
    }

    fn application_lock(
        &self,
        id: &ApplicationId,
    ) -> Result<Arc<Mutex<()>>, PlacementServiceError> {
        let mut registry = self
            .locks
            .lock()
            .map_err(|_| RepositoryError::Unavailable("lock registry poisoned".to_string()))?;
        Ok(registry.entry(id.clone()).or_default().clone())
    }

    /// Delivery failures are logged and never fail the transition that
    /// produced the notification.
    fn deliver(&self, notification: Notification) {
        if let Err(error) = self.notifications.publish(notification) {
            warn!(%error, "notification delivery failed");
        }
    }

    /// Create an application in `applied` against an open job.
    pub fn submit(
        &self,
        student_id: &str,
        student_name: &str,
        job_id: &JobId,
    ) -> Result<Application, PlacementServiceError> {
        let job = self
            .jobs
            .fetch(job_id)?
            .ok_or(RepositoryError::NotFound)?;
        let now = Utc::now();
        if !job.is_active || job.deadline < now {
            return Err(PlacementServiceError::JobClosed);
        }

        let application = Application::submitted(
            next_application_id(),
            job.id.clone(),
            student_id,
            student_name,
            now,
        );
        let stored = self.applications.insert(application)?;
        Ok(stored)
    }

    pub fn get(&self, id: &ApplicationId) -> Result<Application, PlacementServiceError> {
        Ok(self
            .applications
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?)
    }

    pub fn applications_for_student(
        &self,
        student_id: &str,
    ) -> Result<Vec<Application>, PlacementServiceError> {
        Ok(self.applications.for_student(student_id)?)
    }

    /// The student's most recent non-terminal application, if any.
    pub fn active_application_for_student(
        &self,
        student_id: &str,
    ) -> Result<Option<Application>, PlacementServiceError> {
        let applications = self.applications.for_student(student_id)?;
        Ok(flow::active_application(&applications, student_id).cloned())
    }

    pub fn notifications_for(
        &self,
        user_id: &str,
    ) -> Result<Vec<Notification>, PlacementServiceError> {
        Ok(self.notifications.for_user(user_id)?)
    }

    pub fn register_job(&self, job: Job) -> Result<Job, PlacementServiceError> {
        Ok(self.jobs.insert(job)?)
    }

    /// Add an interviewer to the roster. New profiles always start pending
    /// with zeroed counters regardless of the submitted payload.
    pub fn register_professional(
        &self,
        mut professional: Professional,
    ) -> Result<Professional, PlacementServiceError> {
        professional.status = ProfessionalStatus::Pending;
        professional.active_interview_count = 0;
        professional.interviews_taken = 0;
        Ok(self.professionals.insert(professional)?)
    }

    pub fn set_professional_status(
        &self,
        id: &ProfessionalId,
        status: ProfessionalStatus,
    ) -> Result<Professional, PlacementServiceError> {
        let updated = self.professionals.set_status(id, status)?;
        let notice = match status {
            ProfessionalStatus::Approved => Some((
                NotificationKind::ProfessionalApproved,
                "Profile Approved",
                "Your interviewer profile has been approved. You can now receive interview assignments.",
            )),
            ProfessionalStatus::Rejected => Some((
                NotificationKind::ProfessionalRejected,
                "Profile Rejected",
                "Your interviewer profile was not approved.",
            )),
            ProfessionalStatus::Pending => None,
        };
        if let Some((kind, title, message)) = notice {
            self.deliver(Notification {
                id: next_notification_id(),
                user_id: updated.id.0.clone(),
                kind,
                title: title.to_string(),
                message: message.to_string(),
                read: false,
                created_at: Utc::now(),
                action_url: Some("/professional/dashboard".to_string()),
            });
        }
        Ok(updated)
    }

    /// Admin status write: set the field, append the timeline entry, tell the
    /// student.
    pub fn update_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
        notes: Option<String>,
    ) -> Result<Application, PlacementServiceError> {
        let lock = self.application_lock(id)?;
        let _guard = lock
            .lock()
            .map_err(|_| RepositoryError::Unavailable("application lock poisoned".to_string()))?;

        let mut application = self
            .applications
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        let now = Utc::now();
        application.record_status(status, now, notes);
        self.applications.update(application.clone())?;

        let message = match self.jobs.fetch(&application.job_id)? {
            Some(job) => format!(
                "Your application for {} at {} has been updated to: {}",
                job.role_title,
                job.company_name,
                status.as_str()
            ),
            None => format!(
                "Your application status has been updated to: {}",
                status.as_str()
            ),
        };
        self.deliver(Notification {
            id: next_notification_id(),
            user_id: application.student_id.clone(),
            kind: NotificationKind::ApplicationUpdate,
            title: "Application Update".to_string(),
            message,
            read: false,
            created_at: now,
            action_url: Some(format!("/student/applications/{}", application.id.0)),
        });
        Ok(application)
    }

    pub fn assign_professional_round(
        &self,
        id: &ApplicationId,
    ) -> Result<AssignmentOutcome, PlacementServiceError> {
        self.assign_round(id, InterviewRound::Professional)
    }

    pub fn assign_manager_round(
        &self,
        id: &ApplicationId,
    ) -> Result<AssignmentOutcome, PlacementServiceError> {
        self.assign_round(id, InterviewRound::Manager)
    }

    pub fn assign_hr_round(
        &self,
        id: &ApplicationId,
    ) -> Result<AssignmentOutcome, PlacementServiceError> {
        self.assign_round(id, InterviewRound::Hr)
    }

    /// Match and commit an interviewer for a round.
    ///
    /// The no-op outcomes leave every record untouched and emit nothing; the
    /// assigned outcome commits status, assignment field, timeline entry, and
    /// load counter together, then fires both notifications.
    pub fn assign_round(
        &self,
        id: &ApplicationId,
        round: InterviewRound,
    ) -> Result<AssignmentOutcome, PlacementServiceError> {
        let lock = self.application_lock(id)?;
        let _guard = lock
            .lock()
            .map_err(|_| RepositoryError::Unavailable("application lock poisoned".to_string()))?;

        let mut application = self
            .applications
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        let job = self.jobs.fetch(&application.job_id)?;
        let roster = self.professionals.roster()?;

        let outcome = self.planner.plan(&application, job.as_ref(), &roster, round);
        match &outcome {
            AssignmentOutcome::Assigned(plan) => {
                let now = Utc::now();
                self.professionals.increment_active(&plan.professional_id)?;

                match round {
                    InterviewRound::Professional => {
                        application.assigned_professional_id = Some(plan.professional_id.clone());
                    }
                    InterviewRound::Manager => {
                        application.assigned_manager_id = Some(plan.professional_id.clone());
                    }
                    InterviewRound::Hr => {
                        application.assigned_hr_id = Some(plan.professional_id.clone());
                    }
                }
                application.interview_round = Some(round);
                application.record_status(
                    plan.status,
                    now,
                    Some(format!(
                        "Assigned to {} for {} round",
                        plan.professional_name,
                        round.as_str()
                    )),
                );

                if let Err(error) = self.applications.update(application) {
                    // the counter must not leak when the application write fails
                    if let Err(rollback) = self.professionals.release_active(&plan.professional_id)
                    {
                        warn!(%rollback, "failed to roll back interviewer load");
                    }
                    return Err(error.into());
                }

                self.deliver(plan.student_notification(next_notification_id(), now));
                self.deliver(plan.professional_notification(next_notification_id(), now));
                info!(
                    application = %plan.application_id.0,
                    professional = %plan.professional_id.0,
                    round = round.as_str(),
                    "interviewer assigned"
                );
            }
            AssignmentOutcome::NoEligibleProfessional => {
                warn!(application = %id.0, round = round.as_str(), "no eligible professional for round");
            }
            AssignmentOutcome::JobMissing => {
                warn!(application = %id.0, job = %application.job_id.0, "application references a missing job");
            }
        }
        Ok(outcome)
    }

    /// Interviewer locks in the meeting for the round currently in progress.
    pub fn schedule_interview(
        &self,
        id: &ApplicationId,
        scheduled_at: DateTime<Utc>,
        meeting_link: String,
    ) -> Result<Application, PlacementServiceError> {
        let lock = self.application_lock(id)?;
        let _guard = lock
            .lock()
            .map_err(|_| RepositoryError::Unavailable("application lock poisoned".to_string()))?;

        let mut application = self
            .applications
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        let round = application
            .interview_round
            .ok_or(PlacementServiceError::NoRoundInProgress)?;

        let now = Utc::now();
        application.scheduled_at = Some(scheduled_at);
        application.meeting_link = Some(meeting_link);
        application.record_status(
            round.scheduled_status(),
            now,
            Some(format!("Interview scheduled for {scheduled_at}")),
        );
        self.applications.update(application.clone())?;

        let message = match self.jobs.fetch(&application.job_id)? {
            Some(job) => format!(
                "Your {} interview for {} at {} has been scheduled",
                round.as_str(),
                job.role_title,
                job.company_name
            ),
            None => format!("Your {} interview has been scheduled", round.as_str()),
        };
        self.deliver(Notification {
            id: next_notification_id(),
            user_id: application.student_id.clone(),
            kind: NotificationKind::InterviewScheduled,
            title: "Interview Scheduled".to_string(),
            message,
            read: false,
            created_at: now,
            action_url: Some(format!("/student/applications/{}", application.id.0)),
        });
        Ok(application)
    }

    /// Interviewer verdict on the round in progress. A passing recommendation
    /// advances to the round's completion status, anything else rejects the
    /// application. Completing a round releases one unit of interviewer load.
    pub fn submit_feedback(
        &self,
        id: &ApplicationId,
        submission: FeedbackSubmission,
    ) -> Result<Application, PlacementServiceError> {
        if !(1..=5).contains(&submission.rating) {
            return Err(PlacementServiceError::InvalidRating(submission.rating));
        }

        let lock = self.application_lock(id)?;
        let _guard = lock
            .lock()
            .map_err(|_| RepositoryError::Unavailable("application lock poisoned".to_string()))?;

        let mut application = self
            .applications
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        let round = application
            .interview_round
            .ok_or(PlacementServiceError::NoRoundInProgress)?;
        if !application.is_assigned(&submission.professional_id) {
            return Err(PlacementServiceError::NotAssigned);
        }
        let professional = self
            .professionals
            .fetch(&submission.professional_id)?
            .ok_or(RepositoryError::NotFound)?;

        let now = Utc::now();
        let score = f32::from(submission.rating) / 5.0 * 100.0;
        match round {
            InterviewRound::Professional => {
                application.professional_interview_score = Some(score)
            }
            InterviewRound::Manager => application.manager_interview_score = Some(score),
            InterviewRound::Hr => application.hr_interview_score = Some(score),
        }
        application.interview_feedback.push(InterviewFeedback {
            round,
            professional_id: submission.professional_id.clone(),
            professional_name: professional.name.clone(),
            rating: submission.rating,
            comments: submission.comments.clone(),
            strengths: submission.strengths.clone(),
            weaknesses: submission.weaknesses.clone(),
            recommendation: submission.recommendation,
            conducted_at: now,
        });

        let status = if submission.recommendation.is_pass() {
            round.passed_status()
        } else {
            ApplicationStatus::Rejected
        };
        application.record_status(
            status,
            now,
            Some(format!(
                "{} interview completed - {}",
                round.as_str(),
                submission.recommendation.as_str()
            )),
        );
        self.applications.update(application.clone())?;
        self.professionals
            .complete_assignment(&submission.professional_id)?;

        let message = match self.jobs.fetch(&application.job_id)? {
            Some(job) => format!(
                "Your {} interview for {} at {} has been completed",
                round.as_str(),
                job.role_title,
                job.company_name
            ),
            None => format!("Your {} interview has been completed", round.as_str()),
        };
        self.deliver(Notification {
            id: next_notification_id(),
            user_id: application.student_id.clone(),
            kind: NotificationKind::InterviewCompleted,
            title: "Interview Completed".to_string(),
            message,
            read: false,
            created_at: now,
            action_url: Some(format!("/student/applications/{}", application.id.0)),
        });
        Ok(application)
    }
}

/// Error raised by the placement service. The assignment no-ops are *not*
/// errors; they surface through [`AssignmentOutcome`].
#[derive(Debug, thiserror::Error)]
pub enum PlacementServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Notifications(#[from] NotifyError),
    #[error("job is not accepting applications")]
    JobClosed,
    #[error("no interview round in progress")]
    NoRoundInProgress,
    #[error("professional is not assigned to this interview")]
    NotAssigned,
    #[error("rating {0} out of range 1-5")]
    InvalidRating(u8),
}

/// Interviewer feedback payload for one round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackSubmission {
    pub professional_id: ProfessionalId,
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strengths: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weaknesses: Option<String>,
    pub recommendation: Recommendation,
}

/// Student-facing projection of an application for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationView {
    pub application_id: ApplicationId,
    pub job_id: JobId,
    pub student_id: String,
    pub status: &'static str,
    pub label: &'static str,
    pub badge: BadgeVariant,
    pub action_required: bool,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub action_button: &'static str,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub action_route: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interview_round: Option<InterviewRound>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_professional_id: Option<ProfessionalId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_manager_id: Option<ProfessionalId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_hr_id: Option<ProfessionalId>,
    pub applied_at: DateTime<Utc>,
    pub timeline: Vec<TimelineEvent>,
}

impl From<&Application> for ApplicationView {
    fn from(application: &Application) -> Self {
        Self {
            application_id: application.id.clone(),
            job_id: application.job_id.clone(),
            student_id: application.student_id.clone(),
            status: application.status.as_str(),
            label: application.status.label(),
            badge: application.status.badge_variant(),
            action_required: application.status.has_action_required(),
            action_button: flow::action_button_text(application.status),
            action_route: flow::action_route(application.status, &application.id.0),
            interview_round: application.interview_round,
            assigned_professional_id: application.assigned_professional_id.clone(),
            assigned_manager_id: application.assigned_manager_id.clone(),
            assigned_hr_id: application.assigned_hr_id.clone(),
            applied_at: application.applied_at,
            timeline: application.timeline.clone(),
        }
    }
}
