//! Interviewer assignment matching.
//!
//! The planner is a pure function over already-loaded state: given an
//! application, its job, and the roster, it either produces an
//! [`AssignmentPlan`] describing the full mutation bundle or reports a
//! caller-visible no-op. Persistence and notification delivery belong to the
//! service layer.

mod config;
mod eligibility;
mod selection;

pub use config::MatcherConfig;

use chrono::{DateTime, Utc};

use super::domain::{Application, ApplicationId, Job, Notification, NotificationKind, ProfessionalId};
use super::status::{ApplicationStatus, InterviewRound};

/// Stateless planner applying the eligibility thresholds to a roster.
pub struct AssignmentPlanner {
    config: MatcherConfig,
}

impl AssignmentPlanner {
    pub fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    /// Pick the interviewer for a round.
    ///
    /// The professional and manager rounds require the job for its tech
    /// stack; an application pointing at a missing job is a no-op outcome,
    /// not an error. The HR round never consults the job.
    pub fn plan(
        &self,
        application: &Application,
        job: Option<&Job>,
        roster: &[super::domain::Professional],
        round: InterviewRound,
    ) -> AssignmentOutcome {
        let required_tech_stack: &[String] = match round {
            InterviewRound::Hr => &[],
            InterviewRound::Professional | InterviewRound::Manager => match job {
                Some(job) => &job.required_tech_stack,
                None => return AssignmentOutcome::JobMissing,
            },
        };

        let mut eligible: Vec<&super::domain::Professional> = roster
            .iter()
            .filter(|professional| {
                eligibility::is_eligible(professional, round, required_tech_stack, &self.config)
            })
            .collect();

        if eligible.is_empty() {
            return AssignmentOutcome::NoEligibleProfessional;
        }

        selection::rank(&mut eligible);
        let selected = eligible[0];

        AssignmentOutcome::Assigned(AssignmentPlan {
            application_id: application.id.clone(),
            student_id: application.student_id.clone(),
            student_name: application.student_name.clone(),
            round,
            professional_id: selected.id.clone(),
            professional_name: selected.name.clone(),
            professional_company: selected.company.clone(),
            status: round.pending_status(),
        })
    }
}

/// Result of one matching attempt. The no-op variants carry no state change
/// and no notifications.
#[derive(Debug, Clone, PartialEq)]
pub enum AssignmentOutcome {
    Assigned(AssignmentPlan),
    NoEligibleProfessional,
    JobMissing,
}

/// Everything the service must commit for one successful assignment: the
/// application fields, the pending status, and the two notifications.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentPlan {
    pub application_id: ApplicationId,
    pub student_id: String,
    pub student_name: String,
    pub round: InterviewRound,
    pub professional_id: ProfessionalId,
    pub professional_name: String,
    pub professional_company: String,
    pub status: ApplicationStatus,
}

impl AssignmentPlan {
    /// Notification telling the student who will interview them.
    pub fn student_notification(&self, id: String, created_at: DateTime<Utc>) -> Notification {
        let title = match self.round {
            InterviewRound::Professional => "Interview Assigned",
            InterviewRound::Manager => "Manager Round Scheduled",
            InterviewRound::Hr => "HR Round Scheduled",
        };
        Notification {
            id,
            user_id: self.student_id.clone(),
            kind: NotificationKind::InterviewAssigned,
            title: title.to_string(),
            message: format!(
                "{} from {} has been assigned for your {} interview.",
                self.professional_name,
                self.professional_company,
                self.round.descriptor()
            ),
            read: false,
            created_at,
            action_url: Some(self.round.student_route().to_string()),
        }
    }

    /// Notification telling the selected professional about the new work.
    pub fn professional_notification(&self, id: String, created_at: DateTime<Utc>) -> Notification {
        let title = match self.round {
            InterviewRound::Professional => "New Interview Assigned",
            InterviewRound::Manager => "New Manager Interview Assigned",
            InterviewRound::Hr => "New HR Interview Assigned",
        };
        let article = match self.round {
            InterviewRound::Hr => "an",
            _ => "a",
        };
        Notification {
            id,
            user_id: self.professional_id.0.clone(),
            kind: NotificationKind::InterviewAssigned,
            title: title.to_string(),
            message: format!(
                "You have been assigned to conduct {article} {} interview for {}. Please review their profile and resume.",
                self.round.descriptor(),
                self.student_name
            ),
            read: false,
            created_at,
            action_url: Some("/professional/dashboard".to_string()),
        }
    }
}
