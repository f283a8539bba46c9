use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::{ApplicationStatus, InterviewRound};

/// Identifier wrapper for applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

/// Identifier wrapper for roster professionals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfessionalId(pub String);

/// A job posting. Read-only input to matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub company_name: String,
    pub role_title: String,
    pub required_tech_stack: Vec<String>,
    pub deadline: DateTime<Utc>,
    pub is_active: bool,
}

/// Kind of interviewer a roster member is allowed to act as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfessionalRole {
    Technical,
    Manager,
    #[serde(rename = "HR")]
    Hr,
    Admin,
}

/// Roster onboarding state. Only approved professionals receive assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfessionalStatus {
    Pending,
    Approved,
    Rejected,
}

/// A roster member able to conduct interview rounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Professional {
    pub id: ProfessionalId,
    pub name: String,
    pub company: String,
    pub role: ProfessionalRole,
    pub status: ProfessionalStatus,
    pub years_of_experience: u32,
    pub tech_stack: Vec<String>,
    /// In-flight assignment load, the primary load-balancing key.
    pub active_interview_count: u32,
    pub interviews_taken: u32,
    pub rating: f32,
}

/// One entry in an application's append-only audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub status: ApplicationStatus,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Interviewer verdict on a completed round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "Strongly Recommend")]
    StronglyRecommend,
    Recommend,
    Maybe,
    Reject,
    Pass,
    Fail,
}

impl Recommendation {
    pub const fn is_pass(self) -> bool {
        matches!(self, Self::Pass | Self::StronglyRecommend | Self::Recommend)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StronglyRecommend => "Strongly Recommend",
            Self::Recommend => "Recommend",
            Self::Maybe => "Maybe",
            Self::Reject => "Reject",
            Self::Pass => "Pass",
            Self::Fail => "Fail",
        }
    }
}

/// Detailed feedback recorded by the interviewer for one round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewFeedback {
    pub round: InterviewRound,
    pub professional_id: ProfessionalId,
    pub professional_name: String,
    /// 1-5 scale.
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strengths: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weaknesses: Option<String>,
    pub recommendation: Recommendation,
    pub conducted_at: DateTime<Utc>,
}

/// One student's application to one job.
///
/// Invariants: the timeline is append-only and non-decreasing in time, and
/// once a transition has appended an entry, `status` always equals the status
/// of the last entry. Applications are never deleted; `rejected`,
/// `offer_accepted`, and `offer_rejected` are terminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub student_id: String,
    pub student_name: String,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_professional_id: Option<ProfessionalId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_manager_id: Option<ProfessionalId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_hr_id: Option<ProfessionalId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interview_round: Option<InterviewRound>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub professional_interview_score: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_interview_score: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hr_interview_score: Option<f32>,
    pub interview_feedback: Vec<InterviewFeedback>,
    pub timeline: Vec<TimelineEvent>,
}

impl Application {
    /// Fresh application in `applied` with a seeded timeline entry.
    pub fn submitted(
        id: ApplicationId,
        job_id: JobId,
        student_id: impl Into<String>,
        student_name: impl Into<String>,
        applied_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            job_id,
            student_id: student_id.into(),
            student_name: student_name.into(),
            status: ApplicationStatus::Applied,
            applied_at,
            assigned_professional_id: None,
            assigned_manager_id: None,
            assigned_hr_id: None,
            interview_round: None,
            scheduled_at: None,
            meeting_link: None,
            professional_interview_score: None,
            manager_interview_score: None,
            hr_interview_score: None,
            interview_feedback: Vec::new(),
            timeline: vec![TimelineEvent {
                status: ApplicationStatus::Applied,
                timestamp: applied_at,
                notes: None,
            }],
        }
    }

    /// Write a new status and append the matching timeline entry.
    pub fn record_status(
        &mut self,
        status: ApplicationStatus,
        timestamp: DateTime<Utc>,
        notes: Option<String>,
    ) {
        self.status = status;
        self.timeline.push(TimelineEvent {
            status,
            timestamp,
            notes,
        });
    }

    /// Assignment field for a given round, if populated.
    pub fn assignment_for(&self, round: InterviewRound) -> Option<&ProfessionalId> {
        match round {
            InterviewRound::Professional => self.assigned_professional_id.as_ref(),
            InterviewRound::Manager => self.assigned_manager_id.as_ref(),
            InterviewRound::Hr => self.assigned_hr_id.as_ref(),
        }
    }

    /// Whether the given professional is assigned to any round.
    pub fn is_assigned(&self, professional_id: &ProfessionalId) -> bool {
        self.assigned_professional_id.as_ref() == Some(professional_id)
            || self.assigned_manager_id.as_ref() == Some(professional_id)
            || self.assigned_hr_id.as_ref() == Some(professional_id)
    }
}

/// Kinds of fire-and-forget notifications emitted by transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    ProfessionalApproved,
    ProfessionalRejected,
    InterviewAssigned,
    InterviewScheduled,
    InterviewCompleted,
    ApplicationUpdate,
}

/// Side record delivered to a user's notification feed. Not part of the state
/// machine; delivery never affects a transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,
}
