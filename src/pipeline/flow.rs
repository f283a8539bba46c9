//! Flow helpers consumed by routing guards and status displays.
//!
//! Everything here is total: an unrecognized raw status degrades to the
//! literal string, `false`, or an empty route, never an error, so any stored
//! status can be rendered without crashing.

use super::domain::Application;
use super::status::{ApplicationStatus, BadgeVariant};

/// Stage the admin triggers next once the current one completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStage {
    Tech,
    Manager,
    Hr,
    Offer,
}

/// Human label for a wire status; unknown values fall back to the raw string.
pub fn status_label(raw: &str) -> String {
    match ApplicationStatus::parse(raw) {
        Some(status) => status.label().to_string(),
        None => raw.to_string(),
    }
}

/// Badge variant for a wire status; unknown values render as secondary.
pub fn status_variant(raw: &str) -> BadgeVariant {
    match ApplicationStatus::parse(raw) {
        Some(status) => status.badge_variant(),
        None => BadgeVariant::Secondary,
    }
}

/// Route behind the student's action button, or empty if no action applies.
pub fn action_route(status: ApplicationStatus, application_id: &str) -> String {
    if status.can_take_assessment() {
        format!("/student/assessment/{application_id}")
    } else if status.can_take_ai_interview() {
        format!("/student/ai-interview/{application_id}")
    } else {
        String::new()
    }
}

/// Label on the student's action button, or empty if no action applies.
pub fn action_button_text(status: ApplicationStatus) -> &'static str {
    if status.can_take_assessment() {
        "Take Assessment"
    } else if status.can_take_ai_interview() {
        "Start AI Interview"
    } else {
        ""
    }
}

/// What the admin should trigger next, if the pipeline is at a hand-off point.
pub fn next_interview_stage(status: ApplicationStatus) -> Option<NextStage> {
    match status {
        ApplicationStatus::AiInterviewCompleted => Some(NextStage::Tech),
        ApplicationStatus::ProfessionalInterviewCompleted => Some(NextStage::Manager),
        ApplicationStatus::ManagerInterviewCompleted => Some(NextStage::Hr),
        ApplicationStatus::HrInterviewCompleted => Some(NextStage::Offer),
        _ => None,
    }
}

pub const fn status_after_resume_approval() -> ApplicationStatus {
    ApplicationStatus::AssessmentPending
}

pub const fn status_after_assessment_submission() -> ApplicationStatus {
    ApplicationStatus::AssessmentCompleted
}

pub const fn status_after_assessment_approval() -> ApplicationStatus {
    ApplicationStatus::AiInterviewPending
}

pub const fn status_after_ai_interview() -> ApplicationStatus {
    ApplicationStatus::AiInterviewCompleted
}

/// The student's current application: the most recent non-terminal one.
///
/// Ties on `applied_at` keep the earliest-listed application, matching a
/// stable descending sort picking its first element.
pub fn active_application<'a>(
    applications: &'a [Application],
    student_id: &str,
) -> Option<&'a Application> {
    applications
        .iter()
        .filter(|application| {
            application.student_id == student_id && !application.status.is_terminal()
        })
        .fold(None, |best: Option<&'a Application>, candidate| match best {
            Some(current) if candidate.applied_at > current.applied_at => Some(candidate),
            None => Some(candidate),
            _ => best,
        })
}
