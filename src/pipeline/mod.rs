//! Application pipeline: status vocabulary, interviewer matching, and the
//! transitions that move a student from submission to offer.

pub mod domain;
pub mod flow;
pub mod matcher;
pub mod memory;
pub mod repository;
pub mod router;
pub mod service;
pub mod status;

#[cfg(test)]
mod tests;

pub use domain::{
    Application, ApplicationId, InterviewFeedback, Job, JobId, Notification, NotificationKind,
    Professional, ProfessionalId, ProfessionalRole, ProfessionalStatus, Recommendation,
    TimelineEvent,
};
pub use matcher::{AssignmentOutcome, AssignmentPlan, AssignmentPlanner, MatcherConfig};
pub use memory::{InMemoryApplications, InMemoryJobs, InMemoryNotifications, InMemoryRoster};
pub use repository::{
    ApplicationRepository, JobCatalog, NotificationSink, NotifyError, ProfessionalRepository,
    RepositoryError,
};
pub use router::placement_router;
pub use service::{ApplicationView, FeedbackSubmission, PlacementService, PlacementServiceError};
pub use status::{ApplicationStatus, BadgeVariant, InterviewRound};
