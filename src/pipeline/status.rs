use serde::{Deserialize, Serialize};

/// Position of an application in the placement pipeline.
///
/// The string values are wire contract: persisted records and the admin UI
/// match on them literally, including the historical `manager_round_*` /
/// `hr_round_*` naming that diverges from `professional_interview_*`. They
/// must never be normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Applied,
    ResumeUnderReview,
    ResumeApproved,
    ResumeShortlisted,
    ResumeRejected,
    AssessmentPending,
    AssessmentReleased,
    AssessmentInProgress,
    AssessmentCompleted,
    AssessmentSubmitted,
    AssessmentUnderReview,
    AssessmentShortlisted,
    AssessmentApproved,
    AssessmentRejected,
    AiInterviewPending,
    AiInterviewCompleted,
    ProfessionalInterviewPending,
    ProfessionalInterviewScheduled,
    ProfessionalInterviewCompleted,
    ManagerInterviewPending,
    ManagerRoundPending,
    ManagerInterviewScheduled,
    ManagerInterviewCompleted,
    ManagerRoundCompleted,
    HrInterviewPending,
    HrRoundPending,
    HrInterviewScheduled,
    HrInterviewCompleted,
    HrRoundCompleted,
    OfferReleased,
    OfferAccepted,
    OfferRejected,
    Rejected,
}

impl ApplicationStatus {
    /// Every status, in pipeline order.
    pub const ALL: [Self; 33] = [
        Self::Applied,
        Self::ResumeUnderReview,
        Self::ResumeApproved,
        Self::ResumeShortlisted,
        Self::ResumeRejected,
        Self::AssessmentPending,
        Self::AssessmentReleased,
        Self::AssessmentInProgress,
        Self::AssessmentCompleted,
        Self::AssessmentSubmitted,
        Self::AssessmentUnderReview,
        Self::AssessmentShortlisted,
        Self::AssessmentApproved,
        Self::AssessmentRejected,
        Self::AiInterviewPending,
        Self::AiInterviewCompleted,
        Self::ProfessionalInterviewPending,
        Self::ProfessionalInterviewScheduled,
        Self::ProfessionalInterviewCompleted,
        Self::ManagerInterviewPending,
        Self::ManagerRoundPending,
        Self::ManagerInterviewScheduled,
        Self::ManagerInterviewCompleted,
        Self::ManagerRoundCompleted,
        Self::HrInterviewPending,
        Self::HrRoundPending,
        Self::HrInterviewScheduled,
        Self::HrInterviewCompleted,
        Self::HrRoundCompleted,
        Self::OfferReleased,
        Self::OfferAccepted,
        Self::OfferRejected,
        Self::Rejected,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::ResumeUnderReview => "resume_under_review",
            Self::ResumeApproved => "resume_approved",
            Self::ResumeShortlisted => "resume_shortlisted",
            Self::ResumeRejected => "resume_rejected",
            Self::AssessmentPending => "assessment_pending",
            Self::AssessmentReleased => "assessment_released",
            Self::AssessmentInProgress => "assessment_in_progress",
            Self::AssessmentCompleted => "assessment_completed",
            Self::AssessmentSubmitted => "assessment_submitted",
            Self::AssessmentUnderReview => "assessment_under_review",
            Self::AssessmentShortlisted => "assessment_shortlisted",
            Self::AssessmentApproved => "assessment_approved",
            Self::AssessmentRejected => "assessment_rejected",
            Self::AiInterviewPending => "ai_interview_pending",
            Self::AiInterviewCompleted => "ai_interview_completed",
            Self::ProfessionalInterviewPending => "professional_interview_pending",
            Self::ProfessionalInterviewScheduled => "professional_interview_scheduled",
            Self::ProfessionalInterviewCompleted => "professional_interview_completed",
            Self::ManagerInterviewPending => "manager_interview_pending",
            Self::ManagerRoundPending => "manager_round_pending",
            Self::ManagerInterviewScheduled => "manager_interview_scheduled",
            Self::ManagerInterviewCompleted => "manager_interview_completed",
            Self::ManagerRoundCompleted => "manager_round_completed",
            Self::HrInterviewPending => "hr_interview_pending",
            Self::HrRoundPending => "hr_round_pending",
            Self::HrInterviewScheduled => "hr_interview_scheduled",
            Self::HrInterviewCompleted => "hr_interview_completed",
            Self::HrRoundCompleted => "hr_round_completed",
            Self::OfferReleased => "offer_released",
            Self::OfferAccepted => "offer_accepted",
            Self::OfferRejected => "offer_rejected",
            Self::Rejected => "rejected",
        }
    }

    /// Total lookup from a wire string. Unknown values yield `None` so callers
    /// can degrade gracefully instead of failing.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|status| status.as_str() == raw)
    }

    /// Human-readable label shown to students.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Applied => "Application Submitted",
            Self::ResumeUnderReview => "Resume Under Review",
            Self::ResumeApproved => "Resume Approved",
            Self::ResumeShortlisted => "Resume Shortlisted",
            Self::ResumeRejected => "Resume Rejected",
            Self::AssessmentPending => "Assessment Available - Please Complete",
            Self::AssessmentReleased => "Assessment Available",
            Self::AssessmentInProgress => "Assessment In Progress",
            Self::AssessmentCompleted => "Assessment Submitted - Under Review",
            Self::AssessmentSubmitted => "Assessment Submitted",
            Self::AssessmentUnderReview => "Assessment Under Review",
            Self::AssessmentShortlisted => "Assessment Shortlisted",
            Self::AssessmentApproved => "Assessment Approved",
            Self::AssessmentRejected => "Assessment Not Cleared",
            Self::AiInterviewPending => "AI Interview Available",
            Self::AiInterviewCompleted => "AI Interview Completed",
            Self::ProfessionalInterviewPending => "Technical Interview Pending",
            Self::ProfessionalInterviewScheduled => "Technical Interview Scheduled",
            Self::ProfessionalInterviewCompleted => "Technical Interview Completed",
            Self::ManagerInterviewPending => "Manager Round Pending",
            Self::ManagerRoundPending => "Manager Interview Pending",
            Self::ManagerInterviewScheduled => "Manager Interview Scheduled",
            Self::ManagerInterviewCompleted => "Manager Interview Completed",
            Self::ManagerRoundCompleted => "Manager Round Completed",
            Self::HrInterviewPending => "HR Round Pending",
            Self::HrRoundPending => "HR Interview Pending",
            Self::HrInterviewScheduled => "HR Interview Scheduled",
            Self::HrInterviewCompleted => "HR Interview Completed",
            Self::HrRoundCompleted => "HR Round Completed",
            Self::OfferReleased => "Offer Released",
            Self::OfferAccepted => "Offer Accepted",
            Self::OfferRejected => "Offer Rejected",
            Self::Rejected => "Application Rejected",
        }
    }

    /// The student may take the assessment now.
    pub const fn can_take_assessment(self) -> bool {
        matches!(self, Self::AssessmentPending | Self::AssessmentReleased)
    }

    /// The student may start the AI interview now.
    pub const fn can_take_ai_interview(self) -> bool {
        matches!(self, Self::AiInterviewPending)
    }

    /// A submitted assessment is awaiting admin review.
    pub const fn is_assessment_pending_review(self) -> bool {
        matches!(self, Self::AssessmentCompleted | Self::AssessmentSubmitted)
    }

    /// The AI interview is done and awaiting admin action.
    pub const fn is_ai_interview_pending_review(self) -> bool {
        matches!(self, Self::AiInterviewCompleted)
    }

    /// An assigned interviewer may conduct (or schedule) the interview.
    pub const fn can_conduct_interview(self) -> bool {
        matches!(
            self,
            Self::ProfessionalInterviewPending
                | Self::ProfessionalInterviewScheduled
                | Self::ManagerInterviewPending
                | Self::ManagerInterviewScheduled
                | Self::HrInterviewPending
                | Self::HrInterviewScheduled
        )
    }

    /// Membership in any AI or human interview stage (closed 11-value set).
    pub const fn is_in_interview_stage(self) -> bool {
        matches!(
            self,
            Self::AiInterviewPending
                | Self::AiInterviewCompleted
                | Self::ProfessionalInterviewPending
                | Self::ProfessionalInterviewScheduled
                | Self::ProfessionalInterviewCompleted
                | Self::ManagerInterviewPending
                | Self::ManagerInterviewScheduled
                | Self::ManagerInterviewCompleted
                | Self::HrInterviewPending
                | Self::HrInterviewScheduled
                | Self::HrInterviewCompleted
        )
    }

    pub const fn is_offer_stage(self) -> bool {
        matches!(
            self,
            Self::OfferReleased | Self::OfferAccepted | Self::OfferRejected
        )
    }

    pub const fn is_rejected(self) -> bool {
        matches!(
            self,
            Self::Rejected | Self::ResumeRejected | Self::AssessmentRejected
        )
    }

    /// Terminal statuses: the application will never transition again.
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Rejected | Self::OfferAccepted | Self::OfferRejected
        )
    }

    /// The student has something to do right now.
    pub const fn has_action_required(self) -> bool {
        self.can_take_assessment() || self.can_take_ai_interview()
    }

    /// Badge classification for status chips.
    pub fn badge_variant(self) -> BadgeVariant {
        if self.is_rejected() {
            return BadgeVariant::Destructive;
        }
        if self.is_offer_stage() {
            return match self {
                Self::OfferAccepted => BadgeVariant::Default,
                Self::OfferRejected => BadgeVariant::Destructive,
                _ => BadgeVariant::Secondary,
            };
        }
        if self.has_action_required() {
            BadgeVariant::Default
        } else {
            BadgeVariant::Secondary
        }
    }
}

/// Visual weight of a status chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeVariant {
    Default,
    Secondary,
    Destructive,
    Outline,
}

impl BadgeVariant {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Secondary => "secondary",
            Self::Destructive => "destructive",
            Self::Outline => "outline",
        }
    }
}

/// Human interview rounds that follow the AI interview, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewRound {
    Professional,
    Manager,
    Hr,
}

impl InterviewRound {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Professional => "professional",
            Self::Manager => "manager",
            Self::Hr => "hr",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "professional" => Some(Self::Professional),
            "manager" => Some(Self::Manager),
            "hr" => Some(Self::Hr),
            _ => None,
        }
    }

    /// Round name as it appears in notification copy.
    pub const fn descriptor(self) -> &'static str {
        match self {
            Self::Professional => "professional",
            Self::Manager => "Manager",
            Self::Hr => "HR",
        }
    }

    /// Status written when an interviewer is assigned for this round. The
    /// manager and HR values intentionally use the `_round_pending` literals.
    pub const fn pending_status(self) -> ApplicationStatus {
        match self {
            Self::Professional => ApplicationStatus::ProfessionalInterviewPending,
            Self::Manager => ApplicationStatus::ManagerRoundPending,
            Self::Hr => ApplicationStatus::HrRoundPending,
        }
    }

    /// Status written when the interviewer schedules the meeting.
    pub const fn scheduled_status(self) -> ApplicationStatus {
        match self {
            Self::Professional => ApplicationStatus::ProfessionalInterviewScheduled,
            Self::Manager => ApplicationStatus::ManagerInterviewScheduled,
            Self::Hr => ApplicationStatus::HrInterviewScheduled,
        }
    }

    /// Status written when the round is passed.
    pub const fn passed_status(self) -> ApplicationStatus {
        match self {
            Self::Professional => ApplicationStatus::ProfessionalInterviewCompleted,
            Self::Manager => ApplicationStatus::ManagerRoundCompleted,
            Self::Hr => ApplicationStatus::HrRoundCompleted,
        }
    }

    /// Where the student reviews this round.
    pub const fn student_route(self) -> &'static str {
        match self {
            Self::Professional => "/student/interviews",
            Self::Manager => "/student/manager-interview",
            Self::Hr => "/student/hr-interview",
        }
    }
}
