use super::config::MatcherConfig;
use crate::pipeline::domain::{Professional, ProfessionalRole, ProfessionalStatus};
use crate::pipeline::status::InterviewRound;

/// Whether a professional may be handed this round.
///
/// The HR round deliberately has no tech-stack requirement; the manager round
/// layers role and seniority checks on top of the technical filter.
pub(crate) fn is_eligible(
    professional: &Professional,
    round: InterviewRound,
    required_tech_stack: &[String],
    config: &MatcherConfig,
) -> bool {
    if professional.status != ProfessionalStatus::Approved {
        return false;
    }
    if professional.active_interview_count >= config.max_active_interviews {
        return false;
    }

    match round {
        InterviewRound::Professional => {
            stack_overlaps(&professional.tech_stack, required_tech_stack)
        }
        InterviewRound::Manager => {
            professional.role == ProfessionalRole::Manager
                && professional.years_of_experience >= config.manager_min_years
                && stack_overlaps(&professional.tech_stack, required_tech_stack)
        }
        InterviewRound::Hr => {
            professional.role == ProfessionalRole::Hr
                && professional.years_of_experience >= config.hr_min_years
        }
    }
}

fn stack_overlaps(tech_stack: &[String], required: &[String]) -> bool {
    tech_stack.iter().any(|tech| required.contains(tech))
}
