use crate::pipeline::domain::Professional;

/// Order eligible candidates least-loaded first, ties broken by seniority
/// (years of experience descending). The sort is stable, so equal candidates
/// keep their roster order.
pub(crate) fn rank(candidates: &mut [&Professional]) {
    candidates.sort_by(|a, b| {
        a.active_interview_count
            .cmp(&b.active_interview_count)
            .then(b.years_of_experience.cmp(&a.years_of_experience))
    });
}
