use super::common::*;

use chrono::{Duration, Utc};

use crate::pipeline::domain::{ApplicationId, JobId, NotificationKind, ProfessionalId, ProfessionalStatus, Recommendation};
use crate::pipeline::matcher::AssignmentOutcome;
use crate::pipeline::repository::{
    ApplicationRepository, JobCatalog, ProfessionalRepository, RepositoryError,
};
use crate::pipeline::service::{FeedbackSubmission, PlacementServiceError};
use crate::pipeline::status::{ApplicationStatus, InterviewRound};

fn feedback(professional: &str, rating: u8, recommendation: Recommendation) -> FeedbackSubmission {
    FeedbackSubmission {
        professional_id: ProfessionalId(professional.to_string()),
        rating,
        comments: Some("Solid fundamentals".to_string()),
        strengths: Some("Query design".to_string()),
        weaknesses: None,
        recommendation,
    }
}

#[test]
fn submit_creates_an_applied_record_with_a_seeded_timeline() {
    let harness = seeded_harness(Vec::new());
    let application = harness
        .service
        .submit("student-1", "Asha Rao", &backend_job().id)
        .expect("submission succeeds");

    assert_eq!(application.status, ApplicationStatus::Applied);
    assert_eq!(application.timeline.len(), 1);
    assert_eq!(application.timeline[0].status, ApplicationStatus::Applied);
    assert!(application.id.0.starts_with("app-"));

    let stored = harness
        .service
        .get(&application.id)
        .expect("stored application readable");
    assert_eq!(stored, application);
}

#[test]
fn submit_rejects_closed_and_expired_jobs() {
    let harness = seeded_harness(Vec::new());
    harness
        .jobs
        .insert(closed_job())
        .expect("closed job registers");

    let error = harness
        .service
        .submit("student-1", "Asha Rao", &closed_job().id)
        .expect_err("expired deadline refuses submissions");
    assert!(matches!(error, PlacementServiceError::JobClosed));

    let error = harness
        .service
        .submit("student-1", "Asha Rao", &JobId("job-ghost".to_string()))
        .expect_err("unknown job is a lookup failure");
    assert!(matches!(
        error,
        PlacementServiceError::Repository(RepositoryError::NotFound)
    ));
}

#[test]
fn update_status_appends_the_timeline_and_notifies_the_student() {
    let harness = seeded_harness(Vec::new());
    let application = harness
        .service
        .submit("student-1", "Asha Rao", &backend_job().id)
        .expect("submission succeeds");

    let updated = harness
        .service
        .update_status(
            &application.id,
            ApplicationStatus::AssessmentPending,
            Some("Resume cleared".to_string()),
        )
        .expect("status updates");

    assert_eq!(updated.status, ApplicationStatus::AssessmentPending);
    assert_eq!(updated.timeline.len(), 2);
    assert_eq!(
        updated.timeline[1].notes.as_deref(),
        Some("Resume cleared")
    );

    let inbox = harness
        .service
        .notifications_for("student-1")
        .expect("inbox readable");
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].kind, NotificationKind::ApplicationUpdate);
    assert_eq!(
        inbox[0].message,
        "Your application for Backend Engineer at Northwind Labs has been updated to: assessment_pending"
    );
}

#[test]
fn assigning_a_professional_commits_the_full_bundle() {
    let harness = seeded_harness(vec![technical("java", 6, &["Java"], 0)]);
    let application = harness
        .service
        .submit("student-1", "Asha Rao", &backend_job().id)
        .expect("submission succeeds");

    let outcome = harness
        .service
        .assign_professional_round(&application.id)
        .expect("assignment runs");
    let plan = match outcome {
        AssignmentOutcome::Assigned(plan) => plan,
        other => panic!("expected assignment, got {other:?}"),
    };
    assert_eq!(plan.professional_id.0, "pro-java");

    let stored = harness.service.get(&application.id).expect("readable");
    assert_eq!(stored.status, ApplicationStatus::ProfessionalInterviewPending);
    assert_eq!(stored.interview_round, Some(InterviewRound::Professional));
    assert_eq!(
        stored.assigned_professional_id.as_ref().map(|id| id.0.as_str()),
        Some("pro-java")
    );
    let note = stored.timeline.last().and_then(|event| event.notes.clone());
    assert_eq!(
        note.as_deref(),
        Some("Assigned to Interviewer java for professional round")
    );

    let interviewer = harness
        .roster
        .fetch(&plan.professional_id)
        .expect("roster readable")
        .expect("interviewer present");
    assert_eq!(interviewer.active_interview_count, 1);

    let events = harness.notifications.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].user_id, "student-1");
    assert_eq!(events[1].user_id, "pro-java");
}

#[test]
fn assignment_without_eligible_interviewers_changes_nothing() {
    let harness = seeded_harness(vec![technical("cobol", 12, &["COBOL"], 0)]);
    let application = harness
        .service
        .submit("student-1", "Asha Rao", &backend_job().id)
        .expect("submission succeeds");

    for _ in 0..2 {
        let outcome = harness
            .service
            .assign_professional_round(&application.id)
            .expect("assignment runs");
        assert_eq!(outcome, AssignmentOutcome::NoEligibleProfessional);
    }

    let stored = harness.service.get(&application.id).expect("readable");
    assert_eq!(stored.status, ApplicationStatus::Applied);
    assert!(stored.assigned_professional_id.is_none());
    assert!(stored.interview_round.is_none());
    assert_eq!(stored.timeline.len(), 1);
    assert!(harness.notifications.events().is_empty());

    let interviewer = harness
        .roster
        .fetch(&ProfessionalId("pro-cobol".to_string()))
        .expect("roster readable")
        .expect("interviewer present");
    assert_eq!(interviewer.active_interview_count, 0);
}

#[test]
fn assignment_against_a_missing_job_is_a_logged_no_op() {
    let harness = build_harness();
    let orphan = sample_application("orphan", "student-1", 0);
    harness
        .applications
        .insert(orphan.clone())
        .expect("orphan record inserts");

    let outcome = harness
        .service
        .assign_professional_round(&orphan.id)
        .expect("assignment runs");
    assert_eq!(outcome, AssignmentOutcome::JobMissing);

    let stored = harness.service.get(&orphan.id).expect("readable");
    assert_eq!(stored, orphan);
    assert!(harness.notifications.events().is_empty());
}

#[test]
fn assigning_an_unknown_application_is_an_error() {
    let harness = seeded_harness(Vec::new());
    let error = harness
        .service
        .assign_professional_round(&ApplicationId("app-ghost".to_string()))
        .expect_err("missing application fails");
    assert!(matches!(
        error,
        PlacementServiceError::Repository(RepositoryError::NotFound)
    ));
}

#[test]
fn scheduling_requires_a_round_in_progress() {
    let harness = seeded_harness(vec![technical("java", 6, &["Java"], 0)]);
    let application = harness
        .service
        .submit("student-1", "Asha Rao", &backend_job().id)
        .expect("submission succeeds");

    let error = harness
        .service
        .schedule_interview(
            &application.id,
            Utc::now() + Duration::days(2),
            "https://meet.example/abc".to_string(),
        )
        .expect_err("no round yet");
    assert!(matches!(error, PlacementServiceError::NoRoundInProgress));

    harness
        .service
        .assign_professional_round(&application.id)
        .expect("assignment runs");
    let slot = Utc::now() + Duration::days(2);
    let scheduled = harness
        .service
        .schedule_interview(&application.id, slot, "https://meet.example/abc".to_string())
        .expect("scheduling succeeds");

    assert_eq!(
        scheduled.status,
        ApplicationStatus::ProfessionalInterviewScheduled
    );
    assert_eq!(scheduled.scheduled_at, Some(slot));
    assert_eq!(
        scheduled.meeting_link.as_deref(),
        Some("https://meet.example/abc")
    );

    let scheduled_notice = harness
        .notifications
        .events()
        .into_iter()
        .find(|event| event.kind == NotificationKind::InterviewScheduled)
        .expect("student told about the slot");
    assert_eq!(scheduled_notice.user_id, "student-1");
}

#[test]
fn passing_feedback_advances_the_round_and_releases_load() {
    let harness = seeded_harness(vec![technical("java", 6, &["Java"], 0)]);
    let application = harness
        .service
        .submit("student-1", "Asha Rao", &backend_job().id)
        .expect("submission succeeds");
    harness
        .service
        .assign_professional_round(&application.id)
        .expect("assignment runs");

    let reviewed = harness
        .service
        .submit_feedback(&application.id, feedback("pro-java", 4, Recommendation::Recommend))
        .expect("feedback records");

    assert_eq!(
        reviewed.status,
        ApplicationStatus::ProfessionalInterviewCompleted
    );
    assert_eq!(reviewed.professional_interview_score, Some(80.0));
    assert_eq!(reviewed.interview_feedback.len(), 1);
    assert_eq!(
        reviewed.interview_feedback[0].professional_name,
        "Interviewer java"
    );

    let interviewer = harness
        .roster
        .fetch(&ProfessionalId("pro-java".to_string()))
        .expect("roster readable")
        .expect("interviewer present");
    assert_eq!(interviewer.active_interview_count, 0);
    assert_eq!(interviewer.interviews_taken, 1);
}

#[test]
fn failing_feedback_rejects_the_application() {
    let harness = seeded_harness(vec![technical("java", 6, &["Java"], 0)]);
    let application = harness
        .service
        .submit("student-1", "Asha Rao", &backend_job().id)
        .expect("submission succeeds");
    harness
        .service
        .assign_professional_round(&application.id)
        .expect("assignment runs");

    let reviewed = harness
        .service
        .submit_feedback(&application.id, feedback("pro-java", 2, Recommendation::Reject))
        .expect("feedback records");

    assert_eq!(reviewed.status, ApplicationStatus::Rejected);
    assert!(reviewed.status.is_terminal());
    assert_eq!(reviewed.professional_interview_score, Some(40.0));
}

#[test]
fn feedback_from_an_unassigned_professional_is_refused() {
    let harness = seeded_harness(vec![
        technical("java", 6, &["Java"], 0),
        technical("imposter", 9, &["Java"], 4),
    ]);
    let application = harness
        .service
        .submit("student-1", "Asha Rao", &backend_job().id)
        .expect("submission succeeds");
    harness
        .service
        .assign_professional_round(&application.id)
        .expect("assignment runs");

    let error = harness
        .service
        .submit_feedback(
            &application.id,
            feedback("pro-imposter", 4, Recommendation::Recommend),
        )
        .expect_err("unassigned interviewer refused");
    assert!(matches!(error, PlacementServiceError::NotAssigned));
}

#[test]
fn feedback_rating_must_stay_on_the_five_point_scale() {
    let harness = seeded_harness(vec![technical("java", 6, &["Java"], 0)]);
    let application = harness
        .service
        .submit("student-1", "Asha Rao", &backend_job().id)
        .expect("submission succeeds");
    harness
        .service
        .assign_professional_round(&application.id)
        .expect("assignment runs");

    let error = harness
        .service
        .submit_feedback(&application.id, feedback("pro-java", 6, Recommendation::Recommend))
        .expect_err("six is off the scale");
    assert!(matches!(error, PlacementServiceError::InvalidRating(6)));
}

#[test]
fn roster_registration_always_starts_pending_with_clean_counters() {
    let harness = build_harness();
    let mut submitted = technical("eager", 7, &["Java"], 3);
    submitted.status = ProfessionalStatus::Approved;
    submitted.interviews_taken = 12;

    let stored = harness
        .service
        .register_professional(submitted)
        .expect("registration succeeds");
    assert_eq!(stored.status, ProfessionalStatus::Pending);
    assert_eq!(stored.active_interview_count, 0);
    assert_eq!(stored.interviews_taken, 0);
}

#[test]
fn approving_a_professional_notifies_them() {
    let harness = build_harness();
    let mut pending = technical("eager", 7, &["Java"], 0);
    pending.status = ProfessionalStatus::Pending;
    harness.roster.insert(pending).expect("roster seeds");

    let approved = harness
        .service
        .set_professional_status(
            &ProfessionalId("pro-eager".to_string()),
            ProfessionalStatus::Approved,
        )
        .expect("approval succeeds");
    assert_eq!(approved.status, ProfessionalStatus::Approved);

    let inbox = harness
        .service
        .notifications_for("pro-eager")
        .expect("inbox readable");
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].kind, NotificationKind::ProfessionalApproved);
}

#[test]
fn active_application_lookup_tracks_the_latest_live_record() {
    let harness = seeded_harness(Vec::new());
    let first = harness
        .service
        .submit("student-1", "Asha Rao", &backend_job().id)
        .expect("first submission succeeds");
    harness
        .service
        .update_status(&first.id, ApplicationStatus::Rejected, None)
        .expect("first application rejects");

    assert!(harness
        .service
        .active_application_for_student("student-1")
        .expect("lookup runs")
        .is_none());

    let second = harness
        .service
        .submit("student-1", "Asha Rao", &backend_job().id)
        .expect("second submission succeeds");
    let active = harness
        .service
        .active_application_for_student("student-1")
        .expect("lookup runs")
        .expect("second application live");
    assert_eq!(active.id, second.id);
}

#[test]
fn concurrent_status_writes_serialize_per_application() {
    let harness = seeded_harness(Vec::new());
    let application = harness
        .service
        .submit("student-1", "Asha Rao", &backend_job().id)
        .expect("submission succeeds");

    let mut handles = Vec::new();
    for _ in 0..4 {
        let service = harness.service.clone();
        let id = application.id.clone();
        handles.push(std::thread::spawn(move || {
            service
                .update_status(&id, ApplicationStatus::ResumeUnderReview, None)
                .expect("update succeeds")
        }));
    }
    for handle in handles {
        handle.join().expect("writer thread completes");
    }

    let stored = harness.service.get(&application.id).expect("readable");
    assert_eq!(stored.status, ApplicationStatus::ResumeUnderReview);
    // submission plus every serialized write
    assert_eq!(stored.timeline.len(), 5);
}
