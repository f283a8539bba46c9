//! In-memory store used by the binary and the test suites. Each collection
//! sits behind its own mutex; counter updates happen inside the lock so
//! concurrent assignments observe consistent loads.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{Application, ApplicationId, Job, JobId, Notification, Professional, ProfessionalId, ProfessionalStatus};
use super::repository::{ApplicationRepository, JobCatalog, NotificationSink, NotifyError, RepositoryError, ProfessionalRepository};

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable("store mutex poisoned".to_string()))
}

#[derive(Default, Clone)]
pub struct InMemoryApplications {
    records: Arc<Mutex<HashMap<ApplicationId, Application>>>,
}

impl ApplicationRepository for InMemoryApplications {
    fn insert(&self, application: Application) -> Result<Application, RepositoryError> {
        let mut guard = lock(&self.records)?;
        if guard.contains_key(&application.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(application.id.clone(), application.clone());
        Ok(application)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        Ok(lock(&self.records)?.get(id).cloned())
    }

    fn update(&self, application: Application) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.records)?;
        if !guard.contains_key(&application.id) {
            return Err(RepositoryError::NotFound);
        }
        guard.insert(application.id.clone(), application);
        Ok(())
    }

    fn for_student(&self, student_id: &str) -> Result<Vec<Application>, RepositoryError> {
        let guard = lock(&self.records)?;
        let mut applications: Vec<Application> = guard
            .values()
            .filter(|application| application.student_id == student_id)
            .cloned()
            .collect();
        applications.sort_by(|a, b| a.applied_at.cmp(&b.applied_at));
        Ok(applications)
    }
}

#[derive(Default, Clone)]
pub struct InMemoryRoster {
    records: Arc<Mutex<HashMap<ProfessionalId, Professional>>>,
}

impl InMemoryRoster {
    fn with_professional<T>(
        &self,
        id: &ProfessionalId,
        apply: impl FnOnce(&mut Professional) -> T,
    ) -> Result<T, RepositoryError> {
        let mut guard = lock(&self.records)?;
        let professional = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        Ok(apply(professional))
    }
}

impl ProfessionalRepository for InMemoryRoster {
    fn insert(&self, professional: Professional) -> Result<Professional, RepositoryError> {
        let mut guard = lock(&self.records)?;
        if guard.contains_key(&professional.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(professional.id.clone(), professional.clone());
        Ok(professional)
    }

    fn fetch(&self, id: &ProfessionalId) -> Result<Option<Professional>, RepositoryError> {
        Ok(lock(&self.records)?.get(id).cloned())
    }

    fn roster(&self) -> Result<Vec<Professional>, RepositoryError> {
        let guard = lock(&self.records)?;
        let mut professionals: Vec<Professional> = guard.values().cloned().collect();
        professionals.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        Ok(professionals)
    }

    fn set_status(
        &self,
        id: &ProfessionalId,
        status: ProfessionalStatus,
    ) -> Result<Professional, RepositoryError> {
        self.with_professional(id, |professional| {
            professional.status = status;
            professional.clone()
        })
    }

    fn increment_active(&self, id: &ProfessionalId) -> Result<(), RepositoryError> {
        self.with_professional(id, |professional| {
            professional.active_interview_count += 1;
        })
    }

    fn release_active(&self, id: &ProfessionalId) -> Result<(), RepositoryError> {
        self.with_professional(id, |professional| {
            professional.active_interview_count = professional.active_interview_count.saturating_sub(1);
        })
    }

    fn complete_assignment(&self, id: &ProfessionalId) -> Result<(), RepositoryError> {
        self.with_professional(id, |professional| {
            professional.interviews_taken += 1;
            professional.active_interview_count = professional.active_interview_count.saturating_sub(1);
        })
    }
}

#[derive(Default, Clone)]
pub struct InMemoryJobs {
    records: Arc<Mutex<HashMap<JobId, Job>>>,
}

impl JobCatalog for InMemoryJobs {
    fn insert(&self, job: Job) -> Result<Job, RepositoryError> {
        let mut guard = lock(&self.records)?;
        if guard.contains_key(&job.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(job.id.clone(), job.clone());
        Ok(job)
    }

    fn fetch(&self, id: &JobId) -> Result<Option<Job>, RepositoryError> {
        Ok(lock(&self.records)?.get(id).cloned())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryNotifications {
    events: Arc<Mutex<Vec<Notification>>>,
}

impl InMemoryNotifications {
    /// Snapshot of every published notification, in publish order.
    pub fn events(&self) -> Vec<Notification> {
        self.events
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl NotificationSink for InMemoryNotifications {
    fn publish(&self, notification: Notification) -> Result<(), NotifyError> {
        self.events
            .lock()
            .map_err(|_| NotifyError::Transport("notification mutex poisoned".to_string()))?
            .push(notification);
        Ok(())
    }

    fn for_user(&self, user_id: &str) -> Result<Vec<Notification>, NotifyError> {
        let guard = self
            .events
            .lock()
            .map_err(|_| NotifyError::Transport("notification mutex poisoned".to_string()))?;
        Ok(guard
            .iter()
            .filter(|notification| notification.user_id == user_id)
            .cloned()
            .collect())
    }
}
