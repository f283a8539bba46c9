use super::domain::{Application, ApplicationId, Job, JobId, Notification, Professional, ProfessionalId, ProfessionalStatus};

/// Storage abstraction for applications so the service and matcher can be
/// exercised without a real database.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, application: Application) -> Result<Application, RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError>;
    fn update(&self, application: Application) -> Result<(), RepositoryError>;
    fn for_student(&self, student_id: &str) -> Result<Vec<Application>, RepositoryError>;
}

/// Admin-managed interviewer roster. The matcher only reads it and adjusts
/// the load counters through the dedicated methods below, which must be
/// atomic with respect to each other.
pub trait ProfessionalRepository: Send + Sync {
    fn insert(&self, professional: Professional) -> Result<Professional, RepositoryError>;
    fn fetch(&self, id: &ProfessionalId) -> Result<Option<Professional>, RepositoryError>;
    fn roster(&self) -> Result<Vec<Professional>, RepositoryError>;
    fn set_status(
        &self,
        id: &ProfessionalId,
        status: ProfessionalStatus,
    ) -> Result<Professional, RepositoryError>;
    /// Add one in-flight assignment to the professional's load.
    fn increment_active(&self, id: &ProfessionalId) -> Result<(), RepositoryError>;
    /// Drop one in-flight assignment, saturating at zero. Used to roll back a
    /// failed assignment write.
    fn release_active(&self, id: &ProfessionalId) -> Result<(), RepositoryError>;
    /// Record a conducted interview: bump `interviews_taken` and release one
    /// unit of load.
    fn complete_assignment(&self, id: &ProfessionalId) -> Result<(), RepositoryError>;
}

/// Read-only lookup of job postings.
pub trait JobCatalog: Send + Sync {
    fn insert(&self, job: Job) -> Result<Job, RepositoryError>;
    fn fetch(&self, id: &JobId) -> Result<Option<Job>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound notification hook. Delivery is fire-and-forget relative to the
/// state transition that produced the record.
pub trait NotificationSink: Send + Sync {
    fn publish(&self, notification: Notification) -> Result<(), NotifyError>;
    fn for_user(&self, user_id: &str) -> Result<Vec<Notification>, NotifyError>;
}

/// Notification dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}
