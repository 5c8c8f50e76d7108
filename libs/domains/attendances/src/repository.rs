use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::AttendanceResult;
use crate::models::{Attendance, AttendanceKey};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Fails with `AlreadyRegistered` when the (event, user) pair exists
    async fn create(&self, attendance: Attendance) -> AttendanceResult<Attendance>;

    async fn find(&self, key: AttendanceKey) -> AttendanceResult<Option<Attendance>>;

    async fn list(&self) -> AttendanceResult<Vec<Attendance>>;

    async fn list_by_user(&self, user_id: Uuid) -> AttendanceResult<Vec<Attendance>>;

    async fn list_by_event(&self, event_id: Uuid) -> AttendanceResult<Vec<Attendance>>;

    /// Sets `checked_in_at` only if it is still unset. Returns the updated
    /// record, or `None` when nothing matched.
    async fn mark_checked_in(
        &self,
        key: AttendanceKey,
        at: DateTime<Utc>,
    ) -> AttendanceResult<Option<Attendance>>;

    /// Returns false if no registration matched
    async fn delete(&self, key: AttendanceKey) -> AttendanceResult<bool>;
}
