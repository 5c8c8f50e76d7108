use chrono::Utc;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{AttendanceError, AttendanceResult};
use crate::models::{Attendance, AttendanceKey};
use crate::repository::AttendanceRepository;

pub struct AttendanceService<R: AttendanceRepository> {
    repository: Arc<R>,
}

impl<R: AttendanceRepository> AttendanceService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn register(&self, key: AttendanceKey) -> AttendanceResult<Attendance> {
        let attendance = self.repository.create(Attendance::new(key)).await?;
        tracing::info!(attendance_id = %attendance.id, "Attendance registered");
        Ok(attendance)
    }

    #[instrument(skip(self))]
    pub async fn list_attendances(&self) -> AttendanceResult<Vec<Attendance>> {
        self.repository.list().await
    }

    #[instrument(skip(self))]
    pub async fn list_for_user(&self, user_id: Uuid) -> AttendanceResult<Vec<Attendance>> {
        self.repository.list_by_user(user_id).await
    }

    #[instrument(skip(self))]
    pub async fn list_for_event(&self, event_id: Uuid) -> AttendanceResult<Vec<Attendance>> {
        self.repository.list_by_event(event_id).await
    }

    /// Records the attendee's arrival.
    #[instrument(skip(self))]
    pub async fn check_in(&self, key: AttendanceKey) -> AttendanceResult<Attendance> {
        if let Some(attendance) = self.repository.mark_checked_in(key, Utc::now()).await? {
            tracing::info!(attendance_id = %attendance.id, "Attendee checked in");
            return Ok(attendance);
        }

        // Nothing updated: either unknown or already checked in.
        match self.repository.find(key).await? {
            Some(_) => Err(AttendanceError::AlreadyCheckedIn {
                event_id: key.event_id,
                user_id: key.user_id,
            }),
            None => Err(AttendanceError::NotRegistered {
                event_id: key.event_id,
                user_id: key.user_id,
            }),
        }
    }

    #[instrument(skip(self))]
    pub async fn unregister(&self, key: AttendanceKey) -> AttendanceResult<()> {
        if !self.repository.delete(key).await? {
            return Err(AttendanceError::NotRegistered {
                event_id: key.event_id,
                user_id: key.user_id,
            });
        }
        tracing::info!("Attendance removed");
        Ok(())
    }
}

impl<R: AttendanceRepository> Clone for AttendanceService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockAttendanceRepository;

    fn key() -> AttendanceKey {
        AttendanceKey {
            event_id: Uuid::now_v7(),
            user_id: Uuid::now_v7(),
        }
    }

    #[tokio::test]
    async fn test_check_in_unknown_registration_is_not_registered() {
        let mut repo = MockAttendanceRepository::new();
        repo.expect_mark_checked_in().returning(|_, _| Ok(None));
        repo.expect_find().returning(|_| Ok(None));

        let service = AttendanceService::new(repo);
        let err = service.check_in(key()).await.unwrap_err();
        assert!(matches!(err, AttendanceError::NotRegistered { .. }));
    }

    #[tokio::test]
    async fn test_second_check_in_is_conflict() {
        let key = key();
        let mut repo = MockAttendanceRepository::new();
        repo.expect_mark_checked_in().returning(|_, _| Ok(None));
        repo.expect_find().returning(move |_| {
            let mut attendance = Attendance::new(key);
            attendance.checked_in_at = Some(Utc::now());
            Ok(Some(attendance))
        });

        let service = AttendanceService::new(repo);
        let err = service.check_in(key).await.unwrap_err();
        assert!(matches!(err, AttendanceError::AlreadyCheckedIn { .. }));
    }

    #[tokio::test]
    async fn test_successful_check_in_skips_lookup() {
        let key = key();
        let mut repo = MockAttendanceRepository::new();
        repo.expect_mark_checked_in().times(1).returning(move |_, at| {
            let mut attendance = Attendance::new(key);
            attendance.checked_in_at = Some(at);
            Ok(Some(attendance))
        });
        repo.expect_find().never();

        let service = AttendanceService::new(repo);
        let attendance = service.check_in(key).await.unwrap();
        assert!(attendance.is_checked_in());
    }

    #[tokio::test]
    async fn test_unregister_missing_is_not_registered() {
        let mut repo = MockAttendanceRepository::new();
        repo.expect_delete().returning(|_| Ok(false));

        let service = AttendanceService::new(repo);
        let err = service.unregister(key()).await.unwrap_err();
        assert!(matches!(err, AttendanceError::NotRegistered { .. }));
    }
}
