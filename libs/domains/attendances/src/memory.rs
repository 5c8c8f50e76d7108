use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{AttendanceError, AttendanceResult};
use crate::models::{Attendance, AttendanceKey};
use crate::repository::AttendanceRepository;

/// In-memory AttendanceRepository (for development/testing)
#[derive(Debug, Clone, Default)]
pub struct InMemoryAttendanceRepository {
    attendances: Arc<RwLock<Vec<Attendance>>>,
}

impl InMemoryAttendanceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn filtered(&self, keep: impl Fn(&Attendance) -> bool) -> Vec<Attendance> {
        self.attendances
            .read()
            .await
            .iter()
            .filter(|a| keep(a))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl AttendanceRepository for InMemoryAttendanceRepository {
    async fn create(&self, attendance: Attendance) -> AttendanceResult<Attendance> {
        let mut attendances = self.attendances.write().await;

        if attendances.iter().any(|a| a.key() == attendance.key()) {
            return Err(AttendanceError::AlreadyRegistered {
                event_id: attendance.event_id,
                user_id: attendance.user_id,
            });
        }

        attendances.push(attendance.clone());
        Ok(attendance)
    }

    async fn find(&self, key: AttendanceKey) -> AttendanceResult<Option<Attendance>> {
        Ok(self
            .attendances
            .read()
            .await
            .iter()
            .find(|a| a.key() == key)
            .cloned())
    }

    async fn list(&self) -> AttendanceResult<Vec<Attendance>> {
        Ok(self.attendances.read().await.clone())
    }

    async fn list_by_user(&self, user_id: Uuid) -> AttendanceResult<Vec<Attendance>> {
        Ok(self.filtered(|a| a.user_id == user_id).await)
    }

    async fn list_by_event(&self, event_id: Uuid) -> AttendanceResult<Vec<Attendance>> {
        Ok(self.filtered(|a| a.event_id == event_id).await)
    }

    async fn mark_checked_in(
        &self,
        key: AttendanceKey,
        at: DateTime<Utc>,
    ) -> AttendanceResult<Option<Attendance>> {
        let mut attendances = self.attendances.write().await;
        let Some(attendance) = attendances
            .iter_mut()
            .find(|a| a.key() == key && !a.is_checked_in())
        else {
            return Ok(None);
        };

        attendance.checked_in_at = Some(at);
        Ok(Some(attendance.clone()))
    }

    async fn delete(&self, key: AttendanceKey) -> AttendanceResult<bool> {
        let mut attendances = self.attendances.write().await;
        let before = attendances.len();
        attendances.retain(|a| a.key() != key);
        Ok(attendances.len() < before)
    }
}
