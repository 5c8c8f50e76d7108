//! Event Service - validation, conflict checks and repository orchestration

use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::conflict::{Violation, check_conflicts};
use crate::error::{EventError, EventResult};
use crate::models::{ConflictReport, CreateEvent, Event, EventFilter, UpdateEvent};
use crate::repository::EventRepository;

pub struct EventService<R: EventRepository> {
    repository: Arc<R>,
}

impl<R: EventRepository> EventService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Validate, check against every stored event, then persist.
    ///
    /// Any violation rejects the event with all reasons attached. Reading the
    /// snapshot and inserting are separate steps; a concurrent create can slip
    /// between them, and only the unique name index catches that case.
    #[instrument(skip(self, input), fields(event_name = %input.name))]
    pub async fn create_event(&self, input: CreateEvent) -> EventResult<Event> {
        let candidate = self.prepare(input)?;
        let violations = self.violations_for(&candidate).await?;

        if !violations.is_empty() {
            warn!(violations = ?violations, "Event rejected by scheduling rules");
            return Err(EventError::Rejected(to_reasons(&violations)));
        }

        match self.repository.create(candidate).await {
            Err(EventError::DuplicateName(_)) => Err(EventError::Rejected(vec![
                Violation::DuplicateName.to_string(),
            ])),
            result => result,
        }
    }

    /// Run the same checks as [`create_event`](Self::create_event) without storing anything.
    #[instrument(skip(self, input), fields(event_name = %input.name))]
    pub async fn preview_conflicts(&self, input: CreateEvent) -> EventResult<ConflictReport> {
        let candidate = self.prepare(input)?;
        let violations = self.violations_for(&candidate).await?;

        Ok(ConflictReport {
            accepted: violations.is_empty(),
            violations: to_reasons(&violations),
        })
    }

    #[instrument(skip(self))]
    pub async fn get_event(&self, id: Uuid) -> EventResult<Event> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(EventError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn list_events(&self, filter: EventFilter) -> EventResult<Vec<Event>> {
        filter
            .validate()
            .map_err(|e| EventError::Validation(e.to_string()))?;
        self.repository.list(filter).await
    }

    /// Partial update. Scheduling conflicts are not re-checked here.
    #[instrument(skip(self, input))]
    pub async fn update_event(&self, id: Uuid, input: UpdateEvent) -> EventResult<Event> {
        input
            .validate()
            .map_err(|e| EventError::Validation(e.to_string()))?;

        let mut event = self.get_event(id).await?;
        event.apply_update(input);
        ensure_time_window(&event)?;

        self.repository.update(event).await
    }

    #[instrument(skip(self))]
    pub async fn delete_event(&self, id: Uuid) -> EventResult<()> {
        if !self.repository.delete(id).await? {
            return Err(EventError::NotFound(id));
        }
        info!(event_id = %id, "Event deleted");
        Ok(())
    }

    fn prepare(&self, input: CreateEvent) -> EventResult<Event> {
        input
            .validate()
            .map_err(|e| EventError::Validation(e.to_string()))?;

        let candidate = Event::new(input);
        ensure_time_window(&candidate)?;
        Ok(candidate)
    }

    async fn violations_for(&self, candidate: &Event) -> EventResult<Vec<Violation>> {
        let snapshot = self.repository.list_all().await?;
        Ok(check_conflicts(candidate, &snapshot))
    }
}

impl<R: EventRepository> Clone for EventService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

fn ensure_time_window(event: &Event) -> EventResult<()> {
    if event.end_time <= event.start_time {
        return Err(EventError::Validation(
            "end_time must be after start_time".to_string(),
        ));
    }
    Ok(())
}

fn to_reasons(violations: &[Violation]) -> Vec<String> {
    violations.iter().map(ToString::to_string).collect()
}
