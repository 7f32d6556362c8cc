use super::confirm::ConfirmationGate;
use super::store::NameStore;
use super::types::*;
use crate::error::{ControllerError, StoreError};
use crate::wheel;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, Mutex, MutexGuard, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

const CLEAR_PROMPT: &str = "Are you sure you want to clear all names?";

#[derive(Debug, Default)]
struct ControllerState {
    roster: Vec<Name>,
    outcome: Option<SpinOutcome>,
    draw_in_progress: bool,
}

/// Point-in-time copy of the controller state for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerSnapshot {
    pub mode: StoreMode,
    pub roster: Vec<Name>,
    pub outcome: Option<SpinOutcome>,
    pub draw_in_progress: bool,
}

impl ControllerSnapshot {
    pub fn can_spin(&self) -> bool {
        wheel::can_spin(&self.roster, self.draw_in_progress)
    }
}

/// Owns the roster of one wheel and the result of its last spin.
///
/// Every roster mutation goes through the [`NameStore`] and is followed by a
/// refetch, so the local view always mirrors what the store holds, including
/// after a partially applied sequence.
pub struct NameListController {
    store: Arc<dyn NameStore>,
    confirm: Arc<dyn ConfirmationGate>,
    state: Arc<RwLock<ControllerState>>,
    update_guard: Mutex<()>,
    rng: std::sync::Mutex<StdRng>,
    events: broadcast::Sender<ControllerEvent>,
    reveal_duration: Duration,
    reveal_task: Mutex<Option<JoinHandle<()>>>,
}

impl NameListController {
    pub fn new(
        store: Arc<dyn NameStore>,
        confirm: Arc<dyn ConfirmationGate>,
        reveal_duration: Duration,
    ) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            store,
            confirm,
            state: Arc::new(RwLock::new(ControllerState::default())),
            update_guard: Mutex::new(()),
            rng: std::sync::Mutex::new(StdRng::from_entropy()),
            events,
            reveal_duration,
            reveal_task: Mutex::new(None),
        }
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = std::sync::Mutex::new(rng);
        self
    }

    pub fn mode(&self) -> StoreMode {
        self.store.mode()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ControllerEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> ControllerSnapshot {
        let state = self.state.read().await;
        ControllerSnapshot {
            mode: self.store.mode(),
            roster: state.roster.clone(),
            outcome: state.outcome.clone(),
            draw_in_progress: state.draw_in_progress,
        }
    }

    pub async fn roster(&self) -> Vec<Name> {
        self.state.read().await.roster.clone()
    }

    pub async fn outcome(&self) -> Option<SpinOutcome> {
        self.state.read().await.outcome.clone()
    }

    /// Pulls the roster from the store.
    pub async fn load(&self) -> Result<Vec<Name>, ControllerError> {
        let _guard = self.begin_update()?;
        match self.reload().await {
            Ok(names) => Ok(names),
            Err(e) => Err(self.report_failure(e).await),
        }
    }

    pub async fn add(&self, value: &str) -> Result<Name, ControllerError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ControllerError::validation("Name is required"));
        }

        let _guard = self.begin_update()?;
        let created = match self.store.add_name(value).await {
            Ok(name) => name,
            Err(e) => return Err(self.report_failure(e).await),
        };
        info!("Added name {:?} ({})", created.value, created.id);

        if let Err(e) = self.reload().await {
            return Err(self.report_failure(e).await);
        }
        Ok(created)
    }

    /// Returns `false` when the confirmation gate declined.
    pub async fn clear_all(&self) -> Result<bool, ControllerError> {
        if !self.confirm.confirm(CLEAR_PROMPT).await {
            debug!("Clear all declined");
            return Ok(false);
        }

        let _guard = self.begin_update()?;
        if let Err(e) = self.store.clear_names().await {
            return Err(self.report_failure(e).await);
        }
        self.clear_outcome().await;
        info!("Cleared all names");

        if let Err(e) = self.reload().await {
            return Err(self.report_failure(e).await);
        }
        Ok(true)
    }

    pub async fn sort_alphabetically(&self) -> Result<(), ControllerError> {
        let _guard = self.begin_update()?;
        let mut names = self.roster().await;
        if names.is_empty() {
            return Ok(());
        }

        // Case-insensitive first, lowercase ahead of uppercase on a tie.
        // Identical values keep their relative order.
        names.sort_by(|a, b| {
            a.value
                .to_lowercase()
                .cmp(&b.value.to_lowercase())
                .then_with(|| b.value.cmp(&a.value))
        });
        info!("Sorting {} names", names.len());
        self.replace_roster(names).await
    }

    pub async fn shuffle(&self) -> Result<(), ControllerError> {
        let _guard = self.begin_update()?;
        let mut names = self.roster().await;
        if names.is_empty() {
            return Ok(());
        }

        {
            let mut rng = self.rng.lock().unwrap_or_else(|p| p.into_inner());
            fisher_yates(&mut names, &mut *rng);
        }
        info!("Shuffling {} names", names.len());
        self.replace_roster(names).await
    }

    /// Picks the winning index and schedules its reveal.
    pub async fn draw(&self) -> Result<usize, ControllerError> {
        // A roster update in flight would race the snapshot below.
        let _guard = self.begin_update()?;

        let mut state = self.state.write().await;
        if state.draw_in_progress {
            return Err(ControllerError::DrawInProgress);
        }
        if state.roster.is_empty() {
            return Err(ControllerError::EmptyRoster);
        }

        let index = {
            let mut rng = self.rng.lock().unwrap_or_else(|p| p.into_inner());
            rng.gen_range(0..state.roster.len())
        };
        let drawn = state.roster[index].clone();
        let drawn_at = Utc::now();
        state.draw_in_progress = true;
        let had_outcome = state.outcome.take().is_some();
        drop(state);

        if had_outcome {
            self.emit(ControllerEvent::OutcomeCleared);
        }
        info!("Spinning, landing on index {}", index);
        self.emit(ControllerEvent::DrawStarted { index });

        let state = self.state.clone();
        let events = self.events.clone();
        let reveal_duration = self.reveal_duration;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(reveal_duration).await;

            let mut state = state.write().await;
            state.draw_in_progress = false;
            // The roster may have shrunk while the wheel was turning.
            let event = if index < state.roster.len() {
                let outcome = SpinOutcome {
                    index,
                    name: drawn,
                    drawn_at,
                };
                state.outcome = Some(outcome.clone());
                ControllerEvent::OutcomeRevealed(outcome)
            } else {
                warn!("Roster shrank below drawn index {}, discarding outcome", index);
                state.outcome = None;
                ControllerEvent::OutcomeDiscarded { index }
            };
            drop(state);
            let _ = events.send(event);
        });
        *self.reveal_task.lock().await = Some(handle);

        Ok(index)
    }

    /// Waits for a scheduled reveal, if any, to complete.
    pub async fn finish_reveal(&self) {
        let handle = self.reveal_task.lock().await.take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                warn!("Reveal task failed: {}", e);
            }
        }
    }

    /// Drops the drawn name from the roster. Returns it, or `None` when
    /// there was no outcome or the drawn entry is already gone.
    pub async fn remove_outcome_name(&self) -> Result<Option<Name>, ControllerError> {
        let _guard = self.begin_update()?;
        let (outcome, remaining) = {
            let state = self.state.read().await;
            let Some(outcome) = state.outcome.clone() else {
                return Ok(None);
            };
            if !state.roster.iter().any(|name| name.id == outcome.name.id) {
                drop(state);
                warn!("Drawn name {:?} is no longer on the wheel", outcome.name.value);
                self.clear_outcome().await;
                return Ok(None);
            }
            let remaining: Vec<Name> = state
                .roster
                .iter()
                .filter(|name| name.id != outcome.name.id)
                .cloned()
                .collect();
            (outcome, remaining)
        };

        info!("Removing drawn name {:?}", outcome.name.value);
        self.replace_roster(remaining).await?;
        Ok(Some(outcome.name))
    }

    pub async fn dismiss_outcome(&self) {
        self.clear_outcome().await;
    }

    fn begin_update(&self) -> Result<MutexGuard<'_, ()>, ControllerError> {
        self.update_guard.try_lock().map_err(|_| ControllerError::Busy)
    }

    /// Clears the outcome, writes `names` through the store and refetches.
    async fn replace_roster(&self, names: Vec<Name>) -> Result<(), ControllerError> {
        self.clear_outcome().await;
        if let Err(e) = self.store.replace_names(&names).await {
            return Err(self.report_failure(e).await);
        }
        if let Err(e) = self.reload().await {
            return Err(self.report_failure(e).await);
        }
        Ok(())
    }

    async fn reload(&self) -> Result<Vec<Name>, StoreError> {
        let names = self.store.fetch_names().await?;
        self.state.write().await.roster = names.clone();
        self.emit(ControllerEvent::RosterChanged(names.clone()));
        Ok(names)
    }

    async fn clear_outcome(&self) {
        let cleared = self.state.write().await.outcome.take().is_some();
        if cleared {
            self.emit(ControllerEvent::OutcomeCleared);
        }
    }

    /// Notifies subscribers and resyncs the view with whatever the store
    /// holds after the failure.
    async fn report_failure(&self, error: StoreError) -> ControllerError {
        warn!("Store call failed: {}", error);
        self.emit(ControllerEvent::StoreFailed(error.to_string()));
        if let Err(e) = self.reload().await {
            warn!("Could not refresh roster after failure: {}", e);
        }
        ControllerError::Store(error)
    }

    fn emit(&self, event: ControllerEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

/// Walks from the last index down to 1, swapping each slot with a uniformly
/// chosen slot in `[0, i]`.
pub fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}
