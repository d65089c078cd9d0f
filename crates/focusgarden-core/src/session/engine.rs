//! Session lifecycle engine.
//!
//! The engine is a wall-clock-based state machine over the single
//! active session. Deadlines are absolute timestamps, so "has the
//! deadline passed" is a pure comparison against `now` and survives
//! the process being torn down and relaunched at any point.
//!
//! The engine may be driven from two independent contexts at once: an
//! interactive surface polling a visible countdown, and a detached
//! wake-up callback firing at the deadline. Both communicate only
//! through the durable store, so every transition re-reads the
//! persisted session immediately before acting and no-ops when the
//! guard no longer matches. The in-memory session is a cache; the
//! store is authoritative.

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, warn};

use crate::alarm::{WakeupScheduler, ALARM_NAME};
use crate::error::{CoreError, SessionError};
use crate::events::Event;
use crate::model::{FocusList, PlantStatus, Session, SessionState};
use crate::storage::Database;

use super::accrual;

/// Owner of the active-session slot.
pub struct SessionEngine {
    db: Database,
    scheduler: Box<dyn WakeupScheduler>,
    /// Cache of the last session read from the store.
    current: Option<Session>,
}

impl SessionEngine {
    /// Build an engine over an open store.
    ///
    /// Reads the persisted session once so the cache starts warm.
    ///
    /// # Errors
    /// A store read failure here means user data may exist but cannot
    /// be reached; it is surfaced, never replaced with "no session".
    pub fn new(db: Database, scheduler: Box<dyn WakeupScheduler>) -> Result<Self, CoreError> {
        let current = db.load_session()?;
        Ok(Self {
            db,
            scheduler,
            current,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    /// UI-facing snapshot of the cached session.
    pub fn snapshot(&self) -> Snapshot {
        let now = now_ms();
        match &self.current {
            Some(s) => Snapshot {
                active: true,
                state: Some(s.state),
                list_name: Some(s.list.name.clone()),
                remaining_ms: s.remaining_ms(now),
                end_time: Some(s.end_time),
            },
            None => Snapshot {
                active: false,
                state: None,
                list_name: None,
                remaining_ms: 0,
                end_time: None,
            },
        }
    }

    /// Re-read the persisted session, refreshing the cache.
    pub(crate) fn refresh(&mut self) -> Result<Option<Session>, CoreError> {
        self.current = self.db.load_session()?;
        Ok(self.current.clone())
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Create the active session from `list`, in prep or straight into
    /// focus.
    ///
    /// # Errors
    /// Rejects an invalid list, and refuses to replace a session that
    /// is already active.
    pub fn start_focus(&mut self, list: FocusList, with_prep: bool) -> Result<Event, CoreError> {
        list.validate()?;
        if self.refresh()?.is_some() {
            return Err(SessionError::AlreadyActive.into());
        }

        let session = Session::start(list, with_prep, now_ms());
        self.db.save_session(&session)?;
        self.schedule_wakeup(session.end_time);
        debug!(state = ?session.state, end_time = session.end_time, "session started");

        let event = Event::SessionStarted {
            state: session.state,
            list_id: session.list.id.clone(),
            list_name: session.list.name.clone(),
            end_time: session.end_time,
            at: Utc::now(),
        };
        self.current = Some(session);
        Ok(event)
    }

    /// Complete the prep countdown (or skip it) and enter focus.
    ///
    /// No-op unless the persisted session is in prep.
    pub fn complete_prep(&mut self) -> Result<Option<Event>, CoreError> {
        match self.refresh()? {
            Some(s) if s.state == SessionState::Prep => self.apply_prep_complete(s).map(Some),
            _ => Ok(None),
        }
    }

    /// Apply the focus deadline: move to break and accrue the reward.
    ///
    /// No-op unless the persisted session is in focus: a concurrent
    /// observer that already applied the transition leaves nothing to
    /// do, so the garden/stat accrual fires at most once per deadline.
    pub fn focus_elapsed(&mut self) -> Result<Option<Event>, CoreError> {
        match self.refresh()? {
            Some(s) if s.state == SessionState::Focus => self.apply_focus_complete(s).map(Some),
            _ => Ok(None),
        }
    }

    /// Apply the break deadline: clear the session.
    ///
    /// No-op unless the persisted session is in break.
    pub fn break_elapsed(&mut self) -> Result<Option<Event>, CoreError> {
        match self.refresh()? {
            Some(s) if s.state == SessionState::Break => self.apply_break_complete().map(Some),
            _ => Ok(None),
        }
    }

    /// Grant a fixed extension to an expired focus session.
    ///
    /// No-op unless the persisted session is in focus with its
    /// deadline already passed.
    pub fn extend(&mut self) -> Result<Option<Event>, CoreError> {
        let now = now_ms();
        match self.refresh()? {
            Some(s) if s.state == SessionState::Focus && s.is_expired(now) => {
                let next = s.extended(now);
                self.db.save_session(&next)?;
                self.schedule_wakeup(next.end_time);
                debug!(end_time = next.end_time, "focus extended");

                let event = Event::SessionExtended {
                    end_time: next.end_time,
                    at: Utc::now(),
                };
                self.current = Some(next);
                Ok(Some(event))
            }
            _ => Ok(None),
        }
    }

    /// Abandon the session unconditionally.
    ///
    /// Penalty applies unless the session is still in prep: one
    /// withered plant and one `interrupted` increment, committed
    /// atomically with the session clear. No-op when no session is
    /// active.
    pub fn give_up(&mut self) -> Result<Option<Event>, CoreError> {
        let Some(session) = self.refresh()? else {
            return Ok(None);
        };

        let penalized = session.state != SessionState::Prep;
        if penalized {
            let now = now_ms();
            let today = day_of(now);
            let mut garden = self.db.load_garden()?;
            garden.push(accrual::plant_for(now, &today, PlantStatus::Withered));
            let stats = accrual::record_interruption(&today, &self.db.load_stats()?);
            self.db
                .commit_transition(None, Some(&garden), Some(&stats))?;
        } else {
            self.db.commit_transition(None, None, None)?;
        }
        self.cancel_wakeup();
        debug!(penalized, "session abandoned");

        self.current = None;
        Ok(Some(Event::SessionAbandoned {
            penalized,
            at: Utc::now(),
        }))
    }

    /// Edge-triggered deadline check.
    ///
    /// Re-reads the persisted session and, if its deadline has passed,
    /// applies the corresponding transition. Countdown surfaces call
    /// this every tick; the detached wake-up handler calls it when the
    /// alarm fires; recovery calls it once on load. Whoever gets there
    /// first applies the transition, everyone else sees a no-op.
    pub fn poll(&mut self) -> Result<Option<Event>, CoreError> {
        let now = now_ms();
        match self.refresh()? {
            Some(s) if s.is_expired(now) => match s.state {
                SessionState::Prep => self.apply_prep_complete(s).map(Some),
                SessionState::Focus => self.apply_focus_complete(s).map(Some),
                SessionState::Break => self.apply_break_complete().map(Some),
            },
            _ => Ok(None),
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn apply_prep_complete(&mut self, session: Session) -> Result<Event, CoreError> {
        let next = session.into_focus(now_ms());
        self.db.save_session(&next)?;
        self.schedule_wakeup(next.end_time);
        debug!(end_time = next.end_time, "prep complete, focus started");

        let event = Event::PrepCompleted {
            end_time: next.end_time,
            at: Utc::now(),
        };
        self.current = Some(next);
        Ok(event)
    }

    fn apply_focus_complete(&mut self, session: Session) -> Result<Event, CoreError> {
        let now = now_ms();
        let today = day_of(now);
        let next = session.into_break(now);

        let mut garden = self.db.load_garden()?;
        garden.push(accrual::plant_for(now, &today, PlantStatus::Alive));
        let stats = accrual::record_completion(&today, &self.db.load_stats()?);

        self.db
            .commit_transition(Some(&next), Some(&garden), Some(&stats))?;
        self.schedule_wakeup(next.end_time);
        debug!(end_time = next.end_time, "focus complete, break started");

        let event = Event::FocusCompleted {
            end_time: next.end_time,
            at: Utc::now(),
        };
        self.current = Some(next);
        Ok(event)
    }

    fn apply_break_complete(&mut self) -> Result<Event, CoreError> {
        self.db.commit_transition(None, None, None)?;
        self.cancel_wakeup();
        debug!("break complete, session cleared");

        self.current = None;
        Ok(Event::BreakCompleted { at: Utc::now() })
    }

    fn schedule_wakeup(&self, when_ms: i64) {
        if let Err(e) = self.scheduler.schedule(ALARM_NAME, when_ms) {
            warn!(error = %e, "failed to schedule wake-up");
        }
    }

    fn cancel_wakeup(&self) {
        if let Err(e) = self.scheduler.cancel(ALARM_NAME) {
            warn!(error = %e, "failed to cancel wake-up");
        }
    }
}

/// UI-facing view of the engine state.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub active: bool,
    pub state: Option<SessionState>,
    pub list_name: Option<String>,
    pub remaining_ms: i64,
    pub end_time: Option<i64>,
}

fn now_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

/// Calendar day (`YYYY-MM-DD`, UTC) of an epoch-ms instant.
fn day_of(epoch_ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(epoch_ms)
        .unwrap_or_else(Utc::now)
        .format("%Y-%m-%d")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alarm::NoopScheduler;
    use crate::model::{PlantStatus, SessionState};

    fn engine() -> SessionEngine {
        let db = Database::open_memory().unwrap();
        SessionEngine::new(db, Box::new(NoopScheduler)).unwrap()
    }

    fn some_list(engine: &SessionEngine) -> FocusList {
        engine.db().load_focus_lists().unwrap().remove(0)
    }

    #[test]
    fn start_without_prep_persists_focus_session() {
        let mut engine = engine();
        let list = some_list(&engine);
        let focus_minutes = list.focus_minutes;

        engine.start_focus(list, false).unwrap();

        let session = engine.db().load_session().unwrap().unwrap();
        assert_eq!(session.state, SessionState::Focus);
        assert_eq!(
            session.end_time - session.start_time,
            focus_minutes as i64 * 60_000
        );
    }

    #[test]
    fn start_rejects_second_session() {
        let mut engine = engine();
        let list = some_list(&engine);
        engine.start_focus(list.clone(), false).unwrap();

        assert!(matches!(
            engine.start_focus(list, false),
            Err(CoreError::Session(SessionError::AlreadyActive))
        ));
    }

    #[test]
    fn start_rejects_invalid_list() {
        let mut engine = engine();
        let mut list = some_list(&engine);
        list.focus_minutes = 0;
        assert!(matches!(
            engine.start_focus(list, false),
            Err(CoreError::Validation(_))
        ));
        assert!(engine.db().load_session().unwrap().is_none());
    }

    #[test]
    fn complete_prep_enters_focus() {
        let mut engine = engine();
        let list = some_list(&engine);
        let focus_minutes = list.focus_minutes;
        engine.start_focus(list, true).unwrap();

        let event = engine.complete_prep().unwrap();
        assert!(matches!(event, Some(Event::PrepCompleted { .. })));

        let session = engine.db().load_session().unwrap().unwrap();
        assert_eq!(session.state, SessionState::Focus);
        assert_eq!(
            session.end_time - session.start_time,
            focus_minutes as i64 * 60_000
        );
    }

    #[test]
    fn complete_prep_outside_prep_is_noop() {
        let mut engine = engine();
        let list = some_list(&engine);
        engine.start_focus(list, false).unwrap();
        assert!(engine.complete_prep().unwrap().is_none());
    }

    #[test]
    fn focus_elapsed_accrues_exactly_once() {
        let mut engine = engine();
        let list = some_list(&engine);
        let break_minutes = list.break_minutes;
        engine.start_focus(list, false).unwrap();

        let event = engine.focus_elapsed().unwrap();
        assert!(matches!(event, Some(Event::FocusCompleted { .. })));

        let session = engine.db().load_session().unwrap().unwrap();
        assert_eq!(session.state, SessionState::Break);
        assert_eq!(
            session.end_time - session.start_time,
            break_minutes as i64 * 60_000
        );

        let garden = engine.db().load_garden().unwrap();
        let stats = engine.db().load_stats().unwrap();
        assert_eq!(garden.len(), 1);
        assert_eq!(garden[0].status, PlantStatus::Alive);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].completed, 1);

        // Second observer racing on the same expiry: guard no longer
        // matches, nothing double-counts.
        assert!(engine.focus_elapsed().unwrap().is_none());
        assert_eq!(engine.db().load_garden().unwrap().len(), 1);
        assert_eq!(engine.db().load_stats().unwrap()[0].completed, 1);
    }

    #[test]
    fn break_elapsed_clears_session() {
        let mut engine = engine();
        let list = some_list(&engine);
        engine.start_focus(list, false).unwrap();
        engine.focus_elapsed().unwrap();

        let event = engine.break_elapsed().unwrap();
        assert!(matches!(event, Some(Event::BreakCompleted { .. })));
        assert!(engine.db().load_session().unwrap().is_none());
        assert!(engine.current().is_none());
    }

    #[test]
    fn give_up_in_focus_withers_a_plant() {
        let mut engine = engine();
        let list = some_list(&engine);
        engine.start_focus(list, false).unwrap();

        let event = engine.give_up().unwrap();
        assert!(matches!(
            event,
            Some(Event::SessionAbandoned { penalized: true, .. })
        ));
        assert!(engine.db().load_session().unwrap().is_none());

        let garden = engine.db().load_garden().unwrap();
        assert_eq!(garden.len(), 1);
        assert_eq!(garden[0].status, PlantStatus::Withered);
        assert_eq!(engine.db().load_stats().unwrap()[0].interrupted, 1);
    }

    #[test]
    fn give_up_in_prep_has_no_penalty() {
        let mut engine = engine();
        let list = some_list(&engine);
        engine.start_focus(list, true).unwrap();

        let event = engine.give_up().unwrap();
        assert!(matches!(
            event,
            Some(Event::SessionAbandoned {
                penalized: false,
                ..
            })
        ));
        assert!(engine.db().load_session().unwrap().is_none());
        assert!(engine.db().load_garden().unwrap().is_empty());
        assert!(engine.db().load_stats().unwrap().is_empty());
    }

    #[test]
    fn give_up_without_session_is_noop() {
        let mut engine = engine();
        assert!(engine.give_up().unwrap().is_none());
    }

    #[test]
    fn poll_before_deadline_is_noop() {
        let mut engine = engine();
        let list = some_list(&engine);
        engine.start_focus(list, false).unwrap();
        assert!(engine.poll().unwrap().is_none());
        assert_eq!(
            engine.db().load_session().unwrap().unwrap().state,
            SessionState::Focus
        );
    }

    #[test]
    fn extend_requires_expired_focus() {
        let mut engine = engine();
        let list = some_list(&engine);
        engine.start_focus(list, false).unwrap();
        // Deadline is far in the future, extension refused.
        assert!(engine.extend().unwrap().is_none());
    }
}
