use std::time::Duration;

use clap::Subcommand;
use focusgarden_core::alarm::{self, NoopScheduler, Notifier};
use focusgarden_core::{Database, SessionEngine};
use tracing::{debug, info, warn};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start a session from a focus list
    Start {
        /// Focus list id or name
        list: String,
        /// Begin with a one-minute prep countdown
        #[arg(long)]
        prep: bool,
    },
    /// Print current session state as JSON (applies a due transition first)
    Status,
    /// Leave prep and start focusing
    Go,
    /// Extend an expired focus session by 15 minutes
    Extend,
    /// Abandon the current session
    GiveUp,
    /// Wait on deadlines and fire notifications (detached context)
    Watch,
}

/// Prints notifications instead of raising system ones; audio control
/// is delegated to whatever plays the ambient track.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, title: &str, message: &str) {
        println!("{title}: {message}");
    }

    fn stop_music(&self) {
        debug!("stop ambient music");
    }

    fn play_sound(&self, url: &str) {
        debug!(url, "notification sound");
    }
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut engine = SessionEngine::new(db, Box::new(NoopScheduler))?;

    match action {
        TimerAction::Start { list, prep } => {
            let lists = engine.db().load_focus_lists()?;
            let chosen = lists
                .iter()
                .find(|l| l.id == list || l.name == list)
                .ok_or_else(|| format!("no focus list matching '{list}'"))?
                .clone();
            let event = engine.start_focus(chosen, prep)?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        TimerAction::Status => {
            if let Some(event) = engine.poll()? {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
        }
        TimerAction::Go => match engine.complete_prep()? {
            Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
            None => println!("{}", serde_json::to_string_pretty(&engine.snapshot())?),
        },
        TimerAction::Extend => match engine.extend()? {
            Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
            None => println!("{}", serde_json::to_string_pretty(&engine.snapshot())?),
        },
        TimerAction::GiveUp => match engine.give_up()? {
            Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
            None => println!("{}", serde_json::to_string_pretty(&engine.snapshot())?),
        },
        TimerAction::Watch => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(watch(&mut engine))?;
        }
    }

    Ok(())
}

/// The detached wake-up context: sleeps until the stored deadline,
/// then runs the deadline handler. The handler re-validates against
/// the store, so a transition already applied by an interactive
/// surface is simply skipped here.
async fn watch(engine: &mut SessionEngine) -> Result<(), Box<dyn std::error::Error>> {
    let notifier = ConsoleNotifier;
    loop {
        // A store hiccup mid-transition is not fatal here: the next
        // tick re-drives from whatever was last durably committed.
        match alarm::handle_deadline(engine, &notifier) {
            Ok(Some(event)) => {
                println!("{}", serde_json::to_string_pretty(&event)?);
                continue;
            }
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "deadline handling failed, retrying");
                tokio::time::sleep(Duration::from_secs(5)).await;
                continue;
            }
        }

        match engine.current() {
            Some(session) => {
                let remaining = session.remaining_ms(now_ms());
                // Re-validate at least every 30s in case another
                // context replaced or abandoned the session.
                let wait = remaining.clamp(250, 30_000) as u64;
                debug!(remaining, wait, "waiting on deadline");
                tokio::time::sleep(Duration::from_millis(wait)).await;
            }
            None => {
                info!("no active session, watch finished");
                return Ok(());
            }
        }
    }
}

fn now_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}
