//! Debounced search input.
//!
//! [`DebounceMachine`] is the pure state machine: it is fed text changes and
//! clock readings and says when to fire. [`SearchDebouncer`] drives it with
//! a tokio timer and calls the search callback.

use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use log::{debug, warn};
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Quiet period before a search is reported.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(400);

/// Search callback. Receives `None` when the query is blank.
pub type SearchCallback = Arc<dyn Fn(Option<String>) + Send + Sync>;

/// Trim a query; blank means "no filter".
pub fn normalize_query(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Debounce state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DebounceState {
    #[default]
    Idle,
    PendingFire { text: String, deadline: Instant },
}

/// Pure debounce state machine.
#[derive(Debug, Clone)]
pub struct DebounceMachine {
    delay: Duration,
    state: DebounceState,
    last_text: String,
}

impl Default for DebounceMachine {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

impl DebounceMachine {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            state: DebounceState::Idle,
            last_text: String::new(),
        }
    }

    pub fn state(&self) -> &DebounceState {
        &self.state
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// When the pending fire is due.
    pub fn deadline(&self) -> Option<Instant> {
        match &self.state {
            DebounceState::PendingFire { deadline, .. } => Some(*deadline),
            DebounceState::Idle => None,
        }
    }

    /// Record the input text at `now`.
    ///
    /// A change (re)starts the quiet period; returns `false` and leaves any
    /// pending deadline alone when the text is unchanged.
    pub fn input(&mut self, text: &str, now: Instant) -> bool {
        if text == self.last_text {
            return false;
        }
        self.last_text = text.to_string();
        self.state = DebounceState::PendingFire {
            text: text.to_string(),
            deadline: now + self.delay,
        };
        true
    }

    /// Fire if the quiet period is over.
    ///
    /// `Some(query)` means the search must be reported now, with `query`
    /// already normalized.
    pub fn poll(&mut self, now: Instant) -> Option<Option<String>> {
        match &self.state {
            DebounceState::PendingFire { text, deadline } if now >= *deadline => {
                let query = normalize_query(text);
                self.state = DebounceState::Idle;
                Some(query)
            }
            _ => None,
        }
    }

    /// Drop a pending fire. Returns `true` if one was pending.
    ///
    /// The dropped text is forgotten, so entering it again starts a new
    /// quiet period.
    pub fn cancel(&mut self) -> bool {
        let pending = matches!(self.state, DebounceState::PendingFire { .. });
        if pending {
            self.last_text.clear();
        }
        self.state = DebounceState::Idle;
        pending
    }
}

/// Tokio driver around [`DebounceMachine`].
///
/// The callback lives in a shared cell that is read when the timer fires,
/// so swapping callbacks never restarts or duplicates a pending search.
/// Only text changes restart the timer. Dropping the debouncer cancels any
/// pending fire.
pub struct SearchDebouncer {
    machine: Arc<Mutex<DebounceMachine>>,
    callback: Arc<RwLock<Option<SearchCallback>>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            machine: Arc::new(Mutex::new(DebounceMachine::new(delay))),
            callback: Arc::new(RwLock::new(None)),
            task: Mutex::new(None),
        }
    }

    /// Install the callback read at fire time.
    pub fn set_callback<F>(&self, callback: F)
    where
        F: Fn(Option<String>) + Send + Sync + 'static,
    {
        if let Ok(mut guard) = self.callback.write() {
            *guard = Some(Arc::new(callback));
        }
    }

    /// Whether a fire is pending.
    pub fn is_pending(&self) -> bool {
        self.machine
            .lock()
            .map(|m| m.deadline().is_some())
            .unwrap_or(false)
    }

    /// Feed the current input text.
    ///
    /// Must be called from within a tokio runtime; outside one the change is
    /// recorded but never fires.
    pub fn input(&self, text: &str) {
        let deadline = match self.machine.lock() {
            Ok(mut machine) => {
                if !machine.input(text, Instant::now()) {
                    return;
                }
                machine.deadline()
            }
            Err(_) => return,
        };
        let Some(deadline) = deadline else { return };

        self.abort_task();

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!("search input outside a tokio runtime, debounce timer not started");
            return;
        };

        let machine = Arc::clone(&self.machine);
        let callback = Arc::clone(&self.callback);
        let task = handle.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            // A newer keystroke may have moved the deadline after we woke.
            let query = match machine.lock() {
                Ok(mut machine) => machine.poll(Instant::now()),
                Err(_) => None,
            };
            let Some(query) = query else { return };
            let callback = callback.read().ok().and_then(|guard| guard.clone());
            match callback {
                Some(callback) => {
                    debug!("search fired: {:?}", query);
                    callback(query);
                }
                None => debug!("search fired with no callback installed"),
            }
        });

        if let Ok(mut guard) = self.task.lock() {
            *guard = Some(task);
        }
    }

    /// Cancel any pending fire.
    pub fn cancel(&self) {
        if let Ok(mut machine) = self.machine.lock()
            && machine.cancel()
        {
            debug!("pending search cancelled");
        }
        self.abort_task();
    }

    fn abort_task(&self) {
        if let Ok(mut guard) = self.task.lock()
            && let Some(task) = guard.take()
        {
            task.abort();
        }
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for SearchDebouncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchDebouncer")
            .field("pending", &self.is_pending())
            .finish()
    }
}
