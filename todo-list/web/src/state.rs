//! Client-side state shared between views.
//!
//! The session user id lives in localStorage and is mirrored into a context
//! signal, so a login or logout in one view is observed by every other view.
//! The todo board is a signal driven by the core flows.

use dioxus::prelude::*;
use gloo_storage::{LocalStorage, Storage};
use gloo_timers::callback::Timeout;
use todo_list_core::{BoardCell, KeyValueStorage, Session, StorageError, TodoBoard, UserId};

/// localStorage as a [`KeyValueStorage`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl KeyValueStorage for BrowserStorage {
    fn read(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| StorageError(format!("{e:?}")))
    }

    fn remove(&self, key: &str) {
        LocalStorage::delete(key);
    }
}

/// Handle to the persisted session plus the signal mirroring it.
#[derive(Clone, Copy)]
pub struct SessionHandle {
    user_id: Signal<Option<UserId>>,
    key: Signal<String>,
}

impl SessionHandle {
    /// The stored session backed by localStorage.
    pub fn session(&self) -> Session<BrowserStorage> {
        Session::new(BrowserStorage, self.key.read().clone())
    }

    /// Current user id. Reading subscribes the calling scope to changes.
    pub fn user_id(&self) -> Option<UserId> {
        (self.user_id)()
    }

    /// Re-reads the stored value into the signal after a flow wrote it.
    pub fn refresh(&mut self) {
        let stored = self.session().user_id();
        self.user_id.set(stored);
    }

    /// Clears the stored session and notifies every view.
    pub fn logout(&mut self) {
        todo_list_core::login::logout(&self.session());
        self.user_id.set(None);
    }
}

/// Creates the session handle and makes it available to descendants.
pub fn provide_session(key: String) -> SessionHandle {
    use_context_provider(|| {
        let session = Session::new(BrowserStorage, key.clone());
        SessionHandle {
            user_id: Signal::new(session.user_id()),
            key: Signal::new(key),
        }
    })
}

pub fn use_session() -> SessionHandle {
    use_context::<SessionHandle>()
}

/// A todo board held in a signal.
#[derive(Clone, Copy, PartialEq)]
pub struct BoardSignal(pub Signal<TodoBoard>);

impl BoardCell for BoardSignal {
    fn with_board<R>(&self, f: impl FnOnce(&mut TodoBoard) -> R) -> R {
        let mut signal = self.0;
        signal.with_mut(f)
    }
}

pub fn use_board() -> BoardSignal {
    BoardSignal(use_signal(TodoBoard::new))
}

/// Shows transient notices on a board and clears them after a delay.
///
/// Only one timer is armed at a time: a new notice drops, and thereby
/// cancels, the previous one. The timer is dropped with the owning view.
#[derive(Clone, Copy)]
pub struct NoticeTimer {
    board: BoardSignal,
    timer: Signal<Option<Timeout>>,
    millis: u32,
}

impl NoticeTimer {
    pub fn show(&mut self, message: impl Into<String>) {
        let board = self.board;
        let generation = board.with_board(|b| b.notice.show(message));
        let timeout = Timeout::new(self.millis, move || {
            board.with_board(|b| b.notice.expire(generation));
        });
        self.timer.set(Some(timeout));
    }
}

pub fn use_notice_timer(board: BoardSignal, millis: u32) -> NoticeTimer {
    let mut timer = use_signal(|| None::<Timeout>);

    use_drop(move || {
        if let Ok(mut pending) = timer.try_write() {
            pending.take();
        }
    });

    NoticeTimer {
        board,
        timer,
        millis,
    }
}

/// Milliseconds since the epoch, used to seed provisional ids.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
