//! State of the todo view and the transitions the flows apply to it.

use crate::model::{Todo, TodoId};
use crate::view::{self, Filter, Sort};
use std::cell::RefCell;
use std::rc::Rc;

/// Everything the todo view renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoBoard {
    pub todos: Vec<Todo>,
    pub loading: bool,
    pub load_error: Option<String>,
    /// Contents of the "new todo" input.
    pub draft: String,
    pub adding: bool,
    pub notice: Notice,
    pub filter: Filter,
    pub sort: Sort,
    last_provisional_id: Option<TodoId>,
}

impl Default for TodoBoard {
    fn default() -> Self {
        Self {
            todos: Vec::new(),
            loading: true,
            load_error: None,
            draft: String::new(),
            adding: false,
            notice: Notice::default(),
            filter: Filter::default(),
            sort: Sort::default(),
            last_provisional_id: None,
        }
    }
}

impl TodoBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_todos(todos: Vec<Todo>) -> Self {
        Self {
            todos,
            loading: false,
            ..Self::default()
        }
    }

    pub fn todo(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    /// The filtered and sorted list to display.
    pub fn visible(&self) -> Vec<Todo> {
        view::visible(&self.todos, self.filter, self.sort)
    }

    /// Hands out a provisional id from the negated clock reading `now_millis`.
    ///
    /// Ids are strictly decreasing within a board so two adds in the same
    /// millisecond never share an id.
    pub fn next_provisional_id(&mut self, now_millis: i64) -> TodoId {
        let mut id = -now_millis.max(1);
        if let Some(last) = self.last_provisional_id {
            if id >= last {
                id = last - 1;
            }
        }
        self.last_provisional_id = Some(id);
        id
    }

    /// Prepends a provisional entry and returns it.
    pub fn insert_provisional(&mut self, id: TodoId, text: &str) -> Todo {
        let todo = Todo::new(id, text, false);
        self.todos.insert(0, todo.clone());
        todo
    }

    /// Swaps the provisional entry `provisional_id` for the server's copy.
    pub fn confirm(&mut self, provisional_id: TodoId, created: Todo) {
        if self.todo(created.id).is_some() {
            // Already fetched by a concurrent reload.
            self.discard(provisional_id);
            return;
        }
        for todo in self.todos.iter_mut() {
            if todo.id == provisional_id {
                *todo = created;
                return;
            }
        }
    }

    /// Drops the provisional entry `provisional_id`.
    pub fn discard(&mut self, provisional_id: TodoId) {
        self.todos.retain(|t| t.id != provisional_id);
    }

    /// Sets the ticked state of `id`. Returns the previous state.
    pub fn set_ticked(&mut self, id: TodoId, ticked_off: bool) -> Option<bool> {
        let todo = self.todos.iter_mut().find(|t| t.id == id)?;
        Some(std::mem::replace(&mut todo.ticked_off, ticked_off))
    }

    /// Replaces the entry with the same id, if it is still present.
    pub fn replace(&mut self, updated: Todo) {
        if let Some(todo) = self.todos.iter_mut().find(|t| t.id == updated.id) {
            *todo = updated;
        }
    }

    /// Removes `id` and returns the full list as it was before.
    pub fn remove(&mut self, id: TodoId) -> Vec<Todo> {
        let snapshot = self.todos.clone();
        self.todos.retain(|t| t.id != id);
        snapshot
    }

    pub fn restore(&mut self, snapshot: Vec<Todo>) {
        self.todos = snapshot;
    }
}

/// A transient message shown after a failed mutation.
///
/// Each [`Notice::show`] bumps the generation; a timer armed for an older
/// generation must not clear a newer message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notice {
    message: Option<String>,
    generation: u64,
}

impl Notice {
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Shows `message` and returns the generation to expire it with.
    pub fn show(&mut self, message: impl Into<String>) -> u64 {
        self.generation += 1;
        self.message = Some(message.into());
        self.generation
    }

    /// Clears the message if it is still the one shown at `generation`.
    pub fn expire(&mut self, generation: u64) {
        if self.generation == generation {
            self.message = None;
        }
    }

    pub fn dismiss(&mut self) {
        self.message = None;
    }
}

/// Shared handle to a [`TodoBoard`].
///
/// Flows hold one across await points and borrow the board only inside
/// `with_board`, so interleaved flows always see each other's updates.
pub trait BoardCell {
    fn with_board<R>(&self, f: impl FnOnce(&mut TodoBoard) -> R) -> R;
}

impl BoardCell for Rc<RefCell<TodoBoard>> {
    fn with_board<R>(&self, f: impl FnOnce(&mut TodoBoard) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}

impl<C: BoardCell> BoardCell for &C {
    fn with_board<R>(&self, f: impl FnOnce(&mut TodoBoard) -> R) -> R {
        (**self).with_board(f)
    }
}
