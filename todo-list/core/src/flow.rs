//! Optimistic mutations of the todo board.
//!
//! Each flow applies its change to the board first, then calls the API, and
//! either reconciles with the server's answer or undoes the change. Errors are
//! returned after the undo so the caller only has to show them.
//!
//! Mutations on the same todo are not serialized: whichever response arrives
//! last decides the final state.

use crate::api::{ApiError, TodoApi};
use crate::board::BoardCell;
use crate::model::{Todo, TodoId, UserId, is_provisional};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Text must not be empty.")]
    EmptyText,
    #[error("Todo {0} is still being saved.")]
    Provisional(TodoId),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Fetches the user's todos into the board.
///
/// A failure is recorded in `load_error` and leaves the current list alone.
#[tracing::instrument(skip(api, cell))]
pub async fn load_todos<A: TodoApi, C: BoardCell>(api: &A, cell: &C, user_id: UserId) {
    cell.with_board(|board| {
        board.loading = true;
        board.load_error = None;
    });

    let result = api.list_todos(user_id).await;

    cell.with_board(|board| {
        match result {
            Ok(todos) => {
                tracing::debug!(count = todos.len(), "todos loaded");
                board.todos = todos;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load todos");
                board.load_error = Some(crate::user_message(&e, "Todos could not be loaded."));
            }
        }
        board.loading = false;
    });
}

/// Adds the board's draft as a new todo.
///
/// `now_millis` seeds the provisional id. On failure the provisional entry is
/// removed and the draft restored.
#[tracing::instrument(skip(api, cell))]
pub async fn add_todo<A: TodoApi, C: BoardCell>(
    api: &A,
    cell: &C,
    user_id: UserId,
    now_millis: i64,
) -> Result<Todo, FlowError> {
    let text = cell.with_board(|board| board.draft.trim().to_string());
    if text.is_empty() {
        return Err(FlowError::EmptyText);
    }

    let provisional_id = cell.with_board(|board| {
        let id = board.next_provisional_id(now_millis);
        board.insert_provisional(id, &text);
        board.draft.clear();
        board.adding = true;
        id
    });

    let result = api.create_todo(user_id, &text).await;

    cell.with_board(|board| {
        board.adding = false;
        match result {
            Ok(created) => {
                board.confirm(provisional_id, created.clone());
                Ok(created)
            }
            Err(e) => {
                tracing::warn!(error = %e, "create failed, reverting");
                board.discard(provisional_id);
                board.draft = text;
                Err(e.into())
            }
        }
    })
}

/// Flips the ticked state of `id`.
///
/// Unknown ids are ignored. On failure the previous state is restored.
#[tracing::instrument(skip(api, cell))]
pub async fn toggle_todo<A: TodoApi, C: BoardCell>(
    api: &A,
    cell: &C,
    id: TodoId,
) -> Result<(), FlowError> {
    if is_provisional(id) {
        return Err(FlowError::Provisional(id));
    }

    let Some(previous) = cell.with_board(|board| {
        let previous = board.todo(id)?.ticked_off;
        board.set_ticked(id, !previous);
        Some(previous)
    }) else {
        return Ok(());
    };

    let result = api.update_todo(id, !previous).await;

    cell.with_board(|board| match result {
        Ok(updated) => {
            board.replace(updated);
            Ok(())
        }
        Err(e) => {
            tracing::warn!(error = %e, "update failed, reverting");
            board.set_ticked(id, previous);
            Err(e.into())
        }
    })
}

/// Deletes `id`.
///
/// On failure the list is reset to the snapshot taken right before the
/// removal, not just re-extended with the removed entry.
#[tracing::instrument(skip(api, cell))]
pub async fn remove_todo<A: TodoApi, C: BoardCell>(
    api: &A,
    cell: &C,
    id: TodoId,
) -> Result<(), FlowError> {
    if is_provisional(id) {
        return Err(FlowError::Provisional(id));
    }

    let snapshot = cell.with_board(|board| board.remove(id));

    if let Err(e) = api.delete_todo(id).await {
        tracing::warn!(error = %e, "delete failed, reverting");
        cell.with_board(|board| board.restore(snapshot));
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockTodoApi;
    use crate::board::TodoBoard;
    use mockall::predicate::eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    const NOW: i64 = 1_700_000_000_000;

    fn api_error(status: u16) -> ApiError {
        ApiError::Status {
            message: format!("HTTP error {status}"),
            status,
            body: None,
        }
    }

    fn cell(todos: Vec<Todo>) -> Rc<RefCell<TodoBoard>> {
        Rc::new(RefCell::new(TodoBoard::with_todos(todos)))
    }

    fn existing() -> Vec<Todo> {
        vec![Todo::new(2, "bread", false), Todo::new(1, "milk", true)]
    }

    #[tokio::test]
    async fn load_replaces_list_and_clears_loading() {
        // Arrange
        let mut api = MockTodoApi::new();
        api.expect_list_todos()
            .with(eq(7))
            .times(1)
            .returning(|_| Ok(existing()));
        let cell = Rc::new(RefCell::new(TodoBoard::new()));

        // Act
        load_todos(&api, &cell, 7).await;

        // Assert
        let board = cell.borrow();
        assert_eq!(board.todos, existing());
        assert!(!board.loading);
        assert_eq!(board.load_error, None);
    }

    #[tokio::test]
    async fn empty_load_is_neither_loading_nor_error() {
        let mut api = MockTodoApi::new();
        api.expect_list_todos().returning(|_| Ok(Vec::new()));
        let cell = Rc::new(RefCell::new(TodoBoard::new()));

        load_todos(&api, &cell, 7).await;

        let board = cell.borrow();
        assert!(!board.loading);
        assert_eq!(board.load_error, None);
        assert!(board.visible().is_empty());
    }

    #[tokio::test]
    async fn failed_load_keeps_prior_list() {
        let mut api = MockTodoApi::new();
        api.expect_list_todos().returning(|_| Err(api_error(500)));
        let cell = cell(existing());
        cell.borrow_mut().load_error = Some("stale".to_string());

        load_todos(&api, &cell, 7).await;

        let board = cell.borrow();
        assert_eq!(board.todos, existing());
        assert_eq!(board.load_error.as_deref(), Some("HTTP error 500"));
        assert!(!board.loading);
    }

    #[tokio::test]
    async fn add_replaces_provisional_entry_with_created_todo() {
        // Arrange
        let mut api = MockTodoApi::new();
        api.expect_create_todo()
            .with(eq(7), eq("eggs"))
            .times(1)
            .returning(|_, text| Ok(Todo::new(3, text, false)));
        let cell = cell(existing());
        cell.borrow_mut().draft = "  eggs ".to_string();

        // Act
        let created = add_todo(&api, &cell, 7, NOW).await.unwrap();

        // Assert
        let board = cell.borrow();
        assert_eq!(created, Todo::new(3, "eggs", false));
        assert!(board.todos.iter().all(|t| !t.is_provisional()));
        assert_eq!(
            board.todos.iter().filter(|t| t.id == 3 && t.text == "eggs").count(),
            1
        );
        assert_eq!(board.todos[0], created);
        assert_eq!(board.draft, "");
        assert!(!board.adding);
    }

    #[tokio::test]
    async fn failed_add_restores_list_and_draft() {
        // Arrange
        let mut api = MockTodoApi::new();
        api.expect_create_todo().returning(|_, _| Err(api_error(400)));
        let cell = cell(existing());
        cell.borrow_mut().draft = "eggs".to_string();

        // Act
        let result = add_todo(&api, &cell, 7, NOW).await;

        // Assert
        let board = cell.borrow();
        assert_eq!(result.unwrap_err().to_string(), "HTTP error 400");
        assert_eq!(board.todos, existing());
        assert_eq!(board.draft, "eggs");
        assert!(!board.adding);
    }

    #[tokio::test]
    async fn blank_draft_is_rejected_without_request() {
        let mut api = MockTodoApi::new();
        api.expect_create_todo().never();
        let cell = cell(existing());
        cell.borrow_mut().draft = " \t ".to_string();

        let result = add_todo(&api, &cell, 7, NOW).await;

        assert!(matches!(result, Err(FlowError::EmptyText)));
        assert_eq!(cell.borrow().todos, existing());
    }

    #[tokio::test]
    async fn toggle_replaces_entry_with_server_copy() {
        let mut api = MockTodoApi::new();
        api.expect_update_todo()
            .with(eq(2), eq(true))
            .times(1)
            .returning(|id, ticked| Ok(Todo::new(id, "bread (server)", ticked)));
        let cell = cell(existing());

        toggle_todo(&api, &cell, 2).await.unwrap();

        assert_eq!(cell.borrow().todo(2), Some(&Todo::new(2, "bread (server)", true)));
    }

    #[tokio::test]
    async fn failed_toggle_restores_previous_state() {
        // Arrange
        let mut api = MockTodoApi::new();
        api.expect_update_todo()
            .with(eq(2), eq(true))
            .returning(|_, _| Err(api_error(404)));
        let cell = cell(existing());

        // Act
        let result = toggle_todo(&api, &cell, 2).await;

        // Assert
        assert!(matches!(result, Err(FlowError::Api(_))));
        assert_eq!(cell.borrow().todo(2).map(|t| t.ticked_off), Some(false));
        assert_eq!(cell.borrow().todos, existing());
    }

    #[tokio::test]
    async fn toggle_of_unknown_todo_is_ignored() {
        let mut api = MockTodoApi::new();
        api.expect_update_todo().never();
        let cell = cell(existing());

        toggle_todo(&api, &cell, 42).await.unwrap();

        assert_eq!(cell.borrow().todos, existing());
    }

    #[tokio::test]
    async fn provisional_todos_cannot_be_toggled_or_removed() {
        let mut api = MockTodoApi::new();
        api.expect_update_todo().never();
        api.expect_delete_todo().never();
        let cell = cell(existing());
        cell.borrow_mut().insert_provisional(-NOW, "pending");

        assert!(matches!(
            toggle_todo(&api, &cell, -NOW).await,
            Err(FlowError::Provisional(id)) if id == -NOW
        ));
        assert!(matches!(
            remove_todo(&api, &cell, -NOW).await,
            Err(FlowError::Provisional(_))
        ));
        assert_eq!(cell.borrow().todos.len(), 3);
    }

    #[tokio::test]
    async fn remove_drops_entry() {
        let mut api = MockTodoApi::new();
        api.expect_delete_todo().with(eq(1)).times(1).returning(|_| Ok(()));
        let cell = cell(existing());

        remove_todo(&api, &cell, 1).await.unwrap();

        assert_eq!(cell.borrow().todos, vec![Todo::new(2, "bread", false)]);
    }

    #[tokio::test]
    async fn failed_remove_restores_identical_list() {
        // Arrange
        let mut api = MockTodoApi::new();
        api.expect_delete_todo().returning(|_| Err(api_error(500)));
        let todos = vec![
            Todo::new(5, "e", false),
            Todo::new(2, "b", true),
            Todo::new(9, "i", false),
        ];
        let cell = cell(todos.clone());

        // Act
        let result = remove_todo(&api, &cell, 2).await;

        // Assert
        assert!(result.is_err());
        assert_eq!(cell.borrow().todos, todos);
    }

    #[tokio::test]
    async fn login_then_todo_view_fetches_exactly_once_for_user() {
        // Arrange
        let mut api = MockTodoApi::new();
        api.expect_login()
            .with(eq("abc"))
            .times(1)
            .returning(|_| Ok(crate::model::User { id: 7 }));
        api.expect_list_todos()
            .with(eq(7))
            .times(1)
            .returning(|_| Ok(Vec::new()));
        let session = crate::session::Session::new(crate::session::MemoryStorage::default(), "userId");
        let cell = Rc::new(RefCell::new(TodoBoard::new()));

        // Act
        crate::login::login(&api, &session, "abc").await.unwrap();
        let user_id = session.user_id().unwrap();
        load_todos(&api, &cell, user_id).await;

        // Assert
        assert_eq!(user_id, 7);
        assert!(!cell.borrow().loading);
    }
}
