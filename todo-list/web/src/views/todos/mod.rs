use crate::components::{ErrorMessage, LoadingSpinner, Toast};
use crate::state::{BoardSignal, now_millis, use_board, use_notice_timer, use_session};
use crate::{AppServices, Route};
use dioxus::prelude::*;
use todo_list_core::{flow, user_message, BoardCell, Filter, HttpTodoApi, Sort, TodoId, UserId};

mod components;

/// The signed-in user's todo list.
#[component]
pub fn Todos() -> Element {
    let services = use_context::<AppServices>();
    let mut session = use_session();
    let navigator = use_navigator();
    let board = use_board();
    let api = use_signal(|| services.api.clone());
    let notices = use_notice_timer(board, services.config.notice_millis);

    // Covers both arriving without a session and logging out from here.
    use_effect(move || {
        if session.user_id().is_none() {
            navigator.replace(Route::Login {});
        }
    });

    // Load once per mount.
    use_hook(move || {
        if let Some(user_id) = session.session().user_id() {
            load(api, board, user_id);
        }
    });

    let Some(user_id) = session.user_id() else {
        return rsx! {};
    };

    let handle_add = move |evt: FormEvent| {
        evt.prevent_default();
        let mut notices = notices;
        spawn(async move {
            let api = api.peek().clone();
            if let Err(e) = flow::add_todo(&api, &board, user_id, now_millis()).await {
                notices.show(user_message(&e, "Todo could not be created."));
            }
        });
    };

    let handle_toggle = move |id: TodoId| {
        let mut notices = notices;
        spawn(async move {
            let api = api.peek().clone();
            if let Err(e) = flow::toggle_todo(&api, &board, id).await {
                notices.show(user_message(&e, "Update failed."));
            }
        });
    };

    let handle_remove = move |id: TodoId| {
        let mut notices = notices;
        spawn(async move {
            let api = api.peek().clone();
            if let Err(e) = flow::remove_todo(&api, &board, id).await {
                notices.show(user_message(&e, "Delete failed."));
            }
        });
    };

    let current = (board.0)();
    let visible = current.visible();

    rsx! {
        div { class: "container",
            div { class: "card",
                components::TodosHeader { user_id, on_logout: move |_| session.logout() }

                components::TodoToolbar {
                    filter: current.filter,
                    sort: current.sort,
                    loading: current.loading,
                    on_filter: move |filter: Filter| board.with_board(|b| b.filter = filter),
                    on_sort: move |sort: Sort| board.with_board(|b| b.sort = sort),
                    on_reload: move |_| load(api, board, user_id),
                }

                components::AddTodoForm {
                    draft: current.draft.clone(),
                    adding: current.adding,
                    on_input: move |text: String| board.with_board(|b| b.draft = text),
                    on_submit: handle_add,
                }

                Toast {
                    message: current.notice.message().map(str::to_string),
                    on_dismiss: move |_| board.with_board(|b| b.notice.dismiss()),
                }

                if current.loading {
                    LoadingSpinner { message: "Loading todos…".to_string() }
                } else if let Some(message) = current.load_error.clone() {
                    ErrorMessage { message, on_retry: move |_| load(api, board, user_id) }
                } else if visible.is_empty() {
                    components::EmptyTodosState {}
                } else {
                    ul { class: "list",
                        for todo in visible {
                            components::TodoItem {
                                key: "{todo.id}",
                                todo: todo.clone(),
                                on_toggle: handle_toggle,
                                on_remove: handle_remove,
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Starts loading `user_id`'s todos into `board`.
fn load(api: Signal<HttpTodoApi>, board: BoardSignal, user_id: UserId) {
    spawn(async move {
        let api = api.peek().clone();
        flow::load_todos(&api, &board, user_id).await;
    });
}
