use super::*;
use todo_list_core::Todo;

/// Title row with the signed-in user and the logout button
#[component]
pub fn TodosHeader(user_id: UserId, on_logout: EventHandler<()>) -> Element {
    rsx! {
        div { class: "row between",
            div {
                h1 { "Todos" }
                p { class: "muted", "User id: {user_id}" }
            }
            button { class: "btn secondary", onclick: move |_| on_logout.call(()), "Logout" }
        }
    }
}

/// Filter and sort selection plus a manual reload.
#[component]
pub fn TodoToolbar(
    filter: Filter,
    sort: Sort,
    loading: bool,
    on_filter: EventHandler<Filter>,
    on_sort: EventHandler<Sort>,
    on_reload: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "toolbar",
            div { class: "field",
                span { class: "labelInline", "Filter" }
                select {
                    onchange: move |evt| match evt.value().parse::<Filter>() {
                        Ok(filter) => on_filter.call(filter),
                        Err(e) => tracing::warn!(error = %e, "ignoring filter"),
                    },
                    for choice in Filter::ALL {
                        option { value: "{choice}", selected: choice == filter, "{choice.label()}" }
                    }
                }
            }

            div { class: "field",
                span { class: "labelInline", "Sort" }
                select {
                    onchange: move |evt| match evt.value().parse::<Sort>() {
                        Ok(sort) => on_sort.call(sort),
                        Err(e) => tracing::warn!(error = %e, "ignoring sort"),
                    },
                    for choice in Sort::ALL {
                        option { value: "{choice}", selected: choice == sort, "{choice.label()}" }
                    }
                }
            }

            button {
                class: "btn secondary",
                disabled: loading,
                onclick: move |_| on_reload.call(()),
                "Reload"
            }
        }
    }
}

/// Input row for new todos.
#[component]
pub fn AddTodoForm(
    draft: String,
    adding: bool,
    on_input: EventHandler<String>,
    on_submit: EventHandler<FormEvent>,
) -> Element {
    rsx! {
        form { class: "addRow", onsubmit: move |evt| on_submit.call(evt),
            input {
                value: "{draft}",
                oninput: move |evt| on_input.call(evt.value()),
                placeholder: "New todo…",
                disabled: adding,
            }
            button { class: "btn", r#type: "submit", disabled: adding,
                if adding { "Adding…" } else { "Add" }
            }
        }
    }
}

/// Shown when a successful load yields nothing to display
#[component]
pub fn EmptyTodosState() -> Element {
    rsx! {
        div { class: "panel muted", "No todos yet." }
    }
}

/// A single entry. Controls stay disabled until the server has assigned an id.
#[component]
pub fn TodoItem(todo: Todo, on_toggle: EventHandler<TodoId>, on_remove: EventHandler<TodoId>) -> Element {
    let id = todo.id;
    let provisional = todo.is_provisional();
    let class = if todo.ticked_off { "item done" } else { "item" };

    rsx! {
        li { class: "{class}",
            label { class: "itemMain",
                input {
                    r#type: "checkbox",
                    checked: todo.ticked_off,
                    disabled: provisional,
                    onchange: move |_| on_toggle.call(id),
                }
                span { class: "text", "{todo.text}" }
            }
            div { class: "itemActions",
                button {
                    class: "btn danger",
                    disabled: provisional,
                    onclick: move |_| on_remove.call(id),
                    "Delete"
                }
            }
        }
    }
}
