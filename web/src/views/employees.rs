use api::{ApiClient, EmployeeListing, Fetch, FetchPhase};
use dioxus::prelude::*;
use types::{Employee, EmployeePayload, EmployeeStatus, format_hire_date, format_salary};

use super::components::StatusBadge;
use super::employee_form::EmployeeFormModal;
use crate::{ErrorState, use_api, use_error};

/// Which record the form dialog is open for.
#[derive(Debug, Clone, PartialEq)]
enum Editor {
    Create,
    Edit(Employee),
}

impl Editor {
    fn employee(&self) -> Option<Employee> {
        match self {
            Editor::Create => None,
            Editor::Edit(employee) => Some(employee.clone()),
        }
    }
}

/// Send an issued list request and apply its response. Only the response to
/// the latest fetch lands; when it asks for another page, that is sent too.
fn send_fetch(
    client: ApiClient,
    mut listing: Signal<EmployeeListing>,
    mut error_state: ErrorState,
    (ticket, query): Fetch,
) {
    spawn(async move {
        let result = client.list_employees(&query).await;
        let outcome = listing.write().complete(ticket, result);
        match outcome {
            Ok(Some(next)) => send_fetch(client, listing, error_state, next),
            Ok(None) => {}
            Err(e) => error_state.report("Failed to load employees", &e),
        }
    });
}

#[component]
pub fn Employees() -> Element {
    let client = use_api();
    let mut error_state = use_error();
    let mut listing = use_signal(EmployeeListing::default);
    let mut departments = use_signal(Vec::<String>::new);
    let mut editor = use_signal(|| None::<Editor>);
    let mut save_error = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);
    let mut deleting = use_signal(|| false);

    let refresh = use_callback({
        let client = client.clone();
        move |()| {
            let fetch = listing.write().begin_fetch();
            send_fetch(client.clone(), listing, error_state, fetch);
        }
    });

    let load_departments = use_callback({
        let client = client.clone();
        move |()| {
            let client = client.clone();
            spawn(async move {
                match client.list_departments().await {
                    Ok(names) => departments.set(names),
                    Err(e) => error_state.report("Failed to load departments", &e),
                }
            });
        }
    });

    let save = use_callback({
        let client = client.clone();
        move |payload: EmployeePayload| {
            let client = client.clone();
            let target = editor.peek().as_ref().and_then(Editor::employee);
            spawn(async move {
                saving.set(true);
                save_error.set(None);
                let result = match &target {
                    Some(employee) => client.update_employee(&employee.id, &payload).await,
                    None => client.create_employee(&payload).await,
                };
                saving.set(false);

                let refetch = listing.write().after_mutation(&result);
                match result {
                    Ok(saved) => {
                        tracing::info!(id = %saved.id, "employee saved");
                        editor.set(None);
                        load_departments.call(());
                    }
                    Err(e) if e.is_unauthorized() => {
                        error_state.report("Failed to save employee", &e);
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to save employee");
                        save_error.set(Some(e.user_message()));
                    }
                }
                if let Some(fetch) = refetch {
                    send_fetch(client, listing, error_state, fetch);
                }
            });
        }
    });

    let confirm_delete = use_callback({
        let client = client.clone();
        move |()| {
            let Some(id) = listing.peek().confirm_delete() else {
                return;
            };
            let client = client.clone();
            spawn(async move {
                deleting.set(true);
                let result = client.delete_employee(&id).await;
                deleting.set(false);

                let refetch = listing.write().finish_delete(&result);
                match &result {
                    Ok(()) => tracing::info!(%id, "employee deleted"),
                    Err(e) => error_state.report("Failed to delete employee", e),
                }
                if let Some(fetch) = refetch {
                    send_fetch(client, listing, error_state, fetch);
                }
            });
        }
    });

    // Fetch the first page and the department list on mount
    use_effect(move || {
        refresh.call(());
        load_departments.call(());
    });

    let view = listing.read().clone();
    let query = view.query().clone();
    let status_value = query.status.map(|s| s.as_str()).unwrap_or_default();

    rsx! {
        div {
            div { class: "page-header",
                div { class: "page-header-content",
                    h1 { class: "page-title", "Employees" }
                    p { class: "page-subtitle", "Search, add, edit and remove employee records." }
                }
                div { class: "page-header-actions",
                    button {
                        class: "btn btn-primary",
                        onclick: move |_| {
                            save_error.set(None);
                            editor.set(Some(Editor::Create));
                        },
                        "Add Employee"
                    }
                }
            }

            div { class: "card",
                div { class: "filter-bar",
                    input {
                        class: "form-input filter-search",
                        r#type: "search",
                        placeholder: "Search by name, email or phone",
                        value: "{query.search}",
                        oninput: move |e| {
                            if listing.write().set_search(e.value()) {
                                refresh.call(());
                            }
                        },
                    }
                    select {
                        class: "form-input filter-select",
                        value: "{query.department}",
                        onchange: move |e| {
                            if listing.write().set_department(e.value()) {
                                refresh.call(());
                            }
                        },
                        option { value: "", "All departments" }
                        for name in departments.read().iter() {
                            option {
                                value: "{name}",
                                selected: *name == query.department,
                                "{name}"
                            }
                        }
                    }
                    select {
                        class: "form-input filter-select",
                        value: "{status_value}",
                        onchange: move |e| {
                            let status = e.value().parse::<EmployeeStatus>().ok();
                            if listing.write().set_status(status) {
                                refresh.call(());
                            }
                        },
                        option { value: "", "All statuses" }
                        for status in EmployeeStatus::ALL {
                            option {
                                value: "{status}",
                                selected: Some(status) == query.status,
                                "{status.label()}"
                            }
                        }
                    }
                    button {
                        class: "btn btn-secondary",
                        disabled: !query.has_filters(),
                        onclick: move |_| {
                            if listing.write().reset_filters() {
                                refresh.call(());
                            }
                        },
                        "Reset Filters"
                    }
                }

                if view.employees().is_empty() {
                    {match view.phase() {
                        FetchPhase::Loading => rsx! {
                            div { class: "loading", "Loading employees..." }
                        },
                        FetchPhase::Failed(_) => rsx! {
                            div { class: "empty-state",
                                p { "Could not load employees." }
                                button {
                                    class: "btn btn-secondary",
                                    onclick: move |_| refresh.call(()),
                                    "Retry"
                                }
                            }
                        },
                        FetchPhase::Loaded => rsx! {
                            div { class: "empty-state",
                                p { "No employees found." }
                            }
                        },
                    }}
                } else {
                    div {
                        class: if view.is_loading() { "table-container refreshing" } else { "table-container" },
                        table {
                            thead {
                                tr {
                                    th { "Name" }
                                    th { "Email" }
                                    th { "Phone" }
                                    th { "Department" }
                                    th { "Position" }
                                    th { "Salary" }
                                    th { "Hire Date" }
                                    th { "Status" }
                                    th { class: "table-actions", "Actions" }
                                }
                            }
                            tbody {
                                for employee in view.employees().iter().cloned() {
                                    EmployeeRow {
                                        key: "{employee.id}",
                                        employee,
                                        on_edit: move |employee| {
                                            save_error.set(None);
                                            editor.set(Some(Editor::Edit(employee)));
                                        },
                                        on_delete: move |employee| listing.write().request_delete(employee),
                                    }
                                }
                            }
                        }
                    }
                }
                Pager { listing, on_change: move |_| refresh.call(()) }
            }

            if let Some(open) = editor() {
                EmployeeFormModal {
                    employee: open.employee(),
                    departments: departments(),
                    saving: saving(),
                    error: save_error(),
                    on_submit: move |payload| save.call(payload),
                    on_close: move |_| editor.set(None),
                }
            }

            if let Some(employee) = view.pending_delete() {
                DeleteConfirmModal {
                    employee: employee.clone(),
                    deleting: deleting(),
                    on_close: move |_| listing.write().cancel_delete(),
                    on_confirm: move |_| confirm_delete.call(()),
                }
            }
        }
    }
}

#[component]
fn EmployeeRow(
    employee: Employee,
    on_edit: EventHandler<Employee>,
    on_delete: EventHandler<Employee>,
) -> Element {
    let salary = format_salary(employee.salary);
    let hired = format_hire_date(employee.hire_date);
    let for_edit = employee.clone();
    let for_delete = employee.clone();

    rsx! {
        tr {
            td { "{employee.name}" }
            td { "{employee.email}" }
            td { "{employee.phone}" }
            td { "{employee.department}" }
            td { "{employee.position}" }
            td { class: "numeric", "{salary}" }
            td { "{hired}" }
            td { StatusBadge { status: employee.status } }
            td { class: "table-actions",
                button {
                    class: "btn btn-link",
                    onclick: move |_| on_edit.call(for_edit.clone()),
                    "Edit"
                }
                button {
                    class: "btn btn-link btn-link-danger",
                    onclick: move |_| on_delete.call(for_delete.clone()),
                    "Delete"
                }
            }
        }
    }
}

/// Previous/next with "Showing X to Y of N". Hidden with a single page,
/// shown otherwise even when the current page came back empty.
#[component]
fn Pager(listing: Signal<EmployeeListing>, on_change: EventHandler<()>) -> Element {
    let state = listing.read().clone();
    if state.total_pages() <= 1 {
        return rsx! {};
    }

    rsx! {
        div { class: "pager",
            span { class: "pager-summary",
                if let Some((first, last)) = state.showing_range() {
                    "Showing {first} to {last} of {state.total()}"
                }
            }
            div { class: "pager-controls",
                button {
                    class: "btn btn-secondary",
                    disabled: !state.has_previous(),
                    onclick: move |_| {
                        if listing.write().previous_page() {
                            on_change.call(());
                        }
                    },
                    "Previous"
                }
                span { class: "pager-page", "Page {state.page()} of {state.total_pages()}" }
                button {
                    class: "btn btn-secondary",
                    disabled: !state.has_next(),
                    onclick: move |_| {
                        if listing.write().next_page() {
                            on_change.call(());
                        }
                    },
                    "Next"
                }
            }
        }
    }
}

/// What the delete dialog lists about a record, skipping blank fields.
fn identifying_details(employee: &Employee) -> Vec<(&'static str, String)> {
    [
        ("Position", &employee.position),
        ("Department", &employee.department),
        ("Email", &employee.email),
    ]
    .into_iter()
    .filter(|(_, value)| !value.trim().is_empty())
    .map(|(label, value)| (label, value.clone()))
    .collect()
}

/// Second step of a delete. Shows enough of the record to be sure it is the
/// right one; the call is only made from the confirm button.
#[component]
fn DeleteConfirmModal(
    employee: Employee,
    deleting: bool,
    on_close: EventHandler<()>,
    on_confirm: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "modal-overlay",
            onclick: move |_| if !deleting { on_close.call(()) },
            div { class: "modal modal-sm",
                onclick: move |e| e.stop_propagation(),
                div { class: "modal-header",
                    h2 { class: "modal-title", "Remove {employee.name}?" }
                }
                div { class: "modal-body",
                    dl { class: "confirm-details",
                        for (label, value) in identifying_details(&employee) {
                            dt { "{label}" }
                            dd { "{value}" }
                        }
                    }
                    p { class: "text-muted",
                        "The record is deleted on the server and the list reloads. This cannot be undone."
                    }
                }
                div { class: "modal-footer",
                    button {
                        class: "btn btn-secondary",
                        disabled: deleting,
                        onclick: move |_| on_close.call(()),
                        "Keep"
                    }
                    button {
                        class: "btn btn-danger",
                        disabled: deleting,
                        onclick: move |_| on_confirm.call(()),
                        if deleting { "Deleting..." } else { "Delete Employee" }
                    }
                }
            }
        }
    }
}
