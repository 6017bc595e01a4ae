use dioxus::prelude::*;
use types::{Employee, EmployeeDraft, EmployeePayload, EmployeeStatus, FormError};

use super::components::{Field, FormMessage};

/// Create/edit dialog. Without an `employee` it creates a new record;
/// with one, every input starts out filled from it.
#[component]
pub fn EmployeeFormModal(
    employee: Option<Employee>,
    departments: Vec<String>,
    saving: bool,
    error: Option<String>,
    on_submit: EventHandler<EmployeePayload>,
    on_close: EventHandler<()>,
) -> Element {
    let editing = employee.is_some();
    let mut draft = use_signal(|| EmployeeDraft::for_employee(employee.as_ref()));
    let mut invalid = use_signal(|| None::<FormError>);

    let submit = move |e: FormEvent| {
        e.prevent_default();
        let payload = draft.read().to_payload();
        match payload {
            Ok(payload) => {
                invalid.set(None);
                on_submit.call(payload);
            }
            Err(problem) => {
                tracing::debug!(%problem, "employee form rejected locally");
                invalid.set(Some(problem));
            }
        }
    };

    let current = draft.read().clone();
    let message = invalid.read().as_ref().map(ToString::to_string).or(error);

    rsx! {
        div { class: "modal-overlay",
            onclick: move |_| if !saving { on_close.call(()) },
            div { class: "modal modal-lg",
                onclick: move |e| e.stop_propagation(),
                div { class: "modal-header",
                    h2 { class: "modal-title",
                        if editing { "Edit Employee" } else { "Add Employee" }
                    }
                    if !saving {
                        button {
                            class: "modal-close",
                            onclick: move |_| on_close.call(()),
                            "×"
                        }
                    }
                }
                form { onsubmit: submit,
                    div { class: "modal-body",
                        div { class: "form-grid",
                            Field {
                                id: "name",
                                label: "Name *",
                                value: current.name.clone(),
                                oninput: move |v| draft.write().name = v,
                            }
                            Field {
                                id: "email",
                                label: "Email *",
                                kind: "email",
                                value: current.email.clone(),
                                oninput: move |v| draft.write().email = v,
                            }
                            Field {
                                id: "phone",
                                label: "Phone *",
                                kind: "tel",
                                value: current.phone.clone(),
                                oninput: move |v| draft.write().phone = v,
                            }
                            div { class: "form-group",
                                label { class: "form-label", r#for: "department", "Department *" }
                                input {
                                    id: "department",
                                    class: "form-input",
                                    list: "department-options",
                                    value: "{current.department}",
                                    oninput: move |e| draft.write().department = e.value(),
                                }
                                datalist { id: "department-options",
                                    for name in departments.iter() {
                                        option { value: "{name}" }
                                    }
                                }
                            }
                            Field {
                                id: "position",
                                label: "Position *",
                                value: current.position.clone(),
                                oninput: move |v| draft.write().position = v,
                            }
                            Field {
                                id: "salary",
                                label: "Salary *",
                                kind: "number",
                                placeholder: "e.g. 12000",
                                value: current.salary.clone(),
                                oninput: move |v| draft.write().salary = v,
                            }
                            Field {
                                id: "hire_date",
                                label: "Hire Date *",
                                kind: "date",
                                value: current.hire_date.clone(),
                                oninput: move |v| draft.write().hire_date = v,
                            }
                            div { class: "form-group",
                                label { class: "form-label", r#for: "status", "Status *" }
                                select {
                                    id: "status",
                                    class: "form-input",
                                    value: "{current.status}",
                                    onchange: move |e| {
                                        if let Ok(status) = e.value().parse::<EmployeeStatus>() {
                                            draft.write().status = status;
                                        }
                                    },
                                    for status in EmployeeStatus::ALL {
                                        option {
                                            value: "{status}",
                                            selected: status == current.status,
                                            "{status.label()}"
                                        }
                                    }
                                }
                            }
                        }
                        Field {
                            id: "address",
                            label: "Address",
                            value: current.address.clone(),
                            oninput: move |v| draft.write().address = v,
                        }

                        div { class: "divider" }

                        h3 { class: "section-header", "Emergency Contact" }
                        div { class: "form-grid",
                            Field {
                                id: "contact_name",
                                label: "Name",
                                value: current.emergency_contact.name.clone(),
                                oninput: move |v| draft.write().emergency_contact.name = v,
                            }
                            Field {
                                id: "contact_phone",
                                label: "Phone",
                                kind: "tel",
                                value: current.emergency_contact.phone.clone(),
                                oninput: move |v| draft.write().emergency_contact.phone = v,
                            }
                            Field {
                                id: "contact_relationship",
                                label: "Relationship",
                                value: current.emergency_contact.relationship.clone(),
                                oninput: move |v| draft.write().emergency_contact.relationship = v,
                            }
                        }

                        FormMessage { message }
                    }
                    div { class: "modal-footer",
                        button {
                            r#type: "button",
                            class: "btn btn-secondary",
                            disabled: saving,
                            onclick: move |_| on_close.call(()),
                            "Cancel"
                        }
                        button {
                            r#type: "submit",
                            class: "btn btn-primary",
                            disabled: saving,
                            if saving { "Saving..." } else if editing { "Save Changes" } else { "Create" }
                        }
                    }
                }
            }
        }
    }
}
