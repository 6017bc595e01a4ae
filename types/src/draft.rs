use jiff::{Timestamp, civil::Date, tz::TimeZone};
use thiserror::Error;

use crate::{EmergencyContact, Employee, EmployeePayload, EmployeeStatus};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("salary must be a number, got \"{0}\"")]
    InvalidSalary(String),
    #[error("hire date must look like YYYY-MM-DD, got \"{0}\"")]
    InvalidHireDate(String),
}

/// The raw contents of the employee form, one string per input.
///
/// `hire_date` holds the `YYYY-MM-DD` value of an `<input type="date">`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub position: String,
    pub salary: String,
    pub hire_date: String,
    pub status: EmployeeStatus,
    pub address: String,
    pub emergency_contact: EmergencyContact,
}

impl From<&Employee> for EmployeeDraft {
    fn from(employee: &Employee) -> Self {
        Self {
            name: employee.name.clone(),
            email: employee.email.clone(),
            phone: employee.phone.clone(),
            department: employee.department.clone(),
            position: employee.position.clone(),
            salary: employee.salary.to_string(),
            hire_date: date_input_value(employee.hire_date),
            status: employee.status,
            address: employee.address.clone().unwrap_or_default(),
            emergency_contact: employee.emergency_contact.clone().unwrap_or_default(),
        }
    }
}

impl EmployeeDraft {
    pub fn for_employee(employee: Option<&Employee>) -> Self {
        employee.map(Self::from).unwrap_or_default()
    }

    /// Build the request body.
    ///
    /// Blank salary or hire date are sent as `null` so the server can report
    /// the missing field; text that does not parse is rejected here instead.
    /// The emergency contact is only included when it has a name, and then
    /// with all three fields as typed.
    pub fn to_payload(&self) -> Result<EmployeePayload, FormError> {
        let salary = match self.salary.trim() {
            "" => None,
            raw => Some(
                raw.parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| FormError::InvalidSalary(raw.to_string()))?,
            ),
        };

        let hire_date = match self.hire_date.trim() {
            "" => None,
            raw => Some(
                parse_date_input(raw).ok_or_else(|| FormError::InvalidHireDate(raw.to_string()))?,
            ),
        };

        let emergency_contact = (!self.emergency_contact.name.is_empty())
            .then(|| self.emergency_contact.clone());

        Ok(EmployeePayload {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            department: self.department.clone(),
            position: self.position.clone(),
            salary,
            hire_date,
            status: self.status,
            address: non_empty(&self.address),
            emergency_contact,
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// `YYYY-MM-DD` in UTC, the format `<input type="date">` expects.
pub fn date_input_value(timestamp: Timestamp) -> String {
    timestamp.to_zoned(TimeZone::UTC).date().to_string()
}

/// Midnight UTC of a `YYYY-MM-DD` date input value.
pub fn parse_date_input(value: &str) -> Option<Timestamp> {
    let date: Date = value.parse().ok()?;
    date.to_zoned(TimeZone::UTC).ok().map(|zdt| zdt.timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn filled_draft() -> EmployeeDraft {
        EmployeeDraft {
            name: "Chen Jing".into(),
            email: "chen.jing@example.com".into(),
            phone: "13912345678".into(),
            department: "Marketing".into(),
            position: "Analyst".into(),
            salary: "12500.5".into(),
            hire_date: "2024-02-29".into(),
            status: EmployeeStatus::Inactive,
            address: "88 Century Avenue, Shanghai".into(),
            emergency_contact: EmergencyContact {
                name: "Chen Hao".into(),
                phone: "13700000000".into(),
                relationship: "Brother".into(),
            },
        }
    }

    /// What the server would hand back after storing `payload`.
    fn stored(payload: EmployeePayload) -> Employee {
        Employee {
            id: "e-1".into(),
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            department: payload.department,
            position: payload.position,
            salary: payload.salary.unwrap(),
            hire_date: payload.hire_date.unwrap(),
            status: payload.status,
            address: payload.address,
            emergency_contact: payload.emergency_contact,
        }
    }

    #[test]
    fn new_form_starts_blank_and_active() {
        let draft = EmployeeDraft::for_employee(None);
        assert_eq!(draft, EmployeeDraft::default());
        assert_eq!(draft.status, EmployeeStatus::Active);
    }

    #[test]
    fn submit_then_reopen_reproduces_every_field() {
        let draft = filled_draft();
        let employee = stored(draft.to_payload().unwrap());

        assert_eq!(EmployeeDraft::for_employee(Some(&employee)), draft);
    }

    #[test]
    fn round_trip_survives_json() {
        let draft = EmployeeDraft {
            address: String::new(),
            emergency_contact: EmergencyContact::default(),
            salary: "9000".into(),
            ..filled_draft()
        };
        let employee = stored(draft.to_payload().unwrap());
        let wire = serde_json::to_string(&employee).unwrap();
        let reloaded: Employee = serde_json::from_str(&wire).unwrap();

        assert_eq!(EmployeeDraft::from(&reloaded), draft);
    }

    #[test]
    fn hire_date_becomes_utc_midnight() {
        let payload = filled_draft().to_payload().unwrap();
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["hireDate"], json!("2024-02-29T00:00:00Z"));
        assert_eq!(value["salary"], json!(12500.5));
    }

    #[test]
    fn edit_prefill_uses_utc_calendar_date() {
        let hire_date: Timestamp = "2022-12-31T23:30:00-02:00".parse().unwrap();
        assert_eq!(date_input_value(hire_date), "2023-01-01");
    }

    #[test]
    fn emergency_contact_without_name_is_omitted() {
        let draft = EmployeeDraft {
            emergency_contact: EmergencyContact {
                name: String::new(),
                phone: "13700000000".into(),
                relationship: "Sister".into(),
            },
            ..filled_draft()
        };

        let value = serde_json::to_value(draft.to_payload().unwrap()).unwrap();
        assert!(value.get("emergencyContact").is_none());
    }

    #[test]
    fn emergency_contact_with_name_is_sent_verbatim() {
        let draft = EmployeeDraft {
            emergency_contact: EmergencyContact {
                name: "Wang Fang".into(),
                phone: String::new(),
                relationship: String::new(),
            },
            ..filled_draft()
        };

        let value = serde_json::to_value(draft.to_payload().unwrap()).unwrap();
        assert_eq!(
            value["emergencyContact"],
            json!({ "name": "Wang Fang", "phone": "", "relationship": "" })
        );
    }

    #[test]
    fn empty_address_is_stripped_but_required_fields_stay() {
        let draft = EmployeeDraft {
            name: String::new(),
            address: String::new(),
            ..filled_draft()
        };

        let value = serde_json::to_value(draft.to_payload().unwrap()).unwrap();
        assert!(value.get("address").is_none());
        assert_eq!(value["name"], json!(""));
        assert_eq!(value["status"], json!("inactive"));
    }

    #[test]
    fn blank_salary_and_date_are_sent_as_null() {
        let draft = EmployeeDraft {
            salary: "  ".into(),
            hire_date: String::new(),
            ..filled_draft()
        };

        let payload = draft.to_payload().unwrap();
        assert_eq!(payload.salary, None);
        assert_eq!(payload.hire_date, None);
    }

    #[test]
    fn malformed_salary_and_date_are_rejected() {
        let bad_salary = EmployeeDraft {
            salary: "lots".into(),
            ..filled_draft()
        };
        assert_eq!(
            bad_salary.to_payload(),
            Err(FormError::InvalidSalary("lots".into()))
        );

        let bad_date = EmployeeDraft {
            hire_date: "2024-13-01".into(),
            ..filled_draft()
        };
        assert_eq!(
            bad_date.to_payload(),
            Err(FormError::InvalidHireDate("2024-13-01".into()))
        );
    }
}
