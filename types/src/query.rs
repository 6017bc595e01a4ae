use crate::EmployeeStatus;

/// Rows per page of the employee table.
pub const PAGE_SIZE: u32 = 10;

/// Parameters of `GET /employees`.
///
/// Changing any filter through the `with_*` builders also rewinds to the
/// first page, so a narrowed result set is never asked for an out-of-range
/// page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeQuery {
    pub page: u32,
    pub limit: u32,
    pub search: String,
    pub department: String,
    pub status: Option<EmployeeStatus>,
}

impl Default for EmployeeQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: PAGE_SIZE,
            search: String::new(),
            department: String::new(),
            status: None,
        }
    }
}

impl EmployeeQuery {
    pub fn with_search(self, search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            page: 1,
            ..self
        }
    }

    pub fn with_department(self, department: impl Into<String>) -> Self {
        Self {
            department: department.into(),
            page: 1,
            ..self
        }
    }

    pub fn with_status(self, status: Option<EmployeeStatus>) -> Self {
        Self {
            status,
            page: 1,
            ..self
        }
    }

    /// Drop every filter and go back to the first page.
    pub fn without_filters(self) -> Self {
        Self {
            limit: self.limit,
            ..Self::default()
        }
    }

    pub fn with_page(self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self
        }
    }

    pub fn has_filters(&self) -> bool {
        !self.search.is_empty() || !self.department.is_empty() || self.status.is_some()
    }

    /// Query-string pairs. Inactive filters are sent as empty values, which
    /// the backend treats as "no filter".
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
            ("search", self.search.clone()),
            ("department", self.department.clone()),
            (
                "status",
                self.status.map(|s| s.as_str().to_string()).unwrap_or_default(),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_first_page_without_filters() {
        let query = EmployeeQuery::default();
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, PAGE_SIZE);
        assert!(!query.has_filters());
        assert_eq!(
            query.to_params(),
            vec![
                ("page", "1".to_string()),
                ("limit", "10".to_string()),
                ("search", String::new()),
                ("department", String::new()),
                ("status", String::new()),
            ]
        );
    }

    #[test]
    fn every_filter_change_rewinds_to_page_one() {
        let on_page_three = EmployeeQuery::default().with_page(3);

        assert_eq!(on_page_three.clone().with_search("ann").page, 1);
        assert_eq!(on_page_three.clone().with_department("Sales").page, 1);
        assert_eq!(
            on_page_three
                .clone()
                .with_status(Some(EmployeeStatus::Active))
                .page,
            1
        );
        assert_eq!(on_page_three.without_filters().page, 1);
    }

    #[test]
    fn filters_combine() {
        let query = EmployeeQuery::default()
            .with_department("Finance")
            .with_status(Some(EmployeeStatus::Inactive))
            .with_search("zhang")
            .with_page(2);

        assert_eq!(query.search, "zhang");
        assert_eq!(query.department, "Finance");
        assert_eq!(query.status, Some(EmployeeStatus::Inactive));
        assert_eq!(query.page, 2);
        assert_eq!(query.to_params()[4], ("status", "inactive".to_string()));
    }

    #[test]
    fn page_never_drops_below_one() {
        assert_eq!(EmployeeQuery::default().with_page(0).page, 1);
    }
}
