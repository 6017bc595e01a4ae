//! State behind the employee table.
//!
//! The table is refetched whenever its query changes and after every
//! mutation. Fetches are never cancelled, so two can be in flight at once;
//! each one is issued a [`Ticket`] and only the response holding the newest
//! ticket is allowed to land.

use types::{Employee, EmployeePage, EmployeeQuery, EmployeeStatus, Error, Result};

/// Identifies one fetch of the employee list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// A list request that has been issued and still has to be sent.
pub type Fetch = (Ticket, EmployeeQuery);

#[derive(Debug, Clone, PartialEq)]
pub enum FetchPhase {
    Loading,
    Loaded,
    Failed(Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeListing {
    query: EmployeeQuery,
    phase: FetchPhase,
    employees: Vec<Employee>,
    total: u64,
    total_pages: u32,
    issued: u64,
    pending_delete: Option<Employee>,
}

impl Default for EmployeeListing {
    fn default() -> Self {
        Self {
            query: EmployeeQuery::default(),
            phase: FetchPhase::Loading,
            employees: Vec::new(),
            total: 0,
            total_pages: 0,
            issued: 0,
            pending_delete: None,
        }
    }
}

impl EmployeeListing {
    pub fn query(&self) -> &EmployeeQuery {
        &self.query
    }

    pub fn phase(&self) -> &FetchPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == FetchPhase::Loading
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn page(&self) -> u32 {
        self.query.page
    }

    /// Swap in a new query. Returns whether anything changed, i.e. whether a
    /// refetch is due.
    fn replace_query(&mut self, query: EmployeeQuery) -> bool {
        if query == self.query {
            return false;
        }
        self.query = query;
        true
    }

    pub fn set_search(&mut self, search: impl Into<String>) -> bool {
        let query = self.query.clone().with_search(search);
        self.replace_query(query)
    }

    pub fn set_department(&mut self, department: impl Into<String>) -> bool {
        let query = self.query.clone().with_department(department);
        self.replace_query(query)
    }

    pub fn set_status(&mut self, status: Option<EmployeeStatus>) -> bool {
        let query = self.query.clone().with_status(status);
        self.replace_query(query)
    }

    pub fn reset_filters(&mut self) -> bool {
        let query = self.query.clone().without_filters();
        self.replace_query(query)
    }

    pub fn has_previous(&self) -> bool {
        self.query.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.query.page < self.total_pages
    }

    pub fn previous_page(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        let query = self.query.clone().with_page(self.query.page - 1);
        self.replace_query(query)
    }

    pub fn next_page(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        let query = self.query.clone().with_page(self.query.page + 1);
        self.replace_query(query)
    }

    /// 1-based positions of the first and last row on screen, or `None` when
    /// the current page lies past the end of the results.
    pub fn showing_range(&self) -> Option<(u64, u64)> {
        let limit = u64::from(self.query.limit);
        let first = u64::from(self.query.page - 1) * limit + 1;
        let last = (u64::from(self.query.page) * limit).min(self.total);
        (first <= last).then_some((first, last))
    }

    /// Enter `Loading` and hand out the ticket and query for a new fetch.
    /// Rows from the previous fetch stay visible until the response lands.
    pub fn begin_fetch(&mut self) -> Fetch {
        self.issued += 1;
        self.phase = FetchPhase::Loading;
        (Ticket(self.issued), self.query.clone())
    }

    pub fn is_latest(&self, ticket: Ticket) -> bool {
        ticket.0 == self.issued
    }

    /// Apply the outcome of a fetch.
    ///
    /// Responses for anything but the latest ticket are dropped and reported
    /// as `Ok(None)`; a newer fetch is already responsible for the screen.
    ///
    /// When the results shrank below the current page (the last row of the
    /// last page was deleted, say) the listing steps back to the new last
    /// page and returns the follow-up fetch for it.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        result: Result<EmployeePage>,
    ) -> Result<Option<Fetch>> {
        if !self.is_latest(ticket) {
            tracing::debug!(?ticket, latest = self.issued, "discarding stale employee list");
            return Ok(None);
        }

        match result {
            Ok(page) => {
                self.employees = page.employees;
                self.total = page.total;
                self.total_pages = page.total_pages;
                self.phase = FetchPhase::Loaded;

                let last_page = self.total_pages.max(1);
                if self.query.page <= last_page {
                    return Ok(None);
                }
                tracing::debug!(
                    page = self.query.page,
                    last_page,
                    "page out of range, stepping back"
                );
                self.query = self.query.clone().with_page(last_page);
                Ok(Some(self.begin_fetch()))
            }
            Err(error) => {
                self.phase = FetchPhase::Failed(error.clone());
                Err(error)
            }
        }
    }

    /// First step of a delete: remember which row the user picked.
    pub fn request_delete(&mut self, employee: Employee) {
        self.pending_delete = Some(employee);
    }

    pub fn pending_delete(&self) -> Option<&Employee> {
        self.pending_delete.as_ref()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Second step: the user confirmed, so hand back the id to delete. The
    /// row stays pending until [`finish_delete`](Self::finish_delete).
    pub fn confirm_delete(&self) -> Option<String> {
        self.pending_delete.as_ref().map(|employee| employee.id.clone())
    }

    /// Last step: the delete call came back. The dialog closes either way;
    /// a successful delete also starts a refetch of the current page.
    pub fn finish_delete(&mut self, result: &Result<()>) -> Option<Fetch> {
        self.pending_delete = None;
        self.after_mutation(result)
    }

    /// The list is never patched locally: every successful create, update or
    /// delete is followed by a full refetch.
    pub fn after_mutation<T>(&mut self, result: &Result<T>) -> Option<Fetch> {
        result.is_ok().then(|| self.begin_fetch())
    }
}
