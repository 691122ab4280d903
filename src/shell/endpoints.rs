//! Role-scoped REST paths. Pages ask the role oracle which endpoint belongs to
//! the signed-in user instead of hardcoding one; tutor-only resources yield
//! `None` for everyone else. Paths are relative to the API base URL.

use crate::auth::types::{Identity, Role};
use url::form_urlencoded::Serializer;

/// Filters accepted by the tutor statistics endpoints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatisticsFilter {
    pub student_id: Option<String>,
    pub subject: String,
    pub period: String,
}

impl Default for StatisticsFilter {
    fn default() -> Self {
        Self {
            student_id: None,
            subject: "all-subjects".to_string(),
            period: "weekly".to_string(),
        }
    }
}

pub struct RoleEndpoints<'a> {
    identity: &'a Identity,
}

impl<'a> RoleEndpoints<'a> {
    pub fn new(identity: &'a Identity) -> Self {
        Self { identity }
    }

    fn is_tutor(&self) -> bool {
        self.identity.role == Role::Tutor
    }

    /// Dashboard and task page list.
    #[must_use]
    pub fn task_list(&self) -> String {
        match self.identity.role {
            Role::Student => format!("/tasks/student/{}", self.identity.id),
            Role::Tutor | Role::Admin => format!("/tasks/tutor/{}", self.identity.id),
        }
    }

    /// The calendar only knows tutors and students.
    fn calendar_role(&self) -> Option<Role> {
        match self.identity.role {
            Role::Tutor | Role::Student => Some(self.identity.role),
            Role::Admin => None,
        }
    }

    #[must_use]
    pub fn calendar_tasks(&self, year: i32, month: u32) -> Option<String> {
        let role = self.calendar_role()?;
        let query = Serializer::new(String::new())
            .append_pair("userId", &self.identity.id.to_string())
            .append_pair("role", role.as_str())
            .append_pair("year", &year.to_string())
            .append_pair("month", &month.to_string())
            .finish();
        Some(format!("/calendar/tasks?{query}"))
    }

    /// `from` is an ISO local date-time such as `2025-03-01T00:00:00`.
    #[must_use]
    pub fn calendar_upcoming(&self, from: &str) -> Option<String> {
        let role = self.calendar_role()?;
        let query = Serializer::new(String::new())
            .append_pair("userId", &self.identity.id.to_string())
            .append_pair("role", role.as_str())
            .append_pair("from", from)
            .finish();
        Some(format!("/calendar/upcoming?{query}"))
    }

    #[must_use]
    pub fn student_list(&self) -> Option<String> {
        self.is_tutor().then(|| "/users?role=STUDENT".to_string())
    }

    #[must_use]
    pub fn reports(&self) -> Option<Vec<String>> {
        if !self.is_tutor() {
            return None;
        }
        let query = self.tutor_query().finish();
        Some(
            ["task-completion-rate", "student-progress"]
                .iter()
                .map(|report| format!("/reports/{report}?{query}"))
                .collect(),
        )
    }

    #[must_use]
    pub fn statistics(&self, filter: &StatisticsFilter) -> Option<Vec<String>> {
        if !self.is_tutor() {
            return None;
        }
        let mut query = self.tutor_query();
        if let Some(student_id) = filter.student_id.as_deref() {
            query.append_pair("studentId", student_id);
        }
        let query = query
            .append_pair("subject", &filter.subject)
            .append_pair("period", &filter.period)
            .finish();

        Some(
            [
                "task-completion-rate",
                "subject-performance",
                "grade-distribution",
                "submission-timeline",
            ]
            .iter()
            .map(|stat| format!("/statistics/{stat}?{query}"))
            .collect(),
        )
    }

    /// Profile read/update for the settings page.
    #[must_use]
    pub fn profile(&self) -> String {
        let query = Serializer::new(String::new())
            .append_pair("userId", &self.identity.id.to_string())
            .finish();
        format!("/users/me?{query}")
    }

    fn tutor_query(&self) -> Serializer<'static, String> {
        let mut query = Serializer::new(String::new());
        query.append_pair("tutorId", &self.identity.id.to_string());
        query
    }
}
