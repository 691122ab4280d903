use crate::auth::{roles::RoleOracle, types::Role};
use crate::navigation::normalize_path;

pub const ACCESS_DENIED: &str = "Access denied. Tutors only.";
pub const ACCESS_DENIED_TUTORS_OR_STUDENTS: &str = "Access denied. Tutors or Students only.";

const TUTOR_PAGES: [&str; 3] = ["/students", "/reports", "/statistics"];
const CALENDAR_PAGE: &str = "/calendar";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageAccess {
    /// Any signed-in user.
    Members,
    TutorsOnly,
    /// The calendar only knows tutors and students.
    TutorsOrStudents,
}

impl PageAccess {
    /// Message shown inside the frame when the page is refused.
    #[must_use]
    pub const fn denial(self) -> Option<&'static str> {
        match self {
            Self::Members => None,
            Self::TutorsOnly => Some(ACCESS_DENIED),
            Self::TutorsOrStudents => Some(ACCESS_DENIED_TUTORS_OR_STUDENTS),
        }
    }
}

fn under(path: &str, page: &str) -> bool {
    path == page || path.starts_with(&format!("{page}/"))
}

#[must_use]
pub fn page_access(path: &str) -> PageAccess {
    let path = normalize_path(path);
    if TUTOR_PAGES.iter().any(|page| under(path, page)) {
        PageAccess::TutorsOnly
    } else if under(path, CALENDAR_PAGE) {
        PageAccess::TutorsOrStudents
    } else {
        PageAccess::Members
    }
}

pub fn can_view(oracle: &impl RoleOracle, path: &str) -> bool {
    match page_access(path) {
        PageAccess::Members => oracle.current_identity().is_some(),
        PageAccess::TutorsOnly => oracle.has_role(Role::Tutor),
        PageAccess::TutorsOrStudents => {
            matches!(oracle.current_role(), Some(Role::Tutor | Role::Student))
        }
    }
}

/// The denial message for `path`, or `None` when the current identity may
/// view it.
pub fn access_denied(oracle: &impl RoleOracle, path: &str) -> Option<&'static str> {
    if can_view(oracle, path) {
        None
    } else {
        page_access(path).denial()
    }
}
