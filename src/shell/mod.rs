//! Protected shell: guard, navigation frame and the role-dependent choices
//! pages make (which links, which pages, which endpoints).

pub mod endpoints;
pub mod layout;
pub mod pages;
pub mod sidebar;

pub use endpoints::{RoleEndpoints, StatisticsFilter};
pub use layout::{PageContent, ProtectedShell, ShellView};
pub use pages::{
    access_denied, can_view, page_access, PageAccess, ACCESS_DENIED,
    ACCESS_DENIED_TUTORS_OR_STUDENTS,
};
pub use sidebar::{NavLink, Sidebar, UserBadge};
