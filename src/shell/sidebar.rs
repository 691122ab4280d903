//! Side navigation for authenticated users. Tutor-only links are decided per
//! build from the role oracle, never remembered between renders.

use crate::auth::{roles::RoleOracle, types::Role};
use crate::navigation::normalize_path;
use std::fmt;

pub const BRAND: &str = "Edulink";

struct NavEntry {
    label: &'static str,
    href: &'static str,
    tutor_only: bool,
}

const NAVIGATION: [NavEntry; 8] = [
    NavEntry {
        label: "Dashboard",
        href: "/",
        tutor_only: false,
    },
    NavEntry {
        label: "Deadlines",
        href: "/deadlines",
        tutor_only: false,
    },
    NavEntry {
        label: "Tasks",
        href: "/tasks",
        tutor_only: false,
    },
    NavEntry {
        label: "Students",
        href: "/students",
        tutor_only: true,
    },
    NavEntry {
        label: "Reports",
        href: "/reports",
        tutor_only: true,
    },
    NavEntry {
        label: "Statistics",
        href: "/statistics",
        tutor_only: true,
    },
    NavEntry {
        label: "Calendar",
        href: "/calendar",
        tutor_only: false,
    },
    NavEntry {
        label: "Settings",
        href: "/settings",
        tutor_only: false,
    },
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserBadge {
    pub initial: char,
    pub name: String,
    /// Lowercase role, e.g. `tutor`.
    pub role: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sidebar {
    pub user: Option<UserBadge>,
    pub links: Vec<NavLink>,
}

impl Sidebar {
    pub fn build(oracle: &impl RoleOracle, pathname: &str) -> Self {
        let pathname = normalize_path(pathname);
        let is_tutor = oracle.has_role(Role::Tutor);

        let links = NAVIGATION
            .iter()
            .filter(|entry| !entry.tutor_only || is_tutor)
            .map(|entry| NavLink {
                label: entry.label,
                href: entry.href,
                active: entry.href == pathname,
            })
            .collect();

        let user = oracle.current_identity().and_then(|identity| {
            identity.initial().map(|initial| UserBadge {
                initial,
                name: identity.name.clone(),
                role: identity.role.as_str().to_lowercase(),
            })
        });

        Self { user, links }
    }

    #[must_use]
    pub fn active(&self) -> Option<&NavLink> {
        self.links.iter().find(|link| link.active)
    }

    #[must_use]
    pub fn contains(&self, href: &str) -> bool {
        self.links.iter().any(|link| link.href == href)
    }
}

impl fmt::Display for Sidebar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{BRAND}")?;
        if let Some(user) = &self.user {
            writeln!(f, "[{}] {} ({})", user.initial, user.name, user.role)?;
        }
        for link in &self.links {
            let marker = if link.active { '>' } else { ' ' };
            writeln!(f, " {marker} {:<11} {}", link.label, link.href)?;
        }
        write!(f, "   Logout")
    }
}
