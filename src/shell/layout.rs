//! Protected layout: the route guard composed with the sidebar frame. The
//! login page renders bare; every other page waits for bootstrap, then either
//! redirects to `/login` or renders inside the frame. Navigation remains
//! client-side; backend routes must enforce access control.

use crate::{
    auth::{
        error::AuthError,
        guards::{GuardDecision, GuardState, RouteGuard},
        session::AuthClient,
        store::Storage,
        types::Identity,
    },
    navigation::{normalize_path, Navigator, HOME_ROUTE, LOGIN_ROUTE},
    shell::{
        pages::access_denied,
        sidebar::Sidebar,
    },
};
use secrecy::SecretString;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageContent {
    Page,
    AccessDenied(&'static str),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShellView {
    Loading,
    /// The login page, without the frame.
    Public { path: String },
    Redirect { to: String },
    Framed {
        sidebar: Sidebar,
        path: String,
        content: PageContent,
    },
}

pub struct ProtectedShell<S> {
    client: Arc<AuthClient<S>>,
    guard: RouteGuard,
    navigator: Arc<dyn Navigator>,
    pathname: String,
}

impl<S: Storage> ProtectedShell<S> {
    pub fn new(client: Arc<AuthClient<S>>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            client,
            guard: RouteGuard::new(Arc::clone(&navigator)),
            navigator,
            pathname: HOME_ROUTE.to_string(),
        }
    }

    pub fn client(&self) -> &AuthClient<S> {
        &self.client
    }

    pub fn state(&self) -> GuardState {
        self.guard.state()
    }

    pub fn pathname(&self) -> &str {
        &self.pathname
    }

    /// Rehydrates the session and renders the first page.
    pub fn mount(&mut self, path: &str) -> ShellView {
        let identity = self.client.bootstrap();
        self.guard.bootstrap(identity.is_some());
        self.render(path)
    }

    /// Renders `path` for the current session. Session changes made through
    /// the client since the last render are applied to the guard first.
    pub fn render(&mut self, path: &str) -> ShellView {
        self.sync_guard();
        self.pathname = normalize_path(path).to_string();

        match self.guard.evaluate(&self.pathname) {
            GuardDecision::Loading => ShellView::Loading,
            GuardDecision::Public => ShellView::Public {
                path: self.pathname.clone(),
            },
            GuardDecision::Redirect(to) => ShellView::Redirect { to },
            GuardDecision::Render => self.framed(),
        }
    }

    fn framed(&self) -> ShellView {
        let context = self.client.context();
        let content = match access_denied(context, &self.pathname) {
            Some(message) => PageContent::AccessDenied(message),
            None => PageContent::Page,
        };

        ShellView::Framed {
            sidebar: Sidebar::build(context, &self.pathname),
            path: self.pathname.clone(),
            content,
        }
    }

    /// Signs in and moves to the dashboard.
    ///
    /// # Errors
    /// Propagates the client's `AuthError`; the shell stays where it was.
    pub async fn login(
        &mut self,
        email: &str,
        password: SecretString,
    ) -> Result<Identity, AuthError> {
        let identity = self.client.login(email, password).await?;
        self.sync_guard();
        self.pathname = HOME_ROUTE.to_string();
        self.navigator.navigate(HOME_ROUTE);
        Ok(identity)
    }

    /// Signs out and moves to the login page. An unmounted shell settles as
    /// unauthenticated.
    pub fn logout(&mut self) -> ShellView {
        self.client.logout();
        if !self.guard.bootstrap(false) {
            self.sync_guard();
        }
        self.pathname = LOGIN_ROUTE.to_string();
        self.navigator.navigate(LOGIN_ROUTE);
        ShellView::Redirect {
            to: LOGIN_ROUTE.to_string(),
        }
    }

    /// Tears the shell down; responses still in flight are discarded.
    pub fn unmount(self) {
        self.client.abandon_pending();
    }

    fn sync_guard(&mut self) {
        let authenticated = self.client.context().is_authenticated();
        let changed = match self.guard.state() {
            GuardState::Bootstrapping => false,
            GuardState::Authenticated if !authenticated => self.guard.logged_out(),
            GuardState::Unauthenticated if authenticated => self.guard.logged_in(),
            GuardState::Authenticated | GuardState::Unauthenticated => false,
        };
        if changed {
            debug!(state = ?self.guard.state(), "Guard followed session change");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::ApiClient,
        auth::{
            store::{MemoryStorage, SESSION_KEY},
            types::{Role, UserId},
        },
        config::{AppConfig, Overrides},
        navigation::RecordingNavigator,
        shell::pages::{ACCESS_DENIED, ACCESS_DENIED_TUTORS_OR_STUDENTS},
    };

    fn shell() -> (ProtectedShell<MemoryStorage>, RecordingNavigator) {
        let config = AppConfig::load(Overrides {
            api_base_url: Some("http://127.0.0.1:9/api".to_string()),
            ..Overrides::default()
        })
        .unwrap();
        let client = AuthClient::new(ApiClient::new(&config).unwrap(), MemoryStorage::new());
        let recorder = RecordingNavigator::new();
        (
            ProtectedShell::new(Arc::new(client), Arc::new(recorder.clone())),
            recorder,
        )
    }

    fn seed(shell: &ProtectedShell<MemoryStorage>, role: Role) {
        let identity = Identity {
            id: UserId::Number(5),
            email: "amy@x.com".to_string(),
            name: "Amy".to_string(),
            role,
        };
        shell.client().store().write(&identity);
    }

    #[test]
    fn renders_loading_before_mount() {
        let (mut shell, recorder) = shell();
        assert_eq!(shell.render("/tasks"), ShellView::Loading);
        assert!(recorder.visited().is_empty());
    }

    #[test]
    fn mount_without_session_redirects() {
        let (mut shell, recorder) = shell();
        assert_eq!(
            shell.mount("/tasks"),
            ShellView::Redirect {
                to: "/login".to_string()
            }
        );
        assert_eq!(shell.state(), GuardState::Unauthenticated);
        assert_eq!(recorder.visited(), vec!["/login"]);
    }

    #[test]
    fn mount_on_login_page_never_redirects() {
        let (mut shell, recorder) = shell();
        assert_eq!(
            shell.mount("/login"),
            ShellView::Public {
                path: "/login".to_string()
            }
        );
        assert!(recorder.visited().is_empty());
    }

    #[test]
    fn mount_with_corrupted_session_is_unauthenticated() {
        let (mut shell, _) = shell();
        shell
            .client()
            .store()
            .storage()
            .set_item(SESSION_KEY, "{not json")
            .unwrap();

        assert!(matches!(shell.mount("/"), ShellView::Redirect { .. }));
        assert_eq!(shell.state(), GuardState::Unauthenticated);
    }

    #[test]
    fn students_get_access_denied_on_tutor_pages() {
        let (mut shell, _) = shell();
        seed(&shell, Role::Student);

        match shell.mount("/reports") {
            ShellView::Framed {
                sidebar, content, ..
            } => {
                assert_eq!(content, PageContent::AccessDenied(ACCESS_DENIED));
                assert!(!sidebar.contains("/reports"));
            }
            other => panic!("expected framed view, got {other:?}"),
        }
    }

    #[test]
    fn admins_get_access_denied_on_the_calendar() {
        let (mut shell, _) = shell();
        seed(&shell, Role::Admin);

        match shell.mount("/calendar") {
            ShellView::Framed {
                sidebar, content, ..
            } => {
                assert_eq!(
                    content,
                    PageContent::AccessDenied(ACCESS_DENIED_TUTORS_OR_STUDENTS)
                );
                assert_eq!(sidebar.active().map(|link| link.href), Some("/calendar"));
            }
            other => panic!("expected framed view, got {other:?}"),
        }
    }

    #[test]
    fn logout_before_mount_settles_unauthenticated() {
        let (mut shell, recorder) = shell();
        assert_eq!(
            shell.logout(),
            ShellView::Redirect {
                to: "/login".to_string()
            }
        );
        assert_eq!(shell.state(), GuardState::Unauthenticated);
        assert!(matches!(shell.render("/tasks"), ShellView::Redirect { .. }));
        assert_eq!(recorder.visited(), vec!["/login", "/login"]);
    }

    #[test]
    fn tutors_render_tutor_pages() {
        let (mut shell, _) = shell();
        seed(&shell, Role::Tutor);

        match shell.mount("/statistics") {
            ShellView::Framed {
                sidebar,
                content,
                path,
            } => {
                assert_eq!(content, PageContent::Page);
                assert_eq!(path, "/statistics");
                assert_eq!(sidebar.active().map(|link| link.label), Some("Statistics"));
            }
            other => panic!("expected framed view, got {other:?}"),
        }
    }

    #[test]
    fn logout_redirects_and_later_renders_stay_out() {
        let (mut shell, recorder) = shell();
        seed(&shell, Role::Tutor);
        assert!(matches!(shell.mount("/"), ShellView::Framed { .. }));

        assert_eq!(
            shell.logout(),
            ShellView::Redirect {
                to: "/login".to_string()
            }
        );
        assert_eq!(shell.state(), GuardState::Unauthenticated);
        assert_eq!(shell.client().store().read(), None);
        assert!(matches!(shell.render("/tasks"), ShellView::Redirect { .. }));
        assert_eq!(recorder.visited(), vec!["/login", "/login"]);
    }

    #[test]
    fn logout_through_client_is_picked_up_on_next_render() {
        let (mut shell, _) = shell();
        seed(&shell, Role::Student);
        shell.mount("/");

        shell.client().logout();
        assert!(matches!(shell.render("/"), ShellView::Redirect { .. }));
        assert_eq!(shell.state(), GuardState::Unauthenticated);
    }
}
