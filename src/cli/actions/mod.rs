pub mod auth;
pub mod open;

// Internal "interpreter" for `Action`.
mod run;

use crate::cli::globals::GlobalArgs;

#[derive(Debug)]
pub enum Action {
    Signup(auth::SignupArgs),
    Login(auth::LoginArgs),
    Logout,
    Whoami,
    Open(open::OpenArgs),
    Endpoints(open::EndpointArgs),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self, globals: &GlobalArgs) -> anyhow::Result<()> {
        run::execute(self, globals).await
    }
}
