use crate::cli::{
    actions::{auth, open, Action},
    globals::GlobalArgs,
};
use anyhow::Result;

/// Execute the provided action.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action, globals: &GlobalArgs) -> Result<()> {
    let config = globals.config()?;

    match action {
        Action::Signup(args) => auth::signup(args, &config).await,
        Action::Login(args) => auth::login(args, &config).await,
        Action::Logout => auth::logout(&config),
        Action::Whoami => auth::whoami(&config),
        Action::Open(args) => open::open(&args, &config),
        Action::Endpoints(args) => open::endpoints(&args, &config),
    }
}
