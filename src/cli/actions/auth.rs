use crate::{
    auth::{types::Identity, AuthClient, FileStorage, Role},
    cli::actions::open::{print_view, printing_navigator},
    config::AppConfig,
    navigation::LOGIN_ROUTE,
    shell::ProtectedShell,
};
use anyhow::Result;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

#[derive(Debug)]
pub struct SignupArgs {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub role: Role,
    pub login: bool,
}

#[derive(Debug)]
pub struct LoginArgs {
    pub email: String,
    pub password: SecretString,
}

fn client(config: &AppConfig) -> Result<Arc<AuthClient<FileStorage>>> {
    Ok(Arc::new(AuthClient::from_config(config)?))
}

fn describe(identity: &Identity) -> String {
    format!(
        "{} <{}> ({}, id {})",
        identity.name, identity.email, identity.role, identity.id
    )
}

/// Registers the account, then optionally signs in with the same credentials.
pub async fn signup(args: SignupArgs, config: &AppConfig) -> Result<()> {
    let client = client(config)?;
    let login_password = SecretString::from(args.password.expose_secret().to_owned());

    let account = client
        .signup(&args.name, &args.email, args.password, args.role)
        .await?;
    println!(
        "{}",
        account.message.as_deref().unwrap_or("Account created")
    );

    if args.login {
        login(
            LoginArgs {
                email: args.email,
                password: login_password,
            },
            config,
        )
        .await?;
    }

    Ok(())
}

pub async fn login(args: LoginArgs, config: &AppConfig) -> Result<()> {
    let mut shell = ProtectedShell::new(client(config)?, printing_navigator());
    shell.mount(LOGIN_ROUTE);

    let identity = shell.login(&args.email, args.password).await?;
    println!("Signed in as {}", describe(&identity));

    let path = shell.pathname().to_string();
    print_view(&shell.render(&path));
    Ok(())
}

pub fn logout(config: &AppConfig) -> Result<()> {
    let mut shell = ProtectedShell::new(client(config)?, printing_navigator());
    shell.mount(LOGIN_ROUTE);
    shell.logout();
    println!("Signed out");
    Ok(())
}

pub fn whoami(config: &AppConfig) -> Result<()> {
    match client(config)?.bootstrap() {
        Some(identity) => println!("{}", describe(&identity)),
        None => println!("Not signed in"),
    }
    Ok(())
}
