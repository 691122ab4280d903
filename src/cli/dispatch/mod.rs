use crate::{
    auth::Role,
    cli::actions::{
        auth::{LoginArgs, SignupArgs},
        open::{EndpointArgs, OpenArgs},
        Action,
    },
};
use anyhow::{anyhow, Context, Result};
use secrecy::SecretString;

fn required(matches: &clap::ArgMatches, name: &str) -> Result<String> {
    matches
        .get_one::<String>(name)
        .cloned()
        .ok_or_else(|| anyhow!("missing required argument: --{name}"))
}

fn password(matches: &clap::ArgMatches) -> Result<SecretString> {
    required(matches, "password").map(SecretString::from)
}

pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let (name, sub_m) = matches.subcommand().context("missing subcommand")?;

    match name {
        "signup" => {
            let role = required(sub_m, "role")?;
            Ok(Action::Signup(SignupArgs {
                name: required(sub_m, "name")?,
                email: required(sub_m, "email")?,
                password: password(sub_m)?,
                role: role.parse::<Role>().map_err(|e| anyhow!(e))?,
                login: sub_m.get_flag("login"),
            }))
        }
        "login" => Ok(Action::Login(LoginArgs {
            email: required(sub_m, "email")?,
            password: password(sub_m)?,
        })),
        "logout" => Ok(Action::Logout),
        "whoami" => Ok(Action::Whoami),
        "open" => Ok(Action::Open(OpenArgs {
            path: sub_m
                .get_one::<String>("path")
                .cloned()
                .unwrap_or_else(|| "/".to_string()),
        })),
        "endpoints" => Ok(Action::Endpoints(EndpointArgs {
            year: sub_m.get_one::<i32>("year").copied(),
            month: sub_m.get_one::<u32>("month").copied(),
            from: sub_m.get_one::<String>("from").cloned(),
        })),
        other => Err(anyhow!("unknown subcommand: {other}")),
    }
}
