use crate::{
    api::build_url_with_base,
    auth::AuthClient,
    config::AppConfig,
    navigation::Navigator,
    shell::{PageContent, ProtectedShell, RoleEndpoints, ShellView, StatisticsFilter},
};
use anyhow::{bail, Result};
use std::sync::Arc;

#[derive(Debug)]
pub struct OpenArgs {
    pub path: String,
}

#[derive(Debug, Default)]
pub struct EndpointArgs {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub from: Option<String>,
}

/// Navigator for the terminal: navigation requests are printed.
pub fn printing_navigator() -> Arc<dyn Navigator> {
    Arc::new(|path: &str| println!("-> {path}"))
}

pub fn print_view(view: &ShellView) {
    match view {
        ShellView::Loading => println!("Loading..."),
        ShellView::Public { path } => println!("{path} (public)"),
        ShellView::Redirect { to } => println!("Redirecting to {to}"),
        ShellView::Framed {
            sidebar,
            path,
            content,
        } => {
            println!("{sidebar}");
            println!();
            match content {
                PageContent::Page => println!("[{path}]"),
                PageContent::AccessDenied(message) => println!("[{path}] {message}"),
            }
        }
    }
}

pub fn open(args: &OpenArgs, config: &AppConfig) -> Result<()> {
    let client = Arc::new(AuthClient::from_config(config)?);
    let mut shell = ProtectedShell::new(client, printing_navigator());
    print_view(&shell.mount(&args.path));
    Ok(())
}

pub fn endpoints(args: &EndpointArgs, config: &AppConfig) -> Result<()> {
    let client = AuthClient::from_config(config)?;
    let Some(identity) = client.bootstrap() else {
        bail!("Not signed in");
    };

    let endpoints = RoleEndpoints::new(&identity);
    let base = &config.api_base_url;
    let show = |label: &str, path: &str| {
        println!("{label:<12} {}", build_url_with_base(base, path));
    };

    show("tasks", &endpoints.task_list());
    show("profile", &endpoints.profile());

    if let (Some(year), Some(month)) = (args.year, args.month) {
        if let Some(path) = endpoints.calendar_tasks(year, month) {
            show("calendar", &path);
        }
    }
    if let Some(from) = args.from.as_deref() {
        if let Some(path) = endpoints.calendar_upcoming(from) {
            show("upcoming", &path);
        }
    }

    if let Some(path) = endpoints.student_list() {
        show("students", &path);
    }
    for path in endpoints.reports().unwrap_or_default() {
        show("reports", &path);
    }
    for path in endpoints
        .statistics(&StatisticsFilter::default())
        .unwrap_or_default()
    {
        show("statistics", &path);
    }

    Ok(())
}
