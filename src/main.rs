//! Shopdeck - a terminal client for storefront administration.
//!
//! Provides a command loop over the admin backend: sign in, move between
//! screens, and view the dashboard, product, and order summaries. Every
//! navigation runs through the route guard, so protected screens are only
//! rendered with a verified session.

mod api;
mod app;
mod auth;
mod config;
mod guard;
mod models;
mod routes;

use std::io::{self, Write};

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use app::App;
use routes::Route;

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();
    info!("Shopdeck starting");

    let mut app = App::new()?;

    // Credentials from the environment sign in before the first prompt
    if let (Ok(identifier), Ok(secret)) = (
        std::env::var("SHOPDECK_IDENTIFIER"),
        std::env::var("SHOPDECK_SECRET"),
    ) {
        if app.attempt_login(&identifier, &secret).await {
            let landing = app.guard.landing_after_login();
            app.goto(landing.path()).await?;
        } else if let Some(ref message) = app.login_error {
            eprintln!("{}", message);
        }
    }

    let result = run(&mut app).await;

    info!("Shopdeck shutting down");
    result
}

async fn run(app: &mut App) -> Result<()> {
    println!("shopdeck - type `help` for commands");

    loop {
        // Prompt shows the current screen, if one is rendered
        let location = app.current_route.map(|r| r.path()).unwrap_or("");
        print!("shopdeck{}> ", location);
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            // EOF
            return Ok(());
        }
        let line = line.trim();
        let (command, arg) = match line.split_once(' ') {
            Some((c, a)) => (c, a.trim()),
            None => (line, ""),
        };

        match command {
            "" => {}
            "go" => {
                if arg.is_empty() {
                    println!("Usage: go <path> (e.g. go /dashboard)");
                } else {
                    app.goto(arg).await?;
                }
            }
            "login" => {
                if let Err(e) = app.login_interactive().await {
                    eprintln!("Login aborted: {}", e);
                }
            }
            "logout" => app.logout().await,
            "whoami" => app.whoami(),
            "routes" => print_routes(),
            "help" => print_help(),
            "quit" | "exit" => return Ok(()),
            other => println!("Unknown command: {} (try `help`)", other),
        }

        if let Some(message) = app.status_message.take() {
            println!("{}", message);
        }
    }
}

fn print_routes() {
    for route in Route::ALL {
        let lock = if route.requires_auth() { "*" } else { " " };
        println!("{} {:<16} {}", lock, route.path(), route.title());
    }
    println!("(* requires sign-in)");
}

fn print_help() {
    println!("go <path>   navigate to a screen (see `routes`)");
    println!("login       sign in to the backend");
    println!("logout      sign out and clear the session");
    println!("whoami      show the signed-in user");
    println!("routes      list available screens");
    println!("quit        exit");
}
