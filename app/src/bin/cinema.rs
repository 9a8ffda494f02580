//! Cinema booking client
//!
//! Terminal front-end over the booking service. Each page is printed after
//! every change; typed commands drive it (`help` lists them).
//!
//! # Usage
//!
//! ```bash
//! # Point at the booking service and open the listing
//! CINEMA_API_URL=http://localhost:3000 cargo run --bin cinema
//!
//! # Start on a show's booking page
//! cargo run --bin cinema -- --start /booking/3
//! ```

use anyhow::Context;
use cinema_api::HttpCinemaApi;
use cinema_app::command::{self, Command};
use cinema_app::format::TimeDisplay;
use cinema_app::{AppAction, AppEnvironment, AppReducer, AppState, Cli, Config, telemetry, view};
use cinema_runtime::Store;
use clap::Parser;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

type AppStore = Store<AppState, AppAction, AppEnvironment, AppReducer>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = Config::from_env()?.with_cli(&cli);

    telemetry::init(&config.log).context("installing tracing subscriber")?;
    let api = HttpCinemaApi::new(&config.api).context("building HTTP client")?;
    tracing::info!(api = api.base_url(), "Configuration loaded");
    let environment = AppEnvironment::new(Arc::new(api))
        .with_confirmation_min_delay(config.confirmation_min_delay);
    let store = Store::new(AppState::default(), AppReducer::new(), environment);
    let time = TimeDisplay::new(config.display_offset);

    let mut updates = store.subscribe_actions();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut frame = String::new();

    store
        .send(AppAction::Open {
            path: cli.start.clone(),
        })
        .await?;
    redraw(&store, &time, &mut frame).await;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("reading stdin")? else {
                    break;
                };
                match store.state(|state| command::parse(&line, state)).await {
                    Ok(Command::Quit) => break,
                    Ok(Command::Nothing) => {},
                    Ok(Command::Help) => {
                        let page = store.state(|state| state.page.kind()).await;
                        println!("{}", command::help(page));
                    },
                    Ok(Command::Dispatch(actions)) => {
                        for action in actions {
                            store.send(action).await?;
                        }
                    },
                    Err(error) => println!("{error}"),
                }
                redraw(&store, &time, &mut frame).await;
            },
            update = updates.recv() => match update {
                Ok(_) => redraw(&store, &time, &mut frame).await,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Render loop lagged");
                    redraw(&store, &time, &mut frame).await;
                },
                Err(RecvError::Closed) => break,
            },
        }
    }

    tracing::info!("Bye");
    Ok(())
}

/// Print the mounted page if it changed since the last print
async fn redraw(store: &AppStore, time: &TimeDisplay, frame: &mut String) {
    let next = store.state(|state| view::render(state, time)).await;
    if next != *frame {
        println!("\n{next}");
        *frame = next;
    }
}
