use chrono::Local;
use clap::{Parser, Subcommand};
use mess_menu::api::{self, AppState, MealQuery, MealReply, resolve_meal};
use mess_menu::{config, parse_schedule, source};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "mess-menu", version, about = "Weekly mess menu parsed from the PDF")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the parsed menu over HTTP.
    Serve,
    /// Parse a menu PDF or text file and print the schedule as JSON.
    Parse {
        /// Menu file to parse.
        file: PathBuf,
    },
    /// Print the non-empty lines of text extracted from a menu file.
    Text {
        /// Menu file to read.
        file: PathBuf,
    },
    /// Print the meal card for today, or for `offset` days from today.
    Show {
        #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match cli.command {
        Commands::Serve => {
            let cfg = config::load(&cli.config)?;
            // PDF extraction is CPU-bound; keep it off the async workers.
            let menu = cfg.menu.clone();
            let state = tokio::task::spawn_blocking(move || AppState::load(&menu)).await??;

            let app = api::router(Arc::new(state));
            let listener = tokio::net::TcpListener::bind(&cfg.server.bind).await?;
            info!("listening on http://{}", cfg.server.bind);
            axum::serve(listener, app).await?;
        }
        Commands::Parse { file } => {
            let text = source::load_menu_text(&file)?;
            let schedule = parse_schedule(&text);
            if schedule.is_empty() {
                anyhow::bail!("no week sections found in {}", file.display());
            }
            println!("{}", serde_json::to_string_pretty(&schedule)?);
        }
        Commands::Text { file } => {
            let text = source::load_menu_text(&file)?;
            for (i, line) in text.lines().enumerate() {
                if !line.trim().is_empty() {
                    println!("{i}: {line:?}");
                }
            }
        }
        Commands::Show { offset } => {
            let cfg = config::load(&cli.config)?;
            let state = AppState::load(&cfg.menu)?;
            let query = MealQuery {
                offset: Some(offset),
                ..MealQuery::default()
            };
            match resolve_meal(&state, &query, Local::now().naive_local()) {
                Ok(MealReply::Card(card)) => {
                    println!("Week {} - {} {}", card.week, card.day, card.date);
                    for meal in &card.meals {
                        let badge = if meal.now_serving { "  [NOW SERVING]" } else { "" };
                        println!("\n{} ({}){badge}", meal.period, meal.hours);
                        println!("  {}", meal.items);
                    }
                }
                Ok(MealReply::Single(meal)) => println!("{}: {}", meal.period, meal.meal),
                Err(err) => anyhow::bail!("{err}"),
            }
        }
    }

    Ok(())
}
