use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use parent_planner::api::{self, ApiKey, AppState};
use parent_planner::catalog::Catalog;
use parent_planner::config::PlannerConfig;
use parent_planner::db::Database;
use parent_planner::engine::ChecklistGenerator;
use parent_planner::models::{DeadlineNotification, UserSituation};
use parent_planner::notify::{NotificationScheduler, TracingNotifier};
use parent_planner::progress::{
    create_progress_data, progress_to_set, LoadOptions, LocalWrite, ProgressStore, RemoteSync,
    SaveOptions, SyncOutcome,
};
use parent_planner::sync::RemoteProgressClient;

#[derive(Parser)]
#[command(name = "planner")]
#[command(about = "Personalized planning checklists for new parents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve checklist generation and the progress service over HTTP
    Serve {
        #[arg(short, long, default_value = "17020")]
        port: u16,
    },
    /// Generate a checklist from a situation JSON file
    Generate {
        /// Path to a UserSituation JSON file
        situation: PathBuf,
    },
    /// Inspect or change checklist progress
    Progress {
        #[command(subcommand)]
        command: ProgressCommand,
    },
    /// Arm deadline reminders from a JSON list and wait for them
    Remind {
        /// Path to a JSON array of deadline notifications
        deadlines: PathBuf,
    },
}

#[derive(clap::Args)]
struct Identity {
    /// Sync with the remote service using this email
    #[arg(long)]
    email: Option<String>,
    /// Sync with the remote service using this user id
    #[arg(long)]
    user_id: Option<String>,
}

#[derive(Subcommand)]
enum ProgressCommand {
    /// Start tracking a new checklist generated from a situation file
    New {
        situation: PathBuf,
        #[command(flatten)]
        identity: Identity,
    },
    /// Print stored progress
    Show {
        checklist_id: String,
        /// Prefer the remote copy
        #[arg(long)]
        remote: bool,
        #[command(flatten)]
        identity: Identity,
    },
    /// Mark an item done, or undone if it already is
    Toggle {
        checklist_id: String,
        item_id: String,
        /// Number of items in the checklist (defaults to the stored total)
        #[arg(long)]
        total: Option<usize>,
        #[command(flatten)]
        identity: Identity,
    },
    /// Delete the local copy
    Clear { checklist_id: String },
}

/// Initialize tracing to stderr so stdout stays clean for JSON output
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "parent_planner=debug,planner=info,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_catalog(config: &PlannerConfig) -> anyhow::Result<Arc<Catalog>> {
    let catalog = match &config.catalog_path {
        Some(path) => Catalog::load(path)?,
        None => Catalog::seeded(),
    };
    Ok(Arc::new(catalog))
}

fn open_database(config: &PlannerConfig) -> anyhow::Result<Database> {
    let db = match &config.db_path {
        Some(path) => Database::open(path.clone())?,
        None => Database::open_default()?,
    };
    db.migrate()?;
    Ok(db)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn progress_store(config: &PlannerConfig, db: Database) -> ProgressStore {
    let store = ProgressStore::new(Arc::new(db));
    match &config.remote_url {
        Some(url) => store.with_remote(Arc::new(RemoteProgressClient::new(
            url.clone(),
            config.api_key.clone(),
        ))),
        None => store,
    }
}

fn save_options(identity: Identity) -> SaveOptions {
    if identity.email.is_some() || identity.user_id.is_some() {
        SaveOptions::synced(identity.email, identity.user_id)
    } else {
        SaveOptions::local_only()
    }
}

async fn report_save(receipt: parent_planner::progress::SaveReceipt) {
    if let LocalWrite::Failed(e) = &receipt.local {
        eprintln!("Warning: progress was not saved locally: {}", e);
    }
    if matches!(receipt.remote, RemoteSync::Pending(_)) {
        if let SyncOutcome::Failed(e) = receipt.sync_outcome().await {
            eprintln!("Warning: remote sync failed: {}", e);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = PlannerConfig::load();

    match cli.command {
        Commands::Serve { port } => {
            let db = open_database(&config)?;
            let catalog = load_catalog(&config)?;
            let app = api::create_router(
                AppState::new(db, catalog),
                ApiKey(config.api_key.clone()),
            );

            let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
            tracing::info!("Planner server listening on http://127.0.0.1:{}", port);

            axum::serve(listener, app).await?;
        }
        Commands::Generate { situation } => {
            let situation: UserSituation = read_json(&situation)?;
            let generator = ChecklistGenerator::new(load_catalog(&config)?);
            let checklist = generator.generate(&situation);
            println!("{}", serde_json::to_string_pretty(&checklist)?);
        }
        Commands::Progress { command } => {
            let store = progress_store(&config, open_database(&config)?);
            match command {
                ProgressCommand::New {
                    situation,
                    identity,
                } => {
                    let situation: UserSituation = read_json(&situation)?;
                    let generator = ChecklistGenerator::new(load_catalog(&config)?);
                    let checklist = generator.generate(&situation);
                    let checklist_id = Uuid::new_v4().to_string();
                    let progress = create_progress_data(
                        &checklist_id,
                        &Default::default(),
                        checklist.priority_items.len(),
                    );
                    report_save(store.save_progress(&progress, &save_options(identity))).await;
                    println!("{}", checklist_id);
                }
                ProgressCommand::Show {
                    checklist_id,
                    remote,
                    identity,
                } => {
                    let opts = LoadOptions {
                        load_remote: remote,
                        email: identity.email,
                        user_id: identity.user_id,
                    };
                    let loaded = store.load_progress(&checklist_id, &opts).await;
                    tracing::debug!(source = ?loaded.source, "Progress loaded");
                    match loaded.progress {
                        Some(progress) => println!("{}", serde_json::to_string_pretty(&progress)?),
                        None => anyhow::bail!("No progress stored for {}", checklist_id),
                    }
                }
                ProgressCommand::Toggle {
                    checklist_id,
                    item_id,
                    total,
                    identity,
                } => {
                    let existing = store
                        .load_progress(&checklist_id, &LoadOptions::local_only())
                        .await
                        .progress;
                    let mut completed = existing.as_ref().map(progress_to_set).unwrap_or_default();
                    let total = total
                        .or_else(|| existing.as_ref().map(|p| p.progress_data.total_items))
                        .context("--total is required for a checklist without stored progress")?;

                    if !completed.remove(&item_id) {
                        completed.insert(item_id);
                    }

                    let progress = create_progress_data(&checklist_id, &completed, total);
                    report_save(store.save_progress(&progress, &save_options(identity))).await;
                    println!(
                        "{}% complete ({}/{})",
                        progress.progress_data.completion_percentage,
                        progress.progress_data.completed_count,
                        progress.progress_data.total_items
                    );
                }
                ProgressCommand::Clear { checklist_id } => {
                    if !store.clear_progress(&checklist_id) {
                        anyhow::bail!("Failed to clear progress for {}", checklist_id);
                    }
                }
            }
        }
        Commands::Remind { deadlines } => {
            let deadlines: Vec<DeadlineNotification> = read_json(&deadlines)?;
            let scheduler = NotificationScheduler::new(Arc::new(TracingNotifier));
            let armed =
                scheduler.restore_deadline_notifications(&deadlines, config.icon_url.as_deref());
            if armed == 0 {
                println!("No upcoming reminders");
                return Ok(());
            }

            for reminder in scheduler.pending_reminders() {
                println!("{}  {}", reminder.fire_at.format("%Y-%m-%d %H:%M"), reminder.key);
            }

            loop {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {
                        tracing::info!("Interrupted, cancelling {} reminders", scheduler.pending_count());
                        scheduler.cancel_all_deadline_notifications();
                        break;
                    }
                    _ = tokio::time::sleep(Duration::from_secs(60)) => {
                        if scheduler.pending_count() == 0 {
                            break;
                        }
                    }
                }
            }
        }
    }

    Ok(())
}
