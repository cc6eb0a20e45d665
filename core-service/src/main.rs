//! FitRep - replay recorded pose streams through the rep counter

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};

use fitrep_core::constants;
use fitrep_core::logic::cloud::{CloudClient, CloudConfig};
use fitrep_core::logic::exercise;
use fitrep_core::logic::session::{ExerciseSession, ReplayCapture, SessionRunner};
use fitrep_core::logic::storage::{JsonlRecordStore, RecordStore};
use fitrep_core::{ExerciseKind, ExerciseRecord, TrackerConfig};

#[derive(Parser, Debug)]
#[command(name = "fitrep", version, about = "Pose-based exercise rep counter")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a JSON-lines pose recording as an exercise session
    Replay(ReplayArgs),
    /// Show saved sessions for a user
    History {
        #[arg(long)]
        user: String,
        #[arg(long, default_value_t = constants::DEFAULT_HISTORY_LIMIT)]
        limit: usize,
        /// Record file (defaults to the user data directory)
        #[arg(long, value_name = "PATH")]
        store: Option<PathBuf>,
    },
    /// List supported exercises
    Exercises,
}

#[derive(Args, Debug)]
struct ReplayArgs {
    #[arg(value_name = "FILE")]
    file: PathBuf,
    #[arg(long, short)]
    exercise: ExerciseKind,
    #[arg(long)]
    user: String,
    /// Record file (defaults to the user data directory)
    #[arg(long, value_name = "PATH")]
    store: Option<PathBuf>,
    /// Do not persist the finished session locally
    #[arg(long)]
    no_save: bool,
    /// Upload the finished session to the cloud server
    #[arg(long, requires = "token")]
    upload: bool,
    /// Bearer token for the cloud server
    #[arg(long)]
    token: Option<String>,
    /// Stricter debounce (higher confidence, longer interval)
    #[arg(long, conflicts_with = "lenient")]
    strict: bool,
    /// Looser debounce for fast movers
    #[arg(long)]
    lenient: bool,
    /// Print every frame's stats
    #[arg(long)]
    verbose_frames: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Replay(args) => replay(args).await,
        Command::History { user, limit, store } => history(&user, limit, store),
        Command::Exercises => {
            for def in exercise::all() {
                println!("{:<8} {:<10} {}", def.kind, def.name, def.description);
            }
            Ok(())
        }
    }
}

fn open_store(path: Option<PathBuf>) -> JsonlRecordStore {
    match path {
        Some(path) => JsonlRecordStore::from_path(path),
        None => JsonlRecordStore::new(),
    }
}

fn save_locally(store: &JsonlRecordStore, record: &ExerciseRecord) -> Result<()> {
    store
        .save(record)
        .with_context(|| format!("Failed to save session to {}", store.path().display()))
}

fn tracker_config(args: &ReplayArgs) -> TrackerConfig {
    if args.strict {
        TrackerConfig::strict()
    } else if args.lenient {
        TrackerConfig::lenient()
    } else {
        TrackerConfig::from_env()
    }
}

async fn replay(args: ReplayArgs) -> Result<()> {
    log::info!("Starting {} v{}", constants::APP_NAME, constants::APP_VERSION);

    let config = tracker_config(&args);
    let device = ReplayCapture::new(args.file.clone());
    let session = ExerciseSession::start(args.user.clone(), args.exercise, config, device)
        .with_context(|| format!("Failed to start session from {}", args.file.display()))?;

    let runner = SessionRunner::new();
    let stop = runner.stop_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::info!("Interrupt received, finishing session");
            stop.stop();
        }
    });

    let verbose = args.verbose_frames;
    let record = tokio::task::spawn_blocking(move || {
        let mut last_reps = 0;
        runner.run(session, |stats| {
            if verbose {
                println!(
                    "reps={} accuracy={}% score={} state={} | {}",
                    stats.rep_count,
                    stats.accuracy,
                    stats.score,
                    stats.state.map(|s| s.as_str()).unwrap_or("-"),
                    stats.feedback
                );
            } else if stats.rep_count != last_reps {
                println!("rep {} ({}% form)", stats.rep_count, stats.accuracy);
            }
            last_reps = stats.rep_count;
        })
    })
    .await
    .context("Session task panicked")??;

    println!("{}", record.summary());

    if !args.no_save {
        let store = open_store(args.store.clone());
        save_locally(&store, &record)?;
        println!("Saved to {}", store.path().display());
    }

    if args.upload {
        let Some(token) = args.token.as_deref() else {
            bail!("--upload requires --token");
        };
        let client = CloudClient::new(CloudConfig::default())?;
        match client.upload_record(&record, token).await {
            Ok(remote) => println!("Uploaded as {}", remote.id),
            Err(e) => {
                log::error!("Upload to {} failed: {}", client.server_url(), e);
                return Err(e).context("Failed to upload session");
            }
        }
    }

    Ok(())
}

fn history(user: &str, limit: usize, store: Option<PathBuf>) -> Result<()> {
    let store = open_store(store);
    let records = store
        .recent(user, limit)
        .with_context(|| format!("Failed to read {}", store.path().display()))?;

    if records.is_empty() {
        println!("No sessions recorded for {}", user);
        return Ok(());
    }
    for record in records {
        println!("{}  {}", record.recorded_at.format("%Y-%m-%d %H:%M"), record.summary());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn record() -> ExerciseRecord {
        ExerciseRecord {
            id: Uuid::new_v4(),
            user_id: "alice".to_string(),
            exercise_type: ExerciseKind::Pushup,
            reps: 3,
            accuracy: 85,
            score: 27,
            duration_secs: 40,
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn test_save_failure_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened for appending
        let store = JsonlRecordStore::from_path(dir.path().to_path_buf());

        let err = save_locally(&store, &record()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to save session to"));
    }

    #[test]
    fn test_save_writes_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlRecordStore::from_path(dir.path().join("records.jsonl"));

        save_locally(&store, &record()).unwrap();
        assert_eq!(store.recent("alice", 5).unwrap().len(), 1);
    }
}
