//! vetreg command-line entry point.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite registry, and either serves the JSON API or runs one registry
//! operation and prints its confirmation.
//!
//! ```text
//! vetreg serve
//! vetreg init --seed
//! vetreg schedule-visit --pet-id 1 --vet-id 2 --clinic-id 1 --at 2026-03-20T10:00:00
//! vetreg reminders --days 30
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use vetreg_core::{
  id::{ClinicId, PetId, VetId},
  model::Gender,
  registry::ClinicRegistry,
  report::{self, AddVaccination, RegisterPet, ScheduleVisit, TransferPet},
};
use vetreg_server::{ServerConfig, expand_tilde};
use vetreg_store_sqlite::SqliteStore;

#[derive(Parser)]
#[command(author, version, about = "Veterinary clinic registry")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the JSON API.
  Serve,

  /// Create the database schema.
  Init {
    /// Also load the demonstration data if the database is empty.
    #[arg(long)]
    seed: bool,
  },

  /// Register a pet, creating the owner if the phone number is new.
  RegisterPet {
    #[arg(long)]
    owner_first_name: String,
    #[arg(long)]
    owner_last_name:  String,
    #[arg(long)]
    owner_phone:      String,
    #[arg(long)]
    name:             String,
    #[arg(long)]
    species:          String,
    #[arg(long)]
    breed:            Option<String>,
    /// YYYY-MM-DD.
    #[arg(long)]
    birth_date:       Option<NaiveDate>,
    /// `M` or `F`.
    #[arg(long)]
    gender:           Gender,
    #[arg(long)]
    chip_number:      Option<String>,
  },

  /// Book a visit unless the veterinarian is already taken.
  ScheduleVisit {
    #[arg(long)]
    pet_id:    i64,
    #[arg(long)]
    vet_id:    i64,
    #[arg(long)]
    clinic_id: i64,
    /// YYYY-MM-DDTHH:MM:SS.
    #[arg(long)]
    at:        NaiveDateTime,
    #[arg(long)]
    reason:    Option<String>,
  },

  /// Completed-visit revenue of a clinic over an inclusive date range.
  Revenue {
    #[arg(long)]
    clinic_id: i64,
    #[arg(long)]
    from:      NaiveDate,
    #[arg(long)]
    to:        NaiveDate,
  },

  /// Vaccinations falling due in the next N days.
  Reminders {
    #[arg(long, default_value_t = 30)]
    days: u32,
  },

  /// Move a pet to another owner, creating the owner if needed.
  TransferPet {
    #[arg(long)]
    pet_id:     i64,
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name:  String,
    #[arg(long)]
    phone:      String,
  },

  /// Record a vaccination given today.
  AddVaccination {
    #[arg(long)]
    pet_id:       i64,
    #[arg(long)]
    vet_id:       i64,
    #[arg(long)]
    clinic_id:    i64,
    #[arg(long)]
    vaccine_name: String,
    #[arg(long)]
    batch_number: Option<String>,
  },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();

  // One-shot commands print their own confirmation, so keep the log quiet.
  let default_level = match cli.command {
    Command::Serve => LevelFilter::INFO,
    _ => LevelFilter::WARN,
  };
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy(),
    )
    .init();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("VETREG"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let store = open_store(&server_cfg).await?;

  match cli.command {
    Command::Serve => {
      if server_cfg.seed_demo_data {
        store.seed_demo_data().await.context("failed to seed demo data")?;
      }
      serve(store, &server_cfg).await?;
    }
    Command::Init { seed } => {
      if seed || server_cfg.seed_demo_data {
        let seeded = store
          .seed_demo_data()
          .await
          .context("failed to seed demo data")?;
        if seeded {
          println!("Database initialised with demo data");
        } else {
          println!("Database already contains data; demo data skipped");
        }
      } else {
        println!("Database initialised");
      }
    }
    Command::RegisterPet {
      owner_first_name,
      owner_last_name,
      owner_phone,
      name,
      species,
      breed,
      birth_date,
      gender,
      chip_number,
    } => {
      let registration = store
        .register_pet(RegisterPet {
          owner_first_name,
          owner_last_name,
          owner_phone,
          name,
          species,
          breed,
          birth_date,
          gender,
          chip_number,
        })
        .await
        .context("failed to register pet")?;
      println!("{registration}");
    }
    Command::ScheduleVisit { pet_id, vet_id, clinic_id, at, reason } => {
      let visit = store
        .schedule_visit(ScheduleVisit {
          pet_id: PetId(pet_id),
          vet_id: VetId(vet_id),
          clinic_id: ClinicId(clinic_id),
          visit_date: at,
          reason,
        })
        .await
        .context("failed to schedule visit")?;
      println!("{}", report::visit_scheduled(&visit));
    }
    Command::Revenue { clinic_id, from, to } => {
      let summary = store
        .clinic_revenue(ClinicId(clinic_id), from, to)
        .await
        .context("failed to compute revenue")?;
      println!("{summary}");
    }
    Command::Reminders { days } => {
      let reminders = store
        .vaccination_reminders(days)
        .await
        .context("failed to list reminders")?;
      if reminders.is_empty() {
        println!("No vaccinations due in the next {days} days");
      }
      for reminder in reminders {
        println!("{reminder}");
      }
    }
    Command::TransferPet { pet_id, first_name, last_name, phone } => {
      let transfer = store
        .transfer_pet(TransferPet {
          pet_id:               PetId(pet_id),
          new_owner_first_name: first_name,
          new_owner_last_name:  last_name,
          new_owner_phone:      phone,
        })
        .await
        .context("failed to transfer pet")?;
      println!("{transfer}");
    }
    Command::AddVaccination {
      pet_id,
      vet_id,
      clinic_id,
      vaccine_name,
      batch_number,
    } => {
      let vaccination = store
        .add_vaccination(AddVaccination {
          pet_id: PetId(pet_id),
          vet_id: VetId(vet_id),
          clinic_id: ClinicId(clinic_id),
          vaccine_name,
          batch_number,
        })
        .await
        .context("failed to add vaccination")?;
      println!("{}", report::vaccination_added(&vaccination));
    }
  }

  Ok(())
}

/// Open the SQLite store named in `cfg`, creating its directory if needed.
async fn open_store(cfg: &ServerConfig) -> anyhow::Result<SqliteStore> {
  let path = expand_tilde(&cfg.database_path);
  if let Some(parent) = path.parent()
    && !parent.as_os_str().is_empty()
  {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {parent:?}"))?;
  }

  SqliteStore::open(&path)
    .await
    .with_context(|| format!("failed to open store at {path:?}"))
}

async fn serve(store: SqliteStore, cfg: &ServerConfig) -> anyhow::Result<()> {
  let app = vetreg_server::router(Arc::new(store));
  let address = cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
