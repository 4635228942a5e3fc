use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use frontdesk_core::{
    client_config_from_env_values, compute_wait_estimate, format_arrival_time, format_wait,
    ClientConfig, Confirm, DoctorId, EntryId, HttpBackend, Priority, QueueController, QueueEntry,
    QueueNumber, QueueStatus, StatusFilter, API_TIMEOUT_ENV, API_URL_ENV,
};

#[derive(Parser)]
#[command(name = "frontdesk")]
#[command(about = "Clinic front-desk walk-in queue")]
struct Cli {
    /// Backend base URL (overrides CLINIC_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the queue
    List {
        /// all, waiting, with_doctor or completed
        #[arg(long, default_value = "all")]
        filter: StatusFilter,
        /// Match patient name, status or doctor name
        #[arg(long)]
        search: Option<String>,
    },
    /// List the doctor roster
    Doctors,
    /// Print the suggested number for the next walk-in
    NextNumber,
    /// Add a patient to the queue
    Add {
        /// Patient name
        #[arg(long)]
        name: String,
        /// Doctor ID
        #[arg(long)]
        doctor: DoctorId,
        /// Queue number (defaults to the next free number)
        #[arg(long)]
        number: Option<QueueNumber>,
        #[arg(long, default_value = "waiting")]
        status: QueueStatus,
        #[arg(long, default_value = "normal")]
        priority: Priority,
    },
    /// Edit a queue entry
    Edit {
        /// Queue entry ID
        id: EntryId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        number: Option<QueueNumber>,
        #[arg(long)]
        doctor: Option<DoctorId>,
        #[arg(long)]
        status: Option<QueueStatus>,
        #[arg(long)]
        priority: Option<Priority>,
    },
    /// Change the status of a queue entry
    Status {
        /// Queue entry ID
        id: EntryId,
        /// waiting, with_doctor or completed
        status: QueueStatus,
    },
    /// Remove a patient from the queue
    Delete {
        /// Queue entry ID
        id: EntryId,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Asks on stdin; anything starting with `y` is a yes.
struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        if std::io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match std::io::stdin().lock().read_line(&mut answer) {
            Ok(_) => answer.trim_start().to_ascii_lowercase().starts_with('y'),
            Err(_) => false,
        }
    }
}

fn resolve_config(api_url: Option<String>) -> anyhow::Result<ClientConfig> {
    let api_url = api_url.or_else(|| std::env::var(API_URL_ENV).ok());
    let timeout = std::env::var(API_TIMEOUT_ENV).ok();
    Ok(client_config_from_env_values(api_url, timeout)?)
}

fn print_entry(entry: &QueueEntry) {
    let now = Utc::now();
    let priority = match entry.priority {
        Priority::Urgent => " [Urgent]",
        Priority::Normal => "",
    };
    println!(
        "#{:<3} {}{} | {} | Arrival: {} | Est. Wait: {} | Doctor: {} (id {})",
        entry.queue_number,
        entry.patient_name,
        priority,
        entry.status.label(),
        format_arrival_time(entry.created_at),
        format_wait(compute_wait_estimate(entry.created_at, now)),
        entry.doctor_name(),
        entry.id,
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Target prefix: covers the `frontdesk` binary and `frontdesk_core`.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("frontdesk=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use 'frontdesk --help' for commands");
        return Ok(());
    };

    let cfg = resolve_config(cli.api_url)?;
    tracing::info!("using backend at {}", cfg.api_base_url());
    let backend = HttpBackend::new(&cfg)?;
    let mut controller = QueueController::new(backend);

    match command {
        Commands::List { filter, search } => {
            controller.load_queue().await?;
            controller.set_filter(filter);
            controller.set_search(search.unwrap_or_default());
            let visible = controller.visible_entries();
            if visible.is_empty() {
                println!("No patients in queue.");
            }
            for entry in visible {
                print_entry(entry);
            }
        }
        Commands::Doctors => {
            controller.load_doctors().await?;
            if controller.doctors().is_empty() {
                println!("No doctors found.");
            }
            for doctor in controller.doctors() {
                println!("ID: {}, Name: {}", doctor.id, doctor.name);
            }
        }
        Commands::NextNumber => {
            controller.load_queue().await?;
            println!("{}", controller.next_queue_number());
        }
        Commands::Add {
            name,
            doctor,
            number,
            status,
            priority,
        } => {
            controller.load_queue().await?;
            let draft = controller.open_add_form();
            draft.patient_name = name;
            draft.doctor_id = Some(doctor);
            if let Some(number) = number {
                draft.queue_number = Some(number.get());
            }
            draft.status = status;
            draft.priority = priority;
            controller.save_form().await?;
            println!("Added to queue.");
        }
        Commands::Edit {
            id,
            name,
            number,
            doctor,
            status,
            priority,
        } => {
            controller.load_queue().await?;
            let draft = controller.open_edit_form_by_id(id)?;
            if let Some(name) = name {
                draft.patient_name = name;
            }
            if let Some(number) = number {
                draft.queue_number = Some(number.get());
            }
            if doctor.is_some() {
                draft.doctor_id = doctor;
            }
            if let Some(status) = status {
                draft.status = status;
            }
            if let Some(priority) = priority {
                draft.priority = priority;
            }
            controller
                .save_form()
                .await
                .with_context(|| format!("could not save queue entry {id}"))?;
            println!("Updated queue entry {id}.");
        }
        Commands::Status { id, status } => {
            controller.update_status(id, status).await?;
            println!("Queue entry {id} is now {}.", status.label());
        }
        Commands::Delete { id, yes } => {
            let deleted = if yes {
                controller.delete_entry(id, &|_: &str| true).await?
            } else {
                controller.delete_entry(id, &StdinConfirm).await?
            };
            if deleted {
                println!("Removed queue entry {id}.");
            } else {
                println!("Cancelled.");
            }
        }
    }

    Ok(())
}
