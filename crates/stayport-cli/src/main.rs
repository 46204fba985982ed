//! Stayport CLI for merchant submission and administrator review workflows.
//!
//! Set STAYPORT_API_TOKEN and STAYPORT_API_URL. Form values are read from a
//! JSON document matching the form shape (see `HotelForm`).

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;

use stayport_api_client::ApiClient;
use stayport_cli::{init_tracing, truncate_reason};
use stayport_core::{AppError, ClientConfig, HotelForm, ReviewStatus};
use stayport_services::{
    merchant_hotel_rows, DraftStore, NavigationGuard, ReviewWorkflow, SubmissionOutcome,
    SubmissionPipeline,
};

#[derive(Parser)]
#[command(name = "stayport", about = "Hotel listing submission and review CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a hotel for review: create, or update with --hotel
    Submit {
        /// Path to a JSON file with the form values; omit to resume the
        /// saved draft
        form: Option<PathBuf>,
        /// Update this existing hotel instead of creating a new one
        #[arg(long)]
        hotel: Option<String>,
    },
    /// Local draft operations
    Draft {
        #[command(subcommand)]
        sub: DraftCommands,
    },
    /// List your own hotels with review status
    List,
    /// Show one hotel record
    Get {
        /// Hotel id
        id: String,
    },
    /// Administrator review operations
    Review {
        #[command(subcommand)]
        sub: ReviewCommands,
    },
}

#[derive(Subcommand)]
enum DraftCommands {
    /// Save form values as the local draft (does not submit for review)
    Save {
        /// Path to a JSON file with the form values
        form: PathBuf,
    },
    /// Show the current draft if present and fresh
    Show,
    /// Delete the local draft
    Clear,
}

#[derive(Subcommand)]
enum ReviewCommands {
    /// List hotels for review
    List {
        #[arg(long, default_value = "1")]
        page: u32,
        /// pending | approved | rejected | offline | all
        #[arg(long, default_value = "all")]
        status: String,
        /// Case-insensitive match against name and address
        #[arg(long, default_value = "")]
        keyword: String,
    },
    /// Approve a hotel; it goes public
    Approve {
        id: String,
        #[arg(long)]
        remark: Option<String>,
    },
    /// Reject a hotel with a reason the merchant will see
    Reject {
        id: String,
        #[arg(long)]
        reason: String,
    },
    /// Flip a hotel between approved and offline
    ToggleOffline {
        id: String,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

/// Every failure produces exactly one user-facing line: the server message
/// verbatim when there is one, otherwise a generic line per error class.
fn to_user_error(err: AppError) -> anyhow::Error {
    anyhow::anyhow!(err.user_message())
}

fn read_form(path: &PathBuf) -> anyhow::Result<HotelForm> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read form file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Form file {} is not valid form JSON", path.display()))
}

fn parse_status_filter(status: &str) -> anyhow::Result<Option<ReviewStatus>> {
    if status == "all" {
        return Ok(None);
    }
    match status.parse::<ReviewStatus>() {
        Ok(parsed) => Ok(Some(parsed)),
        Err(_) => anyhow::bail!(
            "Status must be one of: pending, approved, rejected, offline, all"
        ),
    }
}

/// Compact review-list row for terminal output.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReviewRow {
    id: Option<String>,
    name: Option<String>,
    city: Option<String>,
    status: ReviewStatus,
    opened_at: Option<String>,
    reject_reason: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = ClientConfig::from_env();
    let drafts = DraftStore::from_config(&config);

    match cli.command {
        Commands::Submit { form, hotel } => {
            let client = ApiClient::new(&config)
                .context("Failed to create API client. Set STAYPORT_API_TOKEN")?;

            let form_values = match (&form, &hotel) {
                (Some(path), _) => read_form(path)?,
                // a new submission without a form file resumes the draft
                (None, None) => drafts
                    .load()
                    .await
                    .context("No form file given and no usable draft found")?,
                (None, Some(_)) => {
                    anyhow::bail!("Updating an existing hotel needs a form file")
                }
            };

            // the "form" registers its dirty state; we consult it on the way out
            let submitted = Arc::new(AtomicBool::new(false));
            let mut guard = NavigationGuard::new();
            let submitted_flag = submitted.clone();
            guard.register(move || !submitted_flag.load(Ordering::SeqCst));

            let mut pipeline = SubmissionPipeline::new(client, drafts.clone());
            match pipeline.submit(&form_values, hotel.as_deref()).await {
                Ok(SubmissionOutcome::Created { id }) => {
                    submitted.store(true, Ordering::SeqCst);
                    println!(
                        "Submitted for review{}. Check \"stayport list\" for the review status.",
                        id.map(|id| format!(" (id {})", id)).unwrap_or_default()
                    );
                }
                Ok(SubmissionOutcome::Updated { id, form, .. }) => {
                    submitted.store(true, Ordering::SeqCst);
                    println!("Hotel {} updated and re-submitted for review.", id);
                    print_json(&form)?;
                }
                Err(err) => {
                    if !guard.can_leave() && form.is_some() && hotel.is_none() {
                        eprintln!(
                            "Nothing was submitted; run \"stayport draft save {}\" to keep your input.",
                            form.as_ref().map(|p| p.display().to_string()).unwrap_or_default()
                        );
                    }
                    return Err(to_user_error(err));
                }
            }
        }
        Commands::Draft { sub } => match sub {
            DraftCommands::Save { form } => {
                let form_values = read_form(&form)?;
                if drafts.save(&form_values).await {
                    println!("Draft saved locally; it will be restored on your next new submission. Nothing was submitted for review.");
                } else {
                    println!("Draft could not be saved; your form file is untouched.");
                }
            }
            DraftCommands::Show => match drafts.load().await {
                Some(form_values) => print_json(&form_values)?,
                None => println!("No draft available."),
            },
            DraftCommands::Clear => {
                drafts.clear().await;
                println!("Local draft cleared.");
            }
        },
        Commands::List => {
            let client = ApiClient::new(&config)
                .context("Failed to create API client. Set STAYPORT_API_TOKEN")?;
            let rows: Vec<_> = merchant_hotel_rows(&client)
                .await
                .map_err(to_user_error)?
                .into_iter()
                .map(|mut row| {
                    row.reject_reason = row.reject_reason.map(|r| truncate_reason(&r, 24));
                    row
                })
                .collect();
            print_json(&rows)?;
        }
        Commands::Get { id } => {
            let client = ApiClient::new(&config)
                .context("Failed to create API client. Set STAYPORT_API_TOKEN")?;
            match client.fetch_hotel(&id).await.map_err(to_user_error)? {
                Some(hotel) => print_json(&hotel)?,
                None => println!("Hotel {} not found.", id),
            }
        }
        Commands::Review { sub } => {
            let client = ApiClient::new(&config)
                .context("Failed to create API client. Set STAYPORT_API_TOKEN")?;
            let mut view = ReviewWorkflow::new(client);
            match sub {
                ReviewCommands::List {
                    page,
                    status,
                    keyword,
                } => {
                    view.set_filters(parse_status_filter(&status)?, &keyword);
                    view.refresh(page).await.map_err(to_user_error)?;
                    let rows: Vec<ReviewRow> = view
                        .filtered_rows()
                        .into_iter()
                        .map(|hotel| ReviewRow {
                            id: hotel.id_str(),
                            name: hotel.name.clone(),
                            city: hotel.city_display(),
                            status: hotel.status(),
                            opened_at: hotel.opened_at.clone(),
                            reject_reason: hotel
                                .reject_reason()
                                .map(|r| truncate_reason(&r, 24)),
                        })
                        .collect();
                    print_json(&rows)?;
                    print_json(view.meta())?;
                }
                ReviewCommands::Approve { id, remark } => {
                    view.approve(&id, remark.as_deref())
                        .await
                        .map_err(to_user_error)?;
                    println!("Hotel {} approved; it is now publicly visible.", id);
                }
                ReviewCommands::Reject { id, reason } => {
                    view.reject(&id, &reason).await.map_err(to_user_error)?;
                    println!("Hotel {} rejected.", id);
                }
                ReviewCommands::ToggleOffline { id } => {
                    view.toggle_offline(&id).await.map_err(to_user_error)?;
                    println!("Hotel {} visibility toggled.", id);
                }
            }
        }
    }

    Ok(())
}
