use clap::{Parser, Subcommand};
use nabha_core::directory::{ConsultationType, DoctorDirectory};
use nabha_core::volunteer::{HelpCategory, HelpDesk, Urgency};
use nabha_core::{
    alerts::AlertFeed, config, sample, CoreConfig, FileRef, NotificationSink, PipelineState,
    PreferredLanguage, RegistrationWizard, ReportAnalysisPipeline, StaticRuleTable,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "nabha")]
#[command(about = "Nabha Health rural healthcare platform CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new account by walking the three-step wizard
    Register {
        /// First name
        first_name: String,
        /// Last name
        last_name: String,
        /// Preferred language (punjabi, hindi or english)
        language: String,
        /// Phone number
        #[arg(long)]
        phone: Option<String>,
        /// Ayushman Bharat card number
        #[arg(long)]
        ayushman: Option<String>,
        /// Agree to the Terms of Service and Privacy Policy
        #[arg(long)]
        agree: bool,
    },
    /// Upload a health report for analysis
    Analyze {
        /// Path to the report (pdf, jpg, jpeg or png, up to 10 MiB)
        file: PathBuf,
    },
    /// List doctors, optionally filtered
    Doctors {
        /// Search by doctor name or specialty
        #[arg(long)]
        search: Option<String>,
        /// Restrict to a specialty
        #[arg(long)]
        specialty: Option<String>,
    },
    /// Book a consultation with a doctor
    Book {
        /// Doctor name as listed by `doctors`
        doctor: String,
        /// Consultation type (video, audio, chat or whatsapp)
        #[arg(long, default_value = "video")]
        kind: String,
    },
    /// List community volunteers
    Volunteers,
    /// List partner NGOs
    Ngos,
    /// List open help requests
    Requests,
    /// Raise a community help request
    RequestHelp {
        /// Help category (transport, medicine, childcare, food, homecare, emergency)
        category: String,
        /// What help is needed
        description: String,
        /// Where the help is needed
        #[arg(long, default_value = "Nabha")]
        location: String,
        /// Urgency (low, medium or high)
        #[arg(long, default_value = "medium")]
        urgency: String,
    },
    /// Show the health alert feed
    Alerts,
}

/// Prints notifications the way the web prototype showed toasts.
struct StdoutSink;

impl NotificationSink for StdoutSink {
    fn notify(&self, title: &str, body: &str) {
        println!("\n[{title}] {body}");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("nabha=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let analysis_delay =
        config::analysis_delay_from_env_value(std::env::var("NABHA_ANALYSIS_DELAY_MS").ok())?;
    let cfg = CoreConfig::new(
        analysis_delay,
        nabha_core::constants::MAX_REPORT_BYTES,
    )?;
    let sink: Arc<dyn NotificationSink> = Arc::new(StdoutSink);

    let cli = Cli::parse();
    match cli.command {
        Commands::Register {
            first_name,
            last_name,
            language,
            phone,
            ayushman,
            agree,
        } => {
            let language: PreferredLanguage = language.parse()?;
            let mut wizard = RegistrationWizard::new(sink);

            let contact = &mut wizard.draft_mut().contact;
            contact.phone_number = phone.unwrap_or_default();
            contact.ayushman_card_id = ayushman.unwrap_or_default();
            wizard.advance()?;

            let identity = &mut wizard.draft_mut().identity;
            identity.first_name = first_name;
            identity.last_name = last_name;
            identity.preferred_language = Some(language);
            wizard.advance()?;

            wizard.draft_mut().consent.agreed_to_terms = agree;
            wizard.advance()?;
        }
        Commands::Analyze { file } => {
            let size_bytes = std::fs::metadata(&file)?.len();
            let name = file
                .file_name()
                .and_then(|os| os.to_str())
                .unwrap_or("report")
                .to_string();

            let mut pipeline = ReportAnalysisPipeline::new(
                &cfg,
                Arc::new(StaticRuleTable::default()),
                sink,
            );
            pipeline.submit(FileRef::from_name(name, size_bytes))?;
            println!("Analyzing your report...");

            loop {
                match pipeline.current_state() {
                    PipelineState::Analyzing | PipelineState::Idle => {
                        tokio::time::sleep(Duration::from_millis(100)).await;
                    }
                    PipelineState::Completed(report) => {
                        println!("{}", serde_json::to_string_pretty(&report)?);
                        break;
                    }
                    PipelineState::Failed(message) => {
                        anyhow::bail!("analysis failed: {message}");
                    }
                }
            }
        }
        Commands::Doctors { search, specialty } => {
            let directory = DoctorDirectory::new(sample::doctors(), sink);
            let results = directory.search(search.as_deref().unwrap_or(""), specialty.as_deref());
            if results.is_empty() {
                println!("No doctors match.");
            }
            for doctor in results {
                println!(
                    "{} — {} ({} yrs, {:.1}★, {} reviews) | {} | {} | next slot: {}",
                    doctor.name,
                    doctor.specialty,
                    doctor.experience_years,
                    doctor.rating,
                    doctor.reviews,
                    doctor.location,
                    doctor.consultation_fee,
                    doctor.next_slot,
                );
            }
        }
        Commands::Book { doctor, kind } => {
            let kind: ConsultationType = kind.parse()?;
            let directory = DoctorDirectory::new(sample::doctors(), sink);
            let confirmation = directory.book(&doctor, kind)?;
            println!(
                "Booked: {} with {} at {}",
                confirmation.consultation_type.label(),
                confirmation.doctor_name,
                confirmation.slot,
            );
        }
        Commands::Volunteers => {
            let desk = HelpDesk::new(sample::volunteers(), sample::ngos(), vec![], sink);
            for volunteer in desk.volunteers() {
                println!(
                    "{} — {} ({:.1}★, {} completed) | {} | {} | {}",
                    volunteer.name,
                    volunteer.role,
                    volunteer.rating,
                    volunteer.completed_requests,
                    volunteer.location,
                    volunteer.availability,
                    volunteer.phone,
                );
            }
        }
        Commands::Ngos => {
            let desk = HelpDesk::new(sample::volunteers(), sample::ngos(), vec![], sink);
            for ngo in desk.ngos() {
                println!(
                    "{} — {} | services: {} | {} | {}",
                    ngo.name,
                    ngo.kind,
                    ngo.services.join(", "),
                    ngo.contact,
                    ngo.location,
                );
            }
        }
        Commands::Requests => {
            let desk = HelpDesk::new(
                sample::volunteers(),
                sample::ngos(),
                sample::open_requests(),
                sink,
            );
            for request in desk.requests() {
                println!(
                    "[{:?}] {} — {} ({}, urgency {:?}){}",
                    request.status,
                    request.category.label(),
                    request.description,
                    request.location,
                    request.urgency,
                    request
                        .assigned_volunteer
                        .as_deref()
                        .map(|v| format!(" — volunteer: {v}"))
                        .unwrap_or_default(),
                );
            }
        }
        Commands::RequestHelp {
            category,
            description,
            location,
            urgency,
        } => {
            let category: HelpCategory = category.parse()?;
            let urgency: Urgency = urgency.parse()?;
            let mut desk = HelpDesk::new(
                sample::volunteers(),
                sample::ngos(),
                sample::open_requests(),
                sink,
            );
            let request = desk.submit_request(category, &description, &location, urgency)?;
            println!("Request {} recorded as {:?}.", request.id, request.status);
        }
        Commands::Alerts => {
            let feed = AlertFeed::new(sample::health_alerts());
            for alert in feed.by_priority() {
                println!(
                    "[{:?}] {} — {} (action: {})",
                    alert.priority, alert.category, alert.message, alert.suggested_action,
                );
            }
        }
    }

    Ok(())
}
