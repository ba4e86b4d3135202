// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use crate::core::config_manager::{ConfigOverrides, PortalConfig};
use crate::core::endpoints;
use crate::core::query_cache::QueryCache;
use crate::core::resume_api::ResumeApi;
use crate::core::service_client::ApiClient;
use crate::notification::Notification;
use crate::session::{Session, SessionHandle};
use crate::types::{CoverLetterStyle, ExperienceLevel, JobPosition, ResumeId, StagedFile};
use crate::views::{FeaturesView, ResultsView, UploadView};
use crate::web::start_web_server;
use crate::workflow::{
    dispatch, CoverLetterEvent, FeaturesEvent, InterviewEvent, UploadEvent,
};

#[derive(Parser)]
#[command(name = "resumeai")]
#[command(about = "ResumeAI portal: résumé upload, analysis, cover letters and interview prep")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (defaults to ./portal.yaml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the analysis backend
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the web portal
    Serve,
    /// Upload a résumé and print the extracted preview
    Upload {
        file: PathBuf,
        #[arg(long)]
        position: Option<JobPosition>,
        #[arg(long)]
        experience: Option<ExperienceLevel>,
        #[arg(long)]
        salary: Option<String>,
        /// Start the AI analysis right after the upload
        #[arg(long)]
        analyze: bool,
    },
    /// Print the analysis dashboard of a résumé
    Results { id: ResumeId },
    /// Generate a cover letter and print the letters of a résumé
    CoverLetter {
        id: ResumeId,
        #[arg(long)]
        company: String,
        #[arg(long)]
        position: String,
        #[arg(long)]
        style: CoverLetterStyle,
    },
    /// Generate interview questions for a position
    Interview {
        id: ResumeId,
        #[arg(long)]
        position: String,
    },
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            config_path: self.config.clone(),
            api_url: self.api_url.clone(),
            port: self.port,
        }
    }
}

/// What a headless command prints: the page model plus the notifications it raised
#[derive(Debug, Serialize)]
pub struct CommandReport {
    pub view: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigate: Option<String>,
    pub notifications: Vec<Notification>,
}

impl CommandReport {
    pub fn error(&self) -> Option<&Notification> {
        self.notifications.iter().find(|n| n.is_error())
    }
}

pub async fn handle_command(cli: Cli, config: PortalConfig) -> Result<()> {
    if let Command::Serve = cli.command {
        return start_web_server(config).await;
    }

    let api = ApiClient::new(&config.api_base_url, config.request_timeout())?;
    let session = SessionHandle::new(Session::new(QueryCache::with_stale_after(
        config.cache_stale_after(),
    )));

    let report = run_command(cli.command, &session, &api, &config).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    if let Some(failure) = report.error() {
        anyhow::bail!("{}: {}", failure.title, failure.description);
    }
    Ok(())
}

/// Drive one command through the workflow dispatcher and collect its report
pub async fn run_command(
    command: Command,
    session: &SessionHandle,
    api: &dyn ResumeApi,
    config: &PortalConfig,
) -> Result<CommandReport> {
    let mut navigate = None;

    let view = match command {
        Command::Serve => anyhow::bail!("serve is not a headless command"),

        Command::Upload {
            file,
            position,
            experience,
            salary,
            analyze,
        } => {
            let data = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let file_name = file
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or_default();
            let staged = StagedFile::new(file_name, None, data, config.max_upload_bytes)?;
            info!("Uploading {} ({} bytes)", staged.file_name(), staged.size());

            let events = [
                UploadEvent::PositionChosen(position),
                UploadEvent::ExperienceChosen(experience),
                UploadEvent::SalaryEntered(salary.unwrap_or_default()),
                UploadEvent::FileSelected(staged),
                UploadEvent::UploadRequested,
            ];
            for event in events {
                dispatch(session, api, event).await;
            }

            let ready_to_analyze = session.lock().await.upload.can_analyze();
            if analyze && ready_to_analyze {
                navigate = dispatch(session, api, UploadEvent::AnalyzeRequested).await;
            }

            let view = UploadView::build(&session.lock().await.upload, config.max_upload_bytes);
            serde_json::to_value(view)?
        }

        Command::Results { id } => {
            let analysis = session
                .query(endpoints::analysis_key(id), || api.get_analysis(id))
                .await;
            serde_json::to_value(ResultsView::from_query(Some(id), analysis))?
        }

        Command::CoverLetter {
            id,
            company,
            position,
            style,
        } => {
            session.lock().await.open_features(Some(id));
            let events = [
                CoverLetterEvent::CompanyEntered(company),
                CoverLetterEvent::PositionEntered(position),
                CoverLetterEvent::StyleChosen(Some(style)),
                CoverLetterEvent::Requested,
            ];
            for event in events {
                dispatch(session, api, FeaturesEvent::CoverLetter(event)).await;
            }
            features_view(session, api, id).await?
        }

        Command::Interview { id, position } => {
            session.lock().await.open_features(Some(id));
            let events = [
                InterviewEvent::PositionEntered(position),
                InterviewEvent::Requested,
            ];
            for event in events {
                dispatch(session, api, FeaturesEvent::Interview(event)).await;
            }
            features_view(session, api, id).await?
        }
    };

    let notifications = session.lock().await.take_notifications();
    Ok(CommandReport {
        view,
        navigate: navigate.map(|route| route.path()),
        notifications,
    })
}

async fn features_view(
    session: &SessionHandle,
    api: &dyn ResumeApi,
    id: ResumeId,
) -> Result<serde_json::Value> {
    let letters = session
        .query(endpoints::cover_letters_key(id), || api.list_cover_letters(id))
        .await;
    let questions = session
        .query(endpoints::interview_questions_key(id), || {
            api.get_interview_questions(id)
        })
        .await;

    let view = FeaturesView::build(&session.lock().await.features, letters, questions);
    Ok(serde_json::to_value(view)?)
}
