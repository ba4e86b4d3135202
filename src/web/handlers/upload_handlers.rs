// src/web/handlers/upload_handlers.rs
use rocket::form::{Errors, Form};
use rocket::fs::TempFile;
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::response::Redirect;
use rocket::State;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::core::resume_api::ResumeApi;
use crate::error::{PortalError, Result};
use crate::navigation::Route;
use crate::notification::Notification;
use crate::session::SessionHandle;
use crate::types::StagedFile;
use crate::utils::{bare_file_name, format_megabytes};
use crate::views::UploadView;
use crate::web::handlers::page_layout;
use crate::web::pages::{render, UploadPage};
use crate::web::session_store::PortalSession;
use crate::web::types::{parse_choice, JobContextForm, PortalState, ResumeFileForm};
use crate::workflow::{dispatch, UploadEvent};

pub async fn upload_page_handler(
    session: PortalSession,
    state: &State<PortalState>,
) -> std::result::Result<RawHtml<String>, Status> {
    let handle = session.handle();
    let view = {
        let guard = handle.lock().await;
        UploadView::build(&guard.upload, state.config.max_upload_bytes)
    };

    let layout = page_layout(handle, None).await;
    render(&UploadPage { layout, view })
}

pub async fn select_file_handler(
    upload: std::result::Result<Form<ResumeFileForm<'_>>, Errors<'_>>,
    session: PortalSession,
    state: &State<PortalState>,
) -> Redirect {
    let handle = session.handle();
    let max_bytes = state.config.max_upload_bytes;

    let staged = match upload {
        Ok(mut form) => stage_upload(&mut form.resume, max_bytes).await,
        Err(errors) => {
            warn!("Rejected résumé form: {}", errors);
            Err(if errors.status() == Status::PayloadTooLarge {
                PortalError::validation(format!(
                    "파일 크기가 제한({})을 초과했습니다",
                    format_megabytes(max_bytes)
                ))
            } else {
                PortalError::validation("파일을 선택해주세요")
            })
        }
    };

    match staged {
        Ok(file) => {
            info!(
                "Staged {} ({} bytes, {})",
                file.file_name(),
                file.size(),
                file.kind().mime()
            );
            dispatch(handle, state.api.as_ref(), UploadEvent::FileSelected(file)).await;
        }
        Err(PortalError::Validation(message)) => {
            handle
                .lock()
                .await
                .notify(Notification::error("파일 오류", message));
        }
        Err(e) => {
            error!("Failed to read uploaded file: {}", e);
            handle
                .lock()
                .await
                .notify(Notification::error("업로드 실패", e.to_string()));
        }
    }

    Redirect::to(Route::Upload.path())
}

pub async fn remove_file_handler(session: PortalSession, state: &State<PortalState>) -> Redirect {
    dispatch(session.handle(), state.api.as_ref(), UploadEvent::FileRemoved).await;
    Redirect::to(Route::Upload.path())
}

pub async fn job_context_handler(
    form: Form<JobContextForm>,
    session: PortalSession,
    state: &State<PortalState>,
) -> Redirect {
    apply_job_context(session.handle(), state.api.as_ref(), &form).await;
    Redirect::to(Route::Upload.path())
}

pub async fn submit_upload_handler(
    form: Form<JobContextForm>,
    session: PortalSession,
    state: &State<PortalState>,
) -> Redirect {
    let handle = session.handle();
    let api = state.api.as_ref();

    apply_job_context(handle, api, &form).await;
    dispatch(handle, api, UploadEvent::UploadRequested).await;
    Redirect::to(Route::Upload.path())
}

pub async fn analyze_handler(
    form: Form<JobContextForm>,
    session: PortalSession,
    state: &State<PortalState>,
) -> Redirect {
    let handle = session.handle();
    let api = state.api.as_ref();

    apply_job_context(handle, api, &form).await;
    {
        let mut guard = handle.lock().await;
        if guard.upload.resume_id().is_some() && guard.upload.position().is_none() {
            guard.notify(Notification::error("분석 불가", "직무를 선택해주세요"));
            return Redirect::to(Route::Upload.path());
        }
    }

    let destination = dispatch(handle, api, UploadEvent::AnalyzeRequested)
        .await
        .unwrap_or(Route::Upload);
    Redirect::to(destination.path())
}

/// Feed the job-context selects into the upload machine
async fn apply_job_context(handle: &SessionHandle, api: &dyn ResumeApi, form: &JobContextForm) {
    let events = [
        UploadEvent::PositionChosen(parse_choice(&form.position)),
        UploadEvent::ExperienceChosen(parse_choice(&form.experience)),
        UploadEvent::SalaryEntered(form.expected_salary.clone()),
    ];
    for event in events {
        dispatch(handle, api, event).await;
    }
}

/// Move a multipart file into memory, validating it along the way
async fn stage_upload(file: &mut TempFile<'_>, max_bytes: u64) -> Result<StagedFile> {
    let raw_name = file
        .raw_name()
        .map(|name| name.dangerous_unsafe_unsanitized_raw().as_str().to_string())
        .unwrap_or_default();
    let file_name = bare_file_name(&raw_name).to_string();
    if file_name.trim().is_empty() {
        return Err(PortalError::validation("파일을 선택해주세요"));
    }

    let declared_mime = file
        .content_type()
        .map(|ct| format!("{}/{}", ct.top(), ct.sub()));

    let temp_path = std::env::temp_dir().join(format!("resumeai_upload_{}", Uuid::new_v4()));
    file.persist_to(&temp_path).await?;

    let data = tokio::fs::read(&temp_path).await;
    if let Err(e) = tokio::fs::remove_file(&temp_path).await {
        warn!("Failed to clean up {}: {}", temp_path.display(), e);
    }

    StagedFile::new(&file_name, declared_mime.as_deref(), data?, max_bytes)
}
