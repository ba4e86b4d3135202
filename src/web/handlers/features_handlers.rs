// src/web/handlers/features_handlers.rs
use rocket::form::Form;
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::response::Redirect;
use rocket::State;
use tracing::{info, warn};

use crate::core::endpoints;
use crate::navigation::Route;
use crate::session::{QueryState, SessionHandle};
use crate::types::{CoverLetter, InterviewQuestion, ResumeId};
use crate::utils::normalize_download_name;
use crate::views::{features::letter_download_body, FeaturesView};
use crate::web::handlers::page_layout;
use crate::web::pages::{render, FeaturesPage};
use crate::web::session_store::PortalSession;
use crate::web::types::{parse_choice, CoverLetterForm, InterviewForm, PortalState, TextDownload};
use crate::workflow::{dispatch, CoverLetterEvent, FeaturesEvent, InterviewEvent};

/// `/features` without a valid id falls back to the résumé uploaded in this session
pub async fn features_page_handler(
    route: Route,
    session: PortalSession,
    state: &State<PortalState>,
) -> Result<RawHtml<String>, Status> {
    let handle = session.handle();

    let resume_id = match route {
        Route::Features(Some(resume_id)) => Some(resume_id),
        _ => handle.lock().await.upload.resume_id(),
    };
    handle.lock().await.open_features(resume_id);

    let (letters, questions) = match resume_id {
        Some(resume_id) => (
            fetch_cover_letters(handle, state, resume_id).await,
            fetch_interview_questions(handle, state, resume_id).await,
        ),
        None => (QueryState::Ready(Vec::new()), QueryState::Ready(Vec::new())),
    };

    let view = {
        let guard = handle.lock().await;
        FeaturesView::build(&guard.features, letters, questions)
    };
    let layout = page_layout(handle, resume_id).await;
    render(&FeaturesPage { layout, view })
}

pub async fn cover_letter_handler(
    id: &str,
    form: Form<CoverLetterForm>,
    session: PortalSession,
    state: &State<PortalState>,
) -> Redirect {
    let Ok(resume_id) = id.parse::<ResumeId>() else {
        return Redirect::to(Route::Features(None).path());
    };
    let handle = session.handle();
    let api = state.api.as_ref();
    handle.lock().await.open_features(Some(resume_id));

    let events = [
        CoverLetterEvent::CompanyEntered(form.company.clone()),
        CoverLetterEvent::PositionEntered(form.position.clone()),
        CoverLetterEvent::StyleChosen(parse_choice(&form.style)),
        CoverLetterEvent::Requested,
    ];
    for event in events {
        dispatch(handle, api, FeaturesEvent::CoverLetter(event)).await;
    }

    Redirect::to(Route::Features(Some(resume_id)).path())
}

pub async fn interview_questions_handler(
    id: &str,
    form: Form<InterviewForm>,
    session: PortalSession,
    state: &State<PortalState>,
) -> Redirect {
    let Ok(resume_id) = id.parse::<ResumeId>() else {
        return Redirect::to(Route::Features(None).path());
    };
    let handle = session.handle();
    let api = state.api.as_ref();
    handle.lock().await.open_features(Some(resume_id));

    let events = [
        InterviewEvent::PositionEntered(form.position.clone()),
        InterviewEvent::Requested,
    ];
    for event in events {
        dispatch(handle, api, FeaturesEvent::Interview(event)).await;
    }

    Redirect::to(Route::Features(Some(resume_id)).path())
}

/// Download one generated letter; `index` counts from 1 in list order
pub async fn download_cover_letter_handler(
    id: &str,
    index: usize,
    session: PortalSession,
    state: &State<PortalState>,
) -> Result<TextDownload, Status> {
    let resume_id = id.parse::<ResumeId>().map_err(|_| Status::NotFound)?;

    let letters = match fetch_cover_letters(session.handle(), state, resume_id).await {
        QueryState::Ready(letters) => letters,
        QueryState::Loading => return Err(Status::ServiceUnavailable),
        QueryState::Failed(message) => {
            warn!("Cannot download letter {} of {}: {}", index, resume_id, message);
            return Err(Status::BadGateway);
        }
    };

    let letter = index
        .checked_sub(1)
        .and_then(|i| letters.get(i))
        .ok_or(Status::NotFound)?;

    let filename = match normalize_download_name(&letter.company) {
        Some(company) => format!("cover_letter_{}_{}_{}.txt", resume_id, index, company),
        None => format!("cover_letter_{}_{}.txt", resume_id, index),
    };

    info!("Downloading cover letter {} of resume {} as {}", index, resume_id, filename);
    Ok(TextDownload::new(letter_download_body(letter), filename))
}

async fn fetch_cover_letters(
    handle: &SessionHandle,
    state: &PortalState,
    resume_id: ResumeId,
) -> QueryState<Vec<CoverLetter>> {
    handle
        .query(endpoints::cover_letters_key(resume_id), || {
            state.api.list_cover_letters(resume_id)
        })
        .await
}

async fn fetch_interview_questions(
    handle: &SessionHandle,
    state: &PortalState,
    resume_id: ResumeId,
) -> QueryState<Vec<InterviewQuestion>> {
    handle
        .query(endpoints::interview_questions_key(resume_id), || {
            state.api.get_interview_questions(resume_id)
        })
        .await
}
