// src/web/handlers/results_handlers.rs
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::State;
use tracing::debug;

use crate::core::endpoints;
use crate::navigation::Route;
use crate::session::QueryState;
use crate::views::ResultsView;
use crate::web::handlers::page_layout;
use crate::web::pages::{render, ResultsPage};
use crate::web::session_store::PortalSession;
use crate::web::types::PortalState;

pub async fn results_handler(
    route: Route,
    session: PortalSession,
    state: &State<PortalState>,
) -> Result<RawHtml<String>, Status> {
    let handle = session.handle();
    let resume_id = match route {
        Route::Results(resume_id) => resume_id,
        _ => None,
    };

    let analysis = match resume_id {
        Some(resume_id) => {
            handle
                .query(endpoints::analysis_key(resume_id), || {
                    state.api.get_analysis(resume_id)
                })
                .await
        }
        None => {
            debug!("Results requested without a valid id ({})", route);
            QueryState::Ready(None)
        }
    };

    let view = ResultsView::from_query(resume_id, analysis);
    let layout = page_layout(handle, resume_id).await;
    render(&ResultsPage { layout, view })
}
