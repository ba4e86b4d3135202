pub mod features_handlers;
pub mod results_handlers;
pub mod system_handlers;
pub mod upload_handlers;

pub use features_handlers::*;
pub use results_handlers::*;
pub use system_handlers::*;
pub use upload_handlers::*;

use crate::session::SessionHandle;
use crate::types::ResumeId;
use crate::web::pages::Layout;

/// Shared page chrome. Drains pending notifications, so call it once per render.
/// Falls back to the uploaded résumé when the URL carries no id.
pub(crate) async fn page_layout(session: &SessionHandle, resume_id: Option<ResumeId>) -> Layout {
    let mut guard = session.lock().await;
    let resume_id = resume_id.or_else(|| guard.upload.resume_id());
    Layout::new(guard.take_notifications(), resume_id)
}
