pub mod analysis;
pub mod features;
pub mod options;
pub mod response;
pub mod resume;

pub use analysis::*;
pub use features::*;
pub use options::*;
pub use response::{AnalysisEnvelope, InterviewQuestionsResponse, UploadResponse};
pub use resume::*;

use serde::{Deserialize, Deserializer};

/// Read an explicit JSON `null` the same way as a missing key
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
