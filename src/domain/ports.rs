use crate::domain::model::NarrativeStyle;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Narrative-generation collaborator: given a future calendar year and a
/// style, produce a one-paragraph description of that future Earth.
#[async_trait]
pub trait Narrator: Send + Sync {
    async fn describe_future(&self, year: i64, style: NarrativeStyle) -> Result<String>;
}

/// Narrow view of configuration as seen by the narrative client.
pub trait NarrativeConfig: Send + Sync {
    fn narrative_endpoint(&self) -> &str;
    fn narrative_model(&self) -> Option<&str>;
    fn request_timeout_secs(&self) -> u64;
    fn max_tokens(&self) -> u32;
    fn temperature(&self) -> f32;
}
