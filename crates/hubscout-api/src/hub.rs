// Hub trending API client and the raw envelope it returns.
//
// The trending endpoint wraps everything in
// `{ content: { recentlyTrending: [ { repoData: {...} } ] } }` and the
// records inside are wildly inconsistent between content types, so every
// nested field here is optional. Normalization into stable records happens
// in hubscout-core, not here.

use serde::Deserialize;

use crate::relay::RelayClient;
use crate::Result;

const HUB_API_BASE: &str = "https://huggingface.co/api";

pub struct HubClient {
    relay: RelayClient,
    base_url: String,
}

impl HubClient {
    pub fn new(relay: RelayClient) -> Self {
        Self::with_base_url(relay, HUB_API_BASE.to_string())
    }

    pub fn with_base_url(relay: RelayClient, base_url: String) -> Self {
        Self { relay, base_url }
    }

    /// Fetch the trending list for one content type.
    ///
    /// `kind` is the upstream type discriminator (`model`, `dataset` or
    /// `space`); papers live on a different endpoint entirely.
    pub async fn trending(&self, kind: &str, limit: u32) -> Result<TrendingEnvelope> {
        let target = format!("{}/trending?limit={}&type={}", self.base_url, limit, kind);
        self.relay.fetch(&target).await
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrendingEnvelope {
    #[serde(default)]
    pub content: Option<TrendingContent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingContent {
    // Option rather than a defaulted Vec: the upstream has been seen
    // emitting an explicit null here, which a plain Vec would reject.
    #[serde(default)]
    pub recently_trending: Option<Vec<TrendingItem>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingItem {
    #[serde(default)]
    pub repo_data: Option<RepoData>,
}

/// One raw repo record. Models, datasets and spaces all come through this
/// shape; which fields are actually present depends on the content type.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoData {
    pub id: Option<String>,
    pub author: Option<String>,
    pub author_data: Option<AuthorData>,
    pub title: Option<String>,
    pub downloads: Option<u64>,
    pub likes: Option<u64>,
    pub last_modified: Option<String>,
    #[serde(rename = "pipeline_tag")]
    pub pipeline_tag: Option<String>,
    pub private: Option<bool>,
    pub gated: Option<GatedFlag>,
    pub short_description: Option<String>,
    #[serde(rename = "ai_short_description")]
    pub ai_short_description: Option<String>,
    pub emoji: Option<String>,
    pub runtime: Option<SpaceRuntime>,
    pub datasets_server_info: Option<DatasetsServerInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorData {
    pub avatar_url: Option<String>,
    pub fullname: Option<String>,
}

/// `gated` is `false` for open repos but a mode string ("auto", "manual")
/// for gated ones. Anything that isn't literally `false` counts as gated.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GatedFlag {
    Bool(bool),
    Mode(String),
}

impl GatedFlag {
    pub fn is_gated(&self) -> bool {
        match self {
            GatedFlag::Bool(gated) => *gated,
            GatedFlag::Mode(_) => true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpaceRuntime {
    #[serde(default)]
    pub domains: Option<Vec<SpaceDomain>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpaceDomain {
    pub domain: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetsServerInfo {
    pub num_rows: Option<u64>,
    #[serde(default)]
    pub modalities: Option<Vec<String>>,
    #[serde(default)]
    pub formats: Option<Vec<String>>,
    #[serde(default)]
    pub libraries: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_tolerates_missing_content() {
        let envelope: TrendingEnvelope = serde_json::from_str("{}").unwrap();
        assert!(envelope.content.is_none());
    }

    #[test]
    fn item_tolerates_missing_repo_data() {
        let envelope: TrendingEnvelope = serde_json::from_str(
            r#"{"content":{"recentlyTrending":[{"likersDelta":3},{"repoData":{"id":"a/b"}}]}}"#,
        )
        .unwrap();

        let items = envelope.content.unwrap().recently_trending.unwrap();
        assert_eq!(items.len(), 2);
        assert!(items[0].repo_data.is_none());
        assert_eq!(items[1].repo_data.as_ref().unwrap().id.as_deref(), Some("a/b"));
    }

    #[test]
    fn gated_accepts_bool_mode_string_and_null() {
        let gated_of = |json: &str| -> bool {
            let repo: RepoData = serde_json::from_str(json).unwrap();
            repo.gated.map_or(false, |flag| flag.is_gated())
        };

        assert!(!gated_of(r#"{"gated":false}"#));
        assert!(gated_of(r#"{"gated":true}"#));
        assert!(gated_of(r#"{"gated":"auto"}"#));
        assert!(gated_of(r#"{"gated":"manual"}"#));
        assert!(!gated_of(r#"{"gated":null}"#));
        assert!(!gated_of("{}"));
    }

    #[test]
    fn mixed_case_fields_decode() {
        let repo: RepoData = serde_json::from_str(
            r#"{
                "id": "org/model",
                "authorData": {"avatarUrl": "https://cdn/avatar.png"},
                "lastModified": "2024-01-01T00:00:00.000Z",
                "pipeline_tag": "text-generation",
                "ai_short_description": "generated blurb",
                "datasetsServerInfo": {"numRows": 12, "modalities": ["text"]}
            }"#,
        )
        .unwrap();

        assert_eq!(repo.pipeline_tag.as_deref(), Some("text-generation"));
        assert_eq!(repo.ai_short_description.as_deref(), Some("generated blurb"));
        assert_eq!(
            repo.author_data.unwrap().avatar_url.as_deref(),
            Some("https://cdn/avatar.png")
        );
        assert_eq!(repo.datasets_server_info.unwrap().num_rows, Some(12));
    }
}
