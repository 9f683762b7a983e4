use serde::{Deserialize, Serialize};

/// Shown in place of a paper thumbnail when the feed doesn't carry one.
pub const PLACEHOLDER_PAPER_IMAGE: &str = "https://huggingface.co/front/thumbnails/papers.png";

/// The four kinds of trending content the dashboard knows about.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Papers,
    Models,
    Datasets,
    Spaces,
}

impl ContentType {
    pub const ALL: [ContentType; 4] = [
        ContentType::Papers,
        ContentType::Models,
        ContentType::Datasets,
        ContentType::Spaces,
    ];

    /// The upstream trending API's type discriminator. Papers come from a
    /// different feed and have no discriminator.
    pub fn api_type(&self) -> Option<&'static str> {
        match self {
            ContentType::Papers => None,
            ContentType::Models => Some("model"),
            ContentType::Datasets => Some("dataset"),
            ContentType::Spaces => Some("space"),
        }
    }

    /// Next tab over, wrapping around. Used for Tab-key cycling.
    pub fn next(&self) -> ContentType {
        match self {
            ContentType::Papers => ContentType::Models,
            ContentType::Models => ContentType::Datasets,
            ContentType::Datasets => ContentType::Spaces,
            ContentType::Spaces => ContentType::Papers,
        }
    }

    pub fn previous(&self) -> ContentType {
        match self {
            ContentType::Papers => ContentType::Spaces,
            ContentType::Models => ContentType::Papers,
            ContentType::Datasets => ContentType::Models,
            ContentType::Spaces => ContentType::Datasets,
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentType::Papers => write!(f, "Papers"),
            ContentType::Models => write!(f, "Models"),
            ContentType::Datasets => write!(f, "Datasets"),
            ContentType::Spaces => write!(f, "Spaces"),
        }
    }
}

impl std::str::FromStr for ContentType {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "papers" | "paper" => Ok(ContentType::Papers),
            "models" | "model" => Ok(ContentType::Models),
            "datasets" | "dataset" => Ok(ContentType::Datasets),
            "spaces" | "space" => Ok(ContentType::Spaces),
            other => Err(crate::Error::Config(format!(
                "unknown content type: {other}"
            ))),
        }
    }
}

/// Time range for the papers tab.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TimeFrame {
    Today,
    ThreeDays,
    Week,
    Month,
}

impl TimeFrame {
    pub const ALL: [TimeFrame; 4] = [
        TimeFrame::Today,
        TimeFrame::ThreeDays,
        TimeFrame::Week,
        TimeFrame::Month,
    ];

    /// Human label, as shown in the UI and the window title.
    pub fn label(&self) -> &'static str {
        match self {
            TimeFrame::Today => "Today",
            TimeFrame::ThreeDays => "Last 3 Days",
            TimeFrame::Week => "This Week",
            TimeFrame::Month => "This Month",
        }
    }

    /// Wire form, used as the `timeFrame` query parameter and as the
    /// persisted preference value.
    pub fn as_param(&self) -> &'static str {
        match self {
            TimeFrame::Today => "today",
            TimeFrame::ThreeDays => "three_days",
            TimeFrame::Week => "week",
            TimeFrame::Month => "month",
        }
    }

    /// How far back the window reaches, in days.
    pub fn window_days(&self) -> i64 {
        match self {
            TimeFrame::Today => 1,
            TimeFrame::ThreeDays => 3,
            TimeFrame::Week => 7,
            TimeFrame::Month => 30,
        }
    }

    pub fn next(&self) -> TimeFrame {
        match self {
            TimeFrame::Today => TimeFrame::ThreeDays,
            TimeFrame::ThreeDays => TimeFrame::Week,
            TimeFrame::Week => TimeFrame::Month,
            TimeFrame::Month => TimeFrame::Today,
        }
    }
}

impl Default for TimeFrame {
    fn default() -> Self {
        TimeFrame::ThreeDays
    }
}

impl std::str::FromStr for TimeFrame {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "today" => Ok(TimeFrame::Today),
            "three_days" => Ok(TimeFrame::ThreeDays),
            "week" => Ok(TimeFrame::Week),
            "month" => Ok(TimeFrame::Month),
            other => Err(crate::Error::Config(format!("unknown time frame: {other}"))),
        }
    }
}

impl std::fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_param())
    }
}

/// A trending model, flattened from the raw envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModelRecord {
    pub model_id: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_avatar: Option<String>,
    pub downloads: u64,
    pub likes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline_tag: Option<String>,
    pub is_private: bool,
    pub is_gated: bool,
}

impl ModelRecord {
    /// Display name: the part after the owner prefix.
    pub fn short_name(&self) -> &str {
        self.model_id
            .split_once('/')
            .map_or(self.model_id.as_str(), |(_, name)| name)
    }

    pub fn hub_url(&self) -> String {
        format!("https://huggingface.co/{}", self.model_id)
    }
}

/// A trending dataset. Flattened the same way as models; the dataset
/// server info rides along for the card metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DatasetRecord {
    pub dataset_id: String,
    pub author: String,
    pub downloads: u64,
    pub likes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_rows: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modalities: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub formats: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub libraries: Vec<String>,
    pub is_gated: bool,
}

impl DatasetRecord {
    pub fn short_name(&self) -> &str {
        self.dataset_id
            .split_once('/')
            .map_or(self.dataset_id.as_str(), |(_, name)| name)
    }

    pub fn hub_url(&self) -> String {
        format!("https://huggingface.co/datasets/{}", self.dataset_id)
    }
}

/// A trending space.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpaceRecord {
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    pub likes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_domain: Option<String>,
}

impl SpaceRecord {
    pub fn hub_url(&self) -> String {
        format!("https://huggingface.co/spaces/{}", self.id)
    }

    /// Where opening the space should land: the live deployment when it
    /// has a domain, the hub page otherwise.
    pub fn launch_url(&self) -> String {
        match &self.primary_domain {
            Some(domain) => format!("https://{domain}"),
            None => self.hub_url(),
        }
    }
}

/// A daily paper.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaperRecord {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Hub paper URL; the trailing path segment is the paper id.
    pub link: String,
    pub upvotes: u64,
    pub comments: u64,
    pub submitted_by: String,
}

impl PaperRecord {
    /// Thumbnail URL with the placeholder substituted when the feed
    /// didn't carry one.
    pub fn image_url(&self) -> &str {
        self.image.as_deref().unwrap_or(PLACEHOLDER_PAPER_IMAGE)
    }

    /// The trailing segment of the hub link is an arxiv-style id, which is
    /// enough to point at the PDF directly.
    pub fn pdf_url(&self) -> Option<String> {
        let id = self.link.rsplit('/').next()?;
        if id.is_empty() {
            return None;
        }
        Some(format!("https://arxiv.org/pdf/{id}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_frame_labels_match_the_fixed_lookup() {
        assert_eq!(TimeFrame::Today.label(), "Today");
        assert_eq!(TimeFrame::ThreeDays.label(), "Last 3 Days");
        assert_eq!(TimeFrame::Week.label(), "This Week");
        assert_eq!(TimeFrame::Month.label(), "This Month");
    }

    #[test]
    fn time_frame_round_trips_through_param_form() {
        for tf in TimeFrame::ALL {
            assert_eq!(tf.as_param().parse::<TimeFrame>().unwrap(), tf);
        }
    }

    #[test]
    fn content_type_parses_both_forms() {
        assert_eq!("models".parse::<ContentType>().unwrap(), ContentType::Models);
        assert_eq!("model".parse::<ContentType>().unwrap(), ContentType::Models);
        assert!("videos".parse::<ContentType>().is_err());
    }

    #[test]
    fn model_record_serializes_with_upstream_field_names() {
        let record = ModelRecord {
            model_id: "orgX/modelY".into(),
            author: "orgX".into(),
            author_avatar: Some("u".into()),
            downloads: 5,
            likes: 2,
            last_modified: Some("2024-01-01".into()),
            pipeline_tag: Some("text-classification".into()),
            is_private: false,
            is_gated: false,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["modelId"], "orgX/modelY");
        assert_eq!(json["authorAvatar"], "u");
        assert_eq!(json["pipelineTag"], "text-classification");
        assert_eq!(json["isPrivate"], false);
        assert_eq!(json["isGated"], false);
        assert_eq!(json["lastModified"], "2024-01-01");
    }

    #[test]
    fn paper_pdf_url_derives_from_link_tail() {
        let paper = PaperRecord {
            title: "Attention Is Enough".into(),
            image: None,
            link: "https://huggingface.co/papers/2401.00001".into(),
            upvotes: 41,
            comments: 7,
            submitted_by: "Ada".into(),
        };

        assert_eq!(
            paper.pdf_url().as_deref(),
            Some("https://arxiv.org/pdf/2401.00001")
        );
        assert_eq!(paper.image_url(), PLACEHOLDER_PAPER_IMAGE);
    }

    #[test]
    fn space_launch_url_prefers_the_live_domain() {
        let mut space = SpaceRecord {
            id: "acme/cool-app".into(),
            title: "cool-app".into(),
            author: "acme".into(),
            author_avatar: None,
            description: None,
            emoji: None,
            likes: 0,
            last_modified: None,
            primary_domain: Some("foo.hf.space".into()),
        };

        assert_eq!(space.launch_url(), "https://foo.hf.space");

        space.primary_domain = None;
        assert_eq!(space.launch_url(), "https://huggingface.co/spaces/acme/cool-app");
    }

    #[test]
    fn short_name_falls_back_to_full_id() {
        let record = ModelRecord {
            model_id: "standalone".into(),
            author: String::new(),
            author_avatar: None,
            downloads: 0,
            likes: 0,
            last_modified: None,
            pipeline_tag: None,
            is_private: false,
            is_gated: false,
        };
        assert_eq!(record.short_name(), "standalone");
    }
}
