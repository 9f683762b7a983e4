// Normalization adapters: raw trending envelope in, stable records out.
//
// The contract for every adapter: a missing envelope or missing list is an
// empty result, and an entry that lacks the fields a record can't exist
// without is skipped. Adapters never fail; upstream junk is not our caller's
// problem.

use hubscout_api::hub::{RepoData, TrendingEnvelope};
use hubscout_api::papers::DailyPaper;
use tracing::debug;

use crate::models::{DatasetRecord, ModelRecord, PaperRecord, SpaceRecord};

fn envelope_items(envelope: TrendingEnvelope) -> Vec<RepoData> {
    let items = envelope
        .content
        .and_then(|content| content.recently_trending)
        .unwrap_or_default();

    let total = items.len();
    let repos: Vec<RepoData> = items.into_iter().filter_map(|item| item.repo_data).collect();

    if repos.len() < total {
        debug!(
            skipped = total - repos.len(),
            "dropped trending entries without repoData"
        );
    }

    repos
}

/// Segment after the owner prefix, or the whole id when there is none.
fn post_slash(id: &str) -> &str {
    id.split_once('/').map_or(id, |(_, name)| name)
}

/// Owner prefix of an `org/name` id.
fn owner_of(id: &str) -> Option<&str> {
    id.split_once('/').map(|(owner, _)| owner)
}

pub fn normalize_models(envelope: TrendingEnvelope) -> Vec<ModelRecord> {
    envelope_items(envelope)
        .into_iter()
        .filter_map(|repo| {
            let id = repo.id?;
            let author = repo
                .author
                .or_else(|| owner_of(&id).map(str::to_string))
                .unwrap_or_default();

            Some(ModelRecord {
                author,
                author_avatar: repo.author_data.and_then(|data| data.avatar_url),
                downloads: repo.downloads.unwrap_or(0),
                likes: repo.likes.unwrap_or(0),
                last_modified: repo.last_modified,
                pipeline_tag: repo.pipeline_tag,
                is_private: repo.private.unwrap_or(false),
                is_gated: repo.gated.map_or(false, |flag| flag.is_gated()),
                model_id: id,
            })
        })
        .collect()
}

pub fn normalize_datasets(envelope: TrendingEnvelope) -> Vec<DatasetRecord> {
    envelope_items(envelope)
        .into_iter()
        .filter_map(|repo| {
            // Dataset cards can't render without an id and an author.
            let id = repo.id?;
            let author = repo.author?;
            let server_info = repo.datasets_server_info.unwrap_or_default();

            Some(DatasetRecord {
                author,
                downloads: repo.downloads.unwrap_or(0),
                likes: repo.likes.unwrap_or(0),
                last_modified: repo.last_modified,
                num_rows: server_info.num_rows,
                modalities: server_info.modalities.unwrap_or_default(),
                formats: server_info.formats.unwrap_or_default(),
                libraries: server_info.libraries.unwrap_or_default(),
                is_gated: repo.gated.map_or(false, |flag| flag.is_gated()),
                dataset_id: id,
            })
        })
        .collect()
}

pub fn normalize_spaces(envelope: TrendingEnvelope) -> Vec<SpaceRecord> {
    envelope_items(envelope)
        .into_iter()
        .filter_map(|repo| {
            let id = repo.id?;
            let title = repo
                .title
                .unwrap_or_else(|| post_slash(&id).to_string());
            let author = repo
                .author
                .or_else(|| owner_of(&id).map(str::to_string))
                .unwrap_or_default();
            let description = repo.short_description.or(repo.ai_short_description);
            let primary_domain = repo
                .runtime
                .and_then(|runtime| runtime.domains)
                .and_then(|domains| domains.into_iter().next())
                .and_then(|entry| entry.domain);

            Some(SpaceRecord {
                title,
                author,
                author_avatar: repo.author_data.and_then(|data| data.avatar_url),
                description,
                emoji: repo.emoji,
                likes: repo.likes.unwrap_or(0),
                last_modified: repo.last_modified,
                primary_domain,
                id,
            })
        })
        .collect()
}

pub fn normalize_papers(entries: Vec<DailyPaper>) -> Vec<PaperRecord> {
    entries
        .into_iter()
        .filter_map(|entry| {
            let thumbnail = entry.thumbnail;
            let submitted_by = entry
                .submitted_by
                .and_then(|user| user.fullname)
                .unwrap_or_else(|| "Unknown".to_string());
            let comments = entry.num_comments.unwrap_or(0);

            let paper = entry.paper?;
            let id = paper.id?;
            let title = paper.title?;

            Some(PaperRecord {
                title,
                image: thumbnail,
                link: format!("https://huggingface.co/papers/{id}"),
                upvotes: paper.upvotes.unwrap_or(0),
                comments,
                submitted_by,
            })
        })
        .collect()
}
