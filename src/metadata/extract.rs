use std::path::PathBuf;

use lofty::file::TaggedFileExt;
use lofty::picture::{Picture, PictureType};
use lofty::prelude::Accessor;
use lofty::read_from_path;
use lofty::tag::{ItemKey, Tag};
use thiserror::Error;

use crate::library::FileHandle;

use super::model::{CoverImage, TagFields};

/// Why tags could not be read for a file. Never escapes the resolver.
#[derive(Debug, Error)]
pub enum ExtractionFailure {
    #[error("failed to read tags from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: lofty::error::LoftyError,
    },
    #[error("{0} has no tags")]
    NoTags(PathBuf),
    #[error("timed out reading tags from {0}")]
    TimedOut(PathBuf),
    #[error("tag reader for {0} stopped without a result")]
    WorkerLost(PathBuf),
}

/// Reads tag fields for one file.
///
/// Implementations are called from worker threads, possibly for many files
/// at once.
pub trait TagExtractor: Send + Sync + 'static {
    fn extract(&self, file: &FileHandle) -> Result<TagFields, ExtractionFailure>;
}

/// `TagExtractor` backed by `lofty`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoftyExtractor;

impl TagExtractor for LoftyExtractor {
    fn extract(&self, file: &FileHandle) -> Result<TagFields, ExtractionFailure> {
        let tagged = read_from_path(&file.path).map_err(|source| ExtractionFailure::Read {
            path: file.path.clone(),
            source,
        })?;

        // Primary tag first, then whatever else the container carries.
        let mut tags: Vec<&Tag> = Vec::new();
        if let Some(primary) = tagged.primary_tag() {
            tags.push(primary);
        }
        tags.extend(
            tagged
                .tags()
                .iter()
                .filter(|t| Some(t.tag_type()) != tagged.primary_tag().map(Tag::tag_type)),
        );
        if tags.is_empty() {
            return Err(ExtractionFailure::NoTags(file.path.clone()));
        }

        Ok(TagFields {
            title: first_text(&tags, |t| t.title().map(|v| v.into_owned())),
            artist: first_text(&tags, |t| t.artist().map(|v| v.into_owned())),
            album: first_text(&tags, |t| t.album().map(|v| v.into_owned())),
            track_number: tags.iter().find_map(|t| {
                t.track().or_else(|| {
                    t.get_string(ItemKey::TrackNumber)
                        .and_then(parse_track_number)
                })
            }),
            cover: tags.iter().find_map(|t| cover_of(t.pictures())),
        })
    }
}

fn first_text<F>(tags: &[&Tag], mut extractor: F) -> Option<String>
where
    F: FnMut(&Tag) -> Option<String>,
{
    tags.iter()
        .filter_map(|t| extractor(t))
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}

/// Parse `"3"` or `"3/12"` into 3. Anything else is `None`.
pub(super) fn parse_track_number(raw: &str) -> Option<u32> {
    raw.split('/').next()?.trim().parse().ok()
}

fn cover_of(pictures: &[Picture]) -> Option<CoverImage> {
    let picture = pictures
        .iter()
        .find(|p| p.pic_type() == PictureType::CoverFront)
        .or_else(|| pictures.first())?;

    if picture.data().is_empty() {
        return None;
    }

    Some(CoverImage {
        data: picture.data().to_vec(),
        mime: picture
            .mime_type()
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string()),
    })
}
