use crate::config::MetadataSettings;
use crate::library::FileHandle;

/// Embedded artwork as found in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverImage {
    pub data: Vec<u8>,
    /// MIME type reported by the tag, e.g. `image/jpeg`.
    pub mime: String,
}

/// Raw fields read from a file's tags. Any of them may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFields {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub track_number: Option<u32>,
    pub cover: Option<CoverImage>,
}

/// One resolved playlist item.
///
/// Built once per selection and never edited afterwards; a new selection
/// produces a new set of entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackEntry {
    pub source: FileHandle,
    pub title: String,
    pub artist: String,
    pub album: String,
    /// 0 when the tag is missing or unparseable.
    pub track_number: u32,
    pub cover: Option<CoverImage>,
    /// Position of `source` in the submitted selection.
    pub input_index: usize,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl TrackEntry {
    /// Build an entry from extracted tags, defaulting each missing field.
    pub fn from_tags(
        source: FileHandle,
        input_index: usize,
        tags: TagFields,
        defaults: &MetadataSettings,
    ) -> Self {
        Self {
            title: non_blank(tags.title).unwrap_or_else(|| source.name.clone()),
            artist: non_blank(tags.artist).unwrap_or_else(|| defaults.unknown_artist.clone()),
            album: non_blank(tags.album).unwrap_or_else(|| defaults.unknown_album.clone()),
            track_number: tags.track_number.unwrap_or(0),
            cover: tags.cover.filter(|c| !c.data.is_empty()),
            source,
            input_index,
        }
    }

    /// Build a fully defaulted entry, used when extraction failed.
    pub fn fallback(source: FileHandle, input_index: usize, defaults: &MetadataSettings) -> Self {
        Self::from_tags(source, input_index, TagFields::default(), defaults)
    }
}
