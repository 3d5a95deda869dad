use crate::config::TrackDisplayField;
use crate::metadata::TrackEntry;

/// Build a display string for a track according to the provided `fields` and separator.
///
/// Blank fields are skipped and the title is used when no parts were produced.
/// A track number of 0 is treated as absent here.
pub fn display_from_fields(entry: &TrackEntry, fields: &[TrackDisplayField], sep: &str) -> String {
    let mut parts: Vec<String> = Vec::new();

    for f in fields {
        let part = match f {
            TrackDisplayField::Title => Some(entry.title.trim().to_string()),
            TrackDisplayField::Artist => Some(entry.artist.trim().to_string()),
            TrackDisplayField::Album => Some(entry.album.trim().to_string()),
            TrackDisplayField::TrackNumber => {
                (entry.track_number > 0).then(|| format!("{:02}", entry.track_number))
            }
            TrackDisplayField::Filename => Some(entry.source.name.clone()),
            TrackDisplayField::Path => Some(entry.source.path.display().to_string()),
        };
        if let Some(p) = part.filter(|p| !p.is_empty()) {
            parts.push(p);
        }
    }

    if parts.is_empty() {
        entry.title.clone()
    } else {
        parts.join(sep)
    }
}
