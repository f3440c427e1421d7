use log::warn;
use serde_json::Value;

use crate::catalog::{Category, MusicSource, SearchResult};
use crate::utils::{decode_html_entities, is_truthy, parse_duration};

/// Converts one raw catalog item into the canonical result shape.
///
/// The item is untrusted: fields may be missing, wrongly typed, or nested
/// differently per backend. Anything unusable yields `None`, never an error.
pub fn normalize(item: &Value, category: Category, source: MusicSource) -> Option<SearchResult> {
    if !item.is_object() {
        warn!("Skipping non-object {} item", category.as_str());
        return None;
    }

    let mut result = match source {
        MusicSource::YoutubeMusic => normalize_youtube(item, category)?,
        MusicSource::Jiosaavn => normalize_saavn(item, category)?,
    };

    result.title = decode_html_entities(&result.title);
    result.artist = result.artist.map(|a| decode_html_entities(&a));
    Some(result)
}

/// Normalizes a whole listing, dropping items that fail per-item rules.
pub fn normalize_list(items: &[Value], category: Category, source: MusicSource) -> Vec<SearchResult> {
    items
        .iter()
        .filter_map(|item| normalize(item, category, source))
        .collect()
}

fn normalize_youtube(item: &Value, category: Category) -> Option<SearchResult> {
    let title = trimmed_field(item, "title").unwrap_or("");
    if title.is_empty() && category != Category::Artists {
        warn!("Skipping {} item without title", category.as_str());
        return None;
    }

    let id = id_field(item, "videoId")
        .or_else(|| id_field(item, "browseId"))
        .or_else(|| id_field(item, "playlistId"))
        .or_else(|| id_field(item, "id"))
        .unwrap_or_default();

    let mut result = SearchResult {
        id,
        result_type: category,
        title: title.to_string(),
        artist: None,
        thumbnail_url: best_thumbnail(item.get("thumbnails")),
        duration: None,
        explicit: item.get("isExplicit").map(is_truthy).unwrap_or(false),
        video_id: id_field(item, "videoId"),
        browse_id: id_field(item, "browseId"),
        year: None,
        play_count: None,
    };

    match category {
        Category::Songs => {
            result.artist = joined_artists(item.get("artists"));
            result.duration = item.get("duration").and_then(duration_value);
            result.year = number_string(item.get("year"));
        }
        Category::Albums => {
            result.artist = joined_artists(item.get("artists"));
            result.year = number_string(item.get("year"));
        }
        Category::Artists => {
            let name = trimmed_field(item, "artist")
                .or_else(|| trimmed_field(item, "name"))
                .or_else(|| trimmed_field(item, "title"));
            let Some(name) = name else {
                warn!("Skipping artist result without a name");
                return None;
            };
            result.title = name.to_string();
            result.artist = Some(name.to_string());
            result.play_count = number_string(item.get("subscribers"));
        }
        Category::Playlists => {
            // Watch-endpoint tiles carry only the bare playlist id.
            if result.browse_id.is_none() {
                result.browse_id = id_field(item, "playlistId");
            }
            result.artist = item
                .get("author")
                .and_then(|author| field_str(author, "name"))
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string);
        }
        Category::Videos => {
            result.artist = joined_artists(item.get("artists"));
            result.duration = item.get("duration").and_then(duration_value);
            result.play_count = number_string(item.get("views"));
        }
    }

    Some(result)
}

fn normalize_saavn(item: &Value, category: Category) -> Option<SearchResult> {
    let title = trimmed_field(item, "name").unwrap_or("");
    if title.is_empty() {
        warn!("Skipping {} item without name", category.as_str());
        return None;
    }

    let id = id_field(item, "id").unwrap_or_default();

    let mut result = SearchResult {
        id: id.clone(),
        result_type: category,
        title: title.to_string(),
        artist: None,
        thumbnail_url: last_image(item.get("image")),
        duration: None,
        explicit: item.get("explicitContent").map(is_truthy).unwrap_or(false),
        video_id: None,
        browse_id: None,
        year: None,
        play_count: None,
    };

    match category {
        // Songs are keyed by the plain id on the video side of the record.
        Category::Songs | Category::Videos => {
            result.video_id = (!id.is_empty()).then(|| id);
            result.artist = joined_artists(item.get("artists").and_then(|a| a.get("primary")))
                .or_else(|| {
                    item.get("album")
                        .and_then(|album| field_str(album, "name"))
                        .map(str::trim)
                        .filter(|name| !name.is_empty())
                        .map(str::to_string)
                });
            result.duration = item.get("duration").and_then(duration_value);
            result.year = number_string(item.get("year"));
            result.play_count = number_string(item.get("playCount"));
        }
        Category::Albums => {
            result.browse_id = (!id.is_empty()).then(|| id);
            result.artist = joined_artists(item.get("artists").and_then(|a| a.get("primary")));
            result.year = number_string(item.get("year"));
            result.play_count = number_string(item.get("playCount"));
        }
        Category::Artists => {
            result.browse_id = (!id.is_empty()).then(|| id);
            result.artist = Some(title.to_string());
            // Artist records never carry an explicit flag.
            result.explicit = false;
        }
        Category::Playlists => {
            result.browse_id = (!id.is_empty()).then(|| id);
            result.artist = Some("JioSaavn Playlist".to_string());
            result.play_count = number_string(item.get("songCount"));
        }
    }

    Some(result)
}

/// Reads a string field from a value that may itself be a bare string
/// instead of an object; bare strings stand in for their own name/title.
fn field_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    match value {
        Value::Object(map) => map.get(key).and_then(Value::as_str),
        Value::String(s) if key == "name" || key == "title" => Some(s),
        _ => None,
    }
}

fn trimmed_field<'a>(item: &'a Value, key: &str) -> Option<&'a str> {
    field_str(item, key)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn id_field(item: &Value, key: &str) -> Option<String> {
    item.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Coerces a listing field into something iterable: arrays pass through,
/// null and absent become empty, a lone value becomes a one-entry list.
fn ensure_list(value: Option<&Value>) -> Vec<&Value> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().collect(),
        Some(Value::String(s)) if s.is_empty() => Vec::new(),
        Some(other) => vec![other],
    }
}

/// Joins artist names with ", ". Entries may be objects carrying a
/// `name` or bare strings.
fn joined_artists(value: Option<&Value>) -> Option<String> {
    let names: Vec<&str> = ensure_list(value)
        .into_iter()
        .filter_map(|artist| field_str(artist, "name"))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect();
    if names.is_empty() {
        None
    } else {
        Some(names.join(", "))
    }
}

/// Accepts `"M:SS"`/`"H:MM:SS"` tokens as well as bare second counts,
/// numeric or stringly.
fn duration_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|d| *d > 0.0),
        Value::String(s) if s.contains(':') => parse_duration(s),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|d| *d > 0.0),
        _ => None,
    }
}

/// Years and play counts arrive as numbers or strings depending on the
/// backend; both go out as non-empty strings.
fn number_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                Some(s.to_string())
            }
        }
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

/// Picks the largest thumbnail by pixel area; entries without dimensions
/// count as zero, so the first listed entry wins a tie.
fn best_thumbnail(value: Option<&Value>) -> Option<String> {
    let mut best: Option<(&Value, u64)> = None;
    for thumb in ensure_list(value) {
        if !thumb.is_object() {
            continue;
        }
        let area = dimension(thumb, "width").saturating_mul(dimension(thumb, "height"));
        match best {
            Some((_, best_area)) if area <= best_area => {}
            _ => best = Some((thumb, area)),
        }
    }
    best.and_then(|(thumb, _)| thumb.get("url"))
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
}

fn dimension(thumb: &Value, key: &str) -> u64 {
    match thumb.get(key) {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// JioSaavn image arrays are ordered smallest to largest; the last entry
/// is the highest quality.
fn last_image(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Array(images) => images
            .last()
            .and_then(|image| image.get("url"))
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
            .map(str::to_string),
        Value::String(s) if !s.is_empty() => Some(s.to_string()),
        _ => None,
    }
}
