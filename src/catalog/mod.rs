pub mod normalize;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One normalized catalog entry, shaped the same regardless of which
/// backend produced it. All keys are always serialized; absent values
/// go out as `null` so the client sees a fixed schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: String,
    #[serde(rename = "type")]
    pub result_type: Category,
    pub title: String,
    pub artist: Option<String>,
    #[serde(rename = "thumbnailURL")]
    pub thumbnail_url: Option<String>,
    pub duration: Option<f64>,
    pub explicit: bool,
    pub video_id: Option<String>,
    pub browse_id: Option<String>,
    pub year: Option<String>,
    pub play_count: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Songs,
    Albums,
    Artists,
    Playlists,
    Videos,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Songs,
        Category::Albums,
        Category::Artists,
        Category::Playlists,
        Category::Videos,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Songs => "songs",
            Category::Albums => "albums",
            Category::Artists => "artists",
            Category::Playlists => "playlists",
            Category::Videos => "videos",
        }
    }
}

/// Search results across all five categories. A category that failed or
/// returned nothing is an empty list, never an error for the whole set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResultSet {
    pub songs: Vec<SearchResult>,
    pub albums: Vec<SearchResult>,
    pub artists: Vec<SearchResult>,
    pub playlists: Vec<SearchResult>,
    pub videos: Vec<SearchResult>,
}

impl SearchResultSet {
    pub fn category_mut(&mut self, category: Category) -> &mut Vec<SearchResult> {
        match category {
            Category::Songs => &mut self.songs,
            Category::Albums => &mut self.albums,
            Category::Artists => &mut self.artists,
            Category::Playlists => &mut self.playlists,
            Category::Videos => &mut self.videos,
        }
    }
}

/// Resolved playable stream for one track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamInfo {
    pub url: String,
    pub title: String,
    pub duration: f64,
    pub quality: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lyrics {
    pub lyrics: String,
    pub source: String,
}

/// One browseable mood/genre entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodCategory {
    pub title: String,
    pub params: String,
}

pub type MoodCategoryMap = BTreeMap<String, Vec<MoodCategory>>;

/// Titled group of results, used by the charts and home feeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub contents: Vec<SearchResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicSource {
    YoutubeMusic,
    Jiosaavn,
}

impl MusicSource {
    /// Reads the request's `musicSource` field; anything other than the
    /// literal `"jiosaavn"` selects YouTube Music.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("jiosaavn") => MusicSource::Jiosaavn,
            _ => MusicSource::YoutubeMusic,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MusicSource::YoutubeMusic => "youtube_music",
            MusicSource::Jiosaavn => "jiosaavn",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_result_wire_shape() {
        let result = SearchResult {
            id: "abc123".to_string(),
            result_type: Category::Songs,
            title: "Test".to_string(),
            artist: Some("Someone".to_string()),
            thumbnail_url: None,
            duration: Some(225.0),
            explicit: false,
            video_id: Some("abc123".to_string()),
            browse_id: None,
            year: None,
            play_count: None,
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["type"], "songs");
        assert_eq!(value["thumbnailURL"], serde_json::Value::Null);
        assert_eq!(value["videoId"], "abc123");
        // every key is present even when the value is null
        assert!(value.as_object().unwrap().contains_key("browseId"));
        assert!(value.as_object().unwrap().contains_key("playCount"));
    }

    #[test]
    fn test_music_source_selection() {
        assert_eq!(MusicSource::from_param(Some("jiosaavn")), MusicSource::Jiosaavn);
        assert_eq!(MusicSource::from_param(Some("youtube_music")), MusicSource::YoutubeMusic);
        assert_eq!(MusicSource::from_param(Some("spotify")), MusicSource::YoutubeMusic);
        assert_eq!(MusicSource::from_param(None), MusicSource::YoutubeMusic);
    }
}
