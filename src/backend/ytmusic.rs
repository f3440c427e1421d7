use async_trait::async_trait;
use log::info;
use serde_json::Value;

use crate::backend::innertube::InnerTube;
use crate::backend::ytdlp::YtDlp;
use crate::backend::{search_categories, MusicBackend};
use crate::catalog::normalize::{normalize, normalize_list};
use crate::catalog::{
    Category, Lyrics, MoodCategoryMap, MusicSource, SearchResult, SearchResultSet, Section,
    StreamInfo,
};
use crate::errors::{AppError, Result};

/// Well-known public video ids cycled into the synthetic results when
/// the live catalog client is missing.
const TEST_VIDEO_IDS: [&str; 5] = [
    "dQw4w9WgXcQ",
    "kJQP7kiw5Fk",
    "JGwWNGJdvx8",
    "fJ9rUzIMcZQ",
    "hTWKbfoikeg",
];

const TEST_TITLES: [(&str, &str); 5] = [
    ("dQw4w9WgXcQ", "Rick Astley - Never Gonna Give You Up"),
    ("kJQP7kiw5Fk", "Luis Fonsi - Despacito"),
    ("JGwWNGJdvx8", "Ed Sheeran - Shape of You"),
    ("fJ9rUzIMcZQ", "Queen - Bohemian Rhapsody"),
    ("hTWKbfoikeg", "Nirvana - Smells Like Teen Spirit"),
];

/// The primary backend: YouTube Music catalog plus yt-dlp stream
/// extraction. Either half may be missing; search degrades to synthetic
/// results and everything else reports what is unavailable.
pub struct YtMusicBackend {
    catalog: Option<InnerTube>,
    extractor: Option<YtDlp>,
}

impl YtMusicBackend {
    pub fn new(catalog: Option<InnerTube>, extractor: Option<YtDlp>) -> Self {
        Self { catalog, extractor }
    }

    fn catalog(&self, feature: &str) -> Result<&InnerTube> {
        self.catalog.as_ref().ok_or_else(|| {
            AppError::Unavailable(format!(
                "YouTube Music client not available - {} not supported",
                feature
            ))
        })
    }
}

#[async_trait]
impl MusicBackend for YtMusicBackend {
    async fn search_all(&self, query: &str, limit: usize) -> Result<SearchResultSet> {
        let Some(catalog) = self.catalog.as_ref() else {
            info!("🔎 [SEARCH] Using fallback search for: '{}'", query);
            return Ok(mock_search(query, limit));
        };

        info!("🔎 [SEARCH] Searching all categories for: '{}'", query);
        Ok(search_categories(limit, |category| async move {
            let items = catalog.search(query, category).await?;
            Ok(normalize_list(&items, category, MusicSource::YoutubeMusic))
        })
        .await)
    }

    async fn get_stream_info(&self, video_id: &str) -> Result<StreamInfo> {
        match &self.extractor {
            Some(ytdlp) => {
                info!("🎵 [STREAM] Using yt-dlp for stream extraction: {}", video_id);
                ytdlp.extract_stream(video_id)
            }
            None => Err(AppError::Unavailable(format!(
                "Cannot stream \"{}\" - yt-dlp is required for audio playback. \
                 Install with: pip install yt-dlp",
                fallback_title(video_id)
            ))),
        }
    }

    async fn get_album_tracks(&self, browse_id: &str) -> Result<Vec<SearchResult>> {
        let catalog = self.catalog("album tracks")?;
        let items = catalog.album_tracks(browse_id).await?;
        Ok(normalize_list(&items, Category::Songs, MusicSource::YoutubeMusic))
    }

    async fn get_playlist_tracks(&self, playlist_id: &str) -> Result<Vec<SearchResult>> {
        let catalog = self.catalog("playlist tracks")?;
        let items = catalog.playlist_tracks(playlist_id).await?;
        Ok(normalize_list(&items, Category::Songs, MusicSource::YoutubeMusic))
    }

    async fn get_artist_songs(&self, browse_id: &str) -> Result<Vec<SearchResult>> {
        let catalog = self.catalog("artist songs")?;
        let items = catalog.artist_songs(browse_id).await?;
        Ok(normalize_list(&items, Category::Songs, MusicSource::YoutubeMusic))
    }

    async fn get_watch_playlist(
        &self,
        video_id: &str,
        playlist_id: Option<&str>,
    ) -> Result<Vec<SearchResult>> {
        let catalog = self.catalog("watch playlist")?;
        let items = catalog.watch_queue(video_id, playlist_id).await?;
        let tracks = normalize_list(&items, Category::Songs, MusicSource::YoutubeMusic);
        info!("📻 [WATCH] Generated watch playlist with {} tracks", tracks.len());
        Ok(tracks)
    }

    async fn get_song_suggestions(&self, video_id: &str) -> Result<Vec<SearchResult>> {
        let catalog = self.catalog("song suggestions")?;
        let items = catalog.watch_queue(video_id, None).await?;
        // The queue opens with the seed track itself.
        let rest = items.get(1..).unwrap_or(&[]);
        Ok(normalize_list(rest, Category::Songs, MusicSource::YoutubeMusic))
    }

    async fn get_lyrics(&self, video_id: &str) -> Result<Lyrics> {
        let catalog = self.catalog("lyrics")?;
        catalog
            .lyrics(video_id)
            .await?
            .ok_or_else(|| AppError::Api("No lyrics found for this song".to_string()))
    }

    async fn get_mood_categories(&self) -> Result<MoodCategoryMap> {
        let catalog = self.catalog("mood categories")?;
        let map = catalog.mood_categories().await?;
        info!("🎭 [MOOD] Retrieved mood categories with {} sections", map.len());
        Ok(map)
    }

    async fn get_mood_playlists(&self, params: &str) -> Result<Vec<SearchResult>> {
        let catalog = self.catalog("mood playlists")?;
        let items = catalog.mood_playlists(params).await?;
        let playlists = normalize_list(&items, Category::Playlists, MusicSource::YoutubeMusic);
        info!("🎭 [MOOD] Retrieved {} mood playlists", playlists.len());
        Ok(playlists)
    }

    async fn get_charts(&self, country: &str) -> Result<Vec<Section>> {
        let catalog = self.catalog("charts")?;
        let sections = catalog.charts(country).await?;
        info!("📈 [CHARTS] Retrieved charts for country {}", country);
        Ok(normalized_sections(sections))
    }

    async fn get_home(&self) -> Result<Vec<Section>> {
        let catalog = self.catalog("home feed")?;
        let sections = normalized_sections(catalog.home().await?);
        info!("🏠 [HOME] Retrieved home feed with {} sections", sections.len());
        Ok(sections)
    }
}

fn mock_search(query: &str, limit: usize) -> SearchResultSet {
    let mut set = SearchResultSet::default();
    for i in 0..limit.min(5) {
        set.songs.push(SearchResult {
            id: format!("mock_song_{}", i),
            result_type: Category::Songs,
            title: format!("Test Song {} for \"{}\"", i + 1, query),
            artist: Some("Test Artist".to_string()),
            thumbnail_url: Some("https://via.placeholder.com/120x120?text=Music".to_string()),
            duration: Some(180.0),
            explicit: false,
            video_id: Some(TEST_VIDEO_IDS[i % TEST_VIDEO_IDS.len()].to_string()),
            browse_id: None,
            year: None,
            play_count: None,
        });
    }
    set
}

fn fallback_title(video_id: &str) -> String {
    TEST_TITLES
        .iter()
        .find(|(id, _)| *id == video_id)
        .map(|(_, title)| title.to_string())
        .unwrap_or_else(|| format!("Test Video {}", video_id))
}

/// Shelf contents mix entity kinds; the id shape tells them apart.
fn infer_category(item: &Value) -> Option<Category> {
    if item.get("videoId").and_then(Value::as_str).is_some() {
        return Some(Category::Songs);
    }
    let browse = item.get("browseId").and_then(Value::as_str).unwrap_or("");
    if browse.starts_with("MPRE") {
        return Some(Category::Albums);
    }
    if browse.starts_with("UC") {
        return Some(Category::Artists);
    }
    if item.get("playlistId").and_then(Value::as_str).is_some() {
        return Some(Category::Playlists);
    }
    None
}

fn normalized_sections(sections: Vec<(String, Vec<Value>)>) -> Vec<Section> {
    sections
        .into_iter()
        .map(|(title, items)| {
            let contents = items
                .iter()
                .filter_map(|item| {
                    let category = infer_category(item)?;
                    normalize(item, category, MusicSource::YoutubeMusic)
                })
                .collect();
            Section { title, contents }
        })
        .collect()
}
