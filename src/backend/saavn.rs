use async_trait::async_trait;
use log::info;
use reqwest::Client;
use serde_json::Value;

use crate::backend::{search_categories, MusicBackend};
use crate::catalog::normalize::normalize_list;
use crate::catalog::{Category, Lyrics, MusicSource, SearchResult, SearchResultSet, StreamInfo};
use crate::config::AppConfig;
use crate::errors::{AppError, Result};
use crate::utils::is_truthy;

/// JioSaavn catalog client speaking to a saavn.dev style REST API.
pub struct SaavnBackend {
    client: Client,
    base_url: String,
}

impl SaavnBackend {
    pub fn new(client: Client, config: &AppConfig) -> Self {
        Self {
            client,
            base_url: config.saavn_base_url.clone(),
        }
    }

    async fn search_category(
        &self,
        query: &str,
        category: Category,
        limit: usize,
    ) -> Result<Vec<SearchResult>> {
        // This catalog has no video category.
        if category == Category::Videos {
            return Ok(Vec::new());
        }

        let url = format!("{}/search/{}", self.base_url, category.as_str());
        let response = self
            .client
            .get(&url)
            .query(&[("query", query), ("page", "0"), ("limit", &limit.to_string())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Api(format!(
                "Failed to search {}: HTTP {}",
                category.as_str(),
                response.status().as_u16()
            )));
        }

        let data: Value = response.json().await?;
        if !is_truthy(&data["success"]) || !is_truthy(&data["data"]) {
            return Ok(Vec::new());
        }

        let empty = Vec::new();
        let items = data["data"]["results"].as_array().unwrap_or(&empty);
        let items = &items[..items.len().min(limit)];
        Ok(normalize_list(items, category, MusicSource::Jiosaavn))
    }

    /// Shared GET + `{success, data}` unwrap for the entity endpoints.
    async fn fetch_entity(
        &self,
        path: &str,
        query: &[(&str, &str)],
        noun: &str,
        missing: &str,
    ) -> Result<Value> {
        let response = self
            .client
            .get(format!("{}/{}", self.base_url, path))
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Api(format!(
                "Failed to fetch {}: HTTP {}",
                noun,
                response.status().as_u16()
            )));
        }

        let data: Value = response.json().await?;
        if !is_truthy(&data["success"]) || !is_truthy(&data["data"]) {
            return Err(AppError::Api(missing.to_string()));
        }
        Ok(data)
    }
}

#[async_trait]
impl MusicBackend for SaavnBackend {
    async fn search_all(&self, query: &str, limit: usize) -> Result<SearchResultSet> {
        info!("🔎 [SAAVN] Searching all categories for: '{}'", query);
        Ok(search_categories(limit, |category| {
            self.search_category(query, category, limit)
        })
        .await)
    }

    async fn get_stream_info(&self, video_id: &str) -> Result<StreamInfo> {
        info!("🎵 [SAAVN] Getting stream info for song ID: {}", video_id);

        let mut response = self
            .client
            .get(format!("{}/songs", self.base_url))
            .query(&[("ids", video_id)])
            .send()
            .await?;

        if !response.status().is_success() {
            // Some deployments only expose the path-style lookup.
            response = self
                .client
                .get(format!(
                    "{}/songs/{}",
                    self.base_url,
                    urlencoding::encode(video_id)
                ))
                .send()
                .await?;
            if !response.status().is_success() {
                return Err(AppError::Api(format!(
                    "Failed to fetch song details: HTTP {}",
                    response.status().as_u16()
                )));
            }
        }

        let data: Value = response.json().await?;
        let song = first_song(&data)
            .ok_or_else(|| AppError::Api("Song not found or no data available".to_string()))?;

        let (url, quality) = pick_download_url(song)
            .ok_or_else(|| AppError::Api("No stream URL available for this song".to_string()))?;

        info!("🎵 [SAAVN] Selected stream quality: {}", quality);

        Ok(StreamInfo {
            url,
            title: song["name"].as_str().unwrap_or("").to_string(),
            duration: duration_seconds(&song["duration"]),
            quality,
        })
    }

    async fn get_album_tracks(&self, browse_id: &str) -> Result<Vec<SearchResult>> {
        let data = self
            .fetch_entity("albums", &[("id", browse_id)], "album", "Album not found")
            .await?;
        Ok(songs_from(&data["data"]["songs"]))
    }

    async fn get_playlist_tracks(&self, playlist_id: &str) -> Result<Vec<SearchResult>> {
        let data = self
            .fetch_entity(
                "playlists",
                &[("id", playlist_id)],
                "playlist",
                "Playlist not found",
            )
            .await?;
        Ok(songs_from(&data["data"]["songs"]))
    }

    async fn get_artist_songs(&self, browse_id: &str) -> Result<Vec<SearchResult>> {
        let data = self
            .fetch_entity("artists", &[("id", browse_id)], "artist", "Artist not found")
            .await?;
        Ok(songs_from(&data["data"]["topSongs"]))
    }

    async fn get_watch_playlist(
        &self,
        video_id: &str,
        _playlist_id: Option<&str>,
    ) -> Result<Vec<SearchResult>> {
        // No radio endpoint here; suggestions are the closest thing.
        self.get_song_suggestions(video_id).await
    }

    async fn get_song_suggestions(&self, video_id: &str) -> Result<Vec<SearchResult>> {
        let path = format!("songs/{}/suggestions", urlencoding::encode(video_id));
        let data = self
            .fetch_entity(&path, &[], "suggestions", "No suggestions found")
            .await?;
        Ok(songs_from(&data["data"]))
    }

    async fn get_lyrics(&self, video_id: &str) -> Result<Lyrics> {
        // This endpoint wants `id`, unlike the stream lookup's `ids`.
        let response = self
            .client
            .get(format!("{}/songs", self.base_url))
            .query(&[("id", video_id)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Api(format!(
                "Failed to fetch song details: HTTP {}",
                response.status().as_u16()
            )));
        }

        let data: Value = response.json().await?;
        let song = first_song(&data).ok_or_else(|| AppError::Api("Song not found".to_string()))?;

        match song["lyrics"].as_str().filter(|l| !l.is_empty()) {
            Some(lyrics) => Ok(Lyrics {
                lyrics: lyrics.to_string(),
                source: "JioSaavn".to_string(),
            }),
            None => Err(AppError::Api("No lyrics found for this song".to_string())),
        }
    }
}

/// The song payload comes back as a bare object or as a list with the
/// song of interest first.
fn first_song(data: &Value) -> Option<&Value> {
    if !is_truthy(&data["success"]) || !is_truthy(&data["data"]) {
        return None;
    }
    match &data["data"] {
        Value::Array(songs) => songs.first(),
        song => Some(song),
    }
}

fn songs_from(value: &Value) -> Vec<SearchResult> {
    let empty = Vec::new();
    let items = value.as_array().unwrap_or(&empty);
    normalize_list(items, Category::Songs, MusicSource::Jiosaavn)
}

fn duration_seconds(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

const QUALITY_LADDER: [&str; 4] = ["320kbps", "160kbps", "96kbps", "48kbps"];

fn quality_rank(label: &str) -> u8 {
    match label {
        "320kbps" => 5,
        "160kbps" => 4,
        "96kbps" => 3,
        "48kbps" => 2,
        "12kbps" => 1,
        _ => 0,
    }
}

/// Picks the best stream URL a song payload offers. `downloadUrl` is a
/// quality-keyed object on older deployments and a list of
/// `{quality, url}` entries on newer ones; when it is absent entirely a
/// handful of alternate flat fields are tried.
fn pick_download_url(song: &Value) -> Option<(String, String)> {
    let download = &song["downloadUrl"];
    if !is_truthy(download) {
        return alternate_url(song);
    }

    match download {
        Value::Object(map) => {
            for label in QUALITY_LADDER {
                if let Some(url) = map
                    .get(label)
                    .and_then(Value::as_str)
                    .filter(|u| !u.is_empty())
                {
                    return Some((url.to_string(), label.to_string()));
                }
            }
            None
        }
        Value::Array(entries) => {
            let mut best: Option<(String, String, u8)> = None;
            for entry in entries {
                match entry {
                    Value::Object(_) => {
                        let Some(url) = entry["url"].as_str().filter(|u| !u.is_empty()) else {
                            continue;
                        };
                        let label = entry["quality"].as_str().unwrap_or("unknown");
                        let rank = quality_rank(label);
                        if best.as_ref().map_or(true, |(_, _, best_rank)| rank > *best_rank) {
                            best = Some((url.to_string(), label.to_string(), rank));
                        }
                    }
                    // Bare URL strings are a last resort.
                    Value::String(url) if !url.is_empty() => {
                        if best.is_none() {
                            best = Some((url.clone(), "unknown".to_string(), 0));
                        }
                    }
                    _ => {}
                }
            }
            best.map(|(url, label, _)| (url, label))
        }
        _ => None,
    }
}

fn alternate_url(song: &Value) -> Option<(String, String)> {
    for field in ["media_url", "stream_url", "url", "link"] {
        if let Some(url) = song[field].as_str().filter(|u| !u.is_empty()) {
            return Some((url.to_string(), "default".to_string()));
        }
    }
    None
}
