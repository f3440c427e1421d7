use log::{info, warn};
use regex::Regex;
use reqwest::Client;
use serde_json::{json, Map, Value};

use crate::catalog::{Category, Lyrics, MoodCategory, MoodCategoryMap};
use crate::config::AppConfig;
use crate::errors::{AppError, Result};

const API_BASE: &str = "https://music.youtube.com/youtubei/v1";
const CLIENT_NAME: &str = "WEB_REMIX";
const CLIENT_VERSION: &str = "1.20240918.01.00";

/// Client for the public YouTube Music web API.
///
/// Responses arrive as deeply nested renderer trees; everything here
/// flattens them into loose item maps for the normalizer. Missing nodes
/// yield missing fields, never errors.
pub struct InnerTube {
    client: Client,
    language: String,
}

impl InnerTube {
    pub fn new(client: Client, config: &AppConfig) -> Self {
        Self {
            client,
            language: config.language.clone(),
        }
    }

    async fn post(&self, endpoint: &str, mut body: Value) -> Result<Value> {
        body["context"] = json!({
            "client": {
                "clientName": CLIENT_NAME,
                "clientVersion": CLIENT_VERSION,
                "hl": self.language,
            }
        });

        let url = format!("{}/{}?prettyPrint=false", API_BASE, endpoint);
        let response = self
            .client
            .post(&url)
            .header("Origin", "https://music.youtube.com")
            .header("Referer", "https://music.youtube.com/")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Api(format!(
                "YouTube Music request failed: HTTP {}",
                response.status().as_u16()
            )));
        }

        Ok(response.json().await?)
    }

    pub async fn search(&self, query: &str, category: Category) -> Result<Vec<Value>> {
        let body = json!({"query": query, "params": search_params(category)});
        let response = self.post("search", body).await?;
        Ok(list_items(&response))
    }

    pub async fn album_tracks(&self, browse_id: &str) -> Result<Vec<Value>> {
        let response = self.post("browse", json!({"browseId": browse_id})).await?;
        Ok(list_items(&response))
    }

    pub async fn playlist_tracks(&self, playlist_id: &str) -> Result<Vec<Value>> {
        // Playlist browse ids carry a VL prefix the watch ids lack.
        let browse_id = if playlist_id.starts_with("VL") {
            playlist_id.to_string()
        } else {
            format!("VL{}", playlist_id)
        };
        let response = self.post("browse", json!({"browseId": browse_id})).await?;
        Ok(list_items(&response))
    }

    pub async fn artist_songs(&self, browse_id: &str) -> Result<Vec<Value>> {
        let response = self.post("browse", json!({"browseId": browse_id})).await?;
        Ok(list_items(&response))
    }

    /// Radio/watch queue for a track. Without an explicit playlist the
    /// RDAMVM radio playlist derived from the video id is requested.
    pub async fn watch_queue(
        &self,
        video_id: &str,
        playlist_id: Option<&str>,
    ) -> Result<Vec<Value>> {
        let playlist_id = playlist_id
            .map(str::to_string)
            .unwrap_or_else(|| format!("RDAMVM{}", video_id));
        let body = json!({
            "videoId": video_id,
            "playlistId": playlist_id,
            "enablePersistentPlaylistPanel": true,
            "isAudioOnly": true,
        });
        let response = self.post("next", body).await?;

        let mut panels = Vec::new();
        collect_renderers(&response, "playlistPanelVideoRenderer", &mut panels);
        Ok(panels.into_iter().map(flatten_panel_video).collect())
    }

    /// Looks up lyrics for a track. `Ok(None)` means the catalog has no
    /// lyrics attached, which is not a transport failure.
    pub async fn lyrics(&self, video_id: &str) -> Result<Option<Lyrics>> {
        let body = json!({
            "videoId": video_id,
            "enablePersistentPlaylistPanel": true,
            "isAudioOnly": true,
        });
        let response = self.post("next", body).await?;

        let Some(browse_id) = lyrics_browse_id(&response) else {
            info!("📝 [LYRICS] No lyrics tab for video: {}", video_id);
            return Ok(None);
        };

        let page = self.post("browse", json!({"browseId": browse_id})).await?;
        let mut shelves = Vec::new();
        collect_renderers(&page, "musicDescriptionShelfRenderer", &mut shelves);

        let Some(shelf) = shelves.first() else {
            return Ok(None);
        };
        let Some(lyrics) = runs_text(&shelf["description"]) else {
            return Ok(None);
        };

        Ok(Some(Lyrics {
            lyrics,
            source: runs_text(&shelf["footer"]).unwrap_or_else(|| "YouTube Music".to_string()),
        }))
    }

    pub async fn mood_categories(&self) -> Result<MoodCategoryMap> {
        let response = self
            .post("browse", json!({"browseId": "FEmusic_moods_and_genres"}))
            .await?;
        Ok(mood_sections(&response))
    }

    pub async fn mood_playlists(&self, params: &str) -> Result<Vec<Value>> {
        let body = json!({
            "browseId": "FEmusic_moods_and_genres_category",
            "params": params,
        });
        let response = self.post("browse", body).await?;

        let mut rows = Vec::new();
        collect_renderers(&response, "musicTwoRowItemRenderer", &mut rows);
        Ok(rows.into_iter().map(flatten_two_row).collect())
    }

    pub async fn charts(&self, country: &str) -> Result<Vec<(String, Vec<Value>)>> {
        let body = json!({
            "browseId": "FEmusic_charts",
            "formData": {"selectedValues": [country]},
        });
        let response = self.post("browse", body).await?;
        Ok(shelf_sections(&response))
    }

    pub async fn home(&self) -> Result<Vec<(String, Vec<Value>)>> {
        let response = self
            .post("browse", json!({"browseId": "FEmusic_home"}))
            .await?;
        Ok(shelf_sections(&response))
    }
}

fn search_params(category: Category) -> String {
    let kind = match category {
        Category::Songs => "II",
        Category::Videos => "IQ",
        Category::Albums => "IY",
        Category::Artists => "Ig",
        Category::Playlists => "Io",
    };
    format!("EgWKAQ{}AWoMEA4QChADEAQQCRAF", kind)
}

/// Collects every object stored under `key` anywhere in the tree,
/// without descending into matches.
fn collect_renderers<'a>(node: &'a Value, key: &str, out: &mut Vec<&'a Value>) {
    match node {
        Value::Object(map) => {
            for (name, child) in map {
                if name == key {
                    out.push(child);
                } else {
                    collect_renderers(child, key, out);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_renderers(item, key, out);
            }
        }
        _ => {}
    }
}

fn list_items(response: &Value) -> Vec<Value> {
    let mut renderers = Vec::new();
    collect_renderers(response, "musicResponsiveListItemRenderer", &mut renderers);
    renderers.into_iter().map(flatten_list_item).collect()
}

/// Carousel/shelf sections with their header titles, for the charts and
/// home feeds. Untitled shelves are dropped.
fn shelf_sections(response: &Value) -> Vec<(String, Vec<Value>)> {
    let mut sections = Vec::new();
    let mut shelves = Vec::new();
    collect_renderers(response, "musicCarouselShelfRenderer", &mut shelves);
    collect_renderers(response, "musicImmersiveCarouselShelfRenderer", &mut shelves);

    for shelf in shelves {
        let title = runs_text(&shelf["header"]["musicCarouselShelfBasicHeaderRenderer"]["title"]);
        let Some(title) = title else {
            warn!("Skipping shelf without a header title");
            continue;
        };
        let empty = Vec::new();
        let contents = shelf["contents"].as_array().unwrap_or(&empty);
        let items: Vec<Value> = contents.iter().filter_map(flatten_shelf_item).collect();
        sections.push((title, items));
    }
    sections
}

fn flatten_shelf_item(content: &Value) -> Option<Value> {
    if let Some(renderer) = content.get("musicResponsiveListItemRenderer") {
        return Some(flatten_list_item(renderer));
    }
    if let Some(renderer) = content.get("musicTwoRowItemRenderer") {
        return Some(flatten_two_row(renderer));
    }
    if let Some(renderer) = content.get("playlistPanelVideoRenderer") {
        return Some(flatten_panel_video(renderer));
    }
    None
}

fn mood_sections(response: &Value) -> MoodCategoryMap {
    let mut map = MoodCategoryMap::new();
    let mut grids = Vec::new();
    collect_renderers(response, "gridRenderer", &mut grids);

    for grid in grids {
        let section = runs_text(&grid["header"]["gridHeaderRenderer"]["title"])
            .unwrap_or_else(|| "Categories".to_string());
        let mut buttons = Vec::new();
        collect_renderers(grid, "musicNavigationButtonRenderer", &mut buttons);

        let categories: Vec<MoodCategory> = buttons
            .into_iter()
            .filter_map(|button| {
                let title = runs_text(&button["buttonText"])?;
                let params = button["clickCommand"]["browseEndpoint"]["params"]
                    .as_str()?
                    .to_string();
                Some(MoodCategory { title, params })
            })
            .collect();

        if !categories.is_empty() {
            map.entry(section).or_insert_with(Vec::new).extend(categories);
        }
    }
    map
}

fn lyrics_browse_id(response: &Value) -> Option<String> {
    let mut tabs = Vec::new();
    collect_renderers(response, "tabRenderer", &mut tabs);
    tabs.iter()
        .filter_map(|tab| tab["endpoint"]["browseEndpoint"]["browseId"].as_str())
        .find(|id| id.starts_with("MPLYt"))
        .map(str::to_string)
}

/// One row of a search result or track listing.
fn flatten_list_item(renderer: &Value) -> Value {
    let mut item = Map::new();
    let empty = Vec::new();
    let columns = renderer["flexColumns"].as_array().unwrap_or(&empty);

    if let Some(title_run) = columns
        .first()
        .and_then(|col| column_runs(col).first().cloned())
    {
        if let Some(text) = title_run["text"].as_str() {
            item.insert("title".to_string(), json!(text));
        }
        if let Some(id) = title_run["navigationEndpoint"]["watchEndpoint"]["videoId"].as_str() {
            item.insert("videoId".to_string(), json!(id));
        }
    }

    if let Some(id) = renderer["playlistItemData"]["videoId"].as_str() {
        item.insert("videoId".to_string(), json!(id));
    }
    if let Some(id) = renderer["navigationEndpoint"]["browseEndpoint"]["browseId"].as_str() {
        insert_browse_id(&mut item, id);
    }

    let mut fields = RunFields::default();
    for column in columns.iter().skip(1) {
        for (index, run) in column_runs(column).iter().enumerate() {
            // Odd-indexed runs are separators.
            if index % 2 == 0 {
                fields.classify(run);
            }
        }
    }
    fields.store(&mut item);

    if let Some(thumbs) = thumbnail_array(renderer) {
        item.insert("thumbnails".to_string(), thumbs);
    }
    if has_explicit_badge(renderer) {
        item.insert("isExplicit".to_string(), json!(true));
    }

    Value::Object(item)
}

/// One tile of a carousel or grid (albums, playlists, home feed rows).
fn flatten_two_row(renderer: &Value) -> Value {
    let mut item = Map::new();

    if let Some(text) = renderer["title"]["runs"][0]["text"].as_str() {
        item.insert("title".to_string(), json!(text));
    }

    let endpoint = &renderer["navigationEndpoint"];
    if let Some(id) = endpoint["browseEndpoint"]["browseId"].as_str() {
        insert_browse_id(&mut item, id);
    }
    if let Some(id) = endpoint["watchEndpoint"]["videoId"].as_str() {
        item.insert("videoId".to_string(), json!(id));
    }
    if let Some(id) = endpoint["watchEndpoint"]["playlistId"]
        .as_str()
        .or_else(|| endpoint["watchPlaylistEndpoint"]["playlistId"].as_str())
    {
        item.insert("playlistId".to_string(), json!(id));
    }

    let mut fields = RunFields::default();
    for (index, run) in renderer["subtitle"]["runs"]
        .as_array()
        .unwrap_or(&Vec::new())
        .iter()
        .enumerate()
    {
        if index % 2 == 0 {
            fields.classify(run);
        }
    }
    fields.store(&mut item);

    if let Some(thumbs) = thumbnail_array(renderer) {
        item.insert("thumbnails".to_string(), thumbs);
    }
    if has_explicit_badge(renderer) {
        item.insert("isExplicit".to_string(), json!(true));
    }

    Value::Object(item)
}

/// One entry of a watch/radio queue panel.
fn flatten_panel_video(renderer: &Value) -> Value {
    let mut item = Map::new();

    if let Some(id) = renderer["videoId"].as_str() {
        item.insert("videoId".to_string(), json!(id));
    }
    if let Some(title) = runs_text(&renderer["title"]) {
        item.insert("title".to_string(), json!(title));
    }
    if let Some(length) = runs_text(&renderer["lengthText"]) {
        item.insert("duration".to_string(), json!(length));
    }

    let mut fields = RunFields::default();
    for (index, run) in renderer["longBylineText"]["runs"]
        .as_array()
        .unwrap_or(&Vec::new())
        .iter()
        .enumerate()
    {
        if index % 2 == 0 {
            fields.classify(run);
        }
    }
    fields.store(&mut item);

    if let Some(thumbs) = thumbnail_array(renderer) {
        item.insert("thumbnails".to_string(), thumbs);
    }
    if has_explicit_badge(renderer) {
        item.insert("isExplicit".to_string(), json!(true));
    }

    Value::Object(item)
}

/// Fields recovered from subtitle/byline runs. A run is an artist link,
/// a duration or year token, a counter, or a kind label to skip.
#[derive(Default)]
struct RunFields {
    artists: Vec<String>,
    duration: Option<String>,
    year: Option<String>,
    views: Option<String>,
    subscribers: Option<String>,
}

const KIND_LABELS: [&str; 10] = [
    "Song", "Video", "Album", "Single", "EP", "Artist", "Playlist", "Profile", "Episode",
    "Podcast",
];

impl RunFields {
    fn classify(&mut self, run: &Value) {
        let text = run["text"].as_str().unwrap_or("").trim();
        if text.is_empty() {
            return;
        }
        let browse_id = run["navigationEndpoint"]["browseEndpoint"]["browseId"]
            .as_str()
            .unwrap_or("");

        if matches_pattern(r"^\d+:\d{2}(?::\d{2})?$", text) {
            self.duration.get_or_insert_with(|| text.to_string());
        } else if matches_pattern(r"^(19|20)\d{2}$", text) {
            self.year.get_or_insert_with(|| text.to_string());
        } else if matches_pattern(r"(?i)^[\d.,]+[KMB]?\s+(views|plays|subscribers)$", text) {
            let count = text.split_whitespace().next().unwrap_or(text).to_string();
            if text.to_lowercase().ends_with("subscribers") {
                self.subscribers.get_or_insert(count);
            } else {
                self.views.get_or_insert(count);
            }
        } else if KIND_LABELS.contains(&text) {
            // Kind labels lead most subtitles; nothing to keep.
        } else if browse_id.starts_with("MPRE") {
            // Album link inside a song subtitle.
        } else {
            self.artists.push(text.to_string());
        }
    }

    fn store(self, item: &mut Map<String, Value>) {
        if !self.artists.is_empty() {
            let artists: Vec<Value> = self
                .artists
                .iter()
                .map(|name| json!({"name": name}))
                .collect();
            item.insert("artists".to_string(), json!(artists));
            // Playlists carry their owner under `author`.
            item.insert("author".to_string(), json!({"name": self.artists.join(", ")}));
        }
        if let Some(duration) = self.duration {
            item.insert("duration".to_string(), json!(duration));
        }
        if let Some(year) = self.year {
            item.insert("year".to_string(), json!(year));
        }
        if let Some(views) = self.views {
            item.insert("views".to_string(), json!(views));
        }
        if let Some(subscribers) = self.subscribers {
            item.insert("subscribers".to_string(), json!(subscribers));
        }
    }
}

fn matches_pattern(pattern: &str, text: &str) -> bool {
    Regex::new(pattern)
        .map(|re| re.is_match(text))
        .unwrap_or(false)
}

/// Playlist ids come back wrapped in a VL browse prefix. The browse id
/// is kept as-is, with the bare playlist id stored next to it, so the
/// record stays browse-keyed while watch requests get the unprefixed
/// form.
fn insert_browse_id(item: &mut Map<String, Value>, id: &str) {
    item.insert("browseId".to_string(), json!(id));
    if let Some(playlist_id) = id.strip_prefix("VL") {
        item.insert("playlistId".to_string(), json!(playlist_id));
    }
}

fn column_runs(column: &Value) -> Vec<&Value> {
    column["musicResponsiveListItemFlexColumnRenderer"]["text"]["runs"]
        .as_array()
        .map(|runs| runs.iter().collect())
        .unwrap_or_default()
}

fn runs_text(node: &Value) -> Option<String> {
    let runs = node.get("runs")?.as_array()?;
    let text: String = runs
        .iter()
        .filter_map(|run| run["text"].as_str())
        .collect();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn thumbnail_array(renderer: &Value) -> Option<Value> {
    let candidates = [
        &renderer["thumbnail"]["musicThumbnailRenderer"]["thumbnail"]["thumbnails"],
        &renderer["thumbnailRenderer"]["musicThumbnailRenderer"]["thumbnail"]["thumbnails"],
        &renderer["thumbnail"]["thumbnails"],
    ];
    candidates.into_iter().find(|v| v.is_array()).cloned()
}

fn has_explicit_badge(renderer: &Value) -> bool {
    let empty = Vec::new();
    ["badges", "subtitleBadges"].iter().any(|key| {
        renderer[*key]
            .as_array()
            .unwrap_or(&empty)
            .iter()
            .any(|badge| {
                badge["musicInlineBadgeRenderer"]["icon"]["iconType"].as_str()
                    == Some("MUSIC_EXPLICIT_BADGE")
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song_renderer() -> Value {
        json!({
            "thumbnail": {"musicThumbnailRenderer": {"thumbnail": {"thumbnails": [
                {"url": "https://img/60.jpg", "width": 60, "height": 60},
                {"url": "https://img/544.jpg", "width": 544, "height": 544}
            ]}}},
            "flexColumns": [
                {"musicResponsiveListItemFlexColumnRenderer": {"text": {"runs": [
                    {"text": "Some Song", "navigationEndpoint": {"watchEndpoint": {"videoId": "vid123"}}}
                ]}}},
                {"musicResponsiveListItemFlexColumnRenderer": {"text": {"runs": [
                    {"text": "Song"},
                    {"text": " • "},
                    {"text": "Alice", "navigationEndpoint": {"browseEndpoint": {"browseId": "UCalice"}}},
                    {"text": " & "},
                    {"text": "Bob", "navigationEndpoint": {"browseEndpoint": {"browseId": "UCbob"}}},
                    {"text": " • "},
                    {"text": "Greatest Hits", "navigationEndpoint": {"browseEndpoint": {"browseId": "MPREalbum"}}},
                    {"text": " • "},
                    {"text": "3:45"}
                ]}}}
            ],
            "badges": [{"musicInlineBadgeRenderer": {"icon": {"iconType": "MUSIC_EXPLICIT_BADGE"}}}]
        })
    }

    #[test]
    fn test_flatten_search_song() {
        let item = flatten_list_item(&song_renderer());
        assert_eq!(item["title"], "Some Song");
        assert_eq!(item["videoId"], "vid123");
        assert_eq!(item["duration"], "3:45");
        assert_eq!(item["isExplicit"], true);
        assert_eq!(item["artists"][0]["name"], "Alice");
        assert_eq!(item["artists"][1]["name"], "Bob");
        // The album link must not be mistaken for an artist.
        assert_eq!(item["artists"].as_array().unwrap().len(), 2);
        assert_eq!(item["thumbnails"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_flatten_artist_row() {
        let renderer = json!({
            "flexColumns": [
                {"musicResponsiveListItemFlexColumnRenderer": {"text": {"runs": [{"text": "Some Artist"}]}}},
                {"musicResponsiveListItemFlexColumnRenderer": {"text": {"runs": [
                    {"text": "Artist"},
                    {"text": " • "},
                    {"text": "10.3M subscribers"}
                ]}}}
            ],
            "navigationEndpoint": {"browseEndpoint": {"browseId": "UCartist"}}
        });
        let item = flatten_list_item(&renderer);
        assert_eq!(item["title"], "Some Artist");
        assert_eq!(item["browseId"], "UCartist");
        assert_eq!(item["subscribers"], "10.3M");
        assert!(item.get("artists").is_none());
    }

    #[test]
    fn test_flatten_two_row_album() {
        let renderer = json!({
            "title": {"runs": [{"text": "Greatest Hits"}]},
            "subtitle": {"runs": [
                {"text": "Album"},
                {"text": " • "},
                {"text": "Band", "navigationEndpoint": {"browseEndpoint": {"browseId": "UCband"}}},
                {"text": " • "},
                {"text": "1998"}
            ]},
            "navigationEndpoint": {"browseEndpoint": {"browseId": "MPREhits"}},
            "thumbnailRenderer": {"musicThumbnailRenderer": {"thumbnail": {"thumbnails": [
                {"url": "https://img/226.jpg", "width": 226, "height": 226}
            ]}}}
        });
        let item = flatten_two_row(&renderer);
        assert_eq!(item["title"], "Greatest Hits");
        assert_eq!(item["browseId"], "MPREhits");
        assert_eq!(item["year"], "1998");
        assert_eq!(item["artists"][0]["name"], "Band");
        assert!(item["thumbnails"].is_array());
    }

    #[test]
    fn test_flatten_two_row_playlist_carries_both_ids() {
        let renderer = json!({
            "title": {"runs": [{"text": "Chill Mix"}]},
            "subtitle": {"runs": [{"text": "Playlist"}, {"text": " • "}, {"text": "YouTube Music"}]},
            "navigationEndpoint": {"browseEndpoint": {"browseId": "VLRDCLAK5uy_abc"}}
        });
        let item = flatten_two_row(&renderer);
        assert_eq!(item["browseId"], "VLRDCLAK5uy_abc");
        assert_eq!(item["playlistId"], "RDCLAK5uy_abc");
        assert_eq!(item["author"]["name"], "YouTube Music");
    }

    #[test]
    fn test_flatten_panel_video() {
        let renderer = json!({
            "videoId": "watch1",
            "title": {"runs": [{"text": "Queued Track"}]},
            "lengthText": {"runs": [{"text": "4:05"}]},
            "longBylineText": {"runs": [
                {"text": "Artist", "navigationEndpoint": {"browseEndpoint": {"browseId": "UCa"}}},
                {"text": " • "},
                {"text": "Album", "navigationEndpoint": {"browseEndpoint": {"browseId": "MPREa"}}},
                {"text": " • "},
                {"text": "2020"}
            ]},
            "thumbnail": {"thumbnails": [{"url": "https://img/t.jpg", "width": 400, "height": 400}]}
        });
        let item = flatten_panel_video(&renderer);
        assert_eq!(item["videoId"], "watch1");
        assert_eq!(item["title"], "Queued Track");
        assert_eq!(item["duration"], "4:05");
        assert_eq!(item["year"], "2020");
        assert_eq!(item["artists"].as_array().unwrap().len(), 1);
        assert!(item["thumbnails"].is_array());
    }

    #[test]
    fn test_collect_renderers_finds_nested_items() {
        let tree = json!({
            "contents": {"sectionListRenderer": {"contents": [
                {"musicShelfRenderer": {"contents": [
                    {"musicResponsiveListItemRenderer": {"flexColumns": []}},
                    {"musicResponsiveListItemRenderer": {"flexColumns": []}}
                ]}},
                {"somethingElse": {"musicResponsiveListItemRenderer": {"flexColumns": []}}}
            ]}}
        });
        let mut found = Vec::new();
        collect_renderers(&tree, "musicResponsiveListItemRenderer", &mut found);
        assert_eq!(found.len(), 3);
    }

    #[test]
    fn test_shelf_sections() {
        let response = json!({
            "contents": [
                {"musicCarouselShelfRenderer": {
                    "header": {"musicCarouselShelfBasicHeaderRenderer": {"title": {"runs": [{"text": "Top songs"}]}}},
                    "contents": [
                        {"musicTwoRowItemRenderer": {
                            "title": {"runs": [{"text": "Hit"}]},
                            "navigationEndpoint": {"watchEndpoint": {"videoId": "v1"}}
                        }}
                    ]
                }},
                {"musicCarouselShelfRenderer": {"contents": []}}
            ]
        });
        let sections = shelf_sections(&response);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].0, "Top songs");
        assert_eq!(sections[0].1[0]["videoId"], "v1");
    }

    #[test]
    fn test_mood_sections() {
        let response = json!({
            "contents": [
                {"gridRenderer": {
                    "header": {"gridHeaderRenderer": {"title": {"runs": [{"text": "Moods & moments"}]}}},
                    "items": [
                        {"musicNavigationButtonRenderer": {
                            "buttonText": {"runs": [{"text": "Chill"}]},
                            "clickCommand": {"browseEndpoint": {"browseId": "FEmusic_moods_and_genres_category", "params": "ggMP123"}}
                        }},
                        {"musicNavigationButtonRenderer": {
                            "buttonText": {"runs": [{"text": "Focus"}]},
                            "clickCommand": {"browseEndpoint": {"browseId": "FEmusic_moods_and_genres_category", "params": "ggMP456"}}
                        }}
                    ]
                }}
            ]
        });
        let map = mood_sections(&response);
        let moods = map.get("Moods & moments").unwrap();
        assert_eq!(moods.len(), 2);
        assert_eq!(moods[0].title, "Chill");
        assert_eq!(moods[0].params, "ggMP123");
    }

    #[test]
    fn test_lyrics_browse_id() {
        let response = json!({
            "tabs": [
                {"tabRenderer": {"endpoint": {"browseEndpoint": {"browseId": "MPTRt_abc"}}}},
                {"tabRenderer": {"endpoint": {"browseEndpoint": {"browseId": "MPLYt_xyz"}}}}
            ]
        });
        assert_eq!(lyrics_browse_id(&response).as_deref(), Some("MPLYt_xyz"));
        assert_eq!(lyrics_browse_id(&json!({})), None);
    }

    #[test]
    fn test_search_params_per_category() {
        assert_eq!(search_params(Category::Songs), "EgWKAQIIAWoMEA4QChADEAQQCRAF");
        assert_eq!(search_params(Category::Playlists), "EgWKAQIoAWoMEA4QChADEAQQCRAF");
        assert_ne!(search_params(Category::Albums), search_params(Category::Artists));
    }
}
