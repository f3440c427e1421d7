pub mod innertube;
pub mod saavn;
pub mod ytdlp;
pub mod ytmusic;

use std::future::Future;

use async_trait::async_trait;
use log::error;
use serde::Serialize;

use crate::catalog::{
    Category, Lyrics, MoodCategoryMap, SearchResult, SearchResultSet, Section, StreamInfo,
};
use crate::errors::{AppError, Result};

/// What this process can actually do, probed once at startup and handed
/// to whoever needs it. `ytmusic` means the live catalog client came up;
/// `ytdlp` means the extractor binary answered a version probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct Capabilities {
    pub ytmusic: bool,
    pub ytdlp: bool,
}

/// Common interface over the two music catalogs. The mood/charts/home
/// feeds only exist on YouTube Music, so they default to unsupported.
#[async_trait]
pub trait MusicBackend: Send + Sync {
    async fn search_all(&self, query: &str, limit: usize) -> Result<SearchResultSet>;

    async fn get_stream_info(&self, video_id: &str) -> Result<StreamInfo>;

    async fn get_album_tracks(&self, browse_id: &str) -> Result<Vec<SearchResult>>;

    async fn get_playlist_tracks(&self, playlist_id: &str) -> Result<Vec<SearchResult>>;

    async fn get_artist_songs(&self, browse_id: &str) -> Result<Vec<SearchResult>>;

    async fn get_watch_playlist(
        &self,
        video_id: &str,
        playlist_id: Option<&str>,
    ) -> Result<Vec<SearchResult>>;

    async fn get_song_suggestions(&self, video_id: &str) -> Result<Vec<SearchResult>>;

    async fn get_lyrics(&self, video_id: &str) -> Result<Lyrics>;

    async fn get_mood_categories(&self) -> Result<MoodCategoryMap> {
        Err(AppError::Unavailable(
            "mood_categories not supported for this source".to_string(),
        ))
    }

    async fn get_mood_playlists(&self, _params: &str) -> Result<Vec<SearchResult>> {
        Err(AppError::Unavailable(
            "mood_playlists not supported for this source".to_string(),
        ))
    }

    async fn get_charts(&self, _country: &str) -> Result<Vec<Section>> {
        Err(AppError::Unavailable(
            "charts not supported for this source".to_string(),
        ))
    }

    async fn get_home(&self) -> Result<Vec<Section>> {
        Err(AppError::Unavailable(
            "home not supported for this source".to_string(),
        ))
    }
}

/// Runs one fetch per category and collects whatever succeeds. A failed
/// category logs the error and contributes an empty list; the other
/// categories are unaffected.
pub async fn search_categories<F, Fut>(limit: usize, fetch: F) -> SearchResultSet
where
    F: Fn(Category) -> Fut,
    Fut: Future<Output = Result<Vec<SearchResult>>>,
{
    let mut set = SearchResultSet::default();
    for category in Category::ALL {
        match fetch(category).await {
            Ok(mut results) => {
                results.truncate(limit);
                *set.category_mut(category) = results;
            }
            Err(e) => {
                error!("Error searching {}: {}", category.as_str(), e);
            }
        }
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MusicSource;
    use crate::catalog::normalize::normalize;
    use serde_json::json;

    fn song(id: &str) -> SearchResult {
        normalize(
            &json!({"videoId": id, "title": format!("Track {id}")}),
            Category::Songs,
            MusicSource::YoutubeMusic,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_failed_category_leaves_others_intact() {
        let set = search_categories(20, |category| async move {
            match category {
                Category::Albums => Err(AppError::Api("upstream exploded".to_string())),
                _ => Ok(vec![song(category.as_str())]),
            }
        })
        .await;

        assert_eq!(set.songs.len(), 1);
        assert_eq!(set.albums.len(), 0);
        assert_eq!(set.artists.len(), 1);
        assert_eq!(set.playlists.len(), 1);
        assert_eq!(set.videos.len(), 1);
    }

    #[tokio::test]
    async fn test_limit_truncates_each_category() {
        let set = search_categories(2, |_| async {
            Ok(vec![song("a"), song("b"), song("c"), song("d")])
        })
        .await;

        assert_eq!(set.songs.len(), 2);
        assert_eq!(set.videos.len(), 2);
        assert_eq!(set.songs[0].id, "a");
        assert_eq!(set.songs[1].id, "b");
    }
}
