use std::io::Write;

use log::{debug, info};
use reqwest::Client;
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::backend::innertube::InnerTube;
use crate::backend::saavn::SaavnBackend;
use crate::backend::ytdlp::YtDlp;
use crate::backend::ytmusic::YtMusicBackend;
use crate::backend::{Capabilities, MusicBackend};
use crate::catalog::MusicSource;
use crate::config::AppConfig;
use crate::errors::{AppError, Result};
use crate::protocol::{Request, Response};

/// Request router and stdin/stdout loop.
///
/// One JSON object per input line, one JSON object per output line,
/// strictly in order. Everything diagnostic goes to stderr through the
/// logger; stdout carries protocol JSON only.
pub struct Service {
    config: AppConfig,
    client: Option<Client>,
    ytdlp: Option<YtDlp>,
}

impl Service {
    pub fn new(config: AppConfig, client: Option<Client>, ytdlp: Option<YtDlp>) -> Self {
        Self {
            config,
            client,
            ytdlp,
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            ytmusic: self.client.is_some(),
            ytdlp: self.ytdlp.is_some(),
        }
    }

    /// The readiness line written before any request is read.
    pub fn startup_response(&self) -> Response {
        let capabilities = self.capabilities();
        Response::ok(json!({
            "status": "service_ready",
            "has_ytmusic": capabilities.ytmusic,
            "has_ytdlp": capabilities.ytdlp,
        }))
    }

    pub async fn run(&self) -> Result<()> {
        let mut stdout = std::io::stdout();
        self.serve(BufReader::new(tokio::io::stdin()), &mut stdout)
            .await
    }

    /// Drives the line protocol over any reader/writer pair: readiness
    /// line first, then one response line per non-blank input line, in
    /// order.
    async fn serve<R, W>(&self, reader: R, writer: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        write_response(writer, &self.startup_response())?;

        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            debug!("Received request: {}", line);
            let response = self.handle_line(line).await;
            if write_response(writer, &response).is_err() {
                // Nobody is listening on the other end anymore.
                break;
            }
        }

        info!("👋 [SERVICE] Input closed, shutting down");
        Ok(())
    }

    pub async fn handle_line(&self, line: &str) -> Response {
        let request: Request = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => return Response::err(format!("Invalid JSON: {}", e)),
        };
        self.handle_request(request).await
    }

    pub async fn handle_request(&self, request: Request) -> Response {
        let source = MusicSource::from_param(request.music_source.as_deref());
        debug!("🎵 Action '{}' via {}", request.action, source.as_str());

        match self.dispatch(&request, source).await {
            Ok(data) => Response::ok(data),
            Err(e) => Response::err(e.to_string()),
        }
    }

    async fn dispatch(&self, request: &Request, source: MusicSource) -> Result<Value> {
        let backend = self.backend_for(source, &request.action)?;
        let limit = request.limit.unwrap_or(20);
        let query = request.query.as_deref().unwrap_or("");
        let video_id = request.video_id.as_deref().unwrap_or("");
        let browse_id = request.browse_id.as_deref().unwrap_or("");
        let playlist_id = request.playlist_id.as_deref().unwrap_or("");

        let data = match request.action.as_str() {
            "search" => serde_json::to_value(backend.search_all(query, limit).await?)?,
            "stream" => serde_json::to_value(backend.get_stream_info(video_id).await?)?,
            "album_tracks" => serde_json::to_value(backend.get_album_tracks(browse_id).await?)?,
            "playlist_tracks" => {
                serde_json::to_value(backend.get_playlist_tracks(playlist_id).await?)?
            }
            "artist_songs" => serde_json::to_value(backend.get_artist_songs(browse_id).await?)?,
            "watch_playlist" => serde_json::to_value(
                backend
                    .get_watch_playlist(video_id, request.playlist_id.as_deref())
                    .await?,
            )?,
            "song_suggestions" => {
                serde_json::to_value(backend.get_song_suggestions(video_id).await?)?
            }
            "lyrics" => serde_json::to_value(backend.get_lyrics(video_id).await?)?,
            "mood_categories" => serde_json::to_value(backend.get_mood_categories().await?)?,
            "mood_playlists" => serde_json::to_value(
                backend
                    .get_mood_playlists(request.params.as_deref().unwrap_or(""))
                    .await?,
            )?,
            "charts" => serde_json::to_value(
                backend
                    .get_charts(request.country.as_deref().unwrap_or("ZZ"))
                    .await?,
            )?,
            "home" => serde_json::to_value(backend.get_home().await?)?,
            other => return Err(AppError::UnknownAction(other.to_string())),
        };
        Ok(data)
    }

    fn backend_for(&self, source: MusicSource, action: &str) -> Result<Box<dyn MusicBackend>> {
        match source {
            MusicSource::Jiosaavn => {
                let Some(client) = &self.client else {
                    return Err(AppError::Unavailable(format!(
                        "HTTP client not available - {} not supported",
                        action
                    )));
                };
                Ok(Box::new(SaavnBackend::new(client.clone(), &self.config)))
            }
            MusicSource::YoutubeMusic => {
                let catalog = self
                    .client
                    .clone()
                    .map(|client| InnerTube::new(client, &self.config));
                Ok(Box::new(YtMusicBackend::new(catalog, self.ytdlp.clone())))
            }
        }
    }
}

fn write_response<W: Write>(writer: &mut W, response: &Response) -> Result<()> {
    let payload = serde_json::to_string(response)?;
    debug!("Sending response: {}", payload);
    writeln!(writer, "{}", payload)?;
    writer.flush()?;
    Ok(())
}
