use std::process::{Command, Stdio};

use log::{info, warn};
use serde_json::Value;

use crate::catalog::StreamInfo;
use crate::errors::{AppError, Result};

/// Audio stream extraction through the yt-dlp binary.
#[derive(Debug, Clone)]
pub struct YtDlp {
    binary: String,
}

impl YtDlp {
    pub fn new(binary: String) -> Self {
        Self { binary }
    }

    /// Runs `yt-dlp --version` to see whether the binary is usable.
    pub fn probe(&self) -> bool {
        Command::new(&self.binary)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    /// Resolves a playable audio stream for a video id, trying the music
    /// site URL first and plain YouTube second. The error for a total
    /// failure carries the last URL's failure message.
    pub fn extract_stream(&self, video_id: &str) -> Result<StreamInfo> {
        let urls = [
            format!("https://music.youtube.com/watch?v={}", video_id),
            format!("https://www.youtube.com/watch?v={}", video_id),
        ];

        let mut last_error = String::new();
        for url in &urls {
            info!("🔍 [STREAM] Trying to extract stream from: {}", url);
            match self.extract_from_url(url) {
                Ok(stream) => {
                    info!(
                        "✅ [STREAM] Extracted stream: quality={}, duration={}",
                        stream.quality, stream.duration
                    );
                    return Ok(stream);
                }
                Err(e) => {
                    warn!("⚠️ [STREAM] Failed to extract from {}: {}", url, e);
                    last_error = e.to_string();
                }
            }
        }

        Err(AppError::Extraction(format!(
            "Stream extraction failed for all URLs. Last error: {}",
            last_error
        )))
    }

    fn extract_from_url(&self, url: &str) -> Result<StreamInfo> {
        let cmd = Command::new(&self.binary)
            .args([
                "--dump-json",
                "--format",
                "bestaudio[ext=m4a]/bestaudio[ext=webm]/bestaudio/best",
                "--no-playlist",
                "--no-warnings",
                "--no-check-certificate",
                "--socket-timeout",
                "10",
                "--retries",
                "1",
                url,
            ])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let output = cmd.wait_with_output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::Extraction(format!(
                "yt-dlp extraction failed: {}",
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let line = stdout.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
        let info: Value = serde_json::from_str(line)?;

        let stream_url = match info["url"].as_str().filter(|u| !u.is_empty()) {
            Some(direct) => direct.to_string(),
            None => best_audio_url(&info)
                .ok_or_else(|| AppError::Extraction("No valid stream URL found".to_string()))?,
        };

        Ok(StreamInfo {
            url: stream_url,
            title: info["title"].as_str().unwrap_or("").to_string(),
            duration: info["duration"].as_f64().unwrap_or(0.0),
            quality: quality_label(&info),
        })
    }
}

/// Ranks candidate formats when the extractor gave no direct URL:
/// anything that still has an audio codec qualifies, m4a beats webm
/// beats the rest, and higher bitrate wins within a container.
fn best_audio_url(info: &Value) -> Option<String> {
    let formats = info["formats"].as_array()?;
    let mut best: Option<(&Value, (u8, f64))> = None;
    for format in formats {
        if format["acodec"].as_str() == Some("none") {
            continue;
        }
        let tier: u8 = match format["ext"].as_str() {
            Some("m4a") => 3,
            Some("webm") => 2,
            _ => 1,
        };
        let key = (tier, format["abr"].as_f64().unwrap_or(0.0));
        match &best {
            Some((_, best_key)) if key <= *best_key => {}
            _ => best = Some((format, key)),
        }
    }
    best.and_then(|(format, _)| format["url"].as_str())
        .filter(|u| !u.is_empty())
        .map(str::to_string)
}

/// Bitrate label: the extractor's top-level `abr`, else the first
/// format's, else `"unknown"`.
fn quality_label(info: &Value) -> String {
    let abr = match &info["abr"] {
        Value::Null => info["formats"]
            .as_array()
            .and_then(|formats| formats.first())
            .map(|format| &format["abr"]),
        value => Some(value),
    };
    match abr {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.clone(),
        _ => "unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prefers_container_over_bitrate() {
        let info = json!({
            "formats": [
                {"ext": "webm", "acodec": "opus", "abr": 160.0, "url": "https://a/webm"},
                {"ext": "m4a", "acodec": "mp4a.40.2", "abr": 128.0, "url": "https://a/m4a"}
            ]
        });
        assert_eq!(best_audio_url(&info).as_deref(), Some("https://a/m4a"));
    }

    #[test]
    fn test_higher_bitrate_wins_within_container() {
        let info = json!({
            "formats": [
                {"ext": "m4a", "acodec": "mp4a.40.2", "abr": 48.0, "url": "https://a/low"},
                {"ext": "m4a", "acodec": "mp4a.40.2", "abr": 256.0, "url": "https://a/high"}
            ]
        });
        assert_eq!(best_audio_url(&info).as_deref(), Some("https://a/high"));
    }

    #[test]
    fn test_video_only_formats_are_skipped() {
        let info = json!({
            "formats": [
                {"ext": "mp4", "acodec": "none", "abr": 0.0, "url": "https://a/video"},
                {"ext": "webm", "acodec": "opus", "abr": 96.0, "url": "https://a/audio"}
            ]
        });
        assert_eq!(best_audio_url(&info).as_deref(), Some("https://a/audio"));
    }

    #[test]
    fn test_missing_acodec_still_qualifies() {
        let info = json!({
            "formats": [{"ext": "m4a", "abr": 128.0, "url": "https://a/m4a"}]
        });
        assert_eq!(best_audio_url(&info).as_deref(), Some("https://a/m4a"));
    }

    #[test]
    fn test_no_formats_yields_none() {
        assert_eq!(best_audio_url(&json!({})), None);
        assert_eq!(best_audio_url(&json!({"formats": []})), None);
    }

    #[test]
    fn test_quality_label_fallbacks() {
        assert_eq!(quality_label(&json!({"abr": 128.5})), "128.5");
        assert_eq!(
            quality_label(&json!({"formats": [{"abr": 96.0}]})),
            "96.0"
        );
        assert_eq!(quality_label(&json!({"formats": [{}]})), "unknown");
        assert_eq!(quality_label(&json!({})), "unknown");
    }
}
