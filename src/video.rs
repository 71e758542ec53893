//! Recognition of video-platform links.
//!
//! Video pages are not scraped. A recognised link only contributes a
//! platform-specific title placeholder and a thumbnail.

use crate::model::DEFAULT_IMAGE;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;
use url::Url;

static BILIBILI_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/video/(BV\w+)").expect("Invalid bilibili regex"));

static INSTAGRAM_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/p/([^/]+)").expect("Invalid instagram regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoPlatform {
    YouTube,
    Bilibili,
    Instagram,
    Xiaohongshu,
}

impl VideoPlatform {
    /// Detect the platform from the host name.
    pub fn detect(url: &Url) -> Option<Self> {
        let host = url.host_str()?.to_lowercase();

        if host.contains("youtube.com") || host.contains("youtu.be") {
            Some(Self::YouTube)
        } else if host.contains("bilibili.com") {
            Some(Self::Bilibili)
        } else if host.contains("instagram.com") {
            Some(Self::Instagram)
        } else if host.contains("xiaohongshu.com") || host.contains("xhslink.com") {
            Some(Self::Xiaohongshu)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::YouTube => "youtube",
            Self::Bilibili => "bilibili",
            Self::Instagram => "instagram",
            Self::Xiaohongshu => "xiaohongshu",
        }
    }

    /// Title used when nothing better is known about the video.
    pub fn recipe_title(&self) -> &'static str {
        match self {
            Self::Xiaohongshu => "小红书食谱",
            _ => "视频食谱",
        }
    }

    pub fn thumbnail(&self, video_id: &str) -> String {
        match self {
            Self::YouTube => format!("https://img.youtube.com/vi/{}/maxresdefault.jpg", video_id),
            _ => DEFAULT_IMAGE.to_string(),
        }
    }

    fn video_id(&self, url: &Url) -> Option<String> {
        let id = match self {
            Self::YouTube => {
                if url.host_str().is_some_and(|h| h.contains("youtu.be")) {
                    last_segment(url)
                } else {
                    url.query_pairs()
                        .find(|(key, _)| key == "v")
                        .map(|(_, value)| value.into_owned())
                }
            }
            Self::Bilibili => BILIBILI_ID
                .captures(url.path())
                .map(|caps| caps[1].to_string()),
            Self::Instagram => INSTAGRAM_ID
                .captures(url.path())
                .map(|caps| caps[1].to_string()),
            Self::Xiaohongshu => last_segment(url),
        };

        id.filter(|id| !id.is_empty())
    }
}

impl fmt::Display for VideoPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn last_segment(url: &Url) -> Option<String> {
    url.path_segments()?
        .filter(|s| !s.is_empty())
        .last()
        .map(String::from)
}

/// What can be known about a video link without fetching it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoMetadata {
    pub platform: VideoPlatform,
    pub video_id: String,
    pub title: String,
    pub thumbnail: String,
    pub url: String,
}

impl VideoMetadata {
    /// `None` unless `url` is a video link with a recognisable id.
    pub fn from_url(url: &str) -> Option<Self> {
        let parsed = Url::parse(url).ok()?;
        let platform = VideoPlatform::detect(&parsed)?;
        let video_id = platform.video_id(&parsed)?;

        Some(Self {
            platform,
            title: platform.recipe_title().to_string(),
            thumbnail: platform.thumbnail(&video_id),
            video_id,
            url: url.to_string(),
        })
    }
}
