use crate::error::CaptureError;
use crate::extractors::{RecipeTextExtractor, UNTITLED};
use crate::fetcher::PageFetcher;
use crate::model::{Cuisine, ExtractedRecipe};
use crate::pipelines::text;
use crate::providers::LlmProvider;
use crate::video::VideoMetadata;
use log::{debug, info};
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use std::time::Duration;
use url::Url;

static BODY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("Invalid body selector"));
static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("Invalid title selector"));
static OG_IMAGE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"meta[property="og:image"]"#).expect("Invalid og:image selector")
});

const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Readable content of a fetched page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageContent {
    /// Document title followed by the body's visible text, one node per line
    pub text: String,
    /// `og:image`, resolved against the page URL
    pub image: Option<String>,
}

/// Capture a recipe from a URL.
///
/// Video links are never fetched: they produce the platform placeholder
/// title and thumbnail, or run `text` (a pasted caption) through the engine
/// when given. Any other URL is fetched and its visible text extracted.
pub async fn process(
    extractor: &RecipeTextExtractor,
    url: &str,
    text: Option<&str>,
    image_url: Option<&str>,
    provider: Option<&dyn LlmProvider>,
    timeout: Duration,
) -> Result<ExtractedRecipe, CaptureError> {
    let caller_text = text.filter(|t| !t.trim().is_empty());
    let caller_image = image_url.filter(|i| !i.trim().is_empty());

    if let Some(video) = VideoMetadata::from_url(url) {
        info!("Recognised {} video {}", video.platform, video.video_id);
        let image = caller_image.unwrap_or(video.thumbnail.as_str());

        let Some(caption) = caller_text else {
            return Ok(video_placeholder(extractor, &video, image));
        };

        // A video id makes a poor title, so the platform title stands in.
        let mut recipe =
            text::process(extractor, caption, Some(image), None, provider, timeout).await;
        if recipe.title == UNTITLED {
            recipe.title = video.title;
        }
        return Ok(recipe);
    }

    let fetcher = PageFetcher::new(Some(timeout))?;
    let html = fetcher.fetch(url).await?;
    let page = page_content(&html, url);
    debug!(
        "Page {} yielded {} bytes of text (og:image: {:?})",
        url,
        page.text.len(),
        page.image
    );

    let image = caller_image.or(page.image.as_deref());
    let body = caller_text.unwrap_or(page.text.as_str());

    Ok(text::process(extractor, body, image, Some(url), provider, timeout).await)
}

fn video_placeholder(
    extractor: &RecipeTextExtractor,
    video: &VideoMetadata,
    image: &str,
) -> ExtractedRecipe {
    let placeholders = extractor.placeholders();
    ExtractedRecipe {
        title: video.title.clone(),
        image: extractor.image_or_default(Some(image)),
        ingredients: vec![placeholders.ingredients.clone()],
        steps: vec![placeholders.steps.clone()],
        cuisine: Cuisine::default(),
    }
}

/// Pull the title, visible body text and preview image out of an HTML page.
pub fn page_content(html: &str, page_url: &str) -> PageContent {
    let document = Html::parse_document(html);
    let mut lines = Vec::new();

    if let Some(title) = document.select(&TITLE).next() {
        let title = title.text().collect::<String>();
        if !title.trim().is_empty() {
            lines.push(title.trim().to_string());
        }
    }

    if let Some(body) = document.select(&BODY).next() {
        visible_text(body, &mut lines);
    }

    let image = document
        .select(&OG_IMAGE)
        .filter_map(|meta| meta.value().attr("content"))
        .map(str::trim)
        .find(|content| !content.is_empty())
        .map(|content| resolve(page_url, content));

    PageContent {
        text: lines.join("\n"),
        image,
    }
}

fn visible_text(element: ElementRef, lines: &mut Vec<String>) {
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            if !SKIPPED_ELEMENTS.contains(&child_element.value().name()) {
                visible_text(child_element, lines);
            }
        } else if let Some(text) = child.value().as_text() {
            let text = text.trim();
            if !text.is_empty() {
                lines.push(text.to_string());
            }
        }
    }
}

fn resolve(page_url: &str, reference: &str) -> String {
    Url::parse(page_url)
        .and_then(|base| base.join(reference))
        .map(String::from)
        .unwrap_or_else(|_| reference.to_string())
}
