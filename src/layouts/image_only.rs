use reqwest::Url;

use super::builder::{container, heading, image};
use super::LayoutGrid;
use crate::models::element::{ElementSubtype, ImageSource, ImageSourceKind};
use crate::models::slide::ImageContent;
use crate::sanitize::process_content;

const IMAGE_CONTAINER_HEIGHT: u32 = 420;
const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// Guesses the MIME type of an image from the extension of its URL path.
pub fn infer_mime_type(url: &str) -> &'static str {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url.split(['?', '#']).next().unwrap_or_default().to_string(),
    };
    let file_name = path.rsplit('/').next().unwrap_or_default();
    let extension = match file_name.rsplit_once('.') {
        Some((_, ext)) => ext.to_ascii_lowercase(),
        None => return DEFAULT_MIME_TYPE,
    };

    match extension.as_str() {
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        "tiff" | "tif" => "image/tiff",
        "avif" => "image/avif",
        other if other.contains("gif") => "image/gif",
        _ => DEFAULT_MIME_TYPE,
    }
}

/// Title row, then an image container with a single image.
///
/// Without a URL the image is the service's placeholder; the caption becomes the
/// image's alt text.
pub fn build(title: &str, content: &ImageContent) -> LayoutGrid {
    let title_element = heading(title);
    let title_id = title_element.id.clone();

    let url = content
        .image_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty());
    let source = match url {
        Some(url) => ImageSource {
            kind: ImageSourceKind::UserProvided,
            url: Some(url.to_string()),
            mime_type: infer_mime_type(url).to_string(),
        },
        None => ImageSource {
            kind: ImageSourceKind::Placeholder,
            url: None,
            mime_type: DEFAULT_MIME_TYPE.to_string(),
        },
    };

    let mut image_element = image(source);
    if let Some(caption) = content.image_caption.as_deref().filter(|c| !c.is_empty()) {
        image_element = image_element.with_content(process_content(caption, false));
    }

    let image_container = container(ElementSubtype::ImageContainer, vec![image_element])
        .with_manual_height(IMAGE_CONTAINER_HEIGHT)
        .below(&title_id);

    LayoutGrid {
        title_id,
        rows: vec![vec![title_element], vec![image_container]],
    }
}
