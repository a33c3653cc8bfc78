//! Media placeholder comments (`<!--IMG_3-->`, `<!--VIDEO_1-->`).
//!
//! The legacy parser strips images and videos out of the article body and
//! leaves a comment holding the numeric id of the record in its side
//! tables. Resolution needs the record to exist and carry a usable `src`;
//! anything short of that degrades to a fixed fallback component.

use url::Url;

use crate::dom::NodeId;
use crate::model::{
    IMAGE_FALLBACK_HTML, MarticleComponent, VIDEO_FALLBACK_HTML, VideoType,
};

use super::visitor::Traversal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Placeholder {
    /// The id is `None` when the comment carries no trailing number.
    Image(Option<u32>),
    Video(Option<u32>),
}

impl Placeholder {
    /// Recognize a placeholder from raw comment text.
    pub(super) fn parse(text: &str) -> Option<Placeholder> {
        let text = text.trim();
        if text.contains("IMG_") {
            Some(Placeholder::Image(trailing_id(text)))
        } else if text.contains("VIDEO_") {
            Some(Placeholder::Video(trailing_id(text)))
        } else {
            None
        }
    }
}

fn trailing_id(text: &str) -> Option<u32> {
    let digits = text.bytes().rev().take_while(u8::is_ascii_digit).count();
    text[text.len() - digits..].parse().ok()
}

/// Validate a media `src`: one token, parseable as an http(s) URL on its own
/// or relative to `base`.
///
/// Absolute sources come back exactly as given (trimmed). Relative ones are
/// joined onto `base`; protocol-relative ones without a base assume `https:`.
pub(super) fn resolve_src(src: Option<&str>, base: Option<&Url>) -> Option<String> {
    let src = src?.trim();
    let mut tokens = src.split_whitespace();
    let (Some(token), None) = (tokens.next(), tokens.next()) else {
        return None;
    };

    match Url::parse(token) {
        Ok(url) => is_web(&url).then(|| token.to_string()),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let url = match base {
                Some(base) => base.join(token).ok()?,
                None if token.starts_with("//") => Url::parse(&format!("https:{token}")).ok()?,
                None => return None,
            };
            is_web(&url).then(|| url.to_string())
        }
        Err(_) => None,
    }
}

fn is_web(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

impl Traversal<'_> {
    pub(super) fn resolve_placeholder(
        &self,
        placeholder: Placeholder,
        comment: NodeId,
    ) -> MarticleComponent {
        match placeholder {
            Placeholder::Image(id) => self.resolve_image(id, comment).unwrap_or_else(|| {
                tracing::debug!(?id, "unresolvable image placeholder");
                MarticleComponent::unsupported(IMAGE_FALLBACK_HTML)
            }),
            Placeholder::Video(id) => self.resolve_video(id).unwrap_or_else(|| {
                tracing::debug!(?id, "unresolvable video placeholder");
                MarticleComponent::unsupported(VIDEO_FALLBACK_HTML)
            }),
        }
    }

    fn resolve_image(&self, id: Option<u32>, comment: NodeId) -> Option<MarticleComponent> {
        let id = id?;
        let image = self.media?.image(id)?;
        let src = resolve_src(image.src.as_deref(), self.base_url.as_ref())?;

        let target_url = self
            .dom
            .closest_ancestor(comment, "a")
            .and_then(|a| self.dom.get_attr(a, "href"))
            .map(str::trim)
            .filter(|href| !href.is_empty())
            .map(str::to_string);

        Some(MarticleComponent::Image {
            image_id: id,
            width: image.width,
            height: image.height,
            src,
            target_url,
            caption: image.caption.clone(),
            credit: image.credit.clone(),
        })
    }

    fn resolve_video(&self, id: Option<u32>) -> Option<MarticleComponent> {
        let id = id?;
        let video = self.media?.video(id)?;
        let src = resolve_src(video.src.as_deref(), self.base_url.as_ref())?;
        let video_type = video.type_code.and_then(VideoType::from_code);
        if video_type.is_none() {
            tracing::debug!(id, code = ?video.type_code, "video has no known type");
        }

        Some(MarticleComponent::Video {
            video_id: id,
            width: video.width,
            height: video.height,
            src,
            vid: video.vid.clone(),
            length: video.length,
            video_type,
        })
    }
}
