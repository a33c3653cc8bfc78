//! Parser input and output types.

mod components;
mod media;

pub use components::{
    IMAGE_FALLBACK_HTML, ListRow, MarticleComponent, NumberedListRow, VIDEO_FALLBACK_HTML,
};
pub use media::{ArticleData, ImageSource, MediaMaps, VideoSource, VideoType};
