use feedline_core::task::Cancelled;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeaturedError {
    #[error("post {post_id} has no comments link")]
    CommentsUnavailable { post_id: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ColorError {
    #[error("failed to fetch image {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("failed to decode image {url}")]
    Decode {
        url: String,
        #[source]
        source: image::ImageError,
    },

    #[error("image {url} has no opaque pixels")]
    NoOpaquePixels { url: String },

    #[error(transparent)]
    Cancelled(#[from] Cancelled),
}
