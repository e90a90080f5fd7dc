use crate::error::FeaturedError;

/// Read-only summary of a post as shown in lists and the featured carousel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostSummary {
    pub id: String,
    pub title: String,
    pub description: String,
    pub feed_name: String,
    pub image_url: Option<String>,
    pub comments_link: Option<String>,
    pub link: String,
    pub bookmarked: bool,
    pub read: bool,
}

impl PostSummary {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn with_comments(mut self, link: impl Into<String>) -> Self {
        self.comments_link = Some(link.into());
        self
    }

    pub fn with_feed_name(mut self, name: impl Into<String>) -> Self {
        self.feed_name = name.into();
        self
    }

    pub fn bookmarked(mut self, bookmarked: bool) -> Self {
        self.bookmarked = bookmarked;
        self
    }

    pub fn comments_link_or_err(&self) -> Result<&str, FeaturedError> {
        self.comments_link
            .as_deref()
            .ok_or_else(|| FeaturedError::CommentsUnavailable {
                post_id: self.id.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_comments_link_is_an_error() {
        let post = PostSummary::new("p1", "Title");
        assert_eq!(
            post.comments_link_or_err(),
            Err(FeaturedError::CommentsUnavailable {
                post_id: "p1".into()
            })
        );

        let post = post.with_comments("https://news.example/item?id=1");
        assert_eq!(
            post.comments_link_or_err(),
            Ok("https://news.example/item?id=1")
        );
    }
}
