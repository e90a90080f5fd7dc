use std::rc::Rc;

use feedline_core::*;
use feedline_ui::{Column, IconButton, Image, Row, Spacer, Text, TextExt, ViewExt};

use crate::config::FeaturedLayout;
use crate::error::FeaturedError;
use crate::post::PostSummary;

/// User actions raised by featured cards.
#[derive(Clone)]
pub struct FeaturedCallbacks {
    pub on_item_click: Rc<dyn Fn(&PostSummary)>,
    pub on_post_bookmark_click: Rc<dyn Fn(&PostSummary)>,
    /// Receives the post's comments link.
    pub on_post_comments_click: Rc<dyn Fn(&str)>,
}

impl FeaturedCallbacks {
    pub fn new(
        on_item_click: impl Fn(&PostSummary) + 'static,
        on_post_bookmark_click: impl Fn(&PostSummary) + 'static,
        on_post_comments_click: impl Fn(&str) + 'static,
    ) -> Self {
        Self {
            on_item_click: Rc::new(on_item_click),
            on_post_bookmark_click: Rc::new(on_post_bookmark_click),
            on_post_comments_click: Rc::new(on_post_comments_click),
        }
    }

    /// Opens the comments of `post`, or reports that it has none.
    pub fn open_comments(&self, post: &PostSummary) -> Result<(), FeaturedError> {
        let link = post.comments_link_or_err()?;
        (self.on_post_comments_click)(link);
        Ok(())
    }
}

impl std::fmt::Debug for FeaturedCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeaturedCallbacks").finish_non_exhaustive()
    }
}

pub fn FeaturedPostItem(
    post: &PostSummary,
    layout: &FeaturedLayout,
    callbacks: &FeaturedCallbacks,
) -> View {
    let th = theme();

    let image = post.image_url.as_deref().map(|url| {
        Image(
            Modifier::new()
                .fill_max_width()
                .aspect_ratio(layout.item_image_ratio)
                .clip_rounded(layout.item_corner_radius),
            url,
        )
    });

    let bookmark_label = if post.bookmarked {
        "Remove bookmark"
    } else {
        "Bookmark"
    };
    let bookmark = {
        let cb = callbacks.on_post_bookmark_click.clone();
        let post = post.clone();
        IconButton(bookmark_label, move || cb(&post))
    };

    // No comments link, no comments action.
    let comments = post.comments_link.is_some().then(|| {
        let callbacks = callbacks.clone();
        let post = post.clone();
        IconButton("Comments", move || {
            if let Err(e) = callbacks.open_comments(&post) {
                log::warn!("{e}");
            }
        })
    });

    let actions = Row(Modifier::new()
        .fill_max_width()
        .align_items(AlignItems::Center))
    .child((
        Text(post.feed_name.clone())
            .text_size(12.0)
            .text_color(th.on_surface_variant)
            .max_lines(1),
        Spacer(),
        bookmark,
        comments,
    ));

    let on_click = {
        let cb = callbacks.on_item_click.clone();
        let post = post.clone();
        move || cb(&post)
    };

    Column(Modifier::new().fill_max_width().clickable(on_click))
        .semantics(Semantics::new(Role::Button).label(post.title.clone()))
        .child((
            image,
            Text(post.title.clone()).text_size(22.0).max_lines(2),
            actions,
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn recording() -> (FeaturedCallbacks, Rc<RefCell<Vec<String>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let (a, b, c) = (events.clone(), events.clone(), events.clone());
        let callbacks = FeaturedCallbacks::new(
            move |p| a.borrow_mut().push(format!("open {}", p.id)),
            move |p| b.borrow_mut().push(format!("bookmark {}", p.id)),
            move |link| c.borrow_mut().push(format!("comments {link}")),
        );
        (callbacks, events)
    }

    fn buttons(view: &View) -> Vec<(String, Callback)> {
        view.descendants()
            .filter_map(|v| match &v.kind {
                ViewKind::Button {
                    label,
                    on_click: Some(f),
                } => Some((label.clone(), f.clone())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn comments_action_only_with_link() {
        let (callbacks, events) = recording();
        let layout = FeaturedLayout::default();

        let without = FeaturedPostItem(&PostSummary::new("a", "A"), &layout, &callbacks);
        let labels: Vec<_> = buttons(&without).into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["Bookmark"]);

        let post = PostSummary::new("b", "B")
            .with_comments("https://c/b")
            .bookmarked(true);
        let with = FeaturedPostItem(&post, &layout, &callbacks);
        let actions = buttons(&with);
        assert_eq!(actions[0].0, "Remove bookmark");
        assert_eq!(actions[1].0, "Comments");
        for (_, f) in &actions {
            f();
        }
        (with.modifier.on_click.clone().unwrap())();

        assert_eq!(
            *events.borrow(),
            vec!["bookmark b", "comments https://c/b", "open b"]
        );
    }

    #[test]
    fn open_comments_reports_missing_link() {
        let (callbacks, events) = recording();
        let err = callbacks
            .open_comments(&PostSummary::new("x", "X"))
            .unwrap_err();
        assert_eq!(
            err,
            FeaturedError::CommentsUnavailable {
                post_id: "x".into()
            }
        );
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn image_is_optional() {
        let (callbacks, _) = recording();
        let layout = FeaturedLayout::default();
        let count = |post: &PostSummary| {
            FeaturedPostItem(post, &layout, &callbacks)
                .descendants()
                .filter(|v| matches!(v.kind, ViewKind::Image { .. }))
                .count()
        };
        assert_eq!(count(&PostSummary::new("a", "A")), 0);
        assert_eq!(count(&PostSummary::new("a", "A").with_image("i")), 1);
    }
}
