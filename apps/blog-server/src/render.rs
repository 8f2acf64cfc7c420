//! Domain values -> page view models.

use blog_core::domain::{
    Author, CommentWithAuthor, CurrentUser, Post, PostDraft, PostWithAuthor,
};
use blog_core::policy;
use blog_shared::forms::PostForm;
use blog_shared::views::{AuthorView, CommentView, PostSummaryView, PostView, ViewerView};

pub fn viewer(current: &CurrentUser) -> ViewerView {
    match current.user() {
        Some(user) => ViewerView {
            logged_in: true,
            is_admin: policy::is_administrator(user),
            user: Some(author(user.as_author())),
        },
        None => ViewerView::default(),
    }
}

pub fn author(author: Author) -> AuthorView {
    AuthorView {
        id: author.id,
        name: author.name,
    }
}

pub fn post_summary(entry: PostWithAuthor) -> PostSummaryView {
    let PostWithAuthor { post, author: by } = entry;
    PostSummaryView {
        id: post.id,
        title: post.title,
        subtitle: post.subtitle,
        date: post.date,
        author: by.map(author),
    }
}

pub fn post(entry: PostWithAuthor) -> PostView {
    let PostWithAuthor { post, author: by } = entry;
    PostView {
        id: post.id,
        title: post.title,
        subtitle: post.subtitle,
        date: post.date,
        body: post.body,
        img_url: post.img_url,
        author: by.map(author),
    }
}

pub fn comment(entry: CommentWithAuthor) -> CommentView {
    CommentView {
        id: entry.comment.id,
        text: entry.comment.text,
        author: entry.author.map(author),
    }
}

/// Prefill the edit form from the stored post.
pub fn post_form(post: Post) -> PostForm {
    PostForm {
        title: post.title,
        subtitle: post.subtitle,
        img_url: post.img_url,
        body: post.body,
    }
}

pub fn post_draft(form: PostForm) -> PostDraft {
    PostDraft {
        title: form.title,
        subtitle: form.subtitle,
        body: form.body,
        img_url: form.img_url,
    }
}
