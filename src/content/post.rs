//! Post records produced by the content pipeline

use serde::Serialize;

/// A fully loaded blog post, including the rendered HTML body
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    /// URL-safe identifier, derived from the file stem
    pub slug: String,

    /// Post title
    pub title: String,

    /// Short free-text description
    pub description: String,

    /// ISO-like date string, used for ordering only
    pub date: String,

    /// Post tags
    pub tags: Vec<String>,

    /// Whether the post appears in listings
    pub published: bool,

    /// Rendered HTML body
    pub content: String,

    /// Short summary, always equal to the description
    pub excerpt: String,
}

/// A post without its body, used for listings
#[derive(Debug, Clone, Serialize)]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub date: String,
    pub tags: Vec<String>,
    pub published: bool,
    pub excerpt: String,
}

/// Route parameters for static path generation, one per content file
#[derive(Debug, Clone, Serialize)]
pub struct RouteParams {
    pub slug: String,
}
