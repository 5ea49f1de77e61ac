//! Content loader - loads blog posts from a content directory

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{ContentError, FrontMatter, MarkdownRenderer, Post, PostSummary, RouteParams};

/// Loads posts from a flat directory of markdown files
///
/// The content root is an explicit constructor parameter so callers (and
/// tests) can point the loader at any directory. Every call re-reads the
/// filesystem; records are never cached.
pub struct ContentLoader {
    content_dir: PathBuf,
    renderer: MarkdownRenderer,
}

impl ContentLoader {
    /// Create a loader rooted at the given content directory
    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
            renderer: MarkdownRenderer::new(),
        }
    }

    /// List summaries of all published posts, newest first
    ///
    /// Posts with `published: false` are excluded. A file with malformed
    /// front-matter is logged and skipped so one bad file never empties
    /// the listing.
    pub fn list_summaries(&self) -> Result<Vec<PostSummary>, ContentError> {
        let mut summaries = Vec::new();

        for path in self.markdown_files()? {
            match self.load_summary(&path) {
                Ok(summary) => {
                    if summary.published {
                        summaries.push(summary);
                    }
                }
                Err(e) => {
                    tracing::warn!("skipping post {:?}: {}", path, e);
                }
            }
        }

        // Dates are compared as strings, newest first. Equal dates fall
        // back to slug order so the listing is deterministic across
        // filesystems.
        summaries.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));

        Ok(summaries)
    }

    /// Fetch a single post with its rendered HTML body
    ///
    /// Returns `Ok(None)` when the content directory or `<slug>.md` does
    /// not exist. The published flag does not gate direct fetches.
    pub fn get_post(&self, slug: &str) -> Result<Option<Post>, ContentError> {
        if !is_valid_slug(slug) {
            return Ok(None);
        }

        let path = self.content_dir.join(format!("{}.md", slug));

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(ContentError::Io { path, source }),
        };

        let (fm, body) = FrontMatter::parse(&raw).map_err(|source| {
            ContentError::MalformedMetadata {
                path: path.clone(),
                source,
            }
        })?;

        let content = self.renderer.render(body);
        let summary = resolve(fm, slug);

        Ok(Some(Post {
            slug: summary.slug,
            title: summary.title,
            description: summary.description,
            date: summary.date,
            tags: summary.tags,
            published: summary.published,
            content,
            excerpt: summary.excerpt,
        }))
    }

    /// Enumerate route parameters, one per markdown file
    ///
    /// Unpublished posts are included; publishing only affects listings.
    pub fn list_slugs(&self) -> Result<Vec<RouteParams>, ContentError> {
        Ok(self
            .markdown_files()?
            .into_iter()
            .map(|path| RouteParams {
                slug: file_stem(&path),
            })
            .collect())
    }

    /// Load a single summary record from a file
    fn load_summary(&self, path: &Path) -> Result<PostSummary, ContentError> {
        let raw = fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let (fm, _body) = FrontMatter::parse(&raw).map_err(|source| {
            ContentError::MalformedMetadata {
                path: path.to_path_buf(),
                source,
            }
        })?;

        Ok(resolve(fm, &file_stem(path)))
    }

    /// Markdown files directly under the content directory
    ///
    /// A missing directory is an empty site, not an error.
    fn markdown_files(&self) -> Result<Vec<PathBuf>, ContentError> {
        let entries = match fs::read_dir(&self.content_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(ContentError::Io {
                    path: self.content_dir.clone(),
                    source,
                })
            }
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ContentError::Io {
                path: self.content_dir.clone(),
                source,
            })?;
            let path = entry.path();
            if path.is_file() && is_markdown_file(&path) {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }
}

/// Resolve front-matter into a summary record, stating all defaults once:
/// title falls back to the slug, description and date to empty strings,
/// and the excerpt is always the description.
fn resolve(fm: FrontMatter, slug: &str) -> PostSummary {
    let description = fm.description.unwrap_or_default();
    PostSummary {
        slug: slug.to_string(),
        title: fm.title.unwrap_or_else(|| slug.to_string()),
        excerpt: description.clone(),
        description,
        date: fm.date.unwrap_or_default(),
        tags: fm.tags,
        published: fm.published,
    }
}

/// Slugs are bare file stems; anything that could resolve outside the
/// content directory is treated as not found. The HTTP layer decodes
/// percent-escapes before the slug reaches the loader, so the check
/// happens here rather than at the route.
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && !slug.contains(['/', '\\']) && slug != "." && slug != ".."
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md")
        .unwrap_or(false)
}

/// File name without the `.md` extension
fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_post(dir: &TempDir, name: &str, content: &str) {
        fs::write(dir.path().join(name), content).unwrap();
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        let loader = ContentLoader::new(dir.path().join("does-not-exist"));

        assert!(loader.list_summaries().unwrap().is_empty());
        assert!(loader.list_slugs().unwrap().is_empty());
        assert!(loader.get_post("anything").unwrap().is_none());
    }

    #[test]
    fn test_unpublished_excluded_from_listing_but_routed() {
        let dir = TempDir::new().unwrap();
        write_post(
            &dir,
            "a.md",
            "---\ntitle: A\ndate: 2024-07-28\n---\nBody A.",
        );
        write_post(
            &dir,
            "b.md",
            "---\ntitle: B\ndate: 2024-07-20\npublished: false\n---\nBody B.",
        );

        let loader = ContentLoader::new(dir.path());

        let summaries = loader.list_summaries().unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].slug, "a");

        let slugs: Vec<_> = loader
            .list_slugs()
            .unwrap()
            .into_iter()
            .map(|r| r.slug)
            .collect();
        assert_eq!(slugs, vec!["a", "b"]);
    }

    #[test]
    fn test_listing_sorted_by_date_descending() {
        let dir = TempDir::new().unwrap();
        write_post(&dir, "old.md", "---\ndate: 2024-07-18\n---\n");
        write_post(&dir, "new.md", "---\ndate: 2024-07-28\n---\n");
        write_post(&dir, "mid.md", "---\ndate: 2024-07-21\n---\n");

        let loader = ContentLoader::new(dir.path());
        let slugs: Vec<_> = loader
            .list_summaries()
            .unwrap()
            .into_iter()
            .map(|s| s.slug)
            .collect();

        assert_eq!(slugs, vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_equal_dates_ordered_by_slug() {
        let dir = TempDir::new().unwrap();
        write_post(&dir, "zebra.md", "---\ndate: 2024-07-28\n---\n");
        write_post(&dir, "apple.md", "---\ndate: 2024-07-28\n---\n");

        let loader = ContentLoader::new(dir.path());
        let slugs: Vec<_> = loader
            .list_summaries()
            .unwrap()
            .into_iter()
            .map(|s| s.slug)
            .collect();

        assert_eq!(slugs, vec!["apple", "zebra"]);
    }

    #[test]
    fn test_get_post_renders_html() {
        let dir = TempDir::new().unwrap();
        write_post(
            &dir,
            "hello.md",
            "---\ntitle: Hello\ndescription: Greeting post\ndate: 2024-07-28\n---\n# Hello\n\nWorld.",
        );

        let loader = ContentLoader::new(dir.path());
        let post = loader.get_post("hello").unwrap().unwrap();

        assert_eq!(post.slug, "hello");
        assert!(post.content.contains("<h1>Hello</h1>"));
        assert_eq!(post.excerpt, post.description);
        assert_eq!(post.description, "Greeting post");
    }

    #[test]
    fn test_get_post_unknown_slug_is_none() {
        let dir = TempDir::new().unwrap();
        write_post(&dir, "present.md", "---\ntitle: Here\n---\n");

        let loader = ContentLoader::new(dir.path());
        assert!(loader.get_post("absent").unwrap().is_none());
    }

    #[test]
    fn test_slug_cannot_escape_content_dir() {
        let base = TempDir::new().unwrap();
        let content_dir = base.path().join("content");
        fs::create_dir(&content_dir).unwrap();
        fs::write(
            base.path().join("secret.md"),
            "---\ntitle: Secret\n---\nHidden.",
        )
        .unwrap();

        let loader = ContentLoader::new(&content_dir);
        assert!(loader.get_post("../secret").unwrap().is_none());
        assert!(loader.get_post("..").unwrap().is_none());
        assert!(loader.get_post("a/../../secret").unwrap().is_none());
        assert!(loader.get_post("").unwrap().is_none());
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let dir = TempDir::new().unwrap();
        write_post(&dir, "bare.md", "Just a body, no front-matter.");

        let loader = ContentLoader::new(dir.path());
        let post = loader.get_post("bare").unwrap().unwrap();

        assert_eq!(post.title, "bare");
        assert_eq!(post.description, "");
        assert_eq!(post.date, "");
        assert!(post.tags.is_empty());
        assert!(post.published);

        // Default-published posts appear in listings
        let summaries = loader.list_summaries().unwrap();
        assert_eq!(summaries.len(), 1);
    }

    #[test]
    fn test_malformed_metadata_propagates_on_fetch() {
        let dir = TempDir::new().unwrap();
        write_post(&dir, "broken.md", "---\ntitle: [unclosed\n---\nBody.");

        let loader = ContentLoader::new(dir.path());
        let err = loader.get_post("broken").unwrap_err();
        assert!(matches!(err, ContentError::MalformedMetadata { .. }));
    }

    #[test]
    fn test_malformed_metadata_skipped_in_listing() {
        let dir = TempDir::new().unwrap();
        write_post(&dir, "broken.md", "---\ntitle: [unclosed\n---\nBody.");
        write_post(&dir, "fine.md", "---\ntitle: Fine\ndate: 2024-07-28\n---\n");

        let loader = ContentLoader::new(dir.path());
        let summaries = loader.list_summaries().unwrap();

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].slug, "fine");
    }

    #[test]
    fn test_non_markdown_files_ignored() {
        let dir = TempDir::new().unwrap();
        write_post(&dir, "post.md", "---\ntitle: Post\n---\n");
        write_post(&dir, "notes.txt", "not a post");
        write_post(&dir, "image.png", "binary-ish");

        let loader = ContentLoader::new(dir.path());
        let slugs: Vec<_> = loader
            .list_slugs()
            .unwrap()
            .into_iter()
            .map(|r| r.slug)
            .collect();

        assert_eq!(slugs, vec!["post"]);
    }
}
