//! nostos-site: a filesystem-backed markdown blog pipeline
//!
//! This crate loads blog posts written as markdown files with YAML
//! front-matter, exposes list/fetch/route-enumeration operations over them,
//! and serves the results as a JSON API for the client shell.

pub mod commands;
pub mod config;
pub mod content;
pub mod server;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::loader::ContentLoader;

/// The site application
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding markdown posts
    pub content_dir: PathBuf,
    /// Directory holding the built client shell
    pub static_dir: PathBuf,
}

impl Site {
    /// Create a new site instance from a base directory
    ///
    /// Reads `site.yml` when present; environment overrides apply either way.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("site.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::from_env()
        };

        let content_dir = base_dir.join(&config.content_dir);
        let static_dir = base_dir.join(&config.static_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
            static_dir,
        })
    }

    /// Content loader rooted at this site's content directory
    pub fn loader(&self) -> ContentLoader {
        ContentLoader::new(&self.content_dir)
    }
}
