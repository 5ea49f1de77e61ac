//! Site configuration (site.yml + environment overrides)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Main site configuration
///
/// Resolution order for every field: environment variable, then the
/// `site.yml` value, then the built-in default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub user: UserConfig,
    pub contact: ContactConfig,
    pub site: SiteMeta,

    /// Directory holding the markdown posts, relative to the base directory
    pub content_dir: String,
    /// Directory holding the built client shell, served as static files
    pub static_dir: String,
}

/// Branding for the person or company behind the site
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub name: String,
    pub title: String,
    pub description: String,
}

/// Contact links shown by the client shell
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub github: String,
    pub linkedin: String,
    pub twitter: Option<String>,
    pub email: Option<String>,
}

/// Site-level metadata
///
/// Title and description are derived from the user fields when left empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteMeta {
    pub title: String,
    pub description: String,
    pub chat_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            user: UserConfig::default(),
            contact: ContactConfig::default(),
            site: SiteMeta::default(),
            content_dir: "content/blog".to_string(),
            static_dir: "public".to_string(),
        }
    }
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            name: "Nostos Labs".to_string(),
            title: "Technology Consulting".to_string(),
            description: "A technology consulting firm specializing in AI/ML \
                          solutions, data science and cloud architecture."
                .to_string(),
        }
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            github: "https://github.com/nostoslabs".to_string(),
            linkedin: "https://linkedin.com/company/nostos-labs".to_string(),
            twitter: None,
            email: Some("contact@nostoslabs.com".to_string()),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file, then apply environment overrides
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let mut config: SiteConfig = serde_yaml::from_str(&content)?;
        config.apply_env_overrides();
        config.apply_derived_defaults();
        Ok(config)
    }

    /// Build configuration from defaults and environment overrides alone
    pub fn from_env() -> Self {
        let mut config = SiteConfig::default();
        config.apply_env_overrides();
        config.apply_derived_defaults();
        config
    }

    fn apply_env_overrides(&mut self) {
        override_from_env(&mut self.user.name, "NOSTOS_USER_NAME");
        override_from_env(&mut self.user.title, "NOSTOS_USER_TITLE");
        override_from_env(&mut self.user.description, "NOSTOS_USER_DESCRIPTION");

        override_from_env(&mut self.contact.github, "NOSTOS_GITHUB_URL");
        override_from_env(&mut self.contact.linkedin, "NOSTOS_LINKEDIN_URL");
        if let Ok(value) = env::var("NOSTOS_TWITTER_URL") {
            self.contact.twitter = Some(value);
        }
        if let Ok(value) = env::var("NOSTOS_EMAIL") {
            self.contact.email = Some(value);
        }

        override_from_env(&mut self.site.title, "NOSTOS_SITE_TITLE");
        override_from_env(&mut self.site.description, "NOSTOS_SITE_DESCRIPTION");
        override_from_env(&mut self.site.chat_url, "NOSTOS_CHAT_URL");

        override_from_env(&mut self.content_dir, "NOSTOS_CONTENT_DIR");
        override_from_env(&mut self.static_dir, "NOSTOS_STATIC_DIR");
    }

    /// Fill site metadata left empty after file and environment resolution
    fn apply_derived_defaults(&mut self) {
        if self.site.title.is_empty() {
            self.site.title = format!("{} - {}", self.user.name, self.user.title);
        }
        if self.site.description.is_empty() {
            self.site.description =
                format!("{} - Expert technology consulting for modern businesses", self.user.name);
        }
    }
}

fn override_from_env(field: &mut String, key: &str) {
    if let Ok(value) = env::var(key) {
        *field = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Tests that read or write process environment variables must not
    // run concurrently
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_default_config() {
        let _guard = ENV_LOCK.lock().unwrap();
        let config = SiteConfig::from_env();
        assert_eq!(config.content_dir, "content/blog");
        assert!(!config.user.name.is_empty());
        assert!(config
            .site
            .title
            .starts_with(&config.user.name));
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
user:
  name: Acme
  title: Consulting
contact:
  github: https://github.com/acme
content_dir: posts
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.user.name, "Acme");
        assert_eq!(config.contact.github, "https://github.com/acme");
        assert_eq!(config.content_dir, "posts");
        // Untouched sections keep their defaults
        assert_eq!(config.static_dir, "public");
    }

    #[test]
    fn test_env_override_beats_file() {
        let _guard = ENV_LOCK.lock().unwrap();
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("site.yml");
        fs::write(&path, "user:\n  name: FromFile\n").unwrap();

        env::set_var("NOSTOS_USER_NAME", "FromEnv");
        let config = SiteConfig::load(&path).unwrap();
        env::remove_var("NOSTOS_USER_NAME");

        assert_eq!(config.user.name, "FromEnv");
        assert!(config.site.title.starts_with("FromEnv"));
    }
}
