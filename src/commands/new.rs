//! Create a new blog post

use anyhow::Result;
use std::fs;

use crate::Site;

/// Create a markdown post scaffold in the content directory
pub fn run(site: &Site, title: &str) -> Result<()> {
    let now = chrono::Local::now();
    let slug = slug::slugify(title);

    fs::create_dir_all(&site.content_dir)?;

    let file_path = site.content_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let content = format!(
        r#"---
title: {}
description: ""
date: {}
tags: []
published: true
---
"#,
        title,
        now.format("%Y-%m-%d")
    );

    fs::write(&file_path, content)?;

    println!("Created: {:?}", file_path);

    Ok(())
}
