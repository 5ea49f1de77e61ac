//! List site content

use anyhow::Result;
use std::collections::HashMap;

use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let loader = site.loader();

    match content_type {
        "post" | "posts" => {
            let posts = loader.list_summaries()?;
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!("  {} - {} [{}]", post.date, post.title, post.slug);
            }
        }
        "slug" | "slugs" | "route" | "routes" => {
            let routes = loader.list_slugs()?;
            println!("Routes ({}):", routes.len());
            for route in routes {
                println!("  /insights/{}", route.slug);
            }
        }
        "tag" | "tags" => {
            let posts = loader.list_summaries()?;
            let mut tags: HashMap<String, usize> = HashMap::new();
            for post in &posts {
                for tag in &post.tags {
                    *tags.entry(tag.clone()).or_insert(0) += 1;
                }
            }
            println!("Tags ({}):", tags.len());
            let mut tags: Vec<_> = tags.into_iter().collect();
            tags.sort_by(|a, b| b.1.cmp(&a.1));
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, slug, tag",
                content_type
            );
        }
    }

    Ok(())
}
