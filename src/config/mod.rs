//! Configuration module

mod site;

pub use site::ContactConfig;
pub use site::SiteConfig;
pub use site::SiteMeta;
pub use site::UserConfig;
