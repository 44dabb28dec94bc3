//! Static site builder for terradocs documentation.
//!
//! Turns a docs directory plus declarative configuration (site, navbar,
//! footer, sidebar, homepage features) into a static HTML site, enforcing
//! the broken-link policy along the way.

pub mod assets;
pub mod builder;
pub mod features;
pub mod links;
pub mod sidebar;
pub mod templates;

pub use builder::{BuildError, BuildOptions, BuildResult, SiteBuilder};
pub use features::render_features;
pub use templates::{NavItem, TemplateEngine};
