//! Internal link resolution for the broken-link checker.

use terradocs_config::SiteConfig;

/// Resolve an internal markdown link to the route it targets.
///
/// Returns `None` for targets the checker does not track: asset files
/// (anything with a non-markdown extension). `.md`/`.mdx` links resolve in
/// source space relative to the page's location in the docs tree; everything
/// else resolves in route space relative to the page's URL.
pub fn resolve_internal(page_id: &str, href: &str, config: &SiteConfig) -> Option<String> {
    // Fragments and queries do not change the target page
    let path = href.split(['#', '?']).next().unwrap_or("");
    if path.is_empty() {
        return None;
    }

    if let Some(stripped) = strip_markdown_ext(path) {
        // Source-relative: resolve against the page's directory in the docs
        // tree, then map the resulting doc id to its route.
        let parent = match page_id.rfind('/') {
            Some(pos) => &page_id[..pos],
            None => "",
        };
        let base: Vec<&str> = parent.split('/').filter(|s| !s.is_empty()).collect();
        let id = join_segments(&base, stripped).join("/");
        return Some(config.doc_route(&id));
    }

    // Asset links (images, notebooks) are not page references
    if has_file_extension(path) {
        return None;
    }

    let route = config.doc_route(page_id);
    let base: Vec<&str> = route.split('/').filter(|s| !s.is_empty()).collect();
    let segs = join_segments(&base, path);

    if segs.is_empty() {
        Some("/".to_string())
    } else {
        Some(format!("/{}/", segs.join("/")))
    }
}

fn strip_markdown_ext(path: &str) -> Option<&str> {
    path.strip_suffix(".md").or_else(|| path.strip_suffix(".mdx"))
}

fn has_file_extension(path: &str) -> bool {
    path.rsplit('/')
        .next()
        .map(|last| last.contains('.'))
        .unwrap_or(false)
}

fn join_segments(base: &[&str], path: &str) -> Vec<String> {
    let mut segs: Vec<String> = if path.starts_with('/') {
        Vec::new()
    } else {
        base.iter().map(|s| s.to_string()).collect()
    };

    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                segs.pop();
            }
            p => segs.push(p.to_string()),
        }
    }

    segs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SiteConfig {
        SiteConfig::default()
    }

    #[test]
    fn resolves_absolute_routes() {
        assert_eq!(
            resolve_internal("intro", "/docs/attribution/", &config()),
            Some("/docs/attribution/".to_string())
        );
        assert_eq!(
            resolve_internal("intro", "/docs/attribution", &config()),
            Some("/docs/attribution/".to_string())
        );
    }

    #[test]
    fn resolves_relative_routes_against_page_url() {
        // Page /docs/Tutorials/01-intro/ linking to a sibling page
        assert_eq!(
            resolve_internal("Tutorials/01-intro", "../02-advanced/", &config()),
            Some("/docs/Tutorials/02-advanced/".to_string())
        );
    }

    #[test]
    fn resolves_markdown_links_in_source_space() {
        assert_eq!(
            resolve_internal("Tutorials/01-intro", "./02-advanced.md", &config()),
            Some("/docs/Tutorials/02-advanced/".to_string())
        );
        assert_eq!(
            resolve_internal("Tutorials/01-intro", "../attribution.md", &config()),
            Some("/docs/attribution/".to_string())
        );
    }

    #[test]
    fn strips_fragments_and_queries() {
        assert_eq!(
            resolve_internal("intro", "/docs/attribution/#sources", &config()),
            Some("/docs/attribution/".to_string())
        );
    }

    #[test]
    fn skips_asset_links() {
        assert_eq!(resolve_internal("intro", "img/ndvi.png", &config()), None);
        assert_eq!(
            resolve_internal("intro", "/files/data.zip", &config()),
            None
        );
    }

    #[test]
    fn root_link_targets_homepage() {
        assert_eq!(
            resolve_internal("intro", "/", &config()),
            Some("/".to_string())
        );
    }
}
