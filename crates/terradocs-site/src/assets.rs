//! Asset pipeline for CSS and JavaScript processing.

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the main CSS file.
    pub fn generate_css() -> String {
        DEFAULT_CSS.to_string()
    }

    /// Generate the main JavaScript file.
    pub fn generate_js() -> String {
        DEFAULT_JS.to_string()
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }

    /// Copy a static directory (images, favicon) into the output, preserving
    /// relative paths.
    pub fn copy_static(static_dir: &Path, output_dir: &Path) -> Result<usize, std::io::Error> {
        if !static_dir.exists() {
            return Ok(0);
        }

        let mut copied = 0;
        for entry in WalkDir::new(static_dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
        {
            let relative = entry
                .path()
                .strip_prefix(static_dir)
                .expect("walkdir yields children of its root");
            let target = output_dir.join(relative);

            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }

        Ok(copied)
    }
}

const DEFAULT_CSS: &str = r#"/* terradocs theme */

:root {
  --sidebar-width: 280px;
  --toc-width: 200px;
  --content-max-width: 800px;
  --background: #ffffff;
  --foreground: #1c1e21;
  --muted: #f5f6f7;
  --muted-foreground: #606770;
  --border: #dadde1;
  --primary: #2e8555;
  --primary-foreground: #ffffff;
  --footer-dark: #303846;
  --radius: 0.375rem;
}

* {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

body {
  font-family: system-ui, -apple-system, sans-serif;
  background: var(--background);
  color: var(--foreground);
  line-height: 1.6;
}

/* Navbar */
.navbar {
  display: flex;
  align-items: center;
  justify-content: space-between;
  padding: 0.5rem 1.5rem;
  border-bottom: 1px solid var(--border);
  box-shadow: 0 1px 2px rgba(0, 0, 0, 0.05);
}

.navbar-brand {
  display: flex;
  align-items: center;
  gap: 0.5rem;
  font-weight: 700;
  font-size: 1.125rem;
  color: var(--foreground);
  text-decoration: none;
}

.navbar-brand img {
  height: 2rem;
}

.navbar-items {
  display: flex;
  align-items: center;
  gap: 1rem;
  list-style: none;
}

.navbar-items a {
  color: var(--foreground);
  text-decoration: none;
}

.navbar-items a:hover {
  color: var(--primary);
}

/* Doc layout */
.layout {
  display: grid;
  grid-template-columns: var(--sidebar-width) 1fr;
  min-height: calc(100vh - 3.5rem);
}

.sidebar {
  background: var(--muted);
  border-right: 1px solid var(--border);
  padding: 1.5rem;
  position: sticky;
  top: 0;
  height: 100vh;
  overflow-y: auto;
}

.nav-list,
.nav-children {
  list-style: none;
}

.nav-children {
  margin-left: 1rem;
  margin-top: 0.25rem;
}

.nav-item {
  margin-bottom: 0.25rem;
}

.nav-item a {
  display: block;
  padding: 0.375rem 0.75rem;
  color: var(--muted-foreground);
  text-decoration: none;
  border-radius: var(--radius);
}

.nav-item a:hover {
  background: var(--border);
  color: var(--foreground);
}

.nav-item.active > a {
  background: var(--primary);
  color: var(--primary-foreground);
}

.nav-category {
  display: block;
  padding: 0.375rem 0.75rem;
  font-weight: 600;
  color: var(--foreground);
}

/* Main content */
.main {
  display: grid;
  grid-template-columns: 1fr var(--toc-width);
  gap: 2rem;
  padding: 2rem;
  max-width: calc(var(--content-max-width) + var(--toc-width) + 4rem);
}

.doc {
  max-width: var(--content-max-width);
}

.content h1 {
  font-size: 2.25rem;
  margin-bottom: 1.5rem;
}

.content h2 {
  font-size: 1.5rem;
  margin: 2rem 0 1rem;
  padding-bottom: 0.5rem;
  border-bottom: 1px solid var(--border);
}

.content h3 {
  font-size: 1.25rem;
  margin: 1.5rem 0 0.75rem;
}

.content p,
.content ul,
.content ol {
  margin-bottom: 1rem;
}

.content ul,
.content ol {
  padding-left: 1.5rem;
}

.content a {
  color: var(--primary);
  text-decoration: underline;
  text-underline-offset: 4px;
}

.content img {
  max-width: 100%;
}

.content pre {
  background: var(--muted);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 1rem;
  overflow-x: auto;
  font-size: 0.875rem;
  margin-bottom: 1rem;
}

.content code {
  font-family: ui-monospace, monospace;
  font-size: 0.875em;
  background: var(--muted);
  padding: 0.125rem 0.375rem;
  border-radius: 0.25rem;
}

.content pre code {
  background: none;
  padding: 0;
}

/* Math */
.math-display {
  overflow-x: auto;
  margin: 1rem 0;
  text-align: center;
}

/* Table of contents */
.toc {
  position: sticky;
  top: 2rem;
  align-self: start;
}

.toc h2 {
  font-size: 0.75rem;
  font-weight: 600;
  text-transform: uppercase;
  letter-spacing: 0.05em;
  color: var(--muted-foreground);
  margin-bottom: 0.75rem;
}

.toc ul {
  list-style: none;
}

.toc a {
  font-size: 0.875rem;
  color: var(--muted-foreground);
  text-decoration: none;
}

.toc a:hover {
  color: var(--foreground);
}

.toc-level-3 {
  padding-left: 1rem;
}

/* Homepage */
.hero {
  text-align: center;
  padding: 4rem 1.5rem;
  background: var(--primary);
  color: var(--primary-foreground);
}

.hero h1 {
  font-size: 3rem;
}

.hero p {
  font-size: 1.25rem;
  margin-top: 0.5rem;
}

.features {
  display: flex;
  align-items: flex-start;
  padding: 2rem 0;
  width: 100%;
}

.features .row {
  display: flex;
  flex-wrap: wrap;
  margin: 0 auto;
  max-width: 1140px;
  width: 100%;
}

.feature {
  flex: 1 1 0;
  min-width: 250px;
  padding: 0 1rem;
  text-align: center;
}

.feature img {
  height: 150px;
  width: 150px;
}

.feature h3 {
  font-size: 1.25rem;
  margin: 1rem 0 0.5rem;
}

/* Footer */
.footer {
  padding: 2rem 1.5rem;
}

.footer.footer-dark {
  background: var(--footer-dark);
  color: #ebedf0;
}

.footer-columns {
  display: flex;
  flex-wrap: wrap;
  gap: 3rem;
  max-width: 1140px;
  margin: 0 auto;
}

.footer-columns h4 {
  margin-bottom: 0.75rem;
}

.footer-columns ul {
  list-style: none;
}

.footer a {
  color: inherit;
  text-decoration: none;
}

.footer a:hover {
  text-decoration: underline;
}

.footer-copyright {
  text-align: center;
  margin-top: 2rem;
  font-size: 0.875rem;
}

/* Responsive */
@media (max-width: 1024px) {
  .layout {
    grid-template-columns: 1fr;
  }

  .sidebar {
    position: static;
    height: auto;
  }

  .main {
    grid-template-columns: 1fr;
  }

  .toc {
    display: none;
  }
}
"#;

const DEFAULT_JS: &str = r#"// terradocs runtime
(function() {
  'use strict';

  // Highlight current sidebar item
  const currentPath = window.location.pathname;
  const navLinks = document.querySelectorAll('.nav-item a');

  navLinks.forEach(link => {
    const href = link.getAttribute('href');
    if (href === currentPath) {
      link.parentElement.classList.add('active');
    }
  });

  // Copy code button for pre blocks
  document.querySelectorAll('.content pre').forEach(pre => {
    if (pre.querySelector('.copy-btn')) return;

    const btn = document.createElement('button');
    btn.className = 'copy-btn';
    btn.textContent = 'Copy';
    btn.setAttribute('type', 'button');

    btn.addEventListener('click', async () => {
      const code = pre.querySelector('code');
      const text = code ? code.textContent : pre.textContent;

      try {
        await navigator.clipboard.writeText(text || '');
        btn.textContent = 'Copied!';
        setTimeout(() => { btn.textContent = 'Copy'; }, 2000);
      } catch (err) {
        btn.textContent = 'Error';
        setTimeout(() => { btn.textContent = 'Copy'; }, 2000);
      }
    });

    pre.appendChild(btn);
  });
})();
"#;
