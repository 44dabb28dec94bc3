//! Initialize a documentation site in a project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(yes: bool) -> Result<()> {
    tracing::info!("Initializing terradocs...");

    let docs_dir = Path::new("docs");

    // Check if docs already exists
    if docs_dir.exists() {
        if !yes {
            tracing::warn!("docs/ directory already exists. Use --yes to overwrite.");
            return Ok(());
        }
    } else {
        fs::create_dir_all(docs_dir).context("Failed to create docs directory")?;
    }

    write_if_new(Path::new("site.toml"), DEFAULT_CONFIG, yes)?;
    write_if_new(Path::new("sidebar.toml"), DEFAULT_SIDEBAR, yes)?;

    write_if_new(&docs_dir.join("intro.md"), DEFAULT_INTRO, yes)?;
    write_if_new(&docs_dir.join("attribution.md"), DEFAULT_ATTRIBUTION, yes)?;

    let appendix_dir = docs_dir.join("Appendix");
    fs::create_dir_all(&appendix_dir).context("Failed to create Appendix directory")?;
    write_if_new(
        &appendix_dir.join("A01-data-sources.md"),
        DEFAULT_DATA_SOURCES,
        yes,
    )?;

    let tutorials_dir = docs_dir.join("Tutorials");
    fs::create_dir_all(&tutorials_dir).context("Failed to create Tutorials directory")?;
    write_if_new(
        &tutorials_dir.join("01-getting-started.md"),
        DEFAULT_GETTING_STARTED,
        yes,
    )?;
    write_if_new(
        &tutorials_dir.join("02-spectral-indices.md"),
        DEFAULT_SPECTRAL_INDICES,
        yes,
    )?;

    let img_dir = Path::new("static/img");
    fs::create_dir_all(img_dir).context("Failed to create static/img directory")?;
    write_if_new(&img_dir.join("logo.svg"), LOGO_SVG, yes)?;
    write_if_new(&img_dir.join("icon_tractor.svg"), ICON_TRACTOR_SVG, yes)?;
    write_if_new(&img_dir.join("icon_earth.svg"), ICON_EARTH_SVG, yes)?;
    write_if_new(&img_dir.join("icon_satellite.svg"), ICON_SATELLITE_SVG, yes)?;

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'terradocs dev' to start the development server.");

    Ok(())
}

fn write_if_new(path: &Path, content: &str, overwrite: bool) -> Result<()> {
    if !path.exists() || overwrite {
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Created {}", path.display());
    }
    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Terradocs configuration

[site]
title = "Remote Sensing Documentation"
tagline = "Remote sensing and mapping with the Google Earth Engine"
url = "https://LozAnalytics.github.io"
base_url = "/"
organization = "LozAnalytics"
project = "remote-sensing"
edit_url = "https://github.com/LozAnalytics/remote-sensing/edit/main"

# KaTeX styles for math rendering
[[site.stylesheets]]
href = "https://cdn.jsdelivr.net/npm/katex@0.13.24/dist/katex.min.css"
integrity = "sha384-odtC+0UGzzFL/6PNoE8rX/SPcQDXBJ+uRepguP4QkPCm2LBxH3FA3y+fKSiJ+AmM"
crossorigin = "anonymous"

[markdown]
math = true

# Unresolved doc references in navbar/footer/sidebar abort the build;
# unresolved links inside markdown prose only warn.
[links]
on_broken_links = "throw"
on_broken_markdown_links = "warn"

[navbar]
logo = { src = "img/logo.svg", alt = "Loz Analytics" }

[[navbar.items]]
label = "Tutorial"
doc = "intro"

[[navbar.items]]
label = "GitHub"
href = "https://github.com/LozAnalytics/remote-sensing"
position = "right"

[footer]
style = "dark"
copyright = "Copyright © Loz Analytics, LLC."

[[footer.links]]
title = "Docs"
items = [{ label = "Tutorial", to = "intro" }]

[[footer.links]]
title = "Community"
items = [{ label = "Website", href = "https://lozanalytics.com" }]

[[home.features]]
title = "Comprehensive Workflow Coverage"
icon = "img/icon_tractor.svg"
description = "Tutorials provide an end-to-end guide through the entire remote sensing workflow, ensuring you grasp each step from data acquisition to analysis."

[[home.features]]
title = "In-Depth Tutorials"
icon = "img/icon_earth.svg"
description = "Dive deep into the functionalities of Google Earth Engine with tutorials that offer detailed explanations and insights, making complex concepts accessible."

[[home.features]]
title = "Hands-On Learning"
icon = "img/icon_satellite.svg"
description = "Engage with practical examples and hands-on exercises designed to reinforce learning and apply theoretical knowledge to real-world scenarios."
"#;

const DEFAULT_SIDEBAR: &str = r#"# Sidebar definition: explicit entries plus auto-generated categories.

[[sidebar]]
doc = "intro"

[[sidebar]]
doc = "attribution"

[[sidebar]]
category = "Appendix"
autogenerate = "Appendix"

[[sidebar]]
category = "Tutorials"
autogenerate = "Tutorials"
"#;

const DEFAULT_INTRO: &str = r#"---
title: Introduction
---

# Introduction

Welcome to the remote sensing tutorials. These guides walk through the
entire workflow of working with satellite imagery in the
[Google Earth Engine](https://earthengine.google.com/), from data
acquisition to analysis.

## Where to start

Head to [Getting Started](/docs/Tutorials/01-getting-started/) for account
setup and your first script, or browse the Appendix for background
material. Data sources used throughout are listed on the
[attribution](/docs/attribution/) page.
"#;

const DEFAULT_ATTRIBUTION: &str = r#"---
title: Attribution
description: Data sources and attribution for the tutorials
---

# Attribution

The tutorials build on freely available satellite data and open course
material.

## Imagery

- Landsat imagery courtesy of the U.S. Geological Survey
- Sentinel-2 imagery courtesy of the European Space Agency (Copernicus)

## Platform

Analysis runs on the [Google Earth Engine](https://earthengine.google.com/),
which provides free access for research and education.
"#;

const DEFAULT_DATA_SOURCES: &str = r#"---
title: Data Sources
sidebar_label: Data Sources
---

# Data Sources

Catalog identifiers for the collections used in the tutorials.

| Collection | Identifier | Resolution |
|------------|------------|------------|
| Landsat 8 Surface Reflectance | `LANDSAT/LC08/C02/T1_L2` | 30 m |
| Sentinel-2 MSI | `COPERNICUS/S2_SR` | 10 m |
| MODIS Land Cover | `MODIS/006/MCD12Q1` | 500 m |
"#;

const DEFAULT_GETTING_STARTED: &str = r#"---
title: Getting Started
description: Set up Earth Engine and run your first script
---

# Getting Started

This tutorial sets up your Earth Engine account and walks through loading
and visualizing your first image collection.

## Sign up

Request access at [signup.earthengine.google.com](https://signup.earthengine.google.com/).

## Your first script

```javascript
var image = ee.ImageCollection('LANDSAT/LC08/C02/T1_L2')
  .filterDate('2023-06-01', '2023-09-01')
  .filterBounds(ee.Geometry.Point(-80.42, 37.23))
  .sort('CLOUD_COVER')
  .first();

Map.centerObject(image, 9);
Map.addLayer(image, {bands: ['SR_B4', 'SR_B3', 'SR_B2'], min: 0, max: 30000});
```

Continue with [spectral indices](./02-spectral-indices.md) to start
analyzing the imagery.
"#;

const DEFAULT_SPECTRAL_INDICES: &str = r#"---
title: Spectral Indices
description: Band math for vegetation and water analysis
---

# Spectral Indices

Spectral indices combine reflectance bands to highlight surface
properties. The most common is the Normalized Difference Vegetation
Index:

$$
NDVI = \frac{NIR - Red}{NIR + Red}
$$

Healthy vegetation reflects strongly in the near-infrared, so $NDVI$
values close to $1$ indicate dense canopy while values near $0$ indicate
bare soil.

## Computing NDVI

```javascript
var ndvi = image.normalizedDifference(['SR_B5', 'SR_B4']).rename('NDVI');
Map.addLayer(ndvi, {min: -1, max: 1, palette: ['blue', 'white', 'green']});
```
"#;

const LOGO_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 32 32">
  <rect width="32" height="32" rx="6" fill="#2e8555"/>
  <path d="M8 20l5-8 4 5 3-3 4 6z" fill="#ffffff"/>
</svg>
"#;

const ICON_TRACTOR_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 64">
  <circle cx="20" cy="44" r="10" fill="#2e8555"/>
  <circle cx="46" cy="48" r="6" fill="#2e8555"/>
  <path d="M12 34h28v-12h-16l-4 8h-8z" fill="#606770"/>
</svg>
"#;

const ICON_EARTH_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 64">
  <circle cx="32" cy="32" r="24" fill="#4f9ddb"/>
  <path d="M18 26c6-6 12 2 18-2s10 2 8 8-10 10-16 8-14-8-10-14z" fill="#2e8555"/>
</svg>
"#;

const ICON_SATELLITE_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 64">
  <rect x="26" y="26" width="12" height="12" fill="#606770"/>
  <rect x="8" y="28" width="14" height="8" fill="#2e8555"/>
  <rect x="42" y="28" width="14" height="8" fill="#2e8555"/>
</svg>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaffold_parses_as_valid_configuration() {
        // The generated config and sidebar must load with the real parsers
        let temp = tempfile::tempdir().unwrap();
        let config_path = temp.path().join("site.toml");
        let sidebar_path = temp.path().join("sidebar.toml");

        fs::write(&config_path, DEFAULT_CONFIG).unwrap();
        fs::write(&sidebar_path, DEFAULT_SIDEBAR).unwrap();

        let config = terradocs_config::SiteConfig::load(&config_path).unwrap();
        assert_eq!(config.site.title, "Remote Sensing Documentation");
        assert_eq!(config.home.features.len(), 3);
        assert!(config.markdown.math);

        let sidebar = terradocs_config::load_sidebar(&sidebar_path).unwrap();
        assert_eq!(sidebar.len(), 4);
    }
}
