//! Catalog listing.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::models::{Catalog, CatalogItemSummary};
use clap::Args;
use indexmap::IndexMap;
use std::path::PathBuf;

/// Pseudo-category listing type scales.
const TYPE_SCALES: &str = "type-scales";

/// List catalog entries
#[derive(Debug, Clone, Args)]
pub struct CatalogArgs {
    /// Only this category (colors, typography, button, ..., type-scales)
    #[arg(long, value_name = "CATEGORY")]
    pub category: Option<String>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Catalog JSON file to use instead of the built-in catalog
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,
}

fn listing(catalog: &Catalog, category: Option<&str>) -> CliResult<IndexMap<String, Vec<CatalogItemSummary>>> {
    let mut categories: Vec<&str> = Catalog::categories();
    categories.push(TYPE_SCALES);

    if let Some(wanted) = category {
        if !categories.contains(&wanted) {
            return Err(CliError::validation(format!(
                "Unknown category '{wanted}'. Valid categories: {}",
                categories.join(", ")
            )));
        }
        categories.retain(|c| *c == wanted);
    }

    Ok(categories
        .into_iter()
        .map(|name| {
            let items = if name == TYPE_SCALES {
                catalog
                    .type_scales
                    .iter()
                    .map(|scale| CatalogItemSummary {
                        id: scale.id.clone(),
                        name: scale.name.clone(),
                    })
                    .collect()
            } else {
                catalog.items(name)
            };
            (name.to_string(), items)
        })
        .collect())
}

impl CatalogArgs {
    /// Execute the catalog command
    pub fn execute(&self) -> CliResult<()> {
        let catalog = Catalog::load_or_embedded(self.catalog.as_deref())
            .map_err(|e| CliError::io(format!("Failed to load catalog: {e:#}")))?;
        let listing = listing(&catalog, self.category.as_deref())?;

        if self.json {
            return print_json(&listing);
        }

        for (category, items) in &listing {
            println!("{category}:");
            if items.is_empty() {
                println!("  (none)");
            }
            let width = items.iter().map(|item| item.id.len()).max().unwrap_or(0);
            for item in items {
                println!("  {:<width$}  {}", item.id, item.name);
            }
            println!();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing() {
        let catalog = Catalog::load().unwrap();

        let all = listing(&catalog, None).unwrap();
        assert_eq!(all.keys().next().map(String::as_str), Some("colors"));
        assert_eq!(all.keys().last().map(String::as_str), Some(TYPE_SCALES));

        let scales = listing(&catalog, Some(TYPE_SCALES)).unwrap();
        assert_eq!(scales.len(), 1);
        assert!(scales[TYPE_SCALES].iter().any(|s| s.id == "golden-ratio"));

        let buttons = listing(&catalog, Some("button")).unwrap();
        let ids: Vec<&str> = buttons["button"].iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["solid", "ghost", "neon"]);

        let err = listing(&catalog, Some("wallpaper")).unwrap_err();
        assert_eq!(err.kind, crate::cli::ExitCode::ValidationError);
    }
}
