//! CSS custom properties.
//!
//! Colors are written twice under scheme selectors with identical variable
//! names, so switching `data-theme` swaps every color at once. The remaining
//! groups go into one unscoped `:root` block.

use std::fmt::Write as _;

use super::flatten::{css_declaration, flatten_tokens};
use super::Exporter;
use crate::models::{DesignConfig, Scheme};

const LIGHT_SELECTOR: &str = ":root,\n[data-theme=\"light\"]";
const DARK_SELECTOR: &str = "[data-theme=\"dark\"]";

/// `tokens.css`
#[derive(Debug, Clone, Copy, Default)]
pub struct CssExporter;

impl Exporter for CssExporter {
    fn id(&self) -> &'static str {
        "css"
    }

    fn label(&self) -> &'static str {
        "CSS Variables"
    }

    fn file_extension(&self) -> &'static str {
        "css"
    }

    fn file_name(&self) -> &'static str {
        "tokens.css"
    }

    fn run(&self, config: &DesignConfig) -> String {
        let tokens = flatten_tokens(config);
        let mut output = String::from("/* Design tokens generated by Tokensmith */\n");

        let mut blocks: Vec<(&str, Vec<String>)> = vec![
            (LIGHT_SELECTOR, Vec::new()),
            (DARK_SELECTOR, Vec::new()),
            (":root", Vec::new()),
        ];
        for token in &tokens {
            let slot = match token.scheme() {
                Some(Scheme::Light) => 0,
                Some(Scheme::Dark) => 1,
                None => 2,
            };
            blocks[slot].1.push(css_declaration(token));
        }

        for (selector, declarations) in blocks {
            if declarations.is_empty() {
                continue;
            }
            let _ = writeln!(output, "\n{selector} {{");
            for declaration in declarations {
                let _ = writeln!(output, "  {declaration}");
            }
            output.push_str("}\n");
        }

        output
    }
}
