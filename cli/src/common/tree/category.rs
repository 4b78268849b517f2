//! # File Categories
//!
//! File: cli/src/common/tree/category.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! A category is a heuristic classification of a file node used only for
//! color-coding. Rules are evaluated in order and the first match wins:
//!
//! 1. `page`: a `pages` directory segment, or an `app` segment with a file named
//!    `page.*` or containing `layout.`
//! 2. `api`: an `api` directory segment, or a file name containing `route.`
//! 3. `component`: a `components` directory segment, or a PascalCase `.jsx`/`.tsx` file
//! 4. `code`: any other `.js`, `.jsx`, `.ts` or `.tsx` file
//! 5. `other`: everything else
//!
use serde::{Deserialize, Serialize};
use std::fmt;

/// Source extensions that count as code.
const SOURCE_EXTENSIONS: [&str; 4] = ["js", "jsx", "ts", "tsx"];
/// Extensions whose PascalCase files are treated as components.
const COMPONENT_EXTENSIONS: [&str; 2] = ["jsx", "tsx"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Page,
    Api,
    Component,
    Code,
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Page,
        Category::Api,
        Category::Component,
        Category::Code,
        Category::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Page => "page",
            Category::Api => "api",
            Category::Component => "component",
            Category::Code => "code",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a file by its full `/`-separated path.
pub fn classify(path: &str) -> Category {
    let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let name = segments.pop().unwrap_or_default();
    let in_dir = |dir: &str| segments.iter().any(|segment| *segment == dir);
    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    if in_dir("pages") || (in_dir("app") && (name.starts_with("page.") || name.contains("layout.")))
    {
        return Category::Page;
    }
    if in_dir("api") || name.contains("route.") {
        return Category::Api;
    }
    let pascal_case = name.chars().next().is_some_and(|c| c.is_uppercase());
    if in_dir("components") || (pascal_case && COMPONENT_EXTENSIONS.contains(&extension.as_str()))
    {
        return Category::Component;
    }
    if SOURCE_EXTENSIONS.contains(&extension.as_str()) {
        return Category::Code;
    }
    Category::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_rules() {
        assert_eq!(classify("src/app/page.tsx"), Category::Page);
        assert_eq!(classify("app/dashboard/layout.tsx"), Category::Page);
        assert_eq!(classify("src/pages/index.js"), Category::Page);
        assert_eq!(classify("src/pages/api/hello.ts"), Category::Page);
        // `page.` only counts under an app segment
        assert_eq!(classify("src/lib/page.ts"), Category::Code);
    }

    #[test]
    fn test_api_precedes_component_and_code() {
        assert_eq!(classify("src/app/api/route.ts"), Category::Api);
        assert_eq!(classify("src/app/api/issues/Handler.tsx"), Category::Api);
        assert_eq!(classify("server/route.js"), Category::Api);
    }

    #[test]
    fn test_component_rules() {
        assert_eq!(classify("src/components/Button.tsx"), Category::Component);
        assert_eq!(classify("src/components/icons.svg"), Category::Component);
        assert_eq!(classify("src/Header.jsx"), Category::Component);
        // PascalCase plain .js stays code
        assert_eq!(classify("src/App.js"), Category::Code);
    }

    #[test]
    fn test_code_and_other() {
        assert_eq!(classify("src/index.js"), Category::Code);
        assert_eq!(classify("lib/utils.TS"), Category::Code);
        assert_eq!(classify("public/logo.png"), Category::Other);
        assert_eq!(classify("Makefile"), Category::Other);
        assert_eq!(classify("scripts/analyze.py"), Category::Other);
    }

    #[test]
    fn test_segment_matching_is_exact() {
        // `mypages` is not a `pages` segment and `apis` is not `api`
        assert_eq!(classify("mypages/index.js"), Category::Code);
        assert_eq!(classify("apis/client.ts"), Category::Code);
    }
}
