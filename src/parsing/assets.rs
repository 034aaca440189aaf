//! Extension tables shared by extractors, the resolver and the target index.

use crate::types::{RelationKind, extension_of};

const STYLE_EXTENSIONS: &[&str] = &["css", "scss", "sass", "less", "styl"];
const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "svg", "webp", "ico", "bmp", "avif",
];
const FONT_EXTENSIONS: &[&str] = &["woff", "woff2", "ttf", "otf", "eot"];
const DATA_EXTENSIONS: &[&str] = &["json", "yaml", "yml", "xml", "csv", "toml"];
const OTHER_ASSET_EXTENSIONS: &[&str] = &[
    "mp4", "webm", "mp3", "wav", "ogg", "pdf", "txt", "md", "wasm",
];

/// Extensions stripped from module specifiers. Longer suffixes first so
/// `types.d.ts` loses `.d.ts`, not `.ts`.
pub const CODE_EXTENSIONS: &[&str] = &[
    "d.ts", "tsx", "ts", "mts", "cts", "jsx", "js", "mjs", "cjs", "vue", "svelte", "py", "pyi",
];

/// Extensions tried, in priority order, when binding an extension-less target
/// to a file on disk.
pub const BINDING_EXTENSIONS: &[&str] = &[
    "ts", "tsx", "d.ts", "js", "jsx", "mjs", "cjs", "mts", "cts", "vue", "svelte", "py", "pyi",
    "java", "kt", "kts", "scala", "groovy",
];

/// Relation kind for a reference to `specifier`, decided by its extension.
/// Anything not recognized as an asset is a plain `IMPORTS`.
pub fn classify(specifier: &str) -> RelationKind {
    let ext = extension_of(strip_query(specifier));
    let ext = ext.as_str();
    if STYLE_EXTENSIONS.contains(&ext) {
        RelationKind::ImportsCss
    } else if IMAGE_EXTENSIONS.contains(&ext) {
        RelationKind::ImportsImage
    } else if FONT_EXTENSIONS.contains(&ext) {
        RelationKind::ImportsFont
    } else if DATA_EXTENSIONS.contains(&ext) {
        RelationKind::ImportsData
    } else if OTHER_ASSET_EXTENSIONS.contains(&ext) {
        RelationKind::ImportsAsset
    } else {
        RelationKind::Imports
    }
}

/// Whether `specifier` names a non-code asset.
pub fn is_asset(specifier: &str) -> bool {
    classify(specifier) != RelationKind::Imports
}

/// Drop a `?query` or `#fragment` suffix, as in `font.woff2?v=3`.
pub fn strip_query(specifier: &str) -> &str {
    specifier
        .find(['?', '#'])
        .map_or(specifier, |idx| &specifier[..idx])
}

/// References that never point into the project.
pub fn is_external(specifier: &str) -> bool {
    let lower = specifier.to_ascii_lowercase();
    lower.starts_with("http:")
        || lower.starts_with("https:")
        || lower.starts_with("//")
        || lower.starts_with("data:")
        || lower.starts_with("mailto:")
        || lower.starts_with('#')
}
