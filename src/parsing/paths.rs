//! Import path resolution.
//!
//! Turns an extracted specifier into a canonical, project-relative id. Pure
//! string manipulation: nothing here touches the filesystem, so a resolved
//! id may name a file that does not exist.

use super::assets::{CODE_EXTENSIONS, is_asset, strip_query};

/// Strip the first matching extension from `path_str`.
///
/// Extensions are given without the dot and tried in order, so compound
/// extensions such as `d.ts` must precede their suffixes.
pub fn strip_extension<'a>(path_str: &'a str, extensions: &[&str]) -> &'a str {
    for ext in extensions {
        let suffix = format!(".{ext}");
        if let Some(stripped) = path_str.strip_suffix(&suffix)
            && !stripped.is_empty()
            && !stripped.ends_with('/')
        {
            return stripped;
        }
    }
    path_str
}

/// Directory part of a project-relative path, `""` at the root.
pub fn parent_dir(path: &str) -> &str {
    path.rfind('/').map_or("", |idx| &path[..idx])
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ImportPathResolver;

impl ImportPathResolver {
    pub fn new() -> Self {
        Self
    }

    /// Canonical id for `specifier` as written in `current_file`.
    ///
    /// - asset specifiers keep their extension, code specifiers lose it
    /// - specifiers starting with `.` are joined onto the directory of
    ///   `current_file`, with `..` popping a segment
    /// - everything else (package names, absolute paths) is returned as-is
    pub fn resolve(&self, specifier: &str, current_file: &str) -> String {
        let specifier = strip_query(specifier);
        let specifier = if is_asset(specifier) {
            specifier
        } else {
            strip_extension(specifier, CODE_EXTENSIONS)
        };

        if !specifier.starts_with('.') {
            return specifier.to_string();
        }

        let mut segments: Vec<&str> = parent_dir(current_file)
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        for part in specifier.split('/') {
            match part {
                "" | "." => {}
                ".." => {
                    // Escaping the project root clamps at the root
                    segments.pop();
                }
                other => segments.push(other),
            }
        }

        segments.join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(spec: &str, file: &str) -> String {
        ImportPathResolver::new().resolve(spec, file)
    }

    #[test]
    fn test_relative_code_specifiers() {
        assert_eq!(resolve("./util", "src/index.ts"), "src/util");
        assert_eq!(resolve("../c", "a/b/x.ts"), "a/c");
        assert_eq!(resolve("./util.js", "src/index.ts"), "src/util");
        assert_eq!(resolve("./types.d.ts", "src/index.ts"), "src/types");
        assert_eq!(resolve("./nested/./deep", "src/index.ts"), "src/nested/deep");
    }

    #[test]
    fn test_assets_keep_extension() {
        assert_eq!(resolve("./img.png", "a/x.tsx"), "a/img.png");
        assert_eq!(resolve("../styles/main.css", "src/app/App.vue"), "src/styles/main.css");
        assert_eq!(resolve("./fonts/inter.woff2?v=3", "css/site.css"), "css/fonts/inter.woff2");
    }

    #[test]
    fn test_root_level_files() {
        assert_eq!(resolve("./util", "index.ts"), "util");
        assert_eq!(resolve("../outside", "index.ts"), "outside");
        assert_eq!(resolve(".", "pkg/mod.py"), "pkg");
    }

    #[test]
    fn test_bare_specifiers_unchanged() {
        assert_eq!(resolve("react", "src/index.ts"), "react");
        assert_eq!(resolve("@scope/pkg", "src/index.ts"), "@scope/pkg");
        assert_eq!(resolve("/static/app", "index.html"), "/static/app");
    }

    #[test]
    fn test_strip_extension_order() {
        let ts = &["d.ts", "tsx", "ts"];
        assert_eq!(strip_extension("types.d.ts", ts), "types");
        assert_eq!(strip_extension("component.tsx", ts), "component");
        assert_eq!(strip_extension("README", ts), "README");
        // A bare extension is a name, not a suffix
        assert_eq!(strip_extension("dir/.ts", ts), "dir/.ts");
    }

    #[test]
    fn test_parent_dir() {
        assert_eq!(parent_dir("a/b/c.ts"), "a/b");
        assert_eq!(parent_dir("c.ts"), "");
    }
}
