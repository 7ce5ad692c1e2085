//! Archive entry filtering and prefix stripping

use camino::Utf8PathBuf;

/// Keeps archive entries below `<root>/<template>/` and strips that prefix
///
/// Matching is literal and component-wise: `template/web` matches
/// `template/web/src/a.js` but not `template/web-admin/a.js`, and template
/// names containing characters like `.` or `+` match only themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRewriteRule {
    prefix: Vec<String>,
}

impl PathRewriteRule {
    pub fn new(root: &str, template: &str) -> Self {
        let prefix = components(root)
            .chain(components(template))
            .map(str::to_string)
            .collect();
        Self { prefix }
    }

    /// The stripped prefix, `/`-joined
    pub fn prefix(&self) -> String {
        self.prefix.join("/")
    }

    /// Rewrite an entry path, or `None` when the entry is excluded
    ///
    /// Entries escaping through `..`, and the prefix directory itself, are
    /// always excluded.
    pub fn apply(&self, entry: &str) -> Option<Utf8PathBuf> {
        let normalized = entry.replace('\\', "/");
        let parts: Vec<&str> = components(&normalized).collect();

        if parts.iter().any(|p| *p == "..") {
            return None;
        }
        if parts.len() <= self.prefix.len() {
            return None;
        }
        if !parts.iter().zip(&self.prefix).all(|(a, b)| a == b) {
            return None;
        }

        Some(parts[self.prefix.len()..].iter().collect())
    }
}

fn components(path: &str) -> impl Iterator<Item = &str> {
    path.split(['/', '\\'])
        .filter(|part| !part.is_empty() && *part != ".")
}
