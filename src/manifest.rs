//! Maps manifest filenames found in a repository root to Dependabot package managers.

use std::collections::BTreeSet;

use crate::ContentEntry;

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;

const PACKAGE_MANAGER_FILES: &[(&str, &str)] = &[
    ("Dockerfile", "docker"),
    ("Gemfile", "bundler"),
    ("gemspec", "bundler"),
    ("package.json", "npm_and_yarn"),
    ("composer.json", "composer"),
    ("requirements.txt", "pip"),
    ("setup.py", "pip"),
    ("Pipfile", "pip"),
    ("Pipfile.lock", "pip"),
    ("build.gradle", "gradle"),
    ("pom.xml", "maven"),
    ("Cargo.toml", "cargo"),
    ("mix.exs", "hex"),
    ("mix.lock", "hex"),
];

/// Filename to package-manager lookup. Several files may map to the same package manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestTable {
    entries: Vec<(String, String)>,
}

impl ManifestTable {
    pub fn new<F, P>(entries: impl IntoIterator<Item = (F, P)>) -> Self
    where
        F: Into<String>,
        P: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(file, package_manager)| (file.into(), package_manager.into()))
                .collect(),
        }
    }

    /// Package managers whose manifest file is present in `contents`, deduplicated.
    pub fn classify(&self, contents: &[ContentEntry]) -> BTreeSet<String> {
        let names: BTreeSet<&str> = contents.iter().map(|entry| entry.name.as_str()).collect();
        self.entries
            .iter()
            .filter(|(file, _)| names.contains(file.as_str()))
            .map(|(_, package_manager)| package_manager.clone())
            .collect()
    }
}

impl Default for ManifestTable {
    fn default() -> Self {
        Self::new(PACKAGE_MANAGER_FILES.iter().copied())
    }
}
