//! Lookup of installed tool artefacts.
//!
//! A [`ToolFinder`] scans one installed folder for jar files and answers
//! lookups by name. Filenames of the form `<name>@<version>.jar` carry a
//! module identity and version; any other jar is identified by its filename
//! stem. A lookup name matches an artefact exactly or as a `name-` prefix,
//! so `jreleaser-tool-provider-1.2.3.jar` is found under `jreleaser`.

use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::Result;

/// An installed artefact discovered in a folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artefact {
    /// Artefact name: the part before `@`, or the whole filename stem.
    pub name: String,
    /// Version carried after `@`, when the filename has one.
    pub version: Option<String>,
    /// Full path to the jar file.
    pub path: Utf8PathBuf,
}

impl Artefact {
    /// Parses an artefact identity from a jar path.
    ///
    /// Non-jar paths and paths without a filename yield `None`.
    fn of_path(path: Utf8PathBuf) -> Option<Self> {
        let stem = path.file_name()?.strip_suffix(".jar")?;
        let (name, version) = stem
            .split_once('@')
            .map_or((stem, None), |(name, version)| (name, Some(version)));
        Some(Self {
            name: name.to_owned(),
            version: version.map(str::to_owned),
            path,
        })
    }

    /// Whether this artefact answers to `tool`.
    ///
    /// Matches the name exactly or as a `tool-` prefix.
    #[must_use]
    pub fn answers_to(&self, tool: &str) -> bool {
        self.name
            .strip_prefix(tool)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('-'))
    }
}

impl fmt::Display for Artefact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(version) = &self.version {
            write!(f, "@{version}")?;
        }
        Ok(())
    }
}

/// Lookup view over the artefacts installed in one folder.
#[derive(Debug, Clone, Default)]
pub struct ToolFinder {
    artefacts: Vec<Artefact>,
}

impl ToolFinder {
    /// Scans `folder` for installed jar artefacts.
    ///
    /// A missing folder yields an empty finder. Artefacts are sorted by
    /// path.
    ///
    /// # Errors
    ///
    /// Returns [`GantryError::Io`](crate::error::GantryError::Io) when the
    /// folder cannot be read.
    pub fn of_folder(folder: &Utf8Path) -> Result<Self> {
        let mut artefacts = Vec::new();
        let entries = match folder.read_dir_utf8() {
            Ok(entries) => entries,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self { artefacts });
            }
            Err(error) => return Err(error.into()),
        };
        for result in entries {
            let entry = result?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(artefact) = Artefact::of_path(entry.into_path()) {
                artefacts.push(artefact);
            }
        }
        artefacts.sort_by(|left, right| left.path.cmp(&right.path));
        Ok(Self { artefacts })
    }

    /// Finds the first artefact answering to `tool`.
    #[must_use]
    pub fn find(&self, tool: &str) -> Option<&Artefact> {
        self.artefacts
            .iter()
            .find(|artefact| artefact.answers_to(tool))
    }

    /// All discovered artefacts, sorted by path.
    #[must_use]
    pub fn artefacts(&self) -> &[Artefact] {
        &self.artefacts
    }
}

#[cfg(test)]
#[path = "finder_tests.rs"]
mod tests;
