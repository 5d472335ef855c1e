//! Discovery of module compilation units.
//!
//! A module compilation unit is a `module-info.java` descriptor whose parent
//! directory names the module. Units live directly under the project root or
//! one level down inside a `sub` directory; nothing deeper is considered.

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::Result;

/// Finds module descriptors beneath `root`, sorted by path.
///
/// Both `<root>/<module>/module-info.java` and
/// `<root>/sub/<module>/module-info.java` are discovered. A missing root
/// yields no units.
///
/// # Errors
///
/// Returns [`GantryError::Io`](crate::error::GantryError::Io) when a present
/// directory cannot be read.
pub fn module_compilation_units(root: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
    let mut units = Vec::new();
    collect_units(root, &mut units)?;
    collect_units(&root.join("sub"), &mut units)?;
    units.sort();
    Ok(units)
}

/// Module identities for discovered units: each descriptor's parent folder
/// name.
#[must_use]
pub fn module_names(units: &[Utf8PathBuf]) -> Vec<String> {
    units
        .iter()
        .filter_map(|unit| unit.parent())
        .filter_map(Utf8Path::file_name)
        .map(str::to_owned)
        .collect()
}

/// Collects descriptors from the direct children of `folder`.
fn collect_units(folder: &Utf8Path, units: &mut Vec<Utf8PathBuf>) -> Result<()> {
    let entries = match folder.read_dir_utf8() {
        Ok(entries) => entries,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(error) => return Err(error.into()),
    };
    for result in entries {
        let entry = result?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let descriptor = entry.into_path().join("module-info.java");
        if descriptor.is_file() {
            units.push(descriptor);
        }
    }
    Ok(())
}
