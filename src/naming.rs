//! Output path construction for derived versions.
//!
//! Every version is written next to its source (or into an explicit output
//! directory) under the name `<prefix><stem><suffix>.<ext>`:
//!
//! - `./foo.jpg` + suffix `-bar` → `foo-bar.jpg`
//! - `./foo.jpg` + suffix `-bar`, format `png` → `foo-bar.png`
//! - `/foo/bar/baz.jpg` + prefix `im-`, directory `/tmp` → `/tmp/im-baz.jpg`
//!
//! Paths are joined with forward slashes. Leading `.` components are dropped;
//! `..` is kept as written.

use std::path::{Component, Path};

/// Naming options for one version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathOptions<'a> {
    /// Replacement extension, without the dot.
    pub format: Option<&'a str>,
    /// Output directory. `None` means the source's directory.
    pub path: Option<&'a str>,
    pub prefix: &'a str,
    pub suffix: &'a str,
}

/// Compose the output path of a version derived from `source`.
pub fn compose_path(source: &str, opts: &PathOptions<'_>) -> String {
    let source = Path::new(source);
    let dir = match opts.path {
        Some(dir) => Path::new(dir),
        None => source.parent().unwrap_or_else(|| Path::new("")),
    };

    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    let extension = match opts.format.filter(|f| !f.is_empty()) {
        Some(format) => format!(".{format}"),
        None => source
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default(),
    };

    let mut out = directory_prefix(dir);
    out.push_str(opts.prefix);
    out.push_str(&stem);
    out.push_str(opts.suffix);
    out.push_str(&extension);
    out
}

/// Render `dir` as a `/`-terminated prefix, or empty for the current directory.
fn directory_prefix(dir: &Path) -> String {
    let mut out = String::new();
    for component in dir.components() {
        match component {
            Component::Prefix(p) => out.push_str(&p.as_os_str().to_string_lossy()),
            Component::RootDir => out.push('/'),
            Component::CurDir => {}
            Component::ParentDir => out.push_str("../"),
            Component::Normal(s) => {
                out.push_str(&s.to_string_lossy());
                out.push('/');
            }
        }
    }
    out
}
