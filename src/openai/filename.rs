use std::path::{Component, Path, PathBuf};

pub const DEFAULT_FILENAME: &str = "speech.mp3";

/// Normalize a caller-supplied output name into a relative `.mp3` path.
///
/// Empty segments are dropped, so repeated, leading and trailing slashes
/// disappear. If the last segment does not end in `.mp3` it is treated as a
/// directory and [`DEFAULT_FILENAME`] is placed inside it. Never touches the
/// filesystem and never fails.
pub fn process_filename(original: &str) -> String {
    let mut parts: Vec<&str> = original.split('/').filter(|p| !p.is_empty()).collect();

    let Some(last) = parts.last() else {
        return DEFAULT_FILENAME.to_string();
    };
    if !last.ends_with(".mp3") {
        parts.push(DEFAULT_FILENAME);
    }
    parts.join("/")
}

/// Resolve a sanitized name to an absolute path under the current directory.
pub fn resolve_output_path(sanitized: &str) -> std::io::Result<PathBuf> {
    Ok(resolve_against(&std::env::current_dir()?, sanitized))
}

/// Lexical resolution: `.` is dropped and `..` pops, without consulting the
/// filesystem.
pub(crate) fn resolve_against(base: &Path, relative: &str) -> PathBuf {
    let mut out = base.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(part) => out.push(part),
            Component::RootDir | Component::Prefix(_) => out.push(component.as_os_str()),
        }
    }
    out
}
