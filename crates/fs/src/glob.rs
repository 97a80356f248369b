use std::{
    collections::HashSet,
    fs,
    path::{Component, Path, PathBuf},
};

use bitflags::bitflags;
use filetab_runtime::{LIKE_RECURSIVE_WILDCARD, LIKE_WILDCARD, MAX_RECURSIVE_GLOB_DEPTH};
use globset::{GlobBuilder, GlobMatcher};
use ignore::WalkBuilder;
use log::{debug, trace};

bitflags! {
    /// Expansion modes for `resolve_file_pattern`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct GlobFlags: u8 {
        /// Keep anything that is not a directory.
        const FILES    = 0b0001;
        /// Keep directories.
        const FOLDERS  = 0b0010;
        const ALL      = Self::FILES.bits() | Self::FOLDERS.bits();
        /// Return paths as they were built from the pattern instead of canonical ones.
        const NO_CANON = 0b0100;
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GlobError {
    #[error("empty pattern")]
    Empty,

    #[error("'%%' is only allowed as the last component of {0:?}")]
    RecursiveNotLast(String),

    #[error("invalid pattern component {component:?}: {source}")]
    InvalidComponent {
        component: String,
        #[source]
        source: globset::Error,
    },
}

/// One step of a parsed pattern.
enum Segment {
    /// Fixed prefix (root, drive prefix, `.`/`..`, or a name without wildcards).
    Literal(PathBuf),
    /// Single component matched against directory entries.
    Wild(GlobMatcher),
}

struct ParsedPattern {
    segments: Vec<Segment>,
    recursive_tail: bool,
}

/// Expand a LIKE-style path pattern into existing paths.
///
/// `%` matches within one component; a final `%%` component matches everything
/// below its prefix. Glob metacharacters (`*`, `?`, `[..]`, `{..}`) are honored
/// too. Unreadable directories met during expansion contribute nothing.
pub fn resolve_file_pattern(pattern: &str, flags: GlobFlags) -> Result<Vec<String>, GlobError> {
    let parsed = parse_pattern(pattern)?;

    let mut frontier = vec![PathBuf::new()];
    for segment in &parsed.segments {
        frontier = match segment {
            Segment::Literal(part) => frontier.into_iter().map(|p| p.join(part)).collect(),
            Segment::Wild(matcher) => frontier
                .iter()
                .flat_map(|dir| matching_children(dir, matcher))
                .collect(),
        };

        if frontier.is_empty() {
            break;
        }
    }

    if parsed.recursive_tail {
        frontier = frontier.iter().flat_map(|dir| descendants(dir)).collect();
    }

    // The frontier never repeats a path; only canonicalization can merge two of them.
    let mut canonical_seen = HashSet::new();
    let mut out = Vec::with_capacity(frontier.len());
    for candidate in frontier {
        if !keep_by_type(&candidate, flags) {
            continue;
        }

        let resolved = if flags.contains(GlobFlags::NO_CANON) {
            candidate
        } else {
            match candidate.canonicalize() {
                Ok(p) if canonical_seen.insert(p.clone()) => p,
                Ok(_) => continue,
                Err(e) => {
                    trace!("[glob] canonicalize({:?}) failed: {e}", candidate);
                    continue;
                }
            }
        };

        out.push(resolved.to_string_lossy().into_owned());
    }

    debug!("[glob] {:?} resolved to {} path(s)", pattern, out.len());
    Ok(out)
}

fn parse_pattern(pattern: &str) -> Result<ParsedPattern, GlobError> {
    if pattern.is_empty() {
        return Err(GlobError::Empty);
    }

    let components: Vec<Component<'_>> = Path::new(pattern).components().collect();
    let mut segments = Vec::with_capacity(components.len());
    let mut recursive_tail = false;

    for (i, component) in components.iter().enumerate() {
        let is_last = i + 1 == components.len();
        let Component::Normal(os) = component else {
            segments.push(Segment::Literal(PathBuf::from(component.as_os_str())));
            continue;
        };

        let text = os.to_string_lossy();
        if text == LIKE_RECURSIVE_WILDCARD {
            if !is_last {
                return Err(GlobError::RecursiveNotLast(pattern.to_owned()));
            }
            recursive_tail = true;
            continue;
        }

        let glob = like_to_glob(&text);
        if has_glob_meta(&glob) {
            let matcher = GlobBuilder::new(&glob)
                .literal_separator(true)
                .build()
                .map_err(|source| GlobError::InvalidComponent {
                    component: text.to_string(),
                    source,
                })?
                .compile_matcher();
            segments.push(Segment::Wild(matcher));
        } else {
            segments.push(Segment::Literal(PathBuf::from(os)));
        }
    }

    Ok(ParsedPattern {
        segments,
        recursive_tail,
    })
}

/// Collapse each run of `%` into a single `*`.
fn like_to_glob(component: &str) -> String {
    let mut out = String::with_capacity(component.len());
    let mut in_run = false;
    for ch in component.chars() {
        if ch == LIKE_WILDCARD {
            if !in_run {
                out.push('*');
            }
            in_run = true;
        } else {
            out.push(ch);
            in_run = false;
        }
    }
    out
}

fn has_glob_meta(s: &str) -> bool {
    s.contains(['*', '?', '[', '{'])
}

fn listable(dir: &Path) -> &Path {
    if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    }
}

/// Children of `dir` whose names match, sorted by name.
fn matching_children(dir: &Path, matcher: &GlobMatcher) -> Vec<PathBuf> {
    let rd = match fs::read_dir(listable(dir)) {
        Ok(rd) => rd,
        Err(e) => {
            trace!("[glob] read_dir({:?}) failed: {e}", dir);
            return Vec::new();
        }
    };

    let mut names: Vec<_> = rd
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name())
        .filter(|name| matcher.is_match(Path::new(name)))
        .collect();
    names.sort();

    names.into_iter().map(|name| dir.join(name)).collect()
}

/// Every entry below `dir`, excluding `dir` itself.
fn descendants(dir: &Path) -> Vec<PathBuf> {
    let root = listable(dir);
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .max_depth(Some(MAX_RECURSIVE_GLOB_DEPTH))
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut out = Vec::new();
    for entry in walker {
        match entry {
            Ok(entry) if entry.depth() > 0 => {
                let path = entry.into_path();
                // Keep relative patterns relative to what the caller wrote.
                let path = if dir.as_os_str().is_empty() {
                    path.strip_prefix(".").map(Path::to_path_buf).unwrap_or(path)
                } else {
                    path
                };
                out.push(path);
            }
            Ok(_) => {}
            Err(e) => trace!("[glob] walk under {:?} failed: {e}", dir),
        }
    }
    out
}

fn keep_by_type(path: &Path, flags: GlobFlags) -> bool {
    let meta = match fs::metadata(path).or_else(|_| fs::symlink_metadata(path)) {
        Ok(m) => m,
        Err(_) => return false,
    };

    if meta.is_dir() {
        flags.contains(GlobFlags::FOLDERS)
    } else {
        flags.contains(GlobFlags::FILES)
    }
}

#[cfg(test)]
#[path = "glob_tests.rs"]
mod tests;
