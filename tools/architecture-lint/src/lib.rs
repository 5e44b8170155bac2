//! Repo-local lint guarding the hexagonal layering of the bloodlink backend.
//!
//! The backend keeps its business rules in `domain` (entities, services and
//! ports), its HTTP surface in `inbound` and its database, SMS and metrics
//! adapters in `outbound`. The lint parses every source file under those
//! three directories and rejects:
//!
//! - `domain` code that reaches into an adapter layer or pulls in the HTTP
//!   framework, the ORM or the HTTP client used to talk to the SMS provider
//! - `inbound` handlers that import `outbound` adapters or the ORM and HTTP
//!   client directly
//! - `outbound` adapters that import `inbound` modules or the HTTP framework
//!
//! Run it with `cargo run -p architecture-lint` from anywhere inside the
//! workspace.

use std::collections::BTreeSet;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use cap_std::ambient_authority;
use cap_std::fs::Dir;
use syn::visit::Visit;

/// Name the backend crate is imported under from tests and binaries.
const BACKEND_CRATE: &str = "bloodlink";

/// Crates that make up the HTTP framework surface.
const FRAMEWORK_CRATES: &[&str] = &[
    "actix",
    "actix_http",
    "actix_rt",
    "actix_service",
    "actix_web",
    "actix_web_prom",
    "utoipa_swagger_ui",
];

/// Crates that make up the database surface.
const PERSISTENCE_CRATES: &[&str] = &["diesel", "diesel_async", "diesel_migrations"];

/// Crates used to talk to external HTTP services.
const HTTP_CLIENT_CRATES: &[&str] = &["reqwest"];

/// A single boundary violation discovered by the linter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File path relative to `backend/src`.
    pub file: PathBuf,
    /// Human-readable description of the violated rule.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file.display(), self.message)
    }
}

/// Failure modes returned by the architecture lint.
#[derive(Debug)]
pub enum ArchitectureLintError {
    /// Filesystem traversal or reading failed.
    Io(io::Error),
    /// Rust source parsing failed.
    Parse { file: PathBuf, message: String },
    /// One or more boundary violations were found.
    Violations(Vec<Violation>),
}

impl fmt::Display for ArchitectureLintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error while linting architecture: {err}"),
            Self::Parse { file, message } => write!(
                f,
                "failed to parse {} while linting architecture: {message}",
                file.display()
            ),
            Self::Violations(violations) => {
                writeln!(f, "{} architecture boundary violation(s):", violations.len())?;
                for violation in violations {
                    writeln!(f, "- {violation}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ArchitectureLintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ArchitectureLintError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// A Rust source file to be linted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintSource {
    /// Path relative to `backend/src`.
    pub file: PathBuf,
    /// Full file contents.
    pub contents: String,
}

/// Lint the backend crate sources on disk.
///
/// `backend_dir` must be the `backend/` directory at the repository root.
pub fn lint_backend_sources(backend_dir: &Path) -> Result<(), ArchitectureLintError> {
    let src = Dir::open_ambient_dir(backend_dir.join("src"), ambient_authority())?;
    let mut sources = Vec::new();
    for layer in Layer::ALL {
        let root = Path::new(layer.dir_name());
        match src.open_dir(root) {
            Ok(dir) => collect_sources(&dir, root, &mut sources)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }
    }
    lint_sources(&sources)
}

/// Lint the provided Rust sources. Intended for unit and behaviour tests.
pub fn lint_sources(sources: &[LintSource]) -> Result<(), ArchitectureLintError> {
    let mut violations = Vec::new();

    for source in sources {
        let layer =
            Layer::from_relative_path(&source.file).ok_or_else(|| ArchitectureLintError::Parse {
                file: source.file.clone(),
                message: "file is not inside domain, inbound or outbound".to_owned(),
            })?;
        let parsed =
            syn::parse_file(&source.contents).map_err(|err| ArchitectureLintError::Parse {
                file: source.file.clone(),
                message: err.to_string(),
            })?;
        violations.extend(layer.check(&source.file, &parsed));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ArchitectureLintError::Violations(violations))
    }
}

/// The architectural layer a file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layer {
    Domain,
    Inbound,
    Outbound,
}

impl Layer {
    const ALL: [Self; 3] = [Self::Domain, Self::Inbound, Self::Outbound];

    const fn dir_name(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
        }
    }

    fn from_dir_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|layer| layer.dir_name() == name)
    }

    fn from_relative_path(path: &Path) -> Option<Self> {
        let first = path.components().next()?.as_os_str().to_str()?;
        Self::from_dir_name(first)
    }

    fn forbidden_layers(self) -> &'static [Self] {
        match self {
            Self::Domain => &[Self::Inbound, Self::Outbound],
            Self::Inbound => &[Self::Outbound],
            Self::Outbound => &[Self::Inbound],
        }
    }

    fn forbidden_crates(self) -> BTreeSet<&'static str> {
        let groups: &[&[&str]] = match self {
            Self::Domain => &[FRAMEWORK_CRATES, PERSISTENCE_CRATES, HTTP_CLIENT_CRATES],
            Self::Inbound => &[PERSISTENCE_CRATES, HTTP_CLIENT_CRATES],
            Self::Outbound => &[FRAMEWORK_CRATES],
        };
        groups.iter().flat_map(|group| group.iter().copied()).collect()
    }

    fn check(self, file: &Path, parsed: &syn::File) -> Vec<Violation> {
        let forbidden_crates = self.forbidden_crates();
        let mut collector = PathCollector::default();
        collector.visit_file(parsed);

        let mut messages = BTreeSet::new();
        for segments in &collector.paths {
            let crossed = internal_layer(segments)
                .filter(|target| self.forbidden_layers().contains(target));
            if let Some(target) = crossed {
                messages.insert(format!(
                    "{} module must not depend on crate::{}",
                    self.dir_name(),
                    target.dir_name()
                ));
            }
            let banned = external_crate(segments).and_then(|root| forbidden_crates.get(root));
            if let Some(name) = banned {
                messages.insert(format!(
                    "{} module must not depend on external crate `{name}`",
                    self.dir_name()
                ));
            }
        }

        messages
            .into_iter()
            .map(|message| Violation {
                file: file.to_path_buf(),
                message,
            })
            .collect()
    }
}

fn is_relative_segment(segment: &str) -> bool {
    matches!(segment, "crate" | "self" | "super")
}

/// Resolve the backend layer a path points into, if any.
fn internal_layer(segments: &[String]) -> Option<Layer> {
    let first = segments.first()?.as_str();
    if let Some(layer) = Layer::from_dir_name(first) {
        return Some(layer);
    }
    let module = if is_relative_segment(first) {
        segments
            .iter()
            .find(|segment| !is_relative_segment(segment.as_str()))?
    } else if first == BACKEND_CRATE {
        segments.get(1)?
    } else {
        return None;
    };
    Layer::from_dir_name(module)
}

fn external_crate(segments: &[String]) -> Option<&str> {
    let root = segments.first()?.as_str();
    if is_relative_segment(root) || root == BACKEND_CRATE {
        return None;
    }
    Some(root)
}

/// Collects every path mentioned in a file, including `use` trees.
#[derive(Default)]
struct PathCollector {
    paths: BTreeSet<Vec<String>>,
}

impl PathCollector {
    fn record_use_tree(&mut self, tree: &syn::UseTree, mut prefix: Vec<String>) {
        match tree {
            syn::UseTree::Path(path) => {
                prefix.push(path.ident.to_string());
                self.record_use_tree(&path.tree, prefix);
            }
            syn::UseTree::Name(name) => {
                prefix.push(name.ident.to_string());
                self.paths.insert(prefix);
            }
            syn::UseTree::Rename(rename) => {
                prefix.push(rename.ident.to_string());
                self.paths.insert(prefix);
            }
            syn::UseTree::Glob(_) => {
                prefix.push("*".to_owned());
                self.paths.insert(prefix);
            }
            syn::UseTree::Group(group) => {
                for item in &group.items {
                    self.record_use_tree(item, prefix.clone());
                }
            }
        }
    }
}

impl<'ast> Visit<'ast> for PathCollector {
    fn visit_path(&mut self, node: &'ast syn::Path) {
        let segments: Vec<String> = node
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect();
        if !segments.is_empty() {
            self.paths.insert(segments);
        }
        syn::visit::visit_path(self, node);
    }

    fn visit_item_use(&mut self, node: &'ast syn::ItemUse) {
        self.record_use_tree(&node.tree, Vec::new());
    }
}

/// Walk `dir` recursively, recording `.rs` files relative to `backend/src`.
fn collect_sources(
    dir: &Dir,
    relative: &Path,
    sources: &mut Vec<LintSource>,
) -> Result<(), ArchitectureLintError> {
    for entry in dir.entries()? {
        let entry = entry?;
        let name = entry.file_name();
        let path = relative.join(&name);
        if entry.file_type()?.is_dir() {
            let child = dir.open_dir(&name)?;
            collect_sources(&child, &path, sources)?;
            continue;
        }
        if path.extension().and_then(|ext| ext.to_str()) != Some("rs") {
            continue;
        }
        let contents = dir.read_to_string(&name)?;
        sources.push(LintSource {
            file: path,
            contents,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests;
