//! `Package`/`Application` orchestration: parses, lowers,
//! and links one or more packages into one shared arena, then runs semantic
//! analysis over every function once every package's declarations are
//! visible. Grounded on `mesh-common::module_graph::ModuleGraph`'s
//! name-indexed registry and on `mesh-pkg::resolver`'s DFS `visiting` set for
//! cycle detection, adapted to `load_package`'s 3-step algorithm:
//! already-finished packages short-circuit, packages still mid-load fail
//! with `CircularImport`, and a package seen for the first time is parsed,
//! lowered, and has its imports resolved before being marked finished.

use rustc_hash::{FxHashMap, FxHashSet};

use glyph_common::{DiagnosticSink, FileId, FileTable, SourcePosition, StringPool, Symbol};
use glyph_syntax::ast;
use glyph_types::{DefArena, TypeDefId};

use crate::analyser::SemanticAnalyser;
use crate::error::{CompileError, PackageErrorKind};
use crate::function::FunctionArena;
use crate::lower::Lowerer;

/// Resolves a package name to its main source file's path and contents.
/// Kept as a trait rather than hard-coded filesystem access so tests (and
/// the embedded standard package) can supply sources without touching disk.
pub trait PackageSource {
    fn locate(&self, name: &str) -> Result<(String, String), PackageErrorKind>;
}

/// Reads a package's main file at `<base_dir>/<name>/header.glyph`, per spec
/// §6.2's package-directory convention.
pub struct FilesystemPackageSource {
    pub base_dir: std::path::PathBuf,
}

impl PackageSource for FilesystemPackageSource {
    fn locate(&self, name: &str) -> Result<(String, String), PackageErrorKind> {
        let path = self.base_dir.join(name).join("header.glyph");
        let contents = std::fs::read_to_string(&path)
            .map_err(|_| PackageErrorKind::PackageNotFound { package: name.to_string() })?;
        Ok((path.display().to_string(), contents))
    }
}

/// An in-memory name -> (path, source) map, used by tests and to embed the
/// standard package.
#[derive(Default)]
pub struct InMemoryPackageSource {
    sources: FxHashMap<String, (String, String)>,
}

impl InMemoryPackageSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, path: impl Into<String>, source: impl Into<String>) {
        self.sources.insert(name.into(), (path.into(), source.into()));
    }
}

impl PackageSource for InMemoryPackageSource {
    fn locate(&self, name: &str) -> Result<(String, String), PackageErrorKind> {
        self.sources
            .get(name)
            .cloned()
            .ok_or_else(|| PackageErrorKind::PackageNotFound { package: name.to_string() })
    }
}

/// One loaded package: its own declared types under the default namespace,
/// plus every namespace an `import <pkg> <ns>` promoted foreign types into
///.
pub struct Package {
    pub name: String,
    pub file: FileId,
    pub own_types: FxHashMap<Symbol, TypeDefId>,
    pub namespaces: FxHashMap<Symbol, FxHashMap<Symbol, TypeDefId>>,
}

impl Package {
    /// Looks up `name` as this package would see it: its own declarations
    /// when `namespace` is `None`, an imported namespace's contents
    /// otherwise.
    pub fn resolve(&self, namespace: Option<Symbol>, name: Symbol) -> Option<TypeDefId> {
        match namespace {
            None => self.own_types.get(&name).copied(),
            Some(ns) => self.namespaces.get(&ns).and_then(|members| members.get(&name)).copied(),
        }
    }
}

/// Owns the shared arenas every loaded package's definitions and functions
/// live in, the global package registry, and the accumulated diagnostic
/// sink.
pub struct Application {
    pub defs: DefArena,
    pub functions: FunctionArena,
    pub pool: StringPool,
    pub files: FileTable,
    pub sink: DiagnosticSink,
    packages: FxHashMap<String, Package>,
    load_order: Vec<String>,
    loading: FxHashSet<String>,
}

impl Application {
    pub fn new() -> Self {
        Application {
            defs: DefArena::new(),
            functions: FunctionArena::new(),
            pool: StringPool::new(),
            files: FileTable::new(),
            sink: DiagnosticSink::new(),
            packages: FxHashMap::default(),
            load_order: Vec::new(),
            loading: FxHashSet::default(),
        }
    }

    pub fn package(&self, name: &str) -> Option<&Package> {
        self.packages.get(name)
    }

    pub fn load_order(&self) -> &[String] {
        &self.load_order
    }

    fn synthetic_position(&self) -> SourcePosition {
        SourcePosition::new(0, 0, self.files.intern("<package loader>"))
    }

    /// `load_package(name, requestor)`: returns immediately if
    /// `name` already finished loading, fails with `CircularImport` if it is
    /// still mid-load on the current call stack, otherwise parses, lowers,
    /// and resolves its imports before marking it finished.
    pub fn load_package(&mut self, name: &str, source: &dyn PackageSource) -> Result<(), CompileError> {
        if self.packages.contains_key(name) {
            return Ok(());
        }
        if self.loading.contains(name) {
            return Err(CompileError::Package(PackageErrorKind::CircularImport { package: name.to_string() }, self.synthetic_position()));
        }
        self.loading.insert(name.to_string());

        let (path, contents) = source.locate(name).map_err(|kind| CompileError::Package(kind, self.synthetic_position()))?;

        let span = tracing::info_span!("load_package", package = name);
        let _enter = span.enter();

        let file = self.files.intern(&path);
        let parsed = glyph_syntax::parse(&contents, file);
        for e in &parsed.errors {
            self.sink.push(CompileError::Parse(e.clone()).into_diagnostic());
        }
        let doc = parsed.document();

        let mut lowerer = Lowerer::new(&contents, file, &mut self.defs, &mut self.functions, &self.pool);
        lowerer.register_names(&doc);
        lowerer.lower_document(&doc);
        let own_types = lowerer.type_names.clone();

        let namespaces = self.resolve_imports(&doc, source)?;

        self.packages.insert(name.to_string(), Package { name: name.to_string(), file, own_types, namespaces });
        self.load_order.push(name.to_string());
        self.loading.remove(name);
        Ok(())
    }

    /// `import <pkg> <ns>` makes every exported type of `<pkg>` visible
    /// under `<ns>`; a name already present under that namespace is a fatal
    /// `NamespaceCollision`. Recurses into `load_package` for
    /// the imported package first, so an import cycle is caught while the
    /// importer is still on `self.loading`.
    fn resolve_imports(&mut self, doc: &ast::Document, source: &dyn PackageSource) -> Result<FxHashMap<Symbol, FxHashMap<Symbol, TypeDefId>>, CompileError> {
        let mut namespaces: FxHashMap<Symbol, FxHashMap<Symbol, TypeDefId>> = FxHashMap::default();
        for imp in doc.imports() {
            let (Some(pkg_tok), Some(ns_tok)) = (imp.package_name(), imp.symbol_name()) else { continue };
            let imported_name = pkg_tok.text().to_string();
            self.load_package(&imported_name, source)?;

            let ns = self.pool.intern(ns_tok.text());
            let imported_types: Vec<(Symbol, TypeDefId)> =
                self.packages.get(&imported_name).map(|p| p.own_types.iter().map(|(&n, &id)| (n, id)).collect()).unwrap_or_default();

            let entry = namespaces.entry(ns).or_default();
            for (type_name, id) in imported_types {
                if entry.insert(type_name, id).is_some() {
                    let pos = self.synthetic_position();
                    self.sink
                        .push(CompileError::Package(PackageErrorKind::NamespaceCollision { name: self.pool.resolve(type_name) }, pos).into_diagnostic());
                }
            }
        }
        Ok(namespaces)
    }

    /// Loads `main_package` (and, transitively, everything it imports) from
    /// `source`, then runs semantic analysis over the fully assembled arena
    ///. Errors already in the sink block progression to analysis
    ///.
    pub fn compile(&mut self, main_package: &str, source: &dyn PackageSource) -> Result<(), CompileError> {
        let span = tracing::info_span!("compile");
        let _enter = span.enter();

        self.load_package(main_package, source)?;
        if self.sink.has_errors() {
            return Ok(());
        }

        let main_file = self.packages.get(main_package).map(|p| p.file).unwrap_or_else(|| self.files.intern(main_package));
        let mut analyser = SemanticAnalyser::new(&mut self.defs, &mut self.functions, &self.pool, &mut self.sink, main_file);
        analyser.analyse();
        Ok(())
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_the_same_package_twice_is_a_no_op() {
        let mut app = Application::new();
        let mut source = InMemoryPackageSource::new();
        source.insert("a", "a/header.glyph", "🐇Animal🍇🍉");

        app.load_package("a", &source).unwrap();
        let defs_after_first = app.defs.len();
        app.load_package("a", &source).unwrap();
        assert_eq!(app.defs.len(), defs_after_first);
    }

    #[test]
    fn circular_import_is_reported() {
        let mut app = Application::new();
        let mut source = InMemoryPackageSource::new();
        source.insert("a", "a/header.glyph", "📦b🧩");
        source.insert("b", "b/header.glyph", "📦a🧩");

        let err = app.load_package("a", &source).unwrap_err();
        assert!(matches!(err, CompileError::Package(PackageErrorKind::CircularImport { .. }, _)));
    }

    #[test]
    fn missing_package_is_reported() {
        let mut app = Application::new();
        let source = InMemoryPackageSource::new();
        let err = app.load_package("missing", &source).unwrap_err();
        assert!(matches!(err, CompileError::Package(PackageErrorKind::PackageNotFound { .. }, _)));
    }

    #[test]
    fn imported_types_become_visible_under_the_requested_namespace() {
        let mut app = Application::new();
        let mut source = InMemoryPackageSource::new();
        source.insert("lib", "lib/header.glyph", "🐇Animal🍇🍉");
        source.insert("main", "main/header.glyph", "📦lib🧩");

        app.compile("main", &source).unwrap();
        assert!(!app.sink.has_errors());

        let ns = app.pool.intern("🧩");
        let name = app.pool.intern("Animal");
        let main_pkg = app.package("main").unwrap();
        assert!(main_pkg.resolve(Some(ns), name).is_some());
    }

    #[test]
    fn colliding_imports_into_the_same_namespace_are_reported() {
        let mut app = Application::new();
        let mut source = InMemoryPackageSource::new();
        source.insert("a", "a/header.glyph", "🐇Animal🍇🍉");
        source.insert("b", "b/header.glyph", "🐇Animal🍇🍉");
        source.insert("main", "main/header.glyph", "📦a🧩📦b🧩");

        app.compile("main", &source).unwrap();
        assert!(app.sink.has_errors());
    }
}
