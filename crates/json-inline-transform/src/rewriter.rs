//! The rewrite pass: replaces JSON imports with inlined declarations.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use json_inline_core::config::OutputMode;
use json_inline_core::types::{
    BindingSource, ImportBinding, ImportClause, ReplacedImport, TransformError,
};
use serde_json::Value;
use tree_sitter::Node;

use crate::emit::{
    self, DeclarationKind, Declarator, ExportSpecifier, Statement, VariableStatement,
};
use crate::loader::{FsJsonSource, JsonSource};
use crate::lower::{lower, TypeLowering, ValueLowering};
use crate::resolver::{ImportResolver, ModuleResolve, NodeModuleResolver};
use crate::syntax::imports::{collect_import_sites, import_site, ImportSite};
use crate::syntax::SourceFile;
use crate::visit::{self, Visit, Visitor};

/// Local name used for the ambient declaration behind `export default` in
/// type mode.
const DEFAULT_EXPORT_LOCAL: &str = "_default";

/// Local names bound by import statements in one file, with the JSON document
/// and key each one reads when it is a JSON import.
type ImportLocals = HashMap<String, Option<(PathBuf, BindingSource)>>;

/// Output of one rewritten file.
#[derive(Debug, Clone)]
pub struct Rewritten {
    pub text: String,
    /// Replaced imports in document order.
    pub replaced: Vec<ReplacedImport>,
}

impl Rewritten {
    pub fn is_changed(&self) -> bool {
        !self.replaced.is_empty()
    }
}

/// Inlines JSON imports. Holds no per-file state; one instance can rewrite
/// any number of files.
pub struct Rewriter<M = NodeModuleResolver, S = FsJsonSource> {
    resolver: ImportResolver<M>,
    source: S,
    mode: OutputMode,
}

impl Rewriter {
    /// Node-style resolution and file system loading.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            resolver: ImportResolver::new(),
            source: FsJsonSource,
            mode,
        }
    }
}

impl<M: ModuleResolve, S: JsonSource> Rewriter<M, S> {
    pub fn with_parts(resolver: ImportResolver<M>, source: S, mode: OutputMode) -> Self {
        Self {
            resolver,
            source,
            mode,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn resolver(&self) -> &ImportResolver<M> {
        &self.resolver
    }

    /// Parse `text` as the contents of `path` and rewrite it.
    pub fn rewrite_source(&self, path: &Path, text: &str) -> Result<Rewritten, TransformError> {
        let file = SourceFile::parse(path, text).map_err(|e| TransformError::SourceParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        self.rewrite(&file)
    }

    /// Rewrite one file. Any load or parse failure of an imported document
    /// aborts the whole file; no partial output is returned.
    pub fn rewrite(&self, file: &SourceFile) -> Result<Rewritten, TransformError> {
        if file.has_syntax_errors() {
            tracing::warn!(path = %file.path().display(), "source has syntax errors, rewriting recovered tree");
        }
        let mut visitor = JsonImportVisitor {
            rewriter: self,
            file_path: file.path(),
            import_locals: self.import_locals(file),
            replaced: Vec::new(),
        };
        let edits = visit::walk(file.root(), file.text().as_bytes(), &mut visitor)?;
        let text = visit::apply_edits(file.text(), &edits);
        tracing::debug!(
            path = %file.path().display(),
            replaced = visitor.replaced.len(),
            mode = %self.mode,
            "rewrote file"
        );
        Ok(Rewritten {
            text,
            replaced: visitor.replaced,
        })
    }

    /// Every name an import statement binds in `file`. Re-exports bind none.
    fn import_locals(&self, file: &SourceFile) -> ImportLocals {
        let mut locals = ImportLocals::new();
        for site in collect_import_sites(file.root(), file.text().as_bytes()) {
            if site.reexport {
                continue;
            }
            let ImportClause::Bindings(bindings) = &site.clause else {
                continue;
            };
            let resolved = self.resolver.resolve(&site.specifier, file.path());
            for binding in bindings {
                let origin = resolved
                    .as_ref()
                    .map(|path| (path.clone(), binding.source.clone()));
                locals.insert(binding.local.clone(), origin);
            }
        }
        locals
    }

    /// Statements replacing one import site.
    ///
    /// A re-exported name that an import in the same file already binds is not
    /// declared again: it is exported from that binding when both read the same
    /// key of the same document, otherwise from a fresh local.
    fn statements_for(
        &self,
        site: &ImportSite,
        bindings: &[ImportBinding],
        document: &Value,
        resolved: &Path,
        import_locals: &ImportLocals,
    ) -> Vec<Statement> {
        let kind = match (self.mode, site.ambient) {
            (OutputMode::Value, _) => DeclarationKind::Const,
            (OutputMode::Type, false) => DeclarationKind::DeclareVar,
            (OutputMode::Type, true) => DeclarationKind::Var,
        };
        let mut declarators = Vec::new();
        let mut hidden = Vec::new();
        let mut export_names = Vec::new();
        let mut default_export = None;
        for binding in bindings {
            let value = binding_value(document, &binding.source);
            if site.exported && binding.local == "default" {
                default_export = Some(value);
                continue;
            }
            if site.reexport {
                if let Some(origin) = import_locals.get(&binding.local) {
                    let same_value = origin
                        .as_ref()
                        .is_some_and(|(path, source)| path == resolved && *source == binding.source);
                    let local = if same_value {
                        binding.local.clone()
                    } else {
                        let name = unused_local(&binding.local, import_locals);
                        hidden.push(self.declarator(&name, value));
                        name
                    };
                    export_names.push(ExportSpecifier {
                        local,
                        exported: binding.local.clone(),
                    });
                    continue;
                }
            }
            declarators.push(self.declarator(&binding.local, value));
        }

        let mut statements = Vec::new();
        if !declarators.is_empty() {
            statements.push(Statement::Variable(VariableStatement {
                exported: site.exported,
                kind,
                declarators,
            }));
        }
        if !hidden.is_empty() {
            statements.push(Statement::Variable(VariableStatement {
                exported: false,
                kind,
                declarators: hidden,
            }));
        }
        if !export_names.is_empty() {
            statements.push(Statement::ExportNames(export_names));
        }
        if let Some(value) = default_export {
            match self.mode {
                OutputMode::Value => {
                    statements.push(Statement::ExportDefault(lower(&ValueLowering, value)));
                }
                OutputMode::Type => {
                    let name = if import_locals.contains_key(DEFAULT_EXPORT_LOCAL) {
                        unused_local(DEFAULT_EXPORT_LOCAL, import_locals)
                    } else {
                        DEFAULT_EXPORT_LOCAL.to_string()
                    };
                    statements.push(Statement::Variable(VariableStatement {
                        exported: false,
                        kind,
                        declarators: vec![self.declarator(&name, value)],
                    }));
                    statements.push(Statement::ExportDefaultName(name));
                }
            }
        }
        statements
    }

    fn declarator(&self, name: &str, value: Option<&Value>) -> Declarator {
        match self.mode {
            OutputMode::Value => Declarator {
                name: name.to_string(),
                type_annotation: None,
                init: Some(lower(&ValueLowering, value)),
            },
            OutputMode::Type => Declarator {
                name: name.to_string(),
                type_annotation: Some(lower(&TypeLowering, value)),
                init: None,
            },
        }
    }
}

struct JsonImportVisitor<'a, M, S> {
    rewriter: &'a Rewriter<M, S>,
    file_path: &'a Path,
    import_locals: ImportLocals,
    replaced: Vec<ReplacedImport>,
}

impl<M: ModuleResolve, S: JsonSource> Visitor for JsonImportVisitor<'_, M, S> {
    type Error = TransformError;

    fn visit(&mut self, node: Node<'_>, source: &[u8]) -> Result<Visit, TransformError> {
        let Some(site) = import_site(node, source) else {
            return Ok(Visit::Recurse);
        };
        let Some(resolved) = self.rewriter.resolver.resolve(&site.specifier, self.file_path) else {
            tracing::trace!(specifier = %site.specifier, line = site.line, "not a JSON import");
            return Ok(Visit::Recurse);
        };

        let document = self.rewriter.source.load(&resolved)?;
        let bindings = match &site.clause {
            ImportClause::Bare => Vec::new(),
            ImportClause::Bindings(bindings) => bindings.clone(),
            ImportClause::AllKeys => all_key_bindings(&document),
        };

        if let Some(bad) = bindings
            .iter()
            .find(|b| !(emit::is_identifier(&b.local) || (site.exported && b.local == "default")))
        {
            tracing::warn!(
                path = %self.file_path.display(),
                line = site.line,
                name = %bad.local,
                "cannot declare this name, leaving import untouched"
            );
            return Ok(Visit::Recurse);
        }

        for binding in &bindings {
            if let BindingSource::Key(key) = &binding.source {
                if binding_value(&document, &binding.source).is_none() {
                    tracing::warn!(
                        path = %self.file_path.display(),
                        line = site.line,
                        key = %key,
                        json = %resolved.display(),
                        "imported key is absent from the JSON document"
                    );
                }
            }
        }

        let statements = self.rewriter.statements_for(
            &site,
            &bindings,
            &document,
            &resolved,
            &self.import_locals,
        );
        tracing::debug!(
            specifier = %site.specifier,
            json = %resolved.display(),
            line = site.line,
            bindings = bindings.len(),
            "inlined JSON import"
        );
        self.replaced.push(ReplacedImport {
            specifier: site.specifier.clone(),
            resolved_path: resolved,
            line: site.line,
            declared: bindings.iter().map(|b| b.local.clone()).collect(),
            exported: site.exported,
        });
        Ok(Visit::Replace(statements))
    }
}

/// `name$json`, `name$json2`, .. : the first one no import in the file binds.
fn unused_local(name: &str, import_locals: &ImportLocals) -> String {
    let mut candidate = format!("{name}$json");
    let mut n = 1;
    while import_locals.contains_key(&candidate) {
        n += 1;
        candidate = format!("{name}$json{n}");
    }
    candidate
}

fn binding_value<'v>(document: &'v Value, source: &BindingSource) -> Option<&'v Value> {
    match source {
        BindingSource::Whole => Some(document),
        BindingSource::Key(key) => document.get(key.as_str()),
    }
}

/// Bindings for `export * from "x.json"`: every top-level key usable as a name.
fn all_key_bindings(document: &Value) -> Vec<ImportBinding> {
    let Some(map) = document.as_object() else {
        return Vec::new();
    };
    map.keys()
        .filter(|key| emit::is_identifier(key))
        .map(|key| ImportBinding::named(key.clone(), None))
        .collect()
}
