//! Import/export structure of a single module.
//!
//! Only the shapes that docsite entry modules and demo modules use are
//! recognized; anything else still yields the exported name, just without a
//! contributing dependency.

use std::path::Path;

use oxc_allocator::Allocator;
use oxc_ast::ast::{
    BindingPatternKind, Declaration, ExportDefaultDeclarationKind, Expression,
    ImportDeclarationSpecifier, ModuleDeclaration, ModuleExportName, ObjectPropertyKind,
    PropertyKey,
};
use oxc_parser::Parser;
use oxc_span::SourceType;
use rustc_hash::FxHashMap;
use tracing::debug;

/// Where one exported binding gets its value from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSource {
    /// Import request as written in the source (`./demo/index.tsx`).
    pub request: String,
    /// Object-literal property key, `None` for bare identifiers and spreads.
    pub key: Option<String>,
}

/// An export declared in the module body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalExport {
    pub name: String,
    pub sources: Vec<ExportSource>,
}

/// Import/export summary of one module, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleStructure {
    /// Every static request (imports, re-exports, `export *`) in source order.
    pub requests: Vec<String>,
    /// Declared exports in source order.
    pub exports: Vec<LocalExport>,
    /// Requests of `export * from '...'` declarations.
    pub star_sources: Vec<String>,
}

impl ModuleStructure {
    pub fn declares(&self, name: &str) -> bool {
        self.exports.iter().any(|export| export.name == name)
    }

    pub fn export_names(&self) -> impl Iterator<Item = &str> {
        self.exports.iter().map(|export| export.name.as_str())
    }
}

/// Source type for files that should be parsed as JavaScript/TypeScript.
///
/// Returns `None` for markdown, styles, JSON and other assets.
pub fn script_source_type(path: &Path) -> Option<SourceType> {
    let extension = path.extension()?.to_str()?;
    match extension {
        "js" | "mjs" | "cjs" | "jsx" | "ts" | "mts" | "cts" | "tsx" => SourceType::from_path(path).ok(),
        _ => None,
    }
}

/// Parse `code` and collect its import/export structure.
///
/// Syntax errors are tolerated: whatever the parser recovered is used.
pub fn parse_module_structure(path: &Path, code: &str) -> ModuleStructure {
    let source_type = script_source_type(path).unwrap_or_else(SourceType::tsx);
    let allocator = Allocator::default();
    let parsed = Parser::new(&allocator, code, source_type).parse();
    if !parsed.errors.is_empty() {
        debug!(
            path = %path.display(),
            errors = parsed.errors.len(),
            "module has syntax errors, using recovered structure"
        );
    }

    let mut structure = ModuleStructure::default();
    // local binding -> import request
    let mut bindings: FxHashMap<String, String> = FxHashMap::default();

    let push_request = |requests: &mut Vec<String>, request: &str| {
        if !requests.iter().any(|existing| existing == request) {
            requests.push(request.to_string());
        }
    };

    // Imports are hoisted, so bindings are collected before exports are attributed.
    for stmt in parsed.program.body.iter() {
        if let Some(ModuleDeclaration::ImportDeclaration(import)) = stmt.as_module_declaration() {
            let request = import.source.value.to_string();
            push_request(&mut structure.requests, &request);
            if let Some(specifiers) = &import.specifiers {
                for spec in specifiers {
                    let local = match spec {
                        ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => &s.local.name,
                        ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => &s.local.name,
                        ImportDeclarationSpecifier::ImportSpecifier(s) => &s.local.name,
                    };
                    bindings.insert(local.to_string(), request.clone());
                }
            }
        }
    }

    let attribute = |name: &str| -> Vec<ExportSource> {
        bindings
            .get(name)
            .map(|request| {
                vec![ExportSource {
                    request: request.clone(),
                    key: None,
                }]
            })
            .unwrap_or_default()
    };

    for stmt in parsed.program.body.iter() {
        let Some(module_decl) = stmt.as_module_declaration() else {
            continue;
        };
        match module_decl {
            ModuleDeclaration::ImportDeclaration(_) => {}
            ModuleDeclaration::ExportNamedDeclaration(named) => {
                if let Some(src) = &named.source {
                    // export { a as B } from './x'
                    let request = src.value.to_string();
                    push_request(&mut structure.requests, &request);
                    for spec in &named.specifiers {
                        structure.exports.push(LocalExport {
                            name: export_name(&spec.exported),
                            sources: vec![ExportSource {
                                request: request.clone(),
                                key: None,
                            }],
                        });
                    }
                } else if let Some(decl) = &named.declaration {
                    collect_declaration(decl, &bindings, &mut structure.exports);
                } else {
                    // export { a as B }
                    for spec in &named.specifiers {
                        structure.exports.push(LocalExport {
                            name: export_name(&spec.exported),
                            sources: attribute(&export_name(&spec.local)),
                        });
                    }
                }
            }
            ModuleDeclaration::ExportDefaultDeclaration(default) => {
                let sources = match &default.declaration {
                    ExportDefaultDeclarationKind::Identifier(ident) => attribute(&ident.name),
                    ExportDefaultDeclarationKind::ObjectExpression(object) => {
                        object_sources(&object.properties, &bindings)
                    }
                    _ => Vec::new(),
                };
                structure.exports.push(LocalExport {
                    name: "default".to_string(),
                    sources,
                });
            }
            ModuleDeclaration::ExportAllDeclaration(all) => {
                let request = all.source.value.to_string();
                push_request(&mut structure.requests, &request);
                match &all.exported {
                    // export * as ns from './x'
                    Some(exported) => structure.exports.push(LocalExport {
                        name: export_name(exported),
                        sources: vec![ExportSource { request, key: None }],
                    }),
                    None => structure.star_sources.push(request),
                }
            }
            _ => {}
        }
    }

    structure
}

fn collect_declaration(
    decl: &Declaration<'_>,
    bindings: &FxHashMap<String, String>,
    exports: &mut Vec<LocalExport>,
) {
    match decl {
        Declaration::VariableDeclaration(var) => {
            for declarator in &var.declarations {
                let BindingPatternKind::BindingIdentifier(ident) = &declarator.id.kind else {
                    continue;
                };
                let sources = declarator
                    .init
                    .as_ref()
                    .map(|init| expression_sources(init, bindings))
                    .unwrap_or_default();
                exports.push(LocalExport {
                    name: ident.name.to_string(),
                    sources,
                });
            }
        }
        Declaration::FunctionDeclaration(func) => {
            if let Some(id) = &func.id {
                exports.push(LocalExport {
                    name: id.name.to_string(),
                    sources: Vec::new(),
                });
            }
        }
        Declaration::ClassDeclaration(class) => {
            if let Some(id) = &class.id {
                exports.push(LocalExport {
                    name: id.name.to_string(),
                    sources: Vec::new(),
                });
            }
        }
        _ => {}
    }
}

fn expression_sources(
    expr: &Expression<'_>,
    bindings: &FxHashMap<String, String>,
) -> Vec<ExportSource> {
    match expr {
        Expression::Identifier(ident) => bindings
            .get(ident.name.as_str())
            .map(|request| {
                vec![ExportSource {
                    request: request.clone(),
                    key: None,
                }]
            })
            .unwrap_or_default(),
        Expression::ObjectExpression(object) => object_sources(&object.properties, bindings),
        Expression::ParenthesizedExpression(paren) => expression_sources(&paren.expression, bindings),
        _ => Vec::new(),
    }
}

/// `{ doc: a, component: b, ...c }` -> (a, "doc"), (b, "component"), (c, none)
fn object_sources(
    properties: &[ObjectPropertyKind<'_>],
    bindings: &FxHashMap<String, String>,
) -> Vec<ExportSource> {
    let mut sources = Vec::new();
    for property in properties {
        match property {
            ObjectPropertyKind::ObjectProperty(prop) => {
                let Expression::Identifier(value) = &prop.value else {
                    continue;
                };
                let (Some(key), Some(request)) =
                    (property_key_name(&prop.key), bindings.get(value.name.as_str()))
                else {
                    continue;
                };
                sources.push(ExportSource {
                    request: request.clone(),
                    key: Some(key),
                });
            }
            ObjectPropertyKind::SpreadProperty(spread) => {
                if let Expression::Identifier(ident) = &spread.argument {
                    if let Some(request) = bindings.get(ident.name.as_str()) {
                        sources.push(ExportSource {
                            request: request.clone(),
                            key: None,
                        });
                    }
                }
            }
        }
    }
    sources
}

fn property_key_name(key: &PropertyKey<'_>) -> Option<String> {
    match key {
        PropertyKey::StaticIdentifier(ident) => Some(ident.name.to_string()),
        PropertyKey::StringLiteral(lit) => Some(lit.value.to_string()),
        _ => None,
    }
}

fn export_name(name: &ModuleExportName<'_>) -> String {
    match name {
        ModuleExportName::IdentifierName(ident) => ident.name.to_string(),
        ModuleExportName::IdentifierReference(ident) => ident.name.to_string(),
        ModuleExportName::StringLiteral(lit) => lit.value.to_string(),
    }
}
