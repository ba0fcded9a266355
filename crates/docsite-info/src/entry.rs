//! Generated entry modules as data.
//!
//! Entries are built from import and export records and turned into
//! JavaScript only by [`EntryModule::render`]. Import specifiers are emitted
//! as JSON string literals.

use std::fmt::Write as _;

use indexmap::IndexMap;
use serde_json::Value;

use crate::codec::DECODER_SOURCE;
use crate::patch::PLACEHOLDER;

/// Object every export of the main entry is mirrored onto.
pub const LIBRARY_NAME: &str = "arcoSite";
/// Export carrying the decoded module info at runtime.
pub const MODULE_INFO_EXPORT: &str = "arcoSiteModuleInfo";

const HEADER: &str = "/* Generated by docsite. Do not edit. */\n/* eslint-disable */\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    /// `import * as local from "..."`
    Namespace,
    /// `import local from "..."`
    Default,
    /// `import "..."`
    SideEffect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBinding {
    pub kind: ImportKind,
    /// Empty for side-effect imports.
    pub local: String,
    pub from: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectMember {
    /// `key: value`
    Property { key: String, value: String },
    /// `...value`
    Spread(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntryExpr {
    Ident(String),
    Object(Vec<ObjectMember>),
    /// A JSON literal.
    Json(Value),
    /// `decodeInfo(moduleInfoStr)`
    DecodeInfo,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportBinding {
    pub name: String,
    pub expr: EntryExpr,
}

/// One generated entry file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryModule {
    pub imports: Vec<ImportBinding>,
    pub exports: Vec<ExportBinding>,
    library: Option<String>,
    module_info: bool,
}

/// Imports of one component directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentImports {
    pub name: String,
    pub demo: Option<String>,
    pub doc: Option<String>,
    pub style: Option<String>,
}

/// Submodule entries referenced by the main entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmoduleImports {
    pub key: String,
    pub doc: Option<String>,
    pub component: Option<String>,
}

impl EntryModule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn import_namespace(mut self, local: impl Into<String>, from: impl Into<String>) -> Self {
        self.imports.push(ImportBinding {
            kind: ImportKind::Namespace,
            local: local.into(),
            from: from.into(),
        });
        self
    }

    pub fn import_default(mut self, local: impl Into<String>, from: impl Into<String>) -> Self {
        self.imports.push(ImportBinding {
            kind: ImportKind::Default,
            local: local.into(),
            from: from.into(),
        });
        self
    }

    pub fn import_side_effect(mut self, from: impl Into<String>) -> Self {
        self.imports.push(ImportBinding {
            kind: ImportKind::SideEffect,
            local: String::new(),
            from: from.into(),
        });
        self
    }

    pub fn export(mut self, name: impl Into<String>, expr: EntryExpr) -> Self {
        self.exports.push(ExportBinding {
            name: name.into(),
            expr,
        });
        self
    }

    /// Mirror every export onto a `const <name> = {}` object.
    pub fn with_library(mut self, name: impl Into<String>) -> Self {
        self.library = Some(name.into());
        self
    }

    /// Embed the decoder and the placeholder, and export the decoded info as
    /// [`MODULE_INFO_EXPORT`].
    pub fn with_module_info(mut self) -> Self {
        self.module_info = true;
        self.export(MODULE_INFO_EXPORT, EntryExpr::DecodeInfo)
    }

    /// Entry of standalone documents: `Doc<i>` for the i-th specifier.
    pub fn doc_submodule<S: AsRef<str>>(docs: &[S]) -> Self {
        docs.iter()
            .enumerate()
            .fold(Self::new(), |entry, (index, doc)| {
                let name = format!("Doc{index}");
                let local = format!("_{name}");
                entry
                    .import_namespace(&local, doc.as_ref())
                    .export(name, EntryExpr::Ident(local))
            })
    }

    /// Entry of components: demos spread into the export, the component doc
    /// under `_SITE_DOC`. Components with neither are left out.
    pub fn component_submodule(components: &[ComponentImports]) -> Self {
        let mut entry = Self::new();
        for component in components {
            let mut members = Vec::new();
            if let Some(demo) = &component.demo {
                let local = format!("_{}", component.name);
                entry = entry.import_namespace(&local, demo);
                members.push(ObjectMember::Spread(local));
            }
            if let Some(doc) = &component.doc {
                let local = format!("_{}Doc", component.name);
                entry = entry.import_default(&local, doc);
                members.push(ObjectMember::Property {
                    key: "_SITE_DOC".to_string(),
                    value: local,
                });
            }
            if let Some(style) = &component.style {
                entry = entry.import_side_effect(style);
            }
            if !members.is_empty() {
                entry = entry.export(&component.name, EntryExpr::Object(members));
            }
        }
        entry
    }

    /// Main entry of one language chunk.
    pub fn main(submodules: &[SubmoduleImports]) -> Self {
        let mut entry = Self::new().with_library(LIBRARY_NAME);
        for submodule in submodules {
            let mut members = Vec::new();
            for (role, from) in [("doc", &submodule.doc), ("component", &submodule.component)] {
                if let Some(from) = from {
                    let local = format!("{}_{role}", submodule.key);
                    entry = entry.import_namespace(&local, from);
                    members.push(ObjectMember::Property {
                        key: role.to_string(),
                        value: local,
                    });
                }
            }
            entry = entry.export(&submodule.key, EntryExpr::Object(members));
        }
        entry.with_module_info()
    }

    pub fn render(&self) -> String {
        let mut out = String::from(HEADER);
        if !self.imports.is_empty() {
            out.push('\n');
        }
        for import in &self.imports {
            let from = quote(&import.from);
            let _ = match import.kind {
                ImportKind::Namespace => writeln!(out, "import * as {} from {from};", import.local),
                ImportKind::Default => writeln!(out, "import {} from {from};", import.local),
                ImportKind::SideEffect => writeln!(out, "import {from};"),
            };
        }

        if self.module_info {
            let _ = write!(
                out,
                "\n{DECODER_SOURCE}\n\nconst moduleInfoStr = '{PLACEHOLDER}';\n"
            );
        }
        if let Some(library) = &self.library {
            let _ = writeln!(out, "const {library} = {{}};");
        }

        for export in &self.exports {
            let _ = writeln!(out, "\nexport const {} = {};", export.name, render_expr(&export.expr));
            if let Some(library) = &self.library {
                let _ = writeln!(out, "{library}.{0} = {0};", export.name);
            }
        }
        out
    }
}

fn render_expr(expr: &EntryExpr) -> String {
    match expr {
        EntryExpr::Ident(name) => name.clone(),
        EntryExpr::Object(members) if members.is_empty() => "{}".to_string(),
        EntryExpr::Object(members) => {
            let members: Vec<String> = members
                .iter()
                .map(|member| match member {
                    ObjectMember::Property { key, value } => format!("{key}: {value}"),
                    ObjectMember::Spread(value) => format!("...{value}"),
                })
                .collect();
            format!("{{ {} }}", members.join(", "))
        }
        EntryExpr::Json(value) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
        }
        EntryExpr::DecodeInfo => "decodeInfo(moduleInfoStr)".to_string(),
    }
}

fn quote(text: &str) -> String {
    Value::from(text).to_string()
}

/// Export-safe component name of a directory: `date-picker` -> `DatePicker`.
pub fn component_name(dir_name: &str) -> String {
    dir_name
        .split('-')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<String>()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Preview module linking component bundles into the site runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewLink {
    pub runtime: String,
    pub prefix: String,
    pub main_module: Option<String>,
    pub split_bundle: bool,
    /// Component id → module specifiers of its files.
    pub components: IndexMap<String, Vec<String>>,
}

impl PreviewLink {
    pub fn new(runtime: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            runtime: runtime.into(),
            prefix: prefix.into(),
            ..Default::default()
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::from(HEADER);
        let _ = writeln!(out, "\nimport {{ linkModules }} from {};", quote(&self.runtime));
        match &self.main_module {
            Some(main) => {
                let _ = writeln!(out, "import * as mainModule from {};", quote(main));
            }
            None => out.push_str("const mainModule = {};\n"),
        }

        let mut component_map = Vec::with_capacity(self.components.len());
        for (component_index, (id, files)) in self.components.iter().enumerate() {
            let mut locals = Vec::with_capacity(files.len());
            for (file_index, file) in files.iter().enumerate() {
                let local = format!("file_{component_index}_{file_index}");
                let _ = writeln!(out, "import * as {local} from {};", quote(file));
                locals.push(local);
            }
            component_map.push(format!("    {}: [{}],", quote(id), locals.join(", ")));
        }

        let _ = write!(
            out,
            "\nlinkModules({}, {{\n  mainModule,\n  isSplitComponentBundle: {},\n  componentMap: {{\n",
            quote(&self.prefix),
            self.split_bundle
        );
        for line in component_map {
            out.push_str(&line);
            out.push('\n');
        }
        out.push_str("  },\n});\n");
        out
    }
}
