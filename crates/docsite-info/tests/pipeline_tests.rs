use std::fs;
use std::path::{Path, PathBuf};

use docsite_graph::{CrawlOptions, ModuleCrawler};
use docsite_info::entry::{ComponentImports, SubmoduleImports};
use docsite_info::{
    AssetMap, BuildContext, BuildGlobs, ChunkInfo, EntryModule, ModuleInfoPlugin, PLACEHOLDER,
    SitePaths, count_placeholders, decode_entries,
};
use indexmap::IndexMap;
use serde_json::json;
use tempfile::TempDir;

const DEMO_INDEX: &str = r#"/**
 * @title.zh-CN 按钮
 * @title.en-US Button
 * @memberof General
 */

/**
 * @title.zh-CN 基础用法
 * @title.en-US Basic
 */
export { default as Basic } from './basic';

/**
 * @title.zh-CN 尺寸
 * @title.en-US Size
 */
export const Size = () => null;
"#;

const BASIC_DEMO: &str = "export default function Basic() { return null; }\n";

const LANGUAGES: [&str; 2] = ["zh-CN", "en-US"];

fn write(root: &Path, rel: &str, contents: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, contents).unwrap();
    path
}

/// Site with one submodule holding a document and two components, only one of
/// which has demos, plus a submodule with nothing in it.
fn site(root: &Path) {
    write(root, "docs/intro.md", "# Introduction\n\nWelcome.\n");
    write(root, "components/button/__demo__/index.tsx", DEMO_INDEX);
    write(root, "components/button/__demo__/basic.tsx", BASIC_DEMO);
    write(root, "components/button/README.md", "# Button\n");
    write(root, "components/tag/README.md", "# Tag\n");

    for lang in LANGUAGES {
        let doc = EntryModule::doc_submodule(&["../../docs/intro.md"]);
        write(root, &format!(".temp/general/doc.{lang}.js"), &doc.render());

        let component = EntryModule::component_submodule(&[
            ComponentImports {
                name: "Button".into(),
                demo: Some("../../components/button/__demo__/index.tsx".into()),
                doc: Some("../../components/button/README.md".into()),
                style: None,
            },
            ComponentImports {
                name: "Tag".into(),
                doc: Some("../../components/tag/README.md".into()),
                ..Default::default()
            },
        ]);
        write(root, &format!(".temp/general/component.{lang}.js"), &component.render());

        let main = EntryModule::main(&[
            SubmoduleImports {
                key: "general".into(),
                doc: Some(format!("./general/doc.{lang}.js")),
                component: Some(format!("./general/component.{lang}.js")),
            },
            SubmoduleImports {
                key: "empty".into(),
                ..Default::default()
            },
        ]);
        write(root, &format!(".temp/index.{lang}.js"), &main.render());
    }
}

fn globs() -> BuildGlobs {
    serde_json::from_value(json!({
        "doc": "docs/**/*.md",
        "component": { "base": "components/*", "demo": "__demo__/index.tsx", "doc": "README.md" }
    }))
    .unwrap()
}

/// Run the graph phase the way a bundler would, with a chunk per language plus
/// one whose entry was never built.
fn graph_ready(root: &Path, plugin: &ModuleInfoPlugin) -> BuildContext {
    let entries: Vec<PathBuf> = LANGUAGES
        .iter()
        .map(|lang| root.join(format!(".temp/index.{lang}.js")))
        .collect();
    let modules = ModuleCrawler::new(CrawlOptions::new(root))
        .crawl(&entries)
        .unwrap();

    let mut chunks: Vec<ChunkInfo> = LANGUAGES
        .iter()
        .map(|lang| ChunkInfo::new(*lang, format!(".temp/index.{lang}.js")))
        .collect();
    chunks.push(ChunkInfo::new("fr-FR", ".temp/index.fr-FR.js"));
    plugin.on_graph_ready(root, &modules, &chunks)
}

fn plugin(root: &Path) -> ModuleInfoPlugin {
    let paths = SitePaths::resolve(&globs(), root).unwrap();
    ModuleInfoPlugin::new(paths, Default::default())
}

fn embedded_info(asset: &str) -> &str {
    let marker = "const moduleInfoStr = '";
    let start = asset.find(marker).unwrap() + marker.len();
    let end = asset[start..].find('\'').unwrap();
    &asset[start..start + end]
}

#[test]
fn aggregates_docs_components_and_demos_per_language() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    site(root);
    let plugin = plugin(root);
    let ctx = graph_ready(root, &plugin);

    let info = plugin.module_info(&ctx);
    // chunk without an entry module is left out entirely
    assert_eq!(info.keys().collect::<Vec<_>>(), vec!["zh-CN", "en-US"]);

    assert_eq!(
        serde_json::to_value(&info["zh-CN"]).unwrap(),
        json!([{
            "key": "general",
            "doc": [{ "name": "Doc0", "isDoc": true, "info": { "name": "Introduction" } }],
            "component": [{
                "name": "Button",
                "info": { "title": "按钮", "memberOf": "General" },
                "children": [
                    { "name": "Basic", "rawCode": BASIC_DEMO, "info": { "title": "基础用法" } },
                    { "name": "Size", "rawCode": "", "info": { "title": "尺寸" } }
                ]
            }]
        }])
    );

    let english = &info["en-US"][0].component[0];
    assert_eq!(english.info.fields.get("title"), Some("Button"));
    assert_eq!(english.children[0].info.get("title"), Some("Basic"));
    assert_eq!(english.children[1].info.get("title"), Some("Size"));
}

#[test]
fn assets_are_patched_once_with_decodable_info() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    site(root);
    let plugin = plugin(root);
    let mut ctx = graph_ready(root, &plugin);
    let expected = plugin.module_info(&ctx);

    let mut assets = AssetMap::new();
    for lang in LANGUAGES {
        let source = fs::read_to_string(root.join(format!(".temp/index.{lang}.js"))).unwrap();
        assets.insert(format!("index.{lang}.js"), source);
    }
    // a second reference to the token in the same bundle
    assets["index.zh-CN.js"].push_str(&format!("\nconsole.log('{PLACEHOLDER}');\n"));
    assets.insert("vendor.js".into(), format!("'{PLACEHOLDER}'"));

    let report = plugin.on_assets_ready(&mut ctx, &mut assets);
    assert_eq!(report.patched, vec!["index.zh-CN.js", "index.en-US.js"]);
    assert_eq!(report.replaced, 3);
    assert!(ctx.is_injected());

    assert_eq!(count_placeholders(&assets["index.zh-CN.js"]), 0);
    // assets of other chunks are not touched
    assert_eq!(count_placeholders(&assets["vendor.js"]), 1);
    for lang in LANGUAGES {
        let asset = &assets[format!("index.{lang}.js").as_str()];
        assert_eq!(decode_entries(embedded_info(asset)), expected[lang]);
    }

    let snapshot = assets.clone();
    assert!(plugin.on_assets_ready(&mut ctx, &mut assets).is_empty());
    assert!(plugin.emit(&mut ctx, &IndexMap::new(), &mut assets).is_empty());
    assert_eq!(assets, snapshot);
}

#[test]
fn legacy_emit_uses_reported_chunk_files() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    site(root);
    let plugin = plugin(root);
    let mut ctx = graph_ready(root, &plugin);

    let source = fs::read_to_string(root.join(".temp/index.en-US.js")).unwrap();
    let mut assets = AssetMap::new();
    assets.insert("static/main.1a2b.js".into(), source);
    assets.insert("static/main.1a2b.js.map".into(), PLACEHOLDER.into());

    let mut chunk_files = IndexMap::new();
    chunk_files.insert(
        "en-US".to_string(),
        vec!["static/main.1a2b.js".to_string(), "static/main.1a2b.js.map".to_string()],
    );
    let report = plugin.emit(&mut ctx, &chunk_files, &mut assets);

    assert_eq!(report.patched, vec!["static/main.1a2b.js"]);
    assert_eq!(ctx.chunks()[1].files.len(), 2);
    assert_eq!(assets["static/main.1a2b.js.map"], PLACEHOLDER);
    let decoded = decode_entries(embedded_info(&assets["static/main.1a2b.js"]));
    assert_eq!(decoded[0].component[0].children.len(), 2);

    // the modern hook no longer runs for this build
    assert!(plugin.on_assets_ready(&mut ctx, &mut assets).is_empty());
}

#[test]
fn umd_bundle_is_attached_only_when_present() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    site(root);
    let plugin = plugin(root);

    let ctx = graph_ready(root, &plugin);
    let without = serde_json::to_value(&plugin.module_info(&ctx)["zh-CN"]).unwrap();
    assert!(without[0]["component"][0]["info"].get("umd").is_none());

    write(
        root,
        "components/button/package.json",
        r#"{"name":"@site/button","version":"0.3.0"}"#,
    );
    write(root, "components/button/dist/index.min.js", "var SiteButton;");
    let ctx = graph_ready(root, &plugin);
    let with = serde_json::to_value(&plugin.module_info(&ctx)["zh-CN"]).unwrap();
    assert_eq!(
        with[0]["component"][0]["info"]["umd"],
        json!({ "distributable": true, "version": "0.3.0", "size": 15, "globalName": "Button" })
    );
}

#[test]
fn site_without_demos_yields_docs_only() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    site(root);
    fs::remove_dir_all(root.join("components/button/__demo__")).unwrap();
    let component = EntryModule::component_submodule(&[ComponentImports {
        name: "Button".into(),
        doc: Some("../../components/button/README.md".into()),
        ..Default::default()
    }]);
    for lang in LANGUAGES {
        write(root, &format!(".temp/general/component.{lang}.js"), &component.render());
    }

    let plugin = plugin(root);
    let ctx = graph_ready(root, &plugin);
    let info = plugin.module_info(&ctx);
    let general = &info["zh-CN"][0];
    assert_eq!(general.doc.len(), 1);
    assert!(general.component.is_empty());
}

/// Site whose only submodule lists `components` in the given order, each with
/// the same demo index.
fn component_site(root: &Path, components: &[&str], demo_index: &str) {
    let imports: Vec<ComponentImports> = components
        .iter()
        .map(|name| {
            let dir = name.to_lowercase();
            write(root, &format!("components/{dir}/__demo__/index.tsx"), demo_index);
            ComponentImports {
                name: name.to_string(),
                demo: Some(format!("../../components/{dir}/__demo__/index.tsx")),
                ..Default::default()
            }
        })
        .collect();

    for lang in LANGUAGES {
        let component = EntryModule::component_submodule(&imports);
        write(root, &format!(".temp/general/component.{lang}.js"), &component.render());
        let main = EntryModule::main(&[SubmoduleImports {
            key: "general".into(),
            component: Some(format!("./general/component.{lang}.js")),
            ..Default::default()
        }]);
        write(root, &format!(".temp/index.{lang}.js"), &main.render());
    }
}

#[test]
fn components_and_demos_keep_declaration_order() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let demo_index = r#"/** @title Header */

/** @title Zeta */
export const Zeta = () => null;

/** @title Alpha */
export const Alpha = () => null;

/** @title Mid */
export const Mid = () => null;
"#;
    component_site(root, &["Tag", "Button", "Alert"], demo_index);

    let plugin = plugin(root);
    // glob output is sorted: alert, button, tag
    let demos: Vec<_> = plugin.paths().demos().collect();
    assert!(demos[0].ends_with("components/alert/__demo__/index.tsx"));

    let ctx = graph_ready(root, &plugin);
    let info = plugin.module_info(&ctx);
    let components = &info["zh-CN"][0].component;
    assert_eq!(
        components.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
        vec!["Tag", "Button", "Alert"]
    );
    for component in components {
        assert_eq!(
            component.children.iter().map(|d| d.name.as_str()).collect::<Vec<_>>(),
            vec!["Zeta", "Alpha", "Mid"]
        );
        assert_eq!(
            component
                .children
                .iter()
                .filter_map(|d| d.info.get("title"))
                .collect::<Vec<_>>(),
            vec!["Zeta", "Alpha", "Mid"]
        );
    }
}

#[test]
fn umd_tag_in_header_comment_keeps_tree_decodable() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let demo_index = r#"/**
 * @title Button
 * @umd see docs
 */

/** @title Basic */
export const Basic = () => null;
"#;
    component_site(root, &["Button"], demo_index);
    let plugin = plugin(root);

    let round_trip = |plugin: &ModuleInfoPlugin| {
        let ctx = graph_ready(root, plugin);
        let tree = plugin.module_info(&ctx)["zh-CN"].clone();
        let encoded = docsite_info::encode_info(&tree).unwrap();
        assert_eq!(decode_entries(&encoded), tree);
        serde_json::to_value(&tree).unwrap()
    };

    let without = round_trip(&plugin);
    assert_eq!(
        without[0]["component"][0]["info"],
        json!({ "title": "Button" })
    );

    write(root, "components/button/package.json", r#"{"name":"button","version":"1.0.0"}"#);
    write(root, "components/button/dist/index.min.js", "var Button;");
    let with = round_trip(&plugin);
    assert_eq!(with[0]["component"][0]["info"]["title"], "Button");
    assert_eq!(with[0]["component"][0]["info"]["umd"]["distributable"], true);
}
