mod common;

use common::{small_web_project, write};
use deadfiles::core::{
    DependencyAnalyzer, DiagnosticKind, NullSink, ReachableSet, ResolverConfig, VecSink,
};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

fn analyzer(root: &Path, entries: &[&str], extensions: &[&str]) -> DependencyAnalyzer {
    DependencyAnalyzer::new(
        ResolverConfig::new(root)
            .with_entry_points(entries.iter().copied())
            .with_extensions(extensions.iter().copied()),
    )
}

fn reachable_of(root: &Path, relative: &[&str]) -> ReachableSet {
    relative.iter().map(|rel| root.join(rel)).collect()
}

#[test]
fn follows_references_transitively_from_entry_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    small_web_project(root);

    let sink = VecSink::new();
    let closure = analyzer(root, &["index.js"], &["js", "css"]).analyze(&sink);

    assert_eq!(
        closure.reachable,
        reachable_of(root, &["index.js", "util.js", "styles.css", "lib/helper.js"])
    );
    assert!(!closure.is_used(&root.join("lib/dead.js")));
    assert_eq!(sink.count(DiagnosticKind::MissingDependency), 0);
}

#[test]
fn records_each_reference_edge_once() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    small_web_project(root);

    let closure = analyzer(root, &["index.js"], &["js", "css"]).analyze(&NullSink);

    // each import is matched by both the import and the literal pattern
    assert_eq!(closure.graph.edge_count(), 3);
    let entries: Vec<_> = closure
        .graph
        .node_weights()
        .filter(|node| node.is_entry)
        .map(|node| node.path.clone())
        .collect();
    assert_eq!(entries, vec![root.join("index.js")]);
}

#[test]
fn repeated_runs_give_the_same_closure() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    small_web_project(root);

    let analyzer = analyzer(root, &["index.js", "util.js"], &["js", "css"]);
    let first = analyzer.analyze(&NullSink);
    let second = analyzer.analyze(&NullSink);
    assert_eq!(first.reachable, second.reachable);
}

#[test]
fn cyclic_references_scan_each_file_once() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    write(root, "a.js", "import \"./b.js\";\n");
    write(root, "b.js", "import \"./a.js\";\nimport \"./c.js\";\n");
    write(root, "c.js", "import \"./a.js\";\n");

    let closure = analyzer(root, &["a.js", "b.js"], &["js"]).analyze(&NullSink);

    assert_eq!(closure.reachable, reachable_of(root, &["a.js", "b.js", "c.js"]));
    let distinct: HashSet<_> = closure.scanned.iter().collect();
    assert_eq!(distinct.len(), closure.scanned.len());
    assert_eq!(closure.scanned.len(), 3);
}

#[test]
fn missing_entry_point_is_reported_and_skipped() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    small_web_project(root);

    let sink = VecSink::new();
    let closure = analyzer(root, &["missing.js"], &["js", "css"]).analyze(&sink);

    assert!(closure.reachable.is_empty());
    assert_eq!(sink.count(DiagnosticKind::MissingEntryPoint), 1);
}

#[test]
fn entry_with_untracked_extension_is_skipped() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    small_web_project(root);

    let sink = VecSink::new();
    let closure = analyzer(root, &["styles.css"], &["js"]).analyze(&sink);

    assert!(closure.reachable.is_empty());
    assert_eq!(sink.count(DiagnosticKind::MissingEntryPoint), 1);
}

#[test]
fn url_literals_are_discarded_silently() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    write(
        root,
        "index.js",
        concat!(
            "const cdn = \"http://example.com/a.js\";\n",
            "const secure = 'https://cdn.example.com/lib/b.js';\n",
        ),
    );

    let sink = VecSink::new();
    let closure = analyzer(root, &["index.js"], &["js"]).analyze(&sink);

    assert_eq!(closure.reachable, reachable_of(root, &["index.js"]));
    assert_eq!(sink.count(DiagnosticKind::MissingDependency), 0);
}

#[test]
fn dangling_reference_is_a_warning() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    write(root, "index.js", "import \"./nope.js\";\n");

    let sink = VecSink::new();
    let closure = analyzer(root, &["index.js"], &["js"]).analyze(&sink);

    assert_eq!(closure.reachable, reachable_of(root, &["index.js"]));
    let missing: Vec<_> = sink
        .into_diagnostics()
        .into_iter()
        .filter(|d| d.kind == DiagnosticKind::MissingDependency)
        .collect();
    assert!(!missing.is_empty());
    assert_eq!(missing[0].path.as_deref(), Some(root.join("nope.js").as_path()));
    assert_eq!(
        missing[0].referenced_from.as_deref(),
        Some(root.join("index.js").as_path())
    );
}

#[test]
fn directory_entry_marks_every_file_used() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    write(root, "src/main.js", "import { h } from \"./helpers/h\";\n");
    write(root, "src/notes.txt", "keep me");
    write(root, "src/helpers/h.js", "export const h = 1;\n");
    write(root, "other/x.js", "");

    let closure = analyzer(root, &["src"], &["js"]).analyze(&NullSink);

    assert_eq!(
        closure.reachable,
        reachable_of(root, &["src/main.js", "src/notes.txt", "src/helpers/h.js"])
    );
}

#[test]
fn extensionless_imports_get_the_implicit_extension() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    write(
        root,
        "app.js",
        "import React from \"react\";\nimport { f } from './lib/f';\n",
    );
    write(root, "lib/f.js", "export function f() {}\n");

    let sink = VecSink::new();
    let closure = analyzer(root, &["app.js"], &["js"]).analyze(&sink);

    assert_eq!(closure.reachable, reachable_of(root, &["app.js", "lib/f.js"]));
    assert_eq!(sink.count(DiagnosticKind::MissingDependency), 0);
}

#[test]
fn dotted_module_names_resolve_with_the_implicit_extension() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    write(
        root,
        "app.ts",
        "import { S } from './x.service';\nimport { M } from './app.module';\n",
    );
    write(root, "x.service.ts", "export class S {}\n");
    write(root, "app.module.ts", "export class M {}\n");

    let sink = VecSink::new();
    let closure = analyzer(root, &["app.ts"], &["ts"]).analyze(&sink);

    assert_eq!(
        closure.reachable,
        reachable_of(root, &["app.ts", "x.service.ts", "app.module.ts"])
    );
    assert_eq!(sink.count(DiagnosticKind::MissingDependency), 0);
}

#[test]
fn side_effect_import_without_semicolon_is_followed() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    write(root, "a.js", "import './polyfill'\nimport b from './b'\n");
    write(root, "polyfill.js", "");
    write(root, "b.js", "");

    let sink = VecSink::new();
    let closure = analyzer(root, &["a.js"], &["js"]).analyze(&sink);

    assert_eq!(closure.reachable, reachable_of(root, &["a.js", "polyfill.js", "b.js"]));
    assert_eq!(sink.count(DiagnosticKind::MissingDependency), 0);
}

#[test]
fn unreadable_file_is_reported_and_stays_reachable() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    write(root, "a.js", "import \"./b.js\";\n");
    fs::write(root.join("b.js"), [0x69, 0x6d, 0xff, 0xfe, 0x22, 0x2e]).unwrap();
    write(root, "c.js", "");

    let sink = VecSink::new();
    let closure = analyzer(root, &["a.js"], &["js"]).analyze(&sink);

    assert_eq!(closure.reachable, reachable_of(root, &["a.js", "b.js"]));
    assert_eq!(sink.count(DiagnosticKind::ReadFailure), 1);
    let b = closure
        .graph
        .node_indices()
        .find(|&index| closure.graph[index].path == root.join("b.js"))
        .unwrap();
    assert_eq!(closure.graph.neighbors(b).count(), 0);
}

#[test]
fn references_resolve_through_ancestor_directories() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    write(
        root,
        "assets/css/pages/home.html",
        "<link rel=\"stylesheet\" href=\"css/site.css\">",
    );
    write(root, "assets/css/site.css", "h1 { color: red; }");

    let closure =
        analyzer(root, &["assets/css/pages/home.html"], &["html", "css"]).analyze(&NullSink);

    assert_eq!(
        closure.reachable,
        reachable_of(root, &["assets/css/pages/home.html", "assets/css/site.css"])
    );
}

#[test]
fn untracked_targets_are_used_but_not_scanned() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    write(root, "index.html", "<img src=\"img/logo.png\">");
    write(root, "img/logo.png", "not really a png \"other.png\"");
    write(root, "img/other.png", "");

    let closure = analyzer(root, &["index.html"], &["html"]).analyze(&NullSink);

    assert_eq!(closure.reachable, reachable_of(root, &["index.html", "img/logo.png"]));
    assert_eq!(closure.scanned, vec![root.join("index.html")]);
}

#[test]
fn scan_file_returns_best_effort_paths() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    write(
        root,
        "page.html",
        concat!(
            "<script src=\"js/app.js\"></script>",
            "<script src=\"js/gone.js\"></script>",
            "<a href=\"http://x.org/y.html\">",
        ),
    );
    write(root, "js/app.js", "");

    let sink = VecSink::new();
    let targets = analyzer(root, &[], &["html", "js"]).scan_file(&root.join("page.html"), &sink);

    // existence is checked by the caller, not by scan_file
    assert_eq!(targets.len(), 2);
    assert!(targets.contains(&root.join("js/app.js")));
    assert!(targets.contains(&root.join("js/gone.js")));
    assert_eq!(sink.count(DiagnosticKind::MissingDependency), 0);
}

#[test]
fn scan_file_rejects_untracked_extension() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    write(root, "notes.md", "see \"a/b.md\"");

    let sink = VecSink::new();
    let targets = analyzer(root, &[], &["js"]).scan_file(&root.join("notes.md"), &sink);

    assert!(targets.is_empty());
    assert_eq!(sink.count(DiagnosticKind::UnrecognizedExtension), 1);
}

#[test]
fn resolve_shortcut_matches_the_analyzer() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    small_web_project(root);

    let reachable = deadfiles::core::resolve(root, ["index.js"], [".js", ".css"], &NullSink);
    assert_eq!(
        reachable,
        analyzer(root, &["index.js"], &["js", "css"]).analyze(&NullSink).reachable
    );
}
