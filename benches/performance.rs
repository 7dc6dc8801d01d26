use criterion::{black_box, criterion_group, criterion_main, Criterion};
use deadfiles::core::{classify_usage, DependencyAnalyzer, NullSink, ResolverConfig};
use deadfiles::parsers::common::ReferencePattern;
use tempfile::TempDir;

fn benchmark_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("dependency_resolution");

    // A chain of modules, each importing the next plus a shared stylesheet
    let test_dir = TempDir::new().unwrap();
    let root = test_dir.path();
    std::fs::create_dir_all(root.join("src/components")).unwrap();
    std::fs::create_dir_all(root.join("styles")).unwrap();
    std::fs::write(root.join("styles/app.css"), "body { margin: 0; }\n").unwrap();

    for i in 0..200 {
        let content = format!(
            r#"
import {{ render }} from "./component_{next}";
import "../../styles/app.css";

export function component_{i}() {{
    const icon = "img/icon_{i}.png";
    return render(icon);
}}
"#,
            i = i,
            next = i + 1
        );
        std::fs::write(
            root.join(format!("src/components/component_{}.js", i)),
            content,
        )
        .unwrap();
    }
    // orphans
    for i in 0..50 {
        std::fs::write(root.join(format!("src/orphan_{}.js", i)), "export {};\n").unwrap();
    }

    let analyzer = DependencyAnalyzer::new(
        ResolverConfig::new(root)
            .with_entry_points(["src/components/component_0.js"])
            .with_extensions(["js", "css"]),
    );

    group.bench_function("resolve_chain", |b| {
        b.iter(|| {
            let closure = analyzer.analyze(black_box(&NullSink));
            black_box(closure)
        });
    });

    group.bench_function("resolve_and_classify", |b| {
        b.iter(|| {
            let closure = analyzer.analyze(&NullSink);
            let usage = classify_usage(black_box(root), &closure.reachable);
            black_box(usage)
        });
    });

    group.finish();
}

fn benchmark_pattern(c: &mut Criterion) {
    let mut group = c.benchmark_group("reference_pattern");

    let pattern =
        ReferencePattern::from_extensions(["js", "css", "png", "html", "json"]).unwrap();
    let source =
        r#"import a from "./a.js"; const b = 'img/b.png'; fetch("data/c.json"); "#.repeat(500);

    group.bench_function("find_literals", |b| {
        b.iter(|| black_box(pattern.find_literals(black_box(&source)).count()));
    });

    group.finish();
}

criterion_group!(benches, benchmark_resolution, benchmark_pattern);
criterion_main!(benches);
