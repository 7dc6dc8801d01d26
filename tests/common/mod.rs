#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub fn write<P: AsRef<Path>>(root: P, relative: &str, content: &str) -> PathBuf {
    let path = root.as_ref().join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// index.js -> util.js, styles.css; util.js -> lib/helper.js; lib/dead.js unreferenced
pub fn small_web_project(root: &Path) {
    write(
        root,
        "index.js",
        "import \"./util.js\";\nimport \"./styles.css\";\n\ninit();\n",
    );
    write(
        root,
        "util.js",
        "import helper from \"../lib/helper.js\";\nexport const util = () => helper();\n",
    );
    write(root, "styles.css", "body { margin: 0; }\n");
    write(root, "lib/helper.js", "export default function helper() {}\n");
    write(root, "lib/dead.js", "export const dead = true;\n");
}
