use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use typedc::{compile, CompileOptions, ModuleMode, OutputExtension};

fn workspace_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|path| path.parent())
        .expect("workspace root")
        .to_path_buf()
}

fn bless_enabled() -> bool {
    std::env::var("TYPEDC_BLESS").is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

fn normalize_newlines(s: &str) -> String {
    s.replace("\r\n", "\n")
}

fn write_blessed(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create golden parent");
    }
    fs::write(path, contents).expect("write blessed golden");
}

#[test]
fn demo_outputs_match_blessed_goldens() {
    let root = workspace_root();
    let demos = root.join("demos");
    let options = CompileOptions {
        mode: ModuleMode::Multiple,
        extension: OutputExtension::Ts,
    };

    let mut checked = 0usize;
    for entry in WalkDir::new(&demos).max_depth(1) {
        let entry = entry.expect("walk demos");
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("typed") {
            continue;
        }
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .expect("demo stem");
        let file_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .expect("demo file name");
        let source = fs::read_to_string(path).expect("read demo");

        let files = compile(file_name, &source, &options).expect("compile demo");
        assert!(!files.is_empty());

        for file in &files {
            let golden_path = demos.join("goldens").join(stem).join(&file.file_name);
            if bless_enabled() {
                write_blessed(&golden_path, &file.text);
                continue;
            }
            let expected = normalize_newlines(
                &fs::read_to_string(&golden_path)
                    .unwrap_or_else(|_| panic!("missing golden {}", golden_path.display())),
            );
            assert_eq!(
                normalize_newlines(&file.text),
                expected,
                "golden mismatch for {}",
                golden_path.display()
            );
        }

        for file in &files {
            let raw: serde_json::Value =
                serde_json::from_str(&file.source_map.encode()).expect("valid source map json");
            assert_eq!(raw["version"], 3);
            assert_eq!(raw["file"], file.file_name.as_str());
            assert_eq!(raw["sources"][0], file_name);
        }
        checked += 1;
    }
    assert!(checked >= 5, "expected demo files, found {checked}");
}
