#![no_main]

use libfuzzer_sys::fuzz_target;

use typedc::{compile, CompileOptions, ModuleMode, OutputExtension};

fuzz_target!(|data: &[u8]| {
    if data.len() > 32 * 1024 {
        return;
    }
    let src = String::from_utf8_lossy(data);

    // Exercise both splitting modes on inputs that survive the front end.
    for mode in [ModuleMode::Multiple, ModuleMode::Single] {
        let options = CompileOptions {
            mode,
            extension: OutputExtension::Ts,
        };
        if let Ok(files) = compile("fuzz.typed", &src, &options) {
            for file in files {
                let _ = file.source_map.encode();
            }
        }
    }
});
