use std::env;
use std::path::PathBuf;

// Generates `tempmask.h` for C hosts into the build output directory
fn main() {
    println!("cargo:rerun-if-changed=src");

    let crate_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => dir,
        Err(_) => return,
    };
    let out_dir = match env::var("OUT_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => return,
    };

    let config = cbindgen::Config {
        language: cbindgen::Language::C,
        include_guard: Some("TEMPMASK_H".to_string()),
        ..Default::default()
    };

    match cbindgen::Builder::new()
        .with_crate(crate_dir)
        .with_config(config)
        .generate() {
        Ok(bindings) => {
            bindings.write_to_file(out_dir.join("tempmask.h"));
        },
        Err(e) => println!("cargo:warning=Unable to generate C header: {}", e),
    }
}
