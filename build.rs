use std::env;
use std::path::PathBuf;

const DEFAULT_WIN_LIB_DIRS: [&str; 2] = [
    r"C:\Program Files (x86)\National Instruments\Shared\ExternalCompilerSupport\C\lib64\msvc",
    r"C:\Program Files (x86)\National Instruments\Shared\ExternalCompilerSupport\C\lib32\msvc",
];

fn main() {
    let driver_enabled = env::var_os("CARGO_FEATURE_DRIVER").is_some();
    if !driver_enabled {
        return;
    }
    println!("cargo:rerun-if-env-changed=LIB_NI4882_PATH");

    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    let pointer_width = env::var("CARGO_CFG_TARGET_POINTER_WIDTH").unwrap_or_default();

    match env::var("LIB_NI4882_PATH") {
        Ok(path) if !path.trim().is_empty() => {
            let path_buf = PathBuf::from(&path);
            if !path_buf.exists() {
                println!("cargo:warning=LIB_NI4882_PATH does not exist: {}", path);
                std::process::exit(1);
            }
            println!("cargo:rustc-link-search=native={}", path);
        }
        _ if target_os == "windows" => {
            let dir = if pointer_width == "64" {
                DEFAULT_WIN_LIB_DIRS[0]
            } else {
                DEFAULT_WIN_LIB_DIRS[1]
            };
            println!("cargo:rustc-link-search=native={}", dir);
        }
        _ => {}
    }

    let lib = if target_os == "windows" { "ni4882" } else { "gpibapi" };
    println!("cargo:rustc-link-lib=dylib={}", lib);
}
