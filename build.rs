use std::env;

fn main() {

    // Only the optional sdl viewer links against native libraries. Unix family systems are
    // assumed to have libsdl2-dev installed with the package manager. On windows we look for
    // the C built sdl2 libraries in ./sdl_libs unless SDL_LIBS_DIR says otherwise.
    if env::var_os("CARGO_FEATURE_SDL").is_none() {
        return;
    }

    if env::var("CARGO_CFG_TARGET_FAMILY").map(|family| family == "windows").unwrap_or(false) {

        let libs_dir = env::var("SDL_LIBS_DIR")
            .ok()
            .or_else(|| env::var("CARGO_MANIFEST_DIR").ok().map(|root| format!("{}/sdl_libs", root)));

        if let Some(libs) = libs_dir {
            println!("cargo:rustc-link-search=native={}", libs);
        }
    }
    println!("cargo:rerun-if-env-changed=SDL_LIBS_DIR");
}
