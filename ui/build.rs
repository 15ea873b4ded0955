//! Build script for qrgen-ui.
//!
//! Writes `assets/sitemap.xml` for the configured site URL; trunk copies it
//! next to the web build (see `index.html`).

use std::env;
use std::path::Path;

use qrgen_business::AppConfig;
use qrgen_business::site::PageMetadata;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=QRGEN_SITE_URL");

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    let config = AppConfig::from_env().expect("Invalid QRGEN_* configuration");

    PageMetadata::for_site(&config.site_url)
        .write_sitemap(&Path::new(&manifest_dir).join("assets"), chrono::Utc::now())
        .unwrap_or_else(|e| panic!("Failed to write sitemap: {e}"));
}
