//! Startup banner.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use crate::consts::{AUTHOR, HOMEPAGE, REPO, VERSION, format_bytes};

/// Service configuration for display in the startup banner.
pub struct BannerInfo<'a> {
    pub bind: SocketAddr,
    pub engine: &'a Path,
    pub timeout: Duration,
    pub temp_dir: &'a Path,
    pub model_dir: &'a Path,
    pub operators: &'a str,
    pub max_body_bytes: usize,
}

pub fn render_banner(info: &BannerInfo) -> String {
    format!(
        r#"
   ╔═══════════════════════════════════════╗
   ║            T E S S E R A              ║
   ║    reads what the challenge shows     ║
   ╚═══════════════════════════════════════╝

   version   {}
   by        {}
   home      {}
   repo      {}
   listen    http://{}
   engine    {} (timeout {}s)
   tempdir   {}
   models    {}
   math      {}
   max body  {}
"#,
        VERSION,
        AUTHOR,
        HOMEPAGE,
        REPO,
        info.bind,
        info.engine.display(),
        info.timeout.as_secs_f32(),
        info.temp_dir.display(),
        info.model_dir.display(),
        info.operators,
        format_bytes(info.max_body_bytes),
    )
}

/// Print the startup banner with service info.
pub fn print_banner(info: &BannerInfo) {
    println!("{}", render_banner(info));
}
