#![cfg_attr(test, allow(clippy::unwrap_used))]

//! `glowcloud [COUNT] [--options PATH]`
//!
//! Opens a window showing the particle cloud. `COUNT` overrides the point
//! count from the options file (or the default of 20000).

use std::path::PathBuf;

use glowcloud::{Options, Viewer};

/// Parsed command line.
#[derive(Debug, Default, PartialEq)]
struct Args {
    count: Option<i64>,
    options_path: Option<PathBuf>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if arg == "--options" {
            let path = args
                .next()
                .ok_or_else(|| "--options requires a path".to_owned())?;
            parsed.options_path = Some(PathBuf::from(path));
        } else if parsed.count.is_none() {
            let count = arg
                .parse::<i64>()
                .map_err(|e| format!("invalid point count {arg:?}: {e}"))?;
            parsed.count = Some(count);
        } else {
            return Err(format!("unexpected argument {arg:?}"));
        }
    }
    Ok(parsed)
}

fn run(args: Args) -> Result<(), glowcloud::CloudError> {
    let mut options = match &args.options_path {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    if let Some(count) = args.count {
        options.cloud.count = count;
    }
    log::info!("starting with {} points", options.cloud.effective_count());

    Viewer::builder().with_options(options).build().run()
}

fn main() {
    env_logger::init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            log::error!("{e}");
            log::error!("Usage: glowcloud [COUNT] [--options PATH]");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
