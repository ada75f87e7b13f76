#[macro_use]
extern crate tracing;

use anyhow::Context;
use bitvatar_common::{KeyAvatar, Method};
use itertools::Itertools;
use std::{
    fs,
    path::{Path, PathBuf},
};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(argh::FromArgs)]
/// generate an avatar for every key listed in a file
struct Args {
    #[argh(positional)]
    /// path to a file with one key per line
    keys: PathBuf,

    #[argh(option, default = "PathBuf::from(\"avatars\")")]
    /// folder to store the avatars in
    folder: PathBuf,

    #[argh(option, default = "8")]
    /// width in pixels
    width: i32,

    #[argh(option, default = "8")]
    /// height in pixels
    height: i32,

    #[argh(option, default = "Method::Symmetric")]
    /// fill method, "symmetric" mirrors the left half, anything else is fully random
    method: Method,
}

/// Trimmed, non-empty keys in file order, first occurrence wins
fn parse_keys(list: &str) -> Vec<&str> {
    list.lines()
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .unique()
        .collect()
}

fn process(
    keys: &[&str],
    folder: &Path,
    width: i32,
    height: i32,
    method: Method,
) -> anyhow::Result<Vec<PathBuf>> {
    keys.iter()
        .map(|key| -> anyhow::Result<PathBuf> {
            let avatar = KeyAvatar::generate(*key, width, height, method)
                .with_context(|| format!("failed to generate avatar for {key:?}"))?;
            let path = avatar
                .save(folder)
                .with_context(|| format!("failed to save avatar for {key:?}"))?;

            info!(path = %path.display(), "saved avatar");
            Ok(path)
        })
        .try_collect()
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args: Args = argh::from_env();

    let list = fs::read_to_string(&args.keys)
        .with_context(|| format!("failed to read keys from {}", args.keys.display()))?;
    let keys = parse_keys(&list);

    info!(count = keys.len(), method = %args.method, "processing keys..");
    let saved = process(&keys, &args.folder, args.width, args.height, args.method)?;
    info!("saved {} avatars to {}", saved.len(), args.folder.display());

    Ok(())
}
