#[macro_use]
extern crate tracing;

use anyhow::Context;
use bitvatar_common::{Avatar, KeyAvatar, Method, markup, store};
use std::path::PathBuf;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

const DEFAULT_FOLDER: &str = "avatars";
const DEFAULT_BASE_URL: &str = "/avatars/";

fn default_folder() -> PathBuf {
    PathBuf::from(DEFAULT_FOLDER)
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}

#[derive(argh::FromArgs)]
/// Generate and manage black and white bitmap avatars
struct Args {
    #[argh(subcommand)]
    command: Command,
}

#[derive(argh::FromArgs)]
#[argh(subcommand)]
enum Command {
    Generate(Generate),
    Path(Locate),
    Delete(Delete),
    Markup(Markup),
    Show(Show),
}

#[derive(argh::FromArgs)]
#[argh(subcommand, name = "generate")]
/// generate an avatar and save it under its key
struct Generate {
    #[argh(positional)]
    /// key the avatar is stored under
    key: String,

    #[argh(option, default = "8")]
    /// width in pixels
    width: i32,

    #[argh(option, default = "8")]
    /// height in pixels
    height: i32,

    #[argh(option, default = "Method::Symmetric")]
    /// fill method, "symmetric" mirrors the left half, anything else is fully random
    method: Method,

    #[argh(option, default = "default_folder()")]
    /// folder the avatars are stored in
    folder: PathBuf,

    #[argh(option, default = "default_base_url()")]
    /// url prefix the folder is served under
    base_url: String,
}

#[derive(argh::FromArgs)]
#[argh(subcommand, name = "path")]
/// print where the avatar for a key is stored
struct Locate {
    #[argh(positional)]
    /// key of the avatar
    key: String,

    #[argh(option, default = "default_folder()")]
    /// folder the avatars are stored in
    folder: PathBuf,
}

#[derive(argh::FromArgs)]
#[argh(subcommand, name = "delete")]
/// delete the avatar stored under a key
struct Delete {
    #[argh(positional)]
    /// key of the avatar
    key: String,

    #[argh(option, default = "default_folder()")]
    /// folder the avatars are stored in
    folder: PathBuf,
}

#[derive(argh::FromArgs)]
#[argh(subcommand, name = "markup")]
/// print the <img> tag for a key
struct Markup {
    #[argh(positional)]
    /// key of the avatar
    key: String,

    #[argh(option, default = "64")]
    /// displayed width
    width: u32,

    #[argh(option, default = "64")]
    /// displayed height
    height: u32,

    #[argh(option, default = "default_base_url()")]
    /// url prefix the folder is served under
    base_url: String,
}

#[derive(argh::FromArgs)]
#[argh(subcommand, name = "show")]
/// print a stored avatar as text
struct Show {
    #[argh(positional)]
    /// key of the avatar
    key: String,

    #[argh(option, default = "default_folder()")]
    /// folder the avatars are stored in
    folder: PathBuf,
}

/// Saves a fresh avatar and returns its path followed by its `<img>` tag
fn generate(args: Generate) -> anyhow::Result<String> {
    info!(
        key = %args.key,
        method = %args.method,
        "generating {}x{} avatar", args.width, args.height
    );

    let avatar = KeyAvatar::generate(args.key, args.width, args.height, args.method)?;
    let path = avatar
        .save(&args.folder)
        .with_context(|| format!("failed to save avatar into {}", args.folder.display()))?;

    Ok(format!(
        "{}\n{}",
        path.display(),
        markup(&args.base_url, &avatar.key, args.width, args.height)
    ))
}

/// One line per row, `#` for white and `.` for black
fn render_text(avatar: &Avatar) -> String {
    avatar
        .rows()
        .map(|row| row.map(|pixel| if pixel { '#' } else { '.' }).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args: Args = argh::from_env();

    match args.command {
        Command::Generate(args) => println!("{}", generate(args)?),
        Command::Path(args) => println!("{}", store::path(&args.folder, &args.key).display()),
        Command::Delete(args) => {
            store::delete(&args.folder, &args.key)?;
            info!(key = %args.key, "deleted avatar");
        }
        Command::Markup(args) => {
            println!("{}", markup(&args.base_url, &args.key, args.width, args.height))
        }
        Command::Show(args) => {
            let stored = store::load(&args.folder, &args.key)?;
            println!("{}", render_text(&stored.avatar));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn generate_prints_path_and_tag() {
        let temp_dir = TempDir::new().unwrap();
        let output = generate(Generate {
            key: "user123".into(),
            width: 6,
            height: 4,
            method: Method::Symmetric,
            folder: temp_dir.path().to_path_buf(),
            base_url: default_base_url(),
        })
        .unwrap();

        let path = store::path(temp_dir.path(), "user123");
        assert_eq!(
            output,
            format!(
                "{}\n<img src=\"/avatars/user123.png\" width=\"6\" height=\"4\" alt=\"Avatar user123\">",
                path.display()
            )
        );
        assert!(path.is_file());
    }

    #[test]
    fn generate_rejects_empty_width() {
        let temp_dir = TempDir::new().unwrap();
        let result = generate(Generate {
            key: "nobody".into(),
            width: 0,
            height: 4,
            method: Method::Random,
            folder: temp_dir.path().to_path_buf(),
            base_url: default_base_url(),
        });

        assert!(result.is_err());
        assert!(!store::exists(temp_dir.path(), "nobody"));
    }

    #[test]
    fn text_rendering_marks_white_pixels() {
        let mut avatar = Avatar::blank(3, 2).unwrap();
        avatar.set(0, 0, true);
        avatar.set(2, 0, true);
        avatar.set(1, 1, true);

        assert_eq!(render_text(&avatar), "#.#\n.#.");
    }
}
