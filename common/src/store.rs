//! Key-addressed avatar files.
//!
//! Every avatar lives at `<folder>/<key>.png`. There is no index or sidecar,
//! and nothing coordinates concurrent writers: the last save wins.
//!
//! Keys are joined into paths as-is. A key like `../../etc/passwd` escapes the
//! folder, so keys from untrusted input have to be validated by the caller.

use crate::{
    error::{Error, Result},
    generate::KeyAvatar,
    render,
};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

pub const EXTENSION: &str = "png";

/// Where the avatar for `key` is stored. Doesn't touch the filesystem.
pub fn path(folder: impl AsRef<Path>, key: &str) -> PathBuf {
    folder.as_ref().join(format!("{key}.{EXTENSION}"))
}

/// Encodes the avatar and writes it to `<folder>/<key>.png`, creating the
/// folder if needed and replacing whatever was stored under the key before.
///
/// A folder created here stays in place even if the write itself fails.
pub fn save(folder: impl AsRef<Path>, avatar: &KeyAvatar) -> Result<PathBuf> {
    let folder = folder.as_ref();
    let data = render::encode_png(&avatar.avatar)?;

    fs::create_dir_all(folder)?;

    let path = path(folder, &avatar.key);
    fs::write(&path, &data)?;
    debug!(path = %path.display(), bytes = data.len(), "saved avatar");

    Ok(path)
}

/// Reads the avatar stored under `key` back in
pub fn load(folder: impl AsRef<Path>, key: &str) -> Result<KeyAvatar> {
    let path = path(folder, key);
    let data = fs::read(&path).map_err(|error| not_found_or(error, &path))?;
    debug!(path = %path.display(), bytes = data.len(), "loaded avatar");

    Ok(KeyAvatar {
        key: key.to_owned(),
        avatar: render::decode_png(&data)?,
    })
}

/// Removes the avatar stored under `key`
pub fn delete(folder: impl AsRef<Path>, key: &str) -> Result<()> {
    let path = path(folder, key);
    fs::remove_file(&path).map_err(|error| not_found_or(error, &path))?;
    debug!(path = %path.display(), "deleted avatar");

    Ok(())
}

/// Whether something is stored under `key`
pub fn exists(folder: impl AsRef<Path>, key: &str) -> bool {
    path(folder, key).is_file()
}

fn not_found_or(error: io::Error, path: &Path) -> Error {
    match error.kind() {
        io::ErrorKind::NotFound => Error::NotFound(path.to_path_buf()),
        _ => Error::Io(error),
    }
}

impl KeyAvatar {
    /// See [`save`]
    pub fn save(&self, folder: impl AsRef<Path>) -> Result<PathBuf> {
        save(folder, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Avatar, AvatarGenerator, Method};
    use rand::{SeedableRng, rngs::StdRng};
    use tempfile::TempDir;

    fn keyed(key: &str, seed: u64) -> KeyAvatar {
        StdRng::seed_from_u64(seed)
            .generate_keyed(key, 8, 8, Method::Symmetric)
            .unwrap()
    }

    #[test]
    fn path_joins_key_and_extension() {
        assert_eq!(
            path("avatars", "user123"),
            Path::new("avatars").join("user123.png")
        );
        assert_eq!(path("", "a.b"), PathBuf::from("a.b.png"));
    }

    #[test]
    fn save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let avatar = keyed("user123", 5);

        let saved = avatar.save(temp_dir.path()).unwrap();
        assert_eq!(saved, path(temp_dir.path(), "user123"));
        assert!(saved.is_file());
        assert!(exists(temp_dir.path(), "user123"));

        let loaded = load(temp_dir.path(), "user123").unwrap();
        assert_eq!(loaded.key, "user123");
        assert_eq!(loaded, avatar);
    }

    #[test]
    fn random_avatar_loads_back_equal() {
        let temp_dir = TempDir::new().unwrap();
        let avatar = StdRng::seed_from_u64(5)
            .generate_keyed("k", 3, 3, Method::Random)
            .unwrap();

        save(temp_dir.path(), &avatar).unwrap();
        let loaded = load(temp_dir.path(), "k").unwrap();
        assert_eq!(loaded, avatar);
    }

    #[test]
    fn save_creates_nested_folders() {
        let temp_dir = TempDir::new().unwrap();
        let folder = temp_dir.path().join("static").join("img").join("avatars");

        save(&folder, &keyed("nested", 1)).unwrap();
        assert!(folder.join("nested.png").is_file());
    }

    #[test]
    fn save_overwrites() {
        let temp_dir = TempDir::new().unwrap();

        let mut first = KeyAvatar {
            key: "same".into(),
            avatar: Avatar::blank(4, 4).unwrap(),
        };
        save(temp_dir.path(), &first).unwrap();

        first.avatar.set(1, 2, true);
        save(temp_dir.path(), &first).unwrap();

        let loaded = load(temp_dir.path(), "same").unwrap();
        assert!(loaded.avatar.get(1, 2));
        assert_eq!(loaded, first);
    }

    #[test]
    fn file_on_disk_is_the_encoded_png() {
        let temp_dir = TempDir::new().unwrap();
        let avatar = keyed("bytes", 9);

        let saved = save(temp_dir.path(), &avatar).unwrap();
        assert_eq!(fs::read(saved).unwrap(), avatar.avatar.to_png().unwrap());
    }

    #[test]
    fn delete_removes_then_reports_missing() {
        let temp_dir = TempDir::new().unwrap();
        let saved = save(temp_dir.path(), &keyed("gone", 2)).unwrap();

        delete(temp_dir.path(), "gone").unwrap();
        assert!(!saved.exists());

        match delete(temp_dir.path(), "gone") {
            Err(Error::NotFound(missing)) => assert_eq!(missing, saved),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn load_missing_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        assert!(matches!(
            load(temp_dir.path(), "nobody"),
            Err(Error::NotFound(..))
        ));
    }

    #[test]
    fn save_into_file_path_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, b"not a folder").unwrap();

        let error = save(&blocker, &keyed("key", 3)).unwrap_err();
        assert!(matches!(error, Error::Io(..)));
        assert!(error.is_retryable());
    }
}
