use indicatif::{ProgressBar, ProgressStyle};
use std::fmt;
use std::future;
use std::io;
use std::path;
use std::string;
use tokio::fs;
use tokio::io::AsyncReadExt;

#[cfg(not(windows))]
const TICK_SETTINGS: (&str, u64) = ("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ", 80);

#[cfg(windows)]
const TICK_SETTINGS: (&str, u64) = (r"+-x| ", 200);

#[derive(Debug)]
pub enum FileAccessError {
    NotFound(path::PathBuf),
    Unreadable(path::PathBuf, io::Error),
    NotUtf8(path::PathBuf, string::FromUtf8Error),
}

impl std::error::Error for FileAccessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileAccessError::NotFound(_) => None,
            FileAccessError::Unreadable(_, err) => Some(err),
            FileAccessError::NotUtf8(_, err) => Some(err),
        }
    }
}

impl fmt::Display for FileAccessError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FileAccessError::NotFound(path) => write!(f, "File {} not found.", path.display()),
            FileAccessError::Unreadable(path, err) => {
                write!(f, "File {} couldn't be read: {}", path.display(), err)
            }
            FileAccessError::NotUtf8(path, _) => {
                write!(f, "File {} is not valid UTF-8.", path.display())
            }
        }
    }
}

fn access_error(file_name: &path::Path, error: io::Error) -> FileAccessError {
    match error.kind() {
        io::ErrorKind::NotFound => FileAccessError::NotFound(file_name.to_path_buf()),
        _ => FileAccessError::Unreadable(file_name.to_path_buf(), error),
    }
}

pub async fn read_utf8_file(file_name: &path::Path) -> Result<String, FileAccessError> {
    let mut file = fs::File::open(file_name)
        .await
        .map_err(|e| access_error(file_name, e))?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)
        .await
        .map_err(|e| access_error(file_name, e))?;

    String::from_utf8(buffer).map_err(|e| FileAccessError::NotUtf8(file_name.to_path_buf(), e))
}

/// Draws a spinner on stderr until `task` resolves.
pub async fn with_spinner<F, Out>(task: F, running: String) -> Out
where
    F: future::Future<Output = Out>,
{
    let pb = ProgressBar::new_spinner();
    let spinner_style = ProgressStyle::default_spinner()
        .tick_chars(TICK_SETTINGS.0)
        .template(" {spinner:.blue} {msg:<30} ");
    pb.set_style(spinner_style);
    pb.set_message(running);
    pb.enable_steady_tick(TICK_SETTINGS.1);

    let result = task.await;
    pb.finish_and_clear();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::env;

    fn fixture(name: &str) -> path::PathBuf {
        path::Path::new(env!("CARGO_MANIFEST_DIR")).join(name)
    }

    #[tokio::test]
    async fn test_reads_bundled_fixture() {
        let content = read_utf8_file(&fixture("resources/test.txt")).await.unwrap();
        assert_eq!(content, "I love this product");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let missing = fixture("resources/does-not-exist.txt");
        match read_utf8_file(&missing).await {
            Err(FileAccessError::NotFound(path)) => assert_eq!(path, missing),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_utf8() {
        let path = env::temp_dir().join(format!("automl-predict-util-{}.bin", std::process::id()));
        std::fs::write(&path, [0x49u8, 0xff, 0xfe]).unwrap();
        let result = read_utf8_file(&path).await;
        std::fs::remove_file(&path).unwrap();
        match result {
            Err(err @ FileAccessError::NotUtf8(..)) => {
                assert!(err.to_string().ends_with("is not valid UTF-8."))
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_spinner_passes_result_through() {
        let value = with_spinner(async { 41 + 1 }, "Working...".to_owned()).await;
        assert_eq!(value, 42);
    }
}
