use anyhow::{Context, Result, bail};
use std::fs;
use std::io::{self, Read};

const MAX_INPUT_SIZE: usize = 256 * 1024;

pub struct InputReader;

impl InputReader {
    /// Reads a word list from `file_path`, or from stdin when `None`.
    pub fn read(file_path: Option<&str>) -> Result<String> {
        file_path.map_or_else(Self::read_stdin, Self::read_file)
    }

    fn read_file(path: &str) -> Result<String> {
        let metadata =
            fs::metadata(path).with_context(|| format!("Failed to access word list: {path}"))?;

        let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if size > MAX_INPUT_SIZE {
            bail!(too_large(size));
        }

        fs::read_to_string(path).with_context(|| format!("Failed to read word list: {path}"))
    }

    #[allow(clippy::significant_drop_tightening)]
    fn read_stdin() -> Result<String> {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 8192];
        let mut stdin = io::stdin().lock();

        loop {
            let bytes_read = stdin
                .read(&mut chunk)
                .context("Failed to read from stdin")?;

            if bytes_read == 0 {
                break;
            }

            buffer.extend_from_slice(&chunk[..bytes_read]);

            if buffer.len() > MAX_INPUT_SIZE {
                bail!(too_large(buffer.len()));
            }
        }

        String::from_utf8(buffer).context("Word list is not valid UTF-8")
    }
}

fn too_large(size: usize) -> String {
    format!(
        "Word list is too large ({} KB, limit {} KB)",
        size / 1024,
        MAX_INPUT_SIZE / 1024
    )
}

/// One word or phrase per line, trimmed. Blank lines and `#` comments are skipped.
pub fn parse_words(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ToString::to_string)
        .collect()
}
