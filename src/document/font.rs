//! Font resource for the PDF renderer.
//!
//! The built-in PDF fonts cover Latin-1 only, so Cyrillic translations and IPA
//! transcriptions need a TrueType font. It is downloaded once into the cache
//! directory and kept in memory after the first load.

use anyhow::{Context, Result, bail};
use printpdf::BuiltinFont;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::fs::atomic_write_async;

pub const DEFAULT_FONT_URL: &str =
    "https://github.com/dejavu-fonts/dejavu-fonts/raw/master/ttf/DejaVuSans.ttf";
pub const FONT_FILE_NAME: &str = "DejaVuSans.ttf";

/// A font ready to be embedded.
#[derive(Debug, Clone)]
pub enum Font {
    Builtin(BuiltinFont),
    TrueType(Arc<[u8]>),
}

#[derive(Debug, Clone)]
enum FontSource {
    Builtin(BuiltinFont),
    Cached { path: PathBuf, url: String },
}

/// Lazily resolves the font used for rendering.
pub struct FontStore {
    source: FontSource,
    client: reqwest::Client,
    loaded: Option<Font>,
}

impl FontStore {
    /// A store that serves a built-in PDF font without any I/O.
    pub fn builtin(font: BuiltinFont) -> Self {
        Self {
            source: FontSource::Builtin(font),
            client: reqwest::Client::new(),
            loaded: None,
        }
    }

    /// A store backed by `path`, downloading from `url` when the file is missing.
    pub fn cached(path: PathBuf, url: String) -> Self {
        Self {
            source: FontSource::Cached { path, url },
            client: reqwest::Client::new(),
            loaded: None,
        }
    }

    /// Returns the font, fetching and loading it on first use.
    ///
    /// A failed attempt is not remembered, so the next export tries again.
    pub async fn font(&mut self) -> Result<Font> {
        if let Some(font) = &self.loaded {
            return Ok(font.clone());
        }

        let font = match &self.source {
            FontSource::Builtin(builtin) => Font::Builtin(*builtin),
            FontSource::Cached { path, url } => {
                let bytes = self.load_or_download(path, url).await?;
                Font::TrueType(Arc::from(bytes))
            }
        };

        self.loaded = Some(font.clone());
        Ok(font)
    }

    async fn load_or_download(&self, path: &Path, url: &str) -> Result<Vec<u8>> {
        if path.exists() {
            return tokio::fs::read(path)
                .await
                .with_context(|| format!("Failed to read font file: {}", path.display()));
        }

        tracing::info!(url, path = %path.display(), "downloading font");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to download font from {url}"))?;

        if !response.status().is_success() {
            let status = response.status();
            bail!("Font download failed with status {status}: {url}");
        }

        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("Failed to download font from {url}"))?;

        if !looks_like_font(&bytes) {
            bail!("Downloaded file is not a TrueType/OpenType font: {url}");
        }

        let bytes = bytes.to_vec();
        atomic_write_async(path.to_path_buf(), bytes.clone()).await?;
        Ok(bytes)
    }
}

/// Checks the sfnt version tag at the start of the file.
fn looks_like_font(bytes: &[u8]) -> bool {
    const TAGS: [&[u8]; 4] = [&[0x00, 0x01, 0x00, 0x00], b"true", b"OTTO", b"ttcf"];
    TAGS.iter().any(|tag| bytes.starts_with(tag))
}
