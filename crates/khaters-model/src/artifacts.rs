//! Artifact sources: where the exported model files come from.
//!
//! The trainer exports ten files into one directory: `meta.json`,
//! `vocab.json`, and eight flat little-endian float32 blobs. A source only
//! knows how to hand back raw bytes by file name; parsing and shape checks
//! happen in the loader.

use std::path::PathBuf;

/// File names written by the training exporter.
pub mod names {
    pub const META: &str = "meta.json";
    pub const VOCAB: &str = "vocab.json";
    pub const W_OFF: &str = "W_off.f32.bin";
    pub const B_OFF: &str = "b_off.f32.bin";
    pub const W_TARGET: &str = "W_target.f32.bin";
    pub const B_TARGET: &str = "b_target.f32.bin";
    pub const W_FINE: &str = "W_fine.f32.bin";
    pub const B_FINE: &str = "b_fine.f32.bin";
    pub const W_LABEL: &str = "W_label.f32.bin";
    pub const B_LABEL: &str = "b_label.f32.bin";
}

/// Capability to retrieve a named model artifact as raw bytes.
///
/// Abstracting the transport keeps the loader testable with in-memory
/// fixtures and lets the same code load from disk or HTTP.
pub trait ArtifactSource: Sync {
    fn fetch(&self, name: &str) -> impl Future<Output = anyhow::Result<Vec<u8>>> + Send;
}

/// Artifact source backed by a local model directory.
#[derive(Debug, Clone)]
pub struct DirSource {
    dir: PathBuf,
}

impl DirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ArtifactSource for DirSource {
    async fn fetch(&self, name: &str) -> anyhow::Result<Vec<u8>> {
        let path = self.dir.join(name);
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| anyhow::anyhow!("read {}: {e}", path.display()))?;
        Ok(bytes)
    }
}
