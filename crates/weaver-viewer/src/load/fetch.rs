use anyhow::{Context, Result};
use crossbeam_channel::Sender;
use std::path::PathBuf;
use std::time::Duration;
use weaver_core::RawNode;

use crate::load::Loaded;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Http(String),
    File(PathBuf),
}

impl Source {
    /// `None` for a blank source: there is nothing to load yet.
    pub fn parse(source: &str) -> Option<Self> {
        let s = source.trim();
        if s.is_empty() {
            return None;
        }
        if s.starts_with("http://") || s.starts_with("https://") {
            return Some(Self::Http(s.to_string()));
        }
        let path = s.strip_prefix("file://").unwrap_or(s);
        Some(Self::File(PathBuf::from(path)))
    }
}

/// Starts loading `source` on a background thread. The result arrives on `tx`
/// tagged with `generation`. Returns false when there is nothing to load.
pub fn spawn_loader(source: String, generation: u64, timeout: Duration, tx: Sender<Loaded>) -> bool {
    let Some(parsed) = Source::parse(&source) else {
        return false;
    };

    tracing::info!(%source, generation, "loading galaxy document");
    let thread_tx = tx.clone();
    let thread_source = source.clone();
    let spawned = std::thread::Builder::new()
        .name("weaver-loader".into())
        .spawn(move || {
            let msg = match run(&parsed, timeout) {
                Ok(nodes) => Loaded::nodes(thread_source, generation, nodes),
                Err(e) => Loaded::failed(thread_source, generation, format!("{e:#}")),
            };
            // receiver is gone once the viewer shut down
            let _ = thread_tx.send(msg);
        });

    if let Err(e) = spawned {
        let _ = tx.send(Loaded::failed(source, generation, format!("spawn loader thread: {e}")));
    }
    true
}

fn run(source: &Source, timeout: Duration) -> Result<Vec<RawNode>> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("build tokio runtime")?;
    rt.block_on(load(source, timeout))
}

pub async fn load(source: &Source, timeout: Duration) -> Result<Vec<RawNode>> {
    tokio::time::timeout(timeout, fetch(source))
        .await
        .with_context(|| format!("timed out after {}s", timeout.as_secs_f32()))?
}

async fn fetch(source: &Source) -> Result<Vec<RawNode>> {
    let bytes = match source {
        Source::Http(url) => {
            let resp = reqwest::get(url)
                .await
                .with_context(|| format!("GET {url}"))?
                .error_for_status()
                .with_context(|| format!("GET {url}"))?;
            resp.bytes()
                .await
                .with_context(|| format!("read body of {url}"))?
                .to_vec()
        }
        Source::File(path) => tokio::fs::read(path)
            .await
            .with_context(|| format!("read {}", path.display()))?,
    };
    let nodes = weaver_core::parse_document(&bytes)?;
    Ok(nodes)
}
