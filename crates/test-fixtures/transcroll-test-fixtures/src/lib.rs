use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

pub mod fake;

pub use fake::{FakeScheduler, FakeSurface};

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    layouts: HashMap<String, String>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

/// Per-axis pair as written in layout fixtures.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct AxisPair {
    pub x: f64,
    pub y: f64,
}

/// One positioned node of a layout.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeSpec {
    pub id: String,
    /// Selectors this node answers to; first declared node wins on overlap.
    #[serde(default)]
    pub selectors: Vec<String>,
    /// Offset relative to `parent`.
    pub offset: AxisPair,
    /// Offset parent id; `None` for the root.
    pub parent: Option<String>,
}

/// Page layout: a scroll container and the nodes around it.
#[derive(Debug, Clone, Deserialize)]
pub struct Layout {
    pub name: String,
    /// Container node id; `None` means the viewport scrolls.
    pub container: Option<String>,
    pub scroll_size: AxisPair,
    pub client_size: AxisPair,
    pub nodes: Vec<NodeSpec>,
}

impl Layout {
    pub fn node(&self, id: &str) -> Option<&NodeSpec> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

pub mod layouts {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.layouts.keys().cloned().collect()
    }

    pub fn load(name: &str) -> Result<Layout> {
        let rel = lookup(&MANIFEST.layouts, "layout", name)?;
        load_json(rel)
    }
}
