//! V2 victim profile and manifest models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::common::{ResponseMeta, V2SearchMeta};

/// One infected-device profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct V2VictimResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub device_users: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hwids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub device_ips: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub device_emails: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub discord_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_docs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pwned_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexed_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A page of victim profiles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct V2VictimsData {
    #[serde(default)]
    pub items: Vec<V2VictimResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<V2SearchMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    #[serde(rename = "_meta", default, skip_serializing_if = "Option::is_none")]
    pub response_meta: Option<ResponseMeta>,
}

impl V2VictimsData {
    /// Distinct log ids on this page, in first-seen order.
    pub fn log_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        for id in self.items.iter().filter_map(|i| i.log_id.as_ref()) {
            if !ids.contains(id) {
                ids.push(id.clone());
            }
        }
        ids
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestNodeKind {
    File,
    Directory,
}

/// A node of a victim's file tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VictimManifestNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ManifestNodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<VictimManifestNode>,
}

/// A file found while walking a manifest tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestFile<'a> {
    pub id: &'a str,
    pub path: String,
    pub size_bytes: Option<u64>,
}

impl VictimManifestNode {
    /// All files below this node, depth first, with `/`-joined paths.
    pub fn files(&self) -> Vec<ManifestFile<'_>> {
        let mut out = Vec::new();
        self.collect_files("", &mut out);
        out
    }

    fn collect_files<'a>(&'a self, prefix: &str, out: &mut Vec<ManifestFile<'a>>) {
        let path = if prefix.is_empty() {
            self.name.clone()
        } else {
            format!("{prefix}/{}", self.name)
        };
        match self.kind {
            ManifestNodeKind::File => out.push(ManifestFile {
                id: &self.id,
                path,
                size_bytes: self.size_bytes,
            }),
            ManifestNodeKind::Directory => {
                for child in &self.children {
                    child.collect_files(&path, out);
                }
            }
        }
    }

    /// Sum of known file sizes below this node.
    pub fn total_size(&self) -> u64 {
        self.files().iter().filter_map(|f| f.size_bytes).sum()
    }
}

/// Manifest of one victim log bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VictimManifest {
    pub log_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_name: Option<String>,
    pub victim_tree: VictimManifestNode,
    #[serde(rename = "_meta", default, skip_serializing_if = "Option::is_none")]
    pub response_meta: Option<ResponseMeta>,
}
