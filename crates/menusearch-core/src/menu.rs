//! Normalisation of menu JSON into a flat list of [`MenuItem`]s.
//!
//! Content sources deliver menus either as a flat array of item records or
//! as an object keyed by category (`{"starters": [...], "mains": [...]}`),
//! sometimes wrapped in a top-level `"menu"` key. Items without their own
//! `category` inherit the key they were listed under.

use anyhow::Context;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::types::MenuItem;

/// Flatten a menu document into items. Records that are not objects are
/// skipped; validation of ids and names is left to the index.
pub fn flatten_menu(value: &Value) -> Result<Vec<MenuItem>> {
    match value {
        Value::Null => Err(Error::InvalidMenuData("menu data is absent".into())),
        Value::Array(entries) => Ok(parse_entries(entries, None)),
        Value::Object(map) => {
            if map.len() == 1 {
                if let Some(inner) = map.get("menu") {
                    return flatten_menu(inner);
                }
            }
            let mut items = Vec::new();
            let mut saw_list = false;
            for (category, entries) in map {
                match entries {
                    Value::Array(entries) => {
                        saw_list = true;
                        items.extend(parse_entries(entries, Some(category.as_str())));
                    }
                    _ => debug!(category = %category, "ignoring non-list menu section"),
                }
            }
            if !saw_list {
                return Err(Error::InvalidMenuData("expected a list of items or an object of category lists".into()));
            }
            Ok(items)
        }
        other => Err(Error::InvalidMenuData(format!("expected a list of items, got {}", json_kind(other)))),
    }
}

fn parse_entries(entries: &[Value], category: Option<&str>) -> Vec<MenuItem> {
    let mut items = Vec::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        match MenuItem::deserialize(entry) {
            Ok(mut item) => {
                if let Some(category) = category {
                    if item.category.trim().is_empty() {
                        item.category = category.to_string();
                    }
                }
                items.push(item);
            }
            Err(e) => debug!(position = i, error = %e, "skipping malformed menu record"),
        }
    }
    items
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Reads menu JSON from static files, the fallback used when no live
/// content source is available.
#[derive(Debug, Default)]
pub struct MenuLoader;

impl MenuLoader {
    pub fn new() -> Self { Self }

    pub fn load_file(&self, path: &Path) -> anyhow::Result<Vec<MenuItem>> {
        let raw = fs::read_to_string(path).with_context(|| format!("reading menu file {}", path.display()))?;
        let value: Value = serde_json::from_str(&raw).with_context(|| format!("parsing menu file {}", path.display()))?;
        let items = flatten_menu(&value).with_context(|| format!("flattening menu file {}", path.display()))?;
        debug!(path = %path.display(), items = items.len(), "loaded menu file");
        Ok(items)
    }

    /// Load every `*.json` file under `dir`, in path order.
    pub fn load_dir(&self, dir: &Path) -> anyhow::Result<Vec<MenuItem>> {
        let files = self.list_json_files(dir);
        if files.is_empty() {
            info!(dir = %dir.display(), "no menu files found");
            return Ok(vec![]);
        }
        let mut all_items = Vec::new();
        for file in &files {
            all_items.extend(self.load_file(file)?);
        }
        info!(files = files.len(), items = all_items.len(), dir = %dir.display(), "loaded menu directory");
        Ok(all_items)
    }

    fn list_json_files(&self, root: &Path) -> Vec<PathBuf> {
        let mut json_files: Vec<PathBuf> = walkdir::WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("json"))
            .collect();
        json_files.sort();
        json_files
    }
}
