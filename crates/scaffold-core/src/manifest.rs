//! Project manifest (`package.json`) loading and transformation
//!
//! The manifest is read once, rewritten in memory, and written back with a
//! single write. Only `main`, `scripts`, the test configuration and the two
//! dependency tables are touched; every other key passes through in its
//! original order, with numbers kept at their written precision.

use crate::config::Variant;
use crate::product::ProductConfig;
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::Path;
use tokio::fs;

pub const DEPENDENCIES: &str = "dependencies";
pub const DEV_DEPENDENCIES: &str = "devDependencies";

/// Parsed project manifest
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectManifest {
    doc: Map<String, Value>,
}

impl ProjectManifest {
    /// Parse a manifest; the document must be a JSON object
    pub fn parse(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content).context("Failed to parse manifest")?;
        match value {
            Value::Object(doc) => Ok(Self { doc }),
            other => anyhow::bail!("Manifest must be a JSON object, found {}", kind_of(&other)),
        }
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid manifest at {}", path.display()))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.doc.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.doc
    }

    pub fn set_main(&mut self, main: impl Into<String>) {
        self.doc.insert("main".to_string(), Value::String(main.into()));
    }

    /// Replace `scripts` wholesale
    pub fn set_scripts<'a, I>(&mut self, scripts: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let scripts: Map<String, Value> = scripts
            .into_iter()
            .map(|(name, cmd)| (name.to_string(), Value::String(cmd.to_string())))
            .collect();
        self.doc.insert("scripts".to_string(), Value::Object(scripts));
    }

    /// Replace the test configuration with `{ "preset": <preset> }`
    pub fn set_test_preset(&mut self, key: &str, preset: &str) {
        let mut config = Map::new();
        config.insert("preset".to_string(), Value::String(preset.to_string()));
        self.doc.insert(key.to_string(), Value::Object(config));
    }

    /// Get a dependency table, creating an empty one if absent or not an object
    pub fn table_mut(&mut self, key: &str) -> &mut Map<String, Value> {
        let entry = self
            .doc
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        match entry {
            Value::Object(map) => map,
            _ => unreachable!("entry was just replaced with an object"),
        }
    }

    /// Merge `defaults` into the table at `key`; defaults win on collision
    pub fn merge_dependencies(&mut self, key: &str, defaults: &[(&str, &str)]) {
        merge_defaults(self.table_mut(key), defaults);
    }

    /// Apply every product rule for `variant`
    pub fn apply<C: ProductConfig>(&mut self, config: &C, variant: Variant) {
        self.set_main(config.entry_file(variant));
        self.set_scripts(config.scripts(variant));
        self.set_test_preset(config.test_config_key(), config.test_preset());
        self.merge_dependencies(DEPENDENCIES, config.default_dependencies());
        self.merge_dependencies(DEV_DEPENDENCIES, config.default_dev_dependencies());
    }

    /// Serialize in document order with 2-space indentation
    ///
    /// Existing keys keep their position; keys the transform adds are appended.
    pub fn to_pretty_string(&self) -> Result<String> {
        let mut out =
            serde_json::to_string_pretty(&self.doc).context("Failed to serialize manifest")?;
        out.push('\n');
        Ok(out)
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_pretty_string()?;
        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}

/// Insert every default into `target`, overwriting keys that already exist
pub fn merge_defaults(target: &mut Map<String, Value>, defaults: &[(&str, &str)]) {
    for (name, version) in defaults {
        target.insert(name.to_string(), Value::String(version.to_string()));
    }
}

/// Load, transform and rewrite the manifest at `path`
pub async fn transform_manifest<C: ProductConfig>(
    config: &C,
    path: &Path,
    variant: Variant,
) -> Result<ProjectManifest> {
    let mut manifest = ProjectManifest::load(path).await?;
    manifest.apply(config, variant);
    manifest.save(path).await?;
    Ok(manifest)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestProduct;
    use serde_json::json;

    fn manifest(value: Value) -> ProjectManifest {
        ProjectManifest::parse(&value.to_string()).unwrap()
    }

    #[test]
    fn test_unrelated_keys_survive() {
        let mut m = manifest(json!({
            "name": "MyApp",
            "version": "0.0.1",
            "private": true,
            "rnpm": { "assets": ["./fonts"] },
            "main": "index.js",
            "scripts": { "custom": "echo hi" }
        }));
        m.apply(&TestProduct, Variant::Standard);

        assert_eq!(m.get("name"), Some(&json!("MyApp")));
        assert_eq!(m.get("version"), Some(&json!("0.0.1")));
        assert_eq!(m.get("private"), Some(&json!(true)));
        assert_eq!(m.get("rnpm"), Some(&json!({ "assets": ["./fonts"] })));
    }

    #[test]
    fn test_owned_fields_replaced() {
        let mut m = manifest(json!({
            "main": "index.js",
            "scripts": { "custom": "echo hi" },
            "jest": { "preset": "react-native", "verbose": true }
        }));
        m.apply(&TestProduct, Variant::Standard);

        assert_eq!(m.get("main"), Some(&json!("./entry.js")));
        assert_eq!(m.get("scripts"), Some(&json!({ "start": "tool start", "test": "jest" })));
        assert_eq!(m.get("jest"), Some(&json!({ "preset": "test-preset" })));
    }

    #[test]
    fn test_extended_variant_switches_entry_and_adds_scripts() {
        let mut m = manifest(json!({}));
        m.apply(&TestProduct, Variant::ExtendedSupport);

        assert_eq!(m.get("main"), Some(&json!("./entry-web.js")));
        let scripts = m.get("scripts").unwrap().as_object().unwrap();
        assert!(scripts.contains_key("start"));
        assert!(scripts.contains_key("web"));
        assert!(scripts.contains_key("build"));
    }

    #[test]
    fn test_merge_default_wins_user_only_kept() {
        let mut m = manifest(json!({
            "dependencies": { "react": "15.0.0", "lodash": "4.17.0" },
            "devDependencies": { "tool": "1.0.0" }
        }));
        m.apply(&TestProduct, Variant::Standard);

        assert_eq!(
            m.get("dependencies"),
            Some(&json!({ "react": "16.4.0", "lodash": "4.17.0", "react-native": "0.55.4" }))
        );
        assert_eq!(
            m.get("devDependencies"),
            Some(&json!({ "tool": "1.0.0", "jest": "23.0.0" }))
        );
    }

    #[test]
    fn test_missing_or_null_tables_created() {
        let mut m = manifest(json!({ "dependencies": null }));
        m.apply(&TestProduct, Variant::Standard);

        assert!(m.get("dependencies").unwrap().is_object());
        assert_eq!(m.get("devDependencies"), Some(&json!({ "jest": "23.0.0" })));
    }

    #[test]
    fn test_non_object_manifest_rejected() {
        assert!(ProjectManifest::parse("[1, 2]").is_err());
        assert!(ProjectManifest::parse("{ not json").is_err());
    }

    #[test]
    fn test_unrelated_fields_keep_order_and_precision() {
        let mut m = ProjectManifest::parse(
            r#"{"name":"MyApp","rnpm":{"zeta":1,"assets":["./fonts"]},"big":12345678901234567890123,"main":"old.js"}"#,
        )
        .unwrap();
        m.apply(&TestProduct, Variant::Standard);

        let out = m.to_pretty_string().unwrap();
        assert!(out.contains(
            "  \"rnpm\": {\n    \"zeta\": 1,\n    \"assets\": [\n      \"./fonts\"\n    ]\n  },\n  \"big\": 12345678901234567890123,\n  \"main\": \"./entry.js\",\n"
        ));
        assert!(out.starts_with("{\n  \"name\": \"MyApp\",\n"));
        assert!(out.ends_with("}\n"));

        let keys: Vec<_> = m.as_map().keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            ["name", "rnpm", "big", "main", "scripts", "jest", "dependencies", "devDependencies"]
        );
    }

    #[tokio::test]
    async fn test_transform_rewrites_file_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("package.json");
        std::fs::write(&path, r#"{"name":"MyApp","devDependencies":{"jest":"1.0.0"}}"#).unwrap();

        transform_manifest(&TestProduct, &path, Variant::Standard)
            .await
            .unwrap();

        let written: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["name"], json!("MyApp"));
        assert_eq!(written["devDependencies"]["jest"], json!("23.0.0"));
    }

    #[tokio::test]
    async fn test_malformed_manifest_left_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("package.json");
        std::fs::write(&path, "{ broken").unwrap();

        assert!(transform_manifest(&TestProduct, &path, Variant::Standard)
            .await
            .is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ broken");
    }
}
