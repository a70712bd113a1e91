//! Post-generation reconciliation
//!
//! Generators and the template both claim some filenames. The template wins:
//! generator copies are deleted and the template is laid down again, then an
//! optional project-name placeholder is substituted.

use crate::config::ScaffoldOptions;
use crate::product::{Placeholder, ProductConfig};
use crate::templates::{self, Materialized};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// What the reconciler changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    /// Superseded generator files that existed and were deleted
    pub removed: Vec<PathBuf>,
    /// Template files laid down again over the generator output
    pub materialized: Materialized,
    /// Number of placeholder occurrences replaced
    pub replacements: usize,
}

/// Delete each listed file that exists under `target_dir`
pub async fn remove_superseded(target_dir: &Path, files: &[&str]) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();
    for file in files {
        let path = target_dir.join(file);
        if fs::try_exists(&path).await.unwrap_or(false) {
            fs::remove_file(&path)
                .await
                .with_context(|| format!("Failed to remove {}", path.display()))?;
            removed.push(PathBuf::from(file));
        }
    }
    Ok(removed)
}

/// Replace every occurrence of `token` in `content`
pub fn substitute(content: &str, token: &str, project_name: &str) -> (String, usize) {
    if token.is_empty() {
        return (content.to_string(), 0);
    }
    let count = content.matches(token).count();
    (content.replace(token, project_name), count)
}

/// Rewrite the placeholder file in place
///
/// A missing file is an error: the placeholder is only configured for files
/// the pipeline guarantees to exist.
pub async fn resolve_placeholder(
    target_dir: &Path,
    placeholder: Placeholder,
    project_name: &str,
) -> Result<usize> {
    let path = target_dir.join(placeholder.file);
    let content = fs::read_to_string(&path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let (resolved, count) = substitute(&content, placeholder.token, project_name);
    if count > 0 {
        fs::write(&path, resolved)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(count)
}

/// Run the reconciler over generator output
pub async fn reconcile<C: ProductConfig>(config: &C, options: &ScaffoldOptions) -> Result<Reconciled> {
    let removed = remove_superseded(&options.target_dir, config.superseded_files()).await?;

    let template_dir = options.template_dir(config);
    let materialized = templates::materialize(config, &template_dir, &options.target_dir).await?;

    let replacements = match config.placeholder() {
        Some(placeholder) => {
            resolve_placeholder(&options.target_dir, placeholder, &options.project_name).await?
        }
        None => 0,
    };

    Ok(Reconciled {
        removed,
        materialized,
        replacements,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestProduct;

    #[test]
    fn test_substitute_replaces_every_occurrence() {
        let content = "AppRegistry.registerComponent('__APP_NAME__', () => App);\n// __APP_NAME__\n";
        let (out, count) = substitute(content, "__APP_NAME__", "MyApp");

        assert_eq!(count, 2);
        assert_eq!(
            out,
            "AppRegistry.registerComponent('MyApp', () => App);\n// MyApp\n"
        );
    }

    #[test]
    fn test_substitute_leaves_other_content_alone() {
        let content = "const x = 1;\r\n\tunicode: é\n";
        let (out, count) = substitute(content, "__APP_NAME__", "MyApp");
        assert_eq!(count, 0);
        assert_eq!(out, content);

        let (out, count) = substitute(content, "", "MyApp");
        assert_eq!(count, 0);
        assert_eq!(out, content);
    }

    #[tokio::test]
    async fn test_remove_superseded_skips_missing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("App.js"), "generated").unwrap();

        let removed = remove_superseded(dir.path(), &["App.js", "App.windows.js"])
            .await
            .unwrap();

        assert_eq!(removed, vec![PathBuf::from("App.js")]);
        assert!(!dir.path().join("App.js").exists());
    }

    #[tokio::test]
    async fn test_resolve_placeholder_in_place() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.js"), "register('__APP_NAME__');").unwrap();
        let placeholder = Placeholder {
            file: "index.js",
            token: "__APP_NAME__",
        };

        let count = resolve_placeholder(dir.path(), placeholder, "MyApp")
            .await
            .unwrap();

        assert_eq!(count, 1);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("index.js")).unwrap(),
            "register('MyApp');"
        );

        // Nothing left to replace on a second pass
        let again = resolve_placeholder(dir.path(), placeholder, "MyApp")
            .await
            .unwrap();
        assert_eq!(again, 0);
    }

    #[tokio::test]
    async fn test_reconcile_restores_template_over_generator_output() {
        let root = tempfile::tempdir().unwrap();
        let template = root.path().join("template");
        std::fs::create_dir_all(&template).unwrap();
        std::fs::write(template.join("App.js"), "template app").unwrap();

        let target = root.path().join("MyApp");
        std::fs::create_dir_all(&target).unwrap();
        std::fs::write(target.join("App.js"), "generated app").unwrap();
        std::fs::write(target.join("App.windows.js"), "generated windows").unwrap();

        let options = ScaffoldOptions::new(
            &TestProduct,
            target.clone(),
            Some("MyApp".to_string()),
            Some(root.path().to_path_buf()),
        );

        let reconciled = reconcile(&TestProduct, &options).await.unwrap();

        assert_eq!(
            reconciled.removed,
            vec![PathBuf::from("App.js"), PathBuf::from("App.windows.js")]
        );
        assert!(reconciled.materialized.files.contains(&PathBuf::from("App.js")));
        assert_eq!(reconciled.replacements, 0);
        assert_eq!(
            std::fs::read_to_string(target.join("App.js")).unwrap(),
            "template app"
        );
        assert!(!target.join("App.windows.js").exists());
    }
}
