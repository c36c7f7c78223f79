use std::path::Path;

use anyhow::{Context, Result};
use tokio::fs;

use crate::error::LocatorError;
use crate::models::locator_table::LocatorTable;

/// 从 TOML 文本解析定位表并校验
pub fn parse_locator_table(content: &str, source: &str) -> Result<LocatorTable, LocatorError> {
    let table: LocatorTable =
        toml::from_str(content).map_err(|source_err| LocatorError::ParseFailed {
            path: source.to_string(),
            source: source_err,
        })?;
    table.validate()?;
    Ok(table)
}

/// 从 TOML 文件加载定位表
pub async fn load_locator_table(path: &Path) -> Result<LocatorTable, LocatorError> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|source| LocatorError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;

    parse_locator_table(&content, &path.display().to_string())
}

/// 加载定位表：有覆盖文件时使用文件，否则使用内置默认值
pub async fn resolve_locator_table(locator_file: Option<&str>) -> Result<LocatorTable> {
    match locator_file {
        Some(path) => {
            let table = load_locator_table(Path::new(path))
                .await
                .with_context(|| format!("无法加载定位文件: {}", path))?;
            tracing::info!("✓ 已从 {} 加载定位表", path);
            Ok(table)
        }
        None => {
            tracing::debug!("使用内置定位表");
            Ok(LocatorTable::builtin())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::locator::{Locator, Variant};

    const SAMPLE: &str = r##"
confirmation = { css = "div.alert strong" }

[before]
field1 = { css = "#f1" }
field2 = { css = "#f2" }
field3 = { css = "#f3" }
submit = { xpath = "//form[1]//button" }

[after]
field1 = { css = "#g1" }
field2 = { css = "#g2" }
field3 = { css = "#g3" }
submit = { xpath = "//form[2]//button" }
"##;

    #[test]
    fn test_parse_locator_table() {
        let table = parse_locator_table(SAMPLE, "sample.toml").unwrap();
        assert_eq!(table.get(Variant::Before).field1, Locator::css("#f1"));
        assert_eq!(
            table.get(Variant::After).submit,
            Locator::xpath("//form[2]//button")
        );
        assert_eq!(table.confirmation(), &Locator::css("div.alert strong"));
    }

    #[test]
    fn test_parse_rejects_incomplete_table() {
        let incomplete = SAMPLE.replace("field3 = { css = \"#g3\" }", "");
        let err = parse_locator_table(&incomplete, "sample.toml").unwrap_err();
        assert!(matches!(err, LocatorError::ParseFailed { .. }));

        let blank = SAMPLE.replace("#g3", "");
        let err = parse_locator_table(&blank, "sample.toml").unwrap_err();
        assert!(matches!(err, LocatorError::EmptyExpression { .. }));
    }

    #[tokio::test]
    async fn test_resolve_without_file_uses_builtin() {
        let table = resolve_locator_table(None).await.unwrap();
        assert_eq!(table, LocatorTable::builtin());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locators.toml");
        std::fs::write(&path, SAMPLE).unwrap();

        let table = load_locator_table(&path).await.unwrap();
        assert_eq!(table.get(Variant::After).field1, Locator::css("#g1"));

        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            load_locator_table(&missing).await,
            Err(LocatorError::ReadFailed { .. })
        ));
    }
}
