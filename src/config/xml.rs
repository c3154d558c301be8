//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Unknown fields are rejected so typos surface instead of being ignored.
//!
//! Notes:
//! - This module only reads the config file; root validation happens in `validate`.
//! - Every field is optional; anything left out keeps its default (or the CLI value).

use anyhow::{Context, Result, bail};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::CONFIG_ENV;
use super::paths::default_config_path;
use super::types::{Config, LogLevel};

/// Example file printed by `--print-config`.
pub const CONFIG_TEMPLATE: &str = "<config>
  <source>/path/to/source</source>
  <output>/path/to/output</output>
  <log_level>normal</log_level>
  <log_file>/path/to/file_sorter.log</log_file>
  <jobs>1</jobs>
  <sync>false</sync>
</config>
";

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    source: Option<String>,
    output: Option<String>,
    log_level: Option<String>,
    log_file: Option<String>,
    #[serde(default, deserialize_with = "de_usize_trimmed_opt")]
    jobs: Option<usize>,
    dry_run: Option<bool>,
    sync: Option<bool>,
}

// Numbers may come with surrounding whitespace from hand-edited files.
fn de_usize_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<usize>()
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("invalid jobs value '{s}': {e}"))),
    }
}

fn non_empty_path(s: Option<&str>) -> Option<PathBuf> {
    s.map(str::trim).filter(|s| !s.is_empty()).map(PathBuf::from)
}

// Map XmlConfig -> Config
fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(p) = non_empty_path(parsed.source.as_deref()) {
        cfg.source = p;
    }
    if let Some(p) = non_empty_path(parsed.output.as_deref()) {
        cfg.output = p;
    }
    cfg.log_file = non_empty_path(parsed.log_file.as_deref());

    if let Some(s) = parsed.log_level.as_deref() {
        cfg.log_level = s.parse::<LogLevel>().map_err(anyhow::Error::msg)?;
    }
    if let Some(jobs) = parsed.jobs {
        if jobs == 0 {
            bail!("jobs must be at least 1");
        }
        cfg.jobs = jobs;
    }
    cfg.dry_run = parsed.dry_run.unwrap_or(false);
    cfg.sync = parsed.sync.unwrap_or(false);

    Ok(cfg)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed).with_context(|| format!("invalid config xml '{}'", path.display()))
}

/// Load the config file if there is one.
///
/// Returns `Ok(None)` when the default location has no file. A file named by
/// `$FILE_SORTER_CONFIG` must exist.
pub fn load_config() -> Result<Option<Config>> {
    let Some(path) = default_config_path() else {
        return Ok(None);
    };
    if !path.exists() {
        if env::var_os(CONFIG_ENV).is_some() {
            bail!("{CONFIG_ENV} points to a missing file: {}", path.display());
        }
        return Ok(None);
    }
    load_config_from_xml_path(&path).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(dir: &Path, body: &str) -> PathBuf {
        let p = dir.join("config.xml");
        fs::write(&p, body).unwrap();
        p
    }

    #[test]
    fn reads_all_fields() {
        let dir = tempdir().unwrap();
        let p = write(
            dir.path(),
            "<config>\n  <source> /data/in </source>\n  <output>/data/out</output>\n  <log_level>debug</log_level>\n  <log_file>/tmp/fs.log</log_file>\n  <jobs> 4 </jobs>\n  <sync>true</sync>\n</config>",
        );
        let cfg = load_config_from_xml_path(&p).unwrap();
        assert_eq!(cfg.source, PathBuf::from("/data/in"));
        assert_eq!(cfg.output, PathBuf::from("/data/out"));
        assert_eq!(cfg.log_level, LogLevel::Debug);
        assert_eq!(cfg.log_file, Some(PathBuf::from("/tmp/fs.log")));
        assert_eq!(cfg.jobs, 4);
        assert!(cfg.sync);
        assert!(!cfg.dry_run);
    }

    #[test]
    fn missing_fields_keep_defaults() {
        let dir = tempdir().unwrap();
        let p = write(dir.path(), "<config><log_file></log_file></config>");
        let cfg = load_config_from_xml_path(&p).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn template_parses() {
        let dir = tempdir().unwrap();
        let p = write(dir.path(), CONFIG_TEMPLATE);
        let cfg = load_config_from_xml_path(&p).unwrap();
        assert_eq!(cfg.source, PathBuf::from("/path/to/source"));
        assert_eq!(cfg.jobs, 1);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let dir = tempdir().unwrap();
        let p = write(dir.path(), "<config><sauce>/x</sauce></config>");
        let err = load_config_from_xml_path(&p).unwrap_err();
        assert!(format!("{err:#}").contains("unknown field"), "{err:#}");
    }

    #[test]
    fn bad_values_are_rejected() {
        let dir = tempdir().unwrap();
        let p = write(dir.path(), "<config><jobs>0</jobs></config>");
        assert!(load_config_from_xml_path(&p).is_err());
        let p = write(dir.path(), "<config><log_level>loud</log_level></config>");
        assert!(load_config_from_xml_path(&p).is_err());
    }
}
