use crate::{ConfigError, Result, TagConfig};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names, most preferred first
const CONFIG_FILES: &[&str] = &[
    "graphql-tag.config.yml",
    "graphql-tag.config.yaml",
    "graphql-tag.config.json",
    ".gqltagrc",
];

const RC_FILE: &str = ".gqltagrc";

/// Syntax of a config file, decided by its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Yaml,
    Json,
    /// The rc file: YAML, with JSON as a fallback
    Rc,
}

impl ConfigFormat {
    fn detect(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yml" | "yaml") => Some(Self::Yaml),
            Some("json") => Some(Self::Json),
            None if path.file_name().is_some_and(|name| name == RC_FILE) => Some(Self::Rc),
            _ => None,
        }
    }

    fn parse(self, contents: &str, path: &Path) -> Result<TagConfig> {
        match self {
            Self::Yaml => parse_yaml(contents, path),
            Self::Json => parse_json(contents, path),
            Self::Rc => parse_yaml(contents, path).or_else(|yaml_error| {
                tracing::trace!(%yaml_error, "rc file is not YAML, trying JSON");
                parse_json(contents, path)
            }),
        }
    }
}

/// Find the nearest config file in `start_dir` or any of its ancestors.
#[tracing::instrument(fields(start = %start_dir.display()))]
pub fn find_config(start_dir: &Path) -> Result<Option<PathBuf>> {
    let found = start_dir.ancestors().find_map(|dir| {
        CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    });

    match &found {
        Some(path) => tracing::info!(path = %path.display(), "Found config file"),
        None => tracing::debug!("No config file found"),
    }
    Ok(found)
}

/// Read and check the config file at `path`.
#[tracing::instrument(fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Result<TagConfig> {
    let contents = fs::read_to_string(path)?;
    let config = load_config_from_str(&contents, path)?;
    tracing::info!("Config loaded");
    Ok(config)
}

/// Parse config `contents`, using `path` to pick the format and label errors.
///
/// The result has already been through [`TagConfig::into_options`], so
/// misconfiguration surfaces here rather than on first use.
#[tracing::instrument(skip(contents), fields(path = %path.display(), size = contents.len()))]
pub fn load_config_from_str(contents: &str, path: &Path) -> Result<TagConfig> {
    let format = ConfigFormat::detect(path)
        .ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;
    tracing::debug!(?format, "Parsing config");

    let config = format.parse(contents, path)?;
    config.clone().into_options()?;
    Ok(config)
}

fn parse_yaml(contents: &str, path: &Path) -> Result<TagConfig> {
    // serde_yaml reads an empty document as unit rather than an empty map
    if contents.trim().is_empty() {
        return Ok(TagConfig::default());
    }
    serde_yaml::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("YAML parse error: {e}"),
    })
}

fn parse_json(contents: &str, path: &Path) -> Result<TagConfig> {
    serde_json::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("JSON parse error: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_detect_format() {
        assert_eq!(
            ConfigFormat::detect(Path::new("graphql-tag.config.yaml")),
            Some(ConfigFormat::Yaml)
        );
        assert_eq!(
            ConfigFormat::detect(Path::new("conf/tags.json")),
            Some(ConfigFormat::Json)
        );
        assert_eq!(
            ConfigFormat::detect(Path::new("/repo/.gqltagrc")),
            Some(ConfigFormat::Rc)
        );
        assert_eq!(ConfigFormat::detect(Path::new("graphql-tag.config.toml")), None);
        assert_eq!(ConfigFormat::detect(Path::new("Makefile")), None);
    }

    #[test]
    fn test_load_yaml_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("graphql-tag.config.yml");
        fs::write(
            &path,
            "stripComments: false\ntransform: collapseWhitespace\ntags: [gql, graphql]\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.strip_comments, Some(false));
        assert_eq!(config.transform.as_deref(), Some("collapseWhitespace"));
        assert_eq!(
            config.tags,
            Some(vec!["gql".to_string(), "graphql".to_string()])
        );
    }

    #[test]
    fn test_load_json_str() {
        let config = load_config_from_str(
            r#"{ "validate": false, "extensions": ["graphql"] }"#,
            Path::new("graphql-tag.config.json"),
        )
        .unwrap();
        assert_eq!(config.validate, Some(false));
        assert_eq!(config.extensions, Some(vec!["graphql".to_string()]));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let result = load_config(&dir.path().join("graphql-tag.config.yml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = load_config_from_str("\n", Path::new("graphql-tag.config.yml")).unwrap();
        assert_eq!(config, TagConfig::default());
    }

    #[test]
    fn test_misconfiguration_is_rejected_on_load() {
        let unknown_field = load_config_from_str("stripComment: true", Path::new("x.yml"));
        assert!(matches!(unknown_field, Err(ConfigError::Invalid { .. })));

        let unknown_transform = load_config_from_str("transform: shout", Path::new("x.yaml"));
        assert!(matches!(
            unknown_transform,
            Err(ConfigError::UnknownTransform { .. })
        ));

        let bad_tag = load_config_from_str(r#"{"tags": ["1gql"]}"#, Path::new("x.json"));
        assert!(matches!(bad_tag, Err(ConfigError::InvalidTag(_))));

        let unsupported = load_config_from_str("", Path::new("graphql-tag.config.toml"));
        assert!(matches!(unsupported, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_rc_file_accepts_yaml_and_json() {
        let rc = Path::new(".gqltagrc");
        let yaml = load_config_from_str("tags:\n  - graphql\n", rc).unwrap();
        assert_eq!(yaml.tags, Some(vec!["graphql".to_string()]));

        let json = load_config_from_str(r#"{"stripComments": true}"#, rc).unwrap();
        assert_eq!(json.strip_comments, Some(true));

        let neither = load_config_from_str("tags: [graphql", rc);
        assert!(matches!(neither, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(".gqltagrc");
        fs::write(&config_path, "stripComments: true").unwrap();

        let nested = dir.path().join("src/queries");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_config(&nested).unwrap(), Some(config_path.clone()));
        assert_eq!(find_config(dir.path()).unwrap(), Some(config_path));
    }

    #[test]
    fn test_find_config_prefers_yml() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("graphql-tag.config.json"), "{}").unwrap();
        fs::write(dir.path().join("graphql-tag.config.yml"), "validate: true").unwrap();

        let found = find_config(dir.path()).unwrap().unwrap();
        assert_eq!(found.file_name().unwrap(), "graphql-tag.config.yml");
    }

    #[test]
    fn test_nearest_config_wins() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("graphql-tag.config.yml"), "").unwrap();
        let nested = dir.path().join("packages/app");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join(".gqltagrc"), "").unwrap();

        assert_eq!(
            find_config(&nested).unwrap(),
            Some(nested.join(".gqltagrc"))
        );
    }
}
