use anyhow::{anyhow, bail, Context, Result};
use std::fs;
use std::path::PathBuf;
use yaml_rust2::YamlLoader;
// re-export Yaml for convenience
pub use yaml_rust2::Yaml;

/// Where a YAML document comes from.
#[derive(Debug, Clone)]
pub enum YamlFile {
    Embedded(&'static str),
    Path(PathBuf),
}

impl YamlFile {
    /// Loads the array stored under the top-level `key` and converts every element.
    pub fn load_array<T: TryFrom<Yaml, Error = anyhow::Error>>(&self, key: &str) -> Result<Vec<T>> {
        match self {
            YamlFile::Embedded(yaml_str) => load_from_yaml_array_str(yaml_str, key),
            YamlFile::Path(path) => {
                let yaml_str = fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                load_from_yaml_array_str(&yaml_str, key)
            }
        }
    }
}

pub fn load_from_yaml_array_str<T: TryFrom<Yaml, Error = anyhow::Error>>(
    yaml_str: &str,
    key: &str,
) -> Result<Vec<T>> {
    let docs = YamlLoader::load_from_str(yaml_str)?;
    docs.into_iter()
        .next()
        .ok_or(anyhow!("Empty yaml file"))?
        .into_hash()
        .ok_or(anyhow!("Expected top-level element to be a hash"))?
        .remove(&Yaml::String(key.into()))
        .ok_or(anyhow!("Missing top-level key {}", key))?
        .into_iter()
        .map(|yaml| yaml.try_into())
        .collect()
}

pub trait YamlExt: Sized {
    fn required_string(&self, key: &'static str) -> Result<String>;

    fn optional_string(&self, key: &'static str) -> Result<Option<String>>;

    fn optional_port(&self, key: &'static str) -> Result<Option<u16>>;

    /// A list of strings; a missing key is an empty list.
    fn string_list(&self, key: &'static str) -> Result<Vec<String>>;
}

impl YamlExt for Yaml {
    fn required_string(&self, key: &'static str) -> Result<String> {
        match &self[key] {
            Yaml::String(s) => Ok(s.clone()),
            Yaml::BadValue => bail!("Missing key {}", key),
            _ => bail!("Expected {} to be a string", key),
        }
    }

    fn optional_string(&self, key: &'static str) -> Result<Option<String>> {
        match &self[key] {
            Yaml::String(s) => Ok(Some(s.clone())),
            Yaml::BadValue | Yaml::Null => Ok(None),
            _ => bail!("Expected {} to be a string", key),
        }
    }

    fn optional_port(&self, key: &'static str) -> Result<Option<u16>> {
        match &self[key] {
            Yaml::Integer(i) => u16::try_from(*i)
                .map(Some)
                .map_err(|_| anyhow!("{} is not a valid port: {}", key, i)),
            Yaml::BadValue | Yaml::Null => Ok(None),
            _ => bail!("Expected {} to be an integer", key),
        }
    }

    fn string_list(&self, key: &'static str) -> Result<Vec<String>> {
        match &self[key] {
            Yaml::Array(items) => items
                .iter()
                .map(|item| match item {
                    Yaml::String(s) => Ok(s.clone()),
                    // unquoted numeric aliases
                    Yaml::Integer(i) => Ok(i.to_string()),
                    other => bail!("Expected {} to contain strings, found {:?}", key, other),
                })
                .collect(),
            Yaml::BadValue | Yaml::Null => Ok(Vec::new()),
            _ => bail!("Expected {} to be an array", key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Entry {
        name: String,
        port: Option<u16>,
        tags: Vec<String>,
    }

    impl TryFrom<Yaml> for Entry {
        type Error = anyhow::Error;

        fn try_from(yaml: Yaml) -> Result<Self> {
            Ok(Entry {
                name: yaml.required_string("name")?,
                port: yaml.optional_port("port")?,
                tags: yaml.string_list("tags")?,
            })
        }
    }

    #[test]
    fn test_load_array_from_embedded_str() {
        let yaml = "entries:\n  - name: a\n    port: 80\n    tags: [x, y]\n  - name: b\n";
        let entries: Vec<Entry> = YamlFile::Embedded(yaml).load_array("entries").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "a");
        assert_eq!(entries[0].port, Some(80));
        assert_eq!(entries[0].tags, vec!["x", "y"]);
        assert_eq!(entries[1].port, None);
        assert!(entries[1].tags.is_empty());
    }

    #[test]
    fn test_missing_key_is_error() {
        let result: Result<Vec<Entry>> = YamlFile::Embedded("other: []\n").load_array("entries");
        assert!(result.is_err());
    }

    #[test]
    fn test_out_of_range_port_is_error() {
        let yaml = "entries:\n  - name: a\n    port: 70000\n";
        let result: Result<Vec<Entry>> = YamlFile::Embedded(yaml).load_array("entries");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_is_error() {
        let result: Result<Vec<Entry>> =
            YamlFile::Path(PathBuf::from("/nonexistent/known.yml")).load_array("entries");
        assert!(result.is_err());
    }
}
