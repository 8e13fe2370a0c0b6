//! Generator configuration.
//!
//! The configuration declares which classes to generate and, per class, the
//! group combinations and versions to cover. Defaults cascade from the
//! configuration to the class to the combination, and are resolved once when
//! a class is added; after that the configuration is a plain owned tree with
//! no lazy lookups.

use jsonforge_schema::ClassId;
use serde::Deserialize;
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    /// An explicit version list must not be empty: pass nothing to fall back
    /// to the defaults, or include `""` to generate unversioned.
    #[error(
        "version list may not be empty; omit it to use the default versions, or include \"\" to \
         generate without a version"
    )]
    EmptyVersionList,

    #[error("configuration needs at least one class to generate")]
    NoClasses,

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

///
/// GroupCombination
///
/// One set of groups to generate a class under, optionally with its own
/// version list. Group order is preserved as declared; only the artifact
/// name normalizes it.
///

#[derive(Clone, Debug, Deserialize)]
pub struct GroupCombination {
    groups: Vec<String>,
    #[serde(default)]
    versions: Option<Vec<String>>,
}

impl GroupCombination {
    pub fn new<I, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            groups: groups.into_iter().map(Into::into).collect(),
            versions: None,
        }
    }

    pub fn with_versions<I, S>(mut self, versions: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let versions: Vec<String> = versions.into_iter().map(Into::into).collect();
        if versions.is_empty() {
            return Err(ConfigError::EmptyVersionList);
        }

        self.versions = Some(versions);
        Ok(self)
    }
}

///
/// ClassConfig
///
/// Declarative input for one class. `serialize`/`deserialize` select which
/// artifact directions to generate; both default to on.
///

#[derive(Clone, Debug, Deserialize)]
pub struct ClassConfig {
    class: ClassId,
    #[serde(default)]
    default_versions: Option<Vec<String>>,
    #[serde(default)]
    group_combinations: Vec<GroupCombination>,
    #[serde(default = "enabled")]
    serialize: bool,
    #[serde(default = "enabled")]
    deserialize: bool,
}

const fn enabled() -> bool {
    true
}

impl ClassConfig {
    pub fn new(class: impl Into<ClassId>) -> Self {
        Self {
            class: class.into(),
            default_versions: None,
            group_combinations: Vec::new(),
            serialize: true,
            deserialize: true,
        }
    }

    pub fn with_default_versions<I, S>(mut self, versions: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let versions: Vec<String> = versions.into_iter().map(Into::into).collect();
        if versions.is_empty() {
            return Err(ConfigError::EmptyVersionList);
        }

        self.default_versions = Some(versions);
        Ok(self)
    }

    #[must_use]
    pub fn with_group_combination(mut self, combination: GroupCombination) -> Self {
        self.group_combinations.push(combination);
        self
    }

    #[must_use]
    pub const fn skip_serializer(mut self) -> Self {
        self.serialize = false;
        self
    }

    #[must_use]
    pub const fn skip_deserializer(mut self) -> Self {
        self.deserialize = false;
        self
    }
}

///
/// ResolvedCombination
///

#[derive(Clone, Debug)]
pub struct ResolvedCombination {
    pub groups: Vec<String>,
    pub versions: Vec<String>,
}

///
/// ClassToGenerate
///
/// One class with every default resolved: each combination carries its
/// concrete version list.
///

#[derive(Clone, Debug)]
pub struct ClassToGenerate {
    pub class: ClassId,
    pub serialize: bool,
    pub deserialize: bool,
    pub combinations: Vec<ResolvedCombination>,
}

///
/// GeneratorConfiguration
///

#[derive(Clone, Debug)]
pub struct GeneratorConfiguration {
    default_group_combinations: Vec<Vec<String>>,
    default_versions: Vec<String>,
    allow_generic_arrays: bool,
    classes: Vec<ClassToGenerate>,
}

impl GeneratorConfiguration {
    /// Empty defaults normalize to one group-less combination and one
    /// unversioned generation (`""`).
    #[must_use]
    pub fn new(default_group_combinations: Vec<Vec<String>>, default_versions: Vec<String>) -> Self {
        let default_group_combinations = if default_group_combinations.is_empty() {
            vec![Vec::new()]
        } else {
            default_group_combinations
        };
        let default_versions = if default_versions.is_empty() {
            vec![String::new()]
        } else {
            default_versions
        };

        Self {
            default_group_combinations,
            default_versions,
            allow_generic_arrays: false,
            classes: Vec::new(),
        }
    }

    #[must_use]
    pub const fn allow_generic_arrays(mut self, allow: bool) -> Self {
        self.allow_generic_arrays = allow;
        self
    }

    #[must_use]
    pub const fn generic_arrays_allowed(&self) -> bool {
        self.allow_generic_arrays
    }

    pub fn add_class(&mut self, config: ClassConfig) -> Result<(), ConfigError> {
        let class_versions = match config.default_versions {
            Some(versions) if versions.is_empty() => return Err(ConfigError::EmptyVersionList),
            Some(versions) => versions,
            None => self.default_versions.clone(),
        };

        let combinations = if config.group_combinations.is_empty() {
            self.default_group_combinations
                .iter()
                .map(|groups| GroupCombination {
                    groups: groups.clone(),
                    versions: None,
                })
                .collect()
        } else {
            config.group_combinations
        };

        let mut resolved = Vec::with_capacity(combinations.len());
        for combination in combinations {
            let versions = match combination.versions {
                Some(versions) if versions.is_empty() => return Err(ConfigError::EmptyVersionList),
                Some(versions) => versions,
                None => class_versions.clone(),
            };
            resolved.push(ResolvedCombination {
                groups: combination.groups,
                versions,
            });
        }

        self.classes.push(ClassToGenerate {
            class: config.class,
            serialize: config.serialize,
            deserialize: config.deserialize,
            combinations: resolved,
        });

        Ok(())
    }

    #[must_use]
    pub fn classes(&self) -> &[ClassToGenerate] {
        &self.classes
    }

    /// Load a configuration from its TOML form.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let raw: RawConfiguration = toml::from_str(source)?;
        if raw.classes.is_empty() {
            return Err(ConfigError::NoClasses);
        }

        let mut configuration = Self::new(raw.default_group_combinations, raw.default_versions)
            .allow_generic_arrays(raw.allow_generic_arrays);
        for class in raw.classes {
            configuration.add_class(class)?;
        }

        Ok(configuration)
    }
}

#[derive(Debug, Deserialize)]
struct RawConfiguration {
    #[serde(default)]
    default_group_combinations: Vec<Vec<String>>,
    #[serde(default)]
    default_versions: Vec<String>,
    #[serde(default)]
    allow_generic_arrays: bool,
    #[serde(default)]
    classes: Vec<ClassConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cascade_to_combinations() {
        let mut configuration =
            GeneratorConfiguration::new(vec![vec!["api".to_string()]], vec!["".into(), "2".into()]);
        configuration
            .add_class(
                ClassConfig::new("app::Product").with_group_combination(
                    GroupCombination::new(["api", "detail"])
                        .with_versions(["2"])
                        .unwrap(),
                ),
            )
            .unwrap();
        configuration.add_class(ClassConfig::new("app::Other")).unwrap();

        let product = &configuration.classes()[0];
        assert_eq!(product.combinations.len(), 1);
        assert_eq!(product.combinations[0].groups, vec!["api", "detail"]);
        assert_eq!(product.combinations[0].versions, vec!["2"]);

        // no combinations declared: global group combinations and versions
        let other = &configuration.classes()[1];
        assert_eq!(other.combinations.len(), 1);
        assert_eq!(other.combinations[0].groups, vec!["api"]);
        assert_eq!(other.combinations[0].versions, vec!["", "2"]);
    }

    #[test]
    fn empty_defaults_mean_ungrouped_unversioned() {
        let mut configuration = GeneratorConfiguration::new(Vec::new(), Vec::new());
        configuration.add_class(ClassConfig::new("app::Product")).unwrap();

        let class = &configuration.classes()[0];
        assert_eq!(class.combinations.len(), 1);
        assert!(class.combinations[0].groups.is_empty());
        assert_eq!(class.combinations[0].versions, vec![""]);
    }

    #[test]
    fn explicit_empty_version_list_is_rejected() {
        let err = GroupCombination::new(["api"])
            .with_versions(Vec::<String>::new())
            .unwrap_err();
        assert!(matches!(err, ConfigError::EmptyVersionList));

        let err = ClassConfig::new("app::Product")
            .with_default_versions(Vec::<String>::new())
            .unwrap_err();
        assert!(matches!(err, ConfigError::EmptyVersionList));
    }

    #[test]
    fn loads_from_toml() {
        let configuration = GeneratorConfiguration::from_toml(
            r#"
            default_versions = ["", "1"]

            [[classes]]
            class = "app::Product"
            group_combinations = [
                { groups = [] },
                { groups = ["api"], versions = ["2"] },
            ]

            [[classes]]
            class = "app::Audit"
            serialize = false
            "#,
        )
        .unwrap();

        assert_eq!(configuration.classes().len(), 2);
        let product = &configuration.classes()[0];
        assert_eq!(product.combinations[1].versions, vec!["2"]);
        assert_eq!(product.combinations[0].versions, vec!["", "1"]);

        let audit = &configuration.classes()[1];
        assert!(!audit.serialize);
        assert!(audit.deserialize);
    }

    #[test]
    fn toml_without_classes_is_rejected() {
        let err = GeneratorConfiguration::from_toml("default_versions = [\"1\"]").unwrap_err();
        assert!(matches!(err, ConfigError::NoClasses));

        let err = GeneratorConfiguration::from_toml("classes = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        let err = GeneratorConfiguration::from_toml(
            "[[classes]]\nclass = \"x\"\ngroup_combinations = [ { groups = [], versions = [] } ]",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::EmptyVersionList));
    }
}
