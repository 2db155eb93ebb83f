//! Manifest files declaring the variables an application reads.
//!
//! A manifest only declares variables. Their values always come from the
//! source passed to [`Manifest::declare`], normally the process environment.
//!
//! ```toml
//! app = "my-service"
//!
//! [[variable]]
//! name = "PORT"
//! description = "the port to listen on"
//! type = "integer"
//! minimum = 1
//! default = 8080
//! ```

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use envspec_core::{
    boolean, file, is_valid_name, number, set, string, Boolean, Cardinality, Input, Kind,
    MisuseError, Number, Registry, Source, SpecBuilder,
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{ManifestError, ManifestResult};

/// A set of variable declarations.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Application name used in generated documentation.
    #[serde(default)]
    pub app: Option<String>,

    #[serde(default, rename = "variable", alias = "variables")]
    pub variables: Vec<VariableDecl>,
}

/// Declaration of a single variable.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariableDecl {
    pub name: String,

    pub description: String,

    #[serde(rename = "type")]
    pub kind: VariableType,

    #[serde(default)]
    pub cardinality: Cardinality,

    #[serde(default)]
    pub default: Option<Scalar>,

    /// Lower bound; a length for strings.
    #[serde(default)]
    pub minimum: Option<Scalar>,

    /// Upper bound; a length for strings.
    #[serde(default)]
    pub maximum: Option<Scalar>,

    #[serde(default)]
    pub members: Vec<Scalar>,

    #[serde(default)]
    pub must_exist: bool,

    /// Variables declared earlier in the manifest that this one relates to.
    #[serde(default)]
    pub see_also: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableType {
    Integer,
    Float,
    String,
    Boolean,
    Enum,
    File,
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VariableType::Integer => "integer",
            VariableType::Float => "float",
            VariableType::String => "string",
            VariableType::Boolean => "boolean",
            VariableType::Enum => "enum",
            VariableType::File => "file",
        };
        write!(f, "{}", name)
    }
}

/// A scalar as written in TOML or YAML.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Boolean(b) => write!(f, "{}", b),
            Scalar::Integer(i) => write!(f, "{}", i),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Refers to a variable that was declared earlier, by name.
struct Declared<'a>(&'a str);

impl Input for Declared<'_> {
    fn name(&self) -> &str {
        self.0
    }
}

impl Manifest {
    /// Load a manifest, choosing the format from the file extension.
    pub fn load(path: &Path) -> ManifestResult<Self> {
        let format: fn(&str) -> ManifestResult<Self> = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml,
            Some("yaml") | Some("yml") => Self::from_yaml,
            _ => return Err(ManifestError::UnsupportedFormat(path.to_path_buf())),
        };

        let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let manifest = format(&content)?;
        info!(
            "Loaded manifest {:?} with {} variable(s)",
            path,
            manifest.variables.len()
        );
        Ok(manifest)
    }

    pub fn from_toml(content: &str) -> ManifestResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_yaml(content: &str) -> ManifestResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Declare every variable into `registry`, resolving against `source`.
    ///
    /// Declarations are checked before anything is registered with the
    /// builders, so a bad manifest is reported as an error rather than a
    /// panic. Variables declared before the failing one stay registered.
    pub fn declare<S>(&self, registry: &Arc<Registry>, source: &S) -> ManifestResult<()>
    where
        S: Source + Clone + 'static,
    {
        let mut declared: HashSet<&str> = HashSet::new();

        for decl in &self.variables {
            if !is_valid_name(&decl.name) {
                return Err(ManifestError::InvalidName(decl.name.clone()));
            }
            if declared.contains(decl.name.as_str()) {
                return Err(ManifestError::Duplicate(decl.name.clone()));
            }
            if let Some(to) = decl.see_also.iter().find(|to| !declared.contains(to.as_str())) {
                return Err(ManifestError::UnknownReference {
                    name: decl.name.clone(),
                    to: to.clone(),
                });
            }

            decl.declare(registry, source)?;
            declared.insert(&decl.name);
        }

        Ok(())
    }
}

impl VariableDecl {
    fn declare<S>(&self, registry: &Arc<Registry>, source: &S) -> ManifestResult<()>
    where
        S: Source + Clone + 'static,
    {
        self.check_fields()?;
        debug!("Declaring {} as {} {}", self.name, self.cardinality, self.kind);

        match self.kind {
            VariableType::Integer => self.declare_number::<i64, S>(registry, source),
            VariableType::Float => self.declare_number::<f64, S>(registry, source),
            VariableType::String => {
                let min = self.length(self.minimum.as_ref(), "minimum")?;
                let max = self.length(self.maximum.as_ref(), "maximum")?;
                self.check_order(min, max)?;

                let mut builder = string(&self.name, &self.description);
                if let Some(min) = min {
                    builder = builder.with_minimum_length(min);
                }
                if let Some(max) = max {
                    builder = builder.with_maximum_length(max);
                }

                let default = self.default.as_ref().map(|d| d.to_string());
                self.register(builder, default, registry, source)
            }
            VariableType::Boolean => {
                let default = match &self.default {
                    Some(d) => Some(
                        Boolean::new()
                            .parse(&d.to_string())
                            .map_err(|reason| self.invalid(format!("default value is invalid: {}", reason)))?,
                    ),
                    None => None,
                };
                self.register(boolean(&self.name, &self.description), default, registry, source)
            }
            VariableType::Enum => {
                if self.members.is_empty() {
                    return Err(self.invalid("an enum needs at least one member"));
                }
                let members: Vec<String> = self.members.iter().map(|m| m.to_string()).collect();
                let default = self.default.as_ref().map(|d| d.to_string());
                self.register(set(&self.name, &self.description, members), default, registry, source)
            }
            VariableType::File => {
                let mut builder = file(&self.name, &self.description);
                if self.must_exist {
                    builder = builder.must_exist();
                }
                let default = self.default.as_ref().map(|d| PathBuf::from(d.to_string()));
                self.register(builder, default, registry, source)
            }
        }
    }

    fn declare_number<N, S>(&self, registry: &Arc<Registry>, source: &S) -> ManifestResult<()>
    where
        N: Number,
        S: Source + Clone + 'static,
    {
        let min = self.number::<N>(self.minimum.as_ref(), "minimum")?;
        let max = self.number::<N>(self.maximum.as_ref(), "maximum")?;
        self.check_order(min, max)?;

        let mut builder = number::<N>(&self.name, &self.description);
        if let Some(min) = min {
            builder = builder.with_minimum(min);
        }
        if let Some(max) = max {
            builder = builder.with_maximum(max);
        }

        let default = self.number::<N>(self.default.as_ref(), "default value")?;
        self.register(builder, default, registry, source)
    }

    fn register<K, S>(
        &self,
        builder: SpecBuilder<K>,
        default: Option<K::Value>,
        registry: &Arc<Registry>,
        source: &S,
    ) -> ManifestResult<()>
    where
        K: Kind,
        S: Source + Clone + 'static,
    {
        let mut builder = builder
            .with_source(source.clone())
            .with_registry(Arc::clone(registry));

        if let Some(value) = default {
            builder = builder.try_with_default(value).map_err(|e| match e {
                MisuseError::InvalidDefault { reason, .. } => {
                    self.invalid(format!("default value is invalid: {}", reason))
                }
                other => self.invalid(other.to_string()),
            })?;
        }

        for to in &self.see_also {
            builder = builder.see_also(&Declared(to));
        }

        match self.cardinality {
            Cardinality::Required => {
                builder.required();
            }
            Cardinality::Optional => {
                builder.optional();
            }
            Cardinality::Deprecated => {
                builder.deprecated();
            }
        }

        Ok(())
    }

    /// Reject fields that do not apply to the declared type.
    fn check_fields(&self) -> ManifestResult<()> {
        let bounded = matches!(
            self.kind,
            VariableType::Integer | VariableType::Float | VariableType::String
        );
        if !bounded && (self.minimum.is_some() || self.maximum.is_some()) {
            return Err(self.invalid(format!("a {} cannot have a minimum or maximum", self.kind)));
        }
        if self.kind != VariableType::Enum && !self.members.is_empty() {
            return Err(self.invalid(format!("a {} cannot have members", self.kind)));
        }
        if self.kind != VariableType::File && self.must_exist {
            return Err(self.invalid(format!("a {} cannot use must_exist", self.kind)));
        }
        Ok(())
    }

    fn number<N: Number>(&self, value: Option<&Scalar>, field: &str) -> ManifestResult<Option<N>> {
        value
            .map(|v| {
                N::parse_number(&v.to_string())
                    .map_err(|reason| self.invalid(format!("{} is invalid: {}", field, reason)))
            })
            .transpose()
    }

    fn length(&self, value: Option<&Scalar>, field: &str) -> ManifestResult<Option<usize>> {
        value
            .map(|v| {
                v.to_string()
                    .parse::<usize>()
                    .map_err(|_| self.invalid(format!("{} length must be a non-negative integer", field)))
            })
            .transpose()
    }

    fn check_order<T: PartialOrd + fmt::Display>(&self, min: Option<T>, max: Option<T>) -> ManifestResult<()> {
        match (min, max) {
            (Some(min), Some(max)) if min > max => Err(self.invalid(format!(
                "minimum {} exceeds maximum {}",
                min, max
            ))),
            _ => Ok(()),
        }
    }

    fn invalid(&self, message: impl Into<String>) -> ManifestError {
        ManifestError::InvalidVariable {
            name: self.name.clone(),
            message: message.into(),
        }
    }
}
