//! The one-shot resolution engine shared by every kind.
//!
//! A [`Resolver`] moves through three states: unresolved, resolving and
//! resolved. The resolved state is published through a `OnceLock`, so the
//! fast path is a single atomic load. Callers that miss it take the
//! configuration lock, check again, and exactly one of them runs the
//! pipeline; the rest block on the lock and then read the cached outcome.
//!
//! Running the pipeline seals the configuration. Builder methods called
//! after that point panic.

use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::error::{MisuseError, SpecError};
use crate::kind::Kind;
use crate::schema::Schema;
use crate::source::{ProcessEnv, Source};
use crate::variable::{Cardinality, ValidationResult, Validator, Variable};

/// Mutable declaration state, frozen once resolution begins.
pub(crate) struct Config<K: Kind> {
    pub(crate) kind: K,
    pub(crate) default: Option<K::Value>,
    pub(crate) cardinality: Cardinality,
    pub(crate) source: Arc<dyn Source>,
    pub(crate) registered: bool,
    sealed: bool,
}

/// Cached outcome of the pipeline.
pub(crate) struct Resolution<V> {
    pub(crate) schema: Schema,
    pub(crate) default_value: Option<String>,
    pub(crate) explicit_value: Option<String>,
    pub(crate) value: Option<V>,
    pub(crate) using_default: bool,
    pub(crate) error: Option<SpecError>,
}

/// A declared variable together with its resolution state.
pub struct Resolver<K: Kind> {
    name: String,
    description: String,
    config: Mutex<Config<K>>,
    resolution: OnceLock<Resolution<K::Value>>,
}

impl<K: Kind> Resolver<K> {
    pub(crate) fn new(name: String, description: String, kind: K) -> Self {
        Self {
            name,
            description,
            config: Mutex::new(Config {
                kind,
                default: None,
                cardinality: Cardinality::Required,
                source: Arc::new(ProcessEnv),
                registered: false,
                sealed: false,
            }),
            resolution: OnceLock::new(),
        }
    }

    /// Apply a change to the configuration unless it is sealed.
    pub(crate) fn try_configure<R>(
        &self,
        change: impl FnOnce(&mut Config<K>) -> Result<R, MisuseError>,
    ) -> Result<R, MisuseError> {
        let mut config = self.config.lock();
        if config.sealed {
            return Err(MisuseError::Sealed(self.name.clone()));
        }
        change(&mut config)
    }

    /// Like [`try_configure`](Self::try_configure), panicking on misuse.
    pub(crate) fn configure<R>(
        &self,
        change: impl FnOnce(&mut Config<K>) -> Result<R, MisuseError>,
    ) -> R {
        match self.try_configure(change) {
            Ok(r) => r,
            Err(e) => panic!("{}", e),
        }
    }

    /// Swap in a new kind built from the current one. An existing default
    /// must remain legal under the new constraints.
    pub(crate) fn replace_kind(&self, build: impl FnOnce(&K) -> Result<K, MisuseError>) {
        self.configure(|config| {
            let kind = build(&config.kind)?;
            if let Some(default) = &config.default {
                kind.validate(default)
                    .map_err(|reason| MisuseError::InvalidDefault {
                        name: self.name.clone(),
                        reason,
                    })?;
            }
            config.kind = kind;
            Ok(())
        })
    }

    /// Set the default after checking it against the current constraints.
    pub(crate) fn set_default(&self, value: K::Value) -> Result<(), MisuseError> {
        self.try_configure(|config| {
            config
                .kind
                .validate(&value)
                .map_err(|reason| MisuseError::InvalidDefault {
                    name: self.name.clone(),
                    reason,
                })?;
            config.default = Some(value);
            Ok(())
        })
    }

    /// Resolve at most once and return the cached outcome.
    pub(crate) fn resolve(&self) -> &Resolution<K::Value> {
        if let Some(resolution) = self.resolution.get() {
            return resolution;
        }

        let mut config = self.config.lock();
        self.resolution.get_or_init(|| {
            config.sealed = true;
            self.run(&config)
        })
    }

    fn run(&self, config: &Config<K>) -> Resolution<K::Value> {
        let kind = &config.kind;
        let mut resolution = Resolution {
            schema: kind.schema(),
            default_value: config.default.as_ref().map(|v| kind.render(v)),
            explicit_value: None,
            value: None,
            using_default: false,
            error: None,
        };

        let raw = config.source.get(&self.name);
        debug!("Resolving {} ({})", self.name, config.cardinality);

        if raw.is_empty() {
            if let Some(default) = &config.default {
                resolution.value = Some(default.clone());
                resolution.using_default = true;
            } else if config.cardinality == Cardinality::Required {
                resolution.error = Some(SpecError::Undefined {
                    name: self.name.clone(),
                });
            }
            return resolution;
        }

        if config.cardinality == Cardinality::Deprecated {
            warn!("{} is deprecated and should not be set", self.name);
        }

        // Constraints are only checked against a value that parsed.
        match kind.parse(&raw).and_then(|v| kind.validate(&v).map(|_| v)) {
            Ok(value) => {
                resolution.explicit_value = Some(kind.render(&value));
                resolution.value = Some(value);
            }
            Err(reason) => {
                let rendered = kind.render_raw(&raw);
                debug!("{} rejected: {}", self.name, reason);
                resolution.explicit_value = Some(rendered.clone());
                resolution.error = Some(SpecError::Invalid {
                    name: self.name.clone(),
                    value: rendered,
                    reason,
                });
            }
        }

        resolution
    }

    /// Build a fresh result from the cached resolution.
    pub(crate) fn result(&self) -> ValidationResult {
        let resolution = self.resolve();
        ValidationResult {
            name: self.name.clone(),
            description: self.description.clone(),
            schema: resolution.schema.clone(),
            default_value: resolution.default_value.clone(),
            explicit_value: resolution.explicit_value.clone(),
            using_default: resolution.using_default,
            error: resolution.error.clone(),
        }
    }

    /// The resolved value, if any, or the resolution error.
    pub(crate) fn outcome(&self) -> Result<Option<K::Value>, SpecError> {
        let resolution = self.resolve();
        match &resolution.error {
            Some(err) => Err(err.clone()),
            None => Ok(resolution.value.clone()),
        }
    }
}

impl<K: Kind> Validator for Resolver<K> {
    fn validate(&self) -> Vec<ValidationResult> {
        vec![self.result()]
    }
}

impl<K: Kind> Variable for Resolver<K> {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn cardinality(&self) -> Cardinality {
        self.config.lock().cardinality
    }

    fn schema(&self) -> Schema {
        match self.resolution.get() {
            Some(resolution) => resolution.schema.clone(),
            None => self.config.lock().kind.schema(),
        }
    }

    fn default_value(&self) -> Option<String> {
        let config = self.config.lock();
        config.default.as_ref().map(|v| config.kind.render(v))
    }
}

impl<K: Kind> std::fmt::Debug for Resolver<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("name", &self.name)
            .field("resolved", &self.resolution.get().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValueError;
    use crate::kinds::{Numeric, Text};
    use crate::source::{MapSource, MockSource};

    fn resolver_with(raw: &str) -> Resolver<Numeric<u16>> {
        let resolver = Resolver::new("PORT".to_string(), "listen port".to_string(), Numeric::new());
        let source = MapSource::new().with("PORT", raw);
        resolver.configure(|c| {
            c.source = Arc::new(source);
            Ok(())
        });
        resolver
    }

    #[test]
    fn test_reads_source_once() {
        let mut source = MockSource::new();
        source
            .expect_get()
            .with(mockall::predicate::eq("GREETING"))
            .times(1)
            .returning(|_| "hello".to_string());

        let resolver = Resolver::new("GREETING".to_string(), "".to_string(), Text::new());
        resolver.configure(|c| {
            c.source = Arc::new(source);
            Ok(())
        });

        assert_eq!(resolver.outcome(), Ok(Some("hello".to_string())));
        assert_eq!(resolver.outcome(), Ok(Some("hello".to_string())));
        assert_eq!(resolver.result().explicit_value.as_deref(), Some("\"hello\""));
    }

    #[test]
    fn test_syntax_error_skips_constraints() {
        let resolver = resolver_with("port");
        resolver.replace_kind(|_| {
            Ok(Numeric {
                min: Some(1),
                max: None,
            })
        });

        let result = resolver.result();
        assert_eq!(
            result.error,
            Some(SpecError::Invalid {
                name: "PORT".to_string(),
                value: "'port'".to_string(),
                reason: ValueError::Syntax("u16".to_string()),
            })
        );
    }

    #[test]
    fn test_optional_absent_has_no_error() {
        let resolver = resolver_with("");
        resolver.configure(|c| {
            c.cardinality = Cardinality::Optional;
            Ok(())
        });

        let result = resolver.result();
        assert!(result.is_valid());
        assert!(result.explicit_value.is_none());
        assert!(!result.using_default);
        assert_eq!(resolver.outcome(), Ok(None));
    }

    #[test]
    fn test_sealed_after_resolution() {
        let resolver = resolver_with("8080");
        resolver.resolve();

        let err = resolver.try_configure(|_| Ok(())).unwrap_err();
        assert_eq!(err, MisuseError::Sealed("PORT".to_string()));
    }

    #[test]
    fn test_default_checked_against_new_constraints() {
        let resolver = resolver_with("");
        resolver.set_default(3).unwrap();

        let panic = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            resolver.replace_kind(|_| {
                Ok(Numeric {
                    min: Some(5),
                    max: None,
                })
            })
        }));
        assert!(panic.is_err());

        // The rejected change left the old constraints in place.
        assert_eq!(resolver.outcome(), Ok(Some(3)));
    }
}
