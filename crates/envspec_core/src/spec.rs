//! Fluent declaration of variables.
//!
//! A [`SpecBuilder`] accumulates the configuration of one variable. Calling
//! [`required`](SpecBuilder::required), [`optional`](SpecBuilder::optional) or
//! [`deprecated`](SpecBuilder::deprecated) registers it and returns a handle
//! that exposes the value.
//!
//! Builders are cheap handles onto shared state: a clone kept around after
//! registration still configures the same variable, and panics once that
//! variable has been used or validated.
//!
//! ```rust,no_run
//! let port = envspec_core::number::<u16>("PORT", "the port to listen on")
//!     .with_minimum(1)
//!     .with_default(8080)
//!     .required();
//!
//! envspec_core::validate_environment();
//! let port: u16 = port.value();
//! ```

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::{MisuseError, SpecError};
use crate::kind::Kind;
use crate::kinds::{Boolean, File, Number, Numeric, Set, Text};
use crate::registry::Registry;
use crate::relationship::RefersTo;
use crate::resolve::Resolver;
use crate::source::Source;
use crate::variable::{is_valid_name, Cardinality, Input, ValidationResult, Variable};

/// Declare a numeric variable of any primitive integer or float width.
pub fn number<N: Number>(name: impl Into<String>, description: impl Into<String>) -> SpecBuilder<Numeric<N>> {
    SpecBuilder::new(name, description, Numeric::new())
}

/// Declare a non-empty string variable.
pub fn string(name: impl Into<String>, description: impl Into<String>) -> SpecBuilder<Text> {
    SpecBuilder::new(name, description, Text::new())
}

/// Declare a boolean variable.
pub fn boolean(name: impl Into<String>, description: impl Into<String>) -> SpecBuilder<Boolean> {
    SpecBuilder::new(name, description, Boolean::new())
}

/// Declare a variable that must be one of `members`.
pub fn set<T>(
    name: impl Into<String>,
    description: impl Into<String>,
    members: impl IntoIterator<Item = T>,
) -> SpecBuilder<Set<T>>
where
    T: Clone + fmt::Display + Send + Sync + 'static,
{
    SpecBuilder::new(name, description, Set::new(members))
}

/// Declare a variable holding a file path.
pub fn file(name: impl Into<String>, description: impl Into<String>) -> SpecBuilder<File> {
    SpecBuilder::new(name, description, File::new())
}

/// Declare a variable with a user-supplied kind.
pub fn custom<K: Kind>(name: impl Into<String>, description: impl Into<String>, kind: K) -> SpecBuilder<K> {
    SpecBuilder::new(name, description, kind)
}

/// Configuration of a single variable prior to registration.
pub struct SpecBuilder<K: Kind> {
    resolver: Arc<Resolver<K>>,
    registry: Arc<Registry>,
    see_also: Vec<String>,
}

impl<K: Kind> Clone for SpecBuilder<K> {
    fn clone(&self) -> Self {
        Self {
            resolver: Arc::clone(&self.resolver),
            registry: Arc::clone(&self.registry),
            see_also: self.see_also.clone(),
        }
    }
}

impl<K: Kind> SpecBuilder<K> {
    /// Start declaring a variable.
    ///
    /// # Panics
    ///
    /// If `name` is not a valid environment variable name.
    pub fn new(name: impl Into<String>, description: impl Into<String>, kind: K) -> Self {
        let name = name.into();
        if !is_valid_name(&name) {
            panic!("{}", MisuseError::InvalidName(name));
        }

        Self {
            resolver: Arc::new(Resolver::new(name, description.into(), kind)),
            registry: Registry::global(),
            see_also: Vec::new(),
        }
    }

    /// Use `value` when the variable is absent.
    ///
    /// # Panics
    ///
    /// If `value` violates the variable's constraints, or the variable is
    /// sealed.
    pub fn with_default(self, value: K::Value) -> Self {
        match self.try_with_default(value) {
            Ok(builder) => builder,
            Err(e) => panic!("{}", e),
        }
    }

    /// Non-panicking form of [`with_default`](Self::with_default).
    pub fn try_with_default(self, value: K::Value) -> Result<Self, MisuseError> {
        self.resolver.set_default(value)?;
        Ok(self)
    }

    /// Resolve against `source` instead of the process environment.
    pub fn with_source(self, source: impl Source + 'static) -> Self {
        let source: Arc<dyn Source> = Arc::new(source);
        self.resolver.configure(|config| {
            config.source = source;
            Ok(())
        });
        self
    }

    /// Register into `registry` instead of the global registry.
    pub fn with_registry(mut self, registry: Arc<Registry>) -> Self {
        self.registry = registry;
        self
    }

    /// Link this variable to `other` in generated documentation.
    ///
    /// `other` must already be registered when this variable is.
    pub fn see_also(mut self, other: &impl Input) -> Self {
        self.see_also.push(other.name().to_string());
        self
    }

    /// Register the variable; absence without a default is an error.
    pub fn required(self) -> Required<K> {
        self.register(Cardinality::Required);
        Required {
            resolver: self.resolver,
        }
    }

    /// Register the variable; absence without a default yields `None`.
    pub fn optional(self) -> Optional<K> {
        self.register(Cardinality::Optional);
        Optional {
            resolver: self.resolver,
        }
    }

    /// Register the variable as optional and discouraged.
    pub fn deprecated(self) -> Optional<K> {
        self.register(Cardinality::Deprecated);
        Optional {
            resolver: self.resolver,
        }
    }

    fn register(&self, cardinality: Cardinality) {
        let name = self.resolver.name().to_string();
        let first = self.resolver.configure(|config| {
            if !config.registered {
                config.cardinality = cardinality;
                config.registered = true;
                return Ok(true);
            }
            if config.cardinality != cardinality {
                return Err(MisuseError::Redeclared {
                    name,
                    declared: config.cardinality,
                    requested: cardinality,
                });
            }
            Ok(false)
        });

        if !first {
            return;
        }

        // The configuration lock is released before the registry lock is
        // taken; bulk validation acquires them in the opposite order.
        self.registry.register(self.resolver.clone());

        for to in &self.see_also {
            let rel = RefersTo::new(self.resolver.name(), to.clone());
            if let Err(e) = self.registry.apply_relationship(rel) {
                panic!("{}", MisuseError::from(e));
            }
        }

        debug!("Declared {} as {}", self.resolver.name(), cardinality);
    }
}

impl<K: Kind> Input for SpecBuilder<K> {
    fn name(&self) -> &str {
        self.resolver.name()
    }
}

impl<N: Number> SpecBuilder<Numeric<N>> {
    /// Reject values below `min`. The bound is inclusive.
    pub fn with_minimum(self, min: N) -> Self {
        let name = self.resolver.name().to_string();
        self.resolver.replace_kind(|kind| {
            check_finite(&name, min)?;
            check_bounds(&name, Some(min), kind.max)?;
            Ok(Numeric {
                min: Some(min),
                max: kind.max,
            })
        });
        self
    }

    /// Reject values above `max`. The bound is inclusive.
    pub fn with_maximum(self, max: N) -> Self {
        let name = self.resolver.name().to_string();
        self.resolver.replace_kind(|kind| {
            check_finite(&name, max)?;
            check_bounds(&name, kind.min, Some(max))?;
            Ok(Numeric {
                min: kind.min,
                max: Some(max),
            })
        });
        self
    }
}

impl SpecBuilder<Text> {
    /// Reject strings with fewer than `min` characters.
    pub fn with_minimum_length(self, min: usize) -> Self {
        let name = self.resolver.name().to_string();
        self.resolver.replace_kind(|kind| {
            check_bounds(&name, Some(min), kind.max_length)?;
            Ok(Text {
                min_length: Some(min),
                max_length: kind.max_length,
            })
        });
        self
    }

    /// Reject strings with more than `max` characters.
    pub fn with_maximum_length(self, max: usize) -> Self {
        let name = self.resolver.name().to_string();
        self.resolver.replace_kind(|kind| {
            check_bounds(&name, kind.min_length, Some(max))?;
            Ok(Text {
                min_length: kind.min_length,
                max_length: Some(max),
            })
        });
        self
    }
}

impl SpecBuilder<Boolean> {
    /// Spell true and false with custom literals.
    pub fn with_literals(self, true_literal: impl Into<String>, false_literal: impl Into<String>) -> Self {
        let true_literal = true_literal.into();
        let false_literal = false_literal.into();
        self.resolver.replace_kind(|_| {
            Ok(Boolean {
                true_literal,
                false_literal,
            })
        });
        self
    }
}

impl<T> SpecBuilder<Set<T>>
where
    T: Clone + fmt::Display + Send + Sync + 'static,
{
    /// Add another accepted member.
    pub fn with_member(self, member: T) -> Self {
        self.resolver.replace_kind(|kind| {
            let mut members = kind.members.clone();
            members.push(member);
            Ok(Set { members })
        });
        self
    }
}

impl SpecBuilder<File> {
    /// Require the path to name an existing regular file.
    pub fn must_exist(self) -> Self {
        self.resolver.replace_kind(|_| Ok(File { must_exist: true }));
        self
    }
}

fn check_finite<N: Number>(name: &str, bound: N) -> Result<(), MisuseError> {
    if bound.is_finite_number() {
        Ok(())
    } else {
        Err(MisuseError::NonFiniteBound {
            name: name.to_string(),
            bound: bound.to_string(),
        })
    }
}

fn check_bounds<N: PartialOrd + fmt::Display>(name: &str, min: Option<N>, max: Option<N>) -> Result<(), MisuseError> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => Err(MisuseError::InvalidBounds {
            name: name.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }),
        _ => Ok(()),
    }
}

/// A registered variable that always produces a value.
pub struct Required<K: Kind> {
    resolver: Arc<Resolver<K>>,
}

impl<K: Kind> Clone for Required<K> {
    fn clone(&self) -> Self {
        Self {
            resolver: Arc::clone(&self.resolver),
        }
    }
}

impl<K: Kind> Required<K> {
    /// The resolved value.
    ///
    /// # Panics
    ///
    /// If the variable is undefined without a default or its value is
    /// invalid. The message is the single-line [`SpecError`].
    pub fn value(&self) -> K::Value {
        match self.try_value() {
            Ok(value) => value,
            Err(e) => panic!("{}", e),
        }
    }

    /// The resolved value or the reason there is none.
    pub fn try_value(&self) -> Result<K::Value, SpecError> {
        self.resolver.outcome()?.ok_or_else(|| SpecError::Undefined {
            name: self.resolver.name().to_string(),
        })
    }

    /// Resolve and report without panicking.
    pub fn validate(&self) -> ValidationResult {
        self.resolver.result()
    }
}

impl<K: Kind> Input for Required<K> {
    fn name(&self) -> &str {
        self.resolver.name()
    }
}

/// A registered variable that may be absent.
pub struct Optional<K: Kind> {
    resolver: Arc<Resolver<K>>,
}

impl<K: Kind> Clone for Optional<K> {
    fn clone(&self) -> Self {
        Self {
            resolver: Arc::clone(&self.resolver),
        }
    }
}

impl<K: Kind> Optional<K> {
    /// The resolved value, or `None` if absent without a default.
    ///
    /// # Panics
    ///
    /// If the value is present but invalid.
    pub fn value(&self) -> Option<K::Value> {
        match self.try_value() {
            Ok(value) => value,
            Err(e) => panic!("{}", e),
        }
    }

    pub fn try_value(&self) -> Result<Option<K::Value>, SpecError> {
        self.resolver.outcome()
    }

    /// Resolve and report without panicking.
    pub fn validate(&self) -> ValidationResult {
        self.resolver.result()
    }
}

impl<K: Kind> Input for Optional<K> {
    fn name(&self) -> &str {
        self.resolver.name()
    }
}
