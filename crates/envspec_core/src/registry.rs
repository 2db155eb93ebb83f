//! Registry of declared variables.
//!
//! The registry is append-only. It keeps variables in registration order,
//! drives bulk validation and holds the relationship graph. A process-wide
//! instance is available through [`Registry::global`]; tests create their
//! own with [`Registry::new`] or call [`Registry::reset`] between cases.

use std::io::{self, Write};
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::error::RelationshipResult;
use crate::relationship::RefersTo;
use crate::report::render_results;
use crate::variable::{ValidationResult, Variable};

/// Where a failed [`Registry::validate_environment`] writes its report, and
/// how it ends the process.
struct ExitBehavior {
    output: Box<dyn Write + Send>,
    exit: Arc<dyn Fn(i32) + Send + Sync>,
}

impl Default for ExitBehavior {
    fn default() -> Self {
        Self {
            output: Box::new(io::stderr()),
            exit: Arc::new(exit_process),
        }
    }
}

fn exit_process(code: i32) {
    std::process::exit(code)
}

/// A collection of declared variables.
#[derive(Default)]
pub struct Registry {
    variables: Mutex<Vec<Arc<dyn Variable>>>,
    relationships: Mutex<Vec<RefersTo>>,
    exit: Mutex<ExitBehavior>,
}

impl Registry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry used by builders unless told otherwise.
    pub fn global() -> Arc<Registry> {
        static GLOBAL: OnceLock<Arc<Registry>> = OnceLock::new();
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(Registry::new())))
    }

    /// Append a variable.
    ///
    /// Names are not deduplicated; registering two variables with the same
    /// name yields two report rows.
    pub fn register(&self, variable: Arc<dyn Variable>) {
        debug!("Registering variable: {}", variable.name());
        self.variables.lock().push(variable);
    }

    /// Get the first variable registered under `name`.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Variable>> {
        self.variables
            .lock()
            .iter()
            .find(|v| v.name() == name)
            .cloned()
    }

    /// Check if a variable is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.variables.lock().iter().any(|v| v.name() == name)
    }

    /// Snapshot of all variables in registration order.
    pub fn variables(&self) -> Vec<Arc<dyn Variable>> {
        self.variables.lock().clone()
    }

    /// Get the number of registered variables.
    pub fn len(&self) -> usize {
        self.variables.lock().len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.variables.lock().is_empty()
    }

    /// Record that `rel.from` refers to `rel.to`.
    ///
    /// Both endpoints must be registered. Duplicates and self-references are
    /// recorded as given.
    pub fn apply_relationship(&self, rel: RefersTo) -> RelationshipResult<()> {
        {
            let variables = self.variables.lock();
            rel.check(|name| variables.iter().any(|v| v.name() == name))?;
        }

        debug!("Recording relationship: {} -> {}", rel.from, rel.to);
        self.relationships.lock().push(rel);
        Ok(())
    }

    /// All recorded relationships in the order they were applied.
    pub fn relationships(&self) -> Vec<RefersTo> {
        self.relationships.lock().clone()
    }

    /// Names that `name` refers to, without duplicates.
    pub fn refers_to(&self, name: &str) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for rel in self.relationships.lock().iter().filter(|r| r.from == name) {
            if !names.contains(&rel.to) {
                names.push(rel.to.clone());
            }
        }
        names
    }

    /// Validate every variable and collect the results in registration
    /// order, along with whether all of them passed.
    ///
    /// The registry lock is held for the whole walk so that a concurrent
    /// registration is either fully included or not at all.
    pub fn results(&self) -> (Vec<ValidationResult>, bool) {
        let variables = self.variables.lock();
        let mut results = Vec::new();
        let mut ok = true;

        for variable in variables.iter() {
            for result in variable.validate() {
                if result.error.is_some() {
                    ok = false;
                }
                results.push(result);
            }
        }

        (results, ok)
    }

    /// Validate every variable and render the report.
    pub fn validate_all(&self) -> (String, bool) {
        let (results, ok) = self.results();
        info!("Validated {} variable(s), valid: {}", results.len(), ok);
        (render_results(results), ok)
    }

    /// Validate every variable; on failure write the report and exit with
    /// status 1.
    pub fn validate_environment(&self) {
        let (report, ok) = self.validate_all();
        if ok {
            return;
        }

        let exit = {
            let mut behavior = self.exit.lock();
            if let Err(e) = behavior
                .output
                .write_all(report.as_bytes())
                .and_then(|_| behavior.output.flush())
            {
                warn!("Failed to write validation report: {}", e);
            }
            Arc::clone(&behavior.exit)
        };

        exit(1);
    }

    /// Replace the report sink and exit function used by
    /// [`validate_environment`](Self::validate_environment).
    pub fn set_exit_behavior(
        &self,
        output: impl Write + Send + 'static,
        exit: impl Fn(i32) + Send + Sync + 'static,
    ) {
        *self.exit.lock() = ExitBehavior {
            output: Box::new(output),
            exit: Arc::new(exit),
        };
    }

    /// Forget all variables and relationships and restore the default exit
    /// behaviour.
    pub fn reset(&self) {
        debug!("Resetting registry");
        self.variables.lock().clear();
        self.relationships.lock().clear();
        *self.exit.lock() = ExitBehavior::default();
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field(
                "variables",
                &self
                    .variables
                    .lock()
                    .iter()
                    .map(|v| v.name().to_string())
                    .collect::<Vec<_>>(),
            )
            .field("relationships", &self.relationships.lock().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RelationshipError;
    use crate::schema::Schema;
    use crate::variable::{Cardinality, Validator};

    struct Fixed {
        name: String,
        error: bool,
    }

    impl Validator for Fixed {
        fn validate(&self) -> Vec<ValidationResult> {
            vec![ValidationResult {
                name: self.name.clone(),
                description: "fixed".to_string(),
                schema: Schema::of_type("string"),
                default_value: None,
                explicit_value: Some("\"x\"".to_string()),
                using_default: false,
                error: self.error.then(|| crate::error::SpecError::Undefined {
                    name: self.name.clone(),
                }),
            }]
        }
    }

    impl Variable for Fixed {
        fn name(&self) -> &str {
            &self.name
        }

        fn description(&self) -> &str {
            "fixed"
        }

        fn cardinality(&self) -> Cardinality {
            Cardinality::Required
        }

        fn schema(&self) -> Schema {
            Schema::of_type("string")
        }

        fn default_value(&self) -> Option<String> {
            None
        }
    }

    fn fixed(name: &str, error: bool) -> Arc<dyn Variable> {
        Arc::new(Fixed {
            name: name.to_string(),
            error,
        })
    }

    #[test]
    fn test_registry_register() {
        let registry = Registry::new();
        assert!(registry.is_empty());

        registry.register(fixed("B", false));
        registry.register(fixed("A", false));

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("A"));
        let names: Vec<_> = registry.variables().iter().map(|v| v.name().to_string()).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_results_keep_registration_order() {
        let registry = Registry::new();
        registry.register(fixed("B", false));
        registry.register(fixed("A", true));

        let (results, ok) = registry.results();
        assert!(!ok);
        assert_eq!(results[0].name, "B");
        assert_eq!(results[1].name, "A");
    }

    #[test]
    fn test_empty_registry_is_valid() {
        let (report, ok) = Registry::new().validate_all();
        assert!(ok);
        assert_eq!(report, "ENVIRONMENT VARIABLES:\n");
    }

    #[test]
    fn test_apply_relationship() {
        let registry = Registry::new();
        registry.register(fixed("HOST", false));
        registry.register(fixed("PORT", false));

        registry.apply_relationship(RefersTo::new("PORT", "HOST")).unwrap();
        registry.apply_relationship(RefersTo::new("PORT", "HOST")).unwrap();
        registry.apply_relationship(RefersTo::new("PORT", "PORT")).unwrap();

        assert_eq!(registry.relationships().len(), 3);
        assert_eq!(registry.refers_to("PORT"), vec!["HOST", "PORT"]);
        assert!(registry.refers_to("HOST").is_empty());

        assert_eq!(
            registry.apply_relationship(RefersTo::new("PORT", "USER")),
            Err(RelationshipError::Unregistered("USER".to_string()))
        );
    }

    #[test]
    fn test_reset() {
        let registry = Registry::new();
        registry.register(fixed("HOST", false));
        registry.apply_relationship(RefersTo::new("HOST", "HOST")).unwrap();

        registry.reset();

        assert!(registry.is_empty());
        assert!(registry.relationships().is_empty());
    }
}
