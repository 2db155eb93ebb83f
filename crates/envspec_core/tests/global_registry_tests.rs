//! Integration tests for the process-wide registry.
//!
//! Everything touching the global registry lives in a single test so that
//! parallel test threads cannot observe each other's declarations.

use std::sync::Arc;

use envspec_core::{number, string, MapSource, Registry};

#[test]
fn test_global_registry_lifecycle() {
    envspec_core::teardown();
    assert!(Registry::global().is_empty());

    let source = MapSource::new().with("GLOBAL_PORT", "9000");

    let port = number::<u16>("GLOBAL_PORT", "<desc>")
        .with_source(source.clone())
        .required();
    let host = string("GLOBAL_HOST", "<desc>")
        .with_source(source)
        .optional();

    assert!(Arc::ptr_eq(&Registry::global(), &Registry::global()));
    assert_eq!(Registry::global().len(), 2);

    let (report, ok) = envspec_core::validate_all();
    assert!(ok);
    assert!(report.contains("GLOBAL_PORT"));
    assert!(report.contains("GLOBAL_HOST"));

    // Succeeds without exiting.
    envspec_core::validate_environment();

    assert_eq!(port.value(), 9000);
    assert_eq!(host.value(), None);

    envspec_core::teardown();
    assert!(Registry::global().is_empty());
    assert!(Registry::global().relationships().is_empty());
}
