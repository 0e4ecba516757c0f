/*! Integration tests for Veneer.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - map: Tests for the DocMap container, paths, and values
 * - schema: Tests for schema building and declarations
 * - document: Tests for the Document type and its collaborator surfaces
 * - proxy: Tests for nested attribute access through AttributeProxy
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("veneer=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod map;
mod proxy;
