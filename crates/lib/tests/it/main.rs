/*! Integration tests for pbxgraph.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - collection: Identifier allocation and removal
 * - relation: Bidirectional consistency of relationship writes
 * - projector: Hydration, dehydration and corrupted documents
 * - natural_sort: Calibration fixtures and ordering laws
 * - project: The project façade, end to end
 * - codec: Reading and writing documents through files
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("pbxgraph=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod collection;
mod helpers;
mod natural_sort;
mod project;
mod projector;
mod relation;
