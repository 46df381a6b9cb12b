// Common test utilities and fixtures

pub mod fixtures;
pub mod helpers;

// Re-export commonly used items
// Note: Not every test binary uses every helper
#[allow(unused_imports)]
pub use fixtures::{sample_posts, SamplePost};
#[allow(unused_imports)]
pub use helpers::{
    create_test_services, linear_scan, manual_storage, seed_numbered_documents,
    seed_sample_posts,
};
