// Test fixtures for integration testing

/// A small blog post used across storage and CLI tests
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct SamplePost {
    pub id: &'static str,
    pub title: &'static str,
    pub content: &'static str,
    pub published: bool,
    pub categories: &'static [&'static str],
    pub tags: &'static [&'static str],
}

/// Five posts spread over two categories and a handful of tags
#[allow(dead_code)]
pub fn sample_posts() -> Vec<SamplePost> {
    vec![
        SamplePost {
            id: "hello-world",
            title: "Hello World",
            content: "# Hello World\n\nFirst post on the new blog.",
            published: true,
            categories: &["tech"],
            tags: &["intro"],
        },
        SamplePost {
            id: "hello-there",
            title: "Hello There",
            content: "A short note about [greetings](https://example.com).",
            published: false,
            categories: &["life"],
            tags: &["intro", "misc"],
        },
        SamplePost {
            id: "async-rust",
            title: "Async Rust in Practice",
            content: "## Tasks\n\nSpawning `tokio` tasks and joining them.",
            published: true,
            categories: &["tech"],
            tags: &["rust", "async"],
        },
        SamplePost {
            id: "garden-notes",
            title: "Garden Notes: Spring",
            content: "<p>Tomatoes</p> went in early this year.",
            published: true,
            categories: &["life"],
            tags: &["garden"],
        },
        SamplePost {
            id: "rust-errors",
            title: "Error Handling in Rust",
            content: "- thiserror\n- anyhow\n- plain enums",
            published: false,
            categories: &["tech"],
            tags: &["rust"],
        },
    ]
}
