//! Integration tests
//!
//! Tests the full flow through the public API: configuration → paginator →
//! in-memory store → page envelope, and the CLI runner on JSON files.

use clap::Parser;
use docpage::cli::{Cli, Runner};
use docpage::{
    Filter, MemoryCollection, PaginateOptions, Paginator, PaginatorConfig, QuerySource,
    SoftDeleteModel, Visibility,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::io::Write;
use std::path::Path;
use tempfile::{tempdir, NamedTempFile};

fn articles() -> Vec<Value> {
    (1..=23)
        .map(|n| {
            json!({
                "_id": format!("a{n:02}"),
                "title": format!("Article {n}"),
                "rank": n,
                "author": if n % 2 == 0 { "u1" } else { "u2" },
                "deleted": n > 20,
            })
        })
        .collect()
}

fn collection(name: &str, docs: Vec<Value>) -> MemoryCollection {
    MemoryCollection::from_json(name, &Value::Array(docs).to_string()).unwrap()
}

fn write_json(dir: &Path, name: &str, value: &Value) -> String {
    let path = dir.join(name);
    std::fs::write(&path, value.to_string()).unwrap();
    path.display().to_string()
}

async fn run_cli(args: &[&str]) -> Value {
    let cli = Cli::try_parse_from(args).unwrap();
    let output = Runner::new(cli).execute().await.unwrap();
    serde_json::from_str(&output).unwrap()
}

// ============================================================================
// Library Integration Tests
// ============================================================================

#[tokio::test]
async fn test_walk_all_pages() {
    let store = collection("articles", articles());
    let paginator = Paginator::default();

    let mut seen = Vec::new();
    let mut page_no = 1;
    loop {
        let page = paginator
            .paginate(
                &store,
                None,
                PaginateOptions::new()
                    .with_sort("rank")
                    .with_page(page_no)
                    .with_limit(6),
            )
            .await
            .unwrap();

        assert_eq!(page.total, 20);
        assert_eq!(page.pages(), Some(4));
        seen.extend(page.docs.iter().map(|d| d["rank"].as_i64().unwrap()));

        if page_no >= page.pages().unwrap() {
            break;
        }
        page_no += 1;
    }

    assert_eq!(seen, (1..=20).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_soft_delete_visibilities() {
    let store = collection("articles", articles());
    let paginator = Paginator::default();
    let options = PaginateOptions::new().with_sort("rank").with_limit(0);

    let mut totals = Vec::new();
    for visibility in Visibility::ALL {
        let page = paginator
            .paginate_visibility(&store, visibility, None, options.clone())
            .await
            .unwrap();
        assert!(page.docs.is_empty());
        totals.push(page.total);
    }
    assert_eq!(totals, vec![20, 3, 23]);

    // The store families agree with what the paginator reports.
    assert_eq!(store.deleted().count(&Filter::new()).await.unwrap(), 3);
}

#[tokio::test]
async fn test_lean_populated_page_from_yaml_config() {
    let config = PaginatorConfig::from_yaml_str(
        r#"
defaults:
  lean: true
  limit: 2
  sort: "-rank"
  populate: author
"#,
    )
    .unwrap();

    let store = collection("articles", articles());
    let users = collection(
        "users",
        vec![json!({"_id": "u1", "name": "Ada"}), json!({"_id": "u2", "name": "Alan"})],
    );
    store.relate("author", &users).await;

    let page = Paginator::new(config)
        .paginate(&store, Filter::new().with("author", "u1"), PaginateOptions::new())
        .await
        .unwrap();

    assert_eq!(page.total, 10);
    assert_eq!(page.offset(), Some(0));
    let value = serde_json::to_value(&page).unwrap();
    assert_eq!(
        value["docs"],
        json!([
            {"_id": "a20", "id": "a20", "title": "Article 20", "rank": 20, "author": {"_id": "u1", "name": "Ada"}, "deleted": false},
            {"_id": "a18", "id": "a18", "title": "Article 18", "rank": 18, "author": {"_id": "u1", "name": "Ada"}, "deleted": false}
        ])
    );
}

#[tokio::test]
async fn test_concurrent_callers_share_a_paginator() {
    let store = std::sync::Arc::new(collection("articles", articles()));
    let paginator = Paginator::default();

    let handles: Vec<_> = (1..=4)
        .map(|page| {
            let store = store.clone();
            let paginator = paginator.clone();
            tokio::spawn(async move {
                paginator
                    .paginate(
                        &store,
                        None,
                        PaginateOptions::new().with_sort("rank").with_page(page).with_limit(5),
                    )
                    .await
                    .unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let page = handle.await.unwrap();
        let first = page.docs[0]["rank"].as_i64().unwrap();
        assert_eq!(first, i as i64 * 5 + 1);
    }
}

// ============================================================================
// CLI Integration Tests
// ============================================================================

#[tokio::test]
async fn test_cli_query_page_mode() {
    let dir = tempdir().unwrap();
    let data = write_json(dir.path(), "articles.json", &Value::Array(articles()));

    let page = run_cli(&[
        "docpage", "query", "--data", &data, "--sort", "rank", "--page", "2", "--limit", "5",
        "--select", "rank",
    ])
    .await;

    assert_eq!(page["total"], json!(20));
    assert_eq!(page["page"], json!(2));
    assert_eq!(page["pages"], json!(4));
    assert!(page.get("offset").is_none());
    assert_eq!(page["docs"][0], json!({"_id": "a06", "rank": 6}));
}

#[tokio::test]
async fn test_cli_query_deleted_with_filter_and_populate() {
    let dir = tempdir().unwrap();
    let data = write_json(dir.path(), "articles.json", &Value::Array(articles()));
    let users = write_json(
        dir.path(),
        "users.json",
        &json!([{"_id": "u1", "name": "Ada"}, {"_id": "u2", "name": "Alan"}]),
    );
    let populate = format!("author={users}");

    let page = run_cli(&[
        "docpage",
        "query",
        "--data",
        &data,
        "--visibility",
        "deleted",
        "--filter",
        r#"{"rank": {"$gte": 22}}"#,
        "--populate",
        &populate,
        "--lean",
        "--sort",
        "rank",
    ])
    .await;

    assert_eq!(page["total"], json!(2));
    assert_eq!(page["offset"], json!(0));
    assert_eq!(page["docs"][0]["id"], json!("a22"));
    assert_eq!(page["docs"][0]["author"]["name"], json!("Ada"));
    assert_eq!(page["docs"][1]["author"]["name"], json!("Alan"));
}

#[tokio::test]
async fn test_cli_config_file_defaults() {
    let dir = tempdir().unwrap();
    let data = write_json(dir.path(), "articles.json", &Value::Array(articles()));
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "with_deleted:\n  limit: 0\n  page: 1").unwrap();
    let config_path = config.path().display().to_string();

    let page = run_cli(&[
        "docpage",
        "-C",
        &config_path,
        "query",
        "--data",
        &data,
        "--visibility",
        "with-deleted",
    ])
    .await;

    assert_eq!(
        page,
        json!({"docs": [], "total": 23, "limit": 0, "page": 1, "pages": 1})
    );

    let printed = run_cli(&["docpage", "-C", &config_path, "config"]).await;
    assert_eq!(printed["with_deleted"], json!({"limit": 0, "page": 1}));
}

#[tokio::test]
async fn test_cli_missing_data_file() {
    let cli = Cli::try_parse_from(["docpage", "query", "--data", "/nonexistent/docs.json"]).unwrap();
    let err = Runner::new(cli).execute().await.unwrap_err();
    assert!(err.to_string().contains("/nonexistent/docs.json"));
}

#[tokio::test]
async fn test_cli_bad_populate_argument() {
    let dir = tempdir().unwrap();
    let data = write_json(dir.path(), "articles.json", &Value::Array(articles()));

    let cli = Cli::try_parse_from(["docpage", "query", "--data", &data, "--populate", "author"])
        .unwrap();
    let err = Runner::new(cli).execute().await.unwrap_err();
    assert!(err.to_string().contains("PATH=FILE"));
}
