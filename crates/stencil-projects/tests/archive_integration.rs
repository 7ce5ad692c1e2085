//! Archive source integration tests against a local HTTP server

mod common;

use common::*;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde_json::Value;
use std::io::{Cursor, Write};
use stencil_projects::{ArchiveFetcher, Error, TemplateAnswers};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn tar_gz_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
    for (name, contents) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(contents.len() as u64);
        header.set_mode(0o644);
        builder
            .append_data(&mut header, name, contents.as_bytes())
            .unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap()
}

fn zip_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    for (name, contents) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(contents.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

fn entries() -> Vec<(&'static str, &'static str)> {
    vec![
        ("template/xx-template/package.json", ARCHIVE_MANIFEST),
        ("template/xx-template/src/index.js", "export default {}\n"),
        ("template/xx-template-lite/package.json", "{}"),
        ("template/admin/package.json", "{}"),
        ("README.md", "# templates\n"),
    ]
}

async fn serve(body: Vec<u8>, route: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .mount(&server)
        .await;
    server
}

fn fetcher(url: String) -> ArchiveFetcher {
    ArchiveFetcher::new(&default_config()).unwrap().with_url(url)
}

#[tokio::test]
async fn test_fetch_tar_gz_renders_manifest() {
    let server = serve(tar_gz_bytes(&entries()), "/templates.tar.gz").await;
    let ws = Workspace::new();

    let report = fetcher(format!("{}/templates.tar.gz", server.uri()))
        .fetch(&ws.root, "demo", &answers("xx-template"))
        .await
        .unwrap();

    assert_eq!(report.files_extracted, 2);
    assert!(report.manifest_rendered);
    assert!(ws.root.join("demo/src/index.js").exists());
    assert!(!ws.root.join("demo/template").exists());
    assert_eq!(ws.entries(), vec!["demo"]);

    let manifest: Value =
        serde_json::from_str(&std::fs::read_to_string(ws.root.join("demo/package.json")).unwrap())
            .unwrap();
    // `name` is the target directory, not the prompted package name
    assert_eq!(manifest["name"], "demo");
    assert_eq!(manifest["description"], "Demo application");
    assert_eq!(manifest["author"], "Jane Doe");
}

#[tokio::test]
async fn test_fetch_zip() {
    let server = serve(zip_bytes(&entries()), "/templates.zip").await;
    let ws = Workspace::new();

    let report = fetcher(format!("{}/templates.zip", server.uri()))
        .fetch(&ws.root, "demo", &answers("xx-template"))
        .await
        .unwrap();

    assert_eq!(report.files_extracted, 2);
    assert_eq!(
        std::fs::read_to_string(ws.root.join("demo/src/index.js")).unwrap(),
        "export default {}\n"
    );
}

#[tokio::test]
async fn test_answers_with_quotes_render_valid_json() {
    let server = serve(tar_gz_bytes(&entries()), "/templates.tar.gz").await;
    let ws = Workspace::new();
    let answers = TemplateAnswers {
        description: r#"A "quoted" app in C:\apps"#.to_string(),
        author: r#"Jane "JD" Doe"#.to_string(),
        ..answers("xx-template")
    };

    fetcher(format!("{}/templates.tar.gz", server.uri()))
        .fetch(&ws.root, "demo", &answers)
        .await
        .unwrap();

    let manifest: Value =
        serde_json::from_str(&std::fs::read_to_string(ws.root.join("demo/package.json")).unwrap())
            .unwrap();
    assert_eq!(manifest["description"], r#"A "quoted" app in C:\apps"#);
    assert_eq!(manifest["author"], r#"Jane "JD" Doe"#);
}

#[cfg(unix)]
#[tokio::test]
async fn test_read_only_manifest_in_zip_is_rendered() {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let read_only = zip::write::SimpleFileOptions::default().unix_permissions(0o444);
    writer
        .start_file("template/xx-template/package.json", read_only)
        .unwrap();
    writer.write_all(ARCHIVE_MANIFEST.as_bytes()).unwrap();
    let body = writer.finish().unwrap().into_inner();

    let server = serve(body, "/templates.zip").await;
    let ws = Workspace::new();

    let report = fetcher(format!("{}/templates.zip", server.uri()))
        .fetch(&ws.root, "demo", &answers("xx-template"))
        .await
        .unwrap();

    assert!(report.manifest_rendered);
    let manifest: Value =
        serde_json::from_str(&std::fs::read_to_string(ws.root.join("demo/package.json")).unwrap())
            .unwrap();
    assert_eq!(manifest["name"], "demo");
}

#[tokio::test]
async fn test_archive_without_manifest() {
    let server = serve(
        tar_gz_bytes(&[("template/plain/index.html", "<html></html>")]),
        "/t.tar.gz",
    )
    .await;
    let ws = Workspace::new();

    let report = fetcher(format!("{}/t.tar.gz", server.uri()))
        .fetch(&ws.root, "site", &answers("plain"))
        .await
        .unwrap();

    assert!(!report.manifest_rendered);
    assert!(ws.root.join("site/index.html").exists());
}

#[tokio::test]
async fn test_missing_template_leaves_nothing_behind() {
    let server = serve(zip_bytes(&entries()), "/templates.zip").await;
    let ws = Workspace::new();

    let err = fetcher(format!("{}/templates.zip", server.uri()))
        .fetch(&ws.root, "demo", &answers("does-not-exist"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::TemplateNotFound { .. }));
    assert!(ws.entries().is_empty());
}

#[tokio::test]
async fn test_http_error_is_download_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let ws = Workspace::new();

    let err = fetcher(format!("{}/missing.zip", server.uri()))
        .fetch(&ws.root, "demo", &answers("xx-template"))
        .await
        .unwrap_err();

    match err {
        Error::Download { message, .. } => assert!(message.contains("404")),
        other => panic!("unexpected error: {other}"),
    }
    assert!(ws.entries().is_empty());
}

#[tokio::test]
async fn test_non_archive_body_is_rejected() {
    let server = serve(b"<html>login</html>".to_vec(), "/templates.zip").await;
    let ws = Workspace::new();

    let err = fetcher(format!("{}/templates.zip", server.uri()))
        .fetch(&ws.root, "demo", &answers("xx-template"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Archive { .. }));
}
