//! Clearing the output folder while keeping excluded files

use sitemirror::reset_folder;

mod common;
use common::create_test_file_tree;

fn default_exclusions() -> Vec<String> {
    vec![".htaccess".to_string(), "sitemap.xml".to_string()]
}

#[tokio::test]
async fn test_reset_keeps_only_excluded_files() {
    let temp_dir = common::create_test_dir().unwrap();
    let root = temp_dir.path();
    create_test_file_tree(root, &["a.txt", "b.txt", "sitemap.xml", ".htaccess"])
        .await
        .unwrap();

    let report = reset_folder(root, &default_exclusions()).await;

    assert!(report.is_clean());
    assert_eq!(report.removed_files, 2);
    assert!(!root.join("a.txt").exists());
    assert!(!root.join("b.txt").exists());
    assert!(root.join("sitemap.xml").exists());
    assert!(root.join(".htaccess").exists());
}

#[tokio::test]
async fn test_reset_removes_emptied_directories() {
    let temp_dir = common::create_test_dir().unwrap();
    let root = temp_dir.path();
    create_test_file_tree(root, &["blog/post1.html", "blog/deep/post2.html", "index.html"])
        .await
        .unwrap();

    let report = reset_folder(root, &default_exclusions()).await;

    assert!(report.is_clean());
    assert_eq!(report.removed_files, 3);
    assert_eq!(report.removed_dirs, 2);
    assert!(!root.join("blog").exists());
    assert!(root.exists());
}

#[tokio::test]
async fn test_reset_keeps_directories_holding_excluded_files() {
    let temp_dir = common::create_test_dir().unwrap();
    let root = temp_dir.path();
    create_test_file_tree(root, &["legacy/.htaccess", "legacy/old.html"])
        .await
        .unwrap();

    let report = reset_folder(root, &default_exclusions()).await;

    assert!(root.join("legacy").join(".htaccess").exists());
    assert!(!root.join("legacy").join("old.html").exists());
    assert_eq!(report.preserved, vec![root.join("legacy").join(".htaccess")]);
}

#[tokio::test]
async fn test_reset_missing_root_is_noop() {
    let temp_dir = common::create_test_dir().unwrap();
    let report = reset_folder(&temp_dir.path().join("website"), &default_exclusions()).await;

    assert_eq!(report, sitemirror::ResetReport::default());
}

#[tokio::test]
async fn test_reset_twice_is_stable() {
    let temp_dir = common::create_test_dir().unwrap();
    let root = temp_dir.path();
    create_test_file_tree(root, &["a.txt", ".htaccess"]).await.unwrap();

    reset_folder(root, &default_exclusions()).await;
    let second = reset_folder(root, &default_exclusions()).await;

    assert_eq!(second.removed_files, 0);
    assert!(root.join(".htaccess").exists());
}
