use litebox::StorageError;
use litebox::storage::{ListingOptions, Node, RelativePath, Store, sanitize};
use tempfile::TempDir;
use tokio::io::AsyncReadExt;

// Helper to open a store on a fresh temporary root
async fn setup_store() -> (TempDir, Store) {
    let temp_dir = TempDir::new().unwrap();
    let store = Store::open(temp_dir.path().join("storage")).await.unwrap();
    (temp_dir, store)
}

fn find<'a>(nodes: &'a [Node], name: &str) -> Option<&'a Node> {
    nodes.iter().find(|n| n.name() == name)
}

#[tokio::test]
async fn test_write_then_read_round_trip() {
    let (_temp_dir, store) = setup_store().await;
    let content: Vec<u8> = (0..=255).cycle().take(10_000).collect();

    let written = store
        .write_bytes(&sanitize("photos/2024"), "a.txt", &content)
        .await
        .unwrap();
    assert_eq!(written.size, content.len() as u64);
    assert_eq!(written.path.as_string(), "photos/2024/a.txt");

    let mut opened = store.read_file(&sanitize("photos/2024/a.txt")).await.unwrap();
    assert_eq!(opened.size, content.len() as u64);

    let mut read_back = Vec::new();
    opened.reader.read_to_end(&mut read_back).await.unwrap();
    assert_eq!(read_back, content);
}

#[tokio::test]
async fn test_overwrite_keeps_latest_content() {
    let (_temp_dir, store) = setup_store().await;
    let folder = sanitize("docs");

    store.write_bytes(&folder, "note.txt", b"first version, long").await.unwrap();
    store.write_bytes(&folder, "note.txt", b"second").await.unwrap();

    let tree = store.list_tree().await.unwrap();
    let docs = find(&tree, "docs").unwrap();
    assert_eq!(docs.children().len(), 1);
    assert_eq!(docs.children()[0].size(), 6);
    assert_eq!(store.read_to_vec(&sanitize("docs/note.txt")).await.unwrap(), b"second");
}

#[tokio::test]
async fn test_create_folder_creates_ancestors_once() {
    let (_temp_dir, store) = setup_store().await;
    let path = sanitize("x/y");

    store.create_folder(&path).await.unwrap();
    assert!(store.root().join("x").is_dir());
    assert!(store.root().join("x/y").is_dir());

    let again = store.create_folder(&path).await;
    assert!(matches!(again, Err(StorageError::AlreadyExists(p)) if p == "x/y"));
}

#[tokio::test]
async fn test_remove_folder_deletes_subtree() {
    let (_temp_dir, store) = setup_store().await;
    store.write_bytes(&sanitize("x"), "a.bin", b"aaaa").await.unwrap();
    store.write_bytes(&sanitize("x/deep/er"), "b.bin", b"bb").await.unwrap();
    store.create_folder(&sanitize("x/empty")).await.unwrap();
    store.write_bytes(&RelativePath::root(), "keep.txt", b"k").await.unwrap();

    store.remove(&sanitize("x")).await.unwrap();

    let tree = store.list_tree().await.unwrap();
    assert!(find(&tree, "x").is_none());
    assert!(find(&tree, "keep.txt").is_some());
    assert!(!store.root().join("x").exists());
}

#[tokio::test]
async fn test_remove_missing_is_not_found() {
    let (_temp_dir, store) = setup_store().await;
    store.write_bytes(&sanitize("docs"), "a.txt", b"a").await.unwrap();
    let before = store.list_tree().await.unwrap();

    let result = store.remove(&sanitize("missing")).await;

    assert!(matches!(result, Err(StorageError::NotFound(p)) if p == "missing"));
    assert_eq!(store.list_tree().await.unwrap(), before);
}

#[tokio::test]
async fn test_read_missing_is_not_found() {
    let (_temp_dir, store) = setup_store().await;

    let result = store.read_file(&sanitize("nope.txt")).await;

    assert!(matches!(result, Err(StorageError::NotFound(_))));
}

#[tokio::test]
async fn test_folder_size_is_recursive_total() {
    let (_temp_dir, store) = setup_store().await;
    let docs = sanitize("docs");
    store.write_bytes(&docs, "one.bin", &[1u8; 100]).await.unwrap();
    store.write_bytes(&docs, "two.bin", &[2u8; 200]).await.unwrap();
    store.write_bytes(&sanitize("docs/sub"), "three.bin", &[3u8; 50]).await.unwrap();

    let tree = store.list_tree().await.unwrap();

    let docs = find(&tree, "docs").unwrap();
    assert!(docs.is_folder());
    assert_eq!(docs.size(), 350);
    assert_eq!(find(docs.children(), "sub").unwrap().size(), 50);
}

#[tokio::test]
async fn test_folder_of_two_files_totals_300() {
    let (_temp_dir, store) = setup_store().await;
    let docs = sanitize("docs");
    store.write_bytes(&docs, "a", &[0u8; 100]).await.unwrap();
    store.write_bytes(&docs, "b", &[0u8; 200]).await.unwrap();

    let tree = store.list_tree().await.unwrap();

    assert_eq!(find(&tree, "docs").unwrap().size(), 300);
}

#[tokio::test]
async fn test_listing_reports_relative_paths() {
    let (_temp_dir, store) = setup_store().await;
    store.write_bytes(&sanitize("a/b"), "c.txt", b"c").await.unwrap();
    store.write_bytes(&RelativePath::root(), "top.txt", b"t").await.unwrap();

    let json = serde_json::to_value(store.list_tree().await.unwrap()).unwrap();
    let entries = json.as_array().unwrap();

    let top = entries.iter().find(|e| e["name"] == "top.txt").unwrap();
    assert_eq!(top["type"], "file");
    assert_eq!(top["path"], "top.txt");

    let a = entries.iter().find(|e| e["name"] == "a").unwrap();
    assert_eq!(a["type"], "folder");
    assert_eq!(a["children"][0]["children"][0]["path"], "a/b/c.txt");
}

#[tokio::test]
async fn test_sorted_listing() {
    let temp_dir = TempDir::new().unwrap();
    let store = Store::open(temp_dir.path())
        .await
        .unwrap()
        .with_listing_options(ListingOptions { sort_by_name: true });

    for name in ["delta", "alpha", "charlie", "bravo"] {
        store.write_bytes(&sanitize("dir"), name, b"x").await.unwrap();
        store.write_bytes(&RelativePath::root(), name, b"x").await.unwrap();
    }

    let tree = store.list_tree().await.unwrap();
    let top: Vec<&str> = tree.iter().map(Node::name).collect();
    assert_eq!(top, vec!["alpha", "bravo", "charlie", "delta", "dir"]);

    let dir = find(&tree, "dir").unwrap();
    let inner: Vec<&str> = dir.children().iter().map(Node::name).collect();
    assert_eq!(inner, vec!["alpha", "bravo", "charlie", "delta"]);
}

#[tokio::test]
async fn test_traversal_stays_inside_root() {
    let (temp_dir, store) = setup_store().await;
    let outside = temp_dir.path().join("outside.txt");

    for raw in ["../outside.txt", "..\\outside.txt", "../../..\\../outside.txt"] {
        let folder = sanitize(raw);
        assert!(folder.to_path(store.root()).starts_with(store.root()));

        store.write_bytes(&folder, "probe.txt", b"p").await.unwrap();
    }

    assert!(!outside.exists());
    assert!(store.root().join("outside.txt/probe.txt").is_file());
    assert!(!temp_dir.path().join("probe.txt").exists());
}

#[tokio::test]
async fn test_empty_path_targets_root() {
    let (_temp_dir, store) = setup_store().await;

    assert_eq!(sanitize("").to_path(store.root()), store.root());
    let result = store.create_folder(&sanitize("")).await;
    assert!(matches!(result, Err(StorageError::AlreadyExists(_))));
}

#[tokio::test]
async fn test_concurrent_writes_to_distinct_folders() {
    let (_temp_dir, store) = setup_store().await;

    let mut tasks = Vec::new();
    for i in 0..8 {
        let store = store.clone();
        tasks.push(tokio::spawn(async move {
            let folder = sanitize(&format!("batch/{}", i));
            store.write_bytes(&folder, "data.bin", &vec![0u8; i * 10]).await
        }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let tree = store.list_tree().await.unwrap();
    let batch = find(&tree, "batch").unwrap();
    assert_eq!(batch.children().len(), 8);
    assert_eq!(batch.size(), (0..8).map(|i| i * 10).sum::<u64>());
}
