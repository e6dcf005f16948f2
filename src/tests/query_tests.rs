#[cfg(test)]
mod tests {
    use crate::error::TreeError;
    use crate::tests::{batch, file, folder, test_pool};
    use crate::tree::query::parse_path;
    use crate::tree::{NodeType, TreeStore};

    #[tokio::test]
    async fn test_get_node_after_two_imports() {
        let (pool, _dir) = test_pool().await;
        let tree = TreeStore::new(pool);
        tree.import(&batch(vec![folder("f1", None)], "2022-01-01T00:00:00Z")).await.unwrap();
        tree.import(&batch(vec![file("file1", Some("f1"), 10)], "2022-01-02T00:00:00Z")).await.unwrap();

        let view = tree.get_node("f1").await.unwrap();
        assert_eq!(view.node_type, NodeType::Folder);
        assert_eq!(view.size, Some(10));
        assert_eq!(view.date, "2022-01-02T00:00:00Z");
        let children = view.children.unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].id, "file1");
        assert_eq!(children[0].parent_id.as_deref(), Some("f1"));
        assert!(children[0].children.is_none());

        tree.delete("f1", "2022-01-03T00:00:00Z").await.unwrap();
        assert!(matches!(tree.get_node("file1").await, Err(TreeError::NotFound(_))));
        assert!(matches!(tree.get_node("f1").await, Err(TreeError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_node_nested_sizes() {
        let (pool, _dir) = test_pool().await;
        let tree = TreeStore::new(pool);
        tree.import(&batch(
            vec![
                folder("root", None),
                folder("a", Some("root")),
                folder("b", Some("a")),
                folder("empty", Some("root")),
                file("x", Some("b"), 100),
                file("y", Some("a"), 20),
                file("z", Some("root"), 3),
            ],
            "2022-01-01T00:00:00Z",
        ))
        .await
        .unwrap();

        let root = tree.get_node("root").await.unwrap();
        assert_eq!(root.size, Some(123));
        let children = root.children.unwrap();
        let ids: Vec<&str> = children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "empty", "z"]);

        let a = &children[0];
        assert_eq!(a.size, Some(120));
        let empty = &children[1];
        assert_eq!(empty.size, Some(0));
        assert_eq!(empty.children.as_deref().map(|c| c.len()), Some(0));

        let file = tree.get_node("x").await.unwrap();
        assert_eq!(file.size, Some(100));
        assert!(file.children.is_none());
    }

    #[tokio::test]
    async fn test_updates_window_bounds_are_inclusive() {
        let (pool, _dir) = test_pool().await;
        let tree = TreeStore::new(pool);
        tree.import(&batch(vec![file("too_old", None, 1)], "2022-05-27T11:59:59Z")).await.unwrap();
        tree.import(&batch(vec![file("start", None, 1)], "2022-05-27T12:00:00Z")).await.unwrap();
        tree.import(&batch(vec![file("middle", None, 1)], "2022-05-28T00:00:00Z")).await.unwrap();
        tree.import(&batch(vec![file("end", None, 1)], "2022-05-28T12:00:00Z")).await.unwrap();
        tree.import(&batch(vec![file("too_new", None, 1)], "2022-05-28T12:00:01Z")).await.unwrap();

        let items = tree.updates("2022-05-28T12:00:00Z").await.unwrap();
        let mut ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec!["end", "middle", "start"]);
    }

    #[tokio::test]
    async fn test_updates_compare_instants_across_offsets() {
        let (pool, _dir) = test_pool().await;
        let tree = TreeStore::new(pool);
        tree.import(&batch(vec![file("f", None, 1)], "2022-05-28T15:00:00+03:00")).await.unwrap();

        assert_eq!(tree.updates("2022-05-28T12:00:00Z").await.unwrap().len(), 1);
        assert!(tree.updates("2022-05-28T11:59:59Z").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_updates_include_folders_with_aggregate_size() {
        let (pool, _dir) = test_pool().await;
        let tree = TreeStore::new(pool);
        tree.import(&batch(vec![folder("d", None), file("a", Some("d"), 7), file("b", Some("d"), 8)], "2022-05-28T00:00:00Z"))
            .await
            .unwrap();

        let items = tree.updates("2022-05-28T01:00:00Z").await.unwrap();
        assert_eq!(items.len(), 3);
        let d = items.iter().find(|i| i.id == "d").unwrap();
        assert_eq!(d.node_type, NodeType::Folder);
        assert_eq!(d.size, Some(15));
    }

    #[tokio::test]
    async fn test_updates_rejects_bad_date() {
        let (pool, _dir) = test_pool().await;
        let tree = TreeStore::new(pool);
        assert!(matches!(tree.updates("2022-05-28").await, Err(TreeError::InvalidDate(_))));
    }

    #[test]
    fn test_parse_path() {
        assert!(parse_path("home").unwrap().is_empty());
        assert!(parse_path("home/").unwrap().is_empty());
        assert!(parse_path("Home").unwrap().is_empty());
        assert_eq!(parse_path("home/a/b").unwrap(), vec!["a", "b"]);
        assert_eq!(parse_path("home/a/b/").unwrap(), vec!["a", "b"]);
        assert!(matches!(parse_path(""), Err(TreeError::InvalidPath(_))));
        assert!(matches!(parse_path("root/a"), Err(TreeError::InvalidPath(_))));
        assert!(matches!(parse_path("home//a"), Err(TreeError::InvalidPath(_))));
    }

    #[tokio::test]
    async fn test_list_path_children() {
        let (pool, _dir) = test_pool().await;
        let tree = TreeStore::new(pool);
        tree.import(&batch(
            vec![
                folder("docs", None),
                folder("work", Some("docs")),
                file("cv", Some("work"), 12),
                file("notes", Some("docs"), 4),
                file("top", None, 1),
            ],
            "2022-01-01T00:00:00Z",
        ))
        .await
        .unwrap();

        let roots = tree.list_path_children("home").await.unwrap();
        let ids: Vec<&str> = roots.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["docs", "top"]);
        assert_eq!(roots[0].size, Some(16));

        let docs = tree.list_path_children("home/docs/").await.unwrap();
        let ids: Vec<&str> = docs.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["notes", "work"]);
        assert_eq!(docs[1].size, Some(12));

        let work = tree.list_path_children("home/docs/work").await.unwrap();
        assert_eq!(work.len(), 1);
        assert_eq!(work[0].id, "cv");
    }

    #[tokio::test]
    async fn test_list_path_children_errors() {
        let (pool, _dir) = test_pool().await;
        let tree = TreeStore::new(pool);
        tree.import(&batch(vec![folder("docs", None), folder("work", Some("docs")), file("cv", Some("work"), 1)], "2022-01-01T00:00:00Z"))
            .await
            .unwrap();

        assert!(matches!(tree.list_path_children("home/missing").await, Err(TreeError::NotFound(_))));
        // work exists but is not a root
        assert!(matches!(tree.list_path_children("home/work").await, Err(TreeError::NotFound(_))));
        assert!(matches!(tree.list_path_children("home/docs/work/cv").await, Err(TreeError::InvalidPath(_))));
        assert!(matches!(tree.list_path_children("docs").await, Err(TreeError::InvalidPath(_))));
    }
}
