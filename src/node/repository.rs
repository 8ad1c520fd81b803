//! SQLite-backed node repository.

use async_trait::async_trait;
use sqlx::{QueryBuilder, SqlitePool};
use tracing::debug;

use super::gateway::NodeGateway;
use super::order::{fold_case, sort_key};
use super::types::{NewNode, Node, NodeUpdate};
use crate::datetime::now_db_string;
use crate::{CatalogError, Result};

const NODE_COLUMNS: &str =
    "id, name, type, parent_id, size, mime_type, created_at, updated_at";

/// Folder-first, then name in `compare_names` order: accent-stripped key,
/// folded name, lowercase first on case-only ties.
const LISTING_ORDER: &str =
    "ORDER BY CASE type WHEN 'FOLDER' THEN 0 ELSE 1 END, sort_key, name_folded, name DESC";

/// Name order alone, for folder-only queries.
const NAME_ORDER: &str = "ORDER BY sort_key, name_folded, name DESC";

/// Repository for node operations.
#[derive(Clone)]
pub struct NodeRepository {
    pool: SqlitePool,
}

impl NodeRepository {
    /// Create a new NodeRepository over the given pool.
    pub fn new(pool: &SqlitePool) -> Self {
        Self { pool: pool.clone() }
    }

    /// Delete every node. Used when reseeding.
    pub async fn delete_all(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM nodes")
            .execute(&self.pool)
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?;
        Ok(result.rows_affected())
    }
}

/// Escape LIKE wildcards so the text matches literally (escape char `\`).
fn like_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[async_trait]
impl NodeGateway for NodeRepository {
    async fn find_all(&self) -> Result<Vec<Node>> {
        let nodes = sqlx::query_as::<_, Node>(&format!(
            "SELECT {NODE_COLUMNS} FROM nodes {LISTING_ORDER}"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CatalogError::Database(e.to_string()))?;

        Ok(nodes)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Node>> {
        let node = sqlx::query_as::<_, Node>(&format!(
            "SELECT {NODE_COLUMNS} FROM nodes WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CatalogError::Database(e.to_string()))?;

        Ok(node)
    }

    async fn find_by_parent_id(
        &self,
        parent_id: Option<&str>,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Node>> {
        // `IS` matches NULL against NULL, so one statement covers the root level.
        let nodes = sqlx::query_as::<_, Node>(&format!(
            "SELECT {NODE_COLUMNS} FROM nodes WHERE parent_id IS ? {LISTING_ORDER} LIMIT ? OFFSET ?"
        ))
        .bind(parent_id)
        .bind(i64::from(limit))
        .bind(i64::from(offset))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CatalogError::Database(e.to_string()))?;

        Ok(nodes)
    }

    async fn find_folders(&self) -> Result<Vec<Node>> {
        let nodes = sqlx::query_as::<_, Node>(&format!(
            "SELECT {NODE_COLUMNS} FROM nodes WHERE type = 'FOLDER' {NAME_ORDER}"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CatalogError::Database(e.to_string()))?;

        Ok(nodes)
    }

    async fn search(&self, text: &str, limit: u32) -> Result<Vec<Node>> {
        let nodes = sqlx::query_as::<_, Node>(&format!(
            "SELECT {NODE_COLUMNS} FROM nodes WHERE name_folded LIKE ? ESCAPE '\\' {LISTING_ORDER} LIMIT ?"
        ))
        .bind(like_pattern(&fold_case(text)))
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CatalogError::Database(e.to_string()))?;

        Ok(nodes)
    }

    async fn count_by_parent_id(&self, parent_id: Option<&str>) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM nodes WHERE parent_id IS ?")
            .bind(parent_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        Ok(count.max(0) as u64)
    }

    async fn create(&self, node: &NewNode) -> Result<Node> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = now_db_string();

        // The parent check and the insert are a single statement, so a
        // concurrent delete of the parent cannot slip in between.
        let result = sqlx::query(
            "INSERT INTO nodes (id, name, name_folded, sort_key, type, parent_id, size, mime_type, created_at, updated_at)
             SELECT ?, ?, ?, ?, ?, ?, ?, ?, ?, ?
             WHERE ? IS NULL
                OR EXISTS (SELECT 1 FROM nodes WHERE id = ? AND type = 'FOLDER')",
        )
        .bind(&id)
        .bind(&node.name)
        .bind(fold_case(&node.name))
        .bind(sort_key(&node.name))
        .bind(node.node_type.as_str())
        .bind(node.parent_id.as_deref())
        .bind(node.size)
        .bind(&node.mime_type)
        .bind(&now)
        .bind(&now)
        .bind(node.parent_id.as_deref())
        .bind(node.parent_id.as_deref())
        .execute(&self.pool)
        .await
        .map_err(|e| CatalogError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::NotFound("Parent node".to_string()));
        }

        debug!(node_id = %id, "Inserted node");

        self.find_by_id(&id)
            .await?
            .ok_or_else(|| CatalogError::NotFound("Node".to_string()))
    }

    async fn update(&self, id: &str, update: &NodeUpdate) -> Result<Option<Node>> {
        if update.is_empty() {
            return self.find_by_id(id).await;
        }

        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE nodes SET ");
        let mut separated = query.separated(", ");

        if let Some(ref name) = update.name {
            separated.push("name = ");
            separated.push_bind_unseparated(name.clone());
            separated.push("name_folded = ");
            separated.push_bind_unseparated(fold_case(name));
            separated.push("sort_key = ");
            separated.push_bind_unseparated(sort_key(name));
        }

        if let Some(node_type) = update.node_type {
            separated.push("type = ");
            separated.push_bind_unseparated(node_type.as_str());
        }

        if let Some(ref parent_id) = update.parent_id {
            separated.push("parent_id = ");
            separated.push_bind_unseparated(parent_id.clone());
        }

        if let Some(size) = update.size {
            separated.push("size = ");
            separated.push_bind_unseparated(size);
        }

        if let Some(ref mime_type) = update.mime_type {
            separated.push("mime_type = ");
            separated.push_bind_unseparated(mime_type.clone());
        }

        separated.push("updated_at = ");
        separated.push_bind_unseparated(now_db_string());

        query.push(" WHERE id = ");
        query.push_bind(id);

        let result = query
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM nodes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeType;
    use crate::Database;

    async fn setup() -> (Database, NodeRepository) {
        let db = Database::open_in_memory().await.unwrap();
        let repo = NodeRepository::new(db.pool());
        (db, repo)
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("abc"), "%abc%");
        assert_eq!(like_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamps() {
        let (_db, repo) = setup().await;

        let node = repo
            .create(&NewNode::file("report.pdf").with_size(524_288).with_mime_type("application/pdf"))
            .await
            .unwrap();

        assert!(!node.id.is_empty());
        assert_eq!(node.name, "report.pdf");
        assert_eq!(node.node_type, NodeType::File);
        assert!(node.parent_id.is_none());
        assert_eq!(node.size, Some(524_288));
        assert_eq!(node.mime_type.as_deref(), Some("application/pdf"));
        assert!(node.created_at_datetime().is_some());
        assert_eq!(node.created_at, node.updated_at);
    }

    #[tokio::test]
    async fn test_create_under_missing_parent_is_rejected() {
        let (_db, repo) = setup().await;

        let result = repo.create(&NewNode::folder("x").with_parent("nope")).await;
        assert!(matches!(result, Err(CatalogError::NotFound(_))));
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_under_file_is_rejected() {
        let (_db, repo) = setup().await;
        let file = repo.create(&NewNode::file("a.txt")).await.unwrap();

        let result = repo.create(&NewNode::file("b.txt").with_parent(&file.id)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_find_by_id_not_found() {
        let (_db, repo) = setup().await;
        assert!(repo.find_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_all_folder_first_then_name() {
        let (_db, repo) = setup().await;
        repo.create(&NewNode::file("alpha.txt")).await.unwrap();
        repo.create(&NewNode::folder("zeta")).await.unwrap();
        repo.create(&NewNode::folder("Beta")).await.unwrap();
        repo.create(&NewNode::file("Gamma.txt")).await.unwrap();

        let names: Vec<_> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.name)
            .collect();

        assert_eq!(names, vec!["Beta", "zeta", "alpha.txt", "Gamma.txt"]);
    }

    #[tokio::test]
    async fn test_find_by_parent_id_root_and_paging() {
        let (_db, repo) = setup().await;
        let docs = repo.create(&NewNode::folder("Documents")).await.unwrap();
        repo.create(&NewNode::folder("Projects")).await.unwrap();
        repo.create(&NewNode::file("c.txt").with_parent(&docs.id)).await.unwrap();
        repo.create(&NewNode::file("a.txt").with_parent(&docs.id)).await.unwrap();
        repo.create(&NewNode::file("b.txt").with_parent(&docs.id)).await.unwrap();

        let roots = repo.find_by_parent_id(None, 100, 0).await.unwrap();
        assert_eq!(roots.len(), 2);
        assert_eq!(repo.count_by_parent_id(None).await.unwrap(), 2);

        let page = repo.find_by_parent_id(Some(docs.id.as_str()), 2, 1).await.unwrap();
        let names: Vec<_> = page.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["b.txt", "c.txt"]);
        assert_eq!(repo.count_by_parent_id(Some(docs.id.as_str())).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_find_folders_only() {
        let (_db, repo) = setup().await;
        repo.create(&NewNode::folder("b")).await.unwrap();
        repo.create(&NewNode::file("file")).await.unwrap();
        repo.create(&NewNode::folder("A")).await.unwrap();

        let folders = repo.find_folders().await.unwrap();
        let names: Vec<_> = folders.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["A", "b"]);
    }

    #[tokio::test]
    async fn test_search_case_insensitive_and_limited() {
        let (_db, repo) = setup().await;
        repo.create(&NewNode::file("Report-2024.pdf")).await.unwrap();
        repo.create(&NewNode::file("old_report.txt")).await.unwrap();
        repo.create(&NewNode::folder("Reports")).await.unwrap();
        repo.create(&NewNode::file("notes.txt")).await.unwrap();

        let hits = repo.search("REPORT", 50).await.unwrap();
        let names: Vec<_> = hits.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Reports", "old_report.txt", "Report-2024.pdf"]);

        let limited = repo.search("report", 1).await.unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[tokio::test]
    async fn test_search_folds_non_ascii_case() {
        let (_db, repo) = setup().await;
        repo.create(&NewNode::file("Ärger.txt")).await.unwrap();
        repo.create(&NewNode::file("éclair.md")).await.unwrap();
        repo.create(&NewNode::file("arger.txt")).await.unwrap();

        let hits = repo.search("ärger", 50).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Ärger.txt");

        let hits = repo.search("ÉCLAIR", 50).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "éclair.md");
    }

    #[tokio::test]
    async fn test_search_follows_rename() {
        let (_db, repo) = setup().await;
        let node = repo.create(&NewNode::file("draft.txt")).await.unwrap();

        repo.update(&node.id, &NodeUpdate::new().name("Übersicht.txt"))
            .await
            .unwrap();

        assert!(repo.search("draft", 50).await.unwrap().is_empty());
        assert_eq!(repo.search("ÜBERSICHT", 50).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_accented_names_sort_with_base_letter() {
        let (_db, repo) = setup().await;
        for name in ["zebra", "Éclair", "apple", "eclair"] {
            repo.create(&NewNode::folder(name)).await.unwrap();
        }

        let listed: Vec<_> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.name)
            .collect();
        assert_eq!(listed, vec!["apple", "eclair", "Éclair", "zebra"]);

        let folders: Vec<_> = repo
            .find_folders()
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.name)
            .collect();
        assert_eq!(folders, listed);
    }

    #[tokio::test]
    async fn test_search_wildcards_are_literal() {
        let (_db, repo) = setup().await;
        repo.create(&NewNode::file("100% done")).await.unwrap();
        repo.create(&NewNode::file("1000 done")).await.unwrap();

        let hits = repo.search("0%", 50).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "100% done");

        assert!(repo.search("_", 50).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_partial() {
        let (_db, repo) = setup().await;
        let node = repo
            .create(&NewNode::file("old.txt").with_mime_type("text/plain").with_size(5))
            .await
            .unwrap();

        let updated = repo
            .update(&node.id, &NodeUpdate::new().name("new.txt").mime_type(None::<String>))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "new.txt");
        assert!(updated.mime_type.is_none());
        assert_eq!(updated.size, Some(5));
        assert_eq!(updated.created_at, node.created_at);
        assert!(updated.updated_at >= node.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let (_db, repo) = setup().await;
        let result = repo.update("missing", &NodeUpdate::new().name("x")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let (_db, repo) = setup().await;
        let node = repo.create(&NewNode::folder("gone")).await.unwrap();

        assert!(repo.delete(&node.id).await.unwrap());
        assert!(!repo.delete(&node.id).await.unwrap());
        assert!(repo.find_by_id(&node.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_leaves_children_dangling() {
        let (_db, repo) = setup().await;
        let parent = repo.create(&NewNode::folder("parent")).await.unwrap();
        let child = repo
            .create(&NewNode::file("child").with_parent(&parent.id))
            .await
            .unwrap();

        repo.delete(&parent.id).await.unwrap();

        let orphan = repo.find_by_id(&child.id).await.unwrap().unwrap();
        assert_eq!(orphan.parent_id.as_deref(), Some(parent.id.as_str()));
    }

    #[tokio::test]
    async fn test_delete_all() {
        let (_db, repo) = setup().await;
        repo.create(&NewNode::folder("a")).await.unwrap();
        repo.create(&NewNode::folder("b")).await.unwrap();

        assert_eq!(repo.delete_all().await.unwrap(), 2);
        assert!(repo.find_all().await.unwrap().is_empty());
    }
}
