use crate::domain::entities::collection::{Collection, CollectionConfig};
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_store::{AddBatch, EmbeddingStore, QueryResult};
use crate::domain::values::collection_name::CollectionName;
use crate::domain::values::distance::DistanceMetric;
use crate::domain::values::metadata::Metadata;
use crate::infrastructure::sqlite::migrations::run_migrations;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashSet;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

pub const MEMORY_PATH: &str = ":memory:";
pub const DATABASE_FILE: &str = "chroma.sqlite3";

/// Embedding store persisted in a single SQLite database. Queries are exact
/// scans over the collection ranked by the collection's metric.
pub struct SqliteEmbeddingStore {
    conn: Mutex<Connection>,
}

struct StoredRow {
    id: String,
    distance: f32,
    document: Option<String>,
    metadata: Option<String>,
}

impl SqliteEmbeddingStore {
    pub fn new(conn: Connection) -> Result<Self, DomainError> {
        run_migrations(&conn).map_err(DomainError::Store)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens the store under the `persist_path` directory, creating it if
    /// needed. `:memory:` yields a store that lives as long as the process.
    pub fn open(persist_path: &str) -> Result<Self, DomainError> {
        if persist_path == MEMORY_PATH {
            return Self::new(Connection::open_in_memory()?);
        }

        let dir = Path::new(persist_path);
        std::fs::create_dir_all(dir).map_err(|e| {
            DomainError::Store(format!("cannot create storage directory {persist_path}: {e}"))
        })?;
        let conn = Connection::open(dir.join(DATABASE_FILE))?;
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))?;
        debug!(path = persist_path, "opened sqlite embedding store");
        Self::new(conn)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, DomainError> {
        self.conn.lock().map_err(|e| DomainError::Store(e.to_string()))
    }

    fn stored_dimension(conn: &Connection, collection_id: &str) -> Result<Option<usize>, DomainError> {
        let dim: Option<i64> = conn
            .query_row(
                "SELECT dimension FROM collections WHERE id = ?1",
                params![collection_id],
                |r| r.get::<_, Option<i64>>(0),
            )
            .optional()?
            .flatten();
        Ok(dim.map(|d| d as usize))
    }

    fn serialize_vector(v: &[f32]) -> Vec<u8> {
        v.iter().flat_map(|f| f.to_le_bytes()).collect()
    }

    fn deserialize_vector(bytes: &[u8]) -> Vec<f32> {
        bytes
            .chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect()
    }

    fn check_batch(batch: &AddBatch) -> Result<usize, DomainError> {
        let n = batch.ids.len();
        if batch.embeddings.len() != n || batch.documents.len() != n || batch.metadatas.len() != n {
            return Err(DomainError::InvalidInput(format!(
                "batch sequences differ in length: {} ids, {} embeddings, {} documents, {} metadatas",
                n,
                batch.embeddings.len(),
                batch.documents.len(),
                batch.metadatas.len()
            )));
        }

        let mut seen = HashSet::with_capacity(n);
        for id in &batch.ids {
            if id.is_empty() {
                return Err("ids must be non-empty strings".into());
            }
            if !seen.insert(id.as_str()) {
                return Err(DomainError::DuplicateId(id.clone()));
            }
        }

        let dim = batch.embeddings.first().map(Vec::len).unwrap_or(0);
        if dim == 0 {
            return Err("embeddings must be non-empty".into());
        }
        if let Some(bad) = batch.embeddings.iter().find(|e| e.len() != dim) {
            return Err(DomainError::DimensionMismatch {
                expected: dim,
                actual: bad.len(),
            });
        }
        for (id, embedding) in batch.ids.iter().zip(&batch.embeddings) {
            Self::check_finite(embedding)
                .map_err(|e| DomainError::InvalidInput(format!("embedding for id '{id}': {e}")))?;
        }
        if batch.metadatas.iter().flatten().any(|m| m.is_empty()) {
            return Err("Expected metadata to be a non-empty dict".into());
        }
        Ok(dim)
    }

    fn check_finite(embedding: &[f32]) -> Result<(), String> {
        match embedding.iter().position(|v| !v.is_finite()) {
            Some(pos) => Err(format!("component {pos} is not a finite f32")),
            None => Ok(()),
        }
    }
}

impl EmbeddingStore for SqliteEmbeddingStore {
    fn get_or_create_collection(
        &self,
        name: &str,
        config: Option<CollectionConfig>,
    ) -> Result<Collection, DomainError> {
        let name = CollectionName::parse(name)?;
        let conn = self.lock()?;

        let existing = conn
            .query_row(
                "SELECT id, metric, created_at FROM collections WHERE name = ?1",
                params![name.as_str()],
                |r| Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?, r.get::<_, String>(2)?)),
            )
            .optional()?;

        if let Some((id, metric, created_at)) = existing {
            let metric: DistanceMetric = metric.parse().map_err(DomainError::Store)?;
            let created_at = DateTime::parse_from_rfc3339(&created_at)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| DomainError::Store(format!("bad created_at for {name}: {e}")))?;
            return Ok(Collection {
                id,
                name,
                metric,
                created_at,
            });
        }

        let collection = Collection::new(name, config.unwrap_or_default().metric);
        conn.execute(
            "INSERT INTO collections (id, name, metric, dimension, created_at) VALUES (?1, ?2, ?3, NULL, ?4)",
            params![
                collection.id,
                collection.name.as_str(),
                collection.metric.to_string(),
                collection.created_at.to_rfc3339()
            ],
        )?;
        debug!(collection = %collection.name, metric = %collection.metric, "created collection");
        Ok(collection)
    }

    fn add(&self, collection: &Collection, batch: AddBatch) -> Result<(), DomainError> {
        if batch.is_empty() {
            return Err("Expected IDs to be a non-empty list".into());
        }
        let dim = Self::check_batch(&batch)?;

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        match Self::stored_dimension(&tx, &collection.id)? {
            Some(expected) if expected != dim => {
                return Err(DomainError::DimensionMismatch {
                    expected,
                    actual: dim,
                });
            }
            Some(_) => {}
            None => {
                tx.execute(
                    "UPDATE collections SET dimension = ?1 WHERE id = ?2",
                    params![dim as i64, collection.id],
                )?;
            }
        }

        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO embeddings (collection_id, id, vector, document, metadata)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for i in 0..batch.len() {
                let metadata = batch.metadatas[i]
                    .as_ref()
                    .map(serde_json::to_string)
                    .transpose()?;
                stmt.execute(params![
                    collection.id,
                    batch.ids[i],
                    Self::serialize_vector(&batch.embeddings[i]),
                    batch.documents[i],
                    metadata
                ])?;
            }
        }
        tx.commit()?;

        debug!(collection = %collection.name, count = batch.len(), "added embeddings");
        Ok(())
    }

    fn query(
        &self,
        collection: &Collection,
        query_embeddings: &[Vec<f32>],
        n_results: usize,
    ) -> Result<QueryResult, DomainError> {
        if n_results == 0 {
            return Err("n_results must be positive".into());
        }
        for query in query_embeddings {
            Self::check_finite(query)
                .map_err(|e| DomainError::InvalidInput(format!("query embedding: {e}")))?;
        }

        let conn = self.lock()?;
        let mut result = QueryResult::default();

        let Some(dim) = Self::stored_dimension(&conn, &collection.id)? else {
            for _ in query_embeddings {
                result.ids.push(vec![]);
                result.distances.push(vec![]);
                result.documents.push(vec![]);
                result.metadatas.push(vec![]);
            }
            return Ok(result);
        };

        if let Some(bad) = query_embeddings.iter().find(|q| q.len() != dim) {
            return Err(DomainError::DimensionMismatch {
                expected: dim,
                actual: bad.len(),
            });
        }

        let mut stmt = conn.prepare(
            "SELECT id, vector, document, metadata FROM embeddings WHERE collection_id = ?1",
        )?;
        let stored: Vec<(String, Vec<f32>, Option<String>, Option<String>)> = stmt
            .query_map(params![collection.id], |row| {
                let blob: Vec<u8> = row.get(1)?;
                Ok((row.get(0)?, Self::deserialize_vector(&blob), row.get(2)?, row.get(3)?))
            })?
            .collect::<Result<_, _>>()?;

        for query in query_embeddings {
            let mut ranked: Vec<StoredRow> = stored
                .iter()
                .map(|(id, vector, document, metadata)| StoredRow {
                    id: id.clone(),
                    distance: collection.metric.distance(query, vector),
                    document: document.clone(),
                    metadata: metadata.clone(),
                })
                .collect();
            ranked.sort_by(|a, b| {
                a.distance
                    .partial_cmp(&b.distance)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.id.cmp(&b.id))
            });
            ranked.truncate(n_results);

            let mut ids = Vec::with_capacity(ranked.len());
            let mut distances = Vec::with_capacity(ranked.len());
            let mut documents = Vec::with_capacity(ranked.len());
            let mut metadatas = Vec::with_capacity(ranked.len());
            for row in ranked {
                let metadata: Option<Metadata> = row
                    .metadata
                    .as_deref()
                    .map(serde_json::from_str)
                    .transpose()?;
                ids.push(row.id);
                distances.push(row.distance);
                documents.push(row.document);
                metadatas.push(metadata);
            }
            result.ids.push(ids);
            result.distances.push(distances);
            result.documents.push(documents);
            result.metadatas.push(metadatas);
        }

        debug!(
            collection = %collection.name,
            queries = query_embeddings.len(),
            n_results,
            scanned = stored.len(),
            "queried embeddings"
        );
        Ok(result)
    }

    fn delete(&self, collection: &Collection, ids: &[String]) -> Result<(), DomainError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let mut removed = 0;
        {
            let mut stmt =
                tx.prepare("DELETE FROM embeddings WHERE collection_id = ?1 AND id = ?2")?;
            for id in ids {
                removed += stmt.execute(params![collection.id, id])?;
            }
        }
        tx.commit()?;

        debug!(collection = %collection.name, requested = ids.len(), removed, "deleted embeddings");
        Ok(())
    }
}
