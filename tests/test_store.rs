use chroma_gateway::domain::entities::collection::CollectionConfig;
use chroma_gateway::domain::error::DomainError;
use chroma_gateway::domain::ports::embedding_store::{AddBatch, EmbeddingStore};
use chroma_gateway::domain::values::distance::DistanceMetric;
use chroma_gateway::infrastructure::sqlite::embedding_store::{SqliteEmbeddingStore, DATABASE_FILE};

fn store() -> SqliteEmbeddingStore {
    SqliteEmbeddingStore::open(":memory:").unwrap()
}

fn batch(entries: &[(&str, &[f32])]) -> AddBatch {
    AddBatch {
        ids: entries.iter().map(|(id, _)| id.to_string()).collect(),
        embeddings: entries.iter().map(|(_, e)| e.to_vec()).collect(),
        documents: vec![None; entries.len()],
        metadatas: vec![None; entries.len()],
    }
}

#[test]
fn test_get_or_create_is_idempotent() {
    let s = store();
    let first = s.get_or_create_collection("docs", Some(CollectionConfig::cosine())).unwrap();
    let second = s.get_or_create_collection("docs", None).unwrap();
    assert_eq!(first.id, second.id);
}

#[test]
fn test_existing_collection_keeps_its_metric() {
    let s = store();
    s.get_or_create_collection("euclid", Some(CollectionConfig { metric: DistanceMetric::L2 }))
        .unwrap();
    let again = s
        .get_or_create_collection("euclid", Some(CollectionConfig::cosine()))
        .unwrap();
    assert_eq!(again.metric, DistanceMetric::L2);
}

#[test]
fn test_default_metric_is_cosine() {
    let s = store();
    let col = s.get_or_create_collection("plain", None).unwrap();
    assert_eq!(col.metric, DistanceMetric::Cosine);
}

#[test]
fn test_l2_collection_ranks_by_squared_distance() {
    let s = store();
    let col = s
        .get_or_create_collection("euclid", Some(CollectionConfig { metric: DistanceMetric::L2 }))
        .unwrap();
    s.add(&col, batch(&[("near", &[1.0, 1.0]), ("far", &[3.0, 4.0])])).unwrap();

    let res = s.query(&col, &[vec![0.0, 0.0]], 2).unwrap();
    assert_eq!(res.ids[0], vec!["near".to_string(), "far".to_string()]);
    assert!((res.distances[0][0] - 2.0).abs() < 1e-6);
    assert!((res.distances[0][1] - 25.0).abs() < 1e-6);
}

#[test]
fn test_query_returns_one_row_per_query_embedding() {
    let s = store();
    let col = s.get_or_create_collection("multi", None).unwrap();
    s.add(&col, batch(&[("a", &[1.0, 0.0]), ("b", &[0.0, 1.0])])).unwrap();

    let res = s.query(&col, &[vec![1.0, 0.0], vec![0.0, 1.0]], 1).unwrap();
    assert_eq!(res.ids.len(), 2);
    assert_eq!(res.ids[0], vec!["a".to_string()]);
    assert_eq!(res.ids[1], vec!["b".to_string()]);
}

#[test]
fn test_duplicate_ids_in_batch_rejected_atomically() {
    let s = store();
    let col = s.get_or_create_collection("docs", None).unwrap();
    let err = s
        .add(&col, batch(&[("a", &[1.0]), ("b", &[2.0]), ("a", &[3.0])]))
        .unwrap_err();
    assert!(matches!(err, DomainError::DuplicateId(ref id) if id == "a"));

    let res = s.query(&col, &[vec![1.0]], 10).unwrap();
    assert!(res.ids[0].is_empty());
}

#[test]
fn test_mixed_dimensions_in_batch_rejected() {
    let s = store();
    let col = s.get_or_create_collection("docs", None).unwrap();
    let err = s
        .add(&col, batch(&[("a", &[1.0, 0.0]), ("b", &[1.0])]))
        .unwrap_err();
    assert!(matches!(err, DomainError::DimensionMismatch { expected: 2, actual: 1 }));
}

#[test]
fn test_ragged_batch_rejected() {
    let s = store();
    let col = s.get_or_create_collection("docs", None).unwrap();
    let mut b = batch(&[("a", &[1.0])]);
    b.documents.push(Some("extra".into()));
    assert!(matches!(s.add(&col, b), Err(DomainError::InvalidInput(_))));
}

#[test]
fn test_zero_n_results_rejected() {
    let s = store();
    let col = s.get_or_create_collection("docs", None).unwrap();
    assert!(s.query(&col, &[vec![1.0]], 0).is_err());
}

#[test]
fn test_dimension_survives_delete_of_all_items() {
    let s = store();
    let col = s.get_or_create_collection("docs", None).unwrap();
    s.add(&col, batch(&[("a", &[1.0, 0.0])])).unwrap();
    s.delete(&col, &["a".to_string()]).unwrap();

    let err = s.add(&col, batch(&[("b", &[1.0, 0.0, 0.0])])).unwrap_err();
    assert!(matches!(err, DomainError::DimensionMismatch { .. }));
}

#[test]
fn test_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store");
    let path = path.to_str().unwrap();

    {
        let s = SqliteEmbeddingStore::open(path).unwrap();
        let col = s.get_or_create_collection("docs", Some(CollectionConfig::cosine())).unwrap();
        let mut b = batch(&[("a", &[0.6, 0.8])]);
        b.documents[0] = Some("kept".into());
        s.add(&col, b).unwrap();
    }
    assert!(dir.path().join("store").join(DATABASE_FILE).exists());

    let s = SqliteEmbeddingStore::open(path).unwrap();
    let col = s.get_or_create_collection("docs", None).unwrap();
    let res = s.query(&col, &[vec![0.6, 0.8]], 1).unwrap();
    assert_eq!(res.ids[0], vec!["a".to_string()]);
    assert_eq!(res.documents[0][0].as_deref(), Some("kept"));
}

#[test]
fn test_empty_batch_rejected() {
    let s = store();
    let col = s.get_or_create_collection("docs", None).unwrap();
    let err = s.add(&col, AddBatch::default()).unwrap_err();
    assert!(matches!(err, DomainError::InvalidInput(ref msg) if msg.contains("non-empty list")));
}

#[test]
fn test_non_finite_embedding_rejected() {
    let s = store();
    let col = s.get_or_create_collection("docs", None).unwrap();
    for bad in [f32::INFINITY, f32::NEG_INFINITY, f32::NAN] {
        let err = s
            .add(&col, batch(&[("real", &[0.0, 1.0]), ("huge", &[bad, 0.0])]))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(ref msg) if msg.contains("'huge'")));
    }

    let res = s.query(&col, &[vec![0.0, 1.0]], 10).unwrap();
    assert!(res.ids[0].is_empty());
}

#[test]
fn test_non_finite_query_rejected() {
    let s = store();
    let col = s.get_or_create_collection("docs", None).unwrap();
    s.add(&col, batch(&[("a", &[0.0, 1.0])])).unwrap();
    assert!(matches!(
        s.query(&col, &[vec![f32::INFINITY, 0.0]], 1),
        Err(DomainError::InvalidInput(_))
    ));
}

#[test]
fn test_empty_metadata_rejected() {
    let s = store();
    let col = s.get_or_create_collection("docs", None).unwrap();
    let mut b = batch(&[("a", &[1.0])]);
    b.metadatas[0] = Some(Default::default());
    let err = s.add(&col, b).unwrap_err();
    assert!(matches!(err, DomainError::InvalidInput(ref msg) if msg.contains("non-empty dict")));
}
