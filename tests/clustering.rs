use doccluster::{
    ClusterError, ClusteringAlgorithm, DotProduct, InMemoryCorpus, KMeans, KMeansConfig,
    NormalizedCosine, ResultSet, StoppingRule, TfIdf,
};
use std::sync::Arc;

fn two_topic_corpus() -> InMemoryCorpus {
    let mut corpus = InMemoryCorpus::new();
    corpus.add_document("Rust compiler, borrow checker and lifetimes");
    corpus.add_document("The borrow checker enforces ownership and lifetimes in Rust");
    corpus.add_document("Garden tomatoes need rich soil and compost");
    corpus.add_document("Compost improves garden soil before watering");
    corpus.add_document("Rust ownership rules and the compiler");
    corpus.add_document("Watering tomatoes in the garden");
    corpus
}

#[test]
fn test_separates_topics() {
    let corpus = two_topic_corpus();
    // interleave so the two seeds come from different topics
    let result_set = ResultSet::new([1, 3, 2, 4, 5, 6]).unwrap();

    let mut kmeans = KMeans::new(
        result_set,
        KMeansConfig::new(2, 10),
        NormalizedCosine,
        TfIdf::new(&corpus),
    )
    .unwrap();
    kmeans.cluster().unwrap();

    let results = kmeans.results();
    let rust = results.get_cluster_by_doc(1).unwrap();
    let garden = results.get_cluster_by_doc(3).unwrap();
    assert_ne!(rust, garden);

    assert_eq!(results.get_docs_by_cluster(rust).unwrap(), &[1, 2, 5]);
    assert_eq!(results.get_docs_by_cluster(garden).unwrap(), &[3, 4, 6]);
}

#[test]
fn test_query_results_cluster_with_shared_statistics() {
    let corpus = Arc::new(two_topic_corpus());
    let result_set = corpus.search("garden rust", 10);
    assert_eq!(result_set.len(), 6);

    let config = KMeansConfig::new(2, 20).stopping(StoppingRule::CentroidShift { threshold: 1e-9 });
    let mut kmeans = KMeans::new(
        result_set.clone(),
        config,
        Arc::new(DotProduct),
        TfIdf::new(corpus.clone()),
    )
    .unwrap();

    let report = kmeans.cluster().unwrap();
    assert!(report.rounds >= 1 && report.rounds <= kmeans.config().max_iterations);
    assert_eq!(kmeans.result_set(), &result_set);

    let results = kmeans.results();
    assert_eq!(results.document_count(), result_set.len());
    let total: usize = results.clusters().map(|(_, docs)| docs.len()).sum();
    assert_eq!(total, result_set.len());
}

#[test]
fn test_more_clusters_than_results_is_rejected() {
    let corpus = two_topic_corpus();
    let result_set = corpus.search("tomatoes", 10);
    assert_eq!(result_set.len(), 2);

    let err = KMeans::new(
        result_set,
        KMeansConfig::new(3, 5),
        DotProduct,
        TfIdf::new(&corpus),
    )
    .err();
    assert!(matches!(err, Some(ClusterError::InvalidConfiguration(_))));
}

#[test]
fn test_assignment_serializes_clusters() {
    let corpus = two_topic_corpus();
    let result_set = ResultSet::new([1, 3, 2, 4, 5, 6]).unwrap();
    let mut kmeans = KMeans::new(
        result_set,
        KMeansConfig::new(2, 5),
        NormalizedCosine,
        TfIdf::new(&corpus),
    )
    .unwrap();
    kmeans.cluster().unwrap();

    let value = serde_json::to_value(kmeans.results()).unwrap();
    assert_eq!(value["cluster_count"], 2);
    assert_eq!(value["clusters"]["0"], serde_json::json!([1, 2, 5]));
    assert_eq!(value["clusters"]["1"], serde_json::json!([3, 4, 6]));
}
