//! End-to-end pipeline tests: index a corpus directory, ask questions in
//! mock mode, and check the answers are grounded in the retrieved passage.

use std::fs;
use std::sync::Arc;

use corpusqa::{
    CorpusIndexer, Embedder, GenerationMode, HashEmbedder, MemoryVectorStore, QaConfig,
    QaPipeline, VectorStore,
};
use tempfile::TempDir;

/// Write a corpus directory from (filename, contents) pairs.
fn corpus_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, contents) in files {
        fs::write(dir.path().join(name), contents).unwrap();
    }
    dir
}

/// Index `files` into a fresh in-memory store and build a mock-mode pipeline
/// over it, sharing one embedder between indexing and querying.
async fn mock_pipeline(files: &[(&str, &str)]) -> QaPipeline {
    let embedder = Arc::new(HashEmbedder::new());
    let store = Arc::new(MemoryVectorStore::new());

    let dir = corpus_dir(files);
    let indexer = CorpusIndexer::new(embedder.clone(), store.clone());
    indexer.index_dir(dir.path()).await.unwrap();

    QaPipeline::builder()
        .config(QaConfig::default())
        .embedder(embedder)
        .store(store)
        .generator(GenerationMode::Mock.into_generator())
        .build()
        .unwrap()
}

#[tokio::test]
async fn kubernetes_question_answers_with_container_passage() {
    let pipeline =
        mock_pipeline(&[("k8s", "Kubernetes is a container orchestration platform.")]).await;

    let response = pipeline.respond("What is Kubernetes?").await.unwrap();
    assert!(response.answer.contains("container"), "answer was: {}", response.answer);
}

#[tokio::test]
async fn nextwork_question_answers_with_maximus_passage() {
    let pipeline =
        mock_pipeline(&[("nextwork", "NextWork is a job search platform by Maximus.")]).await;

    let response = pipeline.respond("What is NextWork?").await.unwrap();
    assert!(response.answer.to_lowercase().contains("maximus"), "answer was: {}", response.answer);
}

#[tokio::test]
async fn empty_corpus_yields_empty_answer() {
    let pipeline = mock_pipeline(&[]).await;

    let response = pipeline.respond("anything at all?").await.unwrap();
    assert_eq!(response.answer, "");
}

#[tokio::test]
async fn mock_mode_echoes_the_retrieved_context_exactly() {
    let passage = "Rust is a systems programming language.";
    let pipeline = mock_pipeline(&[("rust", passage)]).await;

    let answer = pipeline.answer("Tell me about Rust").await.unwrap();
    assert_eq!(answer.text, passage);
}

#[tokio::test]
async fn most_similar_document_is_retrieved_first() {
    let pipeline = mock_pipeline(&[
        ("k8s", "Kubernetes is a container orchestration platform."),
        ("bread", "Bread rises because yeast ferments sugar into gas."),
        ("tea", "Green tea is brewed at lower temperatures than black tea."),
    ])
    .await;

    let retrieved = pipeline.retrieve("What is Kubernetes?").await.unwrap();
    assert_eq!(retrieved.len(), 1);
    assert_eq!(retrieved[0].document.id, "k8s");
}

#[tokio::test]
async fn top_k_joins_contexts_in_ranked_order() {
    let embedder = Arc::new(HashEmbedder::new());
    let store = Arc::new(MemoryVectorStore::new());
    let dir = corpus_dir(&[
        ("k8s", "Kubernetes is a container orchestration platform."),
        ("docker", "Docker runs each container from an image."),
        ("bread", "Bread rises because yeast ferments sugar into gas."),
    ]);
    CorpusIndexer::new(embedder.clone(), store.clone()).index_dir(dir.path()).await.unwrap();

    let pipeline = QaPipeline::builder()
        .config(QaConfig::builder().top_k(2).separator("\n---\n").build().unwrap())
        .embedder(embedder)
        .store(store)
        .generator(GenerationMode::Mock.into_generator())
        .build()
        .unwrap();

    let retrieved = pipeline.retrieve("Which container platform orchestrates containers?").await.unwrap();
    assert_eq!(retrieved.len(), 2);

    let context = pipeline.context_text(&retrieved);
    let expected =
        format!("{}\n---\n{}", retrieved[0].document.text, retrieved[1].document.text);
    assert_eq!(context, expected);
}

#[tokio::test]
async fn reindexing_an_unchanged_corpus_is_idempotent() {
    let embedder = Arc::new(HashEmbedder::new());
    let store = Arc::new(MemoryVectorStore::new());
    let dir = corpus_dir(&[
        ("a", "First document text."),
        ("b", "Second document text."),
    ]);
    let indexer = CorpusIndexer::new(embedder.clone(), store.clone());

    indexer.index_dir(dir.path()).await.unwrap();
    let probe = embedder.embed("document text").await.unwrap();
    let mut first = store.query(&probe, 10).await.unwrap();

    indexer.index_dir(dir.path()).await.unwrap();
    let mut second = store.query(&probe, 10).await.unwrap();

    first.sort_by(|a, b| a.document.id.cmp(&b.document.id));
    second.sort_by(|a, b| a.document.id.cmp(&b.document.id));
    let fingerprint = |results: &[corpusqa::Scored]| {
        results
            .iter()
            .map(|s| (s.document.id.clone(), s.document.text.clone(), s.document.embedding.clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(fingerprint(&first), fingerprint(&second));
}

#[tokio::test]
async fn reindex_removes_documents_whose_files_are_gone() {
    let embedder = Arc::new(HashEmbedder::new());
    let store = Arc::new(MemoryVectorStore::new());
    let dir = corpus_dir(&[("keep", "kept text"), ("drop", "dropped text")]);
    let indexer = CorpusIndexer::new(embedder.clone(), store.clone());

    indexer.index_dir(dir.path()).await.unwrap();
    assert_eq!(store.count().await.unwrap(), 2);

    fs::remove_file(dir.path().join("drop")).unwrap();
    indexer.index_dir(dir.path()).await.unwrap();

    assert_eq!(store.count().await.unwrap(), 1);
    let probe = embedder.embed("kept text").await.unwrap();
    let results = store.query(&probe, 10).await.unwrap();
    assert_eq!(results[0].document.id, "keep");
}

#[tokio::test]
async fn unreadable_file_is_skipped_and_reported() {
    let embedder = Arc::new(HashEmbedder::new());
    let store = Arc::new(MemoryVectorStore::new());
    let dir = corpus_dir(&[("good", "readable text")]);
    // Not valid UTF-8, so read_to_string fails for this file only
    fs::write(dir.path().join("bad"), [0xff, 0xfe, 0x00, 0x9f]).unwrap();

    let report =
        CorpusIndexer::new(embedder, store.clone()).index_dir(dir.path()).await.unwrap();

    assert!(report.is_partial());
    assert_eq!(report.indexed, 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].name, "bad");
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn missing_corpus_directory_is_an_error() {
    let embedder = Arc::new(HashEmbedder::new());
    let store = Arc::new(MemoryVectorStore::new());
    let indexer = CorpusIndexer::new(embedder, store);

    let result = indexer.index_dir("/nonexistent/corpus/dir").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn response_serializes_to_answer_json() {
    let pipeline = mock_pipeline(&[("k8s", "Kubernetes orchestrates containers.")]).await;

    let response = pipeline.respond("What is Kubernetes?").await.unwrap();
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["answer"], "Kubernetes orchestrates containers.");
}
