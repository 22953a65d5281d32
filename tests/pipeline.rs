//! End-to-end pipeline tests over real files.

use std::fs;
use std::path::Path;

use ragprep::{
    Chunk, ChunkStrategy, Chunker, Config, ContentHash, Document, Loader, Metadata, Pipeline,
    PrepError, Result, VecSink, prepare_docs, prepare_docs_to_jsonl,
};
use serde_json::Value;
use tempfile::{TempDir, tempdir};

const SAMPLE: &str = "This is a sample document for testing. It contains several sentences. \
Each sentence should be preserved when chunking by sentence. The document is long enough \
to produce more than one chunk with small chunk sizes.";

fn config(strategy: &str, size: usize, overlap: usize) -> Config {
    Config::builder()
        .chunk_strategy(strategy)
        .chunk_size(size)
        .chunk_overlap(overlap)
        .build()
        .unwrap()
}

fn multi_file_dir() -> TempDir {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::create_dir(root.join("nested")).unwrap();
    fs::write(root.join("a.txt"), SAMPLE).unwrap();
    fs::write(root.join("b.md"), "# Heading\n\nMarkdown body with a few words.").unwrap();
    fs::write(
        root.join("c.html"),
        "<html><body><p>HTML paragraph content.</p></body></html>",
    )
    .unwrap();
    fs::write(root.join("d.csv"), "name,role\nAda,engineer\nGrace,admiral\n").unwrap();
    fs::write(root.join("nested").join("e.txt"), "Nested file text.").unwrap();
    fs::write(root.join("ignored.bin"), [0_u8, 1, 2, 3]).unwrap();
    dir
}

#[test]
fn directory_end_to_end() {
    let dir = multi_file_dir();
    let chunks = prepare_docs(dir.path(), &config("character", 100, 20)).unwrap();

    assert!(!chunks.is_empty());
    for chunk in &chunks {
        assert!(!chunk.text.is_empty());
        assert!(chunk.metadata.contains_key("source_id"));
        assert!(chunk.metadata.contains_key("chunk_index"));
        assert!(chunk.chunk_id.contains("_chunk_"));
    }

    let types: Vec<&str> = chunks
        .iter()
        .map(|c| c.metadata["file_type"].as_str().unwrap())
        .collect();
    for expected in ["text", "markdown", "html", "csv"] {
        assert!(types.contains(&expected), "missing {expected} chunks");
    }

    let csv_rows: Vec<&Chunk> = chunks
        .iter()
        .filter(|c| c.metadata["file_type"] == "csv")
        .collect();
    assert_eq!(csv_rows.len(), 2);
    assert_eq!(csv_rows[0].text, "name: Ada\nrole: engineer");
    assert!(csv_rows[1].chunk_id.ends_with("d.csv_row_1_chunk_0"));
}

#[test]
fn jsonl_matches_collected_chunks() {
    let dir = multi_file_dir();
    let out_dir = tempdir().unwrap();
    let output = out_dir.path().join("out.jsonl");
    let config = config("character", 100, 20);

    let chunks = prepare_docs(dir.path(), &config).unwrap();
    let summary = prepare_docs_to_jsonl(dir.path(), &output, &config).unwrap();

    let content = fs::read_to_string(&output).unwrap();
    let lines: Vec<Value> = content
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(lines.len(), chunks.len());
    assert_eq!(summary.chunks, chunks.len());
    assert!(summary.skipped.is_empty());
    for (line, chunk) in lines.iter().zip(&chunks) {
        assert_eq!(line["text"], chunk.text.as_str());
        assert_eq!(line["chunk_id"], chunk.chunk_id.as_str());
        let keys: Vec<&String> = line.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 3);
    }
}

#[test]
fn output_is_deterministic() {
    let dir = multi_file_dir();
    let config = config("sentence", 80, 10);

    let first = prepare_docs(dir.path(), &config).unwrap();
    let second = prepare_docs(dir.path(), &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn single_file_metadata() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sample.txt");
    fs::write(&path, SAMPLE).unwrap();

    let chunks = prepare_docs(&path, &config("character", 30, 5)).unwrap();

    assert!(chunks.len() > 1);
    for (i, chunk) in chunks.iter().enumerate() {
        assert_eq!(chunk.metadata["file_name"], "sample.txt");
        assert_eq!(chunk.metadata["file_type"], "text");
        assert_eq!(chunk.metadata["source_id"], &*path.to_string_lossy());
        assert_eq!(chunk.index(), Some(i as u64));
    }
}

#[test]
fn unknown_extension_single_file_reads_as_text() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.log");
    fs::write(&path, "log line one\nlog line two").unwrap();

    let chunks = prepare_docs(&path, &config("none", 100, 0)).unwrap();

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].text, "log line one\nlog line two");
    assert_eq!(chunks[0].metadata["file_type"], "text");
}

#[test]
fn empty_file_with_none_strategy_yields_one_chunk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.txt");
    fs::write(&path, "").unwrap();

    let none = prepare_docs(&path, &config("none", 100, 0)).unwrap();
    assert_eq!(none.len(), 1);
    assert_eq!(none[0].text, "");

    let character = prepare_docs(&path, &config("character", 100, 0)).unwrap();
    assert!(character.is_empty());
}

#[test]
fn broken_file_in_directory_is_skipped() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("good.txt"), "Good content.").unwrap();
    fs::write(dir.path().join("bad.docx"), "this is not a docx archive").unwrap();

    let pipeline = Pipeline::builder()
        .config(config("none", 100, 0))
        .build()
        .unwrap();
    let mut sink = VecSink::new();
    let summary = pipeline.run(dir.path(), &mut sink).unwrap();

    assert_eq!(summary.documents, 1);
    assert_eq!(summary.skipped.len(), 1);
    assert!(summary.skipped[0].ends_with("bad.docx"));
    assert_eq!(sink.chunks()[0].text, "Good content.");
}

#[test]
fn broken_single_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.docx");
    fs::write(&path, "this is not a docx archive").unwrap();

    let err = prepare_docs(&path, &config("none", 100, 0)).unwrap_err();
    assert!(matches!(err, PrepError::Load { .. }));
}

#[test]
fn include_and_exclude_patterns() {
    let dir = multi_file_dir();
    let pipeline = Pipeline::builder()
        .config(config("none", 100, 0))
        .include(["*.txt", "*.md"])
        .exclude(["*nested*"])
        .build()
        .unwrap();

    let chunks = pipeline.prepare(dir.path()).unwrap();
    let names: Vec<&str> = chunks
        .iter()
        .map(|c| c.metadata["file_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["a.txt", "b.md"]);
}

#[test]
fn hooks_and_content_hash() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.txt");
    fs::write(&path, "Test content for hooks").unwrap();

    let pipeline = Pipeline::builder()
        .config(config("character", 10, 0))
        .hook(|_: &Metadata, text: &str| {
            let mut extra = Metadata::new();
            extra.insert("text_length".into(), text.chars().count().into());
            extra
        })
        .hook(ContentHash)
        .build()
        .unwrap();

    let chunks = pipeline.prepare(&path).unwrap();
    assert_eq!(chunks.len(), 3);
    for chunk in &chunks {
        assert_eq!(chunk.metadata["text_length"], chunk.text.chars().count());
        assert_eq!(
            chunk.metadata["content_hash"],
            ContentHash::of(&chunk.text).as_str()
        );
    }
}

/// Splits on commas and tags each piece.
struct CommaChunker;

impl Chunker for CommaChunker {
    fn chunk(&self, doc: &Document) -> Result<Vec<Chunk>> {
        Ok(doc
            .text
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .enumerate()
            .map(|(i, part)| {
                let mut metadata = doc.metadata.clone();
                metadata.insert("chunk_index".into(), i.into());
                metadata.insert("split_method".into(), "comma".into());
                Chunk::new(part, metadata, Chunk::derive_id(doc.source_id(), i))
            })
            .collect())
    }

    fn name(&self) -> &str {
        "comma"
    }
}

#[test]
fn injected_chunker_overrides_strategy() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.txt");
    fs::write(&path, "First part, Second part, Third part").unwrap();

    let pipeline = Pipeline::builder()
        .config(config("character", 5, 0))
        .chunker(CommaChunker)
        .build()
        .unwrap();

    let chunks = pipeline.prepare(&path).unwrap();
    let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["First part", "Second part", "Third part"]);
    assert!(chunks.iter().all(|c| c.metadata["split_method"] == "comma"));
}

#[test]
fn named_custom_strategy() {
    let pipeline = Pipeline::builder()
        .config(Config {
            chunk_strategy: ChunkStrategy::Custom("comma".into()),
            ..Config::default()
        })
        .strategy("comma", |_: &Config| Ok(Box::new(CommaChunker) as Box<dyn Chunker>))
        .build()
        .unwrap();

    let chunks = pipeline.prepare_text("a, b", "inline").unwrap();
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[1].chunk_id, "inline_chunk_1");
}

/// Reads `key=value` lines as metadata and the rest as text.
struct KeyValueLoader;

impl Loader for KeyValueLoader {
    fn load(&self, path: &Path) -> Result<Vec<Document>> {
        let content = fs::read_to_string(path)?;
        let mut metadata = Metadata::new();
        metadata.insert("source_id".into(), "kv".into());
        let mut body = Vec::new();
        for line in content.lines() {
            match line.split_once('=') {
                Some((key, value)) => {
                    metadata.insert(key.to_string(), value.into());
                }
                None => body.push(line),
            }
        }
        Ok(vec![Document::with_metadata(body.join("\n"), metadata)])
    }

    fn file_type(&self) -> &'static str {
        "kv"
    }
}

#[test]
fn custom_loader_by_extension() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("entry.kv"), "lang=en\nHello there").unwrap();

    let pipeline = Pipeline::builder()
        .config(config("none", 100, 0))
        .loader(".KV", KeyValueLoader)
        .build()
        .unwrap();

    let chunks = pipeline.prepare(dir.path()).unwrap();
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].text, "Hello there");
    assert_eq!(chunks[0].metadata["lang"], "en");
    assert_eq!(chunks[0].chunk_id, "kv_chunk_0");
}

#[test]
fn token_strategy_end_to_end() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tokens.txt");
    fs::write(&path, SAMPLE.repeat(5)).unwrap();

    let chunks = prepare_docs(&path, &config("token", 50, 10)).unwrap();

    assert!(chunks.len() > 1);
    for (i, chunk) in chunks.iter().enumerate() {
        assert_eq!(chunk.index(), Some(i as u64));
        assert_eq!(chunk.metadata["start_token"], i * 40);
    }
}

#[test]
fn unknown_tokenizer_fails_before_output() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.txt");
    let output = dir.path().join("out.jsonl");
    fs::write(&path, "text").unwrap();

    let config = Config {
        chunk_strategy: ChunkStrategy::Token,
        chunk_size: 50,
        chunk_overlap: 10,
        tokenizer_name: Some("invalid_tokenizer_name_xyz".into()),
    };
    let err = prepare_docs_to_jsonl(&path, &output, &config).unwrap_err();

    assert!(err.is_configuration());
    assert!(!output.exists());
}

#[test]
fn special_token_literal_skips_only_that_document() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), SAMPLE).unwrap();
    fs::write(dir.path().join("b.txt"), "prompt <|endoftext|> injection").unwrap();

    let pipeline = Pipeline::builder()
        .config(config("token", 50, 10))
        .build()
        .unwrap();
    let mut sink = VecSink::new();
    let summary = pipeline.run(dir.path(), &mut sink).unwrap();

    assert_eq!(summary.documents, 1);
    assert_eq!(summary.skipped.len(), 1);
    assert!(summary.skipped[0].ends_with("b.txt"));
    assert!(sink.chunks().iter().all(|c| !c.text.contains("<|endoftext|>")));
}
