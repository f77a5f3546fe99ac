//! Full-text index over node labels and summaries.
//!
//! Each query term is matched as a substring of indexed tokens (`*term*`), on
//! both fields. Nodes matching more terms/fields rank first.

use std::collections::HashSet;

use tantivy::collector::TopDocs;
use tantivy::query::{BooleanQuery, Occur, Query, RegexQuery};
use tantivy::schema::{
    Field, IndexRecordOption, Schema, TextFieldIndexing, TextOptions, Value, STORED, STRING,
};
use tantivy::tokenizer::{LowerCaser, SimpleTokenizer, TextAnalyzer};
use tantivy::{doc, Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument};
use thiserror::Error;

use crate::{NodeId, NormalizedNode};

// single-thread minimum arena
const WRITER_HEAP_BYTES: usize = 15_000_000;

// Like tantivy's `default` analyzer but without the 40-byte token cap, so long
// words and unbroken CJK runs stay searchable.
const TEXT_ANALYZER: &str = "weaver_text";

fn text_analyzer() -> TextAnalyzer {
    TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(LowerCaser)
        .build()
}

fn text_options() -> TextOptions {
    TextOptions::default().set_indexing_options(
        TextFieldIndexing::default()
            .set_tokenizer(TEXT_ANALYZER)
            .set_index_option(IndexRecordOption::WithFreqsAndPositions),
    )
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search index error: {0}")]
    Index(#[from] tantivy::TantivyError),
    #[error("invalid search pattern: {0}")]
    Pattern(String),
}

pub struct SearchIndex {
    reader: IndexReader,
    id: Field,
    label: Field,
    summary: Field,
    docs: usize,
}

impl SearchIndex {
    pub fn build(nodes: &[NormalizedNode]) -> Result<Self, SearchError> {
        let mut schema = Schema::builder();
        let id = schema.add_text_field("id", STRING | STORED);
        let label = schema.add_text_field("label", text_options());
        let summary = schema.add_text_field("summary", text_options());
        let index = Index::create_in_ram(schema.build());
        index.tokenizers().register(TEXT_ANALYZER, text_analyzer());

        let mut writer: IndexWriter = index.writer_with_num_threads(1, WRITER_HEAP_BYTES)?;
        for node in nodes {
            writer.add_document(doc!(
                id => node.id.0.clone(),
                label => node.label.clone(),
                summary => node.summary.clone(),
            ))?;
        }
        writer.commit()?;

        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()?;

        tracing::debug!(docs = nodes.len(), "search index built");
        Ok(Self {
            reader,
            id,
            label,
            summary,
            docs: nodes.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.docs
    }

    pub fn is_empty(&self) -> bool {
        self.docs == 0
    }

    /// Ranked ids of nodes whose label or summary contains any query term.
    /// Empty (or punctuation-only) queries match nothing. A duplicated id is
    /// reported once, at its best rank.
    pub fn search(&self, query: &str) -> Result<Vec<(NodeId, f32)>, SearchError> {
        let terms = query_terms(query);
        if terms.is_empty() || self.docs == 0 {
            return Ok(Vec::new());
        }

        let mut clauses: Vec<(Occur, Box<dyn Query>)> = Vec::new();
        for term in &terms {
            let pattern = wildcard_pattern(term);
            for field in [self.label, self.summary] {
                let q = RegexQuery::from_pattern(&pattern, field)
                    .map_err(|e| SearchError::Pattern(format!("{pattern}: {e}")))?;
                clauses.push((Occur::Should, Box::new(q)));
            }
        }
        let query = BooleanQuery::new(clauses);

        let searcher = self.reader.searcher();
        let mut top = searcher.search(&query, &TopDocs::with_limit(self.docs))?;
        // equal scores keep insertion order
        top.sort_by(|(sa, da), (sb, db)| {
            sb.total_cmp(sa)
                .then(da.segment_ord.cmp(&db.segment_ord))
                .then(da.doc_id.cmp(&db.doc_id))
        });

        let mut seen = HashSet::new();
        let mut hits = Vec::with_capacity(top.len());
        for (score, addr) in top {
            let doc: TantivyDocument = searcher.doc(addr)?;
            let Some(id) = doc.get_first(self.id).and_then(|v| v.as_str()) else {
                continue;
            };
            if seen.insert(id.to_string()) {
                hits.push((NodeId::new(id), score));
            }
        }
        Ok(hits)
    }
}

/// Splits and lowercases a query the way `text_analyzer` treats indexed text.
/// Lowercasing is per char, as `LowerCaser` does, so a word-final `Σ` becomes
/// `σ` on both sides.
fn query_terms(query: &str) -> Vec<String> {
    query
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.chars().flat_map(char::to_lowercase).collect())
        .collect()
}

// `*term*`; terms are alphanumeric so they carry no regex metacharacters.
fn wildcard_pattern(term: &str) -> String {
    format!(".*{term}.*")
}
