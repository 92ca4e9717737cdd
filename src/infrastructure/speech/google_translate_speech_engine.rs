use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use reqwest::StatusCode;
use unicode_segmentation::UnicodeSegmentation;

use crate::application::ports::{SpeechEngine, SpeechEngineError};

/// Longest text the translate endpoint accepts in a single request.
pub const MAX_CHUNK_CHARS: usize = 100;

const DEFAULT_BASE_URL: &str = "https://translate.google.com";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
(KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Speech through the public Google Translate TTS endpoint. Long text is
/// split into chunks and the MP3 responses are concatenated.
pub struct GoogleTranslateSpeechEngine {
    client: reqwest::Client,
    base_url: String,
    language: String,
}

impl GoogleTranslateSpeechEngine {
    pub fn new(language: String, base_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            language,
        }
    }

    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    async fn fetch_chunk(
        &self,
        chunk: &str,
        idx: usize,
        total: usize,
    ) -> Result<Bytes, SpeechEngineError> {
        let idx = idx.to_string();
        let total = total.to_string();
        let textlen = chunk.chars().count().to_string();

        let response = self
            .client
            .get(format!("{}/translate_tts", self.base_url))
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", self.language.as_str()),
                ("q", chunk),
                ("idx", idx.as_str()),
                ("total", total.as_str()),
                ("textlen", textlen.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SpeechEngineError::ApiRequestFailed(format!("request: {}", e)))?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(SpeechEngineError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SpeechEngineError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        response
            .bytes()
            .await
            .map_err(|e| SpeechEngineError::InvalidResponse(format!("body: {}", e)))
    }
}

#[async_trait]
impl SpeechEngine for GoogleTranslateSpeechEngine {
    async fn synthesize(&self, text: &str) -> Result<Bytes, SpeechEngineError> {
        let chunks = split_for_speech(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(SpeechEngineError::NoSpeakableText);
        }

        tracing::debug!(
            language = %self.language,
            chunks = chunks.len(),
            "Requesting Google Translate speech"
        );

        let mut audio = BytesMut::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            let part = self.fetch_chunk(chunk, idx, chunks.len()).await?;
            audio.extend_from_slice(&part);
        }

        tracing::info!(bytes = audio.len(), "Google Translate speech completed");

        Ok(audio.freeze())
    }
}

/// Splits text at sentence boundaries (plus `;` and `:`), then packs word
/// segments into chunks of at most `max_chars` characters. Segments longer
/// than the limit are cut between grapheme clusters, so a combining mark
/// always stays with its base letter.
pub fn split_for_speech(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();

    let clauses = text
        .split_sentence_bounds()
        .flat_map(|sentence| sentence.split_inclusive([';', ':']));

    for clause in clauses {
        let mut current = String::new();
        let mut current_len = 0;

        for segment in clause.split_word_bounds() {
            for piece in cut_graphemes(segment, max_chars) {
                let piece_len = piece.chars().count();
                if current_len + piece_len > max_chars {
                    flush(&mut chunks, &mut current);
                    current_len = 0;
                }
                if current.is_empty() && piece.trim().is_empty() {
                    continue;
                }
                current.push_str(piece);
                current_len += piece_len;
            }
        }

        flush(&mut chunks, &mut current);
    }

    chunks
}

fn flush(chunks: &mut Vec<String>, current: &mut String) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
    current.clear();
}

fn cut_graphemes(segment: &str, max_chars: usize) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut len = 0;

    for (idx, grapheme) in segment.grapheme_indices(true) {
        let grapheme_len = grapheme.chars().count();
        if len > 0 && len + grapheme_len > max_chars {
            pieces.push(&segment[start..idx]);
            start = idx;
            len = 0;
        }
        len += grapheme_len;
    }

    if start < segment.len() {
        pieces.push(&segment[start..]);
    }
    pieces
}
