use crate::classify::classify;
use crate::error::QueryError;
use crate::extract::{ParsedObject, extract};
use crate::gemini_client::GenerateRequest;
use crate::services::ServiceContext;
use crate::services::prompts;

use models::{ClassifiedError, SearchResponse, SearchResult};

use log::{debug, info};
use serde_json::Value;
use url::Url;

/// Web search grounded by the provider's search tool.
#[derive(Debug, Clone)]
pub struct SearchService {
    context: ServiceContext,
}

impl SearchService {
    pub fn new(context: ServiceContext) -> Self {
        Self { context }
    }

    /// Search the web for `query`.
    ///
    /// A blank query returns an empty response without calling the provider.
    pub async fn search(&self, query: &str) -> Result<SearchResponse, ClassifiedError> {
        self.try_search(query)
            .await
            .map_err(|e| classify(&e, self.context.locale()))
    }

    async fn try_search(&self, query: &str) -> Result<SearchResponse, QueryError> {
        let credential = self.context.credential()?;

        let query = query.trim();
        if query.is_empty() {
            debug!("Blank query, skipping provider call");
            return Ok(SearchResponse::empty());
        }

        let config = self.context.config();
        let locale = self.context.locale();

        let mut request = GenerateRequest::new(
            &config.search_model,
            prompts::search_prompt(query, locale),
        )
        .with_system_instruction(prompts::search_system_instruction(locale))
        .with_web_search(true)
        .with_temperature(config.effective_temperature());

        if config.structured_output {
            request = request.with_response_schema(prompts::search_response_schema());
        }

        let response = self.context.generate(&credential, &request).await?;

        let Some(text) = response.text else {
            info!("Search returned no text (finish_reason={:?})", response.finish_reason);
            return Ok(SearchResponse::empty());
        };

        let object = extract(&text)?;
        let results = search_response_from(&object);
        info!("Search returned {} result(s)", results.results.len());
        Ok(results)
    }
}

/// Validate the extracted object field by field.
///
/// - `results` missing or not an array: no results
/// - entry without an absolute `http`/`https` url: dropped
/// - `title` missing or blank: the url's host
/// - `summary` missing: empty
pub fn search_response_from(object: &ParsedObject) -> SearchResponse {
    let Some(entries) = object.get("results").and_then(Value::as_array) else {
        debug!("Extracted object has no results array");
        return SearchResponse::empty();
    };

    let results = entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let result = search_result_from(entry);
            if result.is_none() {
                debug!("Dropping search result #{}: missing or non-http url", index);
            }
            result
        })
        .collect();

    SearchResponse { results }
}

fn search_result_from(entry: &Value) -> Option<SearchResult> {
    let entry = entry.as_object()?;

    let raw_url = entry.get("url").and_then(Value::as_str)?.trim();
    let url = Url::parse(raw_url).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    let host = url.host_str()?.to_string();

    let title = entry
        .get("title")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .map(str::to_string)
        .unwrap_or(host);

    let summary = entry
        .get("summary")
        .and_then(Value::as_str)
        .map(|summary| summary.trim().to_string())
        .unwrap_or_default();

    Some(SearchResult {
        title,
        url: raw_url.to_string(),
        summary,
    })
}
