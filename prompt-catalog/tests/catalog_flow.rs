use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use futures::stream::FuturesUnordered;
use prompt_catalog::adapters::{
    BackendError, BackendResult, CompletionBackend, CompletionClient, CompletionOptions,
    GenerateRequest, GenerateResponse,
};
use prompt_catalog::config::GeminiSettings;
use prompt_catalog::kernel::{CatalogSession, InvocationState, ResultSlot};
use prompt_catalog::primitives::Category;
use prompt_catalog::prompts::{Catalog, FilterCriteria, filter};

/// Answers by prompt: `slow:` prompts wait before echoing, `fail:` prompts
/// reject with the rest of the text, `empty` returns no text.
struct ScriptedBackend;

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    fn provider(&self) -> &'static str {
        "scripted"
    }

    async fn generate(&self, request: GenerateRequest) -> BackendResult<GenerateResponse> {
        let prompt = request.contents;
        if let Some(reason) = prompt.strip_prefix("fail:") {
            return Err(BackendError::Upstream {
                status: 429,
                reason: reason.to_owned(),
            });
        }
        if prompt == "empty" {
            return Ok(GenerateResponse::empty());
        }
        if let Some(rest) = prompt.strip_prefix("slow:") {
            tokio::time::sleep(Duration::from_millis(40)).await;
            return Ok(GenerateResponse::text(rest));
        }
        Ok(GenerateResponse::text(if prompt == "oi" { "Olá" } else { prompt.as_str() }))
    }
}

fn client(api_key: &str) -> CompletionClient {
    CompletionClient::new(
        GeminiSettings::default().with_api_key(api_key),
        Arc::new(ScriptedBackend),
    )
}

fn ids(records: &[&prompt_catalog::primitives::PromptRecord]) -> Vec<String> {
    records.iter().map(|record| record.id().to_string()).collect()
}

#[test]
fn filter_matches_both_gates() {
    let catalog = Catalog::builtin().unwrap();
    let criteria = FilterCriteria::default()
        .with_search("produtividade")
        .with_category(Category::ExamPrep);

    for record in catalog.records() {
        let in_category = record.category() == Category::ExamPrep;
        let needle = "produtividade";
        let in_text = record.title().to_lowercase().contains(needle)
            || record.description().to_lowercase().contains(needle)
            || record.tags().iter().any(|tag| tag.to_lowercase().contains(needle));
        assert_eq!(criteria.matches(record), in_category && in_text, "{}", record.id());
    }
    assert_eq!(ids(&catalog.filter(&criteria)), ["101"]);
}

#[test]
fn filter_preserves_order_and_is_idempotent() {
    let catalog = Catalog::builtin().unwrap();
    let criteria = FilterCriteria::default().with_search("a");

    let once = catalog.filter(&criteria);
    let twice = filter(once.iter().copied(), &criteria);
    assert_eq!(ids(&once), ids(&twice));

    let positions: Vec<_> = once
        .iter()
        .map(|hit| catalog.records().iter().position(|r| r.id() == hit.id()).unwrap())
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn empty_search_under_all_returns_everything() {
    let catalog = Catalog::builtin().unwrap();
    assert_eq!(catalog.filter(&FilterCriteria::default()).len(), catalog.len());
}

#[test]
fn search_ignores_case() {
    let catalog = Catalog::builtin().unwrap();
    let hits = catalog.filter(&FilterCriteria::default().with_search("CRONOGRAMA"));
    assert_eq!(hits[0].title(), "Cronograma de Estudos Inteligente");
}

#[test]
fn category_selection_is_exact() {
    let catalog = Catalog::builtin().unwrap();
    let hits = catalog.filter(&FilterCriteria::default().with_category(Category::LegalDrafting));
    assert!(!hits.is_empty());
    assert!(hits.iter().all(|r| r.category() == Category::LegalDrafting));

    let unknown = FilterCriteria::default().with_category("doesNotExist".parse().unwrap());
    assert!(catalog.filter(&unknown).is_empty());
}

#[tokio::test]
async fn completion_outcomes() {
    let client = client("secret");
    let options = CompletionOptions::default();

    assert_eq!(client.complete("oi", &options).await.unwrap(), "Olá");
    assert_eq!(
        client.complete("empty", &options).await.unwrap(),
        client.settings().fallback_message()
    );
    let err = client.complete("fail:quota exceeded", &options).await.unwrap_err();
    assert!(err.message().contains("quota exceeded"));
}

#[test]
fn credential_predicate() {
    assert!(!client("").is_credential_configured());
    assert!(client("secret").is_credential_configured());
}

#[tokio::test]
async fn last_resolution_wins_when_requests_overlap() {
    let client = client("secret");
    let options = CompletionOptions::default();
    let mut slot = ResultSlot::new();

    let earlier = slot.issue();
    let later = slot.issue();
    let mut pending = FuturesUnordered::new();
    pending.push(earlier.run(&client, "slow:primeira", &options));
    pending.push(later.run(&client, "segunda", &options));

    let mut order = Vec::new();
    while let Some(resolution) = pending.next().await {
        let resolution = resolution.unwrap();
        order.push(resolution.id);
        slot.resolve(resolution);
    }

    assert_eq!(order, [later.id(), earlier.id()]);
    let shown = slot.current().unwrap();
    assert_eq!(shown.id, earlier.id());
    assert_eq!(shown.state, InvocationState::Succeeded);
    assert_eq!(slot.current_text(), Some("primeira"));
}

#[tokio::test]
async fn session_displays_generated_text() {
    let mut session = CatalogSession::new(Catalog::builtin().unwrap(), client("secret"));
    let mut playground = session.open_playground("2").unwrap();
    playground.set_draft("rascunho");

    let shown = session.generate(&playground).await.unwrap().unwrap();
    assert_eq!(shown.state, InvocationState::Succeeded);
    assert!(session.result().unwrap().outcome.as_ref().unwrap().ends_with("rascunho"));
    assert!(session.notices().items().is_empty());
}
