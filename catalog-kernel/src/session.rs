//! Browsing state the view layer drives: criteria, view mode, playground, the
//! displayed result, and notices.

use catalog_adapters::{CompletionClient, CompletionOptions};
use catalog_primitives::{Category, PromptId, PromptRecord};
use catalog_prompts::library::task_prompt;
use catalog_prompts::{Catalog, FilterCriteria, placeholders};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::invocation::InvocationResult;
use crate::notice::{NoticeKind, Notices};
use crate::slot::{DisplayedResult, ResultSlot};

const COPIED_PROMPT: &str = "Prompt copiado para a área de transferência!";
const COPIED_RESULT: &str = "Resultado copiado!";
const MISSING_CREDENTIAL: &str =
    "Configure a chave da API do Gemini (GEMINI_API_KEY) para gerar respostas.";

/// Card layout chosen by the user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Cards in a grid.
    #[default]
    Grid,
    /// Cards in a single column.
    List,
}

/// A record opened for editing before submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Playground {
    record_id: PromptId,
    title: String,
    draft: String,
}

impl Playground {
    /// Opens `record` with its template text as the draft.
    #[must_use]
    pub fn new(record: &PromptRecord) -> Self {
        Self {
            record_id: record.id().clone(),
            title: record.title().to_owned(),
            draft: record.content().to_owned(),
        }
    }

    /// Returns the source record identifier.
    #[must_use]
    pub const fn record_id(&self) -> &PromptId {
        &self.record_id
    }

    /// Returns the source record title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the current draft.
    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replaces the draft.
    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    /// Placeholders still present in the draft.
    #[must_use]
    pub fn unfilled_placeholders(&self) -> Vec<String> {
        placeholders(&self.draft)
    }

    /// Text actually sent: the draft prefixed with the task title.
    #[must_use]
    pub fn prompt_text(&self) -> String {
        task_prompt(&self.title, &self.draft)
    }
}

/// State behind one catalog screen.
#[derive(Debug)]
pub struct CatalogSession {
    catalog: Catalog,
    client: CompletionClient,
    criteria: FilterCriteria,
    view_mode: ViewMode,
    slot: ResultSlot,
    notices: Notices,
}

impl CatalogSession {
    /// Starts with empty search, the `All` category, and grid view.
    #[must_use]
    pub fn new(catalog: Catalog, client: CompletionClient) -> Self {
        if !client.is_credential_configured() {
            info!("completion credential missing; generation disabled for this session");
        }
        Self {
            catalog,
            client,
            criteria: FilterCriteria::default(),
            view_mode: ViewMode::default(),
            slot: ResultSlot::new(),
            notices: Notices::new(),
        }
    }

    /// Returns the catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns the current criteria.
    #[must_use]
    pub const fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Replaces the search text.
    pub fn set_search(&mut self, search_text: impl Into<String>) {
        self.criteria = self.criteria.clone().with_search(search_text);
    }

    /// Replaces the category selection.
    pub fn set_category(&mut self, category: Category) {
        self.criteria = self.criteria.clone().with_category(category);
    }

    /// Replaces both search text and category.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
    }

    /// Returns the layout.
    #[must_use]
    pub const fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Switches the layout.
    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.view_mode = view_mode;
    }

    /// Records visible under the current criteria, in catalog order.
    #[must_use]
    pub fn visible(&self) -> Vec<&PromptRecord> {
        self.catalog.filter(&self.criteria)
    }

    /// Number of records in the catalog.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.catalog.len()
    }

    /// Number of records visible under the current criteria.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible().len()
    }

    /// Returns `true` when completions can be requested.
    #[must_use]
    pub fn is_credential_configured(&self) -> bool {
        self.client.is_credential_configured()
    }

    /// Returns a record's template text for the clipboard and queues the
    /// confirmation notice.
    pub fn copy(&mut self, id: &str) -> Option<String> {
        let content = self.catalog.get(id)?.content().to_owned();
        self.notices.push(COPIED_PROMPT, NoticeKind::Success);
        Some(content)
    }

    /// Returns the displayed text for the clipboard and queues the
    /// confirmation notice.
    pub fn copy_result(&mut self) -> Option<String> {
        let text = self.slot.current_text()?.to_owned();
        self.notices.push(COPIED_RESULT, NoticeKind::Success);
        Some(text)
    }

    /// Opens a record in the playground and clears the previous result.
    pub fn open_playground(&mut self, id: &str) -> Option<Playground> {
        let playground = Playground::new(self.catalog.get(id)?);
        self.slot.clear();
        Some(playground)
    }

    /// Sends the playground draft for completion.
    ///
    /// A blank draft is ignored. Without a credential nothing is sent and a
    /// guidance notice is queued instead. A failed completion queues an error
    /// notice; either way the outcome replaces the displayed result.
    ///
    /// # Errors
    ///
    /// Returns an invocation error only if the state machine is misused, which
    /// freshly issued invocations never do.
    pub async fn generate(
        &mut self,
        playground: &Playground,
    ) -> InvocationResult<Option<&DisplayedResult>> {
        if playground.draft().trim().is_empty() {
            debug!(record = %playground.record_id(), "blank draft ignored");
            return Ok(None);
        }
        if !self.client.is_credential_configured() {
            self.notices.push(MISSING_CREDENTIAL, NoticeKind::Info);
            return Ok(None);
        }

        let client = self.client.clone();
        let invocation = self.slot.issue();
        let resolution = invocation
            .run(&client, &playground.prompt_text(), &CompletionOptions::default())
            .await?;

        if let Err(err) = &resolution.outcome {
            self.notices.push(
                format!(
                    "Erro ao gerar resposta: {}. Verifique a configuração da API.",
                    err.message()
                ),
                NoticeKind::Error,
            );
        }
        Ok(Some(self.slot.resolve(resolution)))
    }

    /// Returns the displayed result.
    #[must_use]
    pub fn result(&self) -> Option<&DisplayedResult> {
        self.slot.current()
    }

    /// Returns the notice queue.
    #[must_use]
    pub const fn notices(&self) -> &Notices {
        &self.notices
    }

    /// Dismisses a notice.
    pub fn dismiss_notice(&mut self, id: u64) -> bool {
        self.notices.dismiss(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invocation::InvocationState;
    use crate::test_support::{EchoBackend, client_with, client_without_key};

    fn session(client: CompletionClient) -> CatalogSession {
        CatalogSession::new(Catalog::builtin().unwrap(), client)
    }

    #[test]
    fn starts_with_everything_visible() {
        let session = session(client_with(EchoBackend::replying("x")));
        assert_eq!(session.view_mode(), ViewMode::Grid);
        assert_eq!(session.visible_count(), session.total_count());
        assert_eq!(session.criteria().category(), Category::All);
    }

    #[test]
    fn criteria_narrow_the_visible_list() {
        let mut session = session(client_with(EchoBackend::replying("x")));
        session.set_category(Category::Analysis);
        let ids: Vec<_> = session.visible().iter().map(|r| r.id().as_str()).collect();
        assert_eq!(ids, ["1", "6"]);

        session.set_search("zzz-nothing");
        assert_eq!(session.visible_count(), 0);
    }

    #[test]
    fn copy_queues_confirmation() {
        let mut session = session(client_with(EchoBackend::replying("x")));
        let content = session.copy("101").unwrap();
        assert_eq!(content, session.catalog().get("101").unwrap().content());
        assert_eq!(session.notices().latest().unwrap().message, COPIED_PROMPT);
        assert!(session.copy("missing").is_none());
    }

    #[tokio::test]
    async fn blank_draft_is_ignored() {
        let backend = EchoBackend::replying("x");
        let mut session = session(client_with(backend.clone()));
        let mut playground = session.open_playground("1").unwrap();
        playground.set_draft("   ");

        assert!(session.generate(&playground).await.unwrap().is_none());
        assert!(backend.requests().is_empty());
        assert!(session.notices().items().is_empty());
    }

    #[tokio::test]
    async fn missing_credential_sends_nothing() {
        let backend = EchoBackend::replying("x");
        let mut session = session(client_without_key(backend.clone()));
        let playground = session.open_playground("1").unwrap();

        assert!(session.generate(&playground).await.unwrap().is_none());
        assert!(backend.requests().is_empty());
        assert_eq!(session.notices().latest().unwrap().kind, NoticeKind::Info);
        assert!(session.result().is_none());
    }

    #[tokio::test]
    async fn successful_generation_is_displayed() {
        let backend = EchoBackend::replying("Resposta gerada");
        let mut session = session(client_with(backend.clone()));
        let mut playground = session.open_playground("1").unwrap();
        playground.set_draft("Analise o contrato.");

        let shown = session.generate(&playground).await.unwrap().unwrap();
        assert_eq!(shown.state, InvocationState::Succeeded);
        assert_eq!(session.result().unwrap().outcome.as_deref(), Ok("Resposta gerada"));

        let sent = backend.requests();
        assert!(sent[0].contents.starts_with("Tarefa: "));
        assert!(sent[0].contents.ends_with("Analise o contrato."));

        assert_eq!(session.copy_result().as_deref(), Some("Resposta gerada"));
    }

    #[tokio::test]
    async fn failed_generation_queues_error_notice() {
        let mut session = session(client_with(EchoBackend::failing("quota exceeded")));
        let playground = session.open_playground("2").unwrap();

        let shown = session.generate(&playground).await.unwrap().unwrap();
        assert_eq!(shown.state, InvocationState::Failed);

        let notice = session.notices().latest().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(notice.message.contains("quota exceeded"));
        assert!(session.copy_result().is_none());
    }

    #[tokio::test]
    async fn opening_playground_clears_previous_result() {
        let mut session = session(client_with(EchoBackend::replying("x")));
        let playground = session.open_playground("1").unwrap();
        session.generate(&playground).await.unwrap();
        assert!(session.result().is_some());

        session.open_playground("2").unwrap();
        assert!(session.result().is_none());
    }

    #[test]
    fn playground_tracks_unfilled_placeholders() {
        let mut session = session(client_with(EchoBackend::replying("x")));
        let mut playground = session.open_playground("1").unwrap();
        playground.set_draft("Analise [CONTRATO] para [CLIENTE].");
        assert_eq!(playground.unfilled_placeholders(), ["[CONTRATO]", "[CLIENTE]"]);
    }
}
