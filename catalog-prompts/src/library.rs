//! Specialised prompts for explanations, question banks, essay grading, and
//! study planning.
//!
//! Every builder trims surrounding whitespace from the rendered text.

use catalog_primitives::Complexity;
use tracing::warn;

use crate::template::{PromptTemplate, TemplateResult};

/// Bounds applied to [`question_generation`] counts.
pub const QUESTION_COUNT_RANGE: std::ops::RangeInclusive<u32> = 1..=20;

const DEFAULT_RUBRIC: [&str; 3] = [
    "Apresentação e estrutura textual (0-10)",
    "Desenvolvimento do tema (0-10)",
    "Domínio da norma culta (0-10)",
];

/// Style of generated practice questions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuestionKind {
    /// Multiple-choice questions.
    MultipleChoice,
    /// True/false ("certo ou errado") items.
    TrueFalse,
}

impl QuestionKind {
    /// Returns the wording used inside the prompt.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MultipleChoice => "múltipla escolha",
            Self::TrueFalse => "certo/errado",
        }
    }
}

fn level_label(level: Complexity) -> String {
    level.label().to_lowercase()
}

fn render(text: &str, pairs: &[(&str, &str)]) -> TemplateResult<String> {
    let mut builder = PromptTemplate::builder(text);
    for (name, _) in pairs {
        builder = builder.with_required_variable(*name);
    }
    Ok(builder.build()?.render_pairs(pairs)?.trim().to_owned())
}

/// Explains a legal concept at the requested depth.
///
/// # Errors
///
/// Returns a template error only if the built-in text is malformed.
pub fn explanation(topic: &str, level: Complexity) -> TemplateResult<String> {
    render(
        "
Explique o seguinte conceito jurídico de forma {{level}}:

Tópico: {{topic}}

Estruture sua resposta em:
1. Definição clara
2. Base legal (artigos/leis relevantes)
3. Exemplo prático
4. Pegadinhas comuns em provas (se aplicável)
",
        &[("topic", topic), ("level", &level_label(level))],
    )
}

/// Generates a bank of practice questions.
///
/// `count` is clamped to [`QUESTION_COUNT_RANGE`]; a warning is logged when it
/// falls outside.
///
/// # Errors
///
/// Returns a template error only if the built-in text is malformed.
pub fn question_generation(subject: &str, kind: QuestionKind, count: u32) -> TemplateResult<String> {
    let clamped = count.clamp(*QUESTION_COUNT_RANGE.start(), *QUESTION_COUNT_RANGE.end());
    if clamped != count {
        warn!(requested = count, used = clamped, "question count out of bounds");
    }

    render(
        "
Crie {{count}} questões de {{kind}} sobre {{subject}}.

Para cada questão, forneça:
- Enunciado claro
- Alternativas (se múltipla escolha)
- Gabarito comentado
- Fonte/fundamento legal

Estilo de banca: Cebraspe/CESPE (rigor técnico)
",
        &[
            ("count", &clamped.to_string()),
            ("kind", kind.label()),
            ("subject", subject),
        ],
    )
}

/// Reviews an essay against the Cebraspe criteria.
///
/// # Errors
///
/// Returns a template error only if the built-in text is malformed.
pub fn essay_review(topic: &str, essay: &str) -> TemplateResult<String> {
    render(
        "
Corrija a seguinte redação dissertativa sobre \"{{topic}}\" usando os critérios da banca Cebraspe:

{{essay}}

Avalie em escala 0-10:
1. Apresentação e estrutura textual
2. Desenvolvimento do tema
3. Domínio da norma culta

Forneça feedback detalhado e sugestões de melhoria.
",
        &[("topic", topic), ("essay", essay)],
    )
}

/// Builds a weekly study plan for a public-service position.
///
/// # Errors
///
/// Returns a template error only if the built-in text is malformed.
pub fn study_plan(position: &str, hours_per_day: u32, subjects: &[&str]) -> TemplateResult<String> {
    render(
        "
Crie um cronograma de estudos semanal para o cargo de {{position}}.

Horas disponíveis por dia: {{hours}}
Matérias do edital: {{subjects}}

Requisitos:
- Priorize matérias por peso/relevância
- Inclua revisões espaçadas
- Reserve tempo para questões
- Formato: Tabela semanal
",
        &[
            ("position", position),
            ("hours", &hours_per_day.to_string()),
            ("subjects", &subjects.join(", ")),
        ],
    )
}

/// Grades a dissertation against a numbered rubric.
///
/// An empty `rubric` falls back to the three default Cebraspe criteria.
///
/// # Errors
///
/// Returns a template error only if the built-in text is malformed.
pub fn essay_evaluation(topic: &str, essay: &str, rubric: &[String]) -> TemplateResult<String> {
    let criteria: Vec<&str> = if rubric.is_empty() {
        DEFAULT_RUBRIC.to_vec()
    } else {
        rubric.iter().map(String::as_str).collect()
    };
    let numbered = criteria
        .iter()
        .enumerate()
        .map(|(index, criterion)| format!("{}. {criterion}", index + 1))
        .collect::<Vec<_>>()
        .join("\n");

    render(
        "
Aja como um examinador da banca Cebraspe. Corrija a dissertação abaixo:

Tema: {{topic}}

Texto:
{{essay}}

Critérios de avaliação:
{{criteria}}

Forneça:
- Nota para cada critério
- Justificativa dos erros
- Sugestões específicas de melhoria
",
        &[("topic", topic), ("essay", essay), ("criteria", &numbered)],
    )
}

/// Reviews a legal document of the given kind.
///
/// # Errors
///
/// Returns a template error only if the built-in text is malformed.
pub fn legal_review(document: &str, document_kind: &str) -> TemplateResult<String> {
    render(
        "
Revise o seguinte documento jurídico ({{kind}}):

{{document}}

Identifique:
- Erros técnicos ou conceituais
- Problemas de formatação
- Melhorias sugeridas
- Pontos fortes
",
        &[("kind", document_kind), ("document", document)],
    )
}

/// Tutor-style explanation with optional extra context.
///
/// # Errors
///
/// Returns a template error only if the built-in text is malformed.
pub fn tutor_explanation(
    topic: &str,
    level: Complexity,
    context: Option<&str>,
) -> TemplateResult<String> {
    let context_line = context
        .filter(|context| !context.trim().is_empty())
        .map(|context| format!("Contexto adicional: {context}"))
        .unwrap_or_default();

    render(
        "
Como um tutor especializado em concursos públicos, explique:

Tópico: {{topic}}
Nível do aluno: {{level}}
{{context}}

Forneça uma explicação didática, clara e com exemplos práticos.
",
        &[
            ("topic", topic),
            ("level", &level_label(level)),
            ("context", &context_line),
        ],
    )
}

/// Answers a specific question with legal grounding.
///
/// # Errors
///
/// Returns a template error only if the built-in text is malformed.
pub fn question_answer(question: &str) -> TemplateResult<String> {
    render(
        "
Responda à seguinte dúvida de forma clara e fundamentada:

{{question}}

Inclua:
- Resposta direta
- Fundamento legal (se aplicável)
- Exemplo prático
",
        &[("question", question)],
    )
}

/// Prefixes a playground draft with the task title.
#[must_use]
pub fn task_prompt(title: &str, draft: &str) -> String {
    format!("Tarefa: {title}. \n\n{draft}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explanation_uses_lowercase_level() {
        let prompt = explanation("Habeas corpus", Complexity::Advanced).unwrap();
        assert!(prompt.starts_with("Explique o seguinte conceito jurídico de forma avançado:"));
        assert!(prompt.contains("Tópico: Habeas corpus"));
    }

    #[test]
    fn question_count_is_clamped() {
        let many = question_generation("Direito Penal", QuestionKind::TrueFalse, 50).unwrap();
        assert!(many.starts_with("Crie 20 questões de certo/errado sobre Direito Penal."));

        let none = question_generation("Direito Civil", QuestionKind::MultipleChoice, 0).unwrap();
        assert!(none.starts_with("Crie 1 questões de múltipla escolha"));
    }

    #[test]
    fn study_plan_joins_subjects() {
        let prompt = study_plan("Analista Judiciário", 4, &["Português", "Constitucional"]).unwrap();
        assert!(prompt.contains("Horas disponíveis por dia: 4"));
        assert!(prompt.contains("Matérias do edital: Português, Constitucional"));
    }

    #[test]
    fn essay_evaluation_numbers_rubric() {
        let default = essay_evaluation("Meio ambiente", "Texto", &[]).unwrap();
        assert!(default.contains("1. Apresentação e estrutura textual (0-10)"));
        assert!(default.contains("3. Domínio da norma culta (0-10)"));

        let custom = essay_evaluation("Tema", "Texto", &["Coesão".to_owned()]).unwrap();
        assert!(custom.contains("1. Coesão"));
        assert!(!custom.contains("2."));
    }

    #[test]
    fn essay_text_with_braces_is_kept_verbatim() {
        let prompt = essay_review("Tema", "uso de {{chaves}} no texto").unwrap();
        assert!(prompt.contains("uso de {{chaves}} no texto"));
    }

    #[test]
    fn tutor_context_is_optional() {
        let without = tutor_explanation("Prescrição", Complexity::Intermediate, None).unwrap();
        assert!(!without.contains("Contexto adicional"));
        assert!(without.contains("Nível do aluno: intermediário"));

        let with = tutor_explanation("Prescrição", Complexity::Beginner, Some("TRF")).unwrap();
        assert!(with.contains("Contexto adicional: TRF"));
    }

    #[test]
    fn legal_review_and_answer_render() {
        assert!(legal_review("Minuta", "contrato").unwrap().contains("(contrato)"));
        assert!(question_answer("O que é dolo?").unwrap().contains("O que é dolo?"));
    }

    #[test]
    fn task_prompt_prefixes_title() {
        assert_eq!(task_prompt("Flashcards", "corpo"), "Tarefa: Flashcards. \n\ncorpo");
    }
}
