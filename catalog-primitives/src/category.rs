//! Closed enumerations describing catalog records.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Subject area a prompt belongs to, plus the `All` selector used by filters.
///
/// Parsing never fails: any string that is neither a known key nor a known
/// display label becomes [`Category::Unrecognized`], which selects nothing when
/// used as filter input and is rejected as a record category.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    /// Selector matching every record.
    #[default]
    All,
    /// Public-service exam preparation.
    ExamPrep,
    /// Drafting of legal documents.
    LegalDrafting,
    /// Document analysis and review.
    Analysis,
    /// Office administration.
    Administrative,
    /// Client communication.
    ClientComms,
    /// Value outside the closed set.
    Unrecognized,
}

impl Category {
    /// Categories offered to the user, in display order.
    pub const SELECTABLE: [Self; 6] = [
        Self::All,
        Self::ExamPrep,
        Self::LegalDrafting,
        Self::Analysis,
        Self::Administrative,
        Self::ClientComms,
    ];

    /// Returns the stable machine key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::ExamPrep => "exam_prep",
            Self::LegalDrafting => "legal_drafting",
            Self::Analysis => "analysis",
            Self::Administrative => "administrative",
            Self::ClientComms => "client_comms",
            Self::Unrecognized => "unrecognized",
        }
    }

    /// Returns the human-readable label shown in the catalog.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "Todos",
            Self::ExamPrep => "Concursos Públicos",
            Self::LegalDrafting => "Redação Jurídica",
            Self::Analysis => "Análise de Documentos",
            Self::Administrative => "Administrativo",
            Self::ClientComms => "Atendimento ao Cliente",
            Self::Unrecognized => "Desconhecida",
        }
    }

    /// Returns `true` for categories a record may carry.
    #[must_use]
    pub const fn is_concrete(self) -> bool {
        !matches!(self, Self::All | Self::Unrecognized)
    }

    /// Returns `true` when a record in `category` passes this category gate.
    #[must_use]
    pub fn admits(self, category: Self) -> bool {
        match self {
            Self::All => true,
            Self::Unrecognized => false,
            selected => selected == category,
        }
    }

    /// Parses a key or label, yielding [`Category::Unrecognized`] for anything else.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        Self::SELECTABLE
            .into_iter()
            .find(|category| category.key() == input || category.label() == input)
            .unwrap_or(Self::Unrecognized)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.key().to_owned()
    }
}

/// Difficulty of a prompt. Display-only; filters ignore it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    /// Suitable for newcomers.
    #[serde(alias = "Iniciante")]
    Beginner,
    /// Assumes some practice.
    #[serde(alias = "Intermediário")]
    Intermediate,
    /// Assumes solid domain knowledge.
    #[serde(alias = "Avançado")]
    Advanced,
}

impl Complexity {
    /// Returns the human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Beginner => "Iniciante",
            Self::Intermediate => "Intermediário",
            Self::Advanced => "Avançado",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
