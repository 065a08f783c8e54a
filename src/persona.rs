//! Persona catalog
//!
//! Static lookup of difficulty x product to the simulated customer's opening
//! line and behavioral instructions. Every lookup is total: unknown wire keys
//! resolve through [`Difficulty::resolve`] / [`Product::resolve`], and a
//! product missing from a difficulty's greeting table falls back to that
//! table's checking-account entry.

mod greetings;
mod instructions;

use serde::{Deserialize, Serialize};

/// How hard the simulated customer is to convince
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Baseline persona used when a key cannot be resolved
    pub const DEFAULT: Difficulty = Difficulty::Medium;

    /// Stable key used on the wire
    pub fn key(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.key() == key)
    }

    /// Resolve a wire key, defaulting to [`Difficulty::DEFAULT`] for unknown keys
    pub fn resolve(key: &str) -> Self {
        Self::from_key(key.trim()).unwrap_or_else(|| {
            tracing::debug!(key, "Unknown difficulty key, using default persona");
            Self::DEFAULT
        })
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Cliente Fácil",
            Difficulty::Medium => "Cliente Médio",
            Difficulty::Hard => "Cliente Difícil",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Difficulty::Easy => "Cliente receptivo e interessado nos produtos",
            Difficulty::Medium => "Cliente com dúvidas e necessita de convencimento",
            Difficulty::Hard => "Cliente resistente e com muitas objeções",
        }
    }
}

/// Banking product the trainee is selling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Product {
    #[serde(rename = "conta")]
    CheckingAccount,
    #[serde(rename = "cartao")]
    CreditCard,
    #[serde(rename = "investimentos")]
    Investments,
    #[serde(rename = "emprestimo")]
    Loan,
    #[serde(rename = "capitalizacao")]
    CapitalizationBond,
    #[serde(rename = "seguro")]
    Insurance,
}

impl Product {
    pub const ALL: [Product; 6] = [
        Product::CheckingAccount,
        Product::CreditCard,
        Product::Investments,
        Product::Loan,
        Product::CapitalizationBond,
        Product::Insurance,
    ];

    /// Baseline product used when a key cannot be resolved
    pub const DEFAULT: Product = Product::CheckingAccount;

    /// Stable key used on the wire
    pub fn key(self) -> &'static str {
        match self {
            Product::CheckingAccount => "conta",
            Product::CreditCard => "cartao",
            Product::Investments => "investimentos",
            Product::Loan => "emprestimo",
            Product::CapitalizationBond => "capitalizacao",
            Product::Insurance => "seguro",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.key() == key)
    }

    /// Resolve a wire key, defaulting to [`Product::DEFAULT`] for unknown keys
    pub fn resolve(key: &str) -> Self {
        Self::from_key(key.trim()).unwrap_or_else(|| {
            tracing::debug!(key, "Unknown product key, using checking account");
            Self::DEFAULT
        })
    }

    pub fn title(self) -> &'static str {
        match self {
            Product::CheckingAccount => "Conta Corrente",
            Product::CreditCard => "Cartão de Crédito",
            Product::Investments => "Investimentos",
            Product::Loan => "Empréstimos",
            Product::CapitalizationBond => "Capitalização",
            Product::Insurance => "Seguros",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Product::CheckingAccount => "Venda conta corrente e serviços bancários",
            Product::CreditCard => "Ofereça cartões com benefícios exclusivos",
            Product::Investments => "Apresente CDB, fundos e previdência",
            Product::Loan => "Ofereça crédito pessoal e consignado",
            Product::CapitalizationBond => "Apresente títulos de capitalização",
            Product::Insurance => "Ofereça seguros de vida, auto e residencial",
        }
    }
}

/// Opening customer line for a persona
pub fn greeting(difficulty: Difficulty, product: Product) -> &'static str {
    greetings::lookup(greetings::table(difficulty), product)
}

/// Behavioral contract for a persona: tone, objection density and how many
/// exchanges must pass before a conclusion is plausible.
///
/// The text is forwarded to the model as-is; nothing downstream parses it.
pub fn instructions(difficulty: Difficulty, product: Product) -> String {
    instructions::for_persona(difficulty, product)
}
