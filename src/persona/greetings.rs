//! Opening lines, one table per difficulty

use super::{Difficulty, Product};

type GreetingTable = &'static [(Product, &'static str)];

const EASY: GreetingTable = &[
    (
        Product::CheckingAccount,
        "Olá! Tudo bem? Estou procurando abrir uma conta corrente. Vocês podem me ajudar?",
    ),
    (
        Product::CreditCard,
        "Oi! Tudo bem? Estou querendo um cartão de crédito novo. O que vocês têm para mim?",
    ),
    (
        Product::Investments,
        "Olá! Juntei um dinheirinho e queria começar a investir. Vocês podem me orientar?",
    ),
    (
        Product::Loan,
        "Oi, tudo bem? Estou precisando de um empréstimo para uma reforma. Como funciona aqui?",
    ),
    (
        Product::CapitalizationBond,
        "Olá! Vi um cartaz sobre título de capitalização com sorteios. Me conta mais?",
    ),
    (
        Product::Insurance,
        "Oi! Comprei um carro e acho que preciso de um seguro. Vocês podem me ajudar?",
    ),
];

const MEDIUM: GreetingTable = &[
    (
        Product::CheckingAccount,
        "Oi. Eu já tenho conta em outro banco, mas queria saber o que vocês oferecem. O que vocês têm de diferente?",
    ),
    (
        Product::CreditCard,
        "Oi. Já tenho um cartão sem anuidade em outro banco. Por que eu trocaria pelo de vocês?",
    ),
    (
        Product::Investments,
        "Boa tarde. Hoje meu dinheiro está num CDB que rende 100% do CDI. Vocês conseguem algo melhor?",
    ),
    (
        Product::Loan,
        "Olá. Estou cotando empréstimo em alguns bancos. Qual é a taxa de vocês, com tudo incluído?",
    ),
    (
        Product::CapitalizationBond,
        "Oi. Me ofereceram capitalização outro dia, mas não entendi se vale a pena. Qual é a vantagem real?",
    ),
    (
        Product::Insurance,
        "Olá. Já tenho seguro residencial em outra seguradora e a renovação está chegando. O que vocês oferecem?",
    ),
];

const HARD: GreetingTable = &[
    (
        Product::CheckingAccount,
        "Olha, já tenho conta em três bancos e francamente não estou muito satisfeito com nenhum. Por que eu deveria considerar abrir conta aqui?",
    ),
    (
        Product::CreditCard,
        "Já tive cartão com vocês e cobraram uma anuidade que ninguém me avisou. Não sei por que ainda estou aqui.",
    ),
    (
        Product::Investments,
        "Da última vez que um gerente me indicou investimento, perdi dinheiro e ninguém me explicou nada. Vai ser diferente agora?",
    ),
    (
        Product::Loan,
        "Banco só empresta dinheiro com juros abusivos e letras miúdas. Me convença de que vocês são diferentes.",
    ),
    (
        Product::CapitalizationBond,
        "Capitalização? Isso é só loteria disfarçada que rende menos que a poupança. Nem sei por que vim ouvir.",
    ),
    (
        Product::Insurance,
        "Já acionei seguro uma vez e foi um pesadelo de burocracia, demoraram meses para pagar. Por que eu confiaria em vocês?",
    ),
];

/// Greeting table for a difficulty; every difficulty has one
pub(super) fn table(difficulty: Difficulty) -> GreetingTable {
    match difficulty {
        Difficulty::Easy => EASY,
        Difficulty::Medium => MEDIUM,
        Difficulty::Hard => HARD,
    }
}

/// Find `product` in `table`, falling back to the checking-account entry.
///
/// Tables may be extended one product at a time; a product that has not been
/// written yet for a difficulty borrows that difficulty's baseline line.
pub(super) fn lookup(table: GreetingTable, product: Product) -> &'static str {
    find(table, product)
        .or_else(|| find(table, Product::DEFAULT))
        .unwrap_or(BASELINE)
}

fn find(table: GreetingTable, product: Product) -> Option<&'static str> {
    table
        .iter()
        .find_map(|(p, text)| (*p == product).then_some(*text))
}

/// Last resort for a table that lacks even its baseline entry
const BASELINE: &str = "Olá. Queria saber o que vocês têm para me oferecer.";
