//! Static product knowledge handed to the simulated customer

use crate::persona::Product;

/// What the customer "knows" about the Brazilian retail banking market
pub const BANK_PRODUCTS: &str = "CONHECIMENTO SOBRE PRODUTOS BANCÁRIOS BRASILEIROS:

ITAÚ:
- Contas: Conta Corrente Itaú, Conta Universitária (isenta para estudantes), Conta Digital (sem tarifas)
- Cartões: Itaú Uniclass Visa Infinite, Itaú Click, Personnalité
- Investimentos: CDB, LCI/LCA, Tesouro Direto, Fundos de Investimento, Previdência Privada
- Empréstimos: Crédito Pessoal, Empréstimo Consignado, CDC (veículos)
- Diferenciais: App completo, Rede de agências, Programa de pontos Pão de Açúcar

SANTANDER:
- Contas: Conta Corrente Select, Conta Van Gogh (gratuita), Conta Universitária
- Cartões: SX, Unlimited, Decolar
- Investimentos: CDB, Fundos, Previdência, Santander Negócios
- Empréstimos: CDC, Crédito Pessoal, Consignado
- Diferenciais: Parcerias internacionais, Benefícios exclusivos

BRADESCO:
- Contas: Conta Corrente Prime, Bradesco Exclusive, Conta Universitária
- Cartões: Bradesco Visa Infinite, Mastercard Black, Elo
- Investimentos: CDB Premium, Fundos, Previdência, Tesouro
- Empréstimos: Empréstimo Pessoal, CDC, Consignado
- Diferenciais: Maior rede de caixas eletrônicos, Seguros integrados

CAIXA ECONÔMICA:
- Contas: Conta Caixa Fácil, Conta Corrente, Poupança
- Cartões: Cartão Caixa Mastercard, Visa
- Investimentos: Poupança, Fundos Caixa, Tesouro Direto
- Empréstimos: Crédito Habitacional, FGTS, Consignado
- Diferenciais: Programas sociais, Financiamento habitacional, Loterias

BANCO DO BRASIL:
- Contas: Conta Corrente BB, Conta Universitária, Ouro
- Cartões: Ourocard Visa/Mastercard, BB Elo
- Investimentos: BB Renda Fixa, Fundos, Agronegócio, Previdência
- Empréstimos: BB Crédito, Consignado, Agrícola
- Diferenciais: Forte no agronegócio, Abrangência nacional, Programa de pontos Livelo";

/// Points the customer cares about for the product on offer
pub fn product_focus(product: Product) -> &'static str {
    match product {
        Product::CheckingAccount => "O vendedor está oferecendo CONTA CORRENTE. Você está interessado especificamente em:
- Tarifas mensais e isenções
- Benefícios de cada tipo de conta
- Facilidades do app/internet banking
- Rede de caixas eletrônicos
- Programas de pontos",
        Product::CreditCard => "O vendedor está oferecendo CARTÃO DE CRÉDITO. Você está interessado especificamente em:
- Anuidade e possibilidades de isenção
- Benefícios e programas de pontos
- Limite de crédito
- Descontos em parceiros
- Seguros e proteções incluídas",
        Product::Investments => "O vendedor está oferecendo INVESTIMENTOS. Você está interessado especificamente em:
- Rentabilidade (% do CDI, taxas)
- Liquidez (quando pode resgatar)
- Taxa de administração
- Riscos envolvidos
- Valor mínimo de aplicação",
        Product::Loan => "O vendedor está oferecendo EMPRÉSTIMO. Você está interessado especificamente em:
- Taxa de juros (mensal e anual)
- Prazo para pagamento
- Valor das parcelas
- Condições e exigências
- Taxas adicionais (IOF, TAC, etc.)",
        Product::CapitalizationBond => "O vendedor está oferecendo TÍTULO DE CAPITALIZAÇÃO. Você está interessado especificamente em:
- Valor das parcelas mensais
- Prazo de capitalização
- Rentabilidade do título
- Frequência e valores dos sorteios
- Valor de resgate no final",
        Product::Insurance => "O vendedor está oferecendo SEGUROS. Você está interessado especificamente em:
- Tipos de cobertura incluídos
- Valor do prêmio mensal
- Franquia e carência
- Processo de acionamento
- Exclusões e limitações",
    }
}
