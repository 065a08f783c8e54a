//! Instruction payload construction
//!
//! Assembles the system directive for the simulated customer from four
//! blocks, in order: market knowledge, product focus, persona, ground rules.
//! The result is rebuilt on every request.

mod knowledge;

use crate::llm::{LlmMessage, LlmRequest};
use crate::persona::{self, Difficulty, Product};
use crate::state_machine::Turn;

const ROLE_PREAMBLE: &str = "Você é um CLIENTE BRASILEIRO simulado em uma conversa de vendas bancárias. O usuário é um VENDEDOR de banco que está tentando te vender produtos.";

const KNOWLEDGE_USAGE: &str = "IMPORTANTE: Você CONHECE todos esses produtos dos bancos listados acima. Você pode fazer comparações, mencionar taxas, falar sobre experiências que \"ouviu falar\" ou que \"viu anúncios\". Use esse conhecimento naturalmente na conversa.";

const GROUND_RULES: &str = "REGRAS FUNDAMENTAIS:
1. Você é o CLIENTE, não o vendedor
2. Responda APENAS como cliente interessado no produto específico que o vendedor está oferecendo
3. Seja brasileiro e use linguagem natural brasileira
4. Faça perguntas relevantes sobre o produto, focando nos pontos listados acima
5. Mantenha respostas concisas (2-4 frases no máximo)
6. Reaja às ofertas do vendedor de forma natural
7. Compare com produtos similares de outros bancos quando relevante
8. Mostre interesse genuíno ou ceticismo baseado em sua personalidade
9. NUNCA mude de assunto - mantenha o foco no produto sendo oferecido
10. Use [VENDA_FECHADA] ou [VENDA_PERDIDA] apenas uma vez, no final da mensagem em que você decidir";

/// Upper bound on reply length; personas are told to answer in a few sentences
const MAX_REPLY_TOKENS: u32 = 1024;

/// Build the instruction block for a persona
pub fn instruction_block(difficulty: Difficulty, product: Product) -> String {
    let persona = persona::instructions(difficulty, product);
    [
        ROLE_PREAMBLE,
        knowledge::BANK_PRODUCTS,
        knowledge::product_focus(product),
        KNOWLEDGE_USAGE,
        persona.as_str(),
        GROUND_RULES,
    ]
    .join("\n\n")
}

/// Build the completion request for the next customer reply.
///
/// The instruction block goes in the system slot; the turn history follows it
/// in timeline order. Verdict entries are not part of the dialogue and are
/// skipped.
pub fn compose(difficulty: Difficulty, product: Product, turns: &[Turn]) -> LlmRequest {
    let messages = turns.iter().filter_map(Turn::to_llm_message).collect::<Vec<LlmMessage>>();

    LlmRequest {
        system: instruction_block(difficulty, product),
        messages,
        max_tokens: Some(MAX_REPLY_TOKENS),
    }
}
