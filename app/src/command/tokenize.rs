use flowscan_core::{TokenType, Tokenizer};
use serde::Serialize;

/// Input parameters for the Tokenize command strategy.
#[derive(Debug, Clone)]
pub struct TokenizeInput {
    /// Print only the word spans
    pub words: bool,
    pub text: String,
}

#[derive(Debug, Serialize)]
struct TokenView {
    text: String,
    #[serde(rename = "type")]
    token_type: TokenType,
    start: usize,
    end: usize,
}

/// Strategy for the classifying tokenizer.
#[derive(Debug, Clone, Copy)]
pub struct TokenizeStrategy;

impl super::CommandStrategy for TokenizeStrategy {
    type Input = TokenizeInput;

    fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let tokenizer = Tokenizer::new();

        if input.words {
            return super::print_json(&tokenizer.split_words(&input.text));
        }

        let views: Vec<TokenView> = tokenizer
            .tokenize(&input.text)
            .into_iter()
            .map(|token| TokenView {
                text: String::from_utf8_lossy(token.text).into_owned(),
                token_type: token.token_type,
                start: token.start,
                end: token.end,
            })
            .collect();

        super::print_json(&views)
    }
}
