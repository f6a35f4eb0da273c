//! Token estimates used for TPM limiting.

use std::sync::OnceLock;
use tiktoken_rs::CoreBPE;

static ENCODER: OnceLock<Option<CoreBPE>> = OnceLock::new();

/// Estimate the number of tokens in `text`.
///
/// Uses the cl100k encoding; if it cannot be loaded, falls back to one token
/// per four bytes. Never returns zero.
pub fn estimate_tokens(text: &str) -> u64 {
    let encoder = ENCODER.get_or_init(|| match tiktoken_rs::cl100k_base() {
        Ok(bpe) => Some(bpe),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load cl100k encoding, using byte estimate");
            None
        }
    });

    let count = match encoder {
        Some(bpe) => bpe.encode_with_special_tokens(text).len() as u64,
        None => (text.len() as u64).div_ceil(4),
    };
    count.max(1)
}
