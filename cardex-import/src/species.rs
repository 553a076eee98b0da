//! What to do with a pokémon card whose species could not be identified.

use std::io::{BufRead, Write};

use cardex_catalog::types::Language;

/// A pokémon card with no dex id whose name matched no known species.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSpecies {
    /// Source id of the card (e.g. "sv01-063").
    pub card_id: String,
    pub card_slug: String,
    pub card_name: String,
    pub language: Language,
}

/// Last resort for species resolution.
///
/// Returns the dex id to use, or `None` to leave the card without its detail
/// row so that a later run picks it up again.
pub trait SpeciesFallback {
    fn resolve(&mut self, pending: &PendingSpecies) -> Option<i64>;
}

/// Collects unresolved cards for review instead of asking.
#[derive(Debug, Default)]
pub struct DeferFallback {
    pending: Vec<PendingSpecies>,
}

impl DeferFallback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> &[PendingSpecies] {
        &self.pending
    }

    pub fn into_pending(self) -> Vec<PendingSpecies> {
        self.pending
    }
}

impl SpeciesFallback for DeferFallback {
    fn resolve(&mut self, pending: &PendingSpecies) -> Option<i64> {
        log::warn!(
            "Deferring {} ({}): species unknown",
            pending.card_id,
            pending.card_name
        );
        self.pending.push(pending.clone());
        None
    }
}

/// Asks an operator for the dex id. An empty answer or end of input defers
/// the card.
pub struct PromptFallback<R, W> {
    input: R,
    output: W,
}

impl PromptFallback<std::io::StdinLock<'static>, std::io::Stdout> {
    pub fn stdin() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> PromptFallback<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, pending: &PendingSpecies) -> std::io::Result<Option<i64>> {
        loop {
            write!(
                self.output,
                "Dex id for {} ({}), empty to skip: ",
                pending.card_name, pending.card_id
            )?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let answer = line.trim();
            if answer.is_empty() {
                return Ok(None);
            }
            match answer.parse::<i64>() {
                Ok(dex) if dex > 0 => return Ok(Some(dex)),
                _ => writeln!(self.output, "'{}' is not a dex id", answer)?,
            }
        }
    }
}

impl<R: BufRead, W: Write> SpeciesFallback for PromptFallback<R, W> {
    fn resolve(&mut self, pending: &PendingSpecies) -> Option<i64> {
        match self.ask(pending) {
            Ok(answer) => answer,
            Err(e) => {
                log::error!("Failed to read dex id for {}: {}", pending.card_id, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending() -> PendingSpecies {
        PendingSpecies {
            card_id: "sv01-063".to_string(),
            card_slug: "poke-fr/sv/sv1/63".to_string(),
            card_name: "Pikachu".to_string(),
            language: Language::Fr,
        }
    }

    #[test]
    fn prompt_retries_until_valid() {
        let mut out = Vec::new();
        let mut prompt = PromptFallback::new(&b"abc\n-3\n25\n"[..], &mut out);
        assert_eq!(prompt.resolve(&pending()), Some(25));

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("Dex id for Pikachu").count(), 3);
        assert!(text.contains("'abc' is not a dex id"));
    }

    #[test]
    fn prompt_empty_or_eof_defers() {
        let mut prompt = PromptFallback::new(&b"\n"[..], Vec::new());
        assert_eq!(prompt.resolve(&pending()), None);

        let mut prompt = PromptFallback::new(&b""[..], Vec::new());
        assert_eq!(prompt.resolve(&pending()), None);
    }

    #[test]
    fn defer_collects() {
        let mut defer = DeferFallback::new();
        assert_eq!(defer.resolve(&pending()), None);
        assert_eq!(defer.pending(), &[pending()]);
    }
}
