//! Keyword-based category classification
//!
//! Categories are tried in table order and the first one with a keyword
//! occurring anywhere in the lower-cased message wins. Text matching no
//! rule falls back to [`Category::Other`].

use tracing::debug;

use crate::models::Category;

/// Ordered category -> keyword rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTable {
    rules: Vec<(Category, Vec<String>)>,
}

impl KeywordTable {
    /// Build a table from rules given in priority order
    ///
    /// Keywords are stored lower-cased; empty keywords are dropped since
    /// they would match every message.
    pub fn new<I, K, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = (Category, K)>,
        K: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rules = rules
            .into_iter()
            .map(|(category, keywords)| {
                let keywords = keywords
                    .into_iter()
                    .map(|k| k.as_ref().trim().to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect();
                (category, keywords)
            })
            .collect();
        Self { rules }
    }

    pub fn rules(&self) -> impl Iterator<Item = (Category, &[String])> {
        self.rules.iter().map(|(c, k)| (*c, k.as_slice()))
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::new([
            (Category::Market, vec!["mercado", "supermercado", "compras"]),
            (
                Category::Food,
                vec!["restaurante", "lanche", "comida", "almoço", "jantar"],
            ),
            (Category::Transport, vec!["uber", "gasolina", "ônibus", "metrô"]),
            (Category::Leisure, vec!["cinema", "festa", "bar", "show"]),
            (Category::Bills, vec!["luz", "água", "internet", "aluguel"]),
            (Category::Income, vec!["recebi", "salário", "ganhei"]),
        ])
    }
}

/// Maps raw chat messages to a [`Category`]
#[derive(Debug, Clone, Default)]
pub struct CategoryClassifier {
    table: KeywordTable,
}

impl CategoryClassifier {
    pub fn new(table: KeywordTable) -> Self {
        Self { table }
    }

    /// Classify a message; never fails
    pub fn classify(&self, raw_message: &str) -> Category {
        let lowered = raw_message.to_lowercase();

        for (category, keywords) in self.table.rules() {
            if let Some(keyword) = keywords.iter().find(|k| lowered.contains(k.as_str())) {
                debug!(%category, keyword = %keyword, "message classified");
                return category;
            }
        }

        debug!("no keyword matched, falling back to Other");
        Category::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keywords() {
        let classifier = CategoryClassifier::default();

        assert_eq!(classifier.classify("supermercado 120"), Category::Market);
        assert_eq!(classifier.classify("almoço 25"), Category::Food);
        assert_eq!(classifier.classify("Uber 15 to 20"), Category::Transport);
        assert_eq!(classifier.classify("cinema com amigos 40"), Category::Leisure);
        assert_eq!(classifier.classify("conta de luz 180,50"), Category::Bills);
        assert_eq!(classifier.classify("recebi 1000 salário"), Category::Income);
    }

    #[test]
    fn test_case_insensitive() {
        let classifier = CategoryClassifier::default();
        assert_eq!(classifier.classify("MERCADO 300"), Category::Market);
        assert_eq!(classifier.classify("ALMOÇO 25"), Category::Food);
        assert_eq!(classifier.classify("Metrô 4,40"), Category::Transport);
    }

    #[test]
    fn test_priority_follows_declaration_order() {
        let classifier = CategoryClassifier::default();

        // Food keyword comes first in the text, but Market is declared first
        assert_eq!(classifier.classify("jantar e mercado 80"), Category::Market);
        // Income is declared after Transport
        assert_eq!(classifier.classify("ganhei uber grátis"), Category::Transport);
    }

    #[test]
    fn test_substring_matching() {
        let classifier = CategoryClassifier::default();
        // "bar" occurs inside "barato"
        assert_eq!(classifier.classify("algo barato 10"), Category::Leisure);
    }

    #[test]
    fn test_fallback_to_other() {
        let classifier = CategoryClassifier::default();
        assert_eq!(classifier.classify("oi"), Category::Other);
        assert_eq!(classifier.classify(""), Category::Other);
        assert_eq!(classifier.classify("12345"), Category::Other);
    }

    #[test]
    fn test_deterministic() {
        let classifier = CategoryClassifier::default();
        let text = "festa no bar 60";
        assert_eq!(classifier.classify(text), classifier.classify(text));
    }

    #[test]
    fn test_custom_table() {
        let table = KeywordTable::new([
            (Category::Income, vec!["Payday"]),
            (Category::Food, vec!["pizza", ""]),
        ]);
        let classifier = CategoryClassifier::new(table);

        assert_eq!(classifier.classify("payday pizza"), Category::Income);
        assert_eq!(classifier.classify("pizza 30"), Category::Food);
        assert_eq!(classifier.classify("mercado 300"), Category::Other);
    }
}
