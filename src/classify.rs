//! Keyword-based narrative classifier.
//!
//! Matching is pure substring containment over the lowercased
//! title + summary text: no tokenization, no word boundaries, so a keyword
//! may match inside a larger word. Rules are evaluated in order and every
//! matching rule contributes its label (accumulate-all policy); an item no
//! rule matches gets the [`UNCATEGORIZED`] sentinel.

use serde::Deserialize;

use crate::ingest::types::NewsItem;

/// Sentinel label for items no rule matches.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// One ordered rule: a label and the keyword substrings that trigger it.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct NarrativeRule {
    pub label: String,
    pub keywords: Vec<String>,
}

impl NarrativeRule {
    pub fn new(label: &str, keywords: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Built-in narrative table, in evaluation order.
    pub fn defaults() -> Vec<NarrativeRule> {
        vec![
            NarrativeRule::new("Bitcoin", &["bitcoin", "btc", "satoshi", "halving"]),
            NarrativeRule::new("Ethereum", &["ethereum", "eth ", "vitalik", "dencun"]),
            NarrativeRule::new("Solana", &["solana", "sol "]),
            NarrativeRule::new("Layer2", &["layer 2", "layer-2", "rollup", "arbitrum", "optimism", "zksync", "base chain"]),
            NarrativeRule::new("DeFi", &["defi", "dex", "liquidity pool", "yield", "lending protocol", "uniswap", "aave"]),
            NarrativeRule::new("Restaking", &["restaking", "eigenlayer", "liquid staking", "lst"]),
            NarrativeRule::new("Stablecoin", &["stablecoin", "usdt", "usdc", "tether", "dai"]),
            NarrativeRule::new("ETF", &["etf", "exchange-traded", "spot fund"]),
            NarrativeRule::new("Regulation", &["sec ", "regulat", "lawsuit", "congress", "mica", "cftc", "sanction"]),
            NarrativeRule::new("Memecoin", &["memecoin", "meme coin", "doge", "shiba", "pepe"]),
            NarrativeRule::new("NFT", &["nft", "non-fungible", "opensea"]),
            NarrativeRule::new("AI", &["artificial intelligence", " ai ", "ai agent", "machine learning"]),
            NarrativeRule::new("Security", &["hack", "exploit", "stolen", "phishing", "drained", "vulnerability"]),
            NarrativeRule::new("Airdrop", &["airdrop", "token launch", "tge"]),
        ]
    }
}

/// Ordered rule set applied to every item of a run.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<NarrativeRule>,
}

impl Classifier {
    pub fn new(rules: Vec<NarrativeRule>) -> Self {
        Self { rules }
    }

    /// Labels for a blob of text. Total: never returns an empty set.
    pub fn labels_for(&self, text: &str) -> Vec<String> {
        let haystack = text.to_lowercase();
        let mut labels: Vec<String> = Vec::new();
        for rule in &self.rules {
            let hit = rule
                .keywords
                .iter()
                .any(|k| !k.is_empty() && haystack.contains(&k.to_lowercase()));
            if hit && !labels.iter().any(|l| l == &rule.label) {
                labels.push(rule.label.clone());
            }
        }
        if labels.is_empty() {
            labels.push(UNCATEGORIZED.to_string());
        }
        labels
    }

    /// Classify one item from its title + summary.
    pub fn classify(&self, item: &mut NewsItem) {
        let text = format!("{} {}", item.title, item.summary);
        item.narratives = self.labels_for(&text);
    }

    pub fn classify_all(&self, items: &mut [NewsItem]) {
        for item in items.iter_mut() {
            self.classify(item);
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(NarrativeRule::defaults())
    }
}
