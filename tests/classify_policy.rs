// tests/classify_policy.rs
use narasi_agent::{Classifier, NarrativeRule, NewsItem, UNCATEGORIZED};

fn item(title: &str, summary: &str) -> NewsItem {
    NewsItem {
        title: title.into(),
        link: "http://x/1".into(),
        published: None,
        published_text: String::new(),
        source: "feed".into(),
        summary: summary.into(),
        narratives: Vec::new(),
    }
}

#[test]
fn accumulate_all_policy_collects_every_matching_rule() {
    let c = Classifier::new(vec![
        NarrativeRule::new("Solana", &["solana"]),
        NarrativeRule::new("Restaking", &["restaking"]),
    ]);
    assert_eq!(
        c.labels_for("Solana restaking update"),
        vec!["Solana", "Restaking"]
    );
}

#[test]
fn classifier_is_total_even_for_empty_text() {
    let c = Classifier::default();
    assert_eq!(c.labels_for(""), vec![UNCATEGORIZED]);
    assert!(!c.labels_for("completely unrelated gardening tips").is_empty());
}

#[test]
fn classify_reads_title_and_summary() {
    let c = Classifier::new(vec![
        NarrativeRule::new("Bitcoin", &["bitcoin"]),
        NarrativeRule::new("Security", &["exploit"]),
    ]);
    let mut it = item("Bitcoin steady", "new exploit drains bridge");
    c.classify(&mut it);
    assert_eq!(it.narratives, vec!["Bitcoin", "Security"]);
}

#[test]
fn classify_all_leaves_no_item_unlabeled() {
    let c = Classifier::default();
    let mut items = vec![item("", ""), item("solana rally", "")];
    c.classify_all(&mut items);
    for it in &items {
        assert!(!it.narratives.is_empty());
    }
}

#[test]
fn substring_matching_hits_inside_larger_words() {
    let c = Classifier::new(vec![NarrativeRule::new("ETF", &["etf"])]);
    assert_eq!(c.labels_for("betfair odds"), vec!["ETF"]);
}

#[test]
fn default_rule_table_is_nonempty_and_ordered() {
    let rules = NarrativeRule::defaults();
    assert!(rules.len() >= 10);
    assert_eq!(rules[0].label, "Bitcoin");
}
