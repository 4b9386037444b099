// tests/chunking.rs
use narasi_agent::{chunk_text, TELEGRAM_CHUNK_LIMIT};

#[test]
fn every_chunk_stays_under_the_limit() {
    let text = (0..400)
        .map(|i| format!("Berita nomor {i} dengan sedikit teks tambahan"))
        .collect::<Vec<_>>()
        .join("\n");
    let chunks = chunk_text(&text, TELEGRAM_CHUNK_LIMIT);
    assert!(chunks.len() > 1);
    for c in &chunks {
        assert!(c.chars().count() <= TELEGRAM_CHUNK_LIMIT);
    }
}

#[test]
fn joining_chunks_reconstructs_the_text() {
    let text = (0..120)
        .map(|i| format!("line {i}"))
        .collect::<Vec<_>>()
        .join("\n");
    let chunks = chunk_text(&text, 100);
    assert_eq!(chunks.join("\n"), text);
}

#[test]
fn no_boundary_falls_mid_line() {
    let text = (0..60).map(|i| format!("row-{i:03}")).collect::<Vec<_>>().join("\n");
    let original: Vec<&str> = text.lines().collect();
    let mut reassembled: Vec<String> = Vec::new();
    for c in chunk_text(&text, 40) {
        for l in c.lines() {
            reassembled.push(l.to_string());
        }
    }
    assert_eq!(reassembled, original);
}

#[test]
fn one_short_message_is_passed_through() {
    let chunks = chunk_text("halo", TELEGRAM_CHUNK_LIMIT);
    assert_eq!(chunks, vec!["halo"]);
}

#[test]
fn oversized_single_line_becomes_its_own_chunk() {
    let long = "x".repeat(500);
    let text = format!("a\n{long}\nb");
    let chunks = chunk_text(&text, 100);
    assert_eq!(chunks, vec!["a".to_string(), long, "b".to_string()]);
}
