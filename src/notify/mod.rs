pub mod telegram;

pub use telegram::TelegramNotifier;

/// Telegram caps messages at 4096 chars; 3900 leaves headroom.
pub const TELEGRAM_CHUNK_LIMIT: usize = 3900;

/// Split `text` into chunks of at most `limit` characters, breaking only at
/// line boundaries. Joining the chunks with `\n` reconstructs the input
/// (minus a trailing newline). A single line longer than `limit` becomes
/// its own oversized chunk rather than being cut mid-line.
pub fn chunk_text(text: &str, limit: usize) -> Vec<String> {
    let mut parts: Vec<String> = Vec::new();
    let mut cur: Vec<&str> = Vec::new();
    let mut length = 0usize;
    for line in text.lines() {
        let add = line.chars().count() + 1;
        if length + add > limit && !cur.is_empty() {
            parts.push(cur.join("\n"));
            cur.clear();
            length = 0;
        }
        cur.push(line);
        length += add;
    }
    if !cur.is_empty() {
        parts.push(cur.join("\n"));
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_one_chunk() {
        assert_eq!(chunk_text("a\nb", 100), vec!["a\nb"]);
    }

    #[test]
    fn chunks_respect_the_limit_and_line_boundaries() {
        let text = (0..50)
            .map(|i| format!("line number {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let chunks = chunk_text(&text, 80);
        assert!(chunks.len() > 1);
        for c in &chunks {
            assert!(c.chars().count() <= 80);
        }
        assert_eq!(chunks.join("\n"), text);
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(chunk_text("", 100).is_empty());
    }
}
