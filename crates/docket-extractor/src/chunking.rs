//! Text chunking for model-backed extraction of large documents

/// A contiguous slice of the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    /// Byte offset of the slice within the source text
    pub offset: usize,
    /// The slice itself
    pub text: &'a str,
}

/// Splits text at paragraph breaks into slices of bounded size
///
/// Paragraphs are combined until the limit is reached. A paragraph that is
/// longer than the limit on its own is split at whitespace where possible.
#[derive(Debug, Clone, Copy)]
pub struct TextChunker {
    max_chunk_size: usize,
}

impl TextChunker {
    /// Create a new text chunker; sizes are in bytes
    pub fn new(max_chunk_size: usize) -> Self {
        Self {
            max_chunk_size: max_chunk_size.max(1),
        }
    }

    /// Chunk the given text
    pub fn chunk<'a>(&self, text: &'a str) -> Vec<Chunk<'a>> {
        if text.len() <= self.max_chunk_size {
            return vec![Chunk { offset: 0, text }];
        }

        let mut bounds = Vec::new();
        let mut start = 0;
        let mut end = 0;

        for (para_start, para_end) in paragraphs(text) {
            if para_end - start <= self.max_chunk_size {
                end = para_end;
                continue;
            }

            if end > start {
                bounds.push((start, end));
            }

            if para_end - para_start > self.max_chunk_size {
                bounds.extend(self.split_long(text, para_start, para_end));
                start = para_end;
                end = para_end;
            } else {
                start = para_start;
                end = para_end;
            }
        }
        if end > start {
            bounds.push((start, end));
        }

        bounds
            .into_iter()
            .filter(|&(s, e)| !text[s..e].trim().is_empty())
            .map(|(s, e)| Chunk {
                offset: s,
                text: &text[s..e],
            })
            .collect()
    }

    /// Split `text[start..end]` into pieces no longer than the limit
    fn split_long(&self, text: &str, mut start: usize, end: usize) -> Vec<(usize, usize)> {
        let mut pieces = Vec::new();

        while end - start > self.max_chunk_size {
            let mut cut = start + self.max_chunk_size;
            while !text.is_char_boundary(cut) {
                cut -= 1;
            }
            if cut == start {
                // Limit is smaller than a single character
                cut = start + text[start..].chars().next().map_or(1, char::len_utf8);
            }

            let next = match text[start..cut].rfind(char::is_whitespace) {
                Some(ws) if ws > 0 => {
                    cut = start + ws;
                    let ws_len = text[cut..].chars().next().map_or(1, char::len_utf8);
                    cut + ws_len
                }
                _ => cut,
            };

            pieces.push((start, cut));
            start = next;
        }
        if end > start {
            pieces.push((start, end));
        }

        pieces
    }
}

/// Byte ranges of the paragraphs separated by blank lines
fn paragraphs(text: &str) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut start = 0;
    for (idx, sep) in text.match_indices("\n\n") {
        if idx >= start {
            ranges.push((start, idx));
            start = idx + sep.len();
        }
    }
    ranges.push((start, text.len()));
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_chunking_needed_for_small_text() {
        let chunker = TextChunker::new(100);
        let text = "Short text here.";
        let chunks = chunker.chunk(text);
        assert_eq!(chunks, vec![Chunk { offset: 0, text }]);
    }

    #[test]
    fn test_paragraphs_are_combined_until_limit() {
        let chunker = TextChunker::new(50);
        let text = "First paragraph here.\n\nSecond paragraph here.\n\nThird paragraph here.";
        let chunks = chunker.chunk(text);

        assert_eq!(chunks.len(), 2);
        assert_eq!(
            chunks[0].text,
            "First paragraph here.\n\nSecond paragraph here."
        );
        assert_eq!(chunks[1].text, "Third paragraph here.");
        for chunk in &chunks {
            assert!(chunk.text.len() <= 50);
            assert_eq!(&text[chunk.offset..chunk.offset + chunk.text.len()], chunk.text);
        }
    }

    #[test]
    fn test_very_long_single_paragraph() {
        let chunker = TextChunker::new(20);
        let text = "a".repeat(100);
        let chunks = chunker.chunk(&text);

        assert_eq!(chunks.len(), 5);
        assert!(chunks.iter().all(|c| c.text.len() == 20));
    }

    #[test]
    fn test_long_paragraph_splits_at_whitespace() {
        let chunker = TextChunker::new(12);
        let text = "alpha beta gamma delta";
        let chunks = chunker.chunk(text);

        let texts: Vec<_> = chunks.iter().map(|c| c.text).collect();
        assert_eq!(texts, vec!["alpha beta", "gamma delta"]);
        assert_eq!(chunks[1].offset, 11);
    }

    #[test]
    fn test_multibyte_text_is_split_on_char_boundaries() {
        let chunker = TextChunker::new(5);
        let text = "ééééééé";
        let chunks = chunker.chunk(text);

        let rejoined: String = chunks.iter().map(|c| c.text).collect();
        assert_eq!(rejoined, text);
    }

    #[test]
    fn test_empty_text() {
        let chunker = TextChunker::new(100);
        let chunks = chunker.chunk("");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "");
    }
}
