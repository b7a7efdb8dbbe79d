//! Tokenization and diacritic-insensitive normalization
//!
//! Cards are split on whitespace; each token is normalized (lowercase,
//! accents folded to their base letter, a fixed punctuation set stripped)
//! and classified as a connector (stopword, always visible) or a content
//! word (eligible for occlusion and recall). User input goes through the
//! same normalization, so matching is exact string equality afterwards.

/// Connector words, pre-normalized and sorted for binary search.
///
/// Portuguese articles, prepositions and similar glue words from the
/// original card corpus (statutory text). Tokens whose normalized form is
/// in this set are never blanked.
const STOP_WORDS: &[&str] = &[
    "a", "ao", "aos", "as", "com", "da", "das", "de", "do", "dos", "e", "em", "foi", "na", "nao",
    "nas", "no", "nos", "o", "os", "ou", "para", "pela", "pelas", "pelo", "pelos", "por", "que",
    "sao", "se", "um", "uma", "umas", "uns",
];

/// Punctuation stripped during normalization
const PUNCTUATION: &[char] = &[
    '.', ',', '/', '#', '!', '$', '%', '^', '&', '*', ';', ':', '{', '}', '=', '_', '~', '(', ')',
];

/// One whitespace-delimited word of a card's text
#[derive(Debug, Clone)]
pub struct Token {
    /// The word as written, for display
    pub original: String,
    /// Normalized form used for matching
    pub clean: String,
    /// Connectors stay visible and are never recalled
    pub is_connector: bool,
}

impl Token {
    /// Content words are the only words eligible for occlusion/recall
    pub fn is_content(&self) -> bool {
        !self.is_connector && !self.clean.is_empty()
    }
}

/// Normalize for comparison: lowercase, fold diacritics, strip the fixed
/// punctuation set, trim.
pub fn normalize(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .filter_map(fold_char)
        .filter(|c| !PUNCTUATION.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Fold accented Latin letters to their base letter and drop combining
/// marks (for input that arrives already decomposed).
fn fold_char(c: char) -> Option<char> {
    let folded = match c {
        '\u{0300}'..='\u{036f}' => return None,
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    };
    Some(folded)
}

pub fn is_stopword(clean: &str) -> bool {
    STOP_WORDS.binary_search(&clean).is_ok()
}

/// Split a card's text on whitespace into classified tokens
pub fn tokenize(text: &str) -> Vec<Token> {
    text.split_whitespace()
        .map(|word| {
            let clean = normalize(word);
            let is_connector = is_stopword(&clean);
            Token { original: word.to_string(), clean, is_connector }
        })
        .collect()
}
