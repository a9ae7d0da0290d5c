use regex::Regex;

/// A feature extracted from response text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    Word(String),
    /// A token and the one following it, `None` at the end of the text.
    Pair(String, Option<String>),
}

/// Turns response text into unigram and bigram features.
#[derive(Debug, Clone)]
pub struct Featurizer {
    window: usize,
    punctuation: Regex,
}

impl Featurizer {
    pub const DEFAULT_WINDOW: usize = 40;

    /// `window` is how many leading tokens contribute features.
    pub fn new(window: usize) -> Result<Self, regex::Error> {
        Ok(Featurizer {
            window,
            punctuation: Regex::new(r"([^\w\s'])")?,
        })
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Lowercased tokens with every punctuation mark split out on its own.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        let decoded = text.replace("&#8217;", "'").replace("&#8212;", "-");
        let spaced = self.punctuation.replace_all(&decoded, " $1 ");

        spaced
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    /// The first `window` tokens, then a pair for each of them with its
    /// successor. The successor may lie past the window.
    pub fn features(&self, text: &str) -> Vec<Feature> {
        let tokens = self.tokens(text);
        let head = tokens.len().min(self.window);

        let mut features: Vec<Feature> = tokens[..head]
            .iter()
            .map(|token| Feature::Word(token.clone()))
            .collect();
        features.extend(
            (0..head).map(|i| Feature::Pair(tokens[i].clone(), tokens.get(i + 1).cloned())),
        );

        features
    }
}
