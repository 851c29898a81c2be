use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::stem::stem;

lazy_static! {
    static ref NON_TOKEN: Regex = Regex::new(r"[^a-z0-9\s]").expect("valid regex");
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            // General English
            "a","about","above","after","again","against","all","am","an","and","any",
            "are","as","at","be","because","been","before","being","below","between",
            "both","but","by","can","cannot","could","did","do","does","doing","down",
            "during","each","few","for","from","further","had","has","have","having",
            "he","her","here","hers","herself","him","himself","his","how","i","if",
            "in","into","is","it","its","itself","just","me","more","most","my",
            "myself","no","nor","not","of","off","on","once","only","or","other",
            "our","ours","ourselves","out","over","own","same","she","should","so",
            "some","such","than","that","the","their","theirs","them","themselves",
            "then","there","these","they","this","those","through","to","too","under",
            "until","up","very","was","we","were","what","when","where","which","while",
            "who","whom","why","will","with","would","you","your","yours","yourself",
            "yourselves",
            // Cooking vocabulary
            "recipe","recipes","dish","dishes","cook","cooking","cooked","cuisine",
            "food","ingredient","ingredients","preparation","prepare","prepared","preparing",
            "step","steps","method","instructions","serves","serving","servings","make",
            "makes","making","made","add","adding","added","adds","mix","mixing","mixed",
            "place","placing","placed","put","putting","heat","heating","heated","boil",
            "boiling","boiled","stir","stirring","stirred","pour","pouring","poured",
            "remove","removing","removed","cut","cutting","cuts","chop","chopping",
            "chopped","slice","slicing","sliced","bake","baking","baked","fry","frying",
            "fried","simmer","simmering","simmered","season","seasoning","seasoned","taste",
            "tasting","serve","served","let","allow","bring","take","use","using","used",
            "set","get","become",
            // Time and quantities
            "minute","minutes","hour","hours","second","seconds","time","times","cup",
            "cups","tablespoon","tablespoons","teaspoon","teaspoons","tbsp","tsp","ounce",
            "ounces","oz","pound","pounds","lb","lbs","gram","grams","kilogram",
            "kilograms","kg","liter","liters","milliliter","milliliters","ml","piece",
            "pieces","pinch","dash","handful",
            // Spelled-out numbers
            "one","two","three","four","five","six","seven","eight","nine","ten",
            "eleven","twelve","thirteen","fourteen","fifteen","sixteen","seventeen",
            "eighteen","nineteen","twenty","thirty","forty","fifty","hundred","thousand",
            "first","third","fourth","half","quarter",
            // Filler words common in recipe titles
            "style","traditional","dried","fruits","seeds",
        ];
        words.iter().copied().collect()
    };
}

fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

/// Text normalizer shared by the index builder and the query matcher.
///
/// The two profiles differ only in the minimum token length they keep:
/// indexing keeps anything longer than 2 characters, the query side is
/// stricter and keeps anything longer than 3.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    min_len: usize,
}

impl Normalizer {
    pub fn for_indexing() -> Self {
        Self { min_len: 3 }
    }

    pub fn for_queries() -> Self {
        Self { min_len: 4 }
    }

    /// Normalize raw text into word tokens, in input order.
    ///
    /// Lowercases, strips accents down to their base characters, replaces
    /// punctuation with whitespace, splits, then drops purely numeric
    /// tokens, stopwords, and tokens below the profile's minimum length.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let unaccented: String = lowered.nfd().filter(|c| !is_combining_mark(*c)).collect();
        let cleaned = NON_TOKEN.replace_all(&unaccented, " ");
        cleaned
            .split_whitespace()
            .filter(|t| !t.chars().all(|c| c.is_ascii_digit()))
            .filter(|t| !is_stopword(t))
            .filter(|t| t.len() >= self.min_len)
            .map(str::to_owned)
            .collect()
    }

    /// Normalize and stem in one pass. This is the token stream the index
    /// and the matcher both operate on.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.normalize(text).iter().map(|t| stem(t)).collect()
    }
}

/// Turn a recipe title into a safe filename stem: lowercased, accents
/// stripped, spaces replaced with underscores, everything outside
/// `[a-z0-9_]` dropped.
pub fn filename_slug(name: &str) -> String {
    name.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| if c == ' ' { '_' } else { c })
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
        .collect()
}
