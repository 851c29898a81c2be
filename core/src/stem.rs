//! Rule-based suffix stripper in the Porter style, sized for recipe
//! vocabulary. Input is assumed to be a normalized token: ASCII lowercase,
//! produced by [`crate::normalize::Normalizer`].
//!
//! Each stage is a pure function of the current word; stages always run in
//! sequence, whether or not an earlier stage changed anything.

const STEP2_SUFFIXES: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("abli", "able"),
    ("alli", "al"),
    ("entli", "ent"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
];

const STEP3_SUFFIXES: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

const STEP4_SUFFIXES: &[&str] = &[
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement",
    "ment", "ent", "ion", "ou", "ism", "ate", "iti", "ous", "ive", "ize",
];

fn is_plain_vowel(b: u8) -> bool {
    matches!(b, b'a' | b'e' | b'i' | b'o' | b'u')
}

/// Count of vowel-sequence to consonant-sequence transitions, over a/e/i/o/u.
fn measure(stem: &str) -> usize {
    let mut m = 0;
    let mut in_vowel_run = false;
    for &b in stem.as_bytes() {
        let v = is_plain_vowel(b);
        if !in_vowel_run && v {
            in_vowel_run = true;
        } else if in_vowel_run && !v {
            m += 1;
            in_vowel_run = false;
        }
    }
    m
}

/// True if the stem contains any vowel, treating `y` after a consonant as
/// a vowel.
fn has_vowel(stem: &str) -> bool {
    let bytes = stem.as_bytes();
    bytes.iter().enumerate().any(|(i, &b)| {
        is_plain_vowel(b) || (b == b'y' && i > 0 && !is_plain_vowel(bytes[i - 1]))
    })
}

fn ends_double_letter(w: &str) -> bool {
    let b = w.as_bytes();
    b.len() >= 2 && b[b.len() - 1] == b[b.len() - 2] && b[b.len() - 1].is_ascii_lowercase()
}

/// True if the word ends consonant-vowel-consonant where the final
/// consonant is not w, x, or y. Words of this shape skip the restorative
/// `e` in step 1b.
fn ends_cvc(w: &str) -> bool {
    let b = w.as_bytes();
    let n = b.len();
    if n < 3 {
        return false;
    }
    let vowel_at = |i: usize| {
        is_plain_vowel(b[i]) || (b[i] == b'y' && i > 0 && !is_plain_vowel(b[i - 1]))
    };
    !vowel_at(n - 3)
        && vowel_at(n - 2)
        && !vowel_at(n - 1)
        && !matches!(b[n - 1], b'w' | b'x' | b'y')
}

/// Step 1a: plural stripping.
fn step1a(w: String) -> String {
    if w.ends_with("sses") || w.ends_with("ies") {
        w[..w.len() - 2].to_string()
    } else if w.ends_with("ss") {
        w
    } else if w.ends_with('s') {
        w[..w.len() - 1].to_string()
    } else {
        w
    }
}

/// Step 1b: past/continuous stripping with tidy-up of the exposed stem.
fn step1b(w: String) -> String {
    if let Some(stem) = w.strip_suffix("eed") {
        if measure(stem) > 0 {
            return w[..w.len() - 1].to_string();
        }
        return w;
    }
    for suffix in ["ed", "ing"] {
        if let Some(stem) = w.strip_suffix(suffix) {
            if !has_vowel(stem) {
                return w;
            }
            let mut out = stem.to_string();
            if out.ends_with("at") || out.ends_with("bl") || out.ends_with("iz") {
                out.push('e');
            } else if ends_double_letter(&out)
                && !(out.ends_with("ll") || out.ends_with("ss") || out.ends_with("zz"))
            {
                out.pop();
            } else if measure(&out) == 1 && !ends_cvc(&out) {
                out.push('e');
            }
            return out;
        }
    }
    w
}

/// Step 1c: terminal y -> i when the rest of the word carries a vowel.
fn step1c(w: String) -> String {
    if w.ends_with('y') && has_vowel(&w[..w.len() - 1]) {
        let mut out = w[..w.len() - 1].to_string();
        out.push('i');
        return out;
    }
    w
}

fn map_suffix(w: String, table: &[(&str, &str)]) -> String {
    for (suffix, replacement) in table {
        if let Some(stem) = w.strip_suffix(suffix) {
            if measure(stem) > 0 {
                return format!("{stem}{replacement}");
            }
            // First matching suffix decides; no fallthrough to shorter ones.
            return w;
        }
    }
    w
}

fn step2(w: String) -> String {
    map_suffix(w, STEP2_SUFFIXES)
}

fn step3(w: String) -> String {
    map_suffix(w, STEP3_SUFFIXES)
}

/// Step 4: derivational suffix removal for longer stems. `ion` only comes
/// off after `s` or `t`.
fn step4(w: String) -> String {
    for suffix in STEP4_SUFFIXES {
        if let Some(stem) = w.strip_suffix(suffix) {
            if measure(stem) > 1 {
                if *suffix == "ion" && !(stem.ends_with('s') || stem.ends_with('t')) {
                    return w;
                }
                return stem.to_string();
            }
            return w;
        }
    }
    w
}

/// Step 5: final e and ll cleanup.
fn step5(w: String) -> String {
    let mut out = w;
    if out.ends_with('e') && measure(&out[..out.len() - 1]) > 1 {
        out.pop();
    }
    if out.ends_with("ll") && measure(&out) > 1 {
        out.pop();
    }
    out
}

/// Reduce a normalized word to its stem. Words of length 2 or less come
/// back unchanged.
pub fn stem(word: &str) -> String {
    if word.len() <= 2 {
        return word.to_string();
    }
    let w = step1a(word.to_string());
    let w = step1b(w);
    let w = step1c(w);
    let w = step2(w);
    let w = step3(w);
    let w = step4(w);
    step5(w)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_counts_transitions() {
        assert_eq!(measure("tr"), 0);
        assert_eq!(measure("tree"), 0);
        assert_eq!(measure("trouble"), 1);
        assert_eq!(measure("oats"), 1);
        assert_eq!(measure("private"), 2);
    }

    #[test]
    fn plural_stripping() {
        assert_eq!(stem("caresses"), "caress");
        assert_eq!(stem("ponies"), "poni");
        assert_eq!(stem("onions"), "onion");
        assert_eq!(stem("glass"), "glass");
    }

    #[test]
    fn past_and_continuous() {
        assert_eq!(stem("running"), "run");
        assert_eq!(stem("hopping"), "hop");
        assert_eq!(stem("hoping"), "hop");
        assert_eq!(stem("sized"), "size");
        assert_eq!(stem("agreed"), "agree");
        assert_eq!(stem("feed"), "feed");
    }

    #[test]
    fn derivational_suffixes() {
        assert_eq!(stem("national"), "nation");
        assert_eq!(stem("relational"), "relat");
        assert_eq!(stem("conditional"), "condit");
        assert_eq!(stem("happy"), "happi");
    }
}
