use recipe_core::normalize::Normalizer;
use recipe_core::stem::stem;

#[test]
fn tokens_are_lowercase_and_long_enough() {
    let toks = Normalizer::for_indexing()
        .normalize("Chicken TAGINE with 250g of Olives, 3 onions & a pinch of salt!");
    for t in &toks {
        assert!(t.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        assert!(!t.chars().all(|c| c.is_ascii_digit()));
        assert!(t.len() > 2);
    }
    assert!(toks.contains(&"chicken".to_string()));
    assert!(toks.contains(&"tagine".to_string()));
}

#[test]
fn accents_reduce_to_base_characters() {
    let toks = Normalizer::for_indexing().normalize("Crème brûlée à l'érable");
    assert!(toks.contains(&"creme".to_string()));
    assert!(toks.contains(&"brulee".to_string()));
    assert!(toks.contains(&"erable".to_string()));
}

#[test]
fn cooking_stopwords_are_removed() {
    let toks = Normalizer::for_indexing()
        .normalize("Add two cups of chopped onions and simmer for thirty minutes");
    assert_eq!(toks, vec!["onions"]);
}

#[test]
fn normalization_is_deterministic() {
    let n = Normalizer::for_indexing();
    let text = "Couscous aux sept légumes, recette traditionnelle";
    assert_eq!(n.normalize(text), n.normalize(text));
}

#[test]
fn stemming_is_idempotent_on_recipe_roots() {
    for word in ["running", "onions", "tagine", "chickpeas", "grilled", "spices"] {
        let once = stem(word);
        assert_eq!(stem(&once), once, "restemming {word} moved past {once}");
    }
}
