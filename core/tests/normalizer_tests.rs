use featurize_core::{Stoplist, TermFrequencies, TextNormalizer, Vocabulary};

fn normalizer() -> TextNormalizer {
    TextNormalizer::new(Stoplist::from_words(["the", "a"]))
}

#[test]
fn it_filters_and_stems_sentence() {
    let mut tokens = normalizer().tokens("The cat sat. The cat ran.");
    tokens.sort();
    assert_eq!(tokens, vec!["cat", "cat", "ran", "sat"]);
}

#[test]
fn it_counts_sorted_runs() {
    let n = normalizer();
    let vocab = Vocabulary::from_tokens(["cat", "ran", "sat"]);
    let tf = TermFrequencies::from_tokens(n.tokens("The cat sat. The cat ran."), &vocab);

    let pairs: Vec<(&str, u32)> = tf
        .indices()
        .iter()
        .zip(tf.counts())
        .map(|(&i, &c)| (vocab.tokens()[i as usize].as_str(), c))
        .collect();
    assert_eq!(pairs, vec![("cat", 2), ("ran", 1), ("sat", 1)]);
}

#[test]
fn it_stems_inflections_together() {
    let n = normalizer();
    let set = n.token_set("Markets rallied as the market opened; marketing");
    assert!(set.contains("market"));
    assert!(!set.contains("the"));
}
