use criterion::{criterion_group, criterion_main, Criterion};
use featurize_core::{Stoplist, TextNormalizer};

const BODY: &str = "Showers continued throughout the week in the Bahia cocoa zone, \
alleviating the drought since early January and improving prospects for the coming \
temporao, although normal humidity levels have not been restored, Comissaria Smith \
said in its weekly review. The dry period means the temporao will be late this year. \
Arrivals for the week ended February 22 were 155,221 bags of 60 kilos making a \
cumulative total for the season of 5.93 mln against 5.81 at the same stage last year.";

fn bench_normalize(c: &mut Criterion) {
    let normalizer = TextNormalizer::new(Stoplist::from_words(["the", "a", "for", "of", "in"]));
    c.bench_function("tokens_article_body", |b| b.iter(|| normalizer.tokens(BODY)));
    c.bench_function("token_set_article_body", |b| b.iter(|| normalizer.token_set(BODY)));
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
