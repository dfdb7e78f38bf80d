use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use csvrow::csv::{excel_preference, LineReader, Tokenizer};

fn build_input(rows: usize, quoted: bool) -> String {
    let mut text = String::with_capacity(rows * 48);
    for i in 0..rows {
        if quoted {
            text.push_str(&format!(
                "{},\"Name, {}\",\"said \"\"hi\"\"\nover two lines\",{}\n",
                i,
                i,
                i * 100
            ));
        } else {
            text.push_str(&format!("{},Name_{},{}\n", i, i, i * 100));
        }
    }
    text
}

fn benchmark_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");
    let prefs = excel_preference();

    for size in [1000, 10000, 100000].iter() {
        for quoted in [false, true] {
            let input = build_input(*size, quoted);
            let id = format!("{}_{}", if quoted { "quoted" } else { "plain" }, size);

            group.bench_with_input(BenchmarkId::from_parameter(id), &input, |b, input| {
                b.iter(|| {
                    let mut tokenizer =
                        Tokenizer::new(LineReader::from_text(input.as_str()), &prefs);
                    let mut columns = Vec::new();
                    while tokenizer.read_columns(&mut columns).unwrap() {
                        black_box(&columns);
                    }
                });
            });
        }
    }

    group.finish();
}

criterion_group!(benches, benchmark_tokenize);
criterion_main!(benches);
