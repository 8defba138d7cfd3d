use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lazy_static::lazy_static;
use lexgen::definitions::Definitions;
use lexgen::generator::{Construction, Lexer};
use lexgen::parser;

const DEFINITIONS: &str = "
pr: if | else | while | return
id: [a-zA-Z_]([a-zA-Z_]|[0-9])*
num: [0-9]+
sym: =|;
";

const STATEMENT: &str = "if x1 ; return y2 = 42 ; else while z8 ; n = n1 ; // tail\n";

lazy_static! {
    static ref INPUT: String = STATEMENT.repeat(200);
}

fn definitions() -> Definitions {
    parser::definitions(DEFINITIONS)
        .try_into()
        .expect("benchmark definitions are valid")
}

pub fn generate(c: &mut Criterion) {
    let defs = definitions();
    c.bench_function("generate followpos", |b| {
        b.iter(|| Lexer::generate(black_box(&defs), Construction::Followpos))
    });
    c.bench_function("generate thompson", |b| {
        b.iter(|| Lexer::generate(black_box(&defs), Construction::Thompson))
    });
}

pub fn scanning(c: &mut Criterion) {
    let lexer = Lexer::generate(&definitions(), Construction::Followpos);
    c.bench_function("scan", |b| {
        b.iter(|| {
            let mut scanner = lexer.scanner();
            scanner.scan(black_box(&INPUT))
        })
    });
}

criterion_group!(benches, generate, scanning);
criterion_main!(benches);
