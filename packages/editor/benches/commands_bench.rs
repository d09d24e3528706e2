//! Command benchmarks
//!
//! Target: toggle over a 500-paragraph document in <5ms

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use prose_editor::{toggle_block, toggle_mark, wrap_link, BlockType, MarkType, Point, Selection, Value};

fn generate_document(num_paragraphs: usize) -> Value {
    let mut nodes = Vec::new();
    for i in 0..num_paragraphs {
        nodes.push(format!(
            r#"{{ "object": "block", "type": "paragraph", "nodes": [
                {{ "object": "text", "text": "Paragraph {} has some " }},
                {{ "object": "text", "text": "bold", "marks": [{{ "type": "bold" }}] }},
                {{ "object": "text", "text": " words in it." }}
            ] }}"#,
            i
        ));
    }
    let json = format!(r#"{{ "document": {{ "nodes": [{}] }} }}"#, nodes.join(","));
    Value::from_json(&json).unwrap()
}

fn select_all(value: &Value) -> Value {
    let texts = value.document.texts();
    let first = texts[0];
    let last = texts[texts.len() - 1];
    let end = value.document.text_len(last).unwrap();
    value.with_selection(Selection::new(Point::new(first, 3), Point::new(last, end - 2)))
}

fn toggle_mark_small(c: &mut Criterion) {
    let value = select_all(&generate_document(5));

    c.bench_function("toggle_mark_5_paragraphs", |b| {
        b.iter(|| toggle_mark(black_box(&value), MarkType::Italic))
    });
}

fn toggle_mark_large(c: &mut Criterion) {
    let value = select_all(&generate_document(500));

    c.bench_function("toggle_mark_500_paragraphs", |b| {
        b.iter(|| toggle_mark(black_box(&value), MarkType::Bold))
    });
}

fn toggle_list_large(c: &mut Criterion) {
    let value = select_all(&generate_document(500));

    c.bench_function("toggle_list_500_paragraphs", |b| {
        b.iter(|| toggle_block(black_box(&value), BlockType::BulletedList, BlockType::Paragraph))
    });
}

fn wrap_link_medium(c: &mut Criterion) {
    let value = select_all(&generate_document(50));

    c.bench_function("wrap_link_50_paragraphs", |b| {
        b.iter(|| wrap_link(black_box(&value), "https://example.com"))
    });
}

criterion_group!(
    benches,
    toggle_mark_small,
    toggle_mark_large,
    toggle_list_large,
    wrap_link_medium
);
criterion_main!(benches);
