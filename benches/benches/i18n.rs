// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use serde_json::json;
use understory_i18n::{I18n, I18nOptions, MemoryDom, NodeId, Translation, Values, format_template};
use understory_timing::ManualClock;

fn tables(keys: usize) -> I18nOptions {
    let mut en = Translation::new("en");
    let mut fr = Translation::new("fr");
    for i in 0..keys {
        en = en.with_string(format!("key.{i}"), format!("Label {i} for ${{name}}"));
        fr = fr.with_string(format!("key.{i}"), format!("Libellé {i} pour ${{name}}"));
    }
    I18nOptions::with_translations([en, fr])
}

/// A document with `sections` wrappers of `per_section` bound elements each.
fn build_document(sections: usize, per_section: usize, keys: usize) -> MemoryDom {
    let mut dom = MemoryDom::new();
    let doc = dom.document();
    let mut n = 0;
    for _ in 0..sections {
        let section = dom.create_element("section");
        dom.append_child(doc, section);
        for _ in 0..per_section {
            let el = dom.create_element("span");
            dom.set_attribute(el, "class", "i18n");
            dom.set_attribute(el, "data-i18n", format!("key.{}", n % keys));
            if n % 4 == 0 {
                dom.set_attribute(el, "data-i18n-values", r#"{ "name": "Ada" }"#);
            }
            dom.append_child(section, el);
            n += 1;
        }
    }
    dom
}

fn bench_refresh(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_i18n/refresh");
    group.sample_size(50);

    for &(sections, per_section) in &[(8_usize, 16_usize), (64, 32)] {
        let total = sections * per_section;
        group.bench_function(format!("switch_lang(n={total})"), |b| {
            b.iter_batched(
                || {
                    let clock = ManualClock::new();
                    let mut i18n: I18n<NodeId, ManualClock> = I18n::new(clock);
                    i18n.set_options(tables(128));
                    let mut dom = build_document(sections, per_section, 128);
                    i18n.start(dom.document());
                    let _ = i18n.refresh(&mut dom);
                    (i18n, dom)
                },
                |(mut i18n, mut dom)| {
                    i18n.set_lang("fr");
                    black_box(i18n.refresh(&mut dom).ok())
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_format(c: &mut Criterion) {
    let mut values = Values::new();
    values.insert("name".into(), json!("Ada"));
    values.insert("Count".into(), json!(3));
    values.insert("tags".into(), json!(["a", null, "c"]));
    let template = "Hello ${name}, you have ${count} items tagged ${tags} (${missing})";

    c.bench_function("understory_i18n/format_template", |b| {
        b.iter(|| black_box(format_template(black_box(template), &values)));
    });
}

criterion_group!(benches, bench_refresh, bench_format);
criterion_main!(benches);
