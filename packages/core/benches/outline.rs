//! Performance benchmarks for the outline engine
//!
//! Run with: `cargo bench -p coursetree-core`
//!
//! These benchmarks measure:
//! - Flattening a large course (20 modules x 25 lessons x nested topics)
//! - Flattening a lesson that lists its topics flat and nested, as the backend does
//! - Walking the whole outline with next()

use coursetree_core::models::{Course, Lesson, Module, Topic};
use coursetree_core::outline::flatten;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Generate a course with `modules * lessons` lessons, each with a small topic tree
fn generate_course(modules: usize, lessons: usize) -> Course {
    let mut course = Course::new_with_id("bench", "Benchmark course");
    for m in 0..modules {
        let mut module = Module::new_with_id(format!("m{}", m), format!("Module {}", m), m as i64);
        for l in 0..lessons {
            let lesson_id = format!("m{}-l{}", m, l);
            let mut lesson = Lesson::new_with_id(lesson_id.clone(), format!("Lesson {}", l), l as i64);
            for t in 0..4 {
                let topic_id = format!("{}-t{}", lesson_id, t);
                let mut topic = Topic::new_with_id(topic_id.clone(), format!("Topic {}", t), t as i64);
                for c in 0..3 {
                    topic = topic.with_child(Topic::new_with_id(
                        format!("{}-c{}", topic_id, c),
                        format!("Subtopic {}", c),
                        c as i64,
                    ));
                }
                lesson = lesson.with_topic(topic);
            }
            module = module.with_lesson(lesson);
        }
        course = course.with_module(module);
    }
    course
}

/// Repeat every nested topic at the lesson's top level, like the backend payload
fn with_flat_copies(mut course: Course) -> Course {
    for module in &mut course.modules {
        for lesson in &mut module.lessons {
            let nested: Vec<Topic> = lesson
                .topics
                .iter()
                .flat_map(|topic| topic.children.iter().cloned())
                .collect();
            lesson.topics.extend(nested);
        }
    }
    course
}

fn bench_flatten(c: &mut Criterion) {
    let course = generate_course(20, 25);

    c.bench_function("flatten_8500_nodes", |b| {
        b.iter(|| flatten(black_box(&course)))
    });
}

fn bench_flatten_backend_shape(c: &mut Criterion) {
    let course = with_flat_copies(generate_course(20, 25));

    let mut group = c.benchmark_group("backend_shape");
    group.sample_size(50);
    group.bench_function("flatten_with_flat_copies", |b| {
        b.iter(|| flatten(black_box(&course)))
    });
    group.finish();
}

fn bench_walk(c: &mut Criterion) {
    let outline = flatten(&generate_course(20, 25));

    c.bench_function("walk_with_next", |b| {
        b.iter(|| {
            let mut steps = 0usize;
            let mut current = outline.first();
            while let Some(node) = current {
                current = outline.next(node);
                steps += 1;
            }
            black_box(steps)
        })
    });
}

criterion_group!(benches, bench_flatten, bench_flatten_backend_shape, bench_walk);
criterion_main!(benches);
