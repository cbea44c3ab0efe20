/*!
 * Record Property Tests
 * Round-trip and leak-freedom over generated record trees
 */

use flow_record::record::codec::{from_bytes, to_bytes};
use flow_record::{ExecutionContext, Record};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Shape {
    String(Vec<u8>),
    Long(i64),
    Double(f64),
    List(Vec<Shape>),
    Key(String, Option<Box<Shape>>),
}

fn key_name() -> impl Strategy<Value = String> {
    proptest::collection::vec(any::<char>().prop_filter("NUL ends a key name", |c| *c != '\0'), 0..12)
        .prop_map(|chars| chars.into_iter().collect())
}

fn shape() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![
        proptest::collection::vec(any::<u8>(), 0..16).prop_map(Shape::String),
        any::<i64>().prop_map(Shape::Long),
        any::<f64>()
            .prop_filter("NaN never compares equal", |f| !f.is_nan())
            .prop_map(Shape::Double),
    ];
    leaf.prop_recursive(4, 32, 6, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..6).prop_map(Shape::List),
            (key_name(), proptest::option::of(inner))
                .prop_map(|(name, value)| Shape::Key(name, value.map(Box::new))),
        ]
    })
}

fn build(ctx: &ExecutionContext, shape: &Shape) -> Record {
    match shape {
        Shape::String(bytes) => ctx.string(bytes.clone()).unwrap(),
        Shape::Long(num) => ctx.long(*num).unwrap(),
        Shape::Double(num) => ctx.double(*num).unwrap(),
        Shape::List(items) => {
            let mut list = ctx.list_with_capacity(items.len()).unwrap();
            for item in items {
                list.list_push(build(ctx, item)).unwrap();
            }
            list
        }
        Shape::Key(name, value) => ctx
            .key_with(name.clone(), value.as_deref().map(|v| build(ctx, v)))
            .unwrap(),
    }
}

proptest! {
    #[test]
    fn prop_round_trip_preserves_structure(shape in shape()) {
        let ctx = ExecutionContext::default();
        let record = build(&ctx, &shape);
        let bytes = to_bytes(&record).unwrap();
        let decoded = from_bytes(&ctx, &bytes).unwrap();
        prop_assert_eq!(&decoded, &record);
        prop_assert_eq!(decoded.record_type(), record.record_type());
    }

    #[test]
    fn prop_teardown_balances(shape in shape()) {
        let ctx = ExecutionContext::default();
        let record = build(&ctx, &shape);
        prop_assert!(ctx.native_stats().live_nodes() > 0);
        drop(record);
        prop_assert!(ctx.native_stats().snapshot().is_balanced());
    }
}
