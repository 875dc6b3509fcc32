//! Algebraic laws of the selector combinators
//!
//! Set laws compare with `==` (order-insensitive); order laws compare with
//! `sequence_eq`.

use implore_columns::*;
use rstest::rstest;

fn schemas() -> Vec<Vec<&'static str>> {
    vec![
        vec!["a", "b", "c", "d"],
        vec!["d", "c", "b", "a"],
        vec!["a1", "b1", "a2", "x1", "x2", "x3", "ab"],
        vec!["x"],
    ]
}

fn eval(selector: &Selector, schema: &[&str]) -> Names {
    evaluate(selector, schema).unwrap()
}

#[rstest]
#[case(starts_with("a"))]
#[case(contains("1"))]
#[case(one_of(["c", "a", "x3"]))]
#[case(num_range("x", 1..=2, 0))]
#[case(reverse(everything()))]
#[case(nothing())]
#[case(starts_with("b") | ends_with("1"))]
fn test_double_complement_is_identity_as_set(#[case] a: Selector) {
    for schema in schemas() {
        let twice = eval(&-(-a.clone()), &schema);
        assert_eq!(twice, eval(&a, &schema), "schema {:?}", schema);
    }
}

#[test]
fn test_double_complement_reorders_to_schema_order() {
    let schema = vec!["a", "b", "c", "d"];
    let a = reverse(everything());
    let twice = eval(&-(-a.clone()), &schema);
    let once = eval(&a, &schema);
    assert_eq!(twice, once);
    assert!(!twice.sequence_eq(&once));
    assert_eq!(twice.into_vec(), vec!["a", "b", "c", "d"]);
}

#[rstest]
#[case(starts_with("a"))]
#[case(one_of(["c", "a"]))]
#[case(starts_with("x") | starts_with("a"))]
#[case(everything() - starts_with("b"))]
fn test_double_reverse_is_sequence_identity(#[case] a: Selector) {
    for schema in schemas() {
        let twice = eval(&reverse(reverse(a.clone())), &schema);
        assert!(twice.sequence_eq(&eval(&a, &schema)), "schema {:?}", schema);
    }
}

#[rstest]
#[case(starts_with("a"))]
#[case(reverse(contains("1")))]
#[case(everything())]
#[case(ends_with("2") | starts_with("a"))]
fn test_union_is_idempotent(#[case] a: Selector) {
    for schema in schemas() {
        let doubled = eval(&(a.clone() | a.clone()), &schema);
        assert!(doubled.sequence_eq(&eval(&a, &schema)), "schema {:?}", schema);
    }
}

#[rstest]
#[case(starts_with("a"), contains("1"), ends_with("b"))]
#[case(everything(), reverse(starts_with("x")), one_of(["d", "a"]))]
#[case(contains("2"), nothing(), everything())]
fn test_and_distributes_over_or(#[case] a: Selector, #[case] b: Selector, #[case] c: Selector) {
    for schema in schemas() {
        let left = eval(&(a.clone() & (b.clone() | c.clone())), &schema);
        let right = eval(&((a.clone() & b.clone()) | (a.clone() & c.clone())), &schema);
        assert_eq!(left, right, "schema {:?}", schema);
    }
}

#[rstest]
#[case(starts_with("a"), contains("1"))]
#[case(everything(), reverse(starts_with("x")))]
fn test_and_or_xor_commute_as_sets(#[case] a: Selector, #[case] b: Selector) {
    for schema in schemas() {
        assert_eq!(
            eval(&(a.clone() & b.clone()), &schema),
            eval(&(b.clone() & a.clone()), &schema)
        );
        assert_eq!(
            eval(&(a.clone() | b.clone()), &schema),
            eval(&(b.clone() | a.clone()), &schema)
        );
        assert_eq!(
            eval(&(a.clone() ^ b.clone()), &schema),
            eval(&(b.clone() ^ a.clone()), &schema)
        );
    }
}

#[test]
fn test_union_order_is_not_commutative() {
    let schema = vec!["a", "b", "c", "d"];
    let ab = column("a") | column("b");
    let ba = column("b") | column("a");
    assert_eq!(eval(&ab, &schema).into_vec(), vec!["a", "b"]);
    assert_eq!(eval(&ba, &schema).into_vec(), vec!["b", "a"]);
}

#[test]
fn test_intersection_follows_left_operand_order() {
    let schema = vec!["a", "b", "c", "d"];
    let expr = reverse(everything()) & int_range(1, 3);
    assert_eq!(eval(&expr, &schema).into_vec(), vec!["d", "c", "b"]);
}

#[test]
fn test_xor_orders_left_then_right() {
    let schema = vec!["a", "b", "c", "d"];
    let expr = reverse(int_range(0, 2)) ^ int_range(1, 3);
    assert_eq!(eval(&expr, &schema).into_vec(), vec!["a", "d"]);
}

#[test]
fn test_selectors_are_reusable_across_schemas() {
    let selector = starts_with("x") - last();
    let first = vec!["x1", "x2", "y"];
    let second = vec!["x9", "x8"];
    assert_eq!(eval(&selector, &first).into_vec(), vec!["x1", "x2"]);
    assert_eq!(eval(&selector, &second).into_vec(), vec!["x9"]);
}

#[test]
fn test_selectors_evaluate_across_threads() {
    let selector = std::sync::Arc::new(starts_with("a") | last());
    let handles: Vec<_> = schemas()
        .into_iter()
        .map(|schema| {
            let selector = std::sync::Arc::clone(&selector);
            std::thread::spawn(move || select(&schema, &selector).unwrap())
        })
        .collect();

    let results: Vec<Vec<String>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results[0], vec!["a", "d"]);
    assert_eq!(results[3], vec!["x"]);
}
