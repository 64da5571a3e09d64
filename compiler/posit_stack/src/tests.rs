use super::*;

enum Nested {
    Leaf(i64),
    List(Vec<Nested>),
}

fn sum(node: &Nested) -> i64 {
    ensure_sufficient_stack(|| match node {
        Nested::Leaf(n) => *n,
        Nested::List(items) => items.iter().map(sum).sum(),
    })
}

fn nest(depth: usize) -> Nested {
    let mut node = Nested::Leaf(1);
    for _ in 0..depth {
        node = Nested::List(vec![node, Nested::Leaf(1)]);
    }
    node
}

fn unnest(mut node: Nested) {
    // Iterative drop so the test itself cannot overflow.
    loop {
        match node {
            Nested::Leaf(_) => return,
            Nested::List(items) => match items.into_iter().next() {
                Some(first) => node = first,
                None => return,
            },
        }
    }
}

#[test]
fn shallow_nesting() {
    let tree = nest(3);
    assert_eq!(sum(&tree), 4);
    unnest(tree);
}

#[test]
fn deep_nesting_does_not_overflow() {
    // 100k levels - would overflow a typical 8MB stack without growth
    let tree = nest(100_000);
    assert_eq!(sum(&tree), 100_001);
    unnest(tree);
}

#[test]
fn returns_closure_result() {
    let result: Result<i32, &str> = ensure_sufficient_stack(|| Ok(123));
    assert_eq!(result, Ok(123));
}
