//! Property-based tests for the arena, identifiers and printer.
//!
//! Random expression trees are built bottom-up in an arena and printed;
//! the output must be balanced, indented by nesting depth, and stable.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::uninlined_format_args,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use proptest::prelude::*;
use smallvec::SmallVec;
use wasm_ir::{
    print_expr, Arena, BasicType, BinaryOp, Expr, ExprArena, ExprId, Literal, LocalVar,
    StringInterner, StringLookup, UnaryOp, Var, CHUNK_SIZE,
};

// -- Tree Generation --

/// Shape of a tree to build; leaves are atomic forms.
#[derive(Clone, Debug)]
enum Shape {
    Nop,
    Const(i32),
    Local(u32),
    Block(Vec<Shape>),
    If(Box<Shape>, Box<Shape>, Option<Box<Shape>>),
    Neg(Box<Shape>),
    Add(Box<Shape>, Box<Shape>),
}

fn shape_strategy() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![
        Just(Shape::Nop),
        any::<i32>().prop_map(Shape::Const),
        (0u32..8).prop_map(Shape::Local),
    ];
    leaf.prop_recursive(5, 48, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Shape::Block),
            (
                inner.clone(),
                inner.clone(),
                prop::option::of(inner.clone())
            )
                .prop_map(|(c, t, f)| Shape::If(Box::new(c), Box::new(t), f.map(Box::new))),
            inner.clone().prop_map(|v| Shape::Neg(Box::new(v))),
            (inner.clone(), inner).prop_map(|(l, r)| Shape::Add(Box::new(l), Box::new(r))),
        ]
    })
}

fn build(arena: &mut ExprArena, shape: &Shape) -> ExprId {
    let expr = match shape {
        Shape::Nop => Expr::Nop,
        Shape::Const(v) => Expr::Const(Literal::I32(*v)),
        Shape::Local(i) => Expr::GetLocal {
            local: LocalVar::Index(*i),
        },
        Shape::Block(items) => {
            let list: SmallVec<[ExprId; 4]> = items.iter().map(|s| build(arena, s)).collect();
            Expr::Block {
                label: Var::Unset,
                list,
            }
        }
        Shape::If(c, t, f) => {
            let condition = build(arena, c);
            let if_true = build(arena, t);
            let if_false = f.as_ref().map(|f| build(arena, f));
            Expr::If {
                condition,
                if_true,
                if_false,
            }
        }
        Shape::Neg(v) => {
            let value = build(arena, v);
            Expr::unary(UnaryOp::Neg, BasicType::F32, value).unwrap()
        }
        Shape::Add(l, r) => {
            let left = build(arena, l);
            let right = build(arena, r);
            Expr::binary(BinaryOp::Add, BasicType::I32, left, right).unwrap()
        }
    };
    arena.alloc(expr)
}

fn count(shape: &Shape) -> usize {
    1 + match shape {
        Shape::Nop | Shape::Const(_) | Shape::Local(_) => 0,
        Shape::Block(items) => items.iter().map(count).sum(),
        Shape::If(c, t, f) => count(c) + count(t) + f.as_ref().map_or(0, |f| count(f)),
        Shape::Neg(v) => count(v),
        Shape::Add(l, r) => count(l) + count(r),
    }
}

// -- Properties --

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn printed_parens_balance(shape in shape_strategy()) {
        let mut arena = ExprArena::new();
        let names = StringInterner::new();
        let root = build(&mut arena, &shape);
        let text = print_expr(&arena, &names, root);

        let mut depth = 0i64;
        for c in text.chars() {
            match c {
                '(' => depth += 1,
                ')' => depth -= 1,
                _ => {}
            }
            prop_assert!(depth >= 0, "closed more than opened in:\n{}", text);
        }
        prop_assert_eq!(depth, 0);
        prop_assert!(!text.ends_with('\n'));
    }

    #[test]
    fn lines_indented_by_open_depth(shape in shape_strategy()) {
        let mut arena = ExprArena::new();
        let names = StringInterner::new();
        let root = build(&mut arena, &shape);
        let text = print_expr(&arena, &names, root);

        // Depth of forms still open at the start of each line.
        let mut depth = 0usize;
        for line in text.lines() {
            let body = line.trim_start_matches(' ');
            let indent = line.len() - body.len();
            let expected = if body.starts_with(')') { depth - 1 } else { depth };
            prop_assert_eq!(indent, expected * 2, "line {:?} in:\n{}", line, text);
            for c in body.chars() {
                match c {
                    '(' => depth += 1,
                    ')' => depth -= 1,
                    _ => {}
                }
            }
        }
    }

    #[test]
    fn printing_is_deterministic(shape in shape_strategy()) {
        let mut first = ExprArena::new();
        let mut second = ExprArena::new();
        let names = StringInterner::new();
        let a = build(&mut first, &shape);
        let b = build(&mut second, &shape);
        prop_assert_eq!(print_expr(&first, &names, a), print_expr(&second, &names, a));
        prop_assert_eq!(print_expr(&first, &names, a), print_expr(&second, &names, b));
    }

    #[test]
    fn subtree_counts_every_node(shape in shape_strategy()) {
        let mut arena = ExprArena::new();
        let root = build(&mut arena, &shape);
        prop_assert_eq!(arena.subtree_len(root), count(&shape));
        prop_assert_eq!(arena.len(), count(&shape));
    }

    #[test]
    fn numeric_var_accepts_exactly_its_range(value in any::<u32>()) {
        let result = Var::index(value);
        if value >= 1 && value < Var::MAX_INDEX {
            prop_assert_eq!(result.unwrap().as_index(), Some(value));
        } else {
            prop_assert!(result.is_err());
        }
    }

    #[test]
    fn named_var_prints_its_text(text in "[a-z$][a-z0-9_.]{0,15}") {
        let mut names = StringInterner::new();
        let name = names.intern(&text);
        let var = Var::named(name);
        prop_assert_eq!(var.as_name(), Some(name));
        prop_assert_eq!(var.display(&names).to_string(), text.clone());
        prop_assert_eq!(StringLookup::lookup(&names, name), text.as_str());
    }

    #[test]
    fn arena_keeps_values_across_chunks(n in 0usize..(CHUNK_SIZE / 2)) {
        // 8-byte elements give CHUNK_SIZE / 8 slots per chunk.
        let mut arena: Arena<u64> = Arena::new();
        for i in 0..n {
            prop_assert_eq!(arena.alloc(i as u64), i);
        }
        prop_assert_eq!(arena.len(), n);
        prop_assert_eq!(arena.chunk_count(), n.div_ceil(arena.chunk_capacity()));
        for i in 0..n {
            prop_assert_eq!(*arena.get(i), i as u64);
        }
        prop_assert!(arena.iter().copied().eq(0..n as u64));
    }
}
