use std::fmt;

use crate::ops::{AndOp, OrOp};
use crate::terms::Key;
use crate::variable::Variable;

/// Premise of a rule over input terms `T`
#[derive(Clone, Debug, PartialEq)]
pub enum Expr<T> {
    Is(T),
    And(Vec<Expr<T>>),
    Or(Vec<Expr<T>>),
}

impl<T> Expr<T> {
    pub fn or(self, rhs: Expr<T>) -> Self {
        match self {
            Expr::Or(mut exprs) => {
                exprs.push(rhs);
                Expr::Or(exprs)
            },
            lhs => Expr::Or(vec![lhs, rhs]),
        }
    }

    pub fn and(self, rhs: Expr<T>) -> Self {
        match self {
            Expr::And(mut exprs) => {
                exprs.push(rhs);
                Expr::And(exprs)
            },
            lhs => Expr::And(vec![lhs, rhs]),
        }
    }

    /// Firing strength of the premise given the degree of each proposition.
    ///
    /// An empty `And` is fully true and an empty `Or` is fully false.
    pub fn eval(&self, degree: &impl Fn(&T) -> f64, and_op: AndOp, or_op: OrOp) -> f64 {
        match self {
            Expr::Is(term) => degree(term),
            Expr::And(exprs) => exprs.iter().map(|e| e.eval(degree, and_op, or_op)).fold(1., |u, v| and_op.apply(u, v)),
            Expr::Or(exprs) => exprs.iter().map(|e| e.eval(degree, and_op, or_op)).fold(0., |u, v| or_op.apply(u, v)),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Expr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join<T: fmt::Display>(f: &mut fmt::Formatter<'_>, exprs: &[Expr<T>], op: &str) -> fmt::Result {
            for (i, expr) in exprs.iter().enumerate() {
                if i > 0 {
                    write!(f, " {op} ")?;
                }
                match expr {
                    Expr::Is(_) => write!(f, "{expr}")?,
                    _ => write!(f, "({expr})")?,
                }
            }
            Ok(())
        }

        match self {
            Expr::Is(term) => write!(f, "{term}"),
            Expr::And(exprs) => join(f, exprs, "AND"),
            Expr::Or(exprs) => join(f, exprs, "OR"),
        }
    }
}

impl<K: Key> Variable<K> {
    pub fn is<T>(&self, term: K) -> Expr<T>
    where
        K: Into<T>,
    {
        Expr::Is(term.into())
    }
}

#[test]
fn test_eval() {
    let degree = |t: &u8| [0.2, 0.7, 0.4][*t as usize];
    let expr = Expr::Is(0).or(Expr::Is(2));

    assert_eq!(expr.eval(&degree, AndOp::Min, OrOp::Max), 0.4);
    assert_eq!(Expr::Is(1).and(Expr::Is(2)).eval(&degree, AndOp::Min, OrOp::Max), 0.4);
    assert_eq!(Expr::Is(1).and(Expr::Is(1)).eval(&degree, AndOp::Prod, OrOp::Max), 0.7 * 0.7);
    assert_eq!(Expr::Is(0).or(Expr::Is(1)).and(Expr::Is(2)).eval(&degree, AndOp::Min, OrOp::Max), 0.4);
    assert_eq!(Expr::<u8>::And(vec![]).eval(&degree, AndOp::Min, OrOp::Max), 1.);
    assert_eq!(Expr::<u8>::Or(vec![]).eval(&degree, AndOp::Min, OrOp::Max), 0.);
}

#[test]
fn test_flattening_and_display() {
    let expr = Expr::Is("a").or(Expr::Is("b")).or(Expr::Is("c"));

    assert_eq!(expr, Expr::Or(vec![Expr::Is("a"), Expr::Is("b"), Expr::Is("c")]));
    assert_eq!(expr.and(Expr::Is("d")).to_string(), "(a OR b OR c) AND d");
}
