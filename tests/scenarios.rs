use pretty_assertions::assert_eq;
use r_arith::object::types::{Double, Integer};
use r_arith::ops::Operand;
use r_arith::{
    resolve_types, try_fold, CollectSink, ElementKind, Obj, Operator, Optimization, OptionNA,
    Session, Vector, Warning,
};

fn session() -> Session<CollectSink> {
    Session::default().with_diagnostics(CollectSink::new())
}

fn obj(x: impl Into<Vector>) -> Obj {
    Obj::from(x.into())
}

fn binary(session: &mut Session<CollectSink>, op: Operator, l: &Obj, r: &Obj) -> Vector {
    session
        .evaluate_binary(op, l, Some(Operand::Shared(r)))
        .unwrap()
        .into_vector()
        .unwrap()
}

#[test]
fn recycling_a_non_multiple_length_warns_once() {
    let mut s = session();
    let out = binary(&mut s, Operator::Add, &obj(vec![1, 2, 3]), &obj(vec![10, 20]));

    assert_eq!(out, Vector::from(vec![11, 22, 13]));
    assert_eq!(out.kind(), ElementKind::Integer);
    assert_eq!(
        s.diagnostics().warnings,
        vec![Warning::LengthMismatch {
            longer: 3,
            shorter: 2
        }]
    );
}

#[test]
fn missing_base_to_the_zeroth_power_is_one() {
    let mut s = session();
    let out = binary(
        &mut s,
        Operator::Pow,
        &obj(vec![Double::NA]),
        &obj(vec![0.0]),
    );
    assert_eq!(out, Vector::from(vec![1.0]));
    assert!(out.is_complete());
}

#[test]
fn missing_modulo_zero_is_nan() {
    let mut s = session();
    let out = binary(
        &mut s,
        Operator::Mod,
        &obj(vec![Double::NA]),
        &obj(vec![0.0]),
    );
    let value = out.get(0).and_then(|x| x.as_f64()).unwrap();
    assert!(value.is_nan());
    assert!(out.is_complete());
}

#[test]
fn integer_division_yields_doubles() {
    let mut s = session();
    let out = binary(&mut s, Operator::Divide, &obj(vec![2, 4, 6]), &obj(vec![2]));
    assert_eq!(out.kind(), ElementKind::Double);
    assert_eq!(out, Vector::from(vec![1.0, 2.0, 3.0]));
    assert!(s.diagnostics().warnings.is_empty());
}

#[test]
fn shifting_a_progression_folds() {
    let seq = Vector::seq_integer(1, 1, 5);
    let folded = try_fold(Operator::Add, &seq, &Vector::from(vec![10])).unwrap();
    assert!(folded.is_seq());
    assert_eq!(folded, Vector::seq_integer(11, 1, 5));
    assert_eq!(folded.materialize(), Vector::from(vec![11, 12, 13, 14, 15]));
}

#[test]
fn combining_characters_with_a_double() {
    let mut s = session();
    let out = s
        .evaluate_combine(&obj(vec!["a", "b"]), &obj(vec![3.0]))
        .unwrap();
    assert_eq!(out, obj(vec!["a", "b", "3"]));
}

#[test]
fn missing_values_propagate() {
    let mut s = session();
    for x in [1.0, -2.5, 0.0, f64::INFINITY] {
        let out = binary(&mut s, Operator::Add, &obj(vec![Double::NA]), &obj(vec![x]));
        assert_eq!(out, Vector::from(vec![Double::NA]));
        assert!(!out.is_complete());
    }

    let out = binary(&mut s, Operator::Pow, &obj(vec![1.0]), &obj(vec![Double::NA]));
    assert_eq!(out, Vector::from(vec![1.0]));

    let out = binary(
        &mut s,
        Operator::Add,
        &obj(vec![f64::NAN]),
        &obj(vec![Double::NA]),
    );
    assert!(out.get(0).and_then(|x| x.as_f64()).is_some_and(f64::is_nan));
}

#[test]
fn folding_keeps_signed_zeros() {
    let reciprocal = |mut s: Session<CollectSink>| {
        let scaled = s
            .evaluate_binary(
                Operator::Divide,
                obj(Vector::seq_integer(0, 1, 3)),
                Some(Operand::Temporary(obj(vec![-1]))),
            )
            .unwrap();
        let out = s
            .evaluate_binary(Operator::Divide, obj(vec![1.0]), Some(Operand::Temporary(scaled)))
            .unwrap()
            .into_vector()
            .unwrap();
        (0..out.len())
            .map(|i| out.get(i).and_then(|x| x.as_f64()).unwrap())
            .collect::<Vec<_>>()
    };

    let folded = reciprocal(session());
    let iterated = reciprocal(session().with_disabled(Optimization::SequenceFolding));
    assert_eq!(folded, vec![f64::NEG_INFINITY, -1.0, -0.5]);
    assert_eq!(folded, iterated);
}

#[test]
fn recycling_matches_scalar_application() {
    let mut s = session();
    let left = vec![3, -7, 0, 12, 5, -1];
    let right = vec![2, -3];
    let ops = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
        Operator::Pow,
        Operator::Mod,
        Operator::IntegerDiv,
        Operator::Lt,
        Operator::Eq,
    ];

    for op in ops {
        let out = binary(&mut s, op, &obj(left.clone()), &obj(right.clone()));
        assert_eq!(out.len(), left.len());
        for i in 0..left.len() {
            let expected = s
                .apply_scalar(op, &left[i].into(), &right[i % right.len()].into())
                .unwrap();
            assert_eq!(out.get(i), Some(expected), "{op} at {i}");
        }
    }
}

#[test]
fn completeness_reflects_missing_values() {
    let mut s = session();
    let cases = [
        (Operator::Add, obj(vec![i32::MAX, 1]), obj(vec![1])),
        (Operator::Mod, obj(vec![5, 6]), obj(vec![0, 4])),
        (Operator::IntegerDiv, obj(vec![5, 6]), obj(vec![2])),
        (Operator::Gt, obj(vec![f64::NAN, 1.0]), obj(vec![0.0])),
        (Operator::And, obj(vec![Integer::NA, Integer::Some(0)]), obj(vec![false])),
        (Operator::Or, obj(vec![Integer::NA]), obj(vec![false])),
        (Operator::Pow, obj(vec![Double::NA, Double::Some(3.0)]), obj(vec![0.0])),
    ];

    for (op, l, r) in cases {
        let out = binary(&mut s, op, &l, &r);
        let has_na = (0..out.len()).any(|i| out.get(i).is_some_and(|x| x.is_na()));
        assert_eq!(out.is_complete(), !has_na, "{op} on {l:?} and {r:?}");
    }
}

#[test]
fn type_resolution_is_symmetric_for_commutative_operators() {
    use ElementKind::*;
    let kinds = [Logical, Integer, Double, Complex, Character, Raw];
    for op in [Operator::Add, Operator::Multiply, Operator::Eq, Operator::And] {
        for l in kinds {
            for r in kinds {
                let there = resolve_types(op, l, r).map(|x| x.result).ok();
                let back = resolve_types(op, r, l).map(|x| x.result).ok();
                assert_eq!(there, back, "{op} on {l} and {r}");
                assert_eq!(there, resolve_types(op, l, r).map(|x| x.result).ok());
            }
        }
    }
}

#[test]
fn combine_treats_null_as_identity() {
    let mut s = session();
    let named = obj(Vector::from(vec![1, 2]).set_names(vec!["a", "b"]).unwrap());
    assert_eq!(s.evaluate_combine(&Obj::Null, &named).unwrap(), named);
    assert_eq!(s.evaluate_combine(&named, &Obj::Null).unwrap(), named);
    assert_eq!(
        s.evaluate_combine(&Obj::Null, &Obj::Null).unwrap(),
        obj(Vector::empty(ElementKind::Double))
    );
}

#[test]
fn errors_are_reported_before_computing() {
    let mut s = session();
    let matrix = obj(Vector::from(vec![1, 2, 3, 4]).set_dim(vec![2, 2]).unwrap());
    let column = obj(Vector::from(vec![1, 2, 3, 4]).set_dim(vec![4, 1]).unwrap());

    let out = s.evaluate_binary(Operator::Add, &matrix, Some(Operand::Shared(&column)));
    assert_eq!(out, Err(r_arith::Error::NonConformableArrays));

    let out = s.evaluate_binary(
        Operator::Mod,
        &obj(vec![OptionNA::Some(r_arith::object::complex::Cplx::new(1.0, 1.0))]),
        Some(Operand::Shared(&obj(vec![2.0]))),
    );
    assert_eq!(out, Err(r_arith::Error::UnimplementedOperation(Operator::Mod)));

    assert_eq!(s.diagnostics().errors.len(), 2);
}

#[test]
fn temporaries_and_optimizations_do_not_change_values() {
    let seq = Vector::seq_integer(-4, 3, 8);
    let other = Vector::from(vec![2, 5, -1, 0, 7, 3, 9, 1]);
    let expected = binary(&mut session(), Operator::Multiply, &obj(seq.clone()), &obj(other.clone()));

    let variants = [
        session(),
        session().with_disabled(Optimization::OperandReuse),
        session().with_disabled(Optimization::SequenceFolding),
    ];
    for mut s in variants {
        let out = s
            .evaluate_binary(
                Operator::Multiply,
                obj(seq.clone()),
                Some(Operand::Temporary(obj(other.clone()))),
            )
            .unwrap();
        assert_eq!(out, obj(expected.clone()));
    }
}
