// crates/hg_numerics/tests/hardy_z_tests.rs

//! Hardy Z 集成测试
//!
//! 参考值：Z(100) = 2.692697…，Z(5000) = −0.8042572363…

use hg_numerics::prelude::*;
use hg_numerics::rs_main_term;
use rug::{Float, Integer};

/// 前三个非平凡零点的虚部
const ZEROS: [&str; 3] = [
    "14.134725141734693790457251983562",
    "21.022039638771554992628479593897",
    "25.010857580145688763213790992563",
];

fn session() -> CriticalLineSession {
    CriticalLineSession::with_bits(256).unwrap()
}

#[test]
fn test_reference_values() {
    let session = session();
    let ctx = session.context();

    let z100 = session.hardy_z(&ctx.float(100u32)).unwrap();
    assert!((z100.to_f64() - 2.692_697).abs() < 1e-5);

    let z5000 = session.hardy_z(&ctx.float(5000u32)).unwrap();
    assert!((z5000.to_f64() + 0.804_257_236_3).abs() < 1e-8);
}

#[test]
fn test_near_zero_at_known_zeros() {
    let session = session();
    for literal in ZEROS {
        let t = session.context().parse_float(literal).unwrap();
        let z = session.hardy_z(&t).unwrap();
        assert!(z.to_f64().abs() < 1e-5, "Z({}) = {}", literal, z);
    }
}

#[test]
fn test_sign_change_around_first_zero() {
    let session = session();
    let ctx = session.context();
    let before = session.hardy_z(&ctx.float(14u32)).unwrap();
    let after = session.hardy_z(&ctx.float(14.3f64)).unwrap();
    assert!(before < 0);
    assert!(after > 0);
}

#[test]
fn test_gram_law_for_first_points() {
    // 前 126 个 Gram 点满足 (−1)^n Z(g_n) > 0
    let session = session();
    for n in 0..40 {
        let g = session
            .gram_at_n(&Integer::from(n))
            .unwrap()
            .into_converged()
            .unwrap();
        let z = session.hardy_z(&g).unwrap();
        let signed = if n % 2 == 0 { z } else { -z };
        assert!(signed > 0, "Gram 定律在 g_{} 处不成立", n);
    }
}

#[test]
fn test_main_term_vanishes_below_2pi() {
    // t < 2π 时 N = 0，Z 只剩余项
    let session = session();
    let ctx = session.context();
    let t = ctx.float(5u32);
    let parts = session.evaluator().evaluate_parts(&t).unwrap();
    assert_eq!(parts.n, 0);
    assert!(parts.main.is_zero());
    assert!(rs_main_term(ctx, &t, 0, ctx.bits()).is_zero());
}

#[test]
fn test_concurrent_evaluations_identical() {
    let session = session();
    let evaluator = session.evaluator();
    let ctx = session.context();
    let ts: Vec<Float> = (0..8).map(|i| ctx.float(1000 + 7 * i)).collect();

    let serial: Vec<Float> = ts.iter().map(|t| evaluator.evaluate(t).unwrap()).collect();
    let parallel: Vec<Float> = std::thread::scope(|scope| {
        let handles: Vec<_> = ts
            .iter()
            .map(|t| scope.spawn(move || evaluator.evaluate(t).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(serial, parallel);
}

#[test]
fn test_precision_independent_to_low_order() {
    let low = CriticalLineSession::with_bits(128).unwrap();
    let high = CriticalLineSession::with_bits(512).unwrap();
    let t_low = low.context().float(777u32);
    let t_high = high.context().float(777u32);
    let a = low.hardy_z(&t_low).unwrap();
    let b = high.hardy_z(&t_high).unwrap();
    assert_eq!(a.prec(), 128);
    assert_eq!(b.prec(), 512);
    let diff = Float::with_val(512, &b - &a).abs();
    assert!(diff < 1e-28, "diff = {}", diff);
}
