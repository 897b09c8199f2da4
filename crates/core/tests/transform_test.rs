//! Tests for the user-space transform stack.

use std::f64::consts::{FRAC_PI_2, PI};

use hpglkit_core::HpglError;
use hpglkit_core::model::{MATRIX_STACK_DEPTH, TransformStack};
use hpglkit_core::utils::{
    MATRIX_IDENTITY, Matrix, approx_eq, matrix_approx_eq, rotate_matrix,
    translate_matrix,
};

fn assert_point(actual: (f64, f64), expected: (f64, f64)) {
    assert!(
        approx_eq(actual.0, expected.0, 1e-9) && approx_eq(actual.1, expected.1, 1e-9),
        "expected {expected:?}, got {actual:?}"
    );
}

// ============================================================================
// Basic operations
// ============================================================================

#[test]
fn test_new_stack_is_identity() {
    let stack = TransformStack::new();
    assert_eq!(stack.depth(), 0);
    assert_eq!(stack.current(), MATRIX_IDENTITY);
    assert_point(stack.apply((3.0, 4.0)), (3.0, 4.0));
}

#[test]
fn test_translate_then_rotate_composes_right_to_left() {
    let mut stack = TransformStack::new();
    stack.translate(100.0, 50.0);
    stack.rotate(FRAC_PI_2);
    // (10, 0) rotates to (0, 10) in the translated frame
    assert_point(stack.apply((10.0, 0.0)), (100.0, 60.0));
}

#[test]
fn test_rotate_then_translate_moves_along_rotated_axis() {
    let mut stack = TransformStack::new();
    stack.rotate(PI);
    stack.translate(10.0, 0.0);
    assert_point(stack.apply((0.0, 0.0)), (-10.0, 0.0));
}

#[test]
fn test_reset_clears_only_top_frame() {
    let mut stack = TransformStack::new();
    stack.translate(5.0, 0.0);
    stack.push().unwrap();
    stack.translate(0.0, 7.0);
    stack.reset();
    assert_point(stack.apply((0.0, 0.0)), (5.0, 0.0));
}

// ============================================================================
// Push / pop discipline
// ============================================================================

#[test]
fn test_pop_restores_enclosing_frame() {
    let mut stack = TransformStack::new();
    stack.translate(5.0, 0.0);
    stack.push().unwrap();
    stack.translate(10.0, 0.0);
    stack.push().unwrap();
    stack.rotate(1.0);
    stack.translate(3.0, 3.0);

    stack.pop().unwrap();
    assert_point(stack.apply((0.0, 0.0)), (15.0, 0.0));

    stack.pop().unwrap();
    assert_point(stack.apply((0.0, 0.0)), (5.0, 0.0));
    assert_eq!(stack.depth(), 0);
}

#[test]
fn test_push_up_to_capacity_then_overflow() {
    let mut stack = TransformStack::new();
    for _ in 0..MATRIX_STACK_DEPTH {
        stack.push().unwrap();
    }
    assert_eq!(stack.depth(), 32);
    match stack.push() {
        Err(HpglError::StackOverflow { depth }) => assert_eq!(depth, 32),
        other => panic!("expected overflow, got {other:?}"),
    }
    assert_eq!(stack.depth(), 32);
}

#[test]
fn test_pop_on_empty_stack_underflows() {
    let mut stack = TransformStack::new();
    assert!(matches!(stack.pop(), Err(HpglError::StackUnderflow)));

    stack.push().unwrap();
    stack.pop().unwrap();
    assert!(matches!(stack.pop(), Err(HpglError::StackUnderflow)));
}

// ============================================================================
// Reference model: recompute from recorded operations
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum Op {
    Translate(f64, f64),
    Rotate(f64),
}

fn replay(frames: &[Vec<Op>]) -> Matrix {
    frames
        .iter()
        .flatten()
        .fold(MATRIX_IDENTITY, |m, op| match *op {
            Op::Translate(x, y) => translate_matrix(m, (x, y)),
            Op::Rotate(a) => rotate_matrix(m, a),
        })
}

/// Small deterministic generator so the sequence is reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn unit(&mut self) -> f64 {
        (self.next() % 10_000) as f64 / 10_000.0
    }
}

#[test]
fn test_pop_matches_replay_of_remaining_operations() {
    let mut rng = Lcg(0x5eed);
    let mut stack = TransformStack::new();
    let mut frames: Vec<Vec<Op>> = vec![Vec::new()];

    for _ in 0..2_000 {
        match rng.next() % 4 {
            0 => {
                let (x, y) = (rng.unit() * 200.0 - 100.0, rng.unit() * 200.0 - 100.0);
                stack.translate(x, y);
                frames.last_mut().unwrap().push(Op::Translate(x, y));
            }
            1 => {
                let a = rng.unit() * 2.0 * PI;
                stack.rotate(a);
                frames.last_mut().unwrap().push(Op::Rotate(a));
            }
            2 => {
                let pushed = stack.push();
                if frames.len() - 1 == MATRIX_STACK_DEPTH {
                    assert!(matches!(pushed, Err(HpglError::StackOverflow { .. })));
                } else {
                    pushed.unwrap();
                    frames.push(Vec::new());
                }
            }
            _ => {
                let popped = stack.pop();
                if frames.len() == 1 {
                    assert!(matches!(popped, Err(HpglError::StackUnderflow)));
                } else {
                    popped.unwrap();
                    frames.pop();
                    assert!(
                        matrix_approx_eq(stack.current(), replay(&frames), 1e-6),
                        "after pop: {:?} vs {:?}",
                        stack.current(),
                        replay(&frames)
                    );
                }
            }
        }
        assert_eq!(stack.depth(), frames.len() - 1);
    }
    assert!(matrix_approx_eq(stack.current(), replay(&frames), 1e-6));
}
