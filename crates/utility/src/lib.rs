use std::fmt::Display;

use euclid::*;
use itertools::Itertools;

pub use euclid::{point2, size2, vec2};

pub mod coordinate_frame_conversions;
pub use coordinate_frame_conversions::*;

pub mod symmetric_line;
pub use symmetric_line::*;

pub const STEP_ZERO: WorldStep = vec2(0, 0);
pub const STEP_UP: WorldStep = vec2(0, 1);
pub const STEP_DOWN: WorldStep = vec2(0, -1);
pub const STEP_RIGHT: WorldStep = vec2(1, 0);
pub const STEP_LEFT: WorldStep = vec2(-1, 0);

pub const STEP_UP_RIGHT: WorldStep = vec2(1, 1);
pub const STEP_UP_LEFT: WorldStep = vec2(-1, 1);
pub const STEP_DOWN_LEFT: WorldStep = vec2(-1, -1);
pub const STEP_DOWN_RIGHT: WorldStep = vec2(1, -1);

pub const KING_STEPS: [WorldStep; 8] = [
    STEP_UP,
    STEP_DOWN,
    STEP_RIGHT,
    STEP_LEFT,
    STEP_UP_RIGHT,
    STEP_UP_LEFT,
    STEP_DOWN_RIGHT,
    STEP_DOWN_LEFT,
];

/// One code per king step plus one for standing still.
pub const NUM_KING_STEP_CODES: usize = 9;

#[macro_export]
macro_rules! pub_mod_and_use {
    ($($module:ident), +) => {
        $(
            pub mod $module;
            pub use self::$module::*;
        )+
    };
}

pub fn point_to_string<T: Display, U>(point: Point2D<T, U>) -> String {
    format!("(x: {}, y: {})", point.x, point.y)
}

pub fn vector2_to_string<T: Display, U>(vec: Vector2D<T, U>) -> String {
    format!("(dx: {}, dy: {})", vec.x, vec.y)
}

pub fn king_distance(step: WorldStep) -> u32 {
    step.x.abs().max(step.y.abs()) as u32
}

pub fn reversed<T>(mut v: Vec<T>) -> Vec<T> {
    v.reverse();
    v
}

pub fn is_king_step(step: WorldStep) -> bool {
    is_orthogonal_king_step(step) || is_diagonal_king_step(step)
}

pub fn is_orthogonal_king_step(step: WorldStep) -> bool {
    step.square_length() == 1
}

pub fn is_diagonal_king_step(step: WorldStep) -> bool {
    step.square_length() == 2
}

// (ddx + 1) + 3 * (ddy + 1), so STEP_ZERO lands in the middle at 4
pub fn king_step_code(step: WorldStep) -> usize {
    assert!(
        king_distance(step) <= 1,
        "not a king step: {}",
        vector2_to_string(step)
    );
    ((step.x + 1) + 3 * (step.y + 1)) as usize
}

pub fn king_step_from_code(code: usize) -> WorldStep {
    assert!(code < NUM_KING_STEP_CODES, "bad king step code: {}", code);
    let code = code as i32;
    vec2(code % 3 - 1, code / 3 - 1)
}

pub fn is_within_radius(step: WorldStep, radius: u32) -> bool {
    // wide enough for any i32 step and u32 radius
    let square_length =
        (step.x.unsigned_abs() as u64).pow(2) + (step.y.unsigned_abs() as u64).pow(2);
    square_length <= (radius as u64).pow(2)
}

// TODO: turn into iter
pub fn squares_on_board(size: BoardSize) -> SquareSet {
    (0..size.width)
        .cartesian_product((0..size.height).into_iter())
        .map(|(x, y)| WorldSquare::new(x as i32, y as i32))
        .collect()
}
