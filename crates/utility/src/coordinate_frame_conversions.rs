use std::collections::HashSet;

use crate::*;

// empty enums for euclid typing
#[derive(Clone, PartialEq, Debug, Copy)]
pub struct SquareGridInWorldFrame;

pub type WorldSquare = Point2D<i32, SquareGridInWorldFrame>;
pub type BoardSize = Size2D<u32, SquareGridInWorldFrame>;

/// Offset between two squares.  Inside a sight trie, the offset of a square from the viewer.
pub type WorldStep = Vector2D<i32, SquareGridInWorldFrame>;

pub type SquareList = Vec<WorldSquare>;
pub type StepList = Vec<WorldStep>;

pub type SquareSet = HashSet<WorldSquare>;
pub type StepSet = HashSet<WorldStep>;

pub fn square_to_tuple(square: WorldSquare) -> (i32, i32) {
    square.to_tuple()
}

pub fn tuple_to_square((x, y): (i32, i32)) -> WorldSquare {
    point2(x, y)
}

/// `to - from`, or `None` if that does not fit in an `i32` step.
pub fn checked_step_between(from: WorldSquare, to: WorldSquare) -> Option<WorldStep> {
    Some(vec2(to.x.checked_sub(from.x)?, to.y.checked_sub(from.y)?))
}
