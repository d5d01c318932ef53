//! Pieces module - the shape library
//!
//! Spawn orientation of each of the seven kinds, as an immutable table.

use crate::rng::SimpleRng;
use crate::shape::Shape;
use crate::types::PieceKind;

const I_SHAPE: Shape = Shape::from_pattern(&["....", "####", "....", "...."]);
const J_SHAPE: Shape = Shape::from_pattern(&["#..", "###", "..."]);
const L_SHAPE: Shape = Shape::from_pattern(&["..#", "###", "..."]);
const O_SHAPE: Shape = Shape::from_pattern(&["##", "##"]);
const S_SHAPE: Shape = Shape::from_pattern(&[".##", "##.", "..."]);
const T_SHAPE: Shape = Shape::from_pattern(&[".#.", "###", "..."]);
const Z_SHAPE: Shape = Shape::from_pattern(&["##.", ".##", "..."]);

/// Every kind with its spawn shape, in `PieceKind::ALL` order.
pub const SHAPES: [(PieceKind, Shape); 7] = [
    (PieceKind::I, I_SHAPE),
    (PieceKind::J, J_SHAPE),
    (PieceKind::L, L_SHAPE),
    (PieceKind::O, O_SHAPE),
    (PieceKind::S, S_SHAPE),
    (PieceKind::T, T_SHAPE),
    (PieceKind::Z, Z_SHAPE),
];

/// Spawn shape for a piece kind.
pub fn shape_of(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::Z => Z_SHAPE,
    }
}

/// Uniform random kind from the catalog.
pub fn random_kind(rng: &mut SimpleRng) -> PieceKind {
    rng.pick(&PieceKind::ALL).unwrap_or(PieceKind::I)
}
