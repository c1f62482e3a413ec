use crate::board_location::BoardLocation;

/// Whether the jump `from` -> `to` fits the knight pattern. Knights jump,
/// so there is no obstruction scan.
pub fn knight_move_is_valid(from: &BoardLocation, to: &BoardLocation) -> bool {
    let d_row = (to.0 - from.0).abs();
    let d_col = (to.1 - from.1).abs();
    (d_row == 2 && d_col == 1) || (d_row == 1 && d_col == 2)
}
