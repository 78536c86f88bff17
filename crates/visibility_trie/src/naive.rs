use utility::*;

/// Field of view without any precomputation: one fresh line per square in the sight circle.
///
/// A square is visible if nothing strictly between it and `origin` blocks.  Asks about the same
/// squares many times over, so this is only a baseline for the tries to be measured against.
pub fn naive_field_of_view(
    radius: u32,
    origin: WorldSquare,
    mut is_blocked: impl FnMut(WorldSquare) -> bool,
    mut on_visible: impl FnMut(WorldSquare),
) {
    assert!(radius > 0, "sight radius must be positive");
    let r = radius as i32;
    for dy in -r..=r {
        for dx in -r..=r {
            let step = vec2(dx, dy);
            if !is_within_radius(step, radius) {
                continue;
            }
            let target = origin + step;
            let reached = SymmetricLine::new(origin, target)
                .skip(1)
                .take_while(|&square| square == target || !is_blocked(square))
                .any(|square| square == target);
            if reached || target == origin {
                on_visible(target);
            }
        }
    }
}
