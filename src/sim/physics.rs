//! Player physics: gravity, jumping, tilt, and screen-anchor easing

use crate::consts::*;
use crate::sim::state::Player;

/// Advance the player one tick under gravity.
///
/// Fall speed is capped so a single tick can never carry the player through
/// a thin platform. The visual tilt tracks vertical velocity, and the player
/// eases horizontally toward the screen anchor while the world scrolls past.
pub fn update_player(player: &mut Player) {
    player.velocity_y += GRAVITY;
    if player.velocity_y > MAX_FALL_SPEED {
        player.velocity_y = MAX_FALL_SPEED;
    }
    player.pos.y += player.velocity_y;

    player.rotation = (player.velocity_y / 20.0).clamp(-0.4, 0.4);

    let diff = PLAYER_ANCHOR_X - player.pos.x;
    if diff.abs() > 1.0 {
        player.pos.x += diff * ANCHOR_EASING;
    }
}

/// Spend one jump from the double-jump budget. Returns false (and changes
/// nothing) when the budget is exhausted.
pub fn jump(player: &mut Player) -> bool {
    if player.jumps_left == 0 {
        return false;
    }
    player.velocity_y = JUMP_FORCE;
    player.jumps_left -= 1;
    true
}
