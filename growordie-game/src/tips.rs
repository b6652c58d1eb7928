//! One-shot gameplay tips.
use crate::rng::RollSource;

pub const TIPS: [&str; 6] = [
    "💡 Tip: Keep all stats between 40-70 for optimal growth!",
    "💡 Tip: Use Rest when Health is below 70 and other stats are safe.",
    "💡 Tip: Water drains fastest - prioritize it when low!",
    "💡 Tip: Choose Strong Roots upgrade first - it helps the most!",
    "💡 Tip: React immediately to events - they can be dangerous!",
    "💡 Tip: Higher levels have special abilities - use them wisely!",
];

/// Pick a tip unless the player has already used theirs.
pub fn pick_tip<R>(tips_used: bool, rolls: &mut R) -> Option<&'static str>
where
    R: RollSource + ?Sized,
{
    if tips_used {
        return None;
    }
    let index = rolls.tip_pick(TIPS.len()).min(TIPS.len() - 1);
    Some(TIPS[index])
}
