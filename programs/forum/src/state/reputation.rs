// Reputation arithmetic for petitions.
//
// The requirement is charged to every signer who voted against the final
// outcome and paid to every signer who voted with it. On a successful
// petition the offender loses `net_tally * requirement`.

// floor(offender_reputation / capacity) + 1, saturated to u32::MAX.
//
// The intent is that the offender's loss on a successful petition
// outweighs what a losing bloc can offset. This is a heuristic, not a proof.
pub fn voting_requirement(offender_reputation: u64, signature_capacity: usize) -> u32 {
    let capacity = (signature_capacity as u64).max(1);
    let requirement = (offender_reputation / capacity).saturating_add(1);
    u32::try_from(requirement).unwrap_or(u32::MAX)
}

pub fn apply_outcome(voter_reputation: u64, requirement: u32, voted_with_outcome: bool) -> u64 {
    if voted_with_outcome {
        voter_reputation.saturating_add(requirement as u64)
    } else {
        voter_reputation.saturating_sub(requirement as u64)
    }
}

// Only called for successful petitions, where net_tally > 0
pub fn apply_offender_penalty(offender_reputation: u64, requirement: u32, net_tally: i64) -> u64 {
    let penalty = net_tally.unsigned_abs().saturating_mul(requirement as u64);
    offender_reputation.saturating_sub(penalty)
}
