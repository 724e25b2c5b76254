use super::catalog::CheckTable;
use std::collections::HashSet;

/// Item ids whose condition holds and that the user does not own yet.
///
/// Every bound condition is evaluated, owned or not, so the cost of a check
/// does not depend on what the user already has.
pub fn evaluate(table: &CheckTable<'_>, owned: &HashSet<u64>) -> HashSet<u64> {
    let mut unlocked = HashSet::new();

    for (id, (_, check)) in &table.checks {
        let holds = check();
        if holds && !owned.contains(id) {
            unlocked.insert(*id);
        }
    }

    unlocked
}
