use itertools::Itertools;
use varisat::Lit;

/// No two of `lits` hold together; (!A + !B)(!A + !C)(!B + !C)...
pub(crate) fn at_most_one(lits: &[Lit]) -> Vec<Vec<Lit>> {
    lits.iter()
        .tuple_combinations()
        .map(|(a, b)| vec![!*a, !*b])
        .collect_vec()
}

/// Exactly one of `lits` holds. An empty `lits` yields the empty clause, which is unsatisfiable.
pub(crate) fn exactly_one(lits: &[Lit]) -> Vec<Vec<Lit>> {
    let mut clauses = at_most_one(lits);
    // at least one; A + B + C + ...
    clauses.push(lits.to_vec());

    clauses
}
