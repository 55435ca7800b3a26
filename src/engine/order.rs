use super::RoundInput;

/// Known round headings, earliest first.
pub const CANONICAL_ROUNDS: [&str; 6] = [
    "Round of 64",
    "Round of 32",
    "Round of 16",
    "Quarterfinals",
    "Semifinals",
    "Final",
];

pub fn canonical_rank(label: Option<&str>) -> Option<usize> {
    let label = label?.trim();
    CANONICAL_ROUNDS.iter().position(|known| *known == label)
}

/// Put recognized rounds into canonical order without moving the others.
///
/// Recognized rounds are sorted among the positions they already occupy;
/// a round with an unknown or missing heading keeps its index. Ties keep
/// source order.
pub fn order_rounds(rounds: Vec<RoundInput>) -> Vec<RoundInput> {
    let positions: Vec<usize> = rounds
        .iter()
        .enumerate()
        .filter(|(_, r)| canonical_rank(r.label.as_deref()).is_some())
        .map(|(i, _)| i)
        .collect();

    let mut slots: Vec<Option<RoundInput>> = rounds.into_iter().map(Some).collect();
    let mut recognized: Vec<RoundInput> = positions.iter().filter_map(|&i| slots[i].take()).collect();
    recognized.sort_by_key(|r| canonical_rank(r.label.as_deref()));

    for (&pos, round) in positions.iter().zip(recognized) {
        slots[pos] = Some(round);
    }
    slots.into_iter().flatten().collect()
}

/// Heading shown on a column or tab, with a positional fallback.
pub fn display_label(label: Option<&str>, index: usize) -> String {
    match label.map(str::trim) {
        Some(l) if !l.is_empty() => l.to_owned(),
        _ => format!("Round {}", index + 1),
    }
}
