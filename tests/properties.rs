use std::collections::HashSet;

use proptest::prelude::*;

use deepsea_datagen::context::GenContext;
use deepsea_datagen::dataset::Table;
use deepsea_datagen::sample::normalize;
use deepsea_datagen::splitter::{self, SplitConfig};
use deepsea_datagen::transform::soften::CueSoftener;

const CUES: &[&str] = &[
    "I didn't tell my partner I'm talking to you.",
    "Does your partner know?",
    "I keep crossing boundaries.",
    "my partner is out tonight",
    "Can we talk later?",
];

fn table(rows: &[(u8, u8)]) -> Table {
    let mut csv = String::from("id,text,label,label_name,difficulty,template_id\n");
    for (i, (label, group)) in rows.iter().enumerate() {
        csv.push_str(&format!("{i},\"A: row {i}\",{label},x,easy,g{group}\n"));
    }
    Table::from_reader(csv.as_bytes()).unwrap()
}

proptest! {
    #[test]
    fn splits_partition_rows_by_group(
        rows in prop::collection::vec((0u8..2, 0u8..25), 1..120),
        seed in any::<u64>(),
    ) {
        let t = table(&rows);
        let config = SplitConfig { seed, ..Default::default() };
        let split = splitter::split(&t, &config).unwrap();

        let col = t.column("template_id").unwrap();
        let total: usize = split.parts().iter().map(|(_, part)| part.len()).sum();
        prop_assert_eq!(total, t.len());

        let sets: Vec<HashSet<&str>> = split.parts().iter().map(|(_, part)| part.values(col).collect()).collect();
        for i in 0..sets.len() {
            for j in i + 1..sets.len() {
                prop_assert!(sets[i].is_disjoint(&sets[j]));
            }
        }

        // Ids are unique per row, so every row lands exactly once.
        let ids: HashSet<&str> = split.parts().iter().flat_map(|(_, part)| part.values(0)).collect();
        prop_assert_eq!(ids.len(), t.len());
    }

    #[test]
    fn softening_never_exceeds_three(
        picks in prop::collection::vec(0..CUES.len(), 0..12),
        seed in any::<u64>(),
    ) {
        let text: Vec<&str> = picks.iter().map(|&i| CUES[i]).collect();
        let text = text.join(" ");
        let forced = CueSoftener { replace_range: (1.0, 1.0), ..Default::default() };
        let mut ctx = GenContext::new(seed);
        let (out, n) = forced.soften(&text, 1.0, &mut ctx);
        prop_assert!(n <= 3);
        if n == 0 {
            prop_assert_eq!(out, text);
        }
    }

    #[test]
    fn normalize_is_idempotent(text in ".{0,80}") {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once.clone());
        prop_assert!(!once.contains("  "));
    }
}
