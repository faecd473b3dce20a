use crate::core::io::contacts::ContactRecord;
use crate::core::topology::classification::is_canonical_one_letter;

/// Contact type code of hydrogen-bond rows.
pub const HYDROGEN_BOND_CONTACT: &str = "HB";

/// Intra- and inter-chain hydrogen-bond contacts between canonical residues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HbTally {
    pub intra: u64,
    pub inter: u64,
}

impl HbTally {
    /// `intra / inter`, or `None` when there are no inter-chain contacts.
    pub fn ratio(&self) -> Option<f64> {
        (self.inter > 0).then(|| self.intra as f64 / self.inter as f64)
    }

    /// The ratio with one decimal, `"0.0"` when undefined.
    pub fn ratio_string(&self) -> String {
        match self.ratio() {
            Some(ratio) => format!("{ratio:.1}"),
            None => "0.0".to_string(),
        }
    }
}

fn record_is_canonical_hb(record: &ContactRecord) -> bool {
    record.kind == HYDROGEN_BOND_CONTACT
        && is_canonical_one_letter(&record.res_name1)
        && is_canonical_one_letter(&record.res_name2)
}

/// Tallies hydrogen-bond rows between canonical residues. Rows within one
/// residue count as neither intra- nor inter-chain.
pub fn tally<'a, I>(records: I) -> HbTally
where
    I: IntoIterator<Item = &'a ContactRecord>,
{
    records
        .into_iter()
        .filter(|record| record_is_canonical_hb(record))
        .fold(HbTally::default(), |mut tally, record| {
            if record.chain1 != record.chain2 {
                tally.inter += 1;
            } else if record.res1 != record.res2 {
                tally.intra += 1;
            }
            tally
        })
}
