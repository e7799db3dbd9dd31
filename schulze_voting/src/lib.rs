pub mod builder;
mod config;
pub mod manual;

use log::{debug, info};
use snafu::{ensure, OptionExt};

use std::{
    cell::OnceCell,
    collections::{HashMap, HashSet},
    ops::{Add, AddAssign},
};

pub use crate::config::*;

// **** Private structures ****

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
struct CandidateId(usize);

#[derive(PartialEq, Debug, Clone, Copy, PartialOrd)]
struct VoteWeight(f64);

impl VoteWeight {
    const EMPTY: VoteWeight = VoteWeight(0.0);

    fn checked(weight: f64) -> Result<VoteWeight, VotingErrors> {
        ensure!(
            weight.is_finite() && weight >= 0.0,
            InvalidWeightSnafu { weight }
        );
        Ok(VoteWeight(weight))
    }

    fn min(self, other: VoteWeight) -> VoteWeight {
        if other < self {
            other
        } else {
            self
        }
    }

    fn max(self, other: VoteWeight) -> VoteWeight {
        if other > self {
            other
        } else {
            self
        }
    }
}

impl std::iter::Sum for VoteWeight {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        VoteWeight(iter.map(|vw| vw.0).sum())
    }
}

impl AddAssign for VoteWeight {
    fn add_assign(&mut self, rhs: VoteWeight) {
        self.0 += rhs.0;
    }
}

impl Add for VoteWeight {
    type Output = VoteWeight;
    fn add(self: VoteWeight, rhs: VoteWeight) -> VoteWeight {
        VoteWeight(self.0 + rhs.0)
    }
}

// Dense N x N table indexed by candidate ids. The diagonal stays at zero.
#[derive(PartialEq, Debug, Clone)]
struct SquareTable {
    size: usize,
    cells: Vec<VoteWeight>,
}

impl SquareTable {
    fn zeros(size: usize) -> SquareTable {
        SquareTable {
            size,
            cells: vec![VoteWeight::EMPTY; size * size],
        }
    }

    fn get(&self, from: CandidateId, to: CandidateId) -> VoteWeight {
        self.cells[from.0 * self.size + to.0]
    }

    fn set(&mut self, from: CandidateId, to: CandidateId, value: VoteWeight) {
        self.cells[from.0 * self.size + to.0] = value;
    }

    fn add(&mut self, from: CandidateId, to: CandidateId, value: VoteWeight) {
        self.cells[from.0 * self.size + to.0] += value;
    }

    fn to_rows(&self) -> Vec<Vec<f64>> {
        self.cells
            .chunks(self.size.max(1))
            .take(self.size)
            .map(|row| row.iter().map(|vw| vw.0).collect())
            .collect()
    }
}

// The bijection between candidate names and their position in the tables.
#[derive(Eq, PartialEq, Debug, Clone)]
pub(crate) struct CandidateSet {
    names: Vec<String>,
    ids: HashMap<String, CandidateId>,
}

impl CandidateSet {
    fn new(names: &[String]) -> Result<CandidateSet, VotingErrors> {
        let mut ids: HashMap<String, CandidateId> = HashMap::new();
        for (idx, name) in names.iter().enumerate() {
            let previous = ids.insert(name.clone(), CandidateId(idx));
            ensure!(previous.is_none(), DuplicateCandidateSnafu { name });
        }
        Ok(CandidateSet {
            names: names.to_vec(),
            ids,
        })
    }

    fn len(&self) -> usize {
        self.names.len()
    }

    fn id(&self, name: &str) -> Result<CandidateId, VotingErrors> {
        self.ids
            .get(name)
            .copied()
            .context(UnknownCandidateSnafu { name })
    }

    fn all_ids(&self) -> impl Iterator<Item = CandidateId> {
        (0..self.len()).map(CandidateId)
    }

    fn name(&self, cid: CandidateId) -> &String {
        &self.names[cid.0]
    }

    /// Resolves every name of the ballot, rejecting the ballot as a whole if
    /// one of them is unknown or repeated.
    fn check_ballot(&self, ballot: &Ballot) -> Result<CheckedBallot, VotingErrors> {
        let weight = VoteWeight::checked(ballot.weight)?;
        let mut seen: HashSet<CandidateId> = HashSet::new();
        let mut ranks: Vec<CandidateId> = Vec::with_capacity(ballot.candidates.len());
        for name in ballot.candidates.iter() {
            let cid = self.id(name)?;
            ensure!(seen.insert(cid), MalformedBallotSnafu { name });
            ranks.push(cid);
        }
        Ok(CheckedBallot { ranks, weight })
    }
}

// A ballot whose names all resolved to distinct candidates.
#[derive(PartialEq, Debug, Clone)]
struct CheckedBallot {
    ranks: Vec<CandidateId>,
    weight: VoteWeight,
}

/// Checks the parts of a ballot that do not depend on a candidate set.
pub(crate) fn check_ballot_shape(ballot: &Ballot) -> Result<(), VotingErrors> {
    VoteWeight::checked(ballot.weight)?;
    let mut seen: HashSet<&String> = HashSet::new();
    for name in ballot.candidates.iter() {
        ensure!(seen.insert(name), MalformedBallotSnafu { name });
    }
    Ok(())
}

// **** Preference matrix ****

/// Pairwise preferences between a fixed set of candidates.
///
/// Cell `(a, b)` holds the total ballot weight ranking `a` strictly above `b`.
/// The strongest paths are computed on the first call to [`PreferenceMatrix::solve`]
/// and kept until the matrix changes again.
#[derive(Debug, Clone)]
pub struct PreferenceMatrix {
    candidates: CandidateSet,
    prefs: SquareTable,
    strong: OnceCell<StrongMatrix>,
}

impl PreferenceMatrix {
    pub fn new(candidates: &[String]) -> Result<PreferenceMatrix, VotingErrors> {
        let candidates = CandidateSet::new(candidates)?;
        let prefs = SquareTable::zeros(candidates.len());
        Ok(PreferenceMatrix {
            candidates,
            prefs,
            strong: OnceCell::new(),
        })
    }

    /// The candidates, in the order given at construction.
    pub fn candidates(&self) -> &[String] {
        &self.candidates.names
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.len() == 0
    }

    /// Adds `weight` to the preference of `from` over `to`.
    ///
    /// Nothing is written if one of the names is unknown. Self preferences are
    /// ignored.
    pub fn add_edge(&mut self, from: &str, to: &str, weight: f64) -> Result<(), VotingErrors> {
        let from_id = self.candidates.id(from)?;
        let to_id = self.candidates.id(to)?;
        let weight = VoteWeight::checked(weight)?;
        if from_id != to_id {
            self.prefs.add(from_id, to_id, weight);
            self.invalidate();
        }
        Ok(())
    }

    pub fn get(&self, from: &str, to: &str) -> Result<f64, VotingErrors> {
        let from_id = self.candidates.id(from)?;
        let to_id = self.candidates.id(to)?;
        Ok(self.prefs.get(from_id, to_id).0)
    }

    /// The full matrix, rows and columns in candidate order.
    pub fn pairwise(&self) -> Vec<Vec<f64>> {
        self.prefs.to_rows()
    }

    pub fn ingest_ballot(&mut self, ballot: &Ballot) -> Result<(), VotingErrors> {
        self.ingest(std::slice::from_ref(ballot))
    }

    /// Credits every candidate of each ballot over every candidate ranked below it.
    ///
    /// All the ballots are checked before the matrix is touched: if one of them
    /// fails, none of them is counted.
    pub fn ingest(&mut self, ballots: &[Ballot]) -> Result<(), VotingErrors> {
        let checked: Vec<CheckedBallot> = ballots
            .iter()
            .map(|b| self.candidates.check_ballot(b))
            .collect::<Result<_, _>>()?;
        debug!("ingest: {:?} ballots checked", checked.len());

        for cb in checked.iter() {
            for (pos, &higher) in cb.ranks.iter().enumerate() {
                for &lower in cb.ranks[pos + 1..].iter() {
                    self.prefs.add(higher, lower, cb.weight);
                }
            }
        }
        let total: VoteWeight = checked.iter().map(|cb| cb.weight).sum();
        debug!("ingest: total weight added: {:?}", total.0);
        if !checked.is_empty() {
            self.invalidate();
        }
        Ok(())
    }

    /// Adds the preferences of another matrix built over the same candidates.
    ///
    /// Matrices filled from disjoint batches of ballots can be merged this way.
    pub fn merge(&mut self, other: &PreferenceMatrix) -> Result<(), VotingErrors> {
        ensure!(
            self.candidates.names == other.candidates.names,
            CandidateMismatchSnafu {}
        );
        for (cell, other_cell) in self.prefs.cells.iter_mut().zip(other.prefs.cells.iter()) {
            *cell += *other_cell;
        }
        self.invalidate();
        Ok(())
    }

    /// Computes the strongest paths, or returns the ones computed since the
    /// last change to the matrix.
    pub fn solve(&self) -> &StrongMatrix {
        self.strong.get_or_init(|| {
            debug!("solve: computing strongest paths for {:?} candidates", self.len());
            StrongMatrix {
                candidates: self.candidates.clone(),
                strong: strongest_paths(&self.prefs),
            }
        })
    }

    fn invalidate(&mut self) {
        if self.strong.take().is_some() {
            debug!("invalidate: dropping cached strongest paths");
        }
    }
}

// Widest path closure over the direct majority beats.
fn strongest_paths(prefs: &SquareTable) -> SquareTable {
    let n = prefs.size;
    let mut strong = SquareTable::zeros(n);
    let ids = || (0..n).map(CandidateId);

    for i in ids() {
        for j in ids() {
            if i != j && prefs.get(i, j) > prefs.get(j, i) {
                strong.set(i, j, prefs.get(i, j));
            }
        }
    }

    // Updates are done in place: the paths found through one intermediate
    // candidate are used when relaxing through the next ones.
    for i in ids() {
        for j in ids() {
            if j == i {
                continue;
            }
            for k in ids() {
                if k == i || k == j {
                    continue;
                }
                let through = strong.get(j, i).min(strong.get(i, k));
                let widest = strong.get(j, k).max(through);
                strong.set(j, k, widest);
            }
        }
    }
    strong
}

// **** Strongest paths and ranking ****

/// The strength of the strongest beatpath between every pair of candidates.
#[derive(PartialEq, Debug, Clone)]
pub struct StrongMatrix {
    candidates: CandidateSet,
    strong: SquareTable,
}

impl StrongMatrix {
    pub fn candidates(&self) -> &[String] {
        &self.candidates.names
    }

    pub fn get(&self, from: &str, to: &str) -> Result<f64, VotingErrors> {
        let from_id = self.candidates.id(from)?;
        let to_id = self.candidates.id(to)?;
        Ok(self.strong.get(from_id, to_id).0)
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.strong.to_rows()
    }

    /// For each candidate, in candidate order, the number of candidates it
    /// beats through its strongest paths.
    pub fn scores(&self) -> Vec<usize> {
        self.candidates
            .all_ids()
            .map(|i| {
                self.candidates
                    .all_ids()
                    .filter(|&j| j != i && self.strong.get(i, j) > self.strong.get(j, i))
                    .count()
            })
            .collect()
    }

    pub fn tiers(&self) -> Vec<RankTier> {
        let scores = self.scores();
        let mut buckets: Vec<Vec<CandidateId>> = vec![Vec::new(); scores.len()];
        for (cid, score) in self.candidates.all_ids().zip(scores.iter()) {
            buckets[*score].push(cid);
        }

        let mut tiers: Vec<RankTier> = Vec::new();
        for (score, bucket) in buckets.iter().enumerate().rev() {
            if bucket.is_empty() {
                continue;
            }
            tiers.push(RankTier {
                rank: (tiers.len() + 1) as u32,
                score,
                candidates: bucket
                    .iter()
                    .map(|cid| self.candidates.name(*cid).clone())
                    .collect(),
            });
        }
        tiers
    }

    /// Groups the candidates by the number of candidates they beat, most wins first.
    pub fn rank(&self) -> Ranking {
        self.tiers().into_iter().map(|t| t.candidates).collect()
    }

    pub fn winners(&self) -> Vec<String> {
        self.rank().into_iter().next().unwrap_or_default()
    }

    /// One line per tier, `"<rank>: <candidates>"`.
    pub fn render(&self) -> String {
        render_ranking(&self.rank())
    }
}

pub fn render_ranking(ranking: &[Vec<String>]) -> String {
    let mut out = String::new();
    for (idx, tier) in ranking.iter().enumerate() {
        out.push_str(&format!("{}: {}\n", idx + 1, tier.join(", ")));
    }
    out
}

/// The candidates named by the ballots, in order of first appearance.
pub fn infer_candidates(ballots: &[Ballot]) -> Vec<String> {
    let mut seen: HashSet<&String> = HashSet::new();
    let mut res: Vec<String> = Vec::new();
    for name in ballots.iter().flat_map(|b| b.candidates.iter()) {
        if seen.insert(name) {
            res.push(name.clone());
        }
    }
    res
}

/// Runs the Schulze method over the given ballots.
///
/// Arguments:
/// * `ballots` the ballots to count
/// * `candidates` the registered candidates for this election. If not provided, the
/// candidates will be inferred from the ballots.
pub fn run_schulze(
    ballots: &[Ballot],
    candidates: Option<&[String]>,
) -> Result<SchulzeResult, VotingErrors> {
    let candidates: Vec<String> = match candidates {
        Some(cs) => cs.to_vec(),
        None => infer_candidates(ballots),
    };
    info!(
        "run_schulze: Processing {:?} ballots, {:?} candidates",
        ballots.len(),
        candidates.len()
    );
    for (idx, name) in candidates.iter().enumerate() {
        info!("Candidate: {}: {}", idx + 1, name);
    }

    let mut matrix = PreferenceMatrix::new(&candidates)?;
    matrix.ingest(ballots)?;
    debug!("run_schulze: pairwise: {:?}", matrix.pairwise());

    let strong = matrix.solve();
    debug!("run_schulze: strongest paths: {:?}", strong.to_rows());

    let tiers = strong.tiers();
    for tier in tiers.iter() {
        info!(
            "Rank {}: {:?} (beats {} candidates)",
            tier.rank, tier.candidates, tier.score
        );
    }

    Ok(SchulzeResult {
        candidates,
        pairwise: matrix.pairwise(),
        strongest_paths: strong.to_rows(),
        scores: strong.scores(),
        tiers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|s| s.to_string()).collect()
    }

    fn ballot(xs: &[&str], weight: f64) -> Ballot {
        Ballot::with_weight(&names(xs), weight)
    }

    fn abc() -> PreferenceMatrix {
        PreferenceMatrix::new(&names(&["A", "B", "C"])).unwrap()
    }

    #[test]
    fn duplicate_candidates_are_rejected() {
        let res = PreferenceMatrix::new(&names(&["A", "B", "A"]));
        assert_eq!(
            res.unwrap_err(),
            VotingErrors::DuplicateCandidate {
                name: "A".to_string()
            }
        );
    }

    #[test]
    fn add_edge_accumulates() {
        let mut m = abc();
        m.add_edge("A", "B", 2.0).unwrap();
        m.add_edge("A", "B", 0.5).unwrap();
        assert_eq!(m.get("A", "B").unwrap(), 2.5);
        assert_eq!(m.get("B", "A").unwrap(), 0.0);
    }

    #[test]
    fn add_edge_ignores_the_diagonal() {
        let mut m = abc();
        m.add_edge("A", "A", 3.0).unwrap();
        assert_eq!(m.get("A", "A").unwrap(), 0.0);
    }

    #[test]
    fn add_edge_unknown_candidate_writes_nothing() {
        let mut m = abc();
        let before = m.pairwise();
        assert_eq!(
            m.add_edge("A", "Z", 1.0).unwrap_err(),
            VotingErrors::UnknownCandidate {
                name: "Z".to_string()
            }
        );
        assert!(matches!(
            m.get("Z", "A"),
            Err(VotingErrors::UnknownCandidate { .. })
        ));
        assert_eq!(m.pairwise(), before);
    }

    #[test]
    fn negative_weights_are_rejected() {
        let mut m = abc();
        assert!(matches!(
            m.add_edge("A", "B", -1.0),
            Err(VotingErrors::InvalidWeight { .. })
        ));
        assert!(matches!(
            m.ingest(&[ballot(&["A", "B"], f64::NAN)]),
            Err(VotingErrors::InvalidWeight { .. })
        ));
        assert_eq!(m.get("A", "B").unwrap(), 0.0);
    }

    #[test]
    fn ingest_credits_all_lower_ranked_candidates() {
        let mut m = abc();
        m.ingest(&[ballot(&["A", "B", "C"], 2.0)]).unwrap();
        assert_eq!(
            m.pairwise(),
            vec![
                vec![0.0, 2.0, 2.0],
                vec![0.0, 0.0, 2.0],
                vec![0.0, 0.0, 0.0]
            ]
        );
    }

    #[test]
    fn ingest_gives_no_credit_to_unranked_candidates() {
        let mut m = PreferenceMatrix::new(&names(&["A", "B", "C", "D"])).unwrap();
        m.ingest(&[ballot(&["C", "A"], 1.0)]).unwrap();
        assert_eq!(m.get("C", "A").unwrap(), 1.0);
        for other in ["B", "D"] {
            assert_eq!(m.get("A", other).unwrap(), 0.0);
            assert_eq!(m.get(other, "A").unwrap(), 0.0);
            assert_eq!(m.get("C", other).unwrap(), 0.0);
        }
        assert_eq!(m.get("B", "D").unwrap(), 0.0);
        assert_eq!(m.get("D", "B").unwrap(), 0.0);
    }

    #[test]
    fn ingest_with_unknown_candidate_leaves_matrix_unchanged() {
        let mut m = abc();
        m.ingest(&[ballot(&["A", "B"], 1.0)]).unwrap();
        let before = m.pairwise();
        let res = m.ingest(&[ballot(&["C", "B"], 1.0), ballot(&["A", "Z", "B"], 1.0)]);
        assert_eq!(
            res.unwrap_err(),
            VotingErrors::UnknownCandidate {
                name: "Z".to_string()
            }
        );
        assert_eq!(m.pairwise(), before);
    }

    #[test]
    fn ballot_with_repeated_candidate_is_rejected_whole() {
        let mut m = abc();
        let res = m.ingest_ballot(&ballot(&["A", "B", "A"], 1.0));
        assert_eq!(
            res.unwrap_err(),
            VotingErrors::MalformedBallot {
                name: "A".to_string()
            }
        );
        assert_eq!(m.get("A", "B").unwrap(), 0.0);
    }

    #[test]
    fn solve_is_cached_and_invalidated_by_ingestion() {
        let mut m = abc();
        m.ingest(&[ballot(&["A", "B", "C"], 1.0)]).unwrap();
        let first = m.solve().clone();
        let second = m.solve();
        assert!(std::ptr::eq(second, m.solve()));
        assert_eq!(&first, second);

        m.ingest(&[ballot(&["C", "B", "A"], 3.0)]).unwrap();
        let third = m.solve();
        assert_ne!(&first, third);
        assert_eq!(third.winners(), names(&["C"]));
    }

    #[test]
    fn no_ballots_gives_a_single_tier() {
        let m = abc();
        let strong = m.solve();
        assert_eq!(strong.rank(), vec![names(&["A", "B", "C"])]);
        assert_eq!(strong.scores(), vec![0, 0, 0]);
    }

    #[test]
    fn single_candidate_and_empty_sets() {
        let m = PreferenceMatrix::new(&names(&["A"])).unwrap();
        assert_eq!(m.solve().rank(), vec![names(&["A"])]);

        let empty = PreferenceMatrix::new(&[]).unwrap();
        assert!(empty.is_empty());
        assert!(empty.solve().rank().is_empty());
        assert_eq!(empty.solve().render(), "");
    }

    #[test]
    fn condorcet_cycle_is_a_three_way_tie() {
        let mut m = abc();
        m.ingest(&[
            ballot(&["A", "B", "C"], 1.0),
            ballot(&["B", "C", "A"], 1.0),
            ballot(&["C", "A", "B"], 1.0),
        ])
        .unwrap();
        // Every direct beat is 2 against 1.
        assert_eq!(m.get("A", "B").unwrap(), 2.0);
        assert_eq!(m.get("B", "C").unwrap(), 2.0);
        assert_eq!(m.get("C", "A").unwrap(), 2.0);

        // The closure also reaches each loser through the third candidate:
        // B -> C -> A is a path of strength 2 against the direct beat of A over B.
        let strong = m.solve();
        for (x, y) in [("A", "B"), ("B", "C"), ("C", "A")] {
            assert_eq!(strong.get(x, y).unwrap(), 2.0);
            assert_eq!(strong.get(y, x).unwrap(), 2.0);
        }
        assert_eq!(strong.rank(), vec![names(&["A", "B", "C"])]);
    }

    #[test]
    fn weighted_scenario() {
        let _ = env_logger::try_init();
        let mut m = abc();
        m.ingest(&[
            ballot(&["A", "B", "C"], 3.0),
            ballot(&["B", "C", "A"], 2.0),
            ballot(&["C", "A", "B"], 4.0),
        ])
        .unwrap();
        assert_eq!(
            m.pairwise(),
            vec![
                vec![0.0, 7.0, 3.0],
                vec![2.0, 0.0, 5.0],
                vec![6.0, 4.0, 0.0]
            ]
        );

        let strong = m.solve();
        assert_eq!(
            strong.to_rows(),
            vec![
                vec![0.0, 7.0, 5.0],
                vec![5.0, 0.0, 5.0],
                vec![6.0, 6.0, 0.0]
            ]
        );
        assert_eq!(strong.scores(), vec![1, 0, 2]);
        assert_eq!(strong.rank(), vec![names(&["C"]), names(&["A"]), names(&["B"])]);
        assert_eq!(strong.render(), "1: C\n2: A\n3: B\n");
    }

    // Classic example from the Schulze method literature: 45 voters, 5 candidates.
    #[test]
    fn wikipedia_example() {
        let mut m = PreferenceMatrix::new(&names(&["A", "B", "C", "D", "E"])).unwrap();
        m.ingest(&[
            ballot(&["A", "C", "B", "E", "D"], 5.0),
            ballot(&["A", "D", "E", "C", "B"], 5.0),
            ballot(&["B", "E", "D", "A", "C"], 8.0),
            ballot(&["C", "A", "B", "E", "D"], 3.0),
            ballot(&["C", "A", "E", "B", "D"], 7.0),
            ballot(&["C", "B", "A", "D", "E"], 2.0),
            ballot(&["D", "C", "E", "B", "A"], 7.0),
            ballot(&["E", "B", "A", "D", "C"], 8.0),
        ])
        .unwrap();
        assert_eq!(m.get("A", "B").unwrap(), 20.0);
        assert_eq!(m.get("A", "D").unwrap(), 30.0);
        assert_eq!(m.get("D", "A").unwrap(), 15.0);

        let strong = m.solve();
        assert_eq!(
            strong.to_rows(),
            vec![
                vec![0.0, 28.0, 28.0, 30.0, 24.0],
                vec![25.0, 0.0, 28.0, 33.0, 24.0],
                vec![25.0, 29.0, 0.0, 29.0, 24.0],
                vec![25.0, 28.0, 28.0, 0.0, 24.0],
                vec![25.0, 28.0, 28.0, 31.0, 0.0]
            ]
        );
        assert_eq!(
            strong.rank(),
            vec![
                names(&["E"]),
                names(&["A"]),
                names(&["C"]),
                names(&["B"]),
                names(&["D"])
            ]
        );
    }

    #[test]
    fn merged_batches_match_a_single_ingestion() {
        let ballots = vec![
            ballot(&["A", "B", "C"], 3.0),
            ballot(&["B", "C", "A"], 2.0),
            ballot(&["C", "A", "B"], 4.0),
            ballot(&["B", "A"], 1.5),
        ];
        let mut all = abc();
        all.ingest(&ballots).unwrap();

        let mut left = abc();
        left.ingest(&ballots[..2]).unwrap();
        let mut right = abc();
        right.ingest(&ballots[2..]).unwrap();
        let _ = left.solve();
        left.merge(&right).unwrap();

        assert_eq!(left.pairwise(), all.pairwise());
        assert_eq!(left.solve(), all.solve());
    }

    #[test]
    fn merge_requires_the_same_candidates() {
        let mut m = abc();
        let other = PreferenceMatrix::new(&names(&["A", "C", "B"])).unwrap();
        assert_eq!(m.merge(&other).unwrap_err(), VotingErrors::CandidateMismatch {});
    }

    #[test]
    fn extra_weight_never_hurts_the_preferred_candidate() {
        let names3 = names(&["A", "B", "C"]);
        let others = vec![
            ballot(&["B", "C", "A"], 2.0),
            ballot(&["C", "A", "B"], 4.0),
            ballot(&["B", "A"], 3.0),
        ];
        let mut previous: Option<Vec<usize>> = None;
        for w in 0..12 {
            let mut ballots = others.clone();
            ballots.push(ballot(&["A", "B"], w as f64));
            let res = run_schulze(&ballots, Some(&names3)).unwrap();
            if let Some(prev) = previous {
                assert!(res.scores[0] >= prev[0], "A lost ground at weight {}", w);
                assert!(res.scores[1] <= prev[1], "B gained ground at weight {}", w);
            }
            previous = Some(res.scores.clone());
        }
    }

    #[test]
    fn run_schulze_infers_candidates_in_order_of_appearance() {
        let ballots = vec![ballot(&["B", "A"], 1.0), ballot(&["C", "B"], 1.0)];
        let res = run_schulze(&ballots, None).unwrap();
        assert_eq!(res.candidates, names(&["B", "A", "C"]));
        assert_eq!(res.winners(), names(&["C"]));
        assert_eq!(
            res.tiers,
            vec![
                RankTier {
                    rank: 1,
                    score: 2,
                    candidates: names(&["C"])
                },
                RankTier {
                    rank: 2,
                    score: 1,
                    candidates: names(&["B"])
                },
                RankTier {
                    rank: 3,
                    score: 0,
                    candidates: names(&["A"])
                },
            ]
        );
    }

    #[test]
    fn tiers_skip_empty_scores() {
        // A and B tie at the top, C is beaten by both.
        let res = run_schulze(
            &[ballot(&["A", "B", "C"], 1.0), ballot(&["B", "A", "C"], 1.0)],
            None,
        )
        .unwrap();
        assert_eq!(res.ranking(), vec![names(&["A", "B"]), names(&["C"])]);
        assert_eq!(res.tiers[0].score, 1);
        assert_eq!(res.tiers[1].rank, 2);
        assert_eq!(render_ranking(&res.ranking()), "1: A, B\n2: C\n");
    }
}
