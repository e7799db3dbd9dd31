// ********* Input data structures ***********

use snafu::Snafu;

/// One voter's ranking, best to worst, with the number of voters who cast it.
///
/// Candidates that are not listed abstain: the ballot says nothing about how
/// they compare to each other or to the listed candidates.
#[derive(PartialEq, Debug, Clone)]
pub struct Ballot {
    pub candidates: Vec<String>,
    pub weight: f64,
}

impl Ballot {
    /// A ballot cast by a single voter.
    pub fn new(candidates: &[String]) -> Ballot {
        Ballot::with_weight(candidates, 1.0)
    }

    pub fn with_weight(candidates: &[String], weight: f64) -> Ballot {
        Ballot {
            candidates: candidates.to_vec(),
            weight,
        }
    }
}

// ******** Output data structures *********

/// Ordered preference tiers. The first tier holds the winners; candidates
/// inside a tier are tied.
pub type Ranking = Vec<Vec<String>>;

/// One tier of the final ranking.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RankTier {
    /// 1-based position of the tier.
    pub rank: u32,
    /// Number of candidates beaten by each member of the tier.
    pub score: usize,
    pub candidates: Vec<String>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct SchulzeResult {
    pub candidates: Vec<String>,
    /// pairwise[i][j]: total weight ranking candidate i above candidate j.
    pub pairwise: Vec<Vec<f64>>,
    /// strongest_paths[i][j]: strength of the widest beatpath from i to j.
    pub strongest_paths: Vec<Vec<f64>>,
    /// Number of candidates beaten by each candidate, in candidate order.
    pub scores: Vec<usize>,
    pub tiers: Vec<RankTier>,
}

impl SchulzeResult {
    pub fn ranking(&self) -> Ranking {
        self.tiers.iter().map(|t| t.candidates.clone()).collect()
    }

    pub fn winners(&self) -> Vec<String> {
        self.tiers
            .first()
            .map(|t| t.candidates.clone())
            .unwrap_or_default()
    }
}

/// Errors that prevent the tabulation from completing.
#[derive(PartialEq, Debug, Clone, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum VotingErrors {
    #[snafu(display("candidate {name:?} is declared more than once"))]
    DuplicateCandidate { name: String },
    #[snafu(display("candidate {name:?} is not part of this election"))]
    UnknownCandidate { name: String },
    #[snafu(display("ballot ranks candidate {name:?} more than once"))]
    MalformedBallot { name: String },
    #[snafu(display("ballot weight must be a finite non-negative number, got {weight}"))]
    InvalidWeight { weight: f64 },
    #[snafu(display("preference matrices are built over different candidates"))]
    CandidateMismatch {},
}
