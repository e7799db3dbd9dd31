use crate::*;

/// A builder for adding ballots.
///
/// ```
/// pub use schulze_voting::builder::Builder;
/// # use schulze_voting::VotingErrors;
///
/// let mut builder = Builder::new()
///     .candidates(&["Anna".to_string(), "Bob".to_string(), "Clara".to_string()])?;
///
/// builder.add_ballot_simple(&["Anna".to_string(), "Clara".to_string()])?;
/// builder.add_ballot(&["Bob".to_string(), "Anna".to_string()], 2.0)?;
///
/// let result = builder.tabulate()?;
/// assert_eq!(result.winners(), vec!["Bob".to_string()]);
///
/// # Ok::<(), VotingErrors>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder {
    pub(crate) _candidates: Option<CandidateSet>,
    pub(crate) _ballots: Vec<Ballot>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder::default()
    }

    /// Declares the candidates of the election.
    ///
    /// Without a declaration, the candidates are the ones named by the ballots,
    /// in order of first appearance.
    pub fn candidates(self, cands: &[String]) -> Result<Builder, VotingErrors> {
        let set = CandidateSet::new(cands)?;
        for b in self._ballots.iter() {
            set.check_ballot(b)?;
        }
        Ok(Builder {
            _candidates: Some(set),
            _ballots: self._ballots,
        })
    }

    /// Adds a ballot cast by a single voter.
    pub fn add_ballot_simple(&mut self, candidates: &[String]) -> Result<(), VotingErrors> {
        self.add_ballot(candidates, 1.0)
    }

    /// Adds a ballot cast by `weight` voters.
    ///
    /// candidates: the choices of the voter, best first. A candidate may appear at most once.
    pub fn add_ballot(&mut self, candidates: &[String], weight: f64) -> Result<(), VotingErrors> {
        self.add_ballot_2(&Ballot::with_weight(candidates, weight))
    }

    pub fn add_ballot_2(&mut self, ballot: &Ballot) -> Result<(), VotingErrors> {
        match self._candidates.as_ref() {
            Some(set) => {
                set.check_ballot(ballot)?;
            }
            None => check_ballot_shape(ballot)?,
        }
        self._ballots.push(ballot.clone());
        Ok(())
    }

    pub fn ballots(&self) -> &[Ballot] {
        &self._ballots
    }

    pub fn tabulate(&self) -> Result<SchulzeResult, VotingErrors> {
        let declared: Option<&[String]> = self._candidates.as_ref().map(|s| s.names.as_slice());
        run_schulze(&self._ballots, declared)
    }
}
